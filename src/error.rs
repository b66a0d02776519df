use thiserror::Error;

#[derive(Error, Debug)]
pub enum RentalLedgerError {
    #[error("Invalid tax rate {0}: must be between 0.0 and 1.0")]
    InvalidTaxRate(f64),

    #[error("Invalid report month {0}: must be between 1 and 12")]
    InvalidReportMonth(u32),

    #[error("Empty report window: end date {end} is before start date {start}")]
    EmptyWindow { start: String, end: String },

    #[error("Unknown ledger entry id {0}: cannot amend an entry that was never appended")]
    UnknownEntry(u64),

    #[error("Date calculation error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RentalLedgerError>;
