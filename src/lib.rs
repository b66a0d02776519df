//! # Rental Ledger
//!
//! A library for consolidating rental-unit lease transactions into one
//! summary row per physical unit and deriving time-windowed financial
//! reports from them.
//!
//! ## Core Concepts
//!
//! - **Transaction Record**: one raw data-entry event for a unit, covering a
//!   landlord-contract period and/or a tenant-occupancy period with the
//!   monetary figures recorded at that time
//! - **Consolidated Unit Record**: the merge of every raw entry for one
//!   (building, unit) pair — widest date spans, summed disbursements,
//!   maximum monthly rates, first-seen identity text
//! - **Lifetime report**: pro-rated P&L over the whole occupancy span,
//!   using a fixed 30-day-month approximation
//! - **Period report**: strict-overlap attribution — the full monthly rate
//!   is credited to any reporting window the underlying range touches
//! - **Cash-flow report**: per-month cash view separating recurring rents
//!   from one-time deposits and commissions
//!
//! ## Example
//!
//! ```rust,ignore
//! use rental_ledger::*;
//!
//! let rows = vec![
//!     RawRow {
//!         building: "T1".into(),
//!         unit: "A101".into(),
//!         contract_start: "2024-01-01".into(),
//!         contract_end: "2024-12-31".into(),
//!         landlord_rent: "4.000.000".into(),
//!         ..Default::default()
//!     },
//!     RawRow {
//!         building: "T1".into(),
//!         unit: "A101".into(),
//!         checkin: "2024-03-01".into(),
//!         checkout: "2024-09-01".into(),
//!         tenant_rent: "6.000.000".into(),
//!         ..Default::default()
//!     },
//! ];
//!
//! let report = run_report(
//!     &rows,
//!     ReportMode::Month { year: 2024, month: 3 },
//!     &ReportOptions::default(),
//! )?;
//! ```

pub mod aggregate;
pub mod error;
pub mod export;
pub mod finance;
pub mod ingestion;
pub mod normalize;
pub mod schema;
pub mod store;
pub mod utils;
pub mod window;

pub use aggregate::{aggregate, rule_for, CombineRule, FieldClass};
pub use error::{RentalLedgerError, Result};
pub use export::{
    annotate_note, consolidated_to_cells, format_date, format_date_range, format_money,
    CONSOLIDATED_HEADER,
};
pub use finance::{
    cash_flow_report, lifetime_report, lifetime_unit, occupied_months, period_report,
    CashFlowSummary, PeriodSummary, ReportFlag, ReportOptions, UnitCashFlow, UnitLifetimeReport,
    UnitPeriodReport,
};
pub use ingestion::{EntryDraft, RawRow};
pub use normalize::{
    normalize_date, normalize_money, normalize_text, normalize_unit_id, CellValue,
};
pub use schema::*;
pub use store::{EntryId, LedgerEntry, LedgerStore};
pub use window::{is_active, ActivityCriterion, ReportWindow};

use chrono::NaiveDate;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// The period-vs-all-time toggle from the report configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportMode {
    AllTime,
    Month { year: i32, month: u32 },
    Span { start: NaiveDate, end: NaiveDate },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LedgerReport {
    Lifetime(Vec<UnitLifetimeReport>),
    Period(PeriodSummary),
}

pub struct LedgerProcessor;

impl LedgerProcessor {
    /// Normalizes raw store rows and merges them into one record per unit.
    pub fn consolidate(rows: &[RawRow]) -> Vec<ConsolidatedUnitRecord> {
        let records = TransactionRecord::from_table(rows);
        let consolidated = aggregate::aggregate(&records);
        debug!(
            "Consolidated {} raw rows into {} units",
            rows.len(),
            consolidated.len()
        );
        consolidated
    }

    /// One full report pass: normalize, consolidate, then compute the
    /// requested view. Pure function of its inputs; no state is carried
    /// between invocations.
    pub fn process(
        rows: &[RawRow],
        mode: ReportMode,
        options: &ReportOptions,
    ) -> Result<LedgerReport> {
        options.validate()?;

        info!("Running {:?} report over {} rows", mode, rows.len());
        let consolidated = Self::consolidate(rows);

        match mode {
            ReportMode::AllTime => Ok(LedgerReport::Lifetime(finance::lifetime_report(
                &consolidated,
            ))),
            ReportMode::Month { year, month } => {
                let window = ReportWindow::month(year, month)?;
                Ok(LedgerReport::Period(finance::period_report(
                    &consolidated,
                    window,
                    options,
                )?))
            }
            ReportMode::Span { start, end } => {
                let window = ReportWindow::span(start, end)?;
                Ok(LedgerReport::Period(finance::period_report(
                    &consolidated,
                    window,
                    options,
                )?))
            }
        }
    }
}

/// Convenience wrapper over [`LedgerProcessor::consolidate`].
pub fn consolidate_ledger(rows: &[RawRow]) -> Vec<ConsolidatedUnitRecord> {
    LedgerProcessor::consolidate(rows)
}

/// Convenience wrapper over [`LedgerProcessor::process`].
pub fn run_report(
    rows: &[RawRow],
    mode: ReportMode,
    options: &ReportOptions,
) -> Result<LedgerReport> {
    LedgerProcessor::process(rows, mode, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a101_rows() -> Vec<RawRow> {
        vec![
            RawRow {
                building: "T1".into(),
                unit: "A101".into(),
                contract_start: "2024-01-01".into(),
                contract_end: "2024-12-31".into(),
                landlord_rent: "4.000.000".into(),
                ..Default::default()
            },
            RawRow {
                building: "T1".into(),
                unit: "A101".into(),
                checkin: "2024-03-01".into(),
                checkout: "2024-09-01".into(),
                tenant_rent: "6.000.000".into(),
                tenant_payment: "6.000.000".into(),
                ..Default::default()
            },
        ]
    }

    #[test]
    fn test_consolidate_merges_contract_and_occupancy_entries() {
        let consolidated = consolidate_ledger(&a101_rows());
        assert_eq!(consolidated.len(), 1);

        let unit = &consolidated[0];
        assert_eq!(unit.unit_id, "A101");
        assert_eq!(unit.entry_count, 2);
        assert_eq!(
            unit.landlord_contract_start,
            NaiveDate::from_ymd_opt(2024, 1, 1)
        );
        assert_eq!(unit.tenant_checkout, NaiveDate::from_ymd_opt(2024, 9, 1));
        assert_eq!(unit.landlord_rent, 4_000_000.0);
        assert_eq!(unit.tenant_rent, 6_000_000.0);
        assert_eq!(unit.tenant_payment_received, 6_000_000.0);
    }

    #[test]
    fn test_all_time_mode_end_to_end() {
        let report = run_report(&a101_rows(), ReportMode::AllTime, &ReportOptions::default())
            .unwrap();

        let units = match report {
            LedgerReport::Lifetime(units) => units,
            other => panic!("expected lifetime report, got {:?}", other),
        };

        assert_eq!(units.len(), 1);
        let months = 184.0 / 30.0;
        assert!((units[0].net_profit - 2_000_000.0 * months).abs() < 1e-6);
    }

    #[test]
    fn test_month_mode_end_to_end() {
        let report = run_report(
            &a101_rows(),
            ReportMode::Month {
                year: 2024,
                month: 3,
            },
            &ReportOptions::default(),
        )
        .unwrap();

        let summary = match report {
            LedgerReport::Period(summary) => summary,
            other => panic!("expected period report, got {:?}", other),
        };

        assert_eq!(summary.units.len(), 1);
        assert_eq!(summary.units[0].cost, 4_000_000.0);
        assert_eq!(summary.units[0].revenue, 6_000_000.0);
        assert_eq!(summary.units[0].tax, 600_000.0);
        assert_eq!(summary.units[0].net_profit, 1_400_000.0);
    }

    #[test]
    fn test_invalid_options_rejected_up_front() {
        let result = run_report(
            &a101_rows(),
            ReportMode::AllTime,
            &ReportOptions { tax_rate: 7.0 },
        );
        assert!(matches!(result, Err(RentalLedgerError::InvalidTaxRate(_))));
    }
}
