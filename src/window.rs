use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{RentalLedgerError, Result};
use crate::schema::ConsolidatedUnitRecord;
use crate::utils::{first_day_of_month, last_day_of_month, parse_period_string};

/// An inclusive reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReportWindow {
    /// Window covering one calendar month. The December window ends on
    /// 31 December; the rollover into next January only affects the
    /// end-of-month computation, not the window itself.
    pub fn month(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(RentalLedgerError::InvalidReportMonth(month));
        }

        Ok(Self {
            start: first_day_of_month(year, month)?,
            end: last_day_of_month(year, month),
        })
    }

    /// Arbitrary start/end window.
    pub fn span(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(RentalLedgerError::EmptyWindow {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Window from a "YYYY-MM" or "YYYY-MM:YYYY-MM" configuration string.
    pub fn from_period_string(period: &str) -> Result<Self> {
        let (start, end) = parse_period_string(period)?;
        Self::span(start, end)
    }

    /// Inclusive interval-overlap test against an optional date range.
    /// A range with either endpoint missing is never active.
    pub fn overlaps(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
        match (start, end) {
            (Some(s), Some(e)) => s <= self.end && e >= self.start,
            _ => false,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Which date range qualifies a record as active in a window. The two sides
/// are independent: a unit may carry landlord cost in a period with no
/// tenant, or the reverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityCriterion {
    Contract,
    Occupancy,
    Either,
}

pub fn is_active(
    record: &ConsolidatedUnitRecord,
    window: &ReportWindow,
    criterion: ActivityCriterion,
) -> bool {
    let contract = window.overlaps(record.landlord_contract_start, record.landlord_contract_end);
    let occupancy = window.overlaps(record.tenant_checkin, record.tenant_checkout);

    match criterion {
        ActivityCriterion::Contract => contract,
        ActivityCriterion::Occupancy => occupancy,
        ActivityCriterion::Either => contract || occupancy,
    }
}
