use crate::error::{RentalLedgerError, Result};
use chrono::{Datelike, Days, NaiveDate};

pub fn first_day_of_month(year: i32, month: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or(RentalLedgerError::InvalidReportMonth(month))
}

pub fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap()
        .checked_sub_days(Days::new(1))
        .unwrap()
}

/// Parses a period string in the format "YYYY-MM" or "YYYY-MM:YYYY-MM"
/// Returns (start_date, end_date) spanning whole months
pub fn parse_period_string(period: &str) -> Result<(NaiveDate, NaiveDate)> {
    let parts: Vec<&str> = period.split(':').collect();

    match parts.len() {
        1 => {
            // Single month: "2024-03"
            let start_str = format!("{}-01", parts[0].trim());
            let start_date = NaiveDate::parse_from_str(&start_str, "%Y-%m-%d").map_err(|_| {
                RentalLedgerError::DateError(format!(
                    "Invalid date format in period: {}. Expected YYYY-MM",
                    parts[0]
                ))
            })?;

            let end_date = last_day_of_month(start_date.year(), start_date.month());
            Ok((start_date, end_date))
        }
        2 => {
            // Range: "2024-01:2024-03"
            let start_str = format!("{}-01", parts[0].trim());
            let start_date = NaiveDate::parse_from_str(&start_str, "%Y-%m-%d").map_err(|_| {
                RentalLedgerError::DateError(format!(
                    "Invalid start date format in period: {}. Expected YYYY-MM",
                    parts[0]
                ))
            })?;

            let end_str = format!("{}-01", parts[1].trim());
            let end_start_ref = NaiveDate::parse_from_str(&end_str, "%Y-%m-%d").map_err(|_| {
                RentalLedgerError::DateError(format!(
                    "Invalid end date format in period: {}. Expected YYYY-MM",
                    parts[1]
                ))
            })?;

            let end_date = last_day_of_month(end_start_ref.year(), end_start_ref.month());
            Ok((start_date, end_date))
        }
        _ => Err(RentalLedgerError::DateError(format!(
            "Invalid period format: {}. Expected 'YYYY-MM' or 'YYYY-MM:YYYY-MM'",
            period
        ))),
    }
}
