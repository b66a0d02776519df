use chrono::NaiveDate;

use crate::finance::{ReportFlag, UnitLifetimeReport};
use crate::schema::ConsolidatedUnitRecord;

/// Renders a monetary amount as a thousands-separated whole number, with
/// negative amounts parenthesized: -1500000 -> "(1,500,000)".
pub fn format_money(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if rounded < 0 {
        format!("({})", grouped)
    } else {
        grouped
    }
}

/// Display form of an optional date: dd/mm/yy, or empty when missing.
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%d/%m/%y").to_string())
        .unwrap_or_default()
}

/// Display form of a date range where either end may be missing.
pub fn format_date_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> String {
    match (start, end) {
        (Some(s), Some(e)) => format!("{} - {}", format_date(Some(s)), format_date(Some(e))),
        (Some(s), None) => format!("from {}", format_date(Some(s))),
        (None, Some(e)) => format!("until {}", format_date(Some(e))),
        (None, None) => String::new(),
    }
}

fn flag_tag(flag: &ReportFlag) -> &'static str {
    match flag {
        ReportFlag::MissingDates => "[missing dates]",
        ReportFlag::NegativeProfit => "[negative profit]",
        ReportFlag::ZeroMargin => "[zero margin]",
    }
}

/// Appends warning tags to a consolidated note. Suspicious figures annotate
/// the row rather than blocking the report.
pub fn annotate_note(note: &str, flags: &[ReportFlag]) -> String {
    if flags.is_empty() {
        return note.to_string();
    }

    let tags: Vec<&str> = flags.iter().map(flag_tag).collect();
    if note.is_empty() {
        tags.join(" ")
    } else {
        format!("{} {}", note, tags.join(" "))
    }
}

/// Column header for the consolidated export table, matching the store's
/// fixed column set plus the derived financial columns.
pub const CONSOLIDATED_HEADER: [&str; 18] = [
    "Building",
    "Unit",
    "Area",
    "Contract Start",
    "Contract End",
    "Check-in",
    "Check-out",
    "Landlord Rent",
    "Tenant Rent",
    "Paid to Landlord",
    "Landlord Deposit",
    "Received from Tenant",
    "Tenant Deposit",
    "Commission Total",
    "Expense Total",
    "Occupied Months",
    "Net Profit",
    "Note",
];

/// Serializes one consolidated row plus its lifetime financials as all-text
/// cells for the store writer. The persistence layer has no typed-cell write
/// path, so numbers and dates go out as strings.
pub fn consolidated_to_cells(
    record: &ConsolidatedUnitRecord,
    financials: &UnitLifetimeReport,
) -> Vec<String> {
    vec![
        record.building_id.clone(),
        record.unit_id.clone(),
        record.area.clone().unwrap_or_default(),
        format_date(record.landlord_contract_start),
        format_date(record.landlord_contract_end),
        format_date(record.tenant_checkin),
        format_date(record.tenant_checkout),
        format_money(record.landlord_rent),
        format_money(record.tenant_rent),
        format_money(record.landlord_payment_made),
        format_money(record.landlord_deposit_paid),
        format_money(record.tenant_payment_received),
        format_money(record.tenant_deposit_received),
        format_money(record.commissions.total()),
        format_money(record.expenses.total()),
        format!("{:.1}", financials.occupied_months),
        format_money(financials.net_profit),
        annotate_note(&record.note, &financials.flags),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0.0), "0");
        assert_eq!(format_money(999.0), "999");
        assert_eq!(format_money(1_500_000.0), "1,500,000");
        assert_eq!(format_money(4_000_000.0), "4,000,000");
        assert_eq!(format_money(-1_500_000.0), "(1,500,000)");
        assert_eq!(format_money(12_345.0), "12,345");
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1);
        assert_eq!(format_date(date), "01/03/24");
        assert_eq!(format_date(None), "");
    }

    #[test]
    fn test_format_date_range_partial_ends() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1);
        let end = NaiveDate::from_ymd_opt(2024, 12, 31);
        assert_eq!(format_date_range(start, end), "01/01/24 - 31/12/24");
        assert_eq!(format_date_range(start, None), "from 01/01/24");
        assert_eq!(format_date_range(None, end), "until 31/12/24");
        assert_eq!(format_date_range(None, None), "");
    }

    #[test]
    fn test_annotate_note() {
        assert_eq!(annotate_note("", &[]), "");
        assert_eq!(
            annotate_note("", &[ReportFlag::MissingDates]),
            "[missing dates]"
        );
        assert_eq!(
            annotate_note("Entry 1: from 01/01/24", &[ReportFlag::NegativeProfit]),
            "Entry 1: from 01/01/24 [negative profit]"
        );
    }
}
