use chrono::NaiveDate;
use log::debug;
use std::collections::HashMap;

use crate::export::{format_date_range, format_money};
use crate::schema::{ConsolidatedUnitRecord, TransactionRecord};

/// The field classes a raw record decomposes into for consolidation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldClass {
    /// Contract start, tenant check-in.
    StartDate,
    /// Contract end, tenant check-out.
    EndDate,
    /// Monthly rates: landlord rent, tenant rent.
    MonthlyRate,
    /// Discrete disbursement/collection events: payments, deposits,
    /// every commission field, every expense field.
    CumulativeAmount,
    /// Names and other identity text.
    IdentityText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombineRule {
    EarliestDate,
    LatestDate,
    MaxRate,
    SumAmount,
    FirstText,
}

/// The consolidation rule table. Rates merge by MAX: entries for the same
/// unit repeat the rate or leave it zero, so summing double-counts.
pub fn rule_for(class: FieldClass) -> CombineRule {
    match class {
        FieldClass::StartDate => CombineRule::EarliestDate,
        FieldClass::EndDate => CombineRule::LatestDate,
        FieldClass::MonthlyRate => CombineRule::MaxRate,
        FieldClass::CumulativeAmount => CombineRule::SumAmount,
        FieldClass::IdentityText => CombineRule::FirstText,
    }
}

fn combine_date(
    rule: CombineRule,
    acc: Option<NaiveDate>,
    value: Option<NaiveDate>,
) -> Option<NaiveDate> {
    match (acc, value) {
        (None, v) => v,
        (a, None) => a,
        (Some(a), Some(v)) => Some(match rule {
            CombineRule::EarliestDate => a.min(v),
            CombineRule::LatestDate => a.max(v),
            _ => a,
        }),
    }
}

fn combine_amount(rule: CombineRule, acc: f64, value: f64) -> f64 {
    match rule {
        CombineRule::MaxRate => acc.max(value),
        CombineRule::SumAmount => acc + value,
        _ => acc,
    }
}

fn combine_text(acc: Option<String>, value: &Option<String>) -> Option<String> {
    acc.or_else(|| value.clone())
}

/// Groups raw records by exact (building_id, unit_id) and merges each group
/// into one consolidated record per unit. Unit ids must already be
/// normalized by the caller. First-seen group order is preserved.
///
/// Records lacking both key fields cannot be grouped and pass through
/// one-to-one rather than erroring.
pub fn aggregate(records: &[TransactionRecord]) -> Vec<ConsolidatedUnitRecord> {
    let mut groups: Vec<Vec<&TransactionRecord>> = Vec::new();
    let mut index: HashMap<(&str, &str), usize> = HashMap::new();

    for record in records {
        if record.building_id.is_empty() && record.unit_id.is_empty() {
            groups.push(vec![record]);
            continue;
        }

        let key = (record.building_id.as_str(), record.unit_id.as_str());
        match index.get(&key) {
            Some(&i) => groups[i].push(record),
            None => {
                index.insert(key, groups.len());
                groups.push(vec![record]);
            }
        }
    }

    groups.iter().map(|group| merge_group(group)).collect()
}

fn merge_group(group: &[&TransactionRecord]) -> ConsolidatedUnitRecord {
    let first = group[0];
    let start_rule = rule_for(FieldClass::StartDate);
    let end_rule = rule_for(FieldClass::EndDate);
    let rate_rule = rule_for(FieldClass::MonthlyRate);
    let amount_rule = rule_for(FieldClass::CumulativeAmount);

    let mut merged = ConsolidatedUnitRecord {
        building_id: first.building_id.clone(),
        unit_id: first.unit_id.clone(),
        entry_count: group.len(),
        ..Default::default()
    };

    for record in group {
        merged.landlord_contract_start = combine_date(
            start_rule,
            merged.landlord_contract_start,
            record.landlord_contract_start,
        );
        merged.landlord_contract_end = combine_date(
            end_rule,
            merged.landlord_contract_end,
            record.landlord_contract_end,
        );
        merged.tenant_checkin = combine_date(start_rule, merged.tenant_checkin, record.tenant_checkin);
        merged.tenant_checkout =
            combine_date(end_rule, merged.tenant_checkout, record.tenant_checkout);

        merged.landlord_rent = combine_amount(rate_rule, merged.landlord_rent, record.landlord_rent);
        merged.tenant_rent = combine_amount(rate_rule, merged.tenant_rent, record.tenant_rent);

        merged.landlord_payment_made = combine_amount(
            amount_rule,
            merged.landlord_payment_made,
            record.landlord_payment_made,
        );
        merged.landlord_deposit_paid = combine_amount(
            amount_rule,
            merged.landlord_deposit_paid,
            record.landlord_deposit_paid,
        );
        merged.tenant_payment_received = combine_amount(
            amount_rule,
            merged.tenant_payment_received,
            record.tenant_payment_received,
        );
        merged.tenant_deposit_received = combine_amount(
            amount_rule,
            merged.tenant_deposit_received,
            record.tenant_deposit_received,
        );

        merged.commissions.salesperson = combine_amount(
            amount_rule,
            merged.commissions.salesperson,
            record.commissions.salesperson,
        );
        merged.commissions.sales_lead = combine_amount(
            amount_rule,
            merged.commissions.sales_lead,
            record.commissions.sales_lead,
        );
        merged.commissions.agency =
            combine_amount(amount_rule, merged.commissions.agency, record.commissions.agency);
        merged.commissions.referral = combine_amount(
            amount_rule,
            merged.commissions.referral,
            record.commissions.referral,
        );

        merged.expenses.electricity = combine_amount(
            amount_rule,
            merged.expenses.electricity,
            record.expenses.electricity,
        );
        merged.expenses.water =
            combine_amount(amount_rule, merged.expenses.water, record.expenses.water);
        merged.expenses.internet =
            combine_amount(amount_rule, merged.expenses.internet, record.expenses.internet);
        merged.expenses.other =
            combine_amount(amount_rule, merged.expenses.other, record.expenses.other);

        merged.area = combine_text(merged.area.take(), &record.area);
        merged.tenant_name = combine_text(merged.tenant_name.take(), &record.tenant_name);
        merged.landlord_name = combine_text(merged.landlord_name.take(), &record.landlord_name);
        merged.commission_beneficiary = combine_text(
            merged.commission_beneficiary.take(),
            &record.commission_beneficiary,
        );
    }

    merged.note = build_note(group);

    debug!(
        "Consolidated {} entries for {}/{}",
        group.len(),
        merged.building_id,
        merged.unit_id
    );

    merged
}

/// One line per contributing entry, in original order: contract range,
/// landlord rate, occupancy range, tenant rate, total received, total paid.
/// Entries carrying none of those contribute no line.
fn build_note(group: &[&TransactionRecord]) -> String {
    let mut lines = Vec::new();

    for record in group {
        let mut parts = Vec::new();

        let contract =
            format_date_range(record.landlord_contract_start, record.landlord_contract_end);
        if !contract.is_empty() {
            parts.push(format!("contract {}", contract));
        }
        if record.landlord_rent > 0.0 {
            parts.push(format!("landlord rate {}", format_money(record.landlord_rent)));
        }

        let stay = format_date_range(record.tenant_checkin, record.tenant_checkout);
        if !stay.is_empty() {
            parts.push(format!("stay {}", stay));
        }
        if record.tenant_rent > 0.0 {
            parts.push(format!("tenant rate {}", format_money(record.tenant_rent)));
        }

        let received = record.tenant_payment_received + record.tenant_deposit_received;
        if received > 0.0 {
            parts.push(format!("received {}", format_money(received)));
        }

        let paid = record.landlord_payment_made + record.landlord_deposit_paid;
        if paid > 0.0 {
            parts.push(format!("paid {}", format_money(paid)));
        }

        if !parts.is_empty() {
            lines.push(format!("Entry {}: {}", lines.len() + 1, parts.join(", ")));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(building: &str, unit: &str) -> TransactionRecord {
        TransactionRecord {
            building_id: building.to_string(),
            unit_id: unit.to_string(),
            ..Default::default()
        }
    }

    fn ymd(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, month, day)
    }

    #[test]
    fn test_rule_table() {
        assert_eq!(rule_for(FieldClass::StartDate), CombineRule::EarliestDate);
        assert_eq!(rule_for(FieldClass::EndDate), CombineRule::LatestDate);
        assert_eq!(rule_for(FieldClass::MonthlyRate), CombineRule::MaxRate);
        assert_eq!(rule_for(FieldClass::CumulativeAmount), CombineRule::SumAmount);
        assert_eq!(rule_for(FieldClass::IdentityText), CombineRule::FirstText);
    }

    #[test]
    fn test_grouping_by_building_and_unit() {
        let records = vec![
            record("T1", "101"),
            record("T1", "102"),
            record("T1", "101"),
            record("T2", "101"),
        ];

        let consolidated = aggregate(&records);
        assert_eq!(consolidated.len(), 3);
        assert_eq!(consolidated[0].unit_id, "101");
        assert_eq!(consolidated[0].entry_count, 2);
        assert_eq!(consolidated[1].unit_id, "102");
        assert_eq!(consolidated[2].building_id, "T2");
    }

    #[test]
    fn test_rate_uses_max_not_sum() {
        let mut a = record("T1", "101");
        a.landlord_rent = 3_000_000.0;
        let mut b = record("T1", "101");
        b.landlord_rent = 5_000_000.0;

        // 3M + 5M would be 8M; max must win
        let consolidated = aggregate(&[a, b]);
        assert_eq!(consolidated.len(), 1);
        assert_eq!(consolidated[0].landlord_rent, 5_000_000.0);
    }

    #[test]
    fn test_rate_max_with_zero_placeholders() {
        let mut entries = Vec::new();
        for rent in [0.0, 5_000_000.0, 0.0] {
            let mut r = record("T1", "101");
            r.landlord_rent = rent;
            entries.push(r);
        }

        let consolidated = aggregate(&entries);
        assert_eq!(consolidated[0].landlord_rent, 5_000_000.0);
    }

    #[test]
    fn test_cumulative_amounts_sum_in_any_order() {
        let mut a = record("T1", "101");
        a.tenant_payment_received = 2_000_000.0;
        a.commissions.salesperson = 500_000.0;
        let mut b = record("T1", "101");
        b.tenant_payment_received = 3_000_000.0;
        b.commissions.salesperson = 250_000.0;

        let forward = aggregate(&[a.clone(), b.clone()]);
        let backward = aggregate(&[b, a]);

        for consolidated in [&forward[0], &backward[0]] {
            assert_eq!(consolidated.tenant_payment_received, 5_000_000.0);
            assert_eq!(consolidated.commissions.salesperson, 750_000.0);
        }
    }

    #[test]
    fn test_date_span_widens() {
        let mut a = record("T1", "101");
        a.tenant_checkin = ymd(2024, 1, 10);
        a.tenant_checkout = ymd(2024, 3, 1);
        let mut b = record("T1", "101");
        b.tenant_checkin = ymd(2024, 2, 1);
        b.tenant_checkout = ymd(2024, 5, 1);

        let consolidated = aggregate(&[a, b]);
        assert_eq!(consolidated[0].tenant_checkin, ymd(2024, 1, 10));
        assert_eq!(consolidated[0].tenant_checkout, ymd(2024, 5, 1));
    }

    #[test]
    fn test_identity_text_takes_first_present() {
        let mut a = record("T1", "101");
        a.tenant_name = None;
        let mut b = record("T1", "101");
        b.tenant_name = Some("Tran Thi B".to_string());
        let mut c = record("T1", "101");
        c.tenant_name = Some("Someone Else".to_string());

        let consolidated = aggregate(&[a, b, c]);
        assert_eq!(consolidated[0].tenant_name.as_deref(), Some("Tran Thi B"));
    }

    #[test]
    fn test_aggregation_is_idempotent_on_totals() {
        let mut a = record("T1", "101");
        a.landlord_rent = 4_000_000.0;
        a.tenant_payment_received = 6_000_000.0;
        a.tenant_checkin = ymd(2024, 3, 1);
        a.tenant_checkout = ymd(2024, 9, 1);

        let once = aggregate(&[a]);
        assert_eq!(once.len(), 1);
        assert_eq!(once[0].landlord_rent, 4_000_000.0);
        assert_eq!(once[0].tenant_payment_received, 6_000_000.0);
        assert_eq!(once[0].tenant_checkin, ymd(2024, 3, 1));
        assert_eq!(once[0].tenant_checkout, ymd(2024, 9, 1));
        assert_eq!(once[0].entry_count, 1);
    }

    #[test]
    fn test_ungroupable_records_pass_through() {
        let mut a = record("", "");
        a.tenant_rent = 1_000_000.0;
        let mut b = record("", "");
        b.tenant_rent = 2_000_000.0;

        // No grouping key at all: two inputs stay two outputs
        let consolidated = aggregate(&[a, b]);
        assert_eq!(consolidated.len(), 2);
        assert_eq!(consolidated[0].tenant_rent, 1_000_000.0);
        assert_eq!(consolidated[1].tenant_rent, 2_000_000.0);
    }

    #[test]
    fn test_note_numbering_and_content() {
        let mut a = record("T1", "101");
        a.landlord_contract_start = ymd(2024, 1, 1);
        a.landlord_contract_end = ymd(2024, 12, 31);
        a.landlord_rent = 4_000_000.0;
        let blank = record("T1", "101");
        let mut c = record("T1", "101");
        c.tenant_checkin = ymd(2024, 3, 1);
        c.tenant_checkout = ymd(2024, 9, 1);
        c.tenant_rent = 6_000_000.0;
        c.tenant_payment_received = 6_000_000.0;

        let consolidated = aggregate(&[a, blank, c]);
        let note = &consolidated[0].note;

        assert!(note.starts_with("Entry 1: contract 01/01/24 - 31/12/24, landlord rate 4,000,000"));
        assert!(note.contains("Entry 2: stay 01/03/24 - 01/09/24, tenant rate 6,000,000, received 6,000,000"));
        assert!(!note.contains("Entry 3"));
    }

    #[test]
    fn test_empty_group_note_is_empty() {
        let consolidated = aggregate(&[record("T1", "101"), record("T1", "101")]);
        assert_eq!(consolidated[0].note, "");
    }
}
