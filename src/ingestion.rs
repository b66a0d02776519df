use serde::{Deserialize, Serialize};

use crate::normalize::{
    normalize_date, normalize_money, normalize_text, normalize_unit_id, CellValue,
};
use crate::schema::{CommissionSet, OperatingExpenses, TransactionRecord};

/// One row as read from the store, before normalization. Every column is a
/// loosely-typed cell; a column missing from the sheet deserializes to
/// `Empty`, which the normalizers treat as absent rather than zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRow {
    pub building: CellValue,
    pub unit: CellValue,
    pub area: CellValue,
    pub contract_start: CellValue,
    pub contract_end: CellValue,
    pub checkin: CellValue,
    pub checkout: CellValue,
    pub landlord_rent: CellValue,
    pub tenant_rent: CellValue,
    pub landlord_payment: CellValue,
    pub landlord_deposit: CellValue,
    pub tenant_payment: CellValue,
    pub tenant_deposit: CellValue,
    pub commission_salesperson: CellValue,
    pub commission_sales_lead: CellValue,
    pub commission_agency: CellValue,
    pub commission_referral: CellValue,
    pub expense_electricity: CellValue,
    pub expense_water: CellValue,
    pub expense_internet: CellValue,
    pub expense_other: CellValue,
    pub tenant_name: CellValue,
    pub landlord_name: CellValue,
    pub commission_beneficiary: CellValue,
}

impl TransactionRecord {
    /// Builds a typed record from one store row, applying the money, date,
    /// and identifier normalizers. Never fails: unparsable cells degrade to
    /// zero or missing per field.
    pub fn from_raw(row: &RawRow) -> TransactionRecord {
        TransactionRecord {
            building_id: normalize_text(&row.building).unwrap_or_default(),
            unit_id: normalize_unit_id(&row.unit),
            area: normalize_text(&row.area),
            landlord_contract_start: normalize_date(&row.contract_start),
            landlord_contract_end: normalize_date(&row.contract_end),
            tenant_checkin: normalize_date(&row.checkin),
            tenant_checkout: normalize_date(&row.checkout),
            landlord_rent: normalize_money(&row.landlord_rent),
            tenant_rent: normalize_money(&row.tenant_rent),
            landlord_payment_made: normalize_money(&row.landlord_payment),
            landlord_deposit_paid: normalize_money(&row.landlord_deposit),
            tenant_payment_received: normalize_money(&row.tenant_payment),
            tenant_deposit_received: normalize_money(&row.tenant_deposit),
            commissions: CommissionSet {
                salesperson: normalize_money(&row.commission_salesperson),
                sales_lead: normalize_money(&row.commission_sales_lead),
                agency: normalize_money(&row.commission_agency),
                referral: normalize_money(&row.commission_referral),
            },
            expenses: OperatingExpenses {
                electricity: normalize_money(&row.expense_electricity),
                water: normalize_money(&row.expense_water),
                internet: normalize_money(&row.expense_internet),
                other: normalize_money(&row.expense_other),
            },
            tenant_name: normalize_text(&row.tenant_name),
            landlord_name: normalize_text(&row.landlord_name),
            commission_beneficiary: normalize_text(&row.commission_beneficiary),
        }
    }

    pub fn from_table(rows: &[RawRow]) -> Vec<TransactionRecord> {
        rows.iter().map(TransactionRecord::from_raw).collect()
    }
}

/// Request-scoped prefill values for one form render, typically produced by
/// the extraction collaborator from pasted text or an image. The draft is
/// passed explicitly into form construction and dies with the request; it
/// is not carried in process-wide state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryDraft {
    pub building: Option<CellValue>,
    pub unit: Option<CellValue>,
    pub contract_start: Option<CellValue>,
    pub contract_end: Option<CellValue>,
    pub checkin: Option<CellValue>,
    pub checkout: Option<CellValue>,
    pub landlord_rent: Option<CellValue>,
    pub tenant_rent: Option<CellValue>,
    pub tenant_name: Option<CellValue>,
    pub landlord_name: Option<CellValue>,
}

impl EntryDraft {
    pub fn is_empty(&self) -> bool {
        self.building.is_none()
            && self.unit.is_none()
            && self.contract_start.is_none()
            && self.contract_end.is_none()
            && self.checkin.is_none()
            && self.checkout.is_none()
            && self.landlord_rent.is_none()
            && self.tenant_rent.is_none()
            && self.tenant_name.is_none()
            && self.landlord_name.is_none()
    }

    /// Fills draft values into cells the user has not touched yet. Cells
    /// already holding input are left alone.
    pub fn apply_to(&self, row: &mut RawRow) {
        fn fill(cell: &mut CellValue, draft: &Option<CellValue>) {
            if cell.is_empty() {
                if let Some(value) = draft {
                    *cell = value.clone();
                }
            }
        }

        fill(&mut row.building, &self.building);
        fill(&mut row.unit, &self.unit);
        fill(&mut row.contract_start, &self.contract_start);
        fill(&mut row.contract_end, &self.contract_end);
        fill(&mut row.checkin, &self.checkin);
        fill(&mut row.checkout, &self.checkout);
        fill(&mut row.landlord_rent, &self.landlord_rent);
        fill(&mut row.tenant_rent, &self.tenant_rent);
        fill(&mut row.tenant_name, &self.tenant_name);
        fill(&mut row.landlord_name, &self.landlord_name);
    }
}
