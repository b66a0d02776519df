use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Fixed set of named commission and brokerage amounts attached to one
/// data-entry event. Amounts accumulate across entries for the same unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CommissionSet {
    #[schemars(description = "Commission paid to the salesperson who closed the tenant")]
    pub salesperson: f64,

    #[schemars(description = "Commission share paid to the sales team lead")]
    pub sales_lead: f64,

    #[schemars(description = "Brokerage fee paid to an external agency")]
    pub agency: f64,

    #[schemars(description = "Referral fee paid to a third party who introduced the deal")]
    pub referral: f64,
}

impl CommissionSet {
    pub fn total(&self) -> f64 {
        self.salesperson + self.sales_lead + self.agency + self.referral
    }
}

/// Internal operating costs recorded against the unit (utilities and sundry).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct OperatingExpenses {
    #[schemars(description = "Electricity charges")]
    pub electricity: f64,

    #[schemars(description = "Water charges")]
    pub water: f64,

    #[schemars(description = "Internet charges")]
    pub internet: f64,

    #[schemars(description = "Any other operating cost not covered above")]
    pub other: f64,
}

impl OperatingExpenses {
    pub fn total(&self) -> f64 {
        self.electricity + self.water + self.internet + self.other
    }
}

/// One raw lease-transaction row: a single data-entry event for a rental
/// unit, covering a landlord-contract period and/or a tenant-occupancy
/// period with the monetary figures recorded at that time.
///
/// Every monetary field is a non-negative amount in whole currency units
/// after normalization. A record carrying neither a contract range nor an
/// occupancy range is a degenerate entry with no temporal anchoring; it is
/// legal input and is flagged rather than rejected downstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TransactionRecord {
    #[schemars(description = "Building code this unit belongs to (e.g. 'T1')")]
    pub building_id: String,

    #[schemars(
        description = "Unit/apartment code within the building, already trimmed and with any trailing '.0' spreadsheet artifact stripped (e.g. '101', 'A101')"
    )]
    pub unit_id: String,

    #[schemars(description = "District or area the building sits in")]
    pub area: Option<String>,

    #[schemars(description = "Start of the landlord lease contract, if known")]
    pub landlord_contract_start: Option<NaiveDate>,

    #[schemars(description = "End of the landlord lease contract, if known")]
    pub landlord_contract_end: Option<NaiveDate>,

    #[schemars(description = "Tenant check-in date, if a tenant period is recorded")]
    pub tenant_checkin: Option<NaiveDate>,

    #[schemars(description = "Tenant check-out date, if a tenant period is recorded")]
    pub tenant_checkout: Option<NaiveDate>,

    #[schemars(description = "Monthly rent owed to the landlord under the contract")]
    pub landlord_rent: f64,

    #[schemars(description = "Monthly rent charged to the tenant")]
    pub tenant_rent: f64,

    #[schemars(description = "Cumulative amount actually disbursed to the landlord")]
    pub landlord_payment_made: f64,

    #[schemars(description = "Cumulative deposit actually paid to the landlord")]
    pub landlord_deposit_paid: f64,

    #[schemars(description = "Cumulative amount actually collected from the tenant")]
    pub tenant_payment_received: f64,

    #[schemars(description = "Cumulative deposit actually collected from the tenant")]
    pub tenant_deposit_received: f64,

    #[schemars(description = "Commission and brokerage amounts for this entry")]
    pub commissions: CommissionSet,

    #[schemars(description = "Operating expenses recorded with this entry")]
    pub expenses: OperatingExpenses,

    #[schemars(description = "Tenant name, free text")]
    pub tenant_name: Option<String>,

    #[schemars(description = "Landlord or managing agent name, free text")]
    pub landlord_name: Option<String>,

    #[schemars(description = "Person credited with the commission, free text")]
    pub commission_beneficiary: Option<String>,
}

impl TransactionRecord {
    /// True when the record has no temporal anchoring at all: neither a
    /// contract range nor an occupancy range.
    pub fn is_degenerate(&self) -> bool {
        self.landlord_contract_start.is_none()
            && self.landlord_contract_end.is_none()
            && self.tenant_checkin.is_none()
            && self.tenant_checkout.is_none()
    }

    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(TransactionRecord)
    }

    /// JSON Schema for the record shape, handed to the extraction
    /// collaborator so free-text/image parsing can target it directly.
    pub fn schema_as_json() -> Result<String, serde_json::Error> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }
}

/// One consolidated row per physical unit, merged from every raw entry for
/// that (building, unit) pair. Always computed on read, never persisted.
///
/// Date fields hold the widest known span across the group, cumulative
/// amounts hold the group sum, monthly rates hold the group maximum, and
/// identity text holds the first non-empty value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsolidatedUnitRecord {
    pub building_id: String,
    pub unit_id: String,
    pub area: Option<String>,
    pub landlord_contract_start: Option<NaiveDate>,
    pub landlord_contract_end: Option<NaiveDate>,
    pub tenant_checkin: Option<NaiveDate>,
    pub tenant_checkout: Option<NaiveDate>,
    pub landlord_rent: f64,
    pub tenant_rent: f64,
    pub landlord_payment_made: f64,
    pub landlord_deposit_paid: f64,
    pub tenant_payment_received: f64,
    pub tenant_deposit_received: f64,
    pub commissions: CommissionSet,
    pub expenses: OperatingExpenses,
    pub tenant_name: Option<String>,
    pub landlord_name: Option<String>,
    pub commission_beneficiary: Option<String>,

    /// How many raw entries were merged into this row.
    pub entry_count: usize,

    /// Numbered, human-readable itemization of the contributing entries.
    /// Empty when no entry carried anything worth itemizing.
    pub note: String,
}

impl ConsolidatedUnitRecord {
    pub fn is_degenerate(&self) -> bool {
        self.landlord_contract_start.is_none()
            && self.landlord_contract_end.is_none()
            && self.tenant_checkin.is_none()
            && self.tenant_checkout.is_none()
    }
}
