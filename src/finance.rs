use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{RentalLedgerError, Result};
use crate::schema::ConsolidatedUnitRecord;
use crate::window::ReportWindow;

/// Scalar report parameters supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReportOptions {
    /// Tax withheld on period revenue, as a fraction (0.10 = 10%).
    pub tax_rate: f64,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self { tax_rate: 0.10 }
    }
}

impl ReportOptions {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.tax_rate) {
            return Err(RentalLedgerError::InvalidTaxRate(self.tax_rate));
        }
        Ok(())
    }
}

/// Warning annotations for suspicious figures. Flags annotate a row, they
/// never exclude it from the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFlag {
    /// No occupancy dates and no cost activity: the zero profit below is
    /// "no data", not a true break-even.
    MissingDates,
    NegativeProfit,
    /// Zero profit on zero cost outside the missing-dates case.
    ZeroMargin,
}

/// Lifetime P&L for one unit, pro-rated on the 30-day-month approximation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitLifetimeReport {
    pub building_id: String,
    pub unit_id: String,
    /// Occupancy span in 30-day months; 0 when either endpoint is missing.
    pub occupied_months: f64,
    pub revenue: f64,
    pub cost_of_goods: f64,
    pub commission_total: f64,
    pub operating_expenses: f64,
    pub net_profit: f64,
    /// Actual collections: tenant payments plus tenant deposits.
    pub cash_in: f64,
    /// Actual disbursements: landlord payments, deposits, commissions, expenses.
    pub cash_out: f64,
    pub flags: Vec<ReportFlag>,
}

/// Occupancy span in 30-day months. Deliberately not calendar-accurate;
/// missing either endpoint counts as zero months.
pub fn occupied_months(record: &ConsolidatedUnitRecord) -> f64 {
    match (record.tenant_checkin, record.tenant_checkout) {
        (Some(checkin), Some(checkout)) => {
            let days = (checkout - checkin).num_days() as f64;
            (days / 30.0).max(0.0)
        }
        _ => 0.0,
    }
}

pub fn lifetime_unit(record: &ConsolidatedUnitRecord) -> UnitLifetimeReport {
    let months = occupied_months(record);
    let revenue = record.tenant_rent * months;
    let cost_of_goods = record.landlord_rent * months;
    let commission_total = record.commissions.total();
    let operating_expenses = record.expenses.total();
    let net_profit = revenue - cost_of_goods - commission_total - operating_expenses;

    let mut flags = Vec::new();
    if months == 0.0 && commission_total == 0.0 && cost_of_goods == 0.0 {
        flags.push(ReportFlag::MissingDates);
    } else if net_profit == 0.0 && cost_of_goods == 0.0 {
        flags.push(ReportFlag::ZeroMargin);
    }
    if net_profit < 0.0 {
        flags.push(ReportFlag::NegativeProfit);
    }

    UnitLifetimeReport {
        building_id: record.building_id.clone(),
        unit_id: record.unit_id.clone(),
        occupied_months: months,
        revenue,
        cost_of_goods,
        commission_total,
        operating_expenses,
        net_profit,
        cash_in: record.tenant_payment_received + record.tenant_deposit_received,
        cash_out: record.landlord_payment_made
            + record.landlord_deposit_paid
            + commission_total
            + operating_expenses,
        flags,
    }
}

/// Lifetime P&L for every unit. Nothing is excluded here; units without
/// temporal anchoring come back flagged instead.
pub fn lifetime_report(records: &[ConsolidatedUnitRecord]) -> Vec<UnitLifetimeReport> {
    records.iter().map(lifetime_unit).collect()
}

/// One unit's figures for a single reporting window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitPeriodReport {
    pub building_id: String,
    pub unit_id: String,
    /// Landlord contract overlaps the window (cost side).
    pub contract_active: bool,
    /// Tenant occupancy overlaps the window (revenue side).
    pub occupancy_active: bool,
    pub cost: f64,
    pub revenue: f64,
    pub tax: f64,
    pub net_profit: f64,
    pub flags: Vec<ReportFlag>,
}

/// Period report over all units, with portfolio totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub window: ReportWindow,
    pub tax_rate: f64,
    pub units: Vec<UnitPeriodReport>,
    pub total_revenue: f64,
    pub total_cost: f64,
    pub total_tax: f64,
    pub total_net: f64,
}

/// Strict-overlap period attribution: the full monthly rate is credited to
/// any window the underlying range touches, with no pro-ration. Units with
/// no overlap on either side are omitted entirely, not shown as zero rows.
pub fn period_report(
    records: &[ConsolidatedUnitRecord],
    window: ReportWindow,
    options: &ReportOptions,
) -> Result<PeriodSummary> {
    options.validate()?;

    let mut summary = PeriodSummary {
        window,
        tax_rate: options.tax_rate,
        units: Vec::new(),
        total_revenue: 0.0,
        total_cost: 0.0,
        total_tax: 0.0,
        total_net: 0.0,
    };

    for record in records {
        let contract_active =
            window.overlaps(record.landlord_contract_start, record.landlord_contract_end);
        let occupancy_active = window.overlaps(record.tenant_checkin, record.tenant_checkout);

        if !contract_active && !occupancy_active {
            debug!(
                "Unit {}/{} inactive in {} - {}, omitted",
                record.building_id, record.unit_id, window.start, window.end
            );
            continue;
        }

        let cost = if contract_active { record.landlord_rent } else { 0.0 };
        let revenue = if occupancy_active { record.tenant_rent } else { 0.0 };
        let tax = revenue * options.tax_rate;
        let net_profit = revenue - cost - tax;

        let mut flags = Vec::new();
        if net_profit < 0.0 {
            flags.push(ReportFlag::NegativeProfit);
        } else if net_profit == 0.0 && cost == 0.0 {
            flags.push(ReportFlag::ZeroMargin);
        }

        summary.total_revenue += revenue;
        summary.total_cost += cost;
        summary.total_tax += tax;
        summary.total_net += net_profit;

        summary.units.push(UnitPeriodReport {
            building_id: record.building_id.clone(),
            unit_id: record.unit_id.clone(),
            contract_active,
            occupancy_active,
            cost,
            revenue,
            tax,
            net_profit,
            flags,
        });
    }

    Ok(summary)
}

/// One unit's cash movements for a single calendar month, with rate-based
/// and one-time amounts kept apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitCashFlow {
    pub building_id: String,
    pub unit_id: String,
    /// Tenant rent, attributed to every month the occupancy touches.
    pub recurring_in: f64,
    /// Landlord rent, attributed to every month the contract touches.
    pub recurring_out: f64,
    /// Tenant deposit, attributed only to the check-in month.
    pub one_time_in: f64,
    /// Landlord deposit and commissions, attributed only to the month the
    /// relevant range starts in.
    pub one_time_out: f64,
    pub net_cash: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowSummary {
    pub window: ReportWindow,
    pub units: Vec<UnitCashFlow>,
    pub total_in: f64,
    pub total_out: f64,
    pub net_cash: f64,
}

/// Month cash-flow view. Rate-based amounts recur across every overlapping
/// month; one-time amounts (deposits, commissions) land only in the month
/// the relevant interval starts, so a deposit is never re-counted across
/// the months a stay spans.
pub fn cash_flow_report(
    records: &[ConsolidatedUnitRecord],
    year: i32,
    month: u32,
) -> Result<CashFlowSummary> {
    let window = ReportWindow::month(year, month)?;

    let mut summary = CashFlowSummary {
        window,
        units: Vec::new(),
        total_in: 0.0,
        total_out: 0.0,
        net_cash: 0.0,
    };

    for record in records {
        let contract_active =
            window.overlaps(record.landlord_contract_start, record.landlord_contract_end);
        let occupancy_active = window.overlaps(record.tenant_checkin, record.tenant_checkout);

        let contract_starts = record
            .landlord_contract_start
            .map(|d| window.contains(d))
            .unwrap_or(false);
        let occupancy_starts = record
            .tenant_checkin
            .map(|d| window.contains(d))
            .unwrap_or(false);

        if !contract_active && !occupancy_active && !contract_starts && !occupancy_starts {
            continue;
        }

        let recurring_in = if occupancy_active { record.tenant_rent } else { 0.0 };
        let recurring_out = if contract_active { record.landlord_rent } else { 0.0 };
        let one_time_in = if occupancy_starts {
            record.tenant_deposit_received
        } else {
            0.0
        };

        let mut one_time_out = 0.0;
        if occupancy_starts {
            one_time_out += record.commissions.total();
        }
        if contract_starts {
            one_time_out += record.landlord_deposit_paid;
        }

        let inflow = recurring_in + one_time_in;
        let outflow = recurring_out + one_time_out;

        summary.total_in += inflow;
        summary.total_out += outflow;
        summary.net_cash += inflow - outflow;

        summary.units.push(UnitCashFlow {
            building_id: record.building_id.clone(),
            unit_id: record.unit_id.clone(),
            recurring_in,
            recurring_out,
            one_time_in,
            one_time_out,
            net_cash: inflow - outflow,
        });
    }

    Ok(summary)
}
