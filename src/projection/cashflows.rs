//! Yearly cost records produced by the projections

use serde::{Deserialize, Serialize};

use super::discount::{discount_factor, present_value};
use crate::params::Powertrain;

/// Cost of one vehicle in one year, split by category
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Post-subsidy purchase price (year 1 only)
    pub upfront: f64,
    /// Loan installments paid during the year
    pub loan: f64,
    /// Fuel or electricity
    pub energy: f64,
    pub tax: f64,
    pub insurance: f64,
    /// Recurring maintenance plus any component replacement
    pub maintenance: f64,
}

impl CostBreakdown {
    /// Sum of every category; the engine takes this as the yearly figure
    pub fn total(&self) -> f64 {
        self.upfront + self.loan + self.energy + self.maintenance + self.insurance + self.tax
    }
}

/// One row of a vehicle's yearly cost projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearRecord {
    /// Year of ownership (1-indexed)
    pub year: u32,
    /// Cost incurred in this year
    pub yearly: f64,
    /// Running total; the final year is net of resale value
    pub cumulative: f64,
    pub breakdown: CostBreakdown,
}

/// Full projection for one vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleProjection {
    pub powertrain: Powertrain,

    /// Amortized monthly loan payment
    pub monthly_payment: f64,

    /// Resale proceeds deducted from the final cumulative figure
    pub resale_value: f64,

    /// Yearly records in year order
    pub records: Vec<YearRecord>,
}

impl VehicleProjection {
    pub fn new(powertrain: Powertrain, monthly_payment: f64, resale_value: f64) -> Self {
        Self {
            powertrain,
            monthly_payment,
            resale_value,
            records: Vec::new(),
        }
    }

    /// Append a yearly record
    pub fn add_record(&mut self, record: YearRecord) {
        self.records.push(record);
    }

    /// Total cost of ownership: the final cumulative figure
    pub fn total(&self) -> f64 {
        self.records.last().map(|r| r.cumulative).unwrap_or(0.0)
    }

    pub fn yearly_costs(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.yearly).collect()
    }

    pub fn cumulative_costs(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.cumulative).collect()
    }

    /// Discounted cost of ownership, with resale received at the horizon
    ///
    /// An empty projection is worth nothing, matching `total()`.
    pub fn present_value(&self, annual_rate: f64) -> f64 {
        if self.records.is_empty() {
            return 0.0;
        }
        let horizon = self.records.len() as u32;
        present_value(&self.yearly_costs(), annual_rate)
            - self.resale_value * discount_factor(annual_rate, horizon)
    }
}

/// Gasoline vs electric projection over the same horizon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub horizon_years: u32,
    pub gasoline: VehicleProjection,
    pub electric: VehicleProjection,
}

impl ComparisonResult {
    pub fn vehicle(&self, powertrain: Powertrain) -> &VehicleProjection {
        match powertrain {
            Powertrain::Gasoline => &self.gasoline,
            Powertrain::Electric => &self.electric,
        }
    }

    /// First year in which the electric car's cumulative cost is at or
    /// below the gasoline car's
    pub fn break_even_year(&self) -> Option<u32> {
        self.gasoline
            .records
            .iter()
            .zip(&self.electric.records)
            .find(|(gas, ev)| ev.cumulative <= gas.cumulative)
            .map(|(gas, _)| gas.year)
    }

    /// Get summary statistics
    pub fn summary(&self) -> ComparisonSummary {
        let gasoline_total = self.gasoline.total();
        let electric_total = self.electric.total();

        let cheaper = if electric_total < gasoline_total {
            Some(Powertrain::Electric)
        } else if gasoline_total < electric_total {
            Some(Powertrain::Gasoline)
        } else {
            None
        };

        ComparisonSummary {
            horizon_years: self.horizon_years,
            gasoline_total,
            electric_total,
            gasoline_monthly_payment: self.gasoline.monthly_payment,
            electric_monthly_payment: self.electric.monthly_payment,
            difference: gasoline_total - electric_total,
            cheaper,
            break_even_year: self.break_even_year(),
        }
    }

    /// Discounted totals as (gasoline, electric)
    pub fn present_values(&self, annual_rate: f64) -> (f64, f64) {
        (
            self.gasoline.present_value(annual_rate),
            self.electric.present_value(annual_rate),
        )
    }
}

/// Headline figures of a comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub horizon_years: u32,
    pub gasoline_total: f64,
    pub electric_total: f64,
    pub gasoline_monthly_payment: f64,
    pub electric_monthly_payment: f64,
    /// Gasoline total minus electric total (positive when electric is cheaper)
    pub difference: f64,
    /// None on a tie or when a total is NaN
    pub cheaper: Option<Powertrain>,
    pub break_even_year: Option<u32>,
}

/// One row of the single-vehicle budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetYear {
    pub year: u32,
    /// Down payment shown against year 1; not part of `total`
    pub down_payment: f64,
    pub installment: f64,
    pub tax: f64,
    /// Fuel price per litre in this year
    pub fuel_price: f64,
    pub fuel: f64,
    pub service: f64,
    /// Running cost of the year, excluding the down payment
    pub total: f64,
}

/// Ten-year running-cost budget of a single vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetResult {
    pub horizon_years: u32,
    pub down_payment: f64,
    pub monthly_installment: f64,
    /// Distance driven per year
    pub annual_distance: f64,
    /// Litres of fuel used per year
    pub annual_fuel_litres: f64,
    pub years: Vec<BudgetYear>,
    /// Down payment plus every yearly total
    pub total_cost: f64,
}

impl BudgetResult {
    /// Per-year totals, the series plotted as a bar chart
    pub fn yearly_totals(&self) -> Vec<f64> {
        self.years.iter().map(|y| y.total).collect()
    }
}
