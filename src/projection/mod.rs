//! Yearly cost projections for vehicle ownership

mod state;
mod engine;
mod cashflows;
mod schedule;
pub mod loan;
pub mod discount;

pub use state::{BudgetState, ComparisonState};
pub use engine::{
    CostProjector, ProjectionConfig, BUDGET_HORIZON_YEARS, BUDGET_KM_PER_LITRE, BUDGET_LOAN_YEARS,
    BUDGET_SERVICE_AFTER_YEAR, COMPARISON_HORIZON_YEARS, FUEL_PRICE_ESCALATION,
};
pub use cashflows::{
    BudgetResult, BudgetYear, ComparisonResult, ComparisonSummary, CostBreakdown,
    VehicleProjection, YearRecord,
};
pub use schedule::ReplacementSchedule;
pub use loan::monthly_payment;
pub use discount::present_value;

use crate::params::{BudgetInputs, ComparisonInputs};

/// Project a comparison snapshot with the standard eight-year horizon
pub fn project_comparison(inputs: &ComparisonInputs) -> ComparisonResult {
    CostProjector::default().project_comparison(inputs)
}

/// Project a budget snapshot with the standard ten-year horizon
pub fn project_budget(inputs: &BudgetInputs) -> BudgetResult {
    CostProjector::default().project_budget(inputs)
}
