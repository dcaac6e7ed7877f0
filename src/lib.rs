//! Vehicle TCO - total cost of ownership projections for cars
//!
//! This library provides:
//! - An eight-year gasoline vs electric comparison with amortized financing,
//!   running costs, replacement schedules and resale value
//! - A ten-year running-cost budget for a single financed car
//! - Flat name/value parameter handling with form-style numeric parsing
//! - Table, CSV and JSON renderers over the computed series
//! - Batch and parameter-sweep scenarios

pub mod params;
pub mod projection;
pub mod render;
pub mod scenario;

// Re-export commonly used types
pub use params::{BudgetInputs, ComparisonInputs, CostInputs, InputError, ParameterMap, Powertrain};
pub use projection::{
    project_budget, project_comparison, BudgetResult, ComparisonResult, CostProjector,
    ProjectionConfig, YearRecord,
};
pub use render::ProjectionRenderer;
pub use scenario::ScenarioRunner;
