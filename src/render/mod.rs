//! Consumers of projection results
//!
//! The projection core never formats anything itself. A host recomputes a
//! result on each input change and hands it to a [`ProjectionRenderer`].

mod table;
mod delimited;
mod json;

pub use table::TableRenderer;
pub use delimited::{ComparisonCsvRow, CsvRenderer};
pub use json::{BudgetReport, ComparisonReport, JsonRenderer};

use thiserror::Error;

use crate::projection::{BudgetResult, ComparisonResult};

/// Failure while writing rendered output
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Presentation layer reading computed series
pub trait ProjectionRenderer {
    fn render_comparison(&mut self, result: &ComparisonResult) -> Result<(), RenderError>;

    fn render_budget(&mut self, result: &BudgetResult) -> Result<(), RenderError>;
}
