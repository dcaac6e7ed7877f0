//! JSON output of full results

use serde::Serialize;
use std::io::Write;

use super::{ProjectionRenderer, RenderError};
use crate::projection::{BudgetResult, ComparisonResult, ComparisonSummary};

/// Comparison result together with its derived summary
#[derive(Debug, Serialize)]
pub struct ComparisonReport<'a> {
    pub summary: ComparisonSummary,
    #[serde(flatten)]
    pub result: &'a ComparisonResult,
}

impl<'a> ComparisonReport<'a> {
    pub fn new(result: &'a ComparisonResult) -> Self {
        Self {
            summary: result.summary(),
            result,
        }
    }
}

/// Budget result together with the bar-chart series
#[derive(Debug, Serialize)]
pub struct BudgetReport<'a> {
    pub yearly_totals: Vec<f64>,
    #[serde(flatten)]
    pub result: &'a BudgetResult,
}

impl<'a> BudgetReport<'a> {
    pub fn new(result: &'a BudgetResult) -> Self {
        Self {
            yearly_totals: result.yearly_totals(),
            result,
        }
    }
}

/// Writes one JSON document per rendered result
pub struct JsonRenderer<W: Write> {
    out: W,
    pretty: bool,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, pretty: false }
    }

    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write<T: Serialize>(&mut self, value: &T) -> Result<(), RenderError> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.out, value)?;
        } else {
            serde_json::to_writer(&mut self.out, value)?;
        }
        writeln!(self.out)?;
        Ok(())
    }
}

impl<W: Write> ProjectionRenderer for JsonRenderer<W> {
    fn render_comparison(&mut self, result: &ComparisonResult) -> Result<(), RenderError> {
        self.write(&ComparisonReport::new(result))
    }

    fn render_budget(&mut self, result: &BudgetResult) -> Result<(), RenderError> {
        self.write(&BudgetReport::new(result))
    }
}
