//! CSV output, one row per projection year

use serde::Serialize;
use std::io::Write;

use super::{ProjectionRenderer, RenderError};
use crate::projection::{BudgetResult, ComparisonResult, YearRecord};

/// Flattened comparison row for spreadsheet export
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonCsvRow {
    pub year: u32,
    pub gas_yearly: f64,
    pub gas_cumulative: f64,
    pub gas_upfront: f64,
    pub gas_loan: f64,
    pub gas_energy: f64,
    pub gas_tax: f64,
    pub gas_insurance: f64,
    pub gas_maintenance: f64,
    pub electric_yearly: f64,
    pub electric_cumulative: f64,
    pub electric_upfront: f64,
    pub electric_loan: f64,
    pub electric_energy: f64,
    pub electric_tax: f64,
    pub electric_insurance: f64,
    pub electric_maintenance: f64,
}

impl ComparisonCsvRow {
    pub fn new(gas: &YearRecord, electric: &YearRecord) -> Self {
        Self {
            year: gas.year,
            gas_yearly: gas.yearly,
            gas_cumulative: gas.cumulative,
            gas_upfront: gas.breakdown.upfront,
            gas_loan: gas.breakdown.loan,
            gas_energy: gas.breakdown.energy,
            gas_tax: gas.breakdown.tax,
            gas_insurance: gas.breakdown.insurance,
            gas_maintenance: gas.breakdown.maintenance,
            electric_yearly: electric.yearly,
            electric_cumulative: electric.cumulative,
            electric_upfront: electric.breakdown.upfront,
            electric_loan: electric.breakdown.loan,
            electric_energy: electric.breakdown.energy,
            electric_tax: electric.breakdown.tax,
            electric_insurance: electric.breakdown.insurance,
            electric_maintenance: electric.breakdown.maintenance,
        }
    }
}

/// Writes yearly rows with a header line
///
/// Every render starts a fresh CSV section with its own header, so one
/// renderer can take a comparison followed by a budget.
pub struct CsvRenderer<W: Write> {
    out: W,
}

impl<W: Write> CsvRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_rows<T, I>(&mut self, rows: I) -> Result<(), RenderError>
    where
        T: Serialize,
        I: IntoIterator<Item = T>,
    {
        let mut writer = csv::Writer::from_writer(&mut self.out);
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl<W: Write> ProjectionRenderer for CsvRenderer<W> {
    fn render_comparison(&mut self, result: &ComparisonResult) -> Result<(), RenderError> {
        let rows = result
            .gasoline
            .records
            .iter()
            .zip(&result.electric.records)
            .map(|(gas, ev)| ComparisonCsvRow::new(gas, ev));
        self.write_rows(rows)
    }

    fn render_budget(&mut self, result: &BudgetResult) -> Result<(), RenderError> {
        self.write_rows(&result.years)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{BudgetInputs, ComparisonInputs};
    use crate::projection::{project_budget, project_comparison};

    #[test]
    fn test_comparison_csv() {
        let result = project_comparison(&ComparisonInputs::default());
        let mut renderer = CsvRenderer::new(Vec::new());
        renderer.render_comparison(&result).unwrap();

        let text = String::from_utf8(renderer.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 9);
        assert!(lines[0].starts_with("year,gas_yearly,gas_cumulative,"));
        assert!(lines[8].starts_with("8,"));
    }

    #[test]
    fn test_budget_csv() {
        let result = project_budget(&BudgetInputs::default());
        let mut renderer = CsvRenderer::new(Vec::new());
        renderer.render_budget(&result).unwrap();

        let text = String::from_utf8(renderer.into_inner()).unwrap();
        let mut reader = csv::Reader::from_reader(text.as_bytes());

        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.get(0), Some("year"));
        assert_eq!(headers.get(7), Some("total"));
        assert_eq!(reader.records().count(), 10);
    }

    #[test]
    fn test_each_render_writes_its_own_header() {
        let comparison = project_comparison(&ComparisonInputs::default());
        let budget = project_budget(&BudgetInputs::default());

        let mut renderer = CsvRenderer::new(Vec::new());
        renderer.render_comparison(&comparison).unwrap();
        renderer.render_budget(&budget).unwrap();

        let text = String::from_utf8(renderer.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        // 1 + 8 comparison lines, then 1 + 10 budget lines
        assert_eq!(lines.len(), 20);
        assert!(lines[0].starts_with("year,gas_yearly,"));
        assert!(lines[9].starts_with("year,down_payment,installment,"));
        assert!(lines[19].starts_with("10,"));
    }
}
