//! Scenario runner for batches and parameter sweeps
//!
//! Holds a base comparison snapshot and projects variations of it. Each
//! projection is independent, so sweeps run in parallel.

use rayon::prelude::*;
use serde::Serialize;

use crate::params::{ComparisonInputs, ParamError, ParameterMap};
use crate::projection::{ComparisonResult, CostProjector};

/// Headline figures for one value of a swept parameter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepPoint {
    pub parameter: String,
    pub value: f64,
    pub gasoline_total: f64,
    pub electric_total: f64,
    pub gasoline_monthly_payment: f64,
    pub electric_monthly_payment: f64,
    pub break_even_year: Option<u32>,
}

/// Pre-built scenario runner
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(ComparisonInputs::default());
///
/// // Electric total as the subsidy grows from 0% to 20%
/// let points = runner.sweep("subsidyPercentageElectric", &[0.0, 5.0, 10.0, 15.0, 20.0])?;
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base_inputs: ComparisonInputs,
    projector: CostProjector,
}

impl ScenarioRunner {
    /// Create a runner over the given base snapshot with the default horizon
    pub fn new(base_inputs: ComparisonInputs) -> Self {
        Self {
            base_inputs,
            projector: CostProjector::default(),
        }
    }

    /// Create a runner with a custom projector
    pub fn with_projector(base_inputs: ComparisonInputs, projector: CostProjector) -> Self {
        Self {
            base_inputs,
            projector,
        }
    }

    /// Project the base snapshot with `overrides` layered on top
    pub fn run(&self, overrides: &ParameterMap) -> ComparisonResult {
        let mut inputs = self.base_inputs.clone();
        inputs.apply(overrides);
        self.projector.project_comparison(&inputs)
    }

    /// Project several override sets, in order
    pub fn run_batch(&self, scenarios: &[ParameterMap]) -> Vec<ComparisonResult> {
        scenarios
            .par_iter()
            .map(|overrides| self.run(overrides))
            .collect()
    }

    /// Project the base snapshot once per value of a single parameter
    ///
    /// Results are returned in the order of `values`.
    pub fn sweep(&self, parameter: &str, values: &[f64]) -> Result<Vec<SweepPoint>, ParamError> {
        if self.base_inputs.get(parameter).is_none() {
            return Err(ParamError::UnknownParameter(parameter.to_string()));
        }

        let points = values
            .par_iter()
            .map(|&value| {
                let mut inputs = self.base_inputs.clone();
                inputs.set(parameter, value);
                let result = self.projector.project_comparison(&inputs);
                let summary = result.summary();

                SweepPoint {
                    parameter: parameter.to_string(),
                    value,
                    gasoline_total: summary.gasoline_total,
                    electric_total: summary.electric_total,
                    gasoline_monthly_payment: summary.gasoline_monthly_payment,
                    electric_monthly_payment: summary.electric_monthly_payment,
                    break_even_year: summary.break_even_year,
                }
            })
            .collect();

        Ok(points)
    }

    /// Get reference to base inputs for inspection
    pub fn base_inputs(&self) -> &ComparisonInputs {
        &self.base_inputs
    }

    /// Get mutable reference to base inputs for customization
    pub fn base_inputs_mut(&mut self) -> &mut ComparisonInputs {
        &mut self.base_inputs
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new(ComparisonInputs::default())
    }
}

/// Evenly spaced values from `start` to `end` inclusive
pub fn linear_steps(start: f64, end: f64, steps: usize) -> Vec<f64> {
    match steps {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (steps - 1) as f64;
            (0..steps).map(|i| start + step * i as f64).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_runner_batch() {
        let runner = ScenarioRunner::default();

        let scenarios: Vec<ParameterMap> = [0.0, 10.0, 20.0]
            .iter()
            .map(|&subsidy| {
                let mut params = ParameterMap::new();
                params.insert("subsidyPercentageElectric", subsidy);
                params
            })
            .collect();

        let results = runner.run_batch(&scenarios);
        assert_eq!(results.len(), 3);

        // A larger subsidy lowers the electric total
        assert!(results[2].electric.total() < results[0].electric.total());
        assert_eq!(results[0].gasoline, results[2].gasoline);
    }

    #[test]
    fn test_sweep_preserves_order() {
        let runner = ScenarioRunner::default();
        let values = linear_steps(0.0, 15.0, 4);

        let points = runner.sweep("interestRate", &values).unwrap();
        let swept: Vec<f64> = points.iter().map(|p| p.value).collect();
        assert_eq!(swept, vec![0.0, 5.0, 10.0, 15.0]);

        for pair in points.windows(2) {
            assert!(pair[1].gasoline_monthly_payment > pair[0].gasoline_monthly_payment);
        }
    }

    #[test]
    fn test_sweep_matches_single_run() {
        let runner = ScenarioRunner::default();
        let points = runner.sweep("annualDistance", &[25_000.0]).unwrap();

        let mut overrides = ParameterMap::new();
        overrides.insert("annualDistance", 25_000.0);
        let result = runner.run(&overrides);

        assert_eq!(points[0].gasoline_total, result.gasoline.total());
        assert_eq!(points[0].electric_total, result.electric.total());
    }

    #[test]
    fn test_sweep_unknown_parameter() {
        let runner = ScenarioRunner::default();
        assert!(matches!(
            runner.sweep("topSpeed", &[1.0]),
            Err(ParamError::UnknownParameter(name)) if name == "topSpeed"
        ));
    }

    #[test]
    fn test_linear_steps() {
        assert!(linear_steps(0.0, 1.0, 0).is_empty());
        assert_eq!(linear_steps(3.0, 9.0, 1), vec![3.0]);
        assert_eq!(linear_steps(0.0, 1.0, 3), vec![0.0, 0.5, 1.0]);
    }
}
