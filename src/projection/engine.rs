//! Core projection engine for yearly vehicle ownership costs

use log::debug;

use super::cashflows::{
    BudgetResult, BudgetYear, ComparisonResult, CostBreakdown, VehicleProjection, YearRecord,
};
use super::loan::{annual_loan_payment, monthly_payment};
use super::schedule::ReplacementSchedule;
use super::state::{BudgetState, ComparisonState};
use crate::params::{BudgetInputs, ComparisonInputs, CostInputs, Powertrain};

/// Ownership horizon of the gasoline vs electric comparison
pub const COMPARISON_HORIZON_YEARS: u32 = 8;

/// Ownership horizon of the single-vehicle budget
pub const BUDGET_HORIZON_YEARS: u32 = 10;

/// Budget loan installments run for this many years regardless of inputs
pub const BUDGET_LOAN_YEARS: u32 = 5;

/// Budget service costs start in the year after this one
pub const BUDGET_SERVICE_AFTER_YEAR: u32 = 5;

/// Assumed fuel efficiency of the budgeted car
pub const BUDGET_KM_PER_LITRE: f64 = 14.0;

/// Yearly fuel price multiplier (5% increase per year)
pub const FUEL_PRICE_ESCALATION: f64 = 1.05;

const WORKDAYS_PER_WEEK: f64 = 5.0;
const WEEKS_PER_YEAR: f64 = 52.0;

/// Configuration for a projection run
#[derive(Debug, Clone)]
pub struct ProjectionConfig {
    /// Number of years in the comparison
    pub comparison_horizon_years: u32,

    /// Number of years in the budget
    pub budget_horizon_years: u32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            comparison_horizon_years: COMPARISON_HORIZON_YEARS,
            budget_horizon_years: BUDGET_HORIZON_YEARS,
        }
    }
}

/// Main projection engine
///
/// Every call recomputes from the given snapshot; the projector holds no
/// state between runs.
#[derive(Debug, Clone, Default)]
pub struct CostProjector {
    config: ProjectionConfig,
}

impl CostProjector {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Project both vehicles of a comparison snapshot
    pub fn project_comparison(&self, inputs: &ComparisonInputs) -> ComparisonResult {
        let result = ComparisonResult {
            horizon_years: self.config.comparison_horizon_years,
            gasoline: self.project_vehicle(&inputs.gasoline, Powertrain::Gasoline),
            electric: self.project_vehicle(&inputs.electric, Powertrain::Electric),
        };

        debug!(
            "Comparison over {} years: gasoline {:.2}, electric {:.2}",
            result.horizon_years,
            result.gasoline.total(),
            result.electric.total()
        );

        result
    }

    /// Run the yearly cost projection for one vehicle
    pub fn project_vehicle(&self, inputs: &CostInputs, powertrain: Powertrain) -> VehicleProjection {
        let schedule = ReplacementSchedule::for_powertrain(powertrain);
        let payment = monthly_payment(
            inputs.price,
            inputs.down_payment_pct,
            inputs.interest_rate_pct,
            inputs.loan_term_months,
        );

        let mut projection = VehicleProjection::new(powertrain, payment, inputs.resale_value());
        let mut state = ComparisonState::new();

        for _year in 1..=self.config.comparison_horizon_years {
            state.advance_year();
            let record = self.calculate_year(inputs, schedule, payment, &mut state);
            projection.add_record(record);
        }

        // Resale only reduces the final cumulative figure, never a yearly one
        let resale = projection.resale_value;
        if let Some(last) = projection.records.last_mut() {
            last.cumulative = state.cumulative - resale;
        }

        projection
    }

    /// Costs for a single comparison year
    fn calculate_year(
        &self,
        inputs: &CostInputs,
        schedule: ReplacementSchedule,
        payment: f64,
        state: &mut ComparisonState,
    ) -> YearRecord {
        let year = state.year;

        let loan = annual_loan_payment(year, payment, inputs.loan_term_months);
        let energy = inputs.annual_energy_cost();

        // The full post-subsidy price lands in year 1 on top of any loan
        // installments, so financed purchases count the price twice.
        let upfront = if year == 1 { inputs.subsidized_price() } else { 0.0 };

        let replacement = if schedule.applies(year, self.config.comparison_horizon_years) {
            inputs.replacement_cost
        } else {
            0.0
        };

        let breakdown = CostBreakdown {
            upfront,
            loan,
            energy,
            tax: inputs.tax_cost,
            insurance: inputs.insurance_cost,
            maintenance: inputs.maintenance_cost + replacement,
        };
        let yearly = breakdown.total();
        let cumulative = state.accumulate(yearly);

        YearRecord {
            year,
            yearly,
            cumulative,
            breakdown,
        }
    }

    /// Project the single-vehicle running-cost budget
    pub fn project_budget(&self, inputs: &BudgetInputs) -> BudgetResult {
        let weekly_distance = inputs.daily_distance * WORKDAYS_PER_WEEK + inputs.weekend_distance;
        let annual_distance = weekly_distance * WEEKS_PER_YEAR;
        let annual_fuel_litres = annual_distance / BUDGET_KM_PER_LITRE;

        let mut state = BudgetState::new(inputs.fuel_price, inputs.down_payment);
        let mut years = Vec::with_capacity(self.config.budget_horizon_years as usize);

        for _year in 1..=self.config.budget_horizon_years {
            state.advance_year();
            let year = state.year;

            let installment = if year <= BUDGET_LOAN_YEARS {
                inputs.monthly_installment * 12.0
            } else {
                0.0
            };
            let service = if year > BUDGET_SERVICE_AFTER_YEAR {
                inputs.service_cost
            } else {
                0.0
            };
            let fuel = annual_fuel_litres * state.fuel_price;

            let total = installment + inputs.annual_tax + fuel + service;

            years.push(BudgetYear {
                year,
                down_payment: if year == 1 { inputs.down_payment } else { 0.0 },
                installment,
                tax: inputs.annual_tax,
                fuel_price: state.fuel_price,
                fuel,
                service,
                total,
            });

            state.close_year(total, FUEL_PRICE_ESCALATION);
        }

        debug!(
            "Budget over {} years: {:.0} km/year, total {:.2}",
            self.config.budget_horizon_years, annual_distance, state.total
        );

        BudgetResult {
            horizon_years: self.config.budget_horizon_years,
            down_payment: inputs.down_payment,
            monthly_installment: inputs.monthly_installment,
            annual_distance,
            annual_fuel_litres,
            years,
            total_cost: state.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParameterMap;
    use approx::assert_relative_eq;

    fn comparison(overrides: &[(&str, f64)]) -> ComparisonResult {
        let mut params = ParameterMap::new();
        for (name, value) in overrides {
            params.insert(*name, *value);
        }
        let inputs = ComparisonInputs::from_params(&params);
        CostProjector::default().project_comparison(&inputs)
    }

    #[test]
    fn test_projection_runs() {
        let result = comparison(&[]);

        assert_eq!(result.horizon_years, 8);
        assert_eq!(result.gasoline.records.len(), 8);
        assert_eq!(result.electric.records.len(), 8);

        let years: Vec<u32> = result.gasoline.records.iter().map(|r| r.year).collect();
        assert_eq!(years, (1..=8).collect::<Vec<u32>>());

        assert_relative_eq!(
            result.gasoline.monthly_payment,
            monthly_payment(350_000_000.0, 20.0, 11.0, 60.0)
        );
        assert_relative_eq!(
            result.electric.monthly_payment,
            monthly_payment(420_000_000.0, 20.0, 11.0, 60.0)
        );
    }

    #[test]
    fn test_cumulative_is_running_sum_until_resale() {
        let result = comparison(&[]);

        for vehicle in [&result.gasoline, &result.electric] {
            let mut running = 0.0;
            for record in &vehicle.records {
                running += record.yearly;
                if record.year < 8 {
                    assert_eq!(record.cumulative, running, "year {}", record.year);
                } else {
                    assert_eq!(record.cumulative, running - vehicle.resale_value);
                }
            }
            assert_eq!(vehicle.total(), vehicle.records[7].cumulative);
        }

        assert_relative_eq!(result.gasoline.resale_value, 140_000_000.0);
        assert_relative_eq!(result.electric.resale_value, 126_000_000.0);
    }

    #[test]
    fn test_final_yearly_figure_excludes_resale() {
        let result = comparison(&[]);
        let last = &result.gasoline.records[7];
        assert_relative_eq!(last.yearly, last.breakdown.total(), max_relative = 1e-12);
        assert!(last.yearly > 0.0);
    }

    #[test]
    fn test_breakdown_sums_exactly_to_yearly() {
        let result = comparison(&[]);
        for vehicle in [&result.gasoline, &result.electric] {
            for record in &vehicle.records {
                assert_eq!(record.yearly, record.breakdown.total(), "year {}", record.year);
            }
        }
    }

    #[test]
    fn test_loan_stops_after_term() {
        // 30 months = 2.5 years
        let result = comparison(&[("loanTerm", 30.0)]);

        for vehicle in [&result.gasoline, &result.electric] {
            let annual = vehicle.monthly_payment * 12.0;
            assert_eq!(vehicle.records[0].breakdown.loan, annual);
            assert_eq!(vehicle.records[1].breakdown.loan, annual);
            for record in &vehicle.records[2..] {
                assert_eq!(record.breakdown.loan, 0.0, "year {}", record.year);
            }
        }
    }

    #[test]
    fn test_default_loan_covers_five_years() {
        let result = comparison(&[]);
        let loan_years: Vec<u32> = result
            .gasoline
            .records
            .iter()
            .filter(|r| r.breakdown.loan > 0.0)
            .map(|r| r.year)
            .collect();
        assert_eq!(loan_years, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_replacement_schedules() {
        let result = comparison(&[("maintenanceCostGas", 0.0), ("maintenanceCostElectric", 0.0)]);

        for record in &result.gasoline.records {
            let expected = if record.year % 2 == 0 { 1_000_000.0 } else { 0.0 };
            assert_eq!(record.breakdown.maintenance, expected, "gasoline year {}", record.year);
        }
        for record in &result.electric.records {
            let expected = if record.year == 8 { 12_500_000.0 } else { 0.0 };
            assert_eq!(record.breakdown.maintenance, expected, "electric year {}", record.year);
        }
    }

    #[test]
    fn test_upfront_price_only_in_first_year() {
        let result = comparison(&[]);

        assert_eq!(result.gasoline.records[0].breakdown.upfront, 350_000_000.0);
        assert_relative_eq!(result.electric.records[0].breakdown.upfront, 378_000_000.0);
        for vehicle in [&result.gasoline, &result.electric] {
            for record in &vehicle.records[1..] {
                assert_eq!(record.breakdown.upfront, 0.0);
            }
        }

        // Year 1 carries both the price and a full year of installments
        let first = &result.gasoline.records[0];
        assert!(first.yearly > first.breakdown.upfront + first.breakdown.loan);
    }

    #[test]
    fn test_energy_constant_every_year() {
        let result = comparison(&[]);
        for record in &result.gasoline.records {
            assert_eq!(record.breakdown.energy, 18_750_000.0);
        }
        for record in &result.electric.records {
            assert_eq!(record.breakdown.energy, 4_500_000.0);
        }
    }

    #[test]
    fn test_default_totals() {
        let result = comparison(&[]);
        let gas_payment = monthly_payment(350_000_000.0, 20.0, 11.0, 60.0);

        // price + 5 years of installments + 8 years of running costs
        // + 4 replacements - resale
        let expected_gas = 350_000_000.0
            + gas_payment * 12.0 * 5.0
            + (18_750_000.0 + 6_000_000.0 + 6_000_000.0 + 5_500_000.0) * 8.0
            + 1_000_000.0 * 4.0
            - 140_000_000.0;
        assert_relative_eq!(result.gasoline.total(), expected_gas, max_relative = 1e-12);
    }

    #[test]
    fn test_zero_interest_comparison_is_finite() {
        let result = comparison(&[("interestRate", 0.0)]);
        assert_relative_eq!(result.gasoline.monthly_payment, 280_000_000.0 / 60.0);
        assert!(result.gasoline.records.iter().all(|r| r.cumulative.is_finite()));
    }

    #[test]
    fn test_nan_propagates_per_vehicle() {
        let result = comparison(&[("priceGas", f64::NAN)]);

        assert!(result.gasoline.monthly_payment.is_nan());
        // Price feeds the upfront cost and every installment year
        let nan_years: Vec<u32> = result
            .gasoline
            .records
            .iter()
            .filter(|r| r.yearly.is_nan())
            .map(|r| r.year)
            .collect();
        assert_eq!(nan_years, vec![1, 2, 3, 4, 5]);
        assert!(result.gasoline.records.iter().all(|r| r.cumulative.is_nan()));
        assert!(result.gasoline.total().is_nan());

        assert!(result.electric.records.iter().all(|r| r.cumulative.is_finite()));
    }

    #[test]
    fn test_zero_consumption_is_unguarded() {
        let result = comparison(&[("fuelConsumption", 0.0)]);
        assert!(result.gasoline.records[0].breakdown.energy.is_infinite());
    }

    #[test]
    fn test_recompute_is_bit_identical() {
        let projector = CostProjector::default();

        let inputs = ComparisonInputs::default();
        assert_eq!(
            projector.project_comparison(&inputs),
            projector.project_comparison(&inputs)
        );

        let mut params = ParameterMap::new();
        params.insert_text("taxCostElectric", "");
        let inputs = ComparisonInputs::from_params(&params);
        let bits = |r: &ComparisonResult| -> Vec<u64> {
            r.gasoline
                .records
                .iter()
                .chain(&r.electric.records)
                .flat_map(|rec| [rec.yearly.to_bits(), rec.cumulative.to_bits()])
                .collect()
        };
        assert_eq!(
            bits(&projector.project_comparison(&inputs)),
            bits(&projector.project_comparison(&inputs))
        );
    }

    #[test]
    fn test_longer_horizon_moves_final_year_replacement() {
        let projector = CostProjector::new(ProjectionConfig {
            comparison_horizon_years: 10,
            ..Default::default()
        });
        let mut inputs = ComparisonInputs::default();
        inputs.electric.maintenance_cost = 0.0;

        let result = projector.project_comparison(&inputs);
        assert_eq!(result.electric.records.len(), 10);
        assert_eq!(result.electric.records[7].breakdown.maintenance, 0.0);
        assert_eq!(result.electric.records[9].breakdown.maintenance, 12_500_000.0);
    }

    fn budget() -> BudgetResult {
        CostProjector::default().project_budget(&BudgetInputs::default())
    }

    #[test]
    fn test_budget_runs() {
        let result = budget();
        assert_eq!(result.years.len(), 10);
        assert_eq!(result.yearly_totals().len(), 10);

        // (40 * 5 + 60) * 52 km
        assert_eq!(result.annual_distance, 13_520.0);
        assert_relative_eq!(result.annual_fuel_litres, 13_520.0 / 14.0);
    }

    #[test]
    fn test_budget_fuel_price_escalates() {
        let result = budget();
        let base = BudgetInputs::default().fuel_price;

        assert_eq!(result.years[0].fuel_price, base);
        assert_relative_eq!(result.years[4].fuel_price, base * 1.05_f64.powi(4), max_relative = 1e-12);

        for pair in result.years.windows(2) {
            assert_relative_eq!(pair[1].fuel_price, pair[0].fuel_price * 1.05, max_relative = 1e-12);
            assert_relative_eq!(pair[1].fuel, pair[0].fuel * 1.05, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_budget_loan_and_service_windows() {
        let result = budget();
        let inputs = BudgetInputs::default();

        for year in &result.years {
            if year.year <= 5 {
                assert_eq!(year.installment, inputs.monthly_installment * 12.0);
                assert_eq!(year.service, 0.0);
            } else {
                assert_eq!(year.installment, 0.0);
                assert_eq!(year.service, inputs.service_cost);
            }
            assert_eq!(year.tax, inputs.annual_tax);
        }
    }

    #[test]
    fn test_budget_down_payment_counted_once() {
        let result = budget();
        let inputs = BudgetInputs::default();

        assert_eq!(result.years[0].down_payment, inputs.down_payment);
        assert!(result.years[1..].iter().all(|y| y.down_payment == 0.0));

        // Yearly totals exclude the down payment; the grand total includes it
        let first = &result.years[0];
        assert_eq!(first.total, first.installment + first.tax + first.fuel + first.service);

        let mut expected = inputs.down_payment;
        for total in result.yearly_totals() {
            expected += total;
        }
        assert_eq!(result.total_cost, expected);
    }

    #[test]
    fn test_budget_nan_propagates() {
        let mut inputs = BudgetInputs::default();
        inputs.daily_distance = f64::NAN;

        let result = CostProjector::default().project_budget(&inputs);
        assert!(result.years.iter().all(|y| y.fuel.is_nan() && y.total.is_nan()));
        assert!(result.total_cost.is_nan());
    }
}
