//! Fixed-width text tables

use std::io::Write;

use super::{ProjectionRenderer, RenderError};
use crate::params::Powertrain;
use crate::projection::{BudgetResult, ComparisonResult, VehicleProjection};

/// Writes results as plain text tables
pub struct TableRenderer<W: Write> {
    out: W,
    discount_rate: Option<f64>,
}

impl<W: Write> TableRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            discount_rate: None,
        }
    }

    /// Also print present values at this annual rate (decimal)
    pub fn with_discount_rate(mut self, rate: Option<f64>) -> Self {
        self.discount_rate = rate;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_breakdown(&mut self, vehicle: &VehicleProjection) -> Result<(), RenderError> {
        writeln!(self.out, "\nCost breakdown ({}):", vehicle.powertrain)?;
        writeln!(
            self.out,
            "{:>4} {:>16} {:>14} {:>14} {:>12} {:>12} {:>14}",
            "Year", "Upfront", "Loan", "Energy", "Tax", "Insurance", "Maintenance"
        )?;
        writeln!(self.out, "{}", "-".repeat(92))?;

        for record in &vehicle.records {
            let b = &record.breakdown;
            writeln!(
                self.out,
                "{:>4} {:>16.0} {:>14.0} {:>14.0} {:>12.0} {:>12.0} {:>14.0}",
                record.year, b.upfront, b.loan, b.energy, b.tax, b.insurance, b.maintenance
            )?;
        }
        Ok(())
    }
}

impl<W: Write> ProjectionRenderer for TableRenderer<W> {
    fn render_comparison(&mut self, result: &ComparisonResult) -> Result<(), RenderError> {
        let summary = result.summary();

        writeln!(self.out, "Total cost of ownership ({} years):", result.horizon_years)?;
        writeln!(self.out, "  Gasoline: {:>16.0}", summary.gasoline_total)?;
        writeln!(self.out, "  Electric: {:>16.0}", summary.electric_total)?;

        writeln!(self.out, "\nMonthly loan installment:")?;
        writeln!(self.out, "  Gasoline: {:>16.0}", summary.gasoline_monthly_payment)?;
        writeln!(self.out, "  Electric: {:>16.0}", summary.electric_monthly_payment)?;

        writeln!(self.out, "\nYearly and cumulative cost:")?;
        writeln!(
            self.out,
            "{:>4} {:>16} {:>16} {:>16} {:>16}",
            "Year", "Gas (yearly)", "Gas (cumul.)", "EV (yearly)", "EV (cumul.)"
        )?;
        writeln!(self.out, "{}", "-".repeat(72))?;
        for (gas, ev) in result.gasoline.records.iter().zip(&result.electric.records) {
            writeln!(
                self.out,
                "{:>4} {:>16.0} {:>16.0} {:>16.0} {:>16.0}",
                gas.year, gas.yearly, gas.cumulative, ev.yearly, ev.cumulative
            )?;
        }

        self.write_breakdown(&result.gasoline)?;
        self.write_breakdown(&result.electric)?;

        writeln!(self.out)?;
        match summary.cheaper {
            Some(Powertrain::Electric) => writeln!(
                self.out,
                "Electric is cheaper by {:.0} over {} years",
                summary.difference, result.horizon_years
            )?,
            Some(Powertrain::Gasoline) => writeln!(
                self.out,
                "Gasoline is cheaper by {:.0} over {} years",
                -summary.difference, result.horizon_years
            )?,
            None => writeln!(self.out, "No cheaper alternative")?,
        }
        match summary.break_even_year {
            Some(year) => writeln!(self.out, "Electric breaks even in year {}", year)?,
            None => writeln!(self.out, "Electric does not break even within the horizon")?,
        }

        if let Some(rate) = self.discount_rate {
            let (gas_pv, ev_pv) = result.present_values(rate);
            writeln!(self.out, "\nPresent value at {:.2}%:", rate * 100.0)?;
            writeln!(self.out, "  Gasoline: {:>16.0}", gas_pv)?;
            writeln!(self.out, "  Electric: {:>16.0}", ev_pv)?;
        }

        Ok(())
    }

    fn render_budget(&mut self, result: &BudgetResult) -> Result<(), RenderError> {
        writeln!(
            self.out,
            "Running cost over {} years ({:.0} km/year, {:.1} L/year):",
            result.horizon_years, result.annual_distance, result.annual_fuel_litres
        )?;
        writeln!(
            self.out,
            "{:>4} {:>14} {:>14} {:>12} {:>14} {:>12} {:>14}",
            "Year", "Down payment", "Installment", "Tax", "Fuel", "Service", "Total"
        )?;
        writeln!(self.out, "{}", "-".repeat(90))?;

        for year in &result.years {
            writeln!(
                self.out,
                "{:>4} {:>14.0} {:>14.0} {:>12.0} {:>14.0} {:>12.0} {:>14.0}",
                year.year,
                year.down_payment,
                year.installment,
                year.tax,
                year.fuel,
                year.service,
                year.total
            )?;
        }

        writeln!(self.out, "\nTotal cost: {:.0}", result.total_cost)?;
        Ok(())
    }
}
