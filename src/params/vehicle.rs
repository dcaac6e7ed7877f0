//! Per-vehicle cost inputs and the two-vehicle comparison snapshot

use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{
    require_finite, require_non_negative, require_percent, require_positive, InputError,
    ParameterMap,
};

/// Vehicle alternative being costed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Powertrain {
    Gasoline,
    Electric,
}

impl fmt::Display for Powertrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Powertrain::Gasoline => write!(f, "gasoline"),
            Powertrain::Electric => write!(f, "electric"),
        }
    }
}

/// Cost parameters for one vehicle alternative
///
/// Percentages are whole percents (20 means 20%). The loan term is kept as
/// a float because it arrives as parsed form text and is compared against
/// the year index as a real number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostInputs {
    /// Purchase price
    pub price: f64,

    /// Down payment as a percentage of price
    pub down_payment_pct: f64,

    /// Annual loan interest rate in percent
    pub interest_rate_pct: f64,

    /// Loan term in months
    pub loan_term_months: f64,

    /// Fuel or electricity price per unit (litre or kWh)
    pub energy_price: f64,

    /// Distance per unit of energy (km/L or km/kWh)
    pub consumption: f64,

    /// Distance driven per year
    pub annual_distance: f64,

    /// Recurring maintenance cost per year
    pub maintenance_cost: f64,

    /// Periodic component replacement cost (tyres, battery service, ...)
    pub replacement_cost: f64,

    /// Insurance premium per year
    pub insurance_cost: f64,

    /// Vehicle tax per year
    pub tax_cost: f64,

    /// Purchase subsidy as a percentage of price
    pub subsidy_pct: f64,

    /// Resale value at the end of the horizon as a percentage of price
    pub resale_value_pct: f64,
}

impl CostInputs {
    /// Amount paid up front after the purchase subsidy
    pub fn subsidized_price(&self) -> f64 {
        self.price * (1.0 - self.subsidy_pct / 100.0)
    }

    /// Resale proceeds at the end of the horizon
    pub fn resale_value(&self) -> f64 {
        self.price * (self.resale_value_pct / 100.0)
    }

    /// Energy cost per year
    pub fn annual_energy_cost(&self) -> f64 {
        (self.annual_distance / self.consumption) * self.energy_price
    }

    /// Check the snapshot against the input invariants
    pub fn validate(&self) -> Result<(), InputError> {
        require_positive("price", self.price)?;
        require_percent("down payment percentage", self.down_payment_pct)?;
        require_percent("interest rate", self.interest_rate_pct)?;
        require_non_negative("loan term", self.loan_term_months)?;
        require_non_negative("energy price", self.energy_price)?;
        require_positive("consumption", self.consumption)?;
        require_non_negative("annual distance", self.annual_distance)?;
        require_non_negative("maintenance cost", self.maintenance_cost)?;
        require_non_negative("component replacement cost", self.replacement_cost)?;
        require_non_negative("insurance cost", self.insurance_cost)?;
        require_non_negative("tax cost", self.tax_cost)?;
        require_percent("subsidy percentage", self.subsidy_pct)?;
        require_percent("resale value percentage", self.resale_value_pct)?;
        require_finite("subsidized price", self.subsidized_price())
    }
}

/// Parameter names accepted by [`ComparisonInputs::set`], in form order
pub const COMPARISON_PARAMETERS: &[&str] = &[
    "priceGas",
    "priceElectric",
    "downPaymentPercentage",
    "interestRate",
    "loanTerm",
    "fuelPricePerLiter",
    "fuelConsumption",
    "electricityPricePerKWh",
    "electricConsumption",
    "annualDistance",
    "maintenanceCostGas",
    "maintenanceCostElectric",
    "componentReplacementCostGas",
    "componentReplacementCostElectric",
    "insuranceCostGas",
    "insuranceCostElectric",
    "taxCostGas",
    "taxCostElectric",
    "subsidyPercentageGas",
    "subsidyPercentageElectric",
    "resaleValuePercentageGas",
    "resaleValuePercentageElectric",
];

/// Input snapshot for the gasoline vs electric comparison
///
/// Financing terms and annual distance are single form fields shared by
/// both vehicles; they are written into both [`CostInputs`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonInputs {
    pub gasoline: CostInputs,
    pub electric: CostInputs,
}

impl Default for ComparisonInputs {
    /// Initial form values (prices in rupiah)
    fn default() -> Self {
        Self {
            gasoline: CostInputs {
                price: 350_000_000.0,
                down_payment_pct: 20.0,
                interest_rate_pct: 11.0,
                loan_term_months: 60.0,
                energy_price: 15_000.0,
                consumption: 12.0,
                annual_distance: 15_000.0,
                maintenance_cost: 6_000_000.0,
                replacement_cost: 1_000_000.0,
                insurance_cost: 6_000_000.0,
                tax_cost: 5_500_000.0,
                subsidy_pct: 0.0,
                resale_value_pct: 40.0,
            },
            electric: CostInputs {
                price: 420_000_000.0,
                down_payment_pct: 20.0,
                interest_rate_pct: 11.0,
                loan_term_months: 60.0,
                energy_price: 1_500.0,
                consumption: 5.0,
                annual_distance: 15_000.0,
                maintenance_cost: 2_000_000.0,
                replacement_cost: 12_500_000.0,
                insurance_cost: 8_000_000.0,
                tax_cost: 800_000.0,
                subsidy_pct: 10.0,
                resale_value_pct: 30.0,
            },
        }
    }
}

impl ComparisonInputs {
    /// Build a snapshot from defaults overlaid with `params`
    pub fn from_params(params: &ParameterMap) -> Self {
        let mut inputs = Self::default();
        inputs.apply(params);
        inputs
    }

    /// Overlay every known parameter in `params`; unknown names are skipped
    ///
    /// Returns the names that were not recognized.
    pub fn apply(&mut self, params: &ParameterMap) -> Vec<String> {
        let mut unknown = Vec::new();
        for (name, value) in params.iter() {
            if !self.set(name, value) {
                warn!("Ignoring unknown comparison parameter '{}'", name);
                unknown.push(name.to_string());
            }
        }
        unknown
    }

    /// Set a single named parameter, returning false if the name is unknown
    pub fn set(&mut self, name: &str, value: f64) -> bool {
        let (gas, ev) = (&mut self.gasoline, &mut self.electric);
        match name {
            "priceGas" => gas.price = value,
            "priceElectric" => ev.price = value,
            "downPaymentPercentage" => {
                gas.down_payment_pct = value;
                ev.down_payment_pct = value;
            }
            "interestRate" => {
                gas.interest_rate_pct = value;
                ev.interest_rate_pct = value;
            }
            "loanTerm" => {
                gas.loan_term_months = value;
                ev.loan_term_months = value;
            }
            "fuelPricePerLiter" => gas.energy_price = value,
            "fuelConsumption" => gas.consumption = value,
            "electricityPricePerKWh" => ev.energy_price = value,
            "electricConsumption" => ev.consumption = value,
            "annualDistance" => {
                gas.annual_distance = value;
                ev.annual_distance = value;
            }
            "maintenanceCostGas" => gas.maintenance_cost = value,
            "maintenanceCostElectric" => ev.maintenance_cost = value,
            "componentReplacementCostGas" => gas.replacement_cost = value,
            "componentReplacementCostElectric" => ev.replacement_cost = value,
            "insuranceCostGas" => gas.insurance_cost = value,
            "insuranceCostElectric" => ev.insurance_cost = value,
            "taxCostGas" => gas.tax_cost = value,
            "taxCostElectric" => ev.tax_cost = value,
            "subsidyPercentageGas" => gas.subsidy_pct = value,
            "subsidyPercentageElectric" => ev.subsidy_pct = value,
            "resaleValuePercentageGas" => gas.resale_value_pct = value,
            "resaleValuePercentageElectric" => ev.resale_value_pct = value,
            _ => return false,
        }
        true
    }

    /// Read a named parameter back out of the snapshot
    ///
    /// Shared fields are reported from the gasoline vehicle.
    pub fn get(&self, name: &str) -> Option<f64> {
        let (gas, ev) = (&self.gasoline, &self.electric);
        let value = match name {
            "priceGas" => gas.price,
            "priceElectric" => ev.price,
            "downPaymentPercentage" => gas.down_payment_pct,
            "interestRate" => gas.interest_rate_pct,
            "loanTerm" => gas.loan_term_months,
            "fuelPricePerLiter" => gas.energy_price,
            "fuelConsumption" => gas.consumption,
            "electricityPricePerKWh" => ev.energy_price,
            "electricConsumption" => ev.consumption,
            "annualDistance" => gas.annual_distance,
            "maintenanceCostGas" => gas.maintenance_cost,
            "maintenanceCostElectric" => ev.maintenance_cost,
            "componentReplacementCostGas" => gas.replacement_cost,
            "componentReplacementCostElectric" => ev.replacement_cost,
            "insuranceCostGas" => gas.insurance_cost,
            "insuranceCostElectric" => ev.insurance_cost,
            "taxCostGas" => gas.tax_cost,
            "taxCostElectric" => ev.tax_cost,
            "subsidyPercentageGas" => gas.subsidy_pct,
            "subsidyPercentageElectric" => ev.subsidy_pct,
            "resaleValuePercentageGas" => gas.resale_value_pct,
            "resaleValuePercentageElectric" => ev.resale_value_pct,
            _ => return None,
        };
        Some(value)
    }

    /// The snapshot as a flat parameter map
    pub fn to_params(&self) -> ParameterMap {
        COMPARISON_PARAMETERS
            .iter()
            .filter_map(|name| self.get(name).map(|value| (name.to_string(), value)))
            .collect()
    }

    pub fn vehicle(&self, powertrain: Powertrain) -> &CostInputs {
        match powertrain {
            Powertrain::Gasoline => &self.gasoline,
            Powertrain::Electric => &self.electric,
        }
    }

    /// Validate both vehicles, reporting the first violation
    pub fn validate(&self) -> Result<(), InputError> {
        for powertrain in [Powertrain::Gasoline, Powertrain::Electric] {
            self.vehicle(powertrain)
                .validate()
                .map_err(|source| InputError::Vehicle {
                    powertrain,
                    source: Box::new(source),
                })?;
        }
        Ok(())
    }
}
