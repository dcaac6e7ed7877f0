//! Single-vehicle running-cost budget snapshot

use log::warn;
use serde::{Deserialize, Serialize};

use super::{require_non_negative, InputError, ParameterMap};

/// Parameter names accepted by [`BudgetInputs::set`], in form order
pub const BUDGET_PARAMETERS: &[&str] = &[
    "downPayment",
    "monthlyInstallment",
    "annualTax",
    "serviceCost",
    "fuelPrice",
    "dailyDistance",
    "weekendDistance",
];

/// Inputs for the ten-year running-cost budget of a single financed car
///
/// Amounts are absolute (not percentages). Distances are in km.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetInputs {
    /// Down payment paid once at purchase
    pub down_payment: f64,

    /// Fixed monthly loan installment
    pub monthly_installment: f64,

    /// Vehicle tax per year
    pub annual_tax: f64,

    /// Yearly service cost once the warranty period has ended
    pub service_cost: f64,

    /// Fuel price per litre in the first year
    pub fuel_price: f64,

    /// Distance driven on each weekday
    pub daily_distance: f64,

    /// Distance driven over each weekend
    pub weekend_distance: f64,
}

impl Default for BudgetInputs {
    fn default() -> Self {
        Self {
            down_payment: 50_000_000.0,
            monthly_installment: 4_500_000.0,
            annual_tax: 3_500_000.0,
            service_cost: 5_000_000.0,
            fuel_price: 10_000.0,
            daily_distance: 40.0,
            weekend_distance: 60.0,
        }
    }
}

impl BudgetInputs {
    /// Build a snapshot from defaults overlaid with `params`
    pub fn from_params(params: &ParameterMap) -> Self {
        let mut inputs = Self::default();
        inputs.apply(params);
        inputs
    }

    /// Overlay every known parameter, returning the unrecognized names
    pub fn apply(&mut self, params: &ParameterMap) -> Vec<String> {
        let mut unknown = Vec::new();
        for (name, value) in params.iter() {
            if !self.set(name, value) {
                warn!("Ignoring unknown budget parameter '{}'", name);
                unknown.push(name.to_string());
            }
        }
        unknown
    }

    pub fn set(&mut self, name: &str, value: f64) -> bool {
        let field = match name {
            "downPayment" => &mut self.down_payment,
            "monthlyInstallment" => &mut self.monthly_installment,
            "annualTax" => &mut self.annual_tax,
            "serviceCost" => &mut self.service_cost,
            "fuelPrice" => &mut self.fuel_price,
            "dailyDistance" => &mut self.daily_distance,
            "weekendDistance" => &mut self.weekend_distance,
            _ => return false,
        };
        *field = value;
        true
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        let value = match name {
            "downPayment" => self.down_payment,
            "monthlyInstallment" => self.monthly_installment,
            "annualTax" => self.annual_tax,
            "serviceCost" => self.service_cost,
            "fuelPrice" => self.fuel_price,
            "dailyDistance" => self.daily_distance,
            "weekendDistance" => self.weekend_distance,
            _ => return None,
        };
        Some(value)
    }

    pub fn to_params(&self) -> ParameterMap {
        BUDGET_PARAMETERS
            .iter()
            .filter_map(|name| self.get(name).map(|value| (name.to_string(), value)))
            .collect()
    }

    pub fn validate(&self) -> Result<(), InputError> {
        require_non_negative("down payment", self.down_payment)?;
        require_non_negative("monthly installment", self.monthly_installment)?;
        require_non_negative("annual tax", self.annual_tax)?;
        require_non_negative("service cost", self.service_cost)?;
        require_non_negative("fuel price", self.fuel_price)?;
        require_non_negative("daily distance", self.daily_distance)?;
        require_non_negative("weekend distance", self.weekend_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_params_keeps_defaults_for_missing_fields() {
        let mut params = ParameterMap::new();
        params.insert_text("fuelPrice", "12500");

        let inputs = BudgetInputs::from_params(&params);
        assert_eq!(inputs.fuel_price, 12_500.0);
        assert_eq!(inputs.down_payment, BudgetInputs::default().down_payment);
    }

    #[test]
    fn test_non_numeric_text_becomes_nan_and_fails_validation() {
        let mut params = ParameterMap::new();
        params.insert_text("annualTax", "three million");

        let inputs = BudgetInputs::from_params(&params);
        assert!(inputs.annual_tax.is_nan());
        assert_eq!(
            inputs.validate(),
            Err(InputError::NotFinite { field: "annual tax" })
        );
    }

    #[test]
    fn test_to_params_lists_every_field() {
        let params = BudgetInputs::default().to_params();
        assert_eq!(params.len(), BUDGET_PARAMETERS.len());
        assert_eq!(params.get("weekendDistance"), Some(60.0));
    }
}
