//! Component replacement schedules

use serde::{Deserialize, Serialize};

use crate::params::Powertrain;

/// Years in which the periodic component replacement cost is incurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplacementSchedule {
    /// Every second year (2, 4, 6, ...)
    EvenYears,
    /// Once, in the last year of the horizon
    FinalYear,
}

impl ReplacementSchedule {
    /// Schedule used for each vehicle in the comparison
    ///
    /// Gasoline cars replace wear parts every other year; the electric car
    /// carries a single large battery-related cost at the end.
    pub fn for_powertrain(powertrain: Powertrain) -> Self {
        match powertrain {
            Powertrain::Gasoline => ReplacementSchedule::EvenYears,
            Powertrain::Electric => ReplacementSchedule::FinalYear,
        }
    }

    /// Whether the replacement cost falls in `year` (1-based) of a `horizon`-year projection
    pub fn applies(&self, year: u32, horizon: u32) -> bool {
        match self {
            ReplacementSchedule::EvenYears => year % 2 == 0,
            ReplacementSchedule::FinalYear => year == horizon,
        }
    }
}
