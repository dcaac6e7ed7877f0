//! Input snapshots for the cost projections
//!
//! Inputs enter as a flat name→value map (form fields, parameter files or
//! command-line overrides) and are layered onto a default snapshot.

mod parse;
mod vehicle;
mod budget;
pub mod loader;

pub use parse::{parse_number, ParameterMap};
pub use vehicle::{ComparisonInputs, CostInputs, Powertrain, COMPARISON_PARAMETERS};
pub use budget::{BudgetInputs, BUDGET_PARAMETERS};
pub use loader::{load_parameter_file, parameters_from_json};

use std::path::PathBuf;
use thiserror::Error;

/// Failure to obtain a parameter map
#[derive(Debug, Error)]
pub enum ParamError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("parameter file must contain a JSON object of name/value pairs")]
    NotAnObject,

    #[error("parameter '{name}' has unsupported value {value}")]
    UnsupportedValue { name: String, value: String },

    #[error("unsupported parameter file extension: {0}")]
    UnsupportedFormat(String),

    #[error("override must look like name=value, got '{0}'")]
    MalformedOverride(String),

    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),
}

/// A snapshot value violating the input invariants
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InputError {
    #[error("{field} is not a finite number")]
    NotFinite { field: &'static str },

    #[error("{field} must be greater than zero, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} must be a percentage between 0 and 100, got {value}")]
    PercentOutOfRange { field: &'static str, value: f64 },

    #[error("{powertrain} vehicle: {source}")]
    Vehicle {
        powertrain: Powertrain,
        #[source]
        source: Box<InputError>,
    },
}

pub(crate) fn require_finite(field: &'static str, value: f64) -> Result<(), InputError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(InputError::NotFinite { field })
    }
}

pub(crate) fn require_positive(field: &'static str, value: f64) -> Result<(), InputError> {
    require_finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(InputError::NonPositive { field, value })
    }
}

pub(crate) fn require_non_negative(field: &'static str, value: f64) -> Result<(), InputError> {
    require_finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(InputError::Negative { field, value })
    }
}

pub(crate) fn require_percent(field: &'static str, value: f64) -> Result<(), InputError> {
    require_finite(field, value)?;
    if (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(InputError::PercentOutOfRange { field, value })
    }
}
