//! Parameter file loader
//!
//! Reads flat name/value parameter sets from JSON objects or two-column
//! CSV files (header `name,value`). Values may be numbers or numeric text;
//! text goes through the same parsing as form input.

use log::info;
use serde_json::Value;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::{ParamError, ParameterMap};

/// Directory holding the bundled example parameter sets
pub const DEFAULT_SCENARIO_PATH: &str = "data/scenarios";

/// Raw CSV row of a parameter file
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    name: String,
    value: String,
}

/// Load a parameter file, choosing the format by extension
pub fn load_parameter_file(path: &Path) -> Result<ParameterMap, ParamError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    let params = match extension.as_str() {
        "json" => load_json_parameters(path)?,
        "csv" => load_csv_parameters(path)?,
        other => return Err(ParamError::UnsupportedFormat(other.to_string())),
    };

    info!("Loaded {} parameters from {}", params.len(), path.display());
    Ok(params)
}

/// Load parameters from a JSON object file
pub fn load_json_parameters(path: &Path) -> Result<ParameterMap, ParamError> {
    let file = open(path)?;
    let value: Value = serde_json::from_reader(file)?;
    parameters_from_json(&value)
}

/// Load parameters from a `name,value` CSV file
pub fn load_csv_parameters(path: &Path) -> Result<ParameterMap, ParamError> {
    let file = open(path)?;
    read_csv_parameters(file)
}

/// Read `name,value` rows from any reader
pub fn read_csv_parameters<R: Read>(reader: R) -> Result<ParameterMap, ParamError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut params = ParameterMap::new();
    for result in reader.deserialize() {
        let row: CsvRow = result?;
        params.insert_text(row.name, &row.value);
    }

    Ok(params)
}

/// Convert a JSON object of name/value pairs into a parameter map
///
/// Numbers are taken as-is, strings are parsed like form text and `null`
/// stands for an empty field (NaN).
pub fn parameters_from_json(value: &Value) -> Result<ParameterMap, ParamError> {
    let object = value.as_object().ok_or(ParamError::NotAnObject)?;

    let mut params = ParameterMap::new();
    for (name, entry) in object {
        match entry {
            Value::Number(number) => params.insert(name.clone(), number.as_f64().unwrap_or(f64::NAN)),
            Value::String(text) => params.insert_text(name.clone(), text),
            Value::Null => params.insert(name.clone(), f64::NAN),
            other => {
                return Err(ParamError::UnsupportedValue {
                    name: name.clone(),
                    value: other.to_string(),
                })
            }
        }
    }

    Ok(params)
}

fn open(path: &Path) -> Result<File, ParamError> {
    File::open(path).map_err(|source| ParamError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{BudgetInputs, ComparisonInputs};
    use serde_json::json;

    fn scenario(name: &str) -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join(DEFAULT_SCENARIO_PATH)
            .join(name)
    }

    #[test]
    fn test_json_values() {
        let value = json!({
            "priceGas": 300000000,
            "interestRate": "9.5",
            "loanTerm": "36 months",
            "taxCostGas": null,
        });

        let params = parameters_from_json(&value).unwrap();
        assert_eq!(params.get("priceGas"), Some(300_000_000.0));
        assert_eq!(params.get("interestRate"), Some(9.5));
        assert_eq!(params.get("loanTerm"), Some(36.0));
        assert!(params.get("taxCostGas").unwrap().is_nan());
    }

    #[test]
    fn test_json_rejects_non_objects_and_nested_values() {
        assert!(matches!(
            parameters_from_json(&json!([1, 2, 3])),
            Err(ParamError::NotAnObject)
        ));
        assert!(matches!(
            parameters_from_json(&json!({ "priceGas": [1] })),
            Err(ParamError::UnsupportedValue { .. })
        ));
    }

    #[test]
    fn test_csv_rows() {
        let data = "name,value\npriceElectric, 400000000\nsubsidyPercentageElectric,15\nloanTerm,\n";
        let params = read_csv_parameters(data.as_bytes()).unwrap();

        assert_eq!(params.get("priceElectric"), Some(400_000_000.0));
        assert_eq!(params.get("subsidyPercentageElectric"), Some(15.0));
        assert!(params.get("loanTerm").unwrap().is_nan());
    }

    #[test]
    fn test_unsupported_extension() {
        let err = load_parameter_file(Path::new("params.toml")).unwrap_err();
        assert!(matches!(err, ParamError::UnsupportedFormat(ext) if ext == "toml"));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_parameter_file(Path::new("does/not/exist.json")).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.json"));
    }

    #[test]
    fn test_load_bundled_scenarios() {
        let params = load_parameter_file(&scenario("city_commuter.json")).unwrap();
        let inputs = ComparisonInputs::from_params(&params);
        assert!(inputs.validate().is_ok(), "{:?}", inputs.validate());
        assert_eq!(inputs.gasoline.annual_distance, 10_000.0);

        let params = load_parameter_file(&scenario("cash_purchase.csv")).unwrap();
        let inputs = ComparisonInputs::from_params(&params);
        assert!(inputs.validate().is_ok(), "{:?}", inputs.validate());
        assert_eq!(inputs.electric.interest_rate_pct, 0.0);

        let params = load_parameter_file(&scenario("family_budget.json")).unwrap();
        let inputs = BudgetInputs::from_params(&params);
        assert!(inputs.validate().is_ok(), "{:?}", inputs.validate());
    }
}
