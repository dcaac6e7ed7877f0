//! AWS Lambda handler for ownership cost projections
//!
//! Accepts a profile name and a flat parameter object via JSON and returns
//! the full projection. Supports Lambda Function URLs for direct HTTP access.
//!
//! Request body:
//! ```json
//! { "profile": "comparison", "params": { "interestRate": 9.5 }, "discount_rate_pct": 5 }
//! ```

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use vehicle_tco::params::parameters_from_json;
use vehicle_tco::render::{BudgetReport, ComparisonReport};
use vehicle_tco::{BudgetInputs, ComparisonInputs, CostProjector};

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RequestProfile {
    #[default]
    Comparison,
    Budget,
}

/// Input for one projection
#[derive(Debug, Deserialize)]
struct ProjectionRequest {
    /// Which model to run (default: comparison)
    #[serde(default)]
    profile: RequestProfile,

    /// Flat name/value parameters layered over the defaults
    #[serde(default)]
    params: Option<Value>,

    /// Annual rate in percent for present values of the comparison
    #[serde(default)]
    discount_rate_pct: Option<f64>,

    /// Project even when inputs fail validation
    #[serde(default)]
    allow_invalid: bool,
}

#[derive(Debug, Serialize)]
struct PresentValues {
    rate_pct: f64,
    gasoline: f64,
    electric: f64,
}

#[derive(Debug, Serialize)]
struct ComparisonResponse<'a> {
    #[serde(flatten)]
    report: ComparisonReport<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    present_values: Option<PresentValues>,
    ignored_params: Vec<String>,
    execution_time_us: u64,
}

#[derive(Debug, Serialize)]
struct BudgetResponse<'a> {
    #[serde(flatten)]
    report: BudgetReport<'a>,
    ignored_params: Vec<String>,
    execution_time_us: u64,
}

fn cors(builder: lambda_http::http::response::Builder) -> lambda_http::http::response::Builder {
    builder
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
}

fn error_response(status: u16, message: &str) -> Result<Response<Body>, Error> {
    let body = serde_json::json!({ "error": message }).to_string();
    Ok(cors(Response::builder())
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::Text(body))?)
}

fn json_response<T: Serialize>(body: &T) -> Result<Response<Body>, Error> {
    Ok(cors(Response::builder())
        .status(200)
        .header("Content-Type", "application/json")
        .body(Body::Text(serde_json::to_string(body)?))?)
}

/// Lambda handler function
async fn handler(event: Request) -> Result<Response<Body>, Error> {
    let start = std::time::Instant::now();

    // Handle CORS preflight
    if event.method().as_str() == "OPTIONS" {
        return Ok(cors(Response::builder()).status(200).body(Body::Empty)?);
    }

    let body_str = match event.body() {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => "{}".to_string(),
    };

    let request: ProjectionRequest = match serde_json::from_str(&body_str) {
        Ok(r) => r,
        Err(e) => return error_response(400, &format!("Invalid JSON: {}", e)),
    };

    let params = match request.params.as_ref().map(parameters_from_json).transpose() {
        Ok(p) => p.unwrap_or_default(),
        Err(e) => return error_response(400, &format!("Invalid params: {}", e)),
    };

    let projector = CostProjector::default();

    match request.profile {
        RequestProfile::Comparison => {
            let mut inputs = ComparisonInputs::default();
            let ignored_params = inputs.apply(&params);

            if !request.allow_invalid {
                if let Err(e) = inputs.validate() {
                    warn!("Rejected comparison request: {}", e);
                    return error_response(400, &format!("Invalid input: {}", e));
                }
            }

            let result = projector.project_comparison(&inputs);
            let present_values = request.discount_rate_pct.map(|rate_pct| {
                let (gasoline, electric) = result.present_values(rate_pct / 100.0);
                PresentValues {
                    rate_pct,
                    gasoline,
                    electric,
                }
            });

            let response = ComparisonResponse {
                report: ComparisonReport::new(&result),
                present_values,
                ignored_params,
                execution_time_us: start.elapsed().as_micros() as u64,
            };
            info!("Served comparison in {}us", response.execution_time_us);
            json_response(&response)
        }
        RequestProfile::Budget => {
            let mut inputs = BudgetInputs::default();
            let ignored_params = inputs.apply(&params);

            if !request.allow_invalid {
                if let Err(e) = inputs.validate() {
                    warn!("Rejected budget request: {}", e);
                    return error_response(400, &format!("Invalid input: {}", e));
                }
            }

            let result = projector.project_budget(&inputs);
            let response = BudgetResponse {
                report: BudgetReport::new(&result),
                ignored_params,
                execution_time_us: start.elapsed().as_micros() as u64,
            };
            info!("Served budget in {}us", response.execution_time_us);
            json_response(&response)
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
