//! Sweep one comparison parameter and report totals per value
//!
//! Runs the eight-year comparison for evenly spaced values of a single
//! parameter (in parallel) and writes one CSV row per value.
//!
//!   sensitivity --parameter interestRate --from 0 --to 15 --steps 16

use anyhow::{ensure, Context, Result};
use clap::Parser;
use log::info;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use vehicle_tco::params::load_parameter_file;
use vehicle_tco::scenario::linear_steps;
use vehicle_tco::{ComparisonInputs, ParameterMap, ScenarioRunner};

#[derive(Parser, Debug)]
#[command(
    name = "sensitivity",
    about = "Sweep one comparison parameter and write per-value totals as CSV"
)]
struct Cli {
    /// Parameter to vary, e.g. interestRate or priceElectric
    #[arg(long)]
    parameter: String,

    #[arg(long)]
    from: f64,

    #[arg(long)]
    to: f64,

    /// Number of values, including both ends
    #[arg(long, default_value_t = 11)]
    steps: usize,

    /// Base parameter file (.json or .csv)
    #[arg(long, short = 'p')]
    params: Option<PathBuf>,

    /// Override a base parameter, e.g. --set loanTerm=36
    #[arg(long = "set", value_name = "NAME=VALUE")]
    overrides: Vec<String>,

    /// Output CSV path (stdout if omitted)
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    ensure!(cli.steps > 0, "--steps must be at least 1");

    let mut params = match &cli.params {
        Some(path) => load_parameter_file(path)
            .with_context(|| format!("loading parameters from {}", path.display()))?,
        None => ParameterMap::new(),
    };
    for assignment in &cli.overrides {
        params.insert_override(assignment)?;
    }

    let base = ComparisonInputs::from_params(&params);
    base.validate().context("invalid base inputs")?;

    let values = linear_steps(cli.from, cli.to, cli.steps);
    let start = Instant::now();
    let runner = ScenarioRunner::new(base);
    let points = runner.sweep(&cli.parameter, &values)?;
    info!(
        "Swept {} over {} values in {:?}",
        cli.parameter,
        points.len(),
        start.elapsed()
    );

    let out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };

    let mut writer = csv::Writer::from_writer(out);
    for point in &points {
        writer.serialize(point)?;
    }
    writer.flush()?;

    if let Some(path) = &cli.output {
        info!("Output written to {}", path.display());
    }
    Ok(())
}
