//! Vehicle TCO CLI
//!
//! Command-line interface for running ownership cost projections

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use vehicle_tco::params::{load_parameter_file, BUDGET_PARAMETERS, COMPARISON_PARAMETERS};
use vehicle_tco::render::{CsvRenderer, JsonRenderer, TableRenderer};
use vehicle_tco::{BudgetInputs, ComparisonInputs, CostProjector, ParameterMap, ProjectionRenderer};

#[derive(Parser, Debug)]
#[command(
    name = "tco",
    version,
    about = "Total cost of ownership of gasoline and electric cars"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Eight-year gasoline vs electric comparison
    Compare {
        #[command(flatten)]
        common: CommonArgs,

        /// Also report present values at this annual rate in percent, e.g. 5
        #[arg(long, value_name = "PERCENT")]
        discount_rate_pct: Option<f64>,
    },
    /// Ten-year running-cost budget for a single car
    Budget {
        #[command(flatten)]
        common: CommonArgs,
    },
    /// List parameter names and their default values
    Params {
        #[arg(value_enum, default_value_t = Profile::Compare)]
        profile: Profile,
    },
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Parameter file (.json or .csv) layered over the defaults
    #[arg(long, short = 'p')]
    params: Option<PathBuf>,

    /// Override a single parameter, e.g. --set interestRate=9.5
    #[arg(long = "set", value_name = "NAME=VALUE")]
    overrides: Vec<String>,

    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Project even when inputs are missing or out of range (NaN results)
    #[arg(long)]
    allow_invalid: bool,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Table,
    Csv,
    Json,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum Profile {
    Compare,
    Budget,
}

impl CommonArgs {
    /// Parameter file values with command-line overrides on top
    fn parameters(&self) -> Result<ParameterMap> {
        let mut params = match &self.params {
            Some(path) => load_parameter_file(path)
                .with_context(|| format!("loading parameters from {}", path.display()))?,
            None => ParameterMap::new(),
        };

        for assignment in &self.overrides {
            params.insert_override(assignment)?;
        }

        Ok(params)
    }

    fn output(&self) -> Result<Box<dyn Write>> {
        match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("creating {}", path.display()))?;
                Ok(Box::new(file))
            }
            None => Ok(Box::new(io::stdout().lock())),
        }
    }

    fn renderer(&self, discount_rate: Option<f64>) -> Result<Box<dyn ProjectionRenderer>> {
        let out = self.output()?;
        let renderer: Box<dyn ProjectionRenderer> = match self.format {
            OutputFormat::Table => {
                Box::new(TableRenderer::new(out).with_discount_rate(discount_rate))
            }
            OutputFormat::Csv => Box::new(CsvRenderer::new(out)),
            OutputFormat::Json => Box::new(JsonRenderer::new(out).pretty()),
        };
        Ok(renderer)
    }
}

fn run_compare(common: &CommonArgs, discount_rate_pct: Option<f64>) -> Result<()> {
    let params = common.parameters()?;
    let inputs = ComparisonInputs::from_params(&params);

    if !common.allow_invalid {
        inputs.validate().context("invalid comparison inputs")?;
    }

    let result = CostProjector::default().project_comparison(&inputs);
    info!(
        "Projected {} years: gasoline {:.0}, electric {:.0}",
        result.horizon_years,
        result.gasoline.total(),
        result.electric.total()
    );

    let rate = discount_rate_pct.map(|pct| pct / 100.0);
    common.renderer(rate)?.render_comparison(&result)?;
    Ok(())
}

fn run_budget(common: &CommonArgs) -> Result<()> {
    let params = common.parameters()?;
    let inputs = BudgetInputs::from_params(&params);

    if !common.allow_invalid {
        inputs.validate().context("invalid budget inputs")?;
    }

    let result = CostProjector::default().project_budget(&inputs);
    info!("Projected budget total {:.0}", result.total_cost);

    common.renderer(None)?.render_budget(&result)?;
    Ok(())
}

fn list_params(profile: Profile) -> Result<()> {
    let (names, defaults) = match profile {
        Profile::Compare => (COMPARISON_PARAMETERS, ComparisonInputs::default().to_params()),
        Profile::Budget => (BUDGET_PARAMETERS, BudgetInputs::default().to_params()),
    };

    let mut out = io::stdout().lock();
    for name in names {
        match defaults.get(name) {
            Some(value) => writeln!(out, "{:<34} {}", name, value)?,
            None => bail!("no default for parameter {}", name),
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match &cli.command {
        Command::Compare {
            common,
            discount_rate_pct,
        } => run_compare(common, *discount_rate_pct),
        Command::Budget { common } => run_budget(common),
        Command::Params { profile } => list_params(*profile),
    }
}
