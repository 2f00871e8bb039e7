//! fincalc CLI
//!
//! Command-line front end for the calculators

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use fincalc::input::{
    load_cash_flows, AnnuityForm, CocomoForm, IncomeTaxForm, InflationForm, NpvForm,
};
use fincalc::{CalculationRequest, CalculationResult, Calculator, ProjectType};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliProjectType {
    Organic,
    Semidetached,
    Embedded,
}

impl From<CliProjectType> for ProjectType {
    fn from(value: CliProjectType) -> Self {
        match value {
            CliProjectType::Organic => ProjectType::Organic,
            CliProjectType::Semidetached => ProjectType::Semidetached,
            CliProjectType::Embedded => ProjectType::Embedded,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "fincalc",
    version,
    about = "Financial and project-management calculators (NPV, annuity factor, COCOMO, inflation, Indian income tax)"
)]
struct Cli {
    /// CSV slab table (lower,upper,rate_pct) replacing the built-in New Regime slabs
    #[arg(long, global = true)]
    tax_slabs: Option<PathBuf>,

    /// Print results as JSON instead of a formatted summary
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Present value annuity factor
    Annuity {
        /// Discount rate per period (%)
        #[arg(long, default_value = "5", allow_hyphen_values = true)]
        rate: String,
        #[arg(long, default_value = "10", allow_hyphen_values = true)]
        periods: String,
    },
    /// Net present value of an investment
    Npv {
        /// Discount rate per period (%)
        #[arg(long, default_value = "10", allow_hyphen_values = true)]
        rate: String,
        /// Initial investment, as a positive amount
        #[arg(long, default_value = "10000", allow_hyphen_values = true)]
        investment: String,
        /// Cash flows for periods 1..n, comma separated
        #[arg(long = "cash-flows", value_delimiter = ',', allow_hyphen_values = true)]
        cash_flows: Vec<String>,
        /// Read cash flows from a period,cash_flow CSV file
        #[arg(long, conflicts_with = "cash_flows")]
        cash_flows_csv: Option<PathBuf>,
    },
    /// Basic COCOMO effort and schedule
    Cocomo {
        /// Size in thousands of lines of code
        #[arg(long, default_value = "50", allow_hyphen_values = true)]
        kloc: String,
        #[arg(long, value_enum, default_value_t = CliProjectType::Semidetached)]
        project_type: CliProjectType,
    },
    /// Amount needed in the future to match today's purchasing power
    Inflation {
        #[arg(long, default_value = "1000", allow_hyphen_values = true)]
        amount: String,
        /// Average annual inflation rate (%)
        #[arg(long, default_value = "3", allow_hyphen_values = true)]
        rate: String,
        #[arg(long, default_value = "10", allow_hyphen_values = true)]
        years: String,
    },
    /// Indian income tax, New Regime
    Tax {
        /// Total annual income
        #[arg(long, default_value = "1000000", allow_hyphen_values = true)]
        income: String,
    },
    /// Evaluate a JSON array of calculation requests
    Batch {
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let calculator = match &cli.tax_slabs {
        Some(path) => Calculator::from_tax_slabs_csv(path)
            .with_context(|| format!("failed to load tax slabs from {}", path.display()))?,
        None => Calculator::new(),
    };

    match build_request(&cli.command)? {
        Some(request) => print_result(&calculator.run(&request), cli.json),
        None => match &cli.command {
            Command::Batch { path } => run_batch(&calculator, path, cli.json),
            _ => Ok(()),
        },
    }
}

fn run_batch(calculator: &Calculator, path: &Path, json: bool) -> Result<()> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let requests: Vec<CalculationRequest> = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse requests in {}", path.display()))?;
    info!("running {} requests from {}", requests.len(), path.display());

    let results = calculator.run_batch(&requests);
    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        for (i, result) in results.iter().enumerate() {
            if i > 0 {
                println!();
            }
            println!("{}", result);
        }
    }
    Ok(())
}

/// Validate the form behind a single-calculator subcommand; None for batch
fn build_request(command: &Command) -> Result<Option<CalculationRequest>> {
    let request = match command {
        Command::Annuity { rate, periods } => AnnuityForm {
            rate: rate.clone(),
            periods: periods.clone(),
        }
        .validate()?,
        Command::Npv { rate, investment, cash_flows, cash_flows_csv } => {
            let mut form = NpvForm {
                rate: rate.clone(),
                initial_investment: investment.clone(),
                ..NpvForm::default()
            };
            if let Some(path) = cash_flows_csv {
                let flows = load_cash_flows(path)
                    .with_context(|| format!("failed to load cash flows from {}", path.display()))?;
                form.cash_flows = flows.iter().map(|cf| cf.to_string()).collect();
            } else if !cash_flows.is_empty() {
                form.cash_flows = cash_flows.clone();
            }
            form.validate()?
        }
        Command::Cocomo { kloc, project_type } => CocomoForm {
            kloc: kloc.clone(),
            project_type: (*project_type).into(),
        }
        .validate()?,
        Command::Inflation { amount, rate, years } => InflationForm {
            initial_amount: amount.clone(),
            annual_rate: rate.clone(),
            years: years.clone(),
        }
        .validate()?,
        Command::Tax { income } => IncomeTaxForm {
            income: income.clone(),
        }
        .validate()?,
        Command::Batch { .. } => return Ok(None),
    };
    Ok(Some(request))
}

fn print_result(result: &CalculationResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        println!("{}", result);
    }
    Ok(())
}
