mod commands;
mod output;

use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use commands::{DepositArgs, LoanArgs};
use emi_calculator::{CalculatorConfig, LoanCalculator};

/// Loan EMI and fixed deposit calculator
#[derive(Parser)]
#[command(
    name = "emi",
    version,
    about = "Loan EMI and fixed deposit calculator",
    long_about = "Prices fixed-rate loans (monthly installment, total interest, total \
                  payable, amortization schedule) and quotes fixed deposit maturity. \
                  Input is read leniently: anything unparseable counts as zero."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    output: OutputFormat,

    /// JSON configuration file (replaces the EMI_* environment variables)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the monthly installment of a loan
    Loan(LoanArgs),
    /// Quote the maturity of a fixed deposit
    Deposit(DepositArgs),
    /// List loan products and their default rates
    Products,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => CalculatorConfig::from_json_file(path)
            .with_context(|| format!("failed to load config from '{}'", path.display()))?,
        None => CalculatorConfig::from_env().context("invalid EMI_* environment")?,
    };
    init_tracing(&config.log_level);
    debug!(?config, "loaded configuration");

    let calculator = LoanCalculator::new(config);
    let value = match cli.command {
        Commands::Loan(args) => commands::run_loan(&calculator, args)?,
        Commands::Deposit(args) => commands::run_deposit(&calculator, args)?,
        Commands::Products => commands::run_products()?,
    };

    output::format_output(&cli.output, &value)
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
