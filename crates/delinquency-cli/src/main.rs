mod commands;
mod input;
mod logging;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::interventions::RecommendArgs;
use commands::portfolio::{FilterArgs, PortfolioArgs};
use commands::prediction::{FeaturesArgs, ReconcileArgs};
use commands::risk::{BucketArgs, TrendArgs};

/// Pre-delinquency risk policy engine
#[derive(Parser)]
#[command(
    name = "pdie",
    version,
    about = "Pre-delinquency risk policy engine",
    long_about = "Classifies customer risk scores into buckets, normalises trend \
                  signals and recommends interventions from a static policy table. \
                  Also filters customer lists, aggregates portfolio metrics and checks \
                  Prediction API responses against the engine thresholds."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log engine decisions to stderr (same as RUST_LOG=debug)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a risk score into Low / Medium / High
    Bucket(BucketArgs),
    /// Normalise a raw trend string
    Trend(TrendArgs),
    /// Evaluate a customer profile and recommend interventions
    Recommend(RecommendArgs),
    /// Search, filter and sort a customer list
    Filter(FilterArgs),
    /// Aggregate risk distribution and intervention estimates for a portfolio
    Portfolio(PortfolioArgs),
    /// Engineer model features from raw account data
    Features(FeaturesArgs),
    /// Check a Prediction API response against the engine bucket
    Reconcile(ReconcileArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Bucket(args) => commands::risk::run_bucket(args),
        Commands::Trend(args) => commands::risk::run_trend(args),
        Commands::Recommend(args) => commands::interventions::run_recommend(args),
        Commands::Filter(args) => commands::portfolio::run_filter(args),
        Commands::Portfolio(args) => commands::portfolio::run_portfolio(args),
        Commands::Features(args) => commands::prediction::run_features(args),
        Commands::Reconcile(args) => commands::prediction::run_reconcile(args),
        Commands::Version => {
            println!(
                "pdie {} (policy {})",
                env!("CARGO_PKG_VERSION"),
                delinquency_core::POLICY_VERSION
            );
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
