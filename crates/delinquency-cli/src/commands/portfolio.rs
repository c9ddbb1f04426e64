use clap::{Args, ValueEnum};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use delinquency_core::portfolio::{
    calculate_portfolio_metrics, filter_and_sort, intervention_success_rates, BucketFilter,
    CustomerRecord, InterventionOutcome, PortfolioAssumptions, PortfolioInput, SortKey,
};
use delinquency_core::risk::{RiskBucket, TrendClassification};
use delinquency_core::Score;

use crate::input;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum BucketArg {
    All,
    Low,
    Medium,
    High,
}

impl From<BucketArg> for BucketFilter {
    fn from(arg: BucketArg) -> Self {
        match arg {
            BucketArg::All => BucketFilter::All,
            BucketArg::Low => BucketFilter::Only(RiskBucket::Low),
            BucketArg::Medium => BucketFilter::Only(RiskBucket::Medium),
            BucketArg::High => BucketFilter::Only(RiskBucket::High),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortArg {
    Risk,
    Name,
    Utilization,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Risk => SortKey::RiskScore,
            SortArg::Name => SortKey::Name,
            SortArg::Utilization => SortKey::Utilization,
        }
    }
}

/// Arguments for customer list filtering
#[derive(Args)]
pub struct FilterArgs {
    /// Customer list as a JSON array or CSV file (stdin JSON if omitted)
    #[arg(long)]
    pub input: Option<String>,

    /// Case-insensitive name or account-number search
    #[arg(long, default_value = "")]
    pub search: String,

    /// Restrict to one risk bucket
    #[arg(long, value_enum, default_value = "all")]
    pub bucket: BucketArg,

    /// Sort order
    #[arg(long, value_enum, default_value = "risk")]
    pub sort: SortArg,
}

/// Arguments for portfolio aggregation
#[derive(Args)]
pub struct PortfolioArgs {
    /// Portfolio JSON (`{customers, assumptions}`), a bare customer array, or a customer CSV
    #[arg(long)]
    pub input: Option<String>,

    /// Optional JSON array of `{label, success, total}` intervention outcomes
    #[arg(long)]
    pub outcomes: Option<String>,
}

/// List-view row: the record plus its recomputed bucket and normalised trend.
#[derive(Serialize)]
struct CustomerRow<'a> {
    id: &'a str,
    name: &'a str,
    account_number: &'a str,
    risk_score: Score,
    risk_bucket: RiskBucket,
    trend: TrendClassification,
    utilization_rate: Score,
    days_since_last_payment: u32,
    behavior_flags: &'a [String],
}

impl<'a> From<&'a CustomerRecord> for CustomerRow<'a> {
    fn from(c: &'a CustomerRecord) -> Self {
        CustomerRow {
            id: &c.id,
            name: &c.name,
            account_number: &c.account_number,
            risk_score: c.profile.risk_score,
            risk_bucket: c.bucket(),
            trend: c.profile.trend(),
            utilization_rate: c.profile.utilization_rate,
            days_since_last_payment: c.profile.days_since_last_payment,
            behavior_flags: &c.behavior_flags,
        }
    }
}

pub fn run_filter(args: FilterArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let customers = read_customers(args.input.as_deref())?;
    let rows = filter_and_sort(&customers, &args.search, args.bucket.into(), args.sort.into());
    info!(input = customers.len(), output = rows.len(), "filtered customer list");

    let view: Vec<CustomerRow<'_>> = rows.iter().map(CustomerRow::from).collect();
    Ok(serde_json::to_value(view)?)
}

pub fn run_portfolio(args: PortfolioArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let portfolio = read_portfolio(args.input.as_deref())?;
    let result = calculate_portfolio_metrics(&portfolio)?;
    let mut value = serde_json::to_value(result)?;

    if let Some(ref path) = args.outcomes {
        let outcomes: Vec<InterventionOutcome> = input::file::read_json(path)?;
        let rates = intervention_success_rates(&outcomes)?;
        value["result"]["intervention_success"] = serde_json::to_value(rates)?;
    }

    Ok(value)
}

fn read_customers(path: Option<&str>) -> Result<Vec<CustomerRecord>, Box<dyn std::error::Error>> {
    match path {
        Some(p) if input::is_csv(p) => input::csv_in::read_customers_csv(p),
        _ => input::read_required(path),
    }
}

/// Accepts the full portfolio object, or a bare customer list with default
/// assumptions.
fn read_portfolio(path: Option<&str>) -> Result<PortfolioInput, Box<dyn std::error::Error>> {
    if let Some(p) = path.filter(|p| input::is_csv(p)) {
        return Ok(PortfolioInput {
            customers: input::csv_in::read_customers_csv(p)?,
            assumptions: PortfolioAssumptions::default(),
        });
    }

    let value: Value = input::read_required(path)?;
    if value.is_array() {
        Ok(PortfolioInput {
            customers: serde_json::from_value(value)?,
            assumptions: PortfolioAssumptions::default(),
        })
    } else {
        Ok(serde_json::from_value(value)?)
    }
}
