use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use delinquency_core::interventions::evaluate_profile;
use delinquency_core::risk::CustomerRiskProfile;

use crate::input;

/// Arguments for profile evaluation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct RecommendArgs {
    /// Path to JSON profile file (read only when --score is not given)
    #[arg(long)]
    pub input: Option<String>,

    /// Risk score
    #[arg(long)]
    pub score: Option<Decimal>,

    /// Credit utilisation (balance / limit)
    #[arg(long, alias = "util")]
    pub utilization: Option<Decimal>,

    /// Average payment delay in days
    #[arg(long)]
    pub delay_days: Option<u32>,

    /// Payment coverage ratio (paid / minimum due)
    #[arg(long)]
    pub coverage: Option<Decimal>,

    /// Days since the last payment
    #[arg(long)]
    pub days_since_payment: Option<u32>,

    /// Raw trend string
    #[arg(long)]
    pub trend: Option<String>,
}

pub fn run_recommend(args: RecommendArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let profile: CustomerRiskProfile = if args.score.is_some() {
        profile_from_flags(&args)?
    } else if let Some(profile) = input::read_optional(args.input.as_deref())? {
        profile
    } else {
        profile_from_flags(&args)?
    };

    let result = evaluate_profile(&profile);
    Ok(serde_json::to_value(result)?)
}

fn profile_from_flags(args: &RecommendArgs) -> Result<CustomerRiskProfile, Box<dyn std::error::Error>> {
    Ok(CustomerRiskProfile {
        risk_score: args
            .score
            .ok_or("--score is required (or provide --input)")?,
        utilization_rate: args.utilization.unwrap_or(Decimal::ZERO),
        average_payment_delay_days: args.delay_days.unwrap_or(0),
        payment_coverage_ratio: args.coverage.unwrap_or(Decimal::ONE),
        days_since_last_payment: args.days_since_payment.unwrap_or(0),
        trend_raw: args.trend.clone().unwrap_or_else(|| "stable".to_string()),
    })
}
