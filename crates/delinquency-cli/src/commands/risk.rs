use clap::Args;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};

use delinquency_core::risk::{classify_risk_bucket, normalize_trend, TrendClassification};

use crate::input;

/// Arguments for risk bucketing
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct BucketArgs {
    /// Path to JSON input file (read only when --score is not given)
    #[arg(long)]
    pub input: Option<String>,

    /// Risk score, nominally in [0, 1]
    #[arg(long)]
    pub score: Option<Decimal>,
}

/// Arguments for trend normalisation
#[derive(Args)]
pub struct TrendArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,

    /// Raw trend string as received from upstream
    #[arg(long)]
    pub raw: Option<String>,
}

#[derive(Deserialize)]
struct BucketInput {
    risk_score: Decimal,
}

#[derive(Deserialize)]
struct TrendInput {
    #[serde(default)]
    trend: Option<String>,
}

pub fn run_bucket(args: BucketArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let risk_score = match args.score {
        Some(score) => score,
        None => {
            let parsed: BucketInput = input::read_optional(args.input.as_deref())?
                .ok_or("--score is required (or provide --input)")?;
            parsed.risk_score
        }
    };

    let bucket = classify_risk_bucket(risk_score);
    Ok(json!({
        "risk_score": risk_score,
        "risk_bucket": bucket,
        "label": bucket.badge_label(),
        "at_risk": bucket.is_at_risk(),
    }))
}

pub fn run_trend(args: TrendArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let raw = match args.raw {
        Some(raw) => Some(raw),
        None => {
            let parsed: TrendInput = input::read_optional(args.input.as_deref())?
                .ok_or("--raw is required (or provide --input)")?;
            parsed.trend
        }
    };

    let raw_str = raw.as_deref().unwrap_or_default();
    Ok(json!({
        "raw": raw,
        "trend": normalize_trend(raw_str),
        "recognized": TrendClassification::recognize(raw_str).is_some(),
    }))
}
