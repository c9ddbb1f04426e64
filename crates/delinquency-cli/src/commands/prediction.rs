use clap::Args;
use serde_json::{Map, Value};
use tracing::warn;

use delinquency_core::interventions::recommendations_for_bucket;
use delinquency_core::prediction::{
    behavior_flags, engineer_features, reconcile, AccountFeatures, PredictionResponse,
    FEATURE_ORDER,
};

use crate::input;

/// Arguments for feature engineering
#[derive(Args)]
pub struct FeaturesArgs {
    /// Account JSON (or a JSON array / CSV file with --batch)
    #[arg(long)]
    pub input: Option<String>,

    /// Treat the input as a batch of accounts
    #[arg(long)]
    pub batch: bool,
}

/// Arguments for Prediction API reconciliation
#[derive(Args)]
pub struct ReconcileArgs {
    /// Path to a saved Prediction API response
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_features(args: FeaturesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    if !args.batch {
        let account: AccountFeatures = input::read_required(args.input.as_deref())?;
        return feature_row(&account);
    }

    let accounts: Vec<AccountFeatures> = match args.input.as_deref() {
        Some(p) if input::is_csv(p) => input::csv_in::read_csv(p)?,
        path => input::read_required(path)?,
    };
    let rows = accounts
        .iter()
        .map(feature_row)
        .collect::<Result<Vec<Value>, _>>()?;
    Ok(Value::Array(rows))
}

pub fn run_reconcile(args: ReconcileArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let response: PredictionResponse = input::read_required(args.input.as_deref())?;
    response.validate()?;

    let reconciliation = reconcile(&response);
    if !reconciliation.agrees {
        warn!(
            engine = %reconciliation.engine_bucket,
            api = %response.risk_level,
            "prediction API bucket disagrees with engine"
        );
    }

    let mut value = serde_json::to_value(&reconciliation)?;
    value["recommendations"] =
        serde_json::to_value(recommendations_for_bucket(reconciliation.engine_bucket))?;
    Ok(value)
}

/// Engineered features keyed by model column name, plus derived flags.
fn feature_row(account: &AccountFeatures) -> Result<Value, Box<dyn std::error::Error>> {
    let features = engineer_features(account)?;
    let mut row = Map::new();
    for (name, value) in FEATURE_ORDER.iter().zip(features.ordered()) {
        row.insert((*name).to_string(), serde_json::to_value(value)?);
    }
    row.insert(
        "behavior_flags".to_string(),
        serde_json::to_value(behavior_flags(account))?,
    );
    Ok(Value::Object(row))
}
