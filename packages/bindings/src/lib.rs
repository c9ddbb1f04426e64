//! Node bindings for the dashboard. Every function takes and returns JSON
//! strings so the TypeScript side deals only in its own camelCase shapes.

use std::str::FromStr;

use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;

use delinquency_core::interventions::{self, RoutedInterventions};
use delinquency_core::portfolio::{self, FilterQuery, InterventionOutcome, PortfolioInput};
use delinquency_core::prediction::{self, AccountFeatures, PredictionResponse};
use delinquency_core::risk::{self, CustomerRiskProfile, RiskBucket};

fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_json<T: DeserializeOwned>(input_json: &str) -> NapiResult<T> {
    serde_json::from_str(input_json).map_err(to_napi_error)
}

fn to_json(output: &impl Serialize) -> NapiResult<String> {
    serde_json::to_string(output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Risk
// ---------------------------------------------------------------------------

/// Score is passed as a decimal string ("0.78") to avoid float rounding at
/// the threshold boundaries.
#[napi]
pub fn classify_risk_bucket(risk_score: String) -> NapiResult<String> {
    let score = Decimal::from_str(risk_score.trim()).map_err(to_napi_error)?;
    Ok(risk::classify_risk_bucket(score).as_str().to_string())
}

#[napi]
pub fn normalize_trend(raw: Option<String>) -> String {
    risk::normalize_trend_opt(raw.as_deref()).as_str().to_string()
}

// ---------------------------------------------------------------------------
// Interventions
// ---------------------------------------------------------------------------

#[napi]
pub fn recommend_interventions(profile_json: String) -> NapiResult<String> {
    let profile: CustomerRiskProfile = parse_json(&profile_json)?;
    to_json(&interventions::recommend_interventions(&profile))
}

/// Recommendations for a bucket name; unknown names are rejected rather than
/// defaulted.
#[napi]
pub fn recommendations_for_bucket(bucket: String) -> NapiResult<String> {
    let bucket = RiskBucket::parse(&bucket)
        .ok_or_else(|| to_napi_error(format!("unknown risk bucket '{bucket}'")))?;
    to_json(&interventions::recommendations_for_bucket(bucket))
}

#[napi]
pub fn route_interventions(recommendations_json: String) -> NapiResult<String> {
    let recs: Vec<interventions::InterventionRecommendation> = parse_json(&recommendations_json)?;
    let routed: RoutedInterventions = interventions::partition_by_route(&recs);
    to_json(&routed)
}

#[napi]
pub fn evaluate_profile(profile_json: String) -> NapiResult<String> {
    let profile: CustomerRiskProfile = parse_json(&profile_json)?;
    to_json(&interventions::evaluate_profile(&profile))
}

// ---------------------------------------------------------------------------
// Portfolio
// ---------------------------------------------------------------------------

#[napi]
pub fn filter_and_sort(query_json: String) -> NapiResult<String> {
    let query: FilterQuery = parse_json(&query_json)?;
    to_json(&portfolio::apply_query(&query))
}

#[napi]
pub fn portfolio_metrics(input_json: String) -> NapiResult<String> {
    let input: PortfolioInput = parse_json(&input_json)?;
    let output = portfolio::calculate_portfolio_metrics(&input).map_err(to_napi_error)?;
    to_json(&output)
}

#[napi]
pub fn intervention_success_rates(outcomes_json: String) -> NapiResult<String> {
    let outcomes: Vec<InterventionOutcome> = parse_json(&outcomes_json)?;
    let rates = portfolio::intervention_success_rates(&outcomes).map_err(to_napi_error)?;
    to_json(&rates)
}

// ---------------------------------------------------------------------------
// Prediction API contract
// ---------------------------------------------------------------------------

#[napi]
pub fn engineer_features(account_json: String) -> NapiResult<String> {
    let account: AccountFeatures = parse_json(&account_json)?;
    let features = prediction::engineer_features(&account).map_err(to_napi_error)?;
    to_json(&features)
}

#[napi]
pub fn reconcile_prediction(response_json: String) -> NapiResult<String> {
    let response: PredictionResponse = parse_json(&response_json)?;
    response.validate().map_err(to_napi_error)?;
    to_json(&prediction::reconcile(&response))
}
