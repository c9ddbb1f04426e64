use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, warn};

use super::approval::{partition_by_route, RoutedInterventions};
use super::policy::{recommend_interventions, InterventionRecommendation};
use crate::risk::{CustomerRiskProfile, RiskBucket, TrendClassification};
use crate::types::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_score: Score,
    pub risk_bucket: RiskBucket,
    pub trend: TrendClassification,
    pub recommendations: Vec<InterventionRecommendation>,
    pub routing: RoutedInterventions,
    pub approval_required_count: usize,
}

/// Bucket, trend and recommendations for one profile in a single envelope.
///
/// Never fails. Out-of-range scores, unknown trend strings and over-limit
/// utilisation are reported as warnings.
pub fn evaluate_profile(profile: &CustomerRiskProfile) -> ComputationOutput<RiskAssessment> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if !is_unit_interval(profile.risk_score) {
        warn!(risk_score = %profile.risk_score, "risk score outside [0, 1]");
        warnings.push(format!(
            "Risk score {} is outside [0, 1]; bucketed by boundary rule.",
            profile.risk_score
        ));
    }

    if TrendClassification::recognize(&profile.trend_raw).is_none() {
        warn!(trend_raw = %profile.trend_raw, "unrecognised trend normalised to stable");
        warnings.push(format!(
            "Trend '{}' is not a known value; treated as stable.",
            profile.trend_raw
        ));
    }

    if profile.is_over_limit() {
        warnings.push(format!(
            "Utilisation {} exceeds the credit limit.",
            profile.utilization_rate
        ));
    }

    if profile.payment_coverage_ratio < Decimal::ONE && profile.average_payment_delay_days > 0 {
        warnings.push("Payments below minimum due with recurring delays.".into());
    }

    let risk_bucket = profile.bucket();
    let trend = profile.trend();
    let recommendations = recommend_interventions(profile);
    let routing = partition_by_route(&recommendations);
    let approval_required_count = routing.human_approval.len();

    debug!(
        risk_bucket = %risk_bucket,
        trend = %trend,
        recommendations = recommendations.len(),
        approval_required = approval_required_count,
        "evaluated risk profile"
    );

    let assessment = RiskAssessment {
        risk_score: profile.risk_score,
        risk_bucket,
        trend,
        recommendations,
        routing,
        approval_required_count,
    };

    let assumptions = serde_json::json!({
        "high_threshold": crate::risk::HIGH_RISK_THRESHOLD,
        "medium_threshold": crate::risk::MEDIUM_RISK_THRESHOLD,
        "bucket_bounds": "inclusive lower bound",
        "unknown_trend": "stable",
    });

    with_metadata(
        "Static intervention policy keyed by risk bucket",
        &assumptions,
        warnings,
        start,
        assessment,
    )
}
