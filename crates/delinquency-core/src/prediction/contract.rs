use serde::{Deserialize, Serialize};

use crate::risk::{classify_risk_bucket, RiskBucket};
use crate::types::{is_unit_interval, Score};
use crate::{DelinquencyError, DelinquencyResult};

/// Response body of the Prediction API's single-account endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub risk_score: Score,
    /// Substring-tagged level, e.g. "HIGH RISK".
    pub risk_level: String,
    pub recommended_action: String,
    pub reason: String,
}

impl PredictionResponse {
    pub fn validate(&self) -> DelinquencyResult<()> {
        if !is_unit_interval(self.risk_score) {
            return Err(DelinquencyError::InvalidInput {
                field: "risk_score".into(),
                reason: format!("Score {} is outside [0, 1].", self.risk_score),
            });
        }
        Ok(())
    }
}

/// Parser for the API's free-text `risk_level` tag.
pub struct RiskLevelTag;

impl RiskLevelTag {
    /// Looks for `HIGH`, `MEDIUM` or `LOW` as a substring, in that order.
    pub fn parse(risk_level: &str) -> Option<RiskBucket> {
        if risk_level.contains("HIGH") {
            Some(RiskBucket::High)
        } else if risk_level.contains("MEDIUM") {
            Some(RiskBucket::Medium)
        } else if risk_level.contains("LOW") {
            Some(RiskBucket::Low)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketReconciliation {
    pub risk_score: Score,
    /// Authoritative bucket from the engine thresholds.
    pub engine_bucket: RiskBucket,
    pub api_bucket: Option<RiskBucket>,
    pub agrees: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Compare the API's tagged level with the engine bucket for the same score.
pub fn reconcile(response: &PredictionResponse) -> BucketReconciliation {
    let engine_bucket = classify_risk_bucket(response.risk_score);
    let api_bucket = RiskLevelTag::parse(&response.risk_level);

    let (agrees, note) = match api_bucket {
        Some(b) if b == engine_bucket => (true, None),
        Some(b) => (
            false,
            Some(format!(
                "API tagged {} but score {} is {} under engine thresholds; showing {}.",
                b, response.risk_score, engine_bucket, engine_bucket
            )),
        ),
        None => (
            false,
            Some(format!(
                "Unrecognised risk level '{}'; showing engine bucket {}.",
                response.risk_level, engine_bucket
            )),
        ),
    };

    BucketReconciliation {
        risk_score: response.risk_score,
        engine_bucket,
        api_bucket,
        agrees,
        note,
    }
}
