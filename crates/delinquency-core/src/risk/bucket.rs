//! Coarse three-level risk bucketing.
//!
//! Thresholds are inclusive lower bounds and match the Prediction API's
//! bucket semantics so a score never shows two different buckets on screen.

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::Score;

/// Scores at or above this value are High.
pub const HIGH_RISK_THRESHOLD: Score = dec!(0.70);

/// Scores at or above this value (and below High) are Medium.
pub const MEDIUM_RISK_THRESHOLD: Score = dec!(0.40);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskBucket {
    Low,
    Medium,
    High,
}

impl RiskBucket {
    /// All buckets in ascending severity.
    pub const fn all() -> [RiskBucket; 3] {
        [RiskBucket::Low, RiskBucket::Medium, RiskBucket::High]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskBucket::Low => "Low",
            RiskBucket::Medium => "Medium",
            RiskBucket::High => "High",
        }
    }

    /// Exact match on `"Low"`, `"Medium"` or `"High"`.
    pub fn parse(raw: &str) -> Option<RiskBucket> {
        match raw {
            "Low" => Some(RiskBucket::Low),
            "Medium" => Some(RiskBucket::Medium),
            "High" => Some(RiskBucket::High),
            _ => None,
        }
    }

    /// Medium and High accounts count as "at risk" in portfolio views.
    pub fn is_at_risk(&self) -> bool {
        !matches!(self, RiskBucket::Low)
    }

    /// Badge text, e.g. "High Risk".
    pub fn badge_label(&self) -> String {
        format!("{} Risk", self.as_str())
    }
}

impl std::fmt::Display for RiskBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Map a risk score to its bucket.
///
/// Total over every `Decimal`: negative scores fall into Low and scores above
/// 1 fall into High by the same comparisons. Range validation is the caller's
/// concern.
pub fn classify_risk_bucket(risk_score: Score) -> RiskBucket {
    if risk_score >= HIGH_RISK_THRESHOLD {
        RiskBucket::High
    } else if risk_score >= MEDIUM_RISK_THRESHOLD {
        RiskBucket::Medium
    } else {
        RiskBucket::Low
    }
}
