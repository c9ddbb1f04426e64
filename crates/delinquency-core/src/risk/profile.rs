use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::bucket::{classify_risk_bucket, RiskBucket};
use super::trend::{normalize_trend, TrendClassification};
use crate::types::{Rate, Score};

/// Per-evaluation customer input. Camel-case aliases accept the data
/// provider's field names directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRiskProfile {
    #[serde(alias = "riskScore")]
    pub risk_score: Score,
    /// Balance / limit. Above 1.0 when the account is over limit.
    #[serde(alias = "utilizationRate", default)]
    pub utilization_rate: Rate,
    #[serde(alias = "averagePaymentDelay", alias = "averagePaymentDelayDays", default)]
    pub average_payment_delay_days: u32,
    /// Amount paid / minimum due.
    #[serde(alias = "paymentCoverageRatio", default)]
    pub payment_coverage_ratio: Rate,
    #[serde(alias = "daysSinceLastPayment", default)]
    pub days_since_last_payment: u32,
    /// Unvalidated upstream trend string; see [`CustomerRiskProfile::trend`].
    #[serde(
        alias = "trendRaw",
        alias = "trend",
        default,
        deserialize_with = "lenient_string"
    )]
    pub trend_raw: String,
}

/// Null or non-string trend values become an empty string, which normalises
/// to `Stable`.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        _ => Ok(String::new()),
    }
}

impl CustomerRiskProfile {
    /// Profile carrying only a score, with neutral behavioural attributes.
    pub fn from_score(risk_score: Score) -> Self {
        CustomerRiskProfile {
            risk_score,
            utilization_rate: Decimal::ZERO,
            average_payment_delay_days: 0,
            payment_coverage_ratio: Decimal::ZERO,
            days_since_last_payment: 0,
            trend_raw: TrendClassification::Stable.as_str().to_string(),
        }
    }

    /// Bucket recomputed from the score on every call.
    pub fn bucket(&self) -> RiskBucket {
        classify_risk_bucket(self.risk_score)
    }

    pub fn trend(&self) -> TrendClassification {
        normalize_trend(&self.trend_raw)
    }

    pub fn is_over_limit(&self) -> bool {
        self.utilization_rate > Decimal::ONE
    }
}
