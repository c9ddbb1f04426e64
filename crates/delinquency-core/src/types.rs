use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Probability-style scores on [0, 1]. Decimal so threshold comparisons are exact.
pub type Score = Decimal;

/// Ratios expressed as decimals (0.90 = 90% utilisation). Never as percentages.
pub type Rate = Decimal;

/// All monetary values.
pub type Money = Decimal;

/// Revision of the static intervention policy table. Bumped whenever a
/// threshold, recommendation or approval flag changes.
pub const POLICY_VERSION: &str = "2026.02";

/// Output envelope shared by every engine operation that reports assumptions
/// or warnings alongside its result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub policy_version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Wrap a result in the standard envelope, stamping elapsed time since `start`.
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    start: Instant,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            policy_version: POLICY_VERSION.to_string(),
            computation_time_us: start.elapsed().as_micros() as u64,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

/// True when `score` lies on the closed unit interval.
pub fn is_unit_interval(score: Score) -> bool {
    score >= Decimal::ZERO && score <= Decimal::ONE
}
