//! Risk classification primitives: score bucketing, trend normalisation and
//! the customer risk profile both are derived from.

pub mod bucket;
pub mod profile;
pub mod trend;

pub use bucket::{classify_risk_bucket, RiskBucket, HIGH_RISK_THRESHOLD, MEDIUM_RISK_THRESHOLD};
pub use profile::CustomerRiskProfile;
pub use trend::{normalize_trend, normalize_trend_opt, TrendClassification};
