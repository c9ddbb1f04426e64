//! Client-side half of the Prediction API contract: the raw account feature
//! vector, the engineered features the model consumes, and reconciliation of
//! the API's tagged risk level against the engine bucket.

pub mod contract;
pub mod enrich;
pub mod features;

pub use contract::{reconcile, BucketReconciliation, PredictionResponse, RiskLevelTag};
pub use enrich::{behavior_flags, profile_from_account};
pub use features::{engineer_features, AccountFeatures, EngineeredFeatures, FEATURE_ORDER};
