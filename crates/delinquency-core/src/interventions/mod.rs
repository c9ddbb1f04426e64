//! Intervention recommendation policy, approval routing and the combined
//! per-customer risk assessment.

pub mod approval;
pub mod assessment;
pub mod policy;

pub use approval::{partition_by_route, ExecutionRoute, RoutedInterventions};
pub use assessment::{evaluate_profile, RiskAssessment};
pub use policy::{
    recommend_interventions, recommendations_for_bucket, InterventionRecommendation,
    InterventionType, Priority,
};
