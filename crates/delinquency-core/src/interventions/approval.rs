//! Approval routing.
//!
//! `requires_approval` is authoritative: an approval-gated recommendation is
//! routed to a human workflow and never auto-executed.

use serde::{Deserialize, Serialize};

use super::policy::InterventionRecommendation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionRoute {
    AutoExecute,
    HumanApproval,
}

impl InterventionRecommendation {
    pub fn execution_route(&self) -> ExecutionRoute {
        if self.requires_approval {
            ExecutionRoute::HumanApproval
        } else {
            ExecutionRoute::AutoExecute
        }
    }
}

/// Recommendations split by route, each half in its original order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutedInterventions {
    pub auto_execute: Vec<InterventionRecommendation>,
    pub human_approval: Vec<InterventionRecommendation>,
}

pub fn partition_by_route(recommendations: &[InterventionRecommendation]) -> RoutedInterventions {
    let (human_approval, auto_execute) = recommendations
        .iter()
        .cloned()
        .partition(|r| r.execution_route() == ExecutionRoute::HumanApproval);
    RoutedInterventions {
        auto_execute,
        human_approval,
    }
}
