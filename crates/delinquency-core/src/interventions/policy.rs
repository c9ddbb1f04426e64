//! Static intervention policy table.
//!
//! Recommendations are canned per risk bucket, in presentation order with the
//! most urgent action first. Every surface that shows interventions reads this
//! one table.

use serde::{Deserialize, Serialize};

use crate::risk::{CustomerRiskProfile, RiskBucket};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterventionType {
    Reminder,
    PaymentHoliday,
    ProactiveOutreach,
    CreditCounseling,
    Restructure,
}

impl InterventionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterventionType::Reminder => "reminder",
            InterventionType::PaymentHoliday => "payment_holiday",
            InterventionType::ProactiveOutreach => "proactive_outreach",
            InterventionType::CreditCounseling => "credit_counseling",
            InterventionType::Restructure => "restructure",
        }
    }

    /// Title-case display name, e.g. "Proactive Outreach".
    pub fn label(&self) -> &'static str {
        match self {
            InterventionType::Reminder => "Reminder",
            InterventionType::PaymentHoliday => "Payment Holiday",
            InterventionType::ProactiveOutreach => "Proactive Outreach",
            InterventionType::CreditCounseling => "Credit Counseling",
            InterventionType::Restructure => "Restructure",
        }
    }
}

impl std::fmt::Display for InterventionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Low => write!(f, "LOW"),
            Priority::Medium => write!(f, "MEDIUM"),
            Priority::High => write!(f, "HIGH"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterventionRecommendation {
    #[serde(rename = "type")]
    pub intervention_type: InterventionType,
    pub priority: Priority,
    pub description: String,
    /// Static policy text, not computed from live data.
    pub expected_impact: String,
    /// Approval-gated actions must never be auto-executed.
    pub requires_approval: bool,
}

// ---------------------------------------------------------------------------
// Policy table
// ---------------------------------------------------------------------------

struct PolicyEntry {
    intervention_type: InterventionType,
    priority: Priority,
    description: &'static str,
    expected_impact: &'static str,
    requires_approval: bool,
}

impl PolicyEntry {
    fn to_recommendation(&self) -> InterventionRecommendation {
        InterventionRecommendation {
            intervention_type: self.intervention_type,
            priority: self.priority,
            description: self.description.to_string(),
            expected_impact: self.expected_impact.to_string(),
            requires_approval: self.requires_approval,
        }
    }
}

static HIGH_RISK_POLICY: [PolicyEntry; 3] = [
    PolicyEntry {
        intervention_type: InterventionType::ProactiveOutreach,
        priority: Priority::High,
        description: "Immediate phone call from customer success team to understand financial situation and offer assistance.",
        expected_impact: "45% reduction in default probability within 30 days",
        requires_approval: false,
    },
    PolicyEntry {
        intervention_type: InterventionType::PaymentHoliday,
        priority: Priority::High,
        description: "Offer 30-day payment holiday with interest freeze to provide immediate relief.",
        expected_impact: "60% reduction in near-term delinquency risk",
        requires_approval: true,
    },
    PolicyEntry {
        intervention_type: InterventionType::Restructure,
        priority: Priority::Medium,
        description: "Propose debt restructuring with extended payment terms and reduced monthly obligations.",
        expected_impact: "70% improvement in long-term payment sustainability",
        requires_approval: true,
    },
];

static MEDIUM_RISK_POLICY: [PolicyEntry; 2] = [
    PolicyEntry {
        intervention_type: InterventionType::Reminder,
        priority: Priority::Medium,
        description: "Send personalized SMS/email reminder 3 days before payment due date with balance summary.",
        expected_impact: "25% reduction in payment delays",
        requires_approval: false,
    },
    PolicyEntry {
        intervention_type: InterventionType::CreditCounseling,
        priority: Priority::Low,
        description: "Offer free financial counseling session to help with budgeting and payment planning.",
        expected_impact: "35% improvement in payment consistency",
        requires_approval: false,
    },
];

static LOW_RISK_POLICY: [PolicyEntry; 1] = [PolicyEntry {
    intervention_type: InterventionType::Reminder,
    priority: Priority::Low,
    description: "Standard automated payment reminder via preferred channel.",
    expected_impact: "15% reduction in accidental late payments",
    requires_approval: false,
}];

fn policy_table(bucket: RiskBucket) -> &'static [PolicyEntry] {
    match bucket {
        RiskBucket::High => &HIGH_RISK_POLICY,
        RiskBucket::Medium => &MEDIUM_RISK_POLICY,
        RiskBucket::Low => &LOW_RISK_POLICY,
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Ordered recommendations for a bucket. Never empty.
pub fn recommendations_for_bucket(bucket: RiskBucket) -> Vec<InterventionRecommendation> {
    policy_table(bucket)
        .iter()
        .map(PolicyEntry::to_recommendation)
        .collect()
}

/// Ordered recommendations for a profile, keyed on the bucket recomputed from
/// its score. Total and deterministic; returns between one and three entries.
pub fn recommend_interventions(profile: &CustomerRiskProfile) -> Vec<InterventionRecommendation> {
    recommendations_for_bucket(profile.bucket())
}
