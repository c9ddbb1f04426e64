//! Portfolio-level aggregation: bucket distribution, at-risk counts and the
//! headline intervention/savings estimates shown on the dashboard.
//!
//! Buckets are always recomputed from each customer's score with the engine
//! thresholds, never read from a stored label.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::customer::CustomerRecord;
use crate::interventions::recommend_interventions;
use crate::risk::RiskBucket;
use crate::types::*;
use crate::{DelinquencyError, DelinquencyResult};

// ---------------------------------------------------------------------------
// Input / Output
// ---------------------------------------------------------------------------

/// Heuristic conversion rates applied to the at-risk population.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioAssumptions {
    /// Share of at-risk accounts with an active intervention.
    #[serde(default = "default_intervention_rate")]
    pub intervention_rate: Rate,
    /// Share of at-risk accounts whose default was prevented in 30 days.
    #[serde(default = "default_prevented_default_rate")]
    pub prevented_default_rate: Rate,
    /// Estimated saving per at-risk account.
    #[serde(default = "default_savings_per_account")]
    pub savings_per_account: Money,
}

fn default_intervention_rate() -> Rate {
    dec!(0.35)
}

fn default_prevented_default_rate() -> Rate {
    dec!(0.17)
}

fn default_savings_per_account() -> Money {
    dec!(1500)
}

impl Default for PortfolioAssumptions {
    fn default() -> Self {
        PortfolioAssumptions {
            intervention_rate: default_intervention_rate(),
            prevented_default_rate: default_prevented_default_rate(),
            savings_per_account: default_savings_per_account(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioInput {
    pub customers: Vec<CustomerRecord>,
    #[serde(default)]
    pub assumptions: PortfolioAssumptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketShare {
    pub bucket: RiskBucket,
    pub count: u64,
    /// Whole percent of the portfolio, rounded half-to-even.
    pub percentage: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioMetrics {
    pub total_accounts: u64,
    pub risk_distribution: Vec<BucketShare>,
    pub at_risk_accounts: u64,
    pub average_risk_score: Score,
    pub interventions_active: u64,
    pub prevented_defaults_30d: u64,
    pub estimated_savings: Money,
    /// Recommendations across the portfolio that must go to a human approver.
    pub approval_gated_recommendations: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterventionOutcome {
    pub label: String,
    pub success: u64,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterventionSuccessRate {
    pub label: String,
    pub success: u64,
    pub total: u64,
    pub success_rate: Rate,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn calculate_portfolio_metrics(
    input: &PortfolioInput,
) -> DelinquencyResult<ComputationOutput<PortfolioMetrics>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_assumptions(&input.assumptions)?;

    let total = input.customers.len() as u64;
    if total == 0 {
        warnings.push("Portfolio is empty; all metrics are zero.".into());
    }

    let mut counts = [0u64; 3];
    let mut score_sum = Decimal::ZERO;
    let mut approval_gated = 0u64;

    for customer in &input.customers {
        let bucket = customer.bucket();
        counts[bucket_index(bucket)] += 1;
        score_sum = score_sum
            .checked_add(customer.profile.risk_score)
            .ok_or_else(|| DelinquencyError::InvalidInput {
                field: "risk_score".into(),
                reason: format!("Risk score total overflows at customer {}.", customer.id),
            })?;
        approval_gated += recommend_interventions(&customer.profile)
            .iter()
            .filter(|r| r.requires_approval)
            .count() as u64;

        if !is_unit_interval(customer.profile.risk_score) {
            warnings.push(format!(
                "Customer {} has risk score {} outside [0, 1].",
                customer.id, customer.profile.risk_score
            ));
        }
    }

    let risk_distribution: Vec<BucketShare> = RiskBucket::all()
        .iter()
        .map(|&bucket| {
            let count = counts[bucket_index(bucket)];
            BucketShare {
                bucket,
                count,
                percentage: percentage_of(count, total),
            }
        })
        .collect();

    let at_risk_accounts = counts[bucket_index(RiskBucket::Medium)]
        + counts[bucket_index(RiskBucket::High)];
    let at_risk_d = Decimal::from(at_risk_accounts);

    let average_risk_score = if total == 0 {
        Decimal::ZERO
    } else {
        (score_sum / Decimal::from(total)).round_dp(2)
    };

    let estimated_savings = at_risk_d
        .checked_mul(input.assumptions.savings_per_account)
        .ok_or_else(|| DelinquencyError::InvalidInput {
            field: "savings_per_account".into(),
            reason: "Estimated savings overflow the decimal range.".into(),
        })?;

    let output = PortfolioMetrics {
        total_accounts: total,
        risk_distribution,
        at_risk_accounts,
        average_risk_score,
        interventions_active: floor_count(at_risk_d * input.assumptions.intervention_rate),
        prevented_defaults_30d: floor_count(at_risk_d * input.assumptions.prevented_default_rate),
        estimated_savings,
        approval_gated_recommendations: approval_gated,
    };

    Ok(with_metadata(
        "Portfolio aggregation over engine risk buckets",
        &input.assumptions,
        warnings,
        start,
        output,
    ))
}

/// Success rate per intervention label, in input order.
pub fn intervention_success_rates(
    outcomes: &[InterventionOutcome],
) -> DelinquencyResult<Vec<InterventionSuccessRate>> {
    if outcomes.is_empty() {
        return Err(DelinquencyError::InsufficientData(
            "At least one intervention outcome is required.".into(),
        ));
    }

    outcomes
        .iter()
        .map(|o| {
            if o.total == 0 {
                return Err(DelinquencyError::DivisionByZero {
                    context: format!("success rate for '{}'", o.label),
                });
            }
            if o.success > o.total {
                return Err(DelinquencyError::InvalidInput {
                    field: "success".into(),
                    reason: format!(
                        "'{}' reports {} successes out of {} attempts.",
                        o.label, o.success, o.total
                    ),
                });
            }
            Ok(InterventionSuccessRate {
                label: o.label.clone(),
                success: o.success,
                total: o.total,
                success_rate: Decimal::from(o.success) / Decimal::from(o.total),
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn validate_assumptions(a: &PortfolioAssumptions) -> DelinquencyResult<()> {
    for (field, rate) in [
        ("intervention_rate", a.intervention_rate),
        ("prevented_default_rate", a.prevented_default_rate),
    ] {
        if !is_unit_interval(rate) {
            return Err(DelinquencyError::InvalidInput {
                field: field.into(),
                reason: "Rate must be between 0 and 1.".into(),
            });
        }
    }
    if a.savings_per_account < Decimal::ZERO {
        return Err(DelinquencyError::InvalidInput {
            field: "savings_per_account".into(),
            reason: "Savings per account cannot be negative.".into(),
        });
    }
    Ok(())
}

fn bucket_index(bucket: RiskBucket) -> usize {
    match bucket {
        RiskBucket::Low => 0,
        RiskBucket::Medium => 1,
        RiskBucket::High => 2,
    }
}

fn percentage_of(count: u64, total: u64) -> Decimal {
    if total == 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(count) * dec!(100) / Decimal::from(total)).round()
}

fn floor_count(value: Decimal) -> u64 {
    value.floor().to_u64().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::CustomerRiskProfile;

    fn customer(id: &str, score: Decimal) -> CustomerRecord {
        CustomerRecord {
            id: id.into(),
            name: format!("Customer {id}"),
            account_number: format!("ACC-{id}"),
            profile: CustomerRiskProfile::from_score(score),
            credit_limit: None,
            current_balance: None,
            last_payment_date: None,
            behavior_flags: vec![],
        }
    }

    fn eight_customers() -> PortfolioInput {
        let scores = [
            dec!(0.78),
            dec!(0.62),
            dec!(0.23),
            dec!(0.71),
            dec!(0.41),
            dec!(0.18),
            dec!(0.55),
            dec!(0.85),
        ];
        PortfolioInput {
            customers: scores
                .iter()
                .enumerate()
                .map(|(i, s)| customer(&format!("C00{}", i + 1), *s))
                .collect(),
            assumptions: PortfolioAssumptions::default(),
        }
    }

    #[test]
    fn test_distribution_and_at_risk() {
        let out = calculate_portfolio_metrics(&eight_customers()).unwrap();
        let m = &out.result;
        assert_eq!(m.total_accounts, 8);
        let counts: Vec<u64> = m.risk_distribution.iter().map(|s| s.count).collect();
        // Low: 0.23, 0.18. Medium: 0.62, 0.41, 0.55. High: 0.78, 0.71, 0.85.
        assert_eq!(counts, vec![2, 3, 3]);
        assert_eq!(m.at_risk_accounts, 6);
        // 2/8 = 25%, 3/8 = 37.5% -> 38 (half to even)
        assert_eq!(m.risk_distribution[0].percentage, dec!(25));
        assert_eq!(m.risk_distribution[1].percentage, dec!(38));
    }

    #[test]
    fn test_headline_estimates() {
        let out = calculate_portfolio_metrics(&eight_customers()).unwrap();
        let m = &out.result;
        // floor(6 * 0.35) = 2, floor(6 * 0.17) = 1
        assert_eq!(m.interventions_active, 2);
        assert_eq!(m.prevented_defaults_30d, 1);
        assert_eq!(m.estimated_savings, dec!(9000));
        // Three High customers, two gated actions each.
        assert_eq!(m.approval_gated_recommendations, 6);
        // (0.78+0.62+0.23+0.71+0.41+0.18+0.55+0.85) / 8 = 4.33 / 8 = 0.54125
        assert_eq!(m.average_risk_score, dec!(0.54));
    }

    #[test]
    fn test_empty_portfolio_is_zeroed() {
        let input = PortfolioInput {
            customers: vec![],
            assumptions: PortfolioAssumptions::default(),
        };
        let out = calculate_portfolio_metrics(&input).unwrap();
        assert_eq!(out.result.total_accounts, 0);
        assert_eq!(out.result.average_risk_score, Decimal::ZERO);
        assert!(out.result.risk_distribution.iter().all(|s| s.percentage.is_zero()));
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_invalid_assumption_rejected() {
        let mut input = eight_customers();
        input.assumptions.intervention_rate = dec!(1.5);
        assert!(matches!(
            calculate_portfolio_metrics(&input),
            Err(DelinquencyError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_success_rates() {
        let rates = intervention_success_rates(&[
            InterventionOutcome { label: "Reminders".into(), success: 142, total: 180 },
            InterventionOutcome { label: "Restructuring".into(), success: 28, total: 35 },
        ])
        .unwrap();
        assert_eq!(rates[1].success_rate, dec!(0.8));
        assert!(rates[0].success_rate > dec!(0.78) && rates[0].success_rate < dec!(0.79));
    }

    #[test]
    fn test_success_rate_errors() {
        assert!(matches!(
            intervention_success_rates(&[]),
            Err(DelinquencyError::InsufficientData(_))
        ));
        assert!(matches!(
            intervention_success_rates(&[InterventionOutcome {
                label: "x".into(), success: 0, total: 0
            }]),
            Err(DelinquencyError::DivisionByZero { .. })
        ));
        assert!(matches!(
            intervention_success_rates(&[InterventionOutcome {
                label: "x".into(), success: 5, total: 4
            }]),
            Err(DelinquencyError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_savings_overflow_is_an_error() {
        let input = PortfolioInput {
            customers: vec![customer("C001", dec!(0.78)), customer("C002", dec!(0.85))],
            assumptions: PortfolioAssumptions {
                savings_per_account: Decimal::MAX,
                ..PortfolioAssumptions::default()
            },
        };
        assert!(matches!(
            calculate_portfolio_metrics(&input),
            Err(DelinquencyError::InvalidInput { field, .. }) if field == "savings_per_account"
        ));
    }

    #[test]
    fn test_score_total_overflow_is_an_error() {
        let input = PortfolioInput {
            customers: vec![customer("C001", Decimal::MAX), customer("C002", Decimal::MAX)],
            assumptions: PortfolioAssumptions::default(),
        };
        assert!(matches!(
            calculate_portfolio_metrics(&input),
            Err(DelinquencyError::InvalidInput { field, .. }) if field == "risk_score"
        ));
    }

    #[test]
    fn test_single_out_of_range_score_only_warns() {
        let input = PortfolioInput {
            customers: vec![customer("C001", Decimal::MAX)],
            assumptions: PortfolioAssumptions::default(),
        };
        let out = calculate_portfolio_metrics(&input).unwrap();
        assert_eq!(out.result.total_accounts, 1);
        assert!(out.warnings.iter().any(|w| w.contains("outside [0, 1]")));
    }
}
