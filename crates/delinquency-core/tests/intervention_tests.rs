use delinquency_core::interventions::{
    evaluate_profile, partition_by_route, recommend_interventions, recommendations_for_bucket,
    ExecutionRoute, InterventionType, Priority,
};
use delinquency_core::risk::{CustomerRiskProfile, RiskBucket, TrendClassification};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn profile(score: Decimal, trend: &str) -> CustomerRiskProfile {
    CustomerRiskProfile {
        risk_score: score,
        utilization_rate: dec!(0.58),
        average_payment_delay_days: 7,
        payment_coverage_ratio: dec!(0.55),
        days_since_last_payment: 4,
        trend_raw: trend.into(),
    }
}

// ===========================================================================
// Policy table
// ===========================================================================

#[test]
fn test_high_risk_customer() {
    let recs = recommend_interventions(&profile(dec!(0.78), "worsening"));
    assert_eq!(recs.len(), 3);
    assert_eq!(recs[0].intervention_type, InterventionType::ProactiveOutreach);
    assert!(!recs[0].requires_approval);
    assert_eq!(recs[1].intervention_type, InterventionType::PaymentHoliday);
    assert!(recs[1].requires_approval);
    assert_eq!(recs[2].intervention_type, InterventionType::Restructure);
    assert!(recs[2].requires_approval);
    assert_eq!(
        recs[0].expected_impact,
        "45% reduction in default probability within 30 days"
    );
}

#[test]
fn test_medium_risk_customer() {
    let recs = recommend_interventions(&profile(dec!(0.41), "improving"));
    assert_eq!(recs.len(), 2);
    assert!(recs.iter().all(|r| !r.requires_approval));
    assert_eq!(recs[0].intervention_type, InterventionType::Reminder);
    assert_eq!(recs[0].priority, Priority::Medium);
    assert_eq!(recs[1].intervention_type, InterventionType::CreditCounseling);
    assert_eq!(recs[1].priority, Priority::Low);
}

#[test]
fn test_low_risk_customer() {
    let recs = recommend_interventions(&profile(dec!(0.18), "stable"));
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].intervention_type, InterventionType::Reminder);
    assert_eq!(recs[0].priority, Priority::Low);
    assert_eq!(
        recs[0].description,
        "Standard automated payment reminder via preferred channel."
    );
}

#[test]
fn test_behavioural_attributes_do_not_change_recommendations() {
    let mut a = profile(dec!(0.55), "worsening");
    let mut b = profile(dec!(0.55), "improving");
    a.utilization_rate = dec!(1.2);
    b.average_payment_delay_days = 0;
    assert_eq!(recommend_interventions(&a), recommend_interventions(&b));
}

#[test]
fn test_priorities_never_increase_down_the_list() {
    for bucket in RiskBucket::all() {
        let recs = recommendations_for_bucket(bucket);
        for pair in recs.windows(2) {
            assert!(pair[0].priority >= pair[1].priority, "{bucket}: {pair:?}");
        }
    }
}

proptest! {
    #[test]
    fn prop_recommendations_deterministic_and_sized(n in -5_000i64..15_000i64) {
        let p = profile(Decimal::new(n, 4), "stable");
        let first = recommend_interventions(&p);
        let second = recommend_interventions(&p);
        prop_assert_eq!(&first, &second);
        prop_assert!(!first.is_empty() && first.len() <= 3);
        prop_assert_eq!(first, recommendations_for_bucket(p.bucket()));
    }
}

// ===========================================================================
// Approval routing
// ===========================================================================

#[test]
fn test_approval_flag_is_the_route() {
    for bucket in RiskBucket::all() {
        for rec in recommendations_for_bucket(bucket) {
            let expected = if rec.requires_approval {
                ExecutionRoute::HumanApproval
            } else {
                ExecutionRoute::AutoExecute
            };
            assert_eq!(rec.execution_route(), expected);
        }
    }
}

#[test]
fn test_only_high_bucket_has_gated_actions() {
    let gated: Vec<usize> = RiskBucket::all()
        .iter()
        .map(|&b| partition_by_route(&recommendations_for_bucket(b)).human_approval.len())
        .collect();
    assert_eq!(gated, vec![0, 0, 2]);
}

// ===========================================================================
// Full evaluation
// ===========================================================================

#[test]
fn test_evaluate_profile_envelope() {
    let out = evaluate_profile(&profile(dec!(0.62), "stable"));
    assert_eq!(out.result.risk_bucket, RiskBucket::Medium);
    assert_eq!(out.result.trend, TrendClassification::Stable);
    assert_eq!(out.result.recommendations.len(), 2);
    assert_eq!(out.result.approval_required_count, 0);
    assert!(!out.methodology.is_empty());
    assert_eq!(out.assumptions["unknown_trend"], "stable");
}

#[test]
fn test_evaluate_profile_json_shape() {
    let out = evaluate_profile(&profile(dec!(0.85), "worsening"));
    let v = serde_json::to_value(&out).unwrap();
    assert_eq!(v["result"]["risk_bucket"], "High");
    assert_eq!(v["result"]["trend"], "worsening");
    assert_eq!(v["result"]["recommendations"][0]["type"], "proactive_outreach");
    assert_eq!(v["result"]["routing"]["human_approval"][0]["type"], "payment_holiday");
}

#[test]
fn test_evaluate_result_is_deterministic() {
    let p = profile(dec!(0.71), "bogus");
    let a = evaluate_profile(&p);
    let b = evaluate_profile(&p);
    assert_eq!(a.result, b.result);
    assert_eq!(a.warnings, b.warnings);
}
