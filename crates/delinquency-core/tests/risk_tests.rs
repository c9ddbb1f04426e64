use delinquency_core::risk::{
    classify_risk_bucket, normalize_trend, normalize_trend_opt, CustomerRiskProfile, RiskBucket,
    TrendClassification,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Risk bucketing
// ===========================================================================

#[test]
fn test_bucket_boundaries() {
    assert_eq!(classify_risk_bucket(dec!(0)), RiskBucket::Low);
    assert_eq!(classify_risk_bucket(dec!(0.39)), RiskBucket::Low);
    assert_eq!(classify_risk_bucket(dec!(0.40)), RiskBucket::Medium);
    assert_eq!(classify_risk_bucket(dec!(0.69)), RiskBucket::Medium);
    assert_eq!(classify_risk_bucket(dec!(0.70)), RiskBucket::High);
    assert_eq!(classify_risk_bucket(dec!(1)), RiskBucket::High);
}

#[test]
fn test_bucket_scale_does_not_matter() {
    // 0.4 and 0.4000 are the same boundary.
    assert_eq!(classify_risk_bucket(dec!(0.4)), RiskBucket::Medium);
    assert_eq!(classify_risk_bucket(dec!(0.4000)), RiskBucket::Medium);
    assert_eq!(classify_risk_bucket(dec!(0.7)), RiskBucket::High);
}

#[test]
fn test_dashboard_sample_scores() {
    let cases = [
        (dec!(0.78), RiskBucket::High),
        (dec!(0.62), RiskBucket::Medium),
        (dec!(0.23), RiskBucket::Low),
        (dec!(0.71), RiskBucket::High),
        (dec!(0.41), RiskBucket::Medium),
        (dec!(0.18), RiskBucket::Low),
        (dec!(0.55), RiskBucket::Medium),
        (dec!(0.85), RiskBucket::High),
    ];
    for (score, bucket) in cases {
        assert_eq!(classify_risk_bucket(score), bucket, "score {score}");
    }
}

// Scores on a 4-dp grid across [lo, hi).
fn score_in(lo: i64, hi: i64) -> impl Strategy<Value = Decimal> {
    (lo..hi).prop_map(|n| Decimal::new(n, 4))
}

proptest! {
    #[test]
    fn prop_low_range(score in score_in(0, 4000)) {
        prop_assert_eq!(classify_risk_bucket(score), RiskBucket::Low);
    }

    #[test]
    fn prop_medium_range(score in score_in(4000, 7000)) {
        prop_assert_eq!(classify_risk_bucket(score), RiskBucket::Medium);
    }

    #[test]
    fn prop_high_range(score in score_in(7000, 10001)) {
        prop_assert_eq!(classify_risk_bucket(score), RiskBucket::High);
    }

    #[test]
    fn prop_total_outside_unit_interval(n in -1_000_000i64..1_000_000i64) {
        let score = Decimal::new(n, 4);
        let bucket = classify_risk_bucket(score);
        if score < Decimal::ZERO {
            prop_assert_eq!(bucket, RiskBucket::Low);
        }
        if score > Decimal::ONE {
            prop_assert_eq!(bucket, RiskBucket::High);
        }
    }

    #[test]
    fn prop_bucket_is_monotone(a in score_in(0, 10001), b in score_in(0, 10001)) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(classify_risk_bucket(lo) <= classify_risk_bucket(hi));
    }
}

// ===========================================================================
// Trend normalisation
// ===========================================================================

#[test]
fn test_trend_literals() {
    assert_eq!(normalize_trend("improving"), TrendClassification::Improving);
    assert_eq!(normalize_trend("stable"), TrendClassification::Stable);
    assert_eq!(normalize_trend("worsening"), TrendClassification::Worsening);
}

#[test]
fn test_trend_fail_safe() {
    assert_eq!(normalize_trend(""), TrendClassification::Stable);
    assert_eq!(normalize_trend("IMPROVING"), TrendClassification::Stable);
    assert_eq!(normalize_trend("unknown"), TrendClassification::Stable);
    assert_eq!(normalize_trend_opt(None), TrendClassification::Stable);
    assert_eq!(
        normalize_trend_opt(Some("worsening")),
        TrendClassification::Worsening
    );
}

#[test]
fn test_backend_trend_vocabulary_degrades_to_stable() {
    // The scoring backend reports "up" / "down" / "stable".
    assert_eq!(normalize_trend("up"), TrendClassification::Stable);
    assert_eq!(normalize_trend("down"), TrendClassification::Stable);
    assert_eq!(normalize_trend("stable"), TrendClassification::Stable);
}

proptest! {
    #[test]
    fn prop_any_string_normalizes(raw in ".*") {
        let t = normalize_trend(&raw);
        let expected = match raw.as_str() {
            "improving" => TrendClassification::Improving,
            "worsening" => TrendClassification::Worsening,
            _ => TrendClassification::Stable,
        };
        prop_assert_eq!(t, expected);
    }
}

// ===========================================================================
// Profile
// ===========================================================================

#[test]
fn test_profile_bucket_always_recomputed() {
    let mut p = CustomerRiskProfile::from_score(dec!(0.39));
    assert_eq!(p.bucket(), RiskBucket::Low);
    p.risk_score = dec!(0.40);
    assert_eq!(p.bucket(), RiskBucket::Medium);
}
