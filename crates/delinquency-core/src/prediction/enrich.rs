//! Derive a [`CustomerRiskProfile`] from a raw account and a model score.

use rust_decimal::Decimal;

use super::features::{engineer_features, AccountFeatures};
use crate::risk::{CustomerRiskProfile, TrendClassification};
use crate::types::{Rate, Score};
use crate::{DelinquencyError, DelinquencyResult};

/// Build the policy-engine profile for an account scored by the Prediction API.
///
/// `days_since_last_payment` is not derivable from the feature vector and is
/// left at 0.
pub fn profile_from_account(
    account: &AccountFeatures,
    risk_score: Score,
) -> DelinquencyResult<CustomerRiskProfile> {
    let features = engineer_features(account)?;

    let trend = match features.delay_trend {
        t if t < 0 => TrendClassification::Worsening,
        t if t > 0 => TrendClassification::Improving,
        _ => TrendClassification::Stable,
    };

    Ok(CustomerRiskProfile {
        risk_score,
        utilization_rate: current_utilization(account)?,
        average_payment_delay_days: whole_average_delay(account),
        payment_coverage_ratio: features.pay_cover_ratio_avg.round_dp(2),
        days_since_last_payment: 0,
        trend_raw: trend.as_str().to_string(),
    })
}

pub fn behavior_flags(account: &AccountFeatures) -> Vec<String> {
    let mut flags = Vec::new();
    if Decimal::from(status_total(account)) / Decimal::from(6) > Decimal::ONE {
        flags.push("Late payment history".to_string());
    }
    flags
}

/// Latest bill over limit, 0 when there is no limit.
fn current_utilization(account: &AccountFeatures) -> DelinquencyResult<Rate> {
    if account.limit_bal <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }
    account
        .bill_amt6
        .checked_div(account.limit_bal)
        .map(|u| u.round_dp(2))
        .ok_or_else(|| DelinquencyError::InvalidInput {
            field: "bill_amt6".into(),
            reason: "Utilisation overflows the decimal range.".into(),
        })
}

/// Mean repayment status truncated toward zero; paid-duly months do not
/// produce a negative delay.
fn whole_average_delay(account: &AccountFeatures) -> u32 {
    let mean = status_total(account) / 6;
    mean.clamp(0, i64::from(u32::MAX)) as u32
}

/// Widened so unvalidated status codes cannot overflow.
fn status_total(account: &AccountFeatures) -> i64 {
    account
        .repayment_statuses()
        .iter()
        .map(|&s| i64::from(s))
        .sum()
}
