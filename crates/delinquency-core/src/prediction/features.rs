//! Feature engineering over the six-month account history.
//!
//! Repayment statuses follow the usual credit-card convention: -1 paid duly,
//! 0 revolving, n > 0 payment delayed n months.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::types::{Money, Rate};
use crate::{DelinquencyError, DelinquencyResult};

/// Model input column order.
pub const FEATURE_ORDER: [&str; 18] = [
    "limit_bal",
    "age",
    "avg_delay",
    "delay_trend",
    "pay_cover_ratio_avg",
    "bill_growth",
    "utilization_avg",
    "cash_flow_proxy",
    "sex_2",
    "education_1",
    "education_2",
    "education_3",
    "education_4",
    "education_5",
    "education_6",
    "marriage_1",
    "marriage_2",
    "marriage_3",
];

/// Repayment status coding: -2 no consumption, -1 paid duly, 0 revolving,
/// 1..=9 months of delay.
pub const REPAYMENT_STATUS_RANGE: RangeInclusive<i32> = -2..=9;


/// Raw account features as accepted by the Prediction API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountFeatures {
    pub limit_bal: Money,
    pub sex: u8,
    pub education: u8,
    pub marriage: u8,
    pub age: u32,
    /// Most recent month first.
    pub pay_0: i32,
    pub pay_2: i32,
    pub pay_3: i32,
    pub pay_4: i32,
    pub pay_5: i32,
    pub pay_6: i32,
    pub bill_amt1: Money,
    pub bill_amt2: Money,
    pub bill_amt3: Money,
    pub bill_amt4: Money,
    pub bill_amt5: Money,
    pub bill_amt6: Money,
    pub pay_amt1: Money,
    pub pay_amt2: Money,
    pub pay_amt3: Money,
    pub pay_amt4: Money,
    pub pay_amt5: Money,
    pub pay_amt6: Money,
}

impl AccountFeatures {
    pub fn repayment_statuses(&self) -> [i32; 6] {
        [self.pay_0, self.pay_2, self.pay_3, self.pay_4, self.pay_5, self.pay_6]
    }

    pub fn bill_amounts(&self) -> [Money; 6] {
        [
            self.bill_amt1,
            self.bill_amt2,
            self.bill_amt3,
            self.bill_amt4,
            self.bill_amt5,
            self.bill_amt6,
        ]
    }

    pub fn payment_amounts(&self) -> [Money; 6] {
        [
            self.pay_amt1,
            self.pay_amt2,
            self.pay_amt3,
            self.pay_amt4,
            self.pay_amt5,
            self.pay_amt6,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineeredFeatures {
    pub limit_bal: Money,
    pub age: u32,
    pub avg_delay: Decimal,
    /// pay_6 - pay_0. Negative when recent delays are longer than older ones.
    pub delay_trend: i32,
    pub pay_cover_ratio_avg: Rate,
    pub bill_growth: Rate,
    pub utilization_avg: Rate,
    pub cash_flow_proxy: Money,
    pub sex_2: u8,
    /// One-hot, index 0 is education == 1.
    pub education: [u8; 6],
    /// One-hot, index 0 is marriage == 1.
    pub marriage: [u8; 3],
}

impl EngineeredFeatures {
    /// Values in [`FEATURE_ORDER`].
    pub fn ordered(&self) -> Vec<Decimal> {
        let mut v = vec![
            self.limit_bal,
            Decimal::from(self.age),
            self.avg_delay,
            Decimal::from(self.delay_trend),
            self.pay_cover_ratio_avg,
            self.bill_growth,
            self.utilization_avg,
            self.cash_flow_proxy,
            Decimal::from(self.sex_2),
        ];
        v.extend(self.education.iter().map(|&x| Decimal::from(x)));
        v.extend(self.marriage.iter().map(|&x| Decimal::from(x)));
        v
    }
}

pub fn engineer_features(input: &AccountFeatures) -> DelinquencyResult<EngineeredFeatures> {
    validate_input(input)?;

    let statuses = input.repayment_statuses();
    let bills = input.bill_amounts();
    let payments = input.payment_amounts();

    let avg_delay = Decimal::from(statuses.iter().sum::<i32>()) / Decimal::from(6);
    let mean_bill = mean(&bills, "bill_amt")?;
    let mean_payment = mean(&payments, "pay_amt")?;

    let bill_growth = safe_divide(
        checked(input.bill_amt6.checked_sub(input.bill_amt1), "bill_amt")?,
        checked(input.bill_amt1.checked_add(Decimal::ONE), "bill_amt1")?,
        "bill growth",
    )?;
    let utilization_avg = safe_divide(
        mean_bill,
        checked(input.limit_bal.checked_add(Decimal::ONE), "limit_bal")?,
        "utilisation",
    )?;
    let pay_cover_ratio_avg = safe_divide(
        mean_payment,
        checked(mean_bill.checked_add(Decimal::ONE), "bill_amt")?,
        "payment coverage",
    )?;

    let mut education = [0u8; 6];
    if (1..=6).contains(&input.education) {
        education[(input.education - 1) as usize] = 1;
    }
    let mut marriage = [0u8; 3];
    if (1..=3).contains(&input.marriage) {
        marriage[(input.marriage - 1) as usize] = 1;
    }

    Ok(EngineeredFeatures {
        limit_bal: input.limit_bal,
        age: input.age,
        avg_delay,
        delay_trend: input.pay_6 - input.pay_0,
        pay_cover_ratio_avg,
        bill_growth,
        utilization_avg,
        cash_flow_proxy: mean_payment,
        sex_2: u8::from(input.sex == 2),
        education,
        marriage,
    })
}

fn validate_input(input: &AccountFeatures) -> DelinquencyResult<()> {
    if input.limit_bal < Decimal::ZERO {
        return Err(DelinquencyError::InvalidInput {
            field: "limit_bal".into(),
            reason: "Credit limit cannot be negative.".into(),
        });
    }
    if input.age == 0 {
        return Err(DelinquencyError::InvalidInput {
            field: "age".into(),
            reason: "Age must be positive.".into(),
        });
    }
    if input
        .repayment_statuses()
        .iter()
        .any(|s| !REPAYMENT_STATUS_RANGE.contains(s))
    {
        return Err(DelinquencyError::InvalidInput {
            field: "pay".into(),
            reason: "Repayment status must be between -2 and 9.".into(),
        });
    }
    if input.payment_amounts().iter().any(|p| *p < Decimal::ZERO) {
        return Err(DelinquencyError::InvalidInput {
            field: "pay_amt".into(),
            reason: "Payment amounts cannot be negative.".into(),
        });
    }
    Ok(())
}

fn mean(values: &[Money; 6], field: &str) -> DelinquencyResult<Money> {
    let total = values
        .iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(*v));
    Ok(checked(total, field)? / Decimal::from(values.len() as u64))
}

fn checked(value: Option<Decimal>, field: &str) -> DelinquencyResult<Decimal> {
    value.ok_or_else(|| DelinquencyError::InvalidInput {
        field: field.to_string(),
        reason: "Amount overflows the decimal range.".into(),
    })
}

// Bill amounts may be negative (credit balances), so the +1 smoothing can
// still land on zero.
fn safe_divide(numerator: Decimal, denominator: Decimal, context: &str) -> DelinquencyResult<Decimal> {
    if denominator.is_zero() {
        return Err(DelinquencyError::DivisionByZero {
            context: context.to_string(),
        });
    }
    numerator
        .checked_div(denominator)
        .ok_or_else(|| DelinquencyError::InvalidInput {
            field: context.to_string(),
            reason: "Ratio overflows the decimal range.".into(),
        })
}
