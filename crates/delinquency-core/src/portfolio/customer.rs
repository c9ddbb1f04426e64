use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::risk::{CustomerRiskProfile, RiskBucket};
use crate::types::Money;

/// One row of a customer list as supplied by the data provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    /// Numeric ids from the provider are kept as their decimal string.
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(alias = "accountNumber")]
    pub account_number: String,
    #[serde(flatten)]
    pub profile: CustomerRiskProfile,
    #[serde(alias = "creditLimit", default, skip_serializing_if = "Option::is_none")]
    pub credit_limit: Option<Money>,
    #[serde(alias = "currentBalance", default, skip_serializing_if = "Option::is_none")]
    pub current_balance: Option<Money>,
    #[serde(alias = "lastPaymentDate", default, skip_serializing_if = "Option::is_none")]
    pub last_payment_date: Option<NaiveDate>,
    #[serde(alias = "behaviorFlags", default)]
    pub behavior_flags: Vec<String>,
}

impl CustomerRecord {
    pub fn bucket(&self) -> RiskBucket {
        self.profile.bucket()
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "customer id must be a string or number, got {other}"
        ))),
    }
}
