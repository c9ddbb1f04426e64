//! Search, bucket filter and sort for customer list views.
//!
//! Sorting is stable so list order stays put across re-renders of unchanged
//! data, and the whole operation is idempotent.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::customer::CustomerRecord;
use crate::risk::RiskBucket;

// ---------------------------------------------------------------------------
// Filter / sort parameters
// ---------------------------------------------------------------------------

/// Bucket filter. Wire form is `"All"` or a bucket name; unknown strings fall
/// back to `All`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BucketFilter {
    #[default]
    All,
    Only(RiskBucket),
}

impl BucketFilter {
    pub fn parse(raw: &str) -> BucketFilter {
        RiskBucket::parse(raw)
            .map(BucketFilter::Only)
            .unwrap_or(BucketFilter::All)
    }

    pub fn accepts(&self, bucket: RiskBucket) -> bool {
        match self {
            BucketFilter::All => true,
            BucketFilter::Only(b) => *b == bucket,
        }
    }
}

impl From<String> for BucketFilter {
    fn from(raw: String) -> Self {
        BucketFilter::parse(&raw)
    }
}

impl From<BucketFilter> for String {
    fn from(filter: BucketFilter) -> Self {
        match filter {
            BucketFilter::All => "All".to_string(),
            BucketFilter::Only(b) => b.as_str().to_string(),
        }
    }
}

/// Sort key. Wire form is `"risk"`, `"name"` or `"utilization"`; unknown
/// strings fall back to `RiskScore`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SortKey {
    /// Descending risk score.
    #[default]
    RiskScore,
    /// Ascending by name.
    Name,
    /// Descending utilisation.
    Utilization,
}

impl SortKey {
    pub fn parse(raw: &str) -> SortKey {
        match raw {
            "name" => SortKey::Name,
            "utilization" => SortKey::Utilization,
            _ => SortKey::RiskScore,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::RiskScore => "risk",
            SortKey::Name => "name",
            SortKey::Utilization => "utilization",
        }
    }

    fn compare(&self, a: &CustomerRecord, b: &CustomerRecord) -> Ordering {
        match self {
            SortKey::RiskScore => b.profile.risk_score.cmp(&a.profile.risk_score),
            SortKey::Name => a.name.cmp(&b.name),
            SortKey::Utilization => b.profile.utilization_rate.cmp(&a.profile.utilization_rate),
        }
    }
}

impl From<String> for SortKey {
    fn from(raw: String) -> Self {
        SortKey::parse(&raw)
    }
}

impl From<SortKey> for String {
    fn from(key: SortKey) -> Self {
        key.as_str().to_string()
    }
}

/// Serialisable form of a [`filter_and_sort`] call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterQuery {
    pub customers: Vec<CustomerRecord>,
    #[serde(default)]
    pub search_text: String,
    #[serde(default)]
    pub bucket_filter: BucketFilter,
    #[serde(default)]
    pub sort_key: SortKey,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Filter by search text and bucket, then stable-sort by `sort_key`.
///
/// Search matches a case-insensitive substring of the name or a substring of
/// the account number. An empty search matches everyone.
pub fn filter_and_sort(
    customers: &[CustomerRecord],
    search_text: &str,
    bucket_filter: BucketFilter,
    sort_key: SortKey,
) -> Vec<CustomerRecord> {
    let needle = search_text.to_lowercase();
    let mut rows: Vec<CustomerRecord> = customers
        .iter()
        .filter(|c| matches_search(c, search_text, &needle))
        .filter(|c| bucket_filter.accepts(c.bucket()))
        .cloned()
        .collect();
    // Vec::sort_by is stable.
    rows.sort_by(|a, b| sort_key.compare(a, b));
    rows
}

pub fn apply_query(query: &FilterQuery) -> Vec<CustomerRecord> {
    filter_and_sort(
        &query.customers,
        &query.search_text,
        query.bucket_filter,
        query.sort_key,
    )
}

fn matches_search(customer: &CustomerRecord, raw: &str, lowered: &str) -> bool {
    customer.name.to_lowercase().contains(lowered) || customer.account_number.contains(raw)
}
