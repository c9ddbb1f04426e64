//! Trend normalisation.
//!
//! Upstream trend values are unvalidated strings. They are sanitised here,
//! once, into a closed enum. Anything unrecognised degrades to `Stable`.

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendClassification {
    Improving,
    #[default]
    Stable,
    Worsening,
}

impl TrendClassification {
    /// Wire literal: `"improving"`, `"stable"` or `"worsening"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendClassification::Improving => "improving",
            TrendClassification::Stable => "stable",
            TrendClassification::Worsening => "worsening",
        }
    }

    /// Strict, case-sensitive recognition. `None` for anything else.
    pub fn recognize(raw: &str) -> Option<TrendClassification> {
        match raw {
            "improving" => Some(TrendClassification::Improving),
            "stable" => Some(TrendClassification::Stable),
            "worsening" => Some(TrendClassification::Worsening),
            _ => None,
        }
    }
}

impl std::fmt::Display for TrendClassification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendClassification::Improving => write!(f, "Improving"),
            TrendClassification::Stable => write!(f, "Stable"),
            TrendClassification::Worsening => write!(f, "Worsening"),
        }
    }
}

/// Unknown or malformed wire values normalise instead of failing.
impl<'de> Deserialize<'de> for TrendClassification {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(normalize_trend_opt(raw.as_str()))
    }
}

/// Exact match against the three known literals; everything else is `Stable`.
pub fn normalize_trend(raw: &str) -> TrendClassification {
    TrendClassification::recognize(raw).unwrap_or_default()
}

/// As [`normalize_trend`], with a missing value also mapping to `Stable`.
pub fn normalize_trend_opt(raw: Option<&str>) -> TrendClassification {
    raw.map(normalize_trend).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_literals() {
        assert_eq!(normalize_trend("improving"), TrendClassification::Improving);
        assert_eq!(normalize_trend("stable"), TrendClassification::Stable);
        assert_eq!(normalize_trend("worsening"), TrendClassification::Worsening);
    }

    #[test]
    fn test_unknown_values_fall_back_to_stable() {
        for raw in ["", "IMPROVING", "Worsening", "unknown", "up", "down", " stable"] {
            assert_eq!(normalize_trend(raw), TrendClassification::Stable, "raw = {raw:?}");
        }
        assert_eq!(normalize_trend_opt(None), TrendClassification::Stable);
    }

    #[test]
    fn test_deserialize_never_fails() {
        let t: TrendClassification = serde_json::from_str("\"worsening\"").unwrap();
        assert_eq!(t, TrendClassification::Worsening);
        let t: TrendClassification = serde_json::from_str("\"sideways\"").unwrap();
        assert_eq!(t, TrendClassification::Stable);
        let t: TrendClassification = serde_json::from_str("null").unwrap();
        assert_eq!(t, TrendClassification::Stable);
        let t: TrendClassification = serde_json::from_str("7").unwrap();
        assert_eq!(t, TrendClassification::Stable);
    }

    #[test]
    fn test_serializes_as_lowercase_literal() {
        let s = serde_json::to_string(&TrendClassification::Improving).unwrap();
        assert_eq!(s, "\"improving\"");
    }
}
