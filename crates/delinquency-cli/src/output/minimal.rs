use serde_json::Value;

use super::{payload, scalar};

/// Headline field of each command's output, most specific first.
const HEADLINE_KEYS: [&str; 6] = [
    "risk_bucket",
    "engine_bucket",
    "trend",
    "at_risk_accounts",
    "agrees",
    "total_accounts",
];

/// Print only the headline answer.
///
/// Arrays print one line per element (customer ids for filtered lists).
pub fn print_minimal(value: &Value) {
    match payload(value) {
        Value::Object(map) => {
            let headline = HEADLINE_KEYS
                .iter()
                .find_map(|k| map.get(*k).filter(|v| !v.is_null()));
            match headline {
                Some(v) => println!("{}", scalar(v)),
                None => {
                    if let Some((key, v)) = map.iter().next() {
                        println!("{key}: {}", scalar(v));
                    }
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                let line = item
                    .get("id")
                    .map(scalar)
                    .unwrap_or_else(|| scalar(item));
                println!("{line}");
            }
        }
        other => println!("{}", scalar(other)),
    }
}
