use colored::Colorize;
use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::scalar;

pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) if map.contains_key("metadata") => print_envelope(map),
        Value::Object(map) => print_object(map),
        Value::Array(rows) => print_rows(rows),
        other => println!("{}", scalar(other)),
    }
}

fn print_envelope(envelope: &Map<String, Value>) {
    match envelope.get("result") {
        Some(Value::Object(result)) => print_object(result),
        Some(Value::Array(rows)) => print_rows(rows),
        Some(other) => println!("{}", scalar(other)),
        None => {}
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\n{}", "Warnings:".yellow().bold());
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {w}");
            }
        }
    }

    if let Some(Value::String(methodology)) = envelope.get("methodology") {
        println!("\nMethodology: {methodology}");
    }
    if let Some(policy) = envelope
        .get("metadata")
        .and_then(|m| m.get("policy_version"))
        .and_then(Value::as_str)
    {
        println!("Policy version: {policy}");
    }
}

/// Scalar fields as a Field/Value table. Arrays of objects (recommendations,
/// bucket shares) follow as their own titled tables.
fn print_object(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    let mut nested = Vec::new();

    for (key, val) in map {
        match val {
            Value::Array(rows) if rows.first().is_some_and(Value::is_object) => {
                nested.push((key, rows));
            }
            Value::Object(inner) => {
                for (k, v) in inner {
                    builder.push_record([format!("{key}.{k}"), render(v)]);
                }
            }
            _ => builder.push_record([key.clone(), render(val)]),
        }
    }
    println!("{}", Table::from(builder));

    for (key, rows) in nested {
        println!("\n{}", key.as_str().bold());
        print_rows(rows);
    }
}

fn print_rows(rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        if rows.is_empty() {
            println!("(empty)");
        }
        for row in rows {
            println!("{}", render(row));
        }
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(headers.iter().cloned());
    for row in rows {
        builder.push_record(
            headers
                .iter()
                .map(|h| row.get(h.as_str()).map(render).unwrap_or_default()),
        );
    }
    println!("{}", Table::from(builder));
}

fn render(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::Array(items) => items.iter().map(render).collect::<Vec<_>>().join(", "),
        other => scalar(other),
    }
}
