use serde_json::{Map, Value};
use std::io;

use super::{payload, scalar};

type StdoutWriter = csv::Writer<io::StdoutLock<'static>>;

/// CSV to stdout. Arrays become one row per element; objects become
/// `field,value` pairs with nested lists JSON-encoded in a single cell.
pub fn print_csv(value: &Value) {
    let mut wtr = csv::Writer::from_writer(io::stdout().lock());

    match payload(value) {
        Value::Array(rows) => write_rows(&mut wtr, rows),
        Value::Object(map) => write_pairs(&mut wtr, map),
        other => {
            let _ = wtr.write_record([scalar(other)]);
        }
    }

    let _ = wtr.flush();
}

fn write_pairs(wtr: &mut StdoutWriter, map: &Map<String, Value>) {
    let _ = wtr.write_record(["field", "value"]);
    for (key, val) in map {
        let _ = wtr.write_record([key.as_str(), &scalar(val)]);
    }
}

fn write_rows(wtr: &mut StdoutWriter, rows: &[Value]) {
    let Some(Value::Object(first)) = rows.first() else {
        for row in rows {
            let _ = wtr.write_record([scalar(row)]);
        }
        return;
    };

    let headers: Vec<&str> = first.keys().map(String::as_str).collect();
    let _ = wtr.write_record(&headers);
    for row in rows {
        let cells: Vec<String> = headers
            .iter()
            .map(|h| row.get(*h).map(cell).unwrap_or_default())
            .collect();
        let _ = wtr.write_record(&cells);
    }
}

/// String lists (behaviour flags) join with `;` to match the CSV input format.
fn cell(value: &Value) -> String {
    match value {
        Value::Array(items) if items.iter().all(Value::is_string) => items
            .iter()
            .map(scalar)
            .collect::<Vec<_>>()
            .join(";"),
        other => scalar(other),
    }
}
