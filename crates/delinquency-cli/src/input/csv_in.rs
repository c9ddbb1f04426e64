//! CSV readers for customer lists and raw account batches.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::str::FromStr;
use tracing::debug;

use delinquency_core::portfolio::CustomerRecord;
use delinquency_core::risk::CustomerRiskProfile;

use super::file::resolve_path;

/// Flat customer row. Numeric columns are parsed explicitly so a bad cell is
/// reported with its row and column.
#[derive(Debug, Deserialize)]
struct CustomerCsvRow {
    id: String,
    name: String,
    account_number: String,
    risk_score: String,
    utilization_rate: Option<String>,
    average_payment_delay_days: Option<u32>,
    payment_coverage_ratio: Option<String>,
    days_since_last_payment: Option<u32>,
    trend: Option<String>,
    credit_limit: Option<String>,
    current_balance: Option<String>,
    last_payment_date: Option<String>,
    /// Semicolon-separated.
    behavior_flags: Option<String>,
}

pub fn read_customers_csv(path: &str) -> Result<Vec<CustomerRecord>, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let mut rdr = csv::Reader::from_path(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;

    let mut customers = Vec::new();
    for (i, row) in rdr.deserialize::<CustomerCsvRow>().enumerate() {
        let line = i + 2;
        let row = row.map_err(|e| format!("Row {}: {}", line, e))?;
        customers.push(row_to_record(row, line)?);
    }
    debug!(path = %canonical.display(), rows = customers.len(), "read customer CSV");
    Ok(customers)
}

/// Deserialise every row of a headed CSV file into `T`.
pub fn read_csv<T: DeserializeOwned>(path: &str) -> Result<Vec<T>, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let mut rdr = csv::Reader::from_path(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;
    let rows = rdr
        .deserialize::<T>()
        .enumerate()
        .map(|(i, r)| r.map_err(|e| format!("Row {}: {}", i + 2, e).into()))
        .collect::<Result<Vec<T>, Box<dyn std::error::Error>>>()?;
    debug!(path = %canonical.display(), rows = rows.len(), "read CSV");
    Ok(rows)
}

fn row_to_record(row: CustomerCsvRow, line: usize) -> Result<CustomerRecord, Box<dyn std::error::Error>> {
    let profile = CustomerRiskProfile {
        risk_score: parse_decimal(&row.risk_score, "risk_score", line)?,
        utilization_rate: parse_optional_decimal(row.utilization_rate, "utilization_rate", line)?
            .unwrap_or_default(),
        average_payment_delay_days: row.average_payment_delay_days.unwrap_or(0),
        payment_coverage_ratio: parse_optional_decimal(
            row.payment_coverage_ratio,
            "payment_coverage_ratio",
            line,
        )?
        .unwrap_or_default(),
        days_since_last_payment: row.days_since_last_payment.unwrap_or(0),
        trend_raw: row.trend.unwrap_or_default(),
    };

    let last_payment_date = match row.last_payment_date {
        Some(s) if !s.trim().is_empty() => Some(
            NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                .map_err(|e| format!("Row {}: last_payment_date '{}': {}", line, s, e))?,
        ),
        _ => None,
    };

    let behavior_flags = row
        .behavior_flags
        .map(|s| {
            s.split(';')
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();

    Ok(CustomerRecord {
        id: row.id,
        name: row.name,
        account_number: row.account_number,
        profile,
        credit_limit: parse_optional_decimal(row.credit_limit, "credit_limit", line)?,
        current_balance: parse_optional_decimal(row.current_balance, "current_balance", line)?,
        last_payment_date,
        behavior_flags,
    })
}

fn parse_decimal(raw: &str, column: &str, line: usize) -> Result<Decimal, Box<dyn std::error::Error>> {
    Decimal::from_str(raw.trim())
        .map_err(|e| format!("Row {}: {} '{}': {}", line, column, raw, e).into())
}

fn parse_optional_decimal(
    raw: Option<String>,
    column: &str,
    line: usize,
) -> Result<Option<Decimal>, Box<dyn std::error::Error>> {
    match raw {
        Some(s) if !s.trim().is_empty() => Ok(Some(parse_decimal(&s, column, line)?)),
        _ => Ok(None),
    }
}
