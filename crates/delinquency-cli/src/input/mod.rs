pub mod csv_in;
pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Resolve command input: `--input <file.json>` first, then piped stdin.
/// `Ok(None)` when neither is present.
pub fn read_optional<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return Ok(Some(file::read_json(path)?));
    }
    match stdin::read_stdin()? {
        Some(data) => Ok(Some(serde_json::from_value(data)?)),
        None => Ok(None),
    }
}

/// As [`read_optional`], failing when no input was supplied.
pub fn read_required<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<T, Box<dyn std::error::Error>> {
    read_optional(path)?.ok_or_else(|| "--input <file.json> or stdin required".into())
}

pub fn is_csv(path: &str) -> bool {
    path.to_ascii_lowercase().ends_with(".csv")
}
