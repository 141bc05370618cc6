//! Best-effort ingestion of semi-structured spreadsheet rows.
//!
//! Sheets arrive from manual authorship: headers vary in accents, casing
//! and punctuation, and cells mix numbers with numeric strings. Ingestion
//! canonicalizes headers, coerces cells into typed records, and drops rows
//! that cannot be coerced instead of failing the whole batch. Dropped rows
//! are returned alongside the valid ones so callers can surface data loss
//! rather than lose it silently.

mod match_row;
mod normalize;
mod player_row;

pub use match_row::parse_match_rows;
pub use normalize::normalize_key;
pub use player_row::parse_player_rows;

use serde_json::Value;
use thiserror::Error;

/// Errors that can reject a single row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("field `{field}` is not numeric: {value}")]
    NotNumeric { field: &'static str, value: String },

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("required field `{0}` is empty")]
    EmptyField(&'static str),

    #[error("row is not a key/value object")]
    NotAnObject,
}

/// A row that failed validation, with its position in the source batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowRejection {
    /// Index of the row in the raw input
    pub index: usize,
    pub error: RowError,
}

/// Outcome of parsing a batch of raw rows: the rows that validated plus
/// the ones that were dropped.
#[derive(Debug, Clone)]
pub struct Ingested<T> {
    pub rows: Vec<T>,
    pub rejected: Vec<RowRejection>,
}

impl<T> Ingested<T> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            rows: Vec::with_capacity(capacity),
            rejected: Vec::new(),
        }
    }

    /// Number of rows dropped from the batch.
    pub fn dropped(&self) -> usize {
        self.rejected.len()
    }
}

impl<T> Default for Ingested<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            rejected: Vec::new(),
        }
    }
}

/// Coerce a cell into a count. Accepts native numbers and numeric
/// strings; a whitespace-only string counts as absent. A present but
/// non-coercible value is an error — the caller decides whether that
/// rejects the row or falls back to a default.
pub(crate) fn coerce_count(
    field: &'static str,
    cell: Option<&Value>,
) -> Result<Option<u32>, RowError> {
    let Some(value) = cell else {
        return Ok(None);
    };

    match value {
        Value::Null => Ok(None),
        Value::Number(n) => match n.as_f64() {
            Some(n) if n.is_finite() && n >= 0.0 => Ok(Some(n as u32)),
            _ => Err(not_numeric(field, value)),
        },
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            match s.parse::<f64>() {
                Ok(n) if n.is_finite() && n >= 0.0 => Ok(Some(n as u32)),
                _ => Err(not_numeric(field, value)),
            }
        }
        other => Err(not_numeric(field, other)),
    }
}

/// Lenient variant for the player sheet: absent or non-coercible cells
/// default to 0.
pub(crate) fn coerce_count_lenient(cell: Option<&Value>) -> u32 {
    coerce_count("", cell).ok().flatten().unwrap_or(0)
}

/// Coerce a cell into a trimmed, non-empty string. Numbers pass through
/// in their string form (sheets sometimes type dates and names as
/// numbers).
pub(crate) fn coerce_string(cell: Option<&Value>) -> Option<String> {
    match cell? {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// A flag cell is set when it reads "SIM" (yes), in any casing.
pub(crate) fn coerce_yes_flag(cell: Option<&Value>) -> bool {
    coerce_string(cell).is_some_and(|s| s.trim().eq_ignore_ascii_case("SIM"))
}

fn not_numeric(field: &'static str, value: &Value) -> RowError {
    RowError::NotNumeric {
        field,
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_count_native_number() {
        let value = json!(7);
        assert_eq!(coerce_count("kill", Some(&value)), Ok(Some(7)));
    }

    #[test]
    fn test_coerce_count_numeric_string() {
        let value = json!(" 12 ");
        assert_eq!(coerce_count("kill", Some(&value)), Ok(Some(12)));
    }

    #[test]
    fn test_coerce_count_blank_string_is_absent() {
        let value = json!("   ");
        assert_eq!(coerce_count("kill", Some(&value)), Ok(None));
        assert_eq!(coerce_count("kill", None), Ok(None));
    }

    #[test]
    fn test_coerce_count_rejects_garbage() {
        let value = json!("abc");
        assert!(matches!(
            coerce_count("rodada", Some(&value)),
            Err(RowError::NotNumeric { field: "rodada", .. })
        ));

        let value = json!(-3);
        assert!(coerce_count("rodada", Some(&value)).is_err());
    }

    #[test]
    fn test_coerce_count_lenient_defaults_to_zero() {
        let value = json!("abc");
        assert_eq!(coerce_count_lenient(Some(&value)), 0);
        assert_eq!(coerce_count_lenient(None), 0);

        let value = json!("4");
        assert_eq!(coerce_count_lenient(Some(&value)), 4);
    }

    #[test]
    fn test_coerce_string_trims_and_rejects_blank() {
        let value = json!("  Bermuda  ");
        assert_eq!(coerce_string(Some(&value)), Some("Bermuda".to_string()));

        let value = json!("");
        assert_eq!(coerce_string(Some(&value)), None);
    }

    #[test]
    fn test_coerce_string_accepts_numbers() {
        let value = json!(20250312);
        assert_eq!(coerce_string(Some(&value)), Some("20250312".to_string()));
    }

    #[test]
    fn test_coerce_yes_flag() {
        assert!(coerce_yes_flag(Some(&json!("SIM"))));
        assert!(coerce_yes_flag(Some(&json!(" sim "))));
        assert!(!coerce_yes_flag(Some(&json!("NAO"))));
        assert!(!coerce_yes_flag(Some(&json!(""))));
        assert!(!coerce_yes_flag(None));
    }

    #[test]
    fn test_row_error_display() {
        let err = RowError::NotNumeric {
            field: "rodada",
            value: "\"abc\"".to_string(),
        };
        assert_eq!(err.to_string(), "field `rodada` is not numeric: \"abc\"");

        let err = RowError::MissingField("player");
        assert_eq!(err.to_string(), "missing required field `player`");
    }
}
