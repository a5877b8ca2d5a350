//! Loose coercions over raw JSON values.
//!
//! Dataset files come from hand-maintained JSON, so scalar fields arrive as
//! strings, numbers, or worse. Rule checks coerce before judging a value,
//! mirroring how the records are authored.

use chrono::{DateTime, NaiveDate};
use serde_json::Value;

/// Render a JSON value as display text.
///
/// Strings pass through, numbers and booleans format naturally, null and
/// absent values become the empty string. Arrays and objects fall back to
/// their compact JSON form.
#[must_use]
pub fn to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Interpret a JSON value as a finite number.
///
/// Accepts JSON numbers and numeric strings (trimmed). Everything else,
/// including NaN/infinite results, is `None`.
#[must_use]
pub fn to_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Whether a coerced value is non-empty after trimming.
#[must_use]
pub fn is_non_empty_text(value: &Value) -> bool {
    !to_text(value).trim().is_empty()
}

/// Parse a date written as `YYYY-MM-DD` or a full RFC 3339 timestamp.
///
/// Unparseable text is `None`, never an error; recency windows simply skip
/// records whose dates do not parse.
#[must_use]
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}
