//! Per-field setters and the value coercions they use.
//!
//! Field values arrive from the UI as loosely typed JSON. Each record type
//! names its editable fields with an enum and maps every variant to exactly
//! one coercion below, so the dispatch is an exhaustive `match` rather than a
//! string switch. Coercions never fail; malformed input falls back to an
//! empty value.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A value whose fields can be written by name with loosely typed input.
pub trait FieldSet {
    type Field: Copy + std::fmt::Debug;

    fn set_field(&mut self, field: Self::Field, value: &Value);
}

/// Free text. Scalars are stringified; null and containers become `""`.
pub fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

/// Converts a date from its display form into epoch milliseconds.
///
/// Accepts epoch millis (number or numeric string), `YYYY-MM-DD`, `YYYY-MM`,
/// RFC 3339 timestamps and offset-less `datetime-local` values. Calendar
/// dates are taken at UTC midnight; local date-times are read as UTC.
pub fn epoch_millis(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => parse_date_millis(s.trim()),
        _ => None,
    }
}

fn parse_date_millis(s: &str) -> Option<i64> {
    if s.is_empty() {
        return None;
    }
    if let Ok(millis) = s.parse::<i64>() {
        return Some(millis);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.timestamp_millis());
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(local) = NaiveDateTime::parse_from_str(s, format) {
            return Some(local.and_utc().timestamp_millis());
        }
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d"))
        .ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis())
}

/// A decimal such as a GPA or test score.
pub fn decimal(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

pub fn flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "y" | "yes" | "1"
        ),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        _ => false,
    }
}

/// An enumerated category code. Unknown codes clear the field.
pub fn code<E: DeserializeOwned>(value: &Value) -> Option<E> {
    match value {
        Value::String(_) => serde_json::from_value(value.clone()).ok(),
        _ => None,
    }
}

/// `deserialize_with` for optional code fields read from the wire: an
/// unknown or mistyped code becomes `None` instead of failing the document.
pub fn lenient_code<'de, D, E>(deserializer: D) -> Result<Option<E>, D::Error>
where
    D: Deserializer<'de>,
    E: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(code(&value))
}

/// Like `lenient_code`, for required codes that have a default.
pub fn lenient_code_or_default<'de, D, E>(deserializer: D) -> Result<E, D::Error>
where
    D: Deserializer<'de>,
    E: DeserializeOwned + Default,
{
    lenient_code(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[test]
    fn test_text_coercion() {
        assert_eq!(text(&json!("Acme")), "Acme");
        assert_eq!(text(&json!(3)), "3");
        assert_eq!(text(&json!(null)), "");
        assert_eq!(text(&json!(["a"])), "");
    }

    #[test]
    fn test_iso_date_becomes_utc_midnight_millis() {
        assert_eq!(epoch_millis(&json!("2024-03-01")), Some(1_709_251_200_000));
        assert_eq!(epoch_millis(&json!("2024-03")), Some(1_709_251_200_000));
    }

    #[test]
    fn test_epoch_input_passes_through() {
        assert_eq!(epoch_millis(&json!(1_709_251_200_000_i64)), Some(1_709_251_200_000));
        assert_eq!(epoch_millis(&json!("1709251200000")), Some(1_709_251_200_000));
    }

    #[test]
    fn test_rfc3339_date() {
        assert_eq!(
            epoch_millis(&json!("2024-03-01T09:00:00+09:00")),
            Some(1_709_251_200_000)
        );
    }

    #[test]
    fn test_datetime_local_read_as_utc() {
        assert_eq!(epoch_millis(&json!("2024-03-01T09:00")), Some(1_709_283_600_000));
        assert_eq!(epoch_millis(&json!("2024-03-01T09:00:30")), Some(1_709_283_630_000));
        assert_eq!(epoch_millis(&json!("2024-03-01 09:00:00")), Some(1_709_283_600_000));
    }

    #[test]
    fn test_malformed_date_falls_back_to_none() {
        assert_eq!(epoch_millis(&json!("next spring")), None);
        assert_eq!(epoch_millis(&json!("")), None);
        assert_eq!(epoch_millis(&json!(true)), None);
    }

    #[test]
    fn test_decimal_coercion() {
        assert_eq!(decimal(&json!("3.8")), Some(3.8));
        assert_eq!(decimal(&json!(4.5)), Some(4.5));
        assert_eq!(decimal(&json!("abc")), None);
        assert_eq!(decimal(&json!("NaN")), None);
    }

    #[test]
    fn test_flag_coercion() {
        assert!(flag(&json!(true)));
        assert!(flag(&json!("Y")));
        assert!(flag(&json!(1)));
        assert!(!flag(&json!("nope")));
        assert!(!flag(&json!(null)));
    }

    #[derive(Debug, PartialEq, Deserialize)]
    #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
    enum Level {
        Native,
        Basic,
    }

    #[test]
    fn test_code_coercion() {
        assert_eq!(code::<Level>(&json!("NATIVE")), Some(Level::Native));
        assert_eq!(code::<Level>(&json!("BASIC")), Some(Level::Basic));
        assert_eq!(code::<Level>(&json!("native")), None);
        assert_eq!(code::<Level>(&json!(2)), None);
    }

    #[derive(Debug, Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "lenient_code")]
        level: Option<Level>,
    }

    #[test]
    fn test_lenient_code_on_the_wire() {
        let known: Holder = serde_json::from_value(json!({"level": "NATIVE"})).unwrap();
        assert_eq!(known.level, Some(Level::Native));
        let unknown: Holder = serde_json::from_value(json!({"level": "FLUENT"})).unwrap();
        assert_eq!(unknown.level, None);
        let missing: Holder = serde_json::from_value(json!({})).unwrap();
        assert_eq!(missing.level, None);
        let null: Holder = serde_json::from_value(json!({"level": null})).unwrap();
        assert_eq!(null.level, None);
    }
}
