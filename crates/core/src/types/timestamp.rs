//! Canonical creation-timestamp representation.
//!
//! Timestamps are written as RFC 3339 UTC strings with microsecond precision
//! (`2024-05-01T09:30:00.123456Z`). The fixed width keeps lexicographic and
//! chronological order identical, which the stores rely on when sorting.
//!
//! Reading is lenient because documents may have been written by other
//! tools: any RFC 3339 offset, offset-less ISO-8601 (assumed UTC), integer
//! epoch milliseconds and extended-JSON `{"$date": ...}` wrappers are accepted.
//!
//! Use with serde as `#[serde(with = "smartdeal_core::timestamp")]`.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Errors that can occur when reading a stored timestamp.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    /// A string value that is not an ISO-8601 date-time.
    #[error("invalid timestamp string: {0}")]
    InvalidString(String),
    /// An epoch value outside the representable range.
    #[error("epoch milliseconds out of range: {0}")]
    OutOfRange(String),
    /// A JSON value of a type that cannot hold a timestamp.
    #[error("unsupported timestamp representation: {0}")]
    Unsupported(String),
}

/// Current time, truncated to the precision that survives a write/read cycle.
#[must_use]
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Format a timestamp in the canonical stored form.
#[must_use]
pub fn format(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a timestamp string in any accepted ISO-8601 form.
///
/// # Errors
///
/// Returns `TimestampError::InvalidString` if no accepted format matches.
pub fn parse_str(s: &str) -> Result<DateTime<Utc>, TimestampError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(ts.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| TimestampError::InvalidString(s.to_owned()))
}

/// Parse a timestamp from whatever JSON representation a store handed back.
///
/// # Errors
///
/// Returns a `TimestampError` if the value cannot be interpreted as a
/// date-time.
pub fn parse_value(value: &Value) -> Result<DateTime<Utc>, TimestampError> {
    match value {
        Value::String(s) => parse_str(s),
        Value::Number(n) => {
            let millis = n
                .as_i64()
                .ok_or_else(|| TimestampError::OutOfRange(n.to_string()))?;
            DateTime::from_timestamp_millis(millis)
                .ok_or_else(|| TimestampError::OutOfRange(n.to_string()))
        }
        Value::Object(map) => match map.get("$date") {
            Some(inner) => parse_value(inner),
            None => Err(TimestampError::Unsupported(value.to_string())),
        },
        other => Err(TimestampError::Unsupported(other.to_string())),
    }
}

/// Serialize a timestamp in the canonical form.
///
/// # Errors
///
/// Propagates serializer errors.
pub fn serialize<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(ts))
}

/// Deserialize a timestamp from any accepted representation.
///
/// # Errors
///
/// Returns a custom deserializer error if the value is not a timestamp.
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    parse_value(&value).map_err(serde::de::Error::custom)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_format_is_fixed_width_utc() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        assert_eq!(format(&ts), "2024-05-01T09:30:00.000000Z");
    }

    #[test]
    fn test_now_survives_roundtrip() {
        let ts = now();
        assert_eq!(parse_str(&format(&ts)).unwrap(), ts);
    }

    #[test]
    fn test_parse_offset_forms() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        assert_eq!(parse_str("2024-05-01T09:30:00+00:00").unwrap(), expected);
        assert_eq!(parse_str("2024-05-01T11:30:00+02:00").unwrap(), expected);
        assert_eq!(parse_str("2024-05-01T09:30:00Z").unwrap(), expected);
    }

    #[test]
    fn test_parse_naive_assumes_utc() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        assert_eq!(parse_str("2024-05-01T09:30:00").unwrap(), expected);
        assert_eq!(parse_str("2024-05-01 09:30:00.000").unwrap(), expected);
    }

    #[test]
    fn test_parse_value_variants() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        let millis = expected.timestamp_millis();

        assert_eq!(parse_value(&json!(millis)).unwrap(), expected);
        assert_eq!(parse_value(&json!({ "$date": millis })).unwrap(), expected);
        assert_eq!(
            parse_value(&json!({ "$date": "2024-05-01T09:30:00Z" })).unwrap(),
            expected
        );
    }

    #[test]
    fn test_parse_value_rejects_garbage() {
        assert!(matches!(
            parse_value(&json!("yesterday")),
            Err(TimestampError::InvalidString(_))
        ));
        assert!(matches!(
            parse_value(&json!(true)),
            Err(TimestampError::Unsupported(_))
        ));
        assert!(matches!(
            parse_value(&json!({ "when": 1 })),
            Err(TimestampError::Unsupported(_))
        ));
    }

    #[test]
    fn test_canonical_strings_sort_chronologically() {
        let earlier = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        let later = earlier + chrono::Duration::microseconds(1);
        assert!(format(&earlier) < format(&later));
    }
}
