//! Timestamp parsing and formatting for plan documents.
//!
//! Plan exports write timestamps as naive local date-times
//! (`2017-01-03 08:00:00`, sometimes with a trailing `.0`). ISO-8601 forms
//! with a `T` separator and RFC 3339 strings with an offset are accepted too;
//! offsets are normalized to UTC and then dropped, since all layout math works
//! on differences between timestamps of the same document.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Format used when writing timestamps back out (tooltips, frame dumps).
pub const OUTPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parse a plan timestamp.
///
/// Returns a human-readable message on failure; callers wrap it in their own
/// error type.
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, String> {
    let trimmed = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.naive_utc());
    }

    // "2024-01-01T00:00Z" is common but not RFC 3339 (no seconds)
    let naive = trimmed.strip_suffix('Z').unwrap_or(trimmed);
    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(naive, format) {
            return Ok(dt);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(naive, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return Ok(dt);
        }
    }

    Err(format!(
        "unrecognized timestamp '{}', expected YYYY-MM-DD HH:MM:SS",
        raw
    ))
}

/// Format a timestamp the way plan exports write them.
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(OUTPUT_FORMAT).to_string()
}

/// Signed distance from `from` to `to`, measured in units of `unit_ms`.
pub fn span_in_units(from: NaiveDateTime, to: NaiveDateTime, unit_ms: i64) -> f64 {
    (to - from).num_milliseconds() as f64 / unit_ms as f64
}

/// Serde adapter for timestamp fields: `#[serde(with = "crate::models::time::timestamp")]`.
pub mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_timestamp(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;

        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw).map_err(D::Error::custom)
    }
}

/// Serde adapter for optional timestamp fields.
pub mod option_timestamp {
    use chrono::NaiveDateTime;
    use serde::Serializer;

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => serializer.serialize_str(&super::format_timestamp(ts)),
            None => serializer.serialize_none(),
        }
    }
}
