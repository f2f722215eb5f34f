//! Instant values: item boundaries accepted as parsed instants or
//! parseable strings.
//!
//! Callers hand the engine items whose `start`/`end` may be real
//! [`DateTime<Utc>`] values or text in a handful of common formats. Parsing
//! happens exactly once, during normalization; everything downstream works
//! with resolved instants.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{InstantError, InstantField};

/// Accepted naive text formats, tried in order after RFC 3339.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// A point in time, either already parsed or still textual.
///
/// Naive text (no offset) is taken as UTC: the engine compares instants on a
/// single timeline and never converts between zones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum InstantValue {
    /// A parsed instant.
    Instant(DateTime<Utc>),
    /// A parseable string, e.g. `"2026-06-12T08:00:00"`.
    Text(String),
}

impl InstantValue {
    /// Resolve to a concrete instant, if the value parses.
    pub fn resolve(&self) -> Option<DateTime<Utc>> {
        match self {
            InstantValue::Instant(dt) => Some(*dt),
            InstantValue::Text(text) => parse_instant(text),
        }
    }

    /// Resolve, tagging a failure with the field it belongs to.
    pub fn resolve_field(&self, field: InstantField) -> Result<DateTime<Utc>, InstantError> {
        self.resolve().ok_or_else(|| InstantError::Unparseable {
            field,
            value: self.to_string(),
        })
    }
}

impl std::fmt::Display for InstantValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InstantValue::Instant(dt) => write!(f, "{}", dt.to_rfc3339()),
            InstantValue::Text(text) => write!(f, "{text}"),
        }
    }
}

impl From<DateTime<Utc>> for InstantValue {
    fn from(dt: DateTime<Utc>) -> Self {
        InstantValue::Instant(dt)
    }
}

impl From<String> for InstantValue {
    fn from(text: String) -> Self {
        InstantValue::Text(text)
    }
}

impl From<&str> for InstantValue {
    fn from(text: &str) -> Self {
        InstantValue::Text(text.to_string())
    }
}

/// Parse an instant string: RFC 3339 first, then naive date-times, then a
/// bare date (midnight).
pub fn parse_instant(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN).and_utc());
    }

    None
}

// ============================================================================
// Tests
// ============================================================================
