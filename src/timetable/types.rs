//! Core types for the timetable layout engine.
//!
//! This module defines the caller-facing data model: items, tracks, the
//! visible window, and the presentation metadata that the engine forwards
//! untouched.

use std::collections::HashMap;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::timetable::instant::InstantValue;

/// Default hour-of-day at which a window opens.
pub const DEFAULT_STARTING_HOUR: f64 = 0.0;

/// Default window length in hours.
pub const DEFAULT_NUMBER_OF_HOURS: f64 = 24.0;

// ============================================================================
// Identifiers
// ============================================================================

/// An opaque identifier, accepted as a string or an integer.
///
/// Uniqueness is only expected within a track; the engine never validates
/// ids globally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Id {
    Text(String),
    Int(i64),
}

impl std::fmt::Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Id::Text(text) => write!(f, "{text}"),
            Id::Int(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for Id {
    fn from(text: &str) -> Self {
        Id::Text(text.to_string())
    }
}

impl From<String> for Id {
    fn from(text: String) -> Self {
        Id::Text(text)
    }
}

impl From<i64> for Id {
    fn from(n: i64) -> Self {
        Id::Int(n)
    }
}

impl From<i32> for Id {
    fn from(n: i32) -> Self {
        Id::Int(n as i64)
    }
}

/// Presentation metadata forwarded untouched (e.g. CSS property hints).
pub type StyleHints = HashMap<String, String>;

// ============================================================================
// Items and Tracks
// ============================================================================

/// A single time-bounded schedule entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Item {
    /// Identifier, unique within its track.
    pub id: Id,
    /// Display name.
    pub name: String,
    /// Secondary display text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    /// Start of the item, parsed or parseable.
    pub start: InstantValue,
    /// End of the item, parsed or parseable.
    ///
    /// `start <= end` is assumed but not enforced; a reversed interval is
    /// forwarded as-is and may produce a negative layout length.
    pub end: InstantValue,
    /// Owning track. Set during normalization for track-owned items;
    /// preserved on standalone items.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_id: Option<Id>,
    /// Opaque structured data, forwarded unchanged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
    /// Style hints, forwarded unchanged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleHints>,
    /// CSS class name, forwarded unchanged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Cancellation flag, forwarded unchanged.
    #[serde(default)]
    pub cancelled: bool,
}

impl Item {
    /// Create a new item.
    pub fn new(
        id: impl Into<Id>,
        name: impl Into<String>,
        start: impl Into<InstantValue>,
        end: impl Into<InstantValue>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            info: None,
            start: start.into(),
            end: end.into(),
            track_id: None,
            payload: None,
            style: None,
            class_name: None,
            cancelled: false,
        }
    }

    /// Set the secondary display text.
    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.info = Some(info.into());
        self
    }

    /// Set the owning track.
    pub fn with_track(mut self, track_id: impl Into<Id>) -> Self {
        self.track_id = Some(track_id.into());
        self
    }

    /// Attach an opaque payload.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Set style hints.
    pub fn with_style(mut self, style: StyleHints) -> Self {
        self.style = Some(style);
        self
    }

    /// Set the CSS class name.
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Mark the item as cancelled.
    pub fn cancelled(mut self) -> Self {
        self.cancelled = true;
        self
    }

    /// Deserialize the payload into a concrete type.
    pub fn payload_as<T: serde::de::DeserializeOwned>(&self) -> Result<Option<T>> {
        match &self.payload {
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
            None => Ok(None),
        }
    }
}

/// A parallel lane of the schedule (a stage, room, or team) that may own a
/// set of items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Track {
    /// Identifier.
    pub id: Id,
    /// Display name.
    pub name: String,
    /// Items owned by this track. Ownership holds until normalization
    /// copies them into the flat item collection.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Item>,
    /// Style hints, forwarded unchanged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleHints>,
    /// CSS class name, forwarded unchanged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

impl Track {
    /// Create a new track.
    pub fn new(id: impl Into<Id>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            items: Vec::new(),
            style: None,
            class_name: None,
        }
    }

    /// Add an owned item.
    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    /// Add multiple owned items.
    pub fn with_items(mut self, items: impl IntoIterator<Item = Item>) -> Self {
        self.items.extend(items);
        self
    }

    /// Set style hints.
    pub fn with_style(mut self, style: StyleHints) -> Self {
        self.style = Some(style);
        self
    }

    /// Set the CSS class name.
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }
}

// ============================================================================
// Layout orientation
// ============================================================================

/// Layout orientation. Presentation-only: it decides which axis the minute
/// offsets map to and never affects the engine math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Horizontal,
    Vertical,
}

// ============================================================================
// View window
// ============================================================================

/// The currently visible time range, anchored to a selected day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ViewWindow {
    /// The calendar day the window is anchored to.
    pub selected_date: NaiveDate,
    /// Hour-of-day at which the window opens (fractional allowed).
    pub starting_hour: f64,
    /// Window length in hours (fractional allowed).
    pub number_of_hours: f64,
}

impl ViewWindow {
    /// Create a window for a day with the default hours (full day).
    pub fn new(selected_date: NaiveDate) -> Self {
        Self {
            selected_date,
            starting_hour: DEFAULT_STARTING_HOUR,
            number_of_hours: DEFAULT_NUMBER_OF_HOURS,
        }
    }

    /// Set the opening hour.
    pub fn with_starting_hour(mut self, starting_hour: f64) -> Self {
        self.starting_hour = starting_hour;
        self
    }

    /// Set the window length.
    pub fn with_number_of_hours(mut self, number_of_hours: f64) -> Self {
        self.number_of_hours = number_of_hours;
        self
    }

    /// The instant the window opens.
    pub fn start(&self) -> DateTime<Utc> {
        self.selected_date.and_time(NaiveTime::MIN).and_utc()
            + hours_to_duration(self.starting_hour)
    }

    /// The instant the window closes.
    pub fn end(&self) -> DateTime<Utc> {
        self.start() + hours_to_duration(self.number_of_hours)
    }

    /// Window length in whole minutes.
    pub fn total_minutes(&self) -> i64 {
        hours_to_minutes(self.number_of_hours)
    }
}

/// Convert a (possibly fractional) hour count to whole minutes.
pub(crate) fn hours_to_minutes(hours: f64) -> i64 {
    (hours * 60.0).round() as i64
}

/// Convert a (possibly fractional) hour count to a duration.
pub(crate) fn hours_to_duration(hours: f64) -> Duration {
    Duration::minutes(hours_to_minutes(hours))
}

// ============================================================================
// Tests
// ============================================================================
