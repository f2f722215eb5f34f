//! timegrid: a pure layout engine for calendar-style timetables.
//!
//! Given tracks (stages, rooms, teams) with time-bounded items and a
//! visible window anchored to a selected day, timegrid computes where each
//! item sits along the time axis (minute offset and length, with clipping
//! flags) and which visual lane it occupies when items overlap. It owns no
//! rendering, styling, or interaction concerns; the presentation layer
//! translates minutes and lanes into geometry.

pub mod error;
pub mod timetable;

pub use error::{InstantError, InstantField, Result, TimegridError};
pub use timetable::{
    item_dimensions, items_in_window, layout, layout_with_tracing, normalize_items, parse_instant,
    resolve_lanes, DiagnosticSink, HourMark, Id, InstantValue, Item, ItemDimensions, LaneRecord,
    NormalizedItem, PositionedItem, RecordingSink, StyleHints, TimetableLayout, TimetableParams,
    TracingSink, Track, Variant, ViewWindow,
};
