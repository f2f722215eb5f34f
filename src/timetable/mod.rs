//! Timetable layout engine.
//!
//! This module provides the pure, framework-independent core of a
//! calendar-style timetable: a shared time axis crossed with parallel
//! tracks holding time-bounded items that may overlap. It covers:
//!
//! - **Normalization**: flattening track-owned and standalone items into
//!   one validated, track-tagged collection
//! - **Window Filtering**: selecting and time-sorting the items visible on
//!   the selected day
//! - **Dimension Mapping**: minute offsets and lengths along the window,
//!   with day-boundary correction and edge clipping
//! - **Overlap Resolution**: stacking overlapping items into visual lanes
//!   with a single-pass heuristic
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌───────────────┐   ┌──────────────────┐
//! │   Normalizer │──▶│ Window Filter │─┬▶│ Dimension Mapper │─┐
//! └──────┬───────┘   └───────────────┘ │ └──────────────────┘ │
//!        │                             │ ┌──────────────────┐ │
//!        ▼                             └▶│ Overlap Resolver │─┤
//!  DiagnosticSink                        └──────────────────┘ │
//!  (dropped items)                                            ▼
//!                                                   per-item layout output
//! ```
//!
//! Rendering, styling, and interaction handling live outside this module:
//! the presentation layer consumes the per-item `{offset, length, cutoff}`
//! geometry and `{lane, intersections, with}` assignments and turns them
//! into pixels. The engine is stateless between calls and side-effect-free
//! apart from the injected diagnostic sink.
//!
//! # Usage
//!
//! ```
//! use chrono::NaiveDate;
//! use timegrid::{layout_with_tracing, Item, TimetableParams, Track};
//!
//! let params = TimetableParams::new()
//!     .on_date(NaiveDate::from_ymd_opt(2026, 6, 12).unwrap())
//!     .with_starting_hour(8.0)
//!     .with_number_of_hours(12.0)
//!     .with_track(
//!         Track::new(1, "Mainstage")
//!             .with_item(Item::new("e1", "Main Event", "2026-06-12T08:00:00", "2026-06-12T12:00:00")),
//!     );
//!
//! let result = layout_with_tracing(&params);
//! assert_eq!(result.items.len(), 1);
//! assert_eq!(result.items[0].dimensions.offset_minutes, 0);
//! ```

pub mod dimensions;
pub mod engine;
pub mod instant;
pub mod lanes;
pub mod normalize;
pub mod types;
pub mod window;

pub use dimensions::{item_dimensions, ItemDimensions};
pub use engine::{
    layout, layout_with_tracing, HourMark, PositionedItem, TimetableLayout, TimetableParams,
};
pub use instant::{parse_instant, InstantValue};
pub use lanes::{resolve_lanes, LaneRecord};
pub use normalize::{normalize_items, DiagnosticSink, NormalizedItem, RecordingSink, TracingSink};
pub use types::{Id, Item, StyleHints, Track, Variant, ViewWindow};
pub use window::items_in_window;
