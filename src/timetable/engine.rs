//! The layout pipeline: normalize, filter, then map dimensions and resolve
//! lanes for everything visible.
//!
//! Every call builds the layout fresh from its inputs. Nothing is cached
//! between invocations and the only side effect is the diagnostic sink, so
//! identical inputs always produce identical layouts and concurrent calls
//! need no synchronization.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::timetable::dimensions::{item_dimensions, ItemDimensions};
use crate::timetable::lanes::{resolve_lanes, LaneRecord};
use crate::timetable::normalize::{normalize_items, DiagnosticSink, NormalizedItem, TracingSink};
use crate::timetable::types::{
    Id, Item, Track, Variant, ViewWindow, DEFAULT_NUMBER_OF_HOURS, DEFAULT_STARTING_HOUR,
};
use crate::timetable::window::items_in_window;

// ============================================================================
// Parameters
// ============================================================================

/// Caller-supplied inputs for one layout pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TimetableParams {
    /// Tracks, each optionally owning items.
    #[serde(default)]
    pub tracks: Vec<Track>,
    /// Standalone items, appended after the track-owned ones.
    #[serde(default)]
    pub items: Vec<Item>,
    /// Layout orientation, echoed into the output for the presentation
    /// layer.
    #[serde(default)]
    pub variant: Variant,
    /// Hour-of-day at which the window opens.
    #[serde(default = "default_starting_hour")]
    pub starting_hour: f64,
    /// Window length in hours.
    #[serde(default = "default_number_of_hours")]
    pub number_of_hours: f64,
    /// Selectable days, in display order.
    #[serde(default)]
    pub dates: Vec<NaiveDate>,
    /// The day to lay out. Falls back to the first entry of `dates`;
    /// without either, the layout is empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_date: Option<NaiveDate>,
}

fn default_starting_hour() -> f64 {
    DEFAULT_STARTING_HOUR
}

fn default_number_of_hours() -> f64 {
    DEFAULT_NUMBER_OF_HOURS
}

impl Default for TimetableParams {
    fn default() -> Self {
        Self {
            tracks: Vec::new(),
            items: Vec::new(),
            variant: Variant::default(),
            starting_hour: DEFAULT_STARTING_HOUR,
            number_of_hours: DEFAULT_NUMBER_OF_HOURS,
            dates: Vec::new(),
            selected_date: None,
        }
    }
}

impl TimetableParams {
    /// Create empty parameters with the default full-day window.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a track.
    pub fn with_track(mut self, track: Track) -> Self {
        self.tracks.push(track);
        self
    }

    /// Add multiple tracks.
    pub fn with_tracks(mut self, tracks: impl IntoIterator<Item = Track>) -> Self {
        self.tracks.extend(tracks);
        self
    }

    /// Add a standalone item.
    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    /// Add multiple standalone items.
    pub fn with_items(mut self, items: impl IntoIterator<Item = Item>) -> Self {
        self.items.extend(items);
        self
    }

    /// Set the orientation.
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
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

    /// Set the selectable days.
    pub fn with_dates(mut self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.dates.extend(dates);
        self
    }

    /// Select a day explicitly.
    pub fn on_date(mut self, date: NaiveDate) -> Self {
        self.selected_date = Some(date);
        self
    }

    /// The day this pass lays out, if any.
    pub fn resolve_selected_date(&self) -> Option<NaiveDate> {
        self.selected_date.or_else(|| self.dates.first().copied())
    }

    /// The view window for this pass, if a day is selected.
    pub fn view_window(&self) -> Option<ViewWindow> {
        self.resolve_selected_date().map(|date| ViewWindow {
            selected_date: date,
            starting_hour: self.starting_hour,
            number_of_hours: self.number_of_hours,
        })
    }
}

// ============================================================================
// Output
// ============================================================================

/// One mark on the hour axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct HourMark {
    /// Hour of day, wrapped modulo 24 for windows crossing midnight.
    pub hour: u32,
    /// Zero-padded display label, e.g. `"08:00"`.
    pub display: String,
}

/// A visible item joined with both per-item outputs: its window geometry
/// and its lane assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PositionedItem {
    /// The item, track-tagged.
    pub item: Item,
    /// Minute geometry along the window.
    pub dimensions: ItemDimensions,
    /// Assigned lane within the item's track.
    pub lane: i32,
    /// Direct conflicts known when the item was laid out.
    pub intersections: u32,
    /// Positions of conflicting predecessors within the same track's
    /// time-sorted run.
    pub with: Vec<usize>,
}

/// The result of one layout pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TimetableLayout {
    /// Orientation, forwarded from the parameters.
    pub variant: Variant,
    /// The day that was laid out, if any.
    pub selected_date: Option<NaiveDate>,
    /// Selectable days, forwarded from the parameters.
    pub dates: Vec<NaiveDate>,
    /// Hour axis for the window.
    pub hours: Vec<HourMark>,
    /// Visible items in ascending start order, each with geometry and lane.
    pub items: Vec<PositionedItem>,
}

// ============================================================================
// Pipeline
// ============================================================================

/// Run the full pipeline with the default tracing sink.
pub fn layout_with_tracing(params: &TimetableParams) -> TimetableLayout {
    layout(params, &TracingSink)
}

/// Run the full pipeline: normalize, filter to the window, then compute
/// dimensions and lanes for every visible item.
///
/// Lanes are resolved independently per track (standalone items with no
/// track form their own group), so items on different tracks never push
/// each other sideways. Output items keep the window filter's global time
/// order.
pub fn layout(params: &TimetableParams, sink: &dyn DiagnosticSink) -> TimetableLayout {
    let normalized = normalize_items(&params.tracks, &params.items, sink);
    let window = params.view_window();
    let visible = items_in_window(&normalized, window.as_ref());

    let items = match &window {
        Some(window) => {
            let records = resolve_lanes_per_track(&visible);
            visible
                .iter()
                .zip(records)
                .map(|(n, record)| PositionedItem {
                    dimensions: item_dimensions(n, window),
                    lane: record.offset,
                    intersections: record.intersections,
                    with: record.with,
                    item: n.item.clone(),
                })
                .collect()
        }
        None => Vec::new(),
    };

    TimetableLayout {
        variant: params.variant,
        selected_date: params.resolve_selected_date(),
        dates: params.dates.clone(),
        hours: hour_marks(params.starting_hour, params.number_of_hours),
        items,
    }
}

/// Resolve lanes track by track, preserving the global item order.
///
/// `index`/`with` in the returned records are positions within the item's
/// own track run, matching what the presentation layer stacks against.
fn resolve_lanes_per_track(visible: &[NormalizedItem]) -> Vec<LaneRecord> {
    let mut groups: Vec<(Option<Id>, Vec<usize>)> = Vec::new();
    for (pos, n) in visible.iter().enumerate() {
        match groups.iter_mut().find(|(key, _)| *key == n.item.track_id) {
            Some((_, members)) => members.push(pos),
            None => groups.push((n.item.track_id.clone(), vec![pos])),
        }
    }

    let mut records: Vec<Option<LaneRecord>> = vec![None; visible.len()];
    for (_, members) in &groups {
        let run: Vec<NormalizedItem> = members.iter().map(|&pos| visible[pos].clone()).collect();
        for (record, &pos) in resolve_lanes(&run).into_iter().zip(members) {
            records[pos] = Some(record);
        }
    }

    records.into_iter().flatten().collect()
}

/// Build the hour axis: one mark per window hour, wrapping past midnight.
fn hour_marks(starting_hour: f64, number_of_hours: f64) -> Vec<HourMark> {
    let first = starting_hour.floor() as i64;
    let count = number_of_hours.ceil().max(0.0) as i64;

    (0..count)
        .map(|i| {
            let hour = ((first + i) % 24 + 24) % 24;
            HourMark {
                hour: hour as u32,
                display: format!("{hour:02}:00"),
            }
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
