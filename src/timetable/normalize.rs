//! Item normalization: flattening track-owned and standalone items into one
//! validated, track-tagged collection.
//!
//! Normalization is the only stage with a side effect: items whose start or
//! end fails to parse are dropped and reported to an injected
//! [`DiagnosticSink`]. Rendering proceeds with the remaining items.

use std::sync::Mutex;

use chrono::{DateTime, Utc};

use crate::error::{InstantError, InstantField};
use crate::timetable::types::{Id, Item, Track};

/// An item after normalization: track-tagged, with both boundaries parsed.
///
/// Downstream stages reuse the parsed instants instead of re-parsing the
/// item's textual boundaries.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedItem {
    /// The item, with `track_id` resolved.
    pub item: Item,
    /// Parsed start instant.
    pub start: DateTime<Utc>,
    /// Parsed end instant.
    pub end: DateTime<Utc>,
}

// ============================================================================
// Diagnostic sink
// ============================================================================

/// One-way reporting channel for items dropped during normalization.
///
/// Injected rather than global so the engine stays a pure function of its
/// inputs. Sinks take `&self` and may be shared across concurrent layout
/// passes.
pub trait DiagnosticSink {
    /// Called once per dropped item. No acknowledgment is expected;
    /// normalization continues regardless.
    fn item_dropped(&self, item: &Item, error: &InstantError);
}

/// Default sink: logs each dropped item at warn level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn item_dropped(&self, item: &Item, error: &InstantError) {
        tracing::warn!(item_id = %item.id, %error, "Dropping item with unparseable instant");
    }
}

/// Sink that records drops for later inspection. Useful in tests and for
/// callers that surface diagnostics in their own UI.
#[derive(Debug, Default)]
pub struct RecordingSink {
    dropped: Mutex<Vec<(Id, InstantError)>>,
}

impl RecordingSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// The drops recorded so far, in report order.
    pub fn dropped(&self) -> Vec<(Id, InstantError)> {
        self.dropped.lock().expect("sink lock poisoned").clone()
    }
}

impl DiagnosticSink for RecordingSink {
    fn item_dropped(&self, item: &Item, error: &InstantError) {
        self.dropped
            .lock()
            .expect("sink lock poisoned")
            .push((item.id.clone(), error.clone()));
    }
}

// ============================================================================
// Normalization
// ============================================================================

/// Flatten track-owned and standalone items into one validated collection.
///
/// Output order: all items of the first track (in their original order),
/// then the second track, and so on, followed by the standalone items.
/// Track ownership always wins for `track_id`; standalone items keep their
/// own. Items with an unparseable boundary are excluded and reported.
pub fn normalize_items(
    tracks: &[Track],
    standalone: &[Item],
    sink: &dyn DiagnosticSink,
) -> Vec<NormalizedItem> {
    let mut normalized = Vec::new();

    for track in tracks {
        for item in &track.items {
            match parse_bounds(item) {
                Ok((start, end)) => {
                    let mut item = item.clone();
                    item.track_id = Some(track.id.clone());
                    normalized.push(NormalizedItem { item, start, end });
                }
                Err(error) => sink.item_dropped(item, &error),
            }
        }
    }

    for item in standalone {
        match parse_bounds(item) {
            Ok((start, end)) => normalized.push(NormalizedItem {
                item: item.clone(),
                start,
                end,
            }),
            Err(error) => sink.item_dropped(item, &error),
        }
    }

    normalized
}

fn parse_bounds(item: &Item) -> Result<(DateTime<Utc>, DateTime<Utc>), InstantError> {
    let start = item.start.resolve_field(InstantField::Start)?;
    let end = item.end.resolve_field(InstantField::End)?;
    Ok((start, end))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, start: &str, end: &str) -> Item {
        Item::new(id, id.to_uppercase(), start, end)
    }

    #[test]
    fn test_track_items_are_tagged_and_ordered() {
        let tracks = vec![
            Track::new(1, "Mainstage")
                .with_item(item("a1", "2026-06-12T08:00", "2026-06-12T09:00"))
                .with_item(item("a2", "2026-06-12T09:00", "2026-06-12T10:00")),
            Track::new(2, "Playground"),
            Track::new(3, "Tent")
                .with_item(item("b1", "2026-06-12T08:30", "2026-06-12T09:30")),
        ];

        let sink = RecordingSink::new();
        let normalized = normalize_items(&tracks, &[], &sink);

        let ids: Vec<String> = normalized.iter().map(|n| n.item.id.to_string()).collect();
        assert_eq!(ids, vec!["a1", "a2", "b1"]);
        assert_eq!(normalized[0].item.track_id, Some(Id::Int(1)));
        assert_eq!(normalized[1].item.track_id, Some(Id::Int(1)));
        assert_eq!(normalized[2].item.track_id, Some(Id::Int(3)));
        assert!(sink.dropped().is_empty());
    }

    #[test]
    fn test_track_ownership_overwrites_track_id() {
        let stray = item("a1", "2026-06-12T08:00", "2026-06-12T09:00").with_track(99);
        let tracks = vec![Track::new(1, "Mainstage").with_item(stray)];

        let normalized = normalize_items(&tracks, &[], &RecordingSink::new());
        assert_eq!(normalized[0].item.track_id, Some(Id::Int(1)));
    }

    #[test]
    fn test_standalone_items_keep_their_track_id() {
        let standalone = vec![
            item("s1", "2026-06-12T10:00", "2026-06-12T11:00").with_track(2),
            item("s2", "2026-06-12T10:00", "2026-06-12T11:00"),
        ];

        let normalized = normalize_items(&[], &standalone, &RecordingSink::new());
        assert_eq!(normalized[0].item.track_id, Some(Id::Int(2)));
        assert_eq!(normalized[1].item.track_id, None);
    }

    #[test]
    fn test_unparseable_items_are_dropped_and_reported() {
        let tracks = vec![Track::new(1, "Mainstage")
            .with_item(item("ok", "2026-06-12T08:00", "2026-06-12T09:00"))
            .with_item(item("bad", "not-a-date", "2026-06-12T09:00"))];
        let standalone = vec![item("worse", "2026-06-12T08:00", "also-not-a-date")];

        let sink = RecordingSink::new();
        let normalized = normalize_items(&tracks, &standalone, &sink);

        assert_eq!(normalized.len(), 1);
        assert_eq!(normalized[0].item.id, Id::Text("ok".into()));

        let dropped = sink.dropped();
        assert_eq!(dropped.len(), 2);
        assert_eq!(dropped[0].0, Id::Text("bad".into()));
        assert_eq!(
            dropped[0].1,
            InstantError::Unparseable {
                field: InstantField::Start,
                value: "not-a-date".to_string(),
            }
        );
        assert_eq!(dropped[1].0, Id::Text("worse".into()));
    }
}
