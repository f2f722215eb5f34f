//! Dimension mapping: converting an item's absolute start/end instants into
//! a minute offset and length along the visible window.

use chrono::{Duration, NaiveTime};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::timetable::normalize::NormalizedItem;
use crate::timetable::types::{hours_to_duration, ViewWindow};

/// An item's position and size along the window, in minutes from the
/// window's anchor instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ItemDimensions {
    /// Minutes between the window anchor and the item's (clipped) start.
    pub offset_minutes: i64,
    /// Visible length in minutes, clamped to the window's right edge.
    ///
    /// A reversed interval (`end < start`) is not corrected and yields a
    /// negative length. Accepted boundary condition.
    pub length_minutes: i64,
    /// The item's real start precedes the window and was clipped to its
    /// left edge.
    pub cutoff_start: bool,
    /// The item's real end exceeds the window and was clipped to its right
    /// edge.
    pub cutoff_end: bool,
}

/// Map an item onto the window.
///
/// The anchor (`day_start`) is the item's own start-day midnight plus the
/// starting hour, shifted back by the whole-day difference between the
/// item's start and the selected date. This lands on the selected day for
/// same-day items and pulls items starting on an adjacent day back onto the
/// window's day, which is what makes windows that cross midnight work.
///
/// All arithmetic is whole-minute instant subtraction; nothing is rounded
/// beyond that.
pub fn item_dimensions(item: &NormalizedItem, window: &ViewWindow) -> ItemDimensions {
    let selected_midnight = window
        .selected_date
        .and_time(NaiveTime::MIN)
        .and_utc();

    // Whole 24h periods, truncated toward zero.
    let diff_days = (item.start - selected_midnight).num_days();

    let day_start = item.start.date_naive().and_time(NaiveTime::MIN).and_utc()
        + hours_to_duration(window.starting_hour)
        - Duration::days(diff_days);

    let effective_start = item.start.max(day_start);
    let offset_minutes = (effective_start - day_start).num_minutes();

    let duration_minutes = (item.end - effective_start).num_minutes();
    let length_minutes = duration_minutes.min(window.total_minutes() - offset_minutes);

    ItemDimensions {
        offset_minutes,
        length_minutes,
        cutoff_start: item.start < day_start,
        cutoff_end: item.end > day_start + hours_to_duration(window.number_of_hours),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timetable::normalize::{normalize_items, RecordingSink};
    use crate::timetable::types::Item;
    use chrono::NaiveDate;

    fn window(starting_hour: f64, number_of_hours: f64) -> ViewWindow {
        ViewWindow::new(NaiveDate::from_ymd_opt(2026, 6, 12).unwrap())
            .with_starting_hour(starting_hour)
            .with_number_of_hours(number_of_hours)
    }

    fn one(start: &str, end: &str) -> NormalizedItem {
        normalize_items(
            &[],
            &[Item::new("x", "X", start, end)],
            &RecordingSink::new(),
        )
        .remove(0)
    }

    #[test]
    fn test_item_inside_window() {
        let dims = item_dimensions(&one("2026-06-12T09:00", "2026-06-12T10:30"), &window(8.0, 4.0));
        assert_eq!(dims.offset_minutes, 60);
        assert_eq!(dims.length_minutes, 90);
        assert!(!dims.cutoff_start);
        assert!(!dims.cutoff_end);
    }

    #[test]
    fn test_early_start_clips_to_left_edge() {
        let dims = item_dimensions(&one("2026-06-12T06:00", "2026-06-12T10:00"), &window(8.0, 4.0));
        assert_eq!(dims.offset_minutes, 0);
        assert_eq!(dims.length_minutes, 120);
        assert!(dims.cutoff_start);
        assert!(!dims.cutoff_end);
    }

    #[test]
    fn test_late_end_clamps_to_right_edge() {
        let dims = item_dimensions(&one("2026-06-12T10:00", "2026-06-12T14:00"), &window(8.0, 4.0));
        assert_eq!(dims.offset_minutes, 120);
        assert_eq!(dims.length_minutes, 120);
        assert!(!dims.cutoff_start);
        assert!(dims.cutoff_end);
    }

    #[test]
    fn test_next_day_item_anchors_to_selected_day() {
        // Window 20:00 -> 06:00 next day; item starts after midnight.
        let dims = item_dimensions(
            &one("2026-06-13T01:00", "2026-06-13T03:00"),
            &window(20.0, 10.0),
        );
        assert_eq!(dims.offset_minutes, 300);
        assert_eq!(dims.length_minutes, 120);
        assert!(!dims.cutoff_start);
        assert!(!dims.cutoff_end);
    }

    #[test]
    fn test_previous_day_item_anchors_forward() {
        // Item begins the evening before the selected day.
        let dims = item_dimensions(
            &one("2026-06-11T22:00", "2026-06-12T02:00"),
            &window(20.0, 10.0),
        );
        assert_eq!(dims.offset_minutes, 120);
        assert_eq!(dims.length_minutes, 240);
        assert!(!dims.cutoff_start);
        assert!(!dims.cutoff_end);
    }

    #[test]
    fn test_reversed_interval_yields_negative_length() {
        let dims = item_dimensions(&one("2026-06-12T10:00", "2026-06-12T09:00"), &window(8.0, 4.0));
        assert_eq!(dims.offset_minutes, 120);
        assert_eq!(dims.length_minutes, -60);
    }

    #[test]
    fn test_minute_granularity() {
        let dims = item_dimensions(
            &one("2026-06-12T08:10:30", "2026-06-12T08:40:30"),
            &window(8.0, 4.0),
        );
        assert_eq!(dims.offset_minutes, 10);
        assert_eq!(dims.length_minutes, 30);
    }
}
