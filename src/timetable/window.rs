//! Window filtering: selecting and time-sorting the items visible in the
//! current view window.

use crate::timetable::normalize::NormalizedItem;
use crate::timetable::types::ViewWindow;

/// Select the items visible in the window, sorted ascending by start.
///
/// An item is visible when its start or its end falls within
/// `[window start, window end]` (both bounds inclusive). This admits items
/// that run into the window from the left and items that run out of it to
/// the right, but not items that span the entire window with both bounds
/// outside it. Known boundary limitation, kept deliberately.
///
/// With no window (no selected date) the result is empty. Items with equal
/// starts keep their input order; the sort is stable with no secondary key.
pub fn items_in_window(
    items: &[NormalizedItem],
    window: Option<&ViewWindow>,
) -> Vec<NormalizedItem> {
    let Some(window) = window else {
        return Vec::new();
    };

    let start = window.start();
    let end = window.end();

    let mut visible: Vec<NormalizedItem> = items
        .iter()
        .filter(|n| {
            (n.start >= start && n.start <= end) || (n.end >= start && n.end <= end)
        })
        .cloned()
        .collect();

    visible.sort_by_key(|n| n.start);
    visible
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

    fn window() -> ViewWindow {
        ViewWindow::new(NaiveDate::from_ymd_opt(2026, 6, 12).unwrap())
            .with_starting_hour(8.0)
            .with_number_of_hours(4.0)
    }

    fn normalized(items: Vec<Item>) -> Vec<NormalizedItem> {
        normalize_items(&[], &items, &RecordingSink::new())
    }

    #[test]
    fn test_inclusion_rules() {
        let items = normalized(vec![
            // Ends inside the window.
            Item::new("early", "A", "2026-06-12T07:00", "2026-06-12T10:30"),
            // Starts inside, ends after.
            Item::new("late", "B", "2026-06-12T11:00", "2026-06-12T14:00"),
            // Entirely inside.
            Item::new("inside", "C", "2026-06-12T09:00", "2026-06-12T10:00"),
            // Entirely after.
            Item::new("after", "D", "2026-06-12T12:30", "2026-06-12T13:00"),
            // Entirely before.
            Item::new("before", "E", "2026-06-12T05:00", "2026-06-12T06:00"),
        ]);

        let visible = items_in_window(&items, Some(&window()));
        let ids: Vec<String> = visible.iter().map(|n| n.item.id.to_string()).collect();
        assert_eq!(ids, vec!["early", "inside", "late"]);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let items = normalized(vec![
            Item::new("at-start", "A", "2026-06-12T06:00", "2026-06-12T08:00"),
            Item::new("at-end", "B", "2026-06-12T12:00", "2026-06-12T13:00"),
        ]);

        let visible = items_in_window(&items, Some(&window()));
        assert_eq!(visible.len(), 2);
    }

    #[test]
    fn test_spanning_item_is_excluded() {
        // Both bounds outside the window: the documented limitation.
        let items = normalized(vec![Item::new(
            "span",
            "A",
            "2026-06-12T06:00",
            "2026-06-12T14:00",
        )]);

        let visible = items_in_window(&items, Some(&window()));
        assert!(visible.is_empty());
    }

    #[test]
    fn test_no_window_yields_empty() {
        let items = normalized(vec![Item::new(
            "a",
            "A",
            "2026-06-12T09:00",
            "2026-06-12T10:00",
        )]);

        assert!(items_in_window(&items, None).is_empty());
    }

    #[test]
    fn test_sorted_by_start_with_stable_ties() {
        let items = normalized(vec![
            Item::new("b", "B", "2026-06-12T10:00", "2026-06-12T11:00"),
            Item::new("a1", "A1", "2026-06-12T09:00", "2026-06-12T10:00"),
            Item::new("a2", "A2", "2026-06-12T09:00", "2026-06-12T09:30"),
        ]);

        let visible = items_in_window(&items, Some(&window()));
        let ids: Vec<String> = visible.iter().map(|n| n.item.id.to_string()).collect();
        // a1 parsed first and keeps its position ahead of a2 on the tie.
        assert_eq!(ids, vec!["a1", "a2", "b"]);
    }
}
