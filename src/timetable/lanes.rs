//! Overlap resolution: stacking temporally-overlapping items into visual
//! lanes with a single forward pass.
//!
//! This is deliberately a heuristic, not an interval-graph coloring. Each
//! item is laid out using only the records of items already processed, and
//! later items never move earlier ones. That keeps the pass cheap and the
//! placement deterministic at the cost of not guaranteeing a minimal lane
//! count for pathological overlap graphs. The scan order and the early
//! termination rule below are part of the observable contract: changing
//! them changes where items land on screen.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::timetable::normalize::NormalizedItem;

/// Lane assignment for one item, plus the bookkeeping the pass accumulates.
///
/// `index` and the entries of `with` are positions within the time-sorted
/// input slice the resolver was given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LaneRecord {
    /// Item start, epoch milliseconds (unclipped by the window).
    pub start: i64,
    /// Item end, epoch milliseconds (unclipped by the window).
    pub end: i64,
    /// Count of direct predecessors-in-conflict at the time this record was
    /// produced; later items may bump it further.
    pub intersections: u32,
    /// Assigned lane.
    pub offset: i32,
    /// Position in the time-sorted input.
    pub index: usize,
    /// Indices of the predecessors this item conflicts with.
    pub with: Vec<usize>,
}

/// Half-open containment: `instant` within `[start, end)`.
fn contains(start: i64, end: i64, instant: i64) -> bool {
    instant >= start && instant < end
}

/// Assign a lane to every item of a time-sorted slice.
///
/// Per item, in order:
///
/// 1. Collect the set `D` of earlier records whose interval contains the
///    item's start or end (half-open test).
/// 2. Walk `D` in production order. A predecessor already shifted to a
///    positive lane pulls the item one lane back and ends the walk
///    immediately. A predecessor with no known conflicts is marked as
///    conflicting and the walk continues. Otherwise the predecessor's own
///    conflict partners are re-tested against the item, bumping its
///    `intersections` once per hit, so chains of mutually-overlapping items
///    accumulate lane pressure instead of collapsing to two lanes.
/// 3. The item's lane is `|D|` plus the (zero or negative) pull from step 2.
pub fn resolve_lanes(items: &[NormalizedItem]) -> Vec<LaneRecord> {
    let mut records: Vec<LaneRecord> = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        let start = item.start.timestamp_millis();
        let end = item.end.timestamp_millis();

        let conflicts: Vec<usize> = records
            .iter()
            .enumerate()
            .filter(|(_, r)| contains(r.start, r.end, start) || contains(r.start, r.end, end))
            .map(|(j, _)| j)
            .collect();

        let mut local_offset: i32 = 0;
        for &j in &conflicts {
            if records[j].offset > 0 {
                local_offset -= 1;
                break;
            }

            if records[j].intersections == 0 {
                records[j].intersections = 1;
                continue;
            }

            let partners = records[j].with.clone();
            let mut bumps = 0;
            for &k in &partners {
                let partner = &records[k];
                if contains(partner.start, partner.end, start)
                    || contains(partner.start, partner.end, end)
                {
                    bumps += 1;
                }
            }
            records[j].intersections += bumps;
        }

        records.push(LaneRecord {
            start,
            end,
            intersections: conflicts.len() as u32,
            offset: conflicts.len() as i32 + local_offset,
            index,
            with: conflicts,
        });
    }

    records
}

// ============================================================================
// Tests
// ============================================================================
