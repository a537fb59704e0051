//! Frontier snapshots taken at every expansion, for replaying a search step by step.
use grid_util::Point;
use std::collections::BinaryHeap;

use crate::state::FrontierEntry;

/// Order in which the remaining frontier entries of a [Snapshot] are listed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TraceOrder {
    /// The order in which the entries would be popped, so the first listed entry is the next
    /// one the search takes.
    #[default]
    PopOrder,
    /// The internal array layout of the binary heap. Only the heap property holds.
    HeapLayout,
}

/// The point expanded at one step together with everything still open right after its pop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub popped: Point,
    pub frontier: Vec<FrontierEntry>,
}

impl Snapshot {
    pub fn frontier_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.frontier.iter().map(|e| e.point)
    }
}

/// Chronological list of snapshots, one per expansion.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Trace {
    snapshots: Vec<Snapshot>,
}

impl Trace {
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
    pub fn iter(&self) -> std::slice::Iter<'_, Snapshot> {
        self.snapshots.iter()
    }
    /// The expanded points in expansion order.
    pub fn expansion_order(&self) -> Vec<Point> {
        self.snapshots.iter().map(|s| s.popped).collect()
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a Snapshot;
    type IntoIter = std::slice::Iter<'a, Snapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.snapshots.iter()
    }
}

#[derive(Clone, Debug, Default)]
pub struct TraceRecorder {
    order: TraceOrder,
    snapshots: Vec<Snapshot>,
}

impl TraceRecorder {
    pub fn new(order: TraceOrder) -> TraceRecorder {
        TraceRecorder {
            order,
            snapshots: Vec::new(),
        }
    }

    /// Appends one snapshot. The frontier is only read; pop order is computed on a copy.
    pub fn record(&mut self, popped: Point, frontier: &BinaryHeap<FrontierEntry>) {
        let frontier = match self.order {
            TraceOrder::PopOrder => {
                // Ascending order of the heap's Ord is the reverse of pop order.
                let mut sorted = frontier.clone().into_sorted_vec();
                sorted.reverse();
                sorted
            }
            TraceOrder::HeapLayout => frontier.iter().copied().collect(),
        };
        self.snapshots.push(Snapshot { popped, frontier });
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn finish(self) -> Trace {
        Trace {
            snapshots: self.snapshots,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord;

    fn heap() -> BinaryHeap<FrontierEntry> {
        [(3, 0, 1), (1, 2, 2), (2, 1, 1), (1, 0, 4)]
            .into_iter()
            .map(|(priority, row, col)| FrontierEntry {
                priority,
                point: coord(row, col),
            })
            .collect()
    }

    #[test]
    fn pop_order_lists_next_pop_first() {
        let frontier = heap();
        let mut recorder = TraceRecorder::new(TraceOrder::PopOrder);
        recorder.record(coord(5, 5), &frontier);
        let trace = recorder.finish();
        let snapshot = &trace.snapshots()[0];
        assert_eq!(snapshot.popped, coord(5, 5));
        assert_eq!(
            snapshot.frontier_points().collect::<Vec<_>>(),
            vec![coord(0, 4), coord(2, 2), coord(1, 1), coord(0, 1)]
        );
        // The observed heap is untouched.
        assert_eq!(frontier.len(), 4);
        assert_eq!(frontier.peek().map(|e| e.point), Some(coord(0, 4)));
    }

    #[test]
    fn heap_layout_keeps_heap_property() {
        let frontier = heap();
        let mut recorder = TraceRecorder::new(TraceOrder::HeapLayout);
        recorder.record(coord(0, 0), &frontier);
        let trace = recorder.finish();
        let entries = &trace.snapshots()[0].frontier;
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].point, coord(0, 4));
        for (i, e) in entries.iter().enumerate().skip(1) {
            assert!(entries[(i - 1) / 2] >= *e);
        }
    }

    #[test]
    fn records_are_chronological() {
        let mut recorder = TraceRecorder::default();
        assert!(recorder.is_empty());
        let empty = BinaryHeap::new();
        for col in 0..3 {
            recorder.record(coord(0, col), &empty);
        }
        assert_eq!(recorder.len(), 3);
        let trace = recorder.finish();
        assert_eq!(
            trace.expansion_order(),
            vec![coord(0, 0), coord(0, 1), coord(0, 2)]
        );
        assert!(trace.iter().all(|s| s.frontier.is_empty()));
    }
}
