//! Diffing desired breakpoint rows against live markers.
//!
//! [`reconcile`] is pure: it only decides which markers survive, which rows
//! need a new marker and which markers must go. Applying the plan (creating
//! and destroying host markers) is the anchor registry's job.

use crate::host::Row;
use std::collections::BTreeSet;

/// Outcome of one reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcilePlan<M> {
    /// Markers whose live row is still a breakpoint, with that row.
    pub kept: Vec<(Row, M)>,
    /// Breakpoint rows that have no marker yet, ascending.
    pub created: Vec<Row>,
    /// Markers whose row is no longer wanted, or whose row duplicates a kept marker.
    pub destroyed: Vec<M>,
}

impl<M> ReconcilePlan<M> {
    /// True when applying the plan creates and destroys nothing.
    pub fn is_noop(&self) -> bool {
        self.created.is_empty() && self.destroyed.is_empty()
    }
}

/// Match `desired` rows to `current` markers, keyed by each marker's live row.
///
/// The desired rows start out unhandled. A marker whose row is still
/// unhandled is kept and claims the row; any other marker is destroyed, which
/// also covers two markers that edits collapsed onto the same row. Rows left
/// unhandled get new markers. Runs in O(|current| + |desired|) set operations.
pub fn reconcile<M>(
    desired: impl IntoIterator<Item = Row>,
    current: impl IntoIterator<Item = (Row, M)>,
) -> ReconcilePlan<M> {
    let mut unhandled: BTreeSet<Row> = desired.into_iter().collect();
    let mut kept = Vec::new();
    let mut destroyed = Vec::new();

    for (row, marker) in current {
        if unhandled.remove(&row) {
            kept.push((row, marker));
        } else {
            destroyed.push(marker);
        }
    }

    ReconcilePlan {
        kept,
        created: unhandled.into_iter().collect(),
        destroyed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_to_rows_creates_all() {
        let plan = reconcile::<u64>([9, 2, 5], []);
        assert!(plan.kept.is_empty());
        assert_eq!(plan.created, vec![2, 5, 9]);
        assert!(plan.destroyed.is_empty());
    }

    #[test]
    fn test_rows_to_empty_destroys_all() {
        let plan = reconcile([], [(2, 'a'), (5, 'b')]);
        assert!(plan.kept.is_empty());
        assert!(plan.created.is_empty());
        assert_eq!(plan.destroyed, vec!['a', 'b']);
    }

    #[test]
    fn test_existing_rows_keep_their_marker() {
        let plan = reconcile([2, 9], [(2, 'a'), (5, 'b'), (9, 'c')]);
        assert_eq!(plan.kept, vec![(2, 'a'), (9, 'c')]);
        assert!(plan.created.is_empty());
        assert_eq!(plan.destroyed, vec!['b']);
    }

    #[test]
    fn test_mixed_keep_create_destroy() {
        let plan = reconcile([1, 3, 4], [(3, 'x'), (7, 'y')]);
        assert_eq!(plan.kept, vec![(3, 'x')]);
        assert_eq!(plan.created, vec![1, 4]);
        assert_eq!(plan.destroyed, vec!['y']);
    }

    #[test]
    fn test_collapsed_markers_keep_only_the_first() {
        // Two markers pushed onto the same row by a deletion.
        let plan = reconcile([4], [(4, 'a'), (4, 'b')]);
        assert_eq!(plan.kept, vec![(4, 'a')]);
        assert_eq!(plan.destroyed, vec!['b']);
        assert!(plan.created.is_empty());
    }

    #[test]
    fn test_second_pass_is_noop() {
        let first = reconcile([2, 5, 9], [(5, 10u64)]);
        let mut current = first.kept.clone();
        current.extend(first.created.iter().map(|&row| (row, u64::from(row) + 100)));

        let second = reconcile([2, 5, 9], current.clone());
        assert!(second.is_noop());
        assert_eq!(second.kept.len(), current.len());
    }

    #[test]
    fn test_kept_rows_plus_created_equal_desired() {
        let desired: BTreeSet<Row> = [0, 4, 8, 15, 16, 23].into_iter().collect();
        let plan = reconcile(desired.iter().copied(), [(4, 'a'), (5, 'b'), (23, 'c'), (42, 'd')]);

        let mut result: BTreeSet<Row> = plan.kept.iter().map(|(row, _)| *row).collect();
        result.extend(plan.created.iter().copied());
        assert_eq!(result, desired);
        assert_eq!(plan.destroyed, vec!['b', 'd']);
    }
}
