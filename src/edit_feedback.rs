//! Turning edit-driven marker changes back into store mutations.
//!
//! When an edit moves a committed marker, the breakpoint it shows has moved
//! too, and the store must learn about it. Shadow markers never get here:
//! only committed markers forward their change events.

use crate::anchors::AnchorRegistry;
use crate::host::{MarkerChange, MarkerId, Row};
use crate::request::BreakpointRequest;

/// Requests implied by one change of a marker the store knows at `known_row`.
///
/// - invalidated: delete the breakpoint at its last known row;
/// - moved: delete at the last known row, then add at the new row. These stay
///   two separate requests, delete first, and are never merged into a move.
pub fn requests_for_change(known_row: Row, change: MarkerChange) -> Vec<BreakpointRequest> {
    if !change.is_valid {
        vec![BreakpointRequest::Delete(known_row)]
    } else if known_row != change.new_row {
        vec![
            BreakpointRequest::Delete(known_row),
            BreakpointRequest::Add(change.new_row),
        ]
    } else {
        Vec::new()
    }
}

/// Reorder the requests of one batch of marker changes so every delete runs
/// before any add.
///
/// Relative order within deletes and within adds is kept, so each change
/// still sees its own delete before its own add, and a marker moving onto
/// the row another marker just left keeps its breakpoint.
pub fn deletes_first(requests: Vec<BreakpointRequest>) -> Vec<BreakpointRequest> {
    let (mut ordered, adds): (Vec<_>, Vec<_>) = requests
        .into_iter()
        .partition(|request| !matches!(request, BreakpointRequest::Add(_)));
    ordered.extend(adds);
    ordered
}

/// Handle a change event of committed marker `marker`.
///
/// A marker that moved or died is retired in the registry so the next
/// reconciliation replaces it instead of reusing it. A retired marker keeps
/// reporting further moves until it is destroyed. Events from unknown,
/// destroyed or invalidated markers yield nothing.
pub fn handle_marker_change(
    anchors: &mut AnchorRegistry,
    marker: MarkerId,
    change: MarkerChange,
) -> Vec<BreakpointRequest> {
    if change.is_valid && change.old_row == change.new_row {
        return Vec::new();
    }
    let Some(known_row) = anchors.retire(marker, change) else {
        log::trace!("Ignoring change of invalidated or unknown {}", marker);
        return Vec::new();
    };
    log::debug!(
        "Edit changed {} (row {} -> {}, valid: {})",
        marker,
        change.old_row,
        change.new_row,
        change.is_valid
    );
    requests_for_change(known_row, change)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(old_row: Row, new_row: Row, is_valid: bool) -> MarkerChange {
        MarkerChange {
            old_row,
            new_row,
            is_valid,
        }
    }

    #[test]
    fn test_move_is_delete_then_add() {
        assert_eq!(
            requests_for_change(3, change(3, 5, true)),
            vec![BreakpointRequest::Delete(3), BreakpointRequest::Add(5)]
        );
    }

    #[test]
    fn test_invalidated_deletes_known_row_only() {
        assert_eq!(
            requests_for_change(4, change(4, 2, false)),
            vec![BreakpointRequest::Delete(4)]
        );
    }

    #[test]
    fn test_same_row_change_is_ignored() {
        assert!(requests_for_change(6, change(6, 6, true)).is_empty());
    }

    #[test]
    fn test_second_move_reports_from_last_known_row() {
        assert_eq!(
            requests_for_change(4, change(4, 5, true)),
            vec![BreakpointRequest::Delete(4), BreakpointRequest::Add(5)]
        );
    }

    #[test]
    fn test_deletes_first_keeps_relative_order() {
        let batch = vec![
            BreakpointRequest::Delete(3),
            BreakpointRequest::Add(4),
            BreakpointRequest::Delete(4),
            BreakpointRequest::Add(5),
        ];
        assert_eq!(
            deletes_first(batch),
            vec![
                BreakpointRequest::Delete(3),
                BreakpointRequest::Delete(4),
                BreakpointRequest::Add(4),
                BreakpointRequest::Add(5),
            ]
        );
    }

    #[test]
    fn test_unknown_marker_yields_nothing() {
        let mut anchors = AnchorRegistry::new();
        assert!(handle_marker_change(&mut anchors, MarkerId(99), change(1, 2, true)).is_empty());
    }
}
