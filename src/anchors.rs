//! Registry of the committed breakpoint markers of one buffer.
//!
//! [`AnchorRegistry`] only creates and destroys markers. Deciding which rows
//! need a marker is left to [`crate::reconcile`].

use crate::event::{EventSender, GutterEvent};
use crate::host::{BufferMarker, Gutter, MarkerChange, MarkerId, MarkerOptions, Row, TextEditor};
use crate::resource::Resource;
use crate::subscription::Subscription;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

/// A committed marker and the bookkeeping attached to it.
struct Anchor {
    marker: Rc<dyn BufferMarker>,
    /// Row the marker was created on.
    committed_row: Row,
    /// Row the store was last told about. Follows every reported move until
    /// the marker is destroyed.
    reported_row: Row,
    /// Set once an edit moved or invalidated the marker. A stale anchor is
    /// never reused; the next pass destroys it.
    stale: bool,
    /// Set once the marker's text was deleted. Later changes report nothing.
    invalidated: bool,
    changes: Subscription,
}

/// Owns every committed marker of one controller, keyed by marker identity.
#[derive(Default)]
pub struct AnchorRegistry {
    anchors: BTreeMap<MarkerId, Anchor>,
    created_total: u64,
    destroyed_total: u64,
}

impl AnchorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Anchor a new marker at `row`, decorate it and forward its change events.
    ///
    /// # Panics
    /// Panics if `gutter` is destroyed. Callers check the gutter before a pass,
    /// so reaching this with a void gutter is a logic error.
    pub fn create(
        &mut self,
        editor: &dyn TextEditor,
        gutter: &Resource<Rc<dyn Gutter>>,
        row: Row,
        column: u32,
        class: &str,
        events: &EventSender,
    ) -> MarkerId {
        let marker = editor.mark_row(row, column, MarkerOptions::default());
        decorate(gutter, marker.as_ref(), class);

        let id = marker.id();
        let sender = events.clone();
        let changes = marker.on_did_change(Box::new(move |change| {
            sender.send(GutterEvent::MarkerChanged { marker: id, change });
        }));

        self.anchors.insert(
            id,
            Anchor {
                marker,
                committed_row: row,
                reported_row: row,
                stale: false,
                invalidated: false,
                changes,
            },
        );
        self.created_total += 1;
        log::trace!("Created {} at row {}", id, row);
        id
    }

    /// Destroy the marker `id`. Unknown ids are ignored.
    pub fn destroy(&mut self, id: MarkerId) -> bool {
        let Some(anchor) = self.anchors.remove(&id) else {
            return false;
        };
        // Unsubscribe first so destroying cannot feed a change event back to us.
        anchor.changes.release();
        anchor.marker.destroy();
        self.destroyed_total += 1;
        log::trace!("Destroyed {} (committed row {})", id, anchor.committed_row);
        true
    }

    /// Destroy every committed marker.
    pub fn destroy_all(&mut self) -> usize {
        let ids: Vec<MarkerId> = self.anchors.keys().copied().collect();
        ids.into_iter().filter(|&id| self.destroy(id)).count()
    }

    /// Record that an edit moved or invalidated `id` and retire it.
    ///
    /// Returns the row the store knew the marker by before this change, so
    /// the caller can report the change against it. A retired marker keeps
    /// reporting moves until it is destroyed. Returns `None` for unknown or
    /// destroyed markers and for markers already invalidated.
    pub fn retire(&mut self, id: MarkerId, change: MarkerChange) -> Option<Row> {
        let anchor = self.anchors.get_mut(&id)?;
        if anchor.invalidated {
            return None;
        }
        let known_row = anchor.reported_row;
        anchor.stale = true;
        if change.is_valid {
            anchor.reported_row = change.new_row;
        } else {
            anchor.invalidated = true;
        }
        Some(known_row)
    }

    /// Destroy every retired marker.
    pub fn destroy_stale(&mut self) -> usize {
        let stale: Vec<MarkerId> = self
            .anchors
            .iter()
            .filter(|(_, anchor)| anchor.stale)
            .map(|(&id, _)| id)
            .collect();
        stale.into_iter().filter(|&id| self.destroy(id)).count()
    }

    /// Live rows of the usable markers, as reconciliation input.
    pub fn live_markers(&self) -> Vec<(Row, MarkerId)> {
        self.anchors
            .iter()
            .filter(|(_, anchor)| !anchor.stale)
            .map(|(&id, anchor)| (anchor.marker.row(), id))
            .collect()
    }

    /// Rows currently covered by a usable marker.
    pub fn rows(&self) -> BTreeSet<Row> {
        self.live_markers().into_iter().map(|(row, _)| row).collect()
    }

    pub fn contains_row(&self, row: Row) -> bool {
        self.anchors
            .values()
            .any(|anchor| !anchor.stale && anchor.marker.row() == row)
    }

    /// Identity of the usable marker at `row`.
    pub fn marker_at(&self, row: Row) -> Option<MarkerId> {
        self.live_markers()
            .into_iter()
            .find(|&(marker_row, _)| marker_row == row)
            .map(|(_, id)| id)
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Markers created over the registry's lifetime.
    pub fn created_total(&self) -> u64 {
        self.created_total
    }

    /// Markers destroyed over the registry's lifetime.
    pub fn destroyed_total(&self) -> u64 {
        self.destroyed_total
    }
}

/// Attach `class` to `marker` on the breakpoint gutter.
///
/// # Panics
/// Panics if the gutter is destroyed; see [`AnchorRegistry::create`].
pub(crate) fn decorate(gutter: &Resource<Rc<dyn Gutter>>, marker: &dyn BufferMarker, class: &str) {
    match gutter.active() {
        Some(gutter) => gutter.decorate_marker(marker, class),
        None => panic!(
            "breakpoint gutter is destroyed while decorating {}; callers must check it first",
            marker.id()
        ),
    }
}
