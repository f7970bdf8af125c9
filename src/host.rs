//! Interfaces of the collaborators the gutter controller drives.
//!
//! The controller never owns breakpoints, buffers or gutters. It talks to the
//! hosting editor through these object-safe traits, shared as `Rc<dyn ...>`
//! since everything runs on the UI thread.

use crate::subscription::Subscription;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Zero-based buffer row.
pub type Row = u32;

/// Host-assigned identity of a buffer marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkerId(pub u64);

impl std::fmt::Display for MarkerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "marker#{}", self.0)
    }
}

/// A breakpoint as reported by the store. Identity is `(path, row)`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Breakpoint {
    pub path: PathBuf,
    pub row: Row,
}

/// Options passed to the host when anchoring a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerOptions {
    /// When set, edits that merely narrow the marker's span never invalidate it.
    pub never_invalidate_on_shrink: bool,
}

impl Default for MarkerOptions {
    fn default() -> Self {
        Self {
            never_invalidate_on_shrink: true,
        }
    }
}

/// Payload of a marker change notification fired after an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerChange {
    /// Row before the edit.
    pub old_row: Row,
    /// Row after the edit.
    pub new_row: Row,
    /// False once the text spanned by the marker has been deleted.
    pub is_valid: bool,
}

/// Position of a pointer event in the editor's coordinate space (pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

/// What the pointer did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Move,
    Leave,
    Click,
}

/// Which part of a gutter line the pointer hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerTarget {
    /// The ordinary breakpoint-setting area.
    #[default]
    Gutter,
    /// The reserved inline-icon hit-region; clicks here belong to another affordance.
    InlineIcon,
}

/// A pointer event delivered by a gutter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub position: PointerPosition,
    pub target: PointerTarget,
}

impl PointerEvent {
    pub fn moved(position: PointerPosition) -> Self {
        Self {
            kind: PointerKind::Move,
            position,
            target: PointerTarget::Gutter,
        }
    }

    pub fn left() -> Self {
        Self {
            kind: PointerKind::Leave,
            position: PointerPosition::default(),
            target: PointerTarget::Gutter,
        }
    }

    pub fn clicked(position: PointerPosition, target: PointerTarget) -> Self {
        Self {
            kind: PointerKind::Click,
            position,
            target,
        }
    }
}

/// Parameters for creating a gutter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GutterSpec {
    pub name: String,
    pub visible: bool,
    pub priority: i32,
}

/// Externally owned breakpoint store. Read-only from the controller's side.
pub trait BreakpointStore {
    /// Breakpoints set for `path`, ordered by row.
    fn breakpoints_for_path(&self, path: &Path) -> Vec<Breakpoint>;

    /// Rows holding a breakpoint for `path`, as an owned set the caller may consume.
    fn breakpoint_lines_for_path(&self, path: &Path) -> BTreeSet<Row> {
        self.breakpoints_for_path(path)
            .into_iter()
            .map(|bp| bp.row)
            .collect()
    }

    /// Register `callback` to run whenever the breakpoints of `path` change.
    fn on_change(&self, path: &Path, callback: Box<dyn FnMut()>) -> Subscription;
}

/// Fire-and-forget breakpoint mutations. Results are only observable through
/// a later store change notification.
pub trait BreakpointActions {
    fn add_breakpoint(&self, path: &Path, row: Row);
    fn delete_breakpoint(&self, path: &Path, row: Row);
    fn toggle_breakpoint(&self, path: &Path, row: Row);
}

/// A position-tracking marker inside a buffer.
pub trait BufferMarker {
    fn id(&self) -> MarkerId;

    /// Current row, after any edits applied so far.
    fn row(&self) -> Row;

    fn is_valid(&self) -> bool;

    /// Register `callback` to run whenever an edit moves or invalidates the marker.
    fn on_did_change(&self, callback: Box<dyn FnMut(MarkerChange)>) -> Subscription;

    fn destroy(&self);
}

/// A vertical decoration region alongside the buffer lines.
pub trait Gutter {
    fn name(&self) -> &str;

    fn priority(&self) -> i32;

    /// Render `class` on the gutter line the marker currently sits on.
    fn decorate_marker(&self, marker: &dyn BufferMarker, class: &str);

    fn show(&self);

    fn hide(&self);

    fn is_visible(&self) -> bool;

    fn destroy(&self);

    fn on_did_destroy(&self, callback: Box<dyn FnMut()>) -> Subscription;

    fn on_pointer_event(&self, callback: Box<dyn FnMut(PointerEvent)>) -> Subscription;
}

/// The editor hosting one open buffer.
pub trait TextEditor {
    /// Path of the buffer, or `None` for an unsaved buffer.
    fn path(&self) -> Option<PathBuf>;

    fn mark_row(&self, row: Row, column: u32, options: MarkerOptions) -> Rc<dyn BufferMarker>;

    /// Map a pointer position to a buffer row.
    fn row_for_pointer(&self, position: PointerPosition) -> Option<Row>;

    fn add_gutter(&self, spec: GutterSpec) -> Rc<dyn Gutter>;

    /// Every gutter currently attached to the editor, including the line-number gutter.
    fn gutters(&self) -> Vec<Rc<dyn Gutter>>;

    fn on_did_destroy(&self, callback: Box<dyn FnMut()>) -> Subscription;
}
