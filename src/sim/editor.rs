//! In-memory editor, marker and gutter.
//!
//! The buffer is modelled as a line count: edits insert or delete whole lines
//! and move markers the way an anchor-tracking buffer would.

use super::listeners::Listeners;
use crate::host::{
    BufferMarker, Gutter, GutterSpec, MarkerChange, MarkerId, MarkerOptions, PointerEvent,
    PointerPosition, Row, TextEditor,
};
use crate::subscription::Subscription;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::rc::{Rc, Weak};

/// Default height of one buffer line in pixels.
pub const LINE_HEIGHT: f64 = 20.0;

/// Name and priority of the built-in line-number gutter.
pub const LINE_NUMBER_GUTTER: &str = "line-number";
const LINE_NUMBER_PRIORITY: i32 = 0;

struct EditorState {
    path: Option<PathBuf>,
    line_count: Row,
    next_marker: u64,
    markers: BTreeMap<MarkerId, Rc<SimMarker>>,
    gutters: Vec<Rc<SimGutter>>,
    destroyed: bool,
    markers_created: u64,
}

/// A single-buffer editor living entirely in memory.
pub struct SimEditor {
    state: Rc<RefCell<EditorState>>,
    destroy_listeners: Listeners<()>,
}

impl SimEditor {
    /// Editor with `line_count` lines and the built-in line-number gutter.
    pub fn new(path: Option<PathBuf>, line_count: Row) -> Rc<Self> {
        let state = Rc::new(RefCell::new(EditorState {
            path,
            line_count: line_count.max(1),
            next_marker: 1,
            markers: BTreeMap::new(),
            gutters: Vec::new(),
            destroyed: false,
            markers_created: 0,
        }));
        let line_numbers = SimGutter::new(
            GutterSpec {
                name: LINE_NUMBER_GUTTER.to_string(),
                visible: true,
                priority: LINE_NUMBER_PRIORITY,
            },
            Rc::downgrade(&state),
        );
        state.borrow_mut().gutters.push(line_numbers);

        Rc::new(Self {
            state,
            destroy_listeners: Listeners::new(),
        })
    }

    pub fn line_count(&self) -> Row {
        self.state.borrow().line_count
    }

    pub fn set_path(&self, path: Option<PathBuf>) {
        self.state.borrow_mut().path = path;
    }

    /// Pointer position over the middle of `row`.
    pub fn position_of_row(&self, row: Row) -> PointerPosition {
        PointerPosition {
            x: 4.0,
            y: f64::from(row) * LINE_HEIGHT + LINE_HEIGHT / 2.0,
        }
    }

    /// Gutter with the given name, if it is still attached.
    pub fn gutter_named(&self, name: &str) -> Option<Rc<SimGutter>> {
        self.state
            .borrow()
            .gutters
            .iter()
            .find(|g| g.name == name)
            .cloned()
    }

    pub fn line_number_gutter(&self) -> Option<Rc<SimGutter>> {
        self.gutter_named(LINE_NUMBER_GUTTER)
    }

    /// Live marker with the given id.
    pub fn marker(&self, id: MarkerId) -> Option<Rc<SimMarker>> {
        self.state.borrow().markers.get(&id).cloned()
    }

    /// Number of markers that exist in the buffer right now.
    pub fn live_marker_count(&self) -> usize {
        self.state.borrow().markers.len()
    }

    /// Markers created over the editor's lifetime.
    pub fn markers_created(&self) -> u64 {
        self.state.borrow().markers_created
    }

    pub fn is_destroyed(&self) -> bool {
        self.state.borrow().destroyed
    }

    /// Insert `count` lines before `at`. Markers on or below `at` shift down.
    pub fn insert_lines(&self, at: Row, count: Row) {
        if count == 0 {
            return;
        }
        let changes: Vec<(Rc<SimMarker>, MarkerChange)> = {
            let mut state = self.state.borrow_mut();
            state.line_count += count;
            state
                .markers
                .values()
                .filter(|marker| marker.row.get() >= at)
                .map(|marker| {
                    let old_row = marker.row.get();
                    let change = MarkerChange {
                        old_row,
                        new_row: old_row + count,
                        is_valid: marker.valid.get(),
                    };
                    (Rc::clone(marker), change)
                })
                .collect()
        };
        apply_changes(changes);
    }

    /// Delete lines `start..end`. Markers inside the range are invalidated and
    /// collapse onto `start`; markers below shift up.
    pub fn delete_lines(&self, start: Row, end: Row) {
        if end <= start {
            return;
        }
        let removed = end - start;
        let changes: Vec<(Rc<SimMarker>, MarkerChange)> = {
            let mut state = self.state.borrow_mut();
            state.line_count = state.line_count.saturating_sub(removed).max(1);
            state
                .markers
                .values()
                .filter(|marker| marker.row.get() >= start)
                .map(|marker| {
                    let old_row = marker.row.get();
                    let change = if old_row < end {
                        MarkerChange {
                            old_row,
                            new_row: start,
                            is_valid: false,
                        }
                    } else {
                        MarkerChange {
                            old_row,
                            new_row: old_row - removed,
                            is_valid: marker.valid.get(),
                        }
                    };
                    (Rc::clone(marker), change)
                })
                .collect()
        };
        apply_changes(changes);
    }

    /// Destroy every gutter, then the editor itself.
    pub fn destroy(&self) {
        let gutters = {
            let mut state = self.state.borrow_mut();
            if state.destroyed {
                return;
            }
            state.destroyed = true;
            state.gutters.clone()
        };
        for gutter in gutters {
            gutter.destroy();
        }
        self.destroy_listeners.emit(());
    }
}

fn apply_changes(changes: Vec<(Rc<SimMarker>, MarkerChange)>) {
    for (marker, change) in changes {
        marker.row.set(change.new_row);
        marker.valid.set(change.is_valid);
        marker.changes.emit(change);
    }
}

impl TextEditor for SimEditor {
    fn path(&self) -> Option<PathBuf> {
        self.state.borrow().path.clone()
    }

    fn mark_row(&self, row: Row, _column: u32, options: MarkerOptions) -> Rc<dyn BufferMarker> {
        let mut state = self.state.borrow_mut();
        let id = MarkerId(state.next_marker);
        state.next_marker += 1;
        state.markers_created += 1;

        let marker = Rc::new(SimMarker {
            id,
            row: Cell::new(row),
            valid: Cell::new(true),
            destroyed: Cell::new(false),
            options,
            changes: Listeners::new(),
            editor: Rc::downgrade(&self.state),
        });
        state.markers.insert(id, Rc::clone(&marker));
        marker
    }

    fn row_for_pointer(&self, position: PointerPosition) -> Option<Row> {
        if position.y < 0.0 {
            return None;
        }
        let row = (position.y / LINE_HEIGHT).floor() as Row;
        (row < self.line_count()).then_some(row)
    }

    fn add_gutter(&self, spec: GutterSpec) -> Rc<dyn Gutter> {
        let gutter = SimGutter::new(spec, Rc::downgrade(&self.state));
        let mut state = self.state.borrow_mut();
        state.gutters.push(Rc::clone(&gutter));
        state.gutters.sort_by_key(|g| g.priority);
        gutter
    }

    fn gutters(&self) -> Vec<Rc<dyn Gutter>> {
        self.state
            .borrow()
            .gutters
            .iter()
            .map(|g| Rc::clone(g) as Rc<dyn Gutter>)
            .collect()
    }

    fn on_did_destroy(&self, callback: Box<dyn FnMut()>) -> Subscription {
        self.destroy_listeners.subscribe_unit(callback)
    }
}

/// Marker anchored to a row of a [`SimEditor`].
pub struct SimMarker {
    id: MarkerId,
    row: Cell<Row>,
    valid: Cell<bool>,
    destroyed: Cell<bool>,
    options: MarkerOptions,
    changes: Listeners<MarkerChange>,
    editor: Weak<RefCell<EditorState>>,
}

impl SimMarker {
    pub fn is_destroyed(&self) -> bool {
        self.destroyed.get()
    }

    pub fn options(&self) -> MarkerOptions {
        self.options
    }

    /// Number of change callbacks still registered.
    pub fn change_listener_count(&self) -> usize {
        self.changes.len()
    }
}

impl BufferMarker for SimMarker {
    fn id(&self) -> MarkerId {
        self.id
    }

    fn row(&self) -> Row {
        self.row.get()
    }

    fn is_valid(&self) -> bool {
        self.valid.get() && !self.destroyed.get()
    }

    fn on_did_change(&self, callback: Box<dyn FnMut(MarkerChange)>) -> Subscription {
        self.changes.subscribe(callback)
    }

    fn destroy(&self) {
        if self.destroyed.replace(true) {
            return;
        }
        if let Some(editor) = self.editor.upgrade() {
            editor.borrow_mut().markers.remove(&self.id);
        }
    }
}

/// Gutter attached to a [`SimEditor`]. Records decorations so tests can see
/// what would be rendered.
pub struct SimGutter {
    name: String,
    priority: i32,
    visible: Cell<bool>,
    destroyed: Cell<bool>,
    decorations: RefCell<Vec<(MarkerId, String)>>,
    pointer_listeners: Listeners<PointerEvent>,
    destroy_listeners: Listeners<()>,
    editor: Weak<RefCell<EditorState>>,
}

impl SimGutter {
    fn new(spec: GutterSpec, editor: Weak<RefCell<EditorState>>) -> Rc<Self> {
        Rc::new(Self {
            name: spec.name,
            priority: spec.priority,
            visible: Cell::new(spec.visible),
            destroyed: Cell::new(false),
            decorations: RefCell::new(Vec::new()),
            pointer_listeners: Listeners::new(),
            destroy_listeners: Listeners::new(),
            editor,
        })
    }

    /// Deliver a pointer event to every registered handler.
    pub fn emit_pointer(&self, event: PointerEvent) {
        if !self.destroyed.get() {
            self.pointer_listeners.emit(event);
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.get()
    }

    /// Rows of live markers decorated with `class`.
    pub fn decorated_rows(&self, class: &str) -> BTreeSet<Row> {
        let Some(editor) = self.editor.upgrade() else {
            return BTreeSet::new();
        };
        let editor = editor.borrow();
        self.decorations
            .borrow()
            .iter()
            .filter(|(_, decoration)| decoration == class)
            .filter_map(|(id, _)| editor.markers.get(id))
            .map(|marker| marker.row.get())
            .collect()
    }

    /// Decorations ever attached, including those of destroyed markers.
    pub fn decoration_count(&self) -> usize {
        self.decorations.borrow().len()
    }

    pub fn pointer_listener_count(&self) -> usize {
        self.pointer_listeners.len()
    }

    pub fn destroy_listener_count(&self) -> usize {
        self.destroy_listeners.len()
    }
}

impl Gutter for SimGutter {
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn decorate_marker(&self, marker: &dyn BufferMarker, class: &str) {
        self.decorations
            .borrow_mut()
            .push((marker.id(), class.to_string()));
    }

    fn show(&self) {
        if !self.destroyed.get() {
            self.visible.set(true);
        }
    }

    fn hide(&self) {
        self.visible.set(false);
    }

    fn is_visible(&self) -> bool {
        self.visible.get()
    }

    fn destroy(&self) {
        if self.destroyed.replace(true) {
            return;
        }
        self.visible.set(false);
        if let Some(editor) = self.editor.upgrade() {
            editor
                .borrow_mut()
                .gutters
                .retain(|g| !std::ptr::eq(g.as_ref(), self));
        }
        self.destroy_listeners.emit(());
    }

    fn on_did_destroy(&self, callback: Box<dyn FnMut()>) -> Subscription {
        self.destroy_listeners.subscribe_unit(callback)
    }

    fn on_pointer_event(&self, callback: Box<dyn FnMut(PointerEvent)>) -> Subscription {
        self.pointer_listeners.subscribe(callback)
    }
}
