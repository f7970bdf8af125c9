//! Shared integration test helpers for breakpoint-gutter.
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::Harness;
//! ```
//!
//! The `#![allow(dead_code)]` attribute suppresses warnings when only a subset
//! of helpers are used per file.

#![allow(dead_code)]

use breakpoint_gutter::config::GutterConfig;
use breakpoint_gutter::sim::{
    ActionKind, ActionRecord, DispatchMode, SimActions, SimBreakpointStore, SimEditor, SimGutter,
};
use breakpoint_gutter::{
    BreakpointGutter, Collaborators, OneShot, PointerEvent, PointerTarget, Row,
};
use std::cell::Cell;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::rc::Rc;

pub const PATH: &str = "/src/main.rs";
pub const LINES: Row = 40;

/// A controller wired to an in-memory editor, store and dispatcher.
pub struct Harness {
    pub editor: Rc<SimEditor>,
    pub store: Rc<SimBreakpointStore>,
    pub actions: Rc<SimActions>,
    pub controller: BreakpointGutter,
    pub notified: Rc<Cell<u32>>,
}

impl Harness {
    /// Saved buffer at [`PATH`] with `rows` already set in the store.
    pub fn new(rows: &[Row]) -> Self {
        Self::build(
            Some(PathBuf::from(PATH)),
            rows,
            DispatchMode::Immediate,
            GutterConfig::default(),
        )
    }

    /// Like [`Harness::new`], but actions wait for [`SimActions::flush`].
    pub fn deferred(rows: &[Row]) -> Self {
        Self::build(
            Some(PathBuf::from(PATH)),
            rows,
            DispatchMode::Deferred,
            GutterConfig::default(),
        )
    }

    pub fn with_config(rows: &[Row], config: GutterConfig) -> Self {
        Self::build(Some(PathBuf::from(PATH)), rows, DispatchMode::Immediate, config)
    }

    /// Unsaved buffer; the store still holds `rows` for [`PATH`].
    pub fn without_path(rows: &[Row]) -> Self {
        Self::build(None, rows, DispatchMode::Immediate, GutterConfig::default())
    }

    pub fn build(
        path: Option<PathBuf>,
        rows: &[Row],
        mode: DispatchMode,
        config: GutterConfig,
    ) -> Self {
        let editor = SimEditor::new(path, LINES);
        let store = SimBreakpointStore::new();
        store.set_rows(Path::new(PATH), rows.iter().copied());
        let actions = SimActions::new(Rc::clone(&store), mode);

        let notified = Rc::new(Cell::new(0));
        let counter = Rc::clone(&notified);
        let controller = BreakpointGutter::new(
            Collaborators {
                editor: editor.clone(),
                store: store.clone(),
                actions: actions.clone(),
            },
            config,
            OneShot::new(move || counter.set(counter.get() + 1)),
        );

        Self {
            editor,
            store,
            actions,
            controller,
            notified,
        }
    }

    pub fn path(&self) -> &Path {
        Path::new(PATH)
    }

    /// The breakpoint gutter, while the host still has it.
    pub fn gutter(&self) -> Rc<SimGutter> {
        self.editor
            .gutter_named(&self.controller.config().gutter_name)
            .expect("breakpoint gutter should be attached")
    }

    pub fn line_numbers(&self) -> Rc<SimGutter> {
        self.editor
            .line_number_gutter()
            .expect("line-number gutter should be attached")
    }

    /// Rows decorated as committed breakpoints on the gutter.
    pub fn decorated(&self) -> BTreeSet<Row> {
        let class = self.controller.config().breakpoint_class.clone();
        self.gutter().decorated_rows(&class)
    }

    /// Rows decorated as hover previews on the gutter.
    pub fn previews(&self) -> BTreeSet<Row> {
        let class = self.controller.config().shadow_class.clone();
        self.gutter().decorated_rows(&class)
    }

    pub fn hover(&mut self, row: Row) {
        self.gutter()
            .emit_pointer(PointerEvent::moved(self.editor.position_of_row(row)));
        self.controller.process_pending_events();
    }

    pub fn leave(&mut self) {
        self.gutter().emit_pointer(PointerEvent::left());
        self.controller.process_pending_events();
    }

    pub fn click(&mut self, row: Row) {
        self.gutter().emit_pointer(PointerEvent::clicked(
            self.editor.position_of_row(row),
            PointerTarget::Gutter,
        ));
        self.controller.process_pending_events();
    }

    pub fn click_icon(&mut self, row: Row) {
        self.gutter().emit_pointer(PointerEvent::clicked(
            self.editor.position_of_row(row),
            PointerTarget::InlineIcon,
        ));
        self.controller.process_pending_events();
    }

    pub fn click_line_number(&mut self, row: Row) {
        self.line_numbers().emit_pointer(PointerEvent::clicked(
            self.editor.position_of_row(row),
            PointerTarget::Gutter,
        ));
        self.controller.process_pending_events();
    }

    pub fn insert_lines(&mut self, at: Row, count: Row) {
        self.editor.insert_lines(at, count);
        self.controller.process_pending_events();
    }

    pub fn delete_lines(&mut self, start: Row, end: Row) {
        self.editor.delete_lines(start, end);
        self.controller.process_pending_events();
    }

    /// Apply deferred actions and let the controller react to them.
    pub fn flush(&mut self) -> usize {
        let applied = self.actions.flush();
        self.controller.process_pending_events();
        applied
    }

    pub fn store_rows(&self) -> BTreeSet<Row> {
        self.store.rows(Path::new(PATH))
    }
}

pub fn rows(rows: &[Row]) -> BTreeSet<Row> {
    rows.iter().copied().collect()
}

pub fn add(row: Row) -> ActionRecord {
    ActionRecord::new(ActionKind::Add, PATH, row)
}

pub fn delete(row: Row) -> ActionRecord {
    ActionRecord::new(ActionKind::Delete, PATH, row)
}

pub fn toggle(row: Row) -> ActionRecord {
    ActionRecord::new(ActionKind::Toggle, PATH, row)
}
