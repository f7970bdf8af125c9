//! In-memory breakpoint store and action dispatcher.

use super::listeners::Listeners;
use crate::host::{Breakpoint, BreakpointActions, BreakpointStore, Row};
use crate::subscription::Subscription;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Process-wide breakpoint set, keyed by path.
#[derive(Default)]
pub struct SimBreakpointStore {
    breakpoints: RefCell<BTreeMap<PathBuf, BTreeSet<Row>>>,
    listeners: RefCell<HashMap<PathBuf, Listeners<()>>>,
}

impl SimBreakpointStore {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Add a breakpoint. Notifies listeners of `path` if it was not set yet.
    pub fn add(&self, path: &Path, row: Row) -> bool {
        let added = self
            .breakpoints
            .borrow_mut()
            .entry(path.to_path_buf())
            .or_default()
            .insert(row);
        if added {
            self.notify(path);
        }
        added
    }

    /// Remove a breakpoint. Notifies listeners of `path` if it was set.
    pub fn remove(&self, path: &Path, row: Row) -> bool {
        let removed = self
            .breakpoints
            .borrow_mut()
            .get_mut(path)
            .is_some_and(|rows| rows.remove(&row));
        if removed {
            self.notify(path);
        }
        removed
    }

    /// Flip a breakpoint. Returns whether it is now set.
    pub fn toggle(&self, path: &Path, row: Row) -> bool {
        if self.remove(path, row) {
            false
        } else {
            self.add(path, row)
        }
    }

    /// Replace every breakpoint of `path` and notify once.
    pub fn set_rows(&self, path: &Path, rows: impl IntoIterator<Item = Row>) {
        self.breakpoints
            .borrow_mut()
            .insert(path.to_path_buf(), rows.into_iter().collect());
        self.notify(path);
    }

    pub fn rows(&self, path: &Path) -> BTreeSet<Row> {
        self.breakpoints
            .borrow()
            .get(path)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of change callbacks registered for `path`.
    pub fn listener_count(&self, path: &Path) -> usize {
        self.listeners
            .borrow()
            .get(path)
            .map_or(0, Listeners::len)
    }

    fn notify(&self, path: &Path) {
        let listeners = self.listeners.borrow().get(path).cloned();
        if let Some(listeners) = listeners {
            listeners.emit(());
        }
    }
}

impl BreakpointStore for SimBreakpointStore {
    fn breakpoints_for_path(&self, path: &Path) -> Vec<Breakpoint> {
        self.rows(path)
            .into_iter()
            .map(|row| Breakpoint {
                path: path.to_path_buf(),
                row,
            })
            .collect()
    }

    fn on_change(&self, path: &Path, callback: Box<dyn FnMut()>) -> Subscription {
        let listeners = self
            .listeners
            .borrow_mut()
            .entry(path.to_path_buf())
            .or_default()
            .clone();
        listeners.subscribe_unit(callback)
    }
}

/// Kind of a dispatched breakpoint action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Add,
    Delete,
    Toggle,
}

/// One action as received by [`SimActions`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRecord {
    pub kind: ActionKind,
    pub path: PathBuf,
    pub row: Row,
}

impl ActionRecord {
    pub fn new(kind: ActionKind, path: impl Into<PathBuf>, row: Row) -> Self {
        Self {
            kind,
            path: path.into(),
            row,
        }
    }
}

impl fmt::Display for ActionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self.kind {
            ActionKind::Add => "add",
            ActionKind::Delete => "delete",
            ActionKind::Toggle => "toggle",
        };
        write!(f, "{}({}, {})", verb, self.path.display(), self.row)
    }
}

/// When dispatched actions reach the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchMode {
    /// Applied during the dispatch call, so store notifications fire synchronously.
    #[default]
    Immediate,
    /// Queued until [`SimActions::flush`].
    Deferred,
}

/// Action dispatcher that records every action and applies it to a store.
pub struct SimActions {
    store: Rc<SimBreakpointStore>,
    mode: Cell<DispatchMode>,
    pending: RefCell<VecDeque<ActionRecord>>,
    log: RefCell<Vec<ActionRecord>>,
}

impl SimActions {
    pub fn new(store: Rc<SimBreakpointStore>, mode: DispatchMode) -> Rc<Self> {
        Rc::new(Self {
            store,
            mode: Cell::new(mode),
            pending: RefCell::new(VecDeque::new()),
            log: RefCell::new(Vec::new()),
        })
    }

    pub fn set_mode(&self, mode: DispatchMode) {
        self.mode.set(mode);
    }

    /// Apply every queued action in dispatch order. Returns how many were applied.
    pub fn flush(&self) -> usize {
        let mut applied = 0;
        loop {
            let next = self.pending.borrow_mut().pop_front();
            let Some(action) = next else {
                break;
            };
            self.apply(&action);
            applied += 1;
        }
        applied
    }

    /// Every action received so far.
    pub fn log(&self) -> Vec<ActionRecord> {
        self.log.borrow().clone()
    }

    pub fn clear_log(&self) {
        self.log.borrow_mut().clear();
    }

    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }

    fn record(&self, action: ActionRecord) {
        self.log.borrow_mut().push(action.clone());
        match self.mode.get() {
            DispatchMode::Immediate => self.apply(&action),
            DispatchMode::Deferred => self.pending.borrow_mut().push_back(action),
        }
    }

    fn apply(&self, action: &ActionRecord) {
        match action.kind {
            ActionKind::Add => {
                self.store.add(&action.path, action.row);
            }
            ActionKind::Delete => {
                self.store.remove(&action.path, action.row);
            }
            ActionKind::Toggle => {
                self.store.toggle(&action.path, action.row);
            }
        }
    }
}

impl BreakpointActions for SimActions {
    fn add_breakpoint(&self, path: &Path, row: Row) {
        self.record(ActionRecord::new(ActionKind::Add, path, row));
    }

    fn delete_breakpoint(&self, path: &Path, row: Row) {
        self.record(ActionRecord::new(ActionKind::Delete, path, row));
    }

    fn toggle_breakpoint(&self, path: &Path, row: Row) {
        self.record(ActionRecord::new(ActionKind::Toggle, path, row));
    }
}
