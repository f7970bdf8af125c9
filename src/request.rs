//! Breakpoint mutations the controller asks the action dispatcher for.

use crate::host::{BreakpointActions, Row};
use std::path::Path;

/// A single fire-and-forget request against the breakpoint store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakpointRequest {
    Add(Row),
    Delete(Row),
    Toggle(Row),
}

impl BreakpointRequest {
    /// Hand the request to the dispatcher for `path`.
    pub fn dispatch(self, actions: &dyn BreakpointActions, path: &Path) {
        log::debug!("Dispatching {:?} for {:?}", self, path);
        match self {
            BreakpointRequest::Add(row) => actions.add_breakpoint(path, row),
            BreakpointRequest::Delete(row) => actions.delete_breakpoint(path, row),
            BreakpointRequest::Toggle(row) => actions.toggle_breakpoint(path, row),
        }
    }
}
