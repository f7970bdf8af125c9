//! In-memory reference host.
//!
//! Implements every host trait the controller consumes, entirely in memory
//! and on one thread. Integration tests and the `breakpoint-gutter-sim`
//! binary drive the controller through it.

mod editor;
mod listeners;
pub mod scenario;
mod store;

pub use editor::{LINE_HEIGHT, LINE_NUMBER_GUTTER, SimEditor, SimGutter, SimMarker};
pub use listeners::Listeners;
pub use scenario::{Scenario, ScenarioError, ScenarioReport, Step};
pub use store::{ActionKind, ActionRecord, DispatchMode, SimActions, SimBreakpointStore};
