// Library exports for the breakpoint gutter controller
//
// # Threading
//
// Everything here runs on the host's UI thread. Host handles are shared as
// `Rc<dyn ...>` and host callbacks only queue events on the controller's
// channel; the controller is the single place that mutates gutter state.

//! Breakpoint gutter controller.
//!
//! Keeps the breakpoints of one open file visible as edit-tracking markers in
//! a gutter next to the line numbers, previews the hovered row, turns gutter
//! clicks into toggle requests and reports edit-driven marker moves back to
//! the breakpoint store.
//!
//! - [`controller::BreakpointGutter`]: lifecycle, wiring and event handling
//! - [`mod@reconcile`]: pure diff of desired rows against live markers
//! - [`anchors`]: committed marker registry
//! - [`gesture`]: hover/click state machine and shadow marker
//! - [`edit_feedback`]: marker change to store mutation policy
//! - [`host`]: traits the hosting editor implements
//! - [`sim`]: in-memory host used by tests and the simulator binary

/// Crate version, logged by the simulator at startup.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod anchors;
pub mod cli;
pub use breakpoint_gutter_config as config;
pub mod controller;
pub mod debug;
pub mod edit_feedback;
pub mod event;
pub mod gesture;
pub mod host;
pub mod oneshot;
pub mod reconcile;
pub mod request;
pub mod resource;
pub mod sim;
pub mod subscription;

pub use controller::{BreakpointGutter, Collaborators, PassSummary};
pub use event::{GutterEvent, GutterSurface};
pub use host::{
    Breakpoint, BreakpointActions, BreakpointStore, BufferMarker, Gutter, GutterSpec,
    MarkerChange, MarkerId, MarkerOptions, PointerEvent, PointerKind, PointerPosition,
    PointerTarget, Row, TextEditor,
};
pub use oneshot::OneShot;
pub use reconcile::{ReconcilePlan, reconcile};
pub use request::BreakpointRequest;
pub use resource::Resource;
pub use subscription::{Subscription, SubscriptionSet};
