//! Event channel between host callbacks and the gutter controller.
//!
//! Host callbacks never touch controller state. They push a [`GutterEvent`]
//! through an [`EventSender`] and the controller drains the matching
//! [`EventReceiver`] one event at a time. Events raised while an event is being
//! handled (a store change fired synchronously by a dispatched action, for
//! instance) simply queue up behind it, so no handler ever runs reentrantly.

use crate::host::{MarkerChange, MarkerId, PointerEvent};
use std::sync::mpsc::{Receiver, Sender, channel};

/// Gutter surface a pointer event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GutterSurface {
    /// The gutter created for breakpoint markers.
    Breakpoints,
    /// The host's line-number gutter.
    LineNumbers,
}

/// Everything the controller reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum GutterEvent {
    /// The store's breakpoint set for this buffer's path changed.
    StoreChanged,
    /// Pointer activity over one of the gutters.
    Pointer {
        surface: GutterSurface,
        event: PointerEvent,
    },
    /// An edit moved or invalidated a committed marker.
    MarkerChanged {
        marker: MarkerId,
        change: MarkerChange,
    },
    /// The breakpoint gutter was destroyed by the host.
    GutterDestroyed,
    /// The editor (and its buffer) was destroyed by the host.
    EditorDestroyed,
}

/// Cloneable producer side, captured by host callbacks.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: Sender<GutterEvent>,
}

impl EventSender {
    /// Queue an event. Events sent after the controller is gone are dropped.
    pub fn send(&self, event: GutterEvent) {
        if self.tx.send(event).is_err() {
            log::trace!("Gutter event dropped: controller no longer listening");
        }
    }
}

/// Consumer side, owned by the controller.
#[derive(Debug)]
pub struct EventReceiver {
    rx: Receiver<GutterEvent>,
}

impl EventReceiver {
    /// Next queued event, if any. Never blocks.
    pub fn try_next(&self) -> Option<GutterEvent> {
        self.rx.try_recv().ok()
    }
}

/// Create a connected sender/receiver pair.
pub fn event_channel() -> (EventSender, EventReceiver) {
    let (tx, rx) = channel();
    (EventSender { tx }, EventReceiver { rx })
}
