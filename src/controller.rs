//! Per-editor breakpoint gutter controller.
//!
//! [`BreakpointGutter`] owns the breakpoint gutter of one open editor. It
//! keeps one marker per breakpoint row of the buffer's path, previews the
//! hovered row with a shadow marker, turns gutter clicks into toggle requests
//! and feeds edit-driven marker moves back to the breakpoint store.
//!
//! # Event flow
//!
//! ```text
//! store change ─────┐
//! gutter pointer ───┤──→ EventSender ──→ channel ──→ process_pending_events()
//! marker change ────┤                                        │
//! gutter/editor end ┘                                        ▼
//!                                                      handle_event()
//!                                                            │
//!                          BreakpointActions ←── requests ───┘
//! ```
//!
//! The controller never mutates the store itself. Requests go to the action
//! dispatcher, and their effect comes back as a store change event, which
//! re-runs reconciliation.

use crate::anchors::AnchorRegistry;
use crate::edit_feedback;
use crate::event::{EventReceiver, EventSender, GutterEvent, GutterSurface, event_channel};
use crate::gesture::{GestureContext, GestureController};
use crate::host::{
    BreakpointActions, BreakpointStore, Gutter, GutterSpec, MarkerId, PointerEvent, Row,
    TextEditor,
};
use crate::oneshot::OneShot;
use crate::reconcile::reconcile;
use crate::request::BreakpointRequest;
use crate::resource::Resource;
use crate::subscription::SubscriptionSet;
use breakpoint_gutter_config::GutterConfig;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// External collaborators of one controller.
#[derive(Clone)]
pub struct Collaborators {
    pub editor: Rc<dyn TextEditor>,
    pub store: Rc<dyn BreakpointStore>,
    pub actions: Rc<dyn BreakpointActions>,
}

/// Counts from the most recent reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    pub kept: usize,
    pub created: usize,
    pub destroyed: usize,
}

/// Keeps the breakpoint gutter of one editor in sync with the breakpoint store.
pub struct BreakpointGutter {
    config: GutterConfig,
    editor: Resource<Rc<dyn TextEditor>>,
    gutter: Resource<Rc<dyn Gutter>>,
    store: Rc<dyn BreakpointStore>,
    actions: Rc<dyn BreakpointActions>,
    /// Buffer path captured at construction. The store subscription, every
    /// reconciliation and every request use this path.
    path: Option<PathBuf>,
    anchors: AnchorRegistry,
    gestures: GestureController,
    subscriptions: SubscriptionSet,
    sender: EventSender,
    receiver: EventReceiver,
    /// Tells the owner the editor is gone so it can drop this controller.
    editor_destroyed: OneShot,
    last_pass: Option<PassSummary>,
    disposed: bool,
}

impl BreakpointGutter {
    /// Create the breakpoint gutter, wire every subscription and run the first
    /// reconciliation pass.
    ///
    /// `editor_destroyed` fires at most once, when the host destroys the editor.
    pub fn new(
        collaborators: Collaborators,
        config: GutterConfig,
        editor_destroyed: OneShot,
    ) -> Self {
        let Collaborators {
            editor,
            store,
            actions,
        } = collaborators;
        let (sender, receiver) = event_channel();

        let gutter = editor.add_gutter(GutterSpec {
            name: config.gutter_name.clone(),
            visible: false,
            priority: config.priority,
        });

        let mut subscriptions = SubscriptionSet::new();
        subscriptions.add(gutter.on_did_destroy(forward(&sender, GutterEvent::GutterDestroyed)));
        subscriptions.add(editor.on_did_destroy(forward(&sender, GutterEvent::EditorDestroyed)));
        subscriptions.add(gutter.on_pointer_event(forward_pointer(
            &sender,
            GutterSurface::Breakpoints,
        )));

        if config.line_number_gutter_clicks {
            match editor
                .gutters()
                .into_iter()
                .find(|g| g.name() == config.line_number_gutter_name)
            {
                Some(line_numbers) => subscriptions.add(line_numbers.on_pointer_event(
                    forward_pointer(&sender, GutterSurface::LineNumbers),
                )),
                None => log::debug!(
                    "No '{}' gutter found; only the breakpoint gutter accepts clicks",
                    config.line_number_gutter_name
                ),
            }
        }

        let path = editor.path();
        match &path {
            Some(path) => {
                subscriptions.add(
                    store.on_change(path, forward(&sender, GutterEvent::StoreChanged)),
                );
                log::info!("Breakpoint gutter attached to {:?}", path);
            }
            None => log::warn!("Editor has no path; breakpoint store updates are not tracked"),
        }

        let mut controller = Self {
            config,
            editor: Resource::Active(editor),
            gutter: Resource::Active(gutter),
            store,
            actions,
            path,
            anchors: AnchorRegistry::new(),
            gestures: GestureController::new(),
            subscriptions,
            sender,
            receiver,
            editor_destroyed,
            last_pass: None,
            disposed: false,
        };
        controller.update();
        controller
    }

    /// Drain and handle every queued event, including events queued while
    /// handling earlier ones. Returns how many events were handled.
    ///
    /// Consecutive marker changes form one batch whose deletes are all
    /// dispatched before its adds. The batch goes out before the next
    /// non-marker event is handled, or once the queue runs dry.
    pub fn process_pending_events(&mut self) -> usize {
        let mut handled = 0;
        let mut feedback = Vec::new();
        loop {
            let Some(event) = self.receiver.try_next() else {
                if feedback.is_empty() {
                    break;
                }
                self.dispatch(&edit_feedback::deletes_first(std::mem::take(&mut feedback)));
                continue;
            };
            handled += 1;
            match event {
                GutterEvent::MarkerChanged { marker, change } if !self.disposed => {
                    feedback.extend(edit_feedback::handle_marker_change(
                        &mut self.anchors,
                        marker,
                        change,
                    ));
                }
                event => {
                    if !feedback.is_empty() {
                        self.dispatch(&edit_feedback::deletes_first(std::mem::take(
                            &mut feedback,
                        )));
                    }
                    self.handle_event(event);
                }
            }
        }
        handled
    }

    /// Handle a single event. Hosts that deliver events themselves can call
    /// this instead of going through the channel.
    pub fn handle_event(&mut self, event: GutterEvent) {
        if self.disposed {
            return;
        }
        match event {
            GutterEvent::StoreChanged => self.update(),
            GutterEvent::Pointer { surface, event } => self.handle_pointer(surface, event),
            GutterEvent::MarkerChanged { marker, change } => {
                let requests =
                    edit_feedback::handle_marker_change(&mut self.anchors, marker, change);
                self.dispatch(&requests);
            }
            GutterEvent::GutterDestroyed => {
                if self.gutter.take().is_some() {
                    log::info!("Breakpoint gutter destroyed by host");
                }
            }
            GutterEvent::EditorDestroyed => {
                if self.editor.take().is_some() {
                    log::info!("Editor destroyed; notifying owner");
                    self.editor_destroyed.fire();
                }
            }
        }
    }

    /// Reconcile the committed markers with the store's rows for this path,
    /// then show the gutter.
    ///
    /// No-op when the editor or gutter is gone, or the buffer has no path.
    pub fn update(&mut self) {
        if self.disposed {
            return;
        }
        let Some(editor) = self.editor.active().cloned() else {
            return;
        };
        if !self.gutter.is_active() {
            log::trace!("Skipping reconciliation: gutter destroyed");
            return;
        }
        let Some(path) = self.path.clone() else {
            log::debug!("Skipping reconciliation: editor has no path");
            return;
        };

        let desired: BTreeSet<Row> = self.store.breakpoint_lines_for_path(&path);
        let retired = self.anchors.destroy_stale();
        let plan = reconcile(desired.iter().copied(), self.anchors.live_markers());

        let summary = PassSummary {
            kept: plan.kept.len(),
            created: plan.created.len(),
            destroyed: plan.destroyed.len() + retired,
        };
        for id in plan.destroyed {
            self.anchors.destroy(id);
        }
        for row in plan.created {
            self.anchors.create(
                editor.as_ref(),
                &self.gutter,
                row,
                self.config.marker_column,
                &self.config.breakpoint_class,
                &self.sender,
            );
        }
        self.gestures.clear_shadow_if(|row| desired.contains(&row));

        if let Some(gutter) = self.gutter.active() {
            gutter.show();
        }
        log::debug!(
            "Reconciled {:?}: kept {}, created {}, destroyed {}",
            path,
            summary.kept,
            summary.created,
            summary.destroyed
        );
        self.last_pass = Some(summary);
    }

    fn handle_pointer(&mut self, surface: GutterSurface, event: PointerEvent) {
        let Some(editor) = self.editor.active().cloned() else {
            return;
        };
        let cx = GestureContext {
            editor: editor.as_ref(),
            gutter: &self.gutter,
            config: &self.config,
        };
        if let Some(request) = self.gestures.handle(event, &cx) {
            log::debug!("{:?} on {:?} gutter", request, surface);
            self.dispatch(&[request]);
        }
    }

    fn dispatch(&self, requests: &[BreakpointRequest]) {
        if requests.is_empty() {
            return;
        }
        let Some(path) = self.path.as_deref() else {
            log::warn!("Dropping {} breakpoint request(s): editor has no path", requests.len());
            return;
        };
        for request in requests {
            request.dispatch(self.actions.as_ref(), path);
        }
    }

    /// Release every subscription, destroy all markers and the gutter.
    ///
    /// Idempotent; also runs on drop.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;

        self.subscriptions.release_all();
        let destroyed = self.anchors.destroy_all();
        self.gestures.dispose();
        if let Some(gutter) = self.gutter.take() {
            gutter.destroy();
        }
        log::info!("Breakpoint gutter disposed ({} markers destroyed)", destroyed);
    }

    /// Path the buffer had when the controller was created, if it was saved.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Rows currently shown as committed breakpoints.
    pub fn committed_rows(&self) -> BTreeSet<Row> {
        self.anchors.rows()
    }

    /// Identity of the committed marker at `row`.
    pub fn marker_at(&self, row: Row) -> Option<MarkerId> {
        self.anchors.marker_at(row)
    }

    pub fn shadow_row(&self) -> Option<Row> {
        self.gestures.shadow_row()
    }

    pub fn hovered_row(&self) -> Option<Row> {
        self.gestures.hovered_row()
    }

    pub fn anchors(&self) -> &AnchorRegistry {
        &self.anchors
    }

    pub fn gestures(&self) -> &GestureController {
        &self.gestures
    }

    pub fn last_pass(&self) -> Option<PassSummary> {
        self.last_pass
    }

    pub fn config(&self) -> &GutterConfig {
        &self.config
    }

    pub fn is_gutter_active(&self) -> bool {
        self.gutter.is_active()
    }

    pub fn is_editor_active(&self) -> bool {
        self.editor.is_active()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }
}

impl Drop for BreakpointGutter {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn forward(sender: &EventSender, event: GutterEvent) -> Box<dyn FnMut()> {
    let sender = sender.clone();
    Box::new(move || sender.send(event.clone()))
}

fn forward_pointer(sender: &EventSender, surface: GutterSurface) -> Box<dyn FnMut(PointerEvent)> {
    let sender = sender.clone();
    Box::new(move |event| sender.send(GutterEvent::Pointer { surface, event }))
}
