//! Pointer gestures over the gutters.
//!
//! `GestureController` turns hover and click events into breakpoint toggle
//! requests and keeps at most one shadow marker alive as a hover preview.

use crate::anchors::decorate;
use crate::host::{
    BufferMarker, Gutter, MarkerOptions, PointerEvent, PointerKind, PointerTarget, Row, TextEditor,
};
use crate::request::BreakpointRequest;
use crate::resource::Resource;
use breakpoint_gutter_config::GutterConfig;
use std::rc::Rc;

/// Hover state of the pointer over the gutters.
#[derive(Default)]
pub enum GestureState {
    #[default]
    Idle,
    /// The pointer is over `row`. `shadow` is destroyed when no preview is
    /// shown there.
    Hovering {
        row: Row,
        shadow: Resource<Rc<dyn BufferMarker>>,
    },
}

/// Borrowed view of the controller state a gesture needs.
pub struct GestureContext<'a> {
    pub editor: &'a dyn TextEditor,
    pub gutter: &'a Resource<Rc<dyn Gutter>>,
    pub config: &'a GutterConfig,
}

#[derive(Default)]
pub struct GestureController {
    state: GestureState,
    shadows_created: u64,
    shadows_destroyed: u64,
}

impl GestureController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one pointer event through the state machine.
    ///
    /// Returns the request a click produces. Hover transitions only touch the
    /// shadow marker.
    pub fn handle(
        &mut self,
        event: PointerEvent,
        cx: &GestureContext<'_>,
    ) -> Option<BreakpointRequest> {
        match event.kind {
            PointerKind::Move => {
                match cx.editor.row_for_pointer(event.position) {
                    Some(row) => self.hover(row, cx),
                    // Past the last line: nothing to preview.
                    None => self.leave(),
                }
                None
            }
            PointerKind::Leave => {
                self.leave();
                None
            }
            PointerKind::Click => {
                if event.target == PointerTarget::InlineIcon {
                    log::trace!("Click on inline icon ignored");
                    return None;
                }
                let row = cx.editor.row_for_pointer(event.position)?;
                Some(BreakpointRequest::Toggle(row))
            }
        }
    }

    fn hover(&mut self, row: Row, cx: &GestureContext<'_>) {
        if matches!(self.state, GestureState::Hovering { row: current, .. } if current == row) {
            return;
        }
        self.clear_shadow();

        // A committed row gets a preview too. The next reconciliation pass
        // clears it.
        let shadow = if cx.config.hover_preview && cx.gutter.is_active() {
            let marker = cx
                .editor
                .mark_row(row, cx.config.marker_column, MarkerOptions::default());
            decorate(cx.gutter, marker.as_ref(), &cx.config.shadow_class);
            self.shadows_created += 1;
            Resource::Active(marker)
        } else {
            Resource::Destroyed
        };

        log::trace!("Hovering row {} (preview: {})", row, shadow.is_active());
        self.state = GestureState::Hovering { row, shadow };
    }

    fn leave(&mut self) {
        self.clear_shadow();
        self.state = GestureState::Idle;
    }

    /// Destroy the shadow marker, keeping the hover row.
    fn clear_shadow(&mut self) {
        if let GestureState::Hovering { shadow, .. } = &mut self.state
            && let Some(marker) = shadow.take()
        {
            marker.destroy();
            self.shadows_destroyed += 1;
        }
    }

    /// Drop the preview if its row has just become a committed breakpoint, so
    /// two decorations never share a row.
    pub fn clear_shadow_if(&mut self, committed: impl Fn(Row) -> bool) {
        if let GestureState::Hovering { row, shadow } = &self.state
            && shadow.is_active()
            && committed(*row)
        {
            log::debug!("Breakpoint committed under hover preview at row {}", row);
            self.clear_shadow();
        }
    }

    /// Destroy the shadow marker and return to idle.
    pub fn dispose(&mut self) {
        self.leave();
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn hovered_row(&self) -> Option<Row> {
        match self.state {
            GestureState::Hovering { row, .. } => Some(row),
            GestureState::Idle => None,
        }
    }

    /// Row of the live shadow marker, if one is shown.
    pub fn shadow_row(&self) -> Option<Row> {
        match &self.state {
            GestureState::Hovering { shadow, .. } => shadow.active().map(|marker| marker.row()),
            GestureState::Idle => None,
        }
    }

    pub fn shadows_created(&self) -> u64 {
        self.shadows_created
    }

    pub fn shadows_destroyed(&self) -> u64 {
        self.shadows_destroyed
    }
}
