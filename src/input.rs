//! Pointer input routed to a cursor.

use glam::Vec2;
use tracing::debug;

use crate::data_types::{CursorConfig, ItemId, Orientation};
use crate::plot_types::PlotCursor;
use crate::view::PlotView;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Press,
    Move,
    Release,
}

/// A pointer event in canvas coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub position: Vec2,
}

impl PointerEvent {
    pub fn press(x: f32, y: f32) -> Self {
        Self {
            kind: PointerKind::Press,
            position: Vec2::new(x, y),
        }
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self {
            kind: PointerKind::Move,
            position: Vec2::new(x, y),
        }
    }

    pub fn release(x: f32, y: f32) -> Self {
        Self {
            kind: PointerKind::Release,
            position: Vec2::new(x, y),
        }
    }
}

/// Shows a cursor while the pointer is pressed on the canvas.
///
/// The cursor is attached to the view on press, follows the pointer while
/// held and is detached again on release.
pub struct CursorController {
    orientation: Orientation,
    idle: Option<Box<PlotCursor>>,
    attached: Option<ItemId>,
}

impl CursorController {
    pub fn new(orientation: Orientation) -> Self {
        Self::with_cursor(PlotCursor::new(orientation))
    }

    pub fn with_config(orientation: Orientation, config: CursorConfig) -> Self {
        Self::with_cursor(PlotCursor::new(orientation).with_config(config))
    }

    pub fn with_cursor(cursor: PlotCursor) -> Self {
        Self {
            orientation: cursor.orientation(),
            idle: Some(Box::new(cursor)),
            attached: None,
        }
    }

    /// Key of the cursor while it is shown.
    pub fn attached(&self) -> Option<ItemId> {
        self.attached
    }

    /// Feeds one event. Returns `true` if the event was consumed.
    pub fn handle(&mut self, view: &mut PlotView, event: PointerEvent) -> bool {
        match (event.kind, self.attached) {
            (PointerKind::Press, None) => {
                if !view.canvas_rect().contains(event.position) {
                    return false;
                }
                let orientation = self.orientation;
                let cursor = self
                    .idle
                    .take()
                    .unwrap_or_else(|| Box::new(PlotCursor::new(orientation)));
                let id = view.attach_boxed(cursor);
                self.attached = Some(id);
                debug!(item = id.raw(), "cursor shown");
                view.set_cursor_canvas_position(id, event.position)
            }
            (PointerKind::Press | PointerKind::Move, Some(id)) => {
                view.set_cursor_canvas_position(id, event.position)
            }
            (PointerKind::Release, Some(id)) => {
                self.attached = None;
                self.idle = view
                    .detach(id)
                    .and_then(|item| item.into_any().downcast::<PlotCursor>().ok())
                    .map(|mut cursor| {
                        cursor.clear_position();
                        cursor
                    });
                debug!(item = id.raw(), "cursor hidden");
                true
            }
            (PointerKind::Move | PointerKind::Release, None) => false,
        }
    }
}
