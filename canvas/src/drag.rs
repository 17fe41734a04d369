//! Pointer-driven repositioning of layer handles.
//!
//! Two states: `Idle` and `Dragging`. A pointer-down on a handle records the
//! offset between the pointer and the handle's top-left corner; each move
//! places the handle at `pointer - container origin - grab offset`, clamped
//! so the handle stays inside the container. The handle's current rendered
//! size is read on every move, so a handle that grows mid-drag is re-clamped
//! on the next move rather than immediately. A pointer-up anywhere ends the
//! drag.
//!
//! A pointer-down on another handle while already dragging redirects the
//! drag to that handle.

#[cfg(test)]
#[path = "drag_test.rs"]
mod drag_test;

use crate::geom::{Point, Rect, clamp_to_extent};
use crate::layer::LayerId;
use crate::store::LayerStore;

/// Drag gesture state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    /// No drag in progress.
    #[default]
    Idle,
    /// A layer follows the pointer.
    Dragging {
        /// Layer being dragged.
        id: LayerId,
        /// Pointer position minus the handle's top-left at pointer-down.
        grab_offset: Point,
    },
}

/// Tracks the single in-flight drag for a session.
#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> DragState {
        self.state
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Start dragging `id` and activate it. Returns `false` for unknown ids.
    pub fn pointer_down(&mut self, store: &mut LayerStore, id: LayerId, pointer: Point) -> bool {
        let Some(layer) = store.get(id) else {
            return false;
        };
        let grab_offset = pointer.offset_from(layer.bounds().origin);
        store.set_active(id);
        self.state = DragState::Dragging { id, grab_offset };
        true
    }

    /// Move the dragged layer under the pointer. Returns the new
    /// container-relative position, or `None` when idle or the layer is gone.
    pub fn pointer_move(&mut self, store: &mut LayerStore, container: Rect, pointer: Point) -> Option<Point> {
        let DragState::Dragging { id, grab_offset } = self.state else {
            return None;
        };
        let handle_size = store.get(id)?.bounds().size;
        let candidate = pointer.offset_from(container.origin).offset_from(grab_offset);
        let clamped = Point::new(
            clamp_to_extent(candidate.x, container.size.width - handle_size.width),
            clamp_to_extent(candidate.y, container.size.height - handle_size.height),
        );
        store.move_layer(id, clamped);
        Some(clamped)
    }

    /// End any drag in progress.
    pub fn pointer_up(&mut self) {
        self.state = DragState::Idle;
    }
}
