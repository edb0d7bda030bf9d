//! Drag path collection for the scribble gesture

use super::geometry::Vertex;
use super::polygon::SelectionPolygon;
use super::selection::{DragState, SelectionMode};
use crate::config::ClosurePolicy;

/// Collects pointer positions during a drag and closes them into a polygon.
///
/// Every operation is a no-op outside [`SelectionMode::Draw`].
#[derive(Clone, Debug, Default)]
pub struct PathCollector {
    mode: SelectionMode,
    drag: DragState,
    path: Vec<Vertex>,
}

impl PathCollector {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        self.drag == DragState::Dragging
    }

    /// The live (or last finished) drag path, for drawing the trail
    pub fn path(&self) -> &[Vertex] {
        &self.path
    }

    /// Switch mode, abandoning any path in progress
    pub fn set_mode(&mut self, mode: SelectionMode) {
        self.mode = mode;
        self.reset();
    }

    /// Drop the path and return to idle
    pub fn reset(&mut self) {
        self.drag = DragState::Idle;
        self.path.clear();
    }

    /// Begin a new path seeded with `vertex`. Returns whether it was accepted.
    pub fn start(&mut self, vertex: Vertex) -> bool {
        if !self.mode.is_draw() {
            return false;
        }
        self.path.clear();
        self.path.push(vertex);
        self.drag = DragState::Dragging;
        true
    }

    /// Append a vertex to the path in progress. Returns whether it was accepted.
    pub fn extend(&mut self, vertex: Vertex) -> bool {
        if !self.mode.is_draw() || !self.is_dragging() {
            return false;
        }
        self.path.push(vertex);
        true
    }

    /// Append the final vertex and close the path.
    ///
    /// Returns `None` when no drag was in progress. A path that encloses no
    /// region closes into an empty polygon.
    pub fn finish(&mut self, vertex: Vertex, policy: ClosurePolicy) -> Option<SelectionPolygon> {
        if !self.mode.is_draw() || !self.is_dragging() {
            return None;
        }
        self.path.push(vertex);
        self.drag = DragState::Idle;
        Some(SelectionPolygon::close(&self.path, policy))
    }
}
