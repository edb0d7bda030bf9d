//! Selection mode and gesture state

use serde::{Deserialize, Serialize};

/// Whether pointer drags pan the map or draw a selection
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// Pointer events go to the map's native panning
    #[default]
    Pan,
    /// Pointer events feed the drag path
    Draw,
}

impl SelectionMode {
    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            SelectionMode::Pan => SelectionMode::Draw,
            SelectionMode::Draw => SelectionMode::Pan,
        }
    }

    pub fn is_draw(self) -> bool {
        self == SelectionMode::Draw
    }
}

/// Drag state for the scribble gesture
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}
