//! Recorded gesture scripts
//!
//! A script is a JSON array of steps, e.g.
//! `[{"type": "toggle_mode"}, {"type": "press", "latitude": 0, "longitude": 0}, {"type": "wait"}]`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::messages::{ModeMsg, Msg, PointerMsg};
use crate::domain::{SelectionMode, Vertex};

/// One recorded input event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GestureStep {
    ToggleMode,
    SetMode { mode: SelectionMode },
    Press(Vertex),
    Move(Vertex),
    Release(Vertex),
    /// Wait for the outstanding query to come back
    Wait,
}

impl GestureStep {
    /// The session message for this step; `Wait` has none
    pub fn to_msg(&self) -> Option<Msg> {
        match *self {
            GestureStep::ToggleMode => Some(Msg::Mode(ModeMsg::Toggle)),
            GestureStep::SetMode { mode } => Some(Msg::Mode(ModeMsg::Set(mode))),
            GestureStep::Press(v) => Some(Msg::Pointer(PointerMsg::Press(v))),
            GestureStep::Move(v) => Some(Msg::Pointer(PointerMsg::Move(v))),
            GestureStep::Release(v) => Some(Msg::Pointer(PointerMsg::Release(v))),
            GestureStep::Wait => None,
        }
    }
}

/// Read a gesture script from disk
pub fn load_script(path: &Path) -> Result<Vec<GestureStep>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read gesture script: {}", path.display()))?;
    let steps = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse gesture script: {}", path.display()))?;
    Ok(steps)
}
