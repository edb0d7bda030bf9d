//! Message types for a selection session
//!
//! Every change to the session state arrives as one of these messages and is
//! applied in arrival order.

use crate::domain::{Estate, SelectionMode, Vertex};

/// Pointer events from the map surface
#[derive(Debug, Clone, PartialEq)]
pub enum PointerMsg {
    /// Button pressed at position
    Press(Vertex),
    /// Pointer moved while pressed
    Move(Vertex),
    /// Button released at position
    Release(Vertex),
}

/// Selection mode messages
#[derive(Debug, Clone, PartialEq)]
pub enum ModeMsg {
    /// Flip between pan and draw
    Toggle,
    /// Enter a specific mode
    Set(SelectionMode),
}

/// Estate query results, tagged with the generation they were issued for
#[derive(Debug, Clone, PartialEq)]
pub enum QueryMsg {
    /// Backend returned candidates
    Resolved { generation: u64, estates: Vec<Estate> },
    /// Backend call failed
    Failed { generation: u64, error: String },
}

/// Messages for selection session interactions
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    Pointer(PointerMsg),
    Mode(ModeMsg),
    Query(QueryMsg),
}
