//! Selection session management module
//!
//! This module contains:
//! - Session state owned by the interaction controller
//! - Message types for pointer, mode and query events
//! - Message handlers
//! - Recorded gesture scripts

pub mod handlers;
pub mod messages;
pub mod script;
pub mod state;

pub use handlers::update;
pub use messages::{ModeMsg, Msg, PointerMsg, QueryMsg};
pub use state::{Marker, SelectionView, SessionState};
