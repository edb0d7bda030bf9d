//! Scribble-select ("nazotte") core for map listing search.
//!
//! A user drags a free-hand shape over a map in draw mode; the drag path is
//! closed into a selection polygon, the polygon is sent to an estate search
//! backend, and each returned listing is marked selected when it falls inside
//! the polygon.

pub mod config;
pub mod core;
pub mod domain;
pub mod query;
pub mod session;
