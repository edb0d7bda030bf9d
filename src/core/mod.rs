//! Core application module
//!
//! This module contains the interaction controller that drives a selection
//! session and its backend queries.

pub mod app;

pub use app::App;
