//! Pure domain types with minimal dependencies
//!
//! This module contains the geometric selection core: drag paths, selection
//! polygons and point containment. Nothing here performs I/O.

pub mod containment;
pub mod estate;
pub mod geometry;
pub mod path;
pub mod polygon;
pub mod selection;

pub use estate::*;
pub use geometry::*;
pub use path::*;
pub use polygon::*;
pub use selection::*;
