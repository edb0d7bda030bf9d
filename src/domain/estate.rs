//! Listing records returned by the estate search backend

use serde::{Deserialize, Serialize};

use super::geometry::Vertex;

/// A real-estate listing with a map position
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Estate {
    pub id: u64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Estate {
    /// Map position of this listing
    pub fn position(&self) -> Vertex {
        Vertex::new(self.latitude, self.longitude)
    }
}
