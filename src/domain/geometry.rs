//! Geometric primitives for drag paths and selection regions

use serde::{Deserialize, Serialize};

/// A point in the unprojected latitude/longitude plane
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub latitude: f64,
    pub longitude: f64,
}

impl Vertex {
    /// Create a new vertex
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Vector from `self` to `other`
    pub fn to(self, other: Vertex) -> (f64, f64) {
        (
            other.latitude - self.latitude,
            other.longitude - self.longitude,
        )
    }
}

impl From<(f64, f64)> for Vertex {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

/// 2-D cross product of two vectors
#[inline]
pub fn cross(a: (f64, f64), b: (f64, f64)) -> f64 {
    a.0 * b.1 - a.1 * b.0
}

/// 2-D dot product of two vectors
#[inline]
pub fn dot(a: (f64, f64), b: (f64, f64)) -> f64 {
    a.0 * b.0 + a.1 * b.1
}

/// Orientation of `c` relative to the directed line `a -> b`.
///
/// Positive when `c` is to the left, negative to the right, zero when collinear.
#[inline]
pub fn orient(a: Vertex, b: Vertex, c: Vertex) -> f64 {
    cross(a.to(b), a.to(c))
}

/// Whether `p` lies on the closed segment `a-b`
pub fn on_segment(p: Vertex, a: Vertex, b: Vertex) -> bool {
    if orient(a, b, p) != 0.0 {
        return false;
    }
    let ap = a.to(p);
    let ab = a.to(b);
    let d = dot(ap, ab);
    d >= 0.0 && d <= dot(ab, ab)
}

/// Whether the closed segments `a1-a2` and `b1-b2` share at least one point
pub fn segments_intersect(a1: Vertex, a2: Vertex, b1: Vertex, b2: Vertex) -> bool {
    let d1 = orient(b1, b2, a1);
    let d2 = orient(b1, b2, a2);
    let d3 = orient(a1, a2, b1);
    let d4 = orient(a1, a2, b2);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    on_segment(a1, b1, b2)
        || on_segment(a2, b1, b2)
        || on_segment(b1, a1, a2)
        || on_segment(b2, a1, a2)
}

/// Axis-aligned bounds of a set of vertices
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min_latitude: f64,
    pub min_longitude: f64,
    pub max_latitude: f64,
    pub max_longitude: f64,
}

impl Bounds {
    /// Smallest bounds enclosing every vertex, or `None` for an empty slice
    pub fn from_vertices(vertices: &[Vertex]) -> Option<Self> {
        let first = vertices.first()?;
        let mut bounds = Bounds {
            min_latitude: first.latitude,
            min_longitude: first.longitude,
            max_latitude: first.latitude,
            max_longitude: first.longitude,
        };
        for v in &vertices[1..] {
            bounds.min_latitude = bounds.min_latitude.min(v.latitude);
            bounds.min_longitude = bounds.min_longitude.min(v.longitude);
            bounds.max_latitude = bounds.max_latitude.max(v.latitude);
            bounds.max_longitude = bounds.max_longitude.max(v.longitude);
        }
        Some(bounds)
    }

    /// Check if these bounds contain a point (edges inclusive)
    pub fn contains(&self, point: Vertex) -> bool {
        point.latitude >= self.min_latitude
            && point.latitude <= self.max_latitude
            && point.longitude >= self.min_longitude
            && point.longitude <= self.max_longitude
    }

    /// Latitude extent
    pub fn height(&self) -> f64 {
        self.max_latitude - self.min_latitude
    }

    /// Longitude extent
    pub fn width(&self) -> f64 {
        self.max_longitude - self.min_longitude
    }
}
