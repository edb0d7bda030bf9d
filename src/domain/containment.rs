//! Point-in-polygon evaluation
//!
//! Both methods share the same boundary rules: a point equal to a vertex, or
//! lying exactly on an edge, is inside. Empty polygons contain nothing.

use std::f64::consts::PI;

use super::geometry::{Vertex, cross, dot, on_segment, orient};
use super::polygon::{MIN_VERTICES, SelectionPolygon};
use crate::config::ContainmentMethod;

/// Decision threshold for the angle sum: midway between 0 (outside) and 2π (inside)
pub const ANGLE_SUM_THRESHOLD: f64 = PI;

/// Check whether `point` lies inside `polygon`
pub fn contains(point: Vertex, polygon: &SelectionPolygon, method: ContainmentMethod) -> bool {
    let ring = polygon.vertices();
    if ring.len() < MIN_VERTICES {
        return false;
    }
    if ring.contains(&point) {
        return true;
    }
    match polygon.bounds() {
        Some(bounds) if bounds.contains(point) => {}
        _ => return false,
    }
    if polygon.edges().any(|(a, b)| on_segment(point, a, b)) {
        return true;
    }

    match method {
        ContainmentMethod::WindingNumber => winding_number(point, ring) != 0,
        ContainmentMethod::AngleSum => angle_sum(point, ring).abs() > ANGLE_SUM_THRESHOLD,
    }
}

/// Number of times the closed ring winds around `point`.
///
/// Counter-clockwise turns count positive. Points on the boundary get an
/// unspecified value; callers test the boundary first.
pub fn winding_number(point: Vertex, ring: &[Vertex]) -> i32 {
    let n = ring.len();
    let mut wn = 0;
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        if a.longitude <= point.longitude {
            // Upward crossing with the point to the left
            if b.longitude > point.longitude && orient(a, b, point) > 0.0 {
                wn += 1;
            }
        } else if b.longitude <= point.longitude && orient(a, b, point) < 0.0 {
            wn -= 1;
        }
    }
    wn
}

/// Sum of the signed angles subtended at `point` by each edge of the ring.
///
/// Approaches ±2π for interior points and 0 for exterior ones.
pub fn angle_sum(point: Vertex, ring: &[Vertex]) -> f64 {
    let n = ring.len();
    let mut sum = 0.0;
    for i in 0..n {
        let u = point.to(ring[(i + n - 1) % n]);
        let v = point.to(ring[i]);
        let norm = (dot(u, u) * dot(v, v)).sqrt();
        if norm == 0.0 {
            continue;
        }
        let angle = (dot(u, v) / norm).clamp(-1.0, 1.0).acos();
        if cross(u, v) < 0.0 {
            sum -= angle;
        } else {
            sum += angle;
        }
    }
    sum
}
