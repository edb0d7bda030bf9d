//! Selection polygons built from drag paths

use serde::Serialize;

use super::containment;
use super::geometry::{Bounds, Vertex, cross, dot, orient, segments_intersect};
use crate::config::{ClosurePolicy, ContainmentMethod};

/// Minimum number of distinct vertices that encloses a region
pub const MIN_VERTICES: usize = 3;

/// Closed selection ring. The last-to-first edge is implicit.
///
/// An empty polygon means "no selection": it contains nothing.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SelectionPolygon {
    vertices: Vec<Vertex>,
}

impl SelectionPolygon {
    /// The "no selection" polygon
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a polygon from an explicit ring.
    ///
    /// Consecutive duplicates and an explicit closing vertex are dropped.
    /// Rings with fewer than three distinct vertices become empty.
    pub fn from_ring(ring: &[Vertex]) -> Self {
        let mut vertices: Vec<Vertex> = Vec::with_capacity(ring.len());
        for &v in ring {
            if vertices.last() != Some(&v) {
                vertices.push(v);
            }
        }
        while vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }
        if distinct_count(&vertices) < MIN_VERTICES {
            return Self::empty();
        }
        Self { vertices }
    }

    /// Close a finished drag path under the given policy
    pub fn close(path: &[Vertex], policy: ClosurePolicy) -> Self {
        let polygon = match policy {
            ClosurePolicy::ConvexHull => Self::from_ring(&convex_hull(path)),
            ClosurePolicy::Drawn => {
                let drawn = Self::from_ring(path);
                if drawn.is_empty() || drawn.is_simple() {
                    drawn
                } else {
                    log::debug!(
                        "Drawn path of {} vertices crosses itself, closing with convex hull",
                        drawn.len()
                    );
                    Self::from_ring(&convex_hull(path))
                }
            }
        };

        match polygon.bounds() {
            Some(bounds) => log::debug!(
                "Closed {} path points into {} vertices ({}), area {:.6}, spanning {:.6} x {:.6}",
                path.len(),
                polygon.len(),
                policy.name(),
                polygon.signed_area().abs(),
                bounds.height(),
                bounds.width()
            ),
            None => log::debug!("Path of {} points encloses no region", path.len()),
        }
        polygon
    }

    /// Ring vertices in order
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether this polygon selects nothing
    pub fn is_empty(&self) -> bool {
        self.vertices.len() < MIN_VERTICES
    }

    /// Edges of the ring, including the closing edge
    pub fn edges(&self) -> impl Iterator<Item = (Vertex, Vertex)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    pub fn bounds(&self) -> Option<Bounds> {
        if self.is_empty() {
            return None;
        }
        Bounds::from_vertices(&self.vertices)
    }

    /// Shoelace area; positive for counter-clockwise rings in (latitude, longitude)
    pub fn signed_area(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.edges()
            .map(|(a, b)| a.latitude * b.longitude - b.latitude * a.longitude)
            .sum::<f64>()
            * 0.5
    }

    /// Whether no two edges meet except neighbours at their shared vertex
    pub fn is_simple(&self) -> bool {
        let n = self.vertices.len();
        if n < MIN_VERTICES {
            return false;
        }
        let edges: Vec<(Vertex, Vertex)> = self.edges().collect();
        for i in 0..n {
            for j in (i + 1)..n {
                let (a, b) = edges[i];
                let (c, d) = edges[j];
                if j == i + 1 {
                    // b == c; neighbours may only touch there
                    if folds_back(a, b, d) {
                        return false;
                    }
                } else if i == 0 && j == n - 1 {
                    // d == a
                    if folds_back(c, a, b) {
                        return false;
                    }
                } else if segments_intersect(a, b, c, d) {
                    return false;
                }
            }
        }
        true
    }

    /// Check whether `point` lies inside (or on the boundary of) this polygon
    pub fn contains(&self, point: Vertex, method: ContainmentMethod) -> bool {
        containment::contains(point, self, method)
    }
}

/// Whether the path `a -> b -> c` doubles back over itself at `b`
fn folds_back(a: Vertex, b: Vertex, c: Vertex) -> bool {
    orient(a, b, c) == 0.0 && dot(b.to(a), b.to(c)) > 0.0
}

fn distinct_count(vertices: &[Vertex]) -> usize {
    let mut sorted = vertices.to_vec();
    sorted.sort_by(|a, b| {
        a.latitude
            .total_cmp(&b.latitude)
            .then(a.longitude.total_cmp(&b.longitude))
    });
    sorted.dedup();
    sorted.len()
}

/// Convex hull by monotone chain, counter-clockwise, without collinear points.
///
/// Returns fewer than three vertices when the input spans no area.
pub fn convex_hull(points: &[Vertex]) -> Vec<Vertex> {
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| {
        a.latitude
            .total_cmp(&b.latitude)
            .then(a.longitude.total_cmp(&b.longitude))
    });
    sorted.dedup();
    if sorted.len() < MIN_VERTICES {
        return sorted;
    }

    let turn = |o: Vertex, a: Vertex, b: Vertex| cross(o.to(a), o.to(b));

    let mut lower: Vec<Vertex> = Vec::new();
    for &p in &sorted {
        while lower.len() >= 2 && turn(lower[lower.len() - 2], lower[lower.len() - 1], p) <= 0.0 {
            lower.pop();
        }
        lower.push(p);
    }

    let mut upper: Vec<Vertex> = Vec::new();
    for &p in sorted.iter().rev() {
        while upper.len() >= 2 && turn(upper[upper.len() - 2], upper[upper.len() - 1], p) <= 0.0 {
            upper.pop();
        }
        upper.push(p);
    }

    // Last point of each chain is the first of the other
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(lat: f64, lng: f64) -> Vertex {
        Vertex::new(lat, lng)
    }

    fn square() -> Vec<Vertex> {
        vec![v(0.0, 0.0), v(0.0, 2.0), v(2.0, 2.0), v(2.0, 0.0)]
    }

    #[test]
    fn test_from_ring_drops_duplicates_and_closing_vertex() {
        let ring = vec![
            v(0.0, 0.0),
            v(0.0, 0.0),
            v(0.0, 2.0),
            v(2.0, 2.0),
            v(2.0, 2.0),
            v(2.0, 0.0),
            v(0.0, 0.0),
        ];
        let polygon = SelectionPolygon::from_ring(&ring);
        assert_eq!(polygon.vertices(), square().as_slice());
    }

    #[test]
    fn test_from_ring_degenerate() {
        assert!(SelectionPolygon::from_ring(&[]).is_empty());
        assert!(SelectionPolygon::from_ring(&[v(1.0, 1.0)]).is_empty());
        assert!(SelectionPolygon::from_ring(&[v(0.0, 0.0), v(1.0, 1.0)]).is_empty());
        // Three points but only two distinct
        assert!(SelectionPolygon::from_ring(&[v(0.0, 0.0), v(1.0, 1.0), v(0.0, 0.0)]).is_empty());
        assert!(SelectionPolygon::empty().bounds().is_none());
    }

    #[test]
    fn test_convex_hull_drops_interior_and_collinear_points() {
        let points = vec![
            v(0.0, 0.0),
            v(1.0, 1.0),
            v(0.0, 2.0),
            v(1.0, 2.0),
            v(2.0, 2.0),
            v(2.0, 0.0),
            v(0.5, 1.5),
        ];
        let hull = convex_hull(&points);
        assert_eq!(hull.len(), 4);
        for corner in square() {
            assert!(hull.contains(&corner));
        }
        assert!(SelectionPolygon::from_ring(&hull).signed_area() > 0.0);
    }

    #[test]
    fn test_convex_hull_of_collinear_points_is_degenerate() {
        let hull = convex_hull(&[v(0.0, 0.0), v(1.0, 1.0), v(2.0, 2.0), v(3.0, 3.0)]);
        assert!(hull.len() < MIN_VERTICES);
        let polygon =
            SelectionPolygon::close(&[v(0.0, 0.0), v(1.0, 1.0), v(2.0, 2.0)], ClosurePolicy::ConvexHull);
        assert!(polygon.is_empty());
    }

    #[test]
    fn test_close_convex_hull_loses_concavity() {
        // An L-shaped drag
        let path = vec![
            v(0.0, 0.0),
            v(0.0, 4.0),
            v(1.0, 4.0),
            v(1.0, 1.0),
            v(4.0, 1.0),
            v(4.0, 0.0),
        ];
        let hull = SelectionPolygon::close(&path, ClosurePolicy::ConvexHull);
        let drawn = SelectionPolygon::close(&path, ClosurePolicy::Drawn);
        assert_eq!(hull.len(), 5);
        assert_eq!(drawn.len(), 6);
        assert_eq!(drawn.signed_area().abs(), 7.0);
        assert!(hull.signed_area().abs() > 7.0);
    }

    #[test]
    fn test_close_drawn_falls_back_when_self_intersecting() {
        // Bow tie
        let path = vec![v(0.0, 0.0), v(2.0, 2.0), v(0.0, 2.0), v(2.0, 0.0)];
        let drawn = SelectionPolygon::from_ring(&path);
        assert!(!drawn.is_simple());
        let closed = SelectionPolygon::close(&path, ClosurePolicy::Drawn);
        assert!(closed.is_simple());
        assert_eq!(closed.len(), 4);
        assert_eq!(closed.signed_area(), 4.0);
    }

    #[test]
    fn test_is_simple() {
        assert!(SelectionPolygon::from_ring(&square()).is_simple());
        // Collinear ring folds back on itself
        let flat = SelectionPolygon::from_ring(&[v(0.0, 0.0), v(1.0, 0.0), v(2.0, 0.0)]);
        assert!(!flat.is_simple());
        // Revisiting a vertex pinches the ring
        let pinched = SelectionPolygon::from_ring(&[
            v(0.0, 0.0),
            v(1.0, 1.0),
            v(2.0, 0.0),
            v(2.0, 2.0),
            v(1.0, 1.0),
            v(0.0, 2.0),
        ]);
        assert!(!pinched.is_simple());
    }

    #[test]
    fn test_close_drawn_collinear_path_is_empty() {
        let path = vec![v(0.0, 0.0), v(1.0, 0.0), v(2.0, 0.0), v(3.0, 0.0)];
        assert!(SelectionPolygon::close(&path, ClosurePolicy::Drawn).is_empty());
    }

    #[test]
    fn test_signed_area_orientation() {
        let ccw = SelectionPolygon::from_ring(&[v(0.0, 0.0), v(2.0, 0.0), v(2.0, 2.0), v(0.0, 2.0)]);
        let cw = SelectionPolygon::from_ring(&square());
        assert_eq!(ccw.signed_area(), 4.0);
        assert_eq!(cw.signed_area(), -4.0);
    }

    #[test]
    fn test_serializes_as_vertex_list() {
        let polygon = SelectionPolygon::from_ring(&[v(0.0, 0.0), v(0.0, 1.0), v(1.0, 1.0)]);
        let json = serde_json::to_value(&polygon).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 3);
        assert_eq!(json[1]["longitude"], 1.0);
    }
}
