//! # Polygon Predicates
//!
//! Planar queries over closed polylines: signed area, bounding boxes, point
//! location and edge intersection. Orientation tests go through `robust` so
//! touching and crossing are decided exactly on the sampled geometry.
//!
//! Polylines are stored open: the closing edge from the last vertex back to
//! the first is implicit.

use glam::DVec2;
use robust::{orient2d, Coord};
use serde::{Deserialize, Serialize};

use crate::curve::distance_to_segment;

// =============================================================================
// BOUNDING BOX
// =============================================================================

/// Axis-aligned bounds of a polyline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Lower-left corner.
    pub min: DVec2,
    /// Upper-right corner.
    pub max: DVec2,
}

impl BoundingBox {
    /// Bounds of a point set. Empty input yields an inverted box that
    /// contains nothing.
    pub fn from_points(points: &[DVec2]) -> Self {
        points.iter().fold(
            Self {
                min: DVec2::splat(f64::INFINITY),
                max: DVec2::splat(f64::NEG_INFINITY),
            },
            |acc, p| Self {
                min: acc.min.min(*p),
                max: acc.max.max(*p),
            },
        )
    }

    /// Whether `other` lies inside `self`.
    pub fn contains_box(&self, other: &BoundingBox) -> bool {
        other.min.cmpge(self.min).all() && other.max.cmple(self.max).all()
    }

    /// Whether the boxes overlap once each is grown by `margin`.
    pub fn intersects(&self, other: &BoundingBox, margin: f64) -> bool {
        self.min.x - margin <= other.max.x
            && other.min.x - margin <= self.max.x
            && self.min.y - margin <= other.max.y
            && other.min.y - margin <= self.max.y
    }
}

// =============================================================================
// AREA AND LOCATION
// =============================================================================

/// Shoelace signed area; positive for counter-clockwise.
pub fn signed_area(points: &[DVec2]) -> f64 {
    edges(points).map(|(a, b)| a.perp_dot(b)).sum::<f64>() * 0.5
}

/// Closed edges of an open polyline.
pub fn edges(points: &[DVec2]) -> impl Iterator<Item = (DVec2, DVec2)> + '_ {
    let n = points.len();
    (0..n).map(move |i| (points[i], points[(i + 1) % n]))
}

/// Where a point lies relative to a closed polyline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// Strictly inside, farther than the tolerance from every edge.
    Inside,
    /// Within the tolerance of an edge.
    Boundary,
    /// Strictly outside.
    Outside,
}

/// Locate `q` against `polygon` with even-odd ray casting.
pub fn locate(q: DVec2, polygon: &[DVec2], tolerance: f64) -> Location {
    let mut inside = false;
    for (a, b) in edges(polygon) {
        if edge_distance(q, a, b) <= tolerance {
            return Location::Boundary;
        }
        if (a.y > q.y) != (b.y > q.y) {
            let x = a.x + (q.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if q.x < x {
                inside = !inside;
            }
        }
    }
    if inside {
        Location::Inside
    } else {
        Location::Outside
    }
}

/// A point strictly inside the polygon.
///
/// Casts a horizontal line through the middle of the bounds and returns the
/// midpoint of the widest interior interval; falls back to the vertex
/// centroid when the scanline finds nothing (e.g. it runs along an edge).
pub fn interior_point(polygon: &[DVec2]) -> DVec2 {
    let bbox = BoundingBox::from_points(polygon);
    let y = 0.5 * (bbox.min.y + bbox.max.y);

    let mut crossings: Vec<f64> = edges(polygon)
        .filter(|(a, b)| (a.y > y) != (b.y > y))
        .map(|(a, b)| a.x + (y - a.y) * (b.x - a.x) / (b.y - a.y))
        .collect();
    crossings.sort_by(f64::total_cmp);

    crossings
        .chunks_exact(2)
        .max_by(|l, r| (l[1] - l[0]).total_cmp(&(r[1] - r[0])))
        .map(|pair| DVec2::new(0.5 * (pair[0] + pair[1]), y))
        .unwrap_or_else(|| centroid(polygon))
}

fn centroid(points: &[DVec2]) -> DVec2 {
    if points.is_empty() {
        return DVec2::ZERO;
    }
    points.iter().copied().sum::<DVec2>() / points.len() as f64
}

// =============================================================================
// SEGMENTS
// =============================================================================

fn coord(p: DVec2) -> Coord<f64> {
    Coord { x: p.x, y: p.y }
}

fn orientation(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    orient2d(coord(a), coord(b), coord(c))
}

/// Distance from `q` to segment `[a, b]` in the plane.
fn edge_distance(q: DVec2, a: DVec2, b: DVec2) -> f64 {
    distance_to_segment(q.extend(0.0), a.extend(0.0), b.extend(0.0))
}

/// Whether segments `[a, b]` and `[c, d]` cross or touch, including
/// endpoints closer than `tolerance` to the other segment.
pub fn segments_touch(a: DVec2, b: DVec2, c: DVec2, d: DVec2, tolerance: f64) -> bool {
    let d1 = orientation(c, d, a);
    let d2 = orientation(c, d, b);
    let d3 = orientation(a, b, c);
    let d4 = orientation(a, b, d);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    edge_distance(a, c, d) <= tolerance
        || edge_distance(b, c, d) <= tolerance
        || edge_distance(c, a, b) <= tolerance
        || edge_distance(d, a, b) <= tolerance
}

/// Whether any edge of `first` crosses or touches any edge of `second`.
pub fn boundaries_touch(first: &[DVec2], second: &[DVec2], tolerance: f64) -> bool {
    edges(first).any(|(a, b)| {
        let edge_box = BoundingBox::from_points(&[a, b]);
        edges(second).any(|(c, d)| {
            edge_box.intersects(&BoundingBox::from_points(&[c, d]), tolerance)
                && segments_touch(a, b, c, d, tolerance)
        })
    })
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TOL: f64 = 1e-9;

    fn square(min: f64, max: f64) -> Vec<DVec2> {
        vec![
            DVec2::new(min, min),
            DVec2::new(max, min),
            DVec2::new(max, max),
            DVec2::new(min, max),
        ]
    }

    #[test]
    fn test_signed_area_orientation() {
        let ccw = square(0.0, 2.0);
        assert_relative_eq!(signed_area(&ccw), 4.0);
        let cw: Vec<_> = ccw.iter().rev().copied().collect();
        assert_relative_eq!(signed_area(&cw), -4.0);
    }

    #[test]
    fn test_locate() {
        let poly = square(0.0, 1.0);
        assert_eq!(locate(DVec2::new(0.5, 0.5), &poly, TOL), Location::Inside);
        assert_eq!(locate(DVec2::new(1.0, 0.5), &poly, TOL), Location::Boundary);
        assert_eq!(locate(DVec2::new(2.0, 0.5), &poly, TOL), Location::Outside);
    }

    #[test]
    fn test_segments_touch() {
        let o = DVec2::ZERO;
        assert!(segments_touch(o, DVec2::new(2.0, 2.0), DVec2::new(0.0, 2.0), DVec2::new(2.0, 0.0), TOL));
        // T-junction
        assert!(segments_touch(o, DVec2::new(2.0, 0.0), DVec2::new(1.0, 0.0), DVec2::new(1.0, 1.0), TOL));
        // Disjoint parallel
        assert!(!segments_touch(o, DVec2::new(1.0, 0.0), DVec2::new(0.0, 1.0), DVec2::new(1.0, 1.0), TOL));
    }

    #[test]
    fn test_edge_distance_clamps_to_endpoints() {
        let (a, b) = (DVec2::ZERO, DVec2::new(2.0, 0.0));
        assert_relative_eq!(edge_distance(DVec2::new(1.0, -0.5), a, b), 0.5);
        assert_relative_eq!(edge_distance(DVec2::new(5.0, 4.0), a, b), 5.0);
        assert_relative_eq!(edge_distance(DVec2::new(0.0, 3.0), a, a), 3.0);
        // Endpoint within tolerance of the other segment, no crossing.
        let near = DVec2::new(1.0, TOL / 2.0);
        assert!(segments_touch(a, b, near, DVec2::new(1.0, 1.0), TOL));
    }

    #[test]
    fn test_interior_point_of_concave_polygon() {
        // U shape: the vertex centroid would fall in the notch.
        let u = vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(3.0, 0.0),
            DVec2::new(3.0, 3.0),
            DVec2::new(2.0, 3.0),
            DVec2::new(2.0, 1.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(1.0, 3.0),
            DVec2::new(0.0, 3.0),
        ];
        let p = interior_point(&u);
        assert_eq!(locate(p, &u, TOL), Location::Inside);
    }

    #[test]
    fn test_bbox() {
        let outer = BoundingBox::from_points(&square(0.0, 10.0));
        let inner = BoundingBox::from_points(&square(2.0, 3.0));
        assert!(outer.contains_box(&inner));
        assert!(!inner.contains_box(&outer));
        assert!(outer.intersects(&inner, 0.0));
    }
}
