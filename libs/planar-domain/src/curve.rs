//! # Points and Curves
//!
//! Geometric primitives of the boundary representation: points with an
//! optional seed size, straight lines and circular arcs.
//!
//! Arcs are defined by (start, center, end) and sweep the minor angle from
//! start to end in the plane of their center. Planar computations use the xy
//! projection; z is carried through unchanged.

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

use config::constants::arc_segments_for_sweep;

use crate::arena::Handle;
use crate::error::{TopologyError, TopologyResult};
use crate::ids::PointId;

// =============================================================================
// POINT
// =============================================================================

/// A geometric point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Coordinates; z is 0 for planar domains.
    pub position: DVec3,
    /// Seed mesh size attached at creation, distinct from field values.
    pub size_hint: Option<f64>,
}

impl Point {
    /// Planar projection.
    pub fn xy(&self) -> DVec2 {
        self.position.truncate()
    }
}

// =============================================================================
// CURVE
// =============================================================================

/// Point references of a curve, pinned to the generation they were created
/// against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurveKind {
    /// Straight segment.
    Line {
        /// First endpoint.
        start: Handle<PointId>,
        /// Second endpoint.
        end: Handle<PointId>,
    },
    /// Circular arc.
    Arc {
        /// First endpoint.
        start: Handle<PointId>,
        /// Center of curvature.
        center: Handle<PointId>,
        /// Second endpoint.
        end: Handle<PointId>,
    },
}

/// A directed curve: its point references plus the geometry resolved at
/// creation. Points are immutable, so the cached geometry stays valid for as
/// long as the referenced handles are live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    /// Referenced points.
    pub kind: CurveKind,
    /// Resolved shape.
    pub geometry: CurveGeometry,
}

impl Curve {
    /// Start point id.
    pub fn start(&self) -> PointId {
        match self.kind {
            CurveKind::Line { start, .. } | CurveKind::Arc { start, .. } => start.id,
        }
    }

    /// End point id.
    pub fn end(&self) -> PointId {
        match self.kind {
            CurveKind::Line { end, .. } | CurveKind::Arc { end, .. } => end.id,
        }
    }

    /// Every referenced point handle.
    pub fn point_handles(&self) -> Vec<Handle<PointId>> {
        match self.kind {
            CurveKind::Line { start, end } => vec![start, end],
            CurveKind::Arc { start, center, end } => vec![start, center, end],
        }
    }

    /// Whether this curve is an arc.
    pub fn is_arc(&self) -> bool {
        matches!(self.kind, CurveKind::Arc { .. })
    }
}

// =============================================================================
// CURVE GEOMETRY
// =============================================================================

/// Resolved curve shape in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CurveGeometry {
    /// Straight segment from `start` to `end`.
    Segment {
        /// Start position.
        start: DVec3,
        /// End position.
        end: DVec3,
    },
    /// Circular arc around `center`.
    Arc {
        /// Start position.
        start: DVec3,
        /// Center position.
        center: DVec3,
        /// End position.
        end: DVec3,
        /// Radius in the xy plane.
        radius: f64,
        /// Polar angle of `start` around `center`.
        start_angle: f64,
        /// Signed sweep in `(-π, π)`; positive is counter-clockwise.
        sweep: f64,
    },
}

impl CurveGeometry {
    /// Validate and build a straight segment.
    pub fn segment(start: DVec3, end: DVec3, tolerance: f64) -> TopologyResult<Self> {
        if start.distance(end) < tolerance {
            return Err(TopologyError::geometry("line endpoints coincide"));
        }
        Ok(Self::Segment { start, end })
    }

    /// Validate and build a circular arc.
    ///
    /// Fails when start/end are not equidistant from the center within
    /// `tolerance`, when the radius vanishes, when start and end coincide, or
    /// when the sweep is a half turn (no unique minor arc).
    pub fn arc(start: DVec3, center: DVec3, end: DVec3, tolerance: f64) -> TopologyResult<Self> {
        let r_start = start.distance(center);
        let r_end = end.distance(center);
        if (r_start - r_end).abs() > tolerance {
            return Err(TopologyError::geometry(format!(
                "arc endpoints are not equidistant from the center ({r_start} vs {r_end})"
            )));
        }
        if r_start < tolerance {
            return Err(TopologyError::geometry("arc radius is zero"));
        }
        if start.distance(end) < tolerance {
            return Err(TopologyError::geometry("arc endpoints coincide"));
        }

        let c = center.truncate();
        let a = start.truncate() - c;
        let b = end.truncate() - c;
        let radius = a.length();
        let start_angle = a.y.atan2(a.x);
        let sweep = normalize_angle(b.y.atan2(b.x) - start_angle);

        if (PI - sweep.abs()) * radius < tolerance {
            return Err(TopologyError::geometry(
                "arc spans half a turn; the sweep direction is ambiguous",
            ));
        }

        Ok(Self::Arc {
            start,
            center,
            end,
            radius,
            start_angle,
            sweep,
        })
    }

    /// Start position.
    pub fn start(&self) -> DVec3 {
        match *self {
            Self::Segment { start, .. } | Self::Arc { start, .. } => start,
        }
    }

    /// End position.
    pub fn end(&self) -> DVec3 {
        match *self {
            Self::Segment { end, .. } | Self::Arc { end, .. } => end,
        }
    }

    /// Endpoint positions for a traversal direction.
    pub fn oriented_endpoints(&self, reversed: bool) -> (DVec3, DVec3) {
        if reversed {
            (self.end(), self.start())
        } else {
            (self.start(), self.end())
        }
    }

    /// Planar polyline from start to end, both included.
    ///
    /// Segments yield their two endpoints; arcs are sampled with
    /// `segments_per_turn` resolution.
    pub fn sample(&self, segments_per_turn: u32) -> Vec<DVec2> {
        match *self {
            Self::Segment { start, end } => vec![start.truncate(), end.truncate()],
            Self::Arc {
                start,
                center,
                end,
                radius,
                start_angle,
                sweep,
            } => {
                let n = arc_segments_for_sweep(sweep, segments_per_turn);
                let c = center.truncate();
                let mut points = Vec::with_capacity(n as usize + 1);
                points.push(start.truncate());
                for k in 1..n {
                    let theta = start_angle + sweep * (k as f64 / n as f64);
                    let (sin, cos) = theta.sin_cos();
                    points.push(c + DVec2::new(cos, sin) * radius);
                }
                points.push(end.truncate());
                points
            }
        }
    }

    /// Euclidean distance from `q` to the nearest point of the curve.
    pub fn distance_to(&self, q: DVec3) -> f64 {
        match *self {
            Self::Segment { start, end } => distance_to_segment(q, start, end),
            Self::Arc {
                start,
                center,
                end,
                radius,
                start_angle,
                sweep,
            } => {
                let rel = q.truncate() - center.truncate();
                let dz = q.z - center.z;
                let angle = rel.y.atan2(rel.x);
                if angle_within_sweep(angle, start_angle, sweep) {
                    let planar = (rel.length() - radius).abs();
                    (planar * planar + dz * dz).sqrt()
                } else {
                    q.distance(start).min(q.distance(end))
                }
            }
        }
    }
}

/// Wrap an angle into `(-π, π]`.
pub(crate) fn normalize_angle(angle: f64) -> f64 {
    let mut a = angle % TAU;
    if a <= -PI {
        a += TAU;
    } else if a > PI {
        a -= TAU;
    }
    a
}

/// Whether polar `angle` lies on the arc starting at `start_angle` with
/// signed `sweep`.
fn angle_within_sweep(angle: f64, start_angle: f64, sweep: f64) -> bool {
    let offset = normalize_angle(angle - start_angle);
    if sweep >= 0.0 {
        (0.0..=sweep).contains(&offset)
    } else {
        (sweep..=0.0).contains(&offset)
    }
}

/// Distance from `q` to segment `[a, b]`.
pub fn distance_to_segment(q: DVec3, a: DVec3, b: DVec3) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return q.distance(a);
    }
    let t = ((q - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    q.distance(a + ab * t)
}

// =============================================================================
// TESTS
// =============================================================================
