//! # Loop Composer
//!
//! Builds closed curve loops from signed curve references and caches their
//! sampled polyline, signed area, orientation and bounds.
//!
//! ## Validation Order
//!
//! 1. Non-empty, no curve id repeated with either sign
//! 2. Every curve and every point it references is live
//! 3. At least three curves, or exactly two arcs
//! 4. Each curve ends where the next one starts (within tolerance), including
//!    the closing pair
//! 5. The enclosed area is not zero
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec3;
//! use planar_domain::{EntityStore, Orientation, SignedCurve};
//!
//! let mut store = EntityStore::default();
//! let a = store.add_point(DVec3::new(0.0, 0.0, 0.0), None).unwrap();
//! let b = store.add_point(DVec3::new(1.0, 0.0, 0.0), None).unwrap();
//! let c = store.add_point(DVec3::new(0.0, 1.0, 0.0), None).unwrap();
//! let ab = store.add_line(a, b).unwrap();
//! let bc = store.add_line(b, c).unwrap();
//! let ca = store.add_line(c, a).unwrap();
//!
//! let id = store
//!     .build_loop(&[SignedCurve::forward(ab), SignedCurve::forward(bc), SignedCurve::forward(ca)])
//!     .unwrap();
//! assert_eq!(store.curve_loop(id).unwrap().orientation, Orientation::CounterClockwise);
//! ```


use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::arena::Handle;
use crate::error::{TopologyError, TopologyResult};
use crate::ids::{CurveId, LoopId, PointId, SignedCurve};
use crate::polygon::{signed_area, BoundingBox};
use crate::store::EntityStore;

// =============================================================================
// ORIENTATION
// =============================================================================

/// Winding direction of a closed loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Positive signed area.
    CounterClockwise,
    /// Negative signed area.
    Clockwise,
}

impl Orientation {
    /// Orientation of a non-zero signed area.
    pub fn from_area(area: f64) -> Self {
        if area > 0.0 {
            Self::CounterClockwise
        } else {
            Self::Clockwise
        }
    }

    /// Opposite winding.
    pub fn reversed(self) -> Self {
        match self {
            Self::CounterClockwise => Self::Clockwise,
            Self::Clockwise => Self::CounterClockwise,
        }
    }
}

// =============================================================================
// CURVE LOOP
// =============================================================================

/// One signed curve of a loop, pinned to the curve generation it was built
/// against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoopEdge {
    /// Curve and traversal direction.
    pub curve: SignedCurve,
    /// Generation-checked curve reference.
    pub handle: Handle<CurveId>,
}

/// A validated closed loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveLoop {
    /// Curves in traversal order.
    pub edges: Vec<LoopEdge>,
    /// Winding of the loop as written.
    pub orientation: Orientation,
    /// Shoelace area of `polyline`; sign matches `orientation`.
    pub signed_area: f64,
    /// Sampled boundary without the repeated closing vertex.
    pub polyline: Vec<DVec2>,
    /// Bounds of `polyline`.
    pub bbox: BoundingBox,
    /// Endpoints of the loop's curves. Arc centers are off the boundary and
    /// not listed.
    pub point_ids: BTreeSet<PointId>,
}

impl CurveLoop {
    /// Ids of the loop's curves.
    pub fn curve_ids(&self) -> BTreeSet<CurveId> {
        self.edges.iter().map(|edge| edge.curve.curve).collect()
    }

    /// Signed references in traversal order.
    pub fn signed_curves(&self) -> Vec<SignedCurve> {
        self.edges.iter().map(|edge| edge.curve).collect()
    }
}

// =============================================================================
// COMPOSITION
// =============================================================================

impl EntityStore {
    /// Validate a sequence of signed curves and store it as a loop at the
    /// next free id.
    pub fn build_loop(&mut self, curves: &[SignedCurve]) -> TopologyResult<LoopId> {
        self.insert_loop(self.loops.next_id(), curves)
    }

    /// Validate a sequence of signed curves and store it at `id`.
    pub fn insert_loop(&mut self, id: LoopId, curves: &[SignedCurve]) -> TopologyResult<LoopId> {
        let curve_loop = self.compose_loop(curves)?;
        let orientation = curve_loop.orientation;
        self.loops.insert(id, curve_loop)?;
        log::debug!("Created {id} from {} curves ({orientation:?})", curves.len());
        Ok(id)
    }

    /// Re-check that a stored loop still references live curves and points.
    pub(crate) fn check_loop_live(&self, id: LoopId) -> TopologyResult<&CurveLoop> {
        let curve_loop = self.loops.get(id)?;
        for edge in &curve_loop.edges {
            self.curves.resolve(edge.handle)?;
            self.live_curve(edge.curve.curve)?;
        }
        Ok(curve_loop)
    }

    fn compose_loop(&self, refs: &[SignedCurve]) -> TopologyResult<CurveLoop> {
        if refs.is_empty() {
            return Err(TopologyError::degenerate("loop has no curves"));
        }

        let mut seen = BTreeSet::new();
        for signed in refs {
            if !seen.insert(signed.curve) {
                return Err(TopologyError::degenerate(format!(
                    "{} is used more than once",
                    signed.curve
                )));
            }
        }

        let mut edges = Vec::with_capacity(refs.len());
        let mut geometries = Vec::with_capacity(refs.len());
        let mut point_ids = BTreeSet::new();
        let mut arcs = 0;
        for signed in refs {
            let curve = self.live_curve(signed.curve)?;
            edges.push(LoopEdge {
                curve: *signed,
                handle: self.curves.handle(signed.curve)?,
            });
            geometries.push((curve.geometry, signed.reversed));
            point_ids.extend([curve.start(), curve.end()]);
            if curve.is_arc() {
                arcs += 1;
            }
        }

        let n = refs.len();
        if n < 3 && !(n == 2 && arcs == 2) {
            return Err(TopologyError::degenerate(format!(
                "a loop needs at least 3 curves or 2 arcs, got {n}"
            )));
        }

        let tolerance = self.config.tolerance;
        for (position, (geometry, reversed)) in geometries.iter().enumerate() {
            let (_, end) = geometry.oriented_endpoints(*reversed);
            let (next_geometry, next_reversed) = &geometries[(position + 1) % n];
            let (next_start, _) = next_geometry.oriented_endpoints(*next_reversed);
            let gap = end.distance(next_start);
            if gap > tolerance {
                return Err(TopologyError::OpenLoop { position, gap });
            }
        }

        let mut polyline = Vec::new();
        for (geometry, reversed) in &geometries {
            let mut samples = geometry.sample(self.config.arc_segments);
            if *reversed {
                samples.reverse();
            }
            samples.pop();
            polyline.extend(samples);
        }

        let area = signed_area(&polyline);
        if area.abs() < tolerance {
            return Err(TopologyError::degenerate("loop encloses no area"));
        }

        Ok(CurveLoop {
            edges,
            orientation: Orientation::from_area(area),
            signed_area: area,
            bbox: BoundingBox::from_points(&polyline),
            polyline,
            point_ids,
        })
    }
}
