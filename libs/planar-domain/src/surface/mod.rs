//! # Surface Builder
//!
//! Assembles a multiply-connected plane surface from one outer loop and any
//! number of hole loops, and resolves stored surfaces into oriented boundary
//! primitives for the mesher.
//!
//! ## Orientation
//!
//! Surfaces use the outer loop counter-clockwise and every hole clockwise.
//! Loops keep the winding they were built with; a surface only records which
//! of its loops it traverses backwards.
//!
//! ## Hole Rules
//!
//! - Each hole lies strictly inside the outer boundary and shares no point or
//!   curve with it → [`TopologyError::Containment`]
//! - Holes are pairwise disjoint: no shared entities, no touching or crossing
//!   edges, no nesting → [`TopologyError::Overlap`]

#[cfg(test)]
mod tests;

use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::arena::Handle;
use crate::curve::CurveKind;
use crate::error::{TopologyError, TopologyResult};
use crate::ids::{CurveId, EntityKind, LoopId, PointId, SurfaceId};
use crate::loops::{CurveLoop, Orientation};
use crate::polygon::{boundaries_touch, interior_point, locate, Location};
use crate::store::EntityStore;

// =============================================================================
// SURFACE
// =============================================================================

/// A loop as used by one surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceLoop {
    /// Generation-checked loop reference.
    pub handle: Handle<LoopId>,
    /// True when the surface traverses the loop against its stored winding.
    pub reversed: bool,
}

impl SurfaceLoop {
    /// Loop id.
    pub fn id(&self) -> LoopId {
        self.handle.id
    }
}

/// A validated plane surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    /// Outer boundary, traversed counter-clockwise.
    pub outer: SurfaceLoop,
    /// Holes in declaration order, each traversed clockwise.
    pub holes: Vec<SurfaceLoop>,
}

// =============================================================================
// RESOLVED BOUNDARY
// =============================================================================

/// Shape of one boundary primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PrimitiveKind {
    /// Straight segment.
    Line,
    /// Circular arc around `center`.
    Arc {
        /// Center point id.
        center: PointId,
        /// Center coordinates.
        center_position: DVec3,
    },
}

/// A curve of a resolved loop, with endpoints already swapped for traversal
/// direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundaryPrimitive {
    /// Source curve.
    pub curve: CurveId,
    /// Whether the curve is traversed end → start.
    pub reversed: bool,
    /// Point where traversal begins.
    pub start: PointId,
    /// Point where traversal ends.
    pub end: PointId,
    /// Coordinates of `start`.
    pub start_position: DVec3,
    /// Coordinates of `end`.
    pub end_position: DVec3,
    /// Line or arc.
    pub kind: PrimitiveKind,
}

/// A loop in the traversal order its surface requires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLoop {
    /// Source loop.
    pub id: LoopId,
    /// Winding after the surface-local reversal.
    pub orientation: Orientation,
    /// Primitives in traversal order.
    pub primitives: Vec<BoundaryPrimitive>,
}

/// A surface with every reference resolved to coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedSurface {
    /// Source surface.
    pub id: SurfaceId,
    /// Counter-clockwise outer boundary.
    pub outer: ResolvedLoop,
    /// Clockwise holes.
    pub holes: Vec<ResolvedLoop>,
}

// =============================================================================
// BUILDING
// =============================================================================

impl EntityStore {
    /// Validate and store a surface at the next free id.
    pub fn build_surface(&mut self, outer: LoopId, holes: &[LoopId]) -> TopologyResult<SurfaceId> {
        self.insert_surface(self.surfaces.next_id(), outer, holes)
    }

    /// Validate and store a surface at `id`.
    pub fn insert_surface(&mut self, id: SurfaceId, outer: LoopId, holes: &[LoopId]) -> TopologyResult<SurfaceId> {
        let surface = self.compose_surface(outer, holes)?;
        self.surfaces.insert(id, surface)?;
        log::info!("Created {id} with outer {outer} and {} hole(s)", holes.len());
        Ok(id)
    }

    /// Remove a surface, keeping its loops, curves and points.
    pub fn delete_surface(&mut self, id: SurfaceId) -> TopologyResult<()> {
        self.delete(EntityKind::Surface, id.0)
    }

    fn compose_surface(&self, outer_id: LoopId, hole_ids: &[LoopId]) -> TopologyResult<Surface> {
        let outer = self.check_loop_live(outer_id)?;
        let mut holes: Vec<(LoopId, &CurveLoop)> = Vec::with_capacity(hole_ids.len());
        for &hole_id in hole_ids {
            if hole_id == outer_id {
                return Err(TopologyError::containment(outer_id, hole_id, "is the outer loop itself"));
            }
            if holes.iter().any(|(id, _)| *id == hole_id) {
                return Err(TopologyError::overlap(hole_id, hole_id, "is listed twice"));
            }
            holes.push((hole_id, self.check_loop_live(hole_id)?));
        }

        let tolerance = self.config.tolerance;
        let outer_curves = outer.curve_ids();
        let hole_curves: Vec<BTreeSet<CurveId>> = holes.iter().map(|(_, l)| l.curve_ids()).collect();

        for ((hole_id, hole), curves) in holes.iter().zip(&hole_curves) {
            let fail = |message: &str| Err(TopologyError::containment(outer_id, *hole_id, message));
            if !hole.point_ids.is_disjoint(&outer.point_ids) || !curves.is_disjoint(&outer_curves) {
                return fail("shares points or curves with the outer boundary");
            }
            if !outer.bbox.contains_box(&hole.bbox) {
                return fail("extends beyond the outer bounds");
            }
            if boundaries_touch(&outer.polyline, &hole.polyline, tolerance) {
                return fail("crosses or touches the outer boundary");
            }
            let probe = interior_point(&hole.polyline);
            let all_inside = hole
                .polyline
                .iter()
                .chain(std::iter::once(&probe))
                .all(|&q| locate(q, &outer.polyline, tolerance) == Location::Inside);
            if !all_inside {
                return fail("lies outside the outer boundary");
            }
        }

        for i in 0..holes.len() {
            for j in (i + 1)..holes.len() {
                let ((first_id, first), (second_id, second)) = (holes[i], holes[j]);
                let fail = |message: &str| Err(TopologyError::overlap(first_id, second_id, message));
                if !first.point_ids.is_disjoint(&second.point_ids) || !hole_curves[i].is_disjoint(&hole_curves[j]) {
                    return fail("share points or curves");
                }
                if !first.bbox.intersects(&second.bbox, tolerance) {
                    continue;
                }
                if boundaries_touch(&first.polyline, &second.polyline, tolerance) {
                    return fail("cross or touch");
                }
                let nested = locate(second.polyline[0], &first.polyline, tolerance) != Location::Outside
                    || locate(first.polyline[0], &second.polyline, tolerance) != Location::Outside;
                if nested {
                    return fail("are nested");
                }
            }
        }

        let surface_loop = |id: LoopId, curve_loop: &CurveLoop, wanted: Orientation| -> TopologyResult<SurfaceLoop> {
            Ok(SurfaceLoop {
                handle: self.loops.handle(id)?,
                reversed: curve_loop.orientation != wanted,
            })
        };
        Ok(Surface {
            outer: surface_loop(outer_id, outer, Orientation::CounterClockwise)?,
            holes: holes
                .iter()
                .map(|(id, l)| surface_loop(*id, *l, Orientation::Clockwise))
                .collect::<TopologyResult<_>>()?,
        })
    }

    // =========================================================================
    // RESOLUTION
    // =========================================================================

    /// Resolve a surface into oriented primitives, failing if any entity it
    /// depends on was deleted since it was built.
    pub fn resolve_surface(&self, id: SurfaceId) -> TopologyResult<ResolvedSurface> {
        let surface = self.surfaces.get(id)?;
        Ok(ResolvedSurface {
            id,
            outer: self.resolve_loop(&surface.outer)?,
            holes: surface
                .holes
                .iter()
                .map(|hole| self.resolve_loop(hole))
                .collect::<TopologyResult<_>>()?,
        })
    }

    fn resolve_loop(&self, surface_loop: &SurfaceLoop) -> TopologyResult<ResolvedLoop> {
        self.loops.resolve(surface_loop.handle)?;
        let curve_loop = self.check_loop_live(surface_loop.id())?;

        let mut edges = curve_loop.edges.clone();
        if surface_loop.reversed {
            edges.reverse();
        }

        let mut primitives = Vec::with_capacity(edges.len());
        for edge in edges {
            let reversed = edge.curve.reversed != surface_loop.reversed;
            let curve = self.curves.resolve(edge.handle)?;
            let (start, end, kind) = match curve.kind {
                CurveKind::Line { start, end } => (start, end, PrimitiveKind::Line),
                CurveKind::Arc { start, center, end } => (
                    start,
                    end,
                    PrimitiveKind::Arc {
                        center: center.id,
                        center_position: self.points.resolve(center)?.position,
                    },
                ),
            };
            let (start, end) = if reversed { (end, start) } else { (start, end) };
            primitives.push(BoundaryPrimitive {
                curve: edge.curve.curve,
                reversed,
                start: start.id,
                end: end.id,
                start_position: self.points.resolve(start)?.position,
                end_position: self.points.resolve(end)?.position,
                kind,
            });
        }

        let orientation = if surface_loop.reversed {
            curve_loop.orientation.reversed()
        } else {
            curve_loop.orientation
        };
        Ok(ResolvedLoop {
            id: surface_loop.id(),
            orientation,
            primitives,
        })
    }
}
