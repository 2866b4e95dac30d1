//! # Entity Store
//!
//! Owns every point, curve, loop and surface of a domain, keyed by typed id.
//! Entities are immutable once created; the only mutation is deletion, which
//! tombstones the id.
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec3;
//! use planar_domain::{EntityKind, EntityStore, TopologyError};
//!
//! let mut store = EntityStore::default();
//! let a = store.add_point(DVec3::new(0.0, 0.0, 0.0), None).unwrap();
//! let b = store.add_point(DVec3::new(1.0, 0.0, 0.0), Some(0.1)).unwrap();
//! let line = store.add_line(a, b).unwrap();
//!
//! store.delete(EntityKind::Curve, line.0).unwrap();
//! assert!(matches!(
//!     store.curve(line),
//!     Err(TopologyError::DeletedReference { .. })
//! ));
//! ```


use config::constants::DomainConfig;
use glam::DVec3;

use crate::arena::{Arena, Handle};
use crate::curve::{Curve, CurveGeometry, CurveKind, Point};
use crate::error::{TopologyError, TopologyResult};
use crate::ids::{CurveId, EntityKind, LoopId, PointId, SurfaceId};
use crate::loops::CurveLoop;
use crate::surface::Surface;

/// Id-keyed storage for the boundary representation of a domain.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    pub(crate) config: DomainConfig,
    pub(crate) points: Arena<PointId, Point>,
    pub(crate) curves: Arena<CurveId, Curve>,
    pub(crate) loops: Arena<LoopId, CurveLoop>,
    pub(crate) surfaces: Arena<SurfaceId, Surface>,
}

impl EntityStore {
    /// Create an empty store with the given geometry settings.
    pub fn new(config: DomainConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Geometry settings.
    pub fn config(&self) -> &DomainConfig {
        &self.config
    }

    // =========================================================================
    // POINTS
    // =========================================================================

    /// Create a point at the next free id.
    pub fn add_point(&mut self, position: DVec3, size_hint: Option<f64>) -> TopologyResult<PointId> {
        self.insert_point(self.points.next_id(), position, size_hint)
    }

    /// Create a point at a caller-chosen id.
    pub fn insert_point(
        &mut self,
        id: PointId,
        position: DVec3,
        size_hint: Option<f64>,
    ) -> TopologyResult<PointId> {
        if !position.is_finite() {
            return Err(TopologyError::geometry(format!(
                "point coordinates must be finite, got {position}"
            )));
        }
        if let Some(size) = size_hint {
            if !(size > 0.0) || !size.is_finite() {
                return Err(TopologyError::geometry(format!(
                    "size hint must be positive, got {size}"
                )));
            }
        }
        self.points.insert(id, Point { position, size_hint })?;
        log::debug!("Created {id} at {position}");
        Ok(id)
    }

    /// Look up a live point.
    pub fn point(&self, id: PointId) -> TopologyResult<&Point> {
        Ok(self.points.get(id)?)
    }

    /// Live points in id order.
    pub fn points(&self) -> impl Iterator<Item = (PointId, &Point)> + '_ {
        self.points.iter()
    }

    // =========================================================================
    // CURVES
    // =========================================================================

    /// Create a straight line at the next free id.
    pub fn add_line(&mut self, start: PointId, end: PointId) -> TopologyResult<CurveId> {
        self.insert_line(self.curves.next_id(), start, end)
    }

    /// Create a straight line at a caller-chosen id.
    pub fn insert_line(&mut self, id: CurveId, start: PointId, end: PointId) -> TopologyResult<CurveId> {
        let (start, p0) = self.point_handle(start)?;
        let (end, p1) = self.point_handle(end)?;
        let geometry = CurveGeometry::segment(p0, p1, self.config.tolerance)?;
        self.insert_curve(id, CurveKind::Line { start, end }, geometry)
    }

    /// Create a circular arc at the next free id.
    pub fn add_arc(&mut self, start: PointId, center: PointId, end: PointId) -> TopologyResult<CurveId> {
        self.insert_arc(self.curves.next_id(), start, center, end)
    }

    /// Create a circular arc at a caller-chosen id.
    pub fn insert_arc(
        &mut self,
        id: CurveId,
        start: PointId,
        center: PointId,
        end: PointId,
    ) -> TopologyResult<CurveId> {
        let (start, p0) = self.point_handle(start)?;
        let (center, c) = self.point_handle(center)?;
        let (end, p1) = self.point_handle(end)?;
        let geometry = CurveGeometry::arc(p0, c, p1, self.config.tolerance)?;
        self.insert_curve(id, CurveKind::Arc { start, center, end }, geometry)
    }

    fn insert_curve(&mut self, id: CurveId, kind: CurveKind, geometry: CurveGeometry) -> TopologyResult<CurveId> {
        self.curves.insert(id, Curve { kind, geometry })?;
        log::debug!("Created {id} ({})", if matches!(kind, CurveKind::Arc { .. }) { "arc" } else { "line" });
        Ok(id)
    }

    fn point_handle(&self, id: PointId) -> TopologyResult<(Handle<PointId>, DVec3)> {
        let point = self.points.get(id)?;
        Ok((self.points.handle(id)?, point.position))
    }

    /// Look up a live curve.
    pub fn curve(&self, id: CurveId) -> TopologyResult<&Curve> {
        Ok(self.curves.get(id)?)
    }

    /// Look up a live curve and check that its points are still live.
    pub(crate) fn live_curve(&self, id: CurveId) -> TopologyResult<&Curve> {
        let curve = self.curves.get(id)?;
        for handle in curve.point_handles() {
            self.points.resolve(handle)?;
        }
        Ok(curve)
    }

    // =========================================================================
    // LOOPS AND SURFACES
    // =========================================================================

    /// Look up a live curve loop.
    pub fn curve_loop(&self, id: LoopId) -> TopologyResult<&CurveLoop> {
        Ok(self.loops.get(id)?)
    }

    /// Look up a live surface.
    pub fn surface(&self, id: SurfaceId) -> TopologyResult<&Surface> {
        Ok(self.surfaces.get(id)?)
    }

    /// Live surfaces in id order.
    pub fn surfaces(&self) -> impl Iterator<Item = (SurfaceId, &Surface)> + '_ {
        self.surfaces.iter()
    }

    // =========================================================================
    // DELETION
    // =========================================================================

    /// Tombstone an entity.
    ///
    /// Nothing cascades: deleting a surface keeps its loops, deleting a curve
    /// keeps the loops that use it (they fail on their next use). Fields are
    /// not stored here and always report `NotFound`.
    pub fn delete(&mut self, kind: EntityKind, id: u32) -> TopologyResult<()> {
        match kind {
            EntityKind::Point => self.points.remove(PointId(id)).map(drop)?,
            EntityKind::Curve => self.curves.remove(CurveId(id)).map(drop)?,
            EntityKind::Loop => self.loops.remove(LoopId(id)).map(drop)?,
            EntityKind::Surface => self.surfaces.remove(SurfaceId(id)).map(drop)?,
            EntityKind::Field => return Err(TopologyError::NotFound { kind, id }),
        }
        log::debug!("Deleted {kind} {id}");
        Ok(())
    }

    /// Number of live entities of a kind.
    pub fn count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Point => self.points.len(),
            EntityKind::Curve => self.curves.len(),
            EntityKind::Loop => self.loops.len(),
            EntityKind::Surface => self.surfaces.len(),
            EntityKind::Field => 0,
        }
    }
}
