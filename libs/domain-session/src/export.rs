//! # Mesher Input
//!
//! What a session hands to the triangulator: oriented surface boundaries,
//! the clamped background size field, and per-point seed sizes.

use glam::DVec3;
use std::collections::BTreeMap;

use planar_domain::{PointId, ResolvedSurface};
use sizing_field::{BackgroundField, FieldResult};

/// A complete meshing domain.
#[derive(Debug, Clone)]
pub struct MeshDomain {
    /// Live surfaces in id order, outer loops CCW and holes CW.
    pub surfaces: Vec<ResolvedSurface>,
    /// Clamped target size function.
    pub background: BackgroundField,
    /// Seed sizes of points that carry one, clamped to the size bounds.
    pub point_sizes: BTreeMap<PointId, f64>,
}

impl MeshDomain {
    /// Target size at `q`.
    pub fn size_at(&self, q: DVec3) -> FieldResult<f64> {
        self.background.evaluate(q)
    }
}
