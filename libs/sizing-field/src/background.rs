//! # Background Field
//!
//! The size function handed to the mesher: an immutable snapshot of the
//! field graph, the selected field and the characteristic length bounds.
//! It is `Send + Sync` and can be shared across mesher threads.

use glam::DVec3;
use rayon::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

use config::constants::SizeBounds;
use planar_domain::arena::Handle;

use crate::error::{FieldError, FieldResult};
use crate::field::FieldId;
use crate::graph::FieldGraph;

/// Clamped target size at any point of the plane.
#[derive(Debug, Clone)]
pub struct BackgroundField {
    graph: Arc<FieldGraph>,
    field: Handle<FieldId>,
    bounds: SizeBounds,
}

impl BackgroundField {
    pub(crate) fn new(graph: FieldGraph, field: Handle<FieldId>, bounds: SizeBounds) -> Self {
        Self {
            graph: Arc::new(graph),
            field,
            bounds,
        }
    }

    /// Selected field.
    pub fn field(&self) -> FieldId {
        self.field.id
    }

    /// Clamp applied to every value.
    pub fn bounds(&self) -> SizeBounds {
        self.bounds
    }

    /// Target size at `q`, clamped to the bounds.
    ///
    /// Fails with a domain error when the clamped value is not positive.
    pub fn evaluate(&self, q: DVec3) -> FieldResult<f64> {
        let raw = self.graph.evaluate_handle(self.field, q, &mut HashMap::new())?;
        let value = self.bounds.clamp(raw);
        if !(value > 0.0) {
            log::warn!("Background {} collapsed to {value} at {q}", self.field.id);
            return Err(FieldError::domain(
                self.field.id,
                format!("size {value} at {q} is not positive"),
            ));
        }
        Ok(value)
    }

    /// Evaluate many points in parallel; the first failure is returned.
    pub fn evaluate_many(&self, points: &[DVec3]) -> FieldResult<Vec<f64>> {
        points.par_iter().map(|&q| self.evaluate(q)).collect()
    }
}

// =============================================================================
// TESTS
// =============================================================================
