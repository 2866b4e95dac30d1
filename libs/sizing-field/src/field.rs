//! # Field Definitions
//!
//! Stored form of each sizing field kind. Dependencies are generation-checked
//! handles so a field deleted (or replaced) after its dependents were defined
//! is reported instead of silently substituted.

use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use planar_domain::arena::Handle;
use planar_domain::{CurveGeometry, CurveId, EntityId, EntityKind, PointId};
use sizing_expr::Expr;

use crate::error::{FieldError, FieldResult};

// =============================================================================
// FIELD ID
// =============================================================================

/// Identity of a sizing field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(pub u32);

impl EntityId for FieldId {
    const KIND: EntityKind = EntityKind::Field;

    fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field {}", self.0)
    }
}

// =============================================================================
// THRESHOLD
// =============================================================================

/// Distance-to-size ramp of a threshold field.
///
/// Below `dist_min` the size is `size_min`, above `dist_max` it is
/// `size_max`; in between it is interpolated linearly, or along a logistic
/// curve when `sigmoid` is set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdParams {
    /// Size at or below `dist_min`.
    pub size_min: f64,
    /// Size at or above `dist_max`.
    pub size_max: f64,
    /// Start of the ramp.
    pub dist_min: f64,
    /// End of the ramp.
    pub dist_max: f64,
    /// Smooth logistic ramp instead of a linear one.
    pub sigmoid: bool,
}

impl ThresholdParams {
    /// Reject non-finite values and an empty or inverted ramp.
    pub fn validate(&self) -> FieldResult<()> {
        let values = [self.size_min, self.size_max, self.dist_min, self.dist_max];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(FieldError::definition("threshold parameters must be finite"));
        }
        if self.dist_min < 0.0 || self.dist_max <= self.dist_min {
            return Err(FieldError::definition(format!(
                "threshold needs 0 <= dist_min < dist_max, got {} and {}",
                self.dist_min, self.dist_max
            )));
        }
        Ok(())
    }

    /// Size at `distance`.
    pub fn apply(&self, distance: f64) -> f64 {
        if distance <= self.dist_min {
            return self.size_min;
        }
        if distance >= self.dist_max {
            return self.size_max;
        }
        let r = (distance - self.dist_min) / (self.dist_max - self.dist_min);
        let t = if self.sigmoid {
            1.0 / (1.0 + (-12.0 * (r - 0.5)).exp())
        } else {
            r
        };
        self.size_min + (self.size_max - self.size_min) * t
    }
}

// =============================================================================
// FIELD KINDS
// =============================================================================

/// Attractor geometry captured when the field was defined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttractorSource {
    /// Attracting points and their coordinates at definition time.
    pub points: Vec<(PointId, DVec3)>,
    /// Attracting curves and their geometry at definition time.
    pub curves: Vec<(CurveId, CurveGeometry)>,
}

impl AttractorSource {
    /// Distance from `q` to the nearest attractor.
    pub fn distance(&self, q: DVec3) -> f64 {
        let to_points = self.points.iter().map(|(_, p)| q.distance(*p));
        let to_curves = self.curves.iter().map(|(_, c)| c.distance_to(q));
        to_points.chain(to_curves).fold(f64::INFINITY, f64::min)
    }
}

/// A formula over dependency fields and coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MathEvalSource {
    /// Formula as written.
    pub source: String,
    /// Parsed formula.
    pub expr: Expr,
    /// Symbol name → dependency.
    pub deps: BTreeMap<String, Handle<FieldId>>,
}

/// Kinds of sizing fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldKind {
    /// Distance to points and curves.
    Attractor(AttractorSource),
    /// Arithmetic combination of other fields.
    MathEval(MathEvalSource),
    /// Ramp applied to another field's value.
    Threshold {
        /// Field providing the distance.
        input: Handle<FieldId>,
        /// Ramp parameters.
        params: ThresholdParams,
    },
    /// Pointwise minimum.
    Min {
        /// Combined fields.
        fields: Vec<Handle<FieldId>>,
    },
}

impl FieldKind {
    /// Direct dependencies.
    pub fn dependencies(&self) -> Vec<Handle<FieldId>> {
        match self {
            Self::Attractor(_) => Vec::new(),
            Self::MathEval(source) => source.deps.values().copied().collect(),
            Self::Threshold { input, .. } => vec![*input],
            Self::Min { fields } => fields.clone(),
        }
    }

    /// Short kind name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Attractor(_) => "attractor",
            Self::MathEval(_) => "math-eval",
            Self::Threshold { .. } => "threshold",
            Self::Min { .. } => "min",
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
