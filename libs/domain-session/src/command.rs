//! # Commands
//!
//! The operations a session accepts, in a serializable form. A journal is
//! one JSON object per line, replayed in order.
//!
//! ## Example
//!
//! ```rust
//! use domain_session::{journal, Command};
//!
//! let text = r#"{"command":"point","x":4.0,"y":0.5}
//! {"command":"length_max","value":0.1}"#;
//! let commands = journal::from_jsonl(text).unwrap();
//! assert_eq!(commands.len(), 2);
//! assert!(matches!(commands[1], Command::LengthMax { value } if value == 0.1));
//! ```

use planar_domain::{EntityKind, SignedCurve};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One session operation.
///
/// Creation commands take an optional `id`; when it is absent the next free
/// id is used, and the journal records the id that was assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// Create a point.
    Point {
        /// Requested id.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<u32>,
        /// X coordinate.
        x: f64,
        /// Y coordinate.
        y: f64,
        /// Z coordinate.
        #[serde(default)]
        z: f64,
        /// Seed mesh size.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        size: Option<f64>,
    },

    /// Create a straight line.
    Line {
        /// Requested id.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<u32>,
        /// Start point.
        start: u32,
        /// End point.
        end: u32,
    },

    /// Create a circular arc.
    Arc {
        /// Requested id.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<u32>,
        /// Start point.
        start: u32,
        /// Center point.
        center: u32,
        /// End point.
        end: u32,
    },

    /// Create a closed loop from signed curve ids.
    CurveLoop {
        /// Requested id.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<u32>,
        /// `+id` forward, `-id` backward.
        curves: Vec<SignedCurve>,
    },

    /// Create a plane surface; the first loop is the outer boundary.
    PlaneSurface {
        /// Requested id.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<u32>,
        /// Outer loop followed by holes.
        loops: Vec<u32>,
    },

    /// Delete an entity or field.
    Delete {
        /// Entity kind.
        kind: EntityKind,
        /// Id to delete.
        id: u32,
    },

    /// Distance field to points and curves.
    Attractor {
        /// Requested id.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<u32>,
        /// Attracting points.
        #[serde(default)]
        points: Vec<u32>,
        /// Attracting curves.
        #[serde(default)]
        curves: Vec<u32>,
    },

    /// Formula field.
    MathEval {
        /// Requested id.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<u32>,
        /// Formula text.
        expr: String,
        /// Symbol name → field id.
        #[serde(default)]
        deps: BTreeMap<String, u32>,
    },

    /// Size ramp over another field.
    Threshold {
        /// Requested id.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<u32>,
        /// Distance field.
        input: u32,
        /// Size near the feature.
        size_min: f64,
        /// Size far from the feature.
        size_max: f64,
        /// Ramp start.
        dist_min: f64,
        /// Ramp end.
        dist_max: f64,
        /// Logistic instead of linear ramp.
        #[serde(default)]
        sigmoid: bool,
    },

    /// Pointwise minimum of fields.
    Min {
        /// Requested id.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<u32>,
        /// Combined fields.
        fields: Vec<u32>,
    },

    /// Select the background field.
    Background {
        /// Field id.
        field: u32,
    },

    /// Unselect the background field.
    ClearBackground,

    /// Lower size bound.
    LengthMin {
        /// Bound value.
        value: f64,
    },

    /// Upper size bound.
    LengthMax {
        /// Bound value.
        value: f64,
    },
}

impl Command {
    /// Same command with the id it was executed at.
    pub(crate) fn with_assigned_id(mut self, assigned: u32) -> Self {
        match &mut self {
            Self::Point { id, .. }
            | Self::Line { id, .. }
            | Self::Arc { id, .. }
            | Self::CurveLoop { id, .. }
            | Self::PlaneSurface { id, .. }
            | Self::Attractor { id, .. }
            | Self::MathEval { id, .. }
            | Self::Threshold { id, .. }
            | Self::Min { id, .. } => *id = Some(assigned),
            Self::Delete { .. }
            | Self::Background { .. }
            | Self::ClearBackground
            | Self::LengthMin { .. }
            | Self::LengthMax { .. } => {}
        }
        self
    }
}

// =============================================================================
// TESTS
// =============================================================================
