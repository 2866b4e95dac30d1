//! # Error Types
//!
//! Errors raised while building and querying the planar domain. Every
//! failure is reported synchronously and leaves the store unchanged.
//!
//! ## Error Policy
//!
//! - NO fallback mechanisms when validation fails
//! - Stale references are distinguished from unknown ids
//! - Errors include the offending ids for debugging

use thiserror::Error;

use crate::arena::ArenaError;
use crate::ids::{EntityKind, LoopId};

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors from the entity store, loop composer and surface builder.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TopologyError {
    /// Malformed primitive, e.g. arc endpoints not equidistant from center.
    #[error("Geometry error: {message}")]
    Geometry {
        /// What is wrong with the primitive.
        message: String,
    },

    /// Consecutive curves of a loop do not meet.
    #[error("Open loop: curve {position} ends {gap:e} away from the start of the next curve")]
    OpenLoop {
        /// Index of the curve whose end misses its successor.
        position: usize,
        /// Distance between the end and the next start.
        gap: f64,
    },

    /// Loop has too few curves, repeats a curve, or encloses no area.
    #[error("Degenerate loop: {message}")]
    DegenerateLoop {
        /// Reason.
        message: String,
    },

    /// A hole is not strictly inside the outer boundary.
    #[error("Containment error: {hole} is not strictly inside {outer}: {message}")]
    Containment {
        /// Outer loop of the surface.
        outer: LoopId,
        /// Offending hole.
        hole: LoopId,
        /// Reason.
        message: String,
    },

    /// Two holes overlap, touch or share entities.
    #[error("Overlap error: {first} and {second} {message}")]
    Overlap {
        /// First hole.
        first: LoopId,
        /// Second hole.
        second: LoopId,
        /// Reason.
        message: String,
    },

    /// The id was never created (or is not live when deleting).
    #[error("{kind} {id} not found")]
    NotFound {
        /// Entity kind.
        kind: EntityKind,
        /// Raw id.
        id: u32,
    },

    /// The id was deleted; the reference is stale.
    #[error("{kind} {id} was deleted")]
    DeletedReference {
        /// Entity kind.
        kind: EntityKind,
        /// Raw id.
        id: u32,
    },

    /// Explicit id collides with a live entity.
    #[error("{kind} {id} already exists")]
    IdInUse {
        /// Entity kind.
        kind: EntityKind,
        /// Raw id.
        id: u32,
    },

    /// Id 0 cannot be assigned.
    #[error("{kind} id 0 is reserved")]
    InvalidId {
        /// Entity kind.
        kind: EntityKind,
    },
}

impl TopologyError {
    /// Creates a geometry error.
    pub fn geometry(message: impl Into<String>) -> Self {
        Self::Geometry {
            message: message.into(),
        }
    }

    /// Creates a degenerate loop error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateLoop {
            message: message.into(),
        }
    }

    /// Creates a containment error.
    pub fn containment(outer: LoopId, hole: LoopId, message: impl Into<String>) -> Self {
        Self::Containment {
            outer,
            hole,
            message: message.into(),
        }
    }

    /// Creates an overlap error.
    pub fn overlap(first: LoopId, second: LoopId, message: impl Into<String>) -> Self {
        Self::Overlap {
            first,
            second,
            message: message.into(),
        }
    }
}

impl From<ArenaError> for TopologyError {
    fn from(err: ArenaError) -> Self {
        match err {
            ArenaError::NotFound { kind, id } => Self::NotFound { kind, id },
            ArenaError::Deleted { kind, id } => Self::DeletedReference { kind, id },
            ArenaError::InUse { kind, id } => Self::IdInUse { kind, id },
            ArenaError::ZeroId { kind } => Self::InvalidId { kind },
        }
    }
}

// =============================================================================
// RESULT TYPE ALIAS
// =============================================================================

/// Result type alias for planar domain operations.
pub type TopologyResult<T> = Result<T, TopologyError>;

// =============================================================================
// TESTS
// =============================================================================
