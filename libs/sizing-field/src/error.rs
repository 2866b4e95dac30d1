//! # Error Types
//!
//! Errors raised while defining and evaluating sizing fields.
//!
//! Definition errors leave the graph unchanged. Evaluation errors are
//! reported per query point; the graph stays usable.

use thiserror::Error;

use planar_domain::arena::ArenaError;
use planar_domain::{EntityKind, TopologyError};
use sizing_expr::ExprError;

use crate::field::FieldId;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors from the field engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    /// Syntax error, unknown symbol or reserved dependency name.
    #[error("Expression error: {message}")]
    Expression {
        /// Reason.
        message: String,
    },

    /// The new field would depend on itself.
    #[error("Cyclic field: {field} would depend on itself through {}", format_path(.path))]
    Cyclic {
        /// Field being defined.
        field: FieldId,
        /// Dependency chain leading back to `field`.
        path: Vec<FieldId>,
    },

    /// Evaluation produced no usable size at a point.
    #[error("Domain error in {field}: {message}")]
    Domain {
        /// Field whose value failed.
        field: FieldId,
        /// Reason.
        message: String,
    },

    /// Invalid field parameters, e.g. an attractor with nothing to attract to.
    #[error("Invalid field definition: {message}")]
    Definition {
        /// Reason.
        message: String,
    },

    /// A background field is already selected.
    #[error("Background field is already set to {current}")]
    AlreadySet {
        /// Currently selected field.
        current: FieldId,
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

    /// Explicit id collides with a live field.
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

fn format_path(path: &[FieldId]) -> String {
    path.iter().map(|id| id.0.to_string()).collect::<Vec<_>>().join(" → ")
}

impl FieldError {
    /// Creates an expression error.
    pub fn expression(message: impl Into<String>) -> Self {
        Self::Expression {
            message: message.into(),
        }
    }

    /// Creates a domain error.
    pub fn domain(field: FieldId, message: impl Into<String>) -> Self {
        Self::Domain {
            field,
            message: message.into(),
        }
    }

    /// Creates a definition error.
    pub fn definition(message: impl Into<String>) -> Self {
        Self::Definition {
            message: message.into(),
        }
    }
}

impl From<ExprError> for FieldError {
    fn from(err: ExprError) -> Self {
        Self::expression(err.to_string())
    }
}

impl From<ArenaError> for FieldError {
    fn from(err: ArenaError) -> Self {
        match err {
            ArenaError::NotFound { kind, id } => Self::NotFound { kind, id },
            ArenaError::Deleted { kind, id } => Self::DeletedReference { kind, id },
            ArenaError::InUse { kind, id } => Self::IdInUse { kind, id },
            ArenaError::ZeroId { kind } => Self::InvalidId { kind },
        }
    }
}

/// Attractor sources are looked up in the entity store; its lookup failures
/// keep their kind.
impl From<TopologyError> for FieldError {
    fn from(err: TopologyError) -> Self {
        match err {
            TopologyError::NotFound { kind, id } => Self::NotFound { kind, id },
            TopologyError::DeletedReference { kind, id } => Self::DeletedReference { kind, id },
            other => Self::definition(other.to_string()),
        }
    }
}

// =============================================================================
// RESULT TYPE ALIAS
// =============================================================================

/// Result type alias for field operations.
pub type FieldResult<T> = Result<T, FieldError>;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cyclic_display_lists_path() {
        let err = FieldError::Cyclic {
            field: FieldId(1),
            path: vec![FieldId(1), FieldId(2), FieldId(1)],
        };
        assert!(err.to_string().contains("1 → 2 → 1"));
    }

    #[test]
    fn test_topology_lookup_errors_keep_kind() {
        let err = FieldError::from(TopologyError::DeletedReference {
            kind: EntityKind::Point,
            id: 4,
        });
        assert_eq!(err, FieldError::DeletedReference { kind: EntityKind::Point, id: 4 });
    }

    #[test]
    fn test_parse_error_is_expression_error() {
        let err = FieldError::from(ExprError::Empty);
        assert!(matches!(err, FieldError::Expression { .. }));
    }
}
