//! # Error Types
//!
//! Session-level error wrapping the errors of every layer it drives. A
//! failed command leaves the session unchanged and is not journaled.

use config::constants::ConfigError;
use planar_domain::TopologyError;
use sizing_field::FieldError;
use thiserror::Error;

/// Errors from applying commands, replaying journals and exporting.
#[derive(Debug, PartialEq, Error)]
pub enum SessionError {
    /// Entity store, loop or surface failure.
    #[error("Topology error: {0}")]
    Topology(#[from] TopologyError),

    /// Field definition or evaluation failure.
    #[error("Field error: {0}")]
    Field(#[from] FieldError),

    /// Invalid size bounds.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Export needs at least one surface and a background field.
    #[error("Incomplete domain: {message}")]
    IncompleteDomain {
        /// What is missing.
        message: String,
    },

    /// A journal line could not be read or written.
    #[error("Journal error at line {line}: {message}")]
    Journal {
        /// 1-based line number (0 when writing).
        line: usize,
        /// Parser message.
        message: String,
    },
}

impl SessionError {
    /// Creates an incomplete domain error.
    pub fn incomplete(message: impl Into<String>) -> Self {
        Self::IncompleteDomain {
            message: message.into(),
        }
    }
}

/// Result type alias for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
