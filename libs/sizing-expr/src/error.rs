//! # Expression Errors
//!
//! Error types for the sizing expression lexer and parser.
//!
//! ## Example
//!
//! ```rust
//! use sizing_expr::parse;
//!
//! let err = parse("0.05 * ").unwrap_err();
//! assert!(err.to_string().contains("end of expression"));
//! ```

use crate::span::Span;
use thiserror::Error;

// =============================================================================
// EXPR ERROR
// =============================================================================

/// Errors raised while turning formula text into an [`Expr`](crate::Expr).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExprError {
    /// Found a token that cannot appear at this position.
    #[error("unexpected token '{found}' at {span}, expected {expected}")]
    UnexpectedToken {
        /// Token text that was found.
        found: String,
        /// Description of what was expected.
        expected: String,
        /// Location of the offending token.
        span: Span,
    },

    /// Input ended while a construct was still open.
    #[error("unexpected end of expression, expected {expected}")]
    UnexpectedEof {
        /// Description of what was expected.
        expected: String,
    },

    /// A numeric literal that does not parse as `f64`.
    #[error("invalid number '{text}' at {span}")]
    InvalidNumber {
        /// The literal text.
        text: String,
        /// Location of the literal.
        span: Span,
    },

    /// A character outside the expression alphabet.
    #[error("unexpected character '{ch}' at {span}")]
    UnexpectedCharacter {
        /// The character.
        ch: char,
        /// Location of the character.
        span: Span,
    },

    /// Nesting exceeds the depth a formula may have.
    #[error("expression nested deeper than {limit} levels at {span}")]
    TooDeep {
        /// Maximum nesting depth.
        limit: usize,
        /// Token where the limit was crossed.
        span: Span,
    },

    /// Nothing but whitespace was supplied.
    #[error("empty expression")]
    Empty,
}

impl ExprError {
    /// Create an unexpected token error.
    pub fn unexpected_token(found: impl Into<String>, expected: impl Into<String>, span: Span) -> Self {
        Self::UnexpectedToken {
            found: found.into(),
            expected: expected.into(),
            span,
        }
    }

    /// Create an unexpected end-of-input error.
    pub fn unexpected_eof(expected: impl Into<String>) -> Self {
        Self::UnexpectedEof {
            expected: expected.into(),
        }
    }

    /// Location of the error, when it has one.
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::UnexpectedToken { span, .. }
            | Self::InvalidNumber { span, .. }
            | Self::UnexpectedCharacter { span, .. }
            | Self::TooDeep { span, .. } => Some(*span),
            Self::UnexpectedEof { .. } | Self::Empty => None,
        }
    }
}

/// Result alias for expression parsing.
pub type ExprResult<T> = Result<T, ExprError>;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unexpected_token_display() {
        let error = ExprError::unexpected_token(")", "operand", Span::new(3, 4));
        let msg = error.to_string();
        assert!(msg.contains("unexpected token ')'"));
        assert!(msg.contains("operand"));
        assert_eq!(error.span(), Some(Span::new(3, 4)));
    }

    #[test]
    fn test_unexpected_eof_has_no_span() {
        let error = ExprError::unexpected_eof("')'");
        assert!(error.to_string().contains("end of expression"));
        assert_eq!(error.span(), None);
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ExprError>();
    }
}
