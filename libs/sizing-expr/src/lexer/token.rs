//! # Tokens
//!
//! Token types for the sizing expression lexer.

use crate::span::Span;

// =============================================================================
// TOKEN
// =============================================================================

/// A token produced by the lexer.
///
/// ## Example
///
/// ```rust
/// use sizing_expr::lexer::{Token, TokenKind};
/// use sizing_expr::Span;
///
/// let token = Token::new(TokenKind::Identifier, Span::new(0, 2), "F1".to_string());
/// assert_eq!(token.text, "F1");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Token type.
    pub kind: TokenKind,
    /// Source span.
    pub span: Span,
    /// Token text.
    pub text: String,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, span: Span, text: String) -> Self {
        Self { kind, span, text }
    }

    /// Check if token is EOF.
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

// =============================================================================
// TOKEN KIND
// =============================================================================

/// Types of tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Number literal like `0.05` or `1e-3`
    Number,
    /// Symbol like `F1` or `x`
    Identifier,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `^`
    Caret,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// End of input
    Eof,
}

impl TokenKind {
    /// Human-readable name used in error messages.
    pub fn display(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Identifier => "identifier",
            Self::Plus => "'+'",
            Self::Minus => "'-'",
            Self::Star => "'*'",
            Self::Slash => "'/'",
            Self::Caret => "'^'",
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::Eof => "end of expression",
        }
    }
}
