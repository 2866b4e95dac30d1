//! # Expression Parser
//!
//! Recursive descent parser producing an [`Expr`] tree.
//!
//! ## Module Structure
//!
//! - `operators` - Binary and unary operators with precedence climbing
//! - `primaries` - Literals, symbols and parenthesized groups
//!
//! ## Example
//!
//! ```rust
//! use sizing_expr::lexer::Lexer;
//! use sizing_expr::parser::Parser;
//!
//! let tokens = Lexer::new("1 + 2").tokenize().unwrap();
//! let expr = Parser::new(tokens).parse().unwrap();
//! assert_eq!(expr.to_string(), "1 + 2");
//! ```

mod operators;
mod primaries;

use config::constants::MAX_EXPRESSION_DEPTH;

use crate::ast::Expr;
use crate::error::{ExprError, ExprResult};
use crate::lexer::{Token, TokenKind};
use crate::span::Span;

// =============================================================================
// PARSER
// =============================================================================

/// Recursive descent parser for sizing expressions.
pub struct Parser {
    /// Token stream, terminated by EOF.
    tokens: Vec<Token>,
    /// Current token index.
    current: usize,
    /// Open nesting levels, bounded by `MAX_EXPRESSION_DEPTH`.
    depth: usize,
}

impl Parser {
    /// Create a new parser over lexer output.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map_or(true, |t| !t.is_eof()) {
            let end = tokens.last().map_or(0, |t| t.span.end);
            tokens.push(Token::new(TokenKind::Eof, Span::at(end), String::new()));
        }
        Self {
            tokens,
            current: 0,
            depth: 0,
        }
    }

    /// Parse the whole token stream as a single expression.
    ///
    /// Trailing tokens after a complete expression are an error.
    pub fn parse(&mut self) -> ExprResult<Expr> {
        if self.is_at_end() {
            return Err(ExprError::Empty);
        }
        let expr = self.parse_expression()?;
        if !self.is_at_end() {
            let token = self.peek();
            return Err(ExprError::unexpected_token(
                token.text.clone(),
                "operator or end of expression",
                token.span,
            ));
        }
        Ok(expr)
    }

    /// Parse an expression at the loosest precedence.
    fn parse_expression(&mut self) -> ExprResult<Expr> {
        self.parse_precedence(operators::Precedence::Term)
    }

    /// Open one nesting level, failing past `MAX_EXPRESSION_DEPTH`.
    fn descend(&mut self) -> ExprResult<()> {
        self.depth += 1;
        if self.depth > MAX_EXPRESSION_DEPTH {
            return Err(ExprError::TooDeep {
                limit: MAX_EXPRESSION_DEPTH,
                span: self.peek().span,
            });
        }
        Ok(())
    }

    // =========================================================================
    // TOKEN ACCESS
    // =========================================================================

    /// Get current token. `new` guarantees a trailing EOF token.
    fn peek(&self) -> &Token {
        let index = self.current.min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    /// Get current token kind.
    fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    /// Check if at end of input.
    fn is_at_end(&self) -> bool {
        self.peek_kind() == TokenKind::Eof
    }

    /// Consume and return the current token.
    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !self.is_at_end() {
            self.current += 1;
        }
        token
    }

    /// Consume a token of the expected kind.
    fn expect(&mut self, kind: TokenKind) -> ExprResult<Token> {
        if self.peek_kind() == kind {
            return Ok(self.advance());
        }
        if self.is_at_end() {
            return Err(ExprError::unexpected_eof(kind.display()));
        }
        let token = self.peek();
        Err(ExprError::unexpected_token(
            token.text.clone(),
            kind.display(),
            token.span,
        ))
    }
}
