//! # Sizing Expressions
//!
//! Parser for the arithmetic formulas attached to MathEval sizing fields.
//! Formulas are parsed once into an [`Expr`] tree; symbol resolution and
//! evaluation are left to the field engine.
//!
//! ## Architecture
//!
//! ```text
//! Source Text → Lexer → Tokens → Parser → Expr
//! ```
//!
//! ## Grammar
//!
//! ```text
//! expression = term (("+" | "-") term)*
//! term       = unary (("*" | "/") unary)*
//! unary      = ("-" | "+") unary | power
//! power      = primary ("^" unary)?
//! primary    = number | identifier | "(" expression ")"
//! ```
//!
//! ## Example
//!
//! ```rust
//! use sizing_expr::parse;
//!
//! let expr = parse("0.05*F1 + 0.001").unwrap();
//! assert_eq!(expr.symbols(), vec!["F1"]);
//! ```

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod span;

pub use ast::{BinaryOp, Expr, UnaryOp};
pub use error::{ExprError, ExprResult};
pub use span::Span;

// =============================================================================
// PUBLIC API
// =============================================================================

/// Parse formula text into an expression tree.
///
/// ## Example
///
/// ```rust
/// use sizing_expr::{parse, ExprError};
///
/// assert!(parse("(F1 + F2) / 2").is_ok());
/// assert_eq!(parse("   ").unwrap_err(), ExprError::Empty);
/// ```
pub fn parse(source: &str) -> ExprResult<Expr> {
    let tokens = lexer::Lexer::new(source).tokenize()?;
    parser::Parser::new(tokens).parse()
}
