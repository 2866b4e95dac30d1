//! # Primary Expressions
//!
//! Number literals, symbols and parenthesized groups.

use super::Parser;
use crate::ast::Expr;
use crate::error::{ExprError, ExprResult};
use crate::lexer::TokenKind;

impl Parser {
    /// Parse a primary expression.
    ///
    /// ```text
    /// primary = number | identifier | "(" expression ")"
    /// ```
    pub(super) fn parse_primary(&mut self) -> ExprResult<Expr> {
        match self.peek_kind() {
            TokenKind::Number => {
                let token = self.advance();
                token
                    .text
                    .parse::<f64>()
                    .map(Expr::Literal)
                    .map_err(|_| ExprError::InvalidNumber {
                        text: token.text.clone(),
                        span: token.span,
                    })
            }
            TokenKind::Identifier => Ok(Expr::Symbol(self.advance().text)),
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expression()?;
                self.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::Eof => Err(ExprError::unexpected_eof("operand")),
            _ => {
                let token = self.peek();
                Err(ExprError::unexpected_token(
                    token.text.clone(),
                    "operand",
                    token.span,
                ))
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::ast::Expr;
    use crate::error::ExprError;
    use crate::parse;
    use crate::span::Span;

    #[test]
    fn test_parse_symbol() {
        assert_eq!(parse("F1").unwrap(), Expr::Symbol("F1".to_string()));
    }

    #[test]
    fn test_parse_grouping() {
        let expr = parse("(1 + 2) * 3").unwrap();
        assert_eq!(expr.to_string(), "(1 + 2) * 3");
    }

    #[test]
    fn test_unclosed_group() {
        let err = parse("(1 + 2").unwrap_err();
        assert_eq!(err, ExprError::unexpected_eof("')'"));
    }

    #[test]
    fn test_operator_without_operand() {
        let err = parse("1 + * 2").unwrap_err();
        assert_eq!(err, ExprError::unexpected_token("*", "operand", Span::new(4, 5)));
    }

    #[test]
    fn test_trailing_dot_number() {
        assert_eq!(parse("1.").unwrap(), Expr::Literal(1.0));
    }
}
