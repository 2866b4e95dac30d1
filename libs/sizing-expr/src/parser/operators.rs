//! # Operator Parsing
//!
//! Parses binary and unary operators using precedence climbing.
//!
//! ## Operator Precedence
//!
//! | Precedence | Operators | Associativity |
//! |------------|-----------|---------------|
//! | 1 | + - | Left |
//! | 2 | * / | Left |
//! | 3 | - (unary) | Right |
//! | 4 | ^ | Right |
//!
//! Unary minus binds looser than `^`, so `-a ^ 2` is `-(a ^ 2)`.

use super::Parser;
use crate::ast::{BinaryOp, Expr};
use crate::error::ExprResult;
use crate::lexer::TokenKind;

// =============================================================================
// PRECEDENCE
// =============================================================================

/// Operator precedence levels. Higher values bind tighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(super) enum Precedence {
    /// Addition/subtraction: `+ -`
    Term = 1,
    /// Multiplication/division: `* /`
    Factor = 2,
    /// Unary: `-`
    Unary = 3,
    /// Power: `^`
    Power = 4,
}

impl Precedence {
    /// Precedence and operator for a binary token, if it is one.
    fn of_binary(kind: TokenKind) -> Option<(Self, BinaryOp)> {
        match kind {
            TokenKind::Plus => Some((Self::Term, BinaryOp::Add)),
            TokenKind::Minus => Some((Self::Term, BinaryOp::Sub)),
            TokenKind::Star => Some((Self::Factor, BinaryOp::Mul)),
            TokenKind::Slash => Some((Self::Factor, BinaryOp::Div)),
            TokenKind::Caret => Some((Self::Power, BinaryOp::Pow)),
            _ => None,
        }
    }

    /// Next tighter level, used for the right operand of left-associative
    /// operators.
    fn next(self) -> Self {
        match self {
            Self::Term => Self::Factor,
            Self::Factor => Self::Unary,
            Self::Unary | Self::Power => Self::Power,
        }
    }
}

// =============================================================================
// OPERATOR PARSING
// =============================================================================

impl Parser {
    /// Parse expression with minimum precedence.
    ///
    /// Each operator of a chain keeps its level open until the chain ends,
    /// so the depth count bounds the tree depth of the result.
    pub(super) fn parse_precedence(&mut self, min_prec: Precedence) -> ExprResult<Expr> {
        let entry = self.depth;
        self.descend()?;
        let mut left = self.parse_unary()?;

        while let Some((prec, op)) = Precedence::of_binary(self.peek_kind()) {
            if prec < min_prec {
                break;
            }
            self.advance();
            self.descend()?;

            let next_prec = if op == BinaryOp::Pow { prec } else { prec.next() };
            let right = self.parse_precedence(next_prec)?;
            left = Expr::binary(op, left, right);
        }

        self.depth = entry;
        Ok(left)
    }

    /// Parse unary expression.
    ///
    /// ```text
    /// unary = ("-" | "+") unary | power
    /// ```
    pub(super) fn parse_unary(&mut self) -> ExprResult<Expr> {
        match self.peek_kind() {
            TokenKind::Minus => {
                self.advance();
                let entry = self.depth;
                self.descend()?;
                let operand = self.parse_unary_operand()?;
                self.depth = entry;
                Ok(Expr::neg(operand))
            }
            TokenKind::Plus => {
                self.advance();
                let entry = self.depth;
                self.descend()?;
                let operand = self.parse_unary_operand()?;
                self.depth = entry;
                Ok(operand)
            }
            _ => self.parse_primary(),
        }
    }

    /// Operand of a prefix sign: another sign, or a primary with any `^`
    /// chain attached.
    fn parse_unary_operand(&mut self) -> ExprResult<Expr> {
        if matches!(self.peek_kind(), TokenKind::Minus | TokenKind::Plus) {
            return self.parse_unary();
        }
        self.parse_precedence(Precedence::Power)
    }
}

// =============================================================================
// TESTS
// =============================================================================
