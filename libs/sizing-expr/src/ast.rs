//! # Expression AST
//!
//! Tagged expression tree produced by the parser. Sizing fields parse their
//! formula once into an [`Expr`] and evaluate it per query point.
//!
//! ## Example
//!
//! ```rust
//! use sizing_expr::{parse, Expr};
//!
//! let expr = parse("0.05*F1 + 0.001").unwrap();
//! assert_eq!(expr.symbols(), vec!["F1"]);
//! assert_eq!(expr.to_string(), "0.05 * F1 + 0.001");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// OPERATORS
// =============================================================================

/// Binary arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `^` (right associative)
    Pow,
}

impl BinaryOp {
    /// Operator symbol as written in source.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "^",
        }
    }

    /// Binding strength used when printing with minimal parentheses.
    fn strength(&self) -> u8 {
        match self {
            Self::Add | Self::Sub => 1,
            Self::Mul | Self::Div => 2,
            Self::Pow => 4,
        }
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    /// `-x`
    Neg,
}

// =============================================================================
// EXPR
// =============================================================================

/// Arithmetic expression over literals and named symbols.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// Numeric constant.
    Literal(f64),
    /// Named value, substituted at evaluation time.
    Symbol(String),
    /// Prefix operation.
    Unary {
        /// Operator.
        op: UnaryOp,
        /// Operand.
        operand: Box<Expr>,
    },
    /// Infix operation.
    Binary {
        /// Operator.
        op: BinaryOp,
        /// Left operand.
        left: Box<Expr>,
        /// Right operand.
        right: Box<Expr>,
    },
}

impl Expr {
    /// Build a binary node.
    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Self::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Build a negation node.
    pub fn neg(operand: Expr) -> Self {
        Self::Unary {
            op: UnaryOp::Neg,
            operand: Box::new(operand),
        }
    }

    /// Distinct symbol names in first-occurrence order.
    pub fn symbols(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_symbols(&mut out);
        out
    }

    fn collect_symbols<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Literal(_) => {}
            Self::Symbol(name) => {
                if !out.contains(&name.as_str()) {
                    out.push(name.as_str());
                }
            }
            Self::Unary { operand, .. } => operand.collect_symbols(out),
            Self::Binary { left, right, .. } => {
                left.collect_symbols(out);
                right.collect_symbols(out);
            }
        }
    }

    /// Evaluate with a symbol resolver.
    ///
    /// Arithmetic follows IEEE-754; callers that need to reject division by
    /// zero check the divisor through `on_div`.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use sizing_expr::parse;
    ///
    /// let expr = parse("2 * a - 1").unwrap();
    /// let value: Result<f64, ()> = expr.evaluate(
    ///     &mut |name| if name == "a" { Ok(3.0) } else { Err(()) },
    ///     &mut |_| Ok(()),
    /// );
    /// assert_eq!(value, Ok(5.0));
    /// ```
    pub fn evaluate<E>(
        &self,
        resolve: &mut dyn FnMut(&str) -> Result<f64, E>,
        on_div: &mut dyn FnMut(f64) -> Result<(), E>,
    ) -> Result<f64, E> {
        match self {
            Self::Literal(value) => Ok(*value),
            Self::Symbol(name) => resolve(name),
            Self::Unary { op: UnaryOp::Neg, operand } => Ok(-operand.evaluate(resolve, on_div)?),
            Self::Binary { op, left, right } => {
                let l = left.evaluate(resolve, on_div)?;
                let r = right.evaluate(resolve, on_div)?;
                Ok(match op {
                    BinaryOp::Add => l + r,
                    BinaryOp::Sub => l - r,
                    BinaryOp::Mul => l * r,
                    BinaryOp::Div => {
                        on_div(r)?;
                        l / r
                    }
                    BinaryOp::Pow => l.powf(r),
                })
            }
        }
    }

    fn fmt_with(&self, f: &mut fmt::Formatter<'_>, parent: u8) -> fmt::Result {
        match self {
            Self::Literal(value) => write!(f, "{value}"),
            Self::Symbol(name) => f.write_str(name),
            Self::Unary { operand, .. } => {
                if parent > 3 {
                    f.write_str("(-")?;
                    operand.fmt_with(f, 3)?;
                    return f.write_str(")");
                }
                f.write_str("-")?;
                operand.fmt_with(f, 3)
            }
            Self::Binary { op, left, right } => {
                let own = op.strength();
                let wrap = own < parent;
                if wrap {
                    f.write_str("(")?;
                }
                // Right operand binds one tighter for left-associative ops.
                let (lp, rp) = if *op == BinaryOp::Pow { (own + 1, own) } else { (own, own + 1) };
                left.fmt_with(f, lp)?;
                write!(f, " {} ", op.symbol())?;
                right.fmt_with(f, rp)?;
                if wrap {
                    f.write_str(")")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_with(f, 0)
    }
}

// =============================================================================
// TESTS
// =============================================================================
