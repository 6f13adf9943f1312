//! Symbolic differentiation.

use super::{Expr, ExprKind};
use crate::{BinaryOp, DerivativeError, UnaryOp};

impl Expr {
    /// Differentiates the expression with respect to `wrt`.
    ///
    /// The result is not simplified; new nodes take the span of the node
    /// they were derived from. Sums, differences, products (explicit or
    /// implicit), quotients and negation have rules; a nested `Derivative`
    /// is carried out first and its result differentiated.
    ///
    /// # Errors
    /// [`DerivativeError::Unsupported`] for exponentiation, postfix
    /// operators and integrals.
    ///
    /// ```rust
    /// # use parsym::parse_str;
    /// let e = parse_str("x * x").unwrap();
    /// let d = e.derivative("x").unwrap();
    /// assert_eq!(d.to_input_string(), "1 * x + x * 1");
    /// assert!(parse_str("x ^ 2").unwrap().derivative("x").is_err());
    /// ```
    pub fn derivative(&self, wrt: &str) -> Result<Expr, DerivativeError> {
        let span = self.span;
        match &self.kind {
            ExprKind::Var(name) => Ok(Expr::number(
                if name.as_str() == wrt { 1.0 } else { 0.0 },
                span,
            )),
            ExprKind::Number(_) | ExprKind::Constant(_) | ExprKind::ImaginaryUnit => {
                Ok(Expr::number(0.0, span))
            }
            ExprKind::Paren(inner) => inner.derivative(wrt),
            ExprKind::Binary { op, lhs, rhs } => match op {
                BinaryOp::Add | BinaryOp::Sub => Ok(Expr::binary(
                    *op,
                    lhs.derivative(wrt)?,
                    rhs.derivative(wrt)?,
                    span,
                )),
                BinaryOp::Mul | BinaryOp::ImplicitMul => {
                    let dl = lhs.derivative(wrt)?;
                    let dr = rhs.derivative(wrt)?;
                    Ok(Expr::binary(
                        BinaryOp::Add,
                        Expr::binary(BinaryOp::Mul, dl, (**rhs).clone(), span),
                        Expr::binary(BinaryOp::Mul, (**lhs).clone(), dr, span),
                        span,
                    ))
                }
                BinaryOp::Div => {
                    let dl = lhs.derivative(wrt)?;
                    let dr = rhs.derivative(wrt)?;
                    let numerator = Expr::binary(
                        BinaryOp::Sub,
                        Expr::binary(BinaryOp::Mul, dl, (**rhs).clone(), span),
                        Expr::binary(BinaryOp::Mul, (**lhs).clone(), dr, span),
                        span,
                    );
                    let denominator = Expr::binary(
                        BinaryOp::Exp,
                        (**rhs).clone(),
                        Expr::number(2.0, span),
                        span,
                    );
                    Ok(Expr::binary(BinaryOp::Div, numerator, denominator, span))
                }
                BinaryOp::Exp => Err(DerivativeError::Unsupported {
                    construct: "exponentiation",
                }),
            },
            ExprKind::Unary { op, operand } => match op {
                UnaryOp::Neg => Ok(Expr::unary(UnaryOp::Neg, operand.derivative(wrt)?, span)),
                UnaryOp::Factorial => Err(DerivativeError::Unsupported {
                    construct: "factorial",
                }),
            },
            ExprKind::Derivative { expr, wrt: inner } => expr.derivative(inner)?.derivative(wrt),
            ExprKind::IndefiniteIntegral { .. } | ExprKind::DefiniteIntegral { .. } => {
                Err(DerivativeError::Unsupported {
                    construct: "integral",
                })
            }
        }
    }
}
