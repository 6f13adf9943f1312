//! Safe simplification.
//!
//! Only rewrites that hold for every value are applied: literal folding with
//! IEEE semantics, the additive and multiplicative identities, and the zero
//! annihilator. Parentheses never survive. The rewrite is bottom-up and
//! total; it never fails.

use super::{Expr, ExprKind};
use crate::{BinaryOp, Span, UnaryOp};

fn is_zero(expr: &Expr) -> bool {
    expr.as_number() == Some(0.0)
}

fn is_one(expr: &Expr) -> bool {
    expr.as_number() == Some(1.0)
}

impl Expr {
    /// Returns a simplified copy of the expression.
    ///
    /// A `Derivative` node is carried out and the result simplified. When
    /// the derivative is not supported, the node is kept over its simplified
    /// operand.
    ///
    /// ```rust
    /// # use parsym::parse_str;
    /// let e = parse_str("(x + 0) * (2 * 3 + 4)").unwrap();
    /// assert_eq!(e.safe_simplify().to_input_string(), "x * 10");
    /// ```
    pub fn safe_simplify(&self) -> Expr {
        match &self.kind {
            ExprKind::Paren(inner) => inner.safe_simplify(),
            ExprKind::Constant(_)
            | ExprKind::ImaginaryUnit
            | ExprKind::Var(_)
            | ExprKind::Number(_) => self.clone(),
            ExprKind::Binary { op, lhs, rhs } => {
                simplify_binary(*op, lhs.safe_simplify(), rhs.safe_simplify(), self.span)
            }
            ExprKind::Unary { op, operand } => {
                let operand = operand.safe_simplify();
                match operand.as_number().and_then(|value| op.apply(value)) {
                    Some(value) => Expr::number(value, self.span),
                    None => Expr::unary(*op, operand, self.span),
                }
            }
            ExprKind::Derivative { expr, wrt } => {
                let expr = expr.safe_simplify();
                match expr.derivative(wrt) {
                    Ok(derivative) => derivative.safe_simplify(),
                    Err(e) => {
                        log::debug!("keeping derivative wrt {wrt}: {e}");
                        Expr::derivative_of(expr, wrt, self.span)
                    }
                }
            }
            ExprKind::IndefiniteIntegral { integrand, wrt } => {
                Expr::indefinite_integral(integrand.safe_simplify(), wrt.safe_simplify(), self.span)
            }
            ExprKind::DefiniteIntegral {
                integrand,
                wrt,
                from,
                to,
            } => Expr::definite_integral(
                integrand.safe_simplify(),
                wrt.safe_simplify(),
                from.safe_simplify(),
                to.safe_simplify(),
                self.span,
            ),
        }
    }
}

fn simplify_binary(op: BinaryOp, lhs: Expr, rhs: Expr, span: Span) -> Expr {
    if let (Some(l), Some(r)) = (lhs.as_number(), rhs.as_number()) {
        return Expr::number(op.apply(l, r), span);
    }
    match op {
        BinaryOp::Add if is_zero(&rhs) => lhs,
        BinaryOp::Add if is_zero(&lhs) => rhs,
        BinaryOp::Sub if is_zero(&rhs) => lhs,
        BinaryOp::Mul | BinaryOp::ImplicitMul if is_zero(&lhs) || is_one(&rhs) => lhs,
        BinaryOp::Mul | BinaryOp::ImplicitMul if is_zero(&rhs) || is_one(&lhs) => rhs,
        BinaryOp::Div if is_zero(&lhs) || is_one(&rhs) => lhs,
        _ => Expr::binary(op, lhs, rhs, span),
    }
}
