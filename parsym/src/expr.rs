//! # Expression tree
//!
//! [`Expr`] is an immutable, strictly owned tree: every node owns its
//! children through a `Box`, and every operation that "changes" a tree
//! ([`Expr::safe_simplify`], [`Expr::derivative`]) builds a new one. A caller
//! may therefore keep and reuse the original after simplifying or
//! differentiating it.
//!
//! Every node carries the [`Span`] of input it was built from. A node's span
//! contains the spans of all its descendants. Spans are diagnostics only:
//! [`PartialEq`] for [`Expr`] ignores them.
//!
//! The node variants are the closed set in [`ExprKind`]. Rendering lives in
//! [`render`], simplification in [`simplify`] and differentiation in
//! [`derivative`](mod@derivative); each is an exhaustive `match`, so a new
//! variant cannot be added without deciding how every operation treats it.
//!
//! ```rust
//! # use parsym::parse_str;
//! let e = parse_str("derivative x * x").unwrap();
//! assert_eq!(e.to_input_string(), "derivative x * x wrt x");
//! assert_eq!(e.safe_simplify().to_input_string(), "x + x");
//! ```

pub mod derivative;
pub mod render;
pub mod simplify;

use crate::{BinaryOp, Constant, OperDef, Span, UnaryOp};
use smartstring::alias::String;

/// An expression node: what it is, and where it came from.
#[derive(Debug, Clone)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

/// The node variants.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Explicit parentheses, kept so the input form round-trips.
    Paren(Box<Expr>),
    /// A named constant such as `π`.
    Constant(Constant),
    /// The imaginary unit `i`.
    ImaginaryUnit,
    /// A variable; `name_suffix` names render with a subscript.
    Var(String),
    /// A numeric literal.
    Number(f64),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// Prefix negation or a postfix operator.
    Unary { op: UnaryOp, operand: Box<Expr> },
    /// `d/d wrt` of `expr`, not yet carried out.
    Derivative { expr: Box<Expr>, wrt: String },
    IndefiniteIntegral {
        integrand: Box<Expr>,
        wrt: Box<Expr>,
    },
    DefiniteIntegral {
        integrand: Box<Expr>,
        wrt: Box<Expr>,
        from: Box<Expr>,
        to: Box<Expr>,
    },
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn number(value: f64, span: Span) -> Self {
        Self::new(ExprKind::Number(value), span)
    }

    pub fn var(name: impl AsRef<str>, span: Span) -> Self {
        Self::new(ExprKind::Var(String::from(name.as_ref())), span)
    }

    pub fn constant(constant: Constant, span: Span) -> Self {
        Self::new(ExprKind::Constant(constant), span)
    }

    pub fn imaginary_unit(span: Span) -> Self {
        Self::new(ExprKind::ImaginaryUnit, span)
    }

    pub fn paren(inner: Expr, span: Span) -> Self {
        Self::new(ExprKind::Paren(Box::new(inner)), span)
    }

    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr, span: Span) -> Self {
        Self::new(
            ExprKind::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            },
            span,
        )
    }

    pub fn unary(op: UnaryOp, operand: Expr, span: Span) -> Self {
        Self::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
        )
    }

    /// A `Derivative` node; see [`Expr::derivative`] for carrying it out.
    pub fn derivative_of(expr: Expr, wrt: impl AsRef<str>, span: Span) -> Self {
        Self::new(
            ExprKind::Derivative {
                expr: Box::new(expr),
                wrt: String::from(wrt.as_ref()),
            },
            span,
        )
    }

    pub fn indefinite_integral(integrand: Expr, wrt: Expr, span: Span) -> Self {
        Self::new(
            ExprKind::IndefiniteIntegral {
                integrand: Box::new(integrand),
                wrt: Box::new(wrt),
            },
            span,
        )
    }

    pub fn definite_integral(integrand: Expr, wrt: Expr, from: Expr, to: Expr, span: Span) -> Self {
        Self::new(
            ExprKind::DefiniteIntegral {
                integrand: Box::new(integrand),
                wrt: Box::new(wrt),
                from: Box::new(from),
                to: Box::new(to),
            },
            span,
        )
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// The operator definition of this node, if it is an operator node.
    pub fn oper_def(&self) -> Option<OperDef> {
        match &self.kind {
            ExprKind::Binary { op, .. } => Some(op.def()),
            ExprKind::Unary { op, .. } => Some(op.def()),
            _ => None,
        }
    }

    /// The literal value, if this is a numeric literal.
    pub fn as_number(&self) -> Option<f64> {
        match self.kind {
            ExprKind::Number(value) => Some(value),
            _ => None,
        }
    }

    /// The innermost node under any number of parentheses.
    pub fn bypass_parens(&self) -> &Expr {
        let mut expr = self;
        while let ExprKind::Paren(inner) = &expr.kind {
            expr = &**inner;
        }
        expr
    }

    /// The first variable found walking the tree left to right.
    ///
    /// Used as the differentiation variable when `derivative` is written
    /// without `wrt`. A nested `Derivative` answers with its own variable.
    pub fn guess_primary_variable(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Var(name) => Some(name.as_str()),
            ExprKind::Paren(inner) => inner.guess_primary_variable(),
            ExprKind::Binary { lhs, rhs, .. } => lhs
                .guess_primary_variable()
                .or_else(|| rhs.guess_primary_variable()),
            ExprKind::Unary { operand, .. } => operand.guess_primary_variable(),
            ExprKind::Derivative { wrt, .. } => Some(wrt.as_str()),
            ExprKind::IndefiniteIntegral { integrand, wrt } => integrand
                .guess_primary_variable()
                .or_else(|| wrt.guess_primary_variable()),
            ExprKind::DefiniteIntegral {
                integrand,
                wrt,
                from,
                to,
            } => integrand
                .guess_primary_variable()
                .or_else(|| wrt.guess_primary_variable())
                .or_else(|| from.guess_primary_variable())
                .or_else(|| to.guess_primary_variable()),
            ExprKind::Constant(_) | ExprKind::ImaginaryUnit | ExprKind::Number(_) => None,
        }
    }

    /// The name of the node's variant, e.g. `"ImplicitMul"` or `"Var"`.
    pub fn variant_name(&self) -> &'static str {
        match &self.kind {
            ExprKind::Paren(_) => "Paren",
            ExprKind::Constant(_) => "SymbolicConstant",
            ExprKind::ImaginaryUnit => "ImaginaryUnit",
            ExprKind::Var(_) => "Var",
            ExprKind::Number(_) => "NumericLiteral",
            ExprKind::Binary { op, .. } => match op {
                BinaryOp::Add => "Add",
                BinaryOp::Sub => "Sub",
                BinaryOp::Mul => "Mul",
                BinaryOp::ImplicitMul => "ImplicitMul",
                BinaryOp::Div => "Div",
                BinaryOp::Exp => "Exp",
            },
            ExprKind::Unary { op, .. } => match op {
                UnaryOp::Neg => "Negation",
                UnaryOp::Factorial => "Factorial",
            },
            ExprKind::Derivative { .. } => "Derivative",
            ExprKind::IndefiniteIntegral { .. } => "IndefiniteIntegral",
            ExprKind::DefiniteIntegral { .. } => "DefiniteIntegral",
        }
    }

    /// The node's children, left to right.
    pub fn children(&self) -> Vec<&Expr> {
        match &self.kind {
            ExprKind::Paren(inner) => vec![&**inner],
            ExprKind::Binary { lhs, rhs, .. } => vec![&**lhs, &**rhs],
            ExprKind::Unary { operand, .. } => vec![&**operand],
            ExprKind::Derivative { expr, .. } => vec![&**expr],
            ExprKind::IndefiniteIntegral { integrand, wrt } => vec![&**integrand, &**wrt],
            ExprKind::DefiniteIntegral {
                integrand,
                wrt,
                from,
                to,
            } => vec![&**integrand, &**wrt, &**from, &**to],
            ExprKind::Constant(_)
            | ExprKind::ImaginaryUnit
            | ExprKind::Var(_)
            | ExprKind::Number(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse_str, span};

    #[test]
    fn equality_ignores_spans() {
        let a = Expr::var("x", span!(0, 1));
        let b = Expr::var("x", span!(7, 8));
        assert_eq!(a, b);
        assert_ne!(a, Expr::var("y", span!(0, 1)));

        let p = parse_str("x + 1").unwrap();
        let q = parse_str("x   +   1").unwrap();
        assert_eq!(p, q);
        assert_ne!(p.span, q.span);
    }

    #[test]
    fn bypass_parens_strips_every_level() {
        let e = parse_str("((x))").unwrap();
        assert_eq!(e.variant_name(), "Paren");
        assert_eq!(e.bypass_parens().variant_name(), "Var");
        let x = Expr::var("x", span!(0, 1));
        assert!(std::ptr::eq(x.bypass_parens(), &x));
    }

    #[test]
    fn primary_variable_is_leftmost() {
        let e = parse_str("2 + a * b").unwrap();
        assert_eq!(e.guess_primary_variable(), Some("a"));
        let e = parse_str("3 * (4 + z) - y").unwrap();
        assert_eq!(e.guess_primary_variable(), Some("z"));
        let e = parse_str("pi * 2").unwrap();
        assert_eq!(e.guess_primary_variable(), None);
        let e = parse_str("derivative t + s wrt s").unwrap();
        assert_eq!(e.guess_primary_variable(), Some("s"));
    }

    #[test]
    fn integrals_are_representable() {
        let x = || Expr::var("x", span!(0, 1));
        let e = Expr::definite_integral(
            x(),
            x(),
            Expr::number(0.0, span!(0, 1)),
            Expr::number(1.0, span!(0, 1)),
            span!(0, 1),
        );
        assert_eq!(e.children().len(), 4);
        assert_eq!(e.guess_primary_variable(), Some("x"));
        assert_eq!(e.oper_def(), None);

        let e = Expr::indefinite_integral(Expr::number(2.0, span!(0, 1)), x(), span!(0, 1));
        assert_eq!(e.variant_name(), "IndefiniteIntegral");
        assert_eq!(e.guess_primary_variable(), Some("x"));
    }

    #[test]
    fn children_in_order() {
        let e = parse_str("a - b").unwrap();
        let names: Vec<_> = e
            .children()
            .into_iter()
            .map(|c| c.guess_primary_variable())
            .collect();
        assert_eq!(names, [Some("a"), Some("b")]);
        assert!(Expr::imaginary_unit(span!(0, 1)).children().is_empty());
    }

    #[test]
    fn oper_def_of_operators() {
        let e = parse_str("x ^ 2").unwrap();
        assert_eq!(e.oper_def(), Some(BinaryOp::Exp.def()));
        let e = parse_str("-x").unwrap();
        assert_eq!(e.oper_def(), Some(UnaryOp::Neg.def()));
        assert_eq!(parse_str("7").unwrap().oper_def(), None);
    }
}
