use parsym::{BinaryOp, Constant, Expr, ExprKind, Span, UnaryOp};
use proptest::prelude::*;

/// Variable names the standard lexer reads back as a single name token.
pub const NAMES: &[&str] = &["x", "y", "z", "a", "b", "t", "x_1", "v_max"];

fn nowhere() -> Span {
    Span::default()
}

/// Non-negative literals with an exact short decimal form.
pub fn arb_leaf() -> impl Strategy<Value = Expr> {
    prop_oneof![
        (0u32..400).prop_map(|n| Expr::number(f64::from(n) / 4.0, nowhere())),
        prop::sample::select(NAMES).prop_map(|name| Expr::var(name, nowhere())),
        Just(Expr::constant(Constant::PI, nowhere())),
        Just(Expr::constant(Constant::E, nowhere())),
    ]
}

/// Trees over every construct the standard grammar can read back.
pub fn arb_expr() -> impl Strategy<Value = Expr> {
    arb_leaf().prop_recursive(4, 48, 2, |inner| {
        let binary = |op: BinaryOp| {
            (inner.clone(), inner.clone())
                .prop_map(move |(l, r)| Expr::binary(op, l, r, nowhere()))
        };
        prop_oneof![
            binary(BinaryOp::Add),
            binary(BinaryOp::Sub),
            binary(BinaryOp::Mul),
            binary(BinaryOp::ImplicitMul),
            binary(BinaryOp::Div),
            binary(BinaryOp::Exp),
            inner
                .clone()
                .prop_map(|e| Expr::unary(UnaryOp::Neg, e, nowhere())),
            inner
                .clone()
                .prop_map(|e| Expr::unary(UnaryOp::Factorial, e, nowhere())),
            inner.clone().prop_map(|e| Expr::paren(e, nowhere())),
            (inner.clone(), prop::sample::select(NAMES))
                .prop_map(|(e, wrt)| Expr::derivative_of(e, wrt, nowhere())),
        ]
    })
}

/// Removes every `Paren` node.
pub fn strip_parens(expr: &Expr) -> Expr {
    let span = expr.span;
    match &expr.kind {
        ExprKind::Paren(inner) => strip_parens(inner),
        ExprKind::Binary { op, lhs, rhs } => {
            Expr::binary(*op, strip_parens(lhs), strip_parens(rhs), span)
        }
        ExprKind::Unary { op, operand } => Expr::unary(*op, strip_parens(operand), span),
        ExprKind::Derivative { expr, wrt } => Expr::derivative_of(strip_parens(expr), wrt, span),
        _ => expr.clone(),
    }
}

/// Checks that every node's span contains its children's spans.
pub fn spans_nest(expr: &Expr) -> bool {
    expr.children()
        .into_iter()
        .all(|child| expr.span.contains(&child.span) && spans_nest(child))
}

pub fn has_paren(expr: &Expr) -> bool {
    matches!(expr.kind, ExprKind::Paren(_)) || expr.children().into_iter().any(has_paren)
}
