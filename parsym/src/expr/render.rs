//! Rendering to the input language and to LaTeX.
//!
//! Both renderers share one parenthesisation rule, [`needs_parens`]. A child
//! is wrapped when it is
//!
//! - a binary node of lower precedence than its parent, or of equal
//!   precedence on the side its parent does not associate towards
//!   (`a - (b - c)`, `(a ^ b) ^ c`);
//! - a prefix node of lower precedence in left-operand position
//!   (`(-a) ^ b`);
//! - a postfix node of lower precedence in right-operand position.
//!
//! A negative literal counts as a prefix negation. Infinite and NaN literals
//! are written as `1 / 0`, `-(1 / 0)` and `0 / 0` in the input form and
//! count as the division they are written as. Nodes without an operator
//! are never wrapped by this rule. Implicit multiplication additionally
//! wraps a right operand that would start with `-` or a keyword, since
//! juxtaposition cannot be re-read there.
//!
//! LaTeX operands already delimited by braces (`\frac{}{}`, the exponent in
//! `^{}`) are not wrapped. A derivative or integral, whose LaTeX has no
//! closing delimiter, is wrapped as a factor, as the base of `^` and as the
//! operand of a postfix operator.

use super::{Expr, ExprKind};
use crate::{
    Assoc, BinaryOp, Fixity, OperDef, UnaryOp,
    oper::{DIV, NEG},
};
use std::fmt;

/// Which operand of its parent a child is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Lhs,
    Rhs,
}

/// Letters rendered with their LaTeX macro. Uppercase letters whose glyph
/// equals a Latin capital have no macro and are absent.
const GREEK_LETTERS: &[&str] = &[
    "alpha", "beta", "gamma", "delta", "epsilon", "varepsilon", "zeta", "eta", "theta",
    "vartheta", "iota", "kappa", "lambda", "mu", "nu", "xi", "pi", "varpi", "rho", "varrho",
    "sigma", "varsigma", "tau", "upsilon", "phi", "varphi", "chi", "psi", "omega", "Gamma",
    "Delta", "Theta", "Lambda", "Xi", "Pi", "Sigma", "Upsilon", "Phi", "Psi", "Omega",
];

fn effective_def(expr: &Expr) -> Option<OperDef> {
    match expr.kind {
        ExprKind::Number(value) if value.is_sign_negative() && !value.is_nan() => Some(NEG),
        ExprKind::Number(value) if !value.is_finite() => Some(DIV),
        _ => expr.oper_def(),
    }
}

/// Writes a literal in the input language. Values without a literal form
/// are written as the quotient that folds back to them.
fn write_input_number(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.is_nan() {
        f.write_str("0 / 0")
    } else if value == f64::INFINITY {
        f.write_str("1 / 0")
    } else if value == f64::NEG_INFINITY {
        f.write_str("-(1 / 0)")
    } else {
        write!(f, "{value}")
    }
}

fn write_latex_number(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.is_nan() {
        f.write_str("\\mathrm{NaN}")
    } else if value == f64::INFINITY {
        f.write_str("\\infty{}")
    } else if value == f64::NEG_INFINITY {
        f.write_str("-\\infty{}")
    } else {
        write!(f, "{value}")
    }
}

/// Whether the LaTeX of `expr` runs on to the right without a closing
/// delimiter, so that an operator written after it would read as part of it.
fn is_open_ended(expr: &Expr) -> bool {
    matches!(
        expr.kind,
        ExprKind::Derivative { .. }
            | ExprKind::IndefiniteIntegral { .. }
            | ExprKind::DefiniteIntegral { .. }
    )
}

fn latex_operand_needs_parens(op: BinaryOp, child: &Expr, side: Side) -> bool {
    binary_operand_needs_parens(op, child, side)
        || (is_open_ended(child)
            && match op {
                BinaryOp::Exp => side == Side::Lhs,
                BinaryOp::Mul | BinaryOp::ImplicitMul => true,
                BinaryOp::Add | BinaryOp::Sub | BinaryOp::Div => false,
            })
}

/// Decides whether `child`, as the `side` operand of an operator defined by
/// `parent`, must be wrapped in parentheses.
pub fn needs_parens(parent: OperDef, child: &Expr, side: Side) -> bool {
    let Some(def) = effective_def(child) else {
        return false;
    };
    match def.fixity {
        Fixity::Infix => {
            def.prec < parent.prec
                || (def.prec == parent.prec
                    && match parent.assoc {
                        Assoc::Left => side == Side::Rhs,
                        Assoc::Right => side == Side::Lhs,
                        Assoc::None => true,
                    })
        }
        Fixity::Prefix => side == Side::Lhs && def.prec < parent.prec,
        Fixity::Postfix => side == Side::Rhs && def.prec < parent.prec,
    }
}

/// Whether the rendering of `expr` begins with a minus sign or a keyword.
fn starts_loose(expr: &Expr) -> bool {
    match &expr.kind {
        ExprKind::Number(value) => value.is_sign_negative() && !value.is_nan(),
        ExprKind::Unary {
            op: UnaryOp::Neg, ..
        } => true,
        ExprKind::Unary { op, operand } => {
            !needs_parens(op.def(), operand, Side::Lhs) && starts_loose(operand)
        }
        ExprKind::Binary { op, lhs, .. } => {
            !needs_parens(op.def(), lhs, Side::Lhs) && starts_loose(lhs)
        }
        ExprKind::Derivative { .. }
        | ExprKind::IndefiniteIntegral { .. }
        | ExprKind::DefiniteIntegral { .. } => true,
        ExprKind::Paren(_)
        | ExprKind::Constant(_)
        | ExprKind::ImaginaryUnit
        | ExprKind::Var(_) => false,
    }
}

fn binary_operand_needs_parens(op: BinaryOp, child: &Expr, side: Side) -> bool {
    needs_parens(op.def(), child, side)
        || (op == BinaryOp::ImplicitMul && side == Side::Rhs && starts_loose(child))
}

fn unary_side(op: UnaryOp) -> Side {
    if op.is_prefix() { Side::Rhs } else { Side::Lhs }
}

impl fmt::Display for Expr {
    /// Formats the expression in the input language.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Paren(inner) => write!(f, "({inner})"),
            ExprKind::Constant(constant) => f.write_str(constant.name),
            ExprKind::ImaginaryUnit => f.write_str("i"),
            ExprKind::Var(name) => f.write_str(name),
            ExprKind::Number(value) => write_input_number(f, *value),
            ExprKind::Binary { op, lhs, rhs } => {
                write_input_operand(f, lhs, binary_operand_needs_parens(*op, lhs, Side::Lhs))?;
                match op {
                    BinaryOp::ImplicitMul => f.write_str(" ")?,
                    _ => write!(f, " {} ", op.symbol())?,
                }
                write_input_operand(f, rhs, binary_operand_needs_parens(*op, rhs, Side::Rhs))
            }
            ExprKind::Unary { op, operand } => {
                let wrap = needs_parens(op.def(), operand, unary_side(*op));
                if op.is_prefix() {
                    f.write_str(op.symbol())?;
                    write_input_operand(f, operand, wrap)
                } else {
                    write_input_operand(f, operand, wrap)?;
                    f.write_str(op.symbol())
                }
            }
            ExprKind::Derivative { expr, wrt } => write!(f, "derivative {expr} wrt {wrt}"),
            ExprKind::IndefiniteIntegral { integrand, wrt } => {
                write!(f, "integrate {integrand} d{wrt}")
            }
            ExprKind::DefiniteIntegral {
                integrand,
                wrt,
                from,
                to,
            } => write!(f, "integral from {from} to {to} of {integrand} d{wrt}"),
        }
    }
}

fn write_input_operand(f: &mut fmt::Formatter<'_>, child: &Expr, wrap: bool) -> fmt::Result {
    if wrap {
        write!(f, "({child})")
    } else {
        write!(f, "{child}")
    }
}

/// LaTeX view of an expression; see [`Expr::latex`].
#[derive(Debug, Clone, Copy)]
pub struct Latex<'a>(&'a Expr);

impl fmt::Display for Latex<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let expr = self.0;
        match &expr.kind {
            ExprKind::Paren(inner) => write!(f, "\\left({}\\right)", inner.latex()),
            ExprKind::Constant(constant) => f.write_str(constant.latex),
            ExprKind::ImaginaryUnit => f.write_str("\\mathrm{i}"),
            ExprKind::Var(name) => write_latex_name(f, name),
            ExprKind::Number(value) => write_latex_number(f, *value),
            ExprKind::Binary {
                op: BinaryOp::Div,
                lhs,
                rhs,
            } => write!(f, "\\frac{{{}}}{{{}}}", lhs.latex(), rhs.latex()),
            ExprKind::Binary {
                op: BinaryOp::Exp,
                lhs,
                rhs,
            } => {
                let wrap = latex_operand_needs_parens(BinaryOp::Exp, lhs, Side::Lhs);
                write_latex_operand(f, lhs, wrap)?;
                write!(f, "^{{{}}}", rhs.latex())
            }
            ExprKind::Binary { op, lhs, rhs } => {
                write_latex_operand(f, lhs, latex_operand_needs_parens(*op, lhs, Side::Lhs))?;
                f.write_str(match op {
                    BinaryOp::Add => " + ",
                    BinaryOp::Sub => " - ",
                    BinaryOp::Mul => " \\cdot{} ",
                    _ => "\\,{}",
                })?;
                write_latex_operand(f, rhs, latex_operand_needs_parens(*op, rhs, Side::Rhs))
            }
            ExprKind::Unary { op, operand } => {
                let wrap = needs_parens(op.def(), operand, unary_side(*op))
                    || (!op.is_prefix() && is_open_ended(operand));
                if op.is_prefix() {
                    f.write_str(op.symbol())?;
                    write_latex_operand(f, operand, wrap)
                } else {
                    write_latex_operand(f, operand, wrap)?;
                    f.write_str(op.symbol())
                }
            }
            ExprKind::Derivative { expr, wrt } => {
                f.write_str("\\frac{\\mathrm{d}}{\\mathrm{d}")?;
                write_latex_name(f, wrt)?;
                write!(f, "}}\\,\\left({}\\right)", expr.latex())
            }
            ExprKind::IndefiniteIntegral { integrand, wrt } => {
                write!(f, "\\int{{}}{}\\,\\mathrm{{d}}{}", integrand.latex(), wrt.latex())
            }
            ExprKind::DefiniteIntegral {
                integrand,
                wrt,
                from,
                to,
            } => write!(
                f,
                "\\int_{{{}}}^{{{}}}{}\\,\\mathrm{{d}}{}",
                from.latex(),
                to.latex(),
                integrand.latex(),
                wrt.latex()
            ),
        }
    }
}

fn write_latex_operand(f: &mut fmt::Formatter<'_>, child: &Expr, wrap: bool) -> fmt::Result {
    if wrap {
        write!(f, "\\left({}\\right)", child.latex())
    } else {
        write!(f, "{}", child.latex())
    }
}

/// Writes a variable name: Greek letters as macros, `base_suffix` as a
/// subscript, other multi-letter words upright.
fn write_latex_name(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    if let Some((base, suffix)) = name.split_once('_') {
        write_latex_name(f, base)?;
        f.write_str("_{")?;
        write_latex_name(f, suffix)?;
        return f.write_str("}");
    }
    if GREEK_LETTERS.contains(&name) {
        write!(f, "\\{name}{{}}")
    } else if name.chars().count() > 1 && name.chars().all(char::is_alphabetic) {
        write!(f, "\\mathrm{{{name}}}")
    } else {
        f.write_str(name)
    }
}

impl Expr {
    /// The round-trippable input-language form.
    pub fn to_input_string(&self) -> std::string::String {
        self.to_string()
    }

    /// The typeset form.
    pub fn to_latex_string(&self) -> std::string::String {
        self.latex().to_string()
    }

    /// A [`Display`](fmt::Display) adapter producing LaTeX.
    pub fn latex(&self) -> Latex<'_> {
        Latex(self)
    }
}
