//! Operator definitions and precedence handling.
//!
//! This module defines the fixity, associativity and precedence of every
//! operator the expression tree knows about. The parser consults these
//! definitions to decide how far an operand extends, and the renderers
//! consult the same definitions to decide where parentheses are required.
//!
//! # Components
//! - [`Fixity`]: operator position (`Prefix`, `Infix`, `Postfix`).
//! - [`Assoc`]: associativity (`None`, `Left`, `Right`).
//! - [`OperDef`]: fixity, precedence and associativity of one operator.
//! - [`BinaryOp`], [`UnaryOp`]: the closed set of operators with their
//!   symbols and definitions.
//!
//! | Operator | Symbol | Fixity | Prec | Assoc |
//! |----------|--------|--------|------|-------|
//! | [`BinaryOp::Add`]         | `+` | infix   | 30 | left  |
//! | [`BinaryOp::Sub`]         | `-` | infix   | 30 | left  |
//! | [`BinaryOp::Mul`]         | `*` | infix   | 50 | left  |
//! | [`BinaryOp::Div`]         | `/` | infix   | 50 | left  |
//! | [`BinaryOp::ImplicitMul`] |     | infix   | 60 | left  |
//! | [`UnaryOp::Neg`]          | `-` | prefix  | 75 | right |
//! | [`BinaryOp::Exp`]         | `^` | infix   | 80 | right |
//! | [`UnaryOp::Factorial`]    | `!` | postfix | 90 | left  |

/// Where an operator stands relative to its operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fixity {
    /// Before its operand, e.g. `-x`.
    Prefix,
    /// Between its operands, e.g. `x + y`.
    Infix,
    /// After its operand, e.g. `x!`.
    Postfix,
}

/// How operators of the same precedence group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assoc {
    None,
    /// `a - b - c` is `(a - b) - c`.
    Left,
    /// `a ^ b ^ c` is `a ^ (b ^ c)`.
    Right,
}

/// Threshold a top-level parse starts from; every operator binds tighter.
pub const MIN_OPER_PREC: usize = 0;

/// Fixity, precedence and associativity of one operator.
///
/// Higher precedence numbers bind **tighter**. Prefix operators are
/// right-associative and postfix operators left-associative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperDef {
    pub fixity: Fixity,
    pub prec: usize,
    pub assoc: Assoc,
}

impl OperDef {
    pub const fn new(fixity: Fixity, prec: usize, assoc: Assoc) -> Self {
        Self {
            fixity,
            prec,
            assoc,
        }
    }

    /// The precedence threshold for parsing the operand that follows this
    /// operator.
    ///
    /// Right-associative operators recurse one level lower so that an
    /// operator of the same precedence is absorbed by the operand
    /// (`2 ^ 3 ^ 2` groups as `2 ^ (3 ^ 2)`); all others recurse at their
    /// own precedence, which leaves a same-precedence operator to the caller
    /// (`1 - 2 - 3` groups as `(1 - 2) - 3`).
    pub const fn rhs_prec(&self) -> usize {
        match self.assoc {
            Assoc::Right => self.prec - 1,
            Assoc::Left | Assoc::None => self.prec,
        }
    }
}

pub const ADD: OperDef = OperDef::new(Fixity::Infix, 30, Assoc::Left);
pub const SUB: OperDef = OperDef::new(Fixity::Infix, 30, Assoc::Left);
pub const MUL: OperDef = OperDef::new(Fixity::Infix, 50, Assoc::Left);
pub const DIV: OperDef = OperDef::new(Fixity::Infix, 50, Assoc::Left);
pub const IMPLICIT_MUL: OperDef = OperDef::new(Fixity::Infix, 60, Assoc::Left);
pub const NEG: OperDef = OperDef::new(Fixity::Prefix, 75, Assoc::Right);
pub const EXP: OperDef = OperDef::new(Fixity::Infix, 80, Assoc::Right);
pub const FACTORIAL: OperDef = OperDef::new(Fixity::Postfix, 90, Assoc::Left);

/// A binary (infix) operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    /// Multiplication written by juxtaposition, e.g. `2x`.
    ImplicitMul,
    Div,
    Exp,
}

impl BinaryOp {
    pub const fn def(self) -> OperDef {
        match self {
            BinaryOp::Add => ADD,
            BinaryOp::Sub => SUB,
            BinaryOp::Mul => MUL,
            BinaryOp::ImplicitMul => IMPLICIT_MUL,
            BinaryOp::Div => DIV,
            BinaryOp::Exp => EXP,
        }
    }

    /// The operator's input-language symbol.
    ///
    /// Implicit multiplication has no symbol of its own; it shares `*`.
    pub const fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul | BinaryOp::ImplicitMul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Exp => "^",
        }
    }

    /// Applies the operator to two numbers with IEEE double semantics.
    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            BinaryOp::Add => lhs + rhs,
            BinaryOp::Sub => lhs - rhs,
            BinaryOp::Mul | BinaryOp::ImplicitMul => lhs * rhs,
            BinaryOp::Div => lhs / rhs,
            BinaryOp::Exp => lhs.powf(rhs),
        }
    }
}

/// A unary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// Prefix `-`.
    Neg,
    /// Postfix `!`.
    Factorial,
}

impl UnaryOp {
    pub const fn def(self) -> OperDef {
        match self {
            UnaryOp::Neg => NEG,
            UnaryOp::Factorial => FACTORIAL,
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Factorial => "!",
        }
    }

    pub const fn is_prefix(self) -> bool {
        matches!(self.def().fixity, Fixity::Prefix)
    }

    /// Applies the operator to a literal, or `None` when the result would
    /// not be exact.
    ///
    /// Factorial is only folded for non-negative integers; past `170!` the
    /// value overflows to infinity just as repeated multiplication would.
    pub fn apply(self, value: f64) -> Option<f64> {
        match self {
            UnaryOp::Neg => Some(-value),
            UnaryOp::Factorial => {
                if value < 0.0 || value.fract() != 0.0 {
                    return None;
                }
                if value > 170.0 {
                    return Some(f64::INFINITY);
                }
                Some((2..=value as u64).fold(1.0, |acc, k| acc * k as f64))
            }
        }
    }
}
