//! # Grammar tables
//!
//! A [`Grammar`] is two ordered tables of plain data records:
//!
//! - [`PrefixRule`]s start an expression: leaves, parenthesised groups,
//!   negation, `derivative ... wrt ...`;
//! - [`InfixRule`]s continue one: binary operators, postfix operators and
//!   implicit multiplication. Each carries the operator it builds, and with it
//!   the precedence and associativity the [`Parser`] needs.
//!
//! Lookup walks a table in order and returns the first rule whose
//! [`TokenMatch`] accepts the next token. Builders are plain function
//! pointers, so rules hold no state and a grammar can be shared freely.
//!
//! ```rust
//! # use parsym::{BinaryOp, Grammar, InfixRule, Lexer, TokenMatch, parser};
//! // The standard grammar without implicit multiplication.
//! let mut grammar = Grammar::new();
//! for rule in Grammar::standard().prefix_rules() {
//!     grammar = grammar.with_prefix(*rule);
//! }
//! grammar = grammar
//!     .with_infix(InfixRule::binary(TokenMatch::Symbol("+"), BinaryOp::Add))
//!     .with_infix(InfixRule::binary(TokenMatch::Symbol("*"), BinaryOp::Mul));
//!
//! let tokens = Lexer::standard().lex("2x").unwrap();
//! let (expr, consumed) = parser::parse(&tokens, &grammar).unwrap();
//! assert_eq!((expr.to_input_string().as_str(), consumed), ("2", 1));
//! ```

use crate::{
    BinaryOp, Constant, DiagnosableError, Expr, MIN_OPER_PREC, OperDef, ParseError, Parser, Token,
    TokenKind, UnaryOp,
};
use once_cell::sync::Lazy;
use smartstring::alias::String;
use std::fmt;

/// Builds an expression starting at the parser's current token.
pub type PrefixBuild = fn(&mut Parser<'_>) -> Result<Expr, ParseError>;

/// Extends `lhs` starting at the parser's current token.
pub type InfixBuild = fn(&mut Parser<'_>, Expr, &InfixRule) -> Result<Expr, ParseError>;

/// Token predicate selecting a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenMatch {
    /// Any token of this kind.
    Kind(TokenKind),
    /// A symbol token with exactly this text.
    Symbol(&'static str),
    /// A keyword token with this text, ignoring ASCII case.
    Keyword(&'static str),
}

impl TokenMatch {
    pub fn matches(&self, token: &Token) -> bool {
        match self {
            TokenMatch::Kind(kind) => token.kind == *kind,
            TokenMatch::Symbol(text) => token.is_symbol(text),
            TokenMatch::Keyword(text) => token.is_keyword(text),
        }
    }
}

impl fmt::Display for TokenMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenMatch::Kind(kind) => write!(f, "any {kind}"),
            TokenMatch::Symbol(text) => write!(f, "symbol '{text}'"),
            TokenMatch::Keyword(text) => write!(f, "keyword '{text}'"),
        }
    }
}

/// A rule that starts an expression.
#[derive(Clone, Copy)]
pub struct PrefixRule {
    pub matcher: TokenMatch,
    pub build: PrefixBuild,
}

impl PrefixRule {
    pub const fn new(matcher: TokenMatch, build: PrefixBuild) -> Self {
        Self { matcher, build }
    }
}

impl fmt::Debug for PrefixRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrefixRule")
            .field("matcher", &self.matcher)
            .finish_non_exhaustive()
    }
}

/// The operator an [`InfixRule`] builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOper {
    Binary(BinaryOp),
    Postfix(UnaryOp),
}

impl InfixOper {
    pub const fn def(self) -> OperDef {
        match self {
            InfixOper::Binary(op) => op.def(),
            InfixOper::Postfix(op) => op.def(),
        }
    }
}

/// A rule that extends an expression, bound to its operator's precedence and
/// associativity.
#[derive(Clone, Copy)]
pub struct InfixRule {
    pub matcher: TokenMatch,
    pub oper: InfixOper,
    pub build: InfixBuild,
}

impl InfixRule {
    pub const fn new(matcher: TokenMatch, oper: InfixOper, build: InfixBuild) -> Self {
        Self {
            matcher,
            oper,
            build,
        }
    }

    /// A binary operator written as a token between its operands.
    pub const fn binary(matcher: TokenMatch, op: BinaryOp) -> Self {
        Self::new(matcher, InfixOper::Binary(op), build_binary)
    }

    /// A postfix operator token.
    pub const fn postfix(matcher: TokenMatch, op: UnaryOp) -> Self {
        Self::new(matcher, InfixOper::Postfix(op), build_postfix)
    }

    /// Multiplication by juxtaposition, triggered by (but not consuming) the
    /// first token of the right operand.
    pub const fn implicit_mul(matcher: TokenMatch) -> Self {
        Self::new(
            matcher,
            InfixOper::Binary(BinaryOp::ImplicitMul),
            build_implicit_mul,
        )
    }

    pub const fn def(&self) -> OperDef {
        self.oper.def()
    }

    pub const fn prec(&self) -> usize {
        self.oper.def().prec
    }
}

impl fmt::Debug for InfixRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfixRule")
            .field("matcher", &self.matcher)
            .field("oper", &self.oper)
            .finish_non_exhaustive()
    }
}

/// Ordered prefix and infix rule tables.
#[derive(Debug, Clone, Default)]
pub struct Grammar {
    prefix: Vec<PrefixRule>,
    infix: Vec<InfixRule>,
}

static STANDARD_GRAMMAR: Lazy<Grammar> = Lazy::new(|| {
    Grammar::new()
        .with_prefix(PrefixRule::new(TokenMatch::Kind(TokenKind::Name), build_var))
        .with_prefix(PrefixRule::new(
            TokenMatch::Kind(TokenKind::Number),
            build_number,
        ))
        .with_prefix(PrefixRule::new(
            TokenMatch::Kind(TokenKind::Constant),
            build_constant,
        ))
        .with_prefix(PrefixRule::new(TokenMatch::Symbol("("), build_paren))
        .with_prefix(PrefixRule::new(TokenMatch::Symbol("-"), build_neg))
        .with_prefix(PrefixRule::new(
            TokenMatch::Keyword("derivative"),
            build_derivative,
        ))
        .with_prefix(PrefixRule::new(
            TokenMatch::Keyword("integral"),
            build_integral,
        ))
        .with_prefix(PrefixRule::new(
            TokenMatch::Keyword("integrate"),
            build_integral,
        ))
        .with_infix(InfixRule::binary(TokenMatch::Symbol("+"), BinaryOp::Add))
        .with_infix(InfixRule::binary(TokenMatch::Symbol("-"), BinaryOp::Sub))
        .with_infix(InfixRule::binary(TokenMatch::Symbol("*"), BinaryOp::Mul))
        .with_infix(InfixRule::binary(TokenMatch::Symbol("/"), BinaryOp::Div))
        .with_infix(InfixRule::binary(TokenMatch::Symbol("^"), BinaryOp::Exp))
        .with_infix(InfixRule::postfix(
            TokenMatch::Symbol("!"),
            UnaryOp::Factorial,
        ))
        .with_infix(InfixRule::implicit_mul(TokenMatch::Kind(TokenKind::Name)))
        .with_infix(InfixRule::implicit_mul(TokenMatch::Kind(
            TokenKind::Constant,
        )))
        .with_infix(InfixRule::implicit_mul(TokenMatch::Kind(TokenKind::Number)))
        .with_infix(InfixRule::implicit_mul(TokenMatch::Symbol("(")))
});

impl Grammar {
    /// An empty grammar; nothing parses until rules are added.
    pub fn new() -> Self {
        Self::default()
    }

    /// The grammar of the standard input language.
    pub fn standard() -> &'static Grammar {
        &STANDARD_GRAMMAR
    }

    /// Appends a prefix rule; earlier rules take priority.
    #[must_use]
    pub fn with_prefix(mut self, rule: PrefixRule) -> Self {
        self.prefix.push(rule);
        self
    }

    /// Appends an infix rule; earlier rules take priority.
    #[must_use]
    pub fn with_infix(mut self, rule: InfixRule) -> Self {
        self.infix.push(rule);
        self
    }

    pub fn prefix_rules(&self) -> &[PrefixRule] {
        &self.prefix
    }

    pub fn infix_rules(&self) -> &[InfixRule] {
        &self.infix
    }

    /// The first prefix rule accepting `token`.
    pub fn prefix_rule(&self, token: &Token) -> Option<&PrefixRule> {
        self.prefix.iter().find(|rule| rule.matcher.matches(token))
    }

    /// The first infix rule accepting `token`.
    pub fn infix_rule(&self, token: &Token) -> Option<&InfixRule> {
        self.infix.iter().find(|rule| rule.matcher.matches(token))
    }
}

fn current<'a>(parser: &mut Parser<'a>) -> Result<&'a Token, ParseError> {
    parser
        .next_token()
        .ok_or_else(|| ParseError::internal("rule invoked at end of input"))
}

fn build_var(parser: &mut Parser<'_>) -> Result<Expr, ParseError> {
    let token = current(parser)?;
    Ok(Expr::var(token.text.as_str(), token.span))
}

fn build_number(parser: &mut Parser<'_>) -> Result<Expr, ParseError> {
    let token = current(parser)?;
    let value: f64 = token
        .text
        .parse()
        .map_err(|e| ParseError::internal(format!("bad number '{}': {}", token.text, e)))?;
    if !value.is_finite() {
        return Err(DiagnosableError::at("number is too large", token.span.start).into());
    }
    Ok(Expr::number(value, token.span))
}

fn build_constant(parser: &mut Parser<'_>) -> Result<Expr, ParseError> {
    let token = current(parser)?;
    match Constant::lookup(&token.text) {
        Some(constant) => Ok(Expr::constant(constant, token.span)),
        None => Err(DiagnosableError::at(
            format!("unrecognized constant '{}'", token.text),
            token.span.start,
        )
        .into()),
    }
}

fn build_paren(parser: &mut Parser<'_>) -> Result<Expr, ParseError> {
    let open = parser.require("(")?;
    let inner = parser.parse(MIN_OPER_PREC)?;
    let close = parser.expect(")")?;
    Ok(Expr::paren(inner, open.span.merge(&close.span)))
}

fn build_neg(parser: &mut Parser<'_>) -> Result<Expr, ParseError> {
    let minus = parser.require("-")?;
    let operand = parser.parse(UnaryOp::Neg.def().rhs_prec())?;
    let span = minus.span.merge(&operand.span);
    Ok(Expr::unary(UnaryOp::Neg, operand, span))
}

fn build_derivative(parser: &mut Parser<'_>) -> Result<Expr, ParseError> {
    let keyword = parser.require("derivative")?;
    let expr = parser.parse(MIN_OPER_PREC)?;
    let mut span = keyword.span.merge(&expr.span);

    let wrt = match parser.peek(0) {
        Some(token) if token.is_keyword("wrt") => {
            parser.next_token();
            match parser.next_token() {
                Some(name) if name.kind == TokenKind::Name => {
                    span = span.merge(&name.span);
                    name.text.clone()
                }
                Some(other) => {
                    return Err(DiagnosableError::at(
                        format!("expected variable name after 'wrt', got '{}'", other.text),
                        other.span.start,
                    )
                    .into());
                }
                None => {
                    return Err(
                        DiagnosableError::at_end("expected variable name after 'wrt'").into(),
                    );
                }
            }
        }
        _ => String::from(expr.guess_primary_variable().unwrap_or("x")),
    };

    Ok(Expr::derivative_of(expr, wrt, span))
}

fn build_integral(parser: &mut Parser<'_>) -> Result<Expr, ParseError> {
    let token = current(parser)?;
    Err(DiagnosableError::at(
        format!("'{}' is not yet supported", token.text),
        token.span.start,
    )
    .into())
}

fn build_binary(parser: &mut Parser<'_>, lhs: Expr, rule: &InfixRule) -> Result<Expr, ParseError> {
    let InfixOper::Binary(op) = rule.oper else {
        return Err(ParseError::internal("binary builder bound to a postfix operator"));
    };
    current(parser)?;
    let rhs = parser.parse(rule.def().rhs_prec())?;
    let span = lhs.span.merge(&rhs.span);
    Ok(Expr::binary(op, lhs, rhs, span))
}

fn build_implicit_mul(
    parser: &mut Parser<'_>,
    lhs: Expr,
    rule: &InfixRule,
) -> Result<Expr, ParseError> {
    let rhs = parser.parse(rule.def().rhs_prec())?;
    let span = lhs.span.merge(&rhs.span);
    Ok(Expr::binary(BinaryOp::ImplicitMul, lhs, rhs, span))
}

fn build_postfix(parser: &mut Parser<'_>, lhs: Expr, rule: &InfixRule) -> Result<Expr, ParseError> {
    let InfixOper::Postfix(op) = rule.oper else {
        return Err(ParseError::internal("postfix builder bound to a binary operator"));
    };
    let token = current(parser)?;
    let span = lhs.span.merge(&token.span);
    Ok(Expr::unary(op, lhs, span))
}
