//! Copyright (c) 2005–2025 IKH Software, Inc.
//!
//! Released under the terms of the GNU Lesser General Public License, version 3.0
//! or (at your option) any later version (LGPL-3.0-or-later).
//!
//! # parsym
//!
//! A small symbolic-mathematics engine: a table-driven tokenizer, a
//! precedence-climbing parser and an expression tree that renders itself to
//! the input language and to LaTeX, simplifies safely and differentiates.
//!
//! ## Pipeline
//!
//! text → [`Lexer`] → [`Token`]s → [`parser::parse`] driven by a [`Grammar`]
//! → [`Expr`] → [`Expr::safe_simplify`] / [`Expr::derivative`] →
//! [`Expr::to_input_string`] / [`Expr::to_latex_string`].
//!
//! Every stage is a pure function of its inputs. The standard token table
//! and grammar are built once and shared.
//!
//! ## Example
//!
//! ```rust
//! use parsym::{Location, parse_str};
//!
//! let e = parse_str("2x^2 + derivative 3t wrt t").unwrap();
//! assert_eq!(e.to_input_string(), "2 x ^ 2 + derivative 3 t wrt t");
//! assert_eq!(e.safe_simplify().to_input_string(), "2 x ^ 2 + 3");
//!
//! let err = parse_str("(x").unwrap_err();
//! let diag = err.diagnostic().unwrap();
//! assert_eq!(diag.location, Location::EndOfInput);
//! ```
//!
//! ## Modules
//!
//! - [`span`], [`token`]: source ranges and tokens
//! - [`lexer`]: token-description tables and the lexer
//! - [`oper`]: operator precedence and associativity
//! - [`parser`], [`grammar`]: the Pratt parser and its rule tables
//! - [`expr`]: the expression tree, rendering, simplification, derivatives
//! - [`constant`]: symbolic constants
//! - [`error`]: error types

pub mod constant;
pub mod error;
pub mod expr;
pub mod grammar;
pub mod lexer;
pub mod oper;
pub mod parser;
pub mod span;
pub mod token;

pub use constant::Constant;
pub use error::{
    DerivativeError, DiagnosableError, Error, GrammarError, LexError, Location, ParseError,
};
pub use expr::render::{Latex, Side, needs_parens};
pub use expr::{Expr, ExprKind};
pub use grammar::{Grammar, InfixOper, InfixRule, PrefixRule, TokenMatch};
pub use lexer::{Lexer, STANDARD_TOKEN_DESCS, TokenDesc, lex, standard_token_descs};
pub use oper::{Assoc, BinaryOp, Fixity, MIN_OPER_PREC, OperDef, UnaryOp};
pub use parser::{MAX_NESTING, Parser, parse_complete};
pub use span::Span;
pub use token::{Token, TokenKind};

/// Lexes and parses `text` as one expression with the standard token table
/// and grammar.
///
/// # Errors
/// [`Error::Lex`] when a character cannot be tokenized, [`Error::Parse`]
/// when the tokens do not form exactly one expression.
pub fn parse_str(text: &str) -> Result<Expr, Error> {
    let tokens = Lexer::standard().lex(text)?;
    let expr = parse_complete(&tokens, Grammar::standard())?;
    Ok(expr)
}
