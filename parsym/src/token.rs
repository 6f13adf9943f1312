//! # Tokens
//!
//! This module defines the token kind and token type produced by the
//! [`Lexer`](crate::Lexer) and consumed by the [`Parser`](crate::Parser):
//!
//! - [`TokenKind`]: the lexical category of a token,
//! - [`Token`]: a kind, the exact matched text, and the [`Span`] it covers.
//!
//! Tokens are immutable once produced; the lexer hands ownership of the whole
//! sequence to the caller.

use crate::Span;
use smartstring::alias::String;
use std::fmt;

/// The lexical category of a token.
///
/// Categories are assigned by the token-description table the lexer was
/// built with. The order of that table, not the category, decides which
/// description wins when several could match.
///
/// | Variant | Typical text |
/// |---------|--------------|
/// | [`TokenKind::Keyword`]  | `derivative`, `wrt`, `integrate` |
/// | [`TokenKind::Function`] | `sin`, `sqrt` |
/// | [`TokenKind::Constant`] | `pi`, `e` |
/// | [`TokenKind::Name`]     | `x`, `v_0` |
/// | [`TokenKind::Number`]   | `42`, `2.5` |
/// | [`TokenKind::Symbol`]   | `+`, `(`, `^` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Reserved word of the input language.
    Keyword,
    /// Name of a built-in function.
    Function,
    /// Name of a symbolic constant.
    Constant,
    /// Variable name.
    Name,
    /// Unsigned decimal literal.
    Number,
    /// Operator or punctuation.
    Symbol,
}

impl fmt::Display for TokenKind {
    /// Formats the kind as its canonical lowercase name.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TokenKind::Keyword => "keyword",
            TokenKind::Function => "function",
            TokenKind::Constant => "constant",
            TokenKind::Name => "name",
            TokenKind::Number => "number",
            TokenKind::Symbol => "symbol",
        })
    }
}

/// A lexical token.
///
/// # Fields
///
/// - [`kind`](#structfield.kind): the token's category,
/// - [`text`](#structfield.text): the exact input text the token matched,
/// - [`span`](#structfield.span): the byte range of that text.
///
/// # Example
/// ```rust
/// # use parsym::{Token, TokenKind, span};
/// let tok = Token::new(TokenKind::Number, "99", span!(0, 2));
/// assert_eq!(tok.kind, TokenKind::Number);
/// assert_eq!(tok.text.as_str(), "99");
/// assert!(!tok.is_symbol("99"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The token's category.
    pub kind: TokenKind,
    /// The matched input text.
    pub text: String,
    /// Where the token occurs in the input.
    pub span: Span,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, text: impl AsRef<str>, span: Span) -> Self {
        Self {
            kind,
            text: String::from(text.as_ref()),
            span,
        }
    }

    /// Returns `true` for a symbol token with exactly this text.
    pub fn is_symbol(&self, text: &str) -> bool {
        self.kind == TokenKind::Symbol && self.text.as_str() == text
    }

    /// Returns `true` for a keyword token with this text.
    ///
    /// Keywords are matched case-insensitively by the standard table, so the
    /// comparison ignores ASCII case.
    pub fn is_keyword(&self, text: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text.eq_ignore_ascii_case(text)
    }
}

impl fmt::Display for Token {
    /// Formats the token as `kind 'text'`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind, self.text)
    }
}
