//! # Error types
//!
//! Failures fall into two tiers:
//!
//! - **Diagnosable** errors are problems with the user's input. They carry a
//!   message and a [`Location`] so a front end can point at the offending text:
//!   [`LexError`] and [`ParseError::Diagnosable`].
//! - **Internal** errors are programming or grammar-table mistakes:
//!   [`ParseError::Internal`] and [`GrammarError`]. They are not meant to be
//!   phrased as user mistakes.
//!
//! [`DerivativeError`] reports differentiation of constructs that have no
//! derivative rule. The umbrella [`Error`] is returned by
//! [`parse_str`](crate::parse_str).
//!
//! Conversions are derived with `#[from]`, so `?` composes across layers.
//!
//! # Examples
//!
//! ```rust
//! # use parsym::{DiagnosableError, LexError, Location};
//! let err: DiagnosableError = LexError { offset: 3 }.into();
//! assert_eq!(err.location, Location::Offset(3));
//! assert_eq!(err.to_string(), "no matching token at offset 3");
//! ```

use crate::TokenKind;
use smartstring::alias::String;
use std::fmt;
use thiserror::Error;

/// Where a diagnosable error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// Byte offset into the input.
    Offset(usize),
    /// The input ended where more was required.
    EndOfInput,
}

impl Location {
    /// Returns the byte offset, or `None` at end of input.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Location::Offset(offset) => Some(*offset),
            Location::EndOfInput => None,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Offset(offset) => write!(f, "at offset {offset}"),
            Location::EndOfInput => f.write_str("at end of input"),
        }
    }
}

/// No token description matched the input at `offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no matching token at offset {offset}")]
pub struct LexError {
    /// Byte offset of the first unmatched character.
    pub offset: usize,
}

/// A user-facing error with a message and a source location.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} {location}")]
pub struct DiagnosableError {
    /// Human-readable message.
    pub message: String,
    /// Where the problem was found.
    pub location: Location,
}

impl DiagnosableError {
    pub fn new(message: impl AsRef<str>, location: Location) -> Self {
        Self {
            message: String::from(message.as_ref()),
            location,
        }
    }

    pub fn at(message: impl AsRef<str>, offset: usize) -> Self {
        Self::new(message, Location::Offset(offset))
    }

    pub fn at_end(message: impl AsRef<str>) -> Self {
        Self::new(message, Location::EndOfInput)
    }
}

impl From<LexError> for DiagnosableError {
    fn from(err: LexError) -> Self {
        DiagnosableError::at("no matching token", err.offset)
    }
}

/// A parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input is not a valid expression.
    #[error(transparent)]
    Diagnosable(#[from] DiagnosableError),

    /// The grammar tables or a handler misbehaved.
    #[error("internal parser error: {0}")]
    Internal(String),
}

impl ParseError {
    pub fn internal(message: impl AsRef<str>) -> Self {
        ParseError::Internal(String::from(message.as_ref()))
    }

    /// Returns the diagnostic when this is a user input problem.
    pub fn diagnostic(&self) -> Option<&DiagnosableError> {
        match self {
            ParseError::Diagnosable(d) => Some(d),
            ParseError::Internal(_) => None,
        }
    }
}

/// A token-description table that cannot be used to build a lexer.
#[derive(Debug, Clone, Error)]
pub enum GrammarError {
    /// The pattern is not a valid regular expression.
    #[error("invalid {kind} pattern {pattern:?}: {message}")]
    InvalidPattern {
        kind: TokenKind,
        pattern: String,
        message: String,
    },

    /// The pattern can match without consuming input, so the lexer could
    /// never advance past it.
    #[error("{kind} pattern {pattern:?} can match the empty string")]
    EmptyMatch { kind: TokenKind, pattern: String },

    /// The combined matcher could not be built.
    #[error("cannot build lexer: {0}")]
    Build(String),
}

/// Differentiation of a construct without a derivative rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DerivativeError {
    #[error("derivative of {construct} is not supported")]
    Unsupported { construct: &'static str },
}

/// Any failure of the text-to-expression pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl Error {
    /// Returns the user-facing diagnostic, or `None` for internal errors.
    pub fn diagnostic(&self) -> Option<DiagnosableError> {
        match self {
            Error::Lex(e) => Some((*e).into()),
            Error::Parse(e) => e.diagnostic().cloned(),
        }
    }
}
