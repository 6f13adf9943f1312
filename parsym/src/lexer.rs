//! # Lexer
//!
//! Converts input text into an ordered sequence of [`Token`]s.
//!
//! A lexer is configured with a table of [`TokenDesc`]s, each a token kind and
//! a regular expression. All patterns are compiled into one multi-pattern
//! matcher with leftmost-first semantics and searched *anchored* at the
//! current offset, so the description that appears first in the table wins
//! whenever several could match there. Table order is therefore the
//! disambiguation mechanism: keywords are listed before the generic name
//! pattern so that `integrate` is one keyword rather than nine names.
//!
//! ASCII spaces and tabs between tokens are skipped. Any other character that
//! no description matches is a [`LexError`].
//!
//! ```rust
//! # use parsym::{Lexer, TokenKind};
//! let tokens = Lexer::standard().lex("2x ^ 2").unwrap();
//! let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
//! assert_eq!(
//!     kinds,
//!     [TokenKind::Number, TokenKind::Name, TokenKind::Symbol, TokenKind::Number]
//! );
//! assert_eq!(tokens[2].span.start, 3);
//! ```

use crate::{GrammarError, LexError, Span, Token, TokenKind};
use once_cell::sync::Lazy;
use regex_automata::{Anchored, Input, meta::Regex, util::syntax};
use smartstring::alias::String;

/// One row of a lexer's configuration: a kind and the pattern that
/// recognizes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenDesc {
    pub kind: TokenKind,
    pub pattern: String,
}

impl TokenDesc {
    pub fn new(kind: TokenKind, pattern: impl AsRef<str>) -> Self {
        Self {
            kind,
            pattern: String::from(pattern.as_ref()),
        }
    }
}

/// The standard token table, in priority order.
///
/// Subscripted names are listed before constants so that `e_1` is one name
/// instead of the constant `e` followed by an unmatched `_`.
pub const STANDARD_TOKEN_DESCS: &[(TokenKind, &str)] = &[
    (
        TokenKind::Keyword,
        r"(?i)derivative|wrt|integral|integrate|of|from|to",
    ),
    (TokenKind::Function, r"sin|cos|tan|sqrt"),
    (TokenKind::Name, r"[a-zA-Z]_(?:[a-zA-Z]+|[0-9]+)"),
    (TokenKind::Constant, r"pi|e"),
    (TokenKind::Name, r"[a-zA-Z]"),
    (TokenKind::Number, r"[0-9]+(?:\.[0-9]+)?"),
    (TokenKind::Symbol, r"\+|-|\*|/|\^|=|\(|\)|!"),
];

/// Returns the standard token table as owned descriptions.
pub fn standard_token_descs() -> Vec<TokenDesc> {
    STANDARD_TOKEN_DESCS
        .iter()
        .map(|(kind, pattern)| TokenDesc::new(*kind, pattern))
        .collect()
}

static STANDARD_LEXER: Lazy<Lexer> = Lazy::new(|| {
    Lexer::try_new(standard_token_descs()).expect("standard token table is valid")
});

/// A table-driven lexer.
///
/// Construction validates the whole table: every pattern must parse and none
/// may match the empty string. Lexing itself is a pure function of the table
/// and the input.
#[derive(Debug, Clone)]
pub struct Lexer {
    descs: Vec<TokenDesc>,
    regex: Regex,
}

impl Lexer {
    /// Builds a lexer from descriptions listed in priority order.
    ///
    /// # Errors
    /// - [`GrammarError::InvalidPattern`] if a pattern does not parse,
    /// - [`GrammarError::EmptyMatch`] if a pattern can match without
    ///   consuming input,
    /// - [`GrammarError::Build`] if the combined matcher cannot be built.
    pub fn try_new(descs: Vec<TokenDesc>) -> Result<Self, GrammarError> {
        let mut hirs = Vec::with_capacity(descs.len());
        for desc in &descs {
            let hir =
                syntax::parse(&desc.pattern).map_err(|e| GrammarError::InvalidPattern {
                    kind: desc.kind,
                    pattern: desc.pattern.clone(),
                    message: String::from(e.to_string().as_str()),
                })?;
            if hir.properties().minimum_len() == Some(0) {
                return Err(GrammarError::EmptyMatch {
                    kind: desc.kind,
                    pattern: desc.pattern.clone(),
                });
            }
            hirs.push(hir);
        }

        let regex = Regex::builder()
            .build_many_from_hir(&hirs)
            .map_err(|e| GrammarError::Build(String::from(e.to_string().as_str())))?;

        log::debug!("lexer built from {} token descriptions", descs.len());
        Ok(Self { descs, regex })
    }

    /// The lexer for the standard token table.
    pub fn standard() -> &'static Lexer {
        &STANDARD_LEXER
    }

    /// The descriptions this lexer was built from, in priority order.
    pub fn descs(&self) -> &[TokenDesc] {
        &self.descs
    }

    /// Splits `text` into tokens.
    ///
    /// # Errors
    /// Returns a [`LexError`] carrying the offset of the first character no
    /// description matches.
    pub fn lex(&self, text: &str) -> Result<Vec<Token>, LexError> {
        let bytes = text.as_bytes();
        let mut tokens = Vec::new();
        let mut offset = 0;

        while offset < bytes.len() {
            if matches!(bytes[offset], b' ' | b'\t') {
                offset += 1;
                continue;
            }

            let input = Input::new(text).range(offset..).anchored(Anchored::Yes);
            let Some(m) = self.regex.search(&input) else {
                log::debug!("no token description matches at offset {}", offset);
                return Err(LexError { offset });
            };

            let desc = &self.descs[m.pattern().as_usize()];
            let span = Span::new(m.start(), m.end());
            let token = Token::new(desc.kind, &text[m.range()], span);
            log::trace!(
                "MATCHED: Kind: {:?}, Pattern: {}, Text: {:?}, Span: {}",
                token.kind,
                m.pattern().as_usize(),
                token.text,
                token.span,
            );
            tokens.push(token);
            offset = m.end();
        }

        Ok(tokens)
    }
}

/// Lexes `text` with the standard token table.
pub fn lex(text: &str) -> Result<Vec<Token>, LexError> {
    Lexer::standard().lex(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span;

    fn kinds_and_texts(tokens: &[Token]) -> Vec<(TokenKind, &str)> {
        tokens.iter().map(|t| (t.kind, t.text.as_str())).collect()
    }

    #[test]
    fn lexes_implicit_product() {
        let _ = env_logger::builder().is_test(true).try_init();
        let ts = lex("2x^2").unwrap();
        assert_eq!(
            kinds_and_texts(&ts),
            [
                (TokenKind::Number, "2"),
                (TokenKind::Name, "x"),
                (TokenKind::Symbol, "^"),
                (TokenKind::Number, "2"),
            ]
        );
        assert_eq!(ts[1].span, span!(1, 2));
    }

    #[test]
    fn skips_spaces_and_tabs() {
        let ts = lex(" \t3.25 *\ty ").unwrap();
        assert_eq!(
            kinds_and_texts(&ts),
            [
                (TokenKind::Number, "3.25"),
                (TokenKind::Symbol, "*"),
                (TokenKind::Name, "y"),
            ]
        );
        assert_eq!(ts[0].span, span!(2, 6));
        assert_eq!(ts[2].span, span!(9, 10));
    }

    #[test]
    fn empty_and_blank_inputs_have_no_tokens() {
        assert!(lex("").unwrap().is_empty());
        assert!(lex("  \t ").unwrap().is_empty());
    }

    #[test]
    fn keywords_take_priority_over_names() {
        let ts = lex("integrate").unwrap();
        assert_eq!(kinds_and_texts(&ts), [(TokenKind::Keyword, "integrate")]);

        let ts = lex("Derivative x WRT x").unwrap();
        assert_eq!(
            kinds_and_texts(&ts),
            [
                (TokenKind::Keyword, "Derivative"),
                (TokenKind::Name, "x"),
                (TokenKind::Keyword, "WRT"),
                (TokenKind::Name, "x"),
            ]
        );
    }

    #[test]
    fn constants_and_subscripted_names() {
        let ts = lex("pi e e_1 x_max").unwrap();
        assert_eq!(
            kinds_and_texts(&ts),
            [
                (TokenKind::Constant, "pi"),
                (TokenKind::Constant, "e"),
                (TokenKind::Name, "e_1"),
                (TokenKind::Name, "x_max"),
            ]
        );
    }

    #[test]
    fn multi_letter_words_split_into_names() {
        let ts = lex("xy").unwrap();
        assert_eq!(
            kinds_and_texts(&ts),
            [(TokenKind::Name, "x"), (TokenKind::Name, "y")]
        );
        let ts = lex("sqrt").unwrap();
        assert_eq!(kinds_and_texts(&ts), [(TokenKind::Function, "sqrt")]);
    }

    #[test]
    fn symbols() {
        let ts = lex("+-*/^=()!").unwrap();
        assert_eq!(ts.len(), 9);
        assert!(ts.iter().all(|t| t.kind == TokenKind::Symbol));
    }

    #[test]
    fn unmatched_character_reports_offset() {
        assert_eq!(lex("@"), Err(LexError { offset: 0 }));
        assert_eq!(lex("x + @"), Err(LexError { offset: 4 }));
        assert_eq!(lex("x\ny"), Err(LexError { offset: 1 }));
    }

    #[test]
    fn table_order_decides_between_overlapping_patterns() {
        let word_first = Lexer::try_new(vec![
            TokenDesc::new(TokenKind::Name, "[a-z]+"),
            TokenDesc::new(TokenKind::Keyword, "let"),
        ])
        .unwrap();
        let ts = word_first.lex("let").unwrap();
        assert_eq!(kinds_and_texts(&ts), [(TokenKind::Name, "let")]);

        let keyword_first = Lexer::try_new(vec![
            TokenDesc::new(TokenKind::Keyword, "let"),
            TokenDesc::new(TokenKind::Name, "[a-z]+"),
        ])
        .unwrap();
        let ts = keyword_first.lex("let").unwrap();
        assert_eq!(kinds_and_texts(&ts), [(TokenKind::Keyword, "let")]);
    }

    #[test]
    fn rejects_empty_matching_pattern() {
        let err = Lexer::try_new(vec![TokenDesc::new(TokenKind::Number, "[0-9]*")]).unwrap_err();
        assert!(matches!(
            err,
            GrammarError::EmptyMatch {
                kind: TokenKind::Number,
                ..
            }
        ));
    }

    #[test]
    fn rejects_invalid_pattern() {
        let err = Lexer::try_new(vec![TokenDesc::new(TokenKind::Symbol, "(")]).unwrap_err();
        assert!(matches!(
            err,
            GrammarError::InvalidPattern {
                kind: TokenKind::Symbol,
                ..
            }
        ));
    }

    #[test]
    fn standard_table_is_exposed() {
        let descs = Lexer::standard().descs();
        assert_eq!(descs.len(), STANDARD_TOKEN_DESCS.len());
        assert_eq!(descs[0].kind, TokenKind::Keyword);
        assert_eq!(descs, standard_token_descs().as_slice());
    }
}
