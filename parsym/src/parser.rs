//! # Parser
//!
//! A precedence-climbing (Pratt) parser over a token slice.
//!
//! The [`Parser`] owns nothing but an index into the tokens; all knowledge of
//! *what* to build lives in the [`Grammar`]'s prefix and infix rule tables.
//! [`Parser::parse`] works as follows:
//!
//! 1. the prefix rule matching the next token builds a left-hand expression
//!    (a leaf, a parenthesised group, a negation, ...);
//! 2. while the infix rule matching the next token has a precedence strictly
//!    above `min_prec`, that rule combines the left-hand expression with
//!    whatever it parses next, and the result becomes the new left-hand
//!    expression.
//!
//! Infix rules parse their right operand at [`OperDef::rhs_prec`], which is
//! one below the operator's own precedence for right-associative operators.
//! That single difference yields `(1 - 2) - 3` and `2 ^ (3 ^ 2)`.
//!
//! ```rust
//! # use parsym::{Grammar, lex, parser};
//! let tokens = lex("2 + 3 * 4").unwrap();
//! let (expr, consumed) = parser::parse(&tokens, Grammar::standard()).unwrap();
//! assert_eq!(consumed, tokens.len());
//! assert_eq!(expr.to_input_string(), "2 + 3 * 4");
//! ```
//!
//! Each call of [`Parser::parse`] and each operator it applies adds one level
//! of nesting. Input nested deeper than [`MAX_NESTING`] levels is rejected
//! with a diagnosable error; every later pass over the tree recurses, so the
//! limit also bounds their stack use.
//!
//! [`OperDef::rhs_prec`]: crate::OperDef::rhs_prec

use crate::{DiagnosableError, Expr, Grammar, MIN_OPER_PREC, ParseError, Token, TokenKind};

/// Deepest nesting of operands and operators the parser accepts.
pub const MAX_NESTING: usize = 256;

/// Cursor over a token slice plus the grammar driving it.
///
/// Rule builders receive `&mut Parser` and use the cursor methods to consume
/// their tokens and [`Parser::parse`] to recurse.
#[derive(Debug, Clone)]
pub struct Parser<'a> {
    tokens: &'a [Token],
    index: usize,
    grammar: &'a Grammar,
    nesting: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token], grammar: &'a Grammar) -> Self {
        Self {
            tokens,
            index: 0,
            grammar,
            nesting: 0,
        }
    }

    /// Looks `k` tokens ahead without consuming anything.
    pub fn peek(&self, k: usize) -> Option<&'a Token> {
        self.tokens.get(self.index + k)
    }

    /// Consumes and returns the current token.
    pub fn next_token(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.index)?;
        self.index += 1;
        Some(token)
    }

    /// Consumes the current token, which the calling rule already knows to be
    /// `text`.
    ///
    /// # Errors
    /// A mismatch means a rule was selected for the wrong token, so it is
    /// reported as [`ParseError::Internal`].
    pub fn require(&mut self, text: &str) -> Result<&'a Token, ParseError> {
        match self.next_token() {
            Some(token) if token_is(token, text) => Ok(token),
            Some(token) => Err(ParseError::internal(format!(
                "expected '{}', got '{}'",
                text, token.text
            ))),
            None => Err(ParseError::internal(format!(
                "expected '{}', got end of input",
                text
            ))),
        }
    }

    /// Consumes the current token if it is `text`.
    ///
    /// # Errors
    /// Anything else is the user's mistake and is reported as a
    /// [`DiagnosableError`] at the offending token, or at end of input.
    pub fn expect(&mut self, text: &str) -> Result<&'a Token, ParseError> {
        match self.peek(0) {
            Some(token) if token_is(token, text) => {
                self.index += 1;
                Ok(token)
            }
            Some(token) => Err(DiagnosableError::at(
                format!("expected '{}', got '{}'", text, token.text),
                token.span.start,
            )
            .into()),
            None => Err(DiagnosableError::at_end(format!("expected '{}'", text)).into()),
        }
    }

    /// Number of tokens consumed so far.
    pub fn consumed(&self) -> usize {
        self.index
    }

    pub fn is_at_end(&self) -> bool {
        self.index >= self.tokens.len()
    }

    pub fn grammar(&self) -> &'a Grammar {
        self.grammar
    }

    /// Parses one expression whose operators all bind tighter than
    /// `min_prec`.
    ///
    /// # Errors
    /// Fails when no prefix rule matches the next token (or input is
    /// exhausted), when the input nests deeper than [`MAX_NESTING`], or when
    /// a rule builder fails.
    pub fn parse(&mut self, min_prec: usize) -> Result<Expr, ParseError> {
        let entry = self.nesting;
        let result = self.parse_nested(min_prec);
        self.nesting = entry;
        result
    }

    fn descend(&mut self) -> Result<(), ParseError> {
        self.nesting += 1;
        if self.nesting <= MAX_NESTING {
            return Ok(());
        }
        let message = "expression is nested too deeply";
        Err(match self.peek(0) {
            Some(token) => DiagnosableError::at(message, token.span.start),
            None => DiagnosableError::at_end(message),
        }
        .into())
    }

    fn parse_nested(&mut self, min_prec: usize) -> Result<Expr, ParseError> {
        let grammar = self.grammar;
        self.descend()?;

        let Some(token) = self.peek(0) else {
            return Err(DiagnosableError::at_end("expected primary expression").into());
        };
        let Some(prefix) = grammar.prefix_rule(token) else {
            return Err(DiagnosableError::at(
                format!("expected primary expression, got '{}'", token.text),
                token.span.start,
            )
            .into());
        };
        log::trace!("Prefix {} for {}", prefix.matcher, token);
        let mut lhs = (prefix.build)(self)?;

        while let Some(token) = self.peek(0) {
            let Some(infix) = grammar.infix_rule(token) else {
                break;
            };
            if infix.prec() <= min_prec {
                log::trace!(
                    "Stop at {} (prec {} <= {})",
                    token,
                    infix.prec(),
                    min_prec
                );
                break;
            }
            self.descend()?;
            log::trace!("Infix {:?}({}) for {}", infix.oper, infix.prec(), token);
            lhs = (infix.build)(self, lhs, infix)?;
        }

        Ok(lhs)
    }
}

/// Token text comparison used by [`Parser::require`] and [`Parser::expect`].
/// Keywords compare without regard to ASCII case.
fn token_is(token: &Token, text: &str) -> bool {
    match token.kind {
        TokenKind::Keyword => token.is_keyword(text),
        _ => token.text.as_str() == text,
    }
}

/// Parses one expression from the front of `tokens`.
///
/// Returns the expression and the number of tokens it consumed. Tokens left
/// over are not an error here; see [`parse_complete`].
///
/// # Errors
/// Returns a [`ParseError`] when no expression can be parsed.
pub fn parse(tokens: &[Token], grammar: &Grammar) -> Result<(Expr, usize), ParseError> {
    log::debug!("parsing {} tokens", tokens.len());
    let mut parser = Parser::new(tokens, grammar);
    let expr = parser.parse(MIN_OPER_PREC)?;
    log::debug!("parsed {} of {} tokens", parser.consumed(), tokens.len());
    Ok((expr, parser.consumed()))
}

/// Parses `tokens` as exactly one expression.
///
/// # Errors
/// In addition to the errors of [`parse`], reports `extraneous tokens` at the
/// first token the expression did not consume.
pub fn parse_complete(tokens: &[Token], grammar: &Grammar) -> Result<Expr, ParseError> {
    let (expr, consumed) = parse(tokens, grammar)?;
    match tokens.get(consumed) {
        Some(token) => Err(DiagnosableError::at("extraneous tokens", token.span.start).into()),
        None => Ok(expr),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BinaryOp, ExprKind, Lexer, Location, TokenDesc, UnaryOp, lex, span};

    fn parse_text(text: &str) -> Result<Expr, ParseError> {
        let _ = env_logger::builder().is_test(true).try_init();
        let tokens = lex(text).unwrap();
        parse_complete(&tokens, Grammar::standard())
    }

    fn grouped(text: &str) -> String {
        parse_text(text).unwrap().to_input_string()
    }

    fn diagnostic(text: &str) -> DiagnosableError {
        match parse_text(text) {
            Err(ParseError::Diagnosable(d)) => d,
            other => panic!("expected a diagnosable error for {text:?}, got {other:?}"),
        }
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let expr = parse_text("2 + 3 * 4").unwrap();
        let ExprKind::Binary {
            op: BinaryOp::Add,
            rhs,
            ..
        } = &expr.kind
        else {
            panic!("expected Add at the root, got {expr:?}");
        };
        assert!(matches!(
            rhs.kind,
            ExprKind::Binary {
                op: BinaryOp::Mul,
                ..
            }
        ));
        assert_eq!(grouped("2 * 3 + 4"), "2 * 3 + 4");
        assert_eq!(grouped("2 * (3 + 4)"), "2 * (3 + 4)");
    }

    #[test]
    fn subtraction_groups_left() {
        let expr = parse_text("1 - 2 - 3").unwrap();
        let ExprKind::Binary { lhs, rhs, .. } = &expr.kind else {
            panic!("expected a binary root");
        };
        assert_eq!(rhs.as_number(), Some(3.0));
        assert_eq!(lhs.to_input_string(), "1 - 2");
    }

    #[test]
    fn exponent_groups_right() {
        let expr = parse_text("2 ^ 3 ^ 2").unwrap();
        let ExprKind::Binary {
            op: BinaryOp::Exp,
            lhs,
            rhs,
        } = &expr.kind
        else {
            panic!("expected Exp at the root");
        };
        assert_eq!(lhs.as_number(), Some(2.0));
        assert_eq!(rhs.to_input_string(), "3 ^ 2");
        assert_eq!(grouped("(2 ^ 3) ^ 2"), "(2 ^ 3) ^ 2");
    }

    #[test]
    fn implicit_multiplication_precedence() {
        let expr = parse_text("2x^2").unwrap();
        let ExprKind::Binary {
            op: BinaryOp::ImplicitMul,
            lhs,
            rhs,
        } = &expr.kind
        else {
            panic!("expected ImplicitMul at the root, got {expr:?}");
        };
        assert_eq!(lhs.as_number(), Some(2.0));
        assert!(matches!(
            rhs.kind,
            ExprKind::Binary {
                op: BinaryOp::Exp,
                ..
            }
        ));

        let expr = parse_text("2x*3").unwrap();
        let ExprKind::Binary {
            op: BinaryOp::Mul,
            lhs,
            ..
        } = &expr.kind
        else {
            panic!("expected Mul at the root");
        };
        assert!(matches!(
            lhs.kind,
            ExprKind::Binary {
                op: BinaryOp::ImplicitMul,
                ..
            }
        ));
    }

    #[test]
    fn implicit_multiplication_before_paren() {
        let expr = parse_text("3(x + 1)").unwrap();
        let ExprKind::Binary {
            op: BinaryOp::ImplicitMul,
            rhs,
            ..
        } = &expr.kind
        else {
            panic!("expected ImplicitMul at the root");
        };
        assert!(matches!(rhs.kind, ExprKind::Paren(_)));
        assert_eq!(rhs.span, span!(1, 8));
    }

    #[test]
    fn negation_binds_looser_than_exponent() {
        let expr = parse_text("-2^2").unwrap();
        let ExprKind::Unary {
            op: UnaryOp::Neg,
            operand,
        } = &expr.kind
        else {
            panic!("expected Neg at the root");
        };
        assert!(matches!(
            operand.kind,
            ExprKind::Binary {
                op: BinaryOp::Exp,
                ..
            }
        ));
        assert_eq!(grouped("-x + 1"), "-x + 1");
    }

    #[test]
    fn factorial_is_postfix() {
        let expr = parse_text("2 * 3!").unwrap();
        let ExprKind::Binary { rhs, .. } = &expr.kind else {
            panic!("expected a binary root");
        };
        assert!(matches!(
            rhs.kind,
            ExprKind::Unary {
                op: UnaryOp::Factorial,
                ..
            }
        ));
        assert_eq!(grouped("-x!"), "-x!");
    }

    #[test]
    fn derivative_with_and_without_wrt() {
        let expr = parse_text("derivative y * t wrt t").unwrap();
        let ExprKind::Derivative { wrt, .. } = &expr.kind else {
            panic!("expected Derivative");
        };
        assert_eq!(wrt.as_str(), "t");
        assert_eq!(expr.span, span!(0, 22));

        let expr = parse_text("derivative y * t").unwrap();
        let ExprKind::Derivative { wrt, .. } = &expr.kind else {
            panic!("expected Derivative");
        };
        assert_eq!(wrt.as_str(), "y");

        let expr = parse_text("derivative 3").unwrap();
        let ExprKind::Derivative { wrt, .. } = &expr.kind else {
            panic!("expected Derivative");
        };
        assert_eq!(wrt.as_str(), "x");
    }

    #[test]
    fn missing_close_paren_at_end_of_input() {
        let d = diagnostic("(x");
        assert_eq!(d.location, Location::EndOfInput);
        assert_eq!(d.to_string(), "expected ')' at end of input");
    }

    #[test]
    fn wrong_token_instead_of_close_paren() {
        let d = diagnostic("(x =");
        assert_eq!(d.location, Location::Offset(3));
        assert_eq!(d.message.as_str(), "expected ')', got '='");
    }

    #[test]
    fn no_primary_expression() {
        let d = diagnostic("2 +");
        assert_eq!(d.location, Location::EndOfInput);
        assert_eq!(d.message.as_str(), "expected primary expression");

        let d = diagnostic("* 2");
        assert_eq!(d.location, Location::Offset(0));

        let d = diagnostic("sin x");
        assert_eq!(d.message.as_str(), "expected primary expression, got 'sin'");
    }

    #[test]
    fn empty_input() {
        let tokens = lex("").unwrap();
        let err = parse(&tokens, Grammar::standard()).unwrap_err();
        assert_eq!(
            err.diagnostic().map(|d| d.location),
            Some(Location::EndOfInput)
        );
    }

    #[test]
    fn extraneous_tokens() {
        let d = diagnostic("x )");
        assert_eq!(d.to_string(), "extraneous tokens at offset 2");

        let tokens = lex("x ) y").unwrap();
        let (expr, consumed) = parse(&tokens, Grammar::standard()).unwrap();
        assert_eq!(consumed, 1);
        assert_eq!(expr.to_input_string(), "x");
    }

    #[test]
    fn integrals_are_not_supported() {
        let d = diagnostic("1 + integrate x");
        assert_eq!(d.location, Location::Offset(4));
        assert!(d.message.contains("not yet supported"));
    }

    #[test]
    fn unknown_constant_is_diagnosable() {
        let lexer = Lexer::try_new(vec![
            TokenDesc::new(TokenKind::Constant, "tau|pi"),
            TokenDesc::new(TokenKind::Symbol, r"\+"),
        ])
        .unwrap();
        let tokens = lexer.lex("pi + tau").unwrap();
        let err = parse_complete(&tokens, Grammar::standard()).unwrap_err();
        let d = err.diagnostic().unwrap();
        assert_eq!(d.location, Location::Offset(5));
        assert_eq!(d.message.as_str(), "unrecognized constant 'tau'");
    }

    #[test]
    fn require_mismatch_is_internal() {
        let tokens = lex("x").unwrap();
        let mut parser = Parser::new(&tokens, Grammar::standard());
        let err = parser.require("(").unwrap_err();
        assert!(matches!(err, ParseError::Internal(_)));
        assert!(parser.is_at_end());
        assert!(matches!(parser.require("("), Err(ParseError::Internal(_))));
    }

    #[test]
    fn cursor_lookahead() {
        let tokens = lex("a + b").unwrap();
        let mut parser = Parser::new(&tokens, Grammar::standard());
        assert_eq!(parser.peek(2).map(|t| t.text.as_str()), Some("b"));
        assert_eq!(parser.peek(3), None);
        assert_eq!(parser.next_token().map(|t| t.text.as_str()), Some("a"));
        assert_eq!(parser.consumed(), 1);
        assert!(parser.expect("+").is_ok());
        assert!(parser.expect("+").is_err());
        assert_eq!(parser.consumed(), 2);
    }

    #[test]
    fn spans_cover_operands() {
        let expr = parse_text("x + 2 * y").unwrap();
        assert_eq!(expr.span, span!(0, 9));
        let ExprKind::Binary { rhs, .. } = &expr.kind else {
            panic!("expected a binary root");
        };
        assert_eq!(rhs.span, span!(4, 9));
    }

    #[test]
    fn deep_nesting_is_rejected() {
        let text = format!("{}x{}", "(".repeat(1000), ")".repeat(1000));
        let err = parse_text(&text).unwrap_err();
        let d = err.diagnostic().unwrap();
        assert_eq!(d.message.as_str(), "expression is nested too deeply");
        assert_eq!(d.location, Location::Offset(256));

        let text = format!("{}x", "-".repeat(100_000));
        let err = parse_text(&text).unwrap_err();
        assert_eq!(err.diagnostic().unwrap().location, Location::Offset(256));

        let text = format!("1{}", "+1".repeat(1000));
        let err = parse_text(&text).unwrap_err();
        assert_eq!(
            err.diagnostic().unwrap().message.as_str(),
            "expression is nested too deeply"
        );
    }

    #[test]
    fn nesting_below_the_limit_parses() {
        let text = format!("{}x{}", "(".repeat(100), ")".repeat(100));
        assert_eq!(parse_text(&text).unwrap().to_input_string(), text);

        let text = format!("1{}", " + 1".repeat(200));
        let expr = parse_text(&text).unwrap();
        assert_eq!(expr.safe_simplify().as_number(), Some(201.0));

        let tokens = lex("(x)").unwrap();
        let mut parser = Parser::new(&tokens, Grammar::standard());
        parser.parse(MIN_OPER_PREC).unwrap();
        assert_eq!(parser.nesting, 0);
    }
}
