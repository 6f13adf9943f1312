//! # Result presentation
//!
//! A [`Report`] is what the front end shows for one request. Each kind
//! renders itself as plain text through [`Display`](fmt::Display):
//!
//! | Variant | Shows |
//! |---------|-------|
//! | [`Report::LexerDebug`]  | one `kind 'text'` line per token |
//! | [`Report::ParserDebug`] | the expression read back, its tree, LaTeX, simplified LaTeX |
//! | [`Report::PlainExpr`]   | `$$latex$$` and the input form |
//! | [`Report::Error`]       | a user-facing message, or a bug-report request for internal errors |
//! | [`Report::Group`]       | its members, separated by blank lines |

use parsym::{Expr, ExprKind, Token};
use smartstring::alias::String;
use std::fmt;

#[derive(Debug, Clone)]
pub enum Report {
    Group(Vec<Report>),
    Error { input: String, error: parsym::Error },
    LexerDebug { tokens: Vec<Token> },
    ParserDebug { expr: Expr },
    PlainExpr { expr: Expr },
}

impl Report {
    /// Lists the tokens of `input`.
    pub fn lex(input: &str) -> Report {
        match parsym::lex(input) {
            Ok(tokens) => Report::LexerDebug { tokens },
            Err(e) => Report::error(input, e.into()),
        }
    }

    /// Shows how `input` parses.
    pub fn parse(input: &str) -> Report {
        match parsym::parse_str(input) {
            Ok(expr) => Report::ParserDebug { expr },
            Err(e) => Report::error(input, e),
        }
    }

    /// Parses `input`, simplifies it and carries out its derivatives.
    pub fn eval(input: &str) -> Report {
        match parsym::parse_str(input) {
            Ok(expr) => {
                let expr = expr.safe_simplify();
                log::debug!("evaluated {:?} to {}", input, expr);
                Report::PlainExpr { expr }
            }
            Err(e) => Report::error(input, e),
        }
    }

    pub fn error(input: &str, error: parsym::Error) -> Report {
        Report::Error {
            input: String::from(input),
            error,
        }
    }

    pub fn is_error(&self) -> bool {
        match self {
            Report::Error { .. } => true,
            Report::Group(members) => members.iter().any(Report::is_error),
            _ => false,
        }
    }
}

/// Writes the tree under `expr`, one node per line, indented two spaces per
/// level.
fn write_tree(f: &mut fmt::Formatter<'_>, expr: &Expr, depth: usize) -> fmt::Result {
    write!(f, "{:indent$}{}", "", expr.variant_name(), indent = depth * 2)?;
    match &expr.kind {
        ExprKind::Var(name) => write!(f, " {name}")?,
        ExprKind::Number(value) => write!(f, " {value}")?,
        ExprKind::Constant(constant) => write!(f, " {}", constant.name)?,
        ExprKind::Derivative { wrt, .. } => write!(f, " wrt {wrt}")?,
        _ => {}
    }
    writeln!(f)?;
    for child in expr.children() {
        write_tree(f, child, depth + 1)?;
    }
    Ok(())
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Group(members) => {
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{member}")?;
                }
                Ok(())
            }
            Report::Error { input, error } => match error.diagnostic() {
                Some(diagnostic) => {
                    writeln!(f, "Sorry, I don't understand.")?;
                    writeln!(f, "'{diagnostic}'")
                }
                None => {
                    writeln!(f, "Sorry, something went wrong.")?;
                    writeln!(
                        f,
                        "Please report this as a bug, including the input and the message below."
                    )?;
                    writeln!(f, "input: {input}")?;
                    writeln!(f, "message: {error}")
                }
            },
            Report::LexerDebug { tokens } => {
                for token in tokens {
                    writeln!(f, "{token}")?;
                }
                Ok(())
            }
            Report::ParserDebug { expr } => {
                writeln!(f, "input: {expr}")?;
                writeln!(f, "tree:")?;
                write_tree(f, expr, 1)?;
                writeln!(f, "latex: {}", expr.latex())?;
                writeln!(f, "simplified: {}", expr.safe_simplify().latex())
            }
            Report::PlainExpr { expr } => {
                writeln!(f, "$${}$$", expr.latex())?;
                writeln!(f, "{expr}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parsym::ParseError;

    #[test]
    fn lexer_listing() {
        let r = Report::lex("2x");
        assert_eq!(r.to_string(), "number '2'\nname 'x'\n");
        assert!(!r.is_error());
    }

    #[test]
    fn parser_debug_shows_tree_and_latex() {
        let r = Report::parse("x * 1");
        assert_eq!(
            r.to_string(),
            "input: x * 1\n\
             tree:\n  Mul\n    Var x\n    NumericLiteral 1\n\
             latex: x \\cdot{} 1\n\
             simplified: x\n"
        );
    }

    #[test]
    fn plain_expr_is_simplified() {
        let r = Report::eval("derivative x * x");
        assert_eq!(r.to_string(), "$$x + x$$\nx + x\n");
    }

    #[test]
    fn diagnosable_errors_are_phrased_for_users() {
        let r = Report::eval("(x");
        assert!(r.is_error());
        assert_eq!(
            r.to_string(),
            "Sorry, I don't understand.\n'expected ')' at end of input'\n"
        );

        let r = Report::lex("a # b");
        assert_eq!(
            r.to_string(),
            "Sorry, I don't understand.\n'no matching token at offset 2'\n"
        );
    }

    #[test]
    fn internal_errors_ask_for_a_bug_report() {
        let error = parsym::Error::Parse(ParseError::internal("expected '(', got 'x'"));
        let r = Report::error("x", error);
        let text = r.to_string();
        assert!(text.starts_with("Sorry, something went wrong.\n"));
        assert!(text.contains("input: x\n"));
        assert!(text.contains("message: internal parser error: expected '(', got 'x'"));
    }

    #[test]
    fn group_separates_members() {
        let r = Report::Group(vec![Report::eval("1 + 1"), Report::eval("2 * 2")]);
        assert_eq!(r.to_string(), "$$2$$\n2\n\n$$4$$\n4\n");
        assert!(!r.is_error());
        let r = Report::Group(vec![Report::eval("1 +")]);
        assert!(r.is_error());
    }
}
