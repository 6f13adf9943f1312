//! Command-line interface (CLI) for parsym-calc.
//!
//! Each subcommand takes either one expression on the command line or a file
//! with one expression per line (`-i/--input`), and prints a [`Report`] for
//! each. Set `RUST_LOG=trace` to see every token and parser decision.
//!
//! [`Report`]: parsym_calc::Report

use anyhow::{Context, Result, bail};
use clap::{Parser as ClapParser, Subcommand};
use parsym_calc::{Report, read_expressions};
use smartstring::alias::String;

#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Command
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Lists the tokens of each expression
    Lex(Source),
    /// Shows the parse tree, LaTeX and simplified LaTeX of each expression
    Parse(Source),
    /// Simplifies each expression, carrying out derivatives
    Eval(Source),
}

#[derive(clap::Args, Debug)]
struct Source {
    /// Expression to process
    expr: Option<String>,

    /// Input file with one expression per line
    #[arg(short, long, conflicts_with = "expr")]
    input: Option<String>,
}

impl Source {
    fn expressions(&self) -> Result<Vec<String>> {
        match (&self.expr, &self.input) {
            (Some(expr), _) => Ok(vec![expr.clone()]),
            (None, Some(path)) => {
                read_expressions(path.as_str()).with_context(|| format!("can't open {path:?}"))
            }
            (None, None) => bail!("give an expression or --input <file>"),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    let (source, build): (&Source, fn(&str) -> Report) = match &args.command {
        Commands::Lex(source) => (source, Report::lex),
        Commands::Parse(source) => (source, Report::parse),
        Commands::Eval(source) => (source, Report::eval),
    };

    let reports = source
        .expressions()?
        .iter()
        .map(|expr| build(expr))
        .collect();
    let report = Report::Group(reports);
    print!("{report}");

    if report.is_error() {
        log::info!("some expressions were not understood");
        std::process::exit(1);
    }
    Ok(())
}
