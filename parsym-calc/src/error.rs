//! # Front-end error type
//!
//! [`CalcError`] covers what can fail around the engine. Engine failures are
//! not errors here: they become [`Report::Error`](crate::Report::Error)
//! values and are printed with the other results.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CalcError {
    /// The input file could not be read.
    #[error("cannot read input: {0}")]
    Io(#[from] std::io::Error),
}
