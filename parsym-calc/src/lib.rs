//! Copyright (c) 2005–2025 IKH Software, Inc.
//!
//! Released under the terms of the GNU Lesser General Public License, version 3.0
//! or (at your option) any later version (LGPL-3.0-or-later).
//!
//! # parsym-calc
//!
//! A text front end for **parsym**: it turns each request into a [`Report`]
//! and prints it. The `parsym-calc` binary exposes the same operations on the
//! command line.
//!
//! ## Example
//!
//! ```rust
//! use parsym_calc::Report;
//!
//! let report = Report::eval("2 * 3 + x * 1");
//! assert_eq!(report.to_string(), "$$6 + x$$\n6 + x\n");
//! ```
//!
//! ## Modules
//!
//! - [`report`]: result kinds and their text rendering
//! - [`error`]: the front-end error type
pub mod error;
pub mod report;

pub use error::CalcError;
pub use report::Report;

use smartstring::alias::String;
use std::path::Path;

/// Reads one expression per non-blank line of the file at `path`.
pub fn read_expressions(path: impl AsRef<Path>) -> Result<Vec<String>, CalcError> {
    let text = std::fs::read_to_string(path)?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}
