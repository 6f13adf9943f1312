//! Symbolic constants.
//!
//! A [`Constant`] keeps its name and typeset glyph alongside an approximate
//! value, so an expression can show `π` instead of `3.14159…` until something
//! explicitly asks for the number.
//!
//! ```rust
//! # use parsym::Constant;
//! let pi = Constant::lookup("pi").unwrap();
//! assert_eq!(pi.latex, "\\pi{}");
//! assert!(Constant::lookup("tau").is_none());
//! ```

use indexmap::IndexMap;
use once_cell::sync::Lazy;

/// A named mathematical constant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constant {
    /// Input-language name.
    pub name: &'static str,
    /// LaTeX glyph.
    pub latex: &'static str,
    /// Approximate numeric value.
    pub value: f64,
}

impl Constant {
    pub const PI: Constant = Constant {
        name: "pi",
        latex: "\\pi{}",
        value: std::f64::consts::PI,
    };

    pub const E: Constant = Constant {
        name: "e",
        latex: "\\mathrm{e}",
        value: std::f64::consts::E,
    };

    /// Not reachable from the standard token table; available to callers
    /// building expressions directly.
    pub const GOLDEN: Constant = Constant {
        name: "golden ratio",
        latex: "\\varphi{}",
        value: 1.618_033_988_749_895,
    };

    /// Finds a constant by its input-language name.
    pub fn lookup(name: &str) -> Option<Constant> {
        CONSTANTS.get(name).copied()
    }
}

static CONSTANTS: Lazy<IndexMap<&'static str, Constant>> = Lazy::new(|| {
    [Constant::PI, Constant::E, Constant::GOLDEN]
        .into_iter()
        .map(|c| (c.name, c))
        .collect()
});
