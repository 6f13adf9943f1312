//! Source ranges used for diagnostics.
//!
//! A [`Span`] marks the bytes of the original input that a token or an
//! expression node covers. Spans never take part in semantics: two
//! expressions that differ only in their spans are equal.
//!
//! # Examples
//!
//! ```rust
//! # use parsym::{Span, span};
//! let lhs = span!(0, 1);
//! let rhs = span!(4, 5);
//! let whole = lhs.merge(&rhs);
//! assert_eq!(whole, Span::new(0, 5));
//! assert!(whole.contains(&rhs));
//! assert_eq!(whole.to_string(), "0..5");
//! ```

use std::fmt;

/// A half-open byte range `[start, end)` into the input text.
///
/// Invariants are not enforced here, but it is conventional for
/// `start <= end`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    /// Starting byte offset (inclusive).
    pub start: usize,
    /// Ending byte offset (exclusive).
    pub end: usize,
}

impl Span {
    /// Creates a new `Span`.
    #[inline]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Merge with another span by covering both.
    ///
    /// The result’s `start` is the minimum of the two starts, and `end` is
    /// the maximum of the two ends.
    #[inline]
    pub fn merge(&self, other: &Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Is this span empty (start == end)?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Length of the span in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` if `other` lies entirely within this span.
    #[inline]
    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Build a [`Span`] inline from byte offsets.
///
/// # Examples
///
/// ```rust
/// # use parsym::span;
/// let s = span!(2, 7);
/// assert_eq!(s.len(), 5);
/// ```
#[macro_export]
macro_rules! span {
    ($start:expr, $end:expr) => {
        $crate::Span {
            start: $start,
            end: $end,
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_covers_both_ends() {
        let a = Span::new(5, 10);
        let b = Span::new(2, 7);
        assert_eq!(a.merge(&b), Span::new(2, 10));
        assert_eq!(b.merge(&a), Span::new(2, 10));
    }

    #[test]
    fn merge_with_inner_span_is_unchanged() {
        let outer = Span::new(2, 12);
        let inner = Span::new(4, 6);
        assert_eq!(outer.merge(&inner), outer);
    }

    #[test]
    fn disjoint_merge_spans_the_gap() {
        let m = span!(0, 1).merge(&span!(8, 9));
        assert_eq!(m, Span::new(0, 9));
        assert_eq!(m.len(), 9);
    }

    #[test]
    fn empty_span() {
        let s = Span::new(3, 3);
        assert!(s.is_empty());
        assert_eq!(s.len(), 0);
    }

    #[test]
    fn containment() {
        let outer = Span::new(0, 10);
        assert!(outer.contains(&Span::new(0, 10)));
        assert!(outer.contains(&Span::new(3, 4)));
        assert!(!outer.contains(&Span::new(9, 11)));
        assert!(!Span::new(3, 4).contains(&outer));
    }

    #[test]
    fn display_is_range_syntax() {
        assert_eq!(Span::new(10, 20).to_string(), "10..20");
    }
}
