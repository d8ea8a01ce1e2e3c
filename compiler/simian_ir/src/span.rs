//! Source location spans.

use std::fmt;
use std::ops::Range;

/// Byte range `[start, end)` into the source text.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Span used for synthesized nodes, such as literals produced by `unquote`.
    pub const DUMMY: Span = Span { start: 0, end: 0 };

    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Convert a lexer byte range, clamping offsets past `u32::MAX`.
    #[inline]
    pub fn from_range(range: Range<usize>) -> Self {
        let clamp = |offset: usize| u32::try_from(offset).unwrap_or(u32::MAX);
        Span {
            start: clamp(range.start),
            end: clamp(range.end),
        }
    }

    #[inline]
    pub fn to_range(self) -> Range<usize> {
        self.start as usize..self.end as usize
    }

    #[inline]
    pub const fn len(self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_range_round_trips() {
        let span = Span::from_range(3..9);
        assert_eq!(span.to_range(), 3..9);
        assert_eq!(span.len(), 6);
        assert!(!span.is_empty());
        assert!(Span::DUMMY.is_empty());
    }
}
