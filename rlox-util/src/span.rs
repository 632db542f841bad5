//! Span module - source location tracking.
//!
//! A single source buffer is compiled per call, so a span is just the
//! 1-based line number a token or diagnostic belongs to.

/// A source location, expressed as a line number.
///
/// # Examples
///
/// ```
/// use rlox_util::span::Span;
///
/// let span = Span::new(1);
/// assert_eq!(span.line(), 1);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    line: u32,
}

impl Span {
    /// A span with no real location, used for synthesized diagnostics.
    pub const DUMMY: Span = Span { line: 0 };

    #[inline]
    pub const fn new(line: u32) -> Self {
        Self { line }
    }

    #[inline]
    pub const fn line(self) -> u32 {
        self.line
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}", self.line)
    }
}
