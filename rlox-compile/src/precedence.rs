//! Precedence ladder for the Pratt compiler.
//!
//! Ordered low to high; `Ord` follows declaration order, so
//! `a <= b` directly answers "does `a` bind loosely enough that an
//! infix rule at precedence `b` should still be consumed".

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    None,
    Assignment,
    Or,
    And,
    Equality,
    Comparison,
    Term,
    Factor,
    Unary,
    Call,
    Primary,
}

impl Precedence {
    /// One step tighter, for left-associative infix recursion.
    /// Saturates at `Primary` rather than panicking, since no caller
    /// currently climbs past it.
    pub fn next(self) -> Self {
        use Precedence::*;
        match self {
            None => Assignment,
            Assignment => Or,
            Or => And,
            And => Equality,
            Equality => Comparison,
            Comparison => Term,
            Term => Factor,
            Factor => Unary,
            Unary => Call,
            Call => Primary,
            Primary => Primary,
        }
    }
}
