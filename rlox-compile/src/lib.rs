//! Pratt compiler: parses source directly into bytecode, one token of
//! lookahead at a time, with no intermediate AST.

pub mod compiler;
pub mod precedence;

pub use compiler::compile;
pub use precedence::Precedence;
