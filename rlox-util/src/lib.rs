//! rlox-util - Shared foundation types for the rlox compiler and VM.
//!
//! Small on purpose: this system compiles one source string per
//! `interpret()` call, so there is no multi-file `SourceMap` and no
//! span arithmetic beyond "which line is this token on".
//!
//! # Modules
//!
//! - `span`: a line-tracked source location.
//! - `diagnostic`: `Handler`, the collector/printer for compile and
//!   runtime diagnostics.
//! - `index_vec`: a typed-index `Vec` wrapper, used by `rlox-bytecode`
//!   for the constant pool.
//! - `error`: shared `thiserror` error types for the CLI boundary.

pub mod diagnostic;
pub mod error;
pub mod index_vec;
pub mod span;

pub use diagnostic::{Diagnostic, Handler, Level};
pub use error::RloxError;
pub use index_vec::{Idx, IndexVec};
pub use span::Span;
