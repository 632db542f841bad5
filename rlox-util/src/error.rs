//! Shared error type for fallible library-level operations.
//!
//! Most of the core compile/execute surface reports through
//! `Handler`/`InterpretResult` rather than `Result`, since callers need
//! to distinguish "compiled but failed at runtime" from "never
//! compiled" as plain enum variants, not an error chain. `RloxError`
//! covers what's left: I/O and configuration failures at the CLI
//! boundary.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RloxError {
    #[error("failed to read script '{path}': {source}")]
    ReadScript {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read config '{path}': {source}")]
    ReadConfig {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
