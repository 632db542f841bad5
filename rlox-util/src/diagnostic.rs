//! Diagnostic module - compile and runtime error reporting.
//!
//! The wire format printed to stderr is part of the interpreter's
//! user-facing output, not just a log line, so it is built here rather
//! than delegated to `tracing`.

use std::cell::RefCell;

use crate::span::Span;

/// Diagnostic severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Error,
    Warning,
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Warning => write!(f, "warning"),
        }
    }
}

/// A single reported diagnostic.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
    pub span: Span,
    /// `None` means "at end" (the token was EOF).
    pub lexeme: Option<String>,
}

impl Diagnostic {
    pub fn compile_error(span: Span, lexeme: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
            span,
            lexeme: lexeme.map(str::to_owned),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let location = match &self.lexeme {
            Some(lexeme) => format!(" at '{}'", lexeme),
            None => " at end".to_string(),
        };
        write!(
            f,
            "[line {}] {}{}: {}",
            self.span.line(),
            capitalize(&self.level.to_string()),
            location,
            self.message
        )
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Collects and prints diagnostics.
///
/// `Handler` only stores and formats; the `had_error`/`panic_mode`
/// parser-recovery flags belong to the compiler itself, since they
/// govern *when* a diagnostic is reported, not how it is printed.
///
/// # Examples
///
/// ```
/// use rlox_util::diagnostic::{Diagnostic, Handler};
/// use rlox_util::span::Span;
///
/// let handler = Handler::new();
/// handler.report(Diagnostic::compile_error(Span::new(1), Some("+"), "Expected expression."));
/// assert!(handler.has_errors());
/// ```
pub struct Handler {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl Handler {
    pub fn new() -> Self {
        Self {
            diagnostics: RefCell::new(Vec::new()),
        }
    }

    /// Record a diagnostic and print it to stderr.
    pub fn report(&self, diagnostic: Diagnostic) {
        eprintln!("{diagnostic}");
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .borrow()
            .iter()
            .any(|d| d.level == Level::Error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.level == Level::Error)
            .count()
    }

    /// Print a runtime-error diagnostic in the interpreter's stack-trace
    /// format: a one-line message followed by the failing source line.
    pub fn runtime_error(&self, line: u32, message: impl std::fmt::Display) {
        eprintln!("{message}");
        eprintln!("[line {line}] in script");
    }
}

impl Default for Handler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_error_at_lexeme() {
        let diag = Diagnostic::compile_error(Span::new(3), Some("+"), "Expected expression.");
        assert_eq!(diag.to_string(), "[line 3] Error at '+': Expected expression.");
    }

    #[test]
    fn formats_error_at_end() {
        let diag = Diagnostic::compile_error(Span::new(1), None, "Expect expression.");
        assert_eq!(diag.to_string(), "[line 1] Error at end: Expect expression.");
    }

    #[test]
    fn handler_tracks_error_state() {
        let handler = Handler::new();
        assert!(!handler.has_errors());
        handler.report(Diagnostic::compile_error(Span::new(1), None, "boom"));
        assert!(handler.has_errors());
        assert_eq!(handler.error_count(), 1);
    }
}
