//! Runtime error type for the Yatay interpreter.
//!
//! Scan and parse errors are reported directly into the `Diagnostics` sink
//! (`crate::diagnostics`) and never escape as a `Result` — only runtime
//! errors (`spec.md` §7, "not recoverable") propagate through the
//! evaluation stack, caught exactly once in `Interpreter::interpret`.

use crate::token::Token;
use std::fmt;

/// A runtime error, carrying the line of the token that triggered it so
/// the diagnostics sink can format `[Línea <n>] Error: <message>`.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeError {
    pub message: String,
    pub line: usize,
}

impl RuntimeError {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line,
        }
    }

    /// Convenience constructor taking the offending token directly.
    pub fn at(token: &Token, message: impl Into<String>) -> Self {
        Self::new(token.line, message)
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for RuntimeError {}

pub type Result<T> = std::result::Result<T, RuntimeError>;
