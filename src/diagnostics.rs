//! The diagnostics sink shared by the scanner, parser, and interpreter
//! (`spec.md` §3 "Diagnostics state", §6.3, §7).
//!
//! Two monotonic flags track whether a run hit a static error (scanning or
//! parsing) or a runtime error. Once set they stay set until the driver
//! explicitly resets them between runs — this crate never clears them on
//! its own, matching the teacher's pattern of reporting straight to
//! `eprintln!` with no hidden recovery.

use crate::token::{Token, TokenKind};
use std::fmt;

/// Collects and formats errors for a single scan+parse+interpret run.
#[derive(Debug, Default)]
pub struct Diagnostics {
    had_static_error: bool,
    had_runtime_error: bool,
    messages: Vec<String>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn had_static_error(&self) -> bool {
        self.had_static_error
    }

    pub fn had_runtime_error(&self) -> bool {
        self.had_runtime_error
    }

    /// Clears both flags and the message log so the sink can be reused for
    /// another run.
    pub fn reset(&mut self) {
        self.had_static_error = false;
        self.had_runtime_error = false;
        self.messages.clear();
    }

    /// All formatted messages reported so far, in report order.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Reports a scan or runtime error tied only to a line number:
    /// `[Línea <n>] Error: <message>` (§6.3 shape 1).
    pub fn error(&mut self, line: usize, message: impl fmt::Display) {
        self.had_static_error = true;
        self.messages.push(format!("[Línea {}] Error: {}", line, message));
    }

    /// Reports a parse error located at a specific token:
    /// `[Línea <n>] Error en <location>: <message>` (§6.3 shape 2), where
    /// `<location>` is `"el final"` for an EOF token or the quoted lexeme
    /// otherwise.
    pub fn error_at(&mut self, token: &Token, message: impl fmt::Display) {
        self.had_static_error = true;
        let location = if token.kind == TokenKind::EndOfFile {
            "el final".to_string()
        } else {
            format!("'{}'", token.lexeme)
        };
        self.messages
            .push(format!("[Línea {}] Error en {}: {}", token.line, location, message));
    }

    /// Reports a runtime error using the offending token's line, shape 1
    /// of §6.3 (runtime errors never use the `Error en <location>` shape).
    pub fn runtime_error(&mut self, line: usize, message: impl fmt::Display) {
        self.had_runtime_error = true;
        self.messages.push(format!("[Línea {}] Error: {}", line, message));
    }
}
