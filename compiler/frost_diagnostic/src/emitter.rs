//! Diagnostic Emitters
//!
//! - Terminal: human-readable output with optional color
//! - JSON: machine-readable output for tooling
//!
//! Both implement [`DiagnosticEmitter`].

mod json;
mod terminal;

pub use json::JsonEmitter;
pub use terminal::{ColorMode, TerminalEmitter};

use std::fmt::Write;

use crate::Diagnostic;

/// Returns `","` when `index` is not the last element, `""` otherwise.
pub(crate) fn trailing_comma(index: usize, total: usize) -> &'static str {
    if index + 1 < total {
        ","
    } else {
        ""
    }
}

/// Trait for emitting diagnostics in various formats.
pub trait DiagnosticEmitter {
    fn emit(&mut self, diagnostic: &Diagnostic);

    fn emit_all(&mut self, diagnostics: &[Diagnostic]) {
        for diag in diagnostics {
            self.emit(diag);
        }
    }

    /// Flush any buffered output.
    fn flush(&mut self);

    fn emit_summary(&mut self, error_count: usize, warning_count: usize);
}

/// Escape a string for JSON output.
pub(crate) fn escape_json(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(result, "\\u{:04x}", c as u32);
            }
            c => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_json() {
        assert_eq!(escape_json("plain"), "plain");
        assert_eq!(escape_json("field 'x'\nnext"), "field 'x'\\nnext");
        assert_eq!(escape_json("\"q\""), "\\\"q\\\"");
        assert_eq!(escape_json("\u{1}"), "\\u0001");
    }
}
