//! Diagnostic queue for collecting and ordering diagnostics.
//!
//! Features:
//! - Error limits to prevent overwhelming output
//! - Ordering by source position on flush
//! - `ErrorGuaranteed` proof that errors were emitted

use crate::{Diagnostic, ErrorGuaranteed};

/// Configuration for diagnostic processing.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticConfig {
    /// Maximum number of errors kept (0 = unlimited).
    pub error_limit: usize,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig { error_limit: 20 }
    }
}

impl DiagnosticConfig {
    /// Create a config with no limits (for testing).
    pub fn unlimited() -> Self {
        DiagnosticConfig { error_limit: 0 }
    }
}

/// Queue for collecting diagnostics across every class of a run.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct DiagnosticQueue {
    diagnostics: Vec<Diagnostic>,
    /// Count of errors (not warnings/notes), including dropped ones.
    error_count: usize,
    /// Errors dropped after the limit was reached.
    suppressed: usize,
    config: DiagnosticConfig,
}

impl DiagnosticQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DiagnosticConfig) -> Self {
        DiagnosticQueue {
            config,
            ..Self::default()
        }
    }

    /// Add a diagnostic. Returns `false` if it was dropped by the limit.
    pub fn push(&mut self, diag: Diagnostic) -> bool {
        let is_error = diag.is_error();
        if is_error && self.limit_reached() {
            self.error_count += 1;
            self.suppressed += 1;
            return false;
        }
        if is_error {
            self.error_count += 1;
        }
        self.diagnostics.push(diag);
        true
    }

    /// Emit an error diagnostic and get proof it was emitted.
    ///
    /// The proof is returned even when the limit drops the diagnostic: the
    /// run has still failed.
    pub fn emit_error(&mut self, diag: Diagnostic) -> ErrorGuaranteed {
        debug_assert!(diag.is_error(), "emit_error called with a non-error");
        self.push(diag);
        ErrorGuaranteed::new()
    }

    pub fn limit_reached(&self) -> bool {
        self.config.error_limit > 0 && self.error_count >= self.config.error_limit
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Number of errors dropped by the limit.
    pub fn suppressed_count(&self) -> usize {
        self.suppressed
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| !d.is_error()).count()
    }

    /// Proof of failure if any error was emitted.
    pub fn has_errors(&self) -> Option<ErrorGuaranteed> {
        ErrorGuaranteed::from_error_count(self.error_count)
    }

    /// Diagnostics ordered by primary span, clearing the queue.
    ///
    /// The sort is stable: diagnostics at the same position keep emission
    /// order.
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        let mut result: Vec<Diagnostic> = self.diagnostics.drain(..).collect();
        result.sort_by_key(|d| d.primary_span().map_or(0, |s| s.start));
        self.error_count = 0;
        self.suppressed = 0;
        result
    }

    /// Get diagnostics without clearing the queue.
    pub fn peek(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }
}

#[cfg(test)]
mod tests;
