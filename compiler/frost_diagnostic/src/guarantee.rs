//! Proof that an error was reported.

use std::fmt;

/// Zero-sized proof that at least one error diagnostic was emitted.
///
/// Only [`DiagnosticQueue`](crate::DiagnosticQueue) hands these out, so
/// holding one means the user will see an error.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ErrorGuaranteed(());

impl ErrorGuaranteed {
    pub(crate) fn new() -> Self {
        ErrorGuaranteed(())
    }

    /// Proof from an existing error count, `None` when nothing was reported.
    pub fn from_error_count(count: usize) -> Option<Self> {
        (count > 0).then(Self::new)
    }
}

impl fmt::Display for ErrorGuaranteed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error(s) emitted")
    }
}

#[cfg(test)]
mod tests;
