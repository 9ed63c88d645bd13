//! Core diagnostic types and the constructors for synthesis errors.

use std::fmt;

use frost_ir::{Span, MARKER_NAME};

use crate::{immutability_message, ErrorCode, Phase};

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// A labeled span within a diagnostic.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Label {
    pub span: Span,
    pub message: String,
    /// Whether this is the primary error location.
    pub is_primary: bool,
}

impl Label {
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Label {
            span,
            message: message.into(),
            is_primary: true,
        }
    }

    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Label {
            span,
            message: message.into(),
            is_primary: false,
        }
    }
}

/// A structured error report.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub severity: Severity,
    pub message: String,
    pub labels: Vec<Label>,
    pub notes: Vec<String>,
    pub suggestions: Vec<String>,
}

impl Diagnostic {
    fn new_with_severity(code: ErrorCode, severity: Severity) -> Self {
        Diagnostic {
            code,
            severity,
            message: String::new(),
            labels: Vec::new(),
            notes: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    #[cold]
    pub fn error(code: ErrorCode) -> Self {
        Self::new_with_severity(code, Severity::Error)
    }

    #[cold]
    pub fn warning(code: ErrorCode) -> Self {
        Self::new_with_severity(code, Severity::Warning)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add a primary label at the error location.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Add a secondary label for context.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Span of the first primary label.
    pub fn primary_span(&self) -> Option<Span> {
        self.labels.iter().find(|l| l.is_primary).map(|l| l.span)
    }

    pub fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.severity, self.code, self.message)?;

        for label in &self.labels {
            let marker = if label.is_primary { "-->" } else { "   " };
            write!(f, "\n  {} {:?}: {}", marker, label.span, label.message)?;
        }

        for note in &self.notes {
            write!(f, "\n  = note: {note}")?;
        }

        for suggestion in &self.suggestions {
            write!(f, "\n  = help: {suggestion}")?;
        }

        Ok(())
    }
}

/// Create an "unsupported field type" diagnostic.
pub fn unsupported_field_type(span: Span, class: &str, field: &str, type_name: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E7001)
        .with_message(immutability_message(class, field, type_name, Phase::Compiling))
        .with_label(span, format!("`{field}` cannot be proven immutable"))
}

/// Create an "explicit constructor" diagnostic. `class` is the short name.
pub fn explicit_constructor(span: Span, class: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E7002)
        .with_message(format!(
            "Explicit constructors not allowed for {MARKER_NAME} class: {class}"
        ))
        .with_label(span, "constructor declared here")
        .with_suggestion("remove the constructor; keyed and positional constructors are generated")
}

/// Create a "public field" diagnostic.
pub fn public_field(span: Span, field: &str, class: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E7003)
        .with_message(format!(
            "Public field '{field}' not allowed for {MARKER_NAME} class '{class}'."
        ))
        .with_label(span, "declared public here")
        .with_note("only static final fields may stay public")
}

/// Create an "interface target" diagnostic.
pub fn interface_target(span: Span, class: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E7004)
        .with_message(format!(
            "Error processing interface '{class}'. {MARKER_NAME} not allowed for interfaces."
        ))
        .with_label(span, "interface declared here")
}

/// Create a "duplicate member" diagnostic for the second declaration of `name`.
pub fn duplicate_member(span: Span, name: &str, class: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E7005)
        .with_message(format!(
            "Duplicate member '{name}' in {MARKER_NAME} class '{class}'."
        ))
        .with_label(span, "name already declared")
}

#[cfg(test)]
mod tests;
