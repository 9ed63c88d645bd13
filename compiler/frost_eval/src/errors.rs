//! Errors raised while running synthesized constructors and getters.
//!
//! `EvalErrorKind` carries the structured data; factory functions are the
//! public way to build an [`EvalError`] and fill both `kind` and `message`.
//! Every kind maps to one E6xxx code for diagnostic conversion.

use frost_diagnostic::{immutability_message, Diagnostic, ErrorCode, Phase};

/// Result of running a synthesized member.
pub type EvalResult<T> = Result<T, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    /// Runtime value of an unresolved field failed the immutability proof.
    #[error("{}", immutability_message(.class, .field, .type_name, Phase::Constructing))]
    NotImmutable {
        class: String,
        field: String,
        type_name: String,
    },

    #[error("No such property: {property} for class: {class}")]
    NoSuchProperty { property: String, class: String },

    #[error("Cannot set readonly property: {property} for class: {class}")]
    ReadOnlyProperty { property: String, class: String },

    #[error("{class} expects {expected} positional argument(s), got {got}")]
    ArityMismatch {
        class: String,
        expected: usize,
        got: usize,
    },

    #[error("no {constructor} constructor on class {class}")]
    NoConstructor {
        class: String,
        constructor: &'static str,
    },

    /// A generated body met a value of the wrong shape.
    #[error("malformed value in generated body: expected {expected}, got {got}")]
    Malformed { expected: String, got: String },
}

impl EvalErrorKind {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::NotImmutable { .. } => ErrorCode::E6001,
            Self::NoSuchProperty { .. } => ErrorCode::E6002,
            Self::ReadOnlyProperty { .. } => ErrorCode::E6003,
            Self::ArityMismatch { .. } => ErrorCode::E6004,
            Self::NoConstructor { .. } => ErrorCode::E6005,
            Self::Malformed { .. } => ErrorCode::E6006,
        }
    }

    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::NoSuchProperty { property, .. } => {
                Some(format!("remove `{property}` from the constructor arguments"))
            }
            Self::ReadOnlyProperty { property, .. } => Some(format!(
                "`{property}` is final with an initial value; leave it out of the arguments"
            )),
            Self::NoConstructor { .. } => {
                Some("fix the diagnostics reported for the class first".to_string())
            }
            _ => None,
        }
    }
}

/// Runtime construction error.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Equals `kind.to_string()`.
    pub message: String,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError { kind, message }
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.error_code()
    }

    /// Convert into a `Diagnostic` carrying the E6xxx code.
    #[cold]
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.code()).with_message(&self.message);
        if let Some(suggestion) = self.kind.suggestion() {
            diag = diag.with_suggestion(suggestion);
        }
        diag
    }
}

// Factory functions

#[cold]
pub fn not_immutable(class: &str, field: &str, type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotImmutable {
        class: class.to_string(),
        field: field.to_string(),
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn no_such_property(property: &str, class: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoSuchProperty {
        property: property.to_string(),
        class: class.to_string(),
    })
}

#[cold]
pub fn read_only_property(property: &str, class: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ReadOnlyProperty {
        property: property.to_string(),
        class: class.to_string(),
    })
}

#[cold]
pub fn arity_mismatch(class: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        class: class.to_string(),
        expected,
        got,
    })
}

#[cold]
pub fn no_constructor(class: &str, constructor: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NoConstructor {
        class: class.to_string(),
        constructor,
    })
}

#[cold]
pub fn malformed(expected: &str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Malformed {
        expected: expected.to_string(),
        got: got.to_string(),
    })
}
