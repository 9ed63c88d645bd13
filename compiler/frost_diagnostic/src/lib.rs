//! Diagnostic system for the immutability transform.
//!
//! Every rejection the transform makes is reported as a [`Diagnostic`]:
//! - Error codes for searchability (`frostc --explain E7001`)
//! - Clear messages naming the class, field and type involved
//! - Primary span pointing at the offending declaration
//! - Notes listing what would have been accepted
//!
//! # Error Guarantees
//!
//! [`ErrorGuaranteed`] is type-level proof that at least one error was
//! emitted. The transform stores it on a class it refused to finish so the
//! caller cannot mistake a half-synthesized class for a valid one.
//!
//! ```text
//! let guarantee = queue.emit_error(diagnostic);
//! class.failed = Some(guarantee);
//! ```

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod errors;
mod guarantee;
pub mod immutability;
pub mod queue;

pub use diagnostic::{
    duplicate_member, explicit_constructor, interface_target, public_field,
    unsupported_field_type, Diagnostic, Label, Severity,
};
pub use error_code::ErrorCode;
pub use errors::ErrorDocs;
pub use guarantee::ErrorGuaranteed;
pub use immutability::{immutability_message, pretty_type_name, Phase};
pub use queue::{DiagnosticConfig, DiagnosticQueue};
