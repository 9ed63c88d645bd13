//! The fixed message for a field whose type cannot be proven immutable.
//!
//! The same wording is used at synthesis time (unsupported declared type)
//! and at construction time (runtime value failed the proof), differing
//! only in the phase word.

use std::fmt;

use frost_ir::MARKER_NAME;

/// When the immutability proof failed.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Phase {
    Compiling,
    Constructing,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Compiling => write!(f, "compiling"),
            Phase::Constructing => write!(f, "constructing"),
        }
    }
}

/// Type name as shown to users. The root object type covers dynamic
/// values too, so it says so.
pub fn pretty_type_name(name: &str) -> &str {
    if name == "Object" {
        "Object or dynamic"
    } else {
        name
    }
}

/// Build the full unsupported-type message.
pub fn immutability_message(class: &str, field: &str, type_name: &str, phase: Phase) -> String {
    format!(
        "{MARKER_NAME} processor doesn't know how to handle field '{field}' of type '{}' \
         while {phase} class {class}.\n\
         {MARKER_NAME} classes only support properties with effectively immutable types including:\n\
         - Strings, primitive types, wrapper types, BigInteger and BigDecimal, enums\n\
         - other {MARKER_NAME} classes and known immutables (Color, URI)\n\
         - Cloneable classes, collections, maps and arrays, and other classes with special handling (Date)\n\
         Other restrictions apply, please see the documentation for {MARKER_NAME} for further details",
        pretty_type_name(type_name)
    )
}
