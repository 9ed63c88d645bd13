//! Runtime guard: the two checks synthesized constructors call into, plus
//! the declared-type check every value-like field store goes through.

use std::fmt;

use frost_ir::{PrimitiveKind, TypeIdx, TypePool};
use frost_transform::Strategy;

use crate::errors::{malformed, no_such_property, not_immutable, EvalResult};
use crate::value::Value;

/// Runtime shape a value-like field accepts. Fields whose strategy copies
/// or wraps the value have no entry; their bodies already check the shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeclaredType {
    Primitive(PrimitiveKind),
    /// Known-immutable library type, by name.
    Value(String),
    Enum(String),
    /// Another marked class, by qualified name.
    Marked(String),
}

impl DeclaredType {
    pub fn of(pool: &TypePool, strategy: Strategy, ty: TypeIdx) -> Option<Self> {
        match strategy {
            Strategy::Primitive => pool.primitive_kind(ty).map(DeclaredType::Primitive),
            Strategy::KnownImmutableValue => Some(DeclaredType::Value(pool.name(ty).to_owned())),
            Strategy::Enum => Some(DeclaredType::Enum(pool.name(ty).to_owned())),
            Strategy::NestedImmutable => Some(DeclaredType::Marked(pool.name(ty).to_owned())),
            _ => None,
        }
    }

    /// Null is accepted everywhere; primitives hold their type default
    /// before any store.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) => true,
            (DeclaredType::Primitive(kind), value) => match kind {
                PrimitiveKind::Boolean => matches!(value, Value::Bool(_)),
                PrimitiveKind::Char => matches!(value, Value::Char(_)),
                PrimitiveKind::Integral => matches!(value, Value::Int(_)),
                PrimitiveKind::Floating => matches!(value, Value::Int(_) | Value::Float(_)),
            },
            (DeclaredType::Value(name), Value::Known { type_name, .. }) => **type_name == *name,
            (DeclaredType::Value(name), value) => match name.as_str() {
                "Boolean" => matches!(value, Value::Bool(_)),
                "Character" => matches!(value, Value::Char(_)),
                "Byte" | "Short" | "Integer" | "Long" | "BigInteger" => {
                    matches!(value, Value::Int(_))
                }
                "Float" | "Double" | "BigDecimal" => {
                    matches!(value, Value::Int(_) | Value::Float(_))
                }
                // String, and the text form of every other allowlisted type.
                _ => matches!(value, Value::Str(_)),
            },
            (DeclaredType::Enum(name), Value::Enum { type_name, .. }) => **type_name == *name,
            (DeclaredType::Marked(name), Value::Instance(inst)) => inst.class_name() == name,
            _ => false,
        }
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclaredType::Primitive(PrimitiveKind::Boolean) => f.write_str("boolean"),
            DeclaredType::Primitive(PrimitiveKind::Char) => f.write_str("char"),
            DeclaredType::Primitive(PrimitiveKind::Integral) => f.write_str("integral number"),
            DeclaredType::Primitive(PrimitiveKind::Floating) => f.write_str("number"),
            DeclaredType::Value(name) | DeclaredType::Enum(name) | DeclaredType::Marked(name) => {
                f.write_str(name)
            }
        }
    }
}

/// Fail when `value` does not fit the declared type of `class.field`.
pub fn check_declared_type(
    class: &str,
    field: &str,
    expected: &DeclaredType,
    value: Value,
) -> EvalResult<Value> {
    if expected.accepts(&value) {
        return Ok(value);
    }
    tracing::debug!(class, field, %expected, ty = %value.type_name(), "declared type check failed");
    Err(malformed(
        &format!("{expected} for `{class}.{field}`"),
        &value.type_name(),
    ))
}

/// Prove a value of an unresolved field immutable, or fail.
///
/// Null, enums, allowlisted runtime types and marked instances pass
/// through. Lists and maps come back as read-only views. Anything else is
/// rejected naming `class`, `field` and the runtime type.
pub fn check_immutable(class: &str, field: &str, value: Value) -> EvalResult<Value> {
    match &value {
        Value::Null | Value::Enum { .. } | Value::Instance(_) => Ok(value),
        v if v.is_known_immutable() => Ok(value),
        Value::List { .. } | Value::ListView(_) | Value::Map { .. } | Value::MapView(_) => {
            value.as_immutable()
        }
        other => {
            tracing::debug!(class, field, ty = %other.type_name(), "runtime immutability check failed");
            Err(not_immutable(class, field, &other.type_name()))
        }
    }
}

/// Fail on the first key of `args` that `instance` does not expose.
pub fn check_prop_names(instance: &Value, args: &Value) -> EvalResult<()> {
    let Some(instance) = instance.as_instance() else {
        return Err(malformed("instance", &instance.type_name()));
    };
    let class = instance.class();
    for key in args.keys()? {
        if !class.exposes(&key) {
            return Err(no_such_property(&key, class.name()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests;
