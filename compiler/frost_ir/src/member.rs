//! Members the transform adds to a class.

use crate::{Modifiers, StmtId, TypeIdx};

/// Synthetic flag recording which constructor path built an instance.
///
/// `true` after the keyed constructor, `false` after the positional one.
pub const PRINT_NAMES_FIELD: &str = "$print$names";

/// Parameter name of the keyed constructor.
pub const KEYED_ARGS: &str = "args";

/// Getter method name for a property: `x` becomes `getX`.
pub fn getter_name(property: &str) -> String {
    let mut chars = property.chars();
    match chars.next() {
        Some(first) => {
            let mut name = String::with_capacity(property.len() + 3);
            name.push_str("get");
            name.extend(first.to_uppercase());
            name.push_str(chars.as_str());
            name
        }
        None => "get".to_owned(),
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ConstructorKind {
    /// Single ordered-map parameter keyed by property name.
    Keyed,
    /// One parameter per property, in declaration order.
    Positional,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: TypeIdx,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SynthConstructor {
    pub kind: ConstructorKind,
    pub params: Vec<Param>,
    pub body: StmtId,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SynthGetter {
    pub property: String,
    pub method_name: String,
    pub ty: TypeIdx,
    pub body: StmtId,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SynthField {
    pub name: String,
    pub ty: TypeIdx,
    pub modifiers: Modifiers,
}

/// A member injected into the class. Bodies live in the class's arena.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SynthesizedMember {
    Field(SynthField),
    Constructor(SynthConstructor),
    Getter(SynthGetter),
}

impl SynthesizedMember {
    pub fn as_constructor(&self) -> Option<&SynthConstructor> {
        match self {
            SynthesizedMember::Constructor(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_getter(&self) -> Option<&SynthGetter> {
        match self {
            SynthesizedMember::Getter(g) => Some(g),
            _ => None,
        }
    }
}
