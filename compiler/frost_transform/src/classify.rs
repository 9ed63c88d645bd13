//! Property classifier.
//!
//! Maps a declared field type to the [`Strategy`] that decides how the
//! synthesized constructor stores it and how the getter hands it out.
//!
//! Classification is an ordered rule table scanned once, first match wins.
//! Order matters: an array of strings is an array, a cloneable list is
//! cloneable, and only fully resolved types may be rejected outright. A type
//! that matches no rule is not yet resolvable and is proven at construction
//! time instead.

use std::fmt;

use frost_ir::{TypeIdx, TypePool};

/// How a property is defensively copied and validated.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Strategy {
    Primitive,
    /// Boxed scalar, string, big number, URI or color.
    KnownImmutableValue,
    Enum,
    /// Another class carrying the immutability marker.
    NestedImmutable,
    Collection,
    MapType,
    ArrayOrCloneable,
    DateLike,
    /// Not resolvable yet; checked by the runtime guard.
    Unresolved,
    /// Resolved but not provably immutable. Reported, never synthesized.
    Invalid,
}

impl Strategy {
    /// Stored as given: the value cannot change under us.
    pub fn is_value_like(self) -> bool {
        matches!(
            self,
            Strategy::Primitive
                | Strategy::KnownImmutableValue
                | Strategy::Enum
                | Strategy::NestedImmutable
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Primitive => "primitive",
            Strategy::KnownImmutableValue => "known-immutable",
            Strategy::Enum => "enum",
            Strategy::NestedImmutable => "nested-immutable",
            Strategy::Collection => "collection",
            Strategy::MapType => "map",
            Strategy::ArrayOrCloneable => "array-or-cloneable",
            Strategy::DateLike => "date",
            Strategy::Unresolved => "unresolved",
            Strategy::Invalid => "invalid",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type Rule = fn(&TypePool, TypeIdx) -> Option<Strategy>;

/// Classification rules in priority order.
const RULES: &[(&str, Rule)] = &[
    ("array-or-cloneable", array_or_cloneable),
    ("date", date_like),
    ("collection", collection),
    ("map", map_type),
    ("known-immutable", known_immutable),
    ("resolved", resolved_but_unsupported),
];

fn array_or_cloneable(pool: &TypePool, ty: TypeIdx) -> Option<Strategy> {
    (pool.is_array(ty) || pool.is_or_derives(ty, TypeIdx::CLONEABLE))
        .then_some(Strategy::ArrayOrCloneable)
}

fn date_like(pool: &TypePool, ty: TypeIdx) -> Option<Strategy> {
    pool.is_or_derives(ty, TypeIdx::DATE)
        .then_some(Strategy::DateLike)
}

fn collection(pool: &TypePool, ty: TypeIdx) -> Option<Strategy> {
    pool.is_or_derives(ty, TypeIdx::COLLECTION)
        .then_some(Strategy::Collection)
}

fn map_type(pool: &TypePool, ty: TypeIdx) -> Option<Strategy> {
    pool.is_or_derives(ty, TypeIdx::MAP).then_some(Strategy::MapType)
}

fn known_immutable(pool: &TypePool, ty: TypeIdx) -> Option<Strategy> {
    if !pool.is_resolved(ty) {
        return None;
    }
    if ty.is_primitive() {
        Some(Strategy::Primitive)
    } else if pool.is_enum(ty) {
        Some(Strategy::Enum)
    } else if pool.has_immutable_marker(ty) {
        Some(Strategy::NestedImmutable)
    } else if pool.is_known_immutable(ty) {
        Some(Strategy::KnownImmutableValue)
    } else {
        None
    }
}

fn resolved_but_unsupported(pool: &TypePool, ty: TypeIdx) -> Option<Strategy> {
    pool.is_resolved(ty).then_some(Strategy::Invalid)
}

/// Classifier over one type pool.
#[derive(Copy, Clone)]
pub struct PropertyClassifier<'pool> {
    pool: &'pool TypePool,
}

impl<'pool> PropertyClassifier<'pool> {
    pub fn new(pool: &'pool TypePool) -> Self {
        PropertyClassifier { pool }
    }

    /// Strategy for a declared type. Pure: same pool and type, same answer.
    pub fn classify(&self, ty: TypeIdx) -> Strategy {
        for (rule_name, rule) in RULES {
            if let Some(strategy) = rule(self.pool, ty) {
                tracing::trace!(ty = self.pool.name(ty), rule = *rule_name, %strategy, "classified");
                return strategy;
            }
        }
        Strategy::Unresolved
    }
}

#[cfg(test)]
mod tests;
