//! Accessor synthesizer: one read-only getter per property.

use frost_ir::{getter_name, BodyArena, SynthGetter};

use crate::{ClassifiedProperty, Strategy};

pub struct AccessorSynthesizer<'a> {
    arena: &'a mut BodyArena,
}

impl<'a> AccessorSynthesizer<'a> {
    pub fn new(arena: &'a mut BodyArena) -> Self {
        AccessorSynthesizer { arena }
    }

    /// Mutable storage is copied on the way out; everything else is
    /// returned as stored.
    pub fn getter(&mut self, prop: &ClassifiedProperty) -> SynthGetter {
        let arena = &mut *self.arena;
        let field = arena.field(prop.decl.name.as_str());
        let value = match prop.strategy {
            Strategy::ArrayOrCloneable => {
                let copy = arena.clone_of(field);
                arena.null_safe(field, copy)
            }
            Strategy::DateLike => {
                let copy = arena.copy_date(field);
                arena.null_safe(field, copy)
            }
            Strategy::Primitive
            | Strategy::KnownImmutableValue
            | Strategy::Enum
            | Strategy::NestedImmutable
            | Strategy::Collection
            | Strategy::MapType
            | Strategy::Unresolved
            | Strategy::Invalid => field,
        };
        let body = arena.ret(value);

        SynthGetter {
            property: prop.decl.name.clone(),
            method_name: getter_name(&prop.decl.name),
            ty: prop.decl.ty,
            body,
        }
    }
}
