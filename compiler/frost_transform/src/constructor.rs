//! Constructor synthesizer.
//!
//! Builds the keyed constructor (one ordered-map argument keyed by property
//! name) and the positional constructor (one argument per property, which
//! packs its arguments into a map and delegates to the keyed one). Each
//! property contributes one statement chosen by its [`Strategy`].

use frost_ir::{
    BodyArena, ClassDecl, ConstructorKind, ExprId, GuardCall, Literal, Modifiers, Param,
    StmtId, SynthConstructor, TypeIdx, KEYED_ARGS, PRINT_NAMES_FIELD,
};

use crate::{ClassifiedProperty, Strategy};

/// Exactly one property, typed as the ordered map itself.
pub fn is_single_map_case(properties: &[ClassifiedProperty]) -> bool {
    matches!(properties, [only] if only.decl.ty == TypeIdx::ORDERED_MAP)
}

/// Initializer that actually supplies a value. A literal `null` does not.
fn effective_init(init: Option<&Literal>) -> Option<&Literal> {
    init.filter(|lit| !lit.is_null())
}

pub struct ConstructorSynthesizer<'a> {
    decl: &'a ClassDecl,
    arena: &'a mut BodyArena,
}

impl<'a> ConstructorSynthesizer<'a> {
    pub fn new(decl: &'a ClassDecl, arena: &'a mut BodyArena) -> Self {
        ConstructorSynthesizer { decl, arena }
    }

    /// Keyed and positional constructors, or only the keyed one when the
    /// class wraps a single map.
    pub fn synthesize(&mut self, properties: &[ClassifiedProperty]) -> Vec<SynthConstructor> {
        if let [only] = properties {
            if is_single_map_case(properties) {
                tracing::debug!(class = %self.decl.name, property = %only.decl.name, "single-map constructor");
                return vec![self.keyed_single_map(only)];
            }
        }
        vec![self.keyed(properties), self.positional(properties)]
    }

    pub fn keyed(&mut self, properties: &[ClassifiedProperty]) -> SynthConstructor {
        let mut stmts = Vec::with_capacity(properties.len() + 2);
        for prop in properties {
            if prop.decl.is_read_only() {
                stmts.push(self.read_only_guard(&prop.decl.name));
            }
            if let Some(stmt) = self.property_statement(prop) {
                stmts.push(stmt);
            }
        }

        let this = self.arena.this();
        let args = self.arena.var(KEYED_ARGS);
        let check = self.arena.guard(GuardCall::CheckPropNames {
            instance: this,
            args,
        });
        stmts.push(self.arena.expr_stmt(check));

        self.finish_keyed(stmts)
    }

    pub fn keyed_single_map(&mut self, prop: &ClassifiedProperty) -> SynthConstructor {
        let name = prop.decl.name.as_str();
        let arena = &mut *self.arena;
        let args = arena.var(KEYED_ARGS);
        let arg = arena.lookup(args, name);

        let no_args = arena.is_null(args);
        let from_init = match effective_init(prop.decl.init.as_ref()) {
            Some(init) => {
                let value = arena.constant(init.clone());
                let wrapped = arena.as_immutable(value);
                arena.assign(name, wrapped)
            }
            None => arena.empty(),
        };

        // `args.p` is null: an explicit null is kept, otherwise the whole
        // map is the value.
        let has_key = arena.contains_key(args, name);
        let store_null = arena.assign(name, arg);
        let whole = arena.as_immutable(args);
        let store_whole = arena.assign(name, whole);
        let absent = arena.if_else(has_key, store_null, store_whole);

        // `args.p` is set: it is the value only when it is the sole key. When
        // `args` carries other keys as well, the whole map is stored and the
        // nested `args.p` is not unwrapped.
        let size = arena.size(args);
        let one = arena.constant(Literal::Int(1));
        let sole_key = arena.eq(size, one);
        let wrapped_arg = arena.as_immutable(arg);
        let store_arg = arena.assign(name, wrapped_arg);
        let whole = arena.as_immutable(args);
        let store_whole = arena.assign(name, whole);
        let present = arena.if_else(sole_key, store_arg, store_whole);

        let arg_null = arena.is_null(arg);
        let supplied = arena.if_else(arg_null, absent, present);
        let stmt = arena.if_else(no_args, from_init, supplied);

        self.finish_keyed(vec![stmt])
    }

    pub fn positional(&mut self, properties: &[ClassifiedProperty]) -> SynthConstructor {
        let arena = &mut *self.arena;
        let params: Vec<Param> = properties
            .iter()
            .map(|p| Param {
                name: p.decl.name.clone(),
                ty: p.decl.ty,
            })
            .collect();

        let entries = params
            .iter()
            .map(|p| (p.name.clone(), arena.var(p.name.as_str())))
            .collect();
        let map = arena.map_literal(entries);
        let delegate = arena.delegate_keyed(map);
        let positional_style = arena.constant(Literal::Bool(false));
        let flag = arena.assign(PRINT_NAMES_FIELD, positional_style);
        let body = arena.block(vec![delegate, flag]);

        SynthConstructor {
            kind: ConstructorKind::Positional,
            params,
            body,
        }
    }

    /// Non-property fields, the style flag, and the `args == null` wrapper.
    fn finish_keyed(&mut self, mut stmts: Vec<StmtId>) -> SynthConstructor {
        let decl = self.decl;
        for field in &decl.fields {
            if field.is_public() || field.modifiers.is_static_final() || field.is_internal() {
                continue;
            }
            let init = effective_init(field.init.as_ref());
            if field.modifiers.contains(Modifiers::FINAL) && init.is_some() {
                stmts.push(self.read_only_guard(&field.name));
            }
            stmts.push(self.value_like(&field.name, init));
        }

        let keyed_style = self.arena.constant(Literal::Bool(true));
        stmts.push(self.arena.assign(PRINT_NAMES_FIELD, keyed_style));

        let arena = &mut *self.arena;
        let args = arena.var(KEYED_ARGS);
        let no_args = arena.is_null(args);
        let empty = arena.empty();
        let body = arena.block(stmts);
        let body = arena.if_else(no_args, empty, body);

        SynthConstructor {
            kind: ConstructorKind::Keyed,
            params: vec![Param {
                name: KEYED_ARGS.to_owned(),
                ty: TypeIdx::ORDERED_MAP,
            }],
            body,
        }
    }

    /// `if (args.p != null) throw ReadOnly(p, C)`
    fn read_only_guard(&mut self, name: &str) -> StmtId {
        let arena = &mut *self.arena;
        let arg = arg_lookup(arena, name);
        let cond = arena.is_null(arg);
        let empty = arena.empty();
        let throw = arena.throw_read_only(name, &self.decl.name);
        arena.if_else(cond, empty, throw)
    }

    /// Statement storing one property, `None` for an invalid one.
    fn property_statement(&mut self, prop: &ClassifiedProperty) -> Option<StmtId> {
        let name = prop.decl.name.as_str();
        let init = effective_init(prop.decl.init.as_ref());
        let stmt = match prop.strategy {
            Strategy::Primitive
            | Strategy::KnownImmutableValue
            | Strategy::Enum
            | Strategy::NestedImmutable => self.value_like(name, init),
            Strategy::Collection | Strategy::MapType => self.collection(name, init),
            Strategy::ArrayOrCloneable => self.copied(name, init, BodyArena::clone_of),
            Strategy::DateLike => self.copied(name, init, BodyArena::copy_date),
            Strategy::Unresolved => self.guarded(name, init),
            Strategy::Invalid => return None,
        };
        Some(stmt)
    }

    /// `if (args.p == null) { this.p = init } else { this.p = args.p }`
    fn value_like(&mut self, name: &str, init: Option<&Literal>) -> StmtId {
        let arena = &mut *self.arena;
        let arg = arg_lookup(arena, name);
        let cond = arena.is_null(arg);
        let then = match init {
            Some(init) => {
                let value = arena.constant(init.clone());
                arena.assign(name, value)
            }
            None => arena.empty(),
        };
        let otherwise = arena.assign(name, arg);
        arena.if_else(cond, then, otherwise)
    }

    /// Supplied collections are wrapped read-only, cloned first when the
    /// runtime value is cloneable.
    fn collection(&mut self, name: &str, init: Option<&Literal>) -> StmtId {
        let arena = &mut *self.arena;
        let arg = arg_lookup(arena, name);
        let cond = arena.is_null(arg);
        let then = match init {
            Some(init) => {
                let value = arena.constant(init.clone());
                let wrapped = arena.as_immutable(value);
                arena.assign(name, wrapped)
            }
            None => arena.empty(),
        };

        let cloneable = arena.is_cloneable(arg);
        let cloned = arena.clone_of(arg);
        let wrapped_clone = arena.as_immutable(cloned);
        let store_clone = arena.assign(name, wrapped_clone);
        let wrapped = arena.as_immutable(arg);
        let store = arena.assign(name, wrapped);
        let otherwise = arena.if_else(cloneable, store_clone, store);

        arena.if_else(cond, then, otherwise)
    }

    /// Arrays, cloneables and dates: always store a fresh copy, or null.
    fn copied(
        &mut self,
        name: &str,
        init: Option<&Literal>,
        copy: fn(&mut BodyArena, ExprId) -> ExprId,
    ) -> StmtId {
        let arena = &mut *self.arena;
        let arg = arg_lookup(arena, name);
        let cond = arena.is_null(arg);
        let from_init = match init {
            Some(init) => {
                let value = arena.constant(init.clone());
                copy(arena, value)
            }
            None => arena.null(),
        };
        let then = arena.assign(name, from_init);
        let copied = copy(arena, arg);
        let otherwise = arena.assign(name, copied);
        arena.if_else(cond, then, otherwise)
    }

    /// Unresolved types are proven immutable when the instance is built.
    fn guarded(&mut self, name: &str, init: Option<&Literal>) -> StmtId {
        let class = self.decl.name.as_str();
        let arena = &mut *self.arena;
        let arg = arg_lookup(arena, name);
        let cond = arena.is_null(arg);
        let then = match init {
            Some(init) => {
                let value = arena.constant(init.clone());
                let checked = arena.guard(GuardCall::CheckImmutable {
                    class: class.to_owned(),
                    field: name.to_owned(),
                    value,
                });
                arena.assign(name, checked)
            }
            None => arena.empty(),
        };
        let checked = arena.guard(GuardCall::CheckImmutable {
            class: class.to_owned(),
            field: name.to_owned(),
            value: arg,
        });
        let otherwise = arena.assign(name, checked);
        arena.if_else(cond, then, otherwise)
    }
}

/// `args.name`
fn arg_lookup(arena: &mut BodyArena, name: &str) -> ExprId {
    let args = arena.var(KEYED_ARGS);
    arena.lookup(args, name)
}
