//! Tree-walking interpreter for synthesized member bodies.
//!
//! A [`ClassRuntime`] wraps one [`ImmutableClass`] and runs its keyed and
//! positional constructors and its getters against fresh [`Instance`]s.
//! Instance fields sit behind an `RwLock` that is written only while a
//! constructor runs; afterwards every access is a read.

use std::fmt;
use std::sync::Arc;

use frost_ir::{
    ConstructorKind, Expr, ExprId, GuardCall, PrimitiveKind, Stmt, StmtId, SynthConstructor,
    TypeIdx, TypePool, KEYED_ARGS, PRINT_NAMES_FIELD,
};
use frost_transform::{ImmutableClass, PropertyClassifier};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::errors::{
    arity_mismatch, malformed, no_constructor, no_such_property, read_only_property, EvalResult,
};
use crate::guard::{check_declared_type, check_immutable, check_prop_names, DeclaredType};
use crate::value::{MapStorage, Value};

/// Zero value a field holds before any constructor statement runs.
pub fn type_default(pool: &TypePool, ty: TypeIdx) -> Value {
    match pool.primitive_kind(ty) {
        Some(PrimitiveKind::Boolean) => Value::Bool(false),
        Some(PrimitiveKind::Char) => Value::Char('\0'),
        Some(PrimitiveKind::Integral) => Value::Int(0),
        Some(PrimitiveKind::Floating) => Value::Float(0.0),
        None => Value::Null,
    }
}

fn constructor_label(kind: ConstructorKind) -> &'static str {
    match kind {
        ConstructorKind::Keyed => "keyed",
        ConstructorKind::Positional => "positional",
    }
}

/// Executable form of one synthesized class.
#[derive(Debug)]
pub struct ClassRuntime {
    class: ImmutableClass,
    /// Initial instance state: every property and instance field at its
    /// type default, plus the style flag.
    defaults: MapStorage,
    /// Declared types of the fields stored without a copy.
    declared: FxHashMap<String, DeclaredType>,
}

impl ClassRuntime {
    pub fn new(pool: &TypePool, class: ImmutableClass) -> Arc<Self> {
        let classifier = PropertyClassifier::new(pool);
        let mut defaults = MapStorage::default();
        let mut declared = FxHashMap::default();
        for prop in &class.properties {
            defaults.insert(prop.decl.name.clone(), type_default(pool, prop.decl.ty));
            if let Some(ty) = DeclaredType::of(pool, prop.strategy, prop.decl.ty) {
                declared.insert(prop.decl.name.clone(), ty);
            }
        }
        for field in class.fields.iter().filter(|f| !f.modifiers.is_static_final()) {
            defaults.insert(field.name.clone(), type_default(pool, field.ty));
            if let Some(ty) = DeclaredType::of(pool, classifier.classify(field.ty), field.ty) {
                declared.insert(field.name.clone(), ty);
            }
        }
        defaults.insert(PRINT_NAMES_FIELD.to_owned(), Value::Bool(false));
        Arc::new(ClassRuntime {
            class,
            defaults,
            declared,
        })
    }

    pub fn name(&self) -> &str {
        &self.class.name
    }

    pub fn class(&self) -> &ImmutableClass {
        &self.class
    }

    /// Whether a keyed-constructor argument may use `name`.
    pub fn exposes(&self, name: &str) -> bool {
        self.class.exposes(name)
    }

    /// Reject a value that does not fit the declared type of `field`.
    fn conform(&self, field: &str, value: Value) -> EvalResult<Value> {
        match self.declared.get(field) {
            Some(expected) => check_declared_type(self.name(), field, expected, value),
            None => Ok(value),
        }
    }

    fn constructor(&self, kind: ConstructorKind) -> EvalResult<&SynthConstructor> {
        self.class
            .constructor(kind)
            .ok_or_else(|| no_constructor(self.name(), constructor_label(kind)))
    }

    fn instantiate(self: &Arc<Self>) -> Arc<Instance> {
        Arc::new(Instance {
            class: Arc::clone(self),
            fields: RwLock::new(self.defaults.clone()),
        })
    }

    /// Run the keyed constructor. `None` is the null map.
    pub fn construct_keyed(self: &Arc<Self>, args: Option<Value>) -> EvalResult<Value> {
        let ctor = self.constructor(ConstructorKind::Keyed)?;
        let args = args.unwrap_or(Value::Null);
        if !args.is_null() {
            // Rejects non-map arguments before any statement runs.
            args.keys()?;
        }

        let instance = self.instantiate();
        let mut frame = Frame::new(self, &instance);
        frame.bind(KEYED_ARGS, args);
        frame.run(ctor.body)?;

        tracing::trace!(class = self.name(), "constructed through keyed constructor");
        Ok(Value::Instance(instance))
    }

    /// Run the positional constructor with one argument per property.
    pub fn construct_positional(self: &Arc<Self>, args: Vec<Value>) -> EvalResult<Value> {
        let ctor = self.constructor(ConstructorKind::Positional)?;
        if args.len() != ctor.params.len() {
            return Err(arity_mismatch(self.name(), ctor.params.len(), args.len()));
        }

        let instance = self.instantiate();
        let mut frame = Frame::new(self, &instance);
        for (param, value) in ctor.params.iter().zip(args) {
            frame.bind(&param.name, value);
        }
        frame.run(ctor.body)?;

        tracing::trace!(class = self.name(), "constructed through positional constructor");
        Ok(Value::Instance(instance))
    }
}

/// A constructed instance of a synthesized class.
pub struct Instance {
    class: Arc<ClassRuntime>,
    fields: RwLock<MapStorage>,
}

impl Instance {
    pub fn class(&self) -> &Arc<ClassRuntime> {
        &self.class
    }

    pub fn class_name(&self) -> &str {
        self.class.name()
    }

    /// Raw stored value of a field, bypassing the getter.
    pub fn field(&self, name: &str) -> Option<Value> {
        self.fields.read().get(name).cloned()
    }

    /// Built through the keyed constructor.
    pub fn keyword_style(&self) -> bool {
        matches!(self.field(PRINT_NAMES_FIELD), Some(Value::Bool(true)))
    }

    /// Run the synthesized getter for `property`.
    pub fn get(self: &Arc<Self>, property: &str) -> EvalResult<Value> {
        let class = Arc::clone(&self.class);
        let getter = class
            .class
            .getter(property)
            .ok_or_else(|| no_such_property(property, class.name()))?;
        let frame = Frame::new(&class, self);
        Ok(frame.run(getter.body)?.unwrap_or(Value::Null))
    }

    fn store(&self, name: &str, value: Value) {
        self.fields.write().insert(name.to_owned(), value);
    }
}

impl PartialEq for Instance {
    fn eq(&self, other: &Instance) -> bool {
        self.class_name() == other.class_name()
            && self.class.class.properties.iter().all(|p| {
                let name = p.decl.name.as_str();
                self.field(name) == other.field(name)
            })
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("class", &self.class_name())
            .field("fields", &*self.fields.read())
            .finish()
    }
}

/// `Point(x:1, y:2)` after the keyed constructor, `Point(1, 2)` otherwise.
impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = self.keyword_style();
        write!(f, "{}(", self.class.class.short_name())?;
        for (i, prop) in self.class.class.properties.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            let name = prop.decl.name.as_str();
            let value = self.field(name).unwrap_or(Value::Null);
            if keyword {
                write!(f, "{name}:{value}")?;
            } else {
                write!(f, "{value}")?;
            }
        }
        write!(f, ")")
    }
}

/// Activation of one synthesized body.
struct Frame<'a> {
    class: &'a Arc<ClassRuntime>,
    this: &'a Arc<Instance>,
    locals: FxHashMap<String, Value>,
}

impl<'a> Frame<'a> {
    fn new(class: &'a Arc<ClassRuntime>, this: &'a Arc<Instance>) -> Self {
        Frame {
            class,
            this,
            locals: FxHashMap::default(),
        }
    }

    fn bind(&mut self, name: &str, value: Value) {
        self.locals.insert(name.to_owned(), value);
    }

    /// Execute a statement tree; `Some` carries a returned value.
    fn run(&self, id: StmtId) -> EvalResult<Option<Value>> {
        let class: &'a Arc<ClassRuntime> = self.class;
        let arena = &class.class.arena;
        match arena.stmt(id) {
            Stmt::Empty => Ok(None),
            Stmt::Expr(e) => {
                self.eval(*e)?;
                Ok(None)
            }
            Stmt::Assign { field, value } => {
                let value = class.conform(field, self.eval(*value)?)?;
                self.this.store(field, value);
                Ok(None)
            }
            Stmt::If {
                cond,
                then,
                otherwise,
            } => {
                if self.eval(*cond)?.as_bool()? {
                    self.run(*then)
                } else {
                    self.run(*otherwise)
                }
            }
            Stmt::Block(stmts) => {
                for s in stmts {
                    if let Some(ret) = self.run(*s)? {
                        return Ok(Some(ret));
                    }
                }
                Ok(None)
            }
            Stmt::Return(e) => self.eval(*e).map(Some),
            Stmt::ThrowReadOnly { property, class } => Err(read_only_property(property, class)),
            Stmt::DelegateKeyed(args) => {
                let args = self.eval(*args)?;
                let ctor = class.constructor(ConstructorKind::Keyed)?;
                let mut keyed = Frame::new(self.class, self.this);
                keyed.bind(KEYED_ARGS, args);
                keyed.run(ctor.body)?;
                Ok(None)
            }
        }
    }

    fn eval(&self, id: ExprId) -> EvalResult<Value> {
        let class: &'a Arc<ClassRuntime> = self.class;
        let arena = &class.class.arena;
        match arena.expr(id) {
            Expr::Const(lit) => Ok(Value::from_literal(lit)),
            Expr::Var(name) => self
                .locals
                .get(name)
                .cloned()
                .ok_or_else(|| malformed("bound parameter", name)),
            Expr::This => Ok(Value::Instance(Arc::clone(self.this))),
            Expr::Field(name) => self
                .this
                .field(name)
                .ok_or_else(|| no_such_property(name, self.class.name())),
            Expr::Lookup { map, key } => self.eval(*map)?.lookup(key),
            Expr::ContainsKey { map, key } => self.eval(*map)?.contains_key(key).map(Value::Bool),
            Expr::Size(e) => {
                let len = self.eval(*e)?.len()?;
                Ok(Value::Int(i64::try_from(len).unwrap_or(i64::MAX)))
            }
            Expr::Eq(lhs, rhs) => Ok(Value::Bool(self.eval(*lhs)? == self.eval(*rhs)?)),
            Expr::IsNull(e) => Ok(Value::Bool(self.eval(*e)?.is_null())),
            Expr::IsCloneable(e) => Ok(Value::Bool(self.eval(*e)?.is_cloneable())),
            Expr::Clone(e) => self.eval(*e)?.clone_value(),
            Expr::AsImmutable(e) => self.eval(*e)?.as_immutable(),
            Expr::CopyDate(e) => self.eval(*e)?.copy_date(),
            Expr::Conditional {
                cond,
                then,
                otherwise,
            } => {
                if self.eval(*cond)?.as_bool()? {
                    self.eval(*then)
                } else {
                    self.eval(*otherwise)
                }
            }
            Expr::MapLiteral(entries) => {
                let mut map = MapStorage::default();
                for (key, value) in entries {
                    map.insert(key.clone(), self.eval(*value)?);
                }
                Ok(Value::map(map))
            }
            Expr::Guard(GuardCall::CheckImmutable {
                class,
                field,
                value,
            }) => check_immutable(class, field, self.eval(*value)?),
            Expr::Guard(GuardCall::CheckPropNames { instance, args }) => {
                check_prop_names(&self.eval(*instance)?, &self.eval(*args)?)?;
                Ok(Value::Null)
            }
        }
    }
}

#[cfg(test)]
mod tests;
