//! Runtime values seen by synthesized constructors and getters.
//!
//! Scalars are inline. Heap payloads go through [`Heap`] (never mutated) or
//! [`Shared`] (mutable, `RwLock` inside) and are built only through the
//! factory methods on [`Value`]:
//!
//! ```text
//! let name = Value::string("Ann");
//! let tags = Value::list(vec![Value::string("a")]);
//! let when = Value::date(0);
//! ```
//!
//! Mutable containers model the host's library types: arrays, dates, and
//! cloneable lists and maps. Read-only views share storage with the
//! container they wrap and refuse writes.

mod heap;

use std::fmt;
use std::sync::Arc;

use frost_ir::{is_known_immutable_name, Literal};
use indexmap::IndexMap;

pub use heap::{Heap, Shared};

use crate::errors::{malformed, EvalResult};
use crate::interpreter::Instance;

/// Insertion-ordered string-keyed map storage.
pub type MapStorage = IndexMap<String, Value>;

/// Instance of a user type that carries no immutability marker.
#[derive(Clone, Debug)]
pub struct ObjectValue {
    pub type_name: Heap<String>,
    pub fields: Shared<MapStorage>,
    pub cloneable: bool,
}

#[derive(Clone, Debug)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Char(char),
    Str(Heap<String>),
    /// Known-immutable library value such as a big decimal or URI, carried
    /// as its text.
    Known {
        type_name: Heap<String>,
        repr: Heap<String>,
    },
    Enum {
        type_name: Heap<String>,
        variant: Heap<String>,
    },
    /// Mutable date holding epoch milliseconds.
    Date(Shared<i64>),
    Array(Shared<Vec<Value>>),
    List {
        items: Shared<Vec<Value>>,
        cloneable: bool,
    },
    Map {
        entries: Shared<MapStorage>,
        cloneable: bool,
    },
    /// Read-only view over list storage.
    ListView(Shared<Vec<Value>>),
    /// Read-only view over map storage.
    MapView(Shared<MapStorage>),
    Object(ObjectValue),
    /// Instance of a synthesized immutable class.
    Instance(Arc<Instance>),
}

impl Value {
    // === Factories ===

    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    pub fn known(type_name: impl Into<String>, repr: impl Into<String>) -> Self {
        Value::Known {
            type_name: Heap::new(type_name.into()),
            repr: Heap::new(repr.into()),
        }
    }

    pub fn enum_variant(type_name: impl Into<String>, variant: impl Into<String>) -> Self {
        Value::Enum {
            type_name: Heap::new(type_name.into()),
            variant: Heap::new(variant.into()),
        }
    }

    pub fn date(epoch_millis: i64) -> Self {
        Value::Date(Shared::new(epoch_millis))
    }

    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Shared::new(items))
    }

    /// Cloneable list.
    pub fn list(items: Vec<Value>) -> Self {
        Value::List {
            items: Shared::new(items),
            cloneable: true,
        }
    }

    /// List type without the cloneable capability.
    pub fn plain_list(items: Vec<Value>) -> Self {
        Value::List {
            items: Shared::new(items),
            cloneable: false,
        }
    }

    /// Cloneable insertion-ordered map.
    pub fn map<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::Map {
            entries: Shared::new(entries.into_iter().map(|(k, v)| (k.into(), v)).collect()),
            cloneable: true,
        }
    }

    pub fn object<K: Into<String>>(
        type_name: impl Into<String>,
        fields: impl IntoIterator<Item = (K, Value)>,
        cloneable: bool,
    ) -> Self {
        Value::Object(ObjectValue {
            type_name: Heap::new(type_name.into()),
            fields: Shared::new(fields.into_iter().map(|(k, v)| (k.into(), v)).collect()),
            cloneable,
        })
    }

    /// Fresh value for a compile-time constant. Container literals produce
    /// new mutable storage on every call.
    pub fn from_literal(literal: &Literal) -> Self {
        match literal {
            Literal::Null => Value::Null,
            Literal::Bool(b) => Value::Bool(*b),
            Literal::Int(n) => Value::Int(*n),
            Literal::Float(x) => Value::Float(*x),
            Literal::Char(c) => Value::Char(*c),
            Literal::Str(s) => Value::string(s.as_str()),
            Literal::EnumConst { type_name, variant } => {
                Value::enum_variant(type_name.as_str(), variant.as_str())
            }
            Literal::Date(ms) => Value::date(*ms),
            Literal::Array(items) => Value::array(items.iter().map(Value::from_literal).collect()),
            Literal::List(items) => Value::list(items.iter().map(Value::from_literal).collect()),
            Literal::Map(entries) => Value::map(
                entries
                    .iter()
                    .map(|(k, v)| (k.as_str(), Value::from_literal(v))),
            ),
        }
    }

    // === Queries ===

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Runtime type name, as reported in diagnostics.
    pub fn type_name(&self) -> String {
        match self {
            Value::Null => "null".to_owned(),
            Value::Bool(_) => "Boolean".to_owned(),
            Value::Int(_) => "Integer".to_owned(),
            Value::Float(_) => "Double".to_owned(),
            Value::Char(_) => "Character".to_owned(),
            Value::Str(_) => "String".to_owned(),
            Value::Known { type_name, .. } | Value::Enum { type_name, .. } => {
                type_name.to_string()
            }
            Value::Object(obj) => obj.type_name.to_string(),
            Value::Date(_) => "Date".to_owned(),
            Value::Array(_) => "Object[]".to_owned(),
            Value::List { cloneable: true, .. } => "ArrayList".to_owned(),
            Value::List { .. } => "List".to_owned(),
            Value::Map { cloneable: true, .. } => "LinkedHashMap".to_owned(),
            Value::Map { .. } => "Map".to_owned(),
            Value::ListView(_) => "ImmutableList".to_owned(),
            Value::MapView(_) => "ImmutableMap".to_owned(),
            Value::Instance(inst) => inst.class_name().to_owned(),
        }
    }

    /// Runtime type is on the known-immutable allowlist.
    pub fn is_known_immutable(&self) -> bool {
        match self {
            Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::Char(_) | Value::Str(_) => {
                true
            }
            Value::Known { type_name, .. } => is_known_immutable_name(type_name),
            _ => false,
        }
    }

    pub fn is_cloneable(&self) -> bool {
        match self {
            Value::Date(_) | Value::Array(_) => true,
            Value::List { cloneable, .. } | Value::Map { cloneable, .. } => *cloneable,
            Value::Object(obj) => obj.cloneable,
            _ => false,
        }
    }

    pub fn as_bool(&self) -> EvalResult<bool> {
        match self {
            Value::Bool(b) => Ok(*b),
            other => Err(malformed("Boolean", &other.type_name())),
        }
    }

    pub fn as_instance(&self) -> Option<&Arc<Instance>> {
        match self {
            Value::Instance(inst) => Some(inst),
            _ => None,
        }
    }

    /// Same allocation, for heap values. Scalars are never identical.
    pub fn ptr_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Date(a), Value::Date(b)) => a.ptr_eq(b),
            (
                Value::Array(a) | Value::List { items: a, .. } | Value::ListView(a),
                Value::Array(b) | Value::List { items: b, .. } | Value::ListView(b),
            ) => a.ptr_eq(b),
            (
                Value::Map { entries: a, .. } | Value::MapView(a),
                Value::Map { entries: b, .. } | Value::MapView(b),
            ) => a.ptr_eq(b),
            (Value::Object(a), Value::Object(b)) => a.fields.ptr_eq(&b.fields),
            (Value::Instance(a), Value::Instance(b)) => Arc::ptr_eq(a, b),
            (Value::Str(a), Value::Str(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    fn map_storage(&self) -> EvalResult<&Shared<MapStorage>> {
        match self {
            Value::Map { entries, .. } | Value::MapView(entries) => Ok(entries),
            other => Err(malformed("map", &other.type_name())),
        }
    }

    /// `map.key`: the entry, or null when absent.
    pub fn lookup(&self, key: &str) -> EvalResult<Value> {
        let entries = self.map_storage()?;
        let found = entries.read().get(key).cloned();
        Ok(found.unwrap_or(Value::Null))
    }

    pub fn contains_key(&self, key: &str) -> EvalResult<bool> {
        Ok(self.map_storage()?.read().contains_key(key))
    }

    pub fn keys(&self) -> EvalResult<Vec<String>> {
        Ok(self.map_storage()?.read().keys().cloned().collect())
    }

    /// Element or entry count of a list, array or map.
    pub fn len(&self) -> EvalResult<usize> {
        match self {
            Value::Array(items) | Value::List { items, .. } | Value::ListView(items) => {
                Ok(items.read().len())
            }
            Value::Map { entries, .. } | Value::MapView(entries) => Ok(entries.read().len()),
            other => Err(malformed("collection, map or array", &other.type_name())),
        }
    }

    /// Element at `index` of a list or array.
    pub fn item(&self, index: usize) -> EvalResult<Value> {
        match self {
            Value::Array(items) | Value::List { items, .. } | Value::ListView(items) => {
                Ok(items.read().get(index).cloned().unwrap_or(Value::Null))
            }
            other => Err(malformed("list or array", &other.type_name())),
        }
    }

    /// Epoch milliseconds of a date.
    pub fn time(&self) -> EvalResult<i64> {
        match self {
            Value::Date(ms) => Ok(*ms.read()),
            other => Err(malformed("Date", &other.type_name())),
        }
    }

    // === Copy rules ===

    /// Shallow copy of a cloneable value into fresh storage.
    pub fn clone_value(&self) -> EvalResult<Value> {
        match self {
            Value::Date(ms) => Ok(Value::Date(ms.snapshot())),
            Value::Array(items) => Ok(Value::Array(items.snapshot())),
            Value::List {
                items,
                cloneable: true,
            } => Ok(Value::List {
                items: items.snapshot(),
                cloneable: true,
            }),
            Value::Map {
                entries,
                cloneable: true,
            } => Ok(Value::Map {
                entries: entries.snapshot(),
                cloneable: true,
            }),
            Value::Object(obj) if obj.cloneable => Ok(Value::Object(ObjectValue {
                type_name: obj.type_name.clone(),
                fields: obj.fields.snapshot(),
                cloneable: true,
            })),
            other => Err(malformed("cloneable value", &other.type_name())),
        }
    }

    /// Read-only view over a list or map. Views pass through unchanged.
    pub fn as_immutable(&self) -> EvalResult<Value> {
        match self {
            Value::List { items, .. } | Value::ListView(items) => {
                Ok(Value::ListView(items.clone()))
            }
            Value::Map { entries, .. } | Value::MapView(entries) => {
                Ok(Value::MapView(entries.clone()))
            }
            other => Err(malformed("collection or map", &other.type_name())),
        }
    }

    /// New date with the same epoch reading.
    pub fn copy_date(&self) -> EvalResult<Value> {
        Ok(Value::date(self.time()?))
    }

    // === Mutation of mutable containers ===

    /// Replace an element of an array or mutable list.
    pub fn set_item(&self, index: usize, value: Value) -> EvalResult<()> {
        match self {
            Value::Array(items) | Value::List { items, .. } => {
                let mut items = items.write();
                let len = items.len();
                let slot = items
                    .get_mut(index)
                    .ok_or_else(|| malformed(&format!("index below {len}"), &index.to_string()))?;
                *slot = value;
                Ok(())
            }
            other => Err(malformed("mutable list or array", &other.type_name())),
        }
    }

    /// Append to a mutable list.
    pub fn push(&self, value: Value) -> EvalResult<()> {
        match self {
            Value::List { items, .. } => {
                items.write().push(value);
                Ok(())
            }
            other => Err(malformed("mutable list", &other.type_name())),
        }
    }

    /// Insert into a mutable map.
    pub fn insert(&self, key: impl Into<String>, value: Value) -> EvalResult<()> {
        match self {
            Value::Map { entries, .. } => {
                entries.write().insert(key.into(), value);
                Ok(())
            }
            other => Err(malformed("mutable map", &other.type_name())),
        }
    }

    pub fn set_time(&self, epoch_millis: i64) -> EvalResult<()> {
        match self {
            Value::Date(ms) => {
                *ms.write() = epoch_millis;
                Ok(())
            }
            other => Err(malformed("Date", &other.type_name())),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (
                Value::Known {
                    type_name: ta,
                    repr: ra,
                },
                Value::Known {
                    type_name: tb,
                    repr: rb,
                },
            ) => ta == tb && ra == rb,
            (
                Value::Enum {
                    type_name: ta,
                    variant: va,
                },
                Value::Enum {
                    type_name: tb,
                    variant: vb,
                },
            ) => ta == tb && va == vb,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (
                Value::List { items: a, .. } | Value::ListView(a),
                Value::List { items: b, .. } | Value::ListView(b),
            ) => a == b,
            (
                Value::Map { entries: a, .. } | Value::MapView(a),
                Value::Map { entries: b, .. } | Value::MapView(b),
            ) => a == b,
            (Value::Object(a), Value::Object(b)) => {
                a.type_name == b.type_name && a.fields == b.fields
            }
            (Value::Instance(a), Value::Instance(b)) => Arc::ptr_eq(a, b) || **a == **b,
            _ => false,
        }
    }
}

fn write_items(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    write!(f, "[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    write!(f, "]")
}

fn write_entries(f: &mut fmt::Formatter<'_>, entries: &MapStorage) -> fmt::Result {
    if entries.is_empty() {
        return write!(f, "[:]");
    }
    write!(f, "[")?;
    for (i, (key, value)) in entries.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{key}:{value}")?;
    }
    write!(f, "]")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Char(c) => write!(f, "{c}"),
            Value::Str(s) => write!(f, "{}", &**s),
            Value::Known { repr, .. } => write!(f, "{}", &**repr),
            Value::Enum { variant, .. } => write!(f, "{}", &**variant),
            Value::Date(ms) => write!(f, "Date({})", *ms.read()),
            Value::Array(items) | Value::List { items, .. } | Value::ListView(items) => {
                write_items(f, &items.read())
            }
            Value::Map { entries, .. } | Value::MapView(entries) => {
                write_entries(f, &entries.read())
            }
            Value::Object(obj) => {
                write!(f, "{}", &*obj.type_name)?;
                write_entries(f, &obj.fields.read())
            }
            Value::Instance(inst) => write!(f, "{inst}"),
        }
    }
}
