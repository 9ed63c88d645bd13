//! JSON declaration input.
//!
//! The driver reads one JSON document describing the types a compilation
//! unit mentions and the classes marked for immutability:
//!
//! ```text
//! {
//!   "types":   [{ "name": "Address", "kind": "class", "supertypes": ["Cloneable"] }],
//!   "classes": [{ "name": "geo.Point",
//!                 "properties": [{ "name": "x", "type": "int", "init": 0 }] }]
//! }
//! ```
//!
//! Type names resolve against the pre-interned well-known types, the
//! `types` section and the marked classes themselves. A name that matches
//! none of them is kept as an unresolved type; a `[]` suffix makes an array.

use std::io::Read;
use std::path::Path;

use frost_eval::Value;
use frost_ir::{
    ClassDecl, ConstructorDecl, FieldDecl, Literal, Modifiers, PropertyDecl, PropertyFlags, Span,
    TypeIdx, TypePool,
};
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("cannot read `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown supertype `{supertype}` of `{ty}`")]
    UnknownSupertype { ty: String, supertype: String },

    #[error("unknown modifier `{0}`")]
    UnknownModifier(String),

    #[error("invalid literal `{value}`: {reason}")]
    InvalidLiteral { value: String, reason: &'static str },

    #[error("no class named `{0}` in the input")]
    UnknownClass(String),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    #[default]
    Class,
    Interface,
    Enum,
    /// A class carrying the immutability marker, declared elsewhere.
    Immutable,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeEntry {
    pub name: String,
    #[serde(default)]
    pub kind: TypeKind,
    #[serde(default)]
    pub supertypes: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropertyEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub init: Option<serde_json::Value>,
    #[serde(default, rename = "final")]
    pub is_final: bool,
    /// Declared as a public field instead of a property.
    #[serde(default)]
    pub public_field: bool,
    #[serde(default)]
    pub span: Option<[u32; 2]>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default)]
    pub init: Option<serde_json::Value>,
    #[serde(default)]
    pub span: Option<[u32; 2]>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConstructorEntry {
    #[serde(default)]
    pub params: Vec<String>,
    #[serde(default)]
    pub span: Option<[u32; 2]>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassEntry {
    pub name: String,
    #[serde(default)]
    pub interface: bool,
    #[serde(default)]
    pub modifiers: Option<Vec<String>>,
    #[serde(default)]
    pub properties: Vec<PropertyEntry>,
    #[serde(default)]
    pub fields: Vec<FieldEntry>,
    #[serde(default)]
    pub constructors: Vec<ConstructorEntry>,
    #[serde(default)]
    pub span: Option<[u32; 2]>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputFile {
    #[serde(default)]
    pub types: Vec<TypeEntry>,
    pub classes: Vec<ClassEntry>,
}

/// Declarations ready for the transform.
#[derive(Clone, Debug)]
pub struct Program {
    pub pool: TypePool,
    pub classes: Vec<ClassDecl>,
}

impl Program {
    /// Class by qualified or short name.
    pub fn class(&self, name: &str) -> Option<&ClassDecl> {
        self.classes
            .iter()
            .find(|c| c.name == name)
            .or_else(|| self.classes.iter().find(|c| c.short_name() == name))
    }
}

pub fn load(path: &Path) -> Result<Program, InputError> {
    let source = std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse(&source)
}

/// Load from `path`, or from standard input when `path` is `-`.
pub fn read_program(path: &str) -> Result<Program, InputError> {
    if path != "-" {
        return load(Path::new(path));
    }
    let mut source = String::new();
    std::io::stdin()
        .read_to_string(&mut source)
        .map_err(|err| InputError::Io {
            path: "<stdin>".to_owned(),
            source: err,
        })?;
    parse(&source)
}

pub fn parse(source: &str) -> Result<Program, InputError> {
    let file: InputFile = serde_json::from_str(source)?;
    build(file)
}

fn span(raw: Option<[u32; 2]>) -> Span {
    raw.map_or(Span::DUMMY, |[start, end]| Span::new(start, end))
}

/// Resolve a type name, interning unknown names as unresolved.
fn resolve_type(pool: &mut TypePool, name: &str) -> TypeIdx {
    if let Some(elem) = name.strip_suffix("[]") {
        let elem = resolve_type(pool, elem);
        return pool.array(elem);
    }
    match pool.lookup(name) {
        Some(idx) => idx,
        None => {
            tracing::debug!(ty = name, "unknown type kept unresolved");
            pool.unresolved(name)
        }
    }
}

/// Resolve a supertype, which must already be known.
fn resolve_supertype(pool: &mut TypePool, ty: &str, name: &str) -> Result<TypeIdx, InputError> {
    if let Some(elem) = name.strip_suffix("[]") {
        let elem = resolve_supertype(pool, ty, elem)?;
        return Ok(pool.array(elem));
    }
    pool.lookup(name).ok_or_else(|| InputError::UnknownSupertype {
        ty: ty.to_owned(),
        supertype: name.to_owned(),
    })
}

fn modifiers(words: &[String]) -> Result<Modifiers, InputError> {
    let mut mods = Modifiers::empty();
    for word in words {
        mods |= match word.as_str() {
            "public" => Modifiers::PUBLIC,
            "protected" => Modifiers::PROTECTED,
            "private" => Modifiers::PRIVATE,
            "static" => Modifiers::STATIC,
            "final" => Modifiers::FINAL,
            "synthetic" => Modifiers::SYNTHETIC,
            other => return Err(InputError::UnknownModifier(other.to_owned())),
        };
    }
    Ok(mods)
}

fn invalid(value: &serde_json::Value, reason: &'static str) -> InputError {
    InputError::InvalidLiteral {
        value: value.to_string(),
        reason,
    }
}

/// The single `$tag` key of a tagged object, if it is one.
fn tagged(map: &serde_json::Map<String, serde_json::Value>) -> Option<(&str, &serde_json::Value)> {
    match map.iter().next() {
        Some((key, value)) if map.len() == 1 && key.starts_with('$') => Some((key, value)),
        _ => None,
    }
}

/// Compile-time constant from JSON. Arrays become array literals when the
/// declared type is an array, list literals otherwise.
pub fn literal(value: &serde_json::Value, as_array: bool) -> Result<Literal, InputError> {
    use serde_json::Value as Json;

    Ok(match value {
        Json::Null => Literal::Null,
        Json::Bool(b) => Literal::Bool(*b),
        Json::Number(n) => match n.as_i64() {
            Some(i) => Literal::Int(i),
            None => Literal::Float(n.as_f64().ok_or_else(|| invalid(value, "number out of range"))?),
        },
        Json::String(s) => Literal::Str(s.clone()),
        Json::Array(items) => {
            let items = items
                .iter()
                .map(|item| literal(item, false))
                .collect::<Result<Vec<_>, _>>()?;
            if as_array {
                Literal::Array(items)
            } else {
                Literal::List(items)
            }
        }
        Json::Object(map) => match tagged(map) {
            Some(("$enum", Json::String(text))) => {
                let (type_name, variant) = text
                    .rsplit_once('.')
                    .ok_or_else(|| invalid(value, "expected `Type.VARIANT`"))?;
                Literal::EnumConst {
                    type_name: type_name.to_owned(),
                    variant: variant.to_owned(),
                }
            }
            Some(("$date", millis)) => Literal::Date(
                millis
                    .as_i64()
                    .ok_or_else(|| invalid(value, "expected epoch milliseconds"))?,
            ),
            Some(("$char", Json::String(text))) => {
                let mut chars = text.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Literal::Char(c),
                    _ => return Err(invalid(value, "expected a single character")),
                }
            }
            Some((_, _)) => return Err(invalid(value, "unknown tag")),
            None => Literal::Map(
                map.iter()
                    .map(|(k, v)| Ok((k.clone(), literal(v, false)?)))
                    .collect::<Result<Vec<_>, InputError>>()?,
            ),
        },
    })
}

/// Runtime argument from JSON. Plain arrays are cloneable lists and plain
/// objects are cloneable maps; tagged objects build the other kinds.
pub fn runtime_value(value: &serde_json::Value) -> Result<Value, InputError> {
    use serde_json::Value as Json;

    Ok(match value {
        Json::Array(items) => Value::list(
            items
                .iter()
                .map(runtime_value)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Json::Object(map) => match tagged(map) {
            Some(("$array", Json::Array(items))) => Value::array(
                items
                    .iter()
                    .map(runtime_value)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            Some(("$known", Json::Object(known))) => {
                match (known.get("type"), known.get("repr")) {
                    (Some(Json::String(ty)), Some(Json::String(repr))) => {
                        Value::known(ty.as_str(), repr.as_str())
                    }
                    _ => return Err(invalid(value, "expected `type` and `repr` strings")),
                }
            }
            Some(("$object", Json::Object(object))) => {
                let Some(Json::String(ty)) = object.get("type") else {
                    return Err(invalid(value, "expected a `type` string"));
                };
                let cloneable = object
                    .get("cloneable")
                    .and_then(Json::as_bool)
                    .unwrap_or(false);
                let fields = match object.get("fields") {
                    Some(Json::Object(fields)) => fields
                        .iter()
                        .map(|(k, v)| Ok((k.clone(), runtime_value(v)?)))
                        .collect::<Result<Vec<_>, InputError>>()?,
                    _ => Vec::new(),
                };
                Value::object(ty.as_str(), fields, cloneable)
            }
            Some(_) => Value::from_literal(&literal(value, false)?),
            None => Value::map(
                map.iter()
                    .map(|(k, v)| Ok((k.clone(), runtime_value(v)?)))
                    .collect::<Result<Vec<_>, InputError>>()?,
            ),
        },
        scalar => Value::from_literal(&literal(scalar, false)?),
    })
}

fn build(file: InputFile) -> Result<Program, InputError> {
    let mut pool = TypePool::new();

    for class in &file.classes {
        pool.immutable_class(&class.name);
    }
    for entry in &file.types {
        let supertypes = entry
            .supertypes
            .iter()
            .map(|s| resolve_supertype(&mut pool, &entry.name, s))
            .collect::<Result<Vec<_>, _>>()?;
        match entry.kind {
            TypeKind::Class => pool.class(&entry.name, &supertypes),
            TypeKind::Interface => pool.interface(&entry.name, &supertypes),
            TypeKind::Enum => pool.enumeration(&entry.name),
            TypeKind::Immutable => pool.immutable_class(&entry.name),
        };
    }

    let classes = file
        .classes
        .into_iter()
        .map(|entry| class_decl(&mut pool, entry))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(classes = classes.len(), types = pool.len(), "loaded declarations");
    Ok(Program { pool, classes })
}

fn class_decl(pool: &mut TypePool, entry: ClassEntry) -> Result<ClassDecl, InputError> {
    let mut decl = ClassDecl::new(entry.name).at(span(entry.span));
    if let Some(words) = &entry.modifiers {
        decl.modifiers = modifiers(words)?;
    }
    decl.is_interface = entry.interface;

    for prop in entry.properties {
        let ty = resolve_type(pool, &prop.ty);
        let mut flags = PropertyFlags::empty();
        if prop.is_final {
            flags |= PropertyFlags::ALREADY_FINAL;
        }
        if prop.public_field {
            flags |= PropertyFlags::PUBLIC_FIELD_CONFLICT;
        }
        let mut decl_prop = PropertyDecl::new(prop.name, ty)
            .with_flags(flags)
            .at(span(prop.span));
        if let Some(init) = &prop.init {
            decl_prop = decl_prop.with_init(literal(init, pool.is_array(ty))?);
        }
        decl.properties.push(decl_prop);
    }

    for field in entry.fields {
        let ty = resolve_type(pool, &field.ty);
        let mut decl_field =
            FieldDecl::new(field.name, ty, modifiers(&field.modifiers)?).at(span(field.span));
        if let Some(init) = &field.init {
            decl_field = decl_field.with_init(literal(init, pool.is_array(ty))?);
        }
        decl.fields.push(decl_field);
    }

    decl.constructors = entry
        .constructors
        .into_iter()
        .map(|c| ConstructorDecl {
            params: c.params,
            span: span(c.span),
        })
        .collect();

    Ok(decl)
}
