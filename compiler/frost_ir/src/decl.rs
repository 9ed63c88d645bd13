//! Declaration model for a class marked for immutability.
//!
//! A [`ClassDecl`] owns its properties and extra fields by value, in
//! declaration order. Synthesized members refer back to them by name or
//! index, never through shared mutable handles.

use std::fmt;

use bitflags::bitflags;

use crate::{Span, TypeIdx};

/// Marker name used in messages.
pub const MARKER_NAME: &str = "@Immutable";

bitflags! {
    /// Access and storage modifiers for classes and fields.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct Modifiers: u8 {
        const PUBLIC = 1 << 0;
        const PROTECTED = 1 << 1;
        const PRIVATE = 1 << 2;
        const STATIC = 1 << 3;
        const FINAL = 1 << 4;
        /// Compiler-generated member, never visible to users.
        const SYNTHETIC = 1 << 5;
    }
}

impl Modifiers {
    /// Visibility bits.
    pub const VISIBILITY: Self = Self::PUBLIC.union(Self::PROTECTED).union(Self::PRIVATE);

    #[inline]
    pub const fn is_static_final(self) -> bool {
        self.contains(Self::STATIC.union(Self::FINAL))
    }

    /// Private and final, keeping every non-visibility bit.
    #[must_use]
    pub fn locked_down(self) -> Self {
        self.difference(Self::VISIBILITY) | Self::PRIVATE | Self::FINAL
    }
}

bitflags! {
    /// Facts the front end records about a declared property.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct PropertyFlags: u8 {
        /// The backing field was already declared final.
        const ALREADY_FINAL = 1 << 0;
        /// The declaration asked for a public field rather than a property.
        const PUBLIC_FIELD_CONFLICT = 1 << 1;
    }
}

/// A compile-time constant used as an initial value.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Char(char),
    Str(String),
    EnumConst { type_name: String, variant: String },
    /// Date at the given epoch milliseconds.
    Date(i64),
    Array(Vec<Literal>),
    List(Vec<Literal>),
    Map(Vec<(String, Literal)>),
}

impl Literal {
    pub fn str(s: impl Into<String>) -> Self {
        Literal::Str(s.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Literal::Null)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Null => write!(f, "null"),
            Literal::Bool(b) => write!(f, "{b}"),
            Literal::Int(n) => write!(f, "{n}"),
            Literal::Float(x) => write!(f, "{x:?}"),
            Literal::Char(c) => write!(f, "'{c}'"),
            Literal::Str(s) => write!(f, "{s:?}"),
            Literal::EnumConst { type_name, variant } => write!(f, "{type_name}.{variant}"),
            Literal::Date(ms) => write!(f, "new Date({ms})"),
            Literal::Array(items) | Literal::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Literal::Map(entries) => {
                if entries.is_empty() {
                    return write!(f, "[:]");
                }
                write!(f, "[")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "]")
            }
        }
    }
}

/// A declared property: a private backing field plus a synthesized getter.
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyDecl {
    pub name: String,
    pub ty: TypeIdx,
    pub init: Option<Literal>,
    pub flags: PropertyFlags,
    pub span: Span,
}

impl PropertyDecl {
    pub fn new(name: impl Into<String>, ty: TypeIdx) -> Self {
        PropertyDecl {
            name: name.into(),
            ty,
            init: None,
            flags: PropertyFlags::empty(),
            span: Span::DUMMY,
        }
    }

    #[must_use]
    pub fn with_init(mut self, init: Literal) -> Self {
        self.init = Some(init);
        self
    }

    #[must_use]
    pub fn with_flags(mut self, flags: PropertyFlags) -> Self {
        self.flags |= flags;
        self
    }

    #[must_use]
    pub fn at(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Final with a compile-time initializer: callers may not override it.
    pub fn is_read_only(&self) -> bool {
        self.flags.contains(PropertyFlags::ALREADY_FINAL) && self.init.is_some()
    }
}

/// A field declared alongside the properties (not itself a property).
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDecl {
    pub name: String,
    pub ty: TypeIdx,
    pub modifiers: Modifiers,
    pub init: Option<Literal>,
    pub span: Span,
}

impl FieldDecl {
    pub fn new(name: impl Into<String>, ty: TypeIdx, modifiers: Modifiers) -> Self {
        FieldDecl {
            name: name.into(),
            ty,
            modifiers,
            init: None,
            span: Span::DUMMY,
        }
    }

    #[must_use]
    pub fn with_init(mut self, init: Literal) -> Self {
        self.init = Some(init);
        self
    }

    #[must_use]
    pub fn at(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Synthetic or `$`-named: generated by some transform, not the user.
    pub fn is_internal(&self) -> bool {
        self.modifiers.contains(Modifiers::SYNTHETIC) || self.name.contains('$')
    }

    pub fn is_public(&self) -> bool {
        self.modifiers.contains(Modifiers::PUBLIC)
    }
}

/// A constructor the user wrote by hand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstructorDecl {
    pub params: Vec<String>,
    pub span: Span,
}

/// A class declaration selected for the immutability transform.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassDecl {
    /// Qualified name, e.g. `shapes.Point`.
    pub name: String,
    pub modifiers: Modifiers,
    pub is_interface: bool,
    pub properties: Vec<PropertyDecl>,
    pub fields: Vec<FieldDecl>,
    pub constructors: Vec<ConstructorDecl>,
    pub span: Span,
}

impl ClassDecl {
    pub fn new(name: impl Into<String>) -> Self {
        ClassDecl {
            name: name.into(),
            modifiers: Modifiers::PUBLIC,
            is_interface: false,
            properties: Vec::new(),
            fields: Vec::new(),
            constructors: Vec::new(),
            span: Span::DUMMY,
        }
    }

    #[must_use]
    pub fn with_property(mut self, property: PropertyDecl) -> Self {
        self.properties.push(property);
        self
    }

    #[must_use]
    pub fn with_field(mut self, field: FieldDecl) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn with_constructor(mut self, constructor: ConstructorDecl) -> Self {
        self.constructors.push(constructor);
        self
    }

    #[must_use]
    pub fn as_interface(mut self) -> Self {
        self.is_interface = true;
        self
    }

    #[must_use]
    pub fn at(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Name without the package prefix.
    pub fn short_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    pub fn property(&self, name: &str) -> Option<&PropertyDecl> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn field(&self, name: &str) -> Option<&FieldDecl> {
        self.fields.iter().find(|f| f.name == name)
    }
}
