//! Type pool for declared field types.
//!
//! Every type a declaration mentions lives in a [`TypePool`] and is referenced
//! by a 32-bit [`TypeIdx`]. The well-known types the immutability rules care
//! about (primitives, boxed scalars, strings, collections, maps, the date and
//! cloneable capabilities) are pre-interned at fixed indices so the classifier
//! can compare handles instead of names.
//!
//! Capability questions ("is this a collection?", "is this cloneable?") are
//! answered by walking the supertype edges recorded at interning time.

use std::fmt;
use std::sync::OnceLock;

use bitflags::bitflags;
use rustc_hash::{FxHashMap, FxHashSet};

/// Runtime and declared type names that are immutable without further proof.
///
/// Shared by the static classifier and the runtime guard so both phases agree
/// on the same allowlist.
pub const KNOWN_IMMUTABLE_TYPES: [&str; 13] = [
    "Boolean",
    "Byte",
    "Character",
    "Double",
    "Float",
    "Integer",
    "Long",
    "Short",
    "String",
    "BigInteger",
    "BigDecimal",
    "Color",
    "URI",
];

static KNOWN_IMMUTABLE_SET: OnceLock<FxHashSet<&'static str>> = OnceLock::new();

/// Check a type name against [`KNOWN_IMMUTABLE_TYPES`].
pub fn is_known_immutable_name(name: &str) -> bool {
    KNOWN_IMMUTABLE_SET
        .get_or_init(|| KNOWN_IMMUTABLE_TYPES.iter().copied().collect())
        .contains(name)
}

/// A 32-bit index into the type pool.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct TypeIdx(u32);

impl TypeIdx {
    // === Primitive Types (indices 0-7) ===
    pub const BOOLEAN: Self = Self(0);
    pub const BYTE: Self = Self(1);
    pub const CHAR: Self = Self(2);
    pub const SHORT: Self = Self(3);
    pub const INT: Self = Self(4);
    pub const LONG: Self = Self(5);
    pub const FLOAT: Self = Self(6);
    pub const DOUBLE: Self = Self(7);

    // === Boxed Scalars (indices 8-15) ===
    pub const BOOLEAN_BOX: Self = Self(8);
    pub const BYTE_BOX: Self = Self(9);
    pub const CHARACTER: Self = Self(10);
    pub const SHORT_BOX: Self = Self(11);
    pub const INTEGER: Self = Self(12);
    pub const LONG_BOX: Self = Self(13);
    pub const FLOAT_BOX: Self = Self(14);
    pub const DOUBLE_BOX: Self = Self(15);

    // === Other Known Immutables (indices 16-20) ===
    pub const STRING: Self = Self(16);
    pub const BIG_INTEGER: Self = Self(17);
    pub const BIG_DECIMAL: Self = Self(18);
    pub const URI: Self = Self(19);
    pub const COLOR: Self = Self(20);

    // === Capabilities and Special Handling (indices 21-28) ===
    /// Root of the class hierarchy. Resolved, but proves nothing.
    pub const OBJECT: Self = Self(21);
    pub const CLONEABLE: Self = Self(22);
    pub const COLLECTION: Self = Self(23);
    pub const LIST: Self = Self(24);
    pub const SET: Self = Self(25);
    pub const MAP: Self = Self(26);
    /// Insertion-ordered map; the parameter type of keyed constructors.
    pub const ORDERED_MAP: Self = Self(27);
    pub const DATE: Self = Self(28);

    /// Number of pre-interned types.
    pub const PRE_INTERNED_COUNT: u32 = 29;

    /// Sentinel value indicating no type.
    pub const NONE: Self = Self(u32::MAX);

    /// Create an index from a raw u32 value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Check if this is one of the eight primitive types.
    #[inline]
    pub const fn is_primitive(self) -> bool {
        self.0 <= Self::DOUBLE.0
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for TypeIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::NONE {
            write!(f, "TypeIdx::NONE")
        } else {
            write!(f, "TypeIdx({})", self.0)
        }
    }
}

/// Kind of a pooled type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeTag {
    Primitive,
    Class,
    Interface,
    Enum,
    /// Array of `elem`.
    Array,
    /// Forward reference or generic placeholder not yet resolvable.
    Unresolved,
}

/// Value category of a primitive type, used to pick field defaults.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum PrimitiveKind {
    Boolean,
    Char,
    Integral,
    Floating,
}

bitflags! {
    /// Pre-computed type facts, fixed at interning time.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct TypeFlags: u8 {
        /// Fully resolved; capability queries are conclusive.
        const RESOLVED = 1 << 0;
        /// The type itself carries the immutability marker.
        const IMMUTABLE_MARKER = 1 << 1;
        /// Member of [`KNOWN_IMMUTABLE_TYPES`].
        const KNOWN_IMMUTABLE = 1 << 2;
    }
}

#[derive(Clone, Debug)]
struct TypeEntry {
    name: String,
    tag: TypeTag,
    flags: TypeFlags,
    supertypes: Vec<TypeIdx>,
    elem: TypeIdx,
}

/// Pool of every type referenced by the declarations of one compilation unit.
///
/// Interning is by name: asking for a name that already exists returns the
/// existing handle unchanged.
#[derive(Clone, Debug)]
pub struct TypePool {
    entries: Vec<TypeEntry>,
    by_name: FxHashMap<String, TypeIdx>,
}

impl Default for TypePool {
    fn default() -> Self {
        Self::new()
    }
}

impl TypePool {
    /// Create a pool with the well-known types pre-interned.
    pub fn new() -> Self {
        let mut pool = TypePool {
            entries: Vec::with_capacity(TypeIdx::PRE_INTERNED_COUNT as usize + 16),
            by_name: FxHashMap::default(),
        };

        for name in [
            "boolean", "byte", "char", "short", "int", "long", "float", "double",
        ] {
            pool.intern(name, TypeTag::Primitive, TypeFlags::empty(), &[], TypeIdx::NONE);
        }
        for name in [
            "Boolean",
            "Byte",
            "Character",
            "Short",
            "Integer",
            "Long",
            "Float",
            "Double",
            "String",
            "BigInteger",
            "BigDecimal",
            "URI",
            "Color",
        ] {
            pool.intern(name, TypeTag::Class, TypeFlags::empty(), &[], TypeIdx::NONE);
        }

        pool.intern("Object", TypeTag::Class, TypeFlags::empty(), &[], TypeIdx::NONE);
        pool.intern("Cloneable", TypeTag::Interface, TypeFlags::empty(), &[], TypeIdx::NONE);
        pool.intern("Collection", TypeTag::Interface, TypeFlags::empty(), &[], TypeIdx::NONE);
        pool.intern("List", TypeTag::Interface, TypeFlags::empty(), &[TypeIdx::COLLECTION], TypeIdx::NONE);
        pool.intern("Set", TypeTag::Interface, TypeFlags::empty(), &[TypeIdx::COLLECTION], TypeIdx::NONE);
        pool.intern("Map", TypeTag::Interface, TypeFlags::empty(), &[], TypeIdx::NONE);
        pool.intern("OrderedMap", TypeTag::Class, TypeFlags::empty(), &[TypeIdx::MAP], TypeIdx::NONE);
        pool.intern("Date", TypeTag::Class, TypeFlags::empty(), &[], TypeIdx::NONE);

        debug_assert_eq!(pool.entries.len(), TypeIdx::PRE_INTERNED_COUNT as usize);
        pool
    }

    fn intern(
        &mut self,
        name: &str,
        tag: TypeTag,
        mut flags: TypeFlags,
        supertypes: &[TypeIdx],
        elem: TypeIdx,
    ) -> TypeIdx {
        if let Some(&existing) = self.by_name.get(name) {
            return existing;
        }
        if tag != TypeTag::Unresolved {
            flags |= TypeFlags::RESOLVED;
        }
        if is_known_immutable_name(name) {
            flags |= TypeFlags::KNOWN_IMMUTABLE;
        }

        #[allow(clippy::cast_possible_truncation)]
        let idx = TypeIdx(self.entries.len() as u32);
        self.entries.push(TypeEntry {
            name: name.to_owned(),
            tag,
            flags,
            supertypes: supertypes.to_vec(),
            elem,
        });
        self.by_name.insert(name.to_owned(), idx);
        idx
    }

    // === Construction ===

    /// Intern a concrete class with the given supertypes and interfaces.
    pub fn class(&mut self, name: &str, supertypes: &[TypeIdx]) -> TypeIdx {
        self.intern(name, TypeTag::Class, TypeFlags::empty(), supertypes, TypeIdx::NONE)
    }

    /// Intern a class that itself carries the immutability marker.
    pub fn immutable_class(&mut self, name: &str) -> TypeIdx {
        self.intern(
            name,
            TypeTag::Class,
            TypeFlags::IMMUTABLE_MARKER,
            &[],
            TypeIdx::NONE,
        )
    }

    /// Intern an interface extending `supertypes`.
    pub fn interface(&mut self, name: &str, supertypes: &[TypeIdx]) -> TypeIdx {
        self.intern(name, TypeTag::Interface, TypeFlags::empty(), supertypes, TypeIdx::NONE)
    }

    /// Intern an enumeration type.
    pub fn enumeration(&mut self, name: &str) -> TypeIdx {
        self.intern(name, TypeTag::Enum, TypeFlags::empty(), &[], TypeIdx::NONE)
    }

    /// Intern the array type `elem[]`.
    pub fn array(&mut self, elem: TypeIdx) -> TypeIdx {
        let name = format!("{}[]", self.name(elem));
        self.intern(&name, TypeTag::Array, TypeFlags::empty(), &[], elem)
    }

    /// Intern a type whose definition is not yet available.
    pub fn unresolved(&mut self, name: &str) -> TypeIdx {
        self.intern(name, TypeTag::Unresolved, TypeFlags::empty(), &[], TypeIdx::NONE)
    }

    // === Queries ===

    /// Look up a type by name.
    pub fn lookup(&self, name: &str) -> Option<TypeIdx> {
        self.by_name.get(name).copied()
    }

    /// Number of interned types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// A pool always holds the pre-interned types.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, idx: TypeIdx) -> Option<&TypeEntry> {
        self.entries.get(idx.index())
    }

    /// Name of a type, or `<none>` for the sentinel.
    pub fn name(&self, idx: TypeIdx) -> &str {
        self.entry(idx).map_or("<none>", |e| e.name.as_str())
    }

    /// Tag of a type. The sentinel reads as unresolved.
    pub fn tag(&self, idx: TypeIdx) -> TypeTag {
        self.entry(idx).map_or(TypeTag::Unresolved, |e| e.tag)
    }

    pub fn flags(&self, idx: TypeIdx) -> TypeFlags {
        self.entry(idx).map_or(TypeFlags::empty(), |e| e.flags)
    }

    /// Element type of an array, `TypeIdx::NONE` otherwise.
    pub fn elem(&self, idx: TypeIdx) -> TypeIdx {
        self.entry(idx).map_or(TypeIdx::NONE, |e| e.elem)
    }

    pub fn supertypes(&self, idx: TypeIdx) -> &[TypeIdx] {
        match self.entry(idx) {
            Some(entry) => &entry.supertypes,
            None => &[],
        }
    }

    pub fn is_array(&self, idx: TypeIdx) -> bool {
        self.tag(idx) == TypeTag::Array
    }

    pub fn is_enum(&self, idx: TypeIdx) -> bool {
        self.tag(idx) == TypeTag::Enum
    }

    pub fn is_resolved(&self, idx: TypeIdx) -> bool {
        self.flags(idx).contains(TypeFlags::RESOLVED)
    }

    pub fn has_immutable_marker(&self, idx: TypeIdx) -> bool {
        self.flags(idx).contains(TypeFlags::IMMUTABLE_MARKER)
    }

    pub fn is_known_immutable(&self, idx: TypeIdx) -> bool {
        self.flags(idx).contains(TypeFlags::KNOWN_IMMUTABLE)
    }

    /// Value category of a primitive, `None` for every other type.
    pub fn primitive_kind(&self, idx: TypeIdx) -> Option<PrimitiveKind> {
        match idx {
            TypeIdx::BOOLEAN => Some(PrimitiveKind::Boolean),
            TypeIdx::CHAR => Some(PrimitiveKind::Char),
            TypeIdx::BYTE | TypeIdx::SHORT | TypeIdx::INT | TypeIdx::LONG => {
                Some(PrimitiveKind::Integral)
            }
            TypeIdx::FLOAT | TypeIdx::DOUBLE => Some(PrimitiveKind::Floating),
            _ => None,
        }
    }

    /// Check whether `idx` is `target` or reaches it through supertype edges.
    ///
    /// Covers both "derives from" and "implements". Cycles in malformed
    /// hierarchies terminate via the visited set.
    pub fn is_or_derives(&self, idx: TypeIdx, target: TypeIdx) -> bool {
        let mut visited = FxHashSet::default();
        let mut stack = vec![idx];
        while let Some(current) = stack.pop() {
            if current == target {
                return true;
            }
            if visited.insert(current) {
                stack.extend_from_slice(self.supertypes(current));
            }
        }
        false
    }
}
