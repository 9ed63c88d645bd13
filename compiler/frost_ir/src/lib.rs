//! Frost IR - declaration model and synthesized body IR
//!
//! This crate holds the data the immutability transform reads and writes:
//! - Spans for source locations
//! - The type pool (`TypePool`, `TypeIdx`) with pre-interned well-known types
//! - Class, property and field declarations
//! - The flat body arena synthesized constructors and getters are built in
//! - Synthesized member descriptions and a pretty-printer for them
//!
//! # Design Philosophy
//!
//! - **Index, don't box**: bodies are `ExprId`/`StmtId` handles into a
//!   `BodyArena`, types are `TypeIdx` handles into a `TypePool`.
//! - **Own by value**: declarations are plain data, consumed once per class.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod body;
mod decl;
mod member;
pub mod pretty;
mod span;
mod types;

pub use body::{BodyArena, Expr, ExprId, GuardCall, Stmt, StmtId};
pub use decl::{
    ClassDecl, ConstructorDecl, FieldDecl, Literal, Modifiers, PropertyDecl, PropertyFlags,
    MARKER_NAME,
};
pub use member::{
    getter_name, ConstructorKind, Param, SynthConstructor, SynthField, SynthGetter,
    SynthesizedMember, KEYED_ARGS, PRINT_NAMES_FIELD,
};
pub use span::Span;
pub use types::{
    is_known_immutable_name, PrimitiveKind, TypeFlags, TypeIdx, TypePool, TypeTag,
    KNOWN_IMMUTABLE_TYPES,
};
