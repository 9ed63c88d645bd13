//! Immutable value-type synthesis.
//!
//! Given a class declaration marked for immutability, this crate derives the
//! members that make it an immutable value type:
//!
//! - **Classification** ([`PropertyClassifier`]): every property gets one
//!   [`Strategy`] describing how it is copied and validated.
//! - **Constructors** ([`ConstructorSynthesizer`]): a keyed constructor taking
//!   an ordered map and a positional constructor delegating to it.
//! - **Accessors** ([`AccessorSynthesizer`]): read-only getters returning
//!   defensive copies of mutable storage.
//! - **Validation** ([`ValidationReporter`]): structural rejections and
//!   unsupported field types, reported as diagnostics.
//!
//! [`transform_class`] runs all four over one declaration. Bodies are built
//! into a per-class [`BodyArena`] and returned with the class.

mod accessor;
mod classify;
mod constructor;
mod validate;

pub use accessor::AccessorSynthesizer;
pub use classify::{PropertyClassifier, Strategy};
pub use constructor::{is_single_map_case, ConstructorSynthesizer};
pub use validate::ValidationReporter;

use frost_diagnostic::{DiagnosticQueue, ErrorGuaranteed};
use frost_ir::pretty::BodyPrinter;
use frost_ir::{
    BodyArena, ClassDecl, ConstructorKind, FieldDecl, Modifiers, PropertyDecl, PropertyFlags,
    SynthConstructor, SynthField, SynthGetter, SynthesizedMember, TypeIdx, TypePool,
    PRINT_NAMES_FIELD,
};

/// A property together with its strategy.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassifiedProperty {
    pub decl: PropertyDecl,
    pub strategy: Strategy,
}

/// Modifier change applied to one field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldPatch {
    pub name: String,
    pub before: Modifiers,
    pub after: Modifiers,
}

/// Output of [`transform_class`].
#[derive(Clone, Debug)]
pub struct ImmutableClass {
    pub name: String,
    /// Class modifiers, always including `FINAL`.
    pub modifiers: Modifiers,
    pub properties: Vec<ClassifiedProperty>,
    /// Non-property fields, with their patched modifiers.
    pub fields: Vec<FieldDecl>,
    pub field_patches: Vec<FieldPatch>,
    pub members: Vec<SynthesizedMember>,
    pub arena: BodyArena,
    /// Set when any diagnostic rejected the class. A failed class has no
    /// constructors.
    pub failed: Option<ErrorGuaranteed>,
}

impl ImmutableClass {
    /// Name without the package prefix.
    pub fn short_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    pub fn property(&self, name: &str) -> Option<&ClassifiedProperty> {
        self.properties.iter().find(|p| p.decl.name == name)
    }

    pub fn constructor(&self, kind: ConstructorKind) -> Option<&SynthConstructor> {
        self.members
            .iter()
            .filter_map(SynthesizedMember::as_constructor)
            .find(|c| c.kind == kind)
    }

    pub fn constructors(&self) -> impl Iterator<Item = &SynthConstructor> {
        self.members
            .iter()
            .filter_map(SynthesizedMember::as_constructor)
    }

    pub fn getter(&self, property: &str) -> Option<&SynthGetter> {
        self.members
            .iter()
            .filter_map(SynthesizedMember::as_getter)
            .find(|g| g.property == property)
    }

    /// Names a keyed-constructor argument may use: every property and
    /// every non-internal field.
    pub fn exposed_names(&self) -> impl Iterator<Item = &str> {
        let props = self.properties.iter().map(|p| p.decl.name.as_str());
        let fields = self
            .fields
            .iter()
            .filter(|f| !f.is_internal())
            .map(|f| f.name.as_str());
        props.chain(fields)
    }

    pub fn exposes(&self, name: &str) -> bool {
        self.exposed_names().any(|n| n == name)
    }

    /// Every synthesized member, pretty-printed, blank-line separated.
    pub fn render(&self, pool: &TypePool) -> String {
        let short = self.short_name();
        self.members
            .iter()
            .map(|m| BodyPrinter::new(&self.arena, pool).member(short, m))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Property backing fields go private and final. A backing field starts
/// private unless the property was also written as a public field.
fn property_patch(prop: &PropertyDecl) -> FieldPatch {
    let mut before = if prop.flags.contains(PropertyFlags::PUBLIC_FIELD_CONFLICT) {
        Modifiers::PUBLIC
    } else {
        Modifiers::PRIVATE
    };
    if prop.flags.contains(PropertyFlags::ALREADY_FINAL) {
        before |= Modifiers::FINAL;
    }
    FieldPatch {
        name: prop.name.clone(),
        before,
        after: before.locked_down(),
    }
}

/// Run classification, validation and synthesis over one marked class.
///
/// Diagnostics go to `queue`. Every check runs even after a failure so all
/// problems with the class surface in one pass.
pub fn transform_class(
    pool: &TypePool,
    decl: ClassDecl,
    queue: &mut DiagnosticQueue,
) -> ImmutableClass {
    let classifier = PropertyClassifier::new(pool);
    let mut reporter = ValidationReporter::new(&decl, queue);

    reporter.check_not_interface();

    let properties: Vec<ClassifiedProperty> = decl
        .properties
        .iter()
        .map(|prop| {
            let strategy = classifier.classify(prop.ty);
            tracing::debug!(
                class = %decl.name,
                property = %prop.name,
                ty = pool.name(prop.ty),
                %strategy,
                "classified property"
            );
            ClassifiedProperty {
                decl: prop.clone(),
                strategy,
            }
        })
        .collect();

    reporter.check_public_fields();
    reporter.check_unique_names();
    reporter.check_constructors();
    for prop in &properties {
        if prop.strategy == Strategy::Invalid {
            reporter.report_unsupported(pool, &prop.decl);
        }
    }
    let failed = reporter.failed();

    let mut field_patches: Vec<FieldPatch> = properties
        .iter()
        .map(|p| property_patch(&p.decl))
        .collect();
    let fields: Vec<FieldDecl> = decl
        .fields
        .iter()
        .map(|field| {
            let mut patched = field.clone();
            if !field.modifiers.is_static_final() {
                patched.modifiers = field.modifiers.locked_down();
                field_patches.push(FieldPatch {
                    name: field.name.clone(),
                    before: field.modifiers,
                    after: patched.modifiers,
                });
            }
            patched
        })
        .collect();

    let mut arena = BodyArena::new();
    let mut members = vec![SynthesizedMember::Field(SynthField {
        name: PRINT_NAMES_FIELD.to_owned(),
        ty: TypeIdx::BOOLEAN,
        modifiers: Modifiers::PRIVATE | Modifiers::SYNTHETIC,
    })];

    if failed.is_none() {
        let constructors = ConstructorSynthesizer::new(&decl, &mut arena).synthesize(&properties);
        members.extend(constructors.into_iter().map(SynthesizedMember::Constructor));
    } else {
        tracing::warn!(class = %decl.name, "class rejected, no constructors synthesized");
    }

    let mut accessors = AccessorSynthesizer::new(&mut arena);
    members.extend(
        properties
            .iter()
            .map(|p| SynthesizedMember::Getter(accessors.getter(p))),
    );

    tracing::debug!(
        class = %decl.name,
        properties = properties.len(),
        members = members.len(),
        failed = failed.is_some(),
        "synthesized immutable class"
    );

    ImmutableClass {
        name: decl.name,
        modifiers: decl.modifiers | Modifiers::FINAL,
        properties,
        fields,
        field_patches,
        members,
        arena,
        failed,
    }
}
