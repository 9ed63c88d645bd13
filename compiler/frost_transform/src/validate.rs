//! Validation reporter.
//!
//! Structural rejections for a marked class. Each check pushes its
//! diagnostics into the shared queue and hands back the proof, so the
//! driver can mark the class failed without aborting the remaining checks.

use frost_diagnostic::{
    duplicate_member, explicit_constructor, interface_target, public_field,
    unsupported_field_type, Diagnostic, DiagnosticQueue, ErrorGuaranteed,
};
use frost_ir::{ClassDecl, PropertyDecl, PropertyFlags, TypePool};
use rustc_hash::FxHashSet;

pub struct ValidationReporter<'a> {
    decl: &'a ClassDecl,
    queue: &'a mut DiagnosticQueue,
    failed: Option<ErrorGuaranteed>,
}

impl<'a> ValidationReporter<'a> {
    pub fn new(decl: &'a ClassDecl, queue: &'a mut DiagnosticQueue) -> Self {
        ValidationReporter {
            decl,
            queue,
            failed: None,
        }
    }

    /// Proof of the first failure reported through this reporter.
    pub fn failed(&self) -> Option<ErrorGuaranteed> {
        self.failed
    }

    fn report(&mut self, diag: Diagnostic) -> ErrorGuaranteed {
        let proof = self.queue.emit_error(diag);
        self.failed.get_or_insert(proof);
        proof
    }

    pub fn check_not_interface(&mut self) -> Option<ErrorGuaranteed> {
        if !self.decl.is_interface {
            return None;
        }
        Some(self.report(interface_target(self.decl.span, &self.decl.name)))
    }

    /// Any hand-written constructor rejects the class; the first one is
    /// pointed at.
    pub fn check_constructors(&mut self) -> Option<ErrorGuaranteed> {
        let decl = self.decl;
        let first = decl.constructors.first()?;
        Some(self.report(explicit_constructor(first.span, decl.short_name())))
    }

    /// Public fields that are neither static-final nor internal, plus
    /// properties declared as public fields.
    pub fn check_public_fields(&mut self) -> Option<ErrorGuaranteed> {
        let decl = self.decl;
        let mut result = None;
        for prop in &decl.properties {
            if prop.flags.contains(PropertyFlags::PUBLIC_FIELD_CONFLICT) && !prop.name.contains('$')
            {
                result = Some(self.report(public_field(prop.span, &prop.name, &decl.name)));
            }
        }
        for field in &decl.fields {
            if field.is_public() && !field.is_internal() && !field.modifiers.is_static_final() {
                result = Some(self.report(public_field(field.span, &field.name, &decl.name)));
            }
        }
        result
    }

    /// Properties and fields share one namespace. Every declaration after
    /// the first with a given name is reported.
    pub fn check_unique_names(&mut self) -> Option<ErrorGuaranteed> {
        let decl = self.decl;
        let members = decl
            .properties
            .iter()
            .map(|p| (p.name.as_str(), p.span))
            .chain(decl.fields.iter().map(|f| (f.name.as_str(), f.span)));
        let mut seen = FxHashSet::default();
        let mut result = None;
        for (name, span) in members {
            if !seen.insert(name) {
                result = Some(self.report(duplicate_member(span, name, &decl.name)));
            }
        }
        result
    }

    /// A property whose resolved type is not provably immutable.
    pub fn report_unsupported(&mut self, pool: &TypePool, prop: &PropertyDecl) -> ErrorGuaranteed {
        self.report(unsupported_field_type(
            prop.span,
            &self.decl.name,
            &prop.name,
            pool.name(prop.ty),
        ))
    }
}
