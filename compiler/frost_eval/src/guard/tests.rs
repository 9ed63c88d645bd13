use frost_diagnostic::DiagnosticQueue;
use frost_ir::{ClassDecl, FieldDecl, Modifiers, PrimitiveKind, PropertyDecl, TypeIdx, TypePool};
use frost_transform::{transform_class, Strategy};
use pretty_assertions::assert_eq;

use super::*;
use crate::errors::EvalErrorKind;
use crate::interpreter::ClassRuntime;

#[test]
fn scalars_enums_and_null_pass_through() {
    for value in [
        Value::Null,
        Value::Int(3),
        Value::string("s"),
        Value::known("URI", "https://example.org"),
        Value::enum_variant("Color", "RED"),
    ] {
        let checked = check_immutable("Box", "item", value.clone());
        assert_eq!(checked, Ok(value));
    }
}

#[test]
fn lists_and_maps_become_views() {
    let list = Value::list(vec![Value::Int(1)]);
    let checked = check_immutable("Box", "item", list.clone());

    assert!(checked.as_ref().is_ok_and(|v| matches!(v, Value::ListView(_))));
    assert!(checked.is_ok_and(|v| v.ptr_eq(&list)));

    let map = Value::map([("k", Value::Int(1))]);
    assert!(check_immutable("Box", "item", map).is_ok_and(|v| matches!(v, Value::MapView(_))));
}

#[test]
fn mutable_values_are_rejected() {
    let builder = Value::object("StringBuilder", [("text", Value::string("x"))], false);
    let err = check_immutable("pkg.Box", "item", builder);

    let Err(err) = err else {
        panic!("expected rejection");
    };
    assert_eq!(
        err.kind,
        EvalErrorKind::NotImmutable {
            class: "pkg.Box".into(),
            field: "item".into(),
            type_name: "StringBuilder".into(),
        }
    );
    assert!(err.message.contains("while constructing class pkg.Box"));
}

#[test]
fn arrays_and_dates_are_not_collections() {
    assert!(check_immutable("Box", "item", Value::array(vec![])).is_err());
    assert!(check_immutable("Box", "item", Value::date(0)).is_err());
}

fn point_instance() -> Value {
    let pool = TypePool::new();
    let decl = ClassDecl::new("geo.Point")
        .with_property(PropertyDecl::new("x", TypeIdx::INT))
        .with_field(FieldDecl::new("label", TypeIdx::STRING, Modifiers::PRIVATE));
    let mut queue = DiagnosticQueue::new();
    let runtime = ClassRuntime::new(&pool, transform_class(&pool, decl, &mut queue));
    runtime.construct_keyed(None).unwrap_or(Value::Null)
}

#[test]
fn known_names_pass() {
    let point = point_instance();
    let args = Value::map([("x", Value::Int(1)), ("label", Value::string("o"))]);

    assert_eq!(check_prop_names(&point, &args), Ok(()));
}

#[test]
fn first_unknown_name_is_reported() {
    let point = point_instance();
    let args = Value::map([
        ("x", Value::Int(1)),
        ("z", Value::Int(2)),
        ("w", Value::Int(3)),
    ]);

    let err = check_prop_names(&point, &args);
    assert_eq!(
        err.map_err(|e| e.message),
        Err("No such property: z for class: geo.Point".to_owned())
    );
}

#[test]
fn non_instance_is_malformed() {
    let err = check_prop_names(&Value::Int(1), &Value::map([("x", Value::Int(1))]));
    assert!(matches!(err, Err(e) if matches!(e.kind, EvalErrorKind::Malformed { .. })));
}

#[test]
fn declared_type_follows_strategy() {
    let mut pool = TypePool::new();
    let level = pool.enumeration("Level");
    let money = pool.immutable_class("bank.Money");

    assert_eq!(
        DeclaredType::of(&pool, Strategy::Primitive, TypeIdx::LONG),
        Some(DeclaredType::Primitive(PrimitiveKind::Integral))
    );
    assert_eq!(
        DeclaredType::of(&pool, Strategy::KnownImmutableValue, TypeIdx::STRING),
        Some(DeclaredType::Value("String".into()))
    );
    assert_eq!(
        DeclaredType::of(&pool, Strategy::Enum, level),
        Some(DeclaredType::Enum("Level".into()))
    );
    assert_eq!(
        DeclaredType::of(&pool, Strategy::NestedImmutable, money),
        Some(DeclaredType::Marked("bank.Money".into()))
    );
    assert_eq!(DeclaredType::of(&pool, Strategy::Collection, TypeIdx::LIST), None);
}

#[test]
fn known_values_accept_their_runtime_forms() {
    let decimal = DeclaredType::Value("BigDecimal".into());
    assert!(decimal.accepts(&Value::Int(3)));
    assert!(decimal.accepts(&Value::Float(2.5)));
    assert!(decimal.accepts(&Value::known("BigDecimal", "2.50")));
    assert!(!decimal.accepts(&Value::known("URI", "https://example.org")));

    let uri = DeclaredType::Value("URI".into());
    assert!(uri.accepts(&Value::string("https://example.org")));
    assert!(!uri.accepts(&Value::list(vec![])));

    let string = DeclaredType::Value("String".into());
    assert!(string.accepts(&Value::Null));
    assert!(!string.accepts(&Value::Char('c')));
}

#[test]
fn mismatch_names_field_and_runtime_type() {
    let expected = DeclaredType::Primitive(PrimitiveKind::Boolean);
    assert_eq!(
        check_declared_type("Flags", "on", &expected, Value::Bool(true)),
        Ok(Value::Bool(true))
    );

    let Err(err) = check_declared_type("Flags", "on", &expected, Value::date(0)) else {
        panic!("expected rejection");
    };
    assert_eq!(
        err.kind,
        EvalErrorKind::Malformed {
            expected: "boolean for `Flags.on`".into(),
            got: "Date".into(),
        }
    );
}
