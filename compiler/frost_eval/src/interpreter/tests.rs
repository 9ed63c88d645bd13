#![allow(clippy::unwrap_used)]

use frost_diagnostic::DiagnosticQueue;
use frost_ir::{ClassDecl, ConstructorDecl, FieldDecl, Literal, Modifiers, PropertyDecl, PropertyFlags, Span};
use frost_transform::transform_class;
use pretty_assertions::assert_eq;

use super::*;
use crate::errors::EvalErrorKind;

fn runtime(pool: &TypePool, decl: ClassDecl) -> Arc<ClassRuntime> {
    let mut queue = DiagnosticQueue::new();
    ClassRuntime::new(pool, transform_class(pool, decl, &mut queue))
}

fn point() -> ClassDecl {
    ClassDecl::new("geo.Point")
        .with_property(PropertyDecl::new("x", TypeIdx::INT))
        .with_property(PropertyDecl::new("y", TypeIdx::INT))
}

#[test]
fn type_defaults() {
    let pool = TypePool::new();

    assert_eq!(type_default(&pool, TypeIdx::BOOLEAN), Value::Bool(false));
    assert_eq!(type_default(&pool, TypeIdx::LONG), Value::Int(0));
    assert_eq!(type_default(&pool, TypeIdx::DOUBLE), Value::Float(0.0));
    assert_eq!(type_default(&pool, TypeIdx::CHAR), Value::Char('\0'));
    assert_eq!(type_default(&pool, TypeIdx::INTEGER), Value::Null);
    assert_eq!(type_default(&pool, TypeIdx::STRING), Value::Null);
}

#[test]
fn keyed_construction_stores_arguments() {
    let pool = TypePool::new();
    let rt = runtime(&pool, point());
    let p = rt
        .construct_keyed(Some(Value::map([("x", Value::Int(1)), ("y", Value::Int(2))])))
        .unwrap();
    let p = p.as_instance().unwrap();

    assert_eq!(p.get("x"), Ok(Value::Int(1)));
    assert_eq!(p.get("y"), Ok(Value::Int(2)));
    assert!(p.keyword_style());
    assert_eq!(p.to_string(), "Point(x:1, y:2)");
}

#[test]
fn positional_construction_renders_positionally() {
    let pool = TypePool::new();
    let rt = runtime(&pool, point());
    let p = rt
        .construct_positional(vec![Value::Int(3), Value::Int(4)])
        .unwrap();
    let p = p.as_instance().unwrap();

    assert_eq!(p.get("x"), Ok(Value::Int(3)));
    assert!(!p.keyword_style());
    assert_eq!(p.to_string(), "Point(3, 4)");
}

#[test]
fn null_map_keeps_type_defaults() {
    let pool = TypePool::new();
    let decl = point().with_property(
        PropertyDecl::new("label", TypeIdx::STRING).with_init(Literal::str("origin")),
    );
    let rt = runtime(&pool, decl);
    let p = rt.construct_keyed(None).unwrap();
    let p = p.as_instance().unwrap();

    assert_eq!(p.get("x"), Ok(Value::Int(0)));
    assert_eq!(p.get("label"), Ok(Value::Null));
    assert!(!p.keyword_style());
}

#[test]
fn missing_and_null_keys_fall_back_to_init() {
    let pool = TypePool::new();
    let decl = ClassDecl::new("Person")
        .with_property(PropertyDecl::new("name", TypeIdx::STRING).with_init(Literal::str("anon")))
        .with_property(PropertyDecl::new("age", TypeIdx::INT));
    let rt = runtime(&pool, decl);

    let absent = rt.construct_keyed(Some(Value::map([("age", Value::Int(5))]))).unwrap();
    let null = rt
        .construct_keyed(Some(Value::map([("name", Value::Null)])))
        .unwrap();

    assert_eq!(absent.as_instance().unwrap().get("name"), Ok(Value::string("anon")));
    assert_eq!(null.as_instance().unwrap().get("name"), Ok(Value::string("anon")));
    assert_eq!(null.as_instance().unwrap().get("age"), Ok(Value::Int(0)));
}

#[test]
fn unknown_key_is_rejected() {
    let pool = TypePool::new();
    let rt = runtime(&pool, point());
    let err = rt
        .construct_keyed(Some(Value::map([("x", Value::Int(1)), ("z", Value::Int(9))])))
        .unwrap_err();

    assert_eq!(
        err.kind,
        EvalErrorKind::NoSuchProperty {
            property: "z".into(),
            class: "geo.Point".into(),
        }
    );
}

#[test]
fn read_only_property_cannot_be_overridden() {
    let pool = TypePool::new();
    let decl = ClassDecl::new("Unit").with_property(
        PropertyDecl::new("scale", TypeIdx::INT)
            .with_init(Literal::Int(10))
            .with_flags(PropertyFlags::ALREADY_FINAL),
    );
    let rt = runtime(&pool, decl);

    let defaulted = rt.construct_keyed(Some(Value::map(Vec::<(String, Value)>::new())));
    assert_eq!(
        defaulted.unwrap().as_instance().unwrap().get("scale"),
        Ok(Value::Int(10))
    );

    let err = rt
        .construct_keyed(Some(Value::map([("scale", Value::Int(2))])))
        .unwrap_err();
    assert_eq!(err.message, "Cannot set readonly property: scale for class: Unit");
}

#[test]
fn extra_fields_are_assignable_by_key() {
    let pool = TypePool::new();
    let decl = point().with_field(FieldDecl::new("label", TypeIdx::STRING, Modifiers::PRIVATE));
    let rt = runtime(&pool, decl);
    let p = rt
        .construct_keyed(Some(Value::map([("label", Value::string("o"))])))
        .unwrap();

    assert_eq!(p.as_instance().unwrap().field("label"), Some(Value::string("o")));
}

#[test]
fn arity_mismatch() {
    let pool = TypePool::new();
    let rt = runtime(&pool, point());
    let err = rt.construct_positional(vec![Value::Int(1)]).unwrap_err();

    assert_eq!(
        err.kind,
        EvalErrorKind::ArityMismatch {
            class: "geo.Point".into(),
            expected: 2,
            got: 1,
        }
    );
}

#[test]
fn failed_class_has_no_constructors() {
    let pool = TypePool::new();
    let decl = point().with_constructor(ConstructorDecl {
        params: vec![],
        span: Span::DUMMY,
    });
    let rt = runtime(&pool, decl);

    assert_eq!(rt.construct_keyed(None).unwrap_err().code(), frost_diagnostic::ErrorCode::E6005);
    assert_eq!(
        rt.construct_positional(vec![]).unwrap_err().code(),
        frost_diagnostic::ErrorCode::E6005
    );
}

#[test]
fn non_map_argument_is_malformed() {
    let pool = TypePool::new();
    let rt = runtime(&pool, point());
    let err = rt.construct_keyed(Some(Value::Int(1))).unwrap_err();

    assert!(matches!(err.kind, EvalErrorKind::Malformed { .. }));
}

#[test]
fn unknown_getter() {
    let pool = TypePool::new();
    let rt = runtime(&pool, point());
    let p = rt.construct_keyed(None).unwrap();

    assert!(p.as_instance().unwrap().get("z").is_err());
}

#[test]
fn instances_compare_by_properties() {
    let pool = TypePool::new();
    let rt = runtime(&pool, point());
    let a = rt.construct_positional(vec![Value::Int(1), Value::Int(2)]).unwrap();
    let b = rt
        .construct_keyed(Some(Value::map([("x", Value::Int(1)), ("y", Value::Int(2))])))
        .unwrap();
    let c = rt.construct_positional(vec![Value::Int(1), Value::Int(3)]).unwrap();

    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn mistyped_value_is_rejected_without_aliasing() {
    let pool = TypePool::new();
    let decl = ClassDecl::new("Person").with_property(PropertyDecl::new("name", TypeIdx::STRING));
    let rt = runtime(&pool, decl);
    let names = Value::list(vec![Value::Int(1)]);

    let err = rt
        .construct_keyed(Some(Value::map([("name", names.clone())])))
        .unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::Malformed {
            expected: "String for `Person.name`".into(),
            got: "ArrayList".into(),
        }
    );
    assert_eq!(err.code(), frost_diagnostic::ErrorCode::E6006);

    let err = rt.construct_positional(vec![names]).unwrap_err();
    assert_eq!(err.code(), frost_diagnostic::ErrorCode::E6006);
}

#[test]
fn value_like_stores_follow_declared_types() {
    let mut pool = TypePool::new();
    let level = pool.enumeration("Level");
    let point_ty = pool.immutable_class("geo.Point");
    let decl = ClassDecl::new("Reading")
        .with_property(PropertyDecl::new("ratio", TypeIdx::DOUBLE))
        .with_property(PropertyDecl::new("flag", TypeIdx::BOOLEAN))
        .with_property(PropertyDecl::new("level", level))
        .with_property(PropertyDecl::new("at", point_ty));
    let rt = runtime(&pool, decl);
    let origin = runtime(&pool, point()).construct_keyed(None).unwrap();

    let ok = rt.construct_positional(vec![
        Value::Int(2),
        Value::Bool(true),
        Value::enum_variant("Level", "HIGH"),
        origin.clone(),
    ]);
    assert_eq!(ok.unwrap().to_string(), "Reading(2, true, HIGH, Point(0, 0))");

    for (name, value) in [
        ("ratio", Value::string("2.5")),
        ("flag", Value::Int(1)),
        ("level", Value::enum_variant("Color", "RED")),
        ("at", Value::map([("x", Value::Int(1))])),
    ] {
        let err = rt
            .construct_keyed(Some(Value::map([(name, value)])))
            .unwrap_err();
        assert!(
            matches!(err.kind, EvalErrorKind::Malformed { .. }),
            "{name}: {err:?}"
        );
    }
}

#[test]
fn extra_field_store_is_type_checked() {
    let pool = TypePool::new();
    let decl = point().with_field(FieldDecl::new("count", TypeIdx::INT, Modifiers::PRIVATE));
    let rt = runtime(&pool, decl);
    let err = rt
        .construct_keyed(Some(Value::map([("count", Value::string("many"))])))
        .unwrap_err();

    assert_eq!(
        err.message,
        "malformed value in generated body: expected integral number for `geo.Point.count`, got String"
    );
}
