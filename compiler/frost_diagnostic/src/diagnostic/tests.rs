use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_builder_collects_parts() {
    let diag = Diagnostic::error(ErrorCode::E7003)
        .with_message("bad")
        .with_label(Span::new(4, 9), "here")
        .with_secondary_label(Span::new(0, 3), "class")
        .with_note("a note")
        .with_suggestion("fix it");

    assert!(diag.is_error());
    assert_eq!(diag.primary_span(), Some(Span::new(4, 9)));
    assert_eq!(diag.labels.len(), 2);
    assert_eq!(diag.notes, vec!["a note".to_owned()]);
}

#[test]
fn test_display() {
    let diag = Diagnostic::error(ErrorCode::E7004)
        .with_message("no interfaces")
        .with_label(Span::new(0, 4), "here")
        .with_note("n");

    assert_eq!(
        diag.to_string(),
        "error [E7004]: no interfaces\n  --> 0..4: here\n  = note: n"
    );
}

#[test]
fn test_warning_is_not_error() {
    let diag = Diagnostic::warning(ErrorCode::E7001);
    assert!(!diag.is_error());
    assert_eq!(diag.primary_span(), None);
}

#[test]
fn test_synthesis_messages() {
    assert_eq!(
        explicit_constructor(Span::DUMMY, "Point").message,
        "Explicit constructors not allowed for @Immutable class: Point"
    );
    assert_eq!(
        public_field(Span::DUMMY, "x", "geo.Point").message,
        "Public field 'x' not allowed for @Immutable class 'geo.Point'."
    );
    assert_eq!(
        interface_target(Span::DUMMY, "geo.Shape").message,
        "Error processing interface 'geo.Shape'. @Immutable not allowed for interfaces."
    );
    let duplicate = duplicate_member(Span::new(3, 7), "x", "geo.Pair");
    assert_eq!(duplicate.code, ErrorCode::E7005);
    assert_eq!(duplicate.message, "Duplicate member 'x' in @Immutable class 'geo.Pair'.");
    assert_eq!(duplicate.primary_span(), Some(Span::new(3, 7)));

    let unsupported = unsupported_field_type(Span::new(10, 20), "Order", "wallet", "Wallet");
    assert_eq!(unsupported.code, ErrorCode::E7001);
    assert!(unsupported.message.contains("field 'wallet' of type 'Wallet'"));
    assert_eq!(unsupported.primary_span(), Some(Span::new(10, 20)));
}
