use frost_ir::Span;
use pretty_assertions::assert_eq;

use super::*;
use crate::ErrorCode;

fn error_at(start: u32, message: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E7001)
        .with_message(message)
        .with_label(Span::new(start, start + 1), "here")
}

#[test]
fn test_flush_sorts_by_position() {
    let mut queue = DiagnosticQueue::new();
    queue.push(error_at(30, "third"));
    queue.push(error_at(5, "first"));
    queue.push(error_at(12, "second"));

    let messages: Vec<_> = queue.flush().into_iter().map(|d| d.message).collect();
    assert_eq!(messages, vec!["first", "second", "third"]);
    assert_eq!(queue.error_count(), 0);
}

#[test]
fn test_error_limit_drops_but_counts() {
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig { error_limit: 2 });
    assert!(queue.push(error_at(0, "a")));
    assert!(queue.push(error_at(1, "b")));
    assert!(!queue.push(error_at(2, "c")));

    assert!(queue.limit_reached());
    assert_eq!(queue.error_count(), 3);
    assert_eq!(queue.suppressed_count(), 1);
    assert_eq!(queue.peek().count(), 2);
}

#[test]
fn test_emit_error_gives_proof() {
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig::unlimited());
    assert!(queue.has_errors().is_none());

    let proof = queue.emit_error(error_at(0, "boom"));
    assert_eq!(queue.has_errors(), Some(proof));
}

#[test]
fn test_warnings_do_not_count() {
    let mut queue = DiagnosticQueue::new();
    queue.push(Diagnostic::warning(ErrorCode::E7001).with_message("w"));

    assert_eq!(queue.error_count(), 0);
    assert_eq!(queue.warning_count(), 1);
    assert!(queue.has_errors().is_none());
}
