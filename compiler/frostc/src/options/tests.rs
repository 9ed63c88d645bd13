#![allow(clippy::unwrap_used)]

use frost_diagnostic::emitter::ColorMode;
use pretty_assertions::assert_eq;

use super::*;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_owned()).collect()
}

#[test]
fn defaults() {
    let parsed = parse_options(&args(&["point.json"])).unwrap();
    assert_eq!(parsed.options, Options::default());
    assert_eq!(parsed.options.diagnostics.error_limit, 20);
    assert_eq!(parsed.positional, args(&["point.json"]));
}

#[test]
fn flags_in_any_position() {
    let parsed = parse_options(&args(&[
        "--format=json",
        "point.json",
        "--color=never",
        "Point",
        "--error-limit=0",
    ]))
    .unwrap();
    assert_eq!(parsed.options.format, OutputFormat::Json);
    assert_eq!(parsed.options.color, ColorMode::Never);
    assert_eq!(parsed.options.diagnostics.error_limit, 0);
    assert_eq!(parsed.positional, args(&["point.json", "Point"]));
}

#[test]
fn rejects_bad_values() {
    assert_eq!(
        parse_options(&args(&["--format=xml"])).unwrap_err(),
        "unknown format `xml` (expected text or json)"
    );
    assert_eq!(
        parse_options(&args(&["--error-limit=many"])).unwrap_err(),
        "invalid error limit `many` (expected a number)"
    );
    assert!(parse_options(&args(&["--color=sometimes"])).is_err());
    assert_eq!(
        parse_options(&args(&["--verbose"])).unwrap_err(),
        "unknown option `--verbose`"
    );
}

#[test]
fn dash_is_positional() {
    let parsed = parse_options(&args(&["-"])).unwrap();
    assert_eq!(parsed.positional, args(&["-"]));
}
