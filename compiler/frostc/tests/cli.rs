//! End-to-end tests for the frostc driver.
//!
//! Most tests call the command handlers with in-memory writers; a few run
//! the built binary to pin exit codes.

#![allow(clippy::unwrap_used)]

use std::process::Command;

use frostc::commands::{check, construct, explain, synth, Output};
use frostc::input::{load, InputError, Program};
use frostc::options::{parse_options, Options};
use pretty_assertions::assert_eq;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"))
}

fn program(name: &str) -> Program {
    load(fixture(name).as_ref()).unwrap()
}

fn options(flags: &[&str]) -> Options {
    let mut args: Vec<String> = flags.iter().map(|s| (*s).to_owned()).collect();
    args.push("--color=never".to_owned());
    parse_options(&args).unwrap().options
}

/// Run `f` with fresh buffers; returns its result plus stdout and stderr.
fn capture<T>(f: impl FnOnce(&mut Output<'_>) -> T) -> (T, String, String) {
    let (mut out, mut err) = (Vec::new(), Vec::new());
    let result = {
        let mut output = Output {
            out: &mut out,
            err: &mut err,
            err_is_tty: false,
        };
        f(&mut output)
    };
    (
        result,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

mod synth_command {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn prints_every_class() {
        let (ok, out, err) = capture(|o| synth(program("bank.json"), &options(&[]), o));
        assert!(ok);
        assert_eq!(err, "");
        assert!(out.starts_with("// bank.Money (public final)\n"));
        assert!(out.contains("// cents: primitive\n"));
        assert!(out.contains("// field cents: private -> private final\n"));
        assert!(out.contains("\n// bank.Account (public final)\n"));
        assert!(out.contains("public Account(OrderedMap args) {\n"));
        assert!(out.contains("public Account(int id, String owner, List tags, bank.Money balance) {\n"));
        assert!(out.contains("    this([id: id, owner: owner, tags: tags, balance: balance])\n"));
        assert!(out.contains("public final List getTags() {\n"));
    }

    #[test]
    fn json_output_parses() {
        let (ok, out, err) =
            capture(|o| synth(program("bank.json"), &options(&["--format=json"]), o));
        assert!(ok);
        let doc: serde_json::Value = serde_json::from_str(&out).unwrap();
        let classes = doc["classes"].as_array().unwrap();
        assert_eq!(classes.len(), 2);
        assert_eq!(classes[0]["name"], "bank.Money");
        assert_eq!(classes[0]["failed"], false);
        assert_eq!(classes[1]["patches"][0]["after"], "private final");
        assert!(classes[1]["members"].as_str().unwrap().contains("getBalance"));

        let diagnostics: serde_json::Value = serde_json::from_str(&err).unwrap();
        assert_eq!(diagnostics, serde_json::json!([]));
    }

    #[test]
    fn failed_class_withholds_constructors() {
        let (ok, out, err) = capture(|o| synth(program("broken.json"), &options(&[]), o));
        assert!(!ok);
        assert!(out.contains("// constructors withheld: class has errors\n"));
        assert!(!out.contains("OrderedMap args"));
        assert!(out.contains("public final String getTitle() {\n"));
        assert!(err.ends_with("error: aborting due to 3 previous errors\n"));
    }
}

mod check_command {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn clean_input() {
        let (ok, out, err) = capture(|o| check(program("bank.json"), &options(&[]), o));
        assert!(ok);
        assert_eq!(out, "OK: 2 classes checked\n");
        assert_eq!(err, "");
    }

    #[test]
    fn reports_in_source_order() {
        let (ok, out, err) = capture(|o| check(program("broken.json"), &options(&[]), o));
        assert!(!ok);
        assert_eq!(out, "");

        let codes: Vec<&str> = err
            .lines()
            .filter_map(|line| line.strip_prefix("error["))
            .filter_map(|rest| rest.split(']').next())
            .collect();
        assert_eq!(codes, ["E7003", "E7001", "E7002"]);
    }

    #[test]
    fn json_diagnostics() {
        let (ok, _, err) =
            capture(|o| check(program("broken.json"), &options(&["--format=json"]), o));
        assert!(!ok);
        let diagnostics: serde_json::Value = serde_json::from_str(&err).unwrap();
        let diagnostics = diagnostics.as_array().unwrap();
        assert_eq!(diagnostics.len(), 3);
        assert_eq!(diagnostics[1]["code"], "E7001");
        assert_eq!(diagnostics[1]["labels"][0]["start"], 60);
    }

    #[test]
    fn error_limit() {
        let (ok, _, err) =
            capture(|o| check(program("broken.json"), &options(&["--error-limit=1"]), o));
        assert!(!ok);
        assert_eq!(err.matches("error[").count(), 1);
    }
}

mod construct_command {
    use super::*;
    use pretty_assertions::assert_eq;

    fn run(args: &str) -> (Result<bool, InputError>, String, String) {
        let program = program("bank.json");
        capture(|o| construct(&program, "bank.Account", args, &options(&[]), o))
    }

    #[test]
    fn keyed() {
        let (ok, out, err) = run(r#"{ "id": 7, "owner": "Ann", "tags": ["vip"] }"#);
        assert!(ok.unwrap());
        assert_eq!(out, "Account(id:7, owner:Ann, tags:[vip], balance:null)\n");
        assert_eq!(err, "");
    }

    #[test]
    fn keyed_applies_initializers() {
        let (ok, out, _) = run(r#"{ "id": 1 }"#);
        assert!(ok.unwrap());
        assert_eq!(out, "Account(id:1, owner:null, tags:[], balance:null)\n");
    }

    #[test]
    fn positional() {
        let (ok, out, _) = run(r#"[7, "Ann", ["a", "b"], null]"#);
        assert!(ok.unwrap());
        assert_eq!(out, "Account(7, Ann, [a, b], null)\n");
    }

    #[test]
    fn null_map_keeps_defaults() {
        let (ok, out, _) = run("null");
        assert!(ok.unwrap());
        assert_eq!(out, "Account(0, null, null, null)\n");
    }

    #[test]
    fn short_class_name() {
        let program = program("bank.json");
        let (ok, out, _) = capture(|o| {
            construct(&program, "Money", r#"{ "cents": 250 }"#, &options(&[]), o)
        });
        assert!(ok.unwrap());
        assert_eq!(out, "Money(cents:250, currency:EUR)\n");
    }

    #[test]
    fn unknown_key() {
        let (ok, out, err) = run(r#"{ "id": 1, "nickname": "x" }"#);
        assert!(!ok.unwrap());
        assert_eq!(out, "");
        assert!(err.starts_with(
            "error[E6002]: No such property: nickname for class: bank.Account\n"
        ));
    }

    #[test]
    fn mistyped_value_is_rejected() {
        let (ok, out, err) = run(r#"{ "id": 1, "owner": [1] }"#);
        assert!(!ok.unwrap());
        assert_eq!(out, "");
        assert!(err.starts_with(
            "error[E6006]: malformed value in generated body: expected String for `bank.Account.owner`, got ArrayList\n"
        ));
    }

    #[test]
    fn arity() {
        let (ok, _, err) = run("[1]");
        assert!(!ok.unwrap());
        assert!(err.starts_with("error[E6004]: "));
    }

    #[test]
    fn bad_arguments() {
        let (result, _, _) = run("42");
        assert!(matches!(result, Err(InputError::InvalidLiteral { .. })));
        let (result, _, _) = run("{ nope");
        assert!(matches!(result, Err(InputError::Json(_))));
    }

    #[test]
    fn unknown_class() {
        let program = program("bank.json");
        let (result, _, _) =
            capture(|o| construct(&program, "Ledger", "{}", &options(&[]), o));
        assert_eq!(result.unwrap_err().to_string(), "no class named `Ledger` in the input");
    }

    #[test]
    fn rejected_class_reports_compile_errors() {
        let program = program("broken.json");
        let (ok, out, err) =
            capture(|o| construct(&program, "ui.Panel", "{}", &options(&[]), o));
        assert!(!ok.unwrap());
        assert_eq!(out, "");
        assert!(err.contains("error[E7001]"));
    }

    #[test]
    fn json_format() {
        let program = program("bank.json");
        let (ok, out, _) = capture(|o| {
            construct(&program, "bank.Money", "[5, null]", &options(&["--format=json"]), o)
        });
        assert!(ok.unwrap());
        let doc: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(doc["class"], "bank.Money");
        assert_eq!(doc["instance"], "Money(5, EUR)");
    }
}

#[test]
fn explain_known_and_unknown_codes() {
    let (ok, out, _) = capture(|o| explain("e7001", o));
    assert!(ok);
    assert!(out.contains("E7001"));

    let (ok, out, err) = capture(|o| explain("E9999", o));
    assert!(!ok);
    assert_eq!(out, "");
    assert!(err.starts_with("Unknown error code: E9999\n"));
}

mod binary {
    use super::*;
    use pretty_assertions::assert_eq;

    fn frostc(args: &[&str]) -> std::process::Output {
        Command::new(env!("CARGO_BIN_EXE_frostc"))
            .args(args)
            .env_remove("RUST_LOG")
            .output()
            .unwrap()
    }

    #[test]
    fn exit_codes() {
        assert_eq!(frostc(&["check", &fixture("bank.json")]).status.code(), Some(0));
        assert_eq!(
            frostc(&["check", &fixture("broken.json"), "--color=never"]).status.code(),
            Some(1)
        );
        assert_eq!(frostc(&["check"]).status.code(), Some(2));
        assert_eq!(frostc(&["frobnicate"]).status.code(), Some(2));
        assert_eq!(frostc(&["check", "--format=yaml", "x.json"]).status.code(), Some(2));
    }

    #[test]
    fn missing_file() {
        let output = frostc(&["synth", "/nonexistent/classes.json"]);
        assert_eq!(output.status.code(), Some(1));
        let stderr = String::from_utf8(output.stderr).unwrap();
        assert!(stderr.starts_with("error: cannot read `/nonexistent/classes.json`"));
    }

    #[test]
    fn construct_prints_instance() {
        let output = frostc(&[
            "construct",
            &fixture("bank.json"),
            "Money",
            r#"{"cents": 99}"#,
        ]);
        assert_eq!(output.status.code(), Some(0));
        assert_eq!(String::from_utf8(output.stdout).unwrap(), "Money(cents:99, currency:EUR)\n");
    }

    #[test]
    fn usage_without_arguments() {
        let output = frostc(&[]);
        assert_eq!(output.status.code(), Some(0));
        assert!(String::from_utf8(output.stdout).unwrap().starts_with("Frost - "));
    }
}
