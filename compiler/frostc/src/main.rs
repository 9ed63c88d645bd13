//! Frost CLI
//!
//! Runs the immutability transform over classes described in a JSON file.

use std::io::{IsTerminal, Write};

use frostc::commands::{check, construct, explain, synth, Output};
use frostc::input::{read_program, Program};
use frostc::options::{parse_options, ParsedArgs};

fn main() {
    frostc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];
    let ParsedArgs {
        options,
        positional,
    } = match parse_options(&args[2..]) {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("error: {message}");
            std::process::exit(2);
        }
    };

    let mut stdout = std::io::stdout().lock();
    let mut stderr = std::io::stderr();
    let err_is_tty = stderr.is_terminal();
    let mut output = Output {
        out: &mut stdout,
        err: &mut stderr,
        err_is_tty,
    };

    let ok = match command.as_str() {
        "synth" | "check" => {
            let [path] = positional.as_slice() else {
                eprintln!("Usage: frostc {command} <classes.json> [options]");
                std::process::exit(2);
            };
            let program = load_or_exit(path);
            if command == "synth" {
                synth(program, &options, &mut output)
            } else {
                check(program, &options, &mut output)
            }
        }
        "construct" => {
            let [path, class, arguments] = positional.as_slice() else {
                eprintln!("Usage: frostc construct <classes.json> <Class> <args-json> [options]");
                eprintln!();
                eprintln!("  <args-json> is an object for the keyed constructor, an array for");
                eprintln!("  the positional constructor, or null.");
                std::process::exit(2);
            };
            let program = load_or_exit(path);
            match construct(&program, class, arguments, &options, &mut output) {
                Ok(ok) => ok,
                Err(err) => {
                    eprintln!("error: {err}");
                    false
                }
            }
        }
        "explain" | "--explain" => {
            let [code] = positional.as_slice() else {
                eprintln!("Usage: frostc explain <error-code>");
                eprintln!("Example: frostc explain E7001");
                std::process::exit(2);
            };
            explain(code, &mut output)
        }
        "help" | "--help" | "-h" => {
            print_usage();
            true
        }
        "version" | "--version" | "-V" => {
            println!("frostc {}", env!("CARGO_PKG_VERSION"));
            true
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(2);
        }
    };

    let _ = stdout.flush();
    if !ok {
        std::process::exit(1);
    }
}

fn load_or_exit(path: &str) -> Program {
    match read_program(path) {
        Ok(program) => program,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Frost - immutable value class synthesis");
    println!();
    println!("Usage: frostc <command> [options]");
    println!();
    println!("Commands:");
    println!("  synth <file.json>                 Print synthesized members for every class");
    println!("  check <file.json>                 Validate classes, report errors only");
    println!("  construct <file.json> <C> <args>  Build an instance of class C");
    println!("  explain <code>                    Explain an error code");
    println!("  help                              Show this help message");
    println!("  version                           Show version information");
    println!();
    println!("Options:");
    println!("  --format=text|json        Output format (default: text)");
    println!("  --color=auto|always|never Colored diagnostics (default: auto)");
    println!("  --error-limit=N           Stop reporting after N errors, 0 for no limit");
    println!();
    println!("Use `-` as the file to read from standard input.");
    println!("Set RUST_LOG (for example RUST_LOG=frost_transform=debug) for tracing.");
}
