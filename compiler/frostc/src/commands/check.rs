//! The `check` command: validate classes without printing members.


use super::{transform_all, Output, Reporter};
use crate::input::Program;
use crate::options::{Options, OutputFormat};

pub fn check(program: Program, options: &Options, output: &mut Output<'_>) -> bool {
    let result = transform_all(program, options);

    Reporter::new(options, &mut *output.err, output.err_is_tty).report(
        &result.diagnostics,
        result.error_count,
        result.warning_count,
    );

    let ok = result.error_count == 0;
    if ok && options.format == OutputFormat::Text {
        let count = result.classes.len();
        let _ = writeln!(
            output.out,
            "OK: {count} class{} checked",
            if count == 1 { "" } else { "es" }
        );
    }
    ok
}
