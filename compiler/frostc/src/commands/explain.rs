//! The `explain` command: display documentation for an error code.


use frost_diagnostic::{ErrorCode, ErrorDocs};

use super::Output;

pub fn explain(code_str: &str, output: &mut Output<'_>) -> bool {
    let Ok(code) = code_str.parse::<ErrorCode>() else {
        let _ = writeln!(output.err, "Unknown error code: {code_str}");
        let _ = writeln!(output.err);
        let _ = writeln!(
            output.err,
            "Codes have the format EXXXX where X is a digit, for example E6001 or E7001."
        );
        return false;
    };

    if let Some(doc) = ErrorDocs::get(code) {
        let _ = writeln!(output.out, "{doc}");
        true
    } else {
        let _ = writeln!(output.err, "No documentation available for {code}");
        false
    }
}
