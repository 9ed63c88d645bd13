//! The `synth` command: print the members synthesized for every class.

use std::io::Write;

use frost_ir::pretty::modifiers_prefix;
use serde_json::json;

use super::{transform_all, Output, Reporter, Transformed};
use crate::input::Program;
use crate::options::{Options, OutputFormat};

/// Transform every class and print the result. Returns `false` when any
/// class was rejected.
pub fn synth(program: Program, options: &Options, output: &mut Output<'_>) -> bool {
    let result = transform_all(program, options);

    match options.format {
        OutputFormat::Text => write_text(&result, &mut *output.out),
        OutputFormat::Json => write_json(&result, &mut *output.out),
    }

    Reporter::new(options, &mut *output.err, output.err_is_tty).report(
        &result.diagnostics,
        result.error_count,
        result.warning_count,
    );
    result.error_count == 0
}

fn write_text(result: &Transformed, out: &mut dyn Write) {
    for (i, class) in result.classes.iter().enumerate() {
        if i > 0 {
            let _ = writeln!(out);
        }
        let _ = writeln!(out, "// {} ({})", class.name, modifiers_prefix(class.modifiers));
        if class.failed.is_some() {
            let _ = writeln!(out, "// constructors withheld: class has errors");
        }
        for prop in &class.properties {
            let _ = writeln!(out, "// {}: {}", prop.decl.name, prop.strategy);
        }
        for patch in &class.field_patches {
            let _ = writeln!(
                out,
                "// field {}: {} -> {}",
                patch.name,
                modifiers_prefix(patch.before),
                modifiers_prefix(patch.after)
            );
        }
        let _ = writeln!(out);
        let _ = write!(out, "{}", class.render(&result.pool));
    }
}

fn write_json(result: &Transformed, out: &mut dyn Write) {
    let classes: Vec<_> = result
        .classes
        .iter()
        .map(|class| {
            json!({
                "name": class.name,
                "modifiers": modifiers_prefix(class.modifiers),
                "failed": class.failed.is_some(),
                "properties": class
                    .properties
                    .iter()
                    .map(|p| json!({ "name": p.decl.name, "strategy": p.strategy.to_string() }))
                    .collect::<Vec<_>>(),
                "patches": class
                    .field_patches
                    .iter()
                    .map(|p| json!({
                        "name": p.name,
                        "before": modifiers_prefix(p.before),
                        "after": modifiers_prefix(p.after),
                    }))
                    .collect::<Vec<_>>(),
                "members": class.render(&result.pool),
            })
        })
        .collect();

    let _ = serde_json::to_writer_pretty(&mut *out, &json!({ "classes": classes }));
    let _ = writeln!(out);
}
