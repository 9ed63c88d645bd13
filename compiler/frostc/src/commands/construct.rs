//! The `construct` command: build one instance through a synthesized
//! constructor.
//!
//! The argument document picks the constructor: an object calls the keyed
//! constructor, an array calls the positional one and `null` passes a null
//! map to the keyed one.


use frost_diagnostic::DiagnosticQueue;
use frost_eval::{ClassRuntime, Value};
use frost_transform::transform_class;
use serde_json::{json, Value as Json};

use super::{Output, Reporter};
use crate::input::{runtime_value, InputError, Program};
use crate::options::{Options, OutputFormat};

pub fn construct(
    program: &Program,
    class_name: &str,
    args: &str,
    options: &Options,
    output: &mut Output<'_>,
) -> Result<bool, InputError> {
    let decl = program
        .class(class_name)
        .cloned()
        .ok_or_else(|| InputError::UnknownClass(class_name.to_owned()))?;
    let args: Json = serde_json::from_str(args)?;

    let mut reporter = Reporter::new(options, &mut *output.err, output.err_is_tty);

    let mut queue = DiagnosticQueue::with_config(options.diagnostics.clone());
    let class = transform_class(&program.pool, decl, &mut queue);
    let (errors, warnings) = (queue.error_count(), queue.warning_count());
    if errors > 0 {
        reporter.report(&queue.flush(), errors, warnings);
        return Ok(false);
    }

    let runtime = ClassRuntime::new(&program.pool, class);
    let result = match &args {
        Json::Null => runtime.construct_keyed(None),
        Json::Object(map) => {
            let entries = map
                .iter()
                .map(|(k, v)| Ok((k.clone(), runtime_value(v)?)))
                .collect::<Result<Vec<_>, InputError>>()?;
            runtime.construct_keyed(Some(Value::map(entries)))
        }
        Json::Array(items) => {
            let items = items
                .iter()
                .map(runtime_value)
                .collect::<Result<Vec<_>, _>>()?;
            runtime.construct_positional(items)
        }
        other => {
            return Err(InputError::InvalidLiteral {
                value: other.to_string(),
                reason: "constructor arguments must be an object, an array or null",
            })
        }
    };

    match result {
        Ok(instance) => {
            match options.format {
                OutputFormat::Text => {
                    let _ = writeln!(output.out, "{instance}");
                }
                OutputFormat::Json => {
                    let doc = json!({ "class": runtime.name(), "instance": instance.to_string() });
                    let _ = writeln!(output.out, "{doc}");
                }
            }
            Ok(true)
        }
        Err(err) => {
            tracing::debug!(class = runtime.name(), error = %err, "construction failed");
            reporter.report(&[err.to_diagnostic()], 1, 0);
            Ok(false)
        }
    }
}
