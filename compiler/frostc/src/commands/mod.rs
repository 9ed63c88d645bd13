//! Command handlers for the frostc CLI.
//!
//! Each handler writes results to `Output::out` and diagnostics to
//! `Output::err`, and reports success as its return value so `main` can
//! choose the exit code.

use std::io::Write;

use frost_diagnostic::emitter::{DiagnosticEmitter, JsonEmitter, TerminalEmitter};
use frost_diagnostic::{Diagnostic, DiagnosticQueue};
use frost_ir::TypePool;
use frost_transform::{transform_class, ImmutableClass};

use crate::input::Program;
use crate::options::{Options, OutputFormat};

mod check;
mod construct;
mod explain;
mod synth;

pub use check::check;
pub use construct::construct;
pub use explain::explain;
pub use synth::synth;

/// Where a command writes.
pub struct Output<'a> {
    pub out: &'a mut dyn Write,
    pub err: &'a mut dyn Write,
    /// Whether `err` is a terminal, for `--color=auto`.
    pub err_is_tty: bool,
}

/// Every class of a program after the transform.
pub(crate) struct Transformed {
    pub pool: TypePool,
    pub classes: Vec<ImmutableClass>,
    pub diagnostics: Vec<Diagnostic>,
    pub error_count: usize,
    pub warning_count: usize,
}

pub(crate) fn transform_all(program: Program, options: &Options) -> Transformed {
    let mut queue = DiagnosticQueue::with_config(options.diagnostics.clone());
    let classes: Vec<_> = program
        .classes
        .into_iter()
        .map(|decl| transform_class(&program.pool, decl, &mut queue))
        .collect();

    let error_count = queue.error_count();
    let warning_count = queue.warning_count();
    if queue.suppressed_count() > 0 {
        tracing::debug!(suppressed = queue.suppressed_count(), "error limit reached");
    }
    Transformed {
        pool: program.pool,
        classes,
        diagnostics: queue.flush(),
        error_count,
        warning_count,
    }
}

/// Diagnostic sink selected by `--format`.
pub(crate) enum Reporter<W: Write> {
    Text(TerminalEmitter<W>),
    Json(JsonEmitter<W>),
}

impl<W: Write> Reporter<W> {
    pub fn new(options: &Options, writer: W, is_tty: bool) -> Self {
        match options.format {
            OutputFormat::Text => {
                Reporter::Text(TerminalEmitter::with_color_mode(writer, options.color, is_tty))
            }
            OutputFormat::Json => Reporter::Json(JsonEmitter::new(writer)),
        }
    }

    pub fn report(&mut self, diagnostics: &[Diagnostic], error_count: usize, warning_count: usize) {
        match self {
            Reporter::Text(emitter) => {
                emitter.emit_all(diagnostics);
                if error_count > 0 || warning_count > 0 {
                    emitter.emit_summary(error_count, warning_count);
                }
                emitter.flush();
            }
            Reporter::Json(emitter) => {
                emitter.begin();
                emitter.emit_all(diagnostics);
                emitter.end();
                emitter.flush();
            }
        }
    }
}
