//! JSON Emitter
//!
//! Machine-readable diagnostic output as a JSON array.

use std::io::Write;

use crate::Diagnostic;

use super::{escape_json, trailing_comma, DiagnosticEmitter};

pub struct JsonEmitter<W: Write> {
    writer: W,
    first: bool,
}

impl<W: Write> JsonEmitter<W> {
    pub fn new(writer: W) -> Self {
        JsonEmitter {
            writer,
            first: true,
        }
    }

    /// Begin the JSON array output.
    pub fn begin(&mut self) {
        let _ = writeln!(self.writer, "[");
    }

    /// End the JSON array output.
    pub fn end(&mut self) {
        let _ = writeln!(self.writer, "\n]");
    }
}

impl<W: Write> DiagnosticEmitter for JsonEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        if !self.first {
            let _ = writeln!(self.writer, ",");
        }
        self.first = false;

        let _ = writeln!(self.writer, "  {{");
        let _ = writeln!(self.writer, "    \"code\": \"{}\",", diagnostic.code);
        let _ = writeln!(self.writer, "    \"severity\": \"{}\",", diagnostic.severity);
        let _ = writeln!(
            self.writer,
            "    \"message\": \"{}\",",
            escape_json(&diagnostic.message)
        );

        let _ = writeln!(self.writer, "    \"labels\": [");
        for (i, label) in diagnostic.labels.iter().enumerate() {
            let comma = trailing_comma(i, diagnostic.labels.len());
            let _ = writeln!(
                self.writer,
                "      {{ \"start\": {}, \"end\": {}, \"message\": \"{}\", \"primary\": {} }}{comma}",
                label.span.start,
                label.span.end,
                escape_json(&label.message),
                label.is_primary
            );
        }
        let _ = writeln!(self.writer, "    ],");

        let _ = writeln!(self.writer, "    \"notes\": [");
        for (i, note) in diagnostic.notes.iter().enumerate() {
            let comma = trailing_comma(i, diagnostic.notes.len());
            let _ = writeln!(self.writer, "      \"{}\"{comma}", escape_json(note));
        }
        let _ = writeln!(self.writer, "    ],");

        let _ = writeln!(self.writer, "    \"suggestions\": [");
        for (i, suggestion) in diagnostic.suggestions.iter().enumerate() {
            let comma = trailing_comma(i, diagnostic.suggestions.len());
            let _ = writeln!(self.writer, "      \"{}\"{comma}", escape_json(suggestion));
        }
        let _ = writeln!(self.writer, "    ]");

        let _ = write!(self.writer, "  }}");
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, _error_count: usize, _warning_count: usize) {
        // The array is the summary.
    }
}
