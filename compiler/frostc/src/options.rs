//! Command-line options shared by every subcommand.

use std::str::FromStr;

use frost_diagnostic::emitter::ColorMode;
use frost_diagnostic::DiagnosticConfig;

/// How results and diagnostics are printed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown format `{other}` (expected text or json)")),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Options {
    pub format: OutputFormat,
    pub color: ColorMode,
    pub diagnostics: DiagnosticConfig,
}

/// Options plus the positional arguments left after removing them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    pub options: Options,
    pub positional: Vec<String>,
}

/// Split `args` into recognized `--flag=value` options and positionals.
///
/// A lone `-` is positional. Any other argument starting with `-` must be a
/// known option.
pub fn parse_options(args: &[String]) -> Result<ParsedArgs, String> {
    let mut parsed = ParsedArgs::default();

    for arg in args {
        if let Some(format) = arg.strip_prefix("--format=") {
            parsed.options.format = format.parse()?;
        } else if let Some(color) = arg.strip_prefix("--color=") {
            parsed.options.color = color.parse()?;
        } else if let Some(limit) = arg.strip_prefix("--error-limit=") {
            parsed.options.diagnostics.error_limit = limit
                .parse()
                .map_err(|_| format!("invalid error limit `{limit}` (expected a number)"))?;
        } else if arg.starts_with('-') && arg != "-" {
            return Err(format!("unknown option `{arg}`"));
        } else {
            parsed.positional.push(arg.clone());
        }
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests;
