//! Argument parsing with structured errors for bad values.

use crate::cli::Cli;
use crate::config::OutputFormat;
use crate::error::Error;
use clap::Parser;
use clap::error::{ContextKind, ContextValue, ErrorKind};
use std::ffi::OsString;

/// Environment variable that selects the output format.
const FORMAT_ENV: &str = "PESTMAP_FORMAT";

/// Outcome of parsing the command line.
#[derive(Debug)]
pub enum Parsed {
    /// Arguments parsed.
    Cli(Box<Cli>),
    /// An argument value was rejected; report it like any other failure.
    Malformed {
        /// The rejection as a domain error.
        error: Error,
        /// Output format asked for on the command line, if recognizable.
        format: Option<OutputFormat>,
    },
}

/// Parse `args`.
///
/// Rejected values (`--lat abc`, `--confidence NaN`) become
/// [`Error::MalformedInput`]. Help, version and usage errors exit through
/// clap as usual.
pub fn parse_args(args: Vec<OsString>) -> Parsed {
    match Cli::try_parse_from(&args) {
        Ok(cli) => Parsed::Cli(Box::new(cli)),
        Err(err) => match malformed_value(&err) {
            Some(error) => Parsed::Malformed {
                error,
                format: requested_format(&args),
            },
            None => err.exit(),
        },
    }
}

/// Convert a clap value error into [`Error::MalformedInput`].
fn malformed_value(err: &clap::Error) -> Option<Error> {
    if !matches!(err.kind(), ErrorKind::ValueValidation | ErrorKind::InvalidValue) {
        return None;
    }

    let value = context(err, ContextKind::InvalidValue);
    let arg = context(err, ContextKind::InvalidArg);
    let message = match std::error::Error::source(err) {
        Some(reason) => format!("invalid value '{value}' for '{arg}': {reason}"),
        None => format!("invalid value '{value}' for '{arg}'"),
    };
    Some(Error::malformed(message))
}

fn context(err: &clap::Error, kind: ContextKind) -> &str {
    match err.get(kind) {
        Some(ContextValue::String(s)) => s.as_str(),
        _ => "?",
    }
}

/// Best-effort read of `--format` from arguments clap refused.
fn requested_format(args: &[OsString]) -> Option<OutputFormat> {
    let mut iter = args.iter().filter_map(|arg| arg.to_str());
    while let Some(arg) = iter.next() {
        let value = match arg {
            "--format" | "-f" => iter.next(),
            _ => arg.strip_prefix("--format="),
        };
        if let Some(format) = value.and_then(|v| v.parse().ok()) {
            return Some(format);
        }
    }
    std::env::var(FORMAT_ENV).ok().and_then(|v| v.parse().ok())
}
