//! CLI argument parsing.

mod args;
mod parse;
mod validators;

pub use args::{Cli, Command, ConfigAction, DistrictsAction, GlobalArgs, RecordArgs};
pub use parse::{Parsed, parse_args};
pub use validators::{parse_coordinate, parse_finite_float, parse_percent};
