//! CLI argument definitions.

use crate::cli::validators::{parse_coordinate, parse_percent};
use crate::config::OutputFormat;
use clap::{ArgGroup, Args, Parser, Subcommand};
use std::path::PathBuf;

/// Map crop-pest detections onto districts.
#[derive(Debug, Parser)]
#[command(name = "pestmap")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Options shared by every subcommand.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Configuration file (default: platform config dir).
    #[arg(long, global = true, env = "PESTMAP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Detection database (overrides `storage.database`).
    #[arg(long, global = true, env = "PESTMAP_DATABASE")]
    pub database: Option<PathBuf>,

    /// Output format (table, json, csv).
    #[arg(short, long, global = true, env = "PESTMAP_FORMAT")]
    pub format: Option<OutputFormat>,

    /// Only log warnings and errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create the database and seed the district registry.
    Init,
    /// Manage the district registry.
    Districts {
        /// Districts action to perform.
        #[command(subcommand)]
        action: DistrictsAction,
    },
    /// Find the district nearest to a point.
    Nearest {
        /// Latitude in decimal degrees.
        #[arg(long, value_parser = parse_coordinate, allow_negative_numbers = true)]
        lat: f64,
        /// Longitude in decimal degrees.
        #[arg(long, value_parser = parse_coordinate, allow_negative_numbers = true)]
        lon: f64,
    },
    /// Record a detector result.
    Record(RecordArgs),
    /// List recorded detections, newest first.
    Detections {
        /// Only show detections of this district.
        #[arg(long)]
        district: Option<String>,
    },
    /// Show the latest detection of every district.
    Map,
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Districts subcommand actions.
#[derive(Debug, Subcommand)]
pub enum DistrictsAction {
    /// List all districts.
    List,
    /// Add a district.
    Add {
        /// Unique district name.
        name: String,
        /// Latitude in decimal degrees.
        #[arg(long, value_parser = parse_coordinate, allow_negative_numbers = true)]
        lat: f64,
        /// Longitude in decimal degrees.
        #[arg(long, value_parser = parse_coordinate, allow_negative_numbers = true)]
        lon: f64,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments for the record command.
///
/// Exactly one result source and one location source must be given.
#[derive(Debug, Args)]
#[command(group(ArgGroup::new("outcome").required(true).args(["result", "result_json"])))]
#[command(group(ArgGroup::new("location").required(true).args(["district", "lat"])))]
pub struct RecordArgs {
    /// Detector label (e.g. "Fall Armyworm Frass").
    #[arg(long)]
    pub result: Option<String>,

    /// Detector confidence as a percentage (0-100).
    #[arg(long, value_parser = parse_percent, requires = "result")]
    pub confidence: Option<f64>,

    /// Raw detector response: `{"result": ..., "confidence": ...}` or `{"error": ...}`.
    #[arg(long)]
    pub result_json: Option<String>,

    /// File the detection under this district.
    #[arg(long)]
    pub district: Option<String>,

    /// Latitude of the capture point.
    #[arg(long, value_parser = parse_coordinate, allow_negative_numbers = true, requires = "lon")]
    pub lat: Option<f64>,

    /// Longitude of the capture point.
    #[arg(long, value_parser = parse_coordinate, allow_negative_numbers = true, requires = "lat")]
    pub lon: Option<f64>,
}
