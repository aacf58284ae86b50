//! Pestmap - crop-pest detection ledger keyed by district.
//!
//! Detector results are classified into a fixed set of detection types,
//! filed under a district (by name or by the nearest district to a point)
//! and stored in an append-only `SQLite` ledger that feeds a map.

#![warn(missing_docs)]
#![allow(clippy::print_stdout)]

pub mod classifier;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod ledger;
pub mod output;
pub mod recording;
pub mod registry;
pub mod resolver;
pub mod storage;

use classifier::ClassificationOutcome;
use cli::{Command, ConfigAction, DistrictsAction, GlobalArgs, Parsed, RecordArgs};
use config::{Config, OutputFormat};
use output::envelope::{EventType, JsonEnvelope, ResultType};
use output::{DistrictRow, ErrorPayload, FeedRow, write_envelope, write_rows};
use recording::RecordingService;
use registry::SeedOutcome;
use storage::Database;
use tracing::{debug, info};

pub use error::{Error, Result};

/// Main entry point for the pestmap CLI.
pub fn run() -> Result<()> {
    let cli = match cli::parse_args(std::env::args_os().collect()) {
        Parsed::Cli(cli) => *cli,
        Parsed::Malformed { error, format } => return report(Err(error), format),
    };

    init_logging(cli.global.verbose, cli.global.quiet);

    let format = cli.global.format;
    let result = load_settings(&cli.global)
        .and_then(|config| handle_command(cli.command, &cli.global, &config));

    report(result, format)
}

/// Mirror a failure as a JSON error envelope on stdout when JSON was asked for.
fn report(result: Result<()>, format: Option<OutputFormat>) -> Result<()> {
    if let Err(ref err) = result
        && format == Some(OutputFormat::Json)
    {
        let envelope = JsonEnvelope::new(EventType::Error, ErrorPayload::from(err));
        write_envelope(std::io::stdout().lock(), &envelope)?;
    }

    result
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_settings(global: &GlobalArgs) -> Result<Config> {
    let mut config = config::load_config(global.config.as_deref())?;
    if let Some(format) = global.format {
        config.output.format = format;
    }
    config::validate_config(&config)?;
    Ok(config)
}

fn open_service(global: &GlobalArgs, config: &Config) -> Result<RecordingService> {
    let path = config::resolve_database_path(global.database.as_deref(), config)?;
    let db = Database::open(&path, config.storage.busy_timeout())?;
    Ok(RecordingService::new(db))
}

fn handle_command(command: Command, global: &GlobalArgs, config: &Config) -> Result<()> {
    let service = || open_service(global, config);
    let format = config.output.format;
    let stdout = std::io::stdout();

    match command {
        Command::Config { action } => handle_config_command(action, global, config),
        Command::Init => handle_init(&service()?, config),
        Command::Districts {
            action: DistrictsAction::List,
        } => {
            let rows: Vec<DistrictRow> = service()?
                .list_districts()?
                .iter()
                .map(DistrictRow::from)
                .collect();
            write_rows(stdout, format, ResultType::Districts, &rows)
        }
        Command::Districts {
            action: DistrictsAction::Add { name, lat, lon },
        } => {
            let district = service()?.add_district(&name, lat, lon)?;
            write_rows(
                stdout,
                format,
                ResultType::Districts,
                &[DistrictRow::from(&district)],
            )
        }
        Command::Nearest { lat, lon } => {
            let district = service()?.nearest_district(lat, lon)?;
            write_rows(
                stdout,
                format,
                ResultType::Nearest,
                &[DistrictRow::from(&district)],
            )
        }
        Command::Record(args) => {
            let outcome = record_outcome(&args)?;
            let location = record_location(args)?;
            let service = service()?;
            let recorded = match location {
                Location::District(name) => service.record_by_district_name(&outcome, &name)?,
                Location::Point { lat, lon } => service.record_by_coordinates(&outcome, lat, lon)?,
            };
            write_rows(
                stdout,
                format,
                ResultType::Recorded,
                &[FeedRow::from(&recorded)],
            )
        }
        Command::Detections { district } => {
            let service = service()?;
            let detections = match district {
                Some(name) => service.district_history(&name)?,
                None => service.list_detections()?,
            };
            let rows: Vec<FeedRow> = detections.iter().map(FeedRow::from).collect();
            write_rows(stdout, format, ResultType::Detections, &rows)
        }
        Command::Map => {
            let rows: Vec<FeedRow> = service()?
                .latest_per_district()?
                .iter()
                .map(FeedRow::from)
                .collect();
            write_rows(stdout, format, ResultType::Map, &rows)
        }
    }
}

fn handle_init(service: &RecordingService, config: &Config) -> Result<()> {
    let source = config.seed.source();
    debug!("Seeding district registry from {source}");
    let entries = source.entries()?;

    match service.seed_districts(&entries)? {
        SeedOutcome::Inserted(count) => {
            info!("Seeded {count} districts from {source}");
            println!("Seeded {count} districts from {source}");
        }
        SeedOutcome::AlreadyPopulated(count) => {
            println!("Registry already holds {count} districts; nothing seeded");
        }
    }
    Ok(())
}

fn record_outcome(args: &RecordArgs) -> Result<ClassificationOutcome> {
    match (&args.result, &args.result_json) {
        (Some(label), None) => Ok(ClassificationOutcome::success(
            label.as_str(),
            args.confidence,
        )),
        (None, Some(json)) => ClassificationOutcome::from_json(json),
        _ => Err(Error::malformed(
            "exactly one of --result or --result-json is required",
        )),
    }
}

enum Location {
    District(String),
    Point { lat: f64, lon: f64 },
}

fn record_location(args: RecordArgs) -> Result<Location> {
    match (args.district, args.lat, args.lon) {
        (Some(name), None, None) => Ok(Location::District(name)),
        (None, Some(lat), Some(lon)) => Ok(Location::Point { lat, lon }),
        _ => Err(Error::malformed(
            "either --district or both --lat and --lon are required",
        )),
    }
}

fn handle_config_command(action: ConfigAction, global: &GlobalArgs, config: &Config) -> Result<()> {
    let path = config::config_location(global.config.as_deref())?;

    match action {
        ConfigAction::Init => {
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                config::save_config(&Config::default(), &path)?;
                println!("Created configuration file: {}", path.display());
                println!("\nNext steps:");
                println!("  pestmap init");
            }
            Ok(())
        }
        ConfigAction::Show => {
            let contents = toml::to_string_pretty(config)
                .map_err(|source| Error::ConfigSerialize { source })?;
            print!("{contents}");
            Ok(())
        }
        ConfigAction::Path => {
            println!("{}", path.display());
            Ok(())
        }
    }
}
