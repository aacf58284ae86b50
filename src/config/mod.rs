//! Configuration loading and management.

mod file;
mod paths;
mod types;
mod validate;

pub use file::{config_location, load_config, load_config_file, save_config};
pub use paths::{config_dir, config_file_path, data_dir, default_database_path};
pub use types::{Config, OutputConfig, OutputFormat, SeedConfig, StorageConfig};
pub use validate::{resolve_database_path, validate_config};
