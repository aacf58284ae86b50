//! Configuration validation and resolution.

use crate::config::Config;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    if config.storage.busy_timeout_ms == 0 {
        return Err(Error::ConfigValidation {
            message: "storage.busy_timeout_ms must be at least 1".to_string(),
        });
    }

    if let Some(ref seed_file) = config.seed.file
        && !seed_file.exists()
    {
        return Err(Error::ConfigValidation {
            message: format!("seed.file does not exist: {}", seed_file.display()),
        });
    }

    Ok(())
}

/// Pick the database path: CLI override, then config, then platform default.
pub fn resolve_database_path(cli_override: Option<&Path>, config: &Config) -> Result<PathBuf> {
    if let Some(path) = cli_override.or(config.storage.database.as_deref()) {
        return Ok(path.to_path_buf());
    }
    super::default_database_path()
}
