//! Platform-specific configuration and data paths.

use crate::constants::{APP_NAME, CONFIG_FILE_NAME, DEFAULT_DATABASE_FILE};
use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", APP_NAME)
}

/// Get the configuration directory for the current platform.
///
/// - Linux: `~/.config/pestmap/`
/// - macOS: `~/Library/Application Support/pestmap/`
/// - Windows: `%APPDATA%\pestmap\config\`
pub fn config_dir() -> Result<PathBuf> {
    project_dirs()
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or(Error::ConfigDirNotFound)
}

/// Get the full path to the config file.
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Get the data directory for the current platform.
///
/// - Linux: `~/.local/share/pestmap/`
/// - macOS: `~/Library/Application Support/pestmap/`
/// - Windows: `%APPDATA%\pestmap\data\`
pub fn data_dir() -> Result<PathBuf> {
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(Error::DataDirNotFound)
}

/// Database location used when neither the CLI nor the config names one.
pub fn default_database_path() -> Result<PathBuf> {
    Ok(data_dir()?.join(DEFAULT_DATABASE_FILE))
}
