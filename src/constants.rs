//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "pestmap";

/// Configuration file name inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default database file name inside the data directory.
pub const DEFAULT_DATABASE_FILE: &str = "detections.db";

/// Default `SQLite` busy timeout in milliseconds.
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Confidence value bounds.
pub mod confidence {
    /// Collaborators report confidence as a percentage; stored values are
    /// divided by this.
    pub const PERCENT_SCALE: f64 = 100.0;
    /// Decimal places for confidence formatting.
    pub const DECIMAL_PLACES: usize = 4;
}

/// Coordinate formatting.
pub mod coordinates {
    /// Decimal places for latitude/longitude in human-readable output.
    pub const DECIMAL_PLACES: usize = 4;
}

/// Structured output constants.
pub mod envelope {
    /// Current version of the JSON envelope layout.
    pub const SPEC_VERSION: &str = "1.0";
}
