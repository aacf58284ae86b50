//! Error types for pestmap.

/// Result type alias for pestmap operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Broad classification of an [`Error`], used by callers to decide whether
/// to correct their input, retry, or fix their setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The request itself is wrong (unknown district, duplicate name, bad input).
    Domain,
    /// The storage layer failed.
    Storage,
    /// Configuration could not be loaded, saved, or validated.
    Config,
    /// Filesystem I/O failed outside of storage.
    Io,
    /// Unexpected internal failure.
    Internal,
}

/// Top-level error type for pestmap.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A district with this name already exists.
    #[error("district '{name}' already exists")]
    DuplicateName {
        /// The conflicting district name.
        name: String,
    },

    /// Referenced district does not exist.
    #[error("district '{district}' not found")]
    UnknownDistrict {
        /// Name or id of the missing district.
        district: String,
    },

    /// The registry holds no districts to resolve against.
    #[error("no districts available (has the registry been seeded?)")]
    NoDistrictsAvailable,

    /// Input had the wrong type or shape.
    #[error("malformed input: {message}")]
    MalformedInput {
        /// Description of what was wrong.
        message: String,
    },

    /// The classification collaborator reported a failure instead of a label.
    #[error("classification failed: {reason}")]
    ClassificationFailed {
        /// Reason reported by the collaborator.
        reason: String,
    },

    /// Storage operation failed.
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Data directory could not be determined.
    #[error("could not determine data directory for this platform")]
    DataDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Failed to read a district seed file.
    #[error("failed to read seed file '{path}'")]
    SeedFileRead {
        /// Path to the seed file.
        path: std::path::PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// Failed to serialize output.
    #[error("failed to serialize output")]
    OutputSerialize {
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },

    /// Failed to write CSV output.
    #[error("failed to write CSV output")]
    CsvWrite {
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// Internal error (for unexpected failures).
    #[error("internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl Error {
    /// Classify this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateName { .. }
            | Self::UnknownDistrict { .. }
            | Self::NoDistrictsAvailable
            | Self::MalformedInput { .. }
            | Self::ClassificationFailed { .. } => ErrorKind::Domain,
            Self::Storage(_) => ErrorKind::Storage,
            Self::ConfigDirNotFound
            | Self::DataDirNotFound
            | Self::ConfigRead { .. }
            | Self::ConfigParse { .. }
            | Self::ConfigWrite { .. }
            | Self::ConfigSerialize { .. }
            | Self::ConfigValidation { .. }
            | Self::SeedFileRead { .. } => ErrorKind::Config,
            Self::Io(_) | Self::OutputSerialize { .. } | Self::CsvWrite { .. } => ErrorKind::Io,
            Self::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Stable `snake_case` identifier for structured error output.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::DuplicateName { .. } => "duplicate_name",
            Self::UnknownDistrict { .. } => "unknown_district",
            Self::NoDistrictsAvailable => "no_districts_available",
            Self::MalformedInput { .. } => "malformed_input",
            Self::ClassificationFailed { .. } => "classification_failed",
            Self::Storage(_) => "storage_error",
            Self::Io(_) => "io_error",
            Self::ConfigDirNotFound | Self::DataDirNotFound => "directory_not_found",
            Self::ConfigRead { .. } | Self::ConfigWrite { .. } => "config_io",
            Self::ConfigParse { .. } | Self::ConfigSerialize { .. } => "config_format",
            Self::ConfigValidation { .. } => "config_invalid",
            Self::SeedFileRead { .. } => "seed_file_invalid",
            Self::OutputSerialize { .. } | Self::CsvWrite { .. } => "output_error",
            Self::Internal { .. } => "internal_error",
        }
    }

    /// Whether retrying the same call unchanged could succeed.
    ///
    /// Only transient storage conditions qualify. Domain errors require the
    /// caller to correct the input first.
    pub fn is_retryable(&self) -> bool {
        use rusqlite::ErrorCode;

        match self {
            Self::Storage(rusqlite::Error::SqliteFailure(err, _)) => matches!(
                err.code,
                ErrorCode::DatabaseBusy
                    | ErrorCode::DatabaseLocked
                    | ErrorCode::SystemIoFailure
                    | ErrorCode::CannotOpen
            ),
            _ => false,
        }
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInput {
            message: message.into(),
        }
    }
}
