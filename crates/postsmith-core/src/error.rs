//! Error types for postsmith-core

use thiserror::Error;

/// Result type alias for postsmith-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in postsmith-core
#[derive(Error, Debug)]
pub enum Error {
    /// The selection pattern matched no file in the mapping
    #[error("Pattern '{pattern}' did not match any files.")]
    EmptySelection {
        /// Pattern as it was configured
        pattern: String,
    },

    /// A glob in the selection pattern could not be compiled
    #[error("invalid pattern '{pattern}': {message}")]
    InvalidPattern {
        /// The glob that failed
        pattern: String,
        /// Error message from the glob compiler
        message: String,
    },

    /// External configuration file could not be found
    #[error("configuration file not found: {path}")]
    ConfigNotFound {
        /// Path that was searched
        path: String,
    },

    /// External configuration file exists but could not be read
    #[error("failed to read configuration '{path}': {source}")]
    ConfigRead {
        /// Path of the file being read
        path: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// External configuration file is not valid YAML/JSON
    #[error("failed to parse configuration '{path}': {source}")]
    ConfigParse {
        /// Path of the file being parsed
        path: String,
        /// Underlying parser error
        #[source]
        source: serde_yaml::Error,
    },

    /// External configuration has the wrong shape
    #[error("invalid configuration '{path}': {message}")]
    ConfigInvalid {
        /// Path of the offending file
        path: String,
        /// Description of what's invalid
        message: String,
    },
}

impl Error {
    /// Whether this error came from locating or loading an external config.
    pub fn is_config_load(&self) -> bool {
        matches!(
            self,
            Self::ConfigNotFound { .. }
                | Self::ConfigRead { .. }
                | Self::ConfigParse { .. }
                | Self::ConfigInvalid { .. }
        )
    }
}
