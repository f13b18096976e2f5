//! Error types for the CSS engine

use thiserror::Error;

use crate::plugin::PluginError;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or running the engine
#[derive(Error, Debug)]
pub enum Error {
    /// No factory is registered under this plugin identifier
    #[error("plugin '{plugin}' is not registered")]
    PluginNotFound {
        /// Requested identifier
        plugin: String,
    },

    /// The factory rejected its arguments
    #[error("plugin '{plugin}' could not be constructed: {message}")]
    PluginConstruct {
        /// Plugin identifier
        plugin: String,
        /// Factory error message
        message: String,
    },

    /// The source is not valid CSS
    #[error("CSS syntax error: {message}")]
    Syntax {
        /// File name the source was read from
        file: String,
        /// Parser message, including the location
        message: String,
    },

    /// The parsed stylesheet could not be minified
    #[error("failed to minify {file}: {message}")]
    Minify {
        /// File name the source was read from
        file: String,
        /// Minifier message
        message: String,
    },

    /// The stylesheet could not be printed
    #[error("failed to print {file}: {message}")]
    Print {
        /// File name the source was read from
        file: String,
        /// Printer message
        message: String,
    },

    /// A plugin failed while transforming
    #[error("plugin '{plugin}' failed: {source}")]
    Plugin {
        /// Plugin name
        plugin: String,
        /// Error returned by the plugin
        #[source]
        source: PluginError,
    },

    /// A setting the engine understands has the wrong type
    #[error("invalid engine option: {0}")]
    InvalidOption(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error came from turning a plugin identifier into an instance.
    pub fn is_plugin_resolution(&self) -> bool {
        matches!(
            self,
            Self::PluginNotFound { .. } | Self::PluginConstruct { .. }
        )
    }
}
