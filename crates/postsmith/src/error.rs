//! Error types for the pipeline step

use thiserror::Error;

/// Result type for pipeline step operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported to the host pipeline
#[derive(Error, Debug)]
pub enum Error {
    /// Selection or configuration failure
    #[error(transparent)]
    Core(#[from] postsmith_core::Error),

    /// Engine construction failure
    #[error(transparent)]
    Engine(#[from] postsmith_engine::Error),

    /// The engine rejected one file
    #[error("{file}: {source}")]
    Transform {
        /// Key of the file in the mapping
        file: String,
        /// Engine error for that file
        #[source]
        source: postsmith_engine::Error,
    },
}

impl Error {
    /// The pattern matched no files
    pub fn is_empty_selection(&self) -> bool {
        matches!(self, Self::Core(postsmith_core::Error::EmptySelection { .. }))
    }

    /// The external config could not be located or loaded
    pub fn is_config_load(&self) -> bool {
        matches!(self, Self::Core(e) if e.is_config_load())
    }

    /// A configured plugin could not be resolved or constructed
    pub fn is_plugin_resolution(&self) -> bool {
        matches!(self, Self::Engine(e) if e.is_plugin_resolution())
    }

    /// A file failed to transform
    pub fn is_transform(&self) -> bool {
        matches!(self, Self::Transform { .. })
    }
}
