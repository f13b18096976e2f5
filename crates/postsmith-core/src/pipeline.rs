//! Host pipeline contract
//!
//! The host owns the [`Files`] mapping and the directory layout, and runs
//! each [`Step`] in turn. A step reports completion by returning `Ok(())`,
//! or stops the build by returning its error.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::files::Files;

/// Directory layout of the running build
#[derive(Debug, Clone)]
pub struct BuildContext {
    directory: PathBuf,
    source: PathBuf,
    destination: PathBuf,
}

impl BuildContext {
    /// Layout rooted at `directory`, with `src` and `build` subdirectories.
    ///
    /// A relative `directory` is made absolute against the current working
    /// directory, so [`source`](Self::source) and
    /// [`destination`](Self::destination) are always absolute.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        let directory = directory.into();
        Self {
            directory: std::path::absolute(&directory).unwrap_or(directory),
            source: PathBuf::from("src"),
            destination: PathBuf::from("build"),
        }
    }

    /// Set the source directory, relative to the build directory
    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = source.into();
        self
    }

    /// Set the destination directory, relative to the build directory
    pub fn with_destination(mut self, destination: impl Into<PathBuf>) -> Self {
        self.destination = destination.into();
        self
    }

    /// Build directory; relative config paths resolve against it
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Source directory the file mapping was read from
    pub fn source(&self) -> PathBuf {
        self.directory.join(&self.source)
    }

    /// Destination directory the file mapping will be written to
    pub fn destination(&self) -> PathBuf {
        self.directory.join(&self.destination)
    }
}

/// One step of a host build pipeline
#[async_trait]
pub trait Step: Send + Sync {
    /// Error reported to the host when the step fails
    type Error: std::error::Error + Send + Sync + 'static;

    /// Process `files` in place
    async fn run(&self, files: &mut Files, ctx: &BuildContext) -> Result<(), Self::Error>;
}
