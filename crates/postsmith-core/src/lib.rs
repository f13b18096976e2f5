//! Postsmith Core Library
//!
//! This crate provides the pipeline-facing pieces of Postsmith:
//! - The virtual file mapping and output renaming
//! - Glob-based file selection
//! - Options and layered configuration resolution
//! - The host pipeline contract
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Select    │────▶│   Resolve   │────▶│   Rename    │
//! │   (glob)    │     │   Config    │     │  (*.css)    │
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use postsmith_core::{Options, resolve_config, select};
//!
//! let options = Options::new().pattern("**/*.scss");
//! let keys = select(&files, &options.pattern)?;
//! let resolved = resolve_config(&options, ctx.directory()).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod files;
pub mod pipeline;
pub mod selector;

pub use config::{
    ExternalConfig, Options, PluginMap, ResolvedConfig, Settings, load_config, merge_layers,
    resolve_config,
};
pub use error::{Error, Result};
pub use files::{File, Files, move_file, output_name};
pub use pipeline::{BuildContext, Step};
pub use selector::{Pattern, select};
