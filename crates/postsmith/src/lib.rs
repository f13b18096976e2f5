//! Postsmith
//!
//! A build-pipeline step that runs selected files through a CSS engine and
//! renames the results to `.css`.
//!
//! # Features
//!
//! - Glob selection over the host's in-memory file mapping
//! - Inline options layered over an optional YAML/JSON config file
//! - Plugins resolved through an explicit [`PluginRegistry`]
//! - Concurrent rendering with first-error reporting
//!
//! # Usage
//!
//! ```rust,ignore
//! use postsmith::{BuildContext, Options, PostCss};
//!
//! let step = PostCss::new(
//!     Options::new()
//!         .pattern("**/*.scss")
//!         .config("postsmith.yaml")
//!         .setting("minify", true),
//! );
//! step.process(&mut files, &BuildContext::new("./site")).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod render;
pub mod step;

pub use error::{Error, Result};
pub use render::render;
pub use step::PostCss;

pub use postsmith_core::{
    BuildContext, File, Files, Options, Pattern, PluginMap, ResolvedConfig, Settings, Step,
    load_config, move_file, resolve_config,
};
pub use postsmith_engine::{Plugin, PluginError, PluginRegistry, ProcessOptions, Processor, load_plugins};
