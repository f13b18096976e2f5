//! Postsmith Engine
//!
//! This crate provides the CSS transformation engine used by Postsmith.
//!
//! # Pipeline Overview
//!
//! ```text
//! ┌─────────┐     ┌─────────┐     ┌─────────┐     ┌─────────┐
//! │   CSS   │────▶│  Parse  │────▶│  Print  │────▶│ Plugins │
//! │  text   │     │ (lcss)  │     │(minify?)│     │(ordered)│
//! └─────────┘     └─────────┘     └─────────┘     └─────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use postsmith_engine::{PluginRegistry, ProcessOptions, Processor};
//!
//! let plugins = PluginRegistry::default().load_plugins(&resolved.plugins)?;
//! let processor = Processor::new(plugins);
//! let css = processor.process("a { color: red }", &ProcessOptions::default()).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod plugin;
pub mod plugins;
pub mod processor;
pub mod registry;

pub use error::{Error, Result};
pub use plugin::{Plugin, PluginError, ProcessOptions};
pub use processor::Processor;
pub use registry::{PluginFactory, PluginRegistry, load_plugins};
