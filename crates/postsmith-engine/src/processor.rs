//! CSS processor
//!
//! Every run parses the source with lightningcss, optionally minifies it,
//! prints it back to text and then passes the text through each plugin in
//! order. A processor is built once per pipeline run and shared by all
//! concurrent file renders.

use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::plugin::{Plugin, ProcessOptions};

/// The transformation engine: lightningcss plus an ordered plugin chain
#[derive(Clone, Default)]
pub struct Processor {
    plugins: Vec<Arc<dyn Plugin>>,
}

impl Processor {
    /// Create a processor running `plugins` in order
    pub fn new(plugins: Vec<Arc<dyn Plugin>>) -> Self {
        Self { plugins }
    }

    /// The plugin chain
    pub fn plugins(&self) -> &[Arc<dyn Plugin>] {
        &self.plugins
    }

    /// Process one stylesheet
    pub async fn process(&self, css: &str, options: &ProcessOptions) -> Result<String> {
        let mut output = normalize(css, options)?;

        for plugin in &self.plugins {
            tracing::trace!("Running plugin {} on {}", plugin.name(), options.source_name());
            output = plugin
                .transform(output, options)
                .await
                .map_err(|source| Error::Plugin {
                    plugin: plugin.name().to_string(),
                    source,
                })?;
        }

        Ok(output)
    }
}

impl std::fmt::Debug for Processor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Processor")
            .field(
                "plugins",
                &self.plugins.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

fn normalize(css: &str, options: &ProcessOptions) -> Result<String> {
    let file = options.source_name();

    let mut sheet = StyleSheet::parse(
        css,
        ParserOptions {
            filename: file.clone(),
            error_recovery: options.error_recovery,
            ..ParserOptions::default()
        },
    )
    .map_err(|e| Error::Syntax {
        file: file.clone(),
        message: e.to_string(),
    })?;

    if options.minify {
        sheet
            .minify(MinifyOptions::default())
            .map_err(|e| Error::Minify {
                file: file.clone(),
                message: e.to_string(),
            })?;
    }

    let printed = sheet
        .to_css(PrinterOptions {
            minify: options.minify,
            ..PrinterOptions::default()
        })
        .map_err(|e| Error::Print {
            file,
            message: e.to_string(),
        })?;

    Ok(printed.code)
}
