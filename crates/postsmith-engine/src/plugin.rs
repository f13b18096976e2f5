//! Plugin trait and per-run options
//!
//! Plugins receive the stylesheet as text after the engine has parsed and
//! printed it, and return the text handed to the next plugin.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::path::PathBuf;

use postsmith_core::Settings;

use crate::error::Result;

/// Error type plugins report
pub type PluginError = Box<dyn std::error::Error + Send + Sync>;

/// Engine options for one file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProcessOptions {
    /// Absolute path the source was read from
    #[serde(default)]
    pub from: Option<PathBuf>,

    /// Absolute path the output will be written to
    #[serde(default)]
    pub to: Option<PathBuf>,

    /// Print the smallest equivalent stylesheet
    #[serde(default)]
    pub minify: bool,

    /// Skip invalid rules instead of failing
    #[serde(default)]
    pub error_recovery: bool,

    /// Every setting, including those the engine does not interpret
    #[serde(skip)]
    pub settings: Settings,
}

impl ProcessOptions {
    /// Read engine options out of flat settings.
    ///
    /// Unknown keys are kept in [`ProcessOptions::settings`] for plugins.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let mut options: Self = serde_json::from_value(Value::Object(settings.clone()))?;
        options.settings = settings.clone();
        Ok(options)
    }

    /// Name used for the source in messages
    pub fn source_name(&self) -> String {
        self.from
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<input css>".to_string())
    }
}

/// A transform unit run by the engine, in configured order
#[async_trait]
pub trait Plugin: Send + Sync {
    /// Name used in logs and errors
    fn name(&self) -> &str;

    /// Transform the stylesheet text
    async fn transform(
        &self,
        css: String,
        options: &ProcessOptions,
    ) -> std::result::Result<String, PluginError>;
}
