//! Banner plugin
//!
//! ```yaml
//! plugins:
//!   banner: "(c) Example Corp"
//! ```
//!
//! or `banner: { text: "..." }`. The comment uses the `/*!` form so that
//! minifiers downstream keep it.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::plugin::{Plugin, PluginError, ProcessOptions};

/// Registry identifier
pub const NAME: &str = "banner";

#[derive(Deserialize)]
#[serde(untagged)]
enum BannerArgs {
    Text(String),
    Options { text: String },
}

/// Prepends `/*! text */` to the stylesheet
#[derive(Debug, Clone)]
pub struct Banner {
    text: String,
}

impl Banner {
    /// Create a banner with the given comment text
    pub fn new(text: impl Into<String>) -> Result<Self, PluginError> {
        let text = text.into();
        if text.contains("*/") {
            return Err("banner text must not contain '*/'".into());
        }
        Ok(Self { text })
    }

    /// Build from a plugin-map argument
    pub fn from_args(args: &Value) -> Result<Self, PluginError> {
        let text = match BannerArgs::deserialize(args)? {
            BannerArgs::Text(text) | BannerArgs::Options { text } => text,
        };
        Self::new(text)
    }
}

#[async_trait]
impl Plugin for Banner {
    fn name(&self) -> &str {
        NAME
    }

    async fn transform(&self, css: String, _options: &ProcessOptions) -> Result<String, PluginError> {
        Ok(format!("/*! {} */\n{}", self.text, css))
    }
}
