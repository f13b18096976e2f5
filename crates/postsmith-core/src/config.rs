//! Options and configuration resolution
//!
//! Options come from two layers:
//!
//! - inline [`Options`] given to the pipeline step
//! - an optional external config file (YAML or JSON) named by `config`
//!
//! Inline values win key-for-key. The one exception is `plugins`, where the
//! two plugin maps are combined and inline entries only replace external
//! entries of the same name.
//!
//! # Example config file
//!
//! ```yaml
//! plugins:
//!   banner: "Generated by postsmith"
//!   replace:
//!     pattern: "#000000"
//!     replacement: "black"
//! minify: true
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::selector::Pattern;

/// Flat engine settings, in insertion order
pub type Settings = serde_json::Map<String, Value>;

/// Plugin identifier -> constructor argument, in invocation order
pub type PluginMap = serde_json::Map<String, Value>;

/// Keys consumed by postsmith itself and never forwarded to the engine
pub const RESERVED_KEYS: [&str; 3] = ["pattern", "config", "plugins"];

/// Extensions tried, in order, when a config path does not exist as given
const CONFIG_EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

/// Inline options for one pipeline step
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Options {
    /// Which files to process
    #[serde(default)]
    pub pattern: Pattern,

    /// External config file, relative to the build directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<PathBuf>,

    /// Plugins to construct, in order
    #[serde(default)]
    pub plugins: PluginMap,

    /// Any other key, forwarded to the engine
    #[serde(flatten)]
    pub settings: Settings,
}

impl Options {
    /// Options with the default pattern and nothing else
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the selection pattern
    pub fn pattern(mut self, pattern: impl Into<Pattern>) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// Set the external config path
    pub fn config(mut self, path: impl Into<PathBuf>) -> Self {
        self.config = Some(path.into());
        self
    }

    /// Append a plugin entry
    pub fn plugin(mut self, name: impl Into<String>, args: Value) -> Self {
        self.plugins.insert(name.into(), args);
        self
    }

    /// Set a passthrough engine setting
    pub fn setting(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }
}

/// Effective plugins and settings after merging both layers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedConfig {
    /// Plugins to construct, in order
    pub plugins: PluginMap,

    /// Engine settings, without reserved keys
    pub settings: Settings,
}

/// Contents of an external config file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExternalConfig {
    /// Plugin map declared by the file
    pub plugins: PluginMap,

    /// Every other non-reserved key
    pub settings: Settings,
}

impl ExternalConfig {
    /// Locate and read the config at `path`.
    ///
    /// When `path` does not exist as given, `.yaml`, `.yml` and `.json` are
    /// appended in turn.
    pub async fn load(path: &Path) -> Result<Self> {
        let path = locate(path).await?;
        tracing::info!("Loading configuration from {}", path.display());

        let contents = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| read_error(&path, source))?;
        Self::parse(&path, &contents)
    }

    /// Parse config file contents. `path` is only used in error messages.
    pub fn parse(path: &Path, contents: &str) -> Result<Self> {
        let doc: Value = serde_yaml::from_str(contents).map_err(|source| Error::ConfigParse {
            path: path.display().to_string(),
            source,
        })?;

        let mut map = match doc {
            Value::Object(map) => map,
            Value::Null => return Ok(Self::default()),
            other => {
                return Err(Error::ConfigInvalid {
                    path: path.display().to_string(),
                    message: format!("expected a mapping at the top level, found {}", kind(&other)),
                });
            }
        };

        let plugins = match map.remove("plugins") {
            None | Some(Value::Null) => PluginMap::new(),
            Some(Value::Object(plugins)) => plugins,
            Some(other) => {
                return Err(Error::ConfigInvalid {
                    path: path.display().to_string(),
                    message: format!("'plugins' must be a mapping, found {}", kind(&other)),
                });
            }
        };

        Ok(Self {
            plugins,
            settings: without_reserved(map),
        })
    }
}

fn read_error(path: &Path, source: std::io::Error) -> Error {
    Error::ConfigRead {
        path: path.display().to_string(),
        source,
    }
}

async fn locate(path: &Path) -> Result<PathBuf> {
    if tokio::fs::try_exists(path)
        .await
        .map_err(|e| read_error(path, e))?
    {
        return Ok(path.to_path_buf());
    }

    for ext in CONFIG_EXTENSIONS {
        let mut candidate = path.as_os_str().to_owned();
        candidate.push(".");
        candidate.push(ext);
        let candidate = PathBuf::from(candidate);
        if tokio::fs::try_exists(&candidate)
            .await
            .map_err(|e| read_error(&candidate, e))?
        {
            return Ok(candidate);
        }
    }

    Err(Error::ConfigNotFound {
        path: path.display().to_string(),
    })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}

fn without_reserved(mut map: Settings) -> Settings {
    for key in RESERVED_KEYS {
        map.remove(key);
    }
    map
}

/// Overlay `overlay` on `base`: `overlay` wins key-for-key.
///
/// Keys keep the position they have in `base`; keys only in `overlay` are
/// appended in `overlay` order.
pub fn merge_layers(base: &Settings, overlay: &Settings) -> Settings {
    let mut merged = base.clone();
    for (key, value) in overlay {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Merge an external config with inline options
pub fn merge(external: &ExternalConfig, inline: &Options) -> ResolvedConfig {
    ResolvedConfig {
        plugins: merge_layers(&external.plugins, &inline.plugins),
        settings: without_reserved(merge_layers(&external.settings, &inline.settings)),
    }
}

/// Load the config file at `path` and merge `inline` over it
pub async fn load_config(path: impl AsRef<Path>, inline: &Options) -> Result<ResolvedConfig> {
    let external = ExternalConfig::load(path.as_ref()).await?;
    Ok(merge(&external, inline))
}

/// Resolve the effective configuration for `options`.
///
/// A relative `options.config` is resolved against `base_dir`. Without a
/// config file the inline options stand alone.
pub async fn resolve_config(options: &Options, base_dir: &Path) -> Result<ResolvedConfig> {
    match &options.config {
        Some(config) => load_config(base_dir.join(config), options).await,
        None => Ok(merge(&ExternalConfig::default(), options)),
    }
}
