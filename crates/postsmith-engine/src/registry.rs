//! Plugin registry
//!
//! Plugin identifiers are resolved through an explicit registry of factory
//! functions supplied by the caller. A factory takes the argument value from
//! the plugin map and returns a ready plugin instance.
//!
//! # Example
//!
//! ```rust,ignore
//! use postsmith_engine::PluginRegistry;
//!
//! let mut registry = PluginRegistry::default();
//! registry.register("my-plugin", |args| Ok(Arc::new(MyPlugin::new(args)?)));
//! let plugins = registry.load_plugins(&resolved.plugins)?;
//! ```

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use postsmith_core::PluginMap;

use crate::error::{Error, Result};
use crate::plugin::{Plugin, PluginError};
use crate::plugins;

/// Constructs a plugin instance from its argument value
pub type PluginFactory =
    Arc<dyn Fn(&Value) -> std::result::Result<Arc<dyn Plugin>, PluginError> + Send + Sync>;

/// Identifier -> factory lookup
#[derive(Clone)]
pub struct PluginRegistry {
    factories: HashMap<String, PluginFactory>,
}

impl PluginRegistry {
    /// A registry with no plugins, not even the built-ins
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register `factory` under `name`, replacing any previous factory
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn(&Value) -> std::result::Result<Arc<dyn Plugin>, PluginError> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Arc::new(factory));
        self
    }

    /// Builder form of [`PluginRegistry::register`]
    pub fn with<F>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&Value) -> std::result::Result<Arc<dyn Plugin>, PluginError> + Send + Sync + 'static,
    {
        self.register(name, factory);
        self
    }

    /// Whether a factory is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered identifiers, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Construct the plugin registered under `name`
    pub fn load(&self, name: &str, args: &Value) -> Result<Arc<dyn Plugin>> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| Error::PluginNotFound {
                plugin: name.to_string(),
            })?;

        factory(args).map_err(|e| Error::PluginConstruct {
            plugin: name.to_string(),
            message: e.to_string(),
        })
    }

    /// Construct every plugin in `plugins`, preserving map order
    pub fn load_plugins(&self, plugins: &PluginMap) -> Result<Vec<Arc<dyn Plugin>>> {
        let loaded = plugins
            .iter()
            .map(|(name, args)| self.load(name, args))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            "Loaded {} plugins: [{}]",
            loaded.len(),
            plugins.keys().cloned().collect::<Vec<_>>().join(", ")
        );
        Ok(loaded)
    }
}

impl Default for PluginRegistry {
    /// A registry holding the built-in plugins
    fn default() -> Self {
        let mut registry = Self::empty();
        plugins::register_builtins(&mut registry);
        registry
    }
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("plugins", &self.names())
            .finish()
    }
}

/// Construct every plugin in `plugins` from `registry`, in order
pub fn load_plugins(registry: &PluginRegistry, plugins: &PluginMap) -> Result<Vec<Arc<dyn Plugin>>> {
    registry.load_plugins(plugins)
}
