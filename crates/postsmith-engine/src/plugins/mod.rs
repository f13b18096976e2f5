//! Built-in plugins
//!
//! Registered in every [`PluginRegistry::default`](crate::PluginRegistry):
//!
//! - `banner` - Prepend a preserved comment
//! - `replace` - Regex find-and-replace over the stylesheet text

pub mod banner;
pub mod replace;

use std::sync::Arc;

use crate::plugin::Plugin;
use crate::registry::PluginRegistry;

pub use banner::Banner;
pub use replace::Replace;

/// Add the built-in factories to `registry`
pub fn register_builtins(registry: &mut PluginRegistry) {
    registry
        .register(banner::NAME, |args| {
            Ok(Arc::new(Banner::from_args(args)?) as Arc<dyn Plugin>)
        })
        .register(replace::NAME, |args| {
            Ok(Arc::new(Replace::from_args(args)?) as Arc<dyn Plugin>)
        });
}
