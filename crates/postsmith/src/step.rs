//! The Postsmith pipeline step
//!
//! One run goes through these stages, stopping at the first error:
//!
//! 1. select the files matching the pattern (nothing matched is an error)
//! 2. resolve and check the configuration, then build the engine
//! 3. render every selected file concurrently
//! 4. rename every selected file to `.css`, in selection order
//!
//! Nothing is rolled back on failure: a render error after other files have
//! rendered leaves those files with their new contents under their old keys.

use async_trait::async_trait;

use postsmith_core::{BuildContext, Files, Options, Step, move_file, resolve_config, select};
use postsmith_engine::{PluginRegistry, ProcessOptions, Processor};

use crate::error::{Error, Result};
use crate::render::render_all;

/// Pipeline step running CSS files through the engine
#[derive(Debug, Clone)]
pub struct PostCss {
    options: Options,
    registry: PluginRegistry,
}

impl PostCss {
    /// Step with the built-in plugins available
    pub fn new(options: Options) -> Self {
        Self::with_registry(options, PluginRegistry::default())
    }

    /// Step resolving plugin identifiers through `registry`
    pub fn with_registry(options: Options, registry: PluginRegistry) -> Self {
        Self { options, registry }
    }

    /// Inline options of this step
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Run the step over `files`
    pub async fn process(&self, files: &mut Files, ctx: &BuildContext) -> Result<()> {
        let selected = select(files, &self.options.pattern)?;
        tracing::info!(
            "Processing {} files matching '{}'",
            selected.len(),
            self.options.pattern
        );

        let resolved = resolve_config(&self.options, ctx.directory()).await?;
        ProcessOptions::from_settings(&resolved.settings)?;
        let processor = Processor::new(self.registry.load_plugins(&resolved.plugins)?);

        render_all(&processor, files, &selected, &resolved.settings, ctx).await?;

        for key in &selected {
            move_file(files, key);
        }

        tracing::info!("Processed {} files", selected.len());
        Ok(())
    }
}

#[async_trait]
impl Step for PostCss {
    type Error = Error;

    async fn run(&self, files: &mut Files, ctx: &BuildContext) -> Result<()> {
        self.process(files, ctx).await
    }
}
