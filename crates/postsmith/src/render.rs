//! Rendering selected files through the engine
//!
//! All selected files are rendered concurrently on the calling task and
//! joined. The first failure observed is reported once every render has
//! settled; files that rendered successfully keep their new contents.

use futures::stream::{FuturesUnordered, StreamExt};
use serde_json::Value;
use std::collections::HashSet;

use postsmith_core::{BuildContext, File, Files, Settings};
use postsmith_engine::{ProcessOptions, Processor};

use crate::error::{Error, Result};

/// Run `file` through `processor` and replace its contents with the output.
///
/// On failure the file is left untouched.
pub async fn render(
    processor: &Processor,
    file: &mut File,
    settings: &Settings,
) -> postsmith_engine::Result<()> {
    let options = ProcessOptions::from_settings(settings)?;
    let css = processor.process(&file.text(), &options).await?;
    file.contents = css.into_bytes();
    Ok(())
}

/// `settings` plus the `from`/`to` paths for `key`
pub fn file_settings(settings: &Settings, ctx: &BuildContext, key: &str) -> Settings {
    let mut settings = settings.clone();
    settings.insert(
        "from".to_string(),
        Value::String(ctx.source().join(key).display().to_string()),
    );
    settings.insert(
        "to".to_string(),
        Value::String(ctx.destination().join(key).display().to_string()),
    );
    settings
}

/// Render every key in `selected`, concurrently.
pub async fn render_all(
    processor: &Processor,
    files: &mut Files,
    selected: &[String],
    settings: &Settings,
    ctx: &BuildContext,
) -> Result<()> {
    let wanted: HashSet<&str> = selected.iter().map(String::as_str).collect();

    let mut renders: FuturesUnordered<_> = files
        .iter_mut()
        .filter(|(key, _)| wanted.contains(key.as_str()))
        .map(|(key, file)| {
            let settings = file_settings(settings, ctx, key);
            async move {
                tracing::debug!("Rendering {}", key);
                render(processor, file, &settings)
                    .await
                    .map_err(|source| Error::Transform {
                        file: key.clone(),
                        source,
                    })
            }
        })
        .collect();

    let mut first_error = None;
    while let Some(result) = renders.next().await {
        match result {
            Ok(()) => {}
            Err(err) if first_error.is_none() => first_error = Some(err),
            Err(err) => tracing::debug!("Discarding later render failure: {}", err),
        }
    }

    match first_error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
