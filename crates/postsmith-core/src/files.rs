//! The pipeline's virtual filesystem
//!
//! A [`Files`] mapping is owned by the host pipeline and keyed by the file's
//! path relative to the source directory, always with `/` separators.
//! Postsmith reads and rewrites the records it selects, and renames their
//! keys once processing succeeds.

use indexmap::IndexMap;
use std::borrow::Cow;

/// Extension every processed file ends up with
pub const TARGET_EXTENSION: &str = "css";

/// File mapping keyed by relative path, in insertion order
pub type Files = IndexMap<String, File>;

/// A single file record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct File {
    /// Raw file contents
    pub contents: Vec<u8>,

    /// Arbitrary metadata attached by earlier pipeline steps
    pub metadata: IndexMap<String, serde_json::Value>,
}

impl File {
    /// Create a file record with no metadata
    pub fn new(contents: impl Into<Vec<u8>>) -> Self {
        Self {
            contents: contents.into(),
            metadata: IndexMap::new(),
        }
    }

    /// Attach a metadata entry
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Contents decoded as UTF-8, replacing invalid sequences
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.contents)
    }
}

/// Compute the output key for `key`: same directory and base name, `.css`
/// extension.
///
/// Only the last extension is replaced, so `theme.dark.scss` becomes
/// `theme.dark.css`. Dotfiles without a further extension keep their name
/// and gain the extension.
pub fn output_name(key: &str) -> String {
    let (dir, base) = match key.rsplit_once('/') {
        Some((dir, base)) => (Some(dir), base),
        None => (None, key),
    };

    let stem = match base.rfind('.') {
        Some(i) if i > 0 => &base[..i],
        _ => base,
    };

    match dir {
        Some(dir) if !dir.is_empty() => format!("{}/{}.{}", dir, stem, TARGET_EXTENSION),
        _ => format!("{}.{}", stem, TARGET_EXTENSION),
    }
}

/// Rename `key` to its `.css` output name, in place.
///
/// Does nothing when the key already has the target name or is no longer in
/// the mapping, which makes repeated calls harmless. An existing entry under
/// the new name is replaced.
pub fn move_file(files: &mut Files, key: &str) {
    let new_key = output_name(key);
    if new_key == key {
        return;
    }

    let Some(file) = files.shift_remove(key) else {
        return;
    };

    if files.contains_key(&new_key) {
        tracing::warn!("'{}' replaces existing entry '{}'", key, new_key);
    }
    tracing::debug!("Renamed {} -> {}", key, new_key);
    files.insert(new_key, file);
}
