//! File selection by glob pattern
//!
//! A pattern is a single glob or a list of globs. Globs are applied in order:
//! a plain glob adds the keys it matches, a glob prefixed with `!` removes
//! the keys it matches from what earlier globs selected.
//!
//! Matching follows shell conventions: `*` and `?` never cross a `/`, `**`
//! spans any number of directories (including none), and wildcards do not
//! match a leading `.` unless the glob spells it out.

use glob::{MatchOptions, Pattern as Glob};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};
use crate::files::Files;

/// Pattern used when none is configured
pub const DEFAULT_PATTERN: &str = "**/*.css";

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Selection pattern: one glob or an ordered list of globs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Pattern {
    /// A single glob
    One(String),
    /// Globs applied in order
    Many(Vec<String>),
}

impl Pattern {
    /// The globs making up this pattern, in order
    pub fn globs(&self) -> &[String] {
        match self {
            Self::One(glob) => std::slice::from_ref(glob),
            Self::Many(globs) => globs,
        }
    }
}

impl Default for Pattern {
    fn default() -> Self {
        Self::One(DEFAULT_PATTERN.to_string())
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.globs().join(", "))
    }
}

impl From<&str> for Pattern {
    fn from(glob: &str) -> Self {
        Self::One(glob.to_string())
    }
}

impl From<String> for Pattern {
    fn from(glob: String) -> Self {
        Self::One(glob)
    }
}

impl From<Vec<String>> for Pattern {
    fn from(globs: Vec<String>) -> Self {
        Self::Many(globs)
    }
}

impl From<&[&str]> for Pattern {
    fn from(globs: &[&str]) -> Self {
        Self::Many(globs.iter().map(|g| g.to_string()).collect())
    }
}

struct Rule {
    negated: bool,
    glob: Glob,
}

/// Compiled form of a [`Pattern`]
pub struct Matcher {
    rules: Vec<Rule>,
}

impl Matcher {
    /// Compile every glob in `pattern`
    pub fn new(pattern: &Pattern) -> Result<Self> {
        let rules = pattern
            .globs()
            .iter()
            .map(|raw| {
                let (negated, source) = match raw.strip_prefix('!') {
                    Some(rest) => (true, rest),
                    None => (false, raw.as_str()),
                };
                let glob = Glob::new(source).map_err(|e| Error::InvalidPattern {
                    pattern: raw.clone(),
                    message: e.to_string(),
                })?;
                Ok(Rule { negated, glob })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rules })
    }

    /// Whether `key` survives every glob in order
    pub fn is_match(&self, key: &str) -> bool {
        self.rules.iter().fold(false, |selected, rule| {
            if rule.negated {
                selected && !rule.glob.matches_with(key, MATCH_OPTIONS)
            } else {
                selected || rule.glob.matches_with(key, MATCH_OPTIONS)
            }
        })
    }
}

/// Keys of `files` matched by `pattern`, in mapping order.
///
/// Fails with [`Error::EmptySelection`] when nothing matches.
pub fn select(files: &Files, pattern: &Pattern) -> Result<Vec<String>> {
    let matcher = Matcher::new(pattern)?;
    let selected: Vec<String> = files
        .keys()
        .filter(|key| matcher.is_match(key))
        .cloned()
        .collect();

    if selected.is_empty() {
        return Err(Error::EmptySelection {
            pattern: pattern.to_string(),
        });
    }

    tracing::debug!(
        "Pattern '{}' selected {} of {} files",
        pattern,
        selected.len(),
        files.len()
    );
    Ok(selected)
}
