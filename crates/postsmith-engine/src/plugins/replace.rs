//! Replace plugin
//!
//! Regex find-and-replace over the printed stylesheet. Replacements may use
//! capture references such as `$1` or `${name}`.
//!
//! ```yaml
//! plugins:
//!   replace:
//!     - pattern: "--brand-old"
//!       replacement: "--brand"
//!     - pattern: 'url\("/static/'
//!       replacement: 'url("https://cdn.example.com/'
//! ```

use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::plugin::{Plugin, PluginError, ProcessOptions};

/// Registry identifier
pub const NAME: &str = "replace";

#[derive(Deserialize)]
struct RuleArgs {
    pattern: String,
    #[serde(default)]
    replacement: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ReplaceArgs {
    One(RuleArgs),
    Many(Vec<RuleArgs>),
}

#[derive(Debug, Clone)]
struct Rule {
    regex: Regex,
    replacement: String,
}

/// Applies regex replacements in order
#[derive(Debug, Clone)]
pub struct Replace {
    rules: Vec<Rule>,
}

impl Replace {
    /// Build from a plugin-map argument; invalid regexes are rejected here
    pub fn from_args(args: &Value) -> Result<Self, PluginError> {
        let rules = match ReplaceArgs::deserialize(args)? {
            ReplaceArgs::One(rule) => vec![rule],
            ReplaceArgs::Many(rules) => rules,
        };

        let rules = rules
            .into_iter()
            .map(|rule| -> Result<Rule, PluginError> {
                let regex = Regex::new(&rule.pattern)
                    .map_err(|e| format!("invalid regex pattern '{}': {}", rule.pattern, e))?;
                Ok(Rule {
                    regex,
                    replacement: rule.replacement,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { rules })
    }
}

#[async_trait]
impl Plugin for Replace {
    fn name(&self) -> &str {
        NAME
    }

    async fn transform(&self, css: String, _options: &ProcessOptions) -> Result<String, PluginError> {
        let out = self.rules.iter().fold(css, |text, rule| {
            rule.regex
                .replace_all(&text, rule.replacement.as_str())
                .into_owned()
        });
        Ok(out)
    }
}
