//! RuleSet configuration types.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::rule::Rule;

/// Configuration for loading a rule list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    /// Whether rules from the private section are loaded at all
    pub private_domains: bool,
}

impl ListConfig {
    /// Create a new ListConfig.
    pub fn new(private_domains: bool) -> Self {
        Self { private_domains }
    }

    /// Configuration that only loads ICANN rules.
    pub fn icann_only() -> Self {
        Self::new(false)
    }

    /// Parse a configuration from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a configuration from a YAML file.
    pub fn from_yaml_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Which rule `find` falls back to when no listed rule matches.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DefaultRule {
    /// The list's own default rule (`*` unless overridden)
    #[default]
    Implicit,
    /// A caller-supplied rule
    Custom(Rule),
    /// No fallback, `find` returns `None`
    Disabled,
}

/// Per-lookup options.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FindOptions {
    /// Skip rules from the private section
    pub ignore_private: bool,
    /// Fallback when nothing matches
    pub default_rule: DefaultRule,
}

impl FindOptions {
    /// Create options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether private rules are skipped.
    pub fn ignore_private(mut self, ignore: bool) -> Self {
        self.ignore_private = ignore;
        self
    }

    /// Use a custom fallback rule.
    pub fn default_rule(mut self, rule: Rule) -> Self {
        self.default_rule = DefaultRule::Custom(rule);
        self
    }

    /// Return `None` from lookups that match no listed rule.
    pub fn without_default_rule(mut self) -> Self {
        self.default_rule = DefaultRule::Disabled;
        self
    }
}
