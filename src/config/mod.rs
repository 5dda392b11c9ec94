//! Configuration management for pull request template checks.
//!
//! Settings come from up to three layers, later layers overriding earlier
//! ones field by field:
//!
//! 1. Project config file (`.github/pr-template-check.md`, YAML front matter)
//! 2. GitHub Actions inputs (`INPUT_*` environment variables)
//! 3. Command-line flags
//!
//! Fields not set in any layer fall back to their defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::checker::CheckerOptions;
use crate::markdown::split_frontmatter;
use crate::paths::CONFIG_FILE;

pub mod defaults;
pub mod inputs;
pub mod validation;

pub use defaults::*;
pub use inputs::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Section names that must be present, e.g. `"## Summary"`
    #[serde(default)]
    pub required_sections: Vec<String>,
    /// Regex the PR title must match; empty disables the check
    #[serde(default)]
    pub jira_pattern: String,
    /// Label added on failure and removed on success
    #[serde(default = "default_label_name")]
    pub label_name: String,
    /// Compare against the repository's PR template instead of names only
    #[serde(default)]
    pub enforce_template: bool,
    /// Require at least one checked item in template task lists
    #[serde(default)]
    pub require_task_completion: bool,
    /// Logins that are never checked
    #[serde(default)]
    pub skip_users: Vec<String>,
    /// Substrings identifying bot or service accounts
    #[serde(default)]
    pub skip_service_accounts: Vec<String>,
    /// Template locations, tried in order
    #[serde(default = "default_template_paths")]
    pub template_paths: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        PartialConfig::default().into_config()
    }
}

impl Config {
    /// Load the project config file from the current directory, or defaults
    /// if it does not exist.
    pub fn load() -> Result<Self> {
        Self::load_or_default(Path::new(CONFIG_FILE))
    }

    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config = PartialConfig::parse(content)?.into_config();
        config.validate()?;
        Ok(config)
    }

    /// Resolve layered configuration. Later layers win.
    pub fn resolve(layers: impl IntoIterator<Item = PartialConfig>) -> Result<Self> {
        let config = layers
            .into_iter()
            .fold(PartialConfig::default(), PartialConfig::overlay)
            .into_config();
        config.validate()?;
        Ok(config)
    }

    /// Checker options for a run. `template` is only passed through when
    /// template enforcement is on.
    pub fn checker_options(&self, template: Option<String>) -> CheckerOptions {
        CheckerOptions {
            required_sections: self.required_sections.clone(),
            ticket_pattern: Some(self.jira_pattern.clone()),
            template: if self.enforce_template { template } else { None },
            require_checklist_completion: self.require_task_completion,
        }
    }
}

/// One configuration layer. Every field is optional so layers can be merged.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartialConfig {
    pub required_sections: Option<Vec<String>>,
    pub jira_pattern: Option<String>,
    pub label_name: Option<String>,
    pub enforce_template: Option<bool>,
    pub require_task_completion: Option<bool>,
    pub skip_users: Option<Vec<String>>,
    pub skip_service_accounts: Option<Vec<String>>,
    pub template_paths: Option<Vec<String>>,
}

impl PartialConfig {
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        Self::parse(&content)
    }

    /// Like [`PartialConfig::load_from`], but a missing file is an empty layer.
    pub fn load_optional(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        let (frontmatter, _body) = split_frontmatter(content);
        let frontmatter = frontmatter.context("Failed to extract frontmatter from config")?;

        if frontmatter.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&frontmatter).context("Failed to parse config frontmatter")
    }

    /// Merge `other` on top of `self`. Fields set in `other` win.
    pub fn overlay(self, other: PartialConfig) -> PartialConfig {
        PartialConfig {
            required_sections: other.required_sections.or(self.required_sections),
            jira_pattern: other.jira_pattern.or(self.jira_pattern),
            label_name: other.label_name.or(self.label_name),
            enforce_template: other.enforce_template.or(self.enforce_template),
            require_task_completion: other
                .require_task_completion
                .or(self.require_task_completion),
            skip_users: other.skip_users.or(self.skip_users),
            skip_service_accounts: other.skip_service_accounts.or(self.skip_service_accounts),
            template_paths: other.template_paths.or(self.template_paths),
        }
    }

    /// Fill unset fields with defaults.
    pub fn into_config(self) -> Config {
        Config {
            required_sections: self.required_sections.unwrap_or_default(),
            jira_pattern: self.jira_pattern.unwrap_or_default(),
            label_name: self.label_name.unwrap_or_else(default_label_name),
            enforce_template: self.enforce_template.unwrap_or(false),
            require_task_completion: self.require_task_completion.unwrap_or(false),
            skip_users: self.skip_users.unwrap_or_default(),
            skip_service_accounts: self.skip_service_accounts.unwrap_or_default(),
            template_paths: self.template_paths.unwrap_or_else(default_template_paths),
        }
    }
}
