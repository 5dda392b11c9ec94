//! Validation of resolved configuration.

use anyhow::{Context, Result};
use regex::Regex;

use super::Config;

impl Config {
    /// Reject settings that would make every run fail for the wrong reason.
    pub fn validate(&self) -> Result<()> {
        if !self.jira_pattern.trim().is_empty() {
            Regex::new(&self.jira_pattern)
                .with_context(|| format!("jira_pattern is not a valid regex: {}", self.jira_pattern))?;
        }

        if self.label_name.trim().is_empty() {
            anyhow::bail!("label_name must not be empty");
        }

        if self.template_paths.iter().any(|p| p.trim().is_empty()) {
            anyhow::bail!("template_paths must not contain empty entries");
        }

        Ok(())
    }
}
