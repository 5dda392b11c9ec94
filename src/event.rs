//! Pull request event context supplied by the GitHub Actions runner.
//!
//! The runner writes the webhook payload that triggered the workflow to the
//! file named by `GITHUB_EVENT_PATH`, and the event name to
//! `GITHUB_EVENT_NAME`. Only the handful of fields the checker needs are
//! deserialized.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const ENV_EVENT_NAME: &str = "GITHUB_EVENT_NAME";
pub const ENV_EVENT_PATH: &str = "GITHUB_EVENT_PATH";
pub const ENV_REPOSITORY: &str = "GITHUB_REPOSITORY";

/// Event names the checker runs on.
pub const PULL_REQUEST_EVENTS: &[&str] = &["pull_request", "pull_request_target"];

pub fn is_pull_request_event(name: &str) -> bool {
    PULL_REQUEST_EVENTS.contains(&name)
}

/// Webhook payload. Everything but `pull_request` is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPayload {
    #[serde(default)]
    pub pull_request: Option<PullRequest>,
}

impl EventPayload {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read event payload from {}", path.display()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse event payload")
    }

    pub fn into_pull_request(self) -> Result<PullRequest> {
        self.pull_request
            .context("Could not find pull request data in the event payload")
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    body: Option<String>,
    pub user: User,
    pub head: Head,
}

impl PullRequest {
    /// Description text. A PR opened without a description has a null body.
    pub fn body(&self) -> &str {
        self.body.as_deref().unwrap_or("")
    }

    pub fn author(&self) -> &str {
        &self.user.login
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct User {
    pub login: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Head {
    pub sha: String,
}

/// `owner/name` pair from `GITHUB_REPOSITORY`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub owner: String,
    pub name: String,
}

impl FromStr for Repository {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => anyhow::bail!("Invalid repository '{}': expected owner/name", s),
        }
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Everything the reporter needs to address one pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestRef {
    pub repository: Repository,
    pub number: u64,
    pub head_sha: String,
}

impl PullRequestRef {
    pub fn new(repository: Repository, pull_request: &PullRequest) -> Self {
        Self {
            repository,
            number: pull_request.number,
            head_sha: pull_request.head.sha.clone(),
        }
    }
}

/// Runner-provided context for one workflow run.
#[derive(Debug, Clone)]
pub struct ActionContext {
    pub event_name: String,
    pub event_path: PathBuf,
    pub repository: Repository,
}

impl ActionContext {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(&|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self> {
        let event_name = lookup(ENV_EVENT_NAME).unwrap_or_default();
        let event_path = lookup(ENV_EVENT_PATH)
            .with_context(|| format!("{} is not set", ENV_EVENT_PATH))?;
        let repository = lookup(ENV_REPOSITORY)
            .with_context(|| format!("{} is not set", ENV_REPOSITORY))?
            .parse()?;

        Ok(Self {
            event_name,
            event_path: PathBuf::from(event_path),
            repository,
        })
    }
}

/// Whether checks should be skipped for `login`.
///
/// `skip_users` entries match exactly. `skip_service_accounts` entries match
/// anywhere in the login, so `[bot]` covers every GitHub App account.
pub fn should_skip_user(login: &str, skip_users: &[String], skip_service_accounts: &[String]) -> bool {
    skip_users.iter().any(|u| u == login)
        || skip_service_accounts
            .iter()
            .any(|account| login.contains(account.as_str()))
}
