//! Minimal GitHub REST client.
//!
//! Only the endpoints the action needs are covered: issue comments, issue
//! labels, check runs and repository contents. The [`IssueApi`] and
//! [`ContentsApi`] traits are the seams the reporter and template source
//! depend on, so nothing above this module talks HTTP directly.

use anyhow::{anyhow, Context, Result};
use serde::Serialize;
use std::time::Duration;
use ureq::{Agent, AgentBuilder};
use url::Url;

use crate::config::{get_input, INPUT_GITHUB_TOKEN};
use crate::event::{PullRequestRef, Repository};

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const ENV_API_URL: &str = "GITHUB_API_URL";
pub const ENV_TOKEN: &str = "GITHUB_TOKEN";

const ACCEPT_JSON: &str = "application/vnd.github+json";
const ACCEPT_RAW: &str = "application/vnd.github.raw+json";
const API_VERSION: &str = "2022-11-28";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Check run conclusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Conclusion {
    Success,
    Failure,
}

/// A completed check run to publish on a commit.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckRun {
    pub name: String,
    pub head_sha: String,
    pub conclusion: Conclusion,
    pub title: String,
    pub summary: String,
}

impl CheckRun {
    /// Request body for `POST /repos/{owner}/{repo}/check-runs`.
    pub fn to_request_body(&self, completed_at: &str) -> serde_json::Value {
        serde_json::json!({
            "name": self.name,
            "head_sha": self.head_sha,
            "status": "completed",
            "conclusion": self.conclusion,
            "completed_at": completed_at,
            "output": {
                "title": self.title,
                "summary": self.summary,
            },
        })
    }
}

/// Issue and check-run operations used to report a verdict.
pub trait IssueApi {
    fn create_comment(&self, pr: &PullRequestRef, body: &str) -> Result<()>;

    fn add_label(&self, pr: &PullRequestRef, label: &str) -> Result<()>;

    fn remove_label(&self, pr: &PullRequestRef, label: &str) -> Result<()>;

    fn create_check_run(&self, pr: &PullRequestRef, check: &CheckRun) -> Result<()>;
}

/// Repository file access.
pub trait ContentsApi {
    /// Raw contents of `path` on the default branch. `Ok(None)` when the
    /// file does not exist.
    fn fetch_file(&self, repository: &Repository, path: &str) -> Result<Option<String>>;
}

/// Blocking client over `ureq`.
pub struct GitHubClient {
    agent: Agent,
    api_url: Url,
    token: String,
}

impl GitHubClient {
    pub fn new(api_url: &str, token: impl Into<String>) -> Result<Self> {
        let api_url =
            Url::parse(api_url).with_context(|| format!("Invalid GitHub API URL: {}", api_url))?;
        if api_url.scheme() != "http" && api_url.scheme() != "https" {
            return Err(anyhow!("Invalid GitHub API URL: {}", api_url));
        }

        let agent = AgentBuilder::new()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("pr-template-check/", env!("CARGO_PKG_VERSION")))
            .build();

        Ok(Self {
            agent,
            api_url,
            token: token.into(),
        })
    }

    /// Build from `GITHUB_API_URL` and the `github-token` input, falling back
    /// to `GITHUB_TOKEN`.
    pub fn from_env() -> Result<Self> {
        let api_url = std::env::var(ENV_API_URL)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let token = get_input(INPUT_GITHUB_TOKEN)
            .or_else(|| std::env::var(ENV_TOKEN).ok().filter(|v| !v.is_empty()))
            .ok_or_else(|| {
                anyhow!("GitHub token not set. Provide the github-token input or GITHUB_TOKEN")
            })?;

        Self::new(&api_url, token)
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// API URL for `segments`, each percent-encoded as one path segment.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("GitHub API URL cannot be a base: {}", self.api_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: &str, url: &Url, accept: &str) -> ureq::Request {
        self.agent
            .request_url(method, url)
            .set("Accept", accept)
            .set("Authorization", &format!("Bearer {}", self.token))
            .set("X-GitHub-Api-Version", API_VERSION)
    }

    fn issue_endpoint(&self, pr: &PullRequestRef, tail: &[&str]) -> Result<Url> {
        let number = pr.number.to_string();
        let mut segments = vec![
            "repos",
            pr.repository.owner.as_str(),
            pr.repository.name.as_str(),
            "issues",
            number.as_str(),
        ];
        segments.extend_from_slice(tail);
        self.endpoint(&segments)
    }

    fn send(&self, method: &str, url: &Url, body: serde_json::Value) -> Result<()> {
        self.request(method, url, ACCEPT_JSON)
            .send_json(body)
            .map_err(|e| anyhow!("GitHub API request failed: {} {}: {}", method, url.path(), e))?;
        Ok(())
    }
}

impl IssueApi for GitHubClient {
    fn create_comment(&self, pr: &PullRequestRef, body: &str) -> Result<()> {
        let url = self.issue_endpoint(pr, &["comments"])?;
        self.send("POST", &url, serde_json::json!({ "body": body }))
    }

    fn add_label(&self, pr: &PullRequestRef, label: &str) -> Result<()> {
        let url = self.issue_endpoint(pr, &["labels"])?;
        self.send("POST", &url, serde_json::json!({ "labels": [label] }))
    }

    fn remove_label(&self, pr: &PullRequestRef, label: &str) -> Result<()> {
        let url = self.issue_endpoint(pr, &["labels", label])?;
        self.request("DELETE", &url, ACCEPT_JSON)
            .call()
            .map_err(|e| anyhow!("GitHub API request failed: DELETE {}: {}", url.path(), e))?;
        Ok(())
    }

    fn create_check_run(&self, pr: &PullRequestRef, check: &CheckRun) -> Result<()> {
        let url = self.endpoint(&[
            "repos",
            pr.repository.owner.as_str(),
            pr.repository.name.as_str(),
            "check-runs",
        ])?;
        let completed_at = crate::utc_now_iso();
        self.send("POST", &url, check.to_request_body(&completed_at))
    }
}

impl ContentsApi for GitHubClient {
    fn fetch_file(&self, repository: &Repository, path: &str) -> Result<Option<String>> {
        let mut segments = vec![
            "repos",
            repository.owner.as_str(),
            repository.name.as_str(),
            "contents",
        ];
        segments.extend(path.split('/').filter(|s| !s.is_empty()));
        let url = self.endpoint(&segments)?;

        match self.request("GET", &url, ACCEPT_RAW).call() {
            Ok(response) => {
                let content = response
                    .into_string()
                    .with_context(|| format!("Failed to read {} from the GitHub API", path))?;
                Ok(Some(content))
            }
            Err(ureq::Error::Status(404, _)) => Ok(None),
            Err(e) => Err(anyhow!("Failed to fetch {} from the GitHub API: {}", path, e)),
        }
    }
}
