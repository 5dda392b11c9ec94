//! # pr-template-check
//!
//! Checks pull request descriptions against the repository's PR template.
//!
//! ## Overview
//!
//! A description is split into markdown sections and compared with the
//! template's sections. A pull request is rejected when a required section
//! is missing or empty, when a section still contains the template's
//! placeholder text, when a template task list was dropped or left
//! unchecked, or when the title lacks a ticket reference.
//!
//! ## Modules
//!
//! - [`markdown`] - Section splitting, front matter and task list parsing
//! - [`score`] - Word-level similarity between template and description text
//! - [`compare`] - Section-by-section template comparison
//! - [`checker`] - Rule engine combining template and title checks
//! - [`config`] - Layered configuration (file, action inputs, flags)
//! - [`event`] - GitHub Actions pull request event context
//! - [`template_source`] - Locating the repository's PR template
//! - [`github`] - Minimal GitHub REST client
//! - [`report`] - Publishing a verdict as comment, label and check run
//! - [`action`] - GitHub Actions run for one pull request event
//!
//! ## Example
//!
//! ```
//! use pr_template_check::checker::{CheckerOptions, TemplateChecker};
//!
//! let checker = TemplateChecker::new(CheckerOptions {
//!     required_sections: vec!["## Summary".to_string()],
//!     ticket_pattern: Some(r"[A-Z]+-\d+".to_string()),
//!     ..Default::default()
//! });
//!
//! let result = checker.validate("## Summary\nAdds retries to the uploader.", "PROJ-12 Retry uploads");
//! assert!(result.is_valid());
//! ```

pub mod action;
pub mod checker;
pub mod compare;
pub mod config;
pub mod diagnostics;
pub mod event;
pub mod github;
pub mod markdown;
pub mod report;
pub mod score;
pub mod template_source;
pub mod ui;
pub mod violation;

/// Well-known file locations.
pub mod paths {
    /// Project configuration file: `.github/pr-template-check.md`
    pub const CONFIG_FILE: &str = ".github/pr-template-check.md";

    /// PR template locations, in lookup order.
    pub const TEMPLATE_PATHS: &[&str] = &[
        ".github/PULL_REQUEST_TEMPLATE.md",
        ".github/pull_request_template.md",
        "PULL_REQUEST_TEMPLATE.md",
        "pull_request_template.md",
        "docs/PULL_REQUEST_TEMPLATE.md",
        "docs/pull_request_template.md",
        ".github/PULL_REQUEST_TEMPLATE/default.md",
    ];
}

/// Generate a UTC timestamp in ISO 8601 format: `YYYY-MM-DDTHH:MM:SSZ`
pub fn utc_now_iso() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
