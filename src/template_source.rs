//! Pull request template retrieval.
//!
//! A template is looked up at a list of well-known paths, first on the
//! local checkout and then through the GitHub contents API. The first hit
//! wins. Retrieval failures are never fatal: without a template the checker
//! falls back to name-only section checks.

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

use crate::diagnostics::Diagnostics;
use crate::event::Repository;
use crate::github::ContentsApi;

/// Something that can produce the repository's PR template.
pub trait TemplateSource {
    /// The template text, or `None` when no template exists.
    fn fetch(&self) -> Result<Option<String>>;
}

/// A fixed template, or none.
#[derive(Debug, Clone, Default)]
pub struct StaticTemplateSource {
    template: Option<String>,
}

impl StaticTemplateSource {
    pub fn new(template: Option<String>) -> Self {
        Self { template }
    }

    pub fn none() -> Self {
        Self::default()
    }
}

impl TemplateSource for StaticTemplateSource {
    fn fetch(&self) -> Result<Option<String>> {
        Ok(self.template.clone())
    }
}

/// Looks for the template under a checkout root.
pub struct FileTemplateSource<'a> {
    root: PathBuf,
    paths: Vec<String>,
    diagnostics: &'a dyn Diagnostics,
}

impl<'a> FileTemplateSource<'a> {
    pub fn new(root: impl Into<PathBuf>, paths: Vec<String>, diagnostics: &'a dyn Diagnostics) -> Self {
        Self {
            root: root.into(),
            paths,
            diagnostics,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TemplateSource for FileTemplateSource<'_> {
    fn fetch(&self) -> Result<Option<String>> {
        for relative in &self.paths {
            let path = self.root.join(relative);
            if !path.is_file() {
                continue;
            }
            match fs::read_to_string(&path) {
                Ok(content) => {
                    self.diagnostics
                        .info(&format!("Found PR template at {}", relative));
                    return Ok(Some(content));
                }
                Err(e) => {
                    self.diagnostics
                        .debug(&format!("Could not read template {}: {}", path.display(), e));
                }
            }
        }
        Ok(None)
    }
}

/// Fetches the template through the GitHub contents API.
pub struct GitHubTemplateSource<'a, C: ContentsApi> {
    api: &'a C,
    repository: Repository,
    paths: Vec<String>,
    diagnostics: &'a dyn Diagnostics,
}

impl<'a, C: ContentsApi> GitHubTemplateSource<'a, C> {
    pub fn new(
        api: &'a C,
        repository: Repository,
        paths: Vec<String>,
        diagnostics: &'a dyn Diagnostics,
    ) -> Self {
        Self {
            api,
            repository,
            paths,
            diagnostics,
        }
    }
}

impl<C: ContentsApi> TemplateSource for GitHubTemplateSource<'_, C> {
    fn fetch(&self) -> Result<Option<String>> {
        for path in &self.paths {
            match self.api.fetch_file(&self.repository, path) {
                Ok(Some(content)) => {
                    self.diagnostics
                        .info(&format!("Found PR template at {} via GitHub API", path));
                    return Ok(Some(content));
                }
                Ok(None) => continue,
                Err(e) => {
                    self.diagnostics
                        .debug(&format!("Error fetching template via API: {:#}", e));
                    return Ok(None);
                }
            }
        }
        Ok(None)
    }
}

/// Tries `primary`, then `secondary`.
pub struct FallbackTemplateSource<'a, P: TemplateSource, S: TemplateSource> {
    primary: P,
    secondary: S,
    diagnostics: &'a dyn Diagnostics,
}

impl<'a, P: TemplateSource, S: TemplateSource> FallbackTemplateSource<'a, P, S> {
    pub fn new(primary: P, secondary: S, diagnostics: &'a dyn Diagnostics) -> Self {
        Self {
            primary,
            secondary,
            diagnostics,
        }
    }
}

impl<P: TemplateSource, S: TemplateSource> TemplateSource for FallbackTemplateSource<'_, P, S> {
    fn fetch(&self) -> Result<Option<String>> {
        let found = match self.primary.fetch() {
            Ok(Some(template)) => Some(template),
            Ok(None) => self.secondary.fetch()?,
            Err(e) => {
                self.diagnostics
                    .debug(&format!("Error finding template in filesystem: {:#}", e));
                self.secondary.fetch()?
            }
        };

        if found.is_none() {
            self.diagnostics
                .info("No PR template found in filesystem or via GitHub API");
        }
        Ok(found)
    }
}
