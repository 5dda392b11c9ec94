//! GitHub Actions run: event filtering, skip policy, template lookup,
//! validation and reporting for one pull request event.

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::checker::{TemplateChecker, ValidationResult};
use crate::config::Config;
use crate::diagnostics::Diagnostics;
use crate::event::{
    is_pull_request_event, should_skip_user, ActionContext, EventPayload, PullRequestRef,
    Repository,
};
use crate::github::{ContentsApi, IssueApi};
use crate::report::{failure_message, GitHubReporter, ReportOutcome, Reporter};
use crate::template_source::{
    FallbackTemplateSource, FileTemplateSource, GitHubTemplateSource, TemplateSource,
};

/// How an action run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// The triggering event was not a pull request event.
    NotPullRequest,
    /// The author is exempt from checks.
    SkippedUser(String),
    /// The description complies.
    Passed {
        result: ValidationResult,
        report: ReportOutcome,
    },
    /// The description does not comply. `message` is what the step fails with.
    Failed {
        result: ValidationResult,
        report: ReportOutcome,
        message: String,
    },
}

impl ActionOutcome {
    /// Whether the workflow step should fail.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Runs the check for one event against a resolved configuration.
pub struct ActionRunner<'a, A: IssueApi + ContentsApi> {
    config: &'a Config,
    api: &'a A,
    workspace: PathBuf,
    diagnostics: &'a dyn Diagnostics,
}

impl<'a, A: IssueApi + ContentsApi> ActionRunner<'a, A> {
    pub fn new(
        config: &'a Config,
        api: &'a A,
        workspace: impl Into<PathBuf>,
        diagnostics: &'a dyn Diagnostics,
    ) -> Self {
        Self {
            config,
            api,
            workspace: workspace.into(),
            diagnostics,
        }
    }

    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    /// Load the event named by `context` and handle it.
    pub fn run(&self, context: &ActionContext) -> Result<ActionOutcome> {
        if !is_pull_request_event(&context.event_name) {
            self.diagnostics
                .info("This action only runs on pull request events.");
            return Ok(ActionOutcome::NotPullRequest);
        }

        let payload = EventPayload::load(&context.event_path)?;
        self.run_event(&context.event_name, payload, &context.repository)
    }

    pub fn run_event(
        &self,
        event_name: &str,
        payload: EventPayload,
        repository: &Repository,
    ) -> Result<ActionOutcome> {
        if !is_pull_request_event(event_name) {
            self.diagnostics
                .info("This action only runs on pull request events.");
            return Ok(ActionOutcome::NotPullRequest);
        }

        let pull_request = payload.into_pull_request()?;

        let login = pull_request.author();
        if should_skip_user(
            login,
            &self.config.skip_users,
            &self.config.skip_service_accounts,
        ) {
            self.diagnostics
                .info(&format!("Skipping template check for user: {}", login));
            return Ok(ActionOutcome::SkippedUser(login.to_string()));
        }

        let template = if self.config.enforce_template {
            self.fetch_template(repository)
        } else {
            None
        };

        let checker = TemplateChecker::new(self.config.checker_options(template));
        let result = checker.validate_with(pull_request.body(), &pull_request.title, self.diagnostics);

        let pr = PullRequestRef::new(repository.clone(), &pull_request);
        let reporter = GitHubReporter::new(self.api, self.config.label_name.as_str(), self.diagnostics);
        let report = reporter.report(&pr, &result);

        if result.is_valid() {
            Ok(ActionOutcome::Passed { result, report })
        } else {
            let message = failure_message(&result.messages());
            Ok(ActionOutcome::Failed {
                result,
                report,
                message,
            })
        }
    }

    fn fetch_template(&self, repository: &Repository) -> Option<String> {
        self.diagnostics.info("Fetching repository PR template...");

        let source = FallbackTemplateSource::new(
            FileTemplateSource::new(
                &self.workspace,
                self.config.template_paths.clone(),
                self.diagnostics,
            ),
            GitHubTemplateSource::new(
                self.api,
                repository.clone(),
                self.config.template_paths.clone(),
                self.diagnostics,
            ),
            self.diagnostics,
        );

        let template = source
            .fetch()
            .unwrap_or_else(|e| {
                self.diagnostics
                    .debug(&format!("Error retrieving PR template: {:#}", e));
                None
            })
            .filter(|t| !t.trim().is_empty());

        if template.is_some() {
            self.diagnostics.info("Repository PR template found.");
        } else {
            self.diagnostics.warn(
                "No PR template found in repository. Will check for required sections only.",
            );
        }
        template
    }
}
