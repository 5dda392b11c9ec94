//! Publishing a validation verdict.
//!
//! [`GitHubReporter`] posts a comment, updates the failure label and creates
//! a check run. The three actions are independent: each failure is logged
//! and the remaining actions still run. [`ConsoleReporter`] renders the same
//! verdict for a terminal.

use colored::Colorize;

use crate::checker::ValidationResult;
use crate::diagnostics::Diagnostics;
use crate::event::PullRequestRef;
use crate::github::{CheckRun, Conclusion, IssueApi};
use crate::ui;

pub const CHECK_RUN_NAME: &str = "PR Template Validation";

/// Comment body posted when validation passes.
pub fn success_comment() -> String {
    "### :white_check_mark: PR Template Validation Passed\n\n\
     This pull request complies with the template requirements."
        .to_string()
}

/// Comment body posted when validation fails, one paragraph per error.
pub fn failure_comment(errors: &[String]) -> String {
    format!(
        "### :x: PR Template Validation Failed\n\n{}",
        errors.join("\n\n")
    )
}

/// Check run summary for a failed validation, one line per error.
pub fn failure_summary(errors: &[String]) -> String {
    format!(
        "PR template validation failed with errors:\n{}",
        errors.join("\n")
    )
}

/// Message the action fails with.
pub fn failure_message(errors: &[String]) -> String {
    format!(
        "Pull request does not comply with the template. {}",
        errors.join(", ")
    )
}

/// Check run for `result` on the pull request's head commit.
pub fn check_run_for(pr: &PullRequestRef, result: &ValidationResult) -> CheckRun {
    let (conclusion, title, summary) = if result.is_valid() {
        (
            Conclusion::Success,
            "PR Template Valid",
            "PR template validation passed".to_string(),
        )
    } else {
        (
            Conclusion::Failure,
            "PR Template Invalid",
            failure_summary(&result.messages()),
        )
    };

    CheckRun {
        name: CHECK_RUN_NAME.to_string(),
        head_sha: pr.head_sha.clone(),
        conclusion,
        title: title.to_string(),
        summary,
    }
}

/// What happened to one reporting action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionStatus {
    #[default]
    Skipped,
    Succeeded,
    Failed,
}

/// Per-action results of one report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReportOutcome {
    pub comment: ActionStatus,
    pub label: ActionStatus,
    pub check_run: ActionStatus,
}

impl ReportOutcome {
    /// True when no action failed.
    pub fn is_clean(&self) -> bool {
        ![self.comment, self.label, self.check_run].contains(&ActionStatus::Failed)
    }
}

/// Publishes a verdict somewhere.
pub trait Reporter {
    fn report(&self, pr: &PullRequestRef, result: &ValidationResult) -> ReportOutcome;
}

/// Reports to the pull request through the GitHub API.
pub struct GitHubReporter<'a, A: IssueApi> {
    api: &'a A,
    label_name: String,
    diagnostics: &'a dyn Diagnostics,
}

impl<'a, A: IssueApi> GitHubReporter<'a, A> {
    pub fn new(api: &'a A, label_name: impl Into<String>, diagnostics: &'a dyn Diagnostics) -> Self {
        Self {
            api,
            label_name: label_name.into(),
            diagnostics,
        }
    }

    fn status(
        &self,
        outcome: anyhow::Result<()>,
        on_error: impl FnOnce(&anyhow::Error),
    ) -> ActionStatus {
        match outcome {
            Ok(()) => ActionStatus::Succeeded,
            Err(e) => {
                on_error(&e);
                ActionStatus::Failed
            }
        }
    }

    fn report_success(&self, pr: &PullRequestRef) -> ReportOutcome {
        let comment = self.status(self.api.create_comment(pr, &success_comment()), |e| {
            self.diagnostics
                .warn(&format!("Failed to create success comment: {:#}", e))
        });

        let label = self.status(self.api.remove_label(pr, &self.label_name), |_| {
            self.diagnostics.debug(&format!(
                "Label {} might not exist on PR #{}",
                self.label_name, pr.number
            ))
        });

        let check_run = self.create_check(pr, &ValidationResult::from_violations(Vec::new()));

        self.diagnostics
            .info("Pull request description is compliant with the template.");

        ReportOutcome {
            comment,
            label,
            check_run,
        }
    }

    fn report_failure(&self, pr: &PullRequestRef, result: &ValidationResult) -> ReportOutcome {
        let errors = result.messages();

        let comment = self.status(self.api.create_comment(pr, &failure_comment(&errors)), |e| {
            self.diagnostics
                .warn(&format!("Failed to create failure comment: {:#}", e))
        });

        let label = self.status(self.api.add_label(pr, &self.label_name), |e| {
            self.diagnostics
                .warn(&format!("Failed to add label: {:#}", e))
        });

        let check_run = self.create_check(pr, result);

        ReportOutcome {
            comment,
            label,
            check_run,
        }
    }

    fn create_check(&self, pr: &PullRequestRef, result: &ValidationResult) -> ActionStatus {
        let check = check_run_for(pr, result);
        self.status(self.api.create_check_run(pr, &check), |e| {
            self.diagnostics
                .warn(&format!("Failed to create check: {:#}", e))
        })
    }
}

impl<A: IssueApi> Reporter for GitHubReporter<'_, A> {
    fn report(&self, pr: &PullRequestRef, result: &ValidationResult) -> ReportOutcome {
        if result.is_valid() {
            self.report_success(pr)
        } else {
            self.report_failure(pr, result)
        }
    }
}

/// Prints the verdict to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    /// Text of the verdict, colored when the terminal supports it.
    pub fn render(&self, result: &ValidationResult) -> String {
        let mut out = String::new();
        if result.is_valid() {
            out.push_str(&format!(
                "{} {}",
                ui::verdict_icon(true),
                ui::colors::success("PR description complies with the template")
            ));
        } else {
            out.push_str(&format!(
                "{} {}",
                ui::verdict_icon(false),
                ui::colors::error(&format!(
                    "PR description does not comply with the template ({} {})",
                    result.errors().len(),
                    ui::format::plural(result.errors().len(), "error", "errors")
                ))
            ));
            for message in result.messages() {
                out.push_str(&format!("\n  {} {}", "-".dimmed(), message));
            }
        }
        out
    }

    pub fn print(&self, result: &ValidationResult) {
        println!("{}", self.render(result));
    }
}

impl Reporter for ConsoleReporter {
    fn report(&self, pr: &PullRequestRef, result: &ValidationResult) -> ReportOutcome {
        println!(
            "{} {}",
            ui::colors::heading("Pull request"),
            ui::colors::identifier(&format!("{}#{}", pr.repository, pr.number))
        );
        self.print(result);
        ReportOutcome::default()
    }
}
