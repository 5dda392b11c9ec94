//! GitHub Actions runs against an in-memory GitHub

use crate::common;
use crate::support::fakes::{ApiCall, FakeGitHub};
use crate::support::fixtures::{load_fixture, pull_request_payload, template_sections};

use pr_template_check::action::{ActionOutcome, ActionRunner};
use pr_template_check::config::Config;
use pr_template_check::diagnostics::{Level, RecordingDiagnostics};
use pr_template_check::event::{ActionContext, EventPayload, Repository};
use pr_template_check::github::Conclusion;
use pr_template_check::report::{success_comment, ActionStatus};
use tempfile::TempDir;

fn repo() -> Repository {
    Repository {
        owner: "acme".to_string(),
        name: "uploader".to_string(),
    }
}

fn enforcing_config() -> Config {
    Config {
        required_sections: template_sections(),
        jira_pattern: r"[A-Z]+-\d+".to_string(),
        enforce_template: true,
        require_task_completion: true,
        skip_service_accounts: vec!["[bot]".to_string()],
        ..Config::default()
    }
}

fn payload(title: &str, body: Option<&str>, login: &str) -> EventPayload {
    EventPayload::parse(&pull_request_payload(31, title, body, login)).unwrap()
}

fn workspace_with_template() -> TempDir {
    let tmp = TempDir::new().unwrap();
    common::write_file(
        tmp.path(),
        ".github/pull_request_template.md",
        &load_fixture("template"),
    );
    tmp
}

#[test]
fn test_compliant_pull_request_passes() {
    let workspace = workspace_with_template();
    let api = FakeGitHub::new();
    let diag = RecordingDiagnostics::new();
    let config = enforcing_config();
    let runner = ActionRunner::new(&config, &api, workspace.path(), &diag);

    let body = load_fixture("compliant");
    let outcome = runner
        .run_event(
            "pull_request",
            payload("SYNC-481 Retry uploads", Some(&body), "octocat"),
            &repo(),
        )
        .unwrap();

    match &outcome {
        ActionOutcome::Passed { result, report } => {
            assert!(result.is_valid());
            assert!(report.is_clean());
        }
        other => panic!("expected pass, got {:?}", other),
    }
    assert!(!outcome.is_failure());

    let calls = api.report_calls();
    assert_eq!(
        calls[0],
        ApiCall::Comment {
            number: 31,
            body: success_comment()
        }
    );
    assert_eq!(
        calls[1],
        ApiCall::RemoveLabel {
            number: 31,
            label: "invalid-template".to_string()
        }
    );
    let checks = api.check_runs();
    assert_eq!(checks.len(), 1);
    assert_eq!(checks[0].conclusion, Conclusion::Success);
    assert_eq!(checks[0].head_sha, "0123456789abcdef");

    // Local template found, API never consulted.
    assert!(!api.calls().iter().any(|c| matches!(c, ApiCall::FetchFile(_))));
    assert!(diag.contains(Level::Info, "Repository PR template found."));
}

#[test]
fn test_placeholder_pull_request_fails() {
    let workspace = workspace_with_template();
    let api = FakeGitHub::new();
    let diag = RecordingDiagnostics::new();
    let config = Config {
        label_name: "needs-description".to_string(),
        ..enforcing_config()
    };
    let runner = ActionRunner::new(&config, &api, workspace.path(), &diag);

    let body = load_fixture("placeholder");
    let outcome = runner
        .run_event(
            "pull_request_target",
            payload("SYNC-9 Bump parser", Some(&body), "octocat"),
            &repo(),
        )
        .unwrap();

    assert!(outcome.is_failure());
    match outcome {
        ActionOutcome::Failed { result, message, .. } => {
            assert_eq!(result.errors().len(), 3);
            assert_eq!(
                message,
                "Pull request does not comply with the template. \
                 Section \"Summary\" appears to contain unmodified template content., \
                 Section \"Testing\" appears to be empty., \
                 Section \"Checklist\" has no completed task items. Please complete at least one task."
            );
        }
        other => panic!("expected failure, got {:?}", other),
    }

    let calls = api.report_calls();
    assert_eq!(calls.len(), 3);
    match &calls[0] {
        ApiCall::Comment { body, .. } => {
            assert!(body.starts_with("### :x: PR Template Validation Failed\n\n"));
            assert!(body.contains("appears to be empty.\n\nSection \"Checklist\""));
        }
        other => panic!("unexpected call {:?}", other),
    }
    assert_eq!(
        calls[1],
        ApiCall::AddLabel {
            number: 31,
            label: "needs-description".to_string()
        }
    );
    assert_eq!(api.check_runs()[0].title, "PR Template Invalid");
}

#[test]
fn test_null_body_is_treated_as_empty() {
    let workspace = workspace_with_template();
    let api = FakeGitHub::new();
    let diag = RecordingDiagnostics::new();
    let config = enforcing_config();
    let runner = ActionRunner::new(&config, &api, workspace.path(), &diag);

    let outcome = runner
        .run_event("pull_request", payload("SYNC-1 x", None, "octocat"), &repo())
        .unwrap();

    match outcome {
        ActionOutcome::Failed { result, .. } => {
            assert_eq!(
                result.messages(),
                vec![
                    "Missing required section: \"Summary\"",
                    "Missing required section: \"Changes\"",
                    "Missing required section: \"Testing\"",
                    "Missing required section: \"Checklist\"",
                ]
            );
        }
        other => panic!("expected failure, got {:?}", other),
    }
}

#[test]
fn test_template_fetched_from_api_when_not_checked_out() {
    let workspace = TempDir::new().unwrap();
    let api = FakeGitHub::new().with_file("docs/PULL_REQUEST_TEMPLATE.md", &load_fixture("template"));
    let diag = RecordingDiagnostics::new();
    let config = enforcing_config();
    let runner = ActionRunner::new(&config, &api, workspace.path(), &diag);

    let body = load_fixture("placeholder");
    let outcome = runner
        .run_event("pull_request", payload("SYNC-2 y", Some(&body), "octocat"), &repo())
        .unwrap();
    assert!(outcome.is_failure());

    let fetched: Vec<String> = api
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            ApiCall::FetchFile(path) => Some(path),
            _ => None,
        })
        .collect();
    assert_eq!(fetched.len(), 5);
    assert_eq!(fetched[4], "docs/PULL_REQUEST_TEMPLATE.md");
}

#[test]
fn test_missing_template_falls_back_to_name_check() {
    let workspace = TempDir::new().unwrap();
    let api = FakeGitHub::new();
    let diag = RecordingDiagnostics::new();
    let config = enforcing_config();
    let runner = ActionRunner::new(&config, &api, workspace.path(), &diag);

    // Literal "## ..." markers are all present, so the name-only scan passes.
    let body = load_fixture("placeholder");
    let outcome = runner
        .run_event("pull_request", payload("SYNC-3 z", Some(&body), "octocat"), &repo())
        .unwrap();

    assert!(matches!(outcome, ActionOutcome::Passed { .. }));
    assert!(diag.contains(
        Level::Warning,
        "No PR template found in repository. Will check for required sections only."
    ));
    assert!(diag.contains(
        Level::Info,
        "No PR template found in filesystem or via GitHub API"
    ));
}

#[test]
fn test_blank_template_falls_back_to_name_check() {
    let workspace = TempDir::new().unwrap();
    common::write_file(workspace.path(), ".github/PULL_REQUEST_TEMPLATE.md", "  \n");
    let api = FakeGitHub::new();
    let diag = RecordingDiagnostics::new();
    let config = enforcing_config();
    let runner = ActionRunner::new(&config, &api, workspace.path(), &diag);

    let outcome = runner
        .run_event(
            "pull_request",
            payload("SYNC-7 t", Some("Just a sentence."), "octocat"),
            &repo(),
        )
        .unwrap();

    match outcome {
        ActionOutcome::Failed { result, .. } => {
            assert_eq!(result.errors().len(), 4);
            assert_eq!(
                result.messages()[0],
                "Missing required section: \"## Summary\""
            );
        }
        other => panic!("expected failure, got {:?}", other),
    }
    assert!(diag.contains(
        Level::Warning,
        "No PR template found in repository. Will check for required sections only."
    ));
}

#[test]
fn test_template_ignored_when_not_enforced() {
    let workspace = workspace_with_template();
    let api = FakeGitHub::new();
    let diag = RecordingDiagnostics::new();
    let config = Config {
        enforce_template: false,
        ..enforcing_config()
    };
    let runner = ActionRunner::new(&config, &api, workspace.path(), &diag);

    let body = load_fixture("placeholder");
    let outcome = runner
        .run_event("pull_request", payload("SYNC-4 w", Some(&body), "octocat"), &repo())
        .unwrap();

    assert!(matches!(outcome, ActionOutcome::Passed { .. }));
    assert!(!diag.contains(Level::Info, "Fetching repository PR template"));
}

#[test]
fn test_service_account_is_skipped() {
    let workspace = workspace_with_template();
    let api = FakeGitHub::new();
    let diag = RecordingDiagnostics::new();
    let config = enforcing_config();
    let runner = ActionRunner::new(&config, &api, workspace.path(), &diag);

    let outcome = runner
        .run_event("pull_request", payload("deps", None, "dependabot[bot]"), &repo())
        .unwrap();

    assert_eq!(outcome, ActionOutcome::SkippedUser("dependabot[bot]".to_string()));
    assert!(api.calls().is_empty());
    assert!(diag.contains(
        Level::Info,
        "Skipping template check for user: dependabot[bot]"
    ));
}

#[test]
fn test_non_pull_request_event_is_ignored() {
    let workspace = TempDir::new().unwrap();
    let api = FakeGitHub::new();
    let diag = RecordingDiagnostics::new();
    let config = enforcing_config();
    let runner = ActionRunner::new(&config, &api, workspace.path(), &diag);

    let context = ActionContext {
        event_name: "push".to_string(),
        event_path: workspace.path().join("does-not-exist.json"),
        repository: repo(),
    };
    let outcome = runner.run(&context).unwrap();

    assert_eq!(outcome, ActionOutcome::NotPullRequest);
    assert!(api.calls().is_empty());
    assert!(diag.contains(Level::Info, "This action only runs on pull request events."));
}

#[test]
fn test_run_reads_event_file() {
    let workspace = workspace_with_template();
    let body = load_fixture("compliant");
    let event_path = common::write_file(
        workspace.path(),
        "event.json",
        &pull_request_payload(31, "SYNC-5 v", Some(&body), "octocat"),
    );
    let api = FakeGitHub::new();
    let diag = RecordingDiagnostics::new();
    let config = enforcing_config();
    let runner = ActionRunner::new(&config, &api, workspace.path(), &diag);

    let context = ActionContext {
        event_name: "pull_request".to_string(),
        event_path,
        repository: repo(),
    };
    assert!(matches!(runner.run(&context).unwrap(), ActionOutcome::Passed { .. }));
}

#[test]
fn test_missing_pull_request_data_is_an_error() {
    let workspace = TempDir::new().unwrap();
    let api = FakeGitHub::new();
    let diag = RecordingDiagnostics::new();
    let config = enforcing_config();
    let runner = ActionRunner::new(&config, &api, workspace.path(), &diag);

    let payload = EventPayload::parse(r#"{"action": "opened"}"#).unwrap();
    let err = runner
        .run_event("pull_request", payload, &repo())
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Could not find pull request data in the event payload"
    );
}

#[test]
fn test_reporting_failures_do_not_abort_the_run() {
    let workspace = workspace_with_template();
    let api = FakeGitHub::new().failing(&["comment", "add_label"]);
    let diag = RecordingDiagnostics::new();
    let config = enforcing_config();
    let runner = ActionRunner::new(&config, &api, workspace.path(), &diag);

    let body = load_fixture("placeholder");
    let outcome = runner
        .run_event("pull_request", payload("SYNC-6 u", Some(&body), "octocat"), &repo())
        .unwrap();

    match outcome {
        ActionOutcome::Failed { report, .. } => {
            assert_eq!(report.comment, ActionStatus::Failed);
            assert_eq!(report.label, ActionStatus::Failed);
            assert_eq!(report.check_run, ActionStatus::Succeeded);
        }
        other => panic!("expected failure, got {:?}", other),
    }
    assert_eq!(api.check_runs().len(), 1);
    assert!(diag.contains(Level::Warning, "Failed to create failure comment"));
    assert!(diag.contains(Level::Warning, "Failed to add label"));
}
