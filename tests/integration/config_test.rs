//! Config

use crate::common;
use crate::support::fixtures::load_fixture;

use pr_template_check::config::{Config, PartialConfig};
use pr_template_check::diagnostics::{Level, NullDiagnostics, RecordingDiagnostics};
use pr_template_check::paths::CONFIG_FILE;
use serial_test::serial;
use tempfile::TempDir;

#[test]
fn test_fixture_config_loads() {
    let config = Config::parse(&load_fixture("config")).unwrap();
    assert_eq!(
        config.required_sections,
        vec!["## Summary", "## Changes", "## Testing", "## Checklist"]
    );
    assert_eq!(config.jira_pattern, r"[A-Z]+-\d+");
    assert!(config.enforce_template);
    assert!(config.require_task_completion);
    assert_eq!(config.skip_service_accounts, vec!["[bot]"]);
    assert_eq!(config.label_name, "invalid-template");
}

#[test]
fn test_inputs_override_file_per_field() {
    let tmp = TempDir::new().unwrap();
    let path = common::write_file(tmp.path(), CONFIG_FILE, &load_fixture("config"));

    let file_layer = PartialConfig::load_optional(&path).unwrap();
    let input_layer = PartialConfig::from_action_inputs(
        &|name: &str| match name {
            "required-sections" => Some(r#"["Summary"]"#.to_string()),
            "require-task-completion" => Some("false".to_string()),
            "label-name" => Some("template-needed".to_string()),
            _ => None,
        },
        &NullDiagnostics,
    )
    .unwrap();

    let config = Config::resolve([file_layer, input_layer]).unwrap();
    assert_eq!(config.required_sections, vec!["Summary"]);
    assert!(!config.require_task_completion);
    assert_eq!(config.label_name, "template-needed");
    // Untouched by inputs
    assert!(config.enforce_template);
    assert_eq!(config.jira_pattern, r"[A-Z]+-\d+");
}

#[test]
fn test_malformed_list_input_keeps_file_value() {
    let tmp = TempDir::new().unwrap();
    let path = common::write_file(tmp.path(), CONFIG_FILE, &load_fixture("config"));
    let diag = RecordingDiagnostics::new();

    let input_layer = PartialConfig::from_action_inputs(
        &|name: &str| (name == "skip-users").then(|| "octocat".to_string()),
        &diag,
    )
    .unwrap();
    let config =
        Config::resolve([PartialConfig::load_optional(&path).unwrap(), input_layer]).unwrap();

    assert!(config.skip_users.is_empty());
    assert_eq!(config.skip_service_accounts, vec!["[bot]"]);
    assert!(diag.contains(Level::Warning, "Invalid JSON format for input 'skip-users'"));
}

#[test]
fn test_missing_config_file_is_an_empty_layer() {
    let tmp = TempDir::new().unwrap();
    let layer = PartialConfig::load_optional(&tmp.path().join(CONFIG_FILE)).unwrap();
    assert_eq!(layer, PartialConfig::default());
}

#[test]
#[serial]
fn test_inputs_from_environment() {
    std::env::set_var("INPUT_REQUIRED-SECTIONS", r###"["## Summary"]"###);
    std::env::set_var("INPUT_ENFORCE-TEMPLATE", "true");

    let layer = PartialConfig::from_env(&NullDiagnostics);

    std::env::remove_var("INPUT_REQUIRED-SECTIONS");
    std::env::remove_var("INPUT_ENFORCE-TEMPLATE");

    let layer = layer.unwrap();
    assert_eq!(layer.required_sections, Some(vec!["## Summary".to_string()]));
    assert_eq!(layer.enforce_template, Some(true));
    assert_eq!(layer.label_name, None);
}
