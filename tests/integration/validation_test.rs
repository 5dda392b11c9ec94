//! End-to-end validation of descriptions against templates

use crate::support::fixtures::{load_fixture, template_sections};

use pr_template_check::checker::{CheckerOptions, TemplateChecker, ValidationResult};
use pr_template_check::compare::compare;
use pr_template_check::markdown::{extract_checklist, split_sections};
use pr_template_check::violation::Violation;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn validate(
    description: &str,
    title: &str,
    template: Option<&str>,
    required: &[&str],
    completion: bool,
    pattern: Option<&str>,
) -> ValidationResult {
    TemplateChecker::new(CheckerOptions {
        required_sections: strings(required),
        ticket_pattern: pattern.map(str::to_string),
        template: template.map(str::to_string),
        require_checklist_completion: completion,
    })
    .validate(description, title)
}

#[test]
fn test_compliant_description_passes() {
    let template = load_fixture("template");
    let result = TemplateChecker::new(CheckerOptions {
        required_sections: template_sections(),
        ticket_pattern: Some(r"[A-Z]+-\d+".to_string()),
        template: Some(template),
        require_checklist_completion: true,
    })
    .validate(&load_fixture("compliant"), "SYNC-481 Retry uploads on 503");

    assert!(result.is_valid(), "unexpected errors: {:?}", result.messages());
    assert!(result.errors().is_empty());
}

#[test]
fn test_placeholder_description_reports_every_problem_in_template_order() {
    let template = load_fixture("template");
    let result = TemplateChecker::new(CheckerOptions {
        required_sections: template_sections(),
        ticket_pattern: Some(r"[A-Z]+-\d+".to_string()),
        template: Some(template),
        require_checklist_completion: true,
    })
    .validate(&load_fixture("placeholder"), "Bump parser");

    assert!(!result.is_valid());
    assert_eq!(
        result.messages(),
        vec![
            "Section \"Summary\" appears to contain unmodified template content.",
            "Section \"Testing\" appears to be empty.",
            "Section \"Checklist\" has no completed task items. Please complete at least one task.",
            "PR title does not contain a valid JIRA ticket reference. Expected pattern: [A-Z]+-\\d+",
        ]
    );
}

#[test]
fn test_missing_sections_use_template_titles() {
    let result = validate(
        &load_fixture("missing_sections"),
        "",
        Some(&load_fixture("template")),
        &["Summary", "Changes", "Testing"],
        false,
        None,
    );

    assert_eq!(
        result.messages(),
        vec![
            "Missing required section: \"Changes\"",
            "Missing required section: \"Testing\"",
        ]
    );
}

#[test]
fn test_checklist_section_accepted_without_completion_flag() {
    let template = load_fixture("template");
    let description = load_fixture("placeholder").replace(
        "## Testing\n",
        "## Testing\n\nUnit tests for the new parser version.\n",
    );
    let result = validate(
        &description,
        "",
        Some(&template),
        &["Testing", "Checklist"],
        false,
        None,
    );
    assert!(result.is_valid(), "unexpected errors: {:?}", result.messages());
}

#[test]
fn test_checklist_one_checked_item_is_enough() {
    let result = validate(
        "## Checklist\n- [x] A\n- [ ] B",
        "",
        Some("## Checklist\n- [ ] A\n- [ ] B"),
        &["Checklist"],
        true,
        None,
    );
    assert!(result.is_valid());
}

#[test]
fn test_checklist_nothing_checked() {
    let result = validate(
        "## Checklist\n- [ ] A\n- [ ] B",
        "",
        Some("## Checklist\n- [ ] A\n- [ ] B"),
        &["Checklist"],
        true,
        None,
    );
    assert_eq!(result.errors().len(), 1);
    assert!(result.messages()[0].contains("no completed task items"));
}

#[test]
fn test_checklist_missing_task_list() {
    let result = validate(
        "## Checklist\nNo items here",
        "",
        Some("## Checklist\n- [ ] A\n- [ ] B"),
        &["Checklist"],
        true,
        None,
    );
    assert_eq!(
        result.errors(),
        &[Violation::MissingTaskList {
            title: "Checklist".to_string()
        }]
    );
    assert!(result.messages()[0].contains("missing its task list"));
}

#[test]
fn test_empty_section() {
    let result = validate("## Test\n", "", Some("## Test\nSome content"), &["Test"], false, None);
    assert_eq!(result.errors().len(), 1);
    assert!(result.messages()[0].contains("appears to be empty"));
}

#[test]
fn test_unmodified_content() {
    let template = "## Summary\nPlease describe the change in detail here.";
    let result = validate(template, "", Some(template), &["Summary"], false, None);
    assert_eq!(result.errors().len(), 1);
    assert!(result.messages()[0].contains("unmodified template content"));
}

#[test]
fn test_light_edit_of_placeholder_still_flagged() {
    let template = "## Summary\nDescribe what this pull request changes and why. Link related issues.";
    let description =
        "## Summary\nDescribe what this pull request changes and why. Link related issues!";
    let result = validate(description, "", Some(template), &["Summary"], false, None);
    assert!(matches!(
        result.errors(),
        [Violation::UnmodifiedTemplate {
            similarity: Some(_),
            ..
        }]
    ));
}

#[test]
fn test_required_matching_is_case_insensitive_and_substring() {
    let template = "## Summary of Changes\nExplain.\n## SUMMARY\nExplain.";
    let description = "## summary of changes\nReworked caching.\n## Summary\nShort version.";
    let result = validate(description, "", Some(template), &["Summary"], false, None);
    assert!(result.is_valid(), "unexpected errors: {:?}", result.messages());

    let result = validate("## Other\ntext", "", Some(template), &["Summary"], false, None);
    assert_eq!(
        result.messages(),
        vec![
            "Missing required section: \"Summary of Changes\"",
            "Missing required section: \"SUMMARY\"",
        ]
    );
}

#[test]
fn test_no_template_is_literal_substring_scan() {
    // Structurally present but the literal marker differs.
    let errors = compare("# Summary\nDone.", None, &strings(&["## Summary"]), false);
    assert_eq!(
        errors,
        vec![Violation::MissingSection {
            title: "## Summary".to_string()
        }]
    );

    // Literal text present without being a heading.
    let errors = compare(
        "See ## Summary in the ticket.",
        None,
        &strings(&["## Summary"]),
        false,
    );
    assert!(errors.is_empty());
}

#[test]
fn test_title_pattern() {
    let result = validate("", "JIRA-123: fix", None, &[], false, Some(r"[A-Z]+-\d+"));
    assert!(result.is_valid());

    let result = validate("", "fix bug", None, &[], false, Some(r"[A-Z]+-\d+"));
    assert_eq!(result.errors().len(), 1);
    assert!(result.messages()[0].contains("does not contain a valid"));

    let result = validate("", "fix bug", None, &[], false, Some("   "));
    assert!(result.is_valid());
}

#[test]
fn test_split_never_keeps_html_comments() {
    let inputs = [
        load_fixture("template"),
        "## A\n<!-- hidden\nacross lines -->visible\n## B <!-- inline --> title\nbody".to_string(),
        "<!-- ## Not a heading -->\n## Real\ncontent <!-- a --> and <!-- b --> more".to_string(),
    ];
    for input in &inputs {
        for section in split_sections(input) {
            assert!(!section.content.contains("<!--"), "{:?}", section);
            assert!(!section.title.contains("<!--"), "{:?}", section);
        }
    }
}

#[test]
fn test_extract_is_pure() {
    let content = "- [x] first\n- [ ] second\n  - [X] nested\n- plain bullet";
    let once = extract_checklist(content);
    let twice = extract_checklist(content);
    assert_eq!(once, twice);
    assert_eq!(once.len(), 3);
    assert!(once[0].checked);
    assert!(!once[1].checked);
    assert!(once[2].checked);
}
