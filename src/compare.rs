//! Comparison of a pull request description against its template.
//!
//! Pure functions: inputs in, ordered violations out. Diagnostics are
//! informational and never influence the result.

use std::collections::HashMap;

use crate::diagnostics::{Diagnostics, NullDiagnostics};
use crate::markdown::{MarkdownParser, Section};
use crate::score::{is_unmodified, similarity, similarity_upper_bound};
use crate::violation::Violation;

/// Compare `description` against `template` without diagnostics.
///
/// See [`compare_with`].
pub fn compare(
    description: &str,
    template: Option<&str>,
    required_sections: &[String],
    require_checklist_completion: bool,
) -> Vec<Violation> {
    compare_with(
        description,
        template,
        required_sections,
        require_checklist_completion,
        &NullDiagnostics,
    )
}

/// Compare `description` against `template`.
///
/// Without a template each required entry is searched for literally in the
/// raw description. With a template, every template section whose title
/// matches a required entry must exist in the description, be non-empty,
/// differ from the template's placeholder text and, when
/// `require_checklist_completion` is set, have at least one checked task.
///
/// Violations are returned in template section order.
pub fn compare_with(
    description: &str,
    template: Option<&str>,
    required_sections: &[String],
    require_checklist_completion: bool,
    diagnostics: &dyn Diagnostics,
) -> Vec<Violation> {
    diagnostics.info(&format!(
        "Validating PR description against {} required sections",
        required_sections.len()
    ));
    diagnostics.info(&format!(
        "Task list completion requirement: {}",
        if require_checklist_completion {
            "Enabled"
        } else {
            "Disabled"
        }
    ));

    // A blank template has no sections to enforce; fall back to names
    let Some(template) = template.filter(|t| !t.trim().is_empty()) else {
        diagnostics.info("No PR template found. Checking for required sections by name...");
        return compare_without_template(description, required_sections, diagnostics);
    };

    let parser = MarkdownParser::new(diagnostics);
    let template_sections = parser.split(Some(template));
    let description_sections = parser.split(Some(description));

    diagnostics.info(&format!(
        "Template has {} sections",
        template_sections.len()
    ));
    diagnostics.info(&format!(
        "PR description has {} sections",
        description_sections.len()
    ));

    // Later duplicates win, matching a plain map insert
    let by_title: HashMap<String, &Section> = description_sections
        .iter()
        .map(|s| (s.title.to_lowercase(), s))
        .collect();

    let mut violations = Vec::new();

    for template_section in &template_sections {
        if !is_required(&template_section.title, required_sections) {
            diagnostics.debug(&format!(
                "Skipping optional section: \"{}\"",
                template_section.title
            ));
            continue;
        }

        diagnostics.info(&format!(
            "Checking required section: \"{}\"",
            template_section.title
        ));

        let matched = by_title.get(&template_section.title.to_lowercase()).copied();
        if let Some(violation) = check_section(
            template_section,
            matched,
            require_checklist_completion,
            diagnostics,
        ) {
            violations.push(violation);
        }
    }

    if violations.is_empty() {
        diagnostics.info("PR description validation successful");
    } else {
        diagnostics.info(&format!(
            "Found {} validation issues with PR description",
            violations.len()
        ));
    }

    violations
}

/// Literal, case-sensitive substring search for each required entry.
fn compare_without_template(
    description: &str,
    required_sections: &[String],
    diagnostics: &dyn Diagnostics,
) -> Vec<Violation> {
    let mut violations = Vec::new();

    for required in required_sections {
        if description.contains(required.as_str()) {
            diagnostics.info(&format!("✓ Found required section: \"{}\"", required));
        } else {
            diagnostics.info(&format!("❌ Missing required section: \"{}\"", required));
            violations.push(Violation::MissingSection {
                title: required.clone(),
            });
        }
    }

    violations
}

/// Normalize a required-section entry or a title for matching: drop leading
/// `#` markers and surrounding whitespace, lower-case.
pub fn normalize_section_name(name: &str) -> String {
    name.trim()
        .trim_start_matches('#')
        .trim()
        .to_lowercase()
}

/// A template section is required when any required entry equals its title
/// or is contained in it, case-insensitively.
///
/// Containment means a short entry such as `"test"` also selects
/// `"Testing Notes"` and `"Contest rules"`.
pub fn is_required(title: &str, required_sections: &[String]) -> bool {
    let title = normalize_section_name(title);
    required_sections.iter().any(|entry| {
        let entry = normalize_section_name(entry);
        title == entry || title.contains(&entry)
    })
}

/// Run the per-section checks. At most one violation per section.
fn check_section(
    template_section: &Section,
    matched: Option<&Section>,
    require_checklist_completion: bool,
    diagnostics: &dyn Diagnostics,
) -> Option<Violation> {
    let title = &template_section.title;

    let Some(matched) = matched else {
        diagnostics.info(&format!("❌ Missing required section: \"{}\"", title));
        return Some(Violation::MissingSection {
            title: title.clone(),
        });
    };

    diagnostics.info(&format!("✓ Found required section: \"{}\"", title));

    if require_checklist_completion && template_section.has_checklist() {
        check_checklist(template_section, matched, diagnostics)
    } else {
        check_content(
            template_section,
            matched,
            require_checklist_completion,
            diagnostics,
        )
    }
}

fn check_checklist(
    template_section: &Section,
    matched: &Section,
    diagnostics: &dyn Diagnostics,
) -> Option<Violation> {
    let title = &template_section.title;
    let items = &matched.checklist_items;

    if items.is_empty() {
        diagnostics.info(&format!(
            "❌ Section \"{}\" is missing its task list (template has {} tasks)",
            title,
            template_section.checklist_items.len()
        ));
        return Some(Violation::MissingTaskList {
            title: title.clone(),
        });
    }

    let completed = matched.completed_count();
    diagnostics.info(&format!(
        "Section \"{}\" has {}/{} tasks completed",
        title,
        completed,
        items.len()
    ));
    for (idx, item) in items.iter().enumerate() {
        diagnostics.debug(&format!(
            "Task {}: \"{}\" - {}",
            idx + 1,
            item.text,
            if item.checked { "Checked" } else { "Unchecked" }
        ));
    }

    // One checked item is enough; partial completion is accepted
    if completed == 0 {
        return Some(Violation::NoCompletedTasks {
            title: title.clone(),
        });
    }

    None
}

fn check_content(
    template_section: &Section,
    matched: &Section,
    require_checklist_completion: bool,
    diagnostics: &dyn Diagnostics,
) -> Option<Violation> {
    let title = &template_section.title;

    if matched.has_checklist() && !require_checklist_completion {
        diagnostics.info(&format!(
            "✓ Section \"{}\" has valid content (task list section)",
            title
        ));
        return None;
    }

    let content = matched.content.trim();
    if content.is_empty() {
        diagnostics.info(&format!("❌ Section \"{}\" is empty", title));
        return Some(Violation::EmptySection {
            title: title.clone(),
        });
    }

    let template_content = template_section.content.trim();
    if template_content.is_empty() {
        diagnostics.debug(&format!(
            "No template content for \"{}\" to compare against",
            title
        ));
        return None;
    }

    if content == template_content {
        diagnostics.info(&format!(
            "❌ Section \"{}\" contains unmodified template content",
            title
        ));
        return Some(Violation::UnmodifiedTemplate {
            title: title.clone(),
            similarity: None,
        });
    }

    let bound = similarity_upper_bound(template_content, content);
    if !is_unmodified(bound) {
        diagnostics.debug(&format!(
            "Similarity bound for section \"{}\": {:.2}%, skipping full comparison",
            title,
            bound * 100.0
        ));
        diagnostics.info(&format!("✓ Section \"{}\" has valid content", title));
        return None;
    }

    let score = similarity(template_content, content);
    diagnostics.debug(&format!(
        "Similarity score for section \"{}\": {:.2}%",
        title,
        score * 100.0
    ));
    if is_unmodified(score) {
        diagnostics.info(&format!(
            "❌ Section \"{}\" contains unmodified template content ({}% similar)",
            title,
            (score * 100.0).round()
        ));
        return Some(Violation::UnmodifiedTemplate {
            title: title.clone(),
            similarity: Some(score),
        });
    }

    diagnostics.info(&format!("✓ Section \"{}\" has valid content", title));
    None
}
