//! Rule engine combining template comparison with title validation.

use regex::Regex;
use serde::Serialize;

use crate::compare::compare_with;
use crate::diagnostics::{Diagnostics, NullDiagnostics};
use crate::violation::Violation;

/// Options for a [`TemplateChecker`].
#[derive(Debug, Clone, Default)]
pub struct CheckerOptions {
    /// Section names that must be present, optionally `#`-prefixed.
    pub required_sections: Vec<String>,
    /// Regex the PR title must match. Empty or blank disables the check.
    pub ticket_pattern: Option<String>,
    /// Template text. `None` means "check required sections by name only".
    pub template: Option<String>,
    /// Require at least one checked item in template task lists.
    pub require_checklist_completion: bool,
}

/// Outcome of validating one pull request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    is_valid: bool,
    errors: Vec<Violation>,
}

impl ValidationResult {
    pub fn from_violations(errors: Vec<Violation>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// True iff there are no errors.
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn errors(&self) -> &[Violation] {
        &self.errors
    }

    /// Errors rendered as user-facing text, in order.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.to_string()).collect()
    }
}

/// Validates PR descriptions and titles against a fixed set of options.
#[derive(Debug, Clone)]
pub struct TemplateChecker {
    options: CheckerOptions,
}

impl TemplateChecker {
    pub fn new(options: CheckerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CheckerOptions {
        &self.options
    }

    /// Validate without diagnostics.
    pub fn validate(&self, description: &str, title: &str) -> ValidationResult {
        self.validate_with(description, title, &NullDiagnostics)
    }

    /// Validate `description` against the template and `title` against the
    /// ticket pattern. Template errors come first, the title error last.
    pub fn validate_with(
        &self,
        description: &str,
        title: &str,
        diagnostics: &dyn Diagnostics,
    ) -> ValidationResult {
        let mut errors = compare_with(
            description,
            self.options.template.as_deref(),
            &self.options.required_sections,
            self.options.require_checklist_completion,
            diagnostics,
        );

        if let Some(pattern) = self.active_ticket_pattern() {
            if !title_matches(pattern, title, diagnostics) {
                errors.push(Violation::InvalidTicketReference {
                    pattern: pattern.to_string(),
                });
            }
        }

        ValidationResult::from_violations(errors)
    }

    fn active_ticket_pattern(&self) -> Option<&str> {
        self.options
            .ticket_pattern
            .as_deref()
            .filter(|p| !p.trim().is_empty())
    }
}

/// An unparseable pattern is logged and counts as a non-match, so the user
/// still sees the ticket reference error.
fn title_matches(pattern: &str, title: &str, diagnostics: &dyn Diagnostics) -> bool {
    match Regex::new(pattern) {
        Ok(re) => re.is_match(title),
        Err(e) => {
            diagnostics.warn(&format!(
                "Invalid ticket pattern '{}': {}",
                pattern, e
            ));
            false
        }
    }
}
