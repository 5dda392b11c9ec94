//! Structured validation failures.
//!
//! The rendered wording is what users read in PR comments and check run
//! summaries, so `Display` output must stay stable.

use serde::{Serialize, Serializer};
use std::fmt;

/// One reason a pull request description failed validation.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// A required section is absent from the description.
    MissingSection { title: String },
    /// The section exists but has no content.
    EmptySection { title: String },
    /// The section still holds the template's placeholder text.
    /// `similarity` is `None` for an exact match.
    UnmodifiedTemplate {
        title: String,
        similarity: Option<f64>,
    },
    /// The template has a task list for this section but the description does not.
    MissingTaskList { title: String },
    /// The task list is present but nothing is checked.
    NoCompletedTasks { title: String },
    /// The PR title does not match the configured ticket pattern.
    InvalidTicketReference { pattern: String },
}

impl Violation {
    /// Stable identifier for machine-readable output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingSection { .. } => "missing_section",
            Self::EmptySection { .. } => "empty_section",
            Self::UnmodifiedTemplate { .. } => "unmodified_template",
            Self::MissingTaskList { .. } => "missing_task_list",
            Self::NoCompletedTasks { .. } => "no_completed_tasks",
            Self::InvalidTicketReference { .. } => "invalid_ticket_reference",
        }
    }

    /// Section the violation refers to, if any.
    pub fn section(&self) -> Option<&str> {
        match self {
            Self::MissingSection { title }
            | Self::EmptySection { title }
            | Self::UnmodifiedTemplate { title, .. }
            | Self::MissingTaskList { title }
            | Self::NoCompletedTasks { title } => Some(title),
            Self::InvalidTicketReference { .. } => None,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSection { title } => {
                write!(f, "Missing required section: \"{}\"", title)
            }
            Self::EmptySection { title } => {
                write!(f, "Section \"{}\" appears to be empty.", title)
            }
            Self::UnmodifiedTemplate { title, .. } => write!(
                f,
                "Section \"{}\" appears to contain unmodified template content.",
                title
            ),
            Self::MissingTaskList { title } => write!(
                f,
                "Section \"{}\" is missing its task list from the template.",
                title
            ),
            Self::NoCompletedTasks { title } => write!(
                f,
                "Section \"{}\" has no completed task items. Please complete at least one task.",
                title
            ),
            Self::InvalidTicketReference { pattern } => write!(
                f,
                "PR title does not contain a valid JIRA ticket reference. Expected pattern: {}",
                pattern
            ),
        }
    }
}

#[derive(Serialize)]
struct ViolationRecord<'a> {
    kind: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    section: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pattern: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    similarity: Option<f64>,
}

impl Serialize for Violation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let (pattern, similarity) = match self {
            Self::InvalidTicketReference { pattern } => (Some(pattern.as_str()), None),
            Self::UnmodifiedTemplate { similarity, .. } => (None, *similarity),
            _ => (None, None),
        };

        ViolationRecord {
            kind: self.kind(),
            message: self.to_string(),
            section: self.section(),
            pattern,
            similarity,
        }
        .serialize(serializer)
    }
}
