//! Markdown structure: front matter, flat heading sections and task lists.
//!
//! The model is deliberately flat. Every ATX heading opens a new section
//! regardless of its level, and a section's content stops at the next
//! heading of any level.

use serde::Serialize;

pub mod checklist;
pub mod frontmatter;
pub mod sections;

pub use checklist::{extract_checklist, CHECKLIST_PATTERN};
pub use frontmatter::{split_frontmatter, strip_frontmatter};
pub use sections::{split_sections, strip_html_comments, MarkdownParser};

/// A single `- [ ]` / `- [x]` task list entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecklistItem {
    pub text: String,
    pub checked: bool,
}

/// A heading and the trimmed body text up to the next heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Heading text without the `#` markers.
    pub title: String,
    /// Number of `#` characters (1-6).
    pub level: u8,
    /// Body text with HTML comments removed, trimmed.
    pub content: String,
    /// Task list entries found in `content`, in document order.
    pub checklist_items: Vec<ChecklistItem>,
}

impl Section {
    pub fn has_checklist(&self) -> bool {
        !self.checklist_items.is_empty()
    }

    /// Number of checked task list entries.
    pub fn completed_count(&self) -> usize {
        self.checklist_items.iter().filter(|i| i.checked).count()
    }

    /// True when the section has a task list and every entry is checked.
    pub fn is_complete(&self) -> bool {
        self.has_checklist() && self.completed_count() == self.checklist_items.len()
    }
}
