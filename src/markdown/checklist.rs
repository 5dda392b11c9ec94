//! Task list extraction.

use regex::Regex;

use super::ChecklistItem;
use crate::diagnostics::{Diagnostics, NullDiagnostics};

/// A dash, a bracketed space/x/X, then the item text to end of line.
pub const CHECKLIST_PATTERN: &str = r"(?m)^[ \t]*-[ \t]*\[([ xX])\][ \t]*(.+)$";

/// Extract task list items from section content.
///
/// Plain bullets (`- item`) and other list markers (`*`, `+`, `1.`) are not
/// task items. Never fails: a broken pattern is logged and yields nothing.
///
/// # Examples
///
/// ```
/// use pr_template_check::markdown::extract_checklist;
///
/// let items = extract_checklist("- [x] Tests added\n- [ ] Docs updated\n- plain bullet");
/// assert_eq!(items.len(), 2);
/// assert!(items[0].checked);
/// assert_eq!(items[1].text, "Docs updated");
/// ```
pub fn extract_checklist(content: &str) -> Vec<ChecklistItem> {
    extract_checklist_with(Some(content), &NullDiagnostics)
}

/// Like [`extract_checklist`], reporting problems to `diagnostics`.
/// Absent or empty content yields an empty list.
pub fn extract_checklist_with(
    content: Option<&str>,
    diagnostics: &dyn Diagnostics,
) -> Vec<ChecklistItem> {
    let Some(content) = content.filter(|c| !c.is_empty()) else {
        return Vec::new();
    };

    let re = match Regex::new(CHECKLIST_PATTERN) {
        Ok(r) => r,
        Err(e) => {
            diagnostics.warn(&format!("Error parsing task items: {}", e));
            return Vec::new();
        }
    };

    re.captures_iter(content)
        .map(|caps| ChecklistItem {
            checked: caps[1].eq_ignore_ascii_case("x"),
            text: caps[2].trim().to_string(),
        })
        .collect()
}
