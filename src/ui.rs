//! Terminal formatting and color helpers shared by the commands.

use colored::{ColoredString, Colorize};

/// Check if quiet mode is enabled via environment variable
pub fn is_quiet() -> bool {
    std::env::var("PR_TEMPLATE_CHECK_QUIET")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Icon for a validation verdict: ✓ (green) or ✗ (red).
pub fn verdict_icon(valid: bool) -> ColoredString {
    if valid {
        "✓".green()
    } else {
        "✗".red()
    }
}

/// Checklist progress such as `2/3`, green when at least one item is done.
pub fn checklist_progress(completed: usize, total: usize) -> ColoredString {
    let text = format!("{}/{}", completed, total);
    if completed > 0 {
        text.green()
    } else {
        text.yellow()
    }
}

/// Color scheme for text output
pub mod colors {
    use colored::{ColoredString, Colorize};

    /// Green for success
    pub fn success(text: &str) -> ColoredString {
        text.green()
    }

    /// Yellow for warnings
    pub fn warning(text: &str) -> ColoredString {
        text.yellow()
    }

    /// Red for errors/failures
    pub fn error(text: &str) -> ColoredString {
        text.red()
    }

    /// Cyan for identifiers (PR numbers, paths)
    pub fn identifier(text: &str) -> ColoredString {
        text.cyan()
    }

    /// Dimmed for secondary text
    pub fn secondary(text: &str) -> ColoredString {
        text.dimmed()
    }

    /// Bold for headings
    pub fn heading(text: &str) -> ColoredString {
        text.bold()
    }

    /// Color for markdown heading levels
    pub fn markdown_heading(text: &str, level: u8) -> ColoredString {
        match level {
            1 => text.bold(),
            2 => text.bold().cyan(),
            3 => text.bold().blue(),
            4 => text.bold().magenta(),
            _ => text.bold(),
        }
    }
}

/// Common text formatting patterns
pub mod format {
    /// Pick the singular or plural noun for `count`.
    pub fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
        if count == 1 {
            one
        } else {
            many
        }
    }

    /// Truncate text to `max_chars` characters, ending with `...` when cut.
    pub fn truncate(text: &str, max_chars: usize) -> String {
        if text.chars().count() <= max_chars {
            text.to_string()
        } else {
            let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
            format!("{}...", kept)
        }
    }

    /// First non-blank line of `text`.
    pub fn first_line(text: &str) -> &str {
        text.lines().map(str::trim).find(|l| !l.is_empty()).unwrap_or("")
    }
}
