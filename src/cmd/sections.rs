//! `sections`: show how a markdown file is split into sections.

use anyhow::{Context, Result};
use std::path::Path;

use pr_template_check::diagnostics::Diagnostics;
use pr_template_check::markdown::{MarkdownParser, Section};
use pr_template_check::ui::{self, colors, format};

use super::read_input_bytes;

const PREVIEW_CHARS: usize = 60;

pub fn cmd_sections(file: &Path, json: bool, diagnostics: &dyn Diagnostics) -> Result<()> {
    let raw = read_input_bytes(file)?;
    let sections = MarkdownParser::new(diagnostics).split_bytes(&raw);

    if json {
        let output =
            serde_json::to_string_pretty(&sections).context("Failed to serialize sections")?;
        println!("{}", output);
        return Ok(());
    }

    if sections.is_empty() {
        println!("{}", colors::warning("No sections found"));
        return Ok(());
    }

    for section in &sections {
        println!("{}", section_line(section));
    }
    Ok(())
}

fn section_line(section: &Section) -> String {
    let indent = "  ".repeat(usize::from(section.level.saturating_sub(1)));
    let heading = format!("{} {}", "#".repeat(usize::from(section.level)), section.title);

    let mut line = format!(
        "{}{}  {}",
        indent,
        colors::markdown_heading(&heading, section.level),
        colors::secondary(&format!("{} chars", section.content.chars().count()))
    );

    if section.has_checklist() {
        line.push_str(&format!(
            "  tasks {}",
            ui::checklist_progress(section.completed_count(), section.checklist_items.len())
        ));
    }

    let preview = format::first_line(&section.content);
    if section.content.trim().is_empty() {
        line.push_str(&format!("  {}", colors::warning("(empty)")));
    } else {
        line.push_str(&format!(
            "\n{}  {}",
            indent,
            colors::secondary(&format::truncate(preview, PREVIEW_CHARS))
        ));
    }
    line
}
