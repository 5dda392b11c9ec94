//! Markdown section splitting.
//!
//! Heading detection uses `pulldown-cmark` so that `#` lines inside fenced
//! code blocks, block quotes or list items are not mistaken for headings.
//! Section bodies are then sliced out of the source text directly, which
//! keeps the source markup (task lists, bullets) intact for later checks.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag};
use regex::Regex;

use super::checklist::extract_checklist_with;
use super::frontmatter::strip_frontmatter;
use super::Section;
use crate::diagnostics::{Diagnostics, NullDiagnostics};

/// Non-greedy, spans lines.
const HTML_COMMENT_PATTERN: &str = r"(?s)<!--.*?-->";

/// Split markdown into sections without diagnostics.
///
/// # Examples
///
/// ```
/// use pr_template_check::markdown::split_sections;
///
/// let sections = split_sections("intro\n## Summary\nFixes login\n### Notes\n- [x] done");
/// assert_eq!(sections.len(), 2);
/// assert_eq!(sections[0].title, "Summary");
/// assert_eq!(sections[0].content, "Fixes login");
/// assert_eq!(sections[1].level, 3);
/// assert!(sections[1].checklist_items[0].checked);
/// ```
pub fn split_sections(markdown: &str) -> Vec<Section> {
    MarkdownParser::new(&NullDiagnostics).split(Some(markdown))
}

/// Remove every `<!-- ... -->` span.
pub fn strip_html_comments(text: &str) -> Result<String, regex::Error> {
    let re = Regex::new(HTML_COMMENT_PATTERN)?;
    Ok(re.replace_all(text, "").into_owned())
}

/// Section splitter bound to a diagnostic sink.
pub struct MarkdownParser<'a> {
    diagnostics: &'a dyn Diagnostics,
}

/// Byte offsets of an ATX heading line in the cleaned text.
struct HeadingLine {
    start: usize,
    end: usize,
    level: u8,
}

impl<'a> MarkdownParser<'a> {
    pub fn new(diagnostics: &'a dyn Diagnostics) -> Self {
        Self { diagnostics }
    }

    /// Split `markdown` into flat sections in document order.
    ///
    /// Absent or empty input yields no sections. Text before the first
    /// heading is dropped.
    pub fn split(&self, markdown: Option<&str>) -> Vec<Section> {
        let Some(markdown) = markdown.filter(|m| !m.trim().is_empty()) else {
            self.diagnostics
                .debug("Parsing skipped: empty markdown input");
            return Vec::new();
        };

        self.diagnostics.debug(&format!(
            "Parsing markdown content ({} chars)",
            markdown.chars().count()
        ));

        let body = strip_frontmatter(markdown);
        let cleaned = match strip_html_comments(body) {
            Ok(text) => text.replace("\r\n", "\n"),
            Err(e) => {
                self.diagnostics
                    .warn(&format!("Error parsing markdown: {}", e));
                return Vec::new();
            }
        };
        self.diagnostics.debug(&format!(
            "Content after removing HTML comments: {} chars",
            cleaned.chars().count()
        ));

        let headings = find_heading_lines(&cleaned);
        let mut sections = Vec::with_capacity(headings.len());

        for (idx, heading) in headings.iter().enumerate() {
            let next_start = headings
                .get(idx + 1)
                .map(|h| h.start)
                .unwrap_or(cleaned.len());
            let title = heading_title(&cleaned[heading.start..heading.end]);
            let content = cleaned[heading.end..next_start].trim().to_string();
            let checklist_items = extract_checklist_with(Some(&content), self.diagnostics);

            self.diagnostics.debug(&format!(
                "Parsed section \"{}\" (level {}) with {} chars and {} task items",
                title,
                heading.level,
                content.chars().count(),
                checklist_items.len()
            ));

            sections.push(Section {
                title,
                level: heading.level,
                content,
                checklist_items,
            });
        }

        self.diagnostics.debug(&format!(
            "Parsing complete: found {} sections",
            sections.len()
        ));
        sections
    }

    /// Split raw bytes. Input that is not valid UTF-8 is logged and yields
    /// no sections.
    pub fn split_bytes(&self, raw: &[u8]) -> Vec<Section> {
        match std::str::from_utf8(raw) {
            Ok(text) => self.split(Some(text)),
            Err(e) => {
                self.diagnostics
                    .warn(&format!("Error parsing markdown: {}", e));
                Vec::new()
            }
        }
    }
}

/// Locate top-level ATX headings. Setext headings and headings nested in
/// block containers are treated as body text.
fn find_heading_lines(text: &str) -> Vec<HeadingLine> {
    let mut headings = Vec::new();
    let mut depth = 0usize;

    for (event, range) in Parser::new_ext(text, Options::empty()).into_offset_iter() {
        match event {
            Event::Start(tag) => {
                if depth == 0 {
                    if let Tag::Heading { level, .. } = tag {
                        if is_atx_opening(&text[range.start..]) {
                            let end = text[range.start..]
                                .find('\n')
                                .map(|i| range.start + i + 1)
                                .unwrap_or(text.len());
                            headings.push(HeadingLine {
                                start: range.start,
                                end,
                                level: heading_level(level),
                            });
                        }
                    }
                }
                depth += 1;
            }
            Event::End(_) => depth = depth.saturating_sub(1),
            _ => {}
        }
    }

    headings
}

/// True when `line` opens with one to six `#` followed by a space, a tab or
/// the end of the line. Setext headings whose text starts with `#` fail this.
fn is_atx_opening(line: &str) -> bool {
    let line = line.trim_start_matches([' ', '\t']);
    let marker = line.len() - line.trim_start_matches('#').len();
    if !(1..=6).contains(&marker) {
        return false;
    }
    matches!(
        line[marker..].chars().next(),
        None | Some(' ' | '\t' | '\r' | '\n')
    )
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Heading text without the opening marker or an optional closing `#` run.
fn heading_title(line: &str) -> String {
    let text = line.trim().trim_start_matches('#').trim();
    let without_closing = text.trim_end_matches('#');
    if without_closing.is_empty() || without_closing.ends_with([' ', '\t']) {
        without_closing.trim().to_string()
    } else {
        text.to_string()
    }
}
