//! YAML front matter handling.
//!
//! Shared by the section splitter (which discards front matter) and the
//! config loader (which parses it).

/// Split content into front matter and body.
///
/// Front matter is only recognised when the very first line is `---` and a
/// later line is exactly `---`. Anything else returns `None` and the whole
/// input as body, so a description that merely contains a horizontal rule is
/// left alone.
pub fn split_frontmatter(content: &str) -> (Option<String>, &str) {
    let Some(rest) = strip_delimiter_line(content) else {
        return (None, content);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == "---" {
            let frontmatter = rest[..offset].to_string();
            let body = &rest[offset + line.len()..];
            return (Some(frontmatter), body);
        }
        offset += line.len();
    }

    (None, content)
}

/// Return the body with any front matter removed.
pub fn strip_frontmatter(content: &str) -> &str {
    split_frontmatter(content).1
}

/// If the first line is exactly `---`, return everything after it.
fn strip_delimiter_line(content: &str) -> Option<&str> {
    let rest = content.strip_prefix("---")?;
    rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))
}
