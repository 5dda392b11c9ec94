//! Word-level continuity scoring between template text and description text.
//!
//! The score answers "how much of the template survived unchanged?", not
//! "how far apart are these strings?". Text added around the template does
//! not lower the score; only removed or rewritten template words do.

use std::collections::HashMap;

/// Scores strictly above this mean the section is still the template.
pub const UNMODIFIED_THRESHOLD: f64 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Word,
    Space,
    Newline,
    Bracket,
    Punct,
}

fn classify(c: char) -> CharClass {
    match c {
        '\r' | '\n' => CharClass::Newline,
        '(' | ')' | '[' | ']' | '{' | '}' | '\'' | '"' => CharClass::Bracket,
        c if c.is_alphanumeric() || c == '_' => CharClass::Word,
        c if c.is_whitespace() => CharClass::Space,
        _ => CharClass::Punct,
    }
}

/// Split text into word, whitespace and punctuation tokens.
///
/// Runs of word characters, of horizontal whitespace and of other
/// punctuation each form one token. Line breaks, quotes and brackets are
/// always single-character tokens. Concatenating the tokens reproduces the
/// input.
pub fn tokenize_words(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut current: Option<CharClass> = None;

    for (idx, c) in text.char_indices() {
        let class = classify(c);
        let continues = current == Some(class)
            && matches!(class, CharClass::Word | CharClass::Space | CharClass::Punct);
        if !continues {
            if idx > start {
                tokens.push(&text[start..idx]);
            }
            start = idx;
        }
        current = Some(class);
    }
    if start < text.len() {
        tokens.push(&text[start..]);
    }

    tokens
}

/// Whitespace runs compare equal to each other regardless of their exact
/// characters, so reflowed indentation does not count as an edit.
fn tokens_equal(a: &str, b: &str) -> bool {
    a == b || (is_blank(a) && is_blank(b))
}

fn is_blank(token: &str) -> bool {
    token.chars().all(|c| c.is_whitespace() && c != '\r' && c != '\n')
}

/// Character length of a token, with any whitespace run counting as one.
/// Tokens that compare equal therefore always weigh the same.
fn token_weight(token: &str) -> usize {
    if is_blank(token) {
        1
    } else {
        token.chars().count()
    }
}

/// Fraction of `reference` characters that appear unchanged, in order, in
/// `candidate`.
///
/// Computed as a longest common subsequence over word tokens, weighted by the
/// character length of each shared reference token, divided by the total
/// weight of `reference`. Whitespace runs weigh one character. An empty
/// reference scores 0.
///
/// # Examples
///
/// ```
/// use pr_template_check::score::similarity;
///
/// let template = "Describe how this was tested.";
/// assert_eq!(similarity(template, template), 1.0);
/// assert_eq!(similarity(template, "Describe how this was tested. Ran cargo test."), 1.0);
/// assert!(similarity(template, "Unit tests for the parser") < 0.5);
/// assert_eq!(similarity("", "anything"), 0.0);
/// ```
pub fn similarity(reference: &str, candidate: &str) -> f64 {
    let reference_tokens = tokenize_words(reference);
    let total: usize = reference_tokens.iter().map(|t| token_weight(t)).sum();
    if total == 0 {
        return 0.0;
    }

    let candidate_tokens = tokenize_words(candidate);

    // A shared prefix or suffix is always part of some longest common
    // subsequence, so it is counted directly and kept out of the table.
    let prefix = reference_tokens
        .iter()
        .zip(&candidate_tokens)
        .take_while(|(a, b)| tokens_equal(a, b))
        .count();
    let suffix = reference_tokens[prefix..]
        .iter()
        .rev()
        .zip(candidate_tokens[prefix..].iter().rev())
        .take_while(|(a, b)| tokens_equal(a, b))
        .count();

    let reference_middle = &reference_tokens[prefix..reference_tokens.len() - suffix];
    let candidate_middle = &candidate_tokens[prefix..candidate_tokens.len() - suffix];

    let edges: usize = reference_tokens[..prefix]
        .iter()
        .chain(&reference_tokens[reference_tokens.len() - suffix..])
        .map(|t| token_weight(t))
        .sum();

    let unchanged = edges + weighted_lcs(reference_middle, candidate_middle);
    unchanged as f64 / total as f64
}

/// Two-row weighted LCS: `prev[j]` is the best shared weight for the
/// reference prefix processed so far against `candidate[..j]`.
fn weighted_lcs(reference: &[&str], candidate: &[&str]) -> usize {
    if reference.is_empty() || candidate.is_empty() {
        return 0;
    }

    let mut prev = vec![0usize; candidate.len() + 1];
    let mut curr = vec![0usize; candidate.len() + 1];

    for reference_token in reference {
        let weight = token_weight(reference_token);
        for (j, candidate_token) in candidate.iter().enumerate() {
            curr[j + 1] = if tokens_equal(reference_token, candidate_token) {
                prev[j] + weight
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[candidate.len()]
}

/// Upper bound on [`similarity`] from token counts alone, ignoring order.
///
/// Linear in the input size. When the bound does not pass
/// [`UNMODIFIED_THRESHOLD`] the exact score cannot either.
pub fn similarity_upper_bound(reference: &str, candidate: &str) -> f64 {
    let reference_tokens = tokenize_words(reference);
    let total: usize = reference_tokens.iter().map(|t| token_weight(t)).sum();
    if total == 0 {
        return 0.0;
    }

    let mut available: HashMap<&str, usize> = HashMap::new();
    for token in tokenize_words(candidate) {
        *available.entry(match_key(token)).or_default() += 1;
    }

    let mut shared = 0;
    for token in reference_tokens {
        if let Some(count) = available.get_mut(match_key(token)) {
            if *count > 0 {
                *count -= 1;
                shared += token_weight(token);
            }
        }
    }

    shared as f64 / total as f64
}

/// Key under which tokens compare equal in [`tokens_equal`].
fn match_key(token: &str) -> &str {
    if is_blank(token) {
        " "
    } else {
        token
    }
}

/// True when a similarity score means the template text was left as is.
pub fn is_unmodified(score: f64) -> bool {
    score > UNMODIFIED_THRESHOLD
}
