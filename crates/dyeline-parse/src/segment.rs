//! Clause splitting.
//!
//! Instruction text is split into clauses that are parsed independently.
//! Separators are runs of newlines, semicolons and commas, and the standalone
//! words `then` and `also`. Separators inside a closed `rgb(...)` or
//! `rgba(...)` call starting on a word boundary do not split, so `rgb(255, 0, 0)` stays in one clause.
//! Any other parentheses are plain text.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::phrase::{char_len_at, is_word_boundary};

static SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\n;,]+|then|also").expect("separator pattern is valid"));

static RGB_CALL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"rgba?\([^)]*\)").expect("rgb call pattern is valid"));

/// Splits `text` into trimmed, whitespace-collapsed, non-empty clauses.
///
/// The conjunction words are matched case-sensitively; callers lowercase the
/// input first.
///
/// ```rust
/// use dyeline_parse::split_segments;
///
/// assert_eq!(
///     split_segments("laces black,, mesh   white then sole red"),
///     vec!["laces black", "mesh white", "sole red"]
/// );
/// ```
pub fn split_segments(text: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut last = 0;
    let mut pos = 0;
    let mut calls = RGB_CALL
        .find_iter(text)
        .filter(|call| is_word_boundary(text, call.start()))
        .peekable();

    while pos <= text.len() {
        let Some(m) = SEPARATOR.find_at(text, pos) else {
            break;
        };
        let is_word = m.as_str().starts_with(|c: char| c.is_ascii_alphabetic());
        if is_word && !(is_word_boundary(text, m.start()) && is_word_boundary(text, m.end())) {
            pos = m.start() + char_len_at(text, m.start());
            continue;
        }
        while calls.next_if(|call| call.end() <= m.start()).is_some() {}
        if calls.peek().is_some_and(|call| call.start() < m.start()) {
            pos = m.end();
            continue;
        }
        segments.push(&text[last..m.start()]);
        last = m.end();
        pos = m.end();
    }
    segments.push(&text[last..]);

    segments
        .into_iter()
        .map(collapse_whitespace)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Collapses whitespace runs to single spaces and trims both ends.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
