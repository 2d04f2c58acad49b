//! Token extraction for a single clause.
//!
//! Parts are found with a [`PhraseMatcher`] over part keys and aliases.
//! Colors are found in three notations, in fixed precedence:
//!
//! 1. `rgb(...)` / `rgba(...)`
//! 2. hex literals (`#f00`, `#ff0000`, `ff0000`)
//! 3. named colors from the [`ColorCatalog`]
//!
//! All color tokens are merged and stably ordered by offset. A literal that is
//! matched by more than one notation is kept once per notation.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::catalog::{ColorCatalog, PartKey};
use crate::color::{normalize_hex, resolve_named_color, rgb_to_hex, Hex};
use crate::phrase::{char_len_at, is_word_boundary, PhraseMatcher};

/// A recognized part mention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartToken {
    pub key: PartKey,
    /// Byte offset of the mention within the clause.
    pub start: usize,
    /// The phrase that matched (canonical key or alias), lowercased.
    pub phrase: String,
}

/// A recognized color mention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorToken {
    pub hex: Hex,
    /// Byte offset of the mention within the clause.
    pub start: usize,
    /// The text that matched.
    pub raw: String,
}

/// Part mentions found in a clause.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartScan<'m> {
    /// First mention of each part key, ordered by offset.
    pub tokens: Vec<PartToken>,
    /// Every phrase that matched, including repeated mentions.
    pub phrases: HashSet<&'m str>,
}

/// Finds part mentions in `clause`, keeping only the first mention per key.
pub fn extract_parts<'m>(clause: &str, matcher: &'m PhraseMatcher<PartKey>) -> PartScan<'m> {
    let matches = matcher.find_all(clause);
    let phrases = matches.matched_phrases();

    let mut seen: HashSet<&PartKey> = HashSet::new();
    let mut tokens = Vec::new();
    for hit in matches.iter() {
        if !seen.insert(hit.value) {
            continue;
        }
        tokens.push(PartToken {
            key: hit.value.clone(),
            start: hit.start,
            phrase: hit.phrase.to_string(),
        });
    }

    PartScan { tokens, phrases }
}

static RGB_CALL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"rgba?\([^)]+\)").expect("rgb call pattern is valid"));

static SHORT_HEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#[0-9a-f]{3}").expect("short hex pattern is valid"));

/// Characters that may precede a six-digit hex literal.
fn opens_hex(c: char) -> bool {
    c.is_whitespace() || matches!(c, ',' | ';' | '(' | ')' | '[' | ']' | '{' | '}')
}

/// Characters that may follow a six-digit hex literal.
fn closes_hex(c: char) -> bool {
    opens_hex(c) || matches!(c, '.' | '!' | '?')
}

/// Iterates regex matches, retrying one character later whenever `accept`
/// rejects a match.
fn scan<'t>(
    re: &Regex,
    text: &'t str,
    accept: impl Fn(usize, usize) -> bool,
) -> Vec<regex::Match<'t>> {
    let mut found = Vec::new();
    let mut pos = 0;
    while pos <= text.len() {
        let Some(m) = re.find_at(text, pos) else {
            break;
        };
        if accept(m.start(), m.end()) {
            pos = m.end();
            found.push(m);
        } else {
            pos = m.start() + char_len_at(text, m.start());
        }
    }
    found
}

fn rgb_tokens(text: &str) -> impl Iterator<Item = ColorToken> + '_ {
    scan(&RGB_CALL, text, |start, _| is_word_boundary(text, start))
        .into_iter()
        .filter_map(|m| {
            rgb_to_hex(m.as_str()).map(|hex| ColorToken {
                hex,
                start: m.start(),
                raw: m.as_str().to_string(),
            })
        })
}

fn short_hex_tokens(text: &str) -> impl Iterator<Item = ColorToken> + '_ {
    scan(&SHORT_HEX, text, |_, end| is_word_boundary(text, end))
        .into_iter()
        .filter_map(|m| {
            normalize_hex(m.as_str()).map(|hex| ColorToken {
                hex,
                start: m.start(),
                raw: m.as_str().to_string(),
            })
        })
}

/// Six-digit hex literals, with or without `#`, delimited by whitespace,
/// brackets or punctuation.
fn long_hex_tokens(text: &str) -> Vec<ColorToken> {
    let bytes = text.as_bytes();
    let mut found = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        if !text.is_char_boundary(pos)
            || !(pos == 0 || text[..pos].chars().next_back().is_some_and(opens_hex))
        {
            pos += 1;
            continue;
        }
        let digits_at = if bytes[pos] == b'#' { pos + 1 } else { pos };
        let end = digits_at + 6;
        let is_hex = end <= bytes.len()
            && bytes[digits_at..end]
                .iter()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(b));
        // Only ASCII precedes `end` here, so it is a char boundary.
        if is_hex && (end == bytes.len() || text[end..].starts_with(closes_hex)) {
            let raw = &text[pos..end];
            if let Some(hex) = normalize_hex(raw) {
                found.push(ColorToken {
                    hex,
                    start: pos,
                    raw: raw.to_string(),
                });
            }
            pos = end;
        } else {
            pos += 1;
        }
    }
    found
}

fn named_tokens<'a>(
    text: &'a str,
    matcher: &'a PhraseMatcher<String>,
    catalog: &'a ColorCatalog,
) -> impl Iterator<Item = ColorToken> + 'a {
    matcher.find_all(text).into_vec().into_iter().filter_map(move |hit| {
        resolve_named_color(hit.value, catalog).map(|hex| ColorToken {
            hex,
            start: hit.start,
            raw: hit.value.clone(),
        })
    })
}

/// Finds every color mention in `clause`, ordered by offset.
pub fn extract_colors(
    clause: &str,
    matcher: &PhraseMatcher<String>,
    catalog: &ColorCatalog,
) -> Vec<ColorToken> {
    let mut colors: Vec<ColorToken> = rgb_tokens(clause)
        .chain(short_hex_tokens(clause))
        .chain(long_hex_tokens(clause))
        .chain(named_tokens(clause, matcher, catalog))
        .collect();
    colors.sort_by_key(|c| c.start);
    colors
}

/// Builds the named-color matcher for a catalog.
pub fn color_matcher(catalog: &ColorCatalog) -> PhraseMatcher<String> {
    PhraseMatcher::new(catalog.iter().map(|(name, _)| (name, name.to_string())))
}
