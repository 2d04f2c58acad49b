//! Best-effort guesses at what the user meant when a clause fails.
//!
//! These phrases are advisory only: callers show them as
//! "Ignored parts: ..." or "Unknown colors: ...".

use std::collections::HashSet;

use serde::Serialize;

use crate::extract::{ColorToken, PartToken};

/// Filler words dropped from diagnostic phrases.
pub const STOP_WORDS: &[&str] = &[
    "make", "set", "please", "the", "a", "an", "to", "is", "are", "be", "should", "my", "your",
    "it", "this", "that", "like", "maybe", "kind", "of", "and", "then", "also", "with", "in",
    "on", "at", "for",
];

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

/// Insertion-ordered set of distinct phrases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PhraseSet {
    phrases: Vec<String>,
    #[serde(skip)]
    index: HashSet<String>,
}

impl PhraseSet {
    /// Adds `phrase` unless already present. Returns `true` if it was added.
    pub fn insert(&mut self, phrase: impl Into<String>) -> bool {
        let phrase = phrase.into();
        if !self.index.insert(phrase.clone()) {
            return false;
        }
        self.phrases.push(phrase);
        true
    }

    pub fn contains(&self, phrase: &str) -> bool {
        self.index.contains(phrase)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.phrases
    }

    pub fn into_vec(self) -> Vec<String> {
        self.phrases
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}

/// Normalizes one whitespace-delimited word for a diagnostic phrase.
///
/// Apostrophes are dropped, anything besides `[a-z0-9]`, whitespace and `-`
/// becomes a space, and whitespace is collapsed.
fn normalize_word(word: &str) -> String {
    let cleaned: String = word
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| *c != '\'' && *c != '\u{2019}')
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || c == '-' {
                c
            } else {
                ' '
            }
        })
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The last `keep` meaningful words of `text`, joined by spaces.
fn tail_phrase(text: &str, keep: usize) -> Option<String> {
    let words: Vec<String> = text
        .split_whitespace()
        .map(normalize_word)
        .filter(|w| !w.is_empty() && !is_stop_word(w))
        .collect();
    let phrase = words[words.len().saturating_sub(keep)..].join(" ");
    let phrase = phrase.trim();
    (!phrase.is_empty()).then(|| phrase.to_string())
}

/// Guesses the part a user named in a clause that had colors but no known part.
///
/// Takes up to three meaningful words preceding the first color.
pub fn guess_unknown_part(clause: &str, colors: &[ColorToken]) -> Option<String> {
    let first = colors.first()?;
    let before = clause.get(..first.start)?.trim();
    if before.is_empty() {
        return None;
    }
    tail_phrase(before, 3)
}

/// Guesses the color a user named in a clause that had parts but no known color.
///
/// Takes up to two meaningful words from the last part to the clause end.
pub fn guess_unknown_color(
    clause: &str,
    parts: &[PartToken],
    colors: &[ColorToken],
) -> Option<String> {
    if !colors.is_empty() {
        return None;
    }
    let last = parts.last()?;
    tail_phrase(clause.get(last.start..)?.trim(), 2)
}
