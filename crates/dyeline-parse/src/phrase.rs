//! Word-boundary phrase matching with longest-match precedence.
//!
//! [`PhraseMatcher`] finds every occurrence of a set of candidate phrases in a
//! text and reduces them to a non-overlapping, offset-ordered list:
//!
//! 1. Every case-insensitive occurrence bounded by word boundaries is found.
//!    Word characters are ASCII letters, digits and `_`.
//! 2. Occurrences are ordered by start offset, longer phrases first on ties.
//! 3. Overlaps are dropped greedily left to right.
//!
//! The same matcher serves part names/aliases and named colors.
//!
//! # Example
//!
//! ```rust
//! use dyeline_parse::PhraseMatcher;
//!
//! let matcher = PhraseMatcher::new([("inner", 1), ("inner lining", 2)]);
//! let matches = matcher.find_all("make the inner lining red");
//!
//! assert_eq!(matches.len(), 1);
//! assert_eq!(*matches[0].value, 2);
//! assert_eq!(matches[0].phrase, "inner lining");
//! ```

use std::collections::HashSet;
use std::ops::Deref;

/// Returns `true` for ASCII word characters (`[A-Za-z0-9_]`).
pub(crate) fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Returns `true` if byte offset `idx` of `text` sits on an ASCII word boundary.
///
/// `idx` must be a char boundary of `text`.
pub(crate) fn is_word_boundary(text: &str, idx: usize) -> bool {
    let before = text[..idx].chars().next_back().is_some_and(is_word_char);
    let after = text[idx..].chars().next().is_some_and(is_word_char);
    before != after
}

/// Byte length of the char starting at `idx`, or 1 past the end.
pub(crate) fn char_len_at(text: &str, idx: usize) -> usize {
    text[idx..].chars().next().map_or(1, char::len_utf8)
}

#[derive(Debug, Clone)]
struct Candidate<T> {
    phrase: String,
    value: T,
}

/// A phrase occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhraseMatch<'m, T> {
    /// The value associated with the matched phrase.
    pub value: &'m T,
    /// The matched phrase, lowercased.
    pub phrase: &'m str,
    /// Byte offset of the first matched byte.
    pub start: usize,
    /// Byte offset one past the last matched byte.
    pub end: usize,
}

/// Offset-ordered, non-overlapping phrase matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseMatches<'m, T> {
    hits: Vec<PhraseMatch<'m, T>>,
}

impl<'m, T> PhraseMatches<'m, T> {
    /// The literal phrases that matched, lowercased.
    pub fn matched_phrases(&self) -> HashSet<&'m str> {
        self.hits.iter().map(|h| h.phrase).collect()
    }

    pub fn into_vec(self) -> Vec<PhraseMatch<'m, T>> {
        self.hits
    }
}

impl<'m, T> Deref for PhraseMatches<'m, T> {
    type Target = [PhraseMatch<'m, T>];

    fn deref(&self) -> &Self::Target {
        &self.hits
    }
}

/// Finds candidate phrases in text.
///
/// Candidates are kept ordered longest phrase first; candidates of equal
/// length keep their insertion order, which decides ties between identical
/// phrases.
#[derive(Debug, Clone)]
pub struct PhraseMatcher<T> {
    candidates: Vec<Candidate<T>>,
}

impl<T> PhraseMatcher<T> {
    /// Creates a matcher from `(phrase, value)` pairs. Empty phrases are ignored.
    pub fn new<I, P>(candidates: I) -> Self
    where
        I: IntoIterator<Item = (P, T)>,
        P: AsRef<str>,
    {
        let mut candidates: Vec<Candidate<T>> = candidates
            .into_iter()
            .filter(|(phrase, _)| !phrase.as_ref().is_empty())
            .map(|(phrase, value)| Candidate {
                phrase: phrase.as_ref().to_lowercase(),
                value,
            })
            .collect();
        candidates.sort_by(|a, b| b.phrase.len().cmp(&a.phrase.len()));
        Self { candidates }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Finds all non-overlapping phrase occurrences in `text`.
    ///
    /// Matching is case-insensitive; offsets refer to `text.to_lowercase()`,
    /// which equals `text` when the caller has already lowercased it.
    pub fn find_all(&self, text: &str) -> PhraseMatches<'_, T> {
        let lower = text.to_lowercase();
        let mut hits = Vec::new();

        for candidate in &self.candidates {
            let phrase = candidate.phrase.as_str();
            let mut pos = 0;
            while pos <= lower.len() {
                let Some(rel) = lower[pos..].find(phrase) else {
                    break;
                };
                let start = pos + rel;
                let end = start + phrase.len();
                if is_word_boundary(&lower, start) && is_word_boundary(&lower, end) {
                    hits.push(PhraseMatch {
                        value: &candidate.value,
                        phrase,
                        start,
                        end,
                    });
                    pos = end;
                } else {
                    // A rejected occurrence may still overlap a valid one.
                    pos = start + char_len_at(&lower, start);
                }
            }
        }

        hits.sort_by(|a, b| {
            a.start
                .cmp(&b.start)
                .then_with(|| b.phrase.len().cmp(&a.phrase.len()))
        });

        let mut last_end = 0;
        let mut filtered = Vec::with_capacity(hits.len());
        for hit in hits {
            if hit.start < last_end {
                continue;
            }
            last_end = hit.end;
            filtered.push(hit);
        }

        PhraseMatches { hits: filtered }
    }
}
