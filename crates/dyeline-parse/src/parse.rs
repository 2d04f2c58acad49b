//! The instruction parser.
//!
//! [`StyleParser`] ties the pieces together. For each clause of the
//! lowercased input it:
//!
//! 1. finds part mentions,
//! 2. masks unknown adjective + color phrases (only when a part was found),
//! 3. finds color mentions,
//! 4. records diagnostics for clauses that cannot produce assignments,
//! 5. pairs parts with colors and merges the pairs into the result.
//!
//! Later clauses overwrite earlier assignments for the same part.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::catalog::{ColorCatalog, PartCatalog, PartKey};
use crate::color::Hex;
use crate::diagnostics::{guess_unknown_color, guess_unknown_part, PhraseSet};
use crate::extract::{color_matcher, extract_colors, extract_parts};
use crate::guard::mask_unknown_colors;
use crate::pairing::pair_parts;
use crate::phrase::PhraseMatcher;
use crate::segment::split_segments;

/// Part → color assignments, ordered by first assignment.
///
/// Reassigning a part updates its color in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignments {
    entries: Vec<(PartKey, Hex)>,
}

impl Assignments {
    pub fn insert(&mut self, part: PartKey, hex: Hex) {
        match self.entries.iter_mut().find(|(k, _)| *k == part) {
            Some(entry) => entry.1 = hex,
            None => self.entries.push((part, hex)),
        }
    }

    pub fn get(&self, part: &str) -> Option<Hex> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_str() == part)
            .map(|(_, hex)| *hex)
    }

    pub fn contains(&self, part: &str) -> bool {
        self.get(part).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PartKey, Hex)> {
        self.entries.iter().map(|(k, hex)| (k, *hex))
    }

    pub fn keys(&self) -> impl Iterator<Item = &PartKey> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Assignments {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (part, hex) in &self.entries {
            map.serialize_entry(part, hex)?;
        }
        map.end()
    }
}

/// The outcome of parsing one instruction text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    pub assignments: Assignments,
    /// Guessed phrases for parts the catalog does not know, first-seen order.
    pub unknown_parts: PhraseSet,
    /// Guessed phrases for colors that could not be resolved, first-seen order.
    pub unknown_colors: PhraseSet,
    /// Every part that received a color, in resolution order, with repeats.
    pub matched_parts_in_order: Vec<PartKey>,
}

impl ParseResult {
    /// The part a UI should select after applying this result.
    pub fn last_matched_part(&self) -> Option<&PartKey> {
        self.matched_parts_in_order.last()
    }

    /// `true` when nothing was assigned and nothing was reported.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty() && self.unknown_parts.is_empty() && self.unknown_colors.is_empty()
    }
}

impl fmt::Display for ParseResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self
            .assignments
            .iter()
            .map(|(part, hex)| format!("{}={}", part, hex))
            .collect();
        write!(f, "{{{}}}", pairs.join(", "))
    }
}

/// A parser prepared for one part catalog and one color catalog.
///
/// Preparing sorts the candidate phrases once; [`parse`](StyleParser::parse)
/// itself allocates only per-call state, so a parser can be shared freely
/// across threads.
///
/// # Example
///
/// ```rust
/// use dyeline_parse::{ColorCatalog, Model, StyleParser};
///
/// let parts = Model::Shoe.catalog();
/// let colors = ColorCatalog::builtin();
/// let parser = StyleParser::new(&parts, &colors);
///
/// let result = parser.parse("laces black, mesh white, stripes #ff0000");
/// assert_eq!(result.assignments.get("laces").unwrap().to_string(), "#000000");
/// assert_eq!(result.assignments.get("mesh").unwrap().to_string(), "#FFFFFF");
/// assert_eq!(result.assignments.get("stripes").unwrap().to_string(), "#FF0000");
/// ```
#[derive(Debug, Clone)]
pub struct StyleParser<'c> {
    colors: &'c ColorCatalog,
    part_matcher: PhraseMatcher<PartKey>,
    color_matcher: PhraseMatcher<String>,
}

impl<'c> StyleParser<'c> {
    pub fn new(parts: &PartCatalog, colors: &'c ColorCatalog) -> Self {
        let part_matcher = PhraseMatcher::new(
            parts
                .phrases()
                .map(|(phrase, key)| (phrase.to_string(), key.clone())),
        );
        Self {
            colors,
            part_matcher,
            color_matcher: color_matcher(colors),
        }
    }

    /// Parses instruction text. Never fails: unrecognized input only shows up
    /// in the diagnostic phrase sets.
    pub fn parse(&self, text: &str) -> ParseResult {
        let mut result = ParseResult::default();
        if text.trim().is_empty() {
            return result;
        }

        for clause in split_segments(&text.to_lowercase()) {
            self.parse_clause(&clause, &mut result);
        }

        log::debug!(
            "parsed {} assignment(s), {} unknown part(s), {} unknown color(s)",
            result.assignments.len(),
            result.unknown_parts.len(),
            result.unknown_colors.len()
        );
        result
    }

    fn parse_clause(&self, clause: &str, result: &mut ParseResult) {
        let parts = extract_parts(clause, &self.part_matcher);

        let colors = if parts.tokens.is_empty() {
            extract_colors(clause, &self.color_matcher, self.colors)
        } else {
            let masked = mask_unknown_colors(
                clause,
                self.colors,
                &parts.phrases,
                &mut result.unknown_colors,
            );
            extract_colors(&masked, &self.color_matcher, self.colors)
        };

        log::debug!(
            "clause '{}': {} part(s), {} color(s)",
            clause,
            parts.tokens.len(),
            colors.len()
        );
        log::trace!("parts {:?} colors {:?}", parts.tokens, colors);

        if parts.tokens.is_empty() {
            if let Some(guess) = guess_unknown_part(clause, &colors) {
                result.unknown_parts.insert(guess);
            }
        }
        if let Some(guess) = guess_unknown_color(clause, &parts.tokens, &colors) {
            result.unknown_colors.insert(guess);
        }

        for pairing in pair_parts(&parts.tokens, &colors) {
            result.matched_parts_in_order.push(pairing.part.clone());
            result.assignments.insert(pairing.part, pairing.hex);
        }
    }
}

/// Parses `text` against a part catalog and a color catalog.
///
/// Convenience wrapper around [`StyleParser`] for one-off calls.
pub fn parse_style_text(text: &str, parts: &PartCatalog, colors: &ColorCatalog) -> ParseResult {
    StyleParser::new(parts, colors).parse(text)
}
