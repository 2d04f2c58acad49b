//! Masking of unrecognized adjective + base-color phrases.
//!
//! In a clause that names a part, "galaxy purple" must not silently resolve to
//! plain "purple". The guard finds `<word> <base color>` bigrams, keeps the
//! ones it can explain, and blanks out the rest so the color extractor never
//! sees them. Blanking replaces each byte with a space, so offsets into the
//! clause stay valid.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::catalog::ColorCatalog;
use crate::color::{is_color_modifier, BASE_COLOR_WORDS};
use crate::diagnostics::{is_stop_word, PhraseSet};
use crate::phrase::{char_len_at, is_word_boundary};

static BIGRAM: Lazy<Regex> = Lazy::new(|| {
    let bases = BASE_COLOR_WORDS.join("|");
    Regex::new(&format!(r"([a-z]+)\s+({bases})")).expect("bigram pattern is valid")
});

/// Blanks unknown `<adjective> <base color>` phrases out of `clause`.
///
/// A bigram is kept when the whole phrase is a catalog color, or when its
/// leading word is a color modifier, a matched part phrase, or a stop-word.
/// Every other bigram is recorded in `unknown_colors` and replaced by spaces.
pub fn mask_unknown_colors(
    clause: &str,
    colors: &ColorCatalog,
    part_phrases: &HashSet<&str>,
    unknown_colors: &mut PhraseSet,
) -> String {
    let mut masked = String::with_capacity(clause.len());
    let mut copied = 0;
    let mut pos = 0;

    while pos <= clause.len() {
        let Some(caps) = BIGRAM.captures_at(clause, pos) else {
            break;
        };
        let (Some(whole), Some(adj), Some(base)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            break;
        };
        if !(is_word_boundary(clause, whole.start()) && is_word_boundary(clause, whole.end())) {
            pos = whole.start() + char_len_at(clause, whole.start());
            continue;
        }

        let adj = adj.as_str();
        let phrase = format!("{} {}", adj, base.as_str());
        let known = colors.contains(&phrase)
            || is_color_modifier(adj)
            || part_phrases.contains(adj)
            || is_stop_word(adj);

        if !known {
            log::trace!("masking unknown color phrase '{}'", phrase);
            masked.push_str(&clause[copied..whole.start()]);
            masked.extend(std::iter::repeat(' ').take(whole.len()));
            copied = whole.end();
            unknown_colors.insert(phrase);
        }
        pos = whole.end();
    }

    masked.push_str(&clause[copied..]);
    masked
}
