//! Deciding which color belongs to which part within one clause.
//!
//! # Rules
//!
//! - **Broadcast**: a clause with exactly one color gives it to every part
//!   ("laces and mesh black").
//! - **Region**: otherwise each part owns the span from its own start to the
//!   next part's start (the last part's region is unbounded). A part takes,
//!   in order of preference:
//!   1. the last color starting inside its region ("laces black, mesh white"),
//!   2. the first color at or after its start,
//!   3. the last color before its start ("black laces"),
//!
//!   and is skipped when there is no color at all.

use crate::catalog::PartKey;
use crate::color::Hex;
use crate::extract::{ColorToken, PartToken};

/// One resolved part/color pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pairing {
    pub part: PartKey,
    pub hex: Hex,
}

/// Pairs parts with colors. `parts` and `colors` must be ordered by offset,
/// and `parts` must hold at most one token per key.
///
/// The result is in resolution order.
pub fn pair_parts(parts: &[PartToken], colors: &[ColorToken]) -> Vec<Pairing> {
    if parts.is_empty() || colors.is_empty() {
        return Vec::new();
    }

    if let [only] = colors {
        return parts
            .iter()
            .map(|p| Pairing {
                part: p.key.clone(),
                hex: only.hex,
            })
            .collect();
    }

    parts
        .iter()
        .enumerate()
        .filter_map(|(i, part)| {
            let next_start = parts.get(i + 1).map_or(usize::MAX, |next| next.start);
            choose_color(part.start, next_start, colors).map(|color| Pairing {
                part: part.key.clone(),
                hex: color.hex,
            })
        })
        .collect()
}

fn choose_color(start: usize, next_start: usize, colors: &[ColorToken]) -> Option<&ColorToken> {
    colors
        .iter()
        .rev()
        .find(|c| c.start >= start && c.start < next_start)
        .or_else(|| colors.iter().find(|c| c.start >= start))
        .or_else(|| colors.iter().rev().find(|c| c.start < start))
}
