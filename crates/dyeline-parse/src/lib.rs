//! Dyeline Parse - free-text color instructions for product customizers.
//!
//! Turns text like "laces black, mesh white and the sole #ff0000" into
//! part → color assignments for a product model, reporting phrases it could
//! not map to a known part or color. It supports:
//!
//! - Named colors (with multi-word names like "light blue"), `#rgb`,
//!   `#rrggbb`, bare `rrggbb` and `rgb()`/`rgba()` notations
//! - Part aliases ("bottom" → `sole`), longest phrase wins
//! - Several clauses per instruction, later clauses override earlier ones
//! - Diagnostics for unknown parts and unknown colors
//! - Built-in models plus YAML/JSON catalog files
//!
//! # Quick Start
//!
//! ```rust
//! use dyeline_parse::{parse_style_text, ColorCatalog, Model};
//!
//! let parts = Model::Shoe.catalog();
//! let colors = ColorCatalog::builtin();
//!
//! let result = parse_style_text("make the laces and mesh black, tongue purple", &parts, &colors);
//! assert_eq!(result.assignments.get("laces").unwrap().to_string(), "#000000");
//! assert_eq!(result.assignments.get("mesh").unwrap().to_string(), "#000000");
//! assert_eq!(result.unknown_parts.as_slice(), ["tongue"]);
//! ```
//!
//! # Pipeline
//!
//! ```text
//! text ─ lowercase ─ split into clauses ─┬─ find parts
//!                                        ├─ mask unknown "<adjective> <color>" phrases
//!                                        ├─ find colors
//!                                        ├─ diagnostics
//!                                        └─ pair parts with colors ─ merge
//! ```
//!
//! # Color Notations
//!
//! | Notation | Example | Boundary |
//! |----------|---------|----------|
//! | `rgb()` / `rgba()` | `rgb(255, 0, 0)` | word boundary before |
//! | short hex | `#f00` | word boundary after |
//! | long hex | `#ff0000`, `ff0000` | whitespace, brackets or punctuation |
//! | named | `light blue` | word boundaries both sides |
//!
//! Parsing never fails: anything it cannot interpret ends up in
//! [`ParseResult::unknown_parts`] or [`ParseResult::unknown_colors`].

mod catalog;
mod color;
mod diagnostics;
mod error;
mod extract;
mod file;
mod guard;
mod models;
mod pairing;
mod parse;
mod phrase;
mod segment;

// Re-export public API
pub use catalog::{ColorCatalog, PartCatalog, PartKey};
pub use color::{
    is_color_modifier, normalize_hex, resolve_named_color, rgb_to_hex, Hex, BASE_COLOR_WORDS,
    COLOR_MODIFIERS,
};
pub use diagnostics::{guess_unknown_color, guess_unknown_part, PhraseSet, STOP_WORDS};
pub use error::{CatalogError, HexError, Result};
pub use extract::{color_matcher, extract_colors, extract_parts, ColorToken, PartScan, PartToken};
pub use file::{Catalog, CatalogDocument, ModelDocument, CATALOG_EXTENSIONS};
pub use guard::mask_unknown_colors;
pub use models::{Model, ModelCatalog, ModelSpec};
pub use pairing::{pair_parts, Pairing};
pub use parse::{parse_style_text, Assignments, ParseResult, StyleParser};
pub use phrase::{PhraseMatch, PhraseMatcher, PhraseMatches};
pub use segment::split_segments;
