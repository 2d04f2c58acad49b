//! Color value resolution.
//!
//! Every color the parser produces is a [`Hex`], which always renders as
//! uppercase `#RRGGBB`. Raw tokens are resolved from three notations:
//!
//! - Hex literals: `#f80`, `#ff8800` or `ff8800`
//! - Functional notation: `rgb(255, 136, 0)` or `rgba(255, 136, 0, 0.5)`
//! - Named colors looked up in a [`ColorCatalog`], including multi-word names
//!   such as `light blue`
//!
//! The resolvers return `Option` rather than an error: an unrecognized token is
//! an expected outcome while scanning free text.
//!
//! # Example
//!
//! ```rust
//! use dyeline_parse::{normalize_hex, rgb_to_hex, resolve_named_color, ColorCatalog};
//!
//! assert_eq!(normalize_hex("#f80").unwrap().to_string(), "#FF8800");
//! assert_eq!(rgb_to_hex("rgb(255, 0, 0)").unwrap().to_string(), "#FF0000");
//!
//! let colors = ColorCatalog::builtin();
//! assert_eq!(
//!     resolve_named_color("  Light   Blue ", &colors).unwrap().to_string(),
//!     "#60A5FA"
//! );
//! ```

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::catalog::ColorCatalog;
use crate::error::HexError;

/// Single-word color names that can close an adjective + color phrase.
///
/// Used by the unknown-color guard to spot phrases like "galaxy purple".
pub const BASE_COLOR_WORDS: &[&str] = &[
    "black", "white", "gray", "grey", "silver", "navy", "red", "maroon", "green", "emerald",
    "teal", "blue", "yellow", "gold", "orange", "purple", "pink", "beige", "cream", "ivory",
    "brown",
];

/// Words that may precede a base color without making it an unknown color.
pub const COLOR_MODIFIERS: &[&str] = &[
    "matte", "glossy", "light", "dark", "deep", "pale", "bright", "off", "warm", "cool",
];

/// Returns `true` if `word` is one of the [`COLOR_MODIFIERS`].
pub fn is_color_modifier(word: &str) -> bool {
    COLOR_MODIFIERS.contains(&word)
}

/// A normalized 24-bit color.
///
/// Displays (and serializes) as uppercase `#RRGGBB`, so any string produced
/// from a `Hex` matches `^#[0-9A-F]{6}$`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hex {
    r: u8,
    g: u8,
    b: u8,
}

impl Hex {
    /// Creates a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Returns the `(r, g, b)` channels.
    pub const fn rgb(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Parses the digits of a hex color (without the `#` prefix).
    fn parse_digits(digits: &str) -> Option<Self> {
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match digits.len() {
            // #rgb -> #rrggbb
            3 => Some(Self::new(
                channel(&digits[0..1])? * 17,
                channel(&digits[1..2])? * 17,
                channel(&digits[2..3])? * 17,
            )),
            6 => Some(Self::new(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            _ => None,
        }
    }
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Hex {
    type Err = HexError;

    /// Accepts `#rgb`, `#rrggbb`, `rgb` or `rrggbb`, case-insensitive, with
    /// surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        Self::parse_digits(digits).ok_or_else(|| HexError(s.to_string()))
    }
}

impl Serialize for Hex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Hex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Normalizes a hex literal to uppercase `#RRGGBB`.
///
/// Accepts 3 or 6 hex digits with an optional leading `#`. Returns `None` for
/// anything else.
pub fn normalize_hex(raw: &str) -> Option<Hex> {
    raw.parse().ok()
}

static RGB_FUNCTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^rgb\(\s*([0-9]{1,3})\s*,\s*([0-9]{1,3})\s*,\s*([0-9]{1,3})\s*\)$")
        .expect("rgb() pattern is valid")
});

static RGBA_FUNCTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^rgba\(\s*([0-9]{1,3})\s*,\s*([0-9]{1,3})\s*,\s*([0-9]{1,3})\s*,\s*(0|1|0?\.[0-9]+)\s*\)$",
    )
    .expect("rgba() pattern is valid")
});

/// Converts `rgb(r, g, b)` or `rgba(r, g, b, a)` notation to a [`Hex`].
///
/// Channels take up to three digits and are clamped into `0..=255`. The alpha
/// component must be `0`, `1` or a decimal fraction and is otherwise ignored.
pub fn rgb_to_hex(raw: &str) -> Option<Hex> {
    let s = raw.trim().to_lowercase();
    let caps = RGB_FUNCTION
        .captures(&s)
        .or_else(|| RGBA_FUNCTION.captures(&s))?;

    let channel = |i: usize| -> Option<u8> {
        let value: u16 = caps.get(i)?.as_str().parse().ok()?;
        Some(value.min(255) as u8)
    };
    Some(Hex::new(channel(1)?, channel(2)?, channel(3)?))
}

/// Looks up a named color, ignoring case and extra whitespace.
pub fn resolve_named_color(phrase: &str, catalog: &ColorCatalog) -> Option<Hex> {
    catalog.get(&normalize_phrase(phrase))
}

/// Trims, lowercases and collapses internal whitespace to single spaces.
pub(crate) fn normalize_phrase(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Hex literal tests
    // =========================================================================

    #[test]
    fn test_normalize_hex_6_digit() {
        assert_eq!(normalize_hex("#ff6b35"), Some(Hex::new(255, 107, 53)));
        assert_eq!(normalize_hex("#000000"), Some(Hex::new(0, 0, 0)));
        assert_eq!(normalize_hex("ffffff"), Some(Hex::new(255, 255, 255)));
    }

    #[test]
    fn test_normalize_hex_3_digit() {
        assert_eq!(normalize_hex("#fff"), Some(Hex::new(255, 255, 255)));
        assert_eq!(normalize_hex("#f80"), Some(Hex::new(255, 136, 0)));
        assert_eq!(normalize_hex("f80"), Some(Hex::new(255, 136, 0)));
    }

    #[test]
    fn test_normalize_hex_case_and_whitespace() {
        assert_eq!(normalize_hex("  #FF6B35 "), Some(Hex::new(255, 107, 53)));
        assert_eq!(normalize_hex("#FfF"), Some(Hex::new(255, 255, 255)));
    }

    #[test]
    fn test_normalize_hex_invalid() {
        assert_eq!(normalize_hex(""), None);
        assert_eq!(normalize_hex("#"), None);
        assert_eq!(normalize_hex("#ff"), None);
        assert_eq!(normalize_hex("#ffff"), None);
        assert_eq!(normalize_hex("#gggggg"), None);
        assert_eq!(normalize_hex("#+f+f+f"), None);
        assert_eq!(normalize_hex("##fff"), None);
        assert_eq!(normalize_hex("#ééé"), None);
    }

    #[test]
    fn test_hex_display_is_uppercase() {
        assert_eq!(Hex::new(0xab, 0x0c, 0xde).to_string(), "#AB0CDE");
        assert_eq!(Hex::new(0, 0, 0).to_string(), "#000000");
    }

    #[test]
    fn test_hex_from_str_error_keeps_input() {
        let err = "nope".parse::<Hex>().unwrap_err();
        assert_eq!(err, HexError("nope".to_string()));
    }

    #[test]
    fn test_hex_serde_as_string() {
        let json = serde_json::to_string(&Hex::new(255, 0, 0)).unwrap();
        assert_eq!(json, "\"#FF0000\"");

        let back: Hex = serde_json::from_str("\"#0f0\"").unwrap();
        assert_eq!(back, Hex::new(0, 255, 0));

        assert!(serde_json::from_str::<Hex>("\"green\"").is_err());
    }

    // =========================================================================
    // rgb()/rgba() tests
    // =========================================================================

    #[test]
    fn test_rgb_to_hex() {
        assert_eq!(rgb_to_hex("rgb(255, 0, 0)"), Some(Hex::new(255, 0, 0)));
        assert_eq!(rgb_to_hex("rgb(1,2,3)"), Some(Hex::new(1, 2, 3)));
        assert_eq!(rgb_to_hex("RGB( 16 , 32 , 48 )"), Some(Hex::new(16, 32, 48)));
    }

    #[test]
    fn test_rgba_to_hex_ignores_alpha() {
        assert_eq!(rgb_to_hex("rgba(0, 128, 255, 0.5)"), Some(Hex::new(0, 128, 255)));
        assert_eq!(rgb_to_hex("rgba(0,128,255,1)"), Some(Hex::new(0, 128, 255)));
        assert_eq!(rgb_to_hex("rgba(0,128,255,.25)"), Some(Hex::new(0, 128, 255)));
    }

    #[test]
    fn test_rgb_clamps_channels() {
        assert_eq!(rgb_to_hex("rgb(300, 256, 999)"), Some(Hex::new(255, 255, 255)));
    }

    #[test]
    fn test_rgb_malformed() {
        assert_eq!(rgb_to_hex("rgb(1000, 0, 0)"), None);
        assert_eq!(rgb_to_hex("rgb(1, 2)"), None);
        assert_eq!(rgb_to_hex("rgb(1, 2, 3, 4)"), None);
        assert_eq!(rgb_to_hex("rgba(1, 2, 3)"), None);
        assert_eq!(rgb_to_hex("rgba(1, 2, 3, 2)"), None);
        assert_eq!(rgb_to_hex("rgb(-1, 2, 3)"), None);
        assert_eq!(rgb_to_hex("rgb(a, b, c)"), None);
        assert_eq!(rgb_to_hex("rgb(1, 2, 3"), None);
    }

    // =========================================================================
    // Named color tests
    // =========================================================================

    #[test]
    fn test_resolve_named_color() {
        let colors = ColorCatalog::builtin();
        assert_eq!(resolve_named_color("black", &colors), Some(Hex::new(0, 0, 0)));
        assert_eq!(resolve_named_color("GREY", &colors), Some(Hex::new(128, 128, 128)));
        assert_eq!(
            resolve_named_color("off\twhite", &colors).map(|h| h.to_string()),
            Some("#F8FAFC".to_string())
        );
        assert_eq!(resolve_named_color("galaxy purple", &colors), None);
        assert_eq!(resolve_named_color("", &colors), None);
    }

    #[test]
    fn test_modifiers() {
        assert!(is_color_modifier("dark"));
        assert!(is_color_modifier("matte"));
        assert!(!is_color_modifier("galaxy"));
    }

    #[test]
    fn test_normalize_phrase() {
        assert_eq!(normalize_phrase("  Light   BLUE\n"), "light blue");
        assert_eq!(normalize_phrase(""), "");
    }
}
