//! Part and color catalogs.
//!
//! A [`PartCatalog`] is the validated set of canonical part keys for one
//! product model plus its alias phrases. Part keys can only be minted by a
//! catalog, so any [`PartKey`] handed out by the parser is guaranteed to be a
//! member of the catalog it was parsed against.
//!
//! A [`ColorCatalog`] maps named-color phrases (possibly multi-word) to
//! [`Hex`] values.

use std::borrow::Borrow;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::color::{normalize_phrase, Hex};
use crate::error::{CatalogError, Result};

/// A canonical part key belonging to a [`PartCatalog`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartKey(String);

impl PartKey {
    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PartKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PartKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PartKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for PartKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for PartKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Serialize for PartKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// The ordered set of part keys for one product model, with alias phrases.
///
/// # Example
///
/// ```rust
/// use dyeline_parse::PartCatalog;
///
/// let catalog = PartCatalog::new(["seat", "legs"])?
///     .with_alias("cushion", "seat")?;
///
/// assert!(catalog.contains("seat"));
/// assert!(!catalog.contains("cushion"));
/// assert_eq!(catalog.resolve("Cushion").map(|k| k.as_str()), Some("seat"));
/// # Ok::<(), dyeline_parse::CatalogError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartCatalog {
    parts: Vec<PartKey>,
    aliases: Vec<(String, PartKey)>,
}

impl PartCatalog {
    /// Creates a catalog from canonical part keys, in order.
    ///
    /// Keys are trimmed; empty or repeated keys are rejected.
    pub fn new<I, S>(parts: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut catalog = Self::default();
        for part in parts {
            let key = part.as_ref().trim();
            if key.is_empty() {
                return Err(CatalogError::EmptyPart);
            }
            if catalog.contains(key) {
                return Err(CatalogError::DuplicatePart(key.to_string()));
            }
            catalog.parts.push(PartKey(key.to_string()));
        }
        Ok(catalog)
    }

    /// Builds a catalog from keys known to be distinct and non-empty.
    pub(crate) fn from_trusted<'a>(parts: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            parts: parts.into_iter().map(|p| PartKey(p.to_string())).collect(),
            aliases: Vec::new(),
        }
    }

    /// Adds an alias phrase for an existing part key.
    ///
    /// The phrase is normalized (lowercased, whitespace collapsed). Adding an
    /// alias that already exists retargets it.
    pub fn with_alias(mut self, alias: &str, target: &str) -> Result<Self> {
        self.insert_alias(alias, target)?;
        Ok(self)
    }

    /// Adds or retargets an alias phrase.
    pub fn insert_alias(&mut self, alias: &str, target: &str) -> Result<()> {
        let key = self
            .key(target.trim())
            .cloned()
            .ok_or_else(|| CatalogError::UnknownAliasTarget {
                alias: alias.to_string(),
                target: target.to_string(),
            })?;
        let phrase = normalize_phrase(alias);
        if phrase.is_empty() {
            return Ok(());
        }
        match self.aliases.iter_mut().find(|(p, _)| *p == phrase) {
            Some(entry) => entry.1 = key,
            None => self.aliases.push((phrase, key)),
        }
        Ok(())
    }

    /// Returns `true` if `key` is a canonical part key of this catalog.
    pub fn contains(&self, key: &str) -> bool {
        self.key(key).is_some()
    }

    /// Returns the canonical key equal to `key`.
    pub fn key(&self, key: &str) -> Option<&PartKey> {
        self.parts.iter().find(|p| p.as_str() == key)
    }

    /// Resolves a part key or alias phrase (case-insensitive) to its canonical key.
    pub fn resolve(&self, phrase: &str) -> Option<&PartKey> {
        let phrase = normalize_phrase(phrase);
        self.parts
            .iter()
            .find(|p| p.as_str().to_lowercase() == phrase)
            .or_else(|| {
                self.aliases
                    .iter()
                    .find(|(alias, _)| *alias == phrase)
                    .map(|(_, key)| key)
            })
    }

    /// The canonical part keys, in catalog order.
    pub fn parts(&self) -> &[PartKey] {
        &self.parts
    }

    /// The alias phrases and their targets, in insertion order.
    pub fn aliases(&self) -> &[(String, PartKey)] {
        &self.aliases
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Every phrase that names a part: canonical keys first, then aliases.
    pub(crate) fn phrases(&self) -> impl Iterator<Item = (&str, &PartKey)> {
        self.parts
            .iter()
            .map(|key| (key.as_str(), key))
            .chain(self.aliases.iter().map(|(alias, key)| (alias.as_str(), key)))
    }
}

/// Named colors known to the parser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorCatalog {
    entries: Vec<(String, Hex)>,
}

const BUILTIN_COLORS: &[(&str, Hex)] = &[
    ("black", Hex::new(0x00, 0x00, 0x00)),
    ("white", Hex::new(0xFF, 0xFF, 0xFF)),
    ("gray", Hex::new(0x80, 0x80, 0x80)),
    ("grey", Hex::new(0x80, 0x80, 0x80)),
    ("silver", Hex::new(0xC0, 0xC0, 0xC0)),
    ("navy", Hex::new(0x0B, 0x1F, 0x3B)),
    ("red", Hex::new(0xFF, 0x00, 0x00)),
    ("maroon", Hex::new(0x80, 0x00, 0x00)),
    ("green", Hex::new(0x00, 0xA8, 0x6B)),
    ("emerald", Hex::new(0x10, 0xB9, 0x81)),
    ("teal", Hex::new(0x14, 0xB8, 0xA6)),
    ("blue", Hex::new(0x25, 0x63, 0xEB)),
    ("light blue", Hex::new(0x60, 0xA5, 0xFA)),
    ("sky blue", Hex::new(0x38, 0xBD, 0xF8)),
    ("yellow", Hex::new(0xFA, 0xCC, 0x15)),
    ("gold", Hex::new(0xD4, 0xAF, 0x37)),
    ("orange", Hex::new(0xF9, 0x73, 0x16)),
    ("purple", Hex::new(0x8B, 0x5C, 0xF6)),
    ("pink", Hex::new(0xEC, 0x48, 0x99)),
    ("beige", Hex::new(0xD6, 0xC7, 0xA1)),
    ("cream", Hex::new(0xFF, 0xF3, 0xD6)),
    ("ivory", Hex::new(0xFF, 0xFF, 0xF0)),
    ("off white", Hex::new(0xF8, 0xFA, 0xFC)),
    ("brown", Hex::new(0x7C, 0x4A, 0x2D)),
    ("dark grey", Hex::new(0x37, 0x41, 0x51)),
    ("dark gray", Hex::new(0x37, 0x41, 0x51)),
    ("light grey", Hex::new(0xD1, 0xD5, 0xDB)),
    ("light gray", Hex::new(0xD1, 0xD5, 0xDB)),
];

impl ColorCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in named colors.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for (name, hex) in BUILTIN_COLORS {
            catalog.insert(name, *hex);
        }
        catalog
    }

    /// Adds or replaces a named color. Names are normalized before storage;
    /// an empty name is ignored.
    pub fn insert(&mut self, name: &str, hex: Hex) {
        let name = normalize_phrase(name);
        if name.is_empty() {
            return;
        }
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = hex,
            None => self.entries.push((name, hex)),
        }
    }

    /// Builder-style [`insert`](ColorCatalog::insert).
    pub fn with(mut self, name: &str, hex: Hex) -> Self {
        self.insert(name, hex);
        self
    }

    /// Adds a named color given as a hex string.
    pub fn insert_str(&mut self, name: &str, value: &str) -> Result<()> {
        let hex = value.parse().map_err(|source| CatalogError::InvalidColor {
            name: name.to_string(),
            source,
        })?;
        self.insert(name, hex);
        Ok(())
    }

    /// Looks up an already-normalized name.
    pub fn get(&self, name: &str) -> Option<Hex> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, hex)| *hex)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterates `(name, hex)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Hex)> {
        self.entries.iter().map(|(n, hex)| (n.as_str(), *hex))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
