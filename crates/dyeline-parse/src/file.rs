//! Catalog files.
//!
//! A [`Catalog`] bundles the model catalog and the color catalog a parser
//! runs against. It starts from the built-ins and can be extended from YAML
//! or JSON:
//!
//! ```yaml
//! colors:            # replaces the built-in named colors
//!   ocean: "#0077BE"
//!   sand: "#e2ca76"
//! models:            # added to the built-ins, replacing models of the same name
//!   Chair:
//!     parts: [seat, legs, back]
//!     aliases:
//!       cushion: seat
//!     defaults:
//!       legs: "#7C4A2D"
//!     fallback: "#ffffff"
//! ```
//!
//! # Supported Extensions
//!
//! | Extension | Format |
//! |-----------|--------|
//! | `.yaml`, `.yml` | YAML |
//! | `.json` | JSON |

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::catalog::{ColorCatalog, PartCatalog};
use crate::color::Hex;
use crate::error::{CatalogError, Result};
use crate::models::{ModelCatalog, ModelSpec};

/// Recognized catalog file extensions.
pub const CATALOG_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

const DEFAULT_FALLBACK: Hex = Hex::new(0xFF, 0xFF, 0xFF);

/// Raw catalog document, as written in a file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogDocument {
    /// Named colors. When present, replaces the built-in table.
    #[serde(default)]
    pub colors: Option<BTreeMap<String, String>>,
    /// Models by name.
    #[serde(default)]
    pub models: BTreeMap<String, ModelDocument>,
}

/// Raw model entry of a [`CatalogDocument`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelDocument {
    pub parts: Vec<String>,
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
    #[serde(default)]
    pub defaults: BTreeMap<String, String>,
    /// Default color for parts missing from `defaults` (white if omitted).
    #[serde(default)]
    pub fallback: Option<String>,
}

/// Models and named colors a parser is configured with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pub models: ModelCatalog,
    pub colors: ColorCatalog,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn parse_hex(name: &str, value: &str) -> Result<Hex> {
    value.parse().map_err(|source| CatalogError::InvalidColor {
        name: name.to_string(),
        source,
    })
}

impl Catalog {
    /// The built-in models and colors.
    pub fn builtin() -> Self {
        Self {
            models: ModelCatalog::builtin(),
            colors: ColorCatalog::builtin(),
        }
    }

    /// Built-ins extended with a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let document: CatalogDocument =
            serde_yaml::from_str(yaml).map_err(|e| CatalogError::Parse {
                path: None,
                message: e.to_string(),
            })?;
        let mut catalog = Self::builtin();
        catalog.extend(document)?;
        Ok(catalog)
    }

    /// Built-ins extended with a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let document: CatalogDocument =
            serde_json::from_str(json).map_err(|e| CatalogError::Parse {
                path: None,
                message: e.to_string(),
            })?;
        let mut catalog = Self::builtin();
        catalog.extend(document)?;
        Ok(catalog)
    }

    /// Built-ins extended with a catalog file, chosen by extension.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .filter(|e| CATALOG_EXTENSIONS.contains(&e.as_str()))
            .ok_or_else(|| CatalogError::UnsupportedFormat(path.to_path_buf()))?;

        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let loaded = if extension == "json" {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        };
        let catalog = loaded.map_err(|e| match e {
            CatalogError::Parse { message, .. } => CatalogError::Parse {
                message: format!("{}: {}", path.display(), message),
                path: Some(path.to_path_buf()),
            },
            other => other,
        })?;

        log::info!(
            "loaded catalog {} ({} models, {} colors)",
            path.display(),
            catalog.models.len(),
            catalog.colors.len()
        );
        Ok(catalog)
    }

    /// Applies a document on top of this catalog.
    pub fn extend(&mut self, document: CatalogDocument) -> Result<()> {
        if let Some(colors) = document.colors {
            let mut table = ColorCatalog::new();
            for (name, value) in &colors {
                table.insert(name, parse_hex(name, value)?);
            }
            self.colors = table;
        }

        for (name, entry) in document.models {
            let spec = build_model(&name, entry)?;
            log::debug!("catalog model '{}' with {} part(s)", name, spec.parts.len());
            self.models.insert(spec);
        }
        Ok(())
    }
}

fn build_model(name: &str, entry: ModelDocument) -> Result<ModelSpec> {
    let mut parts = PartCatalog::new(&entry.parts)?;
    for (alias, target) in &entry.aliases {
        parts.insert_alias(alias, target)?;
    }

    let fallback = match &entry.fallback {
        Some(value) => parse_hex(&format!("{}.fallback", name), value)?,
        None => DEFAULT_FALLBACK,
    };
    let mut spec = ModelSpec::new(name, parts, fallback);
    for (part, value) in &entry.defaults {
        let hex = parse_hex(&format!("{}.{}", name, part), value)?;
        spec.set_default(part, hex)?;
    }
    Ok(spec)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHAIR: &str = r##"
models:
  Chair:
    parts: [seat, legs]
    aliases:
      cushion: seat
    defaults:
      legs: "#7c4a2d"
"##;

    #[test]
    fn test_yaml_adds_model_and_keeps_builtins() {
        let catalog = Catalog::from_yaml(CHAIR).unwrap();
        assert_eq!(catalog.models.len(), 6);
        let chair = catalog.models.get("chair").unwrap();
        assert_eq!(chair.parts.resolve("cushion").unwrap(), "seat");
        assert_eq!(chair.default_color("legs"), Some(Hex::new(0x7C, 0x4A, 0x2D)));
        assert_eq!(chair.default_color("seat"), Some(DEFAULT_FALLBACK));
        assert_eq!(catalog.colors, ColorCatalog::builtin());
    }

    #[test]
    fn test_colors_replace_builtins() {
        let catalog = Catalog::from_yaml("colors:\n  Ocean Blue: '#0077be'\n").unwrap();
        assert_eq!(catalog.colors.len(), 1);
        assert_eq!(catalog.colors.get("ocean blue"), Some(Hex::new(0, 0x77, 0xBE)));
    }

    #[test]
    fn test_json_document() {
        let json = r##"{"models": {"Lamp": {"parts": ["shade", "stand"], "fallback": "#000"}}}"##;
        let catalog = Catalog::from_json(json).unwrap();
        let lamp = catalog.models.get("lamp").unwrap();
        assert_eq!(lamp.default_color("stand"), Some(Hex::new(0, 0, 0)));
    }

    #[test]
    fn test_invalid_documents() {
        assert!(matches!(
            Catalog::from_yaml("models:\n  X:\n    parts: [a]\n    aliases: {b: c}\n"),
            Err(CatalogError::UnknownAliasTarget { .. })
        ));
        assert!(matches!(
            Catalog::from_yaml("models:\n  X:\n    parts: [a]\n    defaults: {b: '#fff'}\n"),
            Err(CatalogError::UnknownDefaultPart { .. })
        ));
        assert!(matches!(
            Catalog::from_yaml("colors:\n  mud: brownish\n"),
            Err(CatalogError::InvalidColor { .. })
        ));
        assert!(matches!(
            Catalog::from_yaml("shapes: []\n"),
            Err(CatalogError::Parse { .. })
        ));
        assert!(matches!(
            Catalog::from_yaml("models:\n  X:\n    parts: [a, a]\n"),
            Err(CatalogError::DuplicatePart(_))
        ));
    }
}
