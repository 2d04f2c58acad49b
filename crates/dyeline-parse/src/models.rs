//! Product models: part catalogs with their default colors.
//!
//! The built-in models form the closed [`Model`] enum. A [`ModelCatalog`]
//! collects [`ModelSpec`]s by name, starting from the built-ins and optionally
//! extended from a catalog file (see [`crate::file`]).

use std::fmt;
use std::str::FromStr;

use crate::catalog::{PartCatalog, PartKey};
use crate::color::Hex;
use crate::error::{CatalogError, Result};

const WHITE: Hex = Hex::new(0xFF, 0xFF, 0xFF);
const LIGHT_GRAY: Hex = Hex::new(0xD3, 0xD3, 0xD3);
const MID_GRAY: Hex = Hex::new(0xA8, 0xA8, 0xA8);

/// The product models shipped with the customizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Model {
    Shoe,
    Rocket,
    Axe,
    Insect,
    Teapot,
}

impl Model {
    /// All built-in models, in display order.
    pub const ALL: [Model; 5] = [
        Model::Shoe,
        Model::Rocket,
        Model::Axe,
        Model::Insect,
        Model::Teapot,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Model::Shoe => "Shoe",
            Model::Rocket => "Rocket",
            Model::Axe => "Axe",
            Model::Insect => "Insect",
            Model::Teapot => "Teapot",
        }
    }

    /// Canonical parts with their default colors, in catalog order.
    fn defaults(&self) -> &'static [(&'static str, Hex)] {
        match self {
            Model::Shoe => &[
                ("laces", WHITE),
                ("mesh", WHITE),
                ("caps", WHITE),
                ("inner", WHITE),
                ("sole", WHITE),
                ("stripes", WHITE),
                ("band", WHITE),
                ("patch", WHITE),
            ],
            Model::Rocket => &[
                ("hull", LIGHT_GRAY),
                ("base", LIGHT_GRAY),
                ("top", LIGHT_GRAY),
                ("wings", MID_GRAY),
                ("window", MID_GRAY),
            ],
            Model::Axe => &[
                ("design", LIGHT_GRAY),
                ("inner", LIGHT_GRAY),
                ("support", LIGHT_GRAY),
                ("body", MID_GRAY),
            ],
            Model::Insect => &[("shell", LIGHT_GRAY), ("body", MID_GRAY)],
            Model::Teapot => &[("lid", LIGHT_GRAY), ("base", LIGHT_GRAY)],
        }
    }

    fn aliases(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Model::Shoe => &[
                ("body", "mesh"),
                ("bottom", "sole"),
                ("outsole", "sole"),
                ("inside", "inner"),
                ("interior", "inner"),
                ("inner lining", "inner"),
                ("logo", "stripes"),
                ("logos", "stripes"),
                ("band", "band"),
                ("bands", "stripes"),
            ],
            Model::Rocket => &[
                ("tip", "top"),
                ("nose", "top"),
                ("fins", "wings"),
                ("fin", "wings"),
            ],
            Model::Axe => &[("handle", "body"), ("head", "design")],
            Model::Insect => &[("abdomen", "body"), ("carapace", "shell")],
            Model::Teapot => &[("pot", "base")],
        }
    }

    /// Builds the full spec for this model.
    pub fn spec(&self) -> ModelSpec {
        let mut parts = PartCatalog::from_trusted(self.defaults().iter().map(|(name, _)| *name));
        let defaults = parts
            .parts()
            .iter()
            .cloned()
            .zip(self.defaults().iter().map(|(_, hex)| *hex))
            .collect();
        for (alias, target) in self.aliases() {
            let added = parts.insert_alias(alias, target);
            debug_assert!(
                added.is_ok(),
                "{}: alias '{}' targets unknown part '{}'",
                self,
                alias,
                target
            );
        }
        ModelSpec {
            name: self.name().to_string(),
            parts,
            defaults,
        }
    }

    /// The part catalog for this model.
    pub fn catalog(&self) -> PartCatalog {
        self.spec().parts
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Model {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Model::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown model '{}'", s))
    }
}

/// One product model: its part catalog and default colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSpec {
    pub name: String,
    pub parts: PartCatalog,
    /// Default color per part, in catalog order. Every part has an entry.
    pub defaults: Vec<(PartKey, Hex)>,
}

impl ModelSpec {
    /// Creates a model whose parts all default to `fallback`.
    pub fn new(name: impl Into<String>, parts: PartCatalog, fallback: Hex) -> Self {
        let defaults = parts.parts().iter().map(|k| (k.clone(), fallback)).collect();
        Self {
            name: name.into(),
            parts,
            defaults,
        }
    }

    /// Overrides the default color for one part.
    pub fn set_default(&mut self, part: &str, hex: Hex) -> Result<()> {
        let entry = self
            .defaults
            .iter_mut()
            .find(|(k, _)| k.as_str() == part)
            .ok_or_else(|| CatalogError::UnknownDefaultPart {
                model: self.name.clone(),
                part: part.to_string(),
            })?;
        entry.1 = hex;
        Ok(())
    }

    pub fn default_color(&self, part: &str) -> Option<Hex> {
        self.defaults
            .iter()
            .find(|(k, _)| k.as_str() == part)
            .map(|(_, hex)| *hex)
    }
}

/// Model specs addressable by case-insensitive name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelCatalog {
    models: Vec<ModelSpec>,
}

impl ModelCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// All built-in [`Model`]s.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for model in Model::ALL {
            catalog.insert(model.spec());
        }
        catalog
    }

    /// Adds a model, replacing any existing model with the same name.
    pub fn insert(&mut self, spec: ModelSpec) {
        match self
            .models
            .iter_mut()
            .find(|m| m.name.eq_ignore_ascii_case(&spec.name))
        {
            Some(existing) => *existing = spec,
            None => self.models.push(spec),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ModelSpec> {
        let name = name.trim();
        self.models.iter().find(|m| m.name.eq_ignore_ascii_case(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModelSpec> {
        self.models.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.models.iter().map(|m| m.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_from_str_case_insensitive() {
        assert_eq!("shoe".parse::<Model>().unwrap(), Model::Shoe);
        assert_eq!(" TEAPOT ".parse::<Model>().unwrap(), Model::Teapot);
        assert!("chair".parse::<Model>().is_err());
    }

    #[test]
    fn test_shoe_spec() {
        let spec = Model::Shoe.spec();
        let parts: Vec<&str> = spec.parts.parts().iter().map(|k| k.as_str()).collect();
        assert_eq!(
            parts,
            vec!["laces", "mesh", "caps", "inner", "sole", "stripes", "band", "patch"]
        );
        assert_eq!(spec.parts.resolve("bottom").unwrap(), "sole");
        assert_eq!(spec.parts.resolve("inner lining").unwrap(), "inner");
        assert_eq!(spec.parts.resolve("bands").unwrap(), "stripes");
        assert_eq!(spec.defaults.len(), 8);
        assert_eq!(spec.default_color("laces"), Some(WHITE));
    }

    #[test]
    fn test_every_builtin_alias_resolves() {
        for model in Model::ALL {
            let spec = model.spec();
            for (alias, target) in model.aliases() {
                assert!(spec.parts.contains(target), "{}: part {}", model, target);
                assert_eq!(
                    spec.parts.resolve(alias).map(|k| k.as_str()),
                    Some(*target),
                    "{}: alias {}",
                    model,
                    alias
                );
            }
        }
    }

    #[test]
    fn test_rocket_defaults() {
        let spec = Model::Rocket.spec();
        assert_eq!(spec.default_color("hull"), Some(LIGHT_GRAY));
        assert_eq!(spec.default_color("wings"), Some(MID_GRAY));
        assert_eq!(spec.default_color("fins"), None);
    }

    #[test]
    fn test_set_default_unknown_part() {
        let mut spec = Model::Teapot.spec();
        assert!(spec.set_default("lid", WHITE).is_ok());
        assert_eq!(spec.default_color("lid"), Some(WHITE));
        assert!(matches!(
            spec.set_default("spout", WHITE),
            Err(CatalogError::UnknownDefaultPart { .. })
        ));
    }

    #[test]
    fn test_model_catalog_lookup_and_replace() {
        let mut catalog = ModelCatalog::builtin();
        assert_eq!(catalog.len(), 5);
        assert!(catalog.get("insect").is_some());

        let parts = PartCatalog::new(["lid"]).unwrap();
        catalog.insert(ModelSpec::new("teapot", parts, WHITE));
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.get("Teapot").unwrap().parts.len(), 1);
    }
}
