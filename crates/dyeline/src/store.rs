//! Per-model color tables and the apply step.
//!
//! A [`ColorStore`] keeps one [`ColorTable`] per model of a catalog, seeded
//! from the model defaults, plus the active model and the selected part.
//! Parse results are written into the active table with
//! [`ColorStore::apply`]; all mutation goes through `&mut self`.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use thiserror::Error;

use dyeline_parse::{Hex, ModelCatalog, ModelSpec, ParseResult, PartKey};

/// Errors raised by [`ColorStore`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("unknown model '{name}' (available: {available})")]
    UnknownModel { name: String, available: String },

    #[error("the catalog defines no models")]
    NoModels,
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Current colors of one model's parts, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorTable {
    model: String,
    entries: Vec<(PartKey, Hex)>,
}

impl ColorTable {
    /// A table holding the model's default colors.
    pub fn from_spec(spec: &ModelSpec) -> Self {
        Self {
            model: spec.name.clone(),
            entries: spec.defaults.clone(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn get(&self, part: &str) -> Option<Hex> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_str() == part)
            .map(|(_, hex)| *hex)
    }

    /// Sets a part's color. Returns `false` (and changes nothing) for parts
    /// the table does not have.
    pub fn set(&mut self, part: &str, hex: Hex) -> bool {
        match self.entries.iter_mut().find(|(k, _)| k.as_str() == part) {
            Some(entry) => {
                entry.1 = hex;
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PartKey, Hex)> {
        self.entries.iter().map(|(k, hex)| (k, *hex))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ColorTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (part, hex) in &self.entries {
            map.serialize_entry(part, hex)?;
        }
        map.end()
    }
}

/// What one [`ColorStore::apply`] call changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Applied {
    /// Parts written, in assignment order.
    pub parts: Vec<PartKey>,
    /// Part selected afterwards, if the selection changed.
    pub selected: Option<PartKey>,
}

impl Applied {
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

/// Color tables for every model of a catalog.
#[derive(Debug, Clone)]
pub struct ColorStore {
    specs: Vec<ModelSpec>,
    tables: Vec<ColorTable>,
    active: usize,
    selected_part: Option<PartKey>,
}

impl ColorStore {
    /// Creates a store with every model at its defaults and `model` active.
    pub fn new(models: &ModelCatalog, model: &str) -> Result<Self> {
        if models.is_empty() {
            return Err(StoreError::NoModels);
        }
        let specs: Vec<ModelSpec> = models.iter().cloned().collect();
        let mut store = Self {
            tables: specs.iter().map(ColorTable::from_spec).collect(),
            specs,
            active: 0,
            selected_part: None,
        };
        store.select_model(model)?;
        Ok(store)
    }

    fn index_of(&self, name: &str) -> Result<usize> {
        let name = name.trim();
        self.tables
            .iter()
            .position(|t| t.model.eq_ignore_ascii_case(name))
            .ok_or_else(|| StoreError::UnknownModel {
                name: name.to_string(),
                available: self
                    .specs
                    .iter()
                    .map(|m| m.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    /// Switches the active model and clears the part selection.
    pub fn select_model(&mut self, name: &str) -> Result<&ModelSpec> {
        self.active = self.index_of(name)?;
        self.selected_part = None;
        log::debug!("active model: {}", self.tables[self.active].model);
        Ok(self.active_model())
    }

    pub fn active_model(&self) -> &ModelSpec {
        &self.specs[self.active]
    }

    pub fn models(&self) -> &[ModelSpec] {
        &self.specs
    }

    /// The active model's table.
    pub fn table(&self) -> &ColorTable {
        &self.tables[self.active]
    }

    pub fn table_for(&self, model: &str) -> Option<&ColorTable> {
        self.index_of(model).ok().map(|i| &self.tables[i])
    }

    pub fn selected_part(&self) -> Option<&PartKey> {
        self.selected_part.as_ref()
    }

    /// Writes a parse result into the active table.
    ///
    /// Assignments for parts the table lacks are skipped. When anything was
    /// written, the last matched part becomes the selected part.
    pub fn apply(&mut self, result: &ParseResult) -> Applied {
        let table = &mut self.tables[self.active];
        let parts: Vec<PartKey> = result
            .assignments
            .iter()
            .filter(|(part, hex)| table.set(part.as_str(), *hex))
            .map(|(part, _)| part.clone())
            .collect();

        if parts.is_empty() {
            return Applied::default();
        }

        let selected = result
            .last_matched_part()
            .filter(|part| table.get(part.as_str()).is_some())
            .cloned();
        if selected.is_some() {
            self.selected_part = selected.clone();
        }
        log::debug!(
            "applied {} color(s) to {}, selected {:?}",
            parts.len(),
            table.model,
            selected
        );
        Applied { parts, selected }
    }

    /// Sets one part of the active model. Unknown parts are ignored.
    pub fn set_color(&mut self, part: &str, hex: Hex) -> bool {
        self.tables[self.active].set(part, hex)
    }

    /// Restores a model's defaults.
    pub fn reset(&mut self, model: &str) -> Result<()> {
        let index = self.index_of(model)?;
        self.tables[index] = ColorTable::from_spec(&self.specs[index]);
        if index == self.active {
            self.selected_part = None;
        }
        log::debug!("reset {}", self.specs[index].name);
        Ok(())
    }
}
