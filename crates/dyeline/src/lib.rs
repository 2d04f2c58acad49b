//! Dyeline - apply free-text color instructions to product models.
//!
//! Builds on [`dyeline_parse`] with the pieces a customizer needs around the
//! parser:
//!
//! - [`ColorStore`]: per-model color tables, the active model and the
//!   selected part
//! - [`status_message`]: the one-line summary shown after applying text
//! - [`render`]: text, JSON and YAML output
//! - [`cli`]: the `dyeline` command
//!
//! # Example
//!
//! ```rust
//! use dyeline::{status_message, ColorStore};
//! use dyeline_parse::{Catalog, StyleParser};
//!
//! let catalog = Catalog::builtin();
//! let mut store = ColorStore::new(&catalog.models, "shoe").unwrap();
//!
//! let parser = StyleParser::new(&store.active_model().parts, &catalog.colors);
//! let result = parser.parse("laces black, tongue purple");
//! store.apply(&result);
//!
//! assert_eq!(store.table().get("laces").unwrap().to_string(), "#000000");
//! assert_eq!(store.selected_part().unwrap().as_str(), "laces");
//! assert_eq!(
//!     status_message(&result),
//!     "Applied: laces • Ignored parts: tongue"
//! );
//! ```

pub mod cli;
pub mod render;
mod status;
mod store;

// Re-export public API
pub use render::{OutputFormat, Palette, RenderError};
pub use status::{status_message, STATUS_SEPARATOR};
pub use store::{Applied, ColorStore, ColorTable, Result, StoreError};
