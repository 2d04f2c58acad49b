//! Error types for catalog construction and loading.
//!
//! Parsing instruction text never fails; these errors only surface while
//! building or loading the catalogs a parser is configured with.

use std::path::PathBuf;

use thiserror::Error;

/// A hex color string that could not be normalized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid hex color '{0}' (expected #rgb or #rrggbb)")]
pub struct HexError(pub String);

/// Errors that can occur when building or loading catalogs.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A part key was empty after trimming.
    #[error("part keys must not be empty")]
    EmptyPart,

    /// The same part key was listed twice.
    #[error("duplicate part key '{0}'")]
    DuplicatePart(String),

    /// An alias points at a key the catalog does not contain.
    #[error("alias '{alias}' targets unknown part '{target}'")]
    UnknownAliasTarget { alias: String, target: String },

    /// A default color was given for a key the catalog does not contain.
    #[error("default color given for unknown part '{part}' in model '{model}'")]
    UnknownDefaultPart { model: String, part: String },

    /// A color value in the catalog is not a valid hex color.
    #[error("color '{name}': {source}")]
    InvalidColor {
        name: String,
        #[source]
        source: HexError,
    },

    /// The catalog file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog file extension is not one we know how to parse.
    #[error("unsupported catalog format for {0} (expected .yaml, .yml or .json)")]
    UnsupportedFormat(PathBuf),

    /// The catalog document is malformed.
    #[error("malformed catalog: {message}")]
    Parse {
        /// Optional source file path.
        path: Option<PathBuf>,
        /// Error message from the YAML or JSON parser.
        message: String,
    },
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
