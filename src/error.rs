//! Domain-specific error types for the extension engine.
//!
//! Engine modules return [`ExtensionError`] so that callers can tell the
//! error classes apart (invalid input, unsafe identifiers, I/O failures).
//! Command handlers at the CLI boundary convert them to [`anyhow::Error`]
//! via the standard `?` operator.
//!
//! Patterns that match nothing are *not* errors: multi-pattern operations
//! accumulate them in a `not_found` list next to whatever succeeded.
//!
//! # Error classes
//!
//! ```text
//! ExtensionError
//! ├── UnknownCategory     : invalid input, rejected before any filesystem access
//! ├── NotFound            : single-name lookups (resolve, copy)
//! ├── UnsafeItemId        : traversal / absolute id, aborts before mutation
//! ├── EscapesRoot         : resolved destination outside its root
//! ├── DestinationExists   : copy target already present
//! ├── Io                  : read/write/rename/symlink failures
//! ├── ConfigParse         : malformed state file
//! ├── ConfigSerialize     : state that cannot be written as JSON
//! └── Settings            : malformed settings.toml
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::category::Category;

/// Result alias used throughout the engine.
pub type Result<T, E = ExtensionError> = std::result::Result<T, E>;

/// Errors produced by the extension engine.
#[derive(Error, Debug)]
pub enum ExtensionError {
    /// The category name is not one of the supported categories.
    #[error("unknown category '{0}': must be one of {list}", list = Category::names().join(", "))]
    UnknownCategory(String),

    /// A single-name lookup matched nothing in the library.
    #[error("{category} item '{name}' not found")]
    NotFound {
        /// Category that was searched.
        category: Category,
        /// Name as supplied by the caller.
        name: String,
    },

    /// An item identifier could escape its root directory.
    #[error("unsafe item id '{item}': {reason}")]
    UnsafeItemId {
        /// The offending identifier.
        item: String,
        /// Why the identifier was rejected.
        reason: &'static str,
    },

    /// A resolved destination path lies outside the directory it must live in.
    #[error("path {} escapes {}", path.display(), root.display())]
    EscapesRoot {
        /// The resolved destination.
        path: PathBuf,
        /// The directory the destination was required to stay inside.
        root: PathBuf,
    },

    /// The destination of a copy already exists.
    #[error("destination already exists: {}", .0.display())]
    DestinationExists(PathBuf),

    /// A filesystem operation failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path the operation was acting on.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The state file exists but is not valid JSON of the expected shape.
    #[error("invalid state file {}: {source}", path.display())]
    ConfigParse {
        /// Path of the state file.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// The in-memory state could not be serialised for saving.
    #[error("cannot serialise state for {}: {source}", path.display())]
    ConfigSerialize {
        /// Path the state was being saved to.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// The settings file exists but could not be parsed.
    #[error("invalid settings file {}: {source}", path.display())]
    Settings {
        /// Path of the settings file.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },
}

/// Attach a path to an [`std::io::Error`].
pub trait IoResultExt<T> {
    /// Convert the error into [`ExtensionError::Io`] for `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtensionError::Io`] if `self` is an error.
    fn at(self, path: &Path) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn at(self, path: &Path) -> Result<T> {
        self.map_err(|source| ExtensionError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
