//! Declarative on/off state for every extension item.
//!
//! The state file is a JSON object of the shape
//! `{ "<category>": { "<item-id>": <bool>, ... }, ... }`.  A missing key is
//! equivalent to `false`.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::category::Category;
use crate::error::{ExtensionError, IoResultExt as _, Result};

/// Desired state: category name → item id → enabled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtensionConfig {
    categories: BTreeMap<String, BTreeMap<String, bool>>,
}

impl ExtensionConfig {
    /// Load the state file, treating a missing or blank file as empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is not a
    /// valid state document.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e).at(path),
        };
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(&content).map_err(|source| ExtensionError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the state file with 2-space indentation and a trailing newline.
    ///
    /// The document is staged to a sibling temp file and renamed into place.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or the
    /// file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).at(parent)?;
        }
        let mut body = serde_json::to_string_pretty(self).map_err(|source| {
            ExtensionError::ConfigSerialize {
                path: path.to_path_buf(),
                source,
            }
        })?;
        body.push('\n');

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, body).at(&tmp)?;
        if let Err(e) = std::fs::rename(&tmp, path) {
            if let Err(cleanup) = std::fs::remove_file(&tmp) {
                tracing::warn!("failed to remove {}: {cleanup}", tmp.display());
            }
            return Err(e).at(path);
        }
        tracing::debug!("saved state to {}", path.display());
        Ok(())
    }

    /// Whether `item` is enabled in `category`.
    #[must_use]
    pub fn is_enabled(&self, category: Category, item: &str) -> bool {
        self.categories
            .get(category.as_str())
            .and_then(|items| items.get(item))
            .copied()
            .unwrap_or(false)
    }

    /// Whether `category` has an explicit entry for `item`.
    #[must_use]
    pub fn contains(&self, category: Category, item: &str) -> bool {
        self.categories
            .get(category.as_str())
            .is_some_and(|items| items.contains_key(item))
    }

    /// Set the desired state of `item`.
    pub fn set(&mut self, category: Category, item: &str, enabled: bool) {
        self.categories
            .entry(category.as_str().to_string())
            .or_default()
            .insert(item.to_string(), enabled);
    }

    /// Drop the entry for `item`; returns whether one existed.
    pub fn remove(&mut self, category: Category, item: &str) -> bool {
        let Some(items) = self.categories.get_mut(category.as_str()) else {
            return false;
        };
        let removed = items.remove(item).is_some();
        if items.is_empty() {
            self.categories.remove(category.as_str());
        }
        removed
    }

    /// Enabled item ids for `category`, sorted.
    #[must_use]
    pub fn enabled_items(&self, category: Category) -> Vec<String> {
        self.categories
            .get(category.as_str())
            .map(|items| {
                items
                    .iter()
                    .filter(|(_, enabled)| **enabled)
                    .map(|(id, _)| id.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Every explicit entry for `category`, enabled or not.
    #[must_use]
    pub fn entries(&self, category: Category) -> Vec<(String, bool)> {
        self.categories
            .get(category.as_str())
            .map(|items| items.iter().map(|(k, v)| (k.clone(), *v)).collect())
            .unwrap_or_default()
    }
}
