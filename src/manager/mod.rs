//! The engine facade.
//!
//! Every mutating operation is one read-modify-write cycle: load the state
//! file, resolve the caller's patterns to canonical ids, mutate the state
//! in memory, save it once, then rebuild the target tree of every touched
//! category.  Nothing here locks across processes; concurrent invocations
//! race with last-writer-wins semantics.
mod copy;
mod import;
mod toggle;
mod uninstall;

use std::collections::{BTreeSet, HashSet};

use crate::category::Category;
use crate::config::{ExtensionConfig, Paths};
use crate::error::{ExtensionError, Result};
use crate::library::{self, wildcard};
use crate::resources::path_safety;
use crate::sync::{self, SyncReport};

pub use import::ImportOutcome;
pub use toggle::ToggleOutcome;
pub use uninstall::UninstallOutcome;

/// Entry point for every engine operation.
///
/// Holds only the resolved [`Paths`]; state is re-read on every call.
#[derive(Debug, Clone)]
pub struct Manager {
    paths: Paths,
}

/// One row of [`Manager::item_status`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemStatus {
    /// Canonical item id.
    pub id: String,
    /// Whether the state file enables the item.
    pub enabled: bool,
    /// Whether the item exists in library storage.
    pub installed: bool,
}

/// A pattern resolved to one canonical id.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Resolved {
    id: String,
    /// Directory the id was expanded from, if any.
    via_dir: Option<String>,
}

#[derive(Debug, Default)]
struct Resolution {
    items: Vec<Resolved>,
    not_found: Vec<String>,
}

impl Resolution {
    fn ids(&self) -> Vec<String> {
        self.items.iter().map(|r| r.id.clone()).collect()
    }

    fn expanded_dirs(&self) -> BTreeSet<String> {
        self.items.iter().filter_map(|r| r.via_dir.clone()).collect()
    }
}

impl Manager {
    /// Create a manager operating on `paths`.
    #[must_use]
    pub const fn new(paths: Paths) -> Self {
        Self { paths }
    }

    /// The paths this manager operates on.
    #[must_use]
    pub const fn paths(&self) -> &Paths {
        &self.paths
    }

    /// Canonical ids present in library storage for `category`, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the category directory exists but cannot be read.
    pub fn list_items(&self, category: Category) -> Result<Vec<String>> {
        library::list_items(&self.paths.library_category(category), category)
    }

    /// Resolve a partial or extension-less `name` to a canonical id.
    ///
    /// # Errors
    ///
    /// Returns [`ExtensionError::NotFound`] when nothing matches, or
    /// [`ExtensionError::UnsafeItemId`] for a name that could escape the
    /// library.
    pub fn resolve_item_name(&self, category: Category, name: &str) -> Result<String> {
        library::resolve(&self.paths.library_category(category), category, name)
    }

    /// Every item known to the library or the state file, with its state.
    ///
    /// # Errors
    ///
    /// Returns an error if the state file or the library cannot be read.
    pub fn item_status(&self, category: Category) -> Result<Vec<ItemStatus>> {
        let config = self.load_config()?;
        let installed: BTreeSet<String> = self.list_items(category)?.into_iter().collect();
        let mut ids = installed.clone();
        ids.extend(config.entries(category).into_iter().map(|(id, _)| id));

        Ok(ids
            .into_iter()
            .map(|id| ItemStatus {
                enabled: config.is_enabled(category, &id),
                installed: installed.contains(&id),
                id,
            })
            .collect())
    }

    /// Rebuild the target tree of `category` from the state file.
    ///
    /// # Errors
    ///
    /// Returns an error if the state file cannot be read, an enabled id is
    /// unsafe, or the filesystem rejects a change.
    pub fn sync(&self, category: Category) -> Result<SyncReport> {
        let config = self.load_config()?;
        sync::sync_category(&self.paths, category, &config)
    }

    /// Rebuild the target tree of every category.
    ///
    /// # Errors
    ///
    /// Stops at the first category that fails.
    pub fn sync_all(&self) -> Result<Vec<(Category, SyncReport)>> {
        let config = self.load_config()?;
        Category::ALL
            .into_iter()
            .map(|category| Ok((category, sync::sync_category(&self.paths, category, &config)?)))
            .collect()
    }

    fn load_config(&self) -> Result<ExtensionConfig> {
        ExtensionConfig::load(&self.paths.state_file)
    }

    /// Load the state file and reject it if `category` holds an unsafe
    /// enabled id.  Operations that touch library or target content call
    /// this before their first filesystem write.
    fn load_checked_config(&self, category: Category) -> Result<ExtensionConfig> {
        let config = self.load_config()?;
        path_safety::validate_all(config.enabled_items(category))?;
        Ok(config)
    }

    /// Validate `config` for `category` like a sync would, then save it.
    fn commit(&self, category: Category, config: &ExtensionConfig) -> Result<()> {
        path_safety::validate_all(config.enabled_items(category))?;
        config.save(&self.paths.state_file)
    }

    /// Resolve `patterns` against `candidates`, falling back to the name
    /// resolver and expanding non-bundle directories one level.
    ///
    /// A glob hit that names a plain library directory (a directory-level
    /// key from the state file) is expanded the same way.  Items matched by
    /// several patterns are reported once.
    fn resolve_patterns<S: AsRef<str>>(
        &self,
        category: Category,
        patterns: &[S],
        candidates: &[String],
    ) -> Result<Resolution> {
        let library_root = self.paths.library_category(category);
        let mut resolution = Resolution::default();
        let mut seen = HashSet::new();

        for pattern in patterns.iter().map(AsRef::as_ref) {
            let mut ids = wildcard::matches(pattern, candidates);
            if ids.is_empty() {
                match library::resolve(&library_root, category, pattern) {
                    Ok(id) => ids.push(id),
                    Err(ExtensionError::NotFound { .. }) => {}
                    Err(e) => return Err(e),
                }
            }

            let matched: Vec<Resolved> = ids
                .into_iter()
                .flat_map(|id| {
                    let path = library_root.join(&id);
                    if path.is_dir() && !library::is_bundle(&path, category) {
                        wildcard::matches(&format!("{id}/*"), candidates)
                            .into_iter()
                            .map(|child| Resolved {
                                id: child,
                                via_dir: Some(id.clone()),
                            })
                            .collect::<Vec<_>>()
                    } else {
                        vec![Resolved { id, via_dir: None }]
                    }
                })
                .collect();

            if matched.is_empty() {
                tracing::debug!("{category}: no match for '{pattern}'");
                resolution.not_found.push(pattern.to_string());
                continue;
            }
            for item in matched {
                if seen.insert(item.id.clone()) {
                    resolution.items.push(item);
                }
            }
        }
        Ok(resolution)
    }
}

#[cfg(all(test, unix))]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
pub(crate) mod test_helpers {
    use super::*;
    use std::path::PathBuf;

    /// A manager over a throwaway library/target/state layout.
    pub struct Fixture {
        _dir: tempfile::TempDir,
        pub manager: Manager,
    }

    impl Fixture {
        pub fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let root = dunce::canonicalize(dir.path()).unwrap();
            let manager = Manager::new(Paths::new(
                root.join("library"),
                root.join("target"),
                root.join("state").join("extensions.json"),
            ));
            Self { _dir: dir, manager }
        }

        pub fn library(&self, category: Category, rel: &str) -> PathBuf {
            self.manager.paths().library_category(category).join(rel)
        }

        pub fn target(&self, category: Category, rel: &str) -> PathBuf {
            self.manager.paths().target_category(category).join(rel)
        }

        pub fn add_library_file(&self, category: Category, rel: &str) {
            let path = self.library(category, rel);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, format!("library {rel}")).unwrap();
        }

        pub fn add_target_file(&self, category: Category, rel: &str, content: &str) {
            let path = self.target(category, rel);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, content).unwrap();
        }

        pub fn write_state(&self, json: &str) {
            let state = &self.manager.paths().state_file;
            std::fs::create_dir_all(state.parent().unwrap()).unwrap();
            std::fs::write(state, json).unwrap();
        }

        pub fn config(&self) -> ExtensionConfig {
            ExtensionConfig::load(&self.manager.paths().state_file).unwrap()
        }

        pub fn is_link(&self, category: Category, rel: &str) -> bool {
            std::fs::symlink_metadata(self.target(category, rel)).is_ok_and(|m| m.is_symlink())
        }
    }
}
