//! Absorption of real files found in the target tree.
use super::Manager;
use crate::category::Category;
use crate::error::Result;
use crate::library::{self, resolve::EXTENSIONS, wildcard};
use crate::resources::{fs, path_safety};

/// Result of [`Manager::import`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportOutcome {
    /// Ids moved from the target tree into the library.
    pub imported: Vec<String>,
    /// Ids already in the library; the target copy was discarded.
    pub skipped: Vec<String>,
    /// Patterns that matched no unlinked entry.
    pub not_found: Vec<String>,
}

impl ImportOutcome {
    /// Whether nothing matched at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.imported.is_empty() && self.skipped.is_empty()
    }
}

impl Manager {
    /// Move real (non-symlink) entries of the target tree that match
    /// `patterns` into the library, then enable them.
    ///
    /// When the library already holds an item with the same id the library
    /// copy wins: the target copy is deleted and the id is reported as
    /// skipped.  Either way the id ends up enabled and linked.
    ///
    /// # Errors
    ///
    /// Returns an error before any change if a pattern or an enabled id in
    /// the state file is unsafe, or if a move, delete, or the follow-up
    /// enable fails.
    pub fn import<S: AsRef<str>>(&self, category: Category, patterns: &[S]) -> Result<ImportOutcome> {
        path_safety::validate_all(patterns.iter().map(AsRef::as_ref))?;
        self.load_checked_config(category)?;

        let target_root = self.paths.target_category(category);
        let library_root = self.paths.library_category(category);
        let candidates = library::list_unlinked(&target_root, category)?;

        let mut outcome = ImportOutcome::default();
        let mut matched: Vec<String> = Vec::new();
        for pattern in patterns.iter().map(AsRef::as_ref) {
            let ids = match_unlinked(pattern, &candidates);
            if ids.is_empty() {
                outcome.not_found.push(pattern.to_string());
                continue;
            }
            for id in ids {
                if !matched.contains(&id) {
                    matched.push(id);
                }
            }
        }

        for id in matched {
            let source = path_safety::contained_join(&target_root, &id)?;
            let destination = path_safety::contained_join(&library_root, &id)?;
            if std::fs::symlink_metadata(&destination).is_ok() {
                tracing::info!("{category}/{id}: already in library, discarding target copy");
                fs::remove_path(&source)?;
                outcome.skipped.push(id);
            } else {
                tracing::info!("{category}/{id}: importing into library");
                fs::move_path(&source, &destination)?;
                outcome.imported.push(id);
            }
        }

        if !outcome.is_empty() {
            let ids: Vec<&str> = outcome
                .imported
                .iter()
                .chain(&outcome.skipped)
                .map(String::as_str)
                .collect();
            self.enable(category, &ids)?;
        }
        Ok(outcome)
    }

    /// [`Manager::import`] for every category.  An empty `patterns` means
    /// everything.
    ///
    /// # Errors
    ///
    /// Stops at the first category that fails.
    pub fn import_all<S: AsRef<str>>(&self, patterns: &[S]) -> Result<Vec<(Category, ImportOutcome)>> {
        let patterns: Vec<&str> = if patterns.is_empty() {
            vec!["*"]
        } else {
            patterns.iter().map(AsRef::as_ref).collect()
        };
        Category::ALL
            .into_iter()
            .map(|category| Ok((category, self.import(category, &patterns)?)))
            .collect()
    }
}

/// Match one import pattern: glob first, then the pattern with each known
/// extension appended, then everything under `pattern/`.
fn match_unlinked(pattern: &str, candidates: &[String]) -> Vec<String> {
    let ids = wildcard::matches(pattern, candidates);
    if !ids.is_empty() || wildcard::is_glob(pattern) {
        return ids;
    }
    if let Some(id) = EXTENSIONS
        .iter()
        .map(|ext| format!("{pattern}{ext}"))
        .find(|id| candidates.contains(id))
    {
        return vec![id];
    }
    let prefix = format!("{}/", pattern.trim_end_matches('/'));
    candidates
        .iter()
        .filter(|c| c.starts_with(&prefix))
        .cloned()
        .collect()
}
