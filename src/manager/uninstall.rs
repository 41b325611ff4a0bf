//! Removal of library content.
use super::Manager;
use crate::category::Category;
use crate::error::Result;
use crate::resources::{fs, path_safety};
use crate::sync;

/// Result of [`Manager::uninstall`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UninstallOutcome {
    /// Ids deleted from the library and the state file.
    pub removed: Vec<String>,
    /// Patterns that matched nothing.
    pub not_found: Vec<String>,
}

impl Manager {
    /// Delete the items matched by `patterns` from the library and the
    /// state file, then relink `category` once.
    ///
    /// Matching follows [`Manager::enable`]; a directory pattern removes
    /// every item under it, its own state entry, and the directory itself
    /// once empty.
    ///
    /// # Errors
    ///
    /// Returns an error before any change if a pattern or an enabled id in
    /// the state file is unsafe, or if a library item, the state file, or
    /// the target tree cannot be updated.
    pub fn uninstall<S: AsRef<str>>(&self, category: Category, patterns: &[S]) -> Result<UninstallOutcome> {
        path_safety::validate_all(patterns.iter().map(AsRef::as_ref))?;

        let library_root = self.paths.library_category(category);
        let mut config = self.load_checked_config(category)?;
        let candidates = self.list_items(category)?;
        let resolution = self.resolve_patterns(category, patterns, &candidates)?;

        for item in &resolution.items {
            let path = path_safety::contained_join(&library_root, &item.id)?;
            fs::remove_path(&path)?;
            config.remove(category, &item.id);
            tracing::info!("{category}/{}: removed from library", item.id);
        }
        for dir in resolution.expanded_dirs() {
            config.remove(category, &dir);
            let path = path_safety::contained_join(&library_root, &dir)?;
            if fs::remove_dir_if_empty(&path)? {
                tracing::debug!("removed empty directory {}", path.display());
            }
        }

        let outcome = UninstallOutcome {
            removed: resolution.ids(),
            not_found: resolution.not_found,
        };
        if !outcome.removed.is_empty() {
            self.commit(category, &config)?;
            sync::sync_category(&self.paths, category, &config)?;
        }
        Ok(outcome)
    }
}

#[cfg(all(test, unix))]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::super::test_helpers::Fixture;
    use super::*;
    use crate::error::ExtensionError;

    #[test]
    fn removes_item_entry_and_link() {
        let fx = Fixture::new();
        fx.add_library_file(Category::Commands, "deploy.md");
        fx.add_library_file(Category::Commands, "keep.md");
        fx.manager.enable(Category::Commands, &["deploy", "keep"]).unwrap();

        let outcome = fx.manager.uninstall(Category::Commands, &["deploy"]).unwrap();
        assert_eq!(outcome.removed, vec!["deploy.md"]);
        assert!(!fx.library(Category::Commands, "deploy.md").exists());
        assert!(!fx.config().contains(Category::Commands, "deploy.md"));
        assert!(!fx.is_link(Category::Commands, "deploy.md"));
        assert!(fx.is_link(Category::Commands, "keep.md"));
    }

    #[test]
    fn directory_pattern_removes_group_and_its_entry() {
        let fx = Fixture::new();
        fx.add_library_file(Category::Commands, "tools/a.md");
        fx.add_library_file(Category::Commands, "tools/b.md");
        fx.manager.enable(Category::Commands, &["tools"]).unwrap();

        let outcome = fx.manager.uninstall(Category::Commands, &["tools", "tools/a.md"]).unwrap();
        assert_eq!(outcome.removed, vec!["tools/a.md", "tools/b.md"]);
        assert!(!fx.library(Category::Commands, "tools").exists());
        assert!(fx.config().entries(Category::Commands).is_empty());
        assert!(!fx.target(Category::Commands, "tools").exists());
    }

    #[test]
    fn bundle_is_removed_recursively() {
        let fx = Fixture::new();
        fx.add_library_file(Category::Skills, "pdf/SKILL.md");
        fx.add_library_file(Category::Skills, "pdf/scripts/extract.py");
        fx.manager.enable(Category::Skills, &["pdf"]).unwrap();

        let outcome = fx.manager.uninstall(Category::Skills, &["pdf"]).unwrap();
        assert_eq!(outcome.removed, vec!["pdf"]);
        assert!(!fx.library(Category::Skills, "pdf").exists());
        assert!(!fx.is_link(Category::Skills, "pdf"));
    }

    #[test]
    fn unknown_pattern_changes_nothing() {
        let fx = Fixture::new();
        fx.add_library_file(Category::Rules, "style.md");

        let outcome = fx.manager.uninstall(Category::Rules, &["nope"]).unwrap();
        assert!(outcome.removed.is_empty());
        assert_eq!(outcome.not_found, vec!["nope"]);
        assert!(fx.library(Category::Rules, "style.md").exists());
        assert!(!fx.manager.paths().state_file.exists());
    }

    #[test]
    fn traversal_pattern_is_rejected_before_deleting() {
        let fx = Fixture::new();
        fx.add_library_file(Category::Rules, "style.md");

        let err = fx
            .manager
            .uninstall(Category::Rules, &["style", "../../../etc"])
            .unwrap_err();
        assert!(matches!(err, ExtensionError::UnsafeItemId { .. }));
        assert!(fx.library(Category::Rules, "style.md").exists());
    }
}
