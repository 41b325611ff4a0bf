//! Enable and disable.
use super::Manager;
use crate::category::Category;
use crate::error::Result;
use crate::resources::path_safety;
use crate::sync;

/// Result of [`Manager::enable`] or [`Manager::disable`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToggleOutcome {
    /// Canonical ids whose state was set.
    pub changed: Vec<String>,
    /// Patterns that matched nothing.
    pub not_found: Vec<String>,
}

impl Manager {
    /// Enable the items matched by `patterns` and relink `category`.
    ///
    /// Each pattern is tried as a glob against the library items, then as a
    /// name for the resolver.  A plain directory is expanded into its
    /// files; a bundle directory is enabled as one item.
    ///
    /// # Errors
    ///
    /// Returns an error before any change if a pattern or enabled id is
    /// unsafe, or if the state file or target tree cannot be updated.
    pub fn enable<S: AsRef<str>>(&self, category: Category, patterns: &[S]) -> Result<ToggleOutcome> {
        self.toggle(category, patterns, true)
    }

    /// Disable the items matched by `patterns` and relink `category`.
    ///
    /// Patterns are also matched against ids in the state file, so an entry
    /// whose library content has gone can still be turned off.
    ///
    /// # Errors
    ///
    /// Same as [`Manager::enable`].
    pub fn disable<S: AsRef<str>>(&self, category: Category, patterns: &[S]) -> Result<ToggleOutcome> {
        self.toggle(category, patterns, false)
    }

    fn toggle<S: AsRef<str>>(
        &self,
        category: Category,
        patterns: &[S],
        enabled: bool,
    ) -> Result<ToggleOutcome> {
        path_safety::validate_all(patterns.iter().map(AsRef::as_ref))?;

        let mut config = self.load_config()?;
        let mut candidates = self.list_items(category)?;
        if !enabled {
            candidates.extend(config.entries(category).into_iter().map(|(id, _)| id));
            candidates.sort();
            candidates.dedup();
        }

        let resolution = self.resolve_patterns(category, patterns, &candidates)?;
        for dir in resolution.expanded_dirs() {
            if config.contains(category, &dir) {
                config.set(category, &dir, false);
            }
        }
        for item in &resolution.items {
            config.set(category, &item.id, enabled);
        }

        let outcome = ToggleOutcome {
            changed: resolution.ids(),
            not_found: resolution.not_found,
        };
        if outcome.changed.is_empty() {
            return Ok(outcome);
        }

        self.commit(category, &config)?;
        sync::sync_category(&self.paths, category, &config)?;
        tracing::info!(
            "{category}: {} {} item(s)",
            if enabled { "enabled" } else { "disabled" },
            outcome.changed.len()
        );
        Ok(outcome)
    }
}
