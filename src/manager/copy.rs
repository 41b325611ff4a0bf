//! Copying library items into a project tree.
use std::path::{Path, PathBuf};

use super::Manager;
use crate::category::Category;
use crate::error::{ExtensionError, Result};
use crate::resources::{fs, path_safety};

impl Manager {
    /// Copy the library item `name` into `project_dir/<category>/<id>` as
    /// real content, returning the destination.
    ///
    /// # Errors
    ///
    /// Returns [`ExtensionError::NotFound`] if `name` does not resolve,
    /// [`ExtensionError::DestinationExists`] if the destination is already
    /// present, or an escape/I/O error.
    pub fn copy_to_project(&self, category: Category, name: &str, project_dir: &Path) -> Result<PathBuf> {
        let id = self.resolve_item_name(category, name)?;
        let source = path_safety::contained_join(&self.paths.library_category(category), &id)?;
        let destination = path_safety::contained_join(&project_dir.join(category.as_str()), &id)?;

        if std::fs::symlink_metadata(&destination).is_ok() {
            return Err(ExtensionError::DestinationExists(destination));
        }
        fs::copy_path(&source, &destination)?;
        tracing::info!("{category}/{id}: copied to {}", destination.display());
        Ok(destination)
    }
}
