//! Resolution of partial, extension-less names to canonical item ids.
use std::path::Path;

use crate::category::{Category, Layout};
use crate::error::{ExtensionError, Result};
use crate::resources::path_safety;

/// Suffixes tried, in order, when a name does not exist as given.
pub const EXTENSIONS: &[&str] = &[".md", ".py", ".sh", ".js"];

/// Resolve `name` against the library directory `root` of `category`.
///
/// For nested categories the exact path is tried first, then each of
/// [`EXTENSIONS`].  For grouped categories a `group/agent` name is checked
/// directly (appending the extension when missing); a bare name is checked
/// as a flat file, then as a group directory, then inside every group.
///
/// # Errors
///
/// Returns [`ExtensionError::UnsafeItemId`] for names that could escape
/// `root`, and [`ExtensionError::NotFound`] when nothing matches.
pub fn resolve(root: &Path, category: Category, name: &str) -> Result<String> {
    path_safety::validate_item_id(name)?;
    let found = match category.descriptor().layout {
        Layout::Grouped { extension } => resolve_grouped(root, name, extension),
        Layout::Nested { .. } => resolve_nested(root, name),
    };
    found.ok_or_else(|| ExtensionError::NotFound {
        category,
        name: name.to_string(),
    })
}

fn resolve_nested(root: &Path, name: &str) -> Option<String> {
    if exists(&root.join(name)) {
        return Some(name.to_string());
    }
    EXTENSIONS
        .iter()
        .map(|ext| format!("{name}{ext}"))
        .find(|candidate| exists(&root.join(candidate)))
}

fn resolve_grouped(root: &Path, name: &str, extension: &str) -> Option<String> {
    let suffix = format!(".{extension}");
    let with_ext = |n: &str| {
        if n.ends_with(&suffix) {
            n.to_string()
        } else {
            format!("{n}{suffix}")
        }
    };

    if let Some((group, agent)) = name.split_once('/') {
        let file = with_ext(agent);
        return root
            .join(group)
            .join(&file)
            .is_file()
            .then(|| format!("{group}/{file}"));
    }

    let file = with_ext(name);
    if root.join(&file).is_file() {
        return Some(file);
    }
    if root.join(name).is_dir() {
        return Some(name.to_string());
    }

    let mut groups: Vec<String> = std::fs::read_dir(root)
        .ok()?
        .filter_map(std::result::Result::ok)
        .filter(|e| e.path().is_dir())
        .filter_map(|e| e.file_name().to_str().map(ToString::to_string))
        .filter(|g| !g.starts_with('.'))
        .collect();
    groups.sort();
    groups
        .into_iter()
        .find(|g| root.join(g).join(&file).is_file())
        .map(|g| format!("{g}/{file}"))
}

/// Existence check that also counts dangling symlinks.
fn exists(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}
