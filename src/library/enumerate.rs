//! Item enumeration for library and target trees.
//!
//! Rules per category come from [`Descriptor`]:
//!
//! - `Nested` (everything but agents): top-level files are items; a
//!   directory holding the bundle marker is one atomic item; any other
//!   directory is expanded one level into `dir/child` items.
//! - `Grouped` (agents): top-level files with the category extension are
//!   items; each top-level directory is a group whose matching files become
//!   `group/file` items.
//!
//! Dotfiles are skipped everywhere, names in [`IGNORED`] at the top level.
use std::path::{Path, PathBuf};

use crate::category::{Category, Descriptor, Layout};
use crate::error::{IoResultExt as _, Result};

/// Top-level names that are never items.
pub const IGNORED: &[&str] = &["README.md"];

/// Which directory entries take part in enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryFilter {
    /// Every entry; symlinks are followed.
    All,
    /// Only real files and directories; symlinks are skipped.
    RealOnly,
}

#[derive(Debug)]
struct Entry {
    name: String,
    path: PathBuf,
    is_dir: bool,
}

/// List the canonical item ids stored under `root` (a library category
/// directory), sorted.  A missing `root` yields no items.
///
/// # Errors
///
/// Returns an error if `root` exists but cannot be read.
pub fn list_items(root: &Path, category: Category) -> Result<Vec<String>> {
    walk(root, category.descriptor(), EntryFilter::All)
}

/// List the ids of real (non-symlink) entries under `root` (a target
/// category directory), sorted.  These are the candidates for import.
///
/// # Errors
///
/// Returns an error if `root` exists but cannot be read.
pub fn list_unlinked(root: &Path, category: Category) -> Result<Vec<String>> {
    walk(root, category.descriptor(), EntryFilter::RealOnly)
}

/// Whether `dir` is an atomic bundle for `category`.
#[must_use]
pub fn is_bundle(dir: &Path, category: Category) -> bool {
    category
        .descriptor()
        .bundle_marker()
        .is_some_and(|marker| dir.join(marker).is_file())
}

fn walk(root: &Path, descriptor: Descriptor, filter: EntryFilter) -> Result<Vec<String>> {
    let entries = match read_entries(root, filter) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e).at(root),
    };

    let mut items = Vec::new();
    for entry in entries {
        if IGNORED.contains(&entry.name.as_str()) {
            continue;
        }
        match descriptor.layout {
            Layout::Grouped { extension } => {
                if entry.is_dir {
                    items.extend(
                        children(&entry.path, filter)
                            .into_iter()
                            .filter(|c| !c.is_dir && has_extension(&c.name, extension))
                            .map(|c| format!("{}/{}", entry.name, c.name)),
                    );
                } else if has_extension(&entry.name, extension) {
                    items.push(entry.name);
                }
            }
            Layout::Nested { bundle_marker } => {
                if !entry.is_dir || entry.path.join(bundle_marker).is_file() {
                    items.push(entry.name);
                } else {
                    items.extend(
                        children(&entry.path, filter)
                            .into_iter()
                            .filter(|c| !c.is_dir)
                            .map(|c| format!("{}/{}", entry.name, c.name)),
                    );
                }
            }
        }
    }
    items.sort();
    Ok(items)
}

/// Children of a subdirectory; an unreadable directory yields none.
fn children(dir: &Path, filter: EntryFilter) -> Vec<Entry> {
    read_entries(dir, filter).unwrap_or_else(|e| {
        tracing::debug!("skipping unreadable directory {}: {e}", dir.display());
        Vec::new()
    })
}

fn read_entries(dir: &Path, filter: EntryFilter) -> std::io::Result<Vec<Entry>> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let Some(name) = entry.file_name().to_str().map(ToString::to_string) else {
            tracing::debug!("skipping non UTF-8 name in {}", dir.display());
            continue;
        };
        if name.starts_with('.') {
            continue;
        }
        let path = entry.path();
        let is_dir = match filter {
            EntryFilter::All => path.is_dir(),
            EntryFilter::RealOnly => {
                let file_type = entry.file_type()?;
                if file_type.is_symlink() {
                    continue;
                }
                file_type.is_dir()
            }
        };
        entries.push(Entry { name, path, is_dir });
    }
    Ok(entries)
}

fn has_extension(name: &str, extension: &str) -> bool {
    Path::new(name)
        .extension()
        .is_some_and(|ext| ext == extension)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, rel).unwrap();
    }

    #[test]
    fn missing_root_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let items = list_items(&dir.path().join("commands"), Category::Commands).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn nested_layout_expands_plain_dirs_and_keeps_bundles() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(root, "deploy.md");
        touch(root, "README.md");
        touch(root, ".hidden.md");
        touch(root, "tools/lint.md");
        touch(root, "tools/fmt.sh");
        touch(root, "tools/.DS_Store");
        touch(root, "tools/deeper/skipped.md");
        touch(root, "pdf/SKILL.md");
        touch(root, "pdf/scripts/extract.py");

        let items = list_items(root, Category::Commands).unwrap();
        insta::assert_snapshot!(items.join("\n"), @r"
        deploy.md
        pdf
        tools/fmt.sh
        tools/lint.md
        ");
    }

    #[test]
    fn grouped_layout_lists_markdown_only() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(root, "solo.md");
        touch(root, "notes.txt");
        touch(root, "frontend/reviewer.md");
        touch(root, "frontend/helper.py");
        touch(root, "backend/api.md");
        touch(root, "backend/SKILL.md");

        let items = list_items(root, Category::Agents).unwrap();
        assert_eq!(
            items,
            vec![
                "backend/SKILL.md",
                "backend/api.md",
                "frontend/reviewer.md",
                "solo.md"
            ]
        );
    }

    #[test]
    fn bundle_detection_depends_on_category() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "pdf/SKILL.md");
        assert!(is_bundle(&dir.path().join("pdf"), Category::Skills));
        assert!(!is_bundle(&dir.path().join("pdf"), Category::Agents));
        assert!(!is_bundle(dir.path(), Category::Skills));
    }

    #[cfg(unix)]
    #[test]
    fn unlinked_listing_skips_symlinks() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("target");
        touch(&root, "dropped.md");
        touch(&root, "tools/real.md");
        touch(dir.path(), "lib/linked.md");
        std::os::unix::fs::symlink(dir.path().join("lib/linked.md"), root.join("linked.md"))
            .unwrap();
        std::os::unix::fs::symlink(
            dir.path().join("lib/linked.md"),
            root.join("tools/also-linked.md"),
        )
        .unwrap();

        let items = list_unlinked(&root, Category::Commands).unwrap();
        assert_eq!(items, vec!["dropped.md", "tools/real.md"]);

        let all = list_items(&root, Category::Commands).unwrap();
        assert_eq!(all.len(), 4);
    }
}
