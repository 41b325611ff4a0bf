//! Rebuild of the target tree from the declarative state.
//!
//! A sync never patches the tree incrementally: it validates every enabled
//! id, removes every symlink under the category's target directory (and any
//! directory that becomes empty), then links each enabled item again.  A
//! category directory left with nothing in it is removed too.  Real files
//! and directories are never removed.
use std::path::Path;

use crate::category::Category;
use crate::config::{ExtensionConfig, Paths};
use crate::error::{IoResultExt as _, Result};
use crate::resources::symlink::{SymlinkResource, remove_symlink};
use crate::resources::{Resource as _, ResourceChange, ResourceState, fs, path_safety};

/// Outcome of syncing one category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Items now linked into the target tree.
    pub linked: Vec<String>,
    /// Enabled items whose library source no longer exists.
    pub missing_source: Vec<String>,
    /// Enabled items whose target path is occupied by a real file.
    pub blocked: Vec<String>,
}

/// Make the target tree of `category` reflect exactly the enabled entries of
/// `config`.
///
/// # Errors
///
/// Returns [`ExtensionError::UnsafeItemId`](crate::error::ExtensionError::UnsafeItemId)
/// before touching the filesystem if any enabled id is unsafe, or an I/O
/// error if removing or creating links fails.
pub fn sync_category(paths: &Paths, category: Category, config: &ExtensionConfig) -> Result<SyncReport> {
    let enabled = config.enabled_items(category);
    path_safety::validate_all(&enabled)?;

    let library = paths.library_category(category);
    let target = paths.target_category(category);

    let removed = clean_links(&target, category.descriptor().clean_depth)?;
    tracing::debug!("{category}: removed {removed} stale link(s)");

    let mut report = SyncReport::default();
    for id in enabled {
        let link = SymlinkResource::new(library.join(&id), target.join(&id));
        match link.current_state()? {
            ResourceState::Invalid { reason } => {
                tracing::warn!("{category}/{id}: {reason}, not linked");
                report.missing_source.push(id);
                continue;
            }
            ResourceState::Blocked { reason } => {
                tracing::warn!("{category}/{id}: {reason}, left untouched (import it to manage it)");
                report.blocked.push(id);
                continue;
            }
            ResourceState::Missing | ResourceState::Incorrect { .. } | ResourceState::Correct => {}
        }
        match link.apply()? {
            ResourceChange::Applied | ResourceChange::AlreadyCorrect => {
                tracing::debug!("linked {}", link.description());
                report.linked.push(id);
            }
            ResourceChange::Skipped { reason } => {
                tracing::warn!("{category}/{id}: {reason}");
                report.blocked.push(id);
            }
        }
    }

    if report.linked.is_empty() && fs::remove_dir_if_empty(&target)? {
        tracing::debug!("removed empty directory {}", target.display());
    }

    tracing::info!(
        "{category}: {} linked, {} missing, {} blocked",
        report.linked.len(),
        report.missing_source.len(),
        report.blocked.len()
    );
    Ok(report)
}

/// Remove every symlink under `root`, then every directory left empty,
/// children first.  `root` itself is kept.  Descends at most `depth`
/// directory levels (`None` = unbounded).  Returns the number of links
/// removed.
fn clean_links(root: &Path, depth: Option<usize>) -> Result<usize> {
    let entries = match std::fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e).at(root),
    };

    let mut removed = 0;
    for entry in entries {
        let entry = entry.at(root)?;
        let path = entry.path();
        let file_type = entry.file_type().at(&path)?;
        if file_type.is_symlink() {
            remove_symlink(&path)?;
            removed += 1;
        } else if file_type.is_dir() && depth.is_none_or(|d| d > 0) {
            removed += clean_links(&path, depth.map(|d| d - 1))?;
            if fs::remove_dir_if_empty(&path)? {
                tracing::debug!("removed empty directory {}", path.display());
            }
        }
    }
    Ok(removed)
}
