//! Command: rebuild the target tree.
use anyhow::Result;

use crate::category::Category;
use crate::cli::{GlobalOpts, SyncOpts};
use crate::logging::STAGE_TARGET;
use crate::sync::SyncReport;

/// Run the sync command for one category or all of them.
///
/// # Errors
///
/// Returns an error if an enabled id is unsafe or the filesystem rejects a
/// change.
pub fn run(global: &GlobalOpts, opts: &SyncOpts) -> Result<()> {
    let manager = super::manager(global)?;
    let reports = match opts.category {
        Some(category) => {
            tracing::info!(target: STAGE_TARGET, "Syncing {category}");
            vec![(category, manager.sync(category)?)]
        }
        None => {
            tracing::info!(target: STAGE_TARGET, "Syncing every category");
            manager.sync_all()?
        }
    };

    let lines: Vec<String> = reports
        .iter()
        .flat_map(|(category, report)| summary(*category, report))
        .collect();
    super::print_ids(&lines);
    Ok(())
}

/// Linked ids, prefixed by their category.
fn summary(category: Category, report: &SyncReport) -> Vec<String> {
    report
        .linked
        .iter()
        .map(|id| format!("{category}/{id}"))
        .collect()
}
