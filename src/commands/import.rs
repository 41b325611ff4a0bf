//! Commands: import and import-all.
use anyhow::Result;

use crate::category::Category;
use crate::cli::{GlobalOpts, ImportAllOpts, PatternOpts};
use crate::logging::STAGE_TARGET;
use crate::manager::ImportOutcome;

/// Run the import command.
///
/// # Errors
///
/// Returns an error if a pattern is unsafe or an entry cannot be moved.
pub fn run(global: &GlobalOpts, opts: &PatternOpts) -> Result<()> {
    let manager = super::manager(global)?;
    tracing::info!(target: STAGE_TARGET, "Importing {}", opts.category);
    let outcome = manager.import(opts.category, &opts.patterns)?;
    report(opts.category, &outcome, true);
    Ok(())
}

/// Run the import-all command.
///
/// # Errors
///
/// Stops at the first category that fails.
pub fn run_all(global: &GlobalOpts, opts: &ImportAllOpts) -> Result<()> {
    let manager = super::manager(global)?;
    tracing::info!(target: STAGE_TARGET, "Importing every category");
    for (category, outcome) in manager.import_all(&opts.patterns)? {
        report(category, &outcome, !opts.patterns.is_empty());
    }
    Ok(())
}

fn report(category: Category, outcome: &ImportOutcome, warn_unmatched: bool) {
    for id in &outcome.skipped {
        tracing::info!("{category}/{id}: library copy kept, target copy discarded");
    }
    if warn_unmatched {
        super::warn_not_found(category, &outcome.not_found);
    }
    let ids: Vec<String> = outcome
        .imported
        .iter()
        .chain(&outcome.skipped)
        .map(|id| format!("{category}/{id}"))
        .collect();
    super::print_ids(&ids);
}
