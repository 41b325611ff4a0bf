//! Command: delete items from the library.
use anyhow::Result;

use crate::cli::{GlobalOpts, PatternOpts};
use crate::logging::STAGE_TARGET;

/// Run the uninstall command.
///
/// # Errors
///
/// Returns an error if a pattern is unsafe or a library item, the state
/// file, or the target tree cannot be updated.
pub fn run(global: &GlobalOpts, opts: &PatternOpts) -> Result<()> {
    let manager = super::manager(global)?;
    tracing::info!(target: STAGE_TARGET, "Uninstalling {}", opts.category);
    let outcome = manager.uninstall(opts.category, &opts.patterns)?;
    super::warn_not_found(opts.category, &outcome.not_found);
    super::print_ids(&outcome.removed);
    Ok(())
}
