//! Commands: enable and disable.
use anyhow::Result;

use crate::cli::{GlobalOpts, PatternOpts};
use crate::logging::STAGE_TARGET;

/// Run the enable command.
///
/// # Errors
///
/// Returns an error if a pattern is unsafe or the engine cannot update the
/// state file or target tree.
pub fn enable(global: &GlobalOpts, opts: &PatternOpts) -> Result<()> {
    let manager = super::manager(global)?;
    tracing::info!(target: STAGE_TARGET, "Enabling {}", opts.category);
    let outcome = manager.enable(opts.category, &opts.patterns)?;
    super::warn_not_found(opts.category, &outcome.not_found);
    super::print_ids(&outcome.changed);
    Ok(())
}

/// Run the disable command.
///
/// # Errors
///
/// Same as [`enable`].
pub fn disable(global: &GlobalOpts, opts: &PatternOpts) -> Result<()> {
    let manager = super::manager(global)?;
    tracing::info!(target: STAGE_TARGET, "Disabling {}", opts.category);
    let outcome = manager.disable(opts.category, &opts.patterns)?;
    super::warn_not_found(opts.category, &outcome.not_found);
    super::print_ids(&outcome.changed);
    Ok(())
}
