//! Command: print the canonical id for a name.
use anyhow::Result;

use crate::cli::{GlobalOpts, ResolveOpts};

/// Run the resolve command.
///
/// # Errors
///
/// Returns an error if nothing matches or the name is unsafe.
pub fn run(global: &GlobalOpts, opts: &ResolveOpts) -> Result<()> {
    let manager = super::manager(global)?;
    let id = manager.resolve_item_name(opts.category, &opts.name)?;
    super::print_ids(&[id]);
    Ok(())
}
