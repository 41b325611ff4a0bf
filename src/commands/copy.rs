//! Command: copy a library item into a project.
use anyhow::{Context as _, Result};

use crate::cli::{CopyOpts, GlobalOpts};

/// Run the copy command.
///
/// # Errors
///
/// Returns an error if the name does not resolve, the destination exists,
/// or copying fails.
pub fn run(global: &GlobalOpts, opts: &CopyOpts) -> Result<()> {
    let manager = super::manager(global)?;
    let destination = manager
        .copy_to_project(opts.category, &opts.name, &opts.project_dir)
        .with_context(|| format!("copying {}/{}", opts.category, opts.name))?;
    super::print_ids(&[destination.display().to_string()]);
    Ok(())
}
