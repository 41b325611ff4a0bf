//! Subcommand orchestration.
//!
//! Each command resolves [`Paths`], builds a [`Manager`], runs one engine
//! operation and prints the resulting ids, one per line.  Patterns that
//! matched nothing are reported as warnings and do not fail the command.
pub mod copy;
pub mod import;
pub mod list;
pub mod resolve;
pub mod sync;
pub mod toggle;
pub mod uninstall;
pub mod version;

use anyhow::{Context as _, Result};

use crate::cli::GlobalOpts;
use crate::config::Paths;
use crate::manager::Manager;

/// Resolve paths from the global flags and build a [`Manager`].
///
/// # Errors
///
/// Returns an error if `settings.toml` cannot be parsed.
pub fn manager(global: &GlobalOpts) -> Result<Manager> {
    let paths = Paths::resolve(&global.overrides()).context("resolving paths")?;
    tracing::debug!("library: {}", paths.library_dir.display());
    tracing::debug!("target: {}", paths.target_dir.display());
    tracing::debug!("state: {}", paths.state_file.display());
    Ok(Manager::new(paths))
}

/// Print `ids` to stdout, one per line.
#[allow(clippy::print_stdout)]
pub(crate) fn print_ids<S: AsRef<str>>(ids: &[S]) {
    for id in ids {
        println!("{}", id.as_ref());
    }
}

/// Warn about each pattern that matched nothing.
pub(crate) fn warn_not_found(category: impl std::fmt::Display, patterns: &[String]) {
    for pattern in patterns {
        tracing::warn!("{category}: no item matches '{pattern}'");
    }
}
