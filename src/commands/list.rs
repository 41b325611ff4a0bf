//! Command: list items and their state.
use anyhow::Result;

use crate::category::Category;
use crate::cli::{GlobalOpts, ListOpts};
use crate::logging::STAGE_TARGET;
use crate::manager::ItemStatus;

/// Run the list command.
///
/// # Errors
///
/// Returns an error if the state file or library cannot be read.
pub fn run(global: &GlobalOpts, opts: &ListOpts) -> Result<()> {
    let manager = super::manager(global)?;
    let categories = opts
        .category
        .map_or_else(|| Category::ALL.to_vec(), |c| vec![c]);
    for category in categories {
        tracing::info!(target: STAGE_TARGET, "{category}");
        let rows = render(&manager.item_status(category)?);
        super::print_ids(&rows);
    }
    Ok(())
}

/// One line per item: a state marker and the id.
///
/// `+` enabled, `-` disabled, `!` enabled but missing from the library.
fn render(status: &[ItemStatus]) -> Vec<String> {
    status
        .iter()
        .map(|s| {
            let marker = match (s.enabled, s.installed) {
                (true, true) => '+',
                (true, false) => '!',
                (false, _) => '-',
            };
            format!("{marker} {}", s.id)
        })
        .collect()
}
