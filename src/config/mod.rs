//! Persistent configuration: the declarative state file and path settings.
pub mod settings;
pub mod state;

pub use settings::{Overrides, Paths};
pub use state::ExtensionConfig;
