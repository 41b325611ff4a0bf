//! Console and file logging for the command-line front end.
//!
//! The engine only emits [`tracing`] events; this module installs the
//! subscriber that renders them.

mod subscriber;
mod utils;

pub use subscriber::init_subscriber;

/// Target for stage headers, rendered as `==> message`.
pub const STAGE_TARGET: &str = "extsync::stage";

/// Environment variable holding an optional console filter directive.
pub const LOG_ENV: &str = "EXTSYNC_LOG";

/// Serializes `XDG_CACHE_HOME` manipulation across parallel test threads.
#[cfg(test)]
pub(crate) static TEST_ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());
