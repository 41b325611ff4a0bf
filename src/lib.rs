//! Extension reconciliation engine.
//!
//! Declares which agents, commands, skills, hooks, rules and output-styles
//! are enabled for a downstream tool, and keeps a target tree of symlinks
//! in line with that declaration.  Library content is the source of truth;
//! the target tree is disposable and rebuilt from the state file on every
//! sync.
//!
//! The public API is organised into layers:
//!
//! - **[`category`]**: the closed set of categories and their layout rules
//! - **[`config`]**: path settings and the JSON state file
//! - **[`library`]**: enumeration, glob matching and name resolution
//! - **[`resources`]**: symlink and filesystem primitives, path safety
//! - **[`sync`]**: rebuild of one category's target tree
//! - **[`manager`]**: enable, disable, uninstall, import and copy
//! - **[`commands`]**: top-level subcommand orchestration
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod category;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod library;
pub mod logging;
pub mod manager;
pub mod resources;
pub mod sync;

pub use category::Category;
pub use error::{ExtensionError, Result};
pub use manager::Manager;
