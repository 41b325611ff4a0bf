//! Command-line interface definition.
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::category::Category;
use crate::config::Overrides;

/// Top-level CLI entry point.
#[derive(Parser, Debug)]
#[command(
    name = "extsync",
    about = "Enable, disable and sync agent extensions as symlinks",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path overrides shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Override the library directory
    #[arg(long, global = true, value_name = "DIR")]
    pub library: Option<PathBuf>,

    /// Override the target directory the consumer reads
    #[arg(long, global = true, value_name = "DIR")]
    pub target: Option<PathBuf>,

    /// Override the state file
    #[arg(long, global = true, value_name = "FILE")]
    pub state: Option<PathBuf>,
}

impl GlobalOpts {
    /// The flags as the highest-precedence settings layer.
    #[must_use]
    pub fn overrides(&self) -> Overrides {
        Overrides {
            library_dir: self.library.clone(),
            target_dir: self.target.clone(),
            state_file: self.state.clone(),
        }
    }
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List items with their enabled and installed state
    List(ListOpts),
    /// Enable items and relink the category
    Enable(PatternOpts),
    /// Disable items and relink the category
    Disable(PatternOpts),
    /// Delete items from the library
    Uninstall(PatternOpts),
    /// Move real files from the target tree into the library and enable them
    Import(PatternOpts),
    /// Import from every category
    ImportAll(ImportAllOpts),
    /// Rebuild the target tree from the state file
    Sync(SyncOpts),
    /// Copy a library item into a project directory
    Copy(CopyOpts),
    /// Print the canonical id a name resolves to
    Resolve(ResolveOpts),
    /// Print version information
    Version,
}

impl Command {
    /// Short name used for the log file.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::List(_) => "list",
            Self::Enable(_) => "enable",
            Self::Disable(_) => "disable",
            Self::Uninstall(_) => "uninstall",
            Self::Import(_) => "import",
            Self::ImportAll(_) => "import-all",
            Self::Sync(_) => "sync",
            Self::Copy(_) => "copy",
            Self::Resolve(_) => "resolve",
            Self::Version => "version",
        }
    }
}

/// Options for `list`.
#[derive(Parser, Debug, Clone)]
pub struct ListOpts {
    /// Category to list; every category when omitted
    pub category: Option<Category>,
}

/// A category plus one or more item patterns.
#[derive(Parser, Debug, Clone)]
pub struct PatternOpts {
    /// Item category
    pub category: Category,

    /// Item names, partial names, directories or glob patterns
    #[arg(required = true, num_args = 1..)]
    pub patterns: Vec<String>,
}

/// Options for `import-all`.
#[derive(Parser, Debug, Clone)]
pub struct ImportAllOpts {
    /// Patterns to import; everything when omitted
    pub patterns: Vec<String>,
}

/// Options for `sync`.
#[derive(Parser, Debug, Clone)]
pub struct SyncOpts {
    /// Category to sync; every category when omitted
    pub category: Option<Category>,
}

/// Options for `copy`.
#[derive(Parser, Debug, Clone)]
pub struct CopyOpts {
    /// Item category
    pub category: Category,
    /// Item name
    pub name: String,
    /// Project directory receiving `<category>/<item>`
    pub project_dir: PathBuf,
}

/// Options for `resolve`.
#[derive(Parser, Debug, Clone)]
pub struct ResolveOpts {
    /// Item category
    pub category: Category,
    /// Partial or extension-less item name
    pub name: String,
}
