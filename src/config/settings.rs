//! Location of the library, target tree, and state file.
//!
//! Each path is resolved independently with the precedence
//! CLI flag > environment variable > `settings.toml` > built-in default.
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::category::Category;
use crate::error::{ExtensionError, IoResultExt as _, Result};

/// Environment variable overriding the library directory.
pub const LIBRARY_ENV: &str = "EXTSYNC_LIBRARY";
/// Environment variable overriding the target directory.
pub const TARGET_ENV: &str = "EXTSYNC_TARGET";
/// Environment variable overriding the state file.
pub const STATE_ENV: &str = "EXTSYNC_STATE";

/// Resolved filesystem roots used by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    /// Root of the library storage tree (one subdirectory per category).
    pub library_dir: PathBuf,
    /// Root of the consumer-facing target tree (one subdirectory per category).
    pub target_dir: PathBuf,
    /// JSON file holding the declarative on/off state.
    pub state_file: PathBuf,
}

/// Optional path overrides, as read from `settings.toml` or the CLI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Overrides {
    /// Library directory override.
    pub library_dir: Option<PathBuf>,
    /// Target directory override.
    pub target_dir: Option<PathBuf>,
    /// State file override.
    pub state_file: Option<PathBuf>,
}

impl Paths {
    /// Build paths from explicit roots.
    #[must_use]
    pub fn new(
        library_dir: impl Into<PathBuf>,
        target_dir: impl Into<PathBuf>,
        state_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            library_dir: library_dir.into(),
            target_dir: target_dir.into(),
            state_file: state_file.into(),
        }
    }

    /// Resolve paths from CLI overrides, the environment, the settings file,
    /// and defaults, in that order of precedence.
    ///
    /// # Errors
    ///
    /// Returns an error if `settings.toml` exists but cannot be parsed.
    pub fn resolve(cli: &Overrides) -> Result<Self> {
        let settings = load_settings(&config_home().join("extsync").join("settings.toml"))?;
        let env = Overrides {
            library_dir: std::env::var_os(LIBRARY_ENV).map(PathBuf::from),
            target_dir: std::env::var_os(TARGET_ENV).map(PathBuf::from),
            state_file: std::env::var_os(STATE_ENV).map(PathBuf::from),
        };
        Ok(Self::layered(&[cli, &env, &settings]))
    }

    /// Pick the first override for each field, falling back to defaults.
    fn layered(layers: &[&Overrides]) -> Self {
        let pick = |get: fn(&Overrides) -> Option<&PathBuf>| {
            layers.iter().find_map(|l| get(l)).map(|p| expand_tilde(p))
        };
        Self {
            library_dir: pick(|o| o.library_dir.as_ref())
                .unwrap_or_else(|| data_home().join("extsync").join("library")),
            target_dir: pick(|o| o.target_dir.as_ref()).unwrap_or_else(|| home().join(".claude")),
            state_file: pick(|o| o.state_file.as_ref())
                .unwrap_or_else(|| config_home().join("extsync").join("extensions.json")),
        }
    }

    /// Library directory for `category`.
    #[must_use]
    pub fn library_category(&self, category: Category) -> PathBuf {
        self.library_dir.join(category.as_str())
    }

    /// Target directory for `category`.
    #[must_use]
    pub fn target_category(&self, category: Category) -> PathBuf {
        self.target_dir.join(category.as_str())
    }
}

/// Read `settings.toml`; a missing file yields no overrides.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_settings(path: &Path) -> Result<Overrides> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Overrides::default()),
        Err(e) => return Err(e).at(path),
    };
    toml::from_str(&content).map_err(|source| ExtensionError::Settings {
        path: path.to_path_buf(),
        source,
    })
}

fn home() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map_or_else(|| PathBuf::from("."), PathBuf::from)
}

fn config_home() -> PathBuf {
    std::env::var_os("XDG_CONFIG_HOME").map_or_else(|| home().join(".config"), PathBuf::from)
}

fn data_home() -> PathBuf {
    std::env::var_os("XDG_DATA_HOME")
        .map_or_else(|| home().join(".local").join("share"), PathBuf::from)
}

/// Expand a leading `~` component to the home directory.
fn expand_tilde(path: &Path) -> PathBuf {
    path.strip_prefix("~")
        .map_or_else(|_| path.to_path_buf(), |rest| home().join(rest))
}
