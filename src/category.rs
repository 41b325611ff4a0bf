//! Extension categories and their layout descriptors.
//!
//! Every category-specific rule (grouping depth, bundle marker, file
//! extension filter) lives in the [`Descriptor`] table so that the
//! enumerator and synchronizer stay generic.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ExtensionError;

/// Marker file that turns a directory into an atomic bundle.
pub const BUNDLE_MARKER: &str = "SKILL.md";

/// The closed set of extension categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Agent definitions; support one level of `group/agent.md` grouping.
    Agents,
    /// Slash commands.
    Commands,
    /// Skills, usually bundle directories.
    Skills,
    /// Hook scripts.
    Hooks,
    /// Rule files.
    Rules,
    /// Output styles.
    OutputStyles,
}

/// How the items of a category are laid out on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Top-level files are flat items; each top-level directory is a group
    /// whose files with `extension` become `group/file` items.
    Grouped {
        /// Only files with this extension count as items.
        extension: &'static str,
    },
    /// Top-level files are flat items; a top-level directory is either a
    /// bundle (contains `bundle_marker`) or is expanded one level.
    Nested {
        /// File whose presence makes a directory atomic.
        bundle_marker: &'static str,
    },
}

/// Static per-category rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Descriptor {
    /// On-disk layout.
    pub layout: Layout,
    /// How many directory levels below the category root the synchronizer
    /// descends when clearing old links; `None` means unbounded.
    pub clean_depth: Option<usize>,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Self; 6] = [
        Self::Agents,
        Self::Commands,
        Self::Skills,
        Self::Hooks,
        Self::Rules,
        Self::OutputStyles,
    ];

    /// Directory and config key name for this category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Agents => "agents",
            Self::Commands => "commands",
            Self::Skills => "skills",
            Self::Hooks => "hooks",
            Self::Rules => "rules",
            Self::OutputStyles => "output-styles",
        }
    }

    /// Names of all categories.
    #[must_use]
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|c| c.as_str()).collect()
    }

    /// Layout rules for this category.
    #[must_use]
    pub const fn descriptor(self) -> Descriptor {
        match self {
            Self::Agents => Descriptor {
                layout: Layout::Grouped { extension: "md" },
                clean_depth: Some(1),
            },
            Self::Commands | Self::Skills | Self::Hooks | Self::Rules | Self::OutputStyles => {
                Descriptor {
                    layout: Layout::Nested {
                        bundle_marker: BUNDLE_MARKER,
                    },
                    clean_depth: None,
                }
            }
        }
    }
}

impl Descriptor {
    /// The bundle marker file name, if this layout has bundles.
    #[must_use]
    pub const fn bundle_marker(&self) -> Option<&'static str> {
        match self.layout {
            Layout::Nested { bundle_marker } => Some(bundle_marker),
            Layout::Grouped { .. } => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ExtensionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ExtensionError::UnknownCategory(s.to_string()))
    }
}
