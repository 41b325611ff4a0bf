//! Filesystem primitives used by the synchronizer and the manager.
pub mod fs;
pub mod path_safety;
pub mod symlink;

use crate::error::Result;

/// State of a filesystem resource relative to its desired state.
///
/// # Examples
///
/// ```
/// use extsync::resources::ResourceState;
///
/// let missing = ResourceState::Missing;
/// let blocked = ResourceState::Blocked { reason: "real file in the way".into() };
///
/// assert_ne!(missing, ResourceState::Correct);
/// assert!(matches!(blocked, ResourceState::Blocked { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceState {
    /// Resource does not exist.
    Missing,
    /// Resource exists and matches the desired state.
    Correct,
    /// Resource exists as a symlink pointing somewhere else.
    Incorrect {
        /// Where the existing link points.
        current: String,
    },
    /// Something the engine does not own occupies the path (e.g. a real file).
    Blocked {
        /// What is in the way.
        reason: String,
    },
    /// The resource cannot be created (e.g. its source is missing).
    Invalid {
        /// Why the resource cannot be applied.
        reason: String,
    },
}

/// Result of applying a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceChange {
    /// Resource was created or updated.
    Applied,
    /// Resource was already correct.
    AlreadyCorrect,
    /// Resource was left alone.
    Skipped {
        /// Why nothing was done.
        reason: String,
    },
}

/// Check-then-apply interface for idempotent filesystem resources.
pub trait Resource {
    /// Human-readable description of this resource.
    fn description(&self) -> String;

    /// Inspect the current state of the resource.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be determined.
    fn current_state(&self) -> Result<ResourceState>;

    /// Bring the resource to its desired state.
    ///
    /// Implementations never replace anything reported as
    /// [`ResourceState::Blocked`] or [`ResourceState::Invalid`].
    ///
    /// # Errors
    ///
    /// Returns an error if the resource cannot be created.
    fn apply(&self) -> Result<ResourceChange>;
}
