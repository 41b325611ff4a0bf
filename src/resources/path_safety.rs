//! Rejection of item ids and destinations that could escape their root.
use std::path::{Component, Path, PathBuf};

use crate::error::{ExtensionError, Result};

/// Check that `item` is a relative id that does not contain `..`.
///
/// # Errors
///
/// Returns [`ExtensionError::UnsafeItemId`] for empty ids, ids containing
/// `..`, and absolute ids.
///
/// # Examples
///
/// ```
/// use extsync::resources::path_safety::validate_item_id;
///
/// assert!(validate_item_id("frontend/reviewer.md").is_ok());
/// assert!(validate_item_id("../outside.md").is_err());
/// assert!(validate_item_id("/etc/passwd").is_err());
/// ```
pub fn validate_item_id(item: &str) -> Result<()> {
    let reason = if item.is_empty() {
        Some("empty id")
    } else if item.contains("..") {
        Some("contains '..'")
    } else if item.starts_with(['/', '\\'])
        || Path::new(item).is_absolute()
        || Path::new(item).has_root()
        || matches!(Path::new(item).components().next(), Some(Component::Prefix(_)))
    {
        Some("absolute path")
    } else {
        None
    };
    reason.map_or(Ok(()), |reason| {
        Err(ExtensionError::UnsafeItemId {
            item: item.to_string(),
            reason,
        })
    })
}

/// Validate every id, stopping at the first violation.
///
/// # Errors
///
/// Returns the error for the first unsafe id.
pub fn validate_all<I, S>(items: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .try_for_each(|item| validate_item_id(item.as_ref()))
}

/// Join `item` onto `root` and confirm the result stays under `root`.
///
/// The id is validated first; the joined path is then normalised lexically
/// (the destination usually does not exist yet) and compared against the
/// canonical form of `root`.
///
/// # Errors
///
/// Returns [`ExtensionError::UnsafeItemId`] for an unsafe id, or
/// [`ExtensionError::EscapesRoot`] if the joined path leaves `root`.
pub fn contained_join(root: &Path, item: &str) -> Result<PathBuf> {
    validate_item_id(item)?;
    let root = dunce::canonicalize(root).unwrap_or_else(|_| normalize(root));
    let joined = normalize(&root.join(item));
    if joined.starts_with(&root) && joined != root {
        Ok(joined)
    } else {
        Err(ExtensionError::EscapesRoot {
            path: joined,
            root,
        })
    }
}

/// Lexically resolve `.` and `..` components.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
