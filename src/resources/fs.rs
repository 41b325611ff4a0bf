//! File-system helpers shared by the synchronizer and the manager.
use std::path::Path;

use crate::error::{IoResultExt as _, Result};

/// Ensure the parent directory of `path` exists, creating it (and any
/// ancestors) if necessary.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).at(parent)?;
    }
    Ok(())
}

/// Remove whatever is at `path`: a symlink (not its target), a file, or a
/// whole directory tree.  Does nothing if `path` does not exist.
///
/// # Errors
///
/// Returns an error if the path exists but cannot be removed.
pub fn remove_path(path: &Path) -> Result<()> {
    let meta = match std::fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e).at(path),
    };
    if meta.is_symlink() {
        super::symlink::remove_symlink(path)
    } else if meta.is_dir() {
        std::fs::remove_dir_all(path).at(path)
    } else {
        std::fs::remove_file(path).at(path)
    }
}

/// Remove `dir` if it exists and is empty; returns whether it was removed.
///
/// # Errors
///
/// Returns an error if `dir` cannot be read or removed.
pub fn remove_dir_if_empty(dir: &Path) -> Result<bool> {
    let mut entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e).at(dir),
    };
    if entries.next().is_some() {
        return Ok(false);
    }
    std::fs::remove_dir(dir).at(dir)?;
    Ok(true)
}

/// Move `src` to `dst`, creating the parent of `dst`.
///
/// Prefers an atomic rename; falls back to copy + delete only when the
/// rename crosses a filesystem boundary.
///
/// # Errors
///
/// Returns the rename error for anything but a cross-device move, or an
/// error if the copy fallback fails.
pub fn move_path(src: &Path, dst: &Path) -> Result<()> {
    ensure_parent_dir(dst)?;
    match std::fs::rename(src, dst) {
        Ok(()) => return Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::CrossesDevices => {
            tracing::debug!("{} is on another device, copying", src.display());
        }
        Err(e) => return Err(e).at(src),
    }
    if let Err(e) = copy_path(src, dst) {
        if let Err(cleanup) = remove_path(dst) {
            tracing::warn!("failed to clean up partial copy at {}: {cleanup}", dst.display());
        }
        return Err(e);
    }
    remove_path(src)
}

/// Copy a file, or a directory recursively, from `src` to `dst`.
///
/// # Errors
///
/// Returns an error if any entry cannot be read or written.
pub fn copy_path(src: &Path, dst: &Path) -> Result<()> {
    if src.is_dir() {
        copy_dir_recursive(src, dst)
    } else {
        ensure_parent_dir(dst)?;
        std::fs::copy(src, dst).at(dst)?;
        Ok(())
    }
}

/// Recursively copy a directory tree.
///
/// Symlinks within the source tree are *followed*: the function uses
/// [`Path::is_dir`] (which follows symlinks) so directory symlinks are
/// recursed into and their contents materialised rather than copying the
/// link itself.
///
/// # Errors
///
/// Returns an error if the destination directory cannot be created, a source
/// entry cannot be read, or a file cannot be copied.
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<()> {
    std::fs::create_dir_all(dst).at(dst)?;
    for entry in std::fs::read_dir(src).at(src)? {
        let entry = entry.at(src)?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());
        if src_path.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path).at(&dst_path)?;
        }
    }
    Ok(())
}
