//! Symlink operations (optional capability).

use std::path::{Path, PathBuf};

use crate::{FileInfo, FsError};

/// Symbolic link operations.
///
/// An optional capability: a [`Filesystem`](super::Filesystem) advertises it
/// by returning `Some` from [`as_symlink`](super::Filesystem::as_symlink).
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync`. Methods use `&self` to allow
/// concurrent access.
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn Symlink`.
pub trait Symlink: Send + Sync {
    /// Metadata for a path without following a final symlink.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if `path` does not exist
    fn lstat(&self, path: &Path) -> Result<FileInfo, FsError>;

    /// Create a symbolic link at `link` pointing to `target`.
    ///
    /// `target` is stored verbatim and does not need to exist.
    ///
    /// # Errors
    ///
    /// - [`FsError::AlreadyExists`] if `link` already exists
    fn symlink(&self, target: &Path, link: &Path) -> Result<(), FsError>;

    /// Read the target of a symbolic link.
    ///
    /// Returns the raw target path (not canonicalized).
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if `path` does not exist
    /// - [`FsError::InvalidData`] if `path` is not a symlink
    fn readlink(&self, path: &Path) -> Result<PathBuf, FsError>;
}
