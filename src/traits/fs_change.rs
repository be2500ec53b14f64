//! Permission, ownership and timestamp changes (optional capability).

use std::path::Path;
use std::time::SystemTime;

use crate::{FileMode, FsError};

/// Metadata-changing operations.
///
/// An optional capability: a [`Filesystem`](super::Filesystem) advertises it
/// by returning `Some` from [`as_change`](super::Filesystem::as_change).
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn Change`.
pub trait Change: Send + Sync {
    /// Set the permission bits of a path; type bits in `mode` are ignored.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the path does not exist
    fn chmod(&self, path: &Path, mode: FileMode) -> Result<(), FsError>;

    /// Change owner and group of a path without following a final symlink.
    fn lchown(&self, path: &Path, uid: u32, gid: u32) -> Result<(), FsError>;

    /// Change owner and group of a path, following symlinks.
    fn chown(&self, path: &Path, uid: u32, gid: u32) -> Result<(), FsError>;

    /// Set access and modification times of a path.
    fn chtimes(&self, path: &Path, atime: SystemTime, mtime: SystemTime) -> Result<(), FsError>;
}
