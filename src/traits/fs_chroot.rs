//! Chroot support.

use std::path::{Path, PathBuf};

use crate::{Filesystem, FsError};

/// Restricting a filesystem to a sub-directory.
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn Chroot`.
pub trait Chroot: Send + Sync {
    /// A new filesystem whose root is `path` inside this one.
    ///
    /// The returned filesystem is independent of any middleware wrapping
    /// `self`: wrappers forward this call and hand back the inner view as is.
    ///
    /// # Errors
    ///
    /// - [`FsError::CrossedBoundary`] if `path` escapes this filesystem
    /// - [`FsError::NotSupported`] if the filesystem cannot be chrooted
    fn chroot(&self, path: &Path) -> Result<Box<dyn Filesystem>, FsError>;

    /// The root of this filesystem, in the terms of whatever it is built on.
    fn root(&self) -> PathBuf;
}
