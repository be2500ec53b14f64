//! Directory operations.

use std::path::Path;

use crate::{FileInfo, FileMode, FsError};

/// Directory operations for a filesystem.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync`. Methods use `&self` to allow
/// concurrent access.
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn Dir`.
pub trait Dir: Send + Sync {
    /// List the entries of a directory.
    ///
    /// Symlinks inside the directory are reported as symlinks, not followed.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the path does not exist
    /// - [`FsError::NotADirectory`] if the path is not a directory
    fn read_dir(&self, path: &Path) -> Result<Vec<FileInfo>, FsError>;

    /// Create a directory and all missing parents with permissions `perm`.
    ///
    /// Succeeds if the directory already exists.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotADirectory`] if a component of the path exists but is not a directory
    fn mkdir_all(&self, path: &Path, perm: FileMode) -> Result<(), FsError>;
}
