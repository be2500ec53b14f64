//! Basic file operations every filesystem provides.

use std::path::{Path, PathBuf};

use crate::{File, FileInfo, FileMode, FsError, OpenFlags};

/// Basic operations on a filesystem: opening files, stat, rename, remove.
///
/// `create`, `open` and `join` have default implementations in terms of
/// [`open_file`](Self::open_file) and [`path::join`](crate::path::join).
/// Wrappers must still override them so the wrapped filesystem's own
/// versions are the ones called.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync`. Methods use `&self` to allow
/// concurrent access. Backends use interior mutability for their state.
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn Basic`.
pub trait Basic: Send + Sync {
    /// Create (or truncate) a file and open it for reading and writing.
    ///
    /// Equivalent to `open_file(path, RDWR | CREATE | TRUNC, 0o666)`.
    fn create(&self, path: &Path) -> Result<Box<dyn File>, FsError> {
        self.open_file(
            path,
            OpenFlags::RDWR | OpenFlags::CREATE | OpenFlags::TRUNC,
            FileMode::from_perm(0o666),
        )
    }

    /// Open an existing file for reading.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the path does not exist
    /// - [`FsError::NotAFile`] if the path is a directory
    fn open(&self, path: &Path) -> Result<Box<dyn File>, FsError> {
        self.open_file(path, OpenFlags::RDONLY, FileMode::from_perm(0))
    }

    /// Open a file with explicit flags; `mode` is used only when the file is
    /// created.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the path does not exist and `CREATE` is not set
    /// - [`FsError::AlreadyExists`] if `CREATE | EXCL` is set and the path exists
    /// - [`FsError::NotAFile`] if the path is a directory
    fn open_file(
        &self,
        path: &Path,
        flags: OpenFlags,
        mode: FileMode,
    ) -> Result<Box<dyn File>, FsError>;

    /// Metadata for a path, following symlinks.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the path does not exist
    fn stat(&self, path: &Path) -> Result<FileInfo, FsError>;

    /// Rename or move a file or directory.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if `from` does not exist
    fn rename(&self, from: &Path, to: &Path) -> Result<(), FsError>;

    /// Remove a file or an empty directory.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if the path does not exist
    /// - [`FsError::DirectoryNotEmpty`] if the path is a non-empty directory
    fn remove(&self, path: &Path) -> Result<(), FsError>;

    /// Join path segments into one path using this filesystem's rules.
    fn join(&self, parts: &[&str]) -> PathBuf {
        crate::path::join(parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_is_object_safe() {
        fn _check(_: &dyn Basic) {}
    }

    #[test]
    fn basic_requires_send_sync() {
        fn _assert_send_sync<T: Send + Sync>() {}
        fn _check<T: Basic>() {
            _assert_send_sync::<T>();
        }
    }
}
