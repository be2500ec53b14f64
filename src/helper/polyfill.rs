//! Lift a [`Basic`]-only implementation into a full [`Filesystem`].

use std::path::{Path, PathBuf};

use crate::{
    Basic, Chroot, Dir, File, FileInfo, FileMode, Filesystem, FsError, OpenFlags, TempFile,
};

/// Adapts a type implementing only [`Basic`] into a [`Filesystem`].
///
/// `temp_file`, `read_dir`, `mkdir_all` and `chroot` fail with
/// [`FsError::NotSupported`]; `root()` is `/`; neither optional capability
/// is offered.
///
/// # Example
///
/// ```rust
/// use logfs::{Basic, Dir, File, FileInfo, FileMode, FsError, OpenFlags, Polyfill};
/// use std::path::Path;
///
/// struct Empty;
///
/// impl Basic for Empty {
///     fn open_file(&self, p: &Path, _: OpenFlags, _: FileMode) -> Result<Box<dyn File>, FsError> {
///         Err(FsError::NotFound { path: p.to_path_buf() })
///     }
///     fn stat(&self, p: &Path) -> Result<FileInfo, FsError> {
///         Err(FsError::NotFound { path: p.to_path_buf() })
///     }
///     fn rename(&self, _: &Path, _: &Path) -> Result<(), FsError> { Ok(()) }
///     fn remove(&self, _: &Path) -> Result<(), FsError> { Ok(()) }
/// }
///
/// let fs = Polyfill::new(Empty);
/// assert!(fs.read_dir(Path::new("/")).unwrap_err().is_not_supported());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Polyfill<B> {
    inner: B,
}

impl<B: Basic> Polyfill<B> {
    /// Wrap a basic implementation.
    pub fn new(inner: B) -> Self {
        Self { inner }
    }

    /// The wrapped implementation.
    pub fn inner(&self) -> &B {
        &self.inner
    }
}

impl<B: Basic> Basic for Polyfill<B> {
    fn create(&self, path: &Path) -> Result<Box<dyn File>, FsError> {
        self.inner.create(path)
    }

    fn open(&self, path: &Path) -> Result<Box<dyn File>, FsError> {
        self.inner.open(path)
    }

    fn open_file(
        &self,
        path: &Path,
        flags: OpenFlags,
        mode: FileMode,
    ) -> Result<Box<dyn File>, FsError> {
        self.inner.open_file(path, flags, mode)
    }

    fn stat(&self, path: &Path) -> Result<FileInfo, FsError> {
        self.inner.stat(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<(), FsError> {
        self.inner.rename(from, to)
    }

    fn remove(&self, path: &Path) -> Result<(), FsError> {
        self.inner.remove(path)
    }

    fn join(&self, parts: &[&str]) -> PathBuf {
        self.inner.join(parts)
    }
}

impl<B: Basic> TempFile for Polyfill<B> {
    fn temp_file(&self, _dir: &Path, _prefix: &str) -> Result<Box<dyn File>, FsError> {
        Err(FsError::NotSupported {
            operation: "temp_file",
        })
    }
}

impl<B: Basic> Dir for Polyfill<B> {
    fn read_dir(&self, _path: &Path) -> Result<Vec<FileInfo>, FsError> {
        Err(FsError::NotSupported {
            operation: "read_dir",
        })
    }

    fn mkdir_all(&self, _path: &Path, _perm: FileMode) -> Result<(), FsError> {
        Err(FsError::NotSupported {
            operation: "mkdir_all",
        })
    }
}

impl<B: Basic> Chroot for Polyfill<B> {
    fn chroot(&self, _path: &Path) -> Result<Box<dyn Filesystem>, FsError> {
        Err(FsError::NotSupported {
            operation: "chroot",
        })
    }

    fn root(&self) -> PathBuf {
        PathBuf::from("/")
    }
}

impl<B: Basic> Filesystem for Polyfill<B> {}
