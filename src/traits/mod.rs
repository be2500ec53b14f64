//! # Filesystem Traits
//!
//! The capability traits every logfs filesystem is built from.
//!
//! ## Trait Layout
//!
//! ```text
//! Required:  Basic + TempFile + Dir + Chroot = Filesystem
//! Optional:  Symlink, Change   (exposed through Filesystem::as_symlink / as_change)
//! ```
//!
//! ## Quick Reference
//!
//! | Trait | Methods | Required |
//! |-------|---------|----------|
//! | [`Basic`] | `create`, `open`, `open_file`, `stat`, `rename`, `remove`, `join` | yes |
//! | [`TempFile`] | `temp_file` | yes |
//! | [`Dir`] | `read_dir`, `mkdir_all` | yes |
//! | [`Chroot`] | `chroot`, `root` | yes |
//! | [`Symlink`] | `lstat`, `symlink`, `readlink` | no |
//! | [`Change`] | `chmod`, `lchown`, `chown`, `chtimes` | no |
//!
//! ## Optional Capabilities
//!
//! Whether a filesystem supports symlinks or metadata changes is a runtime
//! question: code holding a `&dyn Filesystem` asks through
//! [`Filesystem::as_symlink`] and [`Filesystem::as_change`]. Both default to
//! `None`, so a backend opts in by overriding them to return `Some(self)`.
//!
//! ```rust
//! use logfs::{Filesystem, FsError};
//! use std::path::Path;
//!
//! fn link_or_skip(fs: &dyn Filesystem) -> Result<(), FsError> {
//!     match fs.as_symlink() {
//!         Some(links) => links.symlink(Path::new("target"), Path::new("link")),
//!         None => Ok(()),
//!     }
//! }
//! ```
//!
//! ## Thread Safety
//!
//! All traits require `Send + Sync`. Methods take `&self`; backends use
//! interior mutability for their state.
//!
//! ## Object Safety
//!
//! All traits are object-safe. `Box<F>` and `Arc<F>` implement every trait
//! whenever `F: Filesystem + ?Sized`, so a `Box<dyn Filesystem>` returned by
//! [`Chroot::chroot`] can be used anywhere a concrete filesystem can.

mod fs_basic;
mod fs_change;
mod fs_chroot;
mod fs_dir;
mod fs_file;
mod fs_link;
mod fs_temp;

pub use fs_basic::Basic;
pub use fs_change::Change;
pub use fs_chroot::Chroot;
pub use fs_dir::Dir;
pub use fs_file::File;
pub use fs_link::Symlink;
pub use fs_temp::TempFile;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::{Capability, FileInfo, FileMode, FsError, OpenFlags};

/// A complete filesystem.
///
/// Combines [`Basic`], [`TempFile`], [`Dir`] and [`Chroot`], and answers
/// which optional features are available.
///
/// Unlike the component traits this one is implemented explicitly (there is
/// no blanket impl) because the capability queries are per-backend answers.
///
/// # Example
///
/// ```rust
/// use logfs::{Filesystem, FileMode, FsError};
/// use std::path::Path;
///
/// fn prepare<F: Filesystem>(fs: &F) -> Result<(), FsError> {
///     fs.mkdir_all(Path::new("/data/2024"), FileMode::from_perm(0o755))?;
///     let _file = fs.create(Path::new("/data/2024/log.txt"))?;
///     if let Some(change) = fs.as_change() {
///         change.chmod(Path::new("/data/2024/log.txt"), FileMode::from_perm(0o600))?;
///     }
///     Ok(())
/// }
/// ```
pub trait Filesystem: Basic + TempFile + Dir + Chroot {
    /// Optional I/O features of files opened through this filesystem.
    fn capabilities(&self) -> Capability {
        Capability::DEFAULT
    }

    /// Symlink operations, if supported.
    fn as_symlink(&self) -> Option<&dyn Symlink> {
        None
    }

    /// Permission, ownership and time changes, if supported.
    fn as_change(&self) -> Option<&dyn Change> {
        None
    }
}

/// Forward every filesystem trait through a smart pointer.
macro_rules! forward_filesystem {
    ($ptr:ident) => {
        impl<F: Filesystem + ?Sized> Basic for $ptr<F> {
            fn create(&self, path: &Path) -> Result<Box<dyn File>, FsError> {
                (**self).create(path)
            }

            fn open(&self, path: &Path) -> Result<Box<dyn File>, FsError> {
                (**self).open(path)
            }

            fn open_file(
                &self,
                path: &Path,
                flags: OpenFlags,
                mode: FileMode,
            ) -> Result<Box<dyn File>, FsError> {
                (**self).open_file(path, flags, mode)
            }

            fn stat(&self, path: &Path) -> Result<FileInfo, FsError> {
                (**self).stat(path)
            }

            fn rename(&self, from: &Path, to: &Path) -> Result<(), FsError> {
                (**self).rename(from, to)
            }

            fn remove(&self, path: &Path) -> Result<(), FsError> {
                (**self).remove(path)
            }

            fn join(&self, parts: &[&str]) -> PathBuf {
                (**self).join(parts)
            }
        }

        impl<F: Filesystem + ?Sized> TempFile for $ptr<F> {
            fn temp_file(&self, dir: &Path, prefix: &str) -> Result<Box<dyn File>, FsError> {
                (**self).temp_file(dir, prefix)
            }
        }

        impl<F: Filesystem + ?Sized> Dir for $ptr<F> {
            fn read_dir(&self, path: &Path) -> Result<Vec<FileInfo>, FsError> {
                (**self).read_dir(path)
            }

            fn mkdir_all(&self, path: &Path, perm: FileMode) -> Result<(), FsError> {
                (**self).mkdir_all(path, perm)
            }
        }

        impl<F: Filesystem + ?Sized> Chroot for $ptr<F> {
            fn chroot(&self, path: &Path) -> Result<Box<dyn Filesystem>, FsError> {
                (**self).chroot(path)
            }

            fn root(&self) -> PathBuf {
                (**self).root()
            }
        }

        impl<F: Filesystem + ?Sized> Filesystem for $ptr<F> {
            fn capabilities(&self) -> Capability {
                (**self).capabilities()
            }

            fn as_symlink(&self) -> Option<&dyn Symlink> {
                (**self).as_symlink()
            }

            fn as_change(&self) -> Option<&dyn Change> {
                (**self).as_change()
            }
        }
    };
}

forward_filesystem!(Box);
forward_filesystem!(Arc);
