//! # Extension Traits
//!
//! Convenience methods for filesystems.
//!
//! ## Overview
//!
//! [`FilesystemExt`] provides commonly-needed utility methods built only from
//! the core traits. They are default methods with a blanket implementation,
//! so every [`Filesystem`] (including `Box<dyn Filesystem>`) gets them.
//!
//! ## Available Methods
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`read_file`](FilesystemExt::read_file) | Read a whole file |
//! | [`write_file`](FilesystemExt::write_file) | Create or replace a file |
//! | [`exists`](FilesystemExt::exists) | Check if a path exists |
//! | [`is_file`](FilesystemExt::is_file) | Check if path is a regular file |
//! | [`is_dir`](FilesystemExt::is_dir) | Check if path is a directory |
//! | [`remove_all`](FilesystemExt::remove_all) | Remove a path and everything below it |
//!
//! Wrapping middleware sees the individual calls these helpers make: a
//! `write_file` through a [`LoggingFs`](crate::LoggingFs) logs one `Create`.
//!
//! ## JSON Support (Feature-Gated)
//!
//! With the `serde` feature enabled, additional methods are available:
//!
//! | Method | Description |
//! |--------|-------------|
//! | `read_json` | Read and deserialize JSON file |
//! | `write_json` | Serialize and write JSON file |
//!
//! Enable with:
//! ```toml
//! [dependencies]
//! logfs = { version = "0.1", features = ["serde"] }
//! ```

use std::io::{Read, Write};
use std::path::Path;

use crate::{Filesystem, FsError};

/// Extension methods for any filesystem.
///
/// # Example
///
/// ```rust
/// use logfs::{FilesystemExt, MemoryFs};
/// use std::path::Path;
///
/// let fs = MemoryFs::new();
/// fs.write_file(Path::new("/config/app.toml"), b"debug = true").unwrap();
///
/// assert!(fs.is_dir(Path::new("/config")).unwrap());
/// assert_eq!(fs.read_file(Path::new("/config/app.toml")).unwrap(), b"debug = true");
/// ```
pub trait FilesystemExt: Filesystem {
    /// Read the entire contents of a file.
    fn read_file(&self, path: &Path) -> Result<Vec<u8>, FsError> {
        let mut data = Vec::new();
        self.open(path)?
            .read_to_end(&mut data)
            .map_err(|e| FsError::from_io("read", path, e))?;
        Ok(data)
    }

    /// Read a file as UTF-8 text.
    ///
    /// # Errors
    ///
    /// - `FsError::InvalidData` if the file isn't valid UTF-8
    fn read_to_string(&self, path: &Path) -> Result<String, FsError> {
        String::from_utf8(self.read_file(path)?).map_err(|e| FsError::InvalidData {
            path: path.to_path_buf(),
            details: e.to_string(),
        })
    }

    /// Create (or truncate) a file and write `data` to it.
    fn write_file(&self, path: &Path, data: &[u8]) -> Result<(), FsError> {
        let mut file = self.create(path)?;
        file.write_all(data)
            .and_then(|()| file.flush())
            .map_err(|e| FsError::from_io("write", path, e))
    }

    /// Check if a path exists.
    ///
    /// Returns `Ok(false)` if the path doesn't exist (not an error).
    fn exists(&self, path: &Path) -> Result<bool, FsError> {
        match self.stat(path) {
            Ok(_) => Ok(true),
            Err(FsError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Check if the path points to a regular file.
    ///
    /// Returns `Ok(false)` if the path doesn't exist (not an error).
    fn is_file(&self, path: &Path) -> Result<bool, FsError> {
        match self.stat(path) {
            Ok(info) => Ok(info.is_file()),
            Err(FsError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Check if the path points to a directory.
    ///
    /// Returns `Ok(false)` if the path doesn't exist (not an error).
    ///
    /// # Example
    ///
    /// ```rust
    /// use logfs::{Dir, FileMode, Filesystem, FilesystemExt, FsError};
    /// use std::path::Path;
    ///
    /// fn ensure_dir<F: Filesystem>(fs: &F, path: &Path) -> Result<(), FsError> {
    ///     if !fs.is_dir(path)? {
    ///         fs.mkdir_all(path, FileMode::from_perm(0o755))?;
    ///     }
    ///     Ok(())
    /// }
    /// ```
    fn is_dir(&self, path: &Path) -> Result<bool, FsError> {
        match self.stat(path) {
            Ok(info) => Ok(info.is_dir()),
            Err(FsError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Remove `path` and, for a directory, everything below it.
    ///
    /// A missing path is not an error. Symlinks are removed, not followed,
    /// when the filesystem supports them.
    fn remove_all(&self, path: &Path) -> Result<(), FsError> {
        let info = match self.as_symlink() {
            Some(links) => links.lstat(path),
            None => self.stat(path),
        };
        let info = match info {
            Ok(info) => info,
            Err(FsError::NotFound { .. }) => return Ok(()),
            Err(e) => return Err(e),
        };
        if info.is_dir() {
            for child in self.read_dir(path)? {
                self.remove_all(&path.join(&child.name))?;
            }
        }
        self.remove(path)
    }
}

// Blanket implementation - any Filesystem gets FilesystemExt for free
impl<F: Filesystem + ?Sized> FilesystemExt for F {}

// =============================================================================
// JSON Support (Feature-Gated)
// =============================================================================

#[cfg(feature = "serde")]
mod json {
    use super::*;
    use serde::{Serialize, de::DeserializeOwned};

    /// JSON serialization extension methods.
    ///
    /// Available when the `serde` feature is enabled.
    pub trait FilesystemExtJson: FilesystemExt {
        /// Read a file and deserialize it as JSON.
        ///
        /// # Errors
        ///
        /// - `FsError::NotFound` if the file doesn't exist
        /// - `FsError::InvalidData` if the file isn't valid UTF-8
        /// - `FsError::Deserialization` if JSON parsing failed
        fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<T, FsError> {
            let data = self.read_to_string(path)?;
            serde_json::from_str(&data).map_err(|e| FsError::Deserialization(e.to_string()))
        }

        /// Serialize a value and write it as pretty-printed JSON.
        ///
        /// # Errors
        ///
        /// - `FsError::Serialization` if JSON serialization failed
        /// - Other `FsError` variants from the underlying `create` call
        fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<(), FsError> {
            let json = serde_json::to_string_pretty(value)
                .map_err(|e| FsError::Serialization(e.to_string()))?;
            self.write_file(path, json.as_bytes())
        }
    }

    // Blanket implementation
    impl<F: FilesystemExt + ?Sized> FilesystemExtJson for F {}
}

#[cfg(feature = "serde")]
pub use json::FilesystemExtJson;
