//! Error types for logfs filesystems.

use std::path::PathBuf;

/// Filesystem error type with contextual variants.
///
/// Backends produce these errors; [`LoggingFs`](crate::LoggingFs) forwards them
/// untouched and only ever originates [`FsError::NotSupported`] itself.
/// Uses `#[non_exhaustive]` for forward compatibility.
///
/// # Examples
///
/// ```rust
/// use logfs::FsError;
/// use std::path::PathBuf;
///
/// let err = FsError::NotFound { path: PathBuf::from("missing.txt") };
/// assert_eq!(err.to_string(), "not found: missing.txt");
/// ```
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum FsError {
    // Path/File Errors
    /// Path does not exist.
    #[error("not found: {path}")]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// Path already exists when it shouldn't.
    #[error("{operation}: already exists: {path}")]
    AlreadyExists {
        /// The path that already exists.
        path: PathBuf,
        /// The operation that failed.
        operation: &'static str,
    },

    /// Expected a file but found something else.
    #[error("not a file: {path}")]
    NotAFile {
        /// The path that is not a file.
        path: PathBuf,
    },

    /// Expected a directory but found something else.
    #[error("not a directory: {path}")]
    NotADirectory {
        /// The path that is not a directory.
        path: PathBuf,
    },

    /// Directory is not empty when it should be.
    #[error("directory not empty: {path}")]
    DirectoryNotEmpty {
        /// The path to the non-empty directory.
        path: PathBuf,
    },

    /// Path resolves outside of a chroot.
    #[error("chroot boundary crossed: {path}")]
    CrossedBoundary {
        /// The offending path.
        path: PathBuf,
    },

    // Permission/Access Errors
    /// Permission denied for operation.
    #[error("{operation}: permission denied: {path}")]
    PermissionDenied {
        /// The path where permission was denied.
        path: PathBuf,
        /// The operation that was denied.
        operation: &'static str,
    },

    /// Handle was not opened with the access mode the operation needs.
    #[error("{operation}: bad file descriptor: {path}")]
    BadDescriptor {
        /// The file the handle refers to.
        path: PathBuf,
        /// The operation that was attempted.
        operation: &'static str,
    },

    // Data Errors
    /// Invalid data encountered.
    #[error("invalid data: {path} ({details})")]
    InvalidData {
        /// The path with invalid data.
        path: PathBuf,
        /// Details about the invalid data.
        details: String,
    },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Deserialization error.
    #[error("deserialization error: {0}")]
    Deserialization(String),

    // Backend/Operation Errors
    /// The filesystem does not provide the capability this operation needs.
    #[error("operation not supported: {operation}")]
    NotSupported {
        /// The unsupported operation.
        operation: &'static str,
    },

    /// I/O error with context.
    #[error("{operation} failed for {path}: {source}")]
    Io {
        /// The operation that failed.
        operation: &'static str,
        /// The path involved in the operation.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    /// Map an I/O error raised by `operation` on `path` to the closest variant.
    ///
    /// Unlike the bare [`From`] conversion this keeps the path in the error.
    pub fn from_io(operation: &'static str, path: impl Into<PathBuf>, error: std::io::Error) -> Self {
        let path = path.into();
        match error.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound { path },
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied { path, operation },
            std::io::ErrorKind::AlreadyExists => FsError::AlreadyExists { path, operation },
            std::io::ErrorKind::NotADirectory => FsError::NotADirectory { path },
            std::io::ErrorKind::IsADirectory => FsError::NotAFile { path },
            std::io::ErrorKind::DirectoryNotEmpty => FsError::DirectoryNotEmpty { path },
            std::io::ErrorKind::Unsupported => FsError::NotSupported { operation },
            _ => FsError::Io {
                operation,
                path,
                source: error,
            },
        }
    }

    /// Replace the path carried by the error, if it has one.
    pub(crate) fn map_path(self, f: impl FnOnce(PathBuf) -> PathBuf) -> Self {
        match self {
            FsError::NotFound { path } => FsError::NotFound { path: f(path) },
            FsError::AlreadyExists { path, operation } => FsError::AlreadyExists {
                path: f(path),
                operation,
            },
            FsError::NotAFile { path } => FsError::NotAFile { path: f(path) },
            FsError::NotADirectory { path } => FsError::NotADirectory { path: f(path) },
            FsError::DirectoryNotEmpty { path } => FsError::DirectoryNotEmpty { path: f(path) },
            FsError::CrossedBoundary { path } => FsError::CrossedBoundary { path: f(path) },
            FsError::PermissionDenied { path, operation } => FsError::PermissionDenied {
                path: f(path),
                operation,
            },
            FsError::BadDescriptor { path, operation } => FsError::BadDescriptor {
                path: f(path),
                operation,
            },
            FsError::InvalidData { path, details } => FsError::InvalidData {
                path: f(path),
                details,
            },
            FsError::Io {
                operation,
                path,
                source,
            } => FsError::Io {
                operation,
                path: f(path),
                source,
            },
            other => other,
        }
    }

    /// Returns `true` for [`FsError::NotFound`].
    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, FsError::NotFound { .. })
    }

    /// Returns `true` for [`FsError::NotSupported`].
    #[inline]
    pub fn is_not_supported(&self) -> bool {
        matches!(self, FsError::NotSupported { .. })
    }
}

impl From<std::io::Error> for FsError {
    fn from(error: std::io::Error) -> Self {
        FsError::from_io("io", PathBuf::new(), error)
    }
}

impl From<FsError> for std::io::Error {
    fn from(error: FsError) -> Self {
        let kind = match &error {
            FsError::NotFound { .. } => std::io::ErrorKind::NotFound,
            FsError::AlreadyExists { .. } => std::io::ErrorKind::AlreadyExists,
            FsError::PermissionDenied { .. } => std::io::ErrorKind::PermissionDenied,
            FsError::NotSupported { .. } => std::io::ErrorKind::Unsupported,
            FsError::InvalidData { .. } => std::io::ErrorKind::InvalidData,
            _ => std::io::ErrorKind::Other,
        };
        match error {
            FsError::Io { source, .. } => source,
            other => std::io::Error::new(kind, other),
        }
    }
}
