//! # logfs
//!
//! Transparent **logging middleware** for pluggable virtual filesystems.
//!
//! [`LoggingFs`] wraps any [`Filesystem`] and writes one human-readable line
//! per operation to a caller-supplied [`LogSink`]: the operation name, its
//! arguments and the outcome. Results and errors pass through untouched, so
//! wrapping never changes what the caller observes.
//!
//! ---
//!
//! ## Quick Start
//!
//! ```rust
//! use logfs::{Basic, MemoryFs, wrap};
//! use std::path::Path;
//!
//! let fs = wrap(MemoryFs::new(), |line: &str| eprintln!("{line}"));
//!
//! fs.create(Path::new("/hello.txt")).unwrap();   // Create("/hello.txt"): ok
//! let err = fs.stat(Path::new("missing.txt"));    // Stat("missing.txt"): -, not found: missing.txt
//! assert!(err.is_err());
//! ```
//!
//! Route lines into `tracing` instead of a closure with [`TracingSink`]:
//!
//! ```rust
//! use logfs::{MemoryFs, TracingSink, wrap};
//!
//! let fs = wrap(MemoryFs::new(), TracingSink::new());
//! ```
//!
//! ---
//!
//! ## Core Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Filesystem`] | The contract every backend implements |
//! | [`LoggingFs`] | Decorator logging each call to a [`LogSink`] |
//! | [`MemoryFs`] | Thread-safe in-memory backend |
//! | [`OsFs`] | Backend over a host directory |
//! | [`ChrootFs`] | Confines a backend to a sub-directory |
//! | [`Polyfill`] | Completes a [`Basic`]-only implementation |
//! | [`FsError`] | Error type with path and operation context |
//! | [`FileInfo`] | Name, size, mode and modification time of an entry |
//!
//! ---
//!
//! ## Trait Layout
//!
//! ```text
//! Required:  Basic + TempFile + Dir + Chroot = Filesystem
//! Optional:  Symlink, Change   (Filesystem::as_symlink / as_change)
//! ```
//!
//! A `LoggingFs` always offers both optional capabilities. When the wrapped
//! filesystem lacks one, the call is logged and fails with
//! [`FsError::NotSupported`].
//!
//! ---
//!
//! ## Error Handling
//!
//! All operations return `Result<T, FsError>`. Errors include context:
//!
//! ```rust
//! use logfs::FsError;
//! use std::path::PathBuf;
//!
//! let err = FsError::NotFound { path: PathBuf::from("/missing.txt") };
//! assert_eq!(err.to_string(), "not found: /missing.txt");
//!
//! let err = FsError::PermissionDenied {
//!     path: PathBuf::from("/secret"),
//!     operation: "open",
//! };
//! assert_eq!(err.to_string(), "open: permission denied: /secret");
//! ```
//!
//! ---
//!
//! ## Thread Safety
//!
//! All traits require `Send + Sync` and take `&self`. A `LoggingFs` can be
//! shared across threads behind an `Arc`; sinks must tolerate concurrent
//! calls.
//!
//! ---
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | Serialization for [`FileInfo`], [`FileMode`], [`OpenFlags`], [`Capability`]; JSON helpers |

// Private modules
mod error;
mod ext;
mod helper;
mod layer;
mod logging;
mod memory;
mod os;
mod traits;
mod types;

pub mod path;

// Public re-exports - error types
pub use error::FsError;

// Public re-exports - core types
pub use types::{Capability, FileInfo, FileMode, OpenFlags};

// Public re-exports - traits
pub use traits::{Basic, Change, Chroot, Dir, File, Filesystem, Symlink, TempFile};

// Public re-exports - logging middleware
pub use logging::{LogSink, LoggingFs, LoggingLayer, TracingSink, wrap};

// Public re-exports - backends and adapters
pub use helper::{ChrootFs, Polyfill};
pub use memory::MemoryFs;
pub use os::OsFs;

// Public re-exports - infrastructure
pub use ext::FilesystemExt;
pub use layer::{Layer, LayerExt};

// Conditional re-exports
#[cfg(feature = "serde")]
pub use ext::FilesystemExtJson;
