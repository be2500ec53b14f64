//! # Logging Middleware
//!
//! [`LoggingFs`] forwards every call to the filesystem it wraps and reports
//! the call, its arguments and its outcome to a [`LogSink`].
//!
//! ## How It Works
//!
//! ```text
//! caller ──▶ LoggingFs ──▶ inner filesystem
//!               │
//!               └──▶ sink: `Stat("a.txt"): {name: "a.txt", mode: 0o100644, dir: false}, ok`
//! ```
//!
//! Results and errors are returned to the caller exactly as the inner
//! filesystem produced them. The only error the wrapper creates itself is
//! [`FsError::NotSupported`], when a symlink or change operation is requested
//! and the inner filesystem lacks that capability.
//!
//! ## Example
//!
//! ```rust
//! use logfs::{Basic, FsError, MemoryFs, wrap};
//! use std::path::Path;
//! use std::sync::{Arc, Mutex};
//!
//! let lines = Arc::new(Mutex::new(Vec::new()));
//! let recorded = Arc::clone(&lines);
//! let fs = wrap(MemoryFs::new(), move |line: &str| {
//!     recorded.lock().unwrap().push(line.to_owned());
//! });
//!
//! let err = fs.stat(Path::new("missing.txt")).unwrap_err();
//! assert!(matches!(err, FsError::NotFound { .. }));
//! assert_eq!(
//!     lines.lock().unwrap()[0],
//!     r#"Stat("missing.txt"): -, not found: missing.txt"#
//! );
//! ```
//!
//! ## Chroot
//!
//! [`Chroot::chroot`] on a `LoggingFs` returns the inner filesystem's chrooted
//! view as is: calls made through it are not logged. Wrap it again to log them.

mod format;
mod sink;

pub use sink::{LogSink, TracingSink};

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use crate::{
    Basic, Capability, Change, Chroot, Dir, File, FileInfo, FileMode, Filesystem, FsError, Layer,
    OpenFlags, Symlink, TempFile,
};
use format::{Described, Listing, outcome, timestamp};

/// Wrap `fs` so every call on it is reported to `sink`.
///
/// Shorthand for [`LoggingFs::new`].
pub fn wrap<F, S>(fs: F, sink: S) -> LoggingFs<F>
where
    F: Filesystem,
    S: LogSink + 'static,
{
    LoggingFs::new(fs, sink)
}

/// A filesystem decorator that logs every call.
///
/// Implements [`Filesystem`] plus both optional capabilities, [`Symlink`] and
/// [`Change`]; those are forwarded when the inner filesystem has them and
/// fail with [`FsError::NotSupported`] otherwise. Every call produces exactly
/// one line on the sink.
///
/// The wrapper holds no state besides the inner filesystem and the sink and
/// adds no synchronization: concurrent calls produce lines in whatever order
/// the sink receives them.
pub struct LoggingFs<F> {
    inner: F,
    sink: Arc<dyn LogSink>,
}

impl<F: Filesystem> LoggingFs<F> {
    /// Wrap `inner`, reporting to `sink`.
    pub fn new<S: LogSink + 'static>(inner: F, sink: S) -> Self {
        Self::with_shared_sink(inner, Arc::new(sink))
    }

    /// Wrap `inner`, reporting to a sink shared with other wrappers.
    pub fn with_shared_sink(inner: F, sink: Arc<dyn LogSink>) -> Self {
        Self { inner, sink }
    }
}

impl<F> LoggingFs<F> {
    /// The wrapped filesystem.
    pub fn inner(&self) -> &F {
        &self.inner
    }

    /// The sink lines are sent to.
    pub fn sink(&self) -> &Arc<dyn LogSink> {
        &self.sink
    }

    /// Unwrap, returning the inner filesystem.
    pub fn into_inner(self) -> F {
        self.inner
    }

    fn log(&self, args: fmt::Arguments<'_>) {
        self.sink.log(&args.to_string());
    }
}

impl<F: Clone> Clone for LoggingFs<F> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            sink: Arc::clone(&self.sink),
        }
    }
}

impl<F: fmt::Debug> fmt::Debug for LoggingFs<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggingFs")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

impl<F: Filesystem> Basic for LoggingFs<F> {
    fn create(&self, path: &Path) -> Result<Box<dyn File>, FsError> {
        let ret = self.inner.create(path);
        self.log(format_args!("Create({path:?}): {}", outcome(&ret)));
        ret
    }

    fn open(&self, path: &Path) -> Result<Box<dyn File>, FsError> {
        let ret = self.inner.open(path);
        self.log(format_args!("Open({path:?}): {}", outcome(&ret)));
        ret
    }

    fn open_file(
        &self,
        path: &Path,
        flags: OpenFlags,
        mode: FileMode,
    ) -> Result<Box<dyn File>, FsError> {
        let ret = self.inner.open_file(path, flags, mode);
        self.log(format_args!(
            "OpenFile({path:?}, {}, {mode:#o}): {}",
            flags.bits(),
            outcome(&ret)
        ));
        ret
    }

    fn stat(&self, path: &Path) -> Result<FileInfo, FsError> {
        let ret = self.inner.stat(path);
        self.log(format_args!("Stat({path:?}): {}", Described(&ret)));
        ret
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<(), FsError> {
        let ret = self.inner.rename(from, to);
        self.log(format_args!("Rename({from:?}, {to:?}): {}", outcome(&ret)));
        ret
    }

    fn remove(&self, path: &Path) -> Result<(), FsError> {
        let ret = self.inner.remove(path);
        self.log(format_args!("Remove({path:?}): {}", outcome(&ret)));
        ret
    }

    fn join(&self, parts: &[&str]) -> PathBuf {
        let ret = self.inner.join(parts);
        self.log(format_args!("Join({parts:?}): {ret:?}"));
        ret
    }
}

impl<F: Filesystem> TempFile for LoggingFs<F> {
    fn temp_file(&self, dir: &Path, prefix: &str) -> Result<Box<dyn File>, FsError> {
        let ret = self.inner.temp_file(dir, prefix);
        self.log(format_args!("TempFile({dir:?}, {prefix:?}): {}", outcome(&ret)));
        ret
    }
}

impl<F: Filesystem> Dir for LoggingFs<F> {
    fn read_dir(&self, path: &Path) -> Result<Vec<FileInfo>, FsError> {
        let ret = self.inner.read_dir(path);
        self.log(format_args!("ReadDir({path:?}): {}", Listing(&ret)));
        ret
    }

    fn mkdir_all(&self, path: &Path, perm: FileMode) -> Result<(), FsError> {
        let ret = self.inner.mkdir_all(path, perm);
        self.log(format_args!("MkdirAll({path:?}, {perm:#o}): {}", outcome(&ret)));
        ret
    }
}

impl<F: Filesystem> Chroot for LoggingFs<F> {
    fn chroot(&self, path: &Path) -> Result<Box<dyn Filesystem>, FsError> {
        let ret = self.inner.chroot(path);
        self.log(format_args!("Chroot({path:?}): {}", outcome(&ret)));
        ret
    }

    fn root(&self) -> PathBuf {
        let ret = self.inner.root();
        self.log(format_args!("Root(): {ret:?}"));
        ret
    }
}

impl<F: Filesystem> Symlink for LoggingFs<F> {
    fn lstat(&self, path: &Path) -> Result<FileInfo, FsError> {
        let ret = match self.inner.as_symlink() {
            Some(links) => links.lstat(path),
            None => Err(FsError::NotSupported { operation: "lstat" }),
        };
        self.log(format_args!("Lstat({path:?}): {}", Described(&ret)));
        ret
    }

    fn symlink(&self, target: &Path, link: &Path) -> Result<(), FsError> {
        let ret = match self.inner.as_symlink() {
            Some(links) => links.symlink(target, link),
            None => Err(FsError::NotSupported {
                operation: "symlink",
            }),
        };
        self.log(format_args!("Symlink({target:?}, {link:?}): {}", outcome(&ret)));
        ret
    }

    fn readlink(&self, path: &Path) -> Result<PathBuf, FsError> {
        let ret = match self.inner.as_symlink() {
            Some(links) => links.readlink(path),
            None => Err(FsError::NotSupported {
                operation: "readlink",
            }),
        };
        let target = ret.as_deref().unwrap_or(Path::new(""));
        self.log(format_args!("Readlink({path:?}): {target:?}, {}", outcome(&ret)));
        ret
    }
}

impl<F: Filesystem> Change for LoggingFs<F> {
    fn chmod(&self, path: &Path, mode: FileMode) -> Result<(), FsError> {
        let ret = match self.inner.as_change() {
            Some(change) => change.chmod(path, mode),
            None => Err(FsError::NotSupported { operation: "chmod" }),
        };
        self.log(format_args!("Chmod({path:?}, {mode:#o}): {}", outcome(&ret)));
        ret
    }

    fn lchown(&self, path: &Path, uid: u32, gid: u32) -> Result<(), FsError> {
        let ret = match self.inner.as_change() {
            Some(change) => change.lchown(path, uid, gid),
            None => Err(FsError::NotSupported { operation: "lchown" }),
        };
        self.log(format_args!("Lchown({path:?}, {uid}, {gid}): {}", outcome(&ret)));
        ret
    }

    fn chown(&self, path: &Path, uid: u32, gid: u32) -> Result<(), FsError> {
        let ret = match self.inner.as_change() {
            Some(change) => change.chown(path, uid, gid),
            None => Err(FsError::NotSupported { operation: "chown" }),
        };
        self.log(format_args!("Chown({path:?}, {uid}, {gid}): {}", outcome(&ret)));
        ret
    }

    fn chtimes(&self, path: &Path, atime: SystemTime, mtime: SystemTime) -> Result<(), FsError> {
        let ret = match self.inner.as_change() {
            Some(change) => change.chtimes(path, atime, mtime),
            None => Err(FsError::NotSupported {
                operation: "chtimes",
            }),
        };
        self.log(format_args!(
            "Chtimes({path:?}, {}, {}): {}",
            timestamp(atime),
            timestamp(mtime),
            outcome(&ret)
        ));
        ret
    }
}

impl<F: Filesystem> Filesystem for LoggingFs<F> {
    fn capabilities(&self) -> Capability {
        let ret = self.inner.capabilities();
        self.log(format_args!("Capabilities(): {}", ret.bits()));
        ret
    }

    fn as_symlink(&self) -> Option<&dyn Symlink> {
        Some(self)
    }

    fn as_change(&self) -> Option<&dyn Change> {
        Some(self)
    }
}

/// Layer producing a [`LoggingFs`].
///
/// ```rust
/// use logfs::{LayerExt, LoggingLayer, MemoryFs, Basic};
///
/// let fs = MemoryFs::new().layer(LoggingLayer::new(|line: &str| println!("{line}")));
/// let _ = fs.join(&["a", "b"]);
/// ```
#[derive(Clone)]
pub struct LoggingLayer {
    sink: Arc<dyn LogSink>,
}

impl LoggingLayer {
    /// Layer reporting to `sink`.
    pub fn new<S: LogSink + 'static>(sink: S) -> Self {
        Self {
            sink: Arc::new(sink),
        }
    }

    /// Layer reporting to a sink shared with other layers.
    pub fn shared(sink: Arc<dyn LogSink>) -> Self {
        Self { sink }
    }
}

impl fmt::Debug for LoggingLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggingLayer").finish_non_exhaustive()
    }
}

impl<F: Filesystem> Layer<F> for LoggingLayer {
    type Backend = LoggingFs<F>;

    fn layer(self, backend: F) -> Self::Backend {
        LoggingFs::with_shared_sink(backend, self.sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryFs, Polyfill};
    use std::io::{Read, Write};
    use std::sync::Mutex;
    use std::time::Duration;

    fn recorder() -> (Arc<Mutex<Vec<String>>>, impl LogSink + 'static) {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&lines);
        let sink = move |line: &str| recorded.lock().unwrap().push(line.to_owned());
        (lines, sink)
    }

    fn taken(lines: &Arc<Mutex<Vec<String>>>) -> Vec<String> {
        std::mem::take(&mut *lines.lock().unwrap())
    }

    /// Basic-only filesystem: only `open_file` fails.
    struct Refusing;

    impl Basic for Refusing {
        fn open_file(&self, path: &Path, _: OpenFlags, _: FileMode) -> Result<Box<dyn File>, FsError> {
            Err(FsError::PermissionDenied {
                path: path.to_path_buf(),
                operation: "open",
            })
        }

        fn stat(&self, path: &Path) -> Result<FileInfo, FsError> {
            Ok(FileInfo::new(crate::path::base_name(path), 0, FileMode::file(0o400)))
        }

        fn rename(&self, _: &Path, _: &Path) -> Result<(), FsError> {
            Ok(())
        }

        fn remove(&self, _: &Path) -> Result<(), FsError> {
            Ok(())
        }
    }

    #[test]
    fn create_logs_and_returns_handle() {
        let (lines, sink) = recorder();
        let fs = wrap(MemoryFs::new(), sink);

        let mut file = fs.create(Path::new("/notes.txt")).unwrap();
        file.write_all(b"hello").unwrap();

        assert_eq!(taken(&lines), vec![r#"Create("/notes.txt"): ok"#]);
        assert_eq!(fs.inner().stat(Path::new("/notes.txt")).unwrap().size, 5);
    }

    #[test]
    fn open_file_logs_flags_and_octal_mode() {
        let (lines, sink) = recorder();
        let fs = wrap(MemoryFs::new(), sink);

        let flags = OpenFlags::WRONLY | OpenFlags::CREATE | OpenFlags::EXCL;
        fs.open_file(Path::new("/a"), flags, FileMode::from_perm(0o640))
            .unwrap();
        let err = fs
            .open_file(Path::new("/a"), flags, FileMode::from_perm(0o640))
            .err()
            .unwrap();

        assert!(matches!(err, FsError::AlreadyExists { .. }));
        assert_eq!(
            taken(&lines),
            vec![
                r#"OpenFile("/a", 193, 0o640): ok"#.to_string(),
                format!(r#"OpenFile("/a", 193, 0o640): {err}"#),
            ]
        );
    }

    #[test]
    fn open_logs_underlying_error() {
        let (lines, sink) = recorder();
        let fs = wrap(MemoryFs::new(), sink);

        assert!(fs.open(Path::new("/nope")).is_err());
        assert_eq!(taken(&lines), vec![r#"Open("/nope"): not found: /nope"#]);
    }

    #[test]
    fn stat_logs_descriptor() {
        let (lines, sink) = recorder();
        let mem = MemoryFs::new();
        mem.mkdir_all(Path::new("/src"), FileMode::from_perm(0o755))
            .unwrap();
        let fs = wrap(mem, sink);

        let info = fs.stat(Path::new("/src")).unwrap();

        assert!(info.is_dir());
        assert_eq!(
            taken(&lines),
            vec![r#"Stat("/src"): {name: "src", mode: 0o40755, dir: true}, ok"#]
        );
    }

    #[test]
    fn stat_missing_logs_placeholder() {
        let (lines, sink) = recorder();
        let fs = wrap(MemoryFs::new(), sink);

        let err = fs.stat(Path::new("missing.txt")).unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(
            taken(&lines),
            vec![r#"Stat("missing.txt"): -, not found: missing.txt"#]
        );
    }

    #[test]
    fn read_dir_logs_every_entry() {
        let (lines, sink) = recorder();
        let mem = MemoryFs::new();
        mem.mkdir_all(Path::new("/d/sub"), FileMode::from_perm(0o700))
            .unwrap();
        mem.create(Path::new("/d/file")).unwrap();
        let fs = wrap(mem, sink);

        let entries = fs.read_dir(Path::new("/d")).unwrap();
        let missing = fs.read_dir(Path::new("/none"));

        assert_eq!(entries.len(), 2);
        assert!(missing.is_err());
        assert_eq!(
            taken(&lines),
            vec![
                r#"ReadDir("/d"): [{name: "file", mode: 0o100666, dir: false}, {name: "sub", mode: 0o40700, dir: true}], ok"#,
                r#"ReadDir("/none"): -, not found: /none"#,
            ]
        );
    }

    #[test]
    fn mutations_log_arguments() {
        let (lines, sink) = recorder();
        let fs = wrap(MemoryFs::new(), sink);

        fs.mkdir_all(Path::new("/a/b"), FileMode::from_perm(0o755))
            .unwrap();
        fs.create(Path::new("/a/b/x")).unwrap();
        fs.rename(Path::new("/a/b/x"), Path::new("/a/y")).unwrap();
        fs.remove(Path::new("/a/y")).unwrap();

        assert_eq!(
            taken(&lines),
            vec![
                r#"MkdirAll("/a/b", 0o755): ok"#,
                r#"Create("/a/b/x"): ok"#,
                r#"Rename("/a/b/x", "/a/y"): ok"#,
                r#"Remove("/a/y"): ok"#,
            ]
        );
    }

    #[test]
    fn join_capabilities_and_root() {
        let (lines, sink) = recorder();
        let fs = wrap(MemoryFs::new(), sink);

        assert_eq!(fs.join(&["a", "b", "../c"]), PathBuf::from("a/c"));
        let caps = fs.capabilities();
        assert_eq!(fs.root(), PathBuf::from("/"));

        assert_eq!(
            taken(&lines),
            vec![
                r#"Join(["a", "b", "../c"]): "a/c""#.to_string(),
                format!("Capabilities(): {}", caps.bits()),
                r#"Root(): "/""#.to_string(),
            ]
        );
    }

    #[test]
    fn symlink_operations_forward() {
        let (lines, sink) = recorder();
        let fs = wrap(MemoryFs::new(), sink);

        fs.create(Path::new("/target")).unwrap();
        fs.symlink(Path::new("/target"), Path::new("/link")).unwrap();
        let target = fs.readlink(Path::new("/link")).unwrap();
        let info = fs.lstat(Path::new("/link")).unwrap();

        assert_eq!(target, PathBuf::from("/target"));
        assert!(info.is_symlink());
        let lines = taken(&lines);
        assert_eq!(lines[1], r#"Symlink("/target", "/link"): ok"#);
        assert_eq!(lines[2], r#"Readlink("/link"): "/target", ok"#);
        assert_eq!(
            lines[3],
            r#"Lstat("/link"): {name: "link", mode: 0o120777, dir: false}, ok"#
        );
    }

    #[test]
    fn missing_symlink_capability_is_not_supported() {
        let (lines, sink) = recorder();
        let fs = wrap(Polyfill::new(Refusing), sink);

        let symlink = fs.symlink(Path::new("t"), Path::new("l")).unwrap_err();
        let readlink = fs.readlink(Path::new("l")).unwrap_err();
        let lstat = fs.lstat(Path::new("l")).unwrap_err();

        assert!(symlink.is_not_supported());
        assert!(readlink.is_not_supported());
        assert!(lstat.is_not_supported());
        assert_eq!(
            taken(&lines),
            vec![
                r#"Symlink("t", "l"): operation not supported: symlink"#,
                r#"Readlink("l"): "", operation not supported: readlink"#,
                r#"Lstat("l"): -, operation not supported: lstat"#,
            ]
        );
    }

    #[test]
    fn missing_change_capability_is_not_supported() {
        let (lines, sink) = recorder();
        let fs = wrap(Polyfill::new(Refusing), sink);
        let when = SystemTime::UNIX_EPOCH + Duration::from_secs(86_400);

        assert!(fs.chmod(Path::new("f"), FileMode::from_perm(0o600)).unwrap_err().is_not_supported());
        assert!(fs.chown(Path::new("f"), 1, 2).unwrap_err().is_not_supported());
        assert!(fs.lchown(Path::new("f"), 3, 4).unwrap_err().is_not_supported());
        assert!(fs.chtimes(Path::new("f"), when, when).unwrap_err().is_not_supported());

        assert_eq!(
            taken(&lines),
            vec![
                r#"Chmod("f", 0o600): operation not supported: chmod"#,
                r#"Chown("f", 1, 2): operation not supported: chown"#,
                r#"Lchown("f", 3, 4): operation not supported: lchown"#,
                r#"Chtimes("f", 1970-01-02T00:00:00Z, 1970-01-02T00:00:00Z): operation not supported: chtimes"#,
            ]
        );
    }

    #[test]
    fn change_operations_forward() {
        let (lines, sink) = recorder();
        let fs = wrap(MemoryFs::new(), sink);
        fs.create(Path::new("/f")).unwrap();
        taken(&lines);

        fs.chmod(Path::new("/f"), FileMode::from_perm(0o600)).unwrap();
        fs.chown(Path::new("/f"), 1000, 100).unwrap();

        assert_eq!(fs.inner().stat(Path::new("/f")).unwrap().mode.perm(), 0o600);
        assert_eq!(fs.inner().owner(Path::new("/f")).unwrap(), (1000, 100));
        assert_eq!(
            taken(&lines),
            vec![r#"Chmod("/f", 0o600): ok"#, r#"Chown("/f", 1000, 100): ok"#]
        );
    }

    #[test]
    fn underlying_errors_are_returned_verbatim() {
        let (lines, sink) = recorder();
        let fs = wrap(Polyfill::new(Refusing), sink);

        let err = fs.create(Path::new("/x")).err().unwrap();
        match err {
            FsError::PermissionDenied { path, operation } => {
                assert_eq!(path, PathBuf::from("/x"));
                assert_eq!(operation, "open");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(
            taken(&lines),
            vec![r#"Create("/x"): open: permission denied: /x"#]
        );
    }

    #[test]
    fn temp_file_is_logged() {
        let (lines, sink) = recorder();
        let fs = wrap(MemoryFs::new(), sink);

        let mut file = fs.temp_file(Path::new("/scratch"), "job-").unwrap();
        file.write_all(b"tmp").unwrap();

        assert!(file.name().starts_with("/scratch"));
        assert_eq!(taken(&lines), vec![r#"TempFile("/scratch", "job-"): ok"#]);
    }

    #[test]
    fn chroot_view_is_not_logged() {
        let (lines, sink) = recorder();
        let fs = wrap(MemoryFs::new(), sink);
        fs.mkdir_all(Path::new("/jail"), FileMode::from_perm(0o755))
            .unwrap();
        taken(&lines);

        let jail = fs.chroot(Path::new("/jail")).unwrap();
        let mut file = jail.create(Path::new("inside.txt")).unwrap();
        file.write_all(b"x").unwrap();
        drop(file);
        jail.stat(Path::new("inside.txt")).unwrap();

        assert_eq!(taken(&lines), vec![r#"Chroot("/jail"): ok"#]);

        let mut read = fs.open(Path::new("/jail/inside.txt")).unwrap();
        let mut contents = String::new();
        read.read_to_string(&mut contents).unwrap();
        assert_eq!(contents, "x");
    }

    #[test]
    fn chroot_view_can_be_rewrapped() {
        let (lines, sink) = recorder();
        let fs = wrap(MemoryFs::new(), sink);
        let jail = fs.chroot(Path::new("/jail")).unwrap();
        taken(&lines);

        let logged = LoggingFs::with_shared_sink(jail, Arc::clone(fs.sink()));
        logged.create(Path::new("a")).unwrap();

        assert_eq!(taken(&lines), vec![r#"Create("a"): ok"#]);
    }

    #[test]
    fn layer_builds_logging_fs() {
        use crate::LayerExt;

        let (lines, sink) = recorder();
        let fs = MemoryFs::new().layer(LoggingLayer::new(sink));
        fs.remove(Path::new("/absent")).unwrap_err();

        assert_eq!(taken(&lines), vec![r#"Remove("/absent"): not found: /absent"#]);
    }

    #[test]
    fn logging_fs_advertises_both_capabilities() {
        let fs = wrap(Polyfill::new(Refusing), |_: &str| {});
        assert!(fs.as_symlink().is_some());
        assert!(fs.as_change().is_some());
    }

    #[test]
    fn exactly_one_line_per_call() {
        let (lines, sink) = recorder();
        let fs = wrap(MemoryFs::new(), sink);

        let _ = fs.stat(Path::new("/"));
        let _ = fs.read_dir(Path::new("/"));
        let _ = fs.mkdir_all(Path::new("/x"), FileMode::from_perm(0o700));
        let _ = fs.temp_file(Path::new(""), "p");
        let _ = fs.root();

        assert_eq!(taken(&lines).len(), 5);
    }

    #[test]
    fn logging_fs_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LoggingFs<MemoryFs>>();
    }
}
