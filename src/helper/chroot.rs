//! Confine a filesystem to one of its sub-directories.

use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::path::{absolute, base_name, is_crossing_boundary, relative};
use crate::{
    Basic, Capability, Change, Chroot, Dir, File, FileInfo, FileMode, Filesystem, FsError,
    OpenFlags, Symlink, TempFile,
};

/// A view of `inner` rooted at `base`.
///
/// Every path is taken relative to `base`; a path whose leading `..`
/// components would climb above it fails with [`FsError::CrossedBoundary`].
/// Files opened through the view report the name the caller used, and so
/// do errors coming back from `inner`.
///
/// The base directory is not required to exist.
///
/// # Example
///
/// ```rust
/// use logfs::{Basic, ChrootFs, MemoryFs};
/// use std::path::Path;
///
/// let mem = MemoryFs::new();
/// let jail = ChrootFs::new(mem.clone(), "/srv");
/// jail.create(Path::new("/index.html")).unwrap();
///
/// assert!(mem.stat(Path::new("/srv/index.html")).is_ok());
/// assert!(jail.stat(Path::new("../etc/passwd")).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct ChrootFs<B> {
    inner: B,
    base: PathBuf,
}

impl<B: Filesystem + Clone + 'static> ChrootFs<B> {
    /// Root `inner` at `base`. Relative bases are taken from `/`.
    pub fn new(inner: B, base: impl AsRef<Path>) -> Self {
        Self {
            inner,
            base: absolute(base.as_ref()),
        }
    }

    /// The confined filesystem.
    pub fn inner(&self) -> &B {
        &self.inner
    }

    fn underlying(&self, path: &Path) -> Result<PathBuf, FsError> {
        if is_crossing_boundary(path) {
            return Err(FsError::CrossedBoundary {
                path: path.to_path_buf(),
            });
        }
        let rel = relative(path);
        if rel.as_os_str().is_empty() {
            Ok(self.base.clone())
        } else {
            Ok(self.base.join(rel))
        }
    }

    /// Put the path of an inner error back in the caller's terms: a path we
    /// translated maps to what the caller passed, any other path under the
    /// base is shown relative to it.
    fn rebase(&self, err: FsError, translated: &[(&Path, &Path)]) -> FsError {
        err.map_path(|inner| {
            if let Some((_, caller)) = translated.iter().find(|(host, _)| *host == inner) {
                return caller.to_path_buf();
            }
            let inside = inner.strip_prefix(&self.base).map(Path::to_path_buf);
            match inside {
                Ok(rest) => Path::new("/").join(rest),
                Err(_) => inner,
            }
        })
    }

    fn symlinks(&self, operation: &'static str) -> Result<&dyn Symlink, FsError> {
        self.inner
            .as_symlink()
            .ok_or(FsError::NotSupported { operation })
    }

    fn changes(&self, operation: &'static str) -> Result<&dyn Change, FsError> {
        self.inner
            .as_change()
            .ok_or(FsError::NotSupported { operation })
    }
}

impl<B: Filesystem + Clone + 'static> Basic for ChrootFs<B> {
    fn open_file(
        &self,
        path: &Path,
        flags: OpenFlags,
        mode: FileMode,
    ) -> Result<Box<dyn File>, FsError> {
        let host = self.underlying(path)?;
        let file = self
            .inner
            .open_file(host.as_path(), flags, mode)
            .map_err(|e| self.rebase(e, &[(host.as_path(), path)]))?;
        Ok(Box::new(ChrootFile::new(path.to_path_buf(), file)))
    }

    fn stat(&self, path: &Path) -> Result<FileInfo, FsError> {
        let host = self.underlying(path)?;
        let mut info = self
            .inner
            .stat(&host)
            .map_err(|e| self.rebase(e, &[(host.as_path(), path)]))?;
        info.name = base_name(path);
        Ok(info)
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<(), FsError> {
        let source = self.underlying(from)?;
        let dest = self.underlying(to)?;
        self.inner
            .rename(&source, &dest)
            .map_err(|e| self.rebase(e, &[(source.as_path(), from), (dest.as_path(), to)]))
    }

    fn remove(&self, path: &Path) -> Result<(), FsError> {
        let host = self.underlying(path)?;
        self.inner
            .remove(&host)
            .map_err(|e| self.rebase(e, &[(host.as_path(), path)]))
    }
}

impl<B: Filesystem + Clone + 'static> TempFile for ChrootFs<B> {
    fn temp_file(&self, dir: &Path, prefix: &str) -> Result<Box<dyn File>, FsError> {
        let host = self.underlying(dir)?;
        let file = self
            .inner
            .temp_file(host.as_path(), prefix)
            .map_err(|e| self.rebase(e, &[(host.as_path(), dir)]))?;
        let name = dir.join(base_name(file.name()));
        Ok(Box::new(ChrootFile::new(name, file)))
    }
}

impl<B: Filesystem + Clone + 'static> Dir for ChrootFs<B> {
    fn read_dir(&self, path: &Path) -> Result<Vec<FileInfo>, FsError> {
        let host = self.underlying(path)?;
        self.inner
            .read_dir(&host)
            .map_err(|e| self.rebase(e, &[(host.as_path(), path)]))
    }

    fn mkdir_all(&self, path: &Path, perm: FileMode) -> Result<(), FsError> {
        let host = self.underlying(path)?;
        self.inner
            .mkdir_all(host.as_path(), perm)
            .map_err(|e| self.rebase(e, &[(host.as_path(), path)]))
    }
}

impl<B: Filesystem + Clone + 'static> Chroot for ChrootFs<B> {
    fn chroot(&self, path: &Path) -> Result<Box<dyn Filesystem>, FsError> {
        let base = self.underlying(path)?;
        Ok(Box::new(ChrootFs::new(self.inner.clone(), base)))
    }

    fn root(&self) -> PathBuf {
        self.base.clone()
    }
}

impl<B: Filesystem + Clone + 'static> Symlink for ChrootFs<B> {
    fn lstat(&self, path: &Path) -> Result<FileInfo, FsError> {
        let host = self.underlying(path)?;
        let mut info = self
            .symlinks("lstat")?
            .lstat(&host)
            .map_err(|e| self.rebase(e, &[(host.as_path(), path)]))?;
        info.name = base_name(path);
        Ok(info)
    }

    fn symlink(&self, target: &Path, link: &Path) -> Result<(), FsError> {
        let host_target = if target.has_root() {
            self.underlying(target)?
        } else {
            target.to_path_buf()
        };
        let host_link = self.underlying(link)?;
        self.symlinks("symlink")?
            .symlink(&host_target, &host_link)
            .map_err(|e| {
                self.rebase(
                    e,
                    &[(host_link.as_path(), link), (host_target.as_path(), target)],
                )
            })
    }

    fn readlink(&self, path: &Path) -> Result<PathBuf, FsError> {
        let host = self.underlying(path)?;
        let target = self
            .symlinks("readlink")?
            .readlink(&host)
            .map_err(|e| self.rebase(e, &[(host.as_path(), path)]))?;
        if !target.has_root() {
            return Ok(target);
        }
        match target.strip_prefix(&self.base) {
            Ok(inside) => Ok(Path::new("/").join(inside)),
            Err(_) => Ok(target),
        }
    }
}

impl<B: Filesystem + Clone + 'static> Change for ChrootFs<B> {
    fn chmod(&self, path: &Path, mode: FileMode) -> Result<(), FsError> {
        let host = self.underlying(path)?;
        self.changes("chmod")?
            .chmod(host.as_path(), mode)
            .map_err(|e| self.rebase(e, &[(host.as_path(), path)]))
    }

    fn lchown(&self, path: &Path, uid: u32, gid: u32) -> Result<(), FsError> {
        let host = self.underlying(path)?;
        self.changes("lchown")?
            .lchown(host.as_path(), uid, gid)
            .map_err(|e| self.rebase(e, &[(host.as_path(), path)]))
    }

    fn chown(&self, path: &Path, uid: u32, gid: u32) -> Result<(), FsError> {
        let host = self.underlying(path)?;
        self.changes("chown")?
            .chown(host.as_path(), uid, gid)
            .map_err(|e| self.rebase(e, &[(host.as_path(), path)]))
    }

    fn chtimes(&self, path: &Path, atime: SystemTime, mtime: SystemTime) -> Result<(), FsError> {
        let host = self.underlying(path)?;
        self.changes("chtimes")?
            .chtimes(host.as_path(), atime, mtime)
            .map_err(|e| self.rebase(e, &[(host.as_path(), path)]))
    }
}

impl<B: Filesystem + Clone + 'static> Filesystem for ChrootFs<B> {
    fn capabilities(&self) -> Capability {
        self.inner.capabilities()
    }

    fn as_symlink(&self) -> Option<&dyn Symlink> {
        self.inner.as_symlink().map(|_| self as &dyn Symlink)
    }

    fn as_change(&self) -> Option<&dyn Change> {
        self.inner.as_change().map(|_| self as &dyn Change)
    }
}

/// A file opened through a [`ChrootFs`], named as the caller named it.
struct ChrootFile {
    name: PathBuf,
    inner: Box<dyn File>,
}

impl ChrootFile {
    fn new(name: PathBuf, inner: Box<dyn File>) -> Self {
        Self { name, inner }
    }
}

impl Read for ChrootFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl Write for ChrootFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl Seek for ChrootFile {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}

impl File for ChrootFile {
    fn name(&self) -> &Path {
        &self.name
    }

    fn truncate(&mut self, size: u64) -> Result<(), FsError> {
        self.inner.truncate(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemoryFs, Polyfill};
    use std::io::Write;

    fn jail() -> (MemoryFs, ChrootFs<MemoryFs>) {
        let mem = MemoryFs::new();
        let jail = ChrootFs::new(mem.clone(), "/jail");
        (mem, jail)
    }

    #[test]
    fn paths_are_rooted_at_base() {
        let (mem, jail) = jail();
        jail.create(Path::new("/a.txt"))
            .unwrap()
            .write_all(b"abc")
            .unwrap();
        jail.create(Path::new("b.txt")).unwrap();

        assert_eq!(mem.stat(Path::new("/jail/a.txt")).unwrap().size, 3);
        assert!(mem.stat(Path::new("/jail/b.txt")).is_ok());
    }

    #[test]
    fn escaping_paths_are_rejected() {
        let (_, jail) = jail();
        let err = jail.stat(Path::new("../outside")).unwrap_err();
        assert!(matches!(err, FsError::CrossedBoundary { path } if path == Path::new("../outside")));

        assert!(jail.stat(Path::new("/../x")).unwrap_err().is_not_found());
    }

    #[test]
    fn errors_carry_caller_paths() {
        let (mem, jail) = jail();
        mem.create(Path::new("/jail/d/f")).unwrap();

        let err = jail.stat(Path::new("missing.txt")).unwrap_err();
        assert_eq!(err.to_string(), "not found: missing.txt");

        let err = jail.remove(Path::new("/d")).unwrap_err();
        assert!(matches!(err, FsError::DirectoryNotEmpty { path } if path == Path::new("/d")));

        let err = jail.rename(Path::new("gone"), Path::new("/d/g")).unwrap_err();
        assert!(matches!(err, FsError::NotFound { path } if path == Path::new("gone")));

        let err = jail.open(Path::new("d")).err().unwrap();
        assert!(matches!(err, FsError::NotAFile { path } if path == Path::new("d")));
    }

    #[test]
    fn file_names_are_caller_paths() {
        let (_, jail) = jail();
        let file = jail.create(Path::new("dir/f")).unwrap();
        assert_eq!(file.name(), Path::new("dir/f"));

        let temp = jail.temp_file(Path::new("/tmp"), "t").unwrap();
        assert!(temp.name().starts_with("/tmp"));
        assert!(!temp.name().starts_with("/jail"));
    }

    #[test]
    fn stat_of_root_is_named_root() {
        let (mem, jail) = jail();
        mem.mkdir_all(Path::new("/jail"), FileMode::from_perm(0o755))
            .unwrap();
        assert_eq!(jail.stat(Path::new("/")).unwrap().name, "/");
    }

    #[test]
    fn nested_chroot_accumulates_base() {
        let (mem, jail) = jail();
        let inner = jail.chroot(Path::new("sub")).unwrap();
        assert_eq!(inner.root(), PathBuf::from("/jail/sub"));

        inner.create(Path::new("f")).unwrap();
        assert!(mem.stat(Path::new("/jail/sub/f")).is_ok());
    }

    #[test]
    fn absolute_symlinks_stay_inside() {
        let (mem, jail) = jail();
        jail.create(Path::new("/target")).unwrap();
        jail.symlink(Path::new("/target"), Path::new("/link"))
            .unwrap();

        assert_eq!(
            mem.readlink(Path::new("/jail/link")).unwrap(),
            PathBuf::from("/jail/target")
        );
        assert_eq!(
            jail.readlink(Path::new("/link")).unwrap(),
            PathBuf::from("/target")
        );
        assert!(jail.lstat(Path::new("link")).unwrap().is_symlink());
        assert!(jail.stat(Path::new("link")).unwrap().is_file());
    }

    #[test]
    fn listing_and_change_forward() {
        let (mem, jail) = jail();
        jail.mkdir_all(Path::new("/d"), FileMode::from_perm(0o700))
            .unwrap();
        jail.create(Path::new("/d/x")).unwrap();
        jail.chmod(Path::new("/d/x"), FileMode::from_perm(0o400))
            .unwrap();
        jail.rename(Path::new("/d/x"), Path::new("/d/y")).unwrap();

        let names: Vec<_> = jail
            .read_dir(Path::new("/d"))
            .unwrap()
            .into_iter()
            .map(|info| info.name)
            .collect();
        assert_eq!(names, ["y"]);
        assert_eq!(mem.stat(Path::new("/jail/d/y")).unwrap().mode.perm(), 0o400);
    }

    #[test]
    fn capabilities_follow_inner() {
        let (_, jail) = jail();
        assert!(jail.as_symlink().is_some());
        assert!(jail.as_change().is_some());

        #[derive(Clone)]
        struct Empty;
        impl Basic for Empty {
            fn open_file(&self, p: &Path, _: OpenFlags, _: FileMode) -> Result<Box<dyn File>, FsError> {
                Err(FsError::NotFound { path: p.to_path_buf() })
            }
            fn stat(&self, p: &Path) -> Result<FileInfo, FsError> {
                Err(FsError::NotFound { path: p.to_path_buf() })
            }
            fn rename(&self, _: &Path, _: &Path) -> Result<(), FsError> {
                Ok(())
            }
            fn remove(&self, _: &Path) -> Result<(), FsError> {
                Ok(())
            }
        }

        let plain = ChrootFs::new(Polyfill::new(Empty), "/x");
        assert!(plain.as_symlink().is_none());
        assert!(plain.as_change().is_none());
        assert!(plain.readlink(Path::new("l")).unwrap_err().is_not_supported());
    }
}
