//! # Host Filesystem
//!
//! [`OsFs`] maps the [`Filesystem`] traits onto `std::fs`, confined to one
//! host directory. Paths are interpreted relative to that directory, and a
//! path whose leading `..` would climb out of it fails with
//! [`FsError::CrossedBoundary`].
//!
//! Symlink support and (on Unix) ownership, permission and time changes
//! are available through [`Filesystem::as_symlink`] and
//! [`Filesystem::as_change`].

use std::fs;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
#[cfg(unix)]
use std::time::SystemTime;

#[cfg(unix)]
use filetime::FileTime;

use crate::path::{base_name, is_crossing_boundary, relative};
use crate::{
    Basic, Capability, Chroot, Dir, File, FileInfo, FileMode, Filesystem, FsError, OpenFlags,
    Symlink, TempFile,
};
#[cfg(unix)]
use crate::Change;

/// Mode of directories created implicitly (parents of new files).
const DEFAULT_DIR_MODE: u32 = 0o755;

/// A filesystem backed by a directory on the host.
///
/// # Example
///
/// ```rust,no_run
/// use logfs::{Basic, Dir, FileMode, OsFs};
/// use std::path::Path;
///
/// let fs = OsFs::new("/var/lib/myapp");
/// fs.mkdir_all(Path::new("cache"), FileMode::from_perm(0o750))?;
/// let _file = fs.create(Path::new("cache/index"))?;
/// # Ok::<(), logfs::FsError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsFs {
    root: PathBuf,
}

impl OsFs {
    /// Use `root` as the top of the filesystem.
    ///
    /// The directory is not created and not checked; calls fail with the
    /// usual errors if it is missing.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Host path for a path given to this filesystem.
    fn host(&self, path: &Path) -> Result<PathBuf, FsError> {
        if is_crossing_boundary(path) {
            return Err(FsError::CrossedBoundary {
                path: path.to_path_buf(),
            });
        }
        let rel = relative(path);
        if rel.as_os_str().is_empty() {
            Ok(self.root.clone())
        } else {
            Ok(self.root.join(rel))
        }
    }

    fn create_parent(&self, host: &Path, path: &Path, operation: &'static str) -> Result<(), FsError> {
        match host.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                create_dirs(parent, DEFAULT_DIR_MODE)
                    .map_err(|e| FsError::from_io(operation, path, e))
            }
            _ => Ok(()),
        }
    }
}

fn create_dirs(dir: &Path, perm: u32) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(perm);
    }
    #[cfg(not(unix))]
    let _ = perm;
    builder.create(dir)
}

fn file_mode(metadata: &fs::Metadata) -> FileMode {
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        FileMode::from_bits(metadata.mode())
    }
    #[cfg(not(unix))]
    {
        let perm = if metadata.permissions().readonly() { 0o444 } else { 0o666 };
        let file_type = metadata.file_type();
        if file_type.is_dir() {
            FileMode::dir(perm | 0o111)
        } else if file_type.is_symlink() {
            FileMode::symlink(0o777)
        } else {
            FileMode::file(perm)
        }
    }
}

fn file_info(name: String, metadata: &fs::Metadata) -> FileInfo {
    FileInfo {
        name,
        size: metadata.len(),
        mode: file_mode(metadata),
        modified: metadata.modified().unwrap_or(std::time::UNIX_EPOCH),
    }
}

impl Basic for OsFs {
    fn open_file(
        &self,
        path: &Path,
        flags: OpenFlags,
        mode: FileMode,
    ) -> Result<Box<dyn File>, FsError> {
        let host = self.host(path)?;
        if flags.contains(OpenFlags::CREATE) {
            self.create_parent(&host, path, "open")?;
        }

        let mut options = fs::OpenOptions::new();
        options
            .read(flags.is_readable())
            .write(flags.is_writable() && !flags.contains(OpenFlags::APPEND))
            .append(flags.contains(OpenFlags::APPEND))
            .truncate(flags.contains(OpenFlags::TRUNC));
        if flags.contains(OpenFlags::CREATE | OpenFlags::EXCL) {
            options.create_new(true);
        } else {
            options.create(flags.contains(OpenFlags::CREATE));
        }
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(mode.perm());
        }
        #[cfg(not(unix))]
        let _ = mode;

        let file = options
            .open(&host)
            .map_err(|e| FsError::from_io("open", path, e))?;
        Ok(Box::new(OsFile {
            name: path.to_path_buf(),
            file,
        }))
    }

    fn stat(&self, path: &Path) -> Result<FileInfo, FsError> {
        let metadata =
            fs::metadata(self.host(path)?).map_err(|e| FsError::from_io("stat", path, e))?;
        Ok(file_info(base_name(path), &metadata))
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<(), FsError> {
        let source = self.host(from)?;
        let dest = self.host(to)?;
        self.create_parent(&dest, to, "rename")?;
        fs::rename(&source, &dest).map_err(|e| FsError::from_io("rename", from, e))
    }

    fn remove(&self, path: &Path) -> Result<(), FsError> {
        let host = self.host(path)?;
        let metadata =
            fs::symlink_metadata(&host).map_err(|e| FsError::from_io("remove", path, e))?;
        let result = if metadata.is_dir() {
            fs::remove_dir(&host)
        } else {
            fs::remove_file(&host)
        };
        result.map_err(|e| FsError::from_io("remove", path, e))
    }
}

impl TempFile for OsFs {
    fn temp_file(&self, dir: &Path, prefix: &str) -> Result<Box<dyn File>, FsError> {
        let host = self.host(dir)?;
        create_dirs(&host, DEFAULT_DIR_MODE).map_err(|e| FsError::from_io("temp_file", dir, e))?;

        let (file, kept) = tempfile::Builder::new()
            .prefix(prefix)
            .tempfile_in(&host)
            .map_err(|e| FsError::from_io("temp_file", dir, e))?
            .keep()
            .map_err(|e| FsError::from_io("temp_file", dir, e.error))?;
        Ok(Box::new(OsFile {
            name: dir.join(base_name(&kept)),
            file,
        }))
    }
}

impl Dir for OsFs {
    fn read_dir(&self, path: &Path) -> Result<Vec<FileInfo>, FsError> {
        let to_err = |e| FsError::from_io("read_dir", path, e);
        let mut entries = fs::read_dir(self.host(path)?)
            .map_err(to_err)?
            .map(|entry| {
                let entry = entry?;
                let metadata = entry.metadata()?;
                Ok(file_info(
                    entry.file_name().to_string_lossy().into_owned(),
                    &metadata,
                ))
            })
            .collect::<io::Result<Vec<_>>>()
            .map_err(to_err)?;
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn mkdir_all(&self, path: &Path, perm: FileMode) -> Result<(), FsError> {
        create_dirs(&self.host(path)?, perm.perm())
            .map_err(|e| FsError::from_io("mkdir_all", path, e))
    }
}

impl Chroot for OsFs {
    fn chroot(&self, path: &Path) -> Result<Box<dyn Filesystem>, FsError> {
        Ok(Box::new(OsFs::new(self.host(path)?)))
    }

    fn root(&self) -> PathBuf {
        self.root.clone()
    }
}

impl Symlink for OsFs {
    fn lstat(&self, path: &Path) -> Result<FileInfo, FsError> {
        let metadata = fs::symlink_metadata(self.host(path)?)
            .map_err(|e| FsError::from_io("lstat", path, e))?;
        Ok(file_info(base_name(path), &metadata))
    }

    #[cfg(unix)]
    fn symlink(&self, target: &Path, link: &Path) -> Result<(), FsError> {
        let host_link = self.host(link)?;
        let target = if target.has_root() {
            self.host(target)?
        } else {
            target.to_path_buf()
        };
        self.create_parent(&host_link, link, "symlink")?;
        std::os::unix::fs::symlink(&target, &host_link)
            .map_err(|e| FsError::from_io("symlink", link, e))
    }

    #[cfg(not(unix))]
    fn symlink(&self, _target: &Path, _link: &Path) -> Result<(), FsError> {
        Err(FsError::NotSupported {
            operation: "symlink",
        })
    }

    fn readlink(&self, path: &Path) -> Result<PathBuf, FsError> {
        let target =
            fs::read_link(self.host(path)?).map_err(|e| FsError::from_io("readlink", path, e))?;
        match target.strip_prefix(&self.root) {
            Ok(inside) if target.has_root() => Ok(Path::new("/").join(inside)),
            _ => Ok(target),
        }
    }
}

#[cfg(unix)]
impl Change for OsFs {
    fn chmod(&self, path: &Path, mode: FileMode) -> Result<(), FsError> {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(self.host(path)?, fs::Permissions::from_mode(mode.perm()))
            .map_err(|e| FsError::from_io("chmod", path, e))
    }

    fn lchown(&self, path: &Path, uid: u32, gid: u32) -> Result<(), FsError> {
        std::os::unix::fs::lchown(self.host(path)?, Some(uid), Some(gid))
            .map_err(|e| FsError::from_io("lchown", path, e))
    }

    fn chown(&self, path: &Path, uid: u32, gid: u32) -> Result<(), FsError> {
        std::os::unix::fs::chown(self.host(path)?, Some(uid), Some(gid))
            .map_err(|e| FsError::from_io("chown", path, e))
    }

    fn chtimes(&self, path: &Path, atime: SystemTime, mtime: SystemTime) -> Result<(), FsError> {
        filetime::set_file_times(
            self.host(path)?,
            FileTime::from_system_time(atime),
            FileTime::from_system_time(mtime),
        )
        .map_err(|e| FsError::from_io("chtimes", path, e))
    }
}

impl Filesystem for OsFs {
    fn capabilities(&self) -> Capability {
        Capability::DEFAULT
    }

    fn as_symlink(&self) -> Option<&dyn Symlink> {
        Some(self)
    }

    #[cfg(unix)]
    fn as_change(&self) -> Option<&dyn Change> {
        Some(self)
    }
}

/// An open host file, named by the path it was opened with.
#[derive(Debug)]
struct OsFile {
    name: PathBuf,
    file: fs::File,
}

impl Read for OsFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

impl Write for OsFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

impl Seek for OsFile {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.file.seek(pos)
    }
}

impl File for OsFile {
    fn name(&self) -> &Path {
        &self.name
    }

    fn truncate(&mut self, size: u64) -> Result<(), FsError> {
        self.file
            .set_len(size)
            .map_err(|e| FsError::from_io("truncate", &self.name, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, OsFs) {
        let dir = tempfile::tempdir().unwrap();
        let fs = OsFs::new(dir.path());
        (dir, fs)
    }

    fn read(fs: &OsFs, path: &str) -> String {
        let mut out = String::new();
        fs.open(Path::new(path))
            .unwrap()
            .read_to_string(&mut out)
            .unwrap();
        out
    }

    #[test]
    fn create_writes_under_root() {
        let (dir, fs) = setup();
        fs.create(Path::new("/a/b.txt"))
            .unwrap()
            .write_all(b"hello")
            .unwrap();

        assert_eq!(fs::read(dir.path().join("a/b.txt")).unwrap(), b"hello");
        assert_eq!(read(&fs, "a/b.txt"), "hello");
    }

    #[test]
    fn file_name_is_caller_path() {
        let (_dir, fs) = setup();
        let file = fs.create(Path::new("x.txt")).unwrap();
        assert_eq!(file.name(), Path::new("x.txt"));
    }

    #[test]
    fn exclusive_create_of_existing_fails() {
        let (_dir, fs) = setup();
        let flags = OpenFlags::WRONLY | OpenFlags::CREATE | OpenFlags::EXCL;
        fs.open_file(Path::new("f"), flags, FileMode::from_perm(0o644))
            .unwrap();
        let err = fs
            .open_file(Path::new("f"), flags, FileMode::from_perm(0o644))
            .err()
            .unwrap();
        assert!(matches!(err, FsError::AlreadyExists { path, .. } if path == Path::new("f")));
    }

    #[test]
    fn append_writes_at_end() {
        let (_dir, fs) = setup();
        fs.create(Path::new("log")).unwrap().write_all(b"a").unwrap();
        fs.open_file(Path::new("log"), OpenFlags::WRONLY | OpenFlags::APPEND, FileMode::default())
            .unwrap()
            .write_all(b"b")
            .unwrap();
        assert_eq!(read(&fs, "log"), "ab");
    }

    #[test]
    fn stat_reports_caller_path_on_error() {
        let (_dir, fs) = setup();
        let err = fs.stat(Path::new("missing.txt")).unwrap_err();
        assert_eq!(err.to_string(), "not found: missing.txt");
    }

    #[test]
    fn escaping_root_is_rejected() {
        let (_dir, fs) = setup();
        assert!(matches!(
            fs.stat(Path::new("../etc")),
            Err(FsError::CrossedBoundary { .. })
        ));
    }

    #[test]
    fn read_dir_is_sorted() {
        let (_dir, fs) = setup();
        for name in ["c", "a", "b"] {
            fs.create(Path::new(name)).unwrap();
        }
        fs.mkdir_all(Path::new("d/e"), FileMode::from_perm(0o755))
            .unwrap();

        let entries = fs.read_dir(Path::new("/")).unwrap();
        let names: Vec<_> = entries.iter().map(|info| info.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c", "d"]);
        assert!(entries[3].is_dir());
    }

    #[test]
    fn rename_and_remove() {
        let (dir, fs) = setup();
        fs.create(Path::new("old")).unwrap();
        fs.rename(Path::new("old"), Path::new("sub/new")).unwrap();
        assert!(dir.path().join("sub/new").exists());

        fs.remove(Path::new("sub/new")).unwrap();
        fs.remove(Path::new("sub")).unwrap();
        assert!(!dir.path().join("sub").exists());
        assert!(fs.remove(Path::new("sub")).unwrap_err().is_not_found());
    }

    #[test]
    fn temp_file_lands_in_dir() {
        let (dir, fs) = setup();
        let file = fs.temp_file(Path::new("scratch"), "job-").unwrap();

        assert!(file.name().starts_with("scratch"));
        assert!(base_name(file.name()).starts_with("job-"));
        assert!(dir.path().join(file.name()).exists());
    }

    #[test]
    fn chroot_narrows_root() {
        let (dir, fs) = setup();
        let sub = fs.chroot(Path::new("inner")).unwrap();
        sub.create(Path::new("f")).unwrap();

        assert_eq!(sub.root(), dir.path().join("inner"));
        assert!(dir.path().join("inner/f").exists());
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_confined_to_root() {
        let (dir, fs) = setup();
        fs.create(Path::new("target")).unwrap();
        fs.symlink(Path::new("/target"), Path::new("link")).unwrap();

        assert_eq!(
            fs::read_link(dir.path().join("link")).unwrap(),
            dir.path().join("target")
        );
        assert_eq!(fs.readlink(Path::new("link")).unwrap(), PathBuf::from("/target"));
        assert!(fs.lstat(Path::new("link")).unwrap().is_symlink());
        assert!(fs.stat(Path::new("link")).unwrap().is_file());
    }

    #[cfg(unix)]
    #[test]
    fn chmod_and_chtimes() {
        use std::time::{Duration, UNIX_EPOCH};

        let (_dir, fs) = setup();
        fs.create(Path::new("f")).unwrap();
        fs.chmod(Path::new("f"), FileMode::from_perm(0o600)).unwrap();
        let when = UNIX_EPOCH + Duration::from_secs(1_000_000);
        fs.chtimes(Path::new("f"), when, when).unwrap();

        let info = fs.stat(Path::new("f")).unwrap();
        assert_eq!(info.mode, FileMode::file(0o600));
        assert_eq!(info.modified, when);
    }

    #[cfg(unix)]
    #[test]
    fn chtimes_on_write_only_file() {
        use std::time::{Duration, UNIX_EPOCH};

        let (_dir, fs) = setup();
        fs.create(Path::new("w")).unwrap();
        fs.chmod(Path::new("w"), FileMode::from_perm(0o200)).unwrap();
        let when = UNIX_EPOCH + Duration::from_secs(2_000_000);
        fs.chtimes(Path::new("w"), when, when).unwrap();

        assert_eq!(fs.stat(Path::new("w")).unwrap().modified, when);
    }
}
