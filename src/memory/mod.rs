//! # In-Memory Filesystem
//!
//! [`MemoryFs`] keeps files, directories and symlinks in a map behind a
//! `RwLock`. It implements [`Filesystem`] together with both optional
//! capabilities and is the usual backend for tests and for trying out
//! middleware.
//!
//! ## Behavior
//!
//! - paths are cleaned and taken relative to `/`
//! - creating a file or a symlink creates its missing parent directories
//! - symlinks are resolved up to 40 levels deep
//! - `read_dir` returns entries sorted by name
//! - `chroot` returns a [`ChrootFs`] sharing this filesystem's storage

mod file;

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::ops::Bound;
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::SystemTime;

use crate::path::{absolute, base_name, clean};
use crate::{
    Basic, Capability, Change, Chroot, ChrootFs, Dir, File, FileInfo, FileMode, Filesystem,
    FsError, OpenFlags, Symlink, TempFile,
};
use file::{Content, MemoryFile, SharedContent};

/// Maximum depth for symlink resolution to prevent infinite loops.
const MAX_SYMLINK_DEPTH: usize = 40;

/// Directory used by `temp_file` when none is given.
const DEFAULT_TEMP_DIR: &str = "/tmp";

/// A thread-safe in-memory filesystem.
///
/// Cloning is cheap and yields a handle to the same storage.
///
/// # Example
///
/// ```rust
/// use logfs::{Basic, Dir, FileMode, MemoryFs};
/// use std::io::Write;
/// use std::path::Path;
///
/// let fs = MemoryFs::new();
/// fs.mkdir_all(Path::new("/docs"), FileMode::from_perm(0o755)).unwrap();
/// fs.create(Path::new("/docs/readme.md")).unwrap().write_all(b"# hi").unwrap();
///
/// let names: Vec<_> = fs.read_dir(Path::new("/docs")).unwrap()
///     .into_iter().map(|info| info.name).collect();
/// assert_eq!(names, ["readme.md"]);
/// ```
#[derive(Clone)]
pub struct MemoryFs {
    shared: Arc<Shared>,
}

struct Shared {
    storage: RwLock<Storage>,
    next_temp: AtomicU64,
}

struct Storage {
    nodes: BTreeMap<PathBuf, Node>,
}

struct Node {
    kind: NodeKind,
    mode: FileMode,
    uid: u32,
    gid: u32,
    accessed: SystemTime,
    modified: SystemTime,
}

enum NodeKind {
    File(SharedContent),
    Dir,
    Symlink(PathBuf),
}

impl Node {
    fn new(kind: NodeKind, mode: FileMode) -> Self {
        let now = SystemTime::now();
        Self {
            kind,
            mode,
            uid: 0,
            gid: 0,
            accessed: now,
            modified: now,
        }
    }

    fn is_dir(&self) -> bool {
        matches!(self.kind, NodeKind::Dir)
    }

    fn info(&self, name: String) -> FileInfo {
        let (size, modified) = match &self.kind {
            NodeKind::File(content) => {
                let content = content.read().unwrap_or_else(PoisonError::into_inner);
                (content.bytes.len() as u64, content.modified)
            }
            NodeKind::Dir => (0, self.modified),
            NodeKind::Symlink(target) => (target.as_os_str().len() as u64, self.modified),
        };
        FileInfo {
            name,
            size,
            mode: self.mode,
            modified,
        }
    }
}

impl Storage {
    fn new() -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert(
            PathBuf::from("/"),
            Node::new(NodeKind::Dir, FileMode::dir(0o755)),
        );
        Self { nodes }
    }

    /// Resolve symlinks in `path`; the final component is followed only
    /// when `follow_final` is set. Missing components are kept lexically.
    fn resolve(&self, path: &Path, follow_final: bool) -> Result<PathBuf, FsError> {
        let mut remaining: Vec<OsString> = normal_components(&absolute(path));
        remaining.reverse();
        let mut resolved = PathBuf::from("/");
        let mut depth = 0;

        while let Some(name) = remaining.pop() {
            let candidate = resolved.join(&name);
            let is_final = remaining.is_empty();
            match self.nodes.get(&candidate).map(|node| &node.kind) {
                Some(NodeKind::Symlink(target)) if follow_final || !is_final => {
                    depth += 1;
                    if depth > MAX_SYMLINK_DEPTH {
                        return Err(FsError::InvalidData {
                            path: path.to_path_buf(),
                            details: format!(
                                "symlink loop detected (exceeded max depth of {MAX_SYMLINK_DEPTH})"
                            ),
                        });
                    }
                    let target = if target.has_root() {
                        clean(target)
                    } else {
                        absolute(&resolved.join(target))
                    };
                    remaining.extend(normal_components(&target).into_iter().rev());
                    resolved = PathBuf::from("/");
                }
                _ => resolved = candidate,
            }
        }
        Ok(resolved)
    }

    /// Create every missing ancestor of `target` as a directory. Errors
    /// name `path`, the caller's spelling of `target`.
    fn create_parents(&mut self, target: &Path, path: &Path) -> Result<(), FsError> {
        let Some(parent) = target.parent() else {
            return Ok(());
        };
        self.create_dirs(parent, FileMode::dir(0o755), path)
    }

    fn create_dirs(&mut self, dir: &Path, mode: FileMode, path: &Path) -> Result<(), FsError> {
        let mut current = PathBuf::from("/");
        for name in normal_components(dir) {
            current.push(name);
            match self.nodes.get(&current) {
                Some(node) if node.is_dir() => {}
                Some(_) => {
                    return Err(FsError::NotADirectory {
                        path: path.to_path_buf(),
                    });
                }
                None => {
                    self.nodes
                        .insert(current.clone(), Node::new(NodeKind::Dir, mode));
                }
            }
        }
        Ok(())
    }

    fn has_children(&self, dir: &Path) -> bool {
        self.nodes
            .range::<Path, _>((Bound::Excluded(dir), Bound::Unbounded))
            .next()
            .is_some_and(|(key, _)| key.starts_with(dir))
    }

    fn children(&self, dir: &Path) -> Vec<FileInfo> {
        self.nodes
            .range::<Path, _>((Bound::Excluded(dir), Bound::Unbounded))
            .take_while(|(key, _)| key.starts_with(dir))
            .filter(|(key, _)| key.parent() == Some(dir))
            .map(|(key, node)| node.info(base_name(key)))
            .collect()
    }

    fn lookup(&self, resolved: &Path, path: &Path) -> Result<&Node, FsError> {
        self.nodes.get(resolved).ok_or_else(|| FsError::NotFound {
            path: path.to_path_buf(),
        })
    }

    fn lookup_mut(&mut self, resolved: &Path, path: &Path) -> Result<&mut Node, FsError> {
        self.nodes
            .get_mut(resolved)
            .ok_or_else(|| FsError::NotFound {
                path: path.to_path_buf(),
            })
    }
}

fn normal_components(path: &Path) -> Vec<OsString> {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_os_string()),
            _ => None,
        })
        .collect()
}

impl MemoryFs {
    /// Create an empty filesystem containing only `/`.
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                storage: RwLock::new(Storage::new()),
                next_temp: AtomicU64::new(0),
            }),
        }
    }

    /// Owner and group of a path, following symlinks.
    pub fn owner(&self, path: &Path) -> Result<(u32, u32), FsError> {
        let storage = self.read();
        let resolved = storage.resolve(path, true)?;
        let node = storage.lookup(&resolved, path)?;
        Ok((node.uid, node.gid))
    }

    /// Access and modification time of a path, following symlinks.
    pub fn times(&self, path: &Path) -> Result<(SystemTime, SystemTime), FsError> {
        let storage = self.read();
        let resolved = storage.resolve(path, true)?;
        let node = storage.lookup(&resolved, path)?;
        Ok((node.accessed, node.info(String::new()).modified))
    }

    fn read(&self) -> RwLockReadGuard<'_, Storage> {
        self.shared
            .storage
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Storage> {
        self.shared
            .storage
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn set_owner(&self, path: &Path, uid: u32, gid: u32, follow: bool) -> Result<(), FsError> {
        let mut storage = self.write();
        let resolved = storage.resolve(path, follow)?;
        let node = storage.lookup_mut(&resolved, path)?;
        node.uid = uid;
        node.gid = gid;
        Ok(())
    }
}

impl Default for MemoryFs {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryFs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryFs")
            .field("entries", &self.read().nodes.len())
            .finish()
    }
}

impl Basic for MemoryFs {
    fn open_file(
        &self,
        path: &Path,
        flags: OpenFlags,
        mode: FileMode,
    ) -> Result<Box<dyn File>, FsError> {
        let mut storage = self.write();
        let resolved = storage.resolve(path, true)?;

        let content = match storage.nodes.get(&resolved) {
            Some(_) if flags.contains(OpenFlags::CREATE | OpenFlags::EXCL) => {
                return Err(FsError::AlreadyExists {
                    path: path.to_path_buf(),
                    operation: "open",
                });
            }
            Some(node) => match &node.kind {
                NodeKind::File(content) => Arc::clone(content),
                NodeKind::Dir => {
                    return Err(FsError::NotAFile {
                        path: path.to_path_buf(),
                    });
                }
                NodeKind::Symlink(_) => {
                    return Err(FsError::InvalidData {
                        path: path.to_path_buf(),
                        details: "unresolved symlink".into(),
                    });
                }
            },
            None if flags.contains(OpenFlags::CREATE) => {
                storage.create_parents(&resolved, path)?;
                let content: SharedContent = Arc::new(RwLock::new(Content::new()));
                storage.nodes.insert(
                    resolved,
                    Node::new(
                        NodeKind::File(Arc::clone(&content)),
                        FileMode::file(mode.perm()),
                    ),
                );
                content
            }
            None => {
                return Err(FsError::NotFound {
                    path: path.to_path_buf(),
                });
            }
        };

        if flags.contains(OpenFlags::TRUNC) {
            let mut data = content.write().unwrap_or_else(PoisonError::into_inner);
            data.bytes.clear();
            data.modified = SystemTime::now();
        }
        Ok(Box::new(MemoryFile::new(path, content, flags)))
    }

    fn stat(&self, path: &Path) -> Result<FileInfo, FsError> {
        let storage = self.read();
        let resolved = storage.resolve(path, true)?;
        let node = storage.lookup(&resolved, path)?;
        Ok(node.info(base_name(path)))
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<(), FsError> {
        let mut storage = self.write();
        let source = storage.resolve(from, false)?;
        let dest = storage.resolve(to, false)?;

        let source_is_dir = storage.lookup(&source, from)?.is_dir();
        if source == dest {
            return Ok(());
        }
        if source == Path::new("/") || dest.starts_with(&source) {
            return Err(FsError::InvalidData {
                path: to.to_path_buf(),
                details: format!("cannot move {} into itself", from.display()),
            });
        }
        if let Some(existing) = storage.nodes.get(&dest) {
            match (existing.is_dir(), source_is_dir) {
                (true, _) if storage.has_children(&dest) => {
                    return Err(FsError::DirectoryNotEmpty {
                        path: to.to_path_buf(),
                    });
                }
                (true, false) => {
                    return Err(FsError::NotAFile {
                        path: to.to_path_buf(),
                    });
                }
                (false, true) => {
                    return Err(FsError::NotADirectory {
                        path: to.to_path_buf(),
                    });
                }
                _ => {}
            }
        }
        storage.create_parents(&dest, to)?;

        let moved: Vec<PathBuf> = storage
            .nodes
            .range::<Path, _>((Bound::Included(source.as_path()), Bound::Unbounded))
            .take_while(|(key, _)| key.starts_with(&source))
            .map(|(key, _)| key.clone())
            .collect();
        for key in moved {
            if let Some(node) = storage.nodes.remove(&key) {
                let suffix = key.strip_prefix(&source).unwrap_or(Path::new(""));
                let new_key = if suffix.as_os_str().is_empty() {
                    dest.clone()
                } else {
                    dest.join(suffix)
                };
                storage.nodes.insert(new_key, node);
            }
        }
        Ok(())
    }

    fn remove(&self, path: &Path) -> Result<(), FsError> {
        let mut storage = self.write();
        let resolved = storage.resolve(path, false)?;
        let node = storage.lookup(&resolved, path)?;

        if resolved == Path::new("/") {
            return Err(FsError::PermissionDenied {
                path: path.to_path_buf(),
                operation: "remove",
            });
        }
        if node.is_dir() && storage.has_children(&resolved) {
            return Err(FsError::DirectoryNotEmpty {
                path: path.to_path_buf(),
            });
        }
        storage.nodes.remove(&resolved);
        Ok(())
    }
}

impl TempFile for MemoryFs {
    fn temp_file(&self, dir: &Path, prefix: &str) -> Result<Box<dyn File>, FsError> {
        let dir = if dir.as_os_str().is_empty() {
            Path::new(DEFAULT_TEMP_DIR)
        } else {
            dir
        };
        loop {
            let n = self.shared.next_temp.fetch_add(1, Ordering::Relaxed);
            let candidate = dir.join(format!("{prefix}{n}"));
            match self.open_file(
                &candidate,
                OpenFlags::RDWR | OpenFlags::CREATE | OpenFlags::EXCL,
                FileMode::from_perm(0o600),
            ) {
                Err(FsError::AlreadyExists { .. }) => continue,
                other => return other,
            }
        }
    }
}

impl Dir for MemoryFs {
    fn read_dir(&self, path: &Path) -> Result<Vec<FileInfo>, FsError> {
        let storage = self.read();
        let resolved = storage.resolve(path, true)?;
        if !storage.lookup(&resolved, path)?.is_dir() {
            return Err(FsError::NotADirectory {
                path: path.to_path_buf(),
            });
        }
        Ok(storage.children(&resolved))
    }

    fn mkdir_all(&self, path: &Path, perm: FileMode) -> Result<(), FsError> {
        let mut storage = self.write();
        let resolved = storage.resolve(path, true)?;
        storage.create_dirs(&resolved, FileMode::dir(perm.perm()), path)
    }
}

impl Chroot for MemoryFs {
    fn chroot(&self, path: &Path) -> Result<Box<dyn Filesystem>, FsError> {
        Ok(Box::new(ChrootFs::new(self.clone(), absolute(path))))
    }

    fn root(&self) -> PathBuf {
        PathBuf::from("/")
    }
}

impl Symlink for MemoryFs {
    fn lstat(&self, path: &Path) -> Result<FileInfo, FsError> {
        let storage = self.read();
        let resolved = storage.resolve(path, false)?;
        let node = storage.lookup(&resolved, path)?;
        Ok(node.info(base_name(path)))
    }

    fn symlink(&self, target: &Path, link: &Path) -> Result<(), FsError> {
        let mut storage = self.write();
        let resolved = storage.resolve(link, false)?;
        if storage.nodes.contains_key(&resolved) {
            return Err(FsError::AlreadyExists {
                path: link.to_path_buf(),
                operation: "symlink",
            });
        }
        storage.create_parents(&resolved, link)?;
        storage.nodes.insert(
            resolved,
            Node::new(
                NodeKind::Symlink(target.to_path_buf()),
                FileMode::symlink(0o777),
            ),
        );
        Ok(())
    }

    fn readlink(&self, path: &Path) -> Result<PathBuf, FsError> {
        let storage = self.read();
        let resolved = storage.resolve(path, false)?;
        match &storage.lookup(&resolved, path)?.kind {
            NodeKind::Symlink(target) => Ok(target.clone()),
            _ => Err(FsError::InvalidData {
                path: path.to_path_buf(),
                details: "not a symlink".into(),
            }),
        }
    }
}

impl Change for MemoryFs {
    fn chmod(&self, path: &Path, mode: FileMode) -> Result<(), FsError> {
        let mut storage = self.write();
        let resolved = storage.resolve(path, true)?;
        let node = storage.lookup_mut(&resolved, path)?;
        node.mode = node.mode.with_perm(mode.perm());
        Ok(())
    }

    fn lchown(&self, path: &Path, uid: u32, gid: u32) -> Result<(), FsError> {
        self.set_owner(path, uid, gid, false)
    }

    fn chown(&self, path: &Path, uid: u32, gid: u32) -> Result<(), FsError> {
        self.set_owner(path, uid, gid, true)
    }

    fn chtimes(&self, path: &Path, atime: SystemTime, mtime: SystemTime) -> Result<(), FsError> {
        let mut storage = self.write();
        let resolved = storage.resolve(path, true)?;
        let node = storage.lookup_mut(&resolved, path)?;
        node.accessed = atime;
        node.modified = mtime;
        if let NodeKind::File(content) = &node.kind {
            content
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .modified = mtime;
        }
        Ok(())
    }
}

impl Filesystem for MemoryFs {
    fn capabilities(&self) -> Capability {
        Capability::WRITE
            | Capability::READ
            | Capability::READ_AND_WRITE
            | Capability::SEEK
            | Capability::TRUNCATE
    }

    fn as_symlink(&self) -> Option<&dyn Symlink> {
        Some(self)
    }

    fn as_change(&self) -> Option<&dyn Change> {
        Some(self)
    }
}
