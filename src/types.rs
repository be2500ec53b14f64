//! Core types shared by every logfs filesystem.

use std::fmt;
use std::time::SystemTime;

use bitflags::bitflags;

/// Unix-style file mode: type bits plus permission bits.
///
/// Stored the way `st_mode` is, so a regular file with `rw-r--r--` is
/// `0o100644` and a directory with `rwxr-xr-x` is `0o040755`.
///
/// Formats with [`fmt::Octal`], so `format!("{:#o}", mode)` yields `0o100644`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileMode(u32);

impl FileMode {
    /// Mask selecting the type bits.
    pub const TYPE_MASK: u32 = 0o170000;
    /// Type bits of a directory.
    pub const TYPE_DIR: u32 = 0o040000;
    /// Type bits of a symbolic link.
    pub const TYPE_SYMLINK: u32 = 0o120000;
    /// Type bits of a regular file.
    pub const TYPE_REGULAR: u32 = 0o100000;
    /// Mask selecting the permission bits (including setuid/setgid/sticky).
    pub const PERM_MASK: u32 = 0o7777;

    /// Wrap raw mode bits unchanged.
    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Permission-only mode, as passed to `open_file`, `mkdir_all` or `chmod`.
    #[inline]
    pub const fn from_perm(perm: u32) -> Self {
        Self(perm & Self::PERM_MASK)
    }

    /// Regular file with the given permissions.
    #[inline]
    pub const fn file(perm: u32) -> Self {
        Self(Self::TYPE_REGULAR | (perm & Self::PERM_MASK))
    }

    /// Directory with the given permissions.
    #[inline]
    pub const fn dir(perm: u32) -> Self {
        Self(Self::TYPE_DIR | (perm & Self::PERM_MASK))
    }

    /// Symbolic link with the given permissions.
    #[inline]
    pub const fn symlink(perm: u32) -> Self {
        Self(Self::TYPE_SYMLINK | (perm & Self::PERM_MASK))
    }

    /// Raw mode bits.
    #[inline]
    pub const fn bits(&self) -> u32 {
        self.0
    }

    /// Permission bits only.
    #[inline]
    pub const fn perm(&self) -> u32 {
        self.0 & Self::PERM_MASK
    }

    /// Same type bits, permissions taken from `perm`.
    #[inline]
    pub const fn with_perm(self, perm: u32) -> Self {
        Self((self.0 & !Self::PERM_MASK) | (perm & Self::PERM_MASK))
    }

    /// Returns `true` if the type bits mark a directory.
    #[inline]
    pub const fn is_dir(&self) -> bool {
        self.0 & Self::TYPE_MASK == Self::TYPE_DIR
    }

    /// Returns `true` if the type bits mark a symbolic link.
    #[inline]
    pub const fn is_symlink(&self) -> bool {
        self.0 & Self::TYPE_MASK == Self::TYPE_SYMLINK
    }

    /// Returns `true` for regular files (or a mode with no type bits).
    #[inline]
    pub const fn is_file(&self) -> bool {
        let kind = self.0 & Self::TYPE_MASK;
        kind == Self::TYPE_REGULAR || kind == 0
    }
}

impl From<u32> for FileMode {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

impl fmt::Octal for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Octal::fmt(&self.0, f)
    }
}

/// Metadata describing one filesystem entry.
///
/// Returned by `stat`, `lstat` and every item of `read_dir`. The [`Display`]
/// impl renders the short descriptor used in log lines:
///
/// ```rust
/// use logfs::{FileInfo, FileMode};
///
/// let info = FileInfo::new("notes.txt", 12, FileMode::file(0o644));
/// assert_eq!(info.to_string(), r#"{name: "notes.txt", mode: 0o100644, dir: false}"#);
/// ```
///
/// [`Display`]: fmt::Display
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileInfo {
    /// Base name of the entry.
    pub name: String,
    /// Size in bytes (the target length for symlinks).
    pub size: u64,
    /// Type and permission bits.
    pub mode: FileMode,
    /// Last modification time.
    #[cfg_attr(feature = "serde", serde(with = "system_time_serde"))]
    pub modified: SystemTime,
}

impl FileInfo {
    /// Build an entry with the modification time set to the Unix epoch.
    pub fn new(name: impl Into<String>, size: u64, mode: FileMode) -> Self {
        Self {
            name: name.into(),
            size,
            mode,
            modified: SystemTime::UNIX_EPOCH,
        }
    }

    /// Returns `true` if this entry is a directory.
    #[inline]
    pub fn is_dir(&self) -> bool {
        self.mode.is_dir()
    }

    /// Returns `true` if this entry is a symbolic link.
    #[inline]
    pub fn is_symlink(&self) -> bool {
        self.mode.is_symlink()
    }

    /// Returns `true` if this entry is a regular file.
    #[inline]
    pub fn is_file(&self) -> bool {
        self.mode.is_file()
    }
}

impl fmt::Display for FileInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{name: {:?}, mode: {:#o}, dir: {}}}",
            self.name,
            self.mode,
            self.is_dir()
        )
    }
}

bitflags! {
    /// Flags for `open_file`, using the POSIX `open(2)` values.
    ///
    /// Read-only access is the empty set, see [`OpenFlags::RDONLY`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct OpenFlags: i32 {
        /// Open for writing only.
        const WRONLY = 0o1;
        /// Open for reading and writing.
        const RDWR = 0o2;
        /// Create the file if it does not exist.
        const CREATE = 0o100;
        /// With `CREATE`, fail if the file already exists.
        const EXCL = 0o200;
        /// Truncate the file to zero length on open.
        const TRUNC = 0o1000;
        /// Writes always go to the end of the file.
        const APPEND = 0o2000;
    }
}

impl OpenFlags {
    /// Open for reading only.
    pub const RDONLY: Self = Self::empty();

    /// Returns `true` if the handle may be read from.
    #[inline]
    pub fn is_readable(&self) -> bool {
        !self.contains(Self::WRONLY)
    }

    /// Returns `true` if the handle may be written to.
    #[inline]
    pub fn is_writable(&self) -> bool {
        self.intersects(Self::WRONLY | Self::RDWR)
    }
}

impl Default for OpenFlags {
    fn default() -> Self {
        Self::RDONLY
    }
}

bitflags! {
    /// Optional features a filesystem implementation supports.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Capability: u32 {
        /// Files can be written.
        const WRITE = 1;
        /// Files can be read.
        const READ = 1 << 1;
        /// Files can be open for reading and writing at the same time.
        const READ_AND_WRITE = 1 << 2;
        /// Files can be seeked.
        const SEEK = 1 << 3;
        /// Files can be truncated.
        const TRUNCATE = 1 << 4;
        /// Files can be locked.
        const LOCK = 1 << 5;
    }
}

impl Capability {
    /// Capabilities assumed for filesystems that do not report their own.
    pub const DEFAULT: Self = Self::all();
}

impl Default for Capability {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Serde support for SystemTime (when serde feature is enabled).
#[cfg(feature = "serde")]
mod system_time_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    pub fn serialize<S>(time: &SystemTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let duration = time.duration_since(UNIX_EPOCH).unwrap_or(Duration::ZERO);
        (duration.as_secs(), duration.subsec_nanos()).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SystemTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (secs, nanos): (u64, u32) = Deserialize::deserialize(deserializer)?;
        Ok(UNIX_EPOCH + Duration::new(secs, nanos))
    }
}
