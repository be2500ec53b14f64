//! # Path Helpers
//!
//! Lexical path manipulation shared by the backends.
//!
//! ## Responsibility
//! - Normalize `.` and `..` components without touching the filesystem
//! - Join path segments the way [`Basic::join`](crate::Basic::join) does by default
//! - Detect paths that would escape a chroot
//!
//! None of these functions follow symlinks; backends that store symlinks
//! resolve them on top of [`clean`].

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

/// Lexically normalize a path.
///
/// - `.` components are dropped
/// - `..` removes the previous component; at the root of an absolute path it
///   is dropped, in a relative path it is kept
/// - an empty result becomes `.`
///
/// ```rust
/// use logfs::path::clean;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(clean(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
/// assert_eq!(clean(Path::new("/../x")), PathBuf::from("/x"));
/// assert_eq!(clean(Path::new("../x/..")), PathBuf::from(".."));
/// ```
pub fn clean(path: &Path) -> PathBuf {
    let absolute = path.has_root();
    let mut parts: Vec<&OsStr> = Vec::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(last) if *last != OsStr::new("..") => {
                    parts.pop();
                }
                _ if absolute => {}
                _ => parts.push(OsStr::new("..")),
            },
            Component::Normal(name) => parts.push(name),
        }
    }

    let mut cleaned = if absolute {
        PathBuf::from("/")
    } else {
        PathBuf::new()
    };
    for part in parts {
        cleaned.push(part);
    }
    if cleaned.as_os_str().is_empty() {
        cleaned.push(".");
    }
    cleaned
}

/// Join segments into one cleaned path, skipping empty segments.
///
/// Returns an empty path when every segment is empty.
///
/// ```rust
/// use logfs::path::join;
/// use std::path::PathBuf;
///
/// assert_eq!(join(&["a", "", "b/../c"]), PathBuf::from("a/c"));
/// assert_eq!(join(&["/", "tmp", "x"]), PathBuf::from("/tmp/x"));
/// assert_eq!(join(&["", ""]), PathBuf::new());
/// ```
pub fn join(parts: &[&str]) -> PathBuf {
    let mut joined = PathBuf::new();
    for part in parts.iter().filter(|p| !p.is_empty()) {
        joined.push(part);
    }
    if joined.as_os_str().is_empty() {
        return joined;
    }
    clean(&joined)
}

/// Absolute, cleaned form of `path`; relative paths are taken from `/`.
pub fn absolute(path: &Path) -> PathBuf {
    clean(&Path::new("/").join(path))
}

/// Returns `true` when a path, interpreted relative to a chroot base,
/// would leave that base.
///
/// Absolute paths never cross: inside a chroot they are rooted at the base.
pub fn is_crossing_boundary(path: &Path) -> bool {
    matches!(clean(path).components().next(), Some(Component::ParentDir))
}

/// Cleaned path with the root removed, suitable for appending to a base.
///
/// The root itself (and `.`) becomes the empty path.
pub fn relative(path: &Path) -> PathBuf {
    let cleaned = clean(path);
    let stripped = cleaned.strip_prefix("/").unwrap_or(&cleaned);
    if stripped == Path::new(".") {
        PathBuf::new()
    } else {
        stripped.to_path_buf()
    }
}

/// Final component of `path` as a string; `/` for the root.
pub fn base_name(path: &Path) -> String {
    let cleaned = clean(path);
    match cleaned.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => cleaned.to_string_lossy().into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_handles_dots() {
        assert_eq!(clean(Path::new("a/./b/./c")), PathBuf::from("a/b/c"));
        assert_eq!(clean(Path::new("a/b/../../c")), PathBuf::from("c"));
        assert_eq!(clean(Path::new("/a/b/..")), PathBuf::from("/a"));
    }

    #[test]
    fn clean_never_escapes_root() {
        assert_eq!(clean(Path::new("/..")), PathBuf::from("/"));
        assert_eq!(clean(Path::new("/../../etc")), PathBuf::from("/etc"));
    }

    #[test]
    fn clean_keeps_leading_parent_in_relative_path() {
        assert_eq!(clean(Path::new("../../a")), PathBuf::from("../../a"));
        assert_eq!(clean(Path::new("a/../../b")), PathBuf::from("../b"));
    }

    #[test]
    fn clean_empty_becomes_dot() {
        assert_eq!(clean(Path::new("")), PathBuf::from("."));
        assert_eq!(clean(Path::new("a/..")), PathBuf::from("."));
    }

    #[test]
    fn join_skips_empty_segments() {
        assert_eq!(join(&["", "a", "", "b"]), PathBuf::from("a/b"));
        assert_eq!(join(&[]), PathBuf::new());
    }

    #[test]
    fn join_absolute_later_segment_wins() {
        // Mirrors PathBuf::push semantics.
        assert_eq!(join(&["a", "/b"]), PathBuf::from("/b"));
    }

    #[test]
    fn absolute_roots_relative_paths() {
        assert_eq!(absolute(Path::new("a/b")), PathBuf::from("/a/b"));
        assert_eq!(absolute(Path::new("")), PathBuf::from("/"));
        assert_eq!(absolute(Path::new("/x/../y")), PathBuf::from("/y"));
    }

    #[test]
    fn crossing_boundary_detection() {
        assert!(is_crossing_boundary(Path::new("..")));
        assert!(is_crossing_boundary(Path::new("a/../../b")));
        assert!(!is_crossing_boundary(Path::new("a/../b")));
        assert!(!is_crossing_boundary(Path::new("/../b")));
        assert!(!is_crossing_boundary(Path::new("..a")));
    }

    #[test]
    fn relative_strips_root() {
        assert_eq!(relative(Path::new("/a/b")), PathBuf::from("a/b"));
        assert_eq!(relative(Path::new("/")), PathBuf::new());
        assert_eq!(relative(Path::new(".")), PathBuf::new());
    }

    #[test]
    fn base_name_of_paths() {
        assert_eq!(base_name(Path::new("/a/b.txt")), "b.txt");
        assert_eq!(base_name(Path::new("b.txt")), "b.txt");
        assert_eq!(base_name(Path::new("/")), "/");
    }
}
