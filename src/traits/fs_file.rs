//! Open file handles.

use std::io::{Read, Seek, Write};
use std::path::Path;

use crate::FsError;

/// An open file returned by [`Basic::open_file`](super::Basic::open_file) and friends.
///
/// Handles are plain `std::io` streams plus a name and truncation. Access mode
/// violations (writing to a read-only handle and so on) surface as
/// `std::io::Error`s from the stream methods.
///
/// # Object Safety
///
/// This trait is object-safe; backends hand out `Box<dyn File>`.
pub trait File: Read + Write + Seek + Send {
    /// Path the file was opened with, as seen by the filesystem that opened it.
    fn name(&self) -> &Path;

    /// Truncate or extend the file to `size` bytes.
    ///
    /// # Errors
    ///
    /// - [`FsError::BadDescriptor`] if the handle is not writable
    fn truncate(&mut self, size: u64) -> Result<(), FsError>;
}
