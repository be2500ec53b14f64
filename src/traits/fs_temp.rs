//! Temporary file creation.

use std::path::Path;

use crate::{File, FsError};

/// Creation of uniquely named temporary files.
///
/// The file is not removed automatically; callers remove it when done.
pub trait TempFile: Send + Sync {
    /// Create a new file in `dir` whose name starts with `prefix`, opened for
    /// reading and writing.
    ///
    /// An empty `dir` selects the filesystem's default temporary directory.
    fn temp_file(&self, dir: &Path, prefix: &str) -> Result<Box<dyn File>, FsError>;
}
