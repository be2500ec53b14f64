//! File handles handed out by [`MemoryFs`](super::MemoryFs).

use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::SystemTime;

use crate::{File, FsError, OpenFlags};

/// Bytes of one file, shared by every handle open on it.
#[derive(Debug)]
pub(super) struct Content {
    pub(super) bytes: Vec<u8>,
    pub(super) modified: SystemTime,
}

impl Content {
    pub(super) fn new() -> Self {
        Self {
            bytes: Vec::new(),
            modified: SystemTime::now(),
        }
    }
}

pub(super) type SharedContent = Arc<RwLock<Content>>;

/// An open in-memory file: shared content plus a private cursor.
#[derive(Debug)]
pub(super) struct MemoryFile {
    name: PathBuf,
    content: SharedContent,
    position: u64,
    flags: OpenFlags,
}

impl MemoryFile {
    pub(super) fn new(name: &Path, content: SharedContent, flags: OpenFlags) -> Self {
        Self {
            name: name.to_path_buf(),
            content,
            position: 0,
            flags,
        }
    }

    fn denied(&self, operation: &'static str) -> io::Error {
        FsError::BadDescriptor {
            path: self.name.clone(),
            operation,
        }
        .into()
    }
}

impl Read for MemoryFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if !self.flags.is_readable() {
            return Err(self.denied("read"));
        }
        let content = self.content.read().unwrap_or_else(PoisonError::into_inner);
        let start = usize::try_from(self.position).unwrap_or(usize::MAX);
        if start >= content.bytes.len() {
            return Ok(0);
        }
        let available = &content.bytes[start..];
        let n = available.len().min(buf.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.position += n as u64;
        Ok(n)
    }
}

impl Write for MemoryFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !self.flags.is_writable() {
            return Err(self.denied("write"));
        }
        let mut content = self.content.write().unwrap_or_else(PoisonError::into_inner);
        if self.flags.contains(OpenFlags::APPEND) {
            self.position = content.bytes.len() as u64;
        }
        let start = usize::try_from(self.position)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "offset too large"))?;
        let end = start.checked_add(buf.len()).ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "write past the maximum file size")
        })?;
        if content.bytes.len() < end {
            content.bytes.resize(end, 0);
        }
        content.bytes[start..end].copy_from_slice(buf);
        content.modified = SystemTime::now();
        self.position = end as u64;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Seek for MemoryFile {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let len = self
            .content
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .bytes
            .len() as u64;
        let target = match pos {
            SeekFrom::Start(offset) => Some(offset),
            SeekFrom::End(delta) => len.checked_add_signed(delta),
            SeekFrom::Current(delta) => self.position.checked_add_signed(delta),
        };
        match target {
            Some(position) => {
                self.position = position;
                Ok(position)
            }
            None => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "invalid seek to a negative or overflowing position",
            )),
        }
    }
}

impl File for MemoryFile {
    fn name(&self) -> &Path {
        &self.name
    }

    fn truncate(&mut self, size: u64) -> Result<(), FsError> {
        if !self.flags.is_writable() {
            return Err(FsError::BadDescriptor {
                path: self.name.clone(),
                operation: "truncate",
            });
        }
        let size = usize::try_from(size).map_err(|_| FsError::InvalidData {
            path: self.name.clone(),
            details: format!("size {size} does not fit in memory"),
        })?;
        let mut content = self.content.write().unwrap_or_else(PoisonError::into_inner);
        content.bytes.resize(size, 0);
        content.modified = SystemTime::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(flags: OpenFlags) -> (SharedContent, MemoryFile) {
        let content = Arc::new(RwLock::new(Content::new()));
        let file = MemoryFile::new(Path::new("/f"), Arc::clone(&content), flags);
        (content, file)
    }

    #[test]
    fn write_then_read_back() {
        let (_, mut file) = open(OpenFlags::RDWR);
        file.write_all(b"hello world").unwrap();
        file.seek(SeekFrom::Start(6)).unwrap();

        let mut out = String::new();
        file.read_to_string(&mut out).unwrap();
        assert_eq!(out, "world");
    }

    #[test]
    fn write_past_end_fills_with_zeros() {
        let (content, mut file) = open(OpenFlags::WRONLY);
        file.seek(SeekFrom::Start(3)).unwrap();
        file.write_all(b"x").unwrap();
        assert_eq!(content.read().unwrap().bytes, b"\0\0\0x");
    }

    #[test]
    fn append_always_writes_at_end() {
        let (content, mut file) = open(OpenFlags::WRONLY | OpenFlags::APPEND);
        content.write().unwrap().bytes = b"abc".to_vec();
        file.seek(SeekFrom::Start(0)).unwrap();
        file.write_all(b"d").unwrap();
        assert_eq!(content.read().unwrap().bytes, b"abcd");
    }

    #[test]
    fn read_only_handle_rejects_writes() {
        let (_, mut file) = open(OpenFlags::RDONLY);
        assert!(file.write(b"x").is_err());
        assert!(matches!(
            file.truncate(0),
            Err(FsError::BadDescriptor { .. })
        ));
    }

    #[test]
    fn write_only_handle_rejects_reads() {
        let (_, mut file) = open(OpenFlags::WRONLY);
        let mut buf = [0u8; 4];
        assert!(file.read(&mut buf).is_err());
    }

    #[test]
    fn seek_before_start_fails() {
        let (_, mut file) = open(OpenFlags::RDONLY);
        assert!(file.seek(SeekFrom::Current(-1)).is_err());
        assert_eq!(file.seek(SeekFrom::End(0)).unwrap(), 0);
    }

    #[test]
    fn write_at_maximum_offset_fails_cleanly() {
        let (content, mut file) = open(OpenFlags::WRONLY);
        file.seek(SeekFrom::Start(u64::MAX)).unwrap();

        let err = file.write(b"x").unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(content.read().unwrap().bytes.is_empty());
    }

    #[test]
    fn truncate_resizes_shared_content() {
        let (content, mut file) = open(OpenFlags::RDWR);
        file.write_all(b"abcdef").unwrap();
        file.truncate(2).unwrap();
        assert_eq!(content.read().unwrap().bytes, b"ab");
        assert_eq!(file.name(), Path::new("/f"));
    }
}
