//! File-backed sinks and sources.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::traits::{ByteSink, ByteSource};

/// A positionable byte sink writing to a file.
#[derive(Debug)]
pub struct FileSink {
    file: File,
}

impl FileSink {
    /// Create (or truncate) a file and wrap it as a sink.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)?;
        debug!(path = %path.display(), "opened file sink");
        Ok(Self { file })
    }

    /// Wrap an already open file. Writing starts at the file's
    /// current offset.
    pub fn from_file(file: File) -> Self {
        Self { file }
    }

    /// Consume the sink and return the underlying file.
    pub fn into_inner(self) -> File {
        self.file
    }
}

impl ByteSink for FileSink {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.file.write_all(bytes)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.file.flush()?;
        Ok(())
    }

    fn position(&self) -> Option<u64> {
        (&self.file).stream_position().ok()
    }

    fn write_at(&mut self, offset: u64, bytes: &[u8]) -> Result<()> {
        let saved = self.file.stream_position()?;
        self.file.seek(SeekFrom::Start(offset))?;
        self.file.write_all(bytes)?;
        self.file.seek(SeekFrom::Start(saved))?;
        Ok(())
    }
}

/// A positionable byte source reading from a file.
#[derive(Debug)]
pub struct FileSource {
    file: File,
}

impl FileSource {
    /// Open a file and wrap it as a source.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        debug!(path = %path.display(), "opened file source");
        Ok(Self { file })
    }

    /// Wrap an already open file. Reading starts at the file's
    /// current offset.
    pub fn from_file(file: File) -> Self {
        Self { file }
    }

    /// Total length of the underlying file, if known.
    pub fn len(&self) -> Option<u64> {
        self.file.metadata().ok().map(|m| m.len())
    }

    /// Whether the underlying file is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// Consume the source and return the underlying file.
    pub fn into_inner(self) -> File {
        self.file
    }
}

impl ByteSource for FileSource {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        Ok(self.file.read(buf)?)
    }

    fn position(&self) -> Option<u64> {
        (&self.file).stream_position().ok()
    }
}
