//! Adapters for arbitrary `Read`/`Write` streams (sockets, pipes).
//!
//! These sinks and sources are not positionable: `position` returns `None`
//! and `write_at` fails with [`StreamError::Unsupported`]. Length fields
//! written through an [`IoSink`] stay at their "unknown" placeholder and the
//! decoder skips the close-time length check for those scopes.

use std::io::{ErrorKind, Read, Write};

use crate::error::{Result, StreamError};
use crate::traits::{ByteSink, ByteSource};

/// A non-positionable sink over any `Write` stream.
#[derive(Debug)]
pub struct IoSink<W> {
    inner: W,
}

impl<W: Write> IoSink<W> {
    /// Wrap a `Write` stream.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Consume the sink and return the inner stream.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> ByteSink for IoSink<W> {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        let mut offset = 0usize;
        while offset < bytes.len() {
            match self.inner.write(&bytes[offset..]) {
                Ok(0) => {
                    return Err(StreamError::Io(std::io::Error::new(
                        ErrorKind::WriteZero,
                        "stream accepted no bytes",
                    )))
                }
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(StreamError::Io(err)),
            }
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(StreamError::Io(err)),
            }
        }
    }

    fn position(&self) -> Option<u64> {
        None
    }

    fn write_at(&mut self, _offset: u64, _bytes: &[u8]) -> Result<()> {
        Err(StreamError::Unsupported {
            op: "positional writes",
        })
    }
}

/// A non-positionable source over any `Read` stream.
#[derive(Debug)]
pub struct IoSource<R> {
    inner: R,
}

impl<R: Read> IoSource<R> {
    /// Wrap a `Read` stream.
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Consume the source and return the inner stream.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> ByteSource for IoSource<R> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        loop {
            match self.inner.read(buf) {
                Ok(n) => return Ok(n),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(StreamError::Io(err)),
            }
        }
    }

    fn position(&self) -> Option<u64> {
        None
    }
}
