//! In-memory sinks and sources.
//!
//! `MemorySink` is the workhorse for building blobs destined for a socket:
//! encode into memory (fully positionable, so length backpatching works),
//! then ship the finished bytes over any transport in one write.

use bytes::Bytes;

use crate::error::{Result, StreamError};
use crate::traits::{ByteSink, ByteSource};

/// A growable, positionable byte sink backed by a `Vec<u8>`.
#[derive(Debug, Default)]
pub struct MemorySink {
    buf: Vec<u8>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty sink with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// The bytes written so far.
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether anything has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consume the sink and return the written bytes.
    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}

impl ByteSink for MemorySink {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.buf.extend_from_slice(bytes);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn position(&self) -> Option<u64> {
        Some(self.buf.len() as u64)
    }

    fn write_at(&mut self, offset: u64, bytes: &[u8]) -> Result<()> {
        let start = offset as usize;
        let end = start.checked_add(bytes.len());
        match end {
            Some(end) if end <= self.buf.len() => {
                self.buf[start..end].copy_from_slice(bytes);
                Ok(())
            }
            _ => Err(StreamError::OutOfBounds {
                offset,
                len: bytes.len(),
                size: self.buf.len() as u64,
            }),
        }
    }
}

/// A positionable byte source over an owned byte buffer.
#[derive(Debug)]
pub struct MemorySource {
    data: Bytes,
    pos: usize,
}

impl MemorySource {
    /// Create a source over the given bytes.
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            pos: 0,
        }
    }

    /// Total number of bytes in the source.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the source holds no bytes at all.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes not yet read.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }
}

impl ByteSource for MemorySource {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let n = self.remaining().min(buf.len());
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }

    fn position(&self) -> Option<u64> {
        Some(self.pos as u64)
    }
}
