//! Scope tree decoder.
//!
//! Mirrors the writer's call sequence exactly, while additionally checking
//! structural integrity (declared vs. consumed lengths, header markers) and
//! byte-swapping values produced on an opposite-endian machine.

use bytes::{Buf, BytesMut};
use scopeframe_stream::ByteSource;
use tracing::trace;

use crate::error::{CodecError, Result};
use crate::types::Scalar;
use crate::wire::{self, ScopeHeader, LENGTH_UNKNOWN};

const INITIAL_BUFFER_CAPACITY: usize = 8 * 1024;
const READ_CHUNK_SIZE: usize = 8 * 1024;

#[derive(Debug)]
struct ReadFrame {
    /// Type name from the header, empty for lightweight scopes. Carried so
    /// close-time diagnostics can say which scope failed.
    name: String,
    /// Bytes consumed before this scope's header started.
    start: u64,
    /// Total length declared in the header, [`LENGTH_UNKNOWN`] if the
    /// producer never backpatched it.
    declared: u64,
    /// Whether values in this scope need byte-swapping.
    swap: bool,
}

/// Reconstructs scope trees from a byte source.
///
/// The reader borrows the source for its whole lifetime; the source is owned
/// by the caller and must outlive the reader. Partial reads are handled
/// internally — callers always see complete headers and values.
pub struct ScopeReader<'a, S: ByteSource> {
    source: &'a mut S,
    /// Source offset at construction, `None` on non-positionable sources.
    base: Option<u64>,
    buf: BytesMut,
    consumed: u64,
    frames: Vec<ReadFrame>,
    peeked: Option<ScopeHeader>,
}

impl<'a, S: ByteSource> ScopeReader<'a, S> {
    /// Bind a reader to a source. Decoding starts at the source's current
    /// offset.
    pub fn new(source: &'a mut S) -> Self {
        let base = source.position();
        Self {
            source,
            base,
            buf: BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY),
            consumed: 0,
            frames: Vec::new(),
            peeked: None,
        }
    }

    /// Open the next scope: read and validate its header, push a cursor
    /// frame, and return the header.
    ///
    /// When `expected` is non-empty, the decoded type name must match or the
    /// call fails with [`CodecError::TypeMismatch`]. A header whose
    /// byte-order tag differs from the local machine arms per-value
    /// conversion for everything read inside this scope.
    pub fn open_scope(&mut self, expected: Option<&str>) -> Result<ScopeHeader> {
        let header = self.next_header()?;

        if let Some(expected) = expected.filter(|e| !e.is_empty()) {
            if header.name.as_deref() != Some(expected) {
                return Err(CodecError::TypeMismatch {
                    expected: expected.to_string(),
                    found: header.name.clone().unwrap_or_default(),
                });
            }
        }

        let start = self.consumed;
        self.advance(header.wire_size());
        self.peeked = None;
        self.frames.push(ReadFrame {
            name: header.name.clone().unwrap_or_default(),
            start,
            declared: header.length,
            swap: header.needs_conversion(),
        });
        trace!(
            name = header.name.as_deref().unwrap_or(""),
            version = header.version,
            depth = self.frames.len(),
            "opened scope"
        );
        Ok(header)
    }

    /// Close the innermost scope, checking the bytes consumed since its open
    /// against the declared length. Mismatch means corruption or version
    /// skew and fails with [`CodecError::StructuralMismatch`]; equality
    /// returns the scope's total size.
    ///
    /// Scopes whose producer could not backpatch (non-seekable sink) carry
    /// an unknown length and skip the check.
    pub fn close_scope(&mut self) -> Result<u64> {
        let frame = self
            .frames
            .pop()
            .ok_or(CodecError::UnbracketedAccess("scope close"))?;
        let actual = self.consumed - frame.start;
        if frame.declared != LENGTH_UNKNOWN && frame.declared != actual {
            return Err(CodecError::StructuralMismatch {
                scope: frame.name,
                declared: frame.declared,
                actual,
            });
        }
        trace!(depth = self.frames.len(), total = actual, "closed scope");
        Ok(actual)
    }

    /// Read the next scope's header without consuming it, so heterogeneous
    /// children can be dispatched by type before committing to a decoder.
    ///
    /// Idempotent: repeated peeks without an intervening [`Self::open_scope`]
    /// return the identical cached header.
    pub fn peek_scope(&mut self) -> Result<ScopeHeader> {
        if let Some(header) = &self.peeked {
            return Ok(header.clone());
        }
        let header = self.next_header()?;
        self.peeked = Some(header.clone());
        Ok(header)
    }

    /// Read one primitive value, byte-swapping if this scope's producer ran
    /// on an opposite-endian machine.
    pub fn read_scalar<T: Scalar>(&mut self) -> Result<T> {
        self.require_scope("scalar read")?;
        self.fill(T::SIZE)?;
        let value = T::get(&self.buf[..T::SIZE], self.swap());
        self.advance(T::SIZE);
        Ok(value)
    }

    /// Read `count` contiguous elements written by `write_slice`.
    pub fn read_slice<T: Scalar>(&mut self, count: usize) -> Result<Vec<T>> {
        self.require_scope("array read")?;
        let total = count
            .checked_mul(T::SIZE)
            .ok_or(CodecError::Desync("array byte length overflows"))?;
        self.fill(total)?;

        let swap = self.swap();
        let mut values = Vec::with_capacity(count);
        for chunk in self.buf[..total].chunks_exact(T::SIZE) {
            values.push(T::get(chunk, swap));
        }
        self.advance(total);
        Ok(values)
    }

    /// Read a self-describing sequence written by `write_vector`.
    pub fn read_vector<T: Scalar>(&mut self) -> Result<Vec<T>> {
        let count = self.read_count()?;
        self.read_slice(count)
    }

    /// Read a bit-packed boolean sequence written by `write_bool_vector`.
    pub fn read_bool_vector(&mut self) -> Result<Vec<bool>> {
        let count = self.read_count()?;
        let nbytes = count.div_ceil(8);
        self.fill(nbytes)?;

        let mut values = Vec::with_capacity(count);
        for i in 0..count {
            let byte = self.buf[i / 8];
            values.push((byte >> (i % 8)) & 1 != 0);
        }
        self.advance(nbytes);
        Ok(values)
    }

    /// Read a length-prefixed UTF-8 string written by `write_string`.
    pub fn read_string(&mut self) -> Result<String> {
        let len = self.read_count()?;
        self.fill(len)?;
        let text = std::str::from_utf8(&self.buf[..len])
            .map_err(|_| CodecError::InvalidString("string payload"))?
            .to_string();
        self.advance(len);
        Ok(text)
    }

    /// Skip over `nbytes` of reserved space, returning the absolute offset
    /// where the region begins. Fails with [`CodecError::Unsupported`] on
    /// non-positionable sources.
    pub fn skip_space(&mut self, nbytes: usize) -> Result<u64> {
        let offset = self
            .position()
            .ok_or(CodecError::Unsupported("space skipping"))?;
        self.discard(nbytes)?;
        Ok(offset)
    }

    /// Consume pad bytes until the source offset is a multiple of `n`;
    /// returns the pad length. Fails with [`CodecError::Unsupported`] on
    /// non-positionable sources.
    pub fn align(&mut self, n: usize) -> Result<usize> {
        if n <= 1 {
            return Ok(0);
        }
        let position = self.position().ok_or(CodecError::Unsupported("alignment"))?;
        let pad = ((n as u64 - position % n as u64) % n as u64) as usize;
        self.discard(pad)?;
        Ok(pad)
    }

    /// Absolute source offset, `None` on non-positionable sources.
    pub fn position(&self) -> Option<u64> {
        self.base.map(|base| base + self.consumed)
    }

    /// Bytes consumed since construction (or the last [`Self::clear`]).
    pub fn bytes_consumed(&self) -> u64 {
        self.consumed
    }

    /// Current scope nesting depth.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Reset bracketing state: drop open frames and the peek cache, and
    /// restart byte accounting at the current logical offset. Read-ahead
    /// bytes stay buffered, so no source data is lost.
    pub fn clear(&mut self) {
        self.frames.clear();
        self.peeked = None;
        self.base = self.position();
        self.consumed = 0;
    }

    /// Read a wire count field. Counts are u64 on the wire; one that does
    /// not fit the local address space cannot be a real sequence length.
    fn read_count(&mut self) -> Result<usize> {
        let count = self.read_scalar::<u64>()?;
        usize::try_from(count).map_err(|_| CodecError::Desync("count exceeds address space"))
    }

    fn swap(&self) -> bool {
        self.frames.last().is_some_and(|frame| frame.swap)
    }

    fn require_scope(&self, op: &'static str) -> Result<()> {
        if self.frames.is_empty() {
            return Err(CodecError::UnbracketedAccess(op));
        }
        Ok(())
    }

    /// Decode the next header from the buffer without consuming it,
    /// pulling more bytes from the source as needed.
    fn next_header(&mut self) -> Result<ScopeHeader> {
        loop {
            if let Some(header) = wire::decode_header(&self.buf)? {
                return Ok(header);
            }
            self.fill(self.buf.len() + 1)?;
        }
    }

    /// Ensure at least `need` bytes are buffered.
    fn fill(&mut self, need: usize) -> Result<()> {
        while self.buf.len() < need {
            let mut chunk = [0u8; READ_CHUNK_SIZE];
            let read = self.source.read(&mut chunk)?;
            if read == 0 {
                return Err(CodecError::Truncated);
            }
            self.buf.extend_from_slice(&chunk[..read]);
        }
        Ok(())
    }

    fn advance(&mut self, n: usize) {
        self.buf.advance(n);
        self.consumed += n as u64;
    }

    fn discard(&mut self, nbytes: usize) -> Result<()> {
        let mut remaining = nbytes;
        while remaining > 0 {
            if self.buf.is_empty() {
                self.fill(1)?;
            }
            let take = self.buf.len().min(remaining);
            self.advance(take);
            remaining -= take;
        }
        Ok(())
    }
}
