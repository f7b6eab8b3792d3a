//! Scope tree encoder.

use bytes::BytesMut;
use scopeframe_stream::{ByteSink, StreamError};
use tracing::trace;

use crate::error::{CodecError, Result};
use crate::types::Scalar;
use crate::wire::{self, LENGTH_OFFSET};

const SCRATCH_CAPACITY: usize = 256;
const FILL_CHUNK: usize = 8 * 1024;
const ZEROS: [u8; FILL_CHUNK] = [0u8; FILL_CHUNK];

/// Handle to an open scope, consumed by the matching [`ScopeWriter::close_scope`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "an open scope must be closed to backpatch its length"]
pub struct ScopeId(u32);

#[derive(Debug)]
struct WriteFrame {
    id: ScopeId,
    /// Bytes written before this scope's header started.
    start: u64,
}

/// Serializes scalars, arrays, vectors and nested scopes into a byte sink.
///
/// The writer borrows the sink for its whole lifetime; the sink is owned by
/// the caller and must outlive the writer. All values go out in the local
/// machine's native byte order — cross-architecture conversion is entirely
/// the decoder's job.
///
/// On positionable sinks every `close_scope` backpatches the scope's length
/// field; on non-positionable sinks (sockets) lengths stay at the "unknown"
/// placeholder and decoders skip the close-time length check.
pub struct ScopeWriter<'a, S: ByteSink> {
    sink: &'a mut S,
    /// Sink offset at construction, `None` on non-positionable sinks.
    base: Option<u64>,
    written: u64,
    frames: Vec<WriteFrame>,
    next_id: u32,
    scratch: BytesMut,
}

impl<'a, S: ByteSink> ScopeWriter<'a, S> {
    /// Bind a writer to a sink. Encoding starts at the sink's current offset.
    pub fn new(sink: &'a mut S) -> Self {
        let base = sink.position();
        Self {
            sink,
            base,
            written: 0,
            frames: Vec::new(),
            next_id: 0,
            scratch: BytesMut::with_capacity(SCRATCH_CAPACITY),
        }
    }

    /// Open a scope: write its header (length field left as a placeholder)
    /// and push a cursor frame.
    ///
    /// `name` of `None` (or `""`) requests lightweight framing.
    pub fn open_scope(&mut self, name: Option<&str>, version: i32) -> Result<ScopeId> {
        let start = self.written;
        self.scratch.clear();
        wire::encode_header(name.filter(|n| !n.is_empty()), version, &mut self.scratch);
        self.emit_scratch()?;

        let id = ScopeId(self.next_id);
        self.next_id += 1;
        self.frames.push(WriteFrame { id, start });
        trace!(
            name = name.unwrap_or(""),
            version,
            depth = self.frames.len(),
            "opened scope"
        );
        Ok(id)
    }

    /// Close the innermost scope: compute the bytes written since its open
    /// (nested scopes included), backpatch the length field, and return the
    /// total.
    ///
    /// # Panics
    ///
    /// Panics when `id` is not the innermost open scope — closing out of
    /// LIFO order is a caller bug that would misframe everything after it.
    pub fn close_scope(&mut self, id: ScopeId) -> Result<u64> {
        let frame = self
            .frames
            .pop()
            .unwrap_or_else(|| panic!("close_scope({id:?}) with no open scope"));
        assert_eq!(
            frame.id, id,
            "scope {id:?} closed out of order (innermost is {:?})",
            frame.id
        );

        let total = self.written - frame.start;
        if let Some(base) = self.base {
            let offset = base + frame.start + LENGTH_OFFSET as u64;
            match self.sink.write_at(offset, &total.to_ne_bytes()) {
                Ok(()) => {}
                // Length stays "unknown"; the decoder tolerates that.
                Err(StreamError::Unsupported { .. }) => {}
                Err(err) => return Err(err.into()),
            }
        }
        trace!(depth = self.frames.len(), total, "closed scope");
        Ok(total)
    }

    /// Write one primitive value.
    pub fn write_scalar<T: Scalar>(&mut self, value: T) -> Result<()> {
        self.require_scope("scalar write")?;
        self.scratch.clear();
        value.put(&mut self.scratch);
        self.emit_scratch()
    }

    /// Write contiguous elements with no count field; the reader supplies
    /// the count out of band.
    pub fn write_slice<T: Scalar>(&mut self, values: &[T]) -> Result<()> {
        self.require_scope("array write")?;
        self.scratch.clear();
        self.scratch.reserve(values.len() * T::SIZE);
        for value in values {
            value.put(&mut self.scratch);
        }
        self.emit_scratch()
    }

    /// Write a self-describing sequence: u64 element count, then elements.
    pub fn write_vector<T: Scalar>(&mut self, values: &[T]) -> Result<()> {
        self.write_scalar(values.len() as u64)?;
        self.write_slice(values)
    }

    /// Write a boolean sequence bit-packed 8 per byte (LSB first):
    /// u64 logical count, then ceil(n/8) bytes.
    pub fn write_bool_vector(&mut self, values: &[bool]) -> Result<()> {
        self.require_scope("vector write")?;
        self.scratch.clear();
        (values.len() as u64).put(&mut self.scratch);
        for chunk in values.chunks(8) {
            let mut byte = 0u8;
            for (bit, &value) in chunk.iter().enumerate() {
                if value {
                    byte |= 1 << bit;
                }
            }
            byte.put(&mut self.scratch);
        }
        self.emit_scratch()
    }

    /// Write a length-prefixed UTF-8 string: u64 byte length, then bytes.
    pub fn write_string(&mut self, value: &str) -> Result<()> {
        self.require_scope("string write")?;
        self.scratch.clear();
        (value.len() as u64).put(&mut self.scratch);
        self.scratch.extend_from_slice(value.as_bytes());
        self.emit_scratch()
    }

    /// Reserve `nbytes` of zero-filled space and return its absolute sink
    /// offset, for payload regions filled in later through
    /// [`ByteSink::write_at`]. Fails with [`CodecError::Unsupported`] on
    /// non-positionable sinks.
    pub fn reserve_space(&mut self, nbytes: usize) -> Result<u64> {
        let base = self
            .base
            .ok_or(CodecError::Unsupported("space reservation"))?;
        let offset = base + self.written;
        self.write_zeros(nbytes)?;
        Ok(offset)
    }

    /// Pad with zero bytes until the sink offset is a multiple of `n`;
    /// returns the pad length. Fails with [`CodecError::Unsupported`] on
    /// non-positionable sinks.
    pub fn align(&mut self, n: usize) -> Result<usize> {
        if n <= 1 {
            return Ok(0);
        }
        let base = self.base.ok_or(CodecError::Unsupported("alignment"))?;
        let position = base + self.written;
        let pad = ((n as u64 - position % n as u64) % n as u64) as usize;
        self.write_zeros(pad)?;
        Ok(pad)
    }

    /// Absolute sink offset, `None` on non-positionable sinks.
    pub fn position(&self) -> Option<u64> {
        self.base.map(|base| base + self.written)
    }

    /// Bytes produced since construction (or the last [`Self::clear`]).
    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    /// Current scope nesting depth.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Flush the underlying sink.
    pub fn flush(&mut self) -> Result<()> {
        self.sink.flush()?;
        Ok(())
    }

    /// Reset all cursor state: drop open frames and restart byte accounting
    /// at the sink's current offset. Already-written bytes are unaffected.
    pub fn clear(&mut self) {
        self.frames.clear();
        self.written = 0;
        self.next_id = 0;
        self.base = self.sink.position();
    }

    fn require_scope(&self, op: &'static str) -> Result<()> {
        if self.frames.is_empty() {
            return Err(CodecError::UnbracketedAccess(op));
        }
        Ok(())
    }

    fn emit_scratch(&mut self) -> Result<()> {
        self.sink.write(&self.scratch)?;
        self.written += self.scratch.len() as u64;
        Ok(())
    }

    fn write_zeros(&mut self, nbytes: usize) -> Result<()> {
        let mut remaining = nbytes;
        while remaining > 0 {
            let take = remaining.min(FILL_CHUNK);
            self.sink.write(&ZEROS[..take])?;
            self.written += take as u64;
            remaining -= take;
        }
        Ok(())
    }
}
