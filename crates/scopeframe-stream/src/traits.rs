use crate::error::Result;

/// A destination for encoded bytes.
///
/// Sinks come in two flavors: positionable (memory buffers, files), which
/// additionally support [`ByteSink::write_at`] so the codec can backpatch
/// length fields, and non-positionable (sockets, pipes), where `position`
/// returns `None` and `write_at` fails with [`StreamError::Unsupported`].
///
/// [`StreamError::Unsupported`]: crate::error::StreamError::Unsupported
pub trait ByteSink {
    /// Append bytes at the current end of the stream.
    fn write(&mut self, bytes: &[u8]) -> Result<()>;

    /// Flush any buffered bytes to the underlying medium.
    fn flush(&mut self) -> Result<()>;

    /// Current write offset, or `None` if the sink cannot report one.
    fn position(&self) -> Option<u64>;

    /// Overwrite previously written bytes at an absolute offset.
    ///
    /// The region `offset..offset + bytes.len()` must already have been
    /// written; sinks never grow through this call.
    fn write_at(&mut self, offset: u64, bytes: &[u8]) -> Result<()>;
}

/// A source of encoded bytes.
pub trait ByteSource {
    /// Read up to `buf.len()` bytes, returning the number read.
    /// Returns `Ok(0)` at end of stream.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize>;

    /// Current read offset, or `None` if the source cannot report one.
    fn position(&self) -> Option<u64>;
}
