/// Errors that can occur on a byte sink or source.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// An I/O error occurred on the underlying stream.
    #[error("stream I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream does not support the requested operation
    /// (e.g. positional writes on a socket).
    #[error("stream does not support {op}")]
    Unsupported { op: &'static str },

    /// A positional write landed outside the bytes written so far.
    #[error("positional write out of bounds (offset {offset}, len {len}, stream size {size})")]
    OutOfBounds { offset: u64, len: usize, size: u64 },
}

pub type Result<T> = std::result::Result<T, StreamError>;
