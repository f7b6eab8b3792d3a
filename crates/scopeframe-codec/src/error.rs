use scopeframe_stream::StreamError;

/// Errors that can occur while encoding or decoding scope trees.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// A scope's declared length differs from the bytes actually consumed —
    /// the stream is corrupt or producer/consumer versions have diverged.
    #[error("scope \"{scope}\" length mismatch: declared {declared} bytes, consumed {actual}")]
    StructuralMismatch {
        /// Type name of the failing scope, empty for lightweight scopes.
        scope: String,
        declared: u64,
        actual: u64,
    },

    /// The decoded scope type name differs from the caller's expectation.
    #[error("scope type mismatch: expected \"{expected}\", found \"{found}\"")]
    TypeMismatch { expected: String, found: String },

    /// A value operation was attempted with no scope open.
    #[error("{0} attempted outside any open scope")]
    UnbracketedAccess(&'static str),

    /// The expected header marker was not found — the stream position can
    /// no longer be trusted.
    #[error("stream desynchronized: {0}")]
    Desync(&'static str),

    /// The underlying stream does not support the requested operation
    /// (seek-dependent calls on sockets). Recoverable; callers branch on it.
    #[error("stream does not support {0}")]
    Unsupported(&'static str),

    /// The stream ended in the middle of a header or value.
    #[error("unexpected end of stream")]
    Truncated,

    /// A type name or string payload was not valid UTF-8.
    #[error("invalid UTF-8 in {0}")]
    InvalidString(&'static str),

    /// An I/O error occurred on the underlying stream.
    #[error("codec I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StreamError> for CodecError {
    fn from(err: StreamError) -> Self {
        match err {
            StreamError::Io(io) => CodecError::Io(io),
            StreamError::Unsupported { op } => CodecError::Unsupported(op),
            other => CodecError::Io(std::io::Error::other(other.to_string())),
        }
    }
}

pub type Result<T> = std::result::Result<T, CodecError>;
