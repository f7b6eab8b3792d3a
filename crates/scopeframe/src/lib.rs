//! Self-describing binary framing for real-time telescope data processing.
//!
//! scopeframe moves structured, nested, versioned data between processes and
//! across machine architectures, and persists it to disk. Producers bracket
//! their data in *scopes* — named, versioned regions with backpatched length
//! fields — and consumers reconstruct them with structural validation and
//! transparent byte-order conversion.
//!
//! # Crate Structure
//!
//! - [`stream`] — Byte sink/source abstraction (memory, file, raw I/O)
//! - [`codec`] — Scope encoder/decoder with endian transparency

/// Re-export stream types.
pub mod stream {
    pub use scopeframe_stream::*;
}

/// Re-export codec types.
pub mod codec {
    pub use scopeframe_codec::*;
}

pub use scopeframe_codec::{
    CodecError, Complex32, Complex64, Prim, Scalar, ScopeHeader, ScopeId, ScopeReader,
    ScopeWriter,
};
pub use scopeframe_stream::{
    ByteSink, ByteSource, FileSink, FileSource, IoSink, IoSource, MemorySink, MemorySource,
    StreamError,
};
