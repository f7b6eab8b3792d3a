//! Byte sink/source abstraction for the scopeframe codec.
//!
//! Provides a unified interface over the places encoded scope trees live:
//! - In-memory buffers (seekable)
//! - Files (seekable)
//! - Arbitrary `Read`/`Write` streams such as sockets (not seekable)
//!
//! This is the lowest layer of scopeframe. The codec in `scopeframe-codec`
//! borrows a [`ByteSink`] or [`ByteSource`] for its entire lifetime and
//! builds everything on top of these traits.

pub mod error;
pub mod file;
pub mod io;
pub mod memory;
pub mod traits;

pub use error::{Result, StreamError};
pub use file::{FileSink, FileSource};
pub use io::{IoSink, IoSource};
pub use memory::{MemorySink, MemorySource};
pub use traits::{ByteSink, ByteSource};
