//! Self-describing binary framing for nested, versioned scope trees.
//!
//! This is the core value-add layer of scopeframe. A producer brackets its
//! data in *scopes* — named, versioned, length-prefixed regions that nest
//! strictly LIFO. Each scope header carries:
//! - A 2-byte magic number ("SF") for stream synchronization
//! - A byte-order tag so consumers on the other architecture can convert
//! - A 4-byte signed schema version
//! - An 8-byte total length, backpatched once the scope closes
//! - A length-prefixed type name (empty for lightweight framing)
//!
//! Values are written in the producer's native byte order; the decoder
//! byte-swaps per element only when the tag differs from the local machine,
//! so same-architecture traffic pays no conversion cost.

pub mod error;
pub mod reader;
pub mod types;
pub mod wire;
pub mod writer;

pub use error::{CodecError, Result};
pub use reader::ScopeReader;
pub use types::{Complex32, Complex64, Prim, Scalar};
pub use wire::{ScopeHeader, HEADER_FIXED, LENGTH_UNKNOWN, MAGIC, WIRE_VERSION};
pub use writer::{ScopeId, ScopeWriter};
