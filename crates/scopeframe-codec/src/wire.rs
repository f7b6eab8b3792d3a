//! Scope header wire model.
//!
//! Wire format (fixed 20-byte prefix, then the type name):
//!
//! ```text
//! ┌────────────┬─────────┬─────────┬──────────┬───────────┬──────────┬───────────┐
//! │ Magic (2B) │ Flags   │ Wire    │ Version  │ Length    │ Name len │ Name      │
//! │ 0x53 0x46  │ (1B)    │ ver (1B)│ (4B i32) │ (8B u64)  │ (4B u32) │ (N bytes) │
//! │ "SF"       │ bit0=BE │ 0x01    │          │ 0=unknown │          │           │
//! └────────────┴─────────┴─────────┴──────────┴───────────┴──────────┴───────────┘
//! ```
//!
//! All multi-byte fields are in the producer's byte order; flags bit 0 tells
//! the consumer whether that order is big-endian. The length field covers the
//! whole scope (header, name, payload, nested scopes). It is written as
//! [`LENGTH_UNKNOWN`] at open and backpatched at close on positionable sinks;
//! on sockets it stays unknown and the decoder skips the close-time check.

use bytes::{BufMut, BytesMut};

use crate::error::{CodecError, Result};
use crate::types::Scalar;

/// Magic bytes: "SF" (0x53 0x46).
pub const MAGIC: [u8; 2] = [0x53, 0x46];

/// Current wire-format version byte.
pub const WIRE_VERSION: u8 = 0x01;

/// Flags bit 0: producer wrote in big-endian order.
pub const FLAG_BIG_ENDIAN: u8 = 0x01;

/// Fixed header size before the type name.
pub const HEADER_FIXED: usize = 20;

/// Placeholder for a length that was never backpatched.
pub const LENGTH_UNKNOWN: u64 = 0;

/// Offset of the 8-byte length field within the header.
pub const LENGTH_OFFSET: usize = 8;

/// Longest type name the decoder will accept. Anything larger is taken as
/// evidence the stream is not positioned at a real header.
pub const MAX_NAME_LEN: usize = 4096;

/// Byte order of the machine we are running on.
pub const fn native_is_big() -> bool {
    cfg!(target_endian = "big")
}

/// A decoded scope header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeHeader {
    /// Type name, `None` for lightweight framing.
    pub name: Option<String>,
    /// Schema version of the enclosed object.
    pub version: i32,
    /// Total scope length in bytes, [`LENGTH_UNKNOWN`] if never backpatched.
    pub length: u64,
    /// Whether the producer wrote in big-endian order.
    pub big_endian: bool,
}

impl ScopeHeader {
    /// Size of this header on the wire (fixed prefix + name bytes).
    pub fn wire_size(&self) -> usize {
        HEADER_FIXED + self.name.as_ref().map_or(0, String::len)
    }

    /// Whether the length field was backpatched by the producer.
    pub fn length_known(&self) -> bool {
        self.length != LENGTH_UNKNOWN
    }

    /// Whether this scope uses lightweight (unnamed) framing.
    pub fn is_lightweight(&self) -> bool {
        self.name.is_none()
    }

    /// Whether the producer's byte order differs from this machine's.
    pub fn needs_conversion(&self) -> bool {
        self.big_endian != native_is_big()
    }
}

/// Append a scope header in native byte order, length field set to
/// [`LENGTH_UNKNOWN`] for later backpatching.
pub fn encode_header(name: Option<&str>, version: i32, dst: &mut BytesMut) {
    let name = name.unwrap_or("");
    dst.reserve(HEADER_FIXED + name.len());
    dst.put_slice(&MAGIC);
    dst.put_u8(if native_is_big() { FLAG_BIG_ENDIAN } else { 0 });
    dst.put_u8(WIRE_VERSION);
    dst.put_slice(&version.to_ne_bytes());
    dst.put_slice(&LENGTH_UNKNOWN.to_ne_bytes());
    dst.put_slice(&(name.len() as u32).to_ne_bytes());
    dst.put_slice(name.as_bytes());
}

/// Decode a scope header from the front of `src` without consuming it.
///
/// Returns `Ok(None)` if `src` does not yet hold the complete header.
/// The caller advances by [`ScopeHeader::wire_size`] once it commits.
pub fn decode_header(src: &[u8]) -> Result<Option<ScopeHeader>> {
    if src.len() < HEADER_FIXED {
        return Ok(None); // Need more data
    }

    if src[0..2] != MAGIC {
        return Err(CodecError::Desync("header marker not found"));
    }
    if src[3] != WIRE_VERSION {
        return Err(CodecError::Desync("unsupported wire-format version"));
    }

    let big_endian = src[2] & FLAG_BIG_ENDIAN != 0;
    let swap = big_endian != native_is_big();

    let version = i32::get(&src[4..8], swap);
    let length = u64::get(&src[8..16], swap);
    let name_len = u32::get(&src[16..20], swap) as usize;

    if name_len > MAX_NAME_LEN {
        return Err(CodecError::Desync("implausible type-name length"));
    }
    if src.len() < HEADER_FIXED + name_len {
        return Ok(None); // Need more data
    }

    let name = if name_len == 0 {
        None
    } else {
        let raw = &src[HEADER_FIXED..HEADER_FIXED + name_len];
        let text = std::str::from_utf8(raw)
            .map_err(|_| CodecError::InvalidString("scope type name"))?;
        Some(text.to_string())
    };

    Ok(Some(ScopeHeader {
        name,
        version,
        length,
        big_endian,
    }))
}
