//! # Binary Codec
//!
//! Exact-width, bounds-checked, deterministic packing for everything that
//! crosses the wire. The layout is dictated by the node, not by us, so the
//! rules are strict:
//!
//! - integers are big-endian and fixed width,
//! - byte blobs are u32-length-prefixed, strings u16-length-prefixed,
//! - ids are 32 raw bytes, addresses 33,
//! - nothing panics on malformed input. Failures land in the packer's
//!   sticky error slot and are inspected once at the end.

mod packer;
mod types;

pub use packer::Packer;
pub use types::{Address, Id};

use thiserror::Error;

use crate::config::{U16_LEN, U32_LEN};

/// Failures recorded by a [`Packer`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// A read ran past the end of the input.
    #[error("buffer underflow: needed {needed} bytes at offset {offset}, {available} available")]
    BufferUnderflow {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// A write would grow the buffer past its ceiling.
    #[error("insufficient length: writing {needed} bytes at offset {offset} exceeds {max_size}")]
    InsufficientLength {
        offset: usize,
        needed: usize,
        max_size: usize,
    },

    /// Cursor arithmetic overflowed.
    #[error("invalid length {len} at offset {offset}")]
    InvalidLength { offset: usize, len: usize },

    /// A declared length exceeds the ceiling the caller allows.
    #[error("oversized field: declared {declared} bytes, limit {limit}")]
    Oversized { declared: usize, limit: usize },

    #[error("bad bool byte {0:#04x}")]
    BadBool(u8),

    /// A required field decoded to its zero sentinel.
    #[error("required field not populated")]
    FieldNotPopulated,

    #[error("string of {len} bytes exceeds maximum {max}")]
    StringTooLong { len: usize, max: usize },

    #[error("string is not valid UTF-8")]
    InvalidUtf8,
}

/// Encoded size of a u32-length-prefixed blob.
pub fn bytes_len(data: &[u8]) -> usize {
    U32_LEN + data.len()
}

/// Encoded size of a u16-length-prefixed string.
pub fn string_len(s: &str) -> usize {
    U16_LEN + s.len()
}
