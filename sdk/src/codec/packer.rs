//! The byte cursor every wire type encodes and decodes through.
//!
//! A [`Packer`] is either a writer (owned, growing buffer capped at
//! `max_size`) or a reader (borrowed input, capped at `limit`). Both sides
//! share the same sticky error slot: the first failure is recorded and every
//! later call becomes a no-op that returns a zero value. Callers run a whole
//! sequence of operations and then ask [`Packer::check`] once.
//!
//! Integers are big-endian. Byte blobs carry a u32 length prefix, strings a
//! u16 prefix.

use std::borrow::Cow;

use super::types::{Address, Id};
use super::CodecError;
use crate::config::{ADDRESS_LEN, ID_LEN, MAX_STRING_LEN};

#[derive(Debug, Clone)]
pub struct Packer<'a> {
    bytes: Cow<'a, [u8]>,
    offset: usize,
    max_size: usize,
    err: Option<CodecError>,
}

impl Packer<'static> {
    /// A writer that pre-allocates `initial_capacity` bytes and refuses to
    /// grow past `max_size`.
    pub fn new_writer(initial_capacity: usize, max_size: usize) -> Self {
        Self {
            bytes: Cow::Owned(Vec::with_capacity(initial_capacity.min(max_size))),
            offset: 0,
            max_size,
            err: None,
        }
    }
}

impl<'a> Packer<'a> {
    /// A reader over `bytes`. Input longer than `limit` is rejected up front,
    /// before any field is read.
    pub fn new_reader(bytes: &'a [u8], limit: usize) -> Self {
        let err = (bytes.len() > limit).then(|| CodecError::Oversized {
            declared: bytes.len(),
            limit,
        });
        Self {
            bytes: Cow::Borrowed(bytes),
            offset: 0,
            max_size: limit,
            err,
        }
    }

    // -----------------------------------------------------------------------
    // State
    // -----------------------------------------------------------------------

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes.into_owned()
    }

    /// Bytes between the cursor and the end of the buffer.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }

    /// `true` once a reader has consumed all of its input.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn err(&self) -> Option<&CodecError> {
        self.err.as_ref()
    }

    pub fn errored(&self) -> bool {
        self.err.is_some()
    }

    /// Records `err` unless an earlier error is already recorded.
    pub fn set_err(&mut self, err: CodecError) {
        if self.err.is_none() {
            self.err = Some(err);
        }
    }

    /// Surfaces the first recorded error, if any.
    pub fn check(&self) -> Result<(), CodecError> {
        match &self.err {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    // -----------------------------------------------------------------------
    // Cursor primitives
    // -----------------------------------------------------------------------

    fn write(&mut self, data: &[u8]) {
        if self.err.is_some() {
            return;
        }
        let Some(end) = self.offset.checked_add(data.len()) else {
            self.set_err(CodecError::InvalidLength {
                offset: self.offset,
                len: data.len(),
            });
            return;
        };
        if end > self.max_size {
            self.set_err(CodecError::InsufficientLength {
                offset: self.offset,
                needed: data.len(),
                max_size: self.max_size,
            });
            return;
        }
        let offset = self.offset;
        let buf = self.bytes.to_mut();
        buf.truncate(offset);
        buf.extend_from_slice(data);
        self.offset = end;
    }

    fn read(&mut self, n: usize) -> Option<&[u8]> {
        if self.err.is_some() {
            return None;
        }
        let Some(end) = self.offset.checked_add(n) else {
            self.set_err(CodecError::InvalidLength {
                offset: self.offset,
                len: n,
            });
            return None;
        };
        if end > self.bytes.len() {
            self.set_err(CodecError::BufferUnderflow {
                offset: self.offset,
                needed: n,
                available: self.remaining(),
            });
            return None;
        }
        let start = self.offset;
        self.offset = end;
        Some(&self.bytes[start..end])
    }

    fn read_array<const N: usize>(&mut self) -> [u8; N] {
        let mut out = [0u8; N];
        if let Some(b) = self.read(N) {
            out.copy_from_slice(b);
        }
        out
    }

    // -----------------------------------------------------------------------
    // Integers
    // -----------------------------------------------------------------------

    pub fn pack_byte(&mut self, v: u8) {
        self.write(&[v]);
    }

    pub fn unpack_byte(&mut self) -> u8 {
        self.read_array::<1>()[0]
    }

    pub fn pack_short(&mut self, v: u16) {
        self.write(&v.to_be_bytes());
    }

    pub fn unpack_short(&mut self) -> u16 {
        u16::from_be_bytes(self.read_array())
    }

    pub fn pack_int(&mut self, v: u32) {
        self.write(&v.to_be_bytes());
    }

    pub fn unpack_int(&mut self) -> u32 {
        u32::from_be_bytes(self.read_array())
    }

    pub fn pack_long(&mut self, v: u64) {
        self.write(&v.to_be_bytes());
    }

    pub fn unpack_long(&mut self) -> u64 {
        u64::from_be_bytes(self.read_array())
    }

    pub fn pack_i64(&mut self, v: i64) {
        self.write(&v.to_be_bytes());
    }

    pub fn unpack_i64(&mut self) -> i64 {
        i64::from_be_bytes(self.read_array())
    }

    pub fn pack_bool(&mut self, v: bool) {
        self.pack_byte(u8::from(v));
    }

    /// Only 0 and 1 decode. Anything else is `BadBool`.
    pub fn unpack_bool(&mut self) -> bool {
        if self.err.is_some() {
            return false;
        }
        match self.unpack_byte() {
            0 => false,
            1 => true,
            other => {
                self.set_err(CodecError::BadBool(other));
                false
            }
        }
    }

    // -----------------------------------------------------------------------
    // Byte blobs
    // -----------------------------------------------------------------------

    /// Copies `data` verbatim. The reader has to know the length.
    pub fn pack_fixed_bytes(&mut self, data: &[u8]) {
        self.write(data);
    }

    pub fn unpack_fixed_bytes(&mut self, n: usize) -> Vec<u8> {
        self.read(n).map(<[u8]>::to_vec).unwrap_or_default()
    }

    /// Same as [`unpack_fixed_bytes`](Self::unpack_fixed_bytes) but into an array.
    pub fn unpack_fixed<const N: usize>(&mut self) -> [u8; N] {
        self.read_array()
    }

    /// u32 length prefix, then the bytes.
    pub fn pack_bytes(&mut self, data: &[u8]) {
        let Ok(len) = u32::try_from(data.len()) else {
            self.set_err(CodecError::InvalidLength {
                offset: self.offset,
                len: data.len(),
            });
            return;
        };
        self.pack_int(len);
        self.write(data);
    }

    pub fn unpack_bytes(&mut self, required: bool) -> Vec<u8> {
        self.unpack_limited_bytes(u32::MAX as usize, required)
    }

    /// Rejects a declared length above `limit` before allocating anything.
    pub fn unpack_limited_bytes(&mut self, limit: usize, required: bool) -> Vec<u8> {
        let len = self.unpack_int() as usize;
        if self.err.is_some() {
            return Vec::new();
        }
        if len > limit {
            self.set_err(CodecError::Oversized {
                declared: len,
                limit,
            });
            return Vec::new();
        }
        let out = self.unpack_fixed_bytes(len);
        if required && out.is_empty() {
            self.set_err(CodecError::FieldNotPopulated);
        }
        out
    }

    // -----------------------------------------------------------------------
    // Strings
    // -----------------------------------------------------------------------

    /// u16 length prefix, then UTF-8 bytes.
    pub fn pack_string(&mut self, s: &str) {
        if s.len() > MAX_STRING_LEN {
            self.set_err(CodecError::StringTooLong {
                len: s.len(),
                max: MAX_STRING_LEN,
            });
            return;
        }
        self.pack_short(s.len() as u16);
        self.write(s.as_bytes());
    }

    pub fn unpack_string(&mut self, required: bool) -> String {
        self.unpack_limited_string(MAX_STRING_LEN, required)
    }

    pub fn unpack_limited_string(&mut self, limit: usize, required: bool) -> String {
        let len = self.unpack_short() as usize;
        if self.err.is_some() {
            return String::new();
        }
        if len > limit {
            self.set_err(CodecError::Oversized {
                declared: len,
                limit,
            });
            return String::new();
        }
        let Some(raw) = self.read(len) else {
            return String::new();
        };
        let parsed = std::str::from_utf8(raw).map(str::to_owned);
        let out = match parsed {
            Ok(s) => s,
            Err(_) => {
                self.set_err(CodecError::InvalidUtf8);
                return String::new();
            }
        };
        if required && out.is_empty() {
            self.set_err(CodecError::FieldNotPopulated);
        }
        out
    }

    // -----------------------------------------------------------------------
    // Ids and addresses
    // -----------------------------------------------------------------------

    pub fn pack_id(&mut self, id: &Id) {
        self.write(id.as_bytes());
    }

    /// A required id that decodes to all zeroes records `FieldNotPopulated`.
    /// Decoding continues; the error surfaces through [`check`](Self::check).
    pub fn unpack_id(&mut self, required: bool) -> Id {
        let id = Id::new(self.read_array::<ID_LEN>());
        if required && self.err.is_none() && id.is_empty() {
            self.set_err(CodecError::FieldNotPopulated);
        }
        id
    }

    pub fn pack_address(&mut self, addr: &Address) {
        self.write(addr.as_bytes());
    }

    pub fn unpack_address(&mut self, required: bool) -> Address {
        let addr = Address::from_bytes(self.read_array::<ADDRESS_LEN>());
        if required && self.err.is_none() && addr.is_empty() {
            self.set_err(CodecError::FieldNotPopulated);
        }
        addr
    }
}
