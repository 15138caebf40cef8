//! A growable byte store with a single read/write cursor.
//!
//! ```text
//! 0            cursor                 len              capacity
//! |-------------^----------------------|-------------------|
//!  consumed or    readable               allocated, unused
//!  overwritable
//! ```
//!
//! Reads are bounds-checked against `len`. Writes land at `cursor` and grow
//! the allocation by doubling until they fit; a write that ends past `len`
//! extends `len`. Fixed-width values use host byte order.

use crate::{CodecError, Result};
use std::mem;


#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum SeekOrigin {
    Begin,
    Current,
    /// Positions `offset` bytes *before* the logical end.
    End,
}

#[derive(Clone, Debug)]
pub struct ByteBuffer {
    /// Always `capacity` bytes long; only `..len` is meaningful.
    buf: Vec<u8>,
    cursor: usize,
    len: usize,
}

impl Default for ByteBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/* Construction and export. */
impl ByteBuffer {
    pub const DEFAULT_CAPACITY: usize = 1024;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: vec![0u8; capacity.max(1)],
            cursor: 0,
            len: 0,
        }
    }

    pub fn from_bytes(data: Vec<u8>) -> Self {
        let mut moi = Self::with_capacity(0);
        moi.set_bytes(data);
        moi
    }

    /// Replaces the content. The cursor rewinds to 0 and `len == capacity == data.len()`.
    pub fn set_bytes(&mut self, data: Vec<u8>) {
        self.len = data.len();
        self.cursor = 0;
        self.buf = data;
    }

    /// A copy truncated to the logical length.
    pub fn to_vec(&self) -> Vec<u8> {
        self.as_slice().to_vec()
    }

    pub fn into_bytes(mut self) -> Vec<u8> {
        self.buf.truncate(self.len);
        self.buf
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub fn remaining(&self) -> usize {
        self.len - self.cursor
    }
}

/* Cursor movement. */
impl ByteBuffer {
    pub fn seek(&mut self, offset: i64, origin: SeekOrigin) -> Result<usize> {
        let len = self.len as i64;
        let target = match origin {
            SeekOrigin::Begin => Some(offset),
            SeekOrigin::Current => (self.cursor as i64).checked_add(offset),
            SeekOrigin::End => len.checked_sub(offset),
        };
        match target {
            Some(target) if (0..=len).contains(&target) => {
                self.cursor = target as usize;
                Ok(self.cursor)
            }
            _ => Err(CodecError::SeekOutOfRange {
                target: target.unwrap_or(i64::MAX),
                len: self.len,
            }),
        }
    }

    pub fn rewind(&mut self) {
        self.cursor = 0;
    }
}

/* Reads. */
impl ByteBuffer {
    fn take(&mut self, n: usize) -> Result<&[u8]> {
        if n > self.remaining() {
            return Err(CodecError::BufferOverflow {
                needed: n,
                available: self.remaining(),
            });
        }
        let start = self.cursor;
        self.cursor += n;
        Ok(&self.buf[start..self.cursor])
    }

    fn read_array<const LEN: usize>(&mut self) -> Result<[u8; LEN]> {
        let mut arr = [0u8; LEN];
        arr.copy_from_slice(self.take(LEN)?);
        Ok(arr)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(u8::from_ne_bytes(self.read_array()?))
    }
    pub fn read_i16(&mut self) -> Result<i16> {
        Ok(i16::from_ne_bytes(self.read_array()?))
    }
    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(i32::from_ne_bytes(self.read_array()?))
    }
    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(i64::from_ne_bytes(self.read_array()?))
    }
    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_ne_bytes(self.read_array()?))
    }
    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(f64::from_ne_bytes(self.read_array()?))
    }

    pub fn read_block(&mut self, n: usize) -> Result<Vec<u8>> {
        Ok(self.take(n)?.to_vec())
    }

    /// Reads `n` bytes as single-byte (Latin-1) text.
    pub fn read_fixed_string(&mut self, n: usize) -> Result<String> {
        Ok(latin1_decode(self.take(n)?))
    }

    /// Reads up to the next NUL and skips past it.
    /// Without a terminator, reads everything up to the logical end.
    pub fn read_cstring(&mut self) -> Result<String> {
        let rest = &self.buf[self.cursor..self.len];
        let (body_len, consumed) = match rest.iter().position(|b| *b == 0) {
            Some(nul_pos) => (nul_pos, nul_pos + 1),
            None => (rest.len(), rest.len()),
        };
        let s = latin1_decode(&rest[..body_len]);
        self.cursor += consumed;
        Ok(s)
    }
}

/* Writes. */
impl ByteBuffer {
    fn reserve_at(&mut self, at: usize, n: usize) {
        let mut cap = self.buf.len().max(1);
        while at + n > cap {
            cap *= 2;
        }
        if cap != self.buf.len() {
            self.buf.resize(cap, 0);
        }
    }

    fn put(&mut self, bytes: &[u8]) {
        let n = bytes.len();
        self.reserve_at(self.cursor, n);
        self.buf[self.cursor..self.cursor + n].copy_from_slice(bytes);
        self.cursor += n;
        self.len = self.len.max(self.cursor);
    }

    pub fn write_u8(&mut self, val: u8) {
        self.put(&val.to_ne_bytes())
    }
    pub fn write_i16(&mut self, val: i16) {
        self.put(&val.to_ne_bytes())
    }
    pub fn write_i32(&mut self, val: i32) {
        self.put(&val.to_ne_bytes())
    }
    pub fn write_i64(&mut self, val: i64) {
        self.put(&val.to_ne_bytes())
    }
    pub fn write_f32(&mut self, val: f32) {
        self.put(&val.to_ne_bytes())
    }
    pub fn write_f64(&mut self, val: f64) {
        self.put(&val.to_ne_bytes())
    }

    pub fn write_block(&mut self, block: &[u8]) {
        self.put(block)
    }

    /// Writes the first `n` bytes of `block`.
    pub fn write_partial(&mut self, block: &[u8], n: usize) -> Result<()> {
        let part = block.get(..n).ok_or(CodecError::BufferOverflow {
            needed: n,
            available: block.len(),
        })?;
        self.put(part);
        Ok(())
    }

    /// Writes single-byte (Latin-1) text with no length and no terminator.
    pub fn write_fixed_string(&mut self, s: &str) -> Result<usize> {
        let bytes = latin1_encode(s)?;
        self.put(&bytes);
        Ok(bytes.len())
    }

    pub fn write_cstring(&mut self, s: &str) -> Result<usize> {
        let w_len = self.write_fixed_string(s)?;
        self.write_u8(0);
        Ok(w_len + mem::size_of::<u8>())
    }

    /// Writes at the logical end, leaving the cursor untouched.
    pub fn append(&mut self, bytes: &[u8]) {
        let n = bytes.len();
        self.reserve_at(self.len, n);
        self.buf[self.len..self.len + n].copy_from_slice(bytes);
        self.len += n;
    }
}

pub(crate) fn latin1_encode(s: &str) -> Result<Vec<u8>> {
    s.chars()
        .map(|c| {
            u8::try_from(u32::from(c)).map_err(|_| {
                CodecError::unsupported(format!(
                    "Character {c:?} is outside the single-byte text range"
                ))
            })
        })
        .collect()
}

pub(crate) fn latin1_decode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| char::from(*b)).collect()
}
