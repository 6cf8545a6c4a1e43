//! # Byte Buffer
//!
//! Growable, exclusively owned storage behind a [`Packet`](super::packet::Packet).
//!
//! The buffer knows nothing about cursors. It offers offset-addressed integer
//! placement that grows the storage on demand, bounds-checked single byte
//! retrieval, and a shifting insert used by length framing. Growth is left to
//! `BytesMut`.

use super::endian::{Endianness, WireInt};
use bytes::{Bytes, BytesMut};
use std::fmt;

/// Owned byte storage with offset-addressed writes
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ByteBuffer {
    inner: BytesMut,
}

impl ByteBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self {
            inner: BytesMut::new(),
        }
    }

    /// Create an empty buffer with room for `capacity` bytes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: BytesMut::with_capacity(capacity),
        }
    }

    /// Write `value` at `offset` in the given byte order.
    ///
    /// Bytes already present in range are overwritten; the buffer is extended
    /// when the value reaches past the end. A gap between the current end and
    /// `offset` is zero-filled.
    pub fn insert_int_at<T: WireInt>(&mut self, offset: usize, value: T, order: Endianness) {
        let encoded = value.encode(order);
        self.put_at(offset, encoded.as_ref());
    }

    pub fn insert_int8_at(&mut self, offset: usize, value: i8) {
        self.insert_int_at(offset, value, Endianness::Little);
    }

    pub fn insert_int16_at(&mut self, offset: usize, value: i16, order: Endianness) {
        self.insert_int_at(offset, value, order);
    }

    pub fn insert_int32_at(&mut self, offset: usize, value: i32, order: Endianness) {
        self.insert_int_at(offset, value, order);
    }

    pub fn insert_int64_at(&mut self, offset: usize, value: i64, order: Endianness) {
        self.insert_int_at(offset, value, order);
    }

    /// Overwrite-or-extend `data` at `offset`
    pub fn put_at(&mut self, offset: usize, data: &[u8]) {
        let end = offset + data.len();
        if end > self.inner.len() {
            self.inner.resize(end, 0);
        }
        self.inner[offset..end].copy_from_slice(data);
    }

    /// Insert `data` at `offset`, shifting everything from `offset` onward
    /// to the right.
    pub fn insert_at(&mut self, offset: usize, data: &[u8]) {
        if offset >= self.inner.len() {
            self.put_at(offset, data);
            return;
        }
        let tail = self.inner.split_off(offset);
        self.inner.extend_from_slice(data);
        self.inner.unsplit(tail);
    }

    /// Byte at `offset`, or `None` when `offset` is past the end
    #[inline]
    pub fn retrieve(&self, offset: usize) -> Option<u8> {
        self.inner.get(offset).copied()
    }

    /// Append a single byte at the end
    pub fn append(&mut self, byte: u8) {
        self.inner.extend_from_slice(&[byte]);
    }

    /// Append `data` at the end
    pub fn extend_from_slice(&mut self, data: &[u8]) {
        self.inner.extend_from_slice(data);
    }

    /// Reserve room for `additional` more bytes
    pub fn reserve_string(&mut self, additional: usize) {
        self.inner.reserve(additional);
    }

    /// Owned copy of the contents
    pub fn copy(&self) -> Vec<u8> {
        self.inner.to_vec()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.inner
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Freeze into immutable `Bytes` for hand-off to a transport
    pub fn freeze(self) -> Bytes {
        self.inner.freeze()
    }

    /// Give back the underlying `BytesMut`
    pub fn into_inner(self) -> BytesMut {
        self.inner
    }
}

impl fmt::Debug for ByteBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteBuffer")
            .field("len", &self.inner.len())
            .field("data", &self.inner.as_ref())
            .finish()
    }
}

impl AsRef<[u8]> for ByteBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.inner
    }
}

impl From<BytesMut> for ByteBuffer {
    fn from(inner: BytesMut) -> Self {
        Self { inner }
    }
}

/// Takes over the vector's allocation; no bytes are copied.
impl From<Vec<u8>> for ByteBuffer {
    fn from(data: Vec<u8>) -> Self {
        Self {
            inner: BytesMut::from(Bytes::from(data)),
        }
    }
}

impl From<&[u8]> for ByteBuffer {
    fn from(data: &[u8]) -> Self {
        Self {
            inner: BytesMut::from(data),
        }
    }
}

impl From<ByteBuffer> for Bytes {
    fn from(buffer: ByteBuffer) -> Self {
        buffer.freeze()
    }
}
