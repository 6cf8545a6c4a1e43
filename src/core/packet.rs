//! # Packet
//!
//! A cursor-addressed view over an owned [`ByteBuffer`].
//!
//! A single cursor serves as both the write position and the read position.
//! Writes place bytes at the cursor and never fail; reads consume bytes from
//! the cursor and return [`PacketError::OutOfRange`] when the buffer is too
//! short, leaving the cursor where it was so the read can be retried once more
//! data has been [fed](Packet::feed) in.
//!
//! ## Framing
//! - [`Framing::Raw`]: cursor starts at 0, no header.
//! - [`Framing::LengthPrefixed`]: bytes `[0, 4)` hold the payload length and
//!   the cursor starts at 4.
//!
//! ```text
//! [Length(4)] [Payload(N)]
//! ```
//!
//! ## Limits
//! The cursor and every length field are `u32`, so a packet addresses at most
//! 4 GiB. Writes that would move the cursor past `u32::MAX` pin it there and
//! log a warning; blob length prefixes are clamped the same way. Reads at such
//! positions fail with `OutOfRange`.
//!
//! ## Example
//! ```rust
//! use memory_packets::{Packet, StringEncoding};
//!
//! let mut packet = Packet::new();
//! packet.write_u16(0xBEEF);
//! packet.write_string(b"hi\0");
//! packet.insert_length();
//!
//! assert_eq!(packet.read_u32().unwrap(), 5);
//! assert_eq!(packet.read_u16().unwrap(), 0xBEEF);
//! let text = packet.read_string(true, StringEncoding::NullTerminated).unwrap();
//! assert_eq!(text, b"hi\0");
//! ```

use super::buffer::ByteBuffer;
use super::endian::{Endianness, WireInt};
use crate::config::{PacketConfig, LENGTH_HEADER_SIZE};
use crate::error::{PacketError, Result};
use bytes::{Bytes, BytesMut};
use tracing::{trace, warn};

/// Header layout of a packet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Framing {
    /// No header, cursor starts at 0
    #[default]
    Raw,
    /// 4-byte length header, cursor starts at 4
    LengthPrefixed,
}

impl Framing {
    /// Number of header bytes reserved at the front of the buffer
    pub fn header_len(self) -> u32 {
        match self {
            Framing::Raw => 0,
            Framing::LengthPrefixed => LENGTH_HEADER_SIZE,
        }
    }

    /// Cursor value of a freshly constructed packet
    pub fn default_position(self) -> u32 {
        self.header_len()
    }
}

/// How a string is laid out on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StringEncoding {
    /// Bytes up to and including a `0x00` terminator
    #[default]
    NullTerminated,
    /// `[u32 length][length bytes]`
    SizeEncoded,
}

/// Binary packet with a single read/write cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    buffer: ByteBuffer,
    cursor: u32,
    framing: Framing,
    endianness: Endianness,
}

impl Default for Packet {
    fn default() -> Self {
        Self::new()
    }
}

impl Packet {
    /// Empty raw packet, cursor at 0
    pub fn new() -> Self {
        Self::from_parts(ByteBuffer::new(), Framing::Raw)
    }

    /// Empty length-prefixed packet.
    ///
    /// The header bytes are zeroed and the cursor sits right after them.
    pub fn length_prefixed() -> Self {
        Self::with_config(Framing::LengthPrefixed, &PacketConfig::default())
    }

    /// Empty packet sized and ordered according to `config`
    pub fn with_config(framing: Framing, config: &PacketConfig) -> Self {
        let mut buffer = ByteBuffer::with_capacity(config.initial_capacity);
        buffer.put_at(0, &[0u8; LENGTH_HEADER_SIZE as usize][..framing.header_len() as usize]);
        Self {
            buffer,
            cursor: framing.default_position(),
            framing,
            endianness: config.endianness,
        }
    }

    /// Raw packet over a copy of `data`, cursor at 0
    pub fn from_slice(data: &[u8]) -> Self {
        Self::from_parts(ByteBuffer::from(data), Framing::Raw)
    }

    /// Raw packet taking ownership of `data`, cursor at 0
    pub fn from_vec(data: Vec<u8>) -> Self {
        Self::from_parts(ByteBuffer::from(data), Framing::Raw)
    }

    /// Packet over existing bytes with the framing's default cursor.
    ///
    /// The bytes are used as-is; for `LengthPrefixed` they are expected to
    /// start with the header.
    pub fn from_parts(buffer: impl Into<ByteBuffer>, framing: Framing) -> Self {
        Self {
            buffer: buffer.into(),
            cursor: framing.default_position(),
            framing,
            endianness: Endianness::default(),
        }
    }

    /// Replace the cursor while building
    pub fn with_position(mut self, position: u32) -> Self {
        self.cursor = position;
        self
    }

    /// Replace the byte order while building
    pub fn with_endianness(mut self, endianness: Endianness) -> Self {
        self.endianness = endianness;
        self
    }

    // ---------------------------------------------------------------------
    // Buffer and cursor access
    // ---------------------------------------------------------------------

    /// Replace the buffer wholesale. The cursor is not touched.
    pub fn set_buffer(&mut self, buffer: impl Into<ByteBuffer>) {
        self.buffer = buffer.into();
    }

    /// Overwrite the cursor.
    ///
    /// Any value is accepted; a position past the end simply makes the next
    /// read fail with `OutOfRange`.
    pub fn set_position(&mut self, position: u32) {
        self.cursor = position;
    }

    /// Current cursor, shared by reads and writes
    pub fn position(&self) -> u32 {
        self.cursor
    }

    /// Read-only view of the owned buffer
    pub fn buffer(&self) -> &ByteBuffer {
        &self.buffer
    }

    /// Every byte in the buffer, header included
    pub fn as_bytes(&self) -> &[u8] {
        self.buffer.as_slice()
    }

    /// Consume the packet, handing its buffer to the caller
    pub fn into_buffer(self) -> ByteBuffer {
        self.buffer
    }

    /// Consume the packet into immutable bytes for a transport
    pub fn into_bytes(self) -> Bytes {
        self.buffer.freeze()
    }

    /// Header layout chosen at construction
    pub fn framing(&self) -> Framing {
        self.framing
    }

    /// Byte order used for multi-byte values
    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    /// Change the byte order used by subsequent reads and writes
    pub fn set_endianness(&mut self, endianness: Endianness) {
        self.endianness = endianness;
    }

    /// Payload bytes written so far: the cursor minus the header, never below 0
    pub fn length(&self) -> u32 {
        self.cursor.saturating_sub(self.framing.header_len())
    }

    /// Bytes between the cursor and the end of the buffer
    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.cursor as usize)
    }

    /// Whether the cursor is at or past the end of the buffer
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Append freshly received bytes at the end without moving the cursor
    pub fn feed(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Drop all content and return to the freshly constructed state
    pub fn clear(&mut self) {
        self.buffer.clear();
        let header = self.framing.header_len() as usize;
        self.buffer.put_at(0, &[0u8; LENGTH_HEADER_SIZE as usize][..header]);
        self.cursor = self.framing.default_position();
    }

    // ---------------------------------------------------------------------
    // Writing
    // ---------------------------------------------------------------------

    /// Place `value` at the cursor and advance past it
    pub fn write<T: WireInt>(&mut self, value: T) {
        self.buffer
            .insert_int_at(self.cursor as usize, value, self.endianness);
        self.advance(T::WIDTH);
    }

    /// Write a signed byte and advance
    pub fn write_i8(&mut self, value: i8) {
        self.write(value);
    }

    /// Write an unsigned byte and advance
    pub fn write_u8(&mut self, value: u8) {
        self.write(value);
    }

    /// Write a signed 16-bit integer and advance
    pub fn write_i16(&mut self, value: i16) {
        self.write(value);
    }

    /// Write an unsigned 16-bit integer and advance
    pub fn write_u16(&mut self, value: u16) {
        self.write(value);
    }

    /// Write a signed 32-bit integer and advance
    pub fn write_i32(&mut self, value: i32) {
        self.write(value);
    }

    /// Write an unsigned 32-bit integer and advance
    pub fn write_u32(&mut self, value: u32) {
        self.write(value);
    }

    /// Write a signed 64-bit integer and advance
    pub fn write_i64(&mut self, value: i64) {
        self.write(value);
    }

    /// Write an unsigned 64-bit integer and advance
    pub fn write_u64(&mut self, value: u64) {
        self.write(value);
    }

    /// Write raw bytes at the cursor.
    ///
    /// No length prefix and no terminator are added; callers that want a
    /// null-terminated string must include the `0x00` themselves.
    pub fn write_string(&mut self, data: &[u8]) {
        self.buffer.put_at(self.cursor as usize, data);
        self.advance(wire_len(data.len()));
    }

    /// Write a nested blob: a u32 byte count followed by the bytes
    pub fn write_buffer(&mut self, data: &[u8]) {
        self.write_u32(wire_len(data.len()));
        self.write_string(data);
    }

    /// Prepend a length header holding the current cursor and rewind to 0.
    ///
    /// Everything written so far moves 4 bytes to the right. Call once, after
    /// the last write, to make the packet ready for a reader.
    pub fn insert_length(&mut self) {
        self.insert_length_with(self.cursor);
    }

    /// Prepend a length header holding `length` and rewind to 0
    pub fn insert_length_with(&mut self, length: u32) {
        let header = length.encode(self.endianness);
        self.buffer.insert_at(0, header.as_ref());
        self.cursor = 0;
        trace!(length, total = self.buffer.len(), "Length header inserted");
    }

    /// Stamp the payload length into the reserved header in place.
    ///
    /// Unlike [`insert_length`](Self::insert_length) nothing is relocated and
    /// the cursor stays put: bytes `[0, 4)` are assumed to have been reserved
    /// at construction, as a length-prefixed packet does.
    pub fn write_length(&mut self) {
        let length = self.cursor.max(LENGTH_HEADER_SIZE) - LENGTH_HEADER_SIZE;
        self.buffer.insert_int_at(0, length, self.endianness);
        trace!(length, "Length header stamped");
    }

    // ---------------------------------------------------------------------
    // Reading
    // ---------------------------------------------------------------------

    /// Read a value at the cursor.
    ///
    /// Every byte is checked before anything changes; if one is missing the
    /// cursor stays where it was. With `advance == false` this is a peek.
    pub fn read<T: WireInt>(&mut self, advance: bool) -> Result<T> {
        let start = self.cursor as usize;
        let mut bytes = T::Bytes::default();
        for (i, slot) in bytes.as_mut().iter_mut().enumerate() {
            *slot = start
                .checked_add(i)
                .and_then(|offset| self.buffer.retrieve(offset))
                .ok_or_else(|| self.out_of_range(self.cursor, T::WIDTH))?;
        }

        let value = T::decode(bytes, self.endianness);
        if advance {
            self.advance(T::WIDTH);
        }
        Ok(value)
    }

    /// Read a signed byte and advance
    pub fn read_i8(&mut self) -> Result<i8> {
        self.read(true)
    }

    /// Read an unsigned byte; whether the cursor moves must always be stated
    pub fn read_u8(&mut self, advance: bool) -> Result<u8> {
        self.read(advance)
    }

    /// Read a signed 16-bit integer and advance
    pub fn read_i16(&mut self) -> Result<i16> {
        self.read(true)
    }

    /// Read an unsigned 16-bit integer and advance
    pub fn read_u16(&mut self) -> Result<u16> {
        self.read(true)
    }

    /// Read a signed 32-bit integer and advance
    pub fn read_i32(&mut self) -> Result<i32> {
        self.read(true)
    }

    /// Read an unsigned 32-bit integer and advance
    pub fn read_u32(&mut self) -> Result<u32> {
        self.read(true)
    }

    /// Read a signed 64-bit integer and advance
    pub fn read_i64(&mut self) -> Result<i64> {
        self.read(true)
    }

    /// Read an unsigned 64-bit integer and advance
    pub fn read_u64(&mut self) -> Result<u64> {
        self.read(true)
    }

    /// Read a signed byte without moving the cursor
    pub fn peek_i8(&mut self) -> Result<i8> {
        self.read(false)
    }

    /// Read an unsigned byte without moving the cursor; same as `read_u8(false)`
    pub fn peek_u8(&mut self) -> Result<u8> {
        self.read(false)
    }

    /// Read a signed 16-bit integer without moving the cursor
    pub fn peek_i16(&mut self) -> Result<i16> {
        self.read(false)
    }

    /// Read an unsigned 16-bit integer without moving the cursor
    pub fn peek_u16(&mut self) -> Result<u16> {
        self.read(false)
    }

    /// Read a signed 32-bit integer without moving the cursor
    pub fn peek_i32(&mut self) -> Result<i32> {
        self.read(false)
    }

    /// Read an unsigned 32-bit integer without moving the cursor
    pub fn peek_u32(&mut self) -> Result<u32> {
        self.read(false)
    }

    /// Read a signed 64-bit integer without moving the cursor
    pub fn peek_i64(&mut self) -> Result<i64> {
        self.read(false)
    }

    /// Read an unsigned 64-bit integer without moving the cursor
    pub fn peek_u64(&mut self) -> Result<u64> {
        self.read(false)
    }

    /// Read a string at the cursor.
    ///
    /// - `NullTerminated`: bytes are taken one at a time until a `0x00` has
    ///   been consumed; the terminator is part of the result. The cursor moves
    ///   during the scan, so on failure it is left at the end of the buffer.
    ///   With `advance == false` it is rewound only after a successful read.
    /// - `SizeEncoded`: a u32 size is peeked first; if that fails nothing is
    ///   consumed. Then `size` payload bytes follow the header and a `0x00`
    ///   terminator is appended, so the result holds `size + 1` bytes. With
    ///   `advance == false` the cursor is rewound whether or not the read
    ///   succeeded.
    pub fn read_string(&mut self, advance: bool, encoding: StringEncoding) -> Result<Vec<u8>> {
        match encoding {
            StringEncoding::NullTerminated => self.read_null_terminated(advance),
            StringEncoding::SizeEncoded => self.read_size_encoded(advance),
        }
    }

    /// Read a null-terminated string and advance
    pub fn read_cstring(&mut self) -> Result<Vec<u8>> {
        self.read_null_terminated(true)
    }

    /// Read a size-encoded string and advance
    pub fn read_sized_string(&mut self) -> Result<Vec<u8>> {
        self.read_size_encoded(true)
    }

    fn read_null_terminated(&mut self, advance: bool) -> Result<Vec<u8>> {
        let start = self.cursor;
        let mut data = Vec::new();
        loop {
            let byte = self.read_i8()?;
            data.push(byte as u8);
            if byte == 0 {
                break;
            }
        }

        if !advance {
            self.cursor = start;
        }
        Ok(data)
    }

    fn read_size_encoded(&mut self, advance: bool) -> Result<Vec<u8>> {
        let start = self.cursor;
        let size = self.peek_u32()?;

        // The size comes off the wire; never reserve more than is actually there.
        let mut data = Vec::with_capacity((size as usize).min(self.remaining()) + 1);
        self.advance(LENGTH_HEADER_SIZE);

        for _ in 0..size {
            match self.read_i8() {
                Ok(byte) => data.push(byte as u8),
                Err(_) => {
                    let err =
                        self.out_of_range(start, size.saturating_add(LENGTH_HEADER_SIZE));
                    if !advance {
                        self.cursor = start;
                    }
                    trace!(size, offset = start, "Size-encoded string truncated");
                    return Err(err);
                }
            }
        }
        // TODO: confirm with real producers whether a 0x00 follows the payload on
        // the wire; for now the terminator is synthesized and nothing extra is consumed.
        data.push(0);

        if !advance {
            self.cursor = start;
        }
        Ok(data)
    }

    #[inline]
    fn advance(&mut self, by: u32) {
        self.cursor = match self.cursor.checked_add(by) {
            Some(next) => next,
            None => {
                warn!(cursor = self.cursor, by, "Cursor pinned at the 4 GiB limit");
                u32::MAX
            }
        };
    }

    fn out_of_range(&self, offset: u32, needed: u32) -> PacketError {
        PacketError::OutOfRange {
            offset,
            needed,
            available: self.buffer.len(),
        }
    }
}

/// Length of a byte run as it goes on the wire, clamped to `u32::MAX`
fn wire_len(len: usize) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| {
        warn!(len, "Length exceeds the 4 GiB limit, clamping");
        u32::MAX
    })
}

impl From<Vec<u8>> for Packet {
    fn from(data: Vec<u8>) -> Self {
        Self::from_vec(data)
    }
}

impl From<BytesMut> for Packet {
    fn from(data: BytesMut) -> Self {
        Self::from_parts(data, Framing::Raw)
    }
}

impl From<ByteBuffer> for Packet {
    fn from(buffer: ByteBuffer) -> Self {
        Self::from_parts(buffer, Framing::Raw)
    }
}

impl AsRef<[u8]> for Packet {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}
