//! # Packet Codec
//!
//! `tokio-util` codec splitting a byte stream into length-prefixed packets.
//!
//! ## Wire Format
//! ```text
//! [Length(4)] [Payload(Length)]
//! ```
//!
//! Decoded packets keep their header and are positioned at the first payload
//! byte, so a reader can start consuming values right away. Incomplete frames
//! are left in the source buffer until the rest arrives.

use super::endian::{Endianness, WireInt};
use super::packet::{Framing, Packet};
use crate::config::{PacketConfig, LENGTH_HEADER_SIZE, MAX_PAYLOAD_SIZE};
use crate::error::{PacketError, Result};
use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};
use tracing::{debug, warn};

const HEADER: usize = LENGTH_HEADER_SIZE as usize;

/// Frames `[u32 length][payload]` on a byte stream
#[derive(Debug, Clone, Copy)]
pub struct PacketCodec {
    endianness: Endianness,
    max_payload_size: usize,
}

impl Default for PacketCodec {
    fn default() -> Self {
        Self {
            endianness: Endianness::default(),
            max_payload_size: MAX_PAYLOAD_SIZE,
        }
    }
}

impl PacketCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &PacketConfig) -> Self {
        Self {
            endianness: config.endianness,
            max_payload_size: config.max_payload_size,
        }
    }

    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    pub fn max_payload_size(&self) -> usize {
        self.max_payload_size
    }
}

impl Decoder for PacketCodec {
    type Item = Packet;
    type Error = PacketError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>> {
        if src.len() < HEADER {
            return Ok(None);
        }

        let mut header = [0u8; HEADER];
        header.copy_from_slice(&src[..HEADER]);
        let length = u32::decode(header, self.endianness) as usize;

        if length > self.max_payload_size {
            warn!(
                length,
                max = self.max_payload_size,
                "Rejecting oversized frame"
            );
            return Err(PacketError::OversizedPacket(length));
        }

        let total = HEADER + length;
        if src.len() < total {
            src.reserve(total - src.len());
            return Ok(None);
        }

        let frame = src.split_to(total);
        debug!(length, "Decoded frame");
        Ok(Some(
            Packet::from_parts(frame, Framing::LengthPrefixed).with_endianness(self.endianness),
        ))
    }
}

impl Encoder<Packet> for PacketCodec {
    type Error = PacketError;

    /// Raw packets are sent whole as the payload; length-prefixed packets
    /// have their existing header replaced by a fresh one.
    fn encode(&mut self, item: Packet, dst: &mut BytesMut) -> Result<()> {
        let bytes = item.as_bytes();
        let payload = match item.framing() {
            Framing::Raw => bytes,
            Framing::LengthPrefixed => bytes.get(HEADER..).unwrap_or_default(),
        };

        if payload.len() > self.max_payload_size {
            warn!(
                length = payload.len(),
                max = self.max_payload_size,
                "Refusing to encode oversized packet"
            );
            return Err(PacketError::OversizedPacket(payload.len()));
        }

        dst.reserve(HEADER + payload.len());
        dst.extend_from_slice(&(payload.len() as u32).encode(self.endianness));
        dst.extend_from_slice(payload);
        Ok(())
    }
}
