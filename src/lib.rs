//! # Memory Packets
//!
//! Cursor-addressed binary packets over a growable byte buffer.
//!
//! A [`Packet`] owns its bytes and a single cursor. Typed writes place
//! fixed-width integers and strings at the cursor and never fail; typed reads
//! consume them and report [`PacketError::OutOfRange`] when the data is not
//! there yet, leaving the cursor untouched so the read can be retried.
//!
//! ## Modules
//! - [`core`]: buffer, byte order, packet and stream codec
//! - [`config`]: byte order, sizing and logging settings
//! - [`error`]: error type and `Result` alias
//! - [`utils`]: logging setup
//!
//! ## Example
//! ```rust
//! use memory_packets::{Endianness, Packet};
//!
//! let mut packet = Packet::length_prefixed().with_endianness(Endianness::Big);
//! packet.write_u8(7);
//! packet.write_buffer(b"blob");
//! packet.write_length();
//!
//! assert_eq!(packet.as_bytes(), &[0, 0, 0, 9, 7, 0, 0, 0, 4, b'b', b'l', b'o', b'b']);
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod config;
pub mod core;
pub mod error;
pub mod utils;

pub use crate::config::PacketConfig;
pub use crate::core::buffer::ByteBuffer;
pub use crate::core::codec::PacketCodec;
pub use crate::core::endian::{Endianness, WireInt};
pub use crate::core::packet::{Framing, Packet, StringEncoding};
pub use crate::error::{PacketError, Result};
