//! # Error Types
//!
//! Error handling for packet reads, framing and configuration.
//!
//! Writes into a [`Packet`](crate::core::packet::Packet) never fail: the buffer
//! grows as needed. Reads report [`PacketError::OutOfRange`] when fewer bytes
//! remain than the value needs. That error is not fatal; in streaming use it
//! means "not enough data yet" and the read can be retried once more bytes have
//! been fed into the packet.
//!
//! ## Error Categories
//! - **Range Errors**: reads or peeks past the end of the buffer
//! - **Framing Errors**: frames larger than the configured maximum
//! - **I/O Errors**: surfaced by the stream codec and config loading
//! - **Configuration Errors**: unreadable or invalid settings
//!
//! ## Example Usage
//! ```rust
//! use memory_packets::error::{PacketError, Result};
//! use memory_packets::Packet;
//!
//! fn header(packet: &mut Packet) -> Result<(u8, u16)> {
//!     let kind = packet.read_u8(true)?;
//!     let len = packet.read_u16()?;
//!     Ok((kind, len))
//! }
//!
//! let mut packet = Packet::from_slice(&[0x01, 0x02]);
//! match header(&mut packet) {
//!     Err(PacketError::OutOfRange { needed, .. }) => assert_eq!(needed, 2),
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

use std::io;
use thiserror::Error;

/// Error message constants to reduce allocations in error paths.
pub mod constants {
    /// Configuration errors
    pub const ERR_CONFIG_OPEN: &str = "Failed to open config file";
    pub const ERR_CONFIG_READ: &str = "Failed to read config file";
    pub const ERR_CONFIG_PARSE: &str = "Failed to parse TOML";
    pub const ERR_CONFIG_SERIALIZE: &str = "Failed to serialize config";
    pub const ERR_CONFIG_WRITE: &str = "Failed to write config file";
    pub const ERR_CONFIG_INVALID: &str = "Configuration validation failed";

    /// Logging errors
    pub const ERR_LOGGING_INIT: &str = "Failed to install tracing subscriber";
}

// PacketError is the error type for every fallible operation in the crate
#[derive(Error, Debug)]
pub enum PacketError {
    /// A read needed `needed` bytes starting at `offset` but the buffer holds
    /// only `available` bytes in total.
    #[error("Out of range: need {needed} byte(s) at offset {offset}, buffer holds {available}")]
    OutOfRange {
        offset: u32,
        needed: u32,
        available: usize,
    },

    #[error("Packet too large: {0} bytes")]
    OversizedPacket(usize),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl PacketError {
    /// Whether this error only signals missing data, so the same read may
    /// succeed after more bytes arrive.
    pub fn is_retryable(&self) -> bool {
        matches!(self, PacketError::OutOfRange { .. })
    }
}

/// Type alias for Results using PacketError
pub type Result<T> = std::result::Result<T, PacketError>;
