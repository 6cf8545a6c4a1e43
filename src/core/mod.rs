//! # Core Packet Components
//!
//! Byte storage, byte order, the cursor-based packet and the stream codec.
//!
//! ## Components
//! - **Endian**: one encode/decode routine per integer width
//! - **Buffer**: owned, growable storage with offset-addressed writes
//! - **Packet**: typed reads and writes around a single cursor
//! - **Codec**: Tokio codec for framing packets over byte streams
//!
//! ## Wire Format
//! ```text
//! [Length(4)] [Payload(N)]
//! ```
//!
//! ## Safety
//! - Reads never extend the buffer and never panic on short input
//! - Untrusted size fields never drive allocations beyond the bytes present
//! - Frames above the configured maximum are rejected before buffering

pub mod buffer;
pub mod codec;
pub mod endian;
pub mod packet;
