//! # Byte Order
//!
//! One encode routine and one decode routine per integer width, selected at
//! runtime by [`Endianness`]. Every multi-byte read and write of a packet goes
//! through [`WireInt`], so both directions always agree on the byte order.
//!
//! 8-bit values are order-agnostic; both variants produce the same byte.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Byte order for multi-byte values on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endianness {
    /// Least significant byte first
    Little,
    /// Most significant byte first
    Big,
}

impl Default for Endianness {
    #[cfg(not(feature = "big-endian"))]
    fn default() -> Self {
        Endianness::Little
    }

    #[cfg(feature = "big-endian")]
    fn default() -> Self {
        Endianness::Big
    }
}

impl Endianness {
    /// Get human-readable name
    pub fn name(self) -> &'static str {
        match self {
            Endianness::Little => "little",
            Endianness::Big => "big",
        }
    }
}

impl fmt::Display for Endianness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Endianness {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "little" | "le" => Ok(Endianness::Little),
            "big" | "be" => Ok(Endianness::Big),
            other => Err(format!("Invalid endianness: {other}")),
        }
    }
}

/// Fixed-width integer that can be placed on and taken off the wire
pub trait WireInt: Copy + Sized {
    /// Encoded width in bytes
    const WIDTH: u32;

    /// Fixed-size byte array holding one encoded value
    type Bytes: AsRef<[u8]> + AsMut<[u8]> + Default;

    /// Encode `self` in the given byte order
    fn encode(self, order: Endianness) -> Self::Bytes;

    /// Decode a value from bytes in the given byte order
    fn decode(bytes: Self::Bytes, order: Endianness) -> Self;
}

macro_rules! impl_wire_int {
    ($($ty:ty => $width:literal),* $(,)?) => {
        $(
            impl WireInt for $ty {
                const WIDTH: u32 = $width;
                type Bytes = [u8; $width];

                #[inline]
                fn encode(self, order: Endianness) -> Self::Bytes {
                    match order {
                        Endianness::Little => self.to_le_bytes(),
                        Endianness::Big => self.to_be_bytes(),
                    }
                }

                #[inline]
                fn decode(bytes: Self::Bytes, order: Endianness) -> Self {
                    match order {
                        Endianness::Little => <$ty>::from_le_bytes(bytes),
                        Endianness::Big => <$ty>::from_be_bytes(bytes),
                    }
                }
            }
        )*
    };
}

impl_wire_int! {
    i8 => 1,
    u8 => 1,
    i16 => 2,
    u16 => 2,
    i32 => 4,
    u32 => 4,
    i64 => 8,
    u64 => 8,
}
