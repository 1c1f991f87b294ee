//! Decoded / to-be-transmitted radio packets.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{MAX_BITS, protocol};
use crate::error::RadioError;

/// Bounded `'0'`/`'1'` string.  Fixed capacity so the capture path can
/// build one inside the interrupt handler without allocating.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Bits(heapless::String<MAX_BITS>);

impl Bits {
    pub const fn new() -> Self {
        Self(heapless::String::new())
    }

    /// Append one bit.  Fails once [`MAX_BITS`] is reached.
    pub fn push(&mut self, bit: bool) -> Result<(), RadioError> {
        self.0
            .push(if bit { '1' } else { '0' })
            .map_err(|_| RadioError::TooManyBits)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Bits in transmission order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.bytes().map(|b| b == b'1')
    }
}

impl FromStr for Bits {
    type Err = RadioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bits = Self::new();
        for c in s.chars() {
            match c {
                '0' => bits.push(false)?,
                '1' => bits.push(true)?,
                _ => return Err(RadioError::InvalidBit),
            }
        }
        Ok(bits)
    }
}

impl TryFrom<String> for Bits {
    type Error = RadioError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Bits> for String {
    fn from(bits: Bits) -> Self {
        bits.as_str().into()
    }
}

impl fmt::Display for Bits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A protocol identifier plus the bits carried in one frame.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPacket")]
pub struct Packet {
    /// 1-based index into the protocol table.
    pub protocol: u8,
    pub bits: Bits,
}

/// Wire form of [`Packet`] before the protocol identifier is checked.
#[derive(Deserialize)]
struct RawPacket {
    protocol: u8,
    bits: Bits,
}

impl TryFrom<RawPacket> for Packet {
    type Error = RadioError;

    fn try_from(raw: RawPacket) -> Result<Self, Self::Error> {
        Self::new(raw.protocol, raw.bits)
    }
}

impl Packet {
    /// Build a packet, rejecting identifiers the table does not know.
    pub fn new(protocol: u8, bits: Bits) -> Result<Self, RadioError> {
        protocol::try_get(protocol).ok_or(RadioError::UnknownProtocol(protocol))?;
        Ok(Self { protocol, bits })
    }

    /// Parse `bits` and build a packet.
    pub fn parse(protocol: u8, bits: &str) -> Result<Self, RadioError> {
        Self::new(protocol, bits.parse()?)
    }
}

impl fmt::Display for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "protocol={} bits={}", self.protocol, self.bits)
    }
}
