//! Frame tags and node identifiers

use std::fmt;

use super::{BROADCAST_NODE_ID, Error, NODE_ID_SIZE, Result};

/// Frame data type tag
///
/// Readings carry their own tag; every other byte is a target/command tag
/// whose value lives in the shared target field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DataType {
    /// Temperature reading (`'T'`)
    Temperature,
    /// Humidity reading (`'H'`)
    Humidity,
    /// Target or command value, carrying its raw tag byte
    ///
    /// Frames store `Target(b'T')` and `Target(b'H')` as the matching reading.
    Target(u8),
}

impl DataType {
    /// Temperature setpoint command (`'t'`)
    pub const TEMPERATURE_TARGET: Self = Self::Target(b't');
    /// Humidity setpoint command (`'h'`)
    pub const HUMIDITY_TARGET: Self = Self::Target(b'h');

    const TEMPERATURE_TAG: u8 = b'T';
    const HUMIDITY_TAG: u8 = b'H';

    /// Convert from the wire tag byte
    #[must_use]
    pub const fn from_u8(value: u8) -> Self {
        match value {
            Self::TEMPERATURE_TAG => Self::Temperature,
            Self::HUMIDITY_TAG => Self::Humidity,
            other => Self::Target(other),
        }
    }

    /// Convert to the wire tag byte
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Temperature => Self::TEMPERATURE_TAG,
            Self::Humidity => Self::HUMIDITY_TAG,
            Self::Target(tag) => tag,
        }
    }

    /// Check if this tag carries a sensor reading
    #[must_use]
    pub const fn is_reading(self) -> bool {
        matches!(self, Self::Temperature | Self::Humidity)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Temperature => write!(f, "Temperature"),
            Self::Humidity => write!(f, "Humidity"),
            Self::Target(tag) => write!(f, "Target({})", tag.escape_ascii()),
        }
    }
}

/// Fixed-width node identifier
///
/// Identifiers built locally are validated printable ASCII. Identifiers read
/// off the wire are kept byte-for-byte so they can be compared and re-summed.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId([u8; NODE_ID_SIZE]);

impl NodeId {
    /// Wrap raw identifier bytes without validation
    #[must_use]
    pub const fn from_bytes(bytes: [u8; NODE_ID_SIZE]) -> Self {
        Self(bytes)
    }

    /// Parse an identifier of exactly `NODE_ID_SIZE` printable ASCII characters
    pub fn new(id: &str) -> Result<Self> {
        let invalid = || Error::InvalidNodeId {
            id: id.to_owned(),
            expected: NODE_ID_SIZE,
        };
        if !id.bytes().all(|b| b.is_ascii_graphic()) {
            return Err(invalid());
        }
        let bytes: [u8; NODE_ID_SIZE] = id.as_bytes().try_into().map_err(|_| invalid())?;
        Ok(Self(bytes))
    }

    /// Raw identifier bytes
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; NODE_ID_SIZE] {
        &self.0
    }

    /// Check if this is the broadcast sentinel
    #[must_use]
    pub fn is_broadcast(&self) -> bool {
        *self == BROADCAST_NODE_ID
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.escape_ascii())
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId(\"{self}\")")
    }
}

impl std::str::FromStr for NodeId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}
