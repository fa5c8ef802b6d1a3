//! Thermomesh frame model

use std::fmt;

use super::{CHECKSUM_SIZE, DATA_SIZE, DataType, Error, NodeId, Result};

/// Fixed-width ASCII measurement field
///
/// Always exactly `DATA_SIZE` bytes: decimal text with two fractional digits,
/// zero-padded on the left when the rendering is shorter than the field.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Measurement([u8; DATA_SIZE]);

impl Measurement {
    /// Format a value with two fractional digits
    ///
    /// Values whose rendering needs more than `DATA_SIZE` characters are
    /// rejected instead of truncated.
    pub fn format(value: f32) -> Result<Self> {
        let out_of_range = || Error::MeasurementOutOfRange {
            value,
            width: DATA_SIZE,
        };
        if !value.is_finite() {
            return Err(out_of_range());
        }
        let text = format!("{value:0width$.2}", width = DATA_SIZE);
        let bytes: [u8; DATA_SIZE] = text.as_bytes().try_into().map_err(|_| out_of_range())?;
        Ok(Self(bytes))
    }

    /// Wrap raw field bytes without validation
    #[must_use]
    pub const fn from_bytes(bytes: [u8; DATA_SIZE]) -> Self {
        Self(bytes)
    }

    /// Raw field bytes
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; DATA_SIZE] {
        &self.0
    }

    /// Parse the field as a decimal value
    pub fn value(&self) -> Result<f32> {
        let invalid = || Error::InvalidMeasurement {
            text: String::from_utf8_lossy(&self.0).into_owned(),
        };
        let text = std::str::from_utf8(&self.0).map_err(|_| invalid())?;
        let value: f32 = text.trim().parse().map_err(|_| invalid())?;
        if value.is_finite() { Ok(value) } else { Err(invalid()) }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.escape_ascii())
    }
}

impl fmt::Debug for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Measurement(\"{self}\")")
    }
}

/// One sensor reading or command, before encoding or after decoding
///
/// # Wire Format
///
/// ```text
/// +-------+-----+-------------+-------------+----------+-----+------+
/// | START | tag | measurement |   node id   | checksum | END | 0x00 |
/// |   1   |  1  |  DATA_SIZE  | NODE_ID_SIZE| CHK_SIZE |  1  |  1   |
/// +-------+-----+-------------+-------------+----------+-----+------+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    data_type: DataType,
    measurement: Measurement,
    node_id: NodeId,
    checksum: [u8; CHECKSUM_SIZE],
}

impl Frame {
    /// Assemble a frame from its fields
    ///
    /// The tag is canonicalized, so `Target(b'T')` becomes `Temperature`.
    #[must_use]
    pub const fn from_parts(
        data_type: DataType,
        measurement: Measurement,
        node_id: NodeId,
        checksum: [u8; CHECKSUM_SIZE],
    ) -> Self {
        Self {
            data_type: DataType::from_u8(data_type.as_u8()),
            measurement,
            node_id,
            checksum,
        }
    }

    /// Get the data type tag
    #[must_use]
    pub const fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Get the measurement field
    #[must_use]
    pub const fn measurement(&self) -> &Measurement {
        &self.measurement
    }

    /// Get the sender (or addressee) identifier
    #[must_use]
    pub const fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    /// Get the hex checksum text carried by the frame
    #[must_use]
    pub const fn checksum_text(&self) -> &[u8; CHECKSUM_SIZE] {
        &self.checksum
    }

    /// Parse the checksum text as a hex value
    #[must_use]
    pub fn checksum_value(&self) -> Option<u16> {
        let text = std::str::from_utf8(&self.checksum).ok()?;
        u16::from_str_radix(text, 16).ok()
    }

    pub(crate) fn set_checksum(&mut self, checksum: [u8; CHECKSUM_SIZE]) {
        self.checksum = checksum;
    }
}
