//! Thermomesh error types

use thiserror::Error;

/// Thermomesh protocol errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// No start sentinel, or too few bytes after it
    #[error("framing error: {reason}")]
    Framing {
        /// What was wrong with the buffer
        reason: FramingReason,
    },

    /// Checksum mismatch
    #[error("checksum mismatch: expected {expected:#04x}, got {found:?}")]
    ChecksumMismatch {
        /// Recomputed checksum
        expected: u16,
        /// Checksum carried by the frame, if it was valid hex
        found: Option<u16>,
    },

    /// Value does not fit the fixed-width measurement field
    #[error("measurement {value} does not fit {width} characters")]
    MeasurementOutOfRange {
        /// Rejected value
        value: f32,
        /// Field width
        width: usize,
    },

    /// Measurement text is not a decimal number
    #[error("invalid measurement text: {text:?}")]
    InvalidMeasurement {
        /// Offending text (lossy)
        text: String,
    },

    /// Node identifier has the wrong width or contains non-printable bytes
    #[error("invalid node id {id:?}: expected {expected} printable ASCII bytes")]
    InvalidNodeId {
        /// Offending identifier (lossy)
        id: String,
        /// Required width
        expected: usize,
    },
}

/// Reasons a buffer could not be framed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramingReason {
    /// No start sentinel within the scan window
    MissingStart,
    /// Start sentinel found but the fields run past the buffer
    Truncated {
        /// Bytes needed from the start sentinel
        needed: usize,
        /// Bytes available from the start sentinel
        got: usize,
    },
}

impl std::fmt::Display for FramingReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingStart => write!(f, "no start sentinel"),
            Self::Truncated { needed, got } => {
                write!(f, "truncated frame: need {needed} bytes, got {got}")
            }
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
