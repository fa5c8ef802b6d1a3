//! Modular-sum checksum engine and validator
//!
//! The checksum is a weak integrity check, not a MAC: single-byte changes
//! that shift the sum by a multiple of `CHECKSUM_MOD` go undetected.

use tracing::trace;

use super::{CHECKSUM_MOD, CHECKSUM_SIZE, DataType, Error, Frame, Result, START_SIGN};

/// Which summation rule a node speaks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChecksumScheme {
    /// Start sentinel, tag, measurement and node id, each byte summed once
    #[default]
    Standard,
    /// Deployed firmware rule: temperature frames sum the measurement twice
    /// (the temperature buffer, then the target buffer aliasing it)
    Legacy,
}

/// Compute the checksum of a frame
///
/// The measurement field stands in for every measurement buffer: the
/// temperature buffer for `Temperature`, the target buffer for every other
/// tag. Humidity frames therefore sum the target buffer, which holds the
/// same bytes.
#[must_use]
pub fn compute(frame: &Frame, scheme: ChecksumScheme) -> u16 {
    let measurement = byte_sum(frame.measurement().as_bytes());

    let mut sum = u16::from(START_SIGN);
    sum = sum.wrapping_add(u16::from(frame.data_type().as_u8()));
    sum = sum.wrapping_add(measurement);
    if scheme == ChecksumScheme::Legacy
        && frame.data_type().as_u8() == DataType::Temperature.as_u8()
    {
        sum = sum.wrapping_add(measurement);
    }
    sum = sum.wrapping_add(byte_sum(frame.node_id().as_bytes()));

    sum % CHECKSUM_MOD
}

/// Render a checksum as fixed-width lowercase hex
pub(crate) fn render(checksum: u16) -> [u8; CHECKSUM_SIZE] {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = [b'0'; CHECKSUM_SIZE];
    let mut rest = checksum;
    for slot in out.iter_mut().rev() {
        *slot = HEX[usize::from(rest & 0xF)];
        rest >>= 4;
    }
    out
}

/// Recompute the checksum and compare it with the one the frame carries
#[must_use]
pub fn validate(frame: &Frame, scheme: ChecksumScheme) -> bool {
    verify(frame, scheme).is_ok()
}

/// Like [`validate`], reporting both values on mismatch
///
/// Checksum text that is not hex never matches.
pub fn verify(frame: &Frame, scheme: ChecksumScheme) -> Result<()> {
    let expected = compute(frame, scheme);
    let found = frame.checksum_value();
    trace!(expected, ?found, "verify checksum");
    if found == Some(expected) {
        Ok(())
    } else {
        Err(Error::ChecksumMismatch { expected, found })
    }
}

fn byte_sum(bytes: &[u8]) -> u16 {
    bytes
        .iter()
        .fold(0u16, |acc, &b| acc.wrapping_add(u16::from(b)))
}
