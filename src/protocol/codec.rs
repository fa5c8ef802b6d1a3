//! Thermomesh frame codec (build/serialize/parse)
//!
//! Messages are fixed width; nothing here allocates per frame.

use tracing::trace;

use super::checksum::{self, ChecksumScheme};
use super::error::FramingReason;
use super::{
    CHECKSUM_SIZE, DATA_SIZE, DataType, END_SIGN, Error, FRAMED_SIZE, Frame, MESSAGE_SIZE,
    Measurement, NODE_ID_SIZE, NodeId, Result, START_SIGN, TERMINATOR,
};

const TAG_OFFSET: usize = 1;
const DATA_OFFSET: usize = TAG_OFFSET + 1;
const NODE_ID_OFFSET: usize = DATA_OFFSET + DATA_SIZE;
const CHECKSUM_OFFSET: usize = NODE_ID_OFFSET + NODE_ID_SIZE;
const END_OFFSET: usize = CHECKSUM_OFFSET + CHECKSUM_SIZE;

/// Builds and serializes frames on behalf of the local node
#[derive(Debug, Clone, Copy)]
pub struct FrameEncoder {
    node_id: NodeId,
    scheme: ChecksumScheme,
}

impl FrameEncoder {
    /// Create an encoder stamping frames with `node_id`
    #[must_use]
    pub const fn new(node_id: NodeId, scheme: ChecksumScheme) -> Self {
        Self { node_id, scheme }
    }

    /// Local identity written into built frames
    #[must_use]
    pub const fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    /// Checksum rule used when serializing
    #[must_use]
    pub const fn scheme(&self) -> ChecksumScheme {
        self.scheme
    }

    /// Build a reading frame from a local measurement
    ///
    /// # Errors
    ///
    /// Returns [`Error::MeasurementOutOfRange`] if the two-decimal rendering
    /// of `value` does not fit the measurement field.
    pub fn build(&self, is_temperature: bool, value: f32) -> Result<Frame> {
        let data_type = if is_temperature {
            DataType::Temperature
        } else {
            DataType::Humidity
        };
        self.build_tagged(data_type, value, self.node_id)
    }

    /// Build a command frame for `target` (a node id or the broadcast sentinel)
    pub fn build_command(&self, data_type: DataType, value: f32, target: NodeId) -> Result<Frame> {
        self.build_tagged(data_type, value, target)
    }

    /// Serialize a frame, recomputing its checksum
    #[must_use]
    pub fn serialize(&self, frame: &Frame) -> [u8; MESSAGE_SIZE] {
        serialize(frame, self.scheme)
    }

    fn build_tagged(&self, data_type: DataType, value: f32, node_id: NodeId) -> Result<Frame> {
        let measurement = Measurement::format(value)?;
        let mut frame = Frame::from_parts(data_type, measurement, node_id, [b'0'; CHECKSUM_SIZE]);
        frame.set_checksum(checksum::render(checksum::compute(&frame, self.scheme)));
        trace!(%data_type, %measurement, %node_id, "built frame");
        Ok(frame)
    }
}

/// Serialize a frame to a fixed-width wire message
///
/// # Format
///
/// ```text
/// [START] [TAG] [MEASUREMENT (5)] [NODE ID (10)] [CHECKSUM (2 hex)] [END] [0x00]
/// ```
///
/// The checksum is always recomputed with `scheme`; the frame's own checksum
/// text is ignored.
#[must_use]
pub fn serialize(frame: &Frame, scheme: ChecksumScheme) -> [u8; MESSAGE_SIZE] {
    let checksum = checksum::render(checksum::compute(frame, scheme));

    let mut msg = [0u8; MESSAGE_SIZE];
    msg[0] = START_SIGN;
    msg[TAG_OFFSET] = frame.data_type().as_u8();
    msg[DATA_OFFSET..NODE_ID_OFFSET].copy_from_slice(frame.measurement().as_bytes());
    msg[NODE_ID_OFFSET..CHECKSUM_OFFSET].copy_from_slice(frame.node_id().as_bytes());
    msg[CHECKSUM_OFFSET..END_OFFSET].copy_from_slice(&checksum);
    msg[MESSAGE_SIZE - 2] = END_SIGN;
    msg[MESSAGE_SIZE - 1] = TERMINATOR;
    msg
}

/// Parse a wire message into a frame
///
/// Scans at most `MESSAGE_SIZE` bytes for the start sentinel, then reads the
/// fixed-width fields after it. The end sentinel and terminator are not
/// required; transports that stop at the terminator deliver
/// `MESSAGE_SIZE - 1` bytes.
///
/// # Errors
///
/// Returns [`Error::Framing`] if no start sentinel is found or the fields run
/// past the end of `bytes`. The checksum is not checked here.
pub fn parse(bytes: &[u8]) -> Result<Frame> {
    let window = &bytes[..bytes.len().min(MESSAGE_SIZE)];
    let start = window
        .iter()
        .position(|&b| b == START_SIGN)
        .ok_or(Error::Framing {
            reason: FramingReason::MissingStart,
        })?;

    let framed = bytes
        .get(start..start + FRAMED_SIZE)
        .ok_or(Error::Framing {
            reason: FramingReason::Truncated {
                needed: FRAMED_SIZE,
                got: bytes.len() - start,
            },
        })?;

    let data_type = DataType::from_u8(framed[TAG_OFFSET]);
    let measurement = Measurement::from_bytes(field(framed, DATA_OFFSET));
    let node_id = NodeId::from_bytes(field(framed, NODE_ID_OFFSET));
    let checksum = field(framed, CHECKSUM_OFFSET);

    trace!(offset = start, %data_type, %measurement, %node_id, "parsed frame");
    Ok(Frame::from_parts(data_type, measurement, node_id, checksum))
}

fn field<const N: usize>(framed: &[u8], offset: usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&framed[offset..offset + N]);
    out
}
