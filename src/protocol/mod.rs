//! Thermomesh wire protocol
//!
//! This module provides the frame model, checksum engine, and fixed-width codec.

mod checksum;
mod codec;
mod error;
mod frame;
mod types;

pub use checksum::{ChecksumScheme, compute, validate, verify};
pub use codec::{FrameEncoder, parse, serialize};
pub use error::{Error, FramingReason, Result};
pub use frame::{Frame, Measurement};
pub use types::{DataType, NodeId};

/// Start sentinel byte
pub const START_SIGN: u8 = b'<';

/// End sentinel byte
pub const END_SIGN: u8 = b'>';

/// Final byte of every wire message
pub const TERMINATOR: u8 = 0;

/// Width of the ASCII measurement field
pub const DATA_SIZE: usize = 5;

/// Width of the ASCII node identifier
pub const NODE_ID_SIZE: usize = 10;

/// Width of the hex checksum field
pub const CHECKSUM_SIZE: usize = 2;

/// Checksum modulus (`16^CHECKSUM_SIZE`)
pub const CHECKSUM_MOD: u16 = 256;

/// Total wire message length (sentinels, tag, fields, terminator)
pub const MESSAGE_SIZE: usize = 1 + 1 + DATA_SIZE + NODE_ID_SIZE + CHECKSUM_SIZE + 2;

/// Bytes from the start sentinel through the end of the checksum field
pub(crate) const FRAMED_SIZE: usize = MESSAGE_SIZE - 2;

/// Node identifier every node accepts
pub const BROADCAST_NODE_ID: NodeId = NodeId::from_bytes([b'0'; NODE_ID_SIZE]);

const _: () = assert!(CHECKSUM_MOD as u32 <= 16u32.pow(CHECKSUM_SIZE as u32));
