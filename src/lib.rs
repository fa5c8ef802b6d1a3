//! Thermomesh - fixed-width telemetry and setpoint framing for flood meshes
//!
//! Sensor readings (temperature, humidity) and setpoint commands travel as
//! fixed-length ASCII frames over a best-effort flood transport. This crate
//! builds, serializes, parses, and validates those frames, and decides for
//! every received message whether to hand it to a local handler and whether
//! the mesh should keep relaying it.
//!
//! # Quick Start
//!
//! ```rust
//! use thermomesh::{ChecksumScheme, FrameEncoder, NodeId, parse, validate};
//!
//! let encoder = FrameEncoder::new(NodeId::new("AB12345678")?, ChecksumScheme::Standard);
//! let frame = encoder.build(true, 23.45)?;
//! let wire = encoder.serialize(&frame);
//! assert_eq!(&wire, b"<T23.45AB12345678b3>\0");
//!
//! let decoded = parse(&wire)?;
//! assert!(validate(&decoded, ChecksumScheme::Standard));
//! # Ok::<(), thermomesh::Error>(())
//! ```
//!
//! # Receive path
//!
//! Every message the transport delivers goes through [`Node::on_receive`]
//! (or [`Router::on_receive`]). The returned flag is `false` only for
//! messages that could not be framed or failed their checksum; everything
//! else keeps flooding, whether or not it was consumed locally.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod dispatch;
pub mod node;
pub mod protocol;
pub mod transport;

pub use config::NodeConfig;
pub use dispatch::{HandlerRegistry, Outcome, Router};
pub use node::{ChipIdentity, Climate, IdentityProvider, Node};
pub use protocol::{
    BROADCAST_NODE_ID, ChecksumScheme, DataType, Error, Frame, FrameEncoder, MESSAGE_SIZE,
    NodeId, Result, parse, serialize, validate,
};
pub use transport::{LoopbackTransport, Transport};

/// Wire protocol version
pub const VERSION: &str = "1.0.0";
