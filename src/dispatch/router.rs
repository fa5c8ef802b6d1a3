//! Per-message dispatch state machine.

use tracing::{debug, instrument, trace};

use super::{HandlerRegistry, RouterMetrics};
use crate::protocol::{self, ChecksumScheme, DataType, NodeId};

/// Terminal outcome of routing one received message.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// No start sentinel or too short; dropped, not propagated.
    Unframed,
    /// Checksum mismatch; dropped, not propagated.
    Corrupt,
    /// No handler for the tag; propagated.
    Unregistered,
    /// Addressed to another node; propagated.
    NotAddressed,
    /// Addressed and registered but the value is not a number; propagated.
    ///
    /// Diverges from deployed firmware, which dispatches the partial parse
    /// (`0.0` for garbage).
    Unreadable,
    /// Handler invoked; propagated.
    Dispatched {
        /// Tag passed to the handler.
        data_type: DataType,
        /// Value passed to the handler.
        value: f32,
    },
}

impl Outcome {
    /// Whether the transport should keep flooding the message.
    #[must_use]
    pub const fn propagate(&self) -> bool {
        !matches!(self, Self::Unframed | Self::Corrupt)
    }

    /// Whether a local handler ran.
    #[must_use]
    pub const fn is_dispatched(&self) -> bool {
        matches!(self, Self::Dispatched { .. })
    }
}

/// Decides, per message, whether to consume it locally and whether to keep
/// flooding it.
///
/// Holds no per-message state; every call to [`Router::route`] starts fresh.
#[derive(Debug)]
pub struct Router {
    local_id: NodeId,
    scheme: ChecksumScheme,
    registry: HandlerRegistry,
    metrics: RouterMetrics,
}

impl Router {
    /// Create a router for the node identified by `local_id`.
    #[must_use]
    pub fn new(local_id: NodeId, scheme: ChecksumScheme, registry: HandlerRegistry) -> Self {
        Self {
            local_id,
            scheme,
            registry,
            metrics: RouterMetrics::default(),
        }
    }

    /// Local identity frames are matched against.
    #[must_use]
    pub const fn local_id(&self) -> &NodeId {
        &self.local_id
    }

    /// Handler table.
    pub fn registry_mut(&mut self) -> &mut HandlerRegistry {
        &mut self.registry
    }

    /// Receive counters.
    #[must_use]
    pub const fn metrics(&self) -> &RouterMetrics {
        &self.metrics
    }

    /// Transport receive callback: route `bytes` and report whether to keep
    /// flooding them.
    pub fn on_receive(&mut self, bytes: &[u8]) -> bool {
        self.route(bytes).propagate()
    }

    /// Route one raw message to its handler, if any.
    #[instrument(level = "trace", skip(self, bytes), fields(len = bytes.len()))]
    pub fn route(&mut self, bytes: &[u8]) -> Outcome {
        let outcome = self.classify(bytes);
        self.metrics.record(&outcome);
        outcome
    }

    fn classify(&mut self, bytes: &[u8]) -> Outcome {
        let frame = match protocol::parse(bytes) {
            Ok(frame) => frame,
            Err(err) => {
                debug!(error = %err, "dropping unframed message");
                return Outcome::Unframed;
            }
        };

        if let Err(err) = protocol::verify(&frame, self.scheme) {
            debug!(error = %err, node = %frame.node_id(), "dropping corrupt frame");
            return Outcome::Corrupt;
        }

        let data_type = frame.data_type();
        let Some(handler) = self.registry.get_mut(data_type) else {
            trace!(%data_type, "no handler registered");
            return Outcome::Unregistered;
        };

        let node_id = frame.node_id();
        if *node_id != self.local_id && !node_id.is_broadcast() {
            trace!(%data_type, node = %node_id, "frame addressed elsewhere");
            return Outcome::NotAddressed;
        }

        match frame.measurement().value() {
            Ok(value) => {
                debug!(%data_type, value, node = %node_id, "dispatching frame");
                handler(data_type, value);
                Outcome::Dispatched { data_type, value }
            }
            Err(err) => {
                debug!(error = %err, %data_type, "dropping unreadable measurement");
                Outcome::Unreadable
            }
        }
    }
}
