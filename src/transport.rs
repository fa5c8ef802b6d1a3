//! Flood transport adapter.
//!
//! The mesh itself (relaying, encryption, join handshakes) lives outside this
//! crate. Hosts implement [`Transport`] for their radio stack and feed every
//! received message to [`Node::on_receive`](crate::Node::on_receive), handing
//! the returned flag back to the mesh.

use bytes::Bytes;
use tracing::trace;

/// Best-effort broadcast send primitive.
pub trait Transport {
    /// Fire-and-forget flood send; no delivery or ordering guarantee.
    fn broadcast(&mut self, message: Bytes);
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn broadcast(&mut self, message: Bytes) {
        (**self).broadcast(message);
    }
}

/// Transport that records outbound messages instead of sending them.
#[derive(Debug, Default, Clone)]
pub struct LoopbackTransport {
    sent: Vec<Bytes>,
}

impl LoopbackTransport {
    /// Create an empty loopback.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages broadcast so far.
    #[must_use]
    pub fn sent(&self) -> &[Bytes] {
        &self.sent
    }

    /// Take every recorded message, oldest first.
    pub fn drain(&mut self) -> Vec<Bytes> {
        std::mem::take(&mut self.sent)
    }
}

impl Transport for LoopbackTransport {
    fn broadcast(&mut self, message: Bytes) {
        trace!(len = message.len(), "loopback broadcast");
        self.sent.push(message);
    }
}
