//! A mesh node: identity, send path, receive path, and control-loop state.

mod climate;
mod controller;
mod identity;

pub use climate::Climate;
pub use controller::{Mode, NodeController};
pub use identity::{ChipIdentity, IdentityProvider};

use std::time::Duration;

use bytes::Bytes;
use tracing::{instrument, trace};

use crate::config::NodeConfig;
use crate::dispatch::{HandlerRegistry, Outcome, Router, RouterMetrics};
use crate::protocol::{DataType, Error, FrameEncoder, NODE_ID_SIZE, NodeId, Result};
use crate::transport::Transport;

/// One node on the flood mesh.
#[derive(Debug)]
pub struct Node {
    encoder: FrameEncoder,
    router: Router,
    controller: NodeController,
}

impl Node {
    /// Create a node from its configuration, identity, and handler table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidNodeId`] if the identity is the broadcast
    /// sentinel.
    pub fn new(
        config: &NodeConfig,
        identity: &impl IdentityProvider,
        registry: HandlerRegistry,
    ) -> Result<Self> {
        let node_id = identity.node_id();
        if node_id.is_broadcast() {
            return Err(Error::InvalidNodeId {
                id: node_id.to_string(),
                expected: NODE_ID_SIZE,
            });
        }

        Ok(Self {
            encoder: FrameEncoder::new(node_id, config.checksum_scheme),
            router: Router::new(node_id, config.checksum_scheme, registry),
            controller: NodeController::new(
                config.interval,
                config.test_message_count,
                config.test_value,
            ),
        })
    }

    /// Create a node whose identity is derived from a hardware chip id,
    /// honoring [`NodeConfig::legacy_identity`].
    pub fn from_chip_id(config: &NodeConfig, chip_id: u32, registry: HandlerRegistry) -> Result<Self> {
        let identity = ChipIdentity::new(chip_id).with_legacy_suffix(config.legacy_identity);
        Self::new(config, &identity, registry)
    }

    /// Local identity.
    #[must_use]
    pub const fn node_id(&self) -> &NodeId {
        self.encoder.node_id()
    }

    /// Transport receive callback. Returns whether to keep flooding `bytes`.
    pub fn on_receive(&mut self, bytes: &[u8]) -> bool {
        self.router.on_receive(bytes)
    }

    /// Route a received message and report the full outcome.
    pub fn route(&mut self, bytes: &[u8]) -> Outcome {
        self.router.route(bytes)
    }

    /// Broadcast a local reading.
    #[instrument(level = "debug", skip(self, transport))]
    pub fn send_reading<T: Transport>(
        &self,
        is_temperature: bool,
        value: f32,
        transport: &mut T,
    ) -> Result<()> {
        let frame = self.encoder.build(is_temperature, value)?;
        transport.broadcast(Bytes::copy_from_slice(&self.encoder.serialize(&frame)));
        Ok(())
    }

    /// Broadcast a setpoint command for `target` (or every node).
    #[instrument(level = "debug", skip(self, transport))]
    pub fn send_command<T: Transport>(
        &self,
        data_type: DataType,
        value: f32,
        target: NodeId,
        transport: &mut T,
    ) -> Result<()> {
        let frame = self.encoder.build_command(data_type, value, target)?;
        transport.broadcast(Bytes::copy_from_slice(&self.encoder.serialize(&frame)));
        Ok(())
    }

    /// Broadcast the current temperature and humidity readings.
    pub fn publish_climate<T: Transport>(&self, climate: &Climate, transport: &mut T) -> Result<()> {
        trace!(?climate, "publishing readings");
        self.send_reading(true, climate.temperature, transport)?;
        self.send_reading(false, climate.humidity, transport)
    }

    /// One pass of the host control loop.
    pub fn poll<T: Transport>(&mut self, now: Duration, transport: &mut T) -> Result<bool> {
        self.controller.poll(now, &self.encoder, transport)
    }

    /// Control-loop state.
    #[must_use]
    pub const fn controller(&self) -> &NodeController {
        &self.controller
    }

    /// Mutable control-loop state (start/stop/reset a test run).
    pub fn controller_mut(&mut self) -> &mut NodeController {
        &mut self.controller
    }

    /// Handler table, for registrations after startup.
    pub fn registry_mut(&mut self) -> &mut HandlerRegistry {
        self.router.registry_mut()
    }

    /// Receive counters.
    #[must_use]
    pub const fn metrics(&self) -> &RouterMetrics {
        self.router.metrics()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::BROADCAST_NODE_ID;
    use crate::transport::LoopbackTransport;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn climate_node(chip_id: u32) -> (Node, Rc<RefCell<Climate>>) {
        let climate = Rc::new(RefCell::new(Climate::default()));
        let mut registry = HandlerRegistry::new();
        Climate::register(&climate, &mut registry);
        let node = Node::new(&NodeConfig::default(), &ChipIdentity::new(chip_id), registry).unwrap();
        (node, climate)
    }

    #[test]
    fn rejects_broadcast_identity() {
        let result = Node::new(
            &NodeConfig::default(),
            &ChipIdentity::new(0),
            HandlerRegistry::new(),
        );
        assert!(matches!(result, Err(Error::InvalidNodeId { .. })));
    }

    #[test]
    fn fixed_identity_is_used_as_is() {
        let id = NodeId::new("AB12345678").unwrap();
        let node = Node::new(&NodeConfig::default(), &id, HandlerRegistry::new()).unwrap();
        assert_eq!(node.node_id(), &id);
    }

    #[test]
    fn chip_identity_follows_config() {
        let legacy = Node::from_chip_id(&NodeConfig::default(), 12_345_678, HandlerRegistry::new())
            .unwrap();
        assert_eq!(legacy.node_id().as_bytes(), b"1234567818");

        let config = NodeConfig {
            legacy_identity: false,
            ..NodeConfig::default()
        };
        let corrected = Node::from_chip_id(&config, 12_345_678, HandlerRegistry::new()).unwrap();
        assert_eq!(corrected.node_id().as_bytes(), b"0012345678");
    }

    #[test]
    fn command_updates_addressed_node_only() {
        let (controller, _) = climate_node(11_111_111);
        let (mut node_a, climate_a) = climate_node(12_345_678);
        let (mut node_b, climate_b) = climate_node(87_654_321);
        let mut transport = LoopbackTransport::new();

        controller
            .send_command(DataType::TEMPERATURE_TARGET, 22.5, *node_a.node_id(), &mut transport)
            .unwrap();
        let msg = transport.drain().remove(0);

        assert!(node_a.on_receive(&msg));
        assert!(node_b.on_receive(&msg));
        assert!((climate_a.borrow().temperature_target - 22.5).abs() < f32::EPSILON);
        assert!(climate_b.borrow().temperature_target.abs() < f32::EPSILON);
    }

    #[test]
    fn broadcast_command_reaches_everyone() {
        let (controller, _) = climate_node(11_111_111);
        let (mut node_a, climate_a) = climate_node(12_345_678);
        let mut transport = LoopbackTransport::new();

        controller
            .send_command(DataType::HUMIDITY_TARGET, 50.0, BROADCAST_NODE_ID, &mut transport)
            .unwrap();
        let msg = transport.drain().remove(0);

        assert!(node_a.route(&msg).is_dispatched());
        assert!((climate_a.borrow().humidity_target - 50.0).abs() < f32::EPSILON);
    }

    #[test]
    fn readings_are_not_dispatched_without_handlers() {
        let (sensor, climate) = climate_node(12_345_678);
        let (mut peer, _) = climate_node(87_654_321);
        let mut transport = LoopbackTransport::new();

        sensor.publish_climate(&climate.borrow(), &mut transport).unwrap();
        let sent = transport.drain();
        assert_eq!(sent.len(), 2);
        for msg in &sent {
            assert_eq!(peer.route(msg), Outcome::Unregistered);
        }
    }

    #[test]
    fn out_of_range_reading_is_rejected() {
        let (sensor, _) = climate_node(12_345_678);
        let mut transport = LoopbackTransport::new();

        assert!(matches!(
            sensor.send_reading(true, 123.0, &mut transport),
            Err(Error::MeasurementOutOfRange { .. })
        ));
        assert!(transport.sent().is_empty());
    }
}
