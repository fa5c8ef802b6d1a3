//! Three nodes exchanging readings and a setpoint over a loopback "mesh".

use std::cell::RefCell;
use std::rc::Rc;

use thermomesh::{
    BROADCAST_NODE_ID, Climate, DataType, HandlerRegistry, LoopbackTransport, Node, NodeConfig,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "debug".into()))
        .init();

    let config = NodeConfig::default();
    let mut climates = Vec::new();
    let mut nodes = Vec::new();
    for chip_id in [12_345_678, 23_456_789, 34_567_890] {
        let climate = Rc::new(RefCell::new(Climate::default()));
        let mut registry = HandlerRegistry::new();
        Climate::register(&climate, &mut registry);
        nodes.push(Node::from_chip_id(&config, chip_id, registry)?);
        climates.push(climate);
    }

    let mut air = LoopbackTransport::new();

    // Node 0 reports its readings, then commands node 2 and everyone.
    nodes[0].publish_climate(&climates[0].borrow(), &mut air)?;
    let target = *nodes[2].node_id();
    nodes[0].send_command(DataType::TEMPERATURE_TARGET, 22.5, target, &mut air)?;
    nodes[0].send_command(DataType::HUMIDITY_TARGET, 45.0, BROADCAST_NODE_ID, &mut air)?;

    for message in air.drain() {
        for node in &mut nodes[1..] {
            let outcome = node.route(&message);
            info!(
                node = %node.node_id(),
                wire = %message.escape_ascii(),
                ?outcome,
                propagate = outcome.propagate(),
                "received"
            );
        }
    }

    for (node, climate) in nodes.iter().zip(&climates) {
        info!(node = %node.node_id(), climate = ?*climate.borrow(), "final state");
    }

    Ok(())
}
