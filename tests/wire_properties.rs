use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;
use thermomesh::{
    BROADCAST_NODE_ID, ChecksumScheme, DataType, FrameEncoder, HandlerRegistry, MESSAGE_SIZE,
    NodeId, Outcome, Router, parse, validate,
};

const MEASUREMENT: std::ops::Range<usize> = 2..7;
const NODE_ID: std::ops::Range<usize> = 7..17;

type Calls = Rc<RefCell<Vec<(DataType, f32)>>>;

fn local() -> NodeId {
    NodeId::new("AB12345678").unwrap()
}

fn router(tags: &[DataType]) -> (Router, Calls) {
    let calls: Calls = Rc::default();
    let mut registry = HandlerRegistry::new();
    for &tag in tags {
        let sink = Rc::clone(&calls);
        registry.register(tag, move |t, v| sink.borrow_mut().push((t, v)));
    }
    (Router::new(local(), ChecksumScheme::Standard, registry), calls)
}

fn wire(data_type: DataType, value: f32, node_id: NodeId) -> [u8; MESSAGE_SIZE] {
    let encoder = FrameEncoder::new(node_id, ChecksumScheme::Standard);
    encoder.serialize(&encoder.build_command(data_type, value, node_id).unwrap())
}

fn data_type_strategy() -> impl Strategy<Value = DataType> {
    prop_oneof![
        Just(DataType::Temperature),
        Just(DataType::Humidity),
        Just(DataType::TEMPERATURE_TARGET),
        Just(DataType::HUMIDITY_TARGET),
        (b'a'..=b'z').prop_map(DataType::from_u8),
    ]
}

fn node_id_strategy() -> impl Strategy<Value = NodeId> {
    "[A-Z0-9]{10}".prop_map(|s| NodeId::new(&s).unwrap())
}

#[test]
fn concrete_temperature_frame() {
    let encoder = FrameEncoder::new(local(), ChecksumScheme::Standard);
    let msg = encoder.serialize(&encoder.build(true, 23.45).unwrap());
    assert_eq!(&msg, b"<T23.45AB12345678b3>\0");

    let frame = parse(&msg).unwrap();
    assert_eq!(frame.data_type(), DataType::Temperature);
    assert_eq!(frame.node_id(), &local());
    assert!((frame.measurement().value().unwrap() - 23.45).abs() < 1e-4);
}

#[test]
fn compensating_edits_escape_the_checksum() {
    // Weak modular sum: +1 on one byte and -1 on another cancel out.
    let mut msg = wire(DataType::TEMPERATURE_TARGET, 22.5, local());
    msg[2] += 1;
    msg[3] -= 1;

    let frame = parse(&msg).unwrap();
    assert!(validate(&frame, ChecksumScheme::Standard));
    assert_eq!(frame.measurement().as_bytes(), b"31.50");
}

proptest! {
    /// Property: decode(encode(frame)) keeps tag, text, and id
    #[test]
    fn prop_roundtrip(
        data_type in data_type_strategy(),
        value in -9.99f32..99.99,
        node_id in node_id_strategy(),
    ) {
        let msg = wire(data_type, value, node_id);
        let frame = parse(&msg).unwrap();
        let expected = format!("{value:05.2}");

        prop_assert_eq!(frame.data_type(), data_type);
        prop_assert_eq!(&frame.measurement().as_bytes()[..], expected.as_bytes());
        prop_assert_eq!(frame.node_id(), &node_id);
    }

    /// Property: a freshly encoded frame always validates
    #[test]
    fn prop_encoded_frames_validate(
        data_type in data_type_strategy(),
        value in -9.99f32..99.99,
        node_id in node_id_strategy(),
    ) {
        let frame = parse(&wire(data_type, value, node_id)).unwrap();
        prop_assert!(validate(&frame, ChecksumScheme::Standard));
    }

    /// Property: a single substituted byte in measurement or id is caught
    /// and the message is not propagated
    #[test]
    fn prop_single_byte_tamper_suppressed(
        value in -9.99f32..99.99,
        in_node_id in any::<bool>(),
        index in 0usize..5,
        replacement in any::<u8>(),
    ) {
        let mut msg = wire(DataType::TEMPERATURE_TARGET, value, local());
        let offset = if in_node_id { NODE_ID.start + index * 2 } else { MEASUREMENT.start + index };
        prop_assume!(msg[offset] != replacement);
        msg[offset] = replacement;

        let (mut router, calls) = router(&[DataType::TEMPERATURE_TARGET]);
        prop_assert_eq!(router.route(&msg), Outcome::Corrupt);
        prop_assert!(calls.borrow().is_empty());
    }

    /// Property: broadcast-addressed frames dispatch on every node
    #[test]
    fn prop_broadcast_dispatched(value in -9.99f32..99.99) {
        let (mut router, calls) = router(&[DataType::HUMIDITY_TARGET]);
        let outcome = router.route(&wire(DataType::HUMIDITY_TARGET, value, BROADCAST_NODE_ID));

        prop_assert!(outcome.is_dispatched());
        prop_assert!(outcome.propagate());
        prop_assert_eq!(calls.borrow().len(), 1);
    }

    /// Property: frames for other nodes never dispatch but always propagate
    #[test]
    fn prop_foreign_not_dispatched(
        node_id in node_id_strategy().prop_filter("foreign", |id| *id != local() && !id.is_broadcast()),
        value in -9.99f32..99.99,
    ) {
        let (mut router, calls) = router(&[DataType::TEMPERATURE_TARGET]);
        let outcome = router.route(&wire(DataType::TEMPERATURE_TARGET, value, node_id));

        prop_assert_eq!(outcome, Outcome::NotAddressed);
        prop_assert!(outcome.propagate());
        prop_assert!(calls.borrow().is_empty());
    }

    /// Property: tags without a handler never dispatch but always propagate
    #[test]
    fn prop_unregistered_not_dispatched(
        data_type in data_type_strategy().prop_filter("unregistered", |t| *t != DataType::TEMPERATURE_TARGET),
        value in -9.99f32..99.99,
    ) {
        let (mut router, calls) = router(&[DataType::TEMPERATURE_TARGET]);
        let outcome = router.route(&wire(data_type, value, local()));

        prop_assert_eq!(outcome, Outcome::Unregistered);
        prop_assert!(outcome.propagate());
        prop_assert!(calls.borrow().is_empty());
    }

    /// Property: arbitrary bytes never dispatch unless they frame and validate
    #[test]
    fn prop_garbage_is_harmless(bytes in prop::collection::vec(any::<u8>(), 0..48)) {
        let (mut router, _) = router(&[DataType::TEMPERATURE_TARGET]);
        let outcome = router.route(&bytes);
        if matches!(outcome, Outcome::Unframed | Outcome::Corrupt) {
            prop_assert!(!outcome.propagate());
        } else {
            prop_assert!(outcome.propagate());
        }
    }
}
