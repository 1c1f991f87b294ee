//! HubService against the real queues, emitter and capture path.

use rfhub::adapters::memory_store::MemoryDeviceStore;
use rfhub::app::commands::AppCommand;
use rfhub::app::events::AppEvent;
use rfhub::app::ports::DeviceStore;
use rfhub::app::service::HubService;
use rfhub::device::{BistateState, Device, DeviceContext};
use rfhub::error::{DeviceError, Error};
use rfhub::rf::capture::CaptureStats;
use rfhub::rf::{Decoder, Packet, PacketQueue, QUEUE_SIZE};

use crate::mock_hw::{RecordingSink, RecordingTx, capture, emitted_edges};

const OPEN: &str = "11110000111100001111000011110000";
const CLOSED: &str = "11110000111100001111000011111111";

fn contact(name: &str) -> Device {
    Device {
        name: name.into(),
        protocol: 2,
        context: DeviceContext::Bistate {
            identifier1: OPEN.into(),
            emoji1: "open".into(),
            identifier2: CLOSED.into(),
            emoji2: "closed".into(),
            state: BistateState::Unknown,
        },
        emoji: "door".into(),
        creator: "test".into(),
        created_at: 1_700_000_000,
    }
}

fn remote(name: &str, command: &str) -> Device {
    Device {
        name: name.into(),
        protocol: 2,
        context: DeviceContext::Button { command: command.into(), emoji: "btn".into() },
        emoji: "btn".into(),
        creator: "test".into(),
        created_at: 1_700_000_000,
    }
}

/// Transmit `packet` over the virtual air and return what was decoded.
fn over_the_air(packet: &Packet) -> Vec<Packet> {
    let stats = CaptureStats::new();
    capture(&emitted_edges(packet, 3), Decoder::default(), &stats)
}

#[test]
fn unknown_remote_is_reported_until_registered() {
    let mut hub = HubService::new();
    let mut store = MemoryDeviceStore::new();
    let mut sink = RecordingSink::new();
    let packet = Packet::parse(2, OPEN).unwrap();

    hub.handle_packet(packet.clone(), &mut store, &mut sink).unwrap();
    assert_eq!(
        sink.events,
        [AppEvent::PacketReceived(packet.clone()), AppEvent::UnknownPacket(packet.clone())]
    );

    store.set(&contact("front door")).unwrap();
    hub.handle_packet(packet, &mut store, &mut sink).unwrap();
    assert_eq!(
        sink.events.last(),
        Some(&AppEvent::SensorChanged {
            device: "front door".into(),
            state: BistateState::First,
            emoji: "open".into(),
        })
    );
    assert_eq!(hub.stats().unknown, 1);
    assert_eq!(hub.stats().sensor_updates, 1);
}

#[test]
fn sensor_state_is_persisted() {
    let mut hub = HubService::new();
    let mut store = MemoryDeviceStore::new();
    let mut sink = RecordingSink::new();
    store.set(&contact("door")).unwrap();

    hub.handle_packet(Packet::parse(2, CLOSED).unwrap(), &mut store, &mut sink).unwrap();
    assert_eq!(store.get("door").unwrap().unwrap().state(), Some(BistateState::Second));

    hub.handle_packet(Packet::parse(2, OPEN).unwrap(), &mut store, &mut sink).unwrap();
    assert_eq!(store.get("door").unwrap().unwrap().state(), Some(BistateState::First));
}

#[test]
fn same_identifier_on_another_protocol_is_unknown() {
    let mut hub = HubService::new();
    let mut store = MemoryDeviceStore::new();
    let mut sink = RecordingSink::new();
    store.set(&contact("door")).unwrap();

    hub.handle_packet(Packet::parse(3, OPEN).unwrap(), &mut store, &mut sink).unwrap();
    assert!(matches!(sink.events.last(), Some(AppEvent::UnknownPacket(_))));
}

#[test]
fn actuation_round_trips_through_the_radio() {
    // Hub A actuates a remote; hub B hears it as its door contact.
    let mut hub_a = HubService::new();
    let mut store_a = MemoryDeviceStore::new();
    store_a.set(&remote("door opener", OPEN)).unwrap();
    let tx_queue: PacketQueue<QUEUE_SIZE> = PacketQueue::new();
    let mut sink_a = RecordingSink::new();

    hub_a
        .handle_command(AppCommand::Actuate { device: "door opener".into() }, &store_a, &tx_queue, &mut sink_a)
        .unwrap();
    let queued = tx_queue.try_receive().expect("packet queued");
    assert_eq!(queued, Packet::parse(2, OPEN).unwrap());

    let heard = over_the_air(&queued);
    assert_eq!(heard, [queued]);

    let mut hub_b = HubService::new();
    let mut store_b = MemoryDeviceStore::new();
    store_b.set(&contact("door")).unwrap();
    let mut sink_b = RecordingSink::new();
    for packet in heard {
        hub_b.handle_packet(packet, &mut store_b, &mut sink_b).unwrap();
    }
    assert_eq!(store_b.get("door").unwrap().unwrap().state(), Some(BistateState::First));
}

#[test]
fn sensors_cannot_be_actuated() {
    let mut hub = HubService::new();
    let mut store = MemoryDeviceStore::new();
    store.set(&contact("door")).unwrap();
    let tx = RecordingTx::default();
    let mut sink = RecordingSink::new();

    let err = hub
        .handle_command(AppCommand::Actuate { device: "door".into() }, &store, &tx, &mut sink)
        .unwrap_err();
    assert_eq!(err, Error::Device(DeviceError::NotActuator));
    assert!(tx.sent.borrow().is_empty());
    assert_eq!(
        sink.events,
        [AppEvent::TransmitRejected { device: Some("door".into()), error: err }]
    );
}

#[test]
fn missing_device_is_not_found() {
    let mut hub = HubService::new();
    let store = MemoryDeviceStore::new();
    let tx = RecordingTx::default();
    let mut sink = RecordingSink::new();

    let err = hub
        .handle_command(AppCommand::Actuate { device: "ghost".into() }, &store, &tx, &mut sink)
        .unwrap_err();
    assert_eq!(err, Error::Device(DeviceError::NotFound));
    assert_eq!(hub.stats().rejected, 1);
}

#[test]
fn raw_transmit_bypasses_the_store() {
    let mut hub = HubService::new();
    let store = MemoryDeviceStore::new();
    let tx = RecordingTx::default();
    let mut sink = RecordingSink::new();
    let packet = Packet::parse(11, OPEN).unwrap();

    hub.handle_command(AppCommand::Transmit(packet.clone()), &store, &tx, &mut sink).unwrap();
    assert_eq!(*tx.sent.borrow(), [packet.clone()]);
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::TransmitQueued { device: None, .. })),
        1
    );
}
