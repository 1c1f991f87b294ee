//! Emit path timing, observed on the virtual scope.

use rfhub::rf::codec;
use rfhub::rf::Packet;

use crate::mock_hw::{T0_US, scope_emitter};

fn frame_durations(packet: &Packet) -> Vec<u64> {
    codec::encode(packet.protocol, &packet.bits)
        .unwrap()
        .map(|p| u64::from(p.duration_us))
        .collect()
}

#[test]
fn every_pulse_starts_with_an_edge() {
    let packet = Packet::parse(4, "0110").unwrap();
    let frame = frame_durations(&packet);

    let (mut emitter, probe) = scope_emitter(3);
    emitter.transmit(&packet).unwrap();

    // Templates have even length, so levels alternate across the whole
    // burst; the trailing low after the last pulse is not an edge.
    assert_eq!(probe.edges().len(), 3 * frame.len());
    assert_eq!(probe.writes(), 3 * frame.len() + 2);
}

#[test]
fn edge_spacing_matches_encoded_durations() {
    let packet = Packet::parse(12, "1001").unwrap();
    let frame = frame_durations(&packet);

    let (mut emitter, probe) = scope_emitter(2);
    emitter.transmit(&packet).unwrap();
    let edges = probe.edges();

    assert_eq!(edges[0], T0_US);
    let spacing: Vec<u64> = edges.windows(2).map(|w| w[1] - w[0]).collect();
    // Two frames back to back; the final pulse has no closing edge.
    let expected: Vec<u64> = frame.iter().chain(&frame).copied().take(spacing.len()).collect();
    assert_eq!(spacing, expected);
}

#[test]
fn burst_takes_replays_times_frame_and_ends_low() {
    let packet = Packet::parse(7, "111000").unwrap();
    let frame_us: u64 = frame_durations(&packet).iter().sum();

    let (mut emitter, _probe) = scope_emitter(3);
    emitter.transmit(&packet).unwrap();
    let (pin, delay, _) = emitter.into_parts();

    assert!(!pin.is_high());
    assert_eq!(delay.0.now(), T0_US + 3 * frame_us);
}

#[test]
fn back_to_back_requests_repeat_identically() {
    let packet = Packet::parse(2, "1100").unwrap();
    let (mut emitter, probe) = scope_emitter(3);

    emitter.transmit(&packet).unwrap();
    let first = probe.edges();
    probe.clear();
    emitter.transmit(&packet).unwrap();
    let second = probe.edges();

    let offset = second[0] - first[0];
    let shifted: Vec<u64> = first.iter().map(|t| t + offset).collect();
    assert_eq!(second, shifted);
}
