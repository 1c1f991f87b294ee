//! Emitter → virtual scope → capture path loopback.
//!
//! Every test here transmits through the real `Emitter` and feeds the
//! recorded edges to a `Capturer`, so timing, replay framing and decode
//! are checked together.

use rfhub::rf::capture::CaptureStats;
use rfhub::rf::{Decoder, Packet, PacketQueue, QUEUE_SIZE};
use rfhub::error::RadioError;

use crate::mock_hw::{capture, emitted_edges};

const BITS_32: &str = "10110010011100001111010110001101";

fn packet(protocol: u8, bits: &str) -> Packet {
    Packet::parse(protocol, bits).unwrap()
}

// ── Replay framing ────────────────────────────────────────────

#[test]
fn three_replays_decode_exactly_once() {
    let sent = packet(1, BITS_32);
    let stats = CaptureStats::new();
    let got = capture(&emitted_edges(&sent, 3), Decoder::default(), &stats);

    assert_eq!(got, [sent]);
    assert_eq!(stats.snapshot().decoded, 1);
    assert_eq!(stats.snapshot().rejected, 0);
}

#[test]
fn single_replay_is_never_closed() {
    let stats = CaptureStats::new();
    let got = capture(&emitted_edges(&packet(2, BITS_32), 1), Decoder::default(), &stats);
    assert!(got.is_empty());
    assert_eq!(stats.snapshot().decoded, 0);
}

#[test]
fn two_replays_are_enough() {
    let sent = packet(10, BITS_32);
    let stats = CaptureStats::new();
    assert_eq!(capture(&emitted_edges(&sent, 2), Decoder::default(), &stats), [sent]);
}

#[test]
fn longest_frame_fits_the_capture_buffer() {
    // Protocol 1 carries the longest preamble; 65 bits is the packet limit.
    let bits = "10".repeat(32) + "1";
    let sent = packet(1, &bits);
    let stats = CaptureStats::new();
    assert_eq!(capture(&emitted_edges(&sent, 3), Decoder::default(), &stats), [sent]);
}

#[test]
fn every_protocol_loops_back() {
    for id in 1..=16u8 {
        let sent = packet(id, BITS_32);
        let stats = CaptureStats::new();
        let got = capture(&emitted_edges(&sent, 3), Decoder::default(), &stats);
        assert_eq!(got.len(), 1, "protocol {id}");
        // Overlapping timings resolve to the lowest identifier.
        assert!(got[0].protocol <= id, "protocol {id} decoded as {}", got[0].protocol);
        assert_eq!(got[0].bits, sent.bits, "protocol {id}");
    }
}

#[test]
fn overlapping_protocol_resolves_to_lowest_id() {
    // SM5212 (320 µs) is within tolerance of HT12E (270 µs).
    let stats = CaptureStats::new();
    let got = capture(&emitted_edges(&packet(16, BITS_32), 3), Decoder::default(), &stats);
    assert_eq!(got, [packet(15, BITS_32)]);
}

// ── Rejections ────────────────────────────────────────────────

#[test]
fn frame_below_minimum_data_pulses_is_ignored() {
    let stats = CaptureStats::new();
    let got = capture(&emitted_edges(&packet(2, "1011001001110000"), 3), Decoder::default(), &stats);
    assert!(got.is_empty());
    assert_eq!(stats.snapshot().rejected, 0, "too short to attempt a decode");
}

#[test]
fn relaxed_window_accepts_short_frames() {
    let sent = packet(2, "1011001001110000");
    let decoder = Decoder::default().with_data_pulses(16..=rfhub::rf::MAX_DATA_PULSES);
    let stats = CaptureStats::new();
    assert_eq!(capture(&emitted_edges(&sent, 3), decoder, &stats), [sent]);
}

#[test]
fn stretched_data_pulse_rejects_the_frame() {
    let mut edges = emitted_edges(&packet(2, BITS_32), 3);
    // Double data pulse 5 of the first frame (sync is pulses 0 and 1).
    let k = 2 + 5;
    let extra = edges[k + 1] - edges[k];
    for t in &mut edges[k + 1..] {
        *t += extra;
    }

    let stats = CaptureStats::new();
    assert!(capture(&edges, Decoder::default(), &stats).is_empty());
    assert_eq!(stats.snapshot().rejected, 1);
}

// ── Noise ─────────────────────────────────────────────────────

#[test]
fn glitch_inside_data_pulse_is_absorbed() {
    let sent = packet(2, BITS_32);
    let mut edges = emitted_edges(&sent, 3);

    // A 20 µs spike 80 µs into data pulse 10 of the first frame.
    let start = edges[2 + 10];
    assert!(edges[2 + 11] - start > 100);
    edges.splice(2 + 11..2 + 11, [start + 80, start + 100]);

    let stats = CaptureStats::new();
    assert_eq!(capture(&edges, Decoder::default(), &stats), [sent]);
    assert_eq!(stats.snapshot().noise, 1);
}

#[test]
fn isolated_spikes_before_the_frame_are_ignored() {
    let sent = packet(3, BITS_32);
    let mut edges: Vec<u64> = emitted_edges(&sent, 3).iter().map(|t| t + 5_000).collect();
    edges.splice(0..0, [1_000, 1_010, 3_000, 3_030]);

    let stats = CaptureStats::new();
    assert_eq!(capture(&edges, Decoder::default(), &stats), [sent]);
}

// ── Queues ────────────────────────────────────────────────────

#[test]
fn rx_queue_drops_newest_when_full() {
    let queue: PacketQueue<QUEUE_SIZE> = PacketQueue::new();
    for n in 0..=QUEUE_SIZE {
        queue.push_lossy(packet(1, &format!("{n:b}")));
    }
    assert_eq!(queue.len(), QUEUE_SIZE);
    assert_eq!(queue.dropped(), 1);

    // Oldest first; the overflow packet never made it in.
    assert_eq!(queue.receive(), packet(1, "0"));
    assert!(queue.push_lossy(packet(1, "111")));
    assert!(!queue.push_lossy(packet(1, "111")));
    assert_eq!(queue.dropped(), 2);
}

#[test]
fn tx_queue_reports_full_to_the_caller() {
    let queue: PacketQueue<QUEUE_SIZE> = PacketQueue::new();
    for _ in 0..QUEUE_SIZE {
        queue.send(packet(4, BITS_32)).unwrap();
    }
    assert_eq!(queue.send(packet(4, BITS_32)), Err(RadioError::QueueFull));
    assert_eq!(queue.dropped(), 0);

    queue.try_receive().unwrap();
    assert_eq!(queue.send(packet(4, BITS_32)), Ok(()));
}
