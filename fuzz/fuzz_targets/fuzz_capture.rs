//! Fuzz target: `Capturer::on_edge`
//!
//! Feeds arbitrary inter-edge gaps (little-endian u16, microseconds) to
//! the capture state machine.  It must never panic and never hold more
//! than one buffer of widths.
//!
//! cargo fuzz run fuzz_capture

#![no_main]

use critical_section as _;
use libfuzzer_sys::fuzz_target;
use rfhub::rf::BUFFER_SIZE;
use rfhub::rf::capture::{CaptureStats, Capturer};
use rfhub::rf::codec::Decoder;

fuzz_target!(|data: &[u8]| {
    let stats = CaptureStats::new();
    let mut capturer = Capturer::new(Decoder::default(), &stats);

    let mut now: u64 = 0;
    for gap in data.chunks_exact(2) {
        now += u64::from(u16::from_le_bytes([gap[0], gap[1]]));
        if let Some(packet) = capturer.on_edge(now) {
            assert!(!packet.bits.is_empty());
        }
        assert!(capturer.buffered() <= BUFFER_SIZE);
    }

    let snap = stats.snapshot();
    assert!(snap.decoded as usize <= data.len() / 2);
});
