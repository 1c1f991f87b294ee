//! Fuzz target: `Decoder::decode_any`
//!
//! Interprets the input as a capture buffer of little-endian u32 pulse
//! widths and asserts the decoder never panics and only yields packets
//! it could transmit again.
//!
//! cargo fuzz run fuzz_decode

#![no_main]

use critical_section as _;
use libfuzzer_sys::fuzz_target;
use rfhub::rf::codec::{self, Decoder};
use rfhub::rf::{BUFFER_SIZE, MAX_BITS};

fuzz_target!(|data: &[u8]| {
    let buffer: Vec<u32> = data
        .chunks_exact(4)
        .take(BUFFER_SIZE)
        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();

    if let Some(packet) = Decoder::default().decode_any(&buffer) {
        assert!(!packet.bits.is_empty());
        assert!(packet.bits.len() <= MAX_BITS);
        assert!(codec::encode(packet.protocol, &packet.bits).is_ok());
    }
});
