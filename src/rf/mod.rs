//! Sub-GHz OOK remote-control codec.
//!
//! ```text
//!  radio ─▶ GPIO edge ─▶ Capturer (ISR) ─▶ RX_QUEUE ─▶ consumer task
//!                            │
//!                      Protocol table + codec
//!                            │
//!  producer ─▶ TX_QUEUE ─▶ Emitter task ─▶ GPIO ─▶ radio
//! ```
//!
//! The protocol table and the codec are pure and shared by both paths.
//! The capture path runs in interrupt context; everything it touches is
//! fixed-capacity.

pub mod capture;
pub mod codec;
pub mod emit;
pub mod packet;
pub mod protocol;
pub mod queue;

pub use capture::{CaptureStats, Capturer};
pub use codec::{Decoder, Level, Pulse};
pub use emit::{BurstGuard, Emitter};
pub use packet::{Bits, Packet};
pub use protocol::Protocol;
pub use queue::{PacketQueue, QUEUE_SIZE, RX_QUEUE, TX_QUEUE};

/// Sync pulses a capture can hold: the longest sync plus the closing one.
pub const MAX_SYNC_PULSES: usize = 4;
/// Longest preamble of any protocol.
pub const MAX_PREAMBLE_PULSES: usize = 24;
/// Longest data region: 65 bits of two pulses each.
pub const MAX_DATA_PULSES: usize = 130;
/// Shortest data region worth decoding: 32 bits of two pulses each.
pub const MIN_DATA_PULSES: usize = 64;
/// Longest bit template of any protocol.
pub const MAX_DATA_BIT_PULSES: usize = 2;
/// Longest bit string a packet carries.
pub const MAX_BITS: usize = MAX_DATA_PULSES / MAX_DATA_BIT_PULSES;

/// Capture buffer capacity.
pub const BUFFER_SIZE: usize = MAX_SYNC_PULSES + MAX_PREAMBLE_PULSES + MAX_DATA_PULSES;

/// Default allowed deviation between a pulse and its template (%).
pub const PULSE_WIDTH_TOLERANCE: u8 = 25;

/// Blocking dequeue of the next decoded packet.
pub fn receive() -> Packet {
    RX_QUEUE.receive()
}

/// Non-blocking enqueue of a packet for transmission.
pub fn send(packet: Packet) -> Result<(), crate::error::RadioError> {
    TX_QUEUE.send(packet)
}
