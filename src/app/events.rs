//! Outbound application events.
//!
//! The [`HubService`](super::service::HubService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.

use crate::device::BistateState;
use crate::error::Error;
use crate::rf::Packet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// A packet came off the receive queue.
    PacketReceived(Packet),

    /// A known sensor reported a new state.
    SensorChanged { device: String, state: BistateState, emoji: String },

    /// No stored sensor sends this packet.
    UnknownPacket(Packet),

    /// A packet was accepted by the transmit queue.  `device` is set when
    /// it came from actuating a stored device.
    TransmitQueued { device: Option<String>, packet: Packet },

    /// A transmit request failed before reaching the queue, or the queue
    /// was full.
    TransmitRejected { device: Option<String>, error: Error },
}
