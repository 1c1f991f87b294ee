//! Packet queues between the radio paths and the rest of the hub.
//!
//! Uses `embassy-sync` bounded channels, statically allocated so the
//! edge ISR can reach the receive queue without any context pointer.
//!
//! ```text
//! ┌──────────────┐  RX_QUEUE  ┌──────────────┐
//! │  Edge ISR    │───────────▶│ RX consumer  │   push: drop on full
//! └──────────────┘            └──────────────┘
//! ┌──────────────┐  TX_QUEUE  ┌──────────────┐
//! │  Producers   │───────────▶│ Emitter task │   push: QueueFull on full
//! └──────────────┘            └──────────────┘
//! ```
//!
//! Consumers park in [`PacketQueue::receive`] until a packet arrives.

use core::sync::atomic::{AtomicU32, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, TrySendError};

use super::packet::Packet;
use super::protocol;
use crate::error::RadioError;

/// Depth of both packet queues.
pub const QUEUE_SIZE: usize = 25;

/// Decoded packets: edge ISR → RX consumer task.
pub static RX_QUEUE: PacketQueue<QUEUE_SIZE> = PacketQueue::new();

/// Outgoing packets: any producer → emitter task.
pub static TX_QUEUE: PacketQueue<QUEUE_SIZE> = PacketQueue::new();

/// Bounded single-consumer packet queue.
pub struct PacketQueue<const N: usize> {
    channel: Channel<CriticalSectionRawMutex, Packet, N>,
    dropped: AtomicU32,
}

impl<const N: usize> PacketQueue<N> {
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
            dropped: AtomicU32::new(0),
        }
    }

    /// Lossy push for interrupt context.  A full queue drops `packet`
    /// and bumps the drop counter; returns whether it was queued.
    pub fn push_lossy(&self, packet: Packet) -> bool {
        match self.channel.try_send(packet) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                false
            }
        }
    }

    /// Non-blocking push reporting a full queue to the caller.  Packets
    /// naming a protocol outside the table never reach the queue.
    pub fn send(&self, packet: Packet) -> Result<(), RadioError> {
        if protocol::try_get(packet.protocol).is_none() {
            return Err(RadioError::UnknownProtocol(packet.protocol));
        }
        self.channel
            .try_send(packet)
            .map_err(|TrySendError::Full(_)| RadioError::QueueFull)
    }

    /// Wait indefinitely for the next packet, yielding while empty.
    pub fn receive(&self) -> Packet {
        #[cfg(target_os = "espidf")]
        {
            esp_idf_hal::task::block_on(self.channel.receive())
        }
        #[cfg(not(target_os = "espidf"))]
        {
            futures_lite::future::block_on(self.channel.receive())
        }
    }

    pub fn try_receive(&self) -> Option<Packet> {
        self.channel.try_receive().ok()
    }

    pub fn len(&self) -> usize {
        self.channel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }

    /// Packets discarded by [`push_lossy`](Self::push_lossy).
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl<const N: usize> Default for PacketQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}
