//! Port traits: the hexagonal boundary between hub logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ HubService (domain)
//! ```
//!
//! The [`HubService`](super::service::HubService) takes these as generic
//! parameters at each call site, so the domain never touches the radio
//! queues or flash directly and runs unchanged on the host.

use crate::device::Device;
use crate::error::{RadioError, StoreError};
use crate::rf::{Bits, Packet, PacketQueue};

// ───────────────────────────────────────────────────────────────
// Event sink port (domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Transmit port (domain → emitter)
// ───────────────────────────────────────────────────────────────

/// Non-blocking submission of a packet for transmission.
pub trait TransmitPort {
    /// Fails with [`RadioError::QueueFull`] when nothing can be accepted
    /// right now; callers decide whether to retry.
    fn submit(&self, packet: Packet) -> Result<(), RadioError>;
}

impl<const N: usize> TransmitPort for PacketQueue<N> {
    fn submit(&self, packet: Packet) -> Result<(), RadioError> {
        self.send(packet)
    }
}

// ───────────────────────────────────────────────────────────────
// Device store port (domain ↔ key-value store)
// ───────────────────────────────────────────────────────────────

/// Persistent device records, keyed by device name.
pub trait DeviceStore {
    fn count(&self) -> Result<usize, StoreError>;

    fn get(&self, name: &str) -> Result<Option<Device>, StoreError>;

    /// Every stored device, in key order.
    fn list(&self) -> Result<Vec<Device>, StoreError>;

    /// Insert or replace the record named `device.name`.
    fn set(&mut self, device: &Device) -> Result<(), StoreError>;

    /// Returns `Ok(())` even if no such device existed.
    fn delete(&mut self, name: &str) -> Result<(), StoreError>;

    fn drop_all(&mut self) -> Result<(), StoreError>;

    /// The sensor that sends `bits` on `protocol`, if any.
    fn sensor_by_identifier(&self, protocol: u8, bits: &Bits) -> Result<Option<Device>, StoreError> {
        Ok(self
            .list()?
            .into_iter()
            .find(|d| d.state_for(protocol, bits).is_some()))
    }
}
