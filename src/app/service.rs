//! Hub service: the hexagonal core.
//!
//! [`HubService`] interprets packets coming off the receive queue and
//! turns commands into packets for the transmit queue.  Storage, the
//! transmit queue and event output are port traits injected at each call
//! site, so the whole service runs against mocks on the host.
//!
//! ```text
//!  rf::receive() ──▶ ┌────────────────────┐ ──▶ EventSink
//!                    │     HubService     │
//!   AppCommand ────▶ │  sensors · actuate │ ──▶ TransmitPort (TX_QUEUE)
//!                    └────────────────────┘
//!                              ▲▼
//!                          DeviceStore
//! ```

use log::{debug, info, warn};

use crate::device::Device;
use crate::error::{DeviceError, Error};
use crate::rf::Packet;

use super::commands::AppCommand;
use super::events::AppEvent;
use super::ports::{DeviceStore, EventSink, TransmitPort};

/// Running totals since boot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HubStats {
    pub received: u32,
    pub sensor_updates: u32,
    pub unknown: u32,
    pub transmitted: u32,
    pub rejected: u32,
}

#[derive(Debug, Default)]
pub struct HubService {
    stats: HubStats,
}

impl HubService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> HubStats {
        self.stats
    }

    // ── Receive side ──────────────────────────────────────────

    /// Handle one decoded packet.
    ///
    /// A packet matching a stored bistate sensor's identifier moves that
    /// sensor to the corresponding state and persists it; repeats of the
    /// current state are not re-emitted.  Anything else is reported as
    /// unknown, which is how new remotes get discovered.
    pub fn handle_packet(
        &mut self,
        packet: Packet,
        store: &mut impl DeviceStore,
        sink: &mut impl EventSink,
    ) -> Result<(), Error> {
        self.stats.received += 1;
        debug!("hub: rx {packet}");
        sink.emit(&AppEvent::PacketReceived(packet.clone()));

        let Some(mut device) = store.sensor_by_identifier(packet.protocol, &packet.bits)? else {
            self.stats.unknown += 1;
            sink.emit(&AppEvent::UnknownPacket(packet));
            return Ok(());
        };

        let Some(state) = device.state_for(packet.protocol, &packet.bits) else {
            // The store matched on something other than the identifiers.
            self.stats.unknown += 1;
            sink.emit(&AppEvent::UnknownPacket(packet));
            return Ok(());
        };

        if !device.set_state(state) {
            debug!("hub: '{}' still {:?}", device.name, state);
            return Ok(());
        }

        store.set(&device)?;
        self.stats.sensor_updates += 1;
        info!("hub: '{}' -> {:?}", device.name, state);
        sink.emit(&AppEvent::SensorChanged {
            emoji: device.current_emoji().into(),
            device: device.name,
            state,
        });
        Ok(())
    }

    // ── Transmit side ─────────────────────────────────────────

    /// Process an external command.
    ///
    /// Failures are both emitted as [`AppEvent::TransmitRejected`] and
    /// returned; nothing is retried.
    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        store: &impl DeviceStore,
        tx: &impl TransmitPort,
        sink: &mut impl EventSink,
    ) -> Result<(), Error> {
        let (device, result) = match cmd {
            AppCommand::Actuate { device } => {
                let result = Self::actuation_packet(store, &device)
                    .and_then(|packet| Self::submit(tx, packet));
                (Some(device), result)
            }
            AppCommand::Transmit(packet) => (None, Self::submit(tx, packet)),
        };

        match result {
            Ok(packet) => {
                self.stats.transmitted += 1;
                sink.emit(&AppEvent::TransmitQueued { device, packet });
                Ok(())
            }
            Err(error) => {
                self.stats.rejected += 1;
                warn!("hub: transmit rejected ({error})");
                sink.emit(&AppEvent::TransmitRejected { device, error });
                Err(error)
            }
        }
    }

    fn actuation_packet(store: &impl DeviceStore, name: &str) -> Result<Packet, Error> {
        let device: Device = store.get(name)?.ok_or(DeviceError::NotFound)?;
        device.command_packet()
    }

    fn submit(tx: &impl TransmitPort, packet: Packet) -> Result<Packet, Error> {
        tx.submit(packet.clone())?;
        Ok(packet)
    }
}
