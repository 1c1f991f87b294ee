//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing hub events to the ESP-IDF logger
//! (UART / USB-CDC in production).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::PacketReceived(p) => {
                info!("RX | protocol={} | bits={} ({} bits)", p.protocol, p.bits, p.bits.len());
            }
            AppEvent::SensorChanged { device, state, emoji } => {
                info!("SENSOR | {} {} -> {:?}", emoji, device, state);
            }
            AppEvent::UnknownPacket(p) => {
                info!("UNKNOWN | {}", p);
            }
            AppEvent::TransmitQueued { device, packet } => match device {
                Some(name) => info!("TX | {} | {}", name, packet),
                None => info!("TX | raw | {}", packet),
            },
            AppEvent::TransmitRejected { device, error } => {
                warn!("TX | {} | rejected: {}", device.as_deref().unwrap_or("raw"), error);
            }
        }
    }
}
