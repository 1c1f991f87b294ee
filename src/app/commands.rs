//! Inbound commands to the hub service.
//!
//! Requests from the outside world (HTTP API, scheduled triggers,
//! console) that the [`HubService`](super::service::HubService) acts upon.

use crate::rf::Packet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    /// Transmit the stored command of the named actuator.
    Actuate { device: String },

    /// Transmit a raw packet.
    Transmit(Packet),
}
