//! Devices known to the hub.
//!
//! A device is either an actuator the hub can trigger by transmitting a
//! stored command, or a sensor the hub recognises from received packets.
//! The kind-specific data lives in a tagged [`DeviceContext`]; the
//! stored JSON form carries it as `"subtype"` + `"context"`:
//!
//! ```json
//! { "name": "door", "protocol": 2, "subtype": "BISTATE",
//!   "context": { "identifier1": "0101…", "emoji1": "🔓",
//!                "identifier2": "0110…", "emoji2": "🔒", "state": "first" },
//!   "emoji": "🚪", "creator": "admin", "created_at": 1700000000 }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{DeviceError, Error, StoreError};
use crate::rf::{Bits, Packet};

/// Sensor or actuator, derived from the context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeviceType {
    Sensor,
    Actuator,
}

/// Which of its two identifiers a bistate sensor last sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BistateState {
    #[default]
    Unknown,
    First,
    Second,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "subtype", content = "context", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeviceContext {
    /// Remote button: transmitting `command` triggers the device.
    Button { command: String, emoji: String },
    /// Two-state sensor (door contact, window, ...).  Each state has its
    /// own transmitted identifier.
    Bistate {
        identifier1: String,
        emoji1: String,
        identifier2: String,
        emoji2: String,
        #[serde(default)]
        state: BistateState,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub name: String,
    /// 1-based protocol table identifier.
    pub protocol: u8,
    #[serde(flatten)]
    pub context: DeviceContext,
    pub emoji: String,
    pub creator: String,
    /// Unix seconds.
    pub created_at: i64,
}

impl Device {
    pub fn device_type(&self) -> DeviceType {
        match self.context {
            DeviceContext::Button { .. } => DeviceType::Actuator,
            DeviceContext::Bistate { .. } => DeviceType::Sensor,
        }
    }

    /// Packet that actuates this device.
    pub fn command_packet(&self) -> Result<Packet, Error> {
        match &self.context {
            DeviceContext::Button { command, .. } => Ok(Packet::parse(self.protocol, command)?),
            DeviceContext::Bistate { .. } => Err(DeviceError::NotActuator.into()),
        }
    }

    /// State a sensor enters when it sends `bits` on `protocol`, or `None`
    /// when the packet is not one of its identifiers.
    pub fn state_for(&self, protocol: u8, bits: &Bits) -> Option<BistateState> {
        if protocol != self.protocol {
            return None;
        }
        match &self.context {
            DeviceContext::Bistate { identifier1, .. } if identifier1 == bits.as_str() => {
                Some(BistateState::First)
            }
            DeviceContext::Bistate { identifier2, .. } if identifier2 == bits.as_str() => {
                Some(BistateState::Second)
            }
            _ => None,
        }
    }

    /// Record a new sensor state.  Returns whether it changed.
    pub fn set_state(&mut self, new: BistateState) -> bool {
        match &mut self.context {
            DeviceContext::Bistate { state, .. } if *state != new => {
                *state = new;
                true
            }
            _ => false,
        }
    }

    pub fn state(&self) -> Option<BistateState> {
        match self.context {
            DeviceContext::Bistate { state, .. } => Some(state),
            DeviceContext::Button { .. } => None,
        }
    }

    /// Emoji for the current state, falling back to the device emoji.
    pub fn current_emoji(&self) -> &str {
        match &self.context {
            DeviceContext::Bistate { state: BistateState::First, emoji1, .. } => emoji1,
            DeviceContext::Bistate { state: BistateState::Second, emoji2, .. } => emoji2,
            DeviceContext::Button { emoji, .. } => emoji,
            DeviceContext::Bistate { .. } => &self.emoji,
        }
    }

    pub fn to_json(&self) -> Result<Vec<u8>, StoreError> {
        serde_json::to_vec(self).map_err(|_| StoreError::Encode)
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self, StoreError> {
        serde_json::from_slice(bytes).map_err(|_| StoreError::Corrupted)
    }
}
