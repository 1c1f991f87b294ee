//! Unified error types for the RfHub firmware.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! task loops' error handling uniform.  All variants are `Copy` so they can
//! be returned from the transmit path and carried inside [`AppEvent`]s
//! without allocation.
//!
//! [`AppEvent`]: crate::app::events::AppEvent

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The RF codec or one of its queues rejected a request.
    Radio(RadioError),
    /// A device lookup or actuation failed.
    Device(DeviceError),
    /// The device store could not complete an operation.
    Store(StoreError),
    /// Configuration is invalid or could not be loaded.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Radio(e) => write!(f, "radio: {e}"),
            Self::Device(e) => write!(f, "device: {e}"),
            Self::Store(e) => write!(f, "store: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Radio errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadioError {
    /// The transmit queue has no free slot.
    QueueFull,
    /// No protocol with this 1-based identifier exists in the table.
    UnknownProtocol(u8),
    /// A bit string contained something other than `'0'` / `'1'`.
    InvalidBit,
    /// A bit string is longer than a packet can carry.
    TooManyBits,
    /// Driving the output pin failed.
    PinWrite,
}

impl fmt::Display for RadioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QueueFull => write!(f, "transmit queue full"),
            Self::UnknownProtocol(id) => write!(f, "unknown protocol {id}"),
            Self::InvalidBit => write!(f, "bit string must contain only '0' and '1'"),
            Self::TooManyBits => write!(f, "bit string too long"),
            Self::PinWrite => write!(f, "output pin write failed"),
        }
    }
}

impl From<RadioError> for Error {
    fn from(e: RadioError) -> Self {
        Self::Radio(e)
    }
}

// ---------------------------------------------------------------------------
// Device errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceError {
    /// No device with the requested name.
    NotFound,
    /// The device is a sensor and cannot be actuated.
    NotActuator,
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "device not found"),
            Self::NotActuator => write!(f, "device is not an actuator"),
        }
    }
}

impl From<DeviceError> for Error {
    fn from(e: DeviceError) -> Self {
        Self::Device(e)
    }
}

// ---------------------------------------------------------------------------
// Store errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// A stored record failed to deserialize.
    Corrupted,
    /// A record could not be serialized for storage.
    Encode,
    /// The backing store is full.
    Full,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Corrupted => write!(f, "stored record corrupted"),
            Self::Encode => write!(f, "record encoding failed"),
            Self::Full => write!(f, "store full"),
        }
    }
}

impl From<StoreError> for Error {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
