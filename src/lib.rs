//! RfHub firmware library.
//!
//! Exposes the radio codec and the hub logic for integration testing.
//! All ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]`
//! within each module.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod device;
pub mod drivers;
pub mod error;
pub mod pins;
pub mod rf;

pub use error::{Error, Result};

// Host critical-section implementation for the embassy-sync queues.
#[cfg(test)]
use critical_section as _;
