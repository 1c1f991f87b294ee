//! Hub core: pure domain logic, zero I/O.
//!
//! Turns decoded packets into sensor state and commands into packets to
//! transmit.  All interaction with the radio and storage happens through
//! the port traits in [`ports`], keeping this layer testable without
//! hardware.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
