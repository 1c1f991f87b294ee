//! Hardware initialisation and task helpers for the radio.

pub mod hw_init;
pub mod task_pin;
