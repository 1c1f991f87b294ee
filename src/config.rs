//! Radio configuration parameters
//!
//! All tunable parameters of the RF capture and emit paths.  Queue depths
//! are compile-time constants in [`crate::rf::queue`] because the queues
//! are statically allocated.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::pins;
use crate::rf::emit::DEFAULT_REPLAYS;
use crate::rf::{Decoder, PULSE_WIDTH_TOLERANCE};

/// Core radio configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadioConfig {
    // --- Pins ---
    /// Receiver data line (edge interrupt, pulled down)
    pub rx_gpio: i32,
    /// Transmitter data line
    pub tx_gpio: i32,

    // --- Codec ---
    /// Allowed deviation between a measured pulse and its template (%)
    pub tolerance_percent: u8,
    /// Times each packet is replayed per transmit request
    pub replays: u8,

    // --- Tasks ---
    /// FreeRTOS priority of the receive consumer task
    pub rx_task_priority: u8,
    /// FreeRTOS priority of the emitter task
    pub tx_task_priority: u8,
    /// Stack size of each radio task (KiB)
    pub task_stack_kb: usize,
}

impl Default for RadioConfig {
    fn default() -> Self {
        Self {
            // Pins
            rx_gpio: pins::RF_RX_GPIO,
            tx_gpio: pins::RF_TX_GPIO,

            // Codec
            tolerance_percent: PULSE_WIDTH_TOLERANCE,
            replays: DEFAULT_REPLAYS,

            // Tasks
            rx_task_priority: 10,
            tx_task_priority: 10,
            task_stack_kb: 4,
        }
    }
}

impl RadioConfig {
    /// Range-check every field.  Invalid values are rejected, never clamped.
    pub fn validate(&self) -> Result<()> {
        if !(1..=50).contains(&self.tolerance_percent) {
            return Err(Error::Config("tolerance_percent must be within 1..=50"));
        }
        if self.replays == 0 {
            return Err(Error::Config("replays must be at least 1"));
        }
        if self.rx_gpio == self.tx_gpio {
            return Err(Error::Config("rx_gpio and tx_gpio must differ"));
        }
        if self.task_stack_kb < 2 {
            return Err(Error::Config("task_stack_kb must be at least 2"));
        }
        Ok(())
    }

    /// Pulse comparator for the capture path.
    pub fn decoder(&self) -> Decoder {
        Decoder::new(self.tolerance_percent)
    }

    /// Serialize to the compact blob stored by the key-value backend.
    pub fn to_blob(&self) -> Result<Vec<u8>> {
        postcard::to_allocvec(self).map_err(|_| Error::Config("config encoding failed"))
    }

    /// Decode and validate a stored blob.
    pub fn from_blob(bytes: &[u8]) -> Result<Self> {
        let config: Self =
            postcard::from_bytes(bytes).map_err(|_| Error::Config("config blob corrupted"))?;
        config.validate()?;
        Ok(config)
    }
}
