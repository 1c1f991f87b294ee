//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements   | Connects to                  |
//! |----------------|--------------|------------------------------|
//! | `log_sink`     | EventSink    | Serial log output            |
//! | `memory_store` | DeviceStore  | JSON records in RAM          |
//! | `PacketQueue`  | TransmitPort | `rf::TX_QUEUE` → emitter task |

pub mod log_sink;
pub mod memory_store;
