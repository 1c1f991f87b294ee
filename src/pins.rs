//! GPIO pin assignments for the RfHub main board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// 433 MHz OOK radio modules
// ---------------------------------------------------------------------------

/// Digital input from the superheterodyne receiver data line.
/// Pulled down; every edge raises an interrupt.
pub const RF_RX_GPIO: i32 = 17;

/// Digital output to the transmitter data line.  Idles LOW.
pub const RF_TX_GPIO: i32 = 38;
