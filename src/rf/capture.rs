//! Edge-interrupt capture path.
//!
//! ## Hardware
//!
//! The receiver data line raises an interrupt on every edge.  The ISR
//! hands the current timestamp to [`Capturer::on_edge`], which measures
//! the pulse that just ended and runs the frame state machine:
//!
//! | Pulse                               | Idle                    | Receiving                         |
//! |-------------------------------------|-------------------------|-----------------------------------|
//! | shorter than `min_pulse`            | undo edge (noise)       | undo edge, drop last sample       |
//! | long, first sync seen               | → Receiving, restart    | -                                 |
//! | long, longer than `buffer[0]`       | -                       | restart (new frame)               |
//! | long, shorter than `buffer[0]`      | -                       | keep (gap inside the frame)       |
//! | long, matches `buffer[0]`           | -                       | end of frame: decode → Idle       |
//!
//! A glitch splits one real pulse into `a`, `n`, `rest`.  Undoing the
//! edge that ended `n` and discarding `a` makes the next edge measure the
//! full pulse again from its original start.
//!
//! ## Interrupt constraints
//!
//! No allocation, no locks, bounded work: the buffer is a fixed array
//! whose write index wraps to 0 instead of growing.  Statistics are
//! relaxed atomics so the consumer task can read them without touching
//! the capturer itself.

use core::sync::atomic::{AtomicU32, Ordering};

use super::codec::{Decoder, diff};
use super::packet::Packet;
use super::protocol::{MIN_LONGEST_SYNC_US, MIN_WIDTH_US};
use super::BUFFER_SIZE;

/// Frame state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    /// Waiting for a sync pulse.
    Idle,
    /// Buffering pulses of a frame.
    Receiving,
}

/// Counters written from interrupt context, read by the consumer task.
#[derive(Debug, Default)]
pub struct CaptureStats {
    noise: AtomicU32,
    decoded: AtomicU32,
    rejected: AtomicU32,
}

/// Point-in-time copy of [`CaptureStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaptureSnapshot {
    /// Pulses discarded as electrical noise.
    pub noise: u32,
    /// Frames that decoded with some protocol.
    pub decoded: u32,
    /// Frames long enough to decode that matched no protocol.
    pub rejected: u32,
}

impl CaptureStats {
    pub const fn new() -> Self {
        Self {
            noise: AtomicU32::new(0),
            decoded: AtomicU32::new(0),
            rejected: AtomicU32::new(0),
        }
    }

    pub fn snapshot(&self) -> CaptureSnapshot {
        CaptureSnapshot {
            noise: self.noise.load(Ordering::Relaxed),
            decoded: self.decoded.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
        }
    }
}

/// Pulse timing capture and frame detection for the receive pin.
pub struct Capturer<'a> {
    buffer: [u32; BUFFER_SIZE],
    index: usize,
    last_edge_us: u64,
    prev_edge_us: u64,
    state: CaptureState,
    decoder: Decoder,
    min_pulse_us: u32,
    min_sync_us: u32,
    stats: &'a CaptureStats,
}

impl<'a> Capturer<'a> {
    /// Thresholds derive from the tolerance: the shortest pulse any
    /// protocol sends, and the shortest "long" sync pulse, each shrunk by
    /// the tolerance.
    pub fn new(decoder: Decoder, stats: &'a CaptureStats) -> Self {
        let keep = 100 - u32::from(decoder.tolerance_percent().min(100));
        Self {
            buffer: [0; BUFFER_SIZE],
            index: 0,
            last_edge_us: 0,
            prev_edge_us: 0,
            state: CaptureState::Idle,
            min_pulse_us: MIN_WIDTH_US * keep / 100,
            min_sync_us: MIN_LONGEST_SYNC_US * keep / 100,
            decoder,
            stats,
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// Samples buffered for the current frame.
    pub fn buffered(&self) -> usize {
        self.index
    }

    /// Pulses shorter than this are noise (µs).
    pub fn min_pulse_us(&self) -> u32 {
        self.min_pulse_us
    }

    /// Pulses at least this long are sync candidates (µs).
    pub fn min_sync_us(&self) -> u32 {
        self.min_sync_us
    }

    /// Process one edge at `now_us` (monotonic microseconds).
    ///
    /// Returns the decoded packet when this edge closes a frame that some
    /// protocol accepts.
    pub fn on_edge(&mut self, now_us: u64) -> Option<Packet> {
        let width = u32::try_from(now_us.wrapping_sub(self.last_edge_us)).unwrap_or(u32::MAX);

        if width < self.min_pulse_us {
            self.last_edge_us = self.prev_edge_us;
            self.index = self.index.saturating_sub(1);
            self.stats.noise.fetch_add(1, Ordering::Relaxed);
            return None;
        }

        self.prev_edge_us = self.last_edge_us;
        self.last_edge_us = now_us;

        let mut packet = None;

        if width >= self.min_sync_us {
            match self.state {
                CaptureState::Idle => {
                    self.state = CaptureState::Receiving;
                    self.index = 0;
                }
                CaptureState::Receiving => {
                    let difference = diff(self.buffer[0], width);
                    if difference.abs() > i64::from(self.decoder.tolerance_percent()) {
                        // Longer than the opening sync: a new frame starts.
                        // Shorter: a gap inside this frame, keep buffering.
                        if difference > 0 {
                            self.index = 0;
                        }
                    } else {
                        packet = self.close_frame();
                        self.state = CaptureState::Idle;
                    }
                }
            }
        }

        if self.state == CaptureState::Receiving {
            self.buffer[self.index] = width;
            self.index = if self.index >= BUFFER_SIZE - 1 { 0 } else { self.index + 1 };
        }

        packet
    }

    fn close_frame(&mut self) -> Option<Packet> {
        // The opening sync and the pulse before the closing sync are not data.
        if self.index.saturating_sub(2) < self.decoder.min_data_pulses() {
            return None;
        }

        let packet = self.decoder.decode_any(&self.buffer[..self.index]);
        let counter = if packet.is_some() { &self.stats.decoded } else { &self.stats.rejected };
        counter.fetch_add(1, Ordering::Relaxed);
        packet
    }
}
