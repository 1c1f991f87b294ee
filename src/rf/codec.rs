//! Pulse-width codec.
//!
//! Decoding compares every captured pulse against the protocol templates
//! using only relative durations, so it works unchanged across the small
//! clock drift of cheap remotes.  Encoding expands a packet into the
//! timed level sequence the emitter replays on the output pin.
//!
//! Everything here is allocation-free and bounded: [`Decoder::decode`] runs
//! inside the edge interrupt handler.

use core::ops::RangeInclusive;

use super::packet::{Bits, Packet};
use super::protocol::{self, Protocol};
use super::{MAX_DATA_PULSES, MIN_DATA_PULSES, PULSE_WIDTH_TOLERANCE};
use crate::error::RadioError;

/// Relative difference of `actual` to `expected`, in percent.
///
/// Integer-only (no FPU in interrupt context); the `+ 1` keeps a zero
/// `expected` from dividing by zero.  Truncates toward zero.
pub const fn diff(expected: u32, actual: u32) -> i64 {
    (actual as i64 - expected as i64) * 100 / (expected as i64 + 1)
}

/// Tolerance-bounded pulse comparator plus the data-region size window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoder {
    tolerance_percent: u8,
    data_pulses: RangeInclusive<usize>,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new(PULSE_WIDTH_TOLERANCE)
    }
}

impl Decoder {
    pub const fn new(tolerance_percent: u8) -> Self {
        Self {
            tolerance_percent,
            data_pulses: MIN_DATA_PULSES..=MAX_DATA_PULSES,
        }
    }

    /// Accept data regions of `pulses` samples instead of the default
    /// `MIN_DATA_PULSES..=MAX_DATA_PULSES`.
    pub fn with_data_pulses(mut self, pulses: RangeInclusive<usize>) -> Self {
        self.data_pulses = pulses;
        self
    }

    pub fn tolerance_percent(&self) -> u8 {
        self.tolerance_percent
    }

    /// Smallest data region this decoder will look at.
    pub fn min_data_pulses(&self) -> usize {
        *self.data_pulses.start()
    }

    /// `true` when `actual` is within tolerance of `expected`.
    pub fn matches(&self, expected: u32, actual: u32) -> bool {
        diff(expected, actual).abs() <= i64::from(self.tolerance_percent)
    }

    /// Extract the bit string from `buffer` assuming it was sent with
    /// `protocol`.
    ///
    /// `buffer` is laid out the way the capture path fills it: it starts
    /// somewhere inside the sync train, continues with the preamble and
    /// data, and ends with the leading sync pulses of the next frame.
    /// Returns `None` unless the whole data region matches bit templates.
    pub fn decode(&self, buffer: &[u32], protocol: &Protocol) -> Option<Bits> {
        let first = *buffer.first()?;
        let sync = protocol.sync();

        // Where in the sync train the capture started: pulses after that
        // point lead the buffer, pulses before it trail the next frame.
        let position = sync
            .iter()
            .position(|&m| self.matches(protocol.duration_us(m), first))
            .unwrap_or(0);
        let leading = sync.len() - position;
        let trailing = position;

        // NOTE: narrowing the end by the trailing sync count assumes the
        // closing sync is the only thing after the data; unverified for
        // protocols whose sync train has more than two pulses.
        let start = leading + protocol.preamble().len();
        let end = buffer.len().checked_sub(trailing)?;
        if start > end || !self.data_pulses.contains(&(end - start)) {
            return None;
        }

        let data = &buffer[start..end];
        let mut bits = Bits::new();
        let mut cursor = 0;
        while cursor < data.len() {
            let window = &data[cursor..];
            let (bit, used) = if self.matches_template(protocol, protocol.zero(), window) {
                (false, protocol.zero().len())
            } else if self.matches_template(protocol, protocol.one(), window) {
                (true, protocol.one().len())
            } else {
                return None;
            };
            bits.push(bit).ok()?;
            cursor += used;
        }

        Some(bits)
    }

    /// Try every protocol in table order; the lowest identifier wins.
    pub fn decode_any(&self, buffer: &[u32]) -> Option<Packet> {
        protocol::iter().find_map(|(id, p)| {
            self.decode(buffer, p).map(|bits| Packet { protocol: id, bits })
        })
    }

    fn matches_template(&self, protocol: &Protocol, template: &[u8], window: &[u32]) -> bool {
        !template.is_empty()
            && template.len() <= window.len()
            && template
                .iter()
                .zip(window)
                .all(|(&m, &actual)| self.matches(protocol.duration_us(m), actual))
    }
}

// ── Encoding ──────────────────────────────────────────────────

/// Electrical level of the output pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    High,
    Low,
}

/// One timed level of an encoded frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pulse {
    pub level: Level,
    pub duration_us: u32,
}

/// Pulse sequence of one frame of `bits`: sync, preamble, then one bit
/// template per bit.  Each template starts HIGH and alternates.
pub fn pulses<'a>(protocol: &'static Protocol, bits: &'a Bits) -> impl Iterator<Item = Pulse> + 'a {
    template(protocol, protocol.sync())
        .chain(template(protocol, protocol.preamble()))
        .chain(bits.iter().flat_map(move |bit| template(protocol, protocol.bit(bit))))
}

/// Encode a packet for the protocol with the given identifier.
pub fn encode(protocol_id: u8, bits: &Bits) -> Result<impl Iterator<Item = Pulse> + '_, RadioError> {
    let protocol = protocol::try_get(protocol_id).ok_or(RadioError::UnknownProtocol(protocol_id))?;
    Ok(pulses(protocol, bits))
}

fn template(protocol: &'static Protocol, entries: &'static [u8]) -> impl Iterator<Item = Pulse> {
    entries.iter().enumerate().map(move |(i, &m)| Pulse {
        level: if i % 2 == 0 { Level::High } else { Level::Low },
        duration_us: protocol.duration_us(m),
    })
}
