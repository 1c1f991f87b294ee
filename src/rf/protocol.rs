//! Catalogue of known OOK wire protocols.
//!
//! Every template is a list of multipliers of the protocol's base width.
//! Consecutive entries alternate electrical level, starting HIGH.  A `0`
//! multiplier terminates a template early.
//!
//! A protocol's identifier is its 1-based position in [`PROTOCOLS`].
//! Identifiers are persisted with every device, so entries must only ever
//! be appended, never reordered or removed.

use super::{MAX_DATA_BIT_PULSES, MAX_PREAMBLE_PULSES, MAX_SYNC_PULSES};

/// Timing template of one wire protocol.
#[derive(Debug, PartialEq, Eq)]
pub struct Protocol {
    /// Human-readable origin of the timings.
    pub name: &'static str,
    /// Base pulse width in microseconds.
    pub width_us: u32,
    /// Sync pulse train marking the start (and end) of a frame.
    pub sync: &'static [u8],
    /// Fixed pulses between sync and data; ignored on decode.
    pub preamble: &'static [u8],
    /// Pulse pattern of a `0` bit.
    pub zero: &'static [u8],
    /// Pulse pattern of a `1` bit.
    pub one: &'static [u8],
}

impl Protocol {
    pub fn sync(&self) -> &'static [u8] {
        terminated(self.sync)
    }

    pub fn preamble(&self) -> &'static [u8] {
        terminated(self.preamble)
    }

    pub fn zero(&self) -> &'static [u8] {
        terminated(self.zero)
    }

    pub fn one(&self) -> &'static [u8] {
        terminated(self.one)
    }

    /// Template for a single bit.
    pub fn bit(&self, bit: bool) -> &'static [u8] {
        if bit { self.one() } else { self.zero() }
    }

    /// Duration of a template entry in microseconds.
    pub const fn duration_us(&self, multiplier: u8) -> u32 {
        multiplier as u32 * self.width_us
    }
}

/// Slice of `template` up to (not including) the first `0` sentinel.
const fn terminated(template: &'static [u8]) -> &'static [u8] {
    let mut len = 0;
    while len < template.len() && template[len] != 0 {
        len += 1;
    }
    template.split_at(len).0
}

const fn protocol(
    name: &'static str,
    width_us: u32,
    sync: &'static [u8],
    preamble: &'static [u8],
    zero: &'static [u8],
    one: &'static [u8],
) -> Protocol {
    Protocol { name, width_us, sync, preamble, zero, one }
}

/// DO NOT reorder: the identifier of an entry is `index + 1`.
#[rustfmt::skip]
const TABLE: [Protocol; 16] = [
    protocol("Master Otello blinds", 400, &[1, 42],
             &[1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 10],
             &[1, 2], &[2, 1]),
    protocol("SatChef socket",                300, &[1, 34],   &[],      &[1, 3],  &[3, 1]),
    protocol("Splenssy alarm",                450, &[1, 29],   &[],      &[1, 3],  &[3, 1]),
    protocol("Sublimex blinds",               360, &[1, 25],   &[13, 4], &[1, 2],  &[2, 1]),
    // rc-switch protocol set
    protocol("Ten pole DIP switch",           350, &[1, 31],   &[],      &[1, 3],  &[3, 1]),
    protocol("Two rotary/sliding switch",     650, &[1, 10],   &[],      &[1, 2],  &[2, 1]),
    protocol("Intertechno socket",            100, &[30, 71],  &[],      &[4, 11], &[9, 6]),
    protocol("SilverCrest socket v1",         380, &[1, 6],    &[],      &[1, 3],  &[3, 1]),
    protocol("SilverCrest socket v2",         500, &[6, 14],   &[],      &[1, 2],  &[2, 1]),
    protocol("HT6P20B",                       450, &[1, 23],   &[],      &[1, 2],  &[2, 1]),
    protocol("HS2303-PT",                     150, &[2, 62],   &[],      &[1, 6],  &[6, 1]),
    protocol("Conrad RS-200 rx",              200, &[3, 130],  &[],      &[7, 16], &[3, 16]),
    protocol("Conrad RS-200 tx",              200, &[7, 130],  &[],      &[16, 7], &[16, 3]),
    protocol("1ByOne doorbell",               365, &[1, 18],   &[],      &[3, 1],  &[1, 3]),
    protocol("HT12E",                         270, &[1, 36],   &[],      &[1, 2],  &[2, 1]),
    protocol("SM5212",                        320, &[1, 36],   &[],      &[1, 2],  &[2, 1]),
];

/// The protocol table, in decode order.
pub static PROTOCOLS: [Protocol; TABLE.len()] = TABLE;

/// Number of protocols in the table.
pub const COUNT: usize = TABLE.len();

/// Protocol with the given 1-based identifier.
///
/// # Panics
///
/// An identifier outside `1..=COUNT` is a programming error.
pub fn get(id: u8) -> &'static Protocol {
    try_get(id).unwrap_or_else(|| panic!("protocol id {id} outside 1..={COUNT}"))
}

/// Checked lookup for identifiers arriving from outside the codec.
pub fn try_get(id: u8) -> Option<&'static Protocol> {
    (id as usize).checked_sub(1).and_then(|index| PROTOCOLS.get(index))
}

/// `(id, protocol)` pairs in table order, which is also the decode order.
pub fn iter() -> impl Iterator<Item = (u8, &'static Protocol)> {
    PROTOCOLS.iter().enumerate().map(|(index, p)| (index as u8 + 1, p))
}

// ── Table-derived timing bounds ───────────────────────────────

/// Smallest base width of any protocol (µs).
pub const MIN_WIDTH_US: u32 = {
    let mut min = u32::MAX;
    let mut i = 0;
    while i < COUNT {
        if TABLE[i].width_us < min {
            min = TABLE[i].width_us;
        }
        i += 1;
    }
    min
};

/// Smallest "longest sync pulse" of any protocol (µs).
pub const MIN_LONGEST_SYNC_US: u32 = {
    let mut min = u32::MAX;
    let mut i = 0;
    while i < COUNT {
        let sync = terminated(TABLE[i].sync);
        let mut longest = 0;
        let mut j = 0;
        while j < sync.len() {
            if sync[j] > longest {
                longest = sync[j];
            }
            j += 1;
        }
        let us = TABLE[i].duration_us(longest);
        if us < min {
            min = us;
        }
        i += 1;
    }
    min
};

// Every template must fit the capture buffer partitions.
const _: () = {
    let mut i = 0;
    while i < COUNT {
        let p = &TABLE[i];
        assert!(!terminated(p.sync).is_empty() && p.sync.len() * 2 <= MAX_SYNC_PULSES);
        assert!(p.preamble.len() <= MAX_PREAMBLE_PULSES);
        assert!(!terminated(p.zero).is_empty() && p.zero.len() <= MAX_DATA_BIT_PULSES);
        assert!(!terminated(p.one).is_empty() && p.one.len() <= MAX_DATA_BIT_PULSES);
        i += 1;
    }
};
