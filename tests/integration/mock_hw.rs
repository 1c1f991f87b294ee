//! Mock radio hardware for integration tests.
//!
//! [`ScopePin`] and [`ScopeDelay`] share a virtual microsecond clock: the
//! delay advances it, the pin timestamps every level change.  The
//! resulting edge list is exactly what the receiver's edge interrupt
//! would see, so an emitted burst can be fed straight into a `Capturer`.

use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};
use rfhub::app::events::AppEvent;
use rfhub::app::ports::{EventSink, TransmitPort};
use rfhub::error::RadioError;
use rfhub::rf::capture::{CaptureStats, Capturer};
use rfhub::rf::emit::NoGuard;
use rfhub::rf::{Decoder, Emitter, Packet};

/// First edge timestamp; short enough that the capture path treats the
/// silence before it as an ordinary pulse, not a sync.
pub const T0_US: u64 = 1_000;

// ── Virtual clock ─────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Clock(Rc<Cell<u64>>);

impl Clock {
    pub fn starting_at(t: u64) -> Self {
        Self(Rc::new(Cell::new(t)))
    }

    pub fn now(&self) -> u64 {
        self.0.get()
    }

    pub fn advance(&self, us: u64) {
        self.0.set(self.0.get() + us);
    }
}

// ── ScopePin ──────────────────────────────────────────────────

/// Output pin that records the time of every level change.
#[derive(Debug)]
pub struct ScopePin {
    clock: Clock,
    high: bool,
    edges: Rc<RefCell<Vec<u64>>>,
    writes: Rc<Cell<usize>>,
}

/// Read side of a [`ScopePin`], kept by the test after the pin moves
/// into the emitter.
#[derive(Debug, Clone)]
pub struct Probe {
    edges: Rc<RefCell<Vec<u64>>>,
    writes: Rc<Cell<usize>>,
}

impl Probe {
    pub fn edges(&self) -> Vec<u64> {
        self.edges.borrow().clone()
    }

    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    pub fn clear(&self) {
        self.edges.borrow_mut().clear();
    }
}

impl ScopePin {
    pub fn new(clock: Clock) -> (Self, Probe) {
        let edges = Rc::new(RefCell::new(Vec::new()));
        let writes = Rc::new(Cell::new(0));
        let probe = Probe { edges: Rc::clone(&edges), writes: Rc::clone(&writes) };
        (Self { clock, high: false, edges, writes }, probe)
    }

    fn write(&mut self, high: bool) {
        self.writes.set(self.writes.get() + 1);
        if high != self.high {
            self.high = high;
            self.edges.borrow_mut().push(self.clock.now());
        }
    }

    pub fn is_high(&self) -> bool {
        self.high
    }
}

impl ErrorType for ScopePin {
    type Error = Infallible;
}

impl OutputPin for ScopePin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.write(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.write(true);
        Ok(())
    }
}

// ── ScopeDelay ────────────────────────────────────────────────

#[derive(Debug)]
pub struct ScopeDelay(pub Clock);

impl DelayNs for ScopeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.advance(u64::from(ns).div_ceil(1000));
    }

    fn delay_us(&mut self, us: u32) {
        self.0.advance(u64::from(us));
    }
}

// ── Loopback ──────────────────────────────────────────────────

pub type ScopeEmitter = Emitter<ScopePin, ScopeDelay, NoGuard>;

/// Emitter wired to a scope starting at [`T0_US`].
pub fn scope_emitter(replays: u8) -> (ScopeEmitter, Probe) {
    let clock = Clock::starting_at(T0_US);
    let (pin, probe) = ScopePin::new(clock.clone());
    (Emitter::new(pin, ScopeDelay(clock), NoGuard, replays), probe)
}

/// Edge timestamps the receiver sees for one transmit request.
pub fn emitted_edges(packet: &Packet, replays: u8) -> Vec<u64> {
    let (mut emitter, probe) = scope_emitter(replays);
    emitter.transmit(packet).expect("transmit");
    probe.edges()
}

/// Run edges through a fresh capturer; returns every decoded packet.
pub fn capture(edges: &[u64], decoder: Decoder, stats: &CaptureStats) -> Vec<Packet> {
    let mut capturer = Capturer::new(decoder, stats);
    edges.iter().filter_map(|&t| capturer.on_edge(t)).collect()
}

// ── Event / transmit recorders ────────────────────────────────

#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

/// Transmit port that accepts everything and remembers it.
#[derive(Debug, Default)]
pub struct RecordingTx {
    pub sent: RefCell<Vec<Packet>>,
}

impl TransmitPort for RecordingTx {
    fn submit(&self, packet: Packet) -> Result<(), RadioError> {
        self.sent.borrow_mut().push(packet);
        Ok(())
    }
}
