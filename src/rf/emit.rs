//! Emit path: replays encoded frames on the transmitter data pin.
//!
//! A single task owns the output pin and drains [`TX_QUEUE`](super::TX_QUEUE).
//! Each burst runs inside a [`BurstGuard`] so scheduler or interrupt
//! latency cannot stretch a pulse.  Timing comes from a busy-wait
//! [`DelayNs`]; on the device that is `esp_idf_hal::delay::Ets`.
//!
//! ```text
//!   ┌ low ┐┌ frame ┐┌ frame ┐┌ frame ┐┌ low ┐
//!   └─────┘└───────┘└───────┘└───────┘└─────┘
//!          ◀─────── replays × encode() ──────▶
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};

use super::codec::{self, Level};
use super::packet::Packet;
use super::protocol;
use super::queue::PacketQueue;
use crate::error::RadioError;

/// Replays per transmit request.
pub const DEFAULT_REPLAYS: u8 = 3;

/// Exclusive section around one burst.
///
/// On the device this masks interrupts and preemption on the current core.
pub trait BurstGuard {
    fn exclusive<R>(&self, f: impl FnOnce() -> R) -> R;
}

/// No exclusion; for hosts and tests where timing does not matter.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoGuard;

impl BurstGuard for NoGuard {
    fn exclusive<R>(&self, f: impl FnOnce() -> R) -> R {
        f()
    }
}

/// Masks interrupts on the calling core for the duration of a burst.
#[cfg(target_os = "espidf")]
pub struct IsrBurstGuard(esp_idf_hal::interrupt::IsrCriticalSection);

#[cfg(target_os = "espidf")]
impl IsrBurstGuard {
    pub const fn new() -> Self {
        Self(esp_idf_hal::interrupt::IsrCriticalSection::new())
    }
}

#[cfg(target_os = "espidf")]
impl BurstGuard for IsrBurstGuard {
    fn exclusive<R>(&self, f: impl FnOnce() -> R) -> R {
        let _cs = self.0.enter();
        f()
    }
}

pub struct Emitter<P, D, G> {
    pin: P,
    delay: D,
    guard: G,
    replays: u8,
}

impl<P, D, G> Emitter<P, D, G>
where
    P: OutputPin,
    D: DelayNs,
    G: BurstGuard,
{
    pub fn new(pin: P, delay: D, guard: G, replays: u8) -> Self {
        Self {
            pin,
            delay,
            guard,
            replays: replays.max(1),
        }
    }

    pub fn replays(&self) -> u8 {
        self.replays
    }

    /// Drive `packet` on the pin `replays` times back to back.
    ///
    /// A burst is never cut short: a failed pin write is reported after
    /// the last replay and the pin is still left low.
    pub fn transmit(&mut self, packet: &Packet) -> Result<(), RadioError> {
        let protocol = protocol::try_get(packet.protocol)
            .ok_or(RadioError::UnknownProtocol(packet.protocol))?;

        let Self { pin, delay, guard, replays } = self;
        guard.exclusive(|| {
            let mut failed = pin.set_low().is_err();
            for _ in 0..*replays {
                for pulse in codec::pulses(protocol, &packet.bits) {
                    let state = match pulse.level {
                        Level::High => PinState::High,
                        Level::Low => PinState::Low,
                    };
                    failed |= pin.set_state(state).is_err();
                    delay.delay_us(pulse.duration_us);
                }
            }
            failed |= pin.set_low().is_err();
            if failed { Err(RadioError::PinWrite) } else { Ok(()) }
        })
    }

    /// Emitter task body: transmit every packet queued on `queue`, forever.
    pub fn run<const N: usize>(mut self, queue: &PacketQueue<N>) -> ! {
        log::info!("rf_tx: emitter running ({} replays per packet)", self.replays);
        loop {
            let packet = queue.receive();
            match self.transmit(&packet) {
                Ok(()) => log::debug!("rf_tx: sent {packet}"),
                Err(e) => log::warn!("rf_tx: {packet} failed: {e}"),
            }
        }
    }

    /// Release the pin and delay provider.
    pub fn into_parts(self) -> (P, D, G) {
        (self.pin, self.delay, self.guard)
    }
}
