//! One-shot RF peripheral initialization.
//!
//! Configures the receiver data pin as an any-edge interrupt input and
//! the transmitter data pin as a push-pull output, using raw ESP-IDF sys
//! calls.  Called once from `main()` before the radio tasks start.

use core::convert::Infallible;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;
#[cfg(target_os = "espidf")]
use log::info;

use crate::rf::capture::Capturer;
use crate::rf::queue::PacketQueue;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
    IsrInstallFailed(i32),
    IsrHandlerFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::IsrInstallFailed(rc) => write!(f, "GPIO ISR service install failed (rc={})", rc),
            Self::IsrHandlerFailed(rc) => write!(f, "GPIO ISR handler add failed (rc={})", rc),
        }
    }
}

impl std::error::Error for HwInitError {}

// ── Pin configuration ─────────────────────────────────────────

/// Receiver pin: input, pulled down so a missing module reads idle-low,
/// interrupting on both edges.  Transmitter pin: output, driven low.
#[cfg(target_os = "espidf")]
pub fn init_rf_pins(rx_gpio: i32, tx_gpio: i32) -> Result<(), HwInitError> {
    let rx_cfg = gpio_config_t {
        pin_bit_mask: 1u64 << rx_gpio,
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_ENABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_ANYEDGE,
    };
    // SAFETY: Called once from main() before any task touches these pins.
    let ret = unsafe { gpio_config(&rx_cfg) };
    if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }

    let tx_cfg = gpio_config_t {
        pin_bit_mask: 1u64 << tx_gpio,
        mode: gpio_mode_t_GPIO_MODE_OUTPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    // SAFETY: as above.
    let ret = unsafe { gpio_config(&tx_cfg) };
    if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }
    // SAFETY: pin configured as output just above.
    unsafe { gpio_set_level(tx_gpio, 0) };

    info!("hw_init: RF pins configured (rx=GPIO{rx_gpio}, tx=GPIO{tx_gpio})");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_rf_pins(rx_gpio: i32, tx_gpio: i32) -> Result<(), HwInitError> {
    log::info!("hw_init(sim): RF pins rx=GPIO{rx_gpio} tx=GPIO{tx_gpio} skipped");
    Ok(())
}

// ── Transmitter output pin ────────────────────────────────────

/// Raw GPIO output for the emitter.
///
/// `gpio_set_level` only fails for an invalid pin number, which
/// [`init_rf_pins`] already rejected, so writes are infallible.
#[derive(Debug)]
pub struct GpioOutput {
    gpio: i32,
    #[cfg(not(target_os = "espidf"))]
    high: bool,
}

impl GpioOutput {
    pub fn new(gpio: i32) -> Self {
        Self {
            gpio,
            #[cfg(not(target_os = "espidf"))]
            high: false,
        }
    }

    pub fn gpio(&self) -> i32 {
        self.gpio
    }

    #[cfg(target_os = "espidf")]
    fn write(&mut self, high: bool) {
        // SAFETY: register write on a pin configured as output in
        // init_rf_pins(); only the emitter task owns this value.
        unsafe { gpio_set_level(self.gpio, u32::from(high)) };
    }

    #[cfg(not(target_os = "espidf"))]
    fn write(&mut self, high: bool) {
        self.high = high;
    }

    /// Last level written (sim only).
    #[cfg(not(target_os = "espidf"))]
    pub fn is_high(&self) -> bool {
        self.high
    }
}

impl embedded_hal::digital::ErrorType for GpioOutput {
    type Error = Infallible;
}

impl embedded_hal::digital::OutputPin for GpioOutput {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.write(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.write(true);
        Ok(())
    }
}

// ── Receiver edge ISR ─────────────────────────────────────────

/// State owned by the edge interrupt.  Leaked at install time; nothing
/// but the ISR ever dereferences it.
#[cfg_attr(not(target_os = "espidf"), allow(dead_code))]
struct RxIsrContext<const N: usize> {
    capturer: Capturer<'static>,
    queue: &'static PacketQueue<N>,
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn rf_rx_isr<const N: usize>(arg: *mut core::ffi::c_void) {
    // SAFETY: `arg` is the leaked RxIsrContext registered in
    // install_rx_isr(); this handler is its only user and does not nest.
    let ctx = unsafe { &mut *arg.cast::<RxIsrContext<N>>() };
    // SAFETY: esp_timer_get_time is a counter read; safe in ISR context.
    let now_us = unsafe { esp_timer_get_time() } as u64;
    if let Some(packet) = ctx.capturer.on_edge(now_us) {
        ctx.queue.push_lossy(packet);
    }
}

/// Install the GPIO ISR service and hand `capturer` to the receiver pin's
/// edge interrupt.  Decoded packets go to `queue`, dropped when full.
#[cfg(target_os = "espidf")]
pub fn install_rx_isr<const N: usize>(
    rx_gpio: i32,
    capturer: Capturer<'static>,
    queue: &'static PacketQueue<N>,
) -> Result<(), HwInitError> {
    let ctx: &'static mut RxIsrContext<N> = Box::leak(Box::new(RxIsrContext { capturer, queue }));

    // SAFETY: ESP_ERR_INVALID_STATE means the service is already installed
    // (acceptable).  The handler argument outlives the registration since
    // it is leaked.
    unsafe {
        let ret = gpio_install_isr_service(0);
        if ret != ESP_OK as i32 && ret != ESP_ERR_INVALID_STATE as i32 {
            return Err(HwInitError::IsrInstallFailed(ret));
        }

        let arg = core::ptr::from_mut(ctx).cast::<core::ffi::c_void>();
        let ret = gpio_isr_handler_add(rx_gpio, Some(rf_rx_isr::<N>), arg);
        if ret != ESP_OK as i32 { return Err(HwInitError::IsrHandlerFailed(ret)); }
        gpio_intr_enable(rx_gpio);
    }

    info!("hw_init: RF edge ISR installed on GPIO{rx_gpio}");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn install_rx_isr<const N: usize>(
    rx_gpio: i32,
    capturer: Capturer<'static>,
    queue: &'static PacketQueue<N>,
) -> Result<(), HwInitError> {
    let _ctx = RxIsrContext { capturer, queue };
    log::info!("hw_init(sim): RF edge ISR on GPIO{rx_gpio} skipped");
    Ok(())
}
