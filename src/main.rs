//! RfHub firmware: main entry point.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │  GPIO17 edge ISR ──▶ Capturer ──▶ RX_QUEUE ──▶ rf-rx task     │
//! │                                                   │           │
//! │                                   HubService · MemoryDeviceStore
//! │                                                   │           │
//! │  GPIO38 ◀── Emitter (rf-tx task) ◀── TX_QUEUE ◀───┘           │
//! └───────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Imports ───────────────────────────────────────────────────
use anyhow::{Context, Result};
use log::{info, warn};

use esp_idf_hal::delay::Ets;
use rfhub::adapters::log_sink::LogEventSink;
use rfhub::adapters::memory_store::MemoryDeviceStore;
use rfhub::app::service::HubService;
use rfhub::config::RadioConfig;
use rfhub::drivers::hw_init::{self, GpioOutput};
use rfhub::drivers::task_pin::{Core, TaskSpec, spawn_on_core};
use rfhub::rf::emit::IsrBurstGuard;
use rfhub::rf::{self, CaptureStats, Capturer, Emitter, RX_QUEUE, TX_QUEUE};

/// Capture counters, written by the edge ISR.
static CAPTURE_STATS: CaptureStats = CaptureStats::new();

/// Log capture counters every this many received packets.
const STATS_EVERY: u32 = 50;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  RfHub v{}                           ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = RadioConfig::default();
    config.validate()?;

    // ── 3. Radio pins + edge ISR (fatal on failure) ──────────
    hw_init::init_rf_pins(config.rx_gpio, config.tx_gpio).context("RF pin init")?;
    let capturer = Capturer::new(config.decoder(), &CAPTURE_STATS);
    info!(
        "rf_rx: noise < {}us, sync >= {}us, tolerance {}%",
        capturer.min_pulse_us(),
        capturer.min_sync_us(),
        config.tolerance_percent
    );
    hw_init::install_rx_isr(config.rx_gpio, capturer, &RX_QUEUE).context("RF ISR install")?;

    // ── 4. Emitter task ───────────────────────────────────────
    let emitter = Emitter::new(
        GpioOutput::new(config.tx_gpio),
        Ets,
        IsrBurstGuard::new(),
        config.replays,
    );
    let tx_spec = TaskSpec {
        name: "rf-tx\0",
        core: Core::App,
        priority: config.tx_task_priority,
        stack_kb: config.task_stack_kb,
    };
    spawn_on_core(tx_spec, move || {
        emitter.run(&TX_QUEUE);
    }).context("spawn rf-tx")?;

    // ── 5. Receive consumer task ──────────────────────────────
    let rx_spec = TaskSpec {
        name: "rf-rx\0",
        core: Core::App,
        priority: config.rx_task_priority,
        stack_kb: config.task_stack_kb,
    };
    let rx = spawn_on_core(rx_spec, rx_task).context("spawn rf-rx")?;

    info!("hub: ready");
    // The consumer never returns; joining keeps main's stack alive.
    if rx.join().is_err() {
        warn!("hub: rf-rx task panicked");
    }
    Ok(())
}

// ── Receive consumer ──────────────────────────────────────────

fn rx_task() {
    let mut hub = HubService::new();
    let mut store = MemoryDeviceStore::new();
    let mut sink = LogEventSink::new();

    loop {
        let packet = rf::receive();
        if let Err(e) = hub.handle_packet(packet, &mut store, &mut sink) {
            warn!("hub: packet handling failed: {e}");
        }

        let received = hub.stats().received;
        if received % STATS_EVERY == 0 {
            let s = CAPTURE_STATS.snapshot();
            info!(
                "rf_rx: {} packets | decoded={} rejected={} noise={} dropped={}",
                received,
                s.decoded,
                s.rejected,
                s.noise,
                RX_QUEUE.dropped()
            );
        }
    }
}
