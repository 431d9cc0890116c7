//! CoffeePot Firmware — Main Entry Point
//!
//! Hexagonal architecture with event-driven execution.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                  │
//! │                                                          │
//! │  HardwareAdapter      LogEventSink      ClockAdapter     │
//! │  (Switch+Sense)       (EventSink)       (monotonic ms)   │
//! │                                                          │
//! │  ────────────── Port Trait Boundary ─────────────────    │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │           BrewService (pure logic)             │      │
//! │  │  BrewController · deadlines · phase inference  │      │
//! │  └────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The ISR and timer callbacks only push into the lock-free event queue;
//! this loop is the single consumer and the sole mutator of brew state.
#![deny(unused_must_use)]

use anyhow::Result;
use log::info;

use coffeepot::adapters::hardware::HardwareAdapter;
use coffeepot::adapters::log_sink::LogEventSink;
use coffeepot::adapters::time::ClockAdapter;
use coffeepot::app::events::BrewEvent;
use coffeepot::app::ports::EventSink;
use coffeepot::app::service::BrewService;
use coffeepot::config::BrewConfig;
use coffeepot::drivers::power_sense::PowerSenseDriver;
use coffeepot::drivers::power_switch::PowerSwitchDriver;
use coffeepot::drivers::{hw_init, hw_timer};
use coffeepot::events::{self, Event};
use coffeepot::pins;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("CoffeePot v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Peripheral bring-up ────────────────────────────────
    hw_init::init_peripherals().map_err(|e| anyhow::anyhow!("hw init: {e}"))?;
    hw_init::init_isr_service().map_err(|e| anyhow::anyhow!("isr init: {e}"))?;

    let config = BrewConfig::default();
    hw_timer::start_timers(config.control_tick_interval_ms, config.status_interval_secs);

    // ── 3. Adapters and the service core ──────────────────────
    let clock = ClockAdapter::new();
    let mut hw = HardwareAdapter::new(
        PowerSwitchDriver::new(pins::POWER_TRIGGER_GPIO),
        PowerSenseDriver::new(pins::POWER_SENSE_GPIO),
        config.settle_delay_ms,
    );
    let mut sink = LogEventSink::new();
    let mut service = BrewService::new(config, &mut hw, clock.now_ms(), &mut sink);

    // ── 4. Event loop ─────────────────────────────────────────
    // Brew commands arrive from whatever front-end is wired in (serial
    // console, scheduler, home bridge) via BrewService::handle_command;
    // the base firmware just keeps the shadow state honest.
    info!("coffeepot: entering main loop");
    loop {
        events::drain_events(|event| match event {
            Event::PowerSenseEdge => {
                if let Some(edge) = hw.take_edge(clock.now_ms()) {
                    service.on_sense_edge(edge, &mut sink);
                }
            }
            Event::ControlTick => {
                service.tick(clock.now_ms(), &mut hw, &mut sink);
            }
            Event::StatusTick => {
                let status = service.status(clock.now_ms(), &mut hw);
                sink.emit(&BrewEvent::Status(status));
            }
        });

        std::thread::sleep(std::time::Duration::from_millis(10));
    }
}
