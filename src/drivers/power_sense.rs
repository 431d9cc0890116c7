//! Power sense driver — the pot's power LED, seen as one digital input.
//!
//! ## Hardware
//!
//! The sense line follows the pot's power LED: HIGH while the heating
//! element is energised.  The GPIO fires on any edge; the ISR records the
//! new level and a raw timestamp into atomics and signals the event queue.
//! The main loop then calls [`PowerSenseDriver::take_edge`] to consume the
//! pending edge as a [`SenseEdge`] message.
//!
//! Two edges arriving faster than the main loop drains coalesce into the
//! latest one.  That is acceptable here: the brew controller re-reads the
//! live level on every actuation, so a coalesced glitch converges on the
//! next read.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::app::ports::SenseEdge;
#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

/// Latest ISR-reported line level.
static SENSE_ISR_LEVEL: AtomicBool = AtomicBool::new(false);
/// Raw ISR timestamp (milliseconds since boot, truncated to u32).
static SENSE_ISR_AT_MS: AtomicU32 = AtomicU32::new(0);
/// Set by the ISR, cleared by `take_edge`.
static SENSE_EDGE_PENDING: AtomicBool = AtomicBool::new(false);

pub struct PowerSenseDriver {
    gpio: i32,
    /// Level before the pending edge, from the consumer's point of view.
    last_level: bool,
}

impl PowerSenseDriver {
    pub fn new(gpio: i32) -> Self {
        Self {
            gpio,
            last_level: Self::read_hw(gpio),
        }
    }

    /// GPIO pin this sense line is attached to.
    pub fn gpio(&self) -> i32 {
        self.gpio
    }

    /// Live line level.
    pub fn read(&self) -> bool {
        Self::read_hw(self.gpio)
    }

    /// Consume the pending edge, if any.
    ///
    /// `now_ms` is the caller's full-width monotonic clock; the ISR only
    /// stores a truncated u32 timestamp, so the full instant is
    /// reconstructed from the age of the edge.
    pub fn take_edge(&mut self, now_ms: u64) -> Option<SenseEdge> {
        if !SENSE_EDGE_PENDING.swap(false, Ordering::Acquire) {
            return None;
        }

        let level = SENSE_ISR_LEVEL.load(Ordering::Acquire);
        let at_raw = SENSE_ISR_AT_MS.load(Ordering::Acquire);
        let age = (now_ms as u32).wrapping_sub(at_raw);
        let edge = SenseEdge {
            was_heating: self.last_level,
            is_heating: level,
            at_ms: now_ms.saturating_sub(u64::from(age)),
        };
        self.last_level = level;
        Some(edge)
    }

    #[cfg(target_os = "espidf")]
    fn read_hw(gpio: i32) -> bool {
        hw_init::gpio_read(gpio)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_hw(_gpio: i32) -> bool {
        // Simulation follows the last ISR-reported level.
        SENSE_ISR_LEVEL.load(Ordering::Acquire)
    }
}

/// ISR handler — register this on the sense GPIO any-edge interrupt.
/// Safe to call from interrupt context (lock-free atomic stores).
pub fn power_sense_isr_handler(is_heating: bool, now_ms: u32) {
    SENSE_ISR_LEVEL.store(is_heating, Ordering::Release);
    SENSE_ISR_AT_MS.store(now_ms, Ordering::Release);
    SENSE_EDGE_PENDING.store(true, Ordering::Release);
    crate::events::push_event(crate::events::Event::PowerSenseEdge);
}
