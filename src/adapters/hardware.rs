//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the trigger and sense drivers, exposing them through
//! [`PowerSwitchPort`] and [`PowerSensePort`].  This is the only module in
//! the system that touches actual hardware.  On non-espidf targets, the
//! underlying drivers use cfg-gated simulation stubs.

use crate::app::ports::{PowerSensePort, PowerSwitchPort, SenseEdge};
use crate::drivers::power_sense::PowerSenseDriver;
use crate::drivers::power_switch::PowerSwitchDriver;

/// Concrete adapter that combines the pot's two lines behind port traits.
pub struct HardwareAdapter {
    switch: PowerSwitchDriver,
    sense: PowerSenseDriver,
    /// Post-write settle delay (ms).  Zero disables it; raise if the pot's
    /// latch needs time between a press and a meaningful sensor read.
    settle_delay_ms: u64,
}

impl HardwareAdapter {
    pub fn new(switch: PowerSwitchDriver, sense: PowerSenseDriver, settle_delay_ms: u64) -> Self {
        Self {
            switch,
            sense,
            settle_delay_ms,
        }
    }

    /// Consume the pending sense-line edge, if any.
    pub fn take_edge(&mut self, now_ms: u64) -> Option<SenseEdge> {
        self.sense.take_edge(now_ms)
    }
}

// ── PowerSwitchPort implementation ────────────────────────────

impl PowerSwitchPort for HardwareAdapter {
    fn set_line(&mut self, asserted: bool) {
        self.switch.set(asserted);
        if self.settle_delay_ms > 0 {
            std::thread::sleep(std::time::Duration::from_millis(self.settle_delay_ms));
        }
    }
}

// ── PowerSensePort implementation ─────────────────────────────

impl PowerSensePort for HardwareAdapter {
    fn is_heating(&mut self) -> bool {
        self.sense.read()
    }
}
