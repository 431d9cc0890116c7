//! System configuration parameters
//!
//! All tunable parameters for the CoffeePot controller.
//! Values can be overridden at construction or hot-reloaded via
//! [`BrewCommand::UpdateConfig`](crate::app::commands::BrewCommand).

use serde::{Deserialize, Serialize};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrewConfig {
    // --- Brew model ---
    /// Heating time attributed to one cup (milliseconds)
    pub brew_ms_per_cup: u64,
    /// Discrete states the pot cycles through per button press
    /// (off → brew-on-demand → timer → off)
    pub power_cycle_count: u32,

    // --- Actuation ---
    /// Delay applied by the hardware adapter after each trigger-line write,
    /// before the next sensor read (milliseconds).  Zero disables it; raise
    /// if the pot's latch needs time to settle.
    pub settle_delay_ms: u64,

    // --- Timing ---
    /// Control tick interval — deadline evaluation rate (milliseconds)
    pub control_tick_interval_ms: u32,
    /// Status report interval (seconds)
    pub status_interval_secs: u32,
}

impl Default for BrewConfig {
    fn default() -> Self {
        Self {
            // Brew model
            brew_ms_per_cup: 60_000, // one cup ≈ one minute of heating
            power_cycle_count: 3,

            // Actuation
            settle_delay_ms: 0,

            // Timing
            control_tick_interval_ms: 100, // 10 Hz
            status_interval_secs: 60,      // 1/min
        }
    }
}
