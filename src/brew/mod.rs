//! Brew controller — mode inference, actuation, and the two brew timers.
//!
//! The pot exposes exactly one actuator (a simulated press of its single
//! power button) and one observable bit (whether the heating element is
//! energised).  Internally the pot steps through a fixed cycle on every
//! press:
//!
//! ```text
//! State             | Timer LED | Power LED | Sense line
//! OFF               | off       | off       | LOW
//! BREW (on demand)  | off       | on        | HIGH
//! TIMER             | on        | off       | LOW
//! BREW (from timer) | on        | on        | HIGH
//!
//! Press from:  OFF → BREW (on demand) → TIMER → OFF
//!              BREW (from timer) → OFF
//! ```
//!
//! The controller reconstructs the pot's logical state from sense-line
//! edges and elapsed time.  That shadow state can desynchronise if an edge
//! is missed; the next edge or live sensor read re-converges it.
//!
//! Timer model: one-shot deadlines held as `Option<u64>` monotonic-ms
//! instants, evaluated on each control tick.  `Some` = armed, `None` =
//! disarmed; re-arming overwrites.

use log::{debug, info, warn};

use crate::app::ports::{PowerSensePort, PowerSwitchPort, SenseEdge};
use crate::config::BrewConfig;
use crate::error::{ActuationError, Error, Result};

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// Inferred pot phase, updated transactionally by the edge handler and the
/// deadline callbacks — never by actuation calls, which rely on the
/// hardware loop-back to confirm state.
///
/// `Timer` and `BrewFromTimer` mark the pot's scheduled-brew branch.  With
/// only the power-LED bit sensed, a falling edge out of BREW cannot be told
/// apart from a power-down, so falling edges conservatively resolve to
/// `Off`; the variants are the seam where timer-LED sensing would plug in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrewPhase {
    /// Pot is dark.
    Off,
    /// Heating after a press (or our trigger) from OFF.
    BrewOnDemand,
    /// Scheduled to brew later; not heating.
    Timer,
    /// Heating, entered from the scheduled branch.
    BrewFromTimer,
}

impl BrewPhase {
    /// Whether this phase means the heating element should be energised.
    pub fn heating(self) -> bool {
        matches!(self, Self::BrewOnDemand | Self::BrewFromTimer)
    }
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Controls and monitors basic brew functions of a single-button coffee
/// maker.
///
/// Hardware access goes through the port traits passed per call; the
/// controller itself is pure state.  All mutation happens from the main
/// loop (commands, edges, ticks are serialised there), so no internal
/// locking is required.
pub struct BrewController {
    config: BrewConfig,
    phase: BrewPhase,
    is_brewing: bool,
    /// Computed at brew start, consumed when an on-edge arms the window.
    brew_duration_ms: u64,
    /// Set by the caller at brew start, consumed when the brew window ends.
    keep_hot_duration_ms: u64,
    /// Armed by on-edges; fires `brew_duration_ms` later.
    brew_deadline_ms: Option<u64>,
    /// Armed when the brew window ends; fires `keep_hot_duration_ms` later.
    power_off_deadline_ms: Option<u64>,
}

impl BrewController {
    /// Bind the controller to the pot whose sense line `hw` reads.
    ///
    /// Never writes the trigger line.  If the pot is already heating
    /// (manual press before boot, or a warm reboot), the keep-hot expiry is
    /// armed for the current keep-hot duration so the burner cannot stay on
    /// unattended.
    pub fn new(config: BrewConfig, hw: &mut impl PowerSensePort, now_ms: u64) -> Self {
        let mut ctl = Self {
            config,
            phase: BrewPhase::Off,
            is_brewing: false,
            brew_duration_ms: 0,
            keep_hot_duration_ms: 0,
            brew_deadline_ms: None,
            power_off_deadline_ms: None,
        };

        if hw.is_heating() {
            ctl.phase = BrewPhase::BrewOnDemand;
            ctl.power_off_deadline_ms = Some(now_ms + ctl.keep_hot_duration_ms);
            info!("brew: pot already heating at init, keep-hot expiry armed");
        }

        ctl
    }

    // ── Commands ──────────────────────────────────────────────

    /// Start brewing `cups` cups, keeping the burner on for
    /// `keep_hot_duration_ms` after brewing completes.
    ///
    /// Returns `Ok(false)` without touching the trigger line if the pot is
    /// already heating — a presumed manual-on state we must not override.
    /// Otherwise presses the button (a sustained assertion) up to
    /// `power_cycle_count` times, polling the sensor after each, and fails
    /// with [`ActuationError::StartFailed`] if the pot never latches on.
    pub fn start_brew(
        &mut self,
        cups: u32,
        keep_hot_duration_ms: u64,
        hw: &mut (impl PowerSwitchPort + PowerSensePort),
    ) -> Result<bool> {
        if hw.is_heating() {
            debug!("brew: start ignored, pot already heating");
            return Ok(false);
        }

        self.brew_duration_ms = u64::from(cups) * self.config.brew_ms_per_cup;
        self.keep_hot_duration_ms = keep_hot_duration_ms;

        for attempt in 0..self.config.power_cycle_count {
            // Sustained press: the line stays asserted while the pot
            // latches.  Only power_off() releases it.
            hw.set_line(true);

            if hw.is_heating() {
                debug!("brew: pot latched on after {} press(es)", attempt + 1);
                return Ok(true);
            }
        }

        warn!(
            "brew: sensor never read heating after {} presses",
            self.config.power_cycle_count
        );
        Err(Error::Actuation(ActuationError::StartFailed))
    }

    /// Power the pot off.
    ///
    /// Returns `Ok(false)` without touching the trigger line if the pot is
    /// already off.  Otherwise each attempt taps the button twice — a
    /// single press out of BREW lands on the timer-only phase, the second
    /// carries through to OFF — and polls the sensor, failing with
    /// [`ActuationError::StopFailed`] after `power_cycle_count` attempts.
    pub fn power_off(&mut self, hw: &mut (impl PowerSwitchPort + PowerSensePort)) -> Result<bool> {
        if !hw.is_heating() {
            return Ok(false);
        }

        for attempt in 0..self.config.power_cycle_count {
            Self::pulse_high(hw);
            Self::pulse_high(hw);

            if !hw.is_heating() {
                debug!("brew: pot latched off after {} attempt(s)", attempt + 1);
                return Ok(true);
            }
        }

        warn!(
            "brew: sensor still read heating after {} double-pulses",
            self.config.power_cycle_count
        );
        Err(Error::Actuation(ActuationError::StopFailed))
    }

    /// One full press: assert then release the trigger line.
    fn pulse_high(hw: &mut impl PowerSwitchPort) {
        hw.set_line(true);
        hw.set_line(false);
    }

    // ── Edge handler ──────────────────────────────────────────

    /// Handle a sense-line edge reported by the interrupt path.
    ///
    /// The only place that arms the brew deadline or disarms the power-off
    /// deadline.  Driven exclusively by hardware-reported transitions, so a
    /// human pressing the real button is handled identically to our own
    /// trigger pulses.
    pub fn on_sense_edge(&mut self, edge: SenseEdge) {
        // The pot's state just changed, so any scheduled keep-hot expiry is
        // stale.  Must happen before the new level is inspected.
        self.power_off_deadline_ms = None;

        if edge.is_heating {
            self.phase = match self.phase {
                BrewPhase::Timer => BrewPhase::BrewFromTimer,
                _ => BrewPhase::BrewOnDemand,
            };
            self.is_brewing = true;
            self.brew_deadline_ms = Some(edge.at_ms + self.brew_duration_ms);
            info!(
                "brew: heating on, brew window {} ms ({:?})",
                self.brew_duration_ms, self.phase
            );
        } else {
            self.brew_deadline_ms = None;
            self.phase = BrewPhase::Off;
            self.is_brewing = false;
            info!("brew: heating off");
        }
    }

    // ── Deadline evaluation ───────────────────────────────────

    /// Evaluate armed deadlines against `now_ms`.  Called at control-tick
    /// rate from the main loop.
    ///
    /// Brew window elapsed → brewing is over, arm the keep-hot expiry.
    /// Keep-hot elapsed → power the pot off, best-effort: it may already be
    /// off (manual press), and a stuck switch is only worth a log line
    /// here.
    pub fn tick(&mut self, now_ms: u64, hw: &mut (impl PowerSwitchPort + PowerSensePort)) {
        if self.brew_deadline_ms.is_some_and(|d| d <= now_ms) {
            self.brew_deadline_ms = None;
            self.is_brewing = false;
            self.power_off_deadline_ms = Some(now_ms + self.keep_hot_duration_ms);
            info!(
                "brew: brew window elapsed, keeping hot for {} ms",
                self.keep_hot_duration_ms
            );
        }

        if self.power_off_deadline_ms.is_some_and(|d| d <= now_ms) {
            self.power_off_deadline_ms = None;
            info!("brew: keep-hot window elapsed, powering off");
            if let Err(e) = self.power_off(hw) {
                warn!("brew: keep-hot expiry power-off failed: {e}");
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Whether the pot is believed to be actively brewing (as opposed to
    /// keeping warm or idle).
    pub fn is_brewing(&self) -> bool {
        self.is_brewing
    }

    /// Live sensor read — never cached.
    pub fn is_heating(&self, hw: &mut impl PowerSensePort) -> bool {
        hw.is_heating()
    }

    /// Current inferred phase.
    pub fn phase(&self) -> BrewPhase {
        self.phase
    }

    /// Keep-hot duration for the current brew cycle (ms).
    pub fn keep_hot_duration_ms(&self) -> u64 {
        self.keep_hot_duration_ms
    }

    /// Armed brew-window deadline, if any (monotonic ms).
    pub fn brew_deadline_ms(&self) -> Option<u64> {
        self.brew_deadline_ms
    }

    /// Armed keep-hot deadline, if any (monotonic ms).
    pub fn power_off_deadline_ms(&self) -> Option<u64> {
        self.power_off_deadline_ms
    }

    /// Live configuration.
    pub fn config(&self) -> &BrewConfig {
        &self.config
    }

    /// Hot-reload configuration.  Applies to the next brew; an armed brew
    /// window keeps its original duration.
    pub fn set_config(&mut self, config: BrewConfig) {
        self.config = config;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
