//! Application service — the hexagonal core.
//!
//! [`BrewService`] owns the [`BrewController`] and exposes a clean,
//! hardware-agnostic API.  All I/O flows through port traits injected at
//! call sites, making the entire service testable with mock adapters.
//!
//! ```text
//!  PowerSensePort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                     │      BrewService        │
//! PowerSwitchPort ◀───│  BrewController · timers│
//!                     └────────────────────────┘
//! ```

use log::info;

use crate::brew::BrewController;
use crate::config::BrewConfig;
use crate::error::{Error, Result};

use super::commands::BrewCommand;
use super::events::{BrewEvent, BrewStatus};
use super::ports::{EventSink, PowerSensePort, PowerSwitchPort, SenseEdge};

/// The application service orchestrates the brew domain logic.
pub struct BrewService {
    controller: BrewController,
}

impl BrewService {
    /// Construct the service, binding the controller to the pot behind
    /// `hw`.  Emits [`BrewEvent::Started`] with the initial phase.
    pub fn new(
        config: BrewConfig,
        hw: &mut impl PowerSensePort,
        now_ms: u64,
        sink: &mut impl EventSink,
    ) -> Self {
        let controller = BrewController::new(config, hw, now_ms);
        sink.emit(&BrewEvent::Started(controller.phase()));
        info!("BrewService started in {:?}", controller.phase());
        Self { controller }
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command (from scheduler, serial, bridge, etc.).
    ///
    /// Actuation failures are both emitted through the sink and returned,
    /// so callers can distinguish a failed press cycle from the benign
    /// already-in-target-state no-op.
    pub fn handle_command(
        &mut self,
        cmd: BrewCommand,
        hw: &mut (impl PowerSwitchPort + PowerSensePort),
        sink: &mut impl EventSink,
    ) -> Result<()> {
        match cmd {
            BrewCommand::StartBrew { cups, keep_hot_ms } => {
                match self.controller.start_brew(cups, keep_hot_ms, hw) {
                    Ok(true) => {
                        sink.emit(&BrewEvent::BrewStarted { cups, keep_hot_ms });
                        Ok(())
                    }
                    Ok(false) => {
                        sink.emit(&BrewEvent::AlreadyOn);
                        Ok(())
                    }
                    Err(e) => {
                        self.emit_failure(e, sink);
                        Err(e)
                    }
                }
            }
            BrewCommand::PowerOff => match self.controller.power_off(hw) {
                Ok(true) => {
                    sink.emit(&BrewEvent::PoweredOff);
                    Ok(())
                }
                Ok(false) => {
                    sink.emit(&BrewEvent::AlreadyOff);
                    Ok(())
                }
                Err(e) => {
                    self.emit_failure(e, sink);
                    Err(e)
                }
            },
            BrewCommand::UpdateConfig(config) => {
                self.controller.set_config(config);
                info!("Configuration updated at runtime");
                Ok(())
            }
        }
    }

    // ── Edge and tick forwarding ──────────────────────────────

    /// Deliver a sense-line edge to the controller, emitting
    /// [`BrewEvent::PhaseChanged`] if the inferred phase moved.
    pub fn on_sense_edge(&mut self, edge: SenseEdge, sink: &mut impl EventSink) {
        let from = self.controller.phase();
        self.controller.on_sense_edge(edge);
        let to = self.controller.phase();
        if from != to {
            sink.emit(&BrewEvent::PhaseChanged { from, to });
        }
    }

    /// Run one deadline-evaluation tick, emitting [`BrewEvent::BrewFinished`]
    /// and [`BrewEvent::KeepHotExpired`] as the windows elapse.
    pub fn tick(
        &mut self,
        now_ms: u64,
        hw: &mut (impl PowerSwitchPort + PowerSensePort),
        sink: &mut impl EventSink,
    ) {
        let brew_due = self.controller.brew_deadline_ms().is_some_and(|d| d <= now_ms);
        let keep_hot_due = self
            .controller
            .power_off_deadline_ms()
            .is_some_and(|d| d <= now_ms);

        self.controller.tick(now_ms, hw);

        if brew_due {
            sink.emit(&BrewEvent::BrewFinished);
        }
        // A zero keep-hot window arms and fires within the same tick; the
        // keep-hot deadline being gone again after a brew expiry means it
        // fired too.
        if keep_hot_due || (brew_due && self.controller.power_off_deadline_ms().is_none()) {
            sink.emit(&BrewEvent::KeepHotExpired);
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Build a point-in-time status snapshot.
    pub fn status(&self, now_ms: u64, hw: &mut impl PowerSensePort) -> BrewStatus {
        BrewStatus {
            phase: self.controller.phase(),
            is_heating: hw.is_heating(),
            is_brewing: self.controller.is_brewing(),
            brew_remaining_ms: self
                .controller
                .brew_deadline_ms()
                .map(|d| d.saturating_sub(now_ms)),
            keep_hot_remaining_ms: self
                .controller
                .power_off_deadline_ms()
                .map(|d| d.saturating_sub(now_ms)),
        }
    }

    /// Direct access to the controller (status panels, tests).
    pub fn controller(&self) -> &BrewController {
        &self.controller
    }

    // ── Internal ──────────────────────────────────────────────

    fn emit_failure(&self, err: Error, sink: &mut impl EventSink) {
        if let Error::Actuation(e) = err {
            sink.emit(&BrewEvent::ActuationFailed(e));
        }
    }
}
