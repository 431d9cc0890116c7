//! Mock hardware adapter for integration tests.
//!
//! Records every trigger-line write so tests can assert on the full press
//! history without touching real GPIO registers, and scripts how the pot's
//! sense line responds to presses.

use coffeepot::app::events::BrewEvent;
use coffeepot::app::ports::{EventSink, PowerSensePort, PowerSwitchPort, SenseEdge};

// ── Pot behaviour script ──────────────────────────────────────

/// How the simulated pot's sense line reacts to button presses.
#[derive(Debug, Clone, Copy)]
pub enum PotScript {
    /// Sense line never changes, whatever we write.
    Dead,
    /// Latches heating on once this many presses have accumulated.
    LatchOnAfterPresses(u32),
    /// Latches heating off once this many presses have accumulated.
    LatchOffAfterPresses(u32),
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub heating: bool,
    /// Every trigger-line write, in order.
    pub writes: Vec<bool>,
    pub presses: u32,
    pub script: PotScript,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn cold(script: PotScript) -> Self {
        Self {
            heating: false,
            writes: Vec::new(),
            presses: 0,
            script,
        }
    }

    pub fn hot(script: PotScript) -> Self {
        Self {
            heating: true,
            ..Self::cold(script)
        }
    }

    /// Simulate an external agent (a human) flipping the pot's state.
    pub fn set_heating(&mut self, heating: bool) {
        self.heating = heating;
    }

    /// A rising edge as the ISR path would deliver it.
    pub fn rising(at_ms: u64) -> SenseEdge {
        SenseEdge {
            was_heating: false,
            is_heating: true,
            at_ms,
        }
    }

    /// A falling edge as the ISR path would deliver it.
    pub fn falling(at_ms: u64) -> SenseEdge {
        SenseEdge {
            was_heating: true,
            is_heating: false,
            at_ms,
        }
    }
}

impl PowerSwitchPort for MockHardware {
    fn set_line(&mut self, asserted: bool) {
        self.writes.push(asserted);
        if asserted {
            self.presses += 1;
            match self.script {
                PotScript::Dead => {}
                PotScript::LatchOnAfterPresses(n) => {
                    if self.presses >= n {
                        self.heating = true;
                    }
                }
                PotScript::LatchOffAfterPresses(n) => {
                    if self.presses >= n {
                        self.heating = false;
                    }
                }
            }
        }
    }
}

impl PowerSensePort for MockHardware {
    fn is_heating(&mut self) -> bool {
        self.heating
    }
}

// ── RecordingSink ─────────────────────────────────────────────

/// Sink that records every emitted event, debug-formatted.
pub struct RecordingSink {
    pub events: Vec<String>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Whether any recorded event starts with `prefix`
    /// (e.g. `"BrewStarted"`, `"PhaseChanged"`).
    pub fn saw(&self, prefix: &str) -> bool {
        self.events.iter().any(|e| e.starts_with(prefix))
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.events.iter().filter(|e| e.starts_with(prefix)).count()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &BrewEvent) {
        self.events.push(format!("{:?}", event));
    }
}
