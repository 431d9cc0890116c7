//! Port traits — the hexagonal boundary between brew logic and the outside
//! world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ BrewController (domain)
//! ```
//!
//! Driven adapters (the trigger line, the sense line, event sinks) implement
//! these traits.  The [`BrewController`](crate::brew::BrewController)
//! consumes them via generics, so the domain core never touches hardware
//! directly.

// ───────────────────────────────────────────────────────────────
// Power switch port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the simulated power-button line.
///
/// Asserting the line is a button press held down; releasing it ends the
/// press.  Writes are assumed to take effect before the next sensor read
/// is meaningful (implementations apply their own settle delay if the
/// target hardware needs one).
pub trait PowerSwitchPort {
    /// Drive the button line high (`true`) or low (`false`).
    fn set_line(&mut self, asserted: bool);
}

// ───────────────────────────────────────────────────────────────
// Power sense port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: live state of the pot's heating element.
///
/// This is the single source of truth for "is the burner energised" — the
/// controller never caches it, so a human pressing the real button is
/// always observed on the next read.
pub trait PowerSensePort {
    /// `true` while the heating element is energised.
    fn is_heating(&mut self) -> bool;
}

/// A level change reported by the sense line's interrupt.
///
/// Adapters deliver these as messages through the event queue rather than
/// invoking domain code from ISR context; the main loop is the single
/// consumer and hands them to
/// [`BrewController::on_sense_edge`](crate::brew::BrewController::on_sense_edge).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SenseEdge {
    /// Level before the edge.
    pub was_heating: bool,
    /// Level after the edge.
    pub is_heating: bool,
    /// Monotonic timestamp of the edge (milliseconds).
    pub at_ms: u64,
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`BrewEvent`](super::events::BrewEvent)s
/// through this port.  Adapters decide where they go (serial log, display,
/// home-automation bridge, etc.).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::BrewEvent);
}
