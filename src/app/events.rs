//! Outbound application events.
//!
//! The [`BrewService`](super::service::BrewService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other side
//! decide what to do with them — log to serial, drive a display, notify a
//! phone, etc.

use crate::brew::BrewPhase;
use crate::error::ActuationError;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum BrewEvent {
    /// The service has started (carries the initial phase).
    Started(BrewPhase),

    /// The inferred phase moved.
    PhaseChanged { from: BrewPhase, to: BrewPhase },

    /// A brew was successfully started.
    BrewStarted { cups: u32, keep_hot_ms: u64 },

    /// `start_brew` was a no-op: the pot was already heating.
    AlreadyOn,

    /// The brew window elapsed; the pot is now keeping the coffee hot.
    BrewFinished,

    /// The keep-hot window elapsed; the pot is being powered off.
    KeepHotExpired,

    /// The pot was powered off by request.
    PoweredOff,

    /// `power_off` was a no-op: the pot was already off.
    AlreadyOff,

    /// A bounded actuation loop exhausted its attempts.
    ActuationFailed(ActuationError),

    /// Periodic status snapshot.
    Status(BrewStatus),
}

/// A point-in-time status snapshot suitable for logging or transmission.
#[derive(Debug, Clone, Copy)]
pub struct BrewStatus {
    pub phase: BrewPhase,
    pub is_heating: bool,
    pub is_brewing: bool,
    /// Time left on the brew window, if armed.
    pub brew_remaining_ms: Option<u64>,
    /// Time left on the keep-hot window, if armed.
    pub keep_hot_remaining_ms: Option<u64>,
}
