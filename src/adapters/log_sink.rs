//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to the
//! logger (which goes to UART / USB-CDC in production).  A future display
//! or home-automation adapter would implement the same trait.

use log::{info, warn};

use crate::app::events::BrewEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`BrewEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &BrewEvent) {
        match event {
            BrewEvent::Started(phase) => {
                info!("START | initial_phase={:?}", phase);
            }
            BrewEvent::PhaseChanged { from, to } => {
                info!("PHASE | {:?} -> {:?}", from, to);
            }
            BrewEvent::BrewStarted { cups, keep_hot_ms } => {
                info!("BREW  | started, cups={} keep_hot={}ms", cups, keep_hot_ms);
            }
            BrewEvent::AlreadyOn => {
                info!("BREW  | start ignored, pot already on");
            }
            BrewEvent::BrewFinished => {
                info!("BREW  | finished, keeping hot");
            }
            BrewEvent::KeepHotExpired => {
                info!("BREW  | keep-hot expired, powering off");
            }
            BrewEvent::PoweredOff => {
                info!("POWER | off");
            }
            BrewEvent::AlreadyOff => {
                info!("POWER | off ignored, pot already off");
            }
            BrewEvent::ActuationFailed(e) => {
                warn!("FAULT | {}", e);
            }
            BrewEvent::Status(s) => {
                info!(
                    "STAT  | phase={:?} heating={} brewing={} brew_left={:?}ms keep_hot_left={:?}ms",
                    s.phase,
                    s.is_heating,
                    s.is_brewing,
                    s.brew_remaining_ms,
                    s.keep_hot_remaining_ms,
                );
            }
        }
    }
}
