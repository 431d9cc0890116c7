//! Inbound commands to the brew service.
//!
//! These represent actions requested by the outside world (scheduler,
//! serial console, home-automation bridge) that the
//! [`BrewService`](super::service::BrewService) interprets and acts upon.

use crate::config::BrewConfig;

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone)]
pub enum BrewCommand {
    /// Start brewing `cups` cups, then keep the burner on for
    /// `keep_hot_ms` after brewing completes.
    StartBrew { cups: u32, keep_hot_ms: u64 },

    /// Power the pot off (idempotent — a no-op if already off).
    PowerOff,

    /// Hot-reload configuration.
    UpdateConfig(BrewConfig),
}
