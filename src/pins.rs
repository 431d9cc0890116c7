//! GPIO pin assignments for the CoffeePot controller board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Power button trigger (optocoupler across the pot's push-button)
// ---------------------------------------------------------------------------

/// Digital output: HIGH closes the optocoupler, simulating a press of the
/// pot's single power button.
pub const POWER_TRIGGER_GPIO: i32 = 12;

// ---------------------------------------------------------------------------
// Power sense (tapped off the pot's power LED)
// ---------------------------------------------------------------------------

/// Digital input: HIGH while the heating element is energised.
/// Any-edge interrupt; no internal pull (the LED divider drives the line).
pub const POWER_SENSE_GPIO: i32 = 13;
