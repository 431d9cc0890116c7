//! embedded-hal pin adapter.
//!
//! Implements the power ports over any [`embedded_hal`] digital pin pair,
//! for boards where the trigger/sense lines hang off an expander or a HAL
//! pin driver rather than raw ESP-IDF GPIO calls.  The domain core only
//! sees the port traits; which adapter backs them is a wiring decision.

use embedded_hal::digital::{InputPin, OutputPin};
use log::warn;

use crate::app::ports::{PowerSensePort, PowerSwitchPort};

/// Trigger line over an [`OutputPin`].
pub struct HalSwitch<P> {
    pin: P,
}

impl<P: OutputPin> HalSwitch<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }
}

impl<P: OutputPin> PowerSwitchPort for HalSwitch<P> {
    fn set_line(&mut self, asserted: bool) {
        let res = if asserted {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        if res.is_err() {
            // Most HAL pins are infallible; an expander that isn't gets a
            // log line, not a panic, in line with best-effort actuation.
            warn!("hal_port: trigger pin write failed");
        }
    }
}

/// Sense line over an [`InputPin`].
pub struct HalSense<P> {
    pin: P,
    last_good: bool,
}

impl<P: InputPin> HalSense<P> {
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            last_good: false,
        }
    }
}

impl<P: InputPin> PowerSensePort for HalSense<P> {
    fn is_heating(&mut self) -> bool {
        match self.pin.is_high() {
            Ok(level) => {
                self.last_good = level;
                level
            }
            Err(_) => {
                warn!("hal_port: sense pin read failed, using last good level");
                self.last_good
            }
        }
    }
}
