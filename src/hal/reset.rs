//! Reset Controller HAL
//!
//! The 10GbE core is held in reset by a single GPIO output: logic 1 holds
//! the core in reset, logic 0 lets it run. Any pin implementing
//! `embedded_hal::digital::OutputPin` can drive it.

use embedded_hal::digital::OutputPin;
use log::{debug, error};

use crate::error::{IoError, IoResult};

// =============================================================================
// Reset State
// =============================================================================

/// Last level driven onto the reset line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResetState {
    /// Line not driven by this process yet
    #[default]
    Unknown,
    /// Core held in reset
    Asserted,
    /// Core running
    Released,
}

// =============================================================================
// Reset Line
// =============================================================================

/// Core reset line
#[derive(Debug)]
pub struct ResetLine<P: OutputPin> {
    /// Output pin, active high
    pin: P,
    /// Last successfully driven state
    state: ResetState,
}

impl<P: OutputPin> ResetLine<P> {
    /// Wrap `pin` without driving it
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            state: ResetState::Unknown,
        }
    }

    /// Hold the core in reset
    pub fn assert(&mut self) -> IoResult<()> {
        self.pin.set_high().map_err(|e| {
            error!("unable to assert reset gpio: {e:?}");
            IoError::GpioDrive
        })?;
        self.state = ResetState::Asserted;
        debug!("reset: asserted");
        Ok(())
    }

    /// Let the core run
    pub fn release(&mut self) -> IoResult<()> {
        self.pin.set_low().map_err(|e| {
            error!("unable to release reset gpio: {e:?}");
            IoError::GpioDrive
        })?;
        self.state = ResetState::Released;
        debug!("reset: released");
        Ok(())
    }

    /// Last successfully driven state
    pub fn state(&self) -> ResetState {
        self.state
    }

    /// Whether the core is known to be held in reset
    pub fn is_asserted(&self) -> bool {
        self.state == ResetState::Asserted
    }

    /// Get mutable access to the reset pin
    pub fn pin_mut(&mut self) -> &mut P {
        &mut self.pin
    }

    /// Consume the line and return the pin
    pub fn into_pin(self) -> P {
        self.pin
    }
}
