//! Bounded busy-polling
//!
//! Hardware completion is observed by re-reading a status register a fixed
//! number of times with a fixed pause in between. The delay source is
//! injected so host tests run the loop without wall-clock time.

use embedded_hal::delay::DelayNs;

use crate::error::{Error, Result};

/// Fixed-budget poller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Poller {
    /// Maximum number of condition checks
    limit: u32,
    /// Pause after each unsuccessful check in microseconds
    interval_us: u32,
}

impl Poller {
    /// Create a poller that checks at most `limit` times, `interval_us` apart
    pub const fn new(limit: u32, interval_us: u32) -> Self {
        Self { limit, interval_us }
    }

    /// Check `done` until it reports completion or the budget runs out
    ///
    /// Returns the number of checks performed. An error from `done` aborts
    /// the loop immediately. Exhausting the budget yields
    /// [`Error::ProtocolTimeout`].
    pub fn wait<D, F>(&self, delay: &mut D, mut done: F) -> Result<u32>
    where
        D: DelayNs,
        F: FnMut() -> Result<bool>,
    {
        for attempt in 1..=self.limit {
            if done()? {
                return Ok(attempt);
            }
            delay.delay_us(self.interval_us);
        }
        Err(Error::ProtocolTimeout)
    }
}
