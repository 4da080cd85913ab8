//! 10GbE core bring-up sequence
//!
//! The core must be configured while it is held in reset and checked after
//! it is released:
//!
//! ```text
//! Start -> ResetAssert -> SettleA -> PhyConfig -> ValidateMac -> ProgramMac
//!       -> SettleB -> EnableMacCfg -> SettleC -> ResetRelease -> SettleD
//!       -> Verify -> Success | Rollback
//! ```
//!
//! Any failure before `ResetRelease` leaves the core in reset. A mismatch
//! found by `Verify` puts the core back into reset (`Rollback`); nothing is
//! retried.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::{debug, error, info, warn};

use crate::driver::config::Timing;
use crate::error::{ConfigError, Error, Result};
use crate::hal::mdio::MdioBus;
use crate::hal::reset::ResetLine;
use crate::mac::{MacAddress, validate};
use crate::phy::MdioOperation;
use crate::register::RegisterRegion;
use crate::register::gbe::{
    MAC_LOW_MASK, SYSTEM_MAC_HIGH, SYSTEM_MAC_LOW, USR_MAC_CFG, USR_MAC_CFG_ENABLE, USR_MAC_HIGH,
    USR_MAC_LOW,
};

// =============================================================================
// States
// =============================================================================

/// Bring-up sequence state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BringUpState {
    /// Nothing done yet
    #[default]
    Start,
    /// Driving the reset line to hold the core
    ResetAssert,
    /// Waiting for reset to settle
    SettleA,
    /// Replaying PHY register writes
    PhyConfig,
    /// Checking the MAC address
    ValidateMac,
    /// Writing the user MAC registers
    ProgramMac,
    /// Waiting for the MAC registers to settle
    SettleB,
    /// Marking the user MAC configuration valid
    EnableMacCfg,
    /// Waiting for the configuration to settle
    SettleC,
    /// Driving the reset line to let the core run
    ResetRelease,
    /// Waiting for the core to come out of reset
    SettleD,
    /// Comparing the latched MAC with the programmed one
    Verify,
    /// Core running with the programmed MAC
    Success,
    /// Verification failed, core back in reset
    Rollback,
}

/// Outcome of a successful bring-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BringUpReport {
    /// MAC address the core is running with
    pub mac: MacAddress,
    /// Number of PHY register writes replayed
    pub phy_writes: usize,
}

// =============================================================================
// Sequencer
// =============================================================================

/// Bring-up sequencer
///
/// Borrows the hardware handles for the duration of one run.
pub struct BringUp<'a, G, M, P, D>
where
    G: RegisterRegion,
    M: MdioBus,
    P: OutputPin,
    D: DelayNs,
{
    gbe: &'a mut G,
    mdio: Option<&'a mut M>,
    reset: &'a mut ResetLine<P>,
    delay: &'a mut D,
    timing: Timing,
    operations: &'a [MdioOperation],
    prefix: &'a str,
    readback: bool,
    state: BringUpState,
}

impl<'a, G, M, P, D> BringUp<'a, G, M, P, D>
where
    G: RegisterRegion,
    M: MdioBus,
    P: OutputPin,
    D: DelayNs,
{
    /// Create a sequencer over the MAC core window, MDIO bus and reset line
    ///
    /// `mdio` may be `None` when no PHY writes are configured.
    pub fn new(
        gbe: &'a mut G,
        mdio: Option<&'a mut M>,
        reset: &'a mut ResetLine<P>,
        delay: &'a mut D,
        timing: Timing,
    ) -> Self {
        Self {
            gbe,
            mdio,
            reset,
            delay,
            timing,
            operations: &[],
            prefix: "",
            readback: false,
            state: BringUpState::Start,
        }
    }

    /// PHY register writes to replay while the core is in reset
    #[must_use]
    pub fn with_operations(mut self, operations: &'a [MdioOperation]) -> Self {
        self.operations = operations;
        self
    }

    /// Required MAC address prefix (empty: any, with a warning)
    #[must_use]
    pub fn with_prefix(mut self, prefix: &'a str) -> Self {
        self.prefix = prefix;
        self
    }

    /// Read each PHY register back after writing it
    #[must_use]
    pub fn with_readback(mut self, readback: bool) -> Self {
        self.readback = readback;
        self
    }

    /// Current (or, after `run`, final) state
    pub fn state(&self) -> BringUpState {
        self.state
    }

    /// Run the whole sequence for `mac`
    pub fn run(&mut self, mac: &MacAddress) -> Result<BringUpReport> {
        self.enter(BringUpState::ResetAssert);
        self.reset.assert()?;
        self.settle(BringUpState::SettleA);

        self.enter(BringUpState::PhyConfig);
        let phy_writes = self.configure_phy()?;

        self.enter(BringUpState::ValidateMac);
        info!("Configuring 10GbE with MAC address {mac}");
        if let Err(reason) = validate(self.prefix, mac, true) {
            error!("Leaving 10GbE core in reset.");
            return Err(reason.into());
        }

        self.enter(BringUpState::ProgramMac);
        let (high, low) = mac.to_register_words();
        self.write_gbe(USR_MAC_HIGH, high, "USR_MAC_HIGH")?;
        self.write_gbe(USR_MAC_LOW, low, "USR_MAC_LOW")?;
        self.settle(BringUpState::SettleB);

        self.enter(BringUpState::EnableMacCfg);
        self.write_gbe(USR_MAC_CFG, USR_MAC_CFG_ENABLE, "USR_MAC_CFG")?;
        self.settle(BringUpState::SettleC);

        self.enter(BringUpState::ResetRelease);
        self.reset.release()?;
        self.settle(BringUpState::SettleD);

        self.enter(BringUpState::Verify);
        let sys_high = self.read_gbe(SYSTEM_MAC_HIGH, "SYSTEM_MAC_HIGH")?;
        let sys_low = self.read_gbe(SYSTEM_MAC_LOW, "SYSTEM_MAC_LOW")?;

        if sys_high != high || (sys_low & MAC_LOW_MASK) != (low & MAC_LOW_MASK) {
            let observed = MacAddress::from_register_words(sys_high, sys_low);
            return Err(self.rollback(*mac, observed));
        }

        self.enter(BringUpState::Success);
        info!("10GbE core running with MAC address {mac}");
        Ok(BringUpReport {
            mac: *mac,
            phy_writes,
        })
    }

    fn enter(&mut self, state: BringUpState) {
        debug!("bringup: {:?} -> {state:?}", self.state);
        self.state = state;
    }

    fn settle(&mut self, state: BringUpState) {
        self.enter(state);
        self.delay.delay_us(self.timing.settle_us);
    }

    /// Replay the PHY write list; returns the number of writes
    fn configure_phy(&mut self) -> Result<usize> {
        if self.operations.is_empty() {
            return Ok(0);
        }
        let Some(mdio) = self.mdio.as_deref_mut() else {
            error!("PHY writes configured but no MDIO controller available");
            return Err(ConfigError::MissingMdioRegion.into());
        };

        for op in self.operations {
            info!("Writing MDIO: {op}");
            mdio.write(op.port, op.device, op.register, op.value)
                .inspect_err(|_| error!("Failed to write MDIO register."))?;

            if self.readback {
                let value = mdio
                    .read(op.port, op.device, op.register)
                    .inspect_err(|_| error!("Failed to read MDIO register."))?;
                debug!("mdio: read back {value:#06x}");
                if value != op.value {
                    warn!("MDIO {op}: read back {value:#06x}");
                }
            }
        }
        Ok(self.operations.len())
    }

    fn write_gbe(&mut self, offset: usize, value: u32, name: &str) -> Result<()> {
        self.gbe.write32(offset, value).map_err(|e| {
            error!("Unable to write GBE_REG_{name}.");
            Error::from(e)
        })
    }

    fn read_gbe(&mut self, offset: usize, name: &str) -> Result<u32> {
        self.gbe.read32(offset).map_err(|e| {
            error!("Unable to read GBE_REG_{name}.");
            Error::from(e)
        })
    }

    /// Put the core back into reset after a failed verification
    fn rollback(&mut self, programmed: MacAddress, observed: MacAddress) -> Error {
        self.enter(BringUpState::Rollback);
        error!(
            "10GbE core configuration failed: Configured MAC address {programmed}. Read back MAC address {observed}."
        );
        error!("Putting core back into reset.");

        // One more look in case the core latched late
        self.delay.delay_us(self.timing.settle_us);
        match self.gbe.read32(SYSTEM_MAC_LOW) {
            Ok(late) => debug!("bringup: late SYSTEM_MAC_LOW {:#06x}", late & MAC_LOW_MASK),
            Err(e) => warn!("bringup: late SYSTEM_MAC_LOW read failed: {e}"),
        }

        match self.reset.assert() {
            Ok(()) => Error::VerificationMismatch {
                programmed,
                observed,
            },
            Err(e) => e.into(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
