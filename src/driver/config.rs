//! Configuration types for the 10GbE bring-up
//!
//! Settings come from a TOML file with a `[resources]` table naming the
//! device nodes, a `[config]` table with board policy and an optional
//! `[timing]` table overriding the reference hardware timing.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, error};
use serde::Deserialize;

use crate::constants::{
    EEPROM_WRITE_SETTLE_US, MDIO_BUS_DELAY_US, MDIO_POLL_INTERVAL_US, MDIO_POLL_LIMIT, SETTLE_US,
};
use crate::error::{ConfigError, ConfigResult};
use crate::hal::poll::Poller;
use crate::phy::{MdioOperation, parse_lenient, parse_strict};

/// Device nodes and addresses (`[resources]`)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Resources {
    /// UIO device of the 10GbE MAC core registers
    pub gbe_uio: PathBuf,
    /// UIO device of the MDIO controller; needed only when PHY writes are configured
    #[serde(default)]
    pub mdio_uio: Option<PathBuf>,
    /// GPIO chip carrying the core reset line
    pub reset_gpio: PathBuf,
    /// Line offset of the reset line within the chip
    pub reset_gpio_bit: u32,
    /// I2C bus device of the MAC EEPROM
    pub mac_eeprom_bus: PathBuf,
    /// 7-bit I2C address of the MAC EEPROM
    pub mac_eeprom_address: u8,
    /// Byte offset of the MAC record in the EEPROM
    pub mac_eeprom_offset: u8,
}

/// Board policy (`[config]`)
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoardConfig {
    /// PHY register writes, `PORT.DEV:REG=VAL` tokens separated by whitespace
    pub mdio_reg_writes: String,
    /// Required lowercase colon-hex prefix of a valid MAC; empty means unconstrained
    pub valid_mac_address_prefix: String,
    /// Reject the write list on a malformed token instead of truncating it
    pub mdio_strict: bool,
    /// Read each PHY register back after writing it and log the result
    pub mdio_readback: bool,
}

/// Hardware timing (`[timing]`)
///
/// Defaults are the values found to work on the reference board; settle
/// times vary by board revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(default, deny_unknown_fields)]
pub struct Timing {
    /// Delay after reset line or MAC configuration changes, in microseconds
    pub settle_us: u32,
    /// Delay after each MDIO address register write, in microseconds
    pub bus_delay_us: u32,
    /// Maximum MDIO status reads per frame
    pub poll_limit: u32,
    /// Delay between MDIO status reads, in microseconds
    pub poll_interval_us: u32,
    /// Delay between writing and re-reading the MAC EEPROM, in microseconds
    pub eeprom_write_settle_us: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self::new()
    }
}

impl Timing {
    /// Reference timing
    #[must_use]
    pub const fn new() -> Self {
        Self {
            settle_us: SETTLE_US,
            bus_delay_us: MDIO_BUS_DELAY_US,
            poll_limit: MDIO_POLL_LIMIT,
            poll_interval_us: MDIO_POLL_INTERVAL_US,
            eeprom_write_settle_us: EEPROM_WRITE_SETTLE_US,
        }
    }

    /// Timing with every delay zeroed, keeping the poll limit
    #[must_use]
    pub const fn immediate() -> Self {
        Self {
            settle_us: 0,
            bus_delay_us: 0,
            poll_limit: MDIO_POLL_LIMIT,
            poll_interval_us: 0,
            eeprom_write_settle_us: 0,
        }
    }

    // =========================================================================
    // Builder Methods
    // =========================================================================

    /// Set the reset/configuration settle delay
    #[must_use]
    pub const fn with_settle_us(mut self, us: u32) -> Self {
        self.settle_us = us;
        self
    }

    /// Set the MDIO address-phase bus delay
    #[must_use]
    pub const fn with_bus_delay_us(mut self, us: u32) -> Self {
        self.bus_delay_us = us;
        self
    }

    /// Set the MDIO polling budget
    #[must_use]
    pub const fn with_polling(mut self, limit: u32, interval_us: u32) -> Self {
        self.poll_limit = limit;
        self.poll_interval_us = interval_us;
        self
    }

    /// Set the EEPROM write settle delay
    #[must_use]
    pub const fn with_eeprom_write_settle_us(mut self, us: u32) -> Self {
        self.eeprom_write_settle_us = us;
        self
    }

    /// MDIO busy-bit poller for this timing
    pub const fn poller(&self) -> Poller {
        Poller::new(self.poll_limit, self.poll_interval_us)
    }
}

/// Complete settings file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// `[resources]`
    pub resources: Resources,
    /// `[config]`
    #[serde(default)]
    pub config: BoardConfig,
    /// `[timing]`
    #[serde(default)]
    pub timing: Timing,
}

impl Settings {
    /// Read and parse the settings file at `path`
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            error!("unable to read configuration {}: {e}", path.display());
            ConfigError::FileUnreadable
        })?;
        debug!("config: loaded {}", path.display());
        Self::from_toml(&text)
    }

    /// Parse settings from TOML text
    ///
    /// Settings that cannot drive a bring-up are rejected here, before any
    /// device is opened.
    pub fn from_toml(text: &str) -> ConfigResult<Self> {
        let settings: Self = toml::from_str(text).map_err(|e| {
            error!("invalid configuration: {e}");
            ConfigError::Malformed
        })?;
        settings.check()?;
        Ok(settings)
    }

    /// Cross-field checks on a parsed file
    pub fn check(&self) -> ConfigResult<()> {
        if !self.has_mdio_writes() {
            return Ok(());
        }
        if self.resources.mdio_uio.is_none() {
            error!("resources.mdio_uio is required when config.mdio_reg_writes is set");
            return Err(ConfigError::MissingMdioRegion);
        }
        self.mdio_operations().map(|_| ())
    }

    /// Whether any PHY register writes are configured
    pub fn has_mdio_writes(&self) -> bool {
        !self.config.mdio_reg_writes.trim().is_empty()
    }

    /// Parse the PHY register write list according to `mdio_strict`
    pub fn mdio_operations(&self) -> ConfigResult<Vec<MdioOperation>> {
        if self.config.mdio_strict {
            parse_strict(&self.config.mdio_reg_writes)
        } else {
            Ok(parse_lenient(&self.config.mdio_reg_writes))
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
