//! Centralized Constants
//!
//! This module provides a single source of truth for the magic numbers used
//! throughout the bring-up.
//!
//! # Organization
//!
//! Constants are grouped by category:
//! - **Timing**: settle delays, bus delays, polling budget
//! - **Register windows**: mapping size and UIO map index
//! - **MAC address**: record length
//! - **Paths**: default configuration file
//!
//! # Note
//!
//! Register offsets and bit definitions remain in their respective modules
//! (`register/gbe.rs`, `register/mdio.rs`) as they are specific to those
//! hardware blocks. Every timing value here is only a default; the
//! configuration file may override it per board revision.

// =============================================================================
// Timing Constants
// =============================================================================

/// Delay after changing the core reset line or MAC configuration registers.
///
/// 10 ms is insufficient on the reference board, 1 s works.
pub const SETTLE_US: u32 = 1_000_000;

/// Delay after each MDIO address register write
pub const MDIO_BUS_DELAY_US: u32 = 10_000;

/// Maximum number of CONTROL reads waiting for an MDIO transfer to complete
pub const MDIO_POLL_LIMIT: u32 = 100;

/// Microseconds between polls of the MDIO CONTROL register
pub const MDIO_POLL_INTERVAL_US: u32 = 10_000;

/// Delay between writing the MAC EEPROM record and reading it back
pub const EEPROM_WRITE_SETTLE_US: u32 = 1_000_000;

// =============================================================================
// Register Windows
// =============================================================================

/// Size of each mapped register window in bytes
pub const REGION_SIZE: usize = 0x1000;

/// UIO map index holding the register window
pub const UIO_MAP_INDEX: usize = 0;

// =============================================================================
// MAC Address
// =============================================================================

/// MAC address length in bytes
pub const MAC_ADDR_LEN: usize = 6;

/// Length of the colon-hex text form (`aa:bb:cc:dd:ee:ff`)
pub const MAC_ADDR_TEXT_LEN: usize = 17;

// =============================================================================
// Paths and Labels
// =============================================================================

/// Configuration file used when `-c` is not given
pub const DEFAULT_CONFIG_PATH: &str = "/etc/10ginit.toml";

/// Consumer label attached to the requested reset GPIO line
pub const GPIO_CONSUMER: &str = "10ginit";
