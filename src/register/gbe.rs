//! 10GbE MAC core register map
//!
//! Offsets are relative to the MAC core window. The `USR_*` registers are
//! written by software while the core is held in reset; the `SYSTEM_*`
//! registers reflect what the core latched once it left reset.

// =============================================================================
// Register Offsets
// =============================================================================

/// User MAC address, octets 0-3 (octet 0 in bits 0-7)
pub const USR_MAC_HIGH: usize = 0x00;

/// User MAC address, octets 4-5 in bits 0-15
pub const USR_MAC_LOW: usize = 0x04;

/// User IPv4 address
pub const USR_IP: usize = 0x08;

/// Scratch/test register
pub const TEST_REG: usize = 0x0c;

/// Latched MAC address, octets 0-3
pub const SYSTEM_MAC_HIGH: usize = 0x10;

/// Latched MAC address, octets 4-5 in bits 0-15; bits 16-31 are not MAC data
pub const SYSTEM_MAC_LOW: usize = 0x14;

/// User MAC configuration valid register
pub const USR_MAC_CFG: usize = 0x18;

// =============================================================================
// Register Values
// =============================================================================

/// Written to [`USR_MAC_CFG`] to mark the user MAC registers valid
pub const USR_MAC_CFG_ENABLE: u32 = 0x1;

/// Mask of the MAC data bits in the low MAC registers
pub const MAC_LOW_MASK: u32 = 0x0000_ffff;
