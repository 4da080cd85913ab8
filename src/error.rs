//! Error types for the 10GbE bring-up
//!
//! Errors are organized by domain for better diagnostics:
//! - [`ConfigError`]: settings and command-line input that cannot be used
//! - [`IoError`]: failed access to a register window, GPIO line or EEPROM
//! - [`InvalidReason`]: why a MAC address was rejected
//!
//! The unified [`Error`] enum wraps the domain errors and adds the protocol
//! and verification failures of the bring-up sequence. Detailed context
//! (paths, tokens, OS error text) is logged where the failure happens; the
//! error values themselves stay small and `Copy`.

use crate::mac::MacAddress;

// =============================================================================
// Configuration Errors
// =============================================================================

/// Configuration and input errors
///
/// These are detected before any hardware is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Configuration file could not be read
    FileUnreadable,
    /// Configuration file is not valid or misses a required key
    Malformed,
    /// MAC address argument is not six colon-separated hex bytes
    InvalidMacAddress,
    /// An MDIO write token could not be parsed (strict mode)
    MalformedMdioWrite,
    /// PHY writes are configured but no MDIO register window was opened
    MissingMdioRegion,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ConfigError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConfigError::FileUnreadable => "configuration file unreadable",
            ConfigError::Malformed => "malformed configuration",
            ConfigError::InvalidMacAddress => "unable to parse MAC address",
            ConfigError::MalformedMdioWrite => "malformed MDIO register write",
            ConfigError::MissingMdioRegion => "MDIO register window not available",
        }
    }
}

// =============================================================================
// I/O Errors
// =============================================================================

/// Hardware access errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IoError {
    /// Register window could not be opened or mapped
    MapFailed,
    /// Register offset is unaligned or outside the mapped window
    OutOfRange,
    /// Register access failed
    Register,
    /// GPIO chip or line could not be opened
    GpioUnavailable,
    /// GPIO line could not be requested or driven
    GpioDrive,
    /// I2C bus could not be opened
    I2cUnavailable,
    /// I2C transfer failed or was short
    Transfer,
    /// Result could not be written to the output stream
    Output,
}

impl core::fmt::Display for IoError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl IoError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            IoError::MapFailed => "unable to map register window",
            IoError::OutOfRange => "register offset out of range",
            IoError::Register => "register access failed",
            IoError::GpioUnavailable => "unable to open reset GPIO",
            IoError::GpioDrive => "unable to drive reset GPIO",
            IoError::I2cUnavailable => "unable to open MAC EEPROM bus",
            IoError::Transfer => "MAC EEPROM transfer failed",
            IoError::Output => "unable to write output",
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Reason a MAC address failed validation
///
/// Checks run in declaration order; the first failure is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InvalidReason {
    /// 00:00:00:00:00:00
    AllZero,
    /// ff:ff:ff:ff:ff:ff
    Broadcast,
    /// Group bit (LSB of the first octet) is set
    Multicast,
    /// Does not begin with the configured prefix
    PrefixMismatch,
}

impl core::fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl InvalidReason {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            InvalidReason::AllZero => "it cannot be 00:00:00:00:00:00",
            InvalidReason::Broadcast => {
                "it cannot be ff:ff:ff:ff:ff:ff (the broadcast MAC address)"
            }
            InvalidReason::Multicast => "it cannot be a multicast MAC address",
            InvalidReason::PrefixMismatch => "it must begin with the configured prefix",
        }
    }
}

// =============================================================================
// Unified Error Type
// =============================================================================

/// This enum wraps all domain-specific errors for unified error handling.
///
/// ```ignore
/// match result {
///     Err(Error::Config(ConfigError::Malformed)) => { /* ... */ }
///     Err(Error::ProtocolTimeout) => { /* ... */ }
///     Err(Error::VerificationMismatch { programmed, observed }) => { /* ... */ }
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration error
    Config(ConfigError),
    /// I/O error
    Io(IoError),
    /// MDIO busy bit never cleared within the poll budget
    ProtocolTimeout,
    /// MAC address failed validation
    Validation(InvalidReason),
    /// EEPROM accepted the write but reads back a different value
    ReadbackMismatch {
        /// Value written
        expected: MacAddress,
        /// Value read back
        found: MacAddress,
    },
    /// Core reports a different MAC than programmed after reset release
    VerificationMismatch {
        /// Value written to the MAC registers
        programmed: MacAddress,
        /// Value latched in the system MAC registers
        observed: MacAddress,
    },
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Config(e) => write!(f, "config: {}", e.as_str()),
            Error::Io(e) => write!(f, "io: {}", e.as_str()),
            Error::ProtocolTimeout => f.write_str("mdio: transaction timed out"),
            Error::Validation(e) => write!(f, "MAC address is not valid: {}", e.as_str()),
            Error::ReadbackMismatch { expected, found } => write!(
                f,
                "MAC address read back ({found}) does not match MAC address stored ({expected})"
            ),
            Error::VerificationMismatch {
                programmed,
                observed,
            } => write!(
                f,
                "10GbE core configuration failed: configured MAC address {programmed}, read back {observed}"
            ),
        }
    }
}

impl std::error::Error for Error {}

// From impls for automatic conversion
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<IoError> for Error {
    fn from(e: IoError) -> Self {
        Error::Io(e)
    }
}

impl From<InvalidReason> for Error {
    fn from(e: InvalidReason) -> Self {
        Error::Validation(e)
    }
}

/// Result type alias for bring-up operations
pub type Result<T> = core::result::Result<T, Error>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

/// Result type alias for I/O operations
pub type IoResult<T> = core::result::Result<T, IoError>;

// =============================================================================
// Unit Tests
// =============================================================================
