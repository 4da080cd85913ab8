//! 10GbE MAC/PHY Bring-up
//!
//! Brings an FPGA 10GbE MAC core and its PHY into a known-good state from
//! Linux user space, and manages the board MAC address kept in an I2C
//! EEPROM.
//!
//! # Architecture
//!
//! The crate is organized into layers:
//!
//! 1. **Register Layer** ([`register`]): `RegisterRegion` access trait and the
//!    offset maps of the MAC core and MDIO controller
//! 2. **HAL Layer** ([`hal`]): MDIO transaction engine, bounded polling,
//!    reset line
//! 3. **MAC/PHY Layer** ([`mac`], [`phy`]): MAC address type and EEPROM
//!    record, PHY register write lists
//! 4. **Driver Layer** ([`driver`]): settings and the bring-up sequence
//! 5. **Application** ([`app`]): query / store / initialize actions
//! 6. **Platform** ([`integration`]): UIO, GPIO character device and i2c-dev
//!    backends
//!
//! Everything above the platform layer is generic over `RegisterRegion`,
//! `MdioBus` and the `embedded-hal` delay, digital and I2C traits.
//!
//! # Features
//!
//! - `linux` (default): Linux backends and the `tengbe-init` binary
//! - `defmt`: Enable defmt formatting for data and error types
//!
//! # Example
//!
//! ```ignore
//! use tengbe_init::app::{Action, execute};
//! use tengbe_init::driver::Settings;
//! use tengbe_init::integration::linux::open_context;
//!
//! let settings = Settings::load(Path::new("/etc/10ginit.toml"))?;
//! let mut ctx = open_context(&settings, settings.has_mdio_writes())?;
//! execute(&Action::Initialize, &mut ctx, &settings, &mut std::io::stdout())?;
//! ```

#![deny(missing_docs)]
#![allow(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    clippy::type_complexity,
    clippy::must_use_candidate,
    clippy::assertions_on_constants,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_lossless,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::items_after_statements
)]

// =============================================================================
// Modules
// =============================================================================

pub mod app;
pub mod constants;
pub mod driver;
pub mod error;
pub mod hal;
pub mod integration;
pub mod logger;
pub mod mac;
pub mod phy;
pub mod register;

// Test utilities (only available during testing)
#[cfg(test)]
mod test_utils;

// =============================================================================
// Re-exports
// =============================================================================

pub use app::{Action, Context, execute, exit_status};
pub use driver::{BringUp, BringUpReport, BringUpState, Settings, Timing};
pub use error::{
    ConfigError, ConfigResult, Error, InvalidReason, IoError, IoResult, Result,
};
pub use hal::{MdioBus, MdioController, MdioInterface, Poller, ResetLine};
pub use mac::{MacAddress, MacEeprom};
pub use phy::MdioOperation;
pub use register::RegisterRegion;
