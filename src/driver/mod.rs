//! Bring-up driver components.
//!
//! - [`config`] - Settings file types and timing
//! - [`bringup`] - The reset/configure/verify sequence for the 10GbE core
//!
//! # Example
//!
//! ```ignore
//! use tengbe_init::driver::{BringUp, Settings};
//!
//! let settings = Settings::load(Path::new("/etc/10ginit.toml"))?;
//! let ops = settings.mdio_operations()?;
//!
//! let report = BringUp::new(&mut gbe, Some(&mut mdio), &mut reset, &mut delay, settings.timing)
//!     .with_operations(&ops)
//!     .with_prefix(&settings.config.valid_mac_address_prefix)
//!     .run(&mac)?;
//! ```

// Submodules
pub mod bringup;
pub mod config;

// Re-exports for convenience
pub use bringup::{BringUp, BringUpReport, BringUpState};
pub use config::{BoardConfig, Resources, Settings, Timing};
