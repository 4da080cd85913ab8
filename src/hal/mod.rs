//! Hardware Abstraction Layer
//!
//! This module provides higher-level abstractions over the raw register
//! windows and GPIO line.
//!
//! # Modules
//!
//! - [`mdio`]: MDIO transaction engine for PHY communication
//! - [`poll`]: bounded busy-polling with an injected delay
//! - [`reset`]: core reset line
//!
//! # Delay Integration
//!
//! All types that require delays use `embedded_hal::delay::DelayNs` directly.
//! Pass any delay implementation (e.g., `linux_embedded_hal::Delay`).

pub mod mdio;
pub mod poll;
pub mod reset;

// Re-export commonly used types
pub use mdio::{MdioBus, MdioController, MdioInterface};
pub use poll::Poller;
pub use reset::{ResetLine, ResetState};
