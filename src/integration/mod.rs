//! Platform Integrations
//!
//! - **linux** (`linux`): UIO register windows, GPIO character device reset
//!   line, i2c-dev EEPROM bus and a sleeping delay
//!   - Requires `linux` feature (default)
//!
//! Everything above this layer only depends on the `RegisterRegion`,
//! `MdioBus` and `embedded-hal` traits, so the bring-up logic runs unchanged
//! against the test mocks.

#[cfg(feature = "linux")]
pub mod linux;
