//! MAC address handling
//!
//! - [`address`]: the [`MacAddress`] type, its text form, register packing
//!   and validity rules
//! - [`eeprom`]: the persistent record in the board's MAC EEPROM

pub mod address;
pub mod eeprom;

pub use address::{MacAddress, validate};
pub use eeprom::MacEeprom;
