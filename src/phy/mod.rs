//! PHY configuration
//!
//! The PHY attached to the 10GbE core is set up by replaying a list of
//! MDIO register writes taken from the configuration file. This module
//! parses that list; [`crate::driver::bringup`] replays it over
//! [`crate::hal::MdioBus`].

pub mod ops;

pub use ops::{MdioOperation, parse_lenient, parse_strict};
