//! PHY register write lists
//!
//! Board-specific PHY setup is described in the configuration as a list of
//! MDIO writes, one whitespace-separated token per write:
//!
//! ```text
//! PORT.DEVICE:REGISTER=VALUE
//! ```
//!
//! `PORT` and `DEVICE` are decimal (0-31), `REGISTER` and `VALUE` are
//! hexadecimal (16 bits, optional `0x` prefix). The lenient parser stops at
//! the first token that does not match and keeps what it has; the strict
//! parser rejects the list instead.

use core::fmt;

use log::{error, warn};

use crate::error::{ConfigError, ConfigResult};
use crate::register::mdio::MAX_FIELD_ADDR;

/// One PHY register write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MdioOperation {
    /// Port (PHY) address, 5 bits
    pub port: u8,
    /// Device (MMD) address, 5 bits
    pub device: u8,
    /// Register number
    pub register: u16,
    /// Value to write
    pub value: u16,
}

impl MdioOperation {
    /// Create a write operation
    pub const fn new(port: u8, device: u8, register: u16, value: u16) -> Self {
        Self {
            port,
            device,
            register,
            value,
        }
    }
}

impl fmt::Display for MdioOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "port {}, dev {}, reg {:#06x} = {:#06x}",
            self.port, self.device, self.register, self.value
        )
    }
}

/// Outcome of parsing a write list
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedOperations<'a> {
    /// Operations parsed before the first bad token
    pub operations: Vec<MdioOperation>,
    /// Remaining input starting at the first bad token, if any
    pub unparsed: Option<&'a str>,
}

/// Parse every token up to the first one that does not match
pub fn parse_operations(list: &str) -> ParsedOperations<'_> {
    let mut operations = Vec::new();
    let mut rest = list.trim_start();

    while !rest.is_empty() {
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        match parse_token(&rest[..end]) {
            Some(op) => operations.push(op),
            None => {
                return ParsedOperations {
                    operations,
                    unparsed: Some(rest),
                };
            }
        }
        rest = rest[end..].trim_start();
    }

    ParsedOperations {
        operations,
        unparsed: None,
    }
}

/// Parse a write list, dropping everything from the first bad token on
///
/// The dropped remainder is logged as a warning.
pub fn parse_lenient(list: &str) -> Vec<MdioOperation> {
    let parsed = parse_operations(list);
    if let Some(rest) = parsed.unparsed {
        warn!(
            "config.mdio_reg_writes: ignoring {:?} and everything after it ({} writes kept)",
            first_token(rest),
            parsed.operations.len()
        );
    }
    parsed.operations
}

/// Parse a write list, failing on any bad token
pub fn parse_strict(list: &str) -> ConfigResult<Vec<MdioOperation>> {
    let parsed = parse_operations(list);
    match parsed.unparsed {
        Some(rest) => {
            error!("config.mdio_reg_writes: malformed write {:?}", first_token(rest));
            Err(ConfigError::MalformedMdioWrite)
        }
        None => Ok(parsed.operations),
    }
}

fn first_token(rest: &str) -> &str {
    rest.split_whitespace().next().unwrap_or(rest)
}

/// Parse one `PORT.DEVICE:REGISTER=VALUE` token
fn parse_token(token: &str) -> Option<MdioOperation> {
    let (port, rest) = token.split_once('.')?;
    let (device, rest) = rest.split_once(':')?;
    let (register, value) = rest.split_once('=')?;

    Some(MdioOperation {
        port: parse_field_addr(port)?,
        device: parse_field_addr(device)?,
        register: parse_hex16(register)?,
        value: parse_hex16(value)?,
    })
}

fn parse_field_addr(s: &str) -> Option<u8> {
    if s.is_empty() || !s.bytes().all(|c| c.is_ascii_digit()) {
        return None;
    }
    s.parse::<u8>().ok().filter(|v| *v <= MAX_FIELD_ADDR)
}

fn parse_hex16(s: &str) -> Option<u16> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(digits, 16).ok()
}
