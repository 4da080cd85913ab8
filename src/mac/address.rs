//! MAC address type and validity rules

use core::fmt;
use core::str::FromStr;

use log::{error, warn};

use crate::constants::{MAC_ADDR_LEN, MAC_ADDR_TEXT_LEN};
use crate::error::{ConfigError, InvalidReason};
use crate::register::gbe::MAC_LOW_MASK;

/// A 6-octet Ethernet MAC address
///
/// The type accepts any value; use [`validate`] to check it is usable as a
/// station address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MacAddress([u8; MAC_ADDR_LEN]);

impl MacAddress {
    /// Create an address from its octets, octet 0 first on the wire
    pub const fn new(octets: [u8; MAC_ADDR_LEN]) -> Self {
        Self(octets)
    }

    /// Borrow the address octets
    pub const fn as_bytes(&self) -> &[u8; MAC_ADDR_LEN] {
        &self.0
    }

    /// 00:00:00:00:00:00
    pub const fn is_all_zero(&self) -> bool {
        u64::from_le_bytes(self.padded()) == 0
    }

    /// ff:ff:ff:ff:ff:ff
    pub const fn is_broadcast(&self) -> bool {
        u64::from_le_bytes(self.padded()) == 0x0000_ffff_ffff_ffff
    }

    /// Group bit (LSB of octet 0) set
    pub const fn is_multicast(&self) -> bool {
        self.0[0] & 0x01 != 0
    }

    const fn padded(&self) -> [u8; 8] {
        let b = self.0;
        [b[0], b[1], b[2], b[3], b[4], b[5], 0, 0]
    }

    /// Pack into the MAC core's `(high, low)` register pair
    ///
    /// High holds octets 0-3 with octet 0 in bits 0-7. Low holds octets 4-5
    /// in bits 0-15; bits 16-31 are zero.
    pub const fn to_register_words(&self) -> (u32, u32) {
        let b = self.0;
        let high = u32::from_le_bytes([b[0], b[1], b[2], b[3]]);
        let low = u16::from_le_bytes([b[4], b[5]]) as u32;
        (high, low)
    }

    /// Unpack a `(high, low)` register pair; bits 16-31 of `low` are ignored
    pub const fn from_register_words(high: u32, low: u32) -> Self {
        let h = high.to_le_bytes();
        let l = (low & MAC_LOW_MASK).to_le_bytes();
        Self([h[0], h[1], h[2], h[3], l[0], l[1]])
    }
}

impl From<[u8; MAC_ADDR_LEN]> for MacAddress {
    fn from(octets: [u8; MAC_ADDR_LEN]) -> Self {
        Self(octets)
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            b[0], b[1], b[2], b[3], b[4], b[5]
        )
    }
}

impl FromStr for MacAddress {
    type Err = ConfigError;

    /// Parse six colon-separated groups of one or two hex digits
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() > MAC_ADDR_TEXT_LEN {
            return Err(ConfigError::InvalidMacAddress);
        }

        let mut octets = [0u8; MAC_ADDR_LEN];
        let mut groups = s.split(':');

        for octet in &mut octets {
            let group = groups.next().ok_or(ConfigError::InvalidMacAddress)?;
            if group.is_empty()
                || group.len() > 2
                || !group.bytes().all(|c| c.is_ascii_hexdigit())
            {
                return Err(ConfigError::InvalidMacAddress);
            }
            *octet = u8::from_str_radix(group, 16).map_err(|_| ConfigError::InvalidMacAddress)?;
        }

        if groups.next().is_some() {
            return Err(ConfigError::InvalidMacAddress);
        }
        Ok(Self(octets))
    }
}

// =============================================================================
// Validation
// =============================================================================

/// Check that `mac` may be used as this board's station address
///
/// Checks run in order and stop at the first failure: all-zero, broadcast,
/// multicast, then `prefix` against the lowercase colon-hex text form. An
/// empty `prefix` accepts any address; `warn_if_no_prefix` logs that the
/// prefix is unset. Rejections are logged.
pub fn validate(
    prefix: &str,
    mac: &MacAddress,
    warn_if_no_prefix: bool,
) -> Result<(), InvalidReason> {
    let result = check(prefix, mac);

    match result {
        Err(InvalidReason::PrefixMismatch) => error!(
            "MAC address {mac} is not valid! It must begin with \"{prefix}\" (config.valid_mac_address_prefix)."
        ),
        Err(reason) => error!("MAC address {mac} is not valid! {reason}."),
        Ok(()) if prefix.is_empty() && warn_if_no_prefix => {
            warn!("config.valid_mac_address_prefix is not set!");
        }
        Ok(()) => {}
    }

    result
}

fn check(prefix: &str, mac: &MacAddress) -> Result<(), InvalidReason> {
    if mac.is_all_zero() {
        return Err(InvalidReason::AllZero);
    }
    if mac.is_broadcast() {
        return Err(InvalidReason::Broadcast);
    }
    if mac.is_multicast() {
        return Err(InvalidReason::Multicast);
    }
    if !prefix.is_empty() && !mac.to_string().starts_with(prefix) {
        return Err(InvalidReason::PrefixMismatch);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mac(s: &str) -> MacAddress {
        s.parse().unwrap()
    }

    // =========================================================================
    // Text Form
    // =========================================================================

    #[test]
    fn display_is_lowercase_colon_hex() {
        let addr = MacAddress::new([0xAA, 0x0B, 0xCC, 0x00, 0xEE, 0x01]);
        assert_eq!(addr.to_string(), "aa:0b:cc:00:ee:01");
    }

    #[test]
    fn parse_accepts_mixed_case_and_short_groups() {
        assert_eq!(mac("AA:bb:C:d:0e:F"), MacAddress::new([0xaa, 0xbb, 0x0c, 0x0d, 0x0e, 0x0f]));
    }

    #[test]
    fn parse_rejects_malformed_text() {
        for bad in [
            "",
            "aa:bb:cc:dd:ee",
            "aa:bb:cc:dd:ee:ff:00",
            "aa:bb:cc:dd:ee:fff",
            "aa:bb:cc:dd:ee:",
            "aa:bb:cc:dd:ee:gg",
            "aa-bb-cc-dd-ee-ff",
            "+a:bb:cc:dd:ee:ff",
        ] {
            assert_eq!(bad.parse::<MacAddress>(), Err(ConfigError::InvalidMacAddress), "{bad:?}");
        }
    }

    // =========================================================================
    // Register Packing
    // =========================================================================

    #[test]
    fn register_words_little_endian_by_index() {
        let addr = mac("aa:bb:cc:dd:ee:ff");
        assert_eq!(addr.to_register_words(), (0xddcc_bbaa, 0x0000_ffee));
    }

    #[test]
    fn register_words_ignore_low_upper_half() {
        let addr = MacAddress::from_register_words(0x0403_0201, 0xdead_0605);
        assert_eq!(addr, MacAddress::new([1, 2, 3, 4, 5, 6]));
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn empty_prefix_accepts_ordinary_unicast() {
        for addr in ["02:00:00:00:00:01", "00:00:00:00:00:01", "fe:ff:ff:ff:ff:ff", "aa:bb:cc:dd:ee:ff"] {
            assert_eq!(validate("", &mac(addr), true), Ok(()), "{addr}");
        }
    }

    #[test]
    fn rejects_all_zero_regardless_of_prefix() {
        let addr = mac("00:00:00:00:00:00");
        assert_eq!(validate("", &addr, false), Err(InvalidReason::AllZero));
        assert_eq!(validate("00:00", &addr, false), Err(InvalidReason::AllZero));
    }

    #[test]
    fn rejects_broadcast_regardless_of_prefix() {
        let addr = mac("ff:ff:ff:ff:ff:ff");
        assert_eq!(validate("", &addr, false), Err(InvalidReason::Broadcast));
        assert_eq!(validate("ff:ff", &addr, false), Err(InvalidReason::Broadcast));
    }

    #[test]
    fn rejects_multicast_regardless_of_prefix() {
        for addr in ["01:00:5e:00:00:01", "ab:bb:cc:dd:ee:ff", "33:33:00:00:00:01"] {
            assert_eq!(validate("", &mac(addr), false), Err(InvalidReason::Multicast), "{addr}");
            assert_eq!(validate(&addr[..5], &mac(addr), false), Err(InvalidReason::Multicast));
        }
    }

    #[test]
    fn prefix_match() {
        assert_eq!(validate("aa:bb", &mac("aa:bb:cc:dd:ee:ff"), true), Ok(()));
        assert_eq!(
            validate("aa:bb", &mac("ab:bb:cc:dd:ee:ff"), true),
            Err(InvalidReason::Multicast)
        );
        assert_eq!(
            validate("aa:bb", &mac("ac:bb:cc:dd:ee:ff"), true),
            Err(InvalidReason::PrefixMismatch)
        );
    }

    #[test]
    fn prefix_compares_text_form() {
        // Prefix may end mid-octet
        assert_eq!(validate("aa:b", &mac("aa:bc:00:00:00:01"), false), Ok(()));
        // Uppercase prefixes never match the lowercase text form
        assert_eq!(
            validate("AA:BB", &mac("aa:bb:cc:dd:ee:ff"), false),
            Err(InvalidReason::PrefixMismatch)
        );
    }

    #[test]
    fn every_unicast_first_octet_passes_without_prefix() {
        for first in (0u8..=0xfe).step_by(2) {
            let addr = MacAddress::new([first, 0x12, 0x34, 0x56, 0x78, 0x9a]);
            assert_eq!(validate("", &addr, false), Ok(()), "{addr}");
        }
    }
}
