//! MAC address record in an I2C EEPROM
//!
//! The record is six consecutive bytes at a fixed offset inside the EEPROM.
//! Reads set the EEPROM's address pointer with a one-byte write and then
//! read six bytes in a repeated-start transfer; writes send the offset
//! followed by the six bytes in one transfer. EEPROMs keep writing
//! internally after the transfer completes, so confirmation waits before
//! reading back.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{I2c, SevenBitAddress};
use log::{debug, error};

use crate::constants::MAC_ADDR_LEN;
use crate::error::{Error, IoError, Result};
use crate::mac::MacAddress;

/// MAC address record accessor
#[derive(Debug)]
pub struct MacEeprom<I: I2c<SevenBitAddress>> {
    /// I2C bus the EEPROM sits on
    bus: I,
    /// 7-bit device address
    address: u8,
    /// Byte offset of the record
    offset: u8,
}

impl<I: I2c<SevenBitAddress>> MacEeprom<I> {
    /// Access the record at `offset` of the EEPROM at `address` on `bus`
    pub fn new(bus: I, address: u8, offset: u8) -> Self {
        Self {
            bus,
            address,
            offset,
        }
    }

    /// Read the stored MAC address
    pub fn read_mac(&mut self) -> Result<MacAddress> {
        let mut octets = [0u8; MAC_ADDR_LEN];
        self.bus
            .write_read(self.address, &[self.offset], &mut octets)
            .map_err(|e| {
                error!(
                    "error reading mac eeprom at {:#04x} offset {:#04x}: {e:?}",
                    self.address, self.offset
                );
                IoError::Transfer
            })?;

        let mac = MacAddress::new(octets);
        debug!("eeprom: read {mac}");
        Ok(mac)
    }

    /// Write `mac` to the record
    ///
    /// A successful return means the EEPROM acknowledged the transfer, not
    /// that the value was stored; see [`Self::confirm`].
    pub fn write_mac(&mut self, mac: &MacAddress) -> Result<()> {
        let mut frame = [0u8; MAC_ADDR_LEN + 1];
        frame[0] = self.offset;
        frame[1..].copy_from_slice(mac.as_bytes());

        self.bus.write(self.address, &frame).map_err(|e| {
            error!(
                "error writing mac eeprom at {:#04x} offset {:#04x}: {e:?}",
                self.address, self.offset
            );
            IoError::Transfer
        })?;

        debug!("eeprom: wrote {mac}");
        Ok(())
    }

    /// Read the record back and compare it with `expected`
    pub fn confirm(&mut self, expected: &MacAddress) -> Result<()> {
        let found = self.read_mac()?;
        if found != *expected {
            error!("MAC address read back ({found}) does not match MAC address stored ({expected}).");
            return Err(Error::ReadbackMismatch {
                expected: *expected,
                found,
            });
        }
        Ok(())
    }

    /// Write `mac`, wait `settle_us` for the EEPROM write cycle, then confirm
    pub fn store<D: DelayNs>(&mut self, mac: &MacAddress, delay: &mut D, settle_us: u32) -> Result<()> {
        self.write_mac(mac)?;
        delay.delay_us(settle_us);
        self.confirm(mac)
    }

    /// Access the underlying bus mutably
    pub fn bus_mut(&mut self) -> &mut I {
        &mut self.bus
    }
}
