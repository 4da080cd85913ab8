//! Testing utilities and mock implementations
//!
//! This module provides mock implementations for testing the bring-up
//! logic on the host without hardware access.
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]

use core::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};

use embedded_hal::digital;
use embedded_hal::i2c::{self, NoAcknowledgeSource, Operation, SevenBitAddress};

use crate::error::{Error, IoError, IoResult, Result};
use crate::hal::mdio::MdioBus;
use crate::register::RegisterRegion;

// =============================================================================
// Mock MDIO Bus
// =============================================================================

/// Mock MDIO bus for testing PHY configuration without hardware
///
/// Writes update the register map, so a read after a write returns the
/// written value.
///
/// # Example
///
/// ```ignore
/// let mut mdio = MockMdioBus::new();
/// mdio.set_register(0, 1, 0x8000, 0x1234);
/// assert_eq!(mdio.read(0, 1, 0x8000).unwrap(), 0x1234);
/// ```
#[derive(Debug, Default)]
pub struct MockMdioBus {
    /// Register values: (port, device, register) -> value
    registers: RefCell<HashMap<(u8, u8, u16), u16>>,
    /// Record of writes: (port, device, register, value)
    write_log: RefCell<Vec<(u8, u8, u16, u16)>>,
    /// Number of reads served
    reads: RefCell<usize>,
    /// Whether every transaction should time out
    failing: RefCell<bool>,
    /// Whether writes are logged but not stored
    ignore_writes: RefCell<bool>,
}

impl MockMdioBus {
    /// Create a new mock MDIO bus
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a register value
    pub fn set_register(&self, port: u8, device: u8, register: u16, value: u16) {
        self.registers
            .borrow_mut()
            .insert((port, device, register), value);
    }

    /// Get the current value of a register (for test verification)
    pub fn get_register(&self, port: u8, device: u8, register: u16) -> Option<u16> {
        self.registers.borrow().get(&(port, device, register)).copied()
    }

    /// Get all writes that have been made
    pub fn get_writes(&self) -> Vec<(u8, u8, u16, u16)> {
        self.write_log.borrow().clone()
    }

    /// Number of reads served
    pub fn read_count(&self) -> usize {
        *self.reads.borrow()
    }

    /// Make every transaction time out
    pub fn set_failing(&self, failing: bool) {
        *self.failing.borrow_mut() = failing;
    }

    /// Log writes without storing them, like read-only PHY registers
    pub fn set_ignore_writes(&self, ignore: bool) {
        *self.ignore_writes.borrow_mut() = ignore;
    }
}

impl MdioBus for MockMdioBus {
    fn read(&mut self, port: u8, device: u8, register: u16) -> Result<u16> {
        if *self.failing.borrow() {
            return Err(Error::ProtocolTimeout);
        }
        *self.reads.borrow_mut() += 1;
        Ok(self.get_register(port, device, register).unwrap_or(0))
    }

    fn write(&mut self, port: u8, device: u8, register: u16, value: u16) -> Result<()> {
        if *self.failing.borrow() {
            return Err(Error::ProtocolTimeout);
        }
        self.write_log
            .borrow_mut()
            .push((port, device, register, value));
        if !*self.ignore_writes.borrow() {
            self.set_register(port, device, register, value);
        }
        Ok(())
    }
}

// =============================================================================
// Mock Register Region
// =============================================================================

/// Mock register window
///
/// Unset registers read as zero. Behaviour of real hardware is modelled
/// with a few hooks:
/// - queued reads are returned (in order) before the stored value
/// - self-clearing bits are cleared as soon as they are written
/// - mirrors copy a write into another register, like a core latching
///   its configuration
///
/// Failed accesses are not logged.
#[derive(Debug, Default)]
pub struct MockRegion {
    registers: HashMap<usize, u32>,
    queued: HashMap<usize, VecDeque<u32>>,
    self_clearing: HashMap<usize, u32>,
    mirrors: HashMap<usize, (usize, u32)>,
    fail_writes: HashSet<usize>,
    fail_reads: HashSet<usize>,
    write_log: Vec<(usize, u32)>,
    read_log: Vec<usize>,
}

impl MockRegion {
    /// Create an empty region
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a register value without logging a write
    pub fn set_register(&mut self, offset: usize, value: u32) {
        self.registers.insert(offset, value);
    }

    /// Current stored value of a register
    pub fn register(&self, offset: usize) -> u32 {
        self.registers.get(&offset).copied().unwrap_or(0)
    }

    /// Return `values` from the next reads of `offset`
    pub fn queue_reads(&mut self, offset: usize, values: &[u32]) {
        self.queued
            .entry(offset)
            .or_default()
            .extend(values.iter().copied());
    }

    /// Clear `mask` in every value written to `offset`
    pub fn self_clearing(&mut self, offset: usize, mask: u32) {
        self.self_clearing.insert(offset, mask);
    }

    /// Copy every value written to `src` into `dst`, OR-ing in `or_bits`
    pub fn mirror_on_write(&mut self, src: usize, dst: usize, or_bits: u32) {
        self.mirrors.insert(src, (dst, or_bits));
    }

    /// Fail every write to `offset`
    pub fn fail_write(&mut self, offset: usize) {
        self.fail_writes.insert(offset);
    }

    /// Fail every read of `offset`
    pub fn fail_read(&mut self, offset: usize) {
        self.fail_reads.insert(offset);
    }

    /// Successful writes, in order
    pub fn writes(&self) -> &[(usize, u32)] {
        &self.write_log
    }

    /// Offsets of successful reads, in order
    pub fn reads(&self) -> &[usize] {
        &self.read_log
    }
}

impl RegisterRegion for MockRegion {
    fn read32(&mut self, offset: usize) -> IoResult<u32> {
        if self.fail_reads.contains(&offset) {
            return Err(IoError::Register);
        }
        self.read_log.push(offset);
        let queued = self.queued.get_mut(&offset).and_then(VecDeque::pop_front);
        Ok(queued.unwrap_or_else(|| self.register(offset)))
    }

    fn write32(&mut self, offset: usize, value: u32) -> IoResult<()> {
        if self.fail_writes.contains(&offset) {
            return Err(IoError::Register);
        }
        self.write_log.push((offset, value));

        let mask = self.self_clearing.get(&offset).copied().unwrap_or(0);
        self.registers.insert(offset, value & !mask);
        if let Some(&(dst, or_bits)) = self.mirrors.get(&offset) {
            self.registers.insert(dst, value | or_bits);
        }
        Ok(())
    }
}

// =============================================================================
// Mock Delay
// =============================================================================

/// Mock delay for testing without actual timing
///
/// Records delays for verification without actually waiting.
#[derive(Debug, Default)]
pub struct MockDelay {
    /// Total nanoseconds delayed
    total_ns: RefCell<u64>,
}

impl MockDelay {
    /// Create a new mock delay
    pub fn new() -> Self {
        Self::default()
    }

    /// Get total nanoseconds that were "delayed"
    pub fn total_ns(&self) -> u64 {
        *self.total_ns.borrow()
    }

    /// Get total microseconds that were "delayed"
    pub fn total_us(&self) -> u64 {
        self.total_ns() / 1_000
    }
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        *self.total_ns.borrow_mut() += ns as u64;
    }

    fn delay_us(&mut self, us: u32) {
        *self.total_ns.borrow_mut() += us as u64 * 1_000;
    }
}

// =============================================================================
// Mock Output Pin
// =============================================================================

/// Mock GPIO output recording every level driven
#[derive(Debug, Default)]
pub struct MockPin {
    levels: Vec<bool>,
    failing: bool,
    /// Fail once this many levels have been driven
    fail_after: Option<usize>,
}

impl MockPin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Levels driven so far, `true` is high
    pub fn levels(&self) -> &[bool] {
        &self.levels
    }

    /// Make every drive fail
    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    /// Let `count` drives succeed, then fail
    pub fn fail_after(&mut self, count: usize) {
        self.fail_after = Some(count);
    }

    fn drive(&mut self, high: bool) -> core::result::Result<(), digital::ErrorKind> {
        let exhausted = self.fail_after.is_some_and(|n| self.levels.len() >= n);
        if self.failing || exhausted {
            return Err(digital::ErrorKind::Other);
        }
        self.levels.push(high);
        Ok(())
    }
}

impl digital::ErrorType for MockPin {
    type Error = digital::ErrorKind;
}

impl digital::OutputPin for MockPin {
    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        self.drive(false)
    }

    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        self.drive(true)
    }
}

// =============================================================================
// Mock EEPROM
// =============================================================================

/// Mock 256-byte I2C EEPROM with a one-byte address pointer
///
/// The first byte written in a transaction sets the pointer; further bytes
/// are stored at the pointer, which advances and wraps. Reads return bytes
/// from the pointer.
#[derive(Debug)]
pub struct MockEeprom {
    address: SevenBitAddress,
    memory: [u8; 256],
    pointer: u8,
    corrupt_writes: bool,
    failing: bool,
}

impl MockEeprom {
    /// Blank (0xff) EEPROM answering at `address`
    pub fn new(address: SevenBitAddress) -> Self {
        Self {
            address,
            memory: [0xff; 256],
            pointer: 0,
            corrupt_writes: false,
            failing: false,
        }
    }

    /// Preload bytes at `offset`
    pub fn load(&mut self, offset: u8, bytes: &[u8]) {
        for (i, byte) in bytes.iter().enumerate() {
            self.memory[(offset as usize + i) % 256] = *byte;
        }
    }

    /// Stored bytes at `offset`
    pub fn contents(&self, offset: u8, len: usize) -> &[u8] {
        &self.memory[offset as usize..offset as usize + len]
    }

    /// Acknowledge writes but store inverted data
    pub fn set_corrupt_writes(&mut self, corrupt: bool) {
        self.corrupt_writes = corrupt;
    }

    /// Fail every transaction with a bus error
    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }
}

impl i2c::ErrorType for MockEeprom {
    type Error = i2c::ErrorKind;
}

impl i2c::I2c<SevenBitAddress> for MockEeprom {
    fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> core::result::Result<(), Self::Error> {
        if self.failing {
            return Err(i2c::ErrorKind::Bus);
        }
        if address != self.address {
            return Err(i2c::ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }

        for op in operations {
            match op {
                Operation::Write(bytes) => {
                    let Some((&pointer, data)) = bytes.split_first() else {
                        continue;
                    };
                    self.pointer = pointer;
                    for byte in data {
                        let stored = if self.corrupt_writes { !*byte } else { *byte };
                        self.memory[self.pointer as usize] = stored;
                        self.pointer = self.pointer.wrapping_add(1);
                    }
                }
                Operation::Read(buf) => {
                    for byte in buf.iter_mut() {
                        *byte = self.memory[self.pointer as usize];
                        self.pointer = self.pointer.wrapping_add(1);
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::delay::DelayNs;
    use embedded_hal::i2c::I2c;

    #[test]
    fn mock_mdio_read_write() {
        let mut mdio = MockMdioBus::new();

        // Initially reads 0
        assert_eq!(mdio.read(0, 1, 0x8000).unwrap(), 0);

        mdio.set_register(0, 1, 0x8000, 0x1234);
        assert_eq!(mdio.read(0, 1, 0x8000).unwrap(), 0x1234);

        // Write updates the value
        mdio.write(0, 1, 0x8000, 0x5678).unwrap();
        assert_eq!(mdio.read(0, 1, 0x8000).unwrap(), 0x5678);

        assert_eq!(mdio.get_writes(), vec![(0, 1, 0x8000, 0x5678)]);
        assert_eq!(mdio.read_count(), 3);
    }

    #[test]
    fn mock_delay_tracking() {
        let mut delay = MockDelay::new();

        delay.delay_ns(1000);
        delay.delay_ns(2000);

        assert_eq!(delay.total_ns(), 3000);
        assert_eq!(delay.total_us(), 3);

        delay.delay_us(1_000);
        assert_eq!(delay.total_us(), 1_003);
    }

    #[test]
    fn mock_region_hooks() {
        let mut region = MockRegion::new();
        region.self_clearing(0x10, 0x1);
        region.mirror_on_write(0x00, 0x20, 0xff00);
        region.queue_reads(0x10, &[7]);

        region.write32(0x10, 0x9).unwrap();
        region.write32(0x00, 0x12).unwrap();

        assert_eq!(region.read32(0x10).unwrap(), 7);
        assert_eq!(region.read32(0x10).unwrap(), 0x8);
        assert_eq!(region.register(0x20), 0xff12);
        assert_eq!(region.reads(), &[0x10, 0x10]);
    }

    #[test]
    fn mock_pin_fail_after() {
        let mut pin = MockPin::new();
        pin.fail_after(1);

        assert!(digital::OutputPin::set_high(&mut pin).is_ok());
        assert!(digital::OutputPin::set_low(&mut pin).is_err());
        assert_eq!(pin.levels(), &[true]);
    }

    #[test]
    fn mock_eeprom_pointer_wraps() {
        let mut eeprom = MockEeprom::new(0x50);

        eeprom.write(0x50, &[0xff, 1, 2]).unwrap();

        assert_eq!(eeprom.contents(0xff, 1), &[1]);
        assert_eq!(eeprom.contents(0, 1), &[2]);
    }
}
