//! MDIO (Management Data Input/Output) HAL
//!
//! This module drives the FPGA MDIO controller to read and write PHY
//! registers. Every transaction is two frames on the bus:
//!
//! 1. an address frame carrying the 16-bit register number, and
//! 2. a write frame (value from WRITE_BUF) or read frame (value to READ_BUF).
//!
//! Each frame is started through CONTROL and completes when the busy bit
//! clears. Completion is polled with a fixed budget; the engine never retries
//! a failed transaction.

use embedded_hal::delay::DelayNs;
use log::{debug, error, trace};

use crate::constants::{MDIO_BUS_DELAY_US, MDIO_POLL_INTERVAL_US, MDIO_POLL_LIMIT};
use crate::error::Result;
use crate::hal::poll::Poller;
use crate::register::RegisterRegion;
use crate::register::mdio::{
    ADDRESS1, ADDRESS2, CONTROL, CONTROL_BUSY, Opcode, READ_BUF, START_FRAME, WRITE_BUF,
    address1_word,
};

// =============================================================================
// MDIO Bus Trait
// =============================================================================

/// Trait for MDIO bus operations
///
/// Addresses follow the controller's Clause 45 layout: a 5-bit port
/// address, a 5-bit device address and a 16-bit register number.
pub trait MdioBus {
    /// Read a PHY register
    fn read(&mut self, port: u8, device: u8, register: u16) -> Result<u16>;

    /// Write a PHY register
    fn write(&mut self, port: u8, device: u8, register: u16, value: u16) -> Result<()>;
}

impl<T: MdioBus + ?Sized> MdioBus for &mut T {
    fn read(&mut self, port: u8, device: u8, register: u16) -> Result<u16> {
        (**self).read(port, device, register)
    }

    fn write(&mut self, port: u8, device: u8, register: u16, value: u16) -> Result<()> {
        (**self).write(port, device, register, value)
    }
}

// =============================================================================
// MDIO Controller
// =============================================================================

/// MDIO transaction engine
///
/// Holds the bus timing and the delay provider. The register window is
/// passed to each operation so the same engine can serve any window.
#[derive(Debug)]
pub struct MdioController<D: DelayNs> {
    /// Delay provider for bus timing and polling
    delay: D,
    /// Pause after each address register write, in microseconds
    bus_delay_us: u32,
    /// Busy-bit polling budget
    poller: Poller,
}

impl<D: DelayNs> MdioController<D> {
    /// Create a new MDIO controller with the reference timing
    pub fn new(delay: D) -> Self {
        Self {
            delay,
            bus_delay_us: MDIO_BUS_DELAY_US,
            poller: Poller::new(MDIO_POLL_LIMIT, MDIO_POLL_INTERVAL_US),
        }
    }

    /// Create a new MDIO controller with custom timing
    pub fn with_timing(delay: D, bus_delay_us: u32, poller: Poller) -> Self {
        Self {
            delay,
            bus_delay_us,
            poller,
        }
    }

    /// Write a PHY register through the controller in `region`
    pub fn write<R: RegisterRegion + ?Sized>(
        &mut self,
        region: &mut R,
        port: u8,
        device: u8,
        register: u16,
        value: u16,
    ) -> Result<()> {
        self.set_address(region, port, device, register)?;

        debug!("mdio: writing port {port} dev {device} reg {register:#06x} = {value:#06x}");
        region.write32(ADDRESS1, address1_word(Opcode::Write, port, device))?;
        region.write32(WRITE_BUF, value as u32)?;
        self.run_frame(region)
    }

    /// Read a PHY register through the controller in `region`
    pub fn read<R: RegisterRegion + ?Sized>(
        &mut self,
        region: &mut R,
        port: u8,
        device: u8,
        register: u16,
    ) -> Result<u16> {
        self.set_address(region, port, device, register)?;

        debug!("mdio: reading port {port} dev {device} reg {register:#06x}");
        region.write32(ADDRESS1, address1_word(Opcode::Read, port, device))?;
        self.run_frame(region)?;

        let value = (region.read32(READ_BUF)? & 0xffff) as u16;
        trace!("mdio: read {value:#06x}");
        Ok(value)
    }

    /// Address frame: select port, device and register for the next frame
    fn set_address<R: RegisterRegion + ?Sized>(
        &mut self,
        region: &mut R,
        port: u8,
        device: u8,
        register: u16,
    ) -> Result<()> {
        let addr1 = address1_word(Opcode::Address, port, device);
        trace!("mdio: address1 = {addr1:#06x}, address2 = {register:#06x}");

        region.write32(ADDRESS1, addr1)?;
        self.delay.delay_us(self.bus_delay_us);

        region.write32(ADDRESS2, register as u32)?;
        self.delay.delay_us(self.bus_delay_us);

        region.write32(CONTROL, START_FRAME)?;
        self.delay.delay_us(self.bus_delay_us);

        self.wait_not_busy(region)
    }

    /// Start the frame described by ADDRESS1 and wait for it to finish
    fn run_frame<R: RegisterRegion + ?Sized>(&mut self, region: &mut R) -> Result<()> {
        region.write32(CONTROL, START_FRAME)?;
        self.wait_not_busy(region)
    }

    /// Wait for the busy bit to clear
    fn wait_not_busy<R: RegisterRegion + ?Sized>(&mut self, region: &mut R) -> Result<()> {
        let poller = self.poller;
        let mut status = 0u32;

        let result = poller.wait(&mut self.delay, || {
            status = region.read32(CONTROL)?;
            Ok(status & CONTROL_BUSY == 0)
        });

        match result {
            Ok(checks) => {
                trace!("mdio: frame complete after {checks} status reads");
                Ok(())
            }
            Err(e) => {
                error!("mdio: frame did not complete, control register {status:#010x}");
                Err(e)
            }
        }
    }
}

// =============================================================================
// Bound Interface
// =============================================================================

/// MDIO controller bound to its register window
///
/// This is the [`MdioBus`] the bring-up sequence drives.
#[derive(Debug)]
pub struct MdioInterface<R: RegisterRegion, D: DelayNs> {
    region: R,
    controller: MdioController<D>,
}

impl<R: RegisterRegion, D: DelayNs> MdioInterface<R, D> {
    /// Bind `controller` to `region`
    pub fn new(region: R, controller: MdioController<D>) -> Self {
        Self { region, controller }
    }

    /// Access the register window
    pub fn region(&self) -> &R {
        &self.region
    }

    /// Access the register window mutably
    pub fn region_mut(&mut self) -> &mut R {
        &mut self.region
    }

    /// Consume the interface and return its parts
    pub fn into_parts(self) -> (R, MdioController<D>) {
        (self.region, self.controller)
    }
}

impl<R: RegisterRegion, D: DelayNs> MdioBus for MdioInterface<R, D> {
    fn read(&mut self, port: u8, device: u8, register: u16) -> Result<u16> {
        self.controller.read(&mut self.region, port, device, register)
    }

    fn write(&mut self, port: u8, device: u8, register: u16, value: u16) -> Result<()> {
        self.controller
            .write(&mut self.region, port, device, register, value)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
