//! Register window access
//!
//! Both hardware blocks (the 10GbE MAC core and the MDIO controller) are
//! exposed as small memory-mapped windows of 32-bit registers. This module
//! defines the capability the rest of the crate uses to reach them and the
//! offset maps of each block.
//!
//! The Linux implementation maps a UIO device (see
//! [`crate::integration::linux::UioRegion`]); tests use a scripted mock.

pub mod gbe;
pub mod mdio;

use crate::error::{IoError, IoResult};

/// Width of every register in bytes
pub const REGISTER_WIDTH: usize = 4;

/// Synchronous 32-bit register access at byte offsets within a window
///
/// Implementations must complete each access before returning. All offsets
/// are relative to the start of the window.
pub trait RegisterRegion {
    /// Read the register at `offset`
    fn read32(&mut self, offset: usize) -> IoResult<u32>;

    /// Write `value` to the register at `offset`
    fn write32(&mut self, offset: usize, value: u32) -> IoResult<()>;
}

impl<T: RegisterRegion + ?Sized> RegisterRegion for &mut T {
    fn read32(&mut self, offset: usize) -> IoResult<u32> {
        (**self).read32(offset)
    }

    fn write32(&mut self, offset: usize, value: u32) -> IoResult<()> {
        (**self).write32(offset, value)
    }
}

/// Check that a 32-bit access at `offset` fits an aligned window of `len` bytes
pub fn check_offset(offset: usize, len: usize) -> IoResult<()> {
    if offset % REGISTER_WIDTH != 0 {
        return Err(IoError::OutOfRange);
    }
    match offset.checked_add(REGISTER_WIDTH) {
        Some(end) if end <= len => Ok(()),
        _ => Err(IoError::OutOfRange),
    }
}
