//! Linux user-space backends
//!
//! - [`UioRegion`]: register window mapped from a UIO device
//! - [`GpioResetPin`]: reset line on a GPIO character device
//! - `linux_embedded_hal::I2cdev` for the MAC EEPROM
//! - `linux_embedded_hal::Delay` for settle times and polling
//!
//! [`open_context`] opens all of them from the `[resources]` table.

use std::fs::{self, File, OpenOptions};
use std::os::fd::AsRawFd;
use std::path::Path;
use std::ptr;

use embedded_hal::digital::{self, OutputPin};
use gpio_cdev::{Chip, Line, LineHandle, LineRequestFlags};
use libc::c_void;
use linux_embedded_hal::{Delay, I2cdev};
use log::{debug, error, trace};

use crate::app::Context;
use crate::constants::{GPIO_CONSUMER, REGION_SIZE, UIO_MAP_INDEX};
use crate::driver::Settings;
use crate::error::{ConfigError, IoError, IoResult, Result};
use crate::hal::mdio::{MdioController, MdioInterface};
use crate::hal::reset::ResetLine;
use crate::mac::MacEeprom;
use crate::register::{RegisterRegion, check_offset};

/// MDIO bus over a UIO-mapped controller
pub type LinuxMdio = MdioInterface<UioRegion, Delay>;

/// Hardware context backed by Linux device nodes
pub type LinuxContext = Context<UioRegion, LinuxMdio, GpioResetPin, I2cdev, Delay>;

// =============================================================================
// UIO Register Window
// =============================================================================

/// Register window mapped from a UIO device
///
/// The mapping stays valid until the region is dropped.
#[derive(Debug)]
pub struct UioRegion {
    base: *mut u8,
    len: usize,
    /// Kept open for the lifetime of the mapping
    _file: File,
}

impl UioRegion {
    /// Map `len` bytes of UIO map `map_index` of the device at `path`
    pub fn open(path: &Path, map_index: usize, len: usize) -> IoResult<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(|e| {
                error!("unable to open {}: {e}", path.display());
                IoError::MapFailed
            })?;

        // SAFETY: sysconf has no preconditions
        let page_size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
        let page_size = usize::try_from(page_size).map_err(|_| IoError::MapFailed)?;
        // UIO selects the map through the page-sized offset
        let offset = (map_index * page_size) as libc::off_t;

        // SAFETY: a fresh shared mapping of an open descriptor; the kernel
        // picks the address and the result is checked below.
        let base = unsafe {
            libc::mmap(
                ptr::null_mut(),
                len,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_SHARED,
                file.as_raw_fd(),
                offset,
            )
        };
        if base == libc::MAP_FAILED {
            error!(
                "unable to map {}: {}",
                path.display(),
                std::io::Error::last_os_error()
            );
            return Err(IoError::MapFailed);
        }

        debug!("uio: mapped {} ({len:#x} bytes)", path.display());
        Ok(Self {
            base: base.cast::<u8>(),
            len,
            _file: file,
        })
    }

    /// Map the standard 0x1000-byte window of UIO map 0
    pub fn open_default(path: &Path) -> IoResult<Self> {
        Self::open(path, UIO_MAP_INDEX, REGION_SIZE)
    }
}

impl RegisterRegion for UioRegion {
    fn read32(&mut self, offset: usize) -> IoResult<u32> {
        check_offset(offset, self.len)?;
        // SAFETY: offset is aligned and inside the live mapping
        let value = unsafe { ptr::read_volatile(self.base.add(offset).cast::<u32>()) };
        trace!("uio: read {offset:#05x} -> {value:#010x}");
        Ok(value)
    }

    fn write32(&mut self, offset: usize, value: u32) -> IoResult<()> {
        check_offset(offset, self.len)?;
        trace!("uio: write {offset:#05x} <- {value:#010x}");
        // SAFETY: offset is aligned and inside the live mapping
        unsafe { ptr::write_volatile(self.base.add(offset).cast::<u32>(), value) };
        Ok(())
    }
}

impl Drop for UioRegion {
    fn drop(&mut self) {
        // SAFETY: base/len describe the mapping created in `open`
        unsafe {
            libc::munmap(self.base.cast::<c_void>(), self.len);
        }
    }
}

// =============================================================================
// GPIO Reset Pin
// =============================================================================

/// GPIO character device error
#[derive(Debug)]
pub struct GpioError(gpio_cdev::errors::Error);

impl digital::Error for GpioError {
    fn kind(&self) -> digital::ErrorKind {
        digital::ErrorKind::Other
    }
}

impl core::fmt::Display for GpioError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.0.fmt(f)
    }
}

/// Output line on a GPIO chip
///
/// The line is requested on the first drive, with that drive's level as
/// the initial value, so opening it does not disturb the core.
#[derive(Debug)]
pub struct GpioResetPin {
    line: Line,
    handle: Option<LineHandle>,
}

impl GpioResetPin {
    /// Open line `offset` of the chip at `chip_path` (symlinks allowed)
    pub fn open(chip_path: &Path, offset: u32) -> IoResult<Self> {
        let resolved = fs::canonicalize(chip_path).map_err(|e| {
            error!("unable to resolve reset gpio chip path {}: {e}", chip_path.display());
            IoError::GpioUnavailable
        })?;
        let mut chip = Chip::new(&resolved).map_err(|e| {
            error!("error opening reset gpio chip {}: {e}", resolved.display());
            IoError::GpioUnavailable
        })?;
        let line = chip.get_line(offset).map_err(|e| {
            error!("error opening reset gpio line {offset}: {e}");
            IoError::GpioUnavailable
        })?;

        debug!("gpio: {} line {offset}", resolved.display());
        Ok(Self { line, handle: None })
    }

    fn drive(&mut self, value: u8) -> core::result::Result<(), GpioError> {
        if let Some(handle) = &self.handle {
            return handle.set_value(value).map_err(GpioError);
        }
        let handle = self
            .line
            .request(LineRequestFlags::OUTPUT, value, GPIO_CONSUMER)
            .map_err(GpioError)?;
        debug!("gpio: requested line {} as output", self.line.offset());
        self.handle = Some(handle);
        Ok(())
    }
}

impl digital::ErrorType for GpioResetPin {
    type Error = GpioError;
}

impl OutputPin for GpioResetPin {
    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        self.drive(0)
    }

    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        self.drive(1)
    }
}

// =============================================================================
// Context
// =============================================================================

/// Open every device named in `settings`
///
/// The MDIO controller is only mapped when `need_mdio` is set.
pub fn open_context(settings: &Settings, need_mdio: bool) -> Result<LinuxContext> {
    let res = &settings.resources;

    let gbe = UioRegion::open_default(&res.gbe_uio)?;

    let mdio = if need_mdio {
        let Some(path) = res.mdio_uio.as_deref() else {
            error!("resources.mdio_uio is required when config.mdio_reg_writes is set");
            return Err(ConfigError::MissingMdioRegion.into());
        };
        let region = UioRegion::open_default(path)?;
        let controller = MdioController::with_timing(
            Delay,
            settings.timing.bus_delay_us,
            settings.timing.poller(),
        );
        Some(MdioInterface::new(region, controller))
    } else {
        None
    };

    let reset = ResetLine::new(GpioResetPin::open(&res.reset_gpio, res.reset_gpio_bit)?);

    let bus = I2cdev::new(&res.mac_eeprom_bus).map_err(|e| {
        error!("error opening mac eeprom {}: {e}", res.mac_eeprom_bus.display());
        IoError::I2cUnavailable
    })?;
    let eeprom = MacEeprom::new(bus, res.mac_eeprom_address, res.mac_eeprom_offset);

    Ok(Context::new(gbe, mdio, reset, eeprom, Delay))
}
