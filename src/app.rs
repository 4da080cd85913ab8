//! Top-level actions
//!
//! Every action starts by reading the MAC address stored in the EEPROM,
//! then runs its own step:
//!
//! - [`Action::Query`]: print the stored address and check it
//! - [`Action::Store`]: check a new address and write it to the EEPROM
//! - [`Action::Initialize`]: bring up the 10GbE core with the stored address

use std::io::Write;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::{I2c, SevenBitAddress};
use log::{error, info};

use crate::driver::{BringUp, Settings};
use crate::error::{IoError, Result};
use crate::hal::mdio::MdioBus;
use crate::hal::reset::ResetLine;
use crate::mac::{MacAddress, MacEeprom, validate};
use crate::register::RegisterRegion;

/// What the tool was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Print and check the stored MAC address
    Query,
    /// Store the given MAC address (text form)
    Store(String),
    /// Configure and start the 10GbE core
    Initialize,
}

/// Hardware handles for one run
///
/// `mdio` is only opened when PHY register writes are configured.
pub struct Context<G, M, P, I, D>
where
    G: RegisterRegion,
    M: MdioBus,
    P: OutputPin,
    I: I2c<SevenBitAddress>,
    D: DelayNs,
{
    /// 10GbE MAC core register window
    pub gbe: G,
    /// MDIO bus to the PHY
    pub mdio: Option<M>,
    /// Core reset line
    pub reset: ResetLine<P>,
    /// MAC address EEPROM
    pub eeprom: MacEeprom<I>,
    /// Delay for settle times
    pub delay: D,
}

impl<G, M, P, I, D> Context<G, M, P, I, D>
where
    G: RegisterRegion,
    M: MdioBus,
    P: OutputPin,
    I: I2c<SevenBitAddress>,
    D: DelayNs,
{
    /// Bundle opened hardware handles
    pub fn new(gbe: G, mdio: Option<M>, reset: ResetLine<P>, eeprom: MacEeprom<I>, delay: D) -> Self {
        Self {
            gbe,
            mdio,
            reset,
            eeprom,
            delay,
        }
    }
}

/// Run `action`, printing query output to `out`
pub fn execute<G, M, P, I, D, W>(
    action: &Action,
    ctx: &mut Context<G, M, P, I, D>,
    settings: &Settings,
    out: &mut W,
) -> Result<()>
where
    G: RegisterRegion,
    M: MdioBus,
    P: OutputPin,
    I: I2c<SevenBitAddress>,
    D: DelayNs,
    W: Write,
{
    let prefix = settings.config.valid_mac_address_prefix.as_str();
    // Configuration errors come before any device access
    let operations = match action {
        Action::Initialize => settings.mdio_operations()?,
        Action::Query | Action::Store(_) => Vec::new(),
    };
    let stored = ctx.eeprom.read_mac()?;

    match action {
        Action::Query => {
            writeln!(out, "{stored}").map_err(|e| {
                error!("unable to print MAC address: {e}");
                IoError::Output
            })?;
            validate(prefix, &stored, false)?;
        }
        Action::Store(text) => {
            let mac = text.parse::<MacAddress>().inspect_err(|_| {
                error!("Unable to parse input MAC address.");
            })?;
            validate(prefix, &mac, true)?;
            ctx.eeprom
                .store(&mac, &mut ctx.delay, settings.timing.eeprom_write_settle_us)?;
            info!("Stored MAC address {mac}");
        }
        Action::Initialize => {
            BringUp::new(
                &mut ctx.gbe,
                ctx.mdio.as_mut(),
                &mut ctx.reset,
                &mut ctx.delay,
                settings.timing,
            )
            .with_operations(&operations)
            .with_prefix(prefix)
            .with_readback(settings.config.mdio_readback)
            .run(&stored)?;
        }
    }
    Ok(())
}

/// Process exit status for the outcome of [`execute`]
pub fn exit_status<T>(result: &Result<T>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}
