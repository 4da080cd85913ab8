//! MDIO controller register map
//!
//! The controller runs Clause 45 style transactions: an address frame
//! carrying the 16-bit register number, then a write or read frame. Software
//! describes each frame in ADDRESS1/ADDRESS2 and starts it through CONTROL.

// =============================================================================
// Register Offsets
// =============================================================================

/// Opcode, port address and device address
pub const ADDRESS1: usize = 0x00;

/// 16-bit register address
pub const ADDRESS2: usize = 0x04;

/// 16-bit value for write frames
pub const WRITE_BUF: usize = 0x08;

/// 16-bit value returned by read frames
pub const READ_BUF: usize = 0x0c;

/// Control and status
pub const CONTROL: usize = 0x10;

// =============================================================================
// CONTROL Bits
// =============================================================================

/// Enable the MDIO peripheral
pub const CONTROL_ENABLE: u32 = 1 << 3;

/// Set to start a frame; stays set while the frame is in flight
pub const CONTROL_BUSY: u32 = 1 << 0;

// =============================================================================
// ADDRESS1 Fields
// =============================================================================

/// Opcode field mask (2 bits)
pub const ADDRESS1_OP_MASK: u32 = 0x3;
/// Opcode field position
pub const ADDRESS1_OP_SHIFT: u32 = 10;
/// Port address field mask (5 bits)
pub const ADDRESS1_PORT_MASK: u32 = 0x1f;
/// Port address field position
pub const ADDRESS1_PORT_SHIFT: u32 = 5;
/// Device address field mask (5 bits)
pub const ADDRESS1_DEV_MASK: u32 = 0x1f;
/// Device address field position
pub const ADDRESS1_DEV_SHIFT: u32 = 0;

/// Largest valid port or device address
pub const MAX_FIELD_ADDR: u8 = 31;

/// MDIO frame opcode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Opcode {
    /// Send the 16-bit register address
    Address = 0,
    /// Send a 16-bit write value
    Write = 1,
    /// Receive a 16-bit read value
    Read = 3,
}

impl Opcode {
    /// Get the opcode value for register programming
    pub const fn to_reg_value(self) -> u32 {
        self as u32
    }
}

/// Build the ADDRESS1 register value
///
/// Fields wider than their slot are truncated to the slot width.
pub const fn address1_word(opcode: Opcode, port: u8, device: u8) -> u32 {
    ((opcode.to_reg_value() & ADDRESS1_OP_MASK) << ADDRESS1_OP_SHIFT)
        | ((port as u32 & ADDRESS1_PORT_MASK) << ADDRESS1_PORT_SHIFT)
        | ((device as u32 & ADDRESS1_DEV_MASK) << ADDRESS1_DEV_SHIFT)
}

/// Split an ADDRESS1 register value into `(opcode bits, port, device)`
pub const fn address1_fields(word: u32) -> (u32, u8, u8) {
    (
        (word >> ADDRESS1_OP_SHIFT) & ADDRESS1_OP_MASK,
        ((word >> ADDRESS1_PORT_SHIFT) & ADDRESS1_PORT_MASK) as u8,
        ((word >> ADDRESS1_DEV_SHIFT) & ADDRESS1_DEV_MASK) as u8,
    )
}

/// CONTROL value that starts a frame
pub const START_FRAME: u32 = CONTROL_ENABLE | CONTROL_BUSY;
