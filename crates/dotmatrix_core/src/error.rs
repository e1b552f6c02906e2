use thiserror::Error;

/// Errors surfaced by the emulation core.
///
/// Only conditions the host has to react to are errors. Bus anomalies such
/// as reads from locked or unmapped regions are normalised silently, the
/// way the hardware does.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("unsupported cartridge type 0x{cart_type:02X}")]
    UnsupportedCartridge { cart_type: u8 },

    #[error("unsupported ROM size code 0x{code:02X}")]
    UnsupportedRomSize { code: u8 },

    #[error("unsupported RAM size code 0x{code:02X}")]
    UnsupportedRamSize { code: u8 },

    #[error("cartridge truncated: header declares {expected} bytes, image has {actual}")]
    CartridgeTruncated { expected: usize, actual: usize },

    #[error("illegal opcode 0x{opcode:02X} at PC=0x{pc:04X}")]
    IllegalOpcode { opcode: u8, pc: u16 },

    #[error("save image is {actual} bytes, cartridge RAM is {expected} bytes")]
    InvalidSaveLength { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
