pub mod cpu;
mod error;
pub mod machine;

pub use error::{Error, Result};
pub use machine::{Buttons, GameBoy, Header, Interrupt, MapperKind};

/// Logical screen width in pixels for the Game Boy DMG.
pub const SCREEN_WIDTH: usize = 160;
/// Logical screen height in pixels.
pub const SCREEN_HEIGHT: usize = 144;
/// Size of one RGBA frame as returned by [`GameBoy::frame`].
pub const FRAME_BYTES: usize = SCREEN_WIDTH * SCREEN_HEIGHT * 4;
/// M-cycles in one full 154-line frame (70224 dots / 4).
pub const MCYCLES_PER_FRAME: u64 = 17_556;
