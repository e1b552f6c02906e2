mod apu;
mod bus;
mod cartridge;
mod gameboy;
mod interrupts;
mod joypad;
mod ppu;
mod serial;
mod timer;

pub(crate) use bus::GameBoyBus;
pub use cartridge::{Header, MapperKind};
pub use gameboy::GameBoy;
pub use interrupts::Interrupt;
pub use joypad::Buttons;

#[cfg(test)]
mod tests;
