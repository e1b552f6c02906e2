use super::{
    apu::Apu, cartridge::Cartridge, interrupts::InterruptController, joypad::Joypad, ppu::Ppu,
    serial::Serial, timer::Timer,
};

mod dma;
mod init;
mod mmio;
mod traits;

use dma::OamDma;

pub(crate) const WRAM_SIZE: usize = 0x2000;
pub(crate) const HRAM_SIZE: usize = 0x7F;

/// Everything the CPU can reach: cartridge, RAM and the I/O devices.
///
/// The bus also owns the clock. Every `tick_mcycle` advances timer, PPU,
/// OAM DMA, cartridge RTC and APU by one M-cycle in that order.
pub(crate) struct GameBoyBus {
    pub(crate) cartridge: Cartridge,
    wram: Box<[u8; WRAM_SIZE]>,
    hram: [u8; HRAM_SIZE],
    pub(crate) interrupts: InterruptController,
    timer: Timer,
    pub(crate) ppu: Ppu,
    pub(crate) serial: Serial,
    pub(crate) joypad: Joypad,
    apu: Apu,
    dma: OamDma,
    /// M-cycles since power-on.
    cycles: u64,
}

impl GameBoyBus {
    #[inline]
    pub(crate) fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Advance all devices by one M-cycle.
    pub(crate) fn tick(&mut self) {
        self.timer.tick_mcycle(&mut self.interrupts);
        for _ in 0..4 {
            self.ppu.tick_dot(&mut self.interrupts);
        }
        self.step_dma();
        self.cartridge.tick(4);
        self.apu.tick(4);
        self.serial.tick();
        self.joypad.tick();
        self.cycles += 1;
    }

    /// Debugger read: no clock, no OAM DMA lock.
    pub(crate) fn peek(&self, addr: u16) -> u8 {
        self.read8_mmio(addr)
    }

    /// Debugger write: no clock, no OAM DMA lock.
    pub(crate) fn poke(&mut self, addr: u16, value: u8) {
        self.write8_mmio(addr, value)
    }
}
