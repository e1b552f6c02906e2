use super::{dma::OamDma, GameBoyBus, HRAM_SIZE, WRAM_SIZE};
use crate::machine::{
    apu::Apu,
    cartridge::Cartridge,
    interrupts::{Interrupt, InterruptController},
    joypad::Joypad,
    ppu::Ppu,
    serial::Serial,
    timer::Timer,
};

impl GameBoyBus {
    /// Bus in the DMG post-boot state around `cartridge`.
    pub(crate) fn new(cartridge: Cartridge) -> Self {
        let mut bus = Self {
            cartridge,
            // Zeroed rather than random so runs are reproducible.
            wram: Box::new([0; WRAM_SIZE]),
            hram: [0; HRAM_SIZE],
            interrupts: InterruptController::default(),
            timer: Timer::new(),
            ppu: Ppu::new(),
            serial: Serial::default(),
            joypad: Joypad::new(),
            apu: Apu::new(),
            dma: OamDma::default(),
            cycles: 0,
        };
        bus.apply_dmg_initial_io_state();
        bus
    }

    /// Power-cycle everything but the cartridge's RAM and clock.
    pub(crate) fn power_cycle(&mut self) {
        self.cartridge.power_cycle();
        self.wram.fill(0);
        self.hram = [0; HRAM_SIZE];
        self.interrupts = InterruptController::default();
        self.timer = Timer::new();
        self.ppu = Ppu::new();
        self.serial = Serial::default();
        self.joypad = Joypad::new();
        self.apu = Apu::new();
        self.dma = OamDma::default();
        self.cycles = 0;
        self.apply_dmg_initial_io_state();
    }

    fn apply_dmg_initial_io_state(&mut self) {
        // The boot ROM leaves VBlank requested and IE clear.
        self.interrupts.write_if(Interrupt::VBLANK.bits());
        self.interrupts.write_ie(0x00);
        self.dma.register = 0xFF;
        // LCDC, BGP, DIV and the APU registers come up at their post-boot
        // values from their own constructors.
    }
}
