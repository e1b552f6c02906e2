use super::{Mode, Ppu, StatSelect};
use crate::machine::interrupts::InterruptController;

impl Ppu {
    /// VRAM is locked during pixel transfer.
    #[inline]
    pub(crate) fn vram_accessible(&self) -> bool {
        !self.lcd_enabled() || self.mode != Mode::Transfer
    }

    /// OAM is locked during OAM scan and pixel transfer.
    #[inline]
    pub(crate) fn oam_accessible(&self) -> bool {
        !self.lcd_enabled() || matches!(self.mode, Mode::HBlank | Mode::VBlank)
    }

    pub(crate) fn read_vram(&self, addr: u16) -> u8 {
        if self.vram_accessible() {
            self.vram[(addr & 0x1FFF) as usize]
        } else {
            0xFF
        }
    }

    pub(crate) fn write_vram(&mut self, addr: u16, value: u8) {
        if self.vram_accessible() {
            self.vram[(addr & 0x1FFF) as usize] = value;
        }
    }

    /// VRAM as the OAM DMA engine sees it, ignoring the mode lock.
    #[inline]
    pub(crate) fn dma_read_vram(&self, addr: u16) -> u8 {
        self.vram[(addr & 0x1FFF) as usize]
    }

    pub(crate) fn read_oam(&self, addr: u16) -> u8 {
        match self.oam.get((addr - 0xFE00) as usize) {
            Some(&value) if self.oam_accessible() => value,
            _ => 0xFF,
        }
    }

    pub(crate) fn write_oam(&mut self, addr: u16, value: u8) {
        if self.oam_accessible() {
            self.dma_write_oam((addr - 0xFE00) as usize, value);
        }
    }

    fn read_stat(&self) -> u8 {
        let coincidence = if self.ly == self.lyc { 0x04 } else { 0 };
        0x80 | self.stat_select.bits() | coincidence | self.mode() as u8
    }

    /// LCD registers 0xFF40–0xFF4B except DMA.
    pub(crate) fn read_register(&self, addr: u16) -> u8 {
        match addr {
            0xFF40 => self.lcdc.bits(),
            0xFF41 => self.read_stat(),
            0xFF42 => self.scy,
            0xFF43 => self.scx,
            0xFF44 => self.ly,
            0xFF45 => self.lyc,
            0xFF47 => self.bgp,
            0xFF48 => self.obp0,
            0xFF49 => self.obp1,
            0xFF4A => self.wy,
            0xFF4B => self.wx,
            _ => 0xFF,
        }
    }

    pub(crate) fn write_register(&mut self, addr: u16, value: u8, irq: &mut InterruptController) {
        match addr {
            0xFF40 => self.set_lcdc(value, irq),
            0xFF41 => {
                self.stat_select = StatSelect::from_bits_truncate(value);
                self.update_stat_line(irq);
            }
            0xFF42 => self.scy = value,
            0xFF43 => self.scx = value,
            // LY is read-only.
            0xFF44 => {}
            0xFF45 => {
                self.lyc = value;
                self.update_stat_line(irq);
            }
            0xFF47 => self.bgp = value,
            0xFF48 => self.obp0 = value,
            0xFF49 => self.obp1 = value,
            0xFF4A => self.wy = value,
            0xFF4B => self.wx = value,
            _ => {}
        }
    }
}
