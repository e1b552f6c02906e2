/// Size of the MBC2's built-in 4-bit RAM.
pub(super) const MBC2_RAM_SIZE: usize = 0x200;

/// MBC2: 4-bit ROM bank register and 512×4-bit built-in RAM.
///
/// Address bit 8 decides which latch a write to 0x0000–0x3FFF targets.
#[derive(Clone, Debug)]
pub(super) struct Mbc2 {
    rom_bank: u8,
    ram_enabled: bool,
}

impl Mbc2 {
    pub(super) fn new() -> Self {
        Self {
            rom_bank: 1,
            ram_enabled: false,
        }
    }

    pub(super) fn read_rom(&self, rom: &[u8], addr: u16) -> u8 {
        let bank = if addr < 0x4000 { 0 } else { self.rom_bank as usize };
        let banks = (rom.len() / 0x4000).max(1);
        let index = (bank % banks) * 0x4000 + (addr as usize & 0x3FFF);
        rom.get(index).copied().unwrap_or(0xFF)
    }

    pub(super) fn write_control(&mut self, addr: u16, value: u8) {
        if addr >= 0x4000 {
            return;
        }
        if addr & 0x0100 == 0 {
            self.ram_enabled = value & 0x0F == 0x0A;
        } else {
            self.rom_bank = value & 0x0F;
            if self.rom_bank == 0 {
                self.rom_bank = 1;
            }
        }
    }

    /// Upper nibble is open and reads as 1s. The 512 bytes repeat across
    /// the whole 0xA000–0xBFFF window.
    pub(super) fn read_ram(&self, ram: &[u8], addr: u16) -> u8 {
        if !self.ram_enabled || ram.is_empty() {
            return 0xFF;
        }
        ram[(addr as usize - 0xA000) % ram.len()] | 0xF0
    }

    pub(super) fn write_ram(&self, ram: &mut [u8], addr: u16, value: u8) {
        if !self.ram_enabled || ram.is_empty() {
            return;
        }
        let len = ram.len();
        ram[(addr as usize - 0xA000) % len] = value & 0x0F;
    }
}
