/// MBC1 bank latches.
///
/// ROM and RAM live in the owning [`Cartridge`](super::Cartridge); this
/// type only translates addresses.
#[derive(Clone, Debug)]
pub(super) struct Mbc1 {
    /// 5-bit low bank register; a write of 0 selects 1.
    bank_lo: u8,
    /// 2-bit register: upper ROM bank bits or RAM bank.
    bank_hi: u8,
    /// Banking mode; 1 applies `bank_hi` to 0x0000–0x3FFF and to XRAM.
    mode: u8,
    ram_enabled: bool,
}

impl Mbc1 {
    pub(super) fn new() -> Self {
        Self {
            bank_lo: 1,
            bank_hi: 0,
            mode: 0,
            ram_enabled: false,
        }
    }

    fn rom_bank(&self, addr: u16) -> usize {
        if addr < 0x4000 {
            if self.mode == 1 {
                (self.bank_hi as usize) << 5
            } else {
                0
            }
        } else {
            ((self.bank_hi as usize) << 5) | self.bank_lo as usize
        }
    }

    pub(super) fn read_rom(&self, rom: &[u8], addr: u16) -> u8 {
        let banks = (rom.len() / 0x4000).max(1);
        let bank = self.rom_bank(addr) % banks;
        let index = bank * 0x4000 + (addr as usize & 0x3FFF);
        rom.get(index).copied().unwrap_or(0xFF)
    }

    pub(super) fn write_control(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram_enabled = value & 0x0F == 0x0A,
            0x2000..=0x3FFF => {
                self.bank_lo = value & 0x1F;
                if self.bank_lo == 0 {
                    self.bank_lo = 1;
                }
            }
            0x4000..=0x5FFF => self.bank_hi = value & 0x03,
            0x6000..=0x7FFF => self.mode = value & 0x01,
            _ => {}
        }
    }

    fn ram_index(&self, ram: &[u8], addr: u16) -> Option<usize> {
        if !self.ram_enabled || ram.is_empty() {
            return None;
        }
        let bank = if self.mode == 1 { self.bank_hi as usize } else { 0 };
        Some((bank * 0x2000 + (addr as usize - 0xA000)) % ram.len())
    }

    pub(super) fn read_ram(&self, ram: &[u8], addr: u16) -> u8 {
        self.ram_index(ram, addr).map_or(0xFF, |i| ram[i])
    }

    pub(super) fn write_ram(&self, ram: &mut [u8], addr: u16, value: u8) {
        if let Some(i) = self.ram_index(ram, addr) {
            ram[i] = value;
        }
    }
}
