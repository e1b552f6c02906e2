use super::rtc::Rtc;

/// MBC3: 7-bit ROM bank, RAM bank / RTC register select and an optional
/// real-time clock.
#[derive(Clone, Debug)]
pub(super) struct Mbc3 {
    rom_bank: u8,
    /// 0x00..=0x07 select an XRAM bank, 0x08..=0x0C an RTC register.
    select: u8,
    ram_enabled: bool,
    /// Last value written to 0x6000–0x7FFF; a 0 then 1 sequence latches.
    latch_last: u8,
    rtc: Option<Rtc>,
}

impl Mbc3 {
    pub(super) fn new(has_rtc: bool) -> Self {
        Self {
            rom_bank: 1,
            select: 0,
            ram_enabled: false,
            latch_last: 0xFF,
            rtc: has_rtc.then(Rtc::default),
        }
    }

    pub(super) fn read_rom(&self, rom: &[u8], addr: u16) -> u8 {
        let bank = if addr < 0x4000 { 0 } else { self.rom_bank as usize };
        let banks = (rom.len() / 0x4000).max(1);
        let index = (bank % banks) * 0x4000 + (addr as usize & 0x3FFF);
        rom.get(index).copied().unwrap_or(0xFF)
    }

    pub(super) fn write_control(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram_enabled = value & 0x0F == 0x0A,
            0x2000..=0x3FFF => {
                self.rom_bank = value & 0x7F;
                if self.rom_bank == 0 {
                    self.rom_bank = 1;
                }
            }
            0x4000..=0x5FFF => self.select = value & 0x0F,
            0x6000..=0x7FFF => {
                if self.latch_last == 0x00 && value == 0x01 {
                    if let Some(rtc) = self.rtc.as_mut() {
                        rtc.latch();
                    }
                }
                self.latch_last = value;
            }
            _ => {}
        }
    }

    pub(super) fn read_ram(&self, ram: &[u8], addr: u16) -> u8 {
        if !self.ram_enabled {
            return 0xFF;
        }
        match self.select {
            0x00..=0x07 if !ram.is_empty() => {
                ram[(self.select as usize * 0x2000 + (addr as usize - 0xA000)) % ram.len()]
            }
            0x08..=0x0C => self.rtc.as_ref().map_or(0xFF, |rtc| rtc.read(self.select)),
            _ => 0xFF,
        }
    }

    pub(super) fn write_ram(&mut self, ram: &mut [u8], addr: u16, value: u8) {
        if !self.ram_enabled {
            return;
        }
        match self.select {
            0x00..=0x07 if !ram.is_empty() => {
                let len = ram.len();
                ram[(self.select as usize * 0x2000 + (addr as usize - 0xA000)) % len] = value;
            }
            0x08..=0x0C => {
                if let Some(rtc) = self.rtc.as_mut() {
                    rtc.write(self.select, value);
                }
            }
            _ => {}
        }
    }

    pub(super) fn tick(&mut self, tcycles: u32) {
        if let Some(rtc) = self.rtc.as_mut() {
            rtc.tick(tcycles);
        }
    }
}

impl Mbc3 {
    /// Reset the bank latches; the clock keeps running across power cycles.
    pub(super) fn power_cycle(&mut self) {
        let rtc = self.rtc.take();
        *self = Self::new(false);
        self.rtc = rtc;
    }
}
