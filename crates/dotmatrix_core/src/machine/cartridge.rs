//! Cartridge ROM, external RAM and the memory bank controllers in front of
//! them.

mod header;
mod mbc1;
mod mbc2;
mod mbc3;
mod rtc;

pub use header::{Header, MapperKind};

use crate::{Error, Result};
use mbc1::Mbc1;
use mbc2::{Mbc2, MBC2_RAM_SIZE};
use mbc3::Mbc3;

enum Mapper {
    RomOnly,
    Mbc1(Mbc1),
    Mbc2(Mbc2),
    Mbc3(Mbc3),
}

impl Mapper {
    fn new(header: &Header) -> Self {
        match header.mapper {
            MapperKind::RomOnly => Mapper::RomOnly,
            MapperKind::Mbc1 => Mapper::Mbc1(Mbc1::new()),
            MapperKind::Mbc2 => Mapper::Mbc2(Mbc2::new()),
            MapperKind::Mbc3 => Mapper::Mbc3(Mbc3::new(header.rtc)),
        }
    }
}

/// An inserted cartridge: immutable ROM, mutable XRAM and the mapper state.
pub(crate) struct Cartridge {
    header: Header,
    rom: Box<[u8]>,
    ram: Vec<u8>,
    mapper: Mapper,
}

impl Cartridge {
    pub(crate) fn new(rom: &[u8]) -> Result<Self> {
        let header = Header::parse(rom)?;
        let fill = if header.mapper == MapperKind::Mbc2 { 0x0F } else { 0xFF };
        let ram = vec![fill; header.ram_size];
        let mapper = Mapper::new(&header);

        log::info!(
            "cartridge \"{}\": type 0x{:02X} ({:?}), ROM {} KiB, RAM {} bytes, battery={}, rtc={}",
            header.title,
            header.cart_type,
            header.mapper,
            header.rom_size / 1024,
            header.ram_size,
            header.battery,
            header.rtc
        );

        Ok(Self {
            header,
            rom: rom.into(),
            ram,
            mapper,
        })
    }

    pub(crate) fn header(&self) -> &Header {
        &self.header
    }

    /// 0x0000–0x7FFF and 0xA000–0xBFFF.
    pub(crate) fn read(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x7FFF => match &self.mapper {
                Mapper::RomOnly => self.rom.get(addr as usize).copied().unwrap_or(0xFF),
                Mapper::Mbc1(m) => m.read_rom(&self.rom, addr),
                Mapper::Mbc2(m) => m.read_rom(&self.rom, addr),
                Mapper::Mbc3(m) => m.read_rom(&self.rom, addr),
            },
            0xA000..=0xBFFF => match &self.mapper {
                Mapper::RomOnly => {
                    if self.ram.is_empty() {
                        0xFF
                    } else {
                        self.ram[(addr as usize - 0xA000) % self.ram.len()]
                    }
                }
                Mapper::Mbc1(m) => m.read_ram(&self.ram, addr),
                Mapper::Mbc2(m) => m.read_ram(&self.ram, addr),
                Mapper::Mbc3(m) => m.read_ram(&self.ram, addr),
            },
            _ => 0xFF,
        }
    }

    pub(crate) fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x7FFF => match &mut self.mapper {
                Mapper::RomOnly => {}
                Mapper::Mbc1(m) => m.write_control(addr, value),
                Mapper::Mbc2(m) => m.write_control(addr, value),
                Mapper::Mbc3(m) => m.write_control(addr, value),
            },
            0xA000..=0xBFFF => match &mut self.mapper {
                Mapper::RomOnly => {
                    if !self.ram.is_empty() {
                        let len = self.ram.len();
                        self.ram[(addr as usize - 0xA000) % len] = value;
                    }
                }
                Mapper::Mbc1(m) => m.write_ram(&mut self.ram, addr, value),
                Mapper::Mbc2(m) => m.write_ram(&mut self.ram, addr, value),
                Mapper::Mbc3(m) => m.write_ram(&mut self.ram, addr, value),
            },
            _ => {}
        }
    }

    /// Advance cartridge-side time (the MBC3 clock) by `tcycles`.
    #[inline]
    pub(crate) fn tick(&mut self, tcycles: u32) {
        if let Mapper::Mbc3(m) = &mut self.mapper {
            m.tick(tcycles);
        }
    }

    /// Raw XRAM dump, exactly `header().ram_size` bytes.
    pub(crate) fn save(&self) -> Vec<u8> {
        self.ram.clone()
    }

    /// Replace XRAM with a previous [`save`](Self::save). The current
    /// contents are kept when the length does not match.
    pub(crate) fn load(&mut self, data: &[u8]) -> Result<()> {
        if data.len() != self.ram.len() {
            log::warn!(
                "rejecting save image of {} bytes (cartridge has {})",
                data.len(),
                self.ram.len()
            );
            return Err(Error::InvalidSaveLength {
                expected: self.ram.len(),
                actual: data.len(),
            });
        }
        self.ram.copy_from_slice(data);
        if matches!(self.mapper, Mapper::Mbc2(_)) {
            debug_assert_eq!(self.ram.len(), MBC2_RAM_SIZE);
            self.ram.iter_mut().for_each(|b| *b &= 0x0F);
        }
        Ok(())
    }

    /// Reset the mapper latches. XRAM and the RTC survive.
    pub(crate) fn power_cycle(&mut self) {
        match &mut self.mapper {
            Mapper::Mbc3(m) => m.power_cycle(),
            other => *other = Mapper::new(&self.header),
        }
    }
}
