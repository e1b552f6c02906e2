use crate::{Error, Result};

/// Memory bank controller family selected by header byte 0x0147.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MapperKind {
    RomOnly,
    Mbc1,
    Mbc2,
    Mbc3,
}

/// The parts of the cartridge header (0x0100–0x014F) the core relies on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    pub title: String,
    pub cart_type: u8,
    pub mapper: MapperKind,
    /// ROM size in bytes (32 KiB << code).
    pub rom_size: usize,
    /// External RAM size in bytes. MBC2 always reports its 512 built-in
    /// nibbles.
    pub ram_size: usize,
    pub battery: bool,
    pub rtc: bool,
}

const HEADER_END: usize = 0x150;

impl Header {
    pub fn parse(rom: &[u8]) -> Result<Self> {
        if rom.len() < HEADER_END {
            return Err(Error::CartridgeTruncated {
                expected: HEADER_END,
                actual: rom.len(),
            });
        }

        let cart_type = rom[0x147];
        let (mapper, battery, rtc) = match cart_type {
            0x00 => (MapperKind::RomOnly, false, false),
            0x01 | 0x02 => (MapperKind::Mbc1, false, false),
            0x03 => (MapperKind::Mbc1, true, false),
            0x05 => (MapperKind::Mbc2, false, false),
            0x06 => (MapperKind::Mbc2, true, false),
            0x0F | 0x10 => (MapperKind::Mbc3, true, true),
            0x11 | 0x12 => (MapperKind::Mbc3, false, false),
            0x13 => (MapperKind::Mbc3, true, false),
            other => return Err(Error::UnsupportedCartridge { cart_type: other }),
        };

        let rom_code = rom[0x148];
        if rom_code > 0x08 {
            return Err(Error::UnsupportedRomSize { code: rom_code });
        }
        let rom_size = 0x8000usize << rom_code;

        let ram_code = rom[0x149];
        let declared_ram = match ram_code {
            0x00 => 0,
            0x01 => 0x800,
            0x02 => 0x2000,
            0x03 => 0x8000,
            0x04 => 0x20000,
            0x05 => 0x10000,
            other => return Err(Error::UnsupportedRamSize { code: other }),
        };
        let ram_size = match mapper {
            MapperKind::Mbc2 => 0x200,
            _ => declared_ram,
        };

        if rom.len() < rom_size {
            return Err(Error::CartridgeTruncated {
                expected: rom_size,
                actual: rom.len(),
            });
        }

        let title = rom[0x134..0x144]
            .iter()
            .take_while(|&&b| b != 0)
            .filter(|b| b.is_ascii_graphic() || **b == b' ')
            .map(|&b| b as char)
            .collect::<String>()
            .trim_end()
            .to_owned();

        Ok(Self {
            title,
            cart_type,
            mapper,
            rom_size,
            ram_size,
            battery,
            rtc,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(cart_type: u8, rom_code: u8, ram_code: u8) -> Vec<u8> {
        let mut rom = vec![0u8; 0x8000 << rom_code];
        rom[0x134..0x139].copy_from_slice(b"TETRA");
        rom[0x147] = cart_type;
        rom[0x148] = rom_code;
        rom[0x149] = ram_code;
        rom
    }

    #[test]
    fn parses_mbc3_timer_battery() {
        let header = Header::parse(&image(0x10, 2, 3)).unwrap();
        assert_eq!(header.title, "TETRA");
        assert_eq!(header.mapper, MapperKind::Mbc3);
        assert_eq!(header.rom_size, 128 * 1024);
        assert_eq!(header.ram_size, 32 * 1024);
        assert!(header.battery);
        assert!(header.rtc);
    }

    #[test]
    fn mbc2_reports_builtin_ram() {
        let header = Header::parse(&image(0x06, 0, 0)).unwrap();
        assert_eq!(header.mapper, MapperKind::Mbc2);
        assert_eq!(header.ram_size, 512);
        assert!(header.battery);
    }

    #[test]
    fn rejects_unknown_mapper() {
        let err = Header::parse(&image(0x19, 0, 0)).unwrap_err();
        assert!(matches!(err, Error::UnsupportedCartridge { cart_type: 0x19 }));
    }

    #[test]
    fn rejects_truncated_images() {
        let err = Header::parse(&[0u8; 0x100]).unwrap_err();
        assert!(matches!(err, Error::CartridgeTruncated { expected: 0x150, actual: 0x100 }));

        let mut rom = image(0x01, 0, 0);
        rom[0x148] = 2;
        let err = Header::parse(&rom).unwrap_err();
        assert!(matches!(err, Error::CartridgeTruncated { expected: 0x20000, actual: 0x8000 }));
    }

    #[test]
    fn rejects_bad_size_codes() {
        let mut rom = image(0x00, 0, 0);
        rom[0x148] = 0x52;
        assert!(matches!(Header::parse(&rom), Err(Error::UnsupportedRomSize { code: 0x52 })));
        rom[0x148] = 0;
        rom[0x149] = 0x07;
        assert!(matches!(Header::parse(&rom), Err(Error::UnsupportedRamSize { code: 0x07 })));
    }
}
