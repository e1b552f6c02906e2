use super::GameBoyBus;

/// OAM DMA engine.
///
/// A write to 0xFF46 spends one M-cycle starting up, then copies one byte
/// per M-cycle for 160 cycles. The CPU is locked out of everything below
/// 0xFF00 while bytes are being copied.
#[derive(Clone, Debug, Default)]
pub(super) struct OamDma {
    /// Last value written to 0xFF46.
    pub(super) register: u8,
    transfer: Option<Transfer>,
}

#[derive(Clone, Copy, Debug)]
struct Transfer {
    source: u16,
    index: u16,
    startup: u8,
}

const OAM_SIZE: u16 = 0xA0;

impl OamDma {
    #[inline]
    pub(super) fn locks_bus(&self) -> bool {
        matches!(self.transfer, Some(Transfer { startup: 0, .. }))
    }
}

impl GameBoyBus {
    pub(super) fn start_dma(&mut self, value: u8) {
        log::debug!("OAM DMA from {:#06x}", (value as u16) << 8);
        self.dma.register = value;
        self.dma.transfer = Some(Transfer {
            source: (value as u16) << 8,
            index: 0,
            startup: 1,
        });
    }

    pub(super) fn step_dma(&mut self) {
        let Some(mut transfer) = self.dma.transfer else {
            return;
        };
        if transfer.startup > 0 {
            transfer.startup -= 1;
            self.dma.transfer = Some(transfer);
            return;
        }

        let byte = self.dma_source_read(transfer.source.wrapping_add(transfer.index));
        self.ppu.dma_write_oam(transfer.index as usize, byte);
        transfer.index += 1;
        self.dma.transfer = (transfer.index < OAM_SIZE).then_some(transfer);
    }

    /// Source fetch; ignores PPU and DMA locks. 0xE000 and up folds onto WRAM.
    fn dma_source_read(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x7FFF | 0xA000..=0xBFFF => self.cartridge.read(addr),
            0x8000..=0x9FFF => self.ppu.dma_read_vram(addr),
            0xC000..=0xDFFF => self.wram[(addr & 0x1FFF) as usize],
            0xE000..=0xFFFF => self.wram[(addr.wrapping_sub(0x2000) & 0x1FFF) as usize],
        }
    }
}
