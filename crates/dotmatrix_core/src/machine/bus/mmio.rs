mod read;
mod write;

use super::GameBoyBus;

impl GameBoyBus {
    /// True while OAM DMA keeps the CPU off everything below 0xFF00.
    #[inline]
    pub(super) fn dma_blocks(&self, addr: u16) -> bool {
        addr < 0xFF00 && self.dma.locks_bus()
    }

    #[inline]
    fn wram_index(addr: u16) -> usize {
        // Echo RAM 0xE000-0xFDFF mirrors 0xC000-0xDDFF.
        (addr & 0x1FFF) as usize
    }
}
