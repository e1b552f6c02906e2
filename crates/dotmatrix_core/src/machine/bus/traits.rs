use crate::cpu::Bus;

use super::GameBoyBus;

impl Bus for GameBoyBus {
    fn read8(&mut self, addr: u16) -> u8 {
        if self.dma_blocks(addr) {
            return 0xFF;
        }
        self.read8_mmio(addr)
    }

    fn write8(&mut self, addr: u16, value: u8) {
        if self.dma_blocks(addr) {
            return;
        }
        self.write8_mmio(addr, value)
    }

    fn tick_mcycle(&mut self) {
        self.tick();
    }

    fn pending_interrupts(&mut self) -> u8 {
        self.interrupts.pending()
    }

    fn highest_pending_interrupt(&mut self) -> Option<u8> {
        self.interrupts.pending_highest()
    }

    fn acknowledge_interrupt(&mut self, index: u8) {
        self.interrupts.acknowledge(index);
    }
}
