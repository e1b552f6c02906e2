/// Abstraction over the Game Boy bus (memory and IO) as seen by the CPU.
///
/// `read8` and `write8` are pure accesses: they never advance time. The CPU
/// pairs every access with one `tick_mcycle` call, so the rest of the
/// machine observes the pre-access state for reads and the post-access
/// state for whatever the CPU does next.
pub trait Bus {
    fn read8(&mut self, addr: u16) -> u8;
    fn write8(&mut self, addr: u16, value: u8);

    /// Advance every non-CPU component by one M-cycle (4 T-cycles).
    ///
    /// Generic buses (such as flat test memories) can leave this as a
    /// no-op; the system bus drives PPU, timer, DMA and cartridge here.
    fn tick_mcycle(&mut self) {}

    /// Interrupt lines that are both requested and enabled (IF ∧ IE), as
    /// the lower five bits.
    ///
    /// The default implementation goes through the memory map so that
    /// flat buses work unchanged; the system bus overrides this to bypass
    /// OAM DMA locking.
    fn pending_interrupts(&mut self) -> u8 {
        self.read8(0xFFFF) & self.read8(0xFF0F) & 0x1F
    }

    /// Index of the highest-priority pending line, if any.
    fn highest_pending_interrupt(&mut self) -> Option<u8> {
        let pending = self.pending_interrupts();
        (pending != 0).then(|| pending.trailing_zeros() as u8)
    }

    /// Clear the IF bit for interrupt line `index` (0 = VBlank .. 4 = Joypad).
    fn acknowledge_interrupt(&mut self, index: u8) {
        let flags = self.read8(0xFF0F);
        self.write8(0xFF0F, flags & !(1 << index));
    }
}
