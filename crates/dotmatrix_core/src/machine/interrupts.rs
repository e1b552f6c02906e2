use bitflags::bitflags;

bitflags! {
    /// The five interrupt lines as laid out in IF (0xFF0F) and IE (0xFFFF).
    ///
    /// Lower bits have higher priority.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Interrupt: u8 {
        const VBLANK = 1 << 0;
        const STAT = 1 << 1;
        const TIMER = 1 << 2;
        const SERIAL = 1 << 3;
        const JOYPAD = 1 << 4;
    }
}

/// IF/IE latch pair.
#[derive(Clone, Debug, Default)]
pub(crate) struct InterruptController {
    requested: Interrupt,
    /// IE keeps all eight bits; only the lower five gate interrupts.
    enable: u8,
}

impl InterruptController {
    #[inline]
    pub(crate) fn request(&mut self, line: Interrupt) {
        self.requested |= line;
    }

    /// Clear IF for line `index` (0 = VBlank .. 4 = Joypad).
    #[inline]
    pub(crate) fn acknowledge(&mut self, index: u8) {
        self.requested
            .remove(Interrupt::from_bits_truncate(1u8.wrapping_shl(index as u32)));
    }

    /// IF ∧ IE over the five lines.
    #[inline]
    pub(crate) fn pending(&self) -> u8 {
        self.requested.bits() & self.enable & 0x1F
    }

    /// Index of the highest-priority pending line.
    pub(crate) fn pending_highest(&self) -> Option<u8> {
        let pending = self.pending();
        (pending != 0).then(|| pending.trailing_zeros() as u8)
    }

    /// IF read-back: the three unused upper bits read as 1.
    #[inline]
    pub(crate) fn read_if(&self) -> u8 {
        self.requested.bits() | 0xE0
    }

    #[inline]
    pub(crate) fn write_if(&mut self, value: u8) {
        self.requested = Interrupt::from_bits_truncate(value);
    }

    #[inline]
    pub(crate) fn read_ie(&self) -> u8 {
        self.enable
    }

    #[inline]
    pub(crate) fn write_ie(&mut self, value: u8) {
        self.enable = value;
    }
}
