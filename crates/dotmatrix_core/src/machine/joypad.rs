use bitflags::bitflags;

use super::interrupts::{Interrupt, InterruptController};

bitflags! {
    /// Buttons as seen by the host. A set bit means pressed.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Buttons: u8 {
        const RIGHT = 1 << 0;
        const LEFT = 1 << 1;
        const UP = 1 << 2;
        const DOWN = 1 << 3;
        const A = 1 << 4;
        const B = 1 << 5;
        const SELECT = 1 << 6;
        const START = 1 << 7;
    }
}

/// P1 (0xFF00).
pub(crate) struct Joypad {
    /// Bits 5 (buttons) and 4 (d-pad); 0 selects the group.
    select: u8,
    pressed: Buttons,
}

impl Joypad {
    pub(crate) fn new() -> Self {
        // Post-boot P1 reads 0xCF.
        Self {
            select: 0x00,
            pressed: Buttons::empty(),
        }
    }

    pub(crate) fn read(&self) -> u8 {
        // Pressed lines pull low.
        let mut low = 0x0F;
        if self.select & 0x10 == 0 {
            low &= !self.pressed.bits() & 0x0F;
        }
        if self.select & 0x20 == 0 {
            low &= !(self.pressed.bits() >> 4) & 0x0F;
        }
        0xC0 | self.select | low
    }

    pub(crate) fn write(&mut self, value: u8) {
        self.select = value & 0x30;
    }

    pub(crate) fn press(&mut self, buttons: Buttons, irq: &mut InterruptController) {
        let newly = buttons - self.pressed;
        self.pressed |= buttons;
        if !newly.is_empty() {
            irq.request(Interrupt::JOYPAD);
        }
    }

    pub(crate) fn release(&mut self, buttons: Buttons) {
        self.pressed -= buttons;
    }

    /// Input is event driven; nothing to clock.
    #[inline]
    pub(crate) fn tick(&mut self) {}
}
