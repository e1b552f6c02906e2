//! Divider and programmable timer.
//!
//! DIV16 advances once per T-cycle. TIMA increments on the falling edge of
//! `TAC.enable && DIV16[bit]`, where the bit is picked by TAC's clock
//! select. An overflow leaves TIMA at 0x00 for one M-cycle before the TMA
//! reload and the Timer request.

mod io;

use super::interrupts::{Interrupt, InterruptController};

/// DIV16 value the DMG boot ROM leaves behind at PC=0x0100.
const POST_BOOT_DIV: u16 = 0xABCC;

pub(super) struct Timer {
    /// Free-running 16-bit divider; DIV is the upper byte.
    div: u16,
    tima: u8,
    tma: u8,
    /// TAC, lower three bits.
    tac: u8,
    /// TIMA overflowed during the last M-cycle; reload on the next one.
    overflow: bool,
}

impl Timer {
    pub(super) fn new() -> Self {
        Self {
            div: POST_BOOT_DIV,
            tima: 0,
            tma: 0,
            tac: 0,
            overflow: false,
        }
    }

    /// Divider bit watched for each TAC clock select (4096, 262144, 65536
    /// and 16384 Hz).
    #[inline]
    fn selected_bit(&self) -> u16 {
        match self.tac & 0x03 {
            0x00 => 1 << 9,
            0x01 => 1 << 3,
            0x02 => 1 << 5,
            _ => 1 << 7,
        }
    }

    /// The AND of the enable bit and the selected divider bit.
    #[inline]
    fn input(&self) -> bool {
        self.tac & 0x04 != 0 && self.div & self.selected_bit() != 0
    }

    fn increment_tima(&mut self) {
        let (next, overflow) = self.tima.overflowing_add(1);
        self.tima = next;
        if overflow {
            self.overflow = true;
        }
    }

    #[inline]
    fn tick_tcycle(&mut self) {
        let before = self.input();
        self.div = self.div.wrapping_add(1);
        if before && !self.input() {
            self.increment_tima();
        }
    }

    /// Advance by one M-cycle, completing a pending overflow first.
    pub(super) fn tick_mcycle(&mut self, irq: &mut InterruptController) {
        if self.overflow {
            self.overflow = false;
            self.tima = self.tma;
            irq.request(Interrupt::TIMER);
        }
        for _ in 0..4 {
            self.tick_tcycle();
        }
    }
}
