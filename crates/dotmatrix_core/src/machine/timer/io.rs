use super::Timer;

impl Timer {
    pub(in crate::machine) fn read(&self, addr: u16) -> u8 {
        match addr {
            0xFF04 => (self.div >> 8) as u8,
            0xFF05 => self.tima,
            0xFF06 => self.tma,
            0xFF07 => self.tac | 0xF8,
            _ => 0xFF,
        }
    }

    pub(in crate::machine) fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0xFF04 => self.write_div(),
            0xFF05 => {
                // A write during the overflow delay cancels reload and IRQ.
                self.tima = value;
                self.overflow = false;
            }
            // During the overflow delay the reload picks up the new TMA.
            0xFF06 => self.tma = value,
            0xFF07 => self.write_tac(value),
            _ => {}
        }
    }

    /// Clearing DIV16 is a falling edge if the selected bit was high.
    fn write_div(&mut self) {
        let before = self.input();
        self.div = 0;
        if before {
            self.increment_tima();
        }
    }

    /// Disabling the timer or moving the selected bit can also produce a
    /// falling edge on the timer input.
    fn write_tac(&mut self, value: u8) {
        let before = self.input();
        self.tac = value & 0x07;
        if before && !self.input() {
            self.increment_tima();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::Timer;
    use crate::machine::interrupts::InterruptController;

    #[test]
    fn div_write_clears_whole_divider() {
        let mut timer = Timer::new();
        timer.write(0xFF04, 0x5A);
        assert_eq!(timer.div, 0);
        assert_eq!(timer.read(0xFF04), 0);
    }

    #[test]
    fn div_write_with_selected_bit_high_bumps_tima() {
        let mut timer = Timer::new();
        timer.write(0xFF07, 0x05);
        timer.div = 1 << 3;
        timer.write(0xFF04, 0);
        assert_eq!(timer.read(0xFF05), 1);
    }

    #[test]
    fn tac_disable_with_input_high_bumps_tima() {
        let mut timer = Timer::new();
        timer.write(0xFF07, 0x05);
        timer.div = 1 << 3;
        timer.write(0xFF07, 0x01);
        assert_eq!(timer.read(0xFF05), 1);
    }

    #[test]
    fn tima_write_during_delay_cancels_reload() {
        let mut timer = Timer::new();
        let mut irq = InterruptController::default();
        timer.write(0xFF04, 0);
        timer.write(0xFF07, 0x05);
        timer.write(0xFF06, 0x80);
        timer.write(0xFF05, 0xFF);
        for _ in 0..4 {
            timer.tick_mcycle(&mut irq);
        }
        assert!(timer.overflow);
        timer.write(0xFF05, 0x10);
        timer.tick_mcycle(&mut irq);
        assert_eq!(timer.read(0xFF05), 0x10);
        assert_eq!(irq.read_if() & 0x04, 0);
    }

    #[test]
    fn tma_write_during_delay_is_reloaded() {
        let mut timer = Timer::new();
        let mut irq = InterruptController::default();
        timer.write(0xFF04, 0);
        timer.write(0xFF07, 0x05);
        timer.write(0xFF05, 0xFF);
        for _ in 0..4 {
            timer.tick_mcycle(&mut irq);
        }
        timer.write(0xFF06, 0x42);
        timer.tick_mcycle(&mut irq);
        assert_eq!(timer.read(0xFF05), 0x42);
        assert_eq!(irq.read_if() & 0x04, 0x04);
    }
}
