use super::super::{Bus, Cpu};
use super::vector;

impl Cpu {
    /// Dispatch the highest-priority pending interrupt. Costs 5 M-cycles.
    ///
    /// IME is cleared first. The line is selected after the high byte of PC
    /// has been pushed: if that push lands on IE (SP was 0x0000) and clears
    /// every pending line, the dispatch is cancelled and PC becomes 0x0000.
    /// A pending HALT bug is consumed by the dispatch.
    pub(in crate::cpu) fn service_interrupt<B: Bus>(&mut self, bus: &mut B) {
        self.ime = false;
        self.ime_enable_pending = false;
        self.ime_enable_delay = false;

        // A HALT bug still armed here means PC already moved past the HALT
        // that never suspended; the handler returns to that HALT instead.
        let pc = if std::mem::take(&mut self.halt_bug) {
            self.regs.pc.wrapping_sub(1)
        } else {
            self.regs.pc
        };
        let [hi, lo] = pc.to_be_bytes();

        self.idle_cycle(bus);
        self.idle_cycle(bus);

        self.regs.sp = self.regs.sp.wrapping_sub(1);
        self.write_cycle(bus, self.regs.sp, hi);

        let selected = bus.highest_pending_interrupt();

        self.regs.sp = self.regs.sp.wrapping_sub(1);
        self.write_cycle(bus, self.regs.sp, lo);

        match selected {
            Some(index) => {
                bus.acknowledge_interrupt(index);
                self.regs.pc = vector(index);
                log::debug!(
                    "interrupt {index} -> 0x{:04X} (from pc=0x{pc:04X}, sp=0x{:04X})",
                    self.regs.pc,
                    self.regs.sp
                );
            }
            None => {
                log::debug!("interrupt dispatch cancelled at pc=0x{pc:04X}");
                self.regs.pc = 0x0000;
            }
        }

        self.idle_cycle(bus);
    }
}
