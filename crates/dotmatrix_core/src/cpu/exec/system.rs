use crate::cpu::{Bus, Cpu, CpuState};

impl Cpu {
    /// HALT with IME=0 and an interrupt already pending does not halt;
    /// instead the following opcode byte is fetched twice (HALT bug).
    pub(super) fn exec_halt<B: Bus>(&mut self, bus: &mut B) {
        if !self.ime && bus.pending_interrupts() != 0 {
            self.halt_bug = true;
        } else {
            self.state = CpuState::Halted;
        }
    }

    /// STOP reads and discards its padding byte, then waits like HALT.
    pub(super) fn exec_stop<B: Bus>(&mut self, bus: &mut B) {
        let _padding = self.fetch8(bus);
        self.state = CpuState::Stopped;
    }

    pub(super) fn exec_di(&mut self) {
        self.ime = false;
        self.ime_enable_pending = false;
        self.ime_enable_delay = false;
    }

    /// IME becomes 1 after the next instruction completes.
    pub(super) fn exec_ei(&mut self) {
        self.ime_enable_pending = true;
    }
}
