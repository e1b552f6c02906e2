use crate::cpu::{Bus, Cpu, Reg16};

impl Cpu {
    pub(super) fn exec_push<B: Bus>(&mut self, bus: &mut B, pair: Reg16) {
        let value = self.regs.get16(pair);
        self.idle_cycle(bus);
        self.push_u16(bus, value);
    }

    /// POP AF drops the low nibble of F through `set_af`.
    pub(super) fn exec_pop<B: Bus>(&mut self, bus: &mut B, pair: Reg16) {
        let value = self.pop_u16(bus);
        self.regs.set16(pair, value);
    }

    pub(super) fn exec_rst<B: Bus>(&mut self, bus: &mut B, vector: u8) {
        let ret = self.regs.pc;
        self.idle_cycle(bus);
        self.push_u16(bus, ret);
        self.regs.pc = vector as u16;
    }
}
