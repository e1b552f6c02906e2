use crate::cpu::decode::Operand;
use crate::cpu::{Bus, Cpu, Reg16};

impl Cpu {
    pub(super) fn exec_inc8<B: Bus>(&mut self, bus: &mut B, target: Operand) {
        let value = self.read_operand(bus, target);
        let result = self.alu_inc8(value);
        self.write_operand(bus, target, result);
    }

    pub(super) fn exec_dec8<B: Bus>(&mut self, bus: &mut B, target: Operand) {
        let value = self.read_operand(bus, target);
        let result = self.alu_dec8(value);
        self.write_operand(bus, target, result);
    }

    /// 16-bit INC/DEC touch no flags and take one internal cycle.
    pub(super) fn exec_inc16<B: Bus>(&mut self, bus: &mut B, pair: Reg16) {
        let value = self.regs.get16(pair).wrapping_add(1);
        self.regs.set16(pair, value);
        self.idle_cycle(bus);
    }

    pub(super) fn exec_dec16<B: Bus>(&mut self, bus: &mut B, pair: Reg16) {
        let value = self.regs.get16(pair).wrapping_sub(1);
        self.regs.set16(pair, value);
        self.idle_cycle(bus);
    }
}
