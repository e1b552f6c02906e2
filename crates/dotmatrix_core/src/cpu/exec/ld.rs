use crate::cpu::decode::Operand;
use crate::cpu::{Bus, Cpu, Reg16};

impl Cpu {
    /// Every 8-bit transfer, including the (HL±), LDH and (a16) forms.
    pub(super) fn exec_ld<B: Bus>(&mut self, bus: &mut B, dst: Operand, src: Operand) {
        let value = self.read_operand(bus, src);
        self.write_operand(bus, dst, value);
    }

    pub(super) fn exec_ld_rr_d16<B: Bus>(&mut self, bus: &mut B, pair: Reg16) {
        let value = self.fetch16(bus);
        self.regs.set16(pair, value);
    }

    /// LD (a16), SP: low byte first.
    pub(super) fn exec_ld_a16_sp<B: Bus>(&mut self, bus: &mut B) {
        let addr = self.fetch16(bus);
        let [lo, hi] = self.regs.sp.to_le_bytes();
        self.write_cycle(bus, addr, lo);
        self.write_cycle(bus, addr.wrapping_add(1), hi);
    }

    pub(super) fn exec_ld_sp_hl<B: Bus>(&mut self, bus: &mut B) {
        self.regs.sp = self.regs.hl();
        self.idle_cycle(bus);
    }

    pub(super) fn exec_ld_hl_sp_r8<B: Bus>(&mut self, bus: &mut B) {
        let imm = self.fetch8(bus);
        let value = self.alu_add16_signed(self.regs.sp, imm);
        self.regs.set_hl(value);
        self.idle_cycle(bus);
    }
}
