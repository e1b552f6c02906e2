use crate::cpu::decode::{AluOp, Operand, ShiftOp};
use crate::cpu::{Bus, Cpu, Flag, Reg16};

impl Cpu {
    pub(super) fn exec_alu<B: Bus>(&mut self, bus: &mut B, kind: AluOp, src: Operand) {
        let value = self.read_operand(bus, src);
        self.alu_op(kind, value);
    }

    pub(super) fn exec_add_hl<B: Bus>(&mut self, bus: &mut B, pair: Reg16) {
        let value = self.regs.get16(pair);
        self.alu_add16_hl(value);
        self.idle_cycle(bus);
    }

    pub(super) fn exec_add_sp_r8<B: Bus>(&mut self, bus: &mut B) {
        let imm = self.fetch8(bus);
        self.regs.sp = self.alu_add16_signed(self.regs.sp, imm);
        self.idle_cycle(bus);
        self.idle_cycle(bus);
    }

    /// RLCA/RRCA/RLA/RRA: like the CB rotates on A, but Z is always cleared.
    pub(super) fn exec_rotate_a(&mut self, kind: ShiftOp) {
        self.regs.a = self.alu_shift(kind, self.regs.a);
        self.set_flag(Flag::Z, false);
    }

    pub(super) fn exec_cpl(&mut self) {
        self.regs.a = !self.regs.a;
        self.set_flag(Flag::N, true);
        self.set_flag(Flag::H, true);
    }

    pub(super) fn exec_scf(&mut self) {
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::C, true);
    }

    pub(super) fn exec_ccf(&mut self) {
        let carry = self.get_flag(Flag::C);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::C, !carry);
    }
}
