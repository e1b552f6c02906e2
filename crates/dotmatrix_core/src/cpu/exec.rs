mod alu;
mod control;
mod incdec;
mod ld;
mod stack;
mod system;

use super::decode::{self, Op};
use super::{Bus, Cpu};

impl Cpu {
    /// Execute an already-fetched instruction.
    ///
    /// The opcode fetch has been charged by the caller; every access and
    /// internal delay here charges its own M-cycle through the helpers.
    pub(super) fn execute<B: Bus>(&mut self, bus: &mut B, op: Op) {
        match op {
            Op::Nop => {}
            Op::Prefix => {
                let cb = self.fetch8(bus);
                self.execute_prefixed(bus, decode::prefixed(cb));
            }

            Op::Ld(dst, src) => self.exec_ld(bus, dst, src),
            Op::LdImm16(pair) => self.exec_ld_rr_d16(bus, pair),
            Op::LdAbsSp => self.exec_ld_a16_sp(bus),
            Op::LdSpHl => self.exec_ld_sp_hl(bus),
            Op::LdHlSpOffset => self.exec_ld_hl_sp_r8(bus),

            Op::Push(pair) => self.exec_push(bus, pair),
            Op::Pop(pair) => self.exec_pop(bus, pair),

            Op::Alu(kind, src) => self.exec_alu(bus, kind, src),
            Op::AddHl(pair) => self.exec_add_hl(bus, pair),
            Op::AddSpOffset => self.exec_add_sp_r8(bus),
            Op::RotateA(kind) => self.exec_rotate_a(kind),
            Op::Daa => self.alu_daa(),
            Op::Cpl => self.exec_cpl(),
            Op::Scf => self.exec_scf(),
            Op::Ccf => self.exec_ccf(),

            Op::Inc(target) => self.exec_inc8(bus, target),
            Op::Dec(target) => self.exec_dec8(bus, target),
            Op::Inc16(pair) => self.exec_inc16(bus, pair),
            Op::Dec16(pair) => self.exec_dec16(bus, pair),

            Op::Jp(cond) => self.exec_jp(bus, cond),
            Op::JpHl => self.regs.pc = self.regs.hl(),
            Op::Jr(cond) => self.exec_jr(bus, cond),
            Op::Call(cond) => self.exec_call(bus, cond),
            Op::Ret(cond) => self.exec_ret(bus, cond),
            Op::Reti => self.exec_reti(bus),
            Op::Rst(vector) => self.exec_rst(bus, vector),

            Op::Halt => self.exec_halt(bus),
            Op::Stop => self.exec_stop(bus),
            Op::Di => self.exec_di(),
            Op::Ei => self.exec_ei(),

            Op::Shift(..) | Op::Bit(..) | Op::Res(..) | Op::Set(..) => {
                self.execute_prefixed(bus, op)
            }
        }
    }
}
