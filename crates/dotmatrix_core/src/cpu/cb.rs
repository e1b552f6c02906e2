use super::decode::Op;
use super::{Bus, Cpu, Flag};

impl Cpu {
    /// Execute one entry of the 0xCB page. Both fetches have been charged.
    ///
    /// `BIT n,(HL)` only reads; the other memory forms read, modify and
    /// write back in consecutive cycles.
    pub(super) fn execute_prefixed<B: Bus>(&mut self, bus: &mut B, op: Op) {
        match op {
            Op::Shift(kind, target) => {
                let value = self.read_operand(bus, target);
                let result = self.alu_shift(kind, value);
                self.write_operand(bus, target, result);
            }
            Op::Bit(bit, target) => {
                let value = self.read_operand(bus, target);
                self.set_flag(Flag::Z, value & (1 << bit) == 0);
                self.set_flag(Flag::N, false);
                self.set_flag(Flag::H, true);
            }
            Op::Res(bit, target) => {
                let value = self.read_operand(bus, target);
                self.write_operand(bus, target, value & !(1 << bit));
            }
            Op::Set(bit, target) => {
                let value = self.read_operand(bus, target);
                self.write_operand(bus, target, value | (1 << bit));
            }
            other => log::warn!("not a prefixed instruction: {other:?}"),
        }
    }
}
