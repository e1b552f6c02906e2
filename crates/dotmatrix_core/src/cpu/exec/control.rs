use crate::cpu::decode::Cond;
use crate::cpu::{Bus, Cpu, Flag};

impl Cpu {
    #[inline]
    fn condition(&self, cond: Option<Cond>) -> bool {
        match cond {
            None => true,
            Some(Cond::NZ) => !self.get_flag(Flag::Z),
            Some(Cond::Z) => self.get_flag(Flag::Z),
            Some(Cond::NC) => !self.get_flag(Flag::C),
            Some(Cond::C) => self.get_flag(Flag::C),
        }
    }

    pub(super) fn exec_jp<B: Bus>(&mut self, bus: &mut B, cond: Option<Cond>) {
        let addr = self.fetch16(bus);
        if self.condition(cond) {
            self.regs.pc = addr;
            self.idle_cycle(bus);
        }
    }

    /// The displacement is relative to the address after the operand.
    pub(super) fn exec_jr<B: Bus>(&mut self, bus: &mut B, cond: Option<Cond>) {
        let offset = self.fetch8(bus) as i8;
        if self.condition(cond) {
            self.regs.pc = self.regs.pc.wrapping_add(offset as i16 as u16);
            self.idle_cycle(bus);
        }
    }

    pub(super) fn exec_call<B: Bus>(&mut self, bus: &mut B, cond: Option<Cond>) {
        let addr = self.fetch16(bus);
        if self.condition(cond) {
            let ret = self.regs.pc;
            self.idle_cycle(bus);
            self.push_u16(bus, ret);
            self.regs.pc = addr;
        }
    }

    pub(super) fn exec_ret<B: Bus>(&mut self, bus: &mut B, cond: Option<Cond>) {
        if cond.is_some() {
            // Condition evaluation costs an extra cycle even when taken.
            self.idle_cycle(bus);
        }
        if self.condition(cond) {
            self.regs.pc = self.pop_u16(bus);
            self.idle_cycle(bus);
        }
    }

    /// RETI enables IME immediately, without the EI delay.
    pub(super) fn exec_reti<B: Bus>(&mut self, bus: &mut B) {
        self.regs.pc = self.pop_u16(bus);
        self.idle_cycle(bus);
        self.ime = true;
    }
}
