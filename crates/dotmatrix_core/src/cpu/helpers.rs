use super::decode::Operand;
use super::{Bus, Cpu};

impl Cpu {
    /// One bus read followed by one M-cycle of machine time.
    #[inline]
    pub(super) fn read_cycle<B: Bus>(&mut self, bus: &mut B, addr: u16) -> u8 {
        let value = bus.read8(addr);
        self.idle_cycle(bus);
        value
    }

    /// One bus write followed by one M-cycle of machine time.
    #[inline]
    pub(super) fn write_cycle<B: Bus>(&mut self, bus: &mut B, addr: u16, value: u8) {
        bus.write8(addr, value);
        self.idle_cycle(bus);
    }

    /// Internal delay: one M-cycle without a memory access.
    #[inline]
    pub(super) fn idle_cycle<B: Bus>(&mut self, bus: &mut B) {
        bus.tick_mcycle();
        self.step_mcycles += 1;
    }

    #[inline]
    pub(super) fn fetch8<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let value = self.read_cycle(bus, self.regs.pc);
        if self.halt_bug {
            // The first fetch after the HALT bug does not advance PC.
            self.halt_bug = false;
        } else {
            self.regs.pc = self.regs.pc.wrapping_add(1);
        }
        value
    }

    #[inline]
    pub(super) fn fetch16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let lo = self.fetch8(bus);
        let hi = self.fetch8(bus);
        u16::from_le_bytes([lo, hi])
    }

    /// Two write cycles: high byte at SP-1, then low byte at SP-2.
    #[inline]
    pub(super) fn push_u16<B: Bus>(&mut self, bus: &mut B, value: u16) {
        let [hi, lo] = value.to_be_bytes();
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        self.write_cycle(bus, self.regs.sp, hi);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        self.write_cycle(bus, self.regs.sp, lo);
    }

    #[inline]
    pub(super) fn pop_u16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let lo = self.read_cycle(bus, self.regs.sp);
        self.regs.sp = self.regs.sp.wrapping_add(1);
        let hi = self.read_cycle(bus, self.regs.sp);
        self.regs.sp = self.regs.sp.wrapping_add(1);
        u16::from_le_bytes([lo, hi])
    }

    /// Resolve a memory operand to its address, consuming any immediate
    /// bytes and applying the HL post-increment/decrement.
    ///
    /// Returns `None` for register and immediate operands.
    fn operand_address<B: Bus>(&mut self, bus: &mut B, operand: Operand) -> Option<u16> {
        let addr = match operand {
            Operand::Reg(_) | Operand::Imm8 => return None,
            Operand::HlIndirect => self.regs.hl(),
            Operand::Indirect(pair) => self.regs.get16(pair),
            Operand::HlIncrement => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_add(1));
                hl
            }
            Operand::HlDecrement => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_sub(1));
                hl
            }
            Operand::Absolute => self.fetch16(bus),
            Operand::HighImm => 0xFF00 | self.fetch8(bus) as u16,
            Operand::HighC => 0xFF00 | self.regs.c as u16,
        };
        Some(addr)
    }

    pub(super) fn read_operand<B: Bus>(&mut self, bus: &mut B, operand: Operand) -> u8 {
        match operand {
            Operand::Reg(reg) => self.regs.get(reg),
            Operand::Imm8 => self.fetch8(bus),
            _ => match self.operand_address(bus, operand) {
                Some(addr) => self.read_cycle(bus, addr),
                None => 0xFF,
            },
        }
    }

    pub(super) fn write_operand<B: Bus>(&mut self, bus: &mut B, operand: Operand, value: u8) {
        match operand {
            Operand::Reg(reg) => self.regs.set(reg, value),
            // Never produced as a destination by the decoder.
            Operand::Imm8 => {}
            _ => {
                if let Some(addr) = self.operand_address(bus, operand) {
                    self.write_cycle(bus, addr, value);
                }
            }
        }
    }
}
