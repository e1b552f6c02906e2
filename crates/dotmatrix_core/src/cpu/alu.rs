use super::decode::{AluOp, ShiftOp};
use super::{Cpu, Flag};

/// 8-bit add with carry-in. Returns `(result, half_carry, carry)`.
#[inline]
fn adc(a: u8, b: u8, carry_in: bool) -> (u8, bool, bool) {
    let c = carry_in as u8;
    let half = (a & 0x0F) + (b & 0x0F) + c > 0x0F;
    let full = a as u16 + b as u16 + c as u16;
    (full as u8, half, full > 0xFF)
}

/// 8-bit subtract with borrow, expressed as `a + !b + !borrow`.
///
/// The adder's carries are the complement of the borrows, so H and C come
/// back inverted.
#[inline]
fn sbc(a: u8, b: u8, borrow_in: bool) -> (u8, bool, bool) {
    let (result, half, carry) = adc(a, !b, !borrow_in);
    (result, !half, !carry)
}

impl Cpu {
    /// Apply one of the eight accumulator operations (`ADD` .. `CP`).
    pub(super) fn alu_op(&mut self, op: AluOp, value: u8) {
        let a = self.regs.a;
        let carry = self.get_flag(Flag::C);
        let (result, n, h, c) = match op {
            AluOp::Add => {
                let (r, h, c) = adc(a, value, false);
                (r, false, h, c)
            }
            AluOp::Adc => {
                let (r, h, c) = adc(a, value, carry);
                (r, false, h, c)
            }
            AluOp::Sub | AluOp::Cp => {
                let (r, h, c) = sbc(a, value, false);
                (r, true, h, c)
            }
            AluOp::Sbc => {
                let (r, h, c) = sbc(a, value, carry);
                (r, true, h, c)
            }
            AluOp::And => (a & value, false, true, false),
            AluOp::Xor => (a ^ value, false, false, false),
            AluOp::Or => (a | value, false, false, false),
        };

        if op != AluOp::Cp {
            self.regs.a = result;
        }
        self.clear_flags();
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, n);
        self.set_flag(Flag::H, h);
        self.set_flag(Flag::C, c);
    }

    /// Decimal adjust accumulator after BCD addition/subtraction.
    ///
    /// Uses C, H, N and A to compute a correction value. Updates A, Z, H, C
    /// and leaves N unchanged.
    pub(super) fn alu_daa(&mut self) {
        let mut a = self.regs.a;
        let mut adjust: u8 = if self.get_flag(Flag::C) { 0x60 } else { 0x00 };
        if self.get_flag(Flag::H) {
            adjust |= 0x06;
        }

        if !self.get_flag(Flag::N) {
            if (a & 0x0F) > 0x09 {
                adjust |= 0x06;
            }
            if a > 0x99 {
                adjust |= 0x60;
            }
            a = a.wrapping_add(adjust);
        } else {
            a = a.wrapping_sub(adjust);
        }

        self.set_flag(Flag::C, adjust >= 0x60);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::Z, a == 0);
        self.regs.a = a;
    }

    /// INC r / INC (HL): Z, N, H updated; C preserved.
    #[inline]
    pub(super) fn alu_inc8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, (value & 0x0F) == 0x0F);
        result
    }

    /// DEC r / DEC (HL): Z, N, H updated; C preserved.
    #[inline]
    pub(super) fn alu_dec8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, true);
        self.set_flag(Flag::H, (value & 0x0F) == 0);
        result
    }

    /// `ADD HL,rr`: Z unaffected, N cleared, H from bit 11, C from bit 15.
    #[inline]
    pub(super) fn alu_add16_hl(&mut self, value: u16) {
        let hl = self.regs.hl();
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, (hl & 0x0FFF) + (value & 0x0FFF) > 0x0FFF);
        self.set_flag(Flag::C, hl as u32 + value as u32 > 0xFFFF);
        self.regs.set_hl(hl.wrapping_add(value));
    }

    /// Signed 8-bit offset added to a 16-bit base, as used by
    /// `ADD SP,r8` and `LD HL,SP+r8`.
    ///
    /// Z and N are cleared; H and C come from the unsigned low-byte add.
    #[inline]
    pub(super) fn alu_add16_signed(&mut self, base: u16, imm8: u8) -> u16 {
        let offset = imm8 as i8 as i16 as u16;
        self.set_flag(Flag::Z, false);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, (base & 0x000F) + (offset & 0x000F) > 0x000F);
        self.set_flag(Flag::C, (base & 0x00FF) + (offset & 0x00FF) > 0x00FF);
        base.wrapping_add(offset)
    }

    /// Rotate/shift/swap shared by the CB page and the accumulator rotates.
    ///
    /// Sets Z from the result, clears N and H, and sets C from the bit
    /// shifted out (SWAP clears C).
    pub(super) fn alu_shift(&mut self, op: ShiftOp, value: u8) -> u8 {
        let carry_in = self.get_flag(Flag::C) as u8;
        let (result, carry) = match op {
            ShiftOp::Rlc => (value.rotate_left(1), value & 0x80 != 0),
            ShiftOp::Rrc => (value.rotate_right(1), value & 0x01 != 0),
            ShiftOp::Rl => ((value << 1) | carry_in, value & 0x80 != 0),
            ShiftOp::Rr => ((value >> 1) | (carry_in << 7), value & 0x01 != 0),
            ShiftOp::Sla => (value << 1, value & 0x80 != 0),
            ShiftOp::Sra => ((value >> 1) | (value & 0x80), value & 0x01 != 0),
            ShiftOp::Swap => (value.rotate_left(4), false),
            ShiftOp::Srl => (value >> 1, value & 0x01 != 0),
        };

        self.clear_flags();
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::C, carry);
        result
    }
}
