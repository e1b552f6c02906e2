//! Opcode descriptors.
//!
//! Both opcode pages are decoded once, at compile time, into tables of
//! [`Op`] values. The executor dispatches on the descriptor, and the same
//! descriptor answers length, timing and flag-effect queries for tooling
//! and tests.

use std::fmt;

use super::{Bus, Reg16, Reg8};

/// Source or destination of an 8-bit transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    Reg(Reg8),
    /// `(HL)`
    HlIndirect,
    /// `d8`
    Imm8,
    /// `(BC)` or `(DE)`
    Indirect(Reg16),
    /// `(HL+)`
    HlIncrement,
    /// `(HL-)`
    HlDecrement,
    /// `(a16)`
    Absolute,
    /// `(FF00+a8)`
    HighImm,
    /// `(FF00+C)`
    HighC,
}

impl Operand {
    /// Extra bytes this operand pulls from the instruction stream.
    pub const fn immediate_bytes(self) -> u8 {
        match self {
            Operand::Imm8 | Operand::HighImm => 1,
            Operand::Absolute => 2,
            _ => 0,
        }
    }

    /// M-cycles spent fetching immediates and accessing memory for this
    /// operand, on top of the opcode fetch.
    pub const fn access_cycles(self) -> u8 {
        match self {
            Operand::Reg(_) => 0,
            Operand::Imm8 | Operand::HlIndirect | Operand::Indirect(_) => 1,
            Operand::HlIncrement | Operand::HlDecrement | Operand::HighC => 1,
            Operand::HighImm => 2,
            Operand::Absolute => 3,
        }
    }

    pub const fn is_memory(self) -> bool {
        !matches!(self, Operand::Reg(_) | Operand::Imm8)
    }
}

/// Branch condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cond {
    NZ,
    Z,
    NC,
    C,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AluOp {
    Add,
    Adc,
    Sub,
    Sbc,
    And,
    Xor,
    Or,
    Cp,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShiftOp {
    Rlc,
    Rrc,
    Rl,
    Rr,
    Sla,
    Sra,
    Swap,
    Srl,
}

/// How an instruction treats one flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlagRule {
    Unchanged,
    Reset,
    Set,
    Computed,
}

/// One decoded instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Nop,
    Stop,
    Halt,
    Di,
    Ei,
    Daa,
    Cpl,
    Scf,
    Ccf,
    /// 0xCB: the next byte selects an entry of the prefixed page.
    Prefix,
    /// `LD dst, src`
    Ld(Operand, Operand),
    /// `LD rr, d16`
    LdImm16(Reg16),
    /// `LD (a16), SP`
    LdAbsSp,
    /// `LD SP, HL`
    LdSpHl,
    /// `LD HL, SP+r8`
    LdHlSpOffset,
    Push(Reg16),
    Pop(Reg16),
    Alu(AluOp, Operand),
    Inc(Operand),
    Dec(Operand),
    Inc16(Reg16),
    Dec16(Reg16),
    AddHl(Reg16),
    AddSpOffset,
    /// RLCA, RRCA, RLA, RRA
    RotateA(ShiftOp),
    Shift(ShiftOp, Operand),
    Bit(u8, Operand),
    Res(u8, Operand),
    Set(u8, Operand),
    Jp(Option<Cond>),
    JpHl,
    Jr(Option<Cond>),
    Call(Option<Cond>),
    Ret(Option<Cond>),
    Reti,
    Rst(u8),
}

const R8: [Operand; 8] = [
    Operand::Reg(Reg8::B),
    Operand::Reg(Reg8::C),
    Operand::Reg(Reg8::D),
    Operand::Reg(Reg8::E),
    Operand::Reg(Reg8::H),
    Operand::Reg(Reg8::L),
    Operand::HlIndirect,
    Operand::Reg(Reg8::A),
];
const RP: [Reg16; 4] = [Reg16::BC, Reg16::DE, Reg16::HL, Reg16::SP];
const RP2: [Reg16; 4] = [Reg16::BC, Reg16::DE, Reg16::HL, Reg16::AF];
const CONDS: [Cond; 4] = [Cond::NZ, Cond::Z, Cond::NC, Cond::C];
const ALU: [AluOp; 8] = [
    AluOp::Add,
    AluOp::Adc,
    AluOp::Sub,
    AluOp::Sbc,
    AluOp::And,
    AluOp::Xor,
    AluOp::Or,
    AluOp::Cp,
];
const SHIFTS: [ShiftOp; 8] = [
    ShiftOp::Rlc,
    ShiftOp::Rrc,
    ShiftOp::Rl,
    ShiftOp::Rr,
    ShiftOp::Sla,
    ShiftOp::Sra,
    ShiftOp::Swap,
    ShiftOp::Srl,
];

const A: Operand = Operand::Reg(Reg8::A);

/// Decode one unprefixed opcode from its `x/y/z/p/q` fields.
const fn decode_base(opcode: u8) -> Option<Op> {
    let x = opcode >> 6;
    let y = ((opcode >> 3) & 0x07) as usize;
    let z = (opcode & 0x07) as usize;
    let p = y >> 1;
    let q = y & 1;

    let op = match x {
        0 => match z {
            0 => match y {
                0 => Op::Nop,
                1 => Op::LdAbsSp,
                2 => Op::Stop,
                3 => Op::Jr(None),
                _ => Op::Jr(Some(CONDS[y - 4])),
            },
            1 => {
                if q == 0 {
                    Op::LdImm16(RP[p])
                } else {
                    Op::AddHl(RP[p])
                }
            }
            2 => {
                let mem = match p {
                    0 => Operand::Indirect(Reg16::BC),
                    1 => Operand::Indirect(Reg16::DE),
                    2 => Operand::HlIncrement,
                    _ => Operand::HlDecrement,
                };
                if q == 0 {
                    Op::Ld(mem, A)
                } else {
                    Op::Ld(A, mem)
                }
            }
            3 => {
                if q == 0 {
                    Op::Inc16(RP[p])
                } else {
                    Op::Dec16(RP[p])
                }
            }
            4 => Op::Inc(R8[y]),
            5 => Op::Dec(R8[y]),
            6 => Op::Ld(R8[y], Operand::Imm8),
            _ => match y {
                0..=3 => Op::RotateA(SHIFTS[y]),
                4 => Op::Daa,
                5 => Op::Cpl,
                6 => Op::Scf,
                _ => Op::Ccf,
            },
        },
        1 => {
            if opcode == 0x76 {
                Op::Halt
            } else {
                Op::Ld(R8[y], R8[z])
            }
        }
        2 => Op::Alu(ALU[y], R8[z]),
        _ => match z {
            0 => match y {
                0..=3 => Op::Ret(Some(CONDS[y])),
                4 => Op::Ld(Operand::HighImm, A),
                5 => Op::AddSpOffset,
                6 => Op::Ld(A, Operand::HighImm),
                _ => Op::LdHlSpOffset,
            },
            1 => {
                if q == 0 {
                    Op::Pop(RP2[p])
                } else {
                    match p {
                        0 => Op::Ret(None),
                        1 => Op::Reti,
                        2 => Op::JpHl,
                        _ => Op::LdSpHl,
                    }
                }
            }
            2 => match y {
                0..=3 => Op::Jp(Some(CONDS[y])),
                4 => Op::Ld(Operand::HighC, A),
                5 => Op::Ld(Operand::Absolute, A),
                6 => Op::Ld(A, Operand::HighC),
                _ => Op::Ld(A, Operand::Absolute),
            },
            3 => match y {
                0 => Op::Jp(None),
                1 => Op::Prefix,
                6 => Op::Di,
                7 => Op::Ei,
                _ => return None,
            },
            4 => match y {
                0..=3 => Op::Call(Some(CONDS[y])),
                _ => return None,
            },
            5 => {
                if q == 0 {
                    Op::Push(RP2[p])
                } else if p == 0 {
                    Op::Call(None)
                } else {
                    return None;
                }
            }
            6 => Op::Alu(ALU[y], Operand::Imm8),
            _ => Op::Rst((y as u8) * 8),
        },
    };
    Some(op)
}

const fn decode_prefixed(opcode: u8) -> Op {
    let y = (opcode >> 3) & 0x07;
    let operand = R8[(opcode & 0x07) as usize];
    match opcode >> 6 {
        0 => Op::Shift(SHIFTS[y as usize], operand),
        1 => Op::Bit(y, operand),
        2 => Op::Res(y, operand),
        _ => Op::Set(y, operand),
    }
}

static BASE: [Option<Op>; 256] = {
    let mut table = [None; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = decode_base(i as u8);
        i += 1;
    }
    table
};

static PREFIXED: [Op; 256] = {
    let mut table = [Op::Nop; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = decode_prefixed(i as u8);
        i += 1;
    }
    table
};

/// Descriptor for an unprefixed opcode, or `None` for the eleven undefined
/// opcodes (0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB, 0xEC, 0xED, 0xF4, 0xFC, 0xFD).
#[inline]
pub fn base(opcode: u8) -> Option<Op> {
    BASE[opcode as usize]
}

/// Descriptor for the byte following a 0xCB prefix. Every value is defined.
#[inline]
pub fn prefixed(opcode: u8) -> Op {
    PREFIXED[opcode as usize]
}

/// Decode the instruction at `pc` without advancing time.
///
/// The prefix byte is resolved, so the result is never [`Op::Prefix`].
pub fn decode_at<B: Bus>(bus: &mut B, pc: u16) -> Option<Op> {
    match base(bus.read8(pc))? {
        Op::Prefix => Some(prefixed(bus.read8(pc.wrapping_add(1)))),
        op => Some(op),
    }
}

impl Op {
    /// Instruction length in bytes, including opcode, prefix and immediates.
    pub const fn length(self) -> u8 {
        match self {
            Op::Ld(dst, src) => 1 + dst.immediate_bytes() + src.immediate_bytes(),
            Op::Alu(_, src) => 1 + src.immediate_bytes(),
            Op::Stop | Op::Prefix | Op::LdHlSpOffset | Op::AddSpOffset | Op::Jr(_) => 2,
            Op::Shift(..) | Op::Bit(..) | Op::Res(..) | Op::Set(..) => 2,
            Op::LdImm16(_) | Op::LdAbsSp | Op::Jp(_) | Op::Call(_) => 3,
            _ => 1,
        }
    }

    /// M-cycle cost as `(not_taken, taken)`. Both values are equal for
    /// unconditional instructions.
    ///
    /// Prefixed instructions include the fetch of the 0xCB byte; the
    /// [`Op::Prefix`] trampoline itself reports only that fetch.
    pub const fn cycles(self) -> (u8, u8) {
        let fixed = match self {
            Op::Nop | Op::Halt | Op::Di | Op::Ei | Op::Daa | Op::Cpl | Op::Scf | Op::Ccf => 1,
            Op::RotateA(_) | Op::JpHl | Op::Prefix => 1,
            Op::Stop | Op::LdSpHl | Op::Inc16(_) | Op::Dec16(_) | Op::AddHl(_) => 2,
            Op::LdImm16(_) | Op::LdHlSpOffset | Op::Pop(_) => 3,
            Op::Push(_) | Op::AddSpOffset | Op::Reti | Op::Rst(_) => 4,
            Op::LdAbsSp => 5,
            Op::Ld(dst, src) => 1 + dst.access_cycles() + src.access_cycles(),
            Op::Alu(_, src) => 1 + src.access_cycles(),
            Op::Inc(target) | Op::Dec(target) => {
                if target.is_memory() {
                    3
                } else {
                    1
                }
            }
            Op::Shift(_, target) | Op::Res(_, target) | Op::Set(_, target) => {
                if target.is_memory() {
                    4
                } else {
                    2
                }
            }
            Op::Bit(_, target) => {
                if target.is_memory() {
                    3
                } else {
                    2
                }
            }
            Op::Jp(None) => 4,
            Op::Jp(Some(_)) => return (3, 4),
            Op::Jr(None) => 3,
            Op::Jr(Some(_)) => return (2, 3),
            Op::Call(None) => 6,
            Op::Call(Some(_)) => return (3, 6),
            Op::Ret(None) => 4,
            Op::Ret(Some(_)) => return (2, 5),
        };
        (fixed, fixed)
    }

    /// Flag effects in `[Z, N, H, C]` order.
    pub const fn flags(self) -> [FlagRule; 4] {
        use FlagRule::{Computed as X, Reset as O, Set as I, Unchanged as U};
        match self {
            Op::Daa => [X, U, O, X],
            Op::Cpl => [U, I, I, U],
            Op::Scf => [U, O, O, I],
            Op::Ccf => [U, O, O, X],
            Op::Pop(Reg16::AF) | Op::Prefix => [X, X, X, X],
            Op::Alu(AluOp::Add | AluOp::Adc, _) => [X, O, X, X],
            Op::Alu(AluOp::Sub | AluOp::Sbc | AluOp::Cp, _) => [X, I, X, X],
            Op::Alu(AluOp::And, _) => [X, O, I, O],
            Op::Alu(AluOp::Xor | AluOp::Or, _) => [X, O, O, O],
            Op::Inc(_) => [X, O, X, U],
            Op::Dec(_) => [X, I, X, U],
            Op::AddHl(_) => [U, O, X, X],
            Op::AddSpOffset | Op::LdHlSpOffset => [O, O, X, X],
            Op::RotateA(_) => [O, O, O, X],
            Op::Shift(ShiftOp::Swap, _) => [X, O, O, O],
            Op::Shift(..) => [X, O, O, X],
            Op::Bit(..) => [X, O, I, U],
            _ => [U, U, U, U],
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Reg(reg) => write!(f, "{reg:?}"),
            Operand::HlIndirect => f.write_str("(HL)"),
            Operand::Imm8 => f.write_str("d8"),
            Operand::Indirect(pair) => write!(f, "({pair:?})"),
            Operand::HlIncrement => f.write_str("(HL+)"),
            Operand::HlDecrement => f.write_str("(HL-)"),
            Operand::Absolute => f.write_str("(a16)"),
            Operand::HighImm => f.write_str("(FF00+a8)"),
            Operand::HighC => f.write_str("(FF00+C)"),
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cond = |c: &Option<Cond>| match c {
            Some(c) => format!(" {c:?},"),
            None => String::new(),
        };
        match self {
            Op::Ld(dst, src) => write!(f, "LD {dst}, {src}"),
            Op::LdImm16(pair) => write!(f, "LD {pair:?}, d16"),
            Op::LdAbsSp => f.write_str("LD (a16), SP"),
            Op::LdSpHl => f.write_str("LD SP, HL"),
            Op::LdHlSpOffset => f.write_str("LD HL, SP+r8"),
            Op::Push(pair) => write!(f, "PUSH {pair:?}"),
            Op::Pop(pair) => write!(f, "POP {pair:?}"),
            Op::Alu(op, src) => write!(f, "{} A, {src}", format!("{op:?}").to_uppercase()),
            Op::Inc(target) => write!(f, "INC {target}"),
            Op::Dec(target) => write!(f, "DEC {target}"),
            Op::Inc16(pair) => write!(f, "INC {pair:?}"),
            Op::Dec16(pair) => write!(f, "DEC {pair:?}"),
            Op::AddHl(pair) => write!(f, "ADD HL, {pair:?}"),
            Op::AddSpOffset => f.write_str("ADD SP, r8"),
            Op::RotateA(op) => write!(f, "{}A", format!("{op:?}").to_uppercase()),
            Op::Shift(op, target) => write!(f, "{} {target}", format!("{op:?}").to_uppercase()),
            Op::Bit(bit, target) => write!(f, "BIT {bit}, {target}"),
            Op::Res(bit, target) => write!(f, "RES {bit}, {target}"),
            Op::Set(bit, target) => write!(f, "SET {bit}, {target}"),
            Op::Jp(c) => write!(f, "JP{} a16", cond(c)),
            Op::JpHl => f.write_str("JP HL"),
            Op::Jr(c) => write!(f, "JR{} r8", cond(c)),
            Op::Call(c) => write!(f, "CALL{} a16", cond(c)),
            Op::Ret(Some(c)) => write!(f, "RET {c:?}"),
            Op::Ret(None) => f.write_str("RET"),
            Op::Rst(vector) => write!(f, "RST {vector:02X}H"),
            other => write!(f, "{}", format!("{other:?}").to_uppercase()),
        }
    }
}
