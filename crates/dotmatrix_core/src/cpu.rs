//! Sharp LR35902 CPU core.
//!
//! The CPU is generic over a [`Bus`]; every memory access and every internal
//! delay is paired with one `Bus::tick_mcycle` call, so the machine around it
//! advances at M-cycle granularity while an instruction executes.

mod alu;
mod bus;
mod cb;
pub mod decode;
mod exec;
mod helpers;
mod init;
mod interrupts;
mod regs;
mod step;

pub use bus::Bus;
pub use decode::{decode_at, AluOp, Cond, FlagRule, Op, Operand, ShiftOp};
pub use regs::{Flag, Reg16, Reg8, Registers};

/// Execution state of the core between instructions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CpuState {
    Running,
    /// HALT: no fetches until IF ∧ IE becomes non-zero.
    Halted,
    /// STOP: modelled like HALT, with the clock still running.
    Stopped,
    /// An undefined opcode was executed; the core never fetches again.
    Locked { opcode: u8, pc: u16 },
}

/// Game Boy CPU core.
#[derive(Clone, Debug)]
pub struct Cpu {
    pub regs: Registers,
    pub ime: bool,
    state: CpuState,
    halt_bug: bool,
    ime_enable_pending: bool,
    ime_enable_delay: bool,
    /// M-cycles consumed by the step in progress.
    step_mcycles: u32,
}

impl Cpu {
    #[inline]
    pub fn get_flag(&self, flag: Flag) -> bool {
        let bit = flag as u8;
        (self.regs.f & (1 << bit)) != 0
    }

    #[inline]
    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        let bit = flag as u8;
        if value {
            self.regs.f |= 1 << bit;
        } else {
            self.regs.f &= !(1 << bit);
        }
    }

    #[inline]
    pub fn clear_flags(&mut self) {
        self.regs.f = 0;
    }

    #[inline]
    pub fn state(&self) -> CpuState {
        self.state
    }

    #[inline]
    pub fn is_halted(&self) -> bool {
        matches!(self.state, CpuState::Halted | CpuState::Stopped)
    }

    /// True once an undefined opcode has locked the core.
    #[inline]
    pub fn is_locked(&self) -> bool {
        matches!(self.state, CpuState::Locked { .. })
    }

    /// True when the HALT bug is armed: the next opcode fetch will not
    /// advance PC.
    #[inline]
    pub fn halt_bug_pending(&self) -> bool {
        self.halt_bug
    }
}
