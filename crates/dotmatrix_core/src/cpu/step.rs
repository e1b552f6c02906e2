use super::{decode, Bus, Cpu, CpuState};
use crate::{Error, Result};

impl Cpu {
    /// Run one instruction, one interrupt dispatch, or one idle M-cycle
    /// while halted. Returns the M-cycles consumed.
    ///
    /// An undefined opcode locks the core: this call and every later one
    /// return [`Error::IllegalOpcode`] without touching the bus.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> Result<u32> {
        self.step_mcycles = 0;

        match self.state {
            CpuState::Locked { opcode, pc } => return Err(Error::IllegalOpcode { opcode, pc }),
            CpuState::Halted | CpuState::Stopped => {
                if bus.pending_interrupts() == 0 {
                    self.idle_cycle(bus);
                    return Ok(self.step_mcycles);
                }
                // Wake up. With IME=0 execution simply resumes.
                self.state = CpuState::Running;
            }
            CpuState::Running => {}
        }

        if self.ime && bus.pending_interrupts() != 0 {
            self.service_interrupt(bus);
            return Ok(self.step_mcycles);
        }

        let pc = self.regs.pc;
        let opcode = self.fetch8(bus);
        let Some(op) = decode::base(opcode) else {
            log::error!(
                "illegal opcode 0x{opcode:02X} at 0x{pc:04X} \
                 (AF={:04X} BC={:04X} DE={:04X} HL={:04X} SP={:04X})",
                self.regs.af(),
                self.regs.bc(),
                self.regs.de(),
                self.regs.hl(),
                self.regs.sp
            );
            self.state = CpuState::Locked { opcode, pc };
            return Err(Error::IllegalOpcode { opcode, pc });
        };

        log::trace!("0x{pc:04X}: {op}");
        self.execute(bus, op);
        self.apply_ime_delay();
        Ok(self.step_mcycles)
    }
}
