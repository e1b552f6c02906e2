use super::{Cpu, CpuState, Registers};

impl Cpu {
    /// Create a CPU in the documented DMG post-boot state.
    ///
    /// No boot ROM is executed; registers start as the DMG boot ROM leaves
    /// them right before jumping to the cartridge entry point at 0x0100.
    pub fn new() -> Self {
        let mut cpu = Self {
            regs: Registers::default(),
            ime: false,
            state: CpuState::Running,
            halt_bug: false,
            ime_enable_pending: false,
            ime_enable_delay: false,
            step_mcycles: 0,
        };
        cpu.reset();
        cpu
    }

    /// Return to the post-boot register state.
    pub fn reset(&mut self) {
        self.regs = Registers {
            a: 0x01,
            f: 0xB0,
            b: 0x00,
            c: 0x13,
            d: 0x00,
            e: 0xD8,
            h: 0x01,
            l: 0x4D,
            sp: 0xFFFE,
            pc: 0x0100,
        };
        self.ime = false;
        self.state = CpuState::Running;
        self.halt_bug = false;
        self.ime_enable_pending = false;
        self.ime_enable_delay = false;
        self.step_mcycles = 0;
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}
