use super::super::Cpu;

impl Cpu {
    /// Advance the EI delay after an instruction has completed.
    #[inline]
    pub(in crate::cpu) fn apply_ime_delay(&mut self) {
        if self.ime_enable_delay {
            // Second boundary after EI: the instruction behind EI is done.
            self.ime = true;
            self.ime_enable_delay = false;
        } else if self.ime_enable_pending {
            // First boundary: EI itself just finished.
            self.ime_enable_pending = false;
            self.ime_enable_delay = true;
        }
    }
}
