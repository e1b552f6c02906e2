use super::interrupts::{Interrupt, InterruptController};

/// SB/SC with no link partner.
///
/// Every byte the CPU starts shifting out is appended to `output`, which is
/// how test ROMs report their results. The host drains it with
/// `take_output`; past `OUTPUT_LIMIT` bytes the oldest half is dropped.
/// Internally clocked transfers finish at once and read back 0xFF as if
/// nothing was connected; externally clocked ones wait forever.
const OUTPUT_LIMIT: usize = 0x1_0000;

#[derive(Default)]
pub(crate) struct Serial {
    sb: u8,
    sc: u8,
    output: Vec<u8>,
}

impl Serial {
    pub(crate) fn read(&self, addr: u16) -> u8 {
        match addr {
            0xFF01 => self.sb,
            0xFF02 => self.sc | 0x7E,
            _ => 0xFF,
        }
    }

    pub(crate) fn write(&mut self, addr: u16, value: u8, irq: &mut InterruptController) {
        match addr {
            0xFF01 => self.sb = value,
            0xFF02 => {
                self.sc = value & 0x81;
                if self.sc & 0x80 == 0 {
                    return;
                }
                if self.output.len() == OUTPUT_LIMIT {
                    self.output.drain(..OUTPUT_LIMIT / 2);
                }
                self.output.push(self.sb);
                if self.sc & 0x01 != 0 {
                    self.sb = 0xFF;
                    self.sc &= !0x80;
                    irq.request(Interrupt::SERIAL);
                }
            }
            _ => {}
        }
    }

    /// Transfers complete on the write that starts them.
    #[inline]
    pub(crate) fn tick(&mut self) {}

    pub(crate) fn output(&self) -> &[u8] {
        &self.output
    }

    pub(crate) fn take_output(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.output)
    }
}
