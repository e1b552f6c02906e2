//! APU register file.
//!
//! No audio is synthesised. The registers, wave RAM and NR52 power switch
//! behave as on DMG, and the four channel status bits follow trigger, DAC
//! and length-counter state so software polling NR52 sees sane values.

/// Bits that always read back as 1, indexed from 0xFF10.
const READ_MASKS: [u8; 0x17] = [
    0x80, 0x3F, 0x00, 0xFF, 0xBF, // NR10-NR14
    0xFF, 0x3F, 0x00, 0xFF, 0xBF, // unused, NR21-NR24
    0x7F, 0xFF, 0x9F, 0xFF, 0xBF, // NR30-NR34
    0xFF, 0xFF, 0x00, 0x00, 0xBF, // unused, NR41-NR44
    0x00, 0x00, 0x70, // NR50, NR51, NR52
];

/// T-cycles per frame sequencer step (512 Hz).
const FRAME_SEQUENCER_PERIOD: u32 = 8192;

#[derive(Clone, Copy, Debug, Default)]
struct LengthCounter {
    enabled: bool,
    remaining: u16,
}

impl LengthCounter {
    /// Returns true when the counter just ran out.
    fn clock(&mut self) -> bool {
        if self.enabled && self.remaining > 0 {
            self.remaining -= 1;
            return self.remaining == 0;
        }
        false
    }
}

pub(crate) struct Apu {
    regs: [u8; 0x17],
    wave_ram: [u8; 0x10],
    powered: bool,
    /// Channel status bits as reported in NR52[3:0].
    active: u8,
    lengths: [LengthCounter; 4],
    sequencer_cycles: u32,
    sequencer_step: u8,
}

impl Apu {
    pub(crate) fn new() -> Self {
        let mut apu = Self {
            regs: [0; 0x17],
            wave_ram: [0; 0x10],
            powered: true,
            active: 0x01,
            lengths: [LengthCounter::default(); 4],
            sequencer_cycles: 0,
            sequencer_step: 0,
        };
        // Post-boot values.
        for (addr, value) in [
            (0xFF10, 0x80),
            (0xFF11, 0xBF),
            (0xFF12, 0xF3),
            (0xFF13, 0xFF),
            (0xFF14, 0xBF),
            (0xFF16, 0x3F),
            (0xFF17, 0x00),
            (0xFF18, 0xFF),
            (0xFF19, 0xBF),
            (0xFF1A, 0x7F),
            (0xFF1B, 0xFF),
            (0xFF1C, 0x9F),
            (0xFF1D, 0xFF),
            (0xFF1E, 0xBF),
            (0xFF20, 0xFF),
            (0xFF21, 0x00),
            (0xFF22, 0x00),
            (0xFF23, 0xBF),
            (0xFF24, 0x77),
            (0xFF25, 0xF3),
        ] {
            apu.regs[(addr - 0xFF10) as usize] = value;
        }
        apu
    }

    pub(crate) fn read(&self, addr: u16) -> u8 {
        match addr {
            0xFF26 => {
                let power = if self.powered { 0x80 } else { 0 };
                power | 0x70 | self.active
            }
            0xFF10..=0xFF25 => {
                let index = (addr - 0xFF10) as usize;
                self.regs[index] | READ_MASKS[index]
            }
            0xFF30..=0xFF3F => self.wave_ram[(addr - 0xFF30) as usize],
            _ => 0xFF,
        }
    }

    pub(crate) fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0xFF26 => self.write_nr52(value),
            0xFF30..=0xFF3F => self.wave_ram[(addr - 0xFF30) as usize] = value,
            0xFF10..=0xFF25 if self.powered => {
                self.regs[(addr - 0xFF10) as usize] = value;
                self.on_register_write(addr, value);
            }
            _ => {}
        }
    }

    fn write_nr52(&mut self, value: u8) {
        let on = value & 0x80 != 0;
        if self.powered && !on {
            log::debug!("APU powered off");
            self.regs.fill(0);
            self.active = 0;
            self.lengths = [LengthCounter::default(); 4];
        } else if !self.powered && on {
            self.sequencer_cycles = 0;
            self.sequencer_step = 0;
        }
        self.powered = on;
    }

    fn reg(&self, addr: u16) -> u8 {
        self.regs[(addr - 0xFF10) as usize]
    }

    fn dac_enabled(&self, channel: usize) -> bool {
        match channel {
            0 => self.reg(0xFF12) & 0xF8 != 0,
            1 => self.reg(0xFF17) & 0xF8 != 0,
            2 => self.reg(0xFF1A) & 0x80 != 0,
            _ => self.reg(0xFF21) & 0xF8 != 0,
        }
    }

    fn on_register_write(&mut self, addr: u16, value: u8) {
        match addr {
            0xFF11 => self.lengths[0].remaining = 64 - (value & 0x3F) as u16,
            0xFF16 => self.lengths[1].remaining = 64 - (value & 0x3F) as u16,
            0xFF1B => self.lengths[2].remaining = 256 - value as u16,
            0xFF20 => self.lengths[3].remaining = 64 - (value & 0x3F) as u16,
            0xFF12 | 0xFF17 | 0xFF1A | 0xFF21 => {
                let channel = match addr {
                    0xFF12 => 0,
                    0xFF17 => 1,
                    0xFF1A => 2,
                    _ => 3,
                };
                if !self.dac_enabled(channel) {
                    self.active &= !(1 << channel);
                }
            }
            0xFF14 => self.write_control(0, value),
            0xFF19 => self.write_control(1, value),
            0xFF1E => self.write_control(2, value),
            0xFF23 => self.write_control(3, value),
            _ => {}
        }
    }

    /// NRx4: length enable in bit 6, trigger in bit 7.
    fn write_control(&mut self, channel: usize, value: u8) {
        let length = &mut self.lengths[channel];
        length.enabled = value & 0x40 != 0;
        if value & 0x80 == 0 {
            return;
        }
        if length.remaining == 0 {
            length.remaining = if channel == 2 { 256 } else { 64 };
        }
        if self.dac_enabled(channel) {
            self.active |= 1 << channel;
        }
    }

    /// Advance by `tcycles` T-cycles.
    pub(crate) fn tick(&mut self, tcycles: u32) {
        if !self.powered {
            return;
        }
        self.sequencer_cycles += tcycles;
        while self.sequencer_cycles >= FRAME_SEQUENCER_PERIOD {
            self.sequencer_cycles -= FRAME_SEQUENCER_PERIOD;
            // Length counters run on even steps (256 Hz).
            if self.sequencer_step % 2 == 0 {
                for channel in 0..4 {
                    if self.lengths[channel].clock() {
                        self.active &= !(1 << channel);
                    }
                }
            }
            self.sequencer_step = (self.sequencer_step + 1) % 8;
        }
    }
}
