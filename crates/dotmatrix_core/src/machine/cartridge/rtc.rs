/// T-cycles per RTC second (the DMG master clock).
pub(super) const RTC_CYCLES_PER_SECOND: u32 = 4_194_304;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct RtcRegisters {
    seconds: u8,
    minutes: u8,
    hours: u8,
    /// 9-bit day counter.
    days: u16,
    halt: bool,
    carry: bool,
}

impl RtcRegisters {
    /// DH: day bit 8, halt (bit 6) and day carry (bit 7).
    fn control_byte(&self) -> u8 {
        let mut out = ((self.days >> 8) as u8) & 0x01;
        if self.halt {
            out |= 0x40;
        }
        if self.carry {
            out |= 0x80;
        }
        out
    }
}

/// MBC3 real-time clock, driven by emulated time only.
#[derive(Clone, Debug, Default)]
pub(super) struct Rtc {
    live: RtcRegisters,
    latched: RtcRegisters,
    subsecond_cycles: u32,
}

impl Rtc {
    pub(super) fn latch(&mut self) {
        self.latched = self.live;
        log::debug!("MBC3 RTC latched: {:?}", self.latched);
    }

    /// Read register 0x08..=0x0C from the latched copy.
    pub(super) fn read(&self, reg: u8) -> u8 {
        match reg {
            0x08 => self.latched.seconds & 0x3F,
            0x09 => self.latched.minutes & 0x3F,
            0x0A => self.latched.hours & 0x1F,
            0x0B => (self.latched.days & 0x00FF) as u8,
            0x0C => self.latched.control_byte(),
            _ => 0xFF,
        }
    }

    /// Write register 0x08..=0x0C of the live clock.
    pub(super) fn write(&mut self, reg: u8, value: u8) {
        match reg {
            0x08 => {
                self.live.seconds = value & 0x3F;
                self.subsecond_cycles = 0;
            }
            0x09 => self.live.minutes = value & 0x3F,
            0x0A => self.live.hours = value & 0x1F,
            0x0B => self.live.days = (self.live.days & 0x0100) | value as u16,
            0x0C => {
                self.live.days = (self.live.days & 0x00FF) | (((value & 0x01) as u16) << 8);
                self.live.halt = value & 0x40 != 0;
                self.live.carry = value & 0x80 != 0;
            }
            _ => {}
        }
    }

    pub(super) fn tick(&mut self, tcycles: u32) {
        if self.live.halt {
            return;
        }
        self.subsecond_cycles += tcycles;
        while self.subsecond_cycles >= RTC_CYCLES_PER_SECOND {
            self.subsecond_cycles -= RTC_CYCLES_PER_SECOND;
            self.second_tick();
        }
    }

    /// Counters only carry when they hit their natural limit; out-of-range
    /// values written by software wrap at the register width instead.
    fn second_tick(&mut self) {
        self.live.seconds = (self.live.seconds + 1) & 0x3F;
        if self.live.seconds == 60 {
            self.live.seconds = 0;
            self.minute_tick();
        }
    }

    fn minute_tick(&mut self) {
        self.live.minutes = (self.live.minutes + 1) & 0x3F;
        if self.live.minutes == 60 {
            self.live.minutes = 0;
            self.hour_tick();
        }
    }

    fn hour_tick(&mut self) {
        self.live.hours = (self.live.hours + 1) & 0x1F;
        if self.live.hours == 24 {
            self.live.hours = 0;
            self.day_tick();
        }
    }

    fn day_tick(&mut self) {
        if self.live.days >= 0x01FF {
            self.live.days = 0;
            self.live.carry = true;
        } else {
            self.live.days += 1;
        }
    }
}
