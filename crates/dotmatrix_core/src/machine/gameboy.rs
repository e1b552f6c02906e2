use crate::cpu::Cpu;
use crate::{Result, FRAME_BYTES, MCYCLES_PER_FRAME};

use super::{cartridge::Cartridge, Buttons, GameBoyBus, Header};

/// A DMG Game Boy: CPU plus bus.
///
/// Nothing here blocks or spawns threads. The host drives time with
/// [`step_cycles`](Self::step_cycles) or [`step_frame`](Self::step_frame)
/// and reads the picture back with [`frame`](Self::frame).
pub struct GameBoy {
    pub cpu: Cpu,
    pub(crate) bus: GameBoyBus,
    /// M-cycles already run past the end of the previous `step_cycles`.
    overshoot: u64,
}

impl GameBoy {
    /// Build a machine around a cartridge image, in the post-boot state.
    pub fn new(rom: &[u8]) -> Result<Self> {
        let cartridge = Cartridge::new(rom)?;
        Ok(Self {
            cpu: Cpu::new(),
            bus: GameBoyBus::new(cartridge),
            overshoot: 0,
        })
    }

    pub fn press(&mut self, buttons: Buttons) {
        self.bus.joypad.press(buttons, &mut self.bus.interrupts);
    }

    pub fn release(&mut self, buttons: Buttons) {
        self.bus.joypad.release(buttons);
    }

    /// One CPU step; returns the M-cycles it took.
    pub fn step(&mut self) -> Result<u32> {
        self.cpu.step(&mut self.bus)
    }

    /// Advance by `mcycles` M-cycles.
    ///
    /// Instructions are never split, so a call can run up to one
    /// instruction past the target. That excess is taken off the next call.
    pub fn step_cycles(&mut self, mcycles: u64) -> Result<()> {
        if self.overshoot >= mcycles {
            self.overshoot -= mcycles;
            return Ok(());
        }
        let target = mcycles - self.overshoot;
        self.overshoot = 0;

        let mut ran = 0u64;
        while ran < target {
            ran += self.step()? as u64;
        }
        self.overshoot = ran - target;
        Ok(())
    }

    /// Run until the PPU finishes a frame, or one frame's worth of
    /// M-cycles if the LCD is off.
    pub fn step_frame(&mut self) -> Result<()> {
        let frame = self.bus.ppu.frames();
        let start = self.bus.cycles();
        while self.bus.ppu.frames() == frame && self.bus.cycles() - start < MCYCLES_PER_FRAME {
            self.step()?;
        }
        Ok(())
    }

    /// The last completed frame as 160×144 RGBA8, row-major.
    pub fn frame(&self) -> &[u8; FRAME_BYTES] {
        self.bus.ppu.frame()
    }

    /// Same pixels as [`frame`](Self::frame), as a slice.
    pub fn frame_buffer(&self) -> &[u8] {
        &self.bus.ppu.frame()[..]
    }

    /// Raw cartridge RAM.
    pub fn save(&self) -> Vec<u8> {
        self.bus.cartridge.save()
    }

    /// Replace cartridge RAM; rejected unless the length matches exactly.
    pub fn load_save(&mut self, data: &[u8]) -> Result<()> {
        self.bus.cartridge.load(data)
    }

    /// Bytes written out over the serial port since the last
    /// [`take_serial_output`](Self::take_serial_output). Only the newest
    /// 32 KiB or more survive once 64 KiB have piled up undrained.
    pub fn serial_output(&self) -> &[u8] {
        self.bus.serial.output()
    }

    pub fn take_serial_output(&mut self) -> Vec<u8> {
        self.bus.serial.take_output()
    }

    /// M-cycles since power-on.
    pub fn cycles(&self) -> u64 {
        self.bus.cycles()
    }

    /// Read memory without advancing the clock.
    pub fn peek(&self, addr: u16) -> u8 {
        self.bus.peek(addr)
    }

    /// Write memory without advancing the clock.
    pub fn poke(&mut self, addr: u16, value: u8) {
        self.bus.poke(addr, value)
    }

    pub fn header(&self) -> &Header {
        self.bus.cartridge.header()
    }

    pub fn title(&self) -> &str {
        &self.header().title
    }

    pub fn has_battery(&self) -> bool {
        self.header().battery
    }

    /// Power-cycle. Cartridge RAM and the MBC3 clock survive.
    pub fn reset(&mut self) {
        log::info!("reset");
        self.cpu.reset();
        self.bus.power_cycle();
        self.overshoot = 0;
    }
}
