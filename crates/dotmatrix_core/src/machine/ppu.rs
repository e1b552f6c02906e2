//! Scanline PPU.
//!
//! Each line is 456 dots: OAM scan for dots 0–79, pixel transfer for
//! 80–251 and HBlank for the rest. Lines 144–153 are VBlank. OAM is scanned
//! on entry into mode 2 and the whole line is drawn on entry into mode 3,
//! while the CPU-visible mode and the VRAM/OAM locks follow the dot counter
//! exactly.

mod io;
mod regs;
mod render;

pub(crate) use regs::{Lcdc, Mode, SpriteFlags, StatSelect};

use super::interrupts::{Interrupt, InterruptController};
use crate::{FRAME_BYTES, SCREEN_HEIGHT, SCREEN_WIDTH};

pub(crate) const DOTS_PER_LINE: u16 = 456;
pub(crate) const LINES_PER_FRAME: u8 = 154;
const MAX_SPRITES_PER_LINE: usize = 10;

/// One OAM entry selected for the current line.
#[derive(Clone, Copy, Debug, Default)]
struct Sprite {
    y: u8,
    x: u8,
    tile: u8,
    flags: SpriteFlags,
}

pub(crate) struct Ppu {
    vram: Box<[u8; 0x2000]>,
    oam: [u8; 0xA0],

    lcdc: Lcdc,
    stat_select: StatSelect,
    scy: u8,
    scx: u8,
    ly: u8,
    lyc: u8,
    bgp: u8,
    obp0: u8,
    obp1: u8,
    wy: u8,
    wx: u8,

    dot: u16,
    mode: Mode,
    /// OR of all enabled STAT sources; interrupts fire on its rising edge.
    stat_line: bool,
    /// Window's own line counter; only advances on lines it was drawn.
    window_line: u8,

    sprites: [Sprite; MAX_SPRITES_PER_LINE],
    sprite_count: usize,

    back: Box<[u8; FRAME_BYTES]>,
    front: Box<[u8; FRAME_BYTES]>,
    frames: u64,
}

impl Ppu {
    pub(crate) fn new() -> Self {
        let mut ppu = Self {
            vram: Box::new([0; 0x2000]),
            oam: [0; 0xA0],
            lcdc: Lcdc::from_bits_retain(0x91),
            stat_select: StatSelect::empty(),
            scy: 0,
            scx: 0,
            ly: 0,
            lyc: 0,
            bgp: 0xFC,
            obp0: 0xFF,
            obp1: 0xFF,
            wy: 0,
            wx: 0,
            dot: 0,
            mode: Mode::OamScan,
            stat_line: false,
            window_line: 0,
            sprites: [Sprite::default(); MAX_SPRITES_PER_LINE],
            sprite_count: 0,
            back: Box::new([0xFF; FRAME_BYTES]),
            front: Box::new([0xFF; FRAME_BYTES]),
            frames: 0,
        };
        ppu.scan_oam();
        ppu
    }

    #[inline]
    pub(crate) fn lcd_enabled(&self) -> bool {
        self.lcdc.contains(Lcdc::LCD_ENABLE)
    }

    /// Mode as reported to the CPU; mode 0 while the LCD is off.
    #[inline]
    pub(crate) fn mode(&self) -> Mode {
        if self.lcd_enabled() {
            self.mode
        } else {
            Mode::HBlank
        }
    }

    #[cfg(test)]
    pub(crate) fn ly(&self) -> u8 {
        self.ly
    }

    #[cfg(test)]
    pub(crate) fn dot(&self) -> u16 {
        self.dot
    }

    /// Completed frames since power-on.
    #[inline]
    pub(crate) fn frames(&self) -> u64 {
        self.frames
    }

    /// The last completed frame, RGBA8.
    #[inline]
    pub(crate) fn frame(&self) -> &[u8; FRAME_BYTES] {
        &self.front
    }

    /// Advance one dot (one T-cycle).
    pub(crate) fn tick_dot(&mut self, irq: &mut InterruptController) {
        if !self.lcd_enabled() {
            return;
        }

        self.dot += 1;
        if self.dot == DOTS_PER_LINE {
            self.dot = 0;
            self.ly += 1;
            if self.ly == LINES_PER_FRAME {
                self.ly = 0;
                self.window_line = 0;
            }
        }

        let mode = Mode::at(self.ly, self.dot);
        if mode != self.mode {
            self.mode = mode;
            self.enter_mode(irq);
        }
        self.update_stat_line(irq);
    }

    fn enter_mode(&mut self, irq: &mut InterruptController) {
        match self.mode {
            Mode::OamScan => self.scan_oam(),
            Mode::Transfer => self.render_line(),
            Mode::HBlank => {}
            Mode::VBlank => {
                irq.request(Interrupt::VBLANK);
                // DMG quirk: the OAM select also fires at the start of VBlank.
                if self.stat_select.contains(StatSelect::OAM) {
                    irq.request(Interrupt::STAT);
                }
                std::mem::swap(&mut self.front, &mut self.back);
                self.frames += 1;
                log::trace!("VBlank, frame {}", self.frames);
            }
        }
    }

    fn stat_sources(&self) -> bool {
        let select = self.stat_select;
        (select.contains(StatSelect::LYC) && self.ly == self.lyc)
            || match self.mode {
                Mode::HBlank => select.contains(StatSelect::HBLANK),
                Mode::VBlank => select.contains(StatSelect::VBLANK),
                Mode::OamScan => select.contains(StatSelect::OAM),
                Mode::Transfer => false,
            }
    }

    /// Recompute the STAT line and request STAT on a rising edge.
    pub(crate) fn update_stat_line(&mut self, irq: &mut InterruptController) {
        if !self.lcd_enabled() {
            self.stat_line = false;
            return;
        }
        let line = self.stat_sources();
        if line && !self.stat_line {
            irq.request(Interrupt::STAT);
            log::trace!("STAT rising edge: LY={} mode={:?}", self.ly, self.mode);
        }
        self.stat_line = line;
    }

    fn set_lcdc(&mut self, value: u8, irq: &mut InterruptController) {
        let was_on = self.lcd_enabled();
        self.lcdc = Lcdc::from_bits_retain(value);
        let now_on = self.lcd_enabled();

        if was_on && !now_on {
            log::debug!("LCD off at LY={} dot={}", self.ly, self.dot);
            self.ly = 0;
            self.dot = 0;
            self.mode = Mode::HBlank;
            self.stat_line = false;
            self.front.fill(0xFF);
        } else if !was_on && now_on {
            log::debug!("LCD on");
            self.ly = 0;
            self.dot = 0;
            self.window_line = 0;
            self.mode = Mode::OamScan;
            self.scan_oam();
            self.update_stat_line(irq);
        }
    }

    /// Write straight into OAM, bypassing the mode lock (OAM DMA).
    #[inline]
    pub(crate) fn dma_write_oam(&mut self, index: usize, value: u8) {
        if let Some(slot) = self.oam.get_mut(index) {
            *slot = value;
        }
    }
}

/// DMG shades for palette values 0..=3, lightest first.
const SHADES: [[u8; 4]; 4] = [
    [0xFF, 0xFF, 0xFF, 0xFF],
    [0xAA, 0xAA, 0xAA, 0xFF],
    [0x55, 0x55, 0x55, 0xFF],
    [0x00, 0x00, 0x00, 0xFF],
];

#[inline]
fn pixel_offset(x: usize, y: usize) -> usize {
    debug_assert!(x < SCREEN_WIDTH && y < SCREEN_HEIGHT);
    (y * SCREEN_WIDTH + x) * 4
}

#[cfg(test)]
mod tests;
