use bitflags::bitflags;

bitflags! {
    /// LCDC (0xFF40).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub(crate) struct Lcdc: u8 {
        /// On DMG, clearing this blanks BG and window to colour 0.
        const BG_ENABLE = 1 << 0;
        const OBJ_ENABLE = 1 << 1;
        /// 8×16 sprites.
        const OBJ_SIZE = 1 << 2;
        /// BG tile map at 0x9C00 instead of 0x9800.
        const BG_MAP = 1 << 3;
        /// Unsigned tile data at 0x8000 instead of signed at 0x9000.
        const TILE_DATA = 1 << 4;
        const WINDOW_ENABLE = 1 << 5;
        /// Window tile map at 0x9C00 instead of 0x9800.
        const WINDOW_MAP = 1 << 6;
        const LCD_ENABLE = 1 << 7;
    }
}

bitflags! {
    /// Writable interrupt-select bits of STAT (0xFF41).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub(crate) struct StatSelect: u8 {
        const HBLANK = 1 << 3;
        const VBLANK = 1 << 4;
        const OAM = 1 << 5;
        const LYC = 1 << 6;
    }
}

bitflags! {
    /// OAM attribute byte.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub(crate) struct SpriteFlags: u8 {
        /// OBP1 instead of OBP0.
        const PALETTE = 1 << 4;
        const X_FLIP = 1 << 5;
        const Y_FLIP = 1 << 6;
        /// Sprite hides behind BG colours 1–3.
        const BEHIND_BG = 1 << 7;
    }
}

/// PPU mode as reported in STAT[1:0].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Mode {
    HBlank = 0,
    VBlank = 1,
    OamScan = 2,
    Transfer = 3,
}

impl Mode {
    /// Band of dot `dot` on line `ly` while the LCD is on.
    pub(crate) fn at(ly: u8, dot: u16) -> Self {
        if ly >= 144 {
            Mode::VBlank
        } else if dot < 80 {
            Mode::OamScan
        } else if dot < 80 + 172 {
            Mode::Transfer
        } else {
            Mode::HBlank
        }
    }
}
