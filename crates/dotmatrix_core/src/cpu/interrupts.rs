mod ime;
mod service;

/// Vector of interrupt line `index` (0 = VBlank .. 4 = Joypad).
#[inline]
pub const fn vector(index: u8) -> u16 {
    0x0040 + index as u16 * 8
}
