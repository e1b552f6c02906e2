use super::{pixel_offset, Lcdc, Ppu, Sprite, SpriteFlags, MAX_SPRITES_PER_LINE, SHADES};
use crate::SCREEN_WIDTH;

impl Ppu {
    #[inline]
    fn vram_at(&self, addr: u16) -> u8 {
        self.vram[(addr & 0x1FFF) as usize]
    }

    #[inline]
    fn sprite_height(&self) -> u8 {
        if self.lcdc.contains(Lcdc::OBJ_SIZE) {
            16
        } else {
            8
        }
    }

    /// Pick up to ten sprites covering the current line, in OAM order.
    pub(super) fn scan_oam(&mut self) {
        let height = self.sprite_height() as u16;
        let line = self.ly as u16 + 16;
        self.sprite_count = 0;

        for entry in self.oam.chunks_exact(4) {
            if self.sprite_count == MAX_SPRITES_PER_LINE {
                break;
            }
            let y = entry[0] as u16;
            if line >= y && line < y + height {
                self.sprites[self.sprite_count] = Sprite {
                    y: entry[0],
                    x: entry[1],
                    tile: entry[2],
                    flags: SpriteFlags::from_bits_truncate(entry[3]),
                };
                self.sprite_count += 1;
            }
        }
    }

    /// Address of tile `index` for BG and window, honouring LCDC.4.
    fn bg_tile_addr(&self, index: u8) -> u16 {
        if self.lcdc.contains(Lcdc::TILE_DATA) {
            0x8000 + index as u16 * 16
        } else {
            (0x9000i32 + (index as i8 as i32) * 16) as u16
        }
    }

    /// 2-bit colour index of pixel (`x`, `y`) in a 256×256 tile map.
    fn map_pixel(&self, map_base: u16, x: u8, y: u8) -> u8 {
        let tile_index = self.vram_at(map_base + (y as u16 / 8) * 32 + x as u16 / 8);
        let row_addr = self.bg_tile_addr(tile_index) + (y as u16 % 8) * 2;
        let lo = self.vram_at(row_addr);
        let hi = self.vram_at(row_addr + 1);
        let bit = 7 - (x % 8);
        (((hi >> bit) & 1) << 1) | ((lo >> bit) & 1)
    }

    /// Colour index of `sprite` at screen column `x`, 0 when transparent or
    /// not covering `x`.
    fn sprite_pixel(&self, sprite: &Sprite, x: u8) -> u8 {
        let left = sprite.x as i16 - 8;
        let column = x as i16 - left;
        if !(0..8).contains(&column) {
            return 0;
        }
        let height = self.sprite_height();
        let mut row = self.ly.wrapping_add(16).wrapping_sub(sprite.y);
        if row >= height {
            return 0;
        }
        if sprite.flags.contains(SpriteFlags::Y_FLIP) {
            row = height - 1 - row;
        }
        let tile = if height == 16 {
            sprite.tile & 0xFE
        } else {
            sprite.tile
        };
        let row_addr = 0x8000 + tile as u16 * 16 + row as u16 * 2;
        let lo = self.vram_at(row_addr);
        let hi = self.vram_at(row_addr + 1);
        let bit = if sprite.flags.contains(SpriteFlags::X_FLIP) {
            column as u8
        } else {
            7 - column as u8
        };
        (((hi >> bit) & 1) << 1) | ((lo >> bit) & 1)
    }

    /// Draw the current line into the back buffer.
    pub(super) fn render_line(&mut self) {
        let ly = self.ly;
        let mut bg = [0u8; SCREEN_WIDTH];

        let window_visible = self.lcdc.contains(Lcdc::WINDOW_ENABLE) && ly >= self.wy && self.wx <= 166;

        if self.lcdc.contains(Lcdc::BG_ENABLE) {
            let bg_map = if self.lcdc.contains(Lcdc::BG_MAP) { 0x9C00 } else { 0x9800 };
            let y = ly.wrapping_add(self.scy);
            for (x, slot) in bg.iter_mut().enumerate() {
                *slot = self.map_pixel(bg_map, (x as u8).wrapping_add(self.scx), y);
            }

            if window_visible {
                let win_map = if self.lcdc.contains(Lcdc::WINDOW_MAP) { 0x9C00 } else { 0x9800 };
                let start = (self.wx as i16 - 7).max(0) as usize;
                for x in start..SCREEN_WIDTH {
                    let wx = (x as i16 - (self.wx as i16 - 7)) as u8;
                    bg[x] = self.map_pixel(win_map, wx, self.window_line);
                }
            }
        }
        if window_visible {
            self.window_line = self.window_line.wrapping_add(1);
        }

        let y = ly as usize;
        for (x, &index) in bg.iter().enumerate() {
            let shade = if self.lcdc.contains(Lcdc::BG_ENABLE) {
                (self.bgp >> (index * 2)) & 0x03
            } else {
                0
            };
            let offset = pixel_offset(x, y);
            self.back[offset..offset + 4].copy_from_slice(&SHADES[shade as usize]);
        }

        if self.lcdc.contains(Lcdc::OBJ_ENABLE) {
            self.render_sprites(&bg);
        }
    }

    fn render_sprites(&mut self, bg: &[u8; SCREEN_WIDTH]) {
        // Smaller X wins; the stable sort keeps OAM order for equal X.
        let mut order = self.sprites;
        let order = &mut order[..self.sprite_count];
        order.sort_by_key(|sprite| sprite.x);

        let y = self.ly as usize;
        for x in 0..SCREEN_WIDTH {
            let winner = order.iter().find_map(|sprite| {
                let colour = self.sprite_pixel(sprite, x as u8);
                (colour != 0).then_some((sprite, colour))
            });
            let Some((sprite, colour)) = winner else {
                continue;
            };
            if sprite.flags.contains(SpriteFlags::BEHIND_BG) && bg[x] != 0 {
                continue;
            }
            let palette = if sprite.flags.contains(SpriteFlags::PALETTE) {
                self.obp1
            } else {
                self.obp0
            };
            let shade = (palette >> (colour * 2)) & 0x03;
            let offset = pixel_offset(x, y);
            self.back[offset..offset + 4].copy_from_slice(&SHADES[shade as usize]);
        }
    }
}
