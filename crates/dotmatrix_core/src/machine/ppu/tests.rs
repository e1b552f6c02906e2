use super::*;

const FRAME_DOTS: u32 = DOTS_PER_LINE as u32 * LINES_PER_FRAME as u32;
const DOTS_TO_VBLANK: u32 = DOTS_PER_LINE as u32 * 144;

fn run(ppu: &mut Ppu, irq: &mut InterruptController, dots: u32) {
    for _ in 0..dots {
        ppu.tick_dot(irq);
    }
}

fn pixel(ppu: &Ppu, x: usize, y: usize) -> [u8; 4] {
    let offset = pixel_offset(x, y);
    let mut rgba = [0; 4];
    rgba.copy_from_slice(&ppu.frame()[offset..offset + 4]);
    rgba
}

/// Fill all eight rows of tile `index` (0x8000 addressing) with `lo`/`hi`.
fn fill_tile(ppu: &mut Ppu, index: u16, lo: u8, hi: u8) {
    for row in 0..8 {
        ppu.write_vram(0x8000 + index * 16 + row * 2, lo);
        ppu.write_vram(0x8000 + index * 16 + row * 2 + 1, hi);
    }
}

fn band(ly: u8, dot: u16) -> u8 {
    match (ly, dot) {
        (144.., _) => 1,
        (_, 0..=79) => 2,
        (_, 80..=251) => 3,
        _ => 0,
    }
}

#[test]
fn stat_mode_follows_dot_bands_for_whole_frame() {
    let mut ppu = Ppu::new();
    let mut irq = InterruptController::default();
    let (mut ly, mut dot) = (0u8, 0u16);

    for _ in 0..FRAME_DOTS {
        ppu.tick_dot(&mut irq);
        dot += 1;
        if dot == 456 {
            dot = 0;
            ly = (ly + 1) % 154;
        }
        assert_eq!((ppu.ly(), ppu.dot()), (ly, dot));
        assert_eq!(ppu.read_register(0xFF41) & 0x03, band(ly, dot), "LY={ly} dot={dot}");
    }
    assert_eq!((ppu.ly(), ppu.dot()), (0, 0));
}

#[test]
fn vblank_requested_on_first_dot_of_line_144() {
    let mut ppu = Ppu::new();
    let mut irq = InterruptController::default();

    run(&mut ppu, &mut irq, DOTS_TO_VBLANK - 1);
    assert_eq!(irq.read_if() & 0x01, 0);
    assert_eq!(ppu.frames(), 0);

    ppu.tick_dot(&mut irq);
    assert_eq!(ppu.ly(), 144);
    assert_eq!(irq.read_if() & 0x01, 0x01);
    assert_eq!(ppu.frames(), 1);
}

#[test]
fn hblank_select_fires_once_per_visible_line() {
    let mut ppu = Ppu::new();
    let mut irq = InterruptController::default();
    ppu.write_register(0xFF41, 0x08, &mut irq);

    let mut requests = 0;
    for _ in 0..FRAME_DOTS {
        ppu.tick_dot(&mut irq);
        if irq.read_if() & 0x02 != 0 {
            requests += 1;
            irq.write_if(0);
        }
    }
    assert_eq!(requests, 144);
}

#[test]
fn lyc_match_raises_a_single_stat_request() {
    let mut ppu = Ppu::new();
    let mut irq = InterruptController::default();
    ppu.write_register(0xFF45, 5, &mut irq);
    ppu.write_register(0xFF41, 0x40, &mut irq);
    assert_eq!(irq.read_if() & 0x02, 0);

    run(&mut ppu, &mut irq, 5 * 456);
    assert_eq!(ppu.ly(), 5);
    assert_eq!(irq.read_if() & 0x02, 0x02);
    assert_eq!(ppu.read_register(0xFF41) & 0x04, 0x04);

    irq.write_if(0);
    run(&mut ppu, &mut irq, 455);
    assert_eq!(irq.read_if() & 0x02, 0);
    ppu.tick_dot(&mut irq);
    assert_eq!(ppu.read_register(0xFF41) & 0x04, 0);
}

#[test]
fn vram_and_oam_lock_by_mode() {
    let mut ppu = Ppu::new();
    let mut irq = InterruptController::default();

    // Mode 2: OAM locked, VRAM open.
    ppu.write_oam(0xFE00, 0x12);
    assert_eq!(ppu.read_oam(0xFE00), 0xFF);
    ppu.write_vram(0x8000, 0x34);
    assert_eq!(ppu.read_vram(0x8000), 0x34);

    run(&mut ppu, &mut irq, 80);
    assert_eq!(ppu.mode(), Mode::Transfer);
    assert_eq!(ppu.read_vram(0x8000), 0xFF);
    ppu.write_vram(0x8000, 0x56);

    run(&mut ppu, &mut irq, 172);
    assert_eq!(ppu.mode(), Mode::HBlank);
    assert_eq!(ppu.read_vram(0x8000), 0x34);
    ppu.write_oam(0xFE00, 0x12);
    assert_eq!(ppu.read_oam(0xFE00), 0x12);
}

#[test]
fn lcd_off_resets_ly_and_blanks_the_frame() {
    let mut ppu = Ppu::new();
    let mut irq = InterruptController::default();
    run(&mut ppu, &mut irq, 3 * 456 + 100);

    ppu.write_register(0xFF40, 0x11, &mut irq);
    assert_eq!(ppu.ly(), 0);
    assert_eq!(ppu.read_register(0xFF41) & 0x03, 0);
    assert!(ppu.vram_accessible() && ppu.oam_accessible());
    assert!(ppu.frame().iter().all(|&byte| byte == 0xFF));

    run(&mut ppu, &mut irq, 1000);
    assert_eq!((ppu.ly(), ppu.dot()), (0, 0));

    // LY is read-only.
    ppu.write_register(0xFF44, 0x20, &mut irq);
    assert_eq!(ppu.read_register(0xFF44), 0);
}

#[test]
fn background_tile_is_drawn_through_bgp() {
    let mut ppu = Ppu::new();
    let mut irq = InterruptController::default();
    fill_tile(&mut ppu, 1, 0xFF, 0xFF);
    ppu.write_vram(0x9800, 1);
    ppu.write_register(0xFF47, 0xE4, &mut irq);

    run(&mut ppu, &mut irq, DOTS_TO_VBLANK);
    assert_eq!(pixel(&ppu, 0, 0), [0x00, 0x00, 0x00, 0xFF]);
    assert_eq!(pixel(&ppu, 7, 7), [0x00, 0x00, 0x00, 0xFF]);
    assert_eq!(pixel(&ppu, 8, 0), [0xFF, 0xFF, 0xFF, 0xFF]);
    assert_eq!(pixel(&ppu, 0, 8), [0xFF, 0xFF, 0xFF, 0xFF]);
}

/// Turn the LCD back on with `lcdc` so line 0 is rescanned.
fn restart_lcd(ppu: &mut Ppu, irq: &mut InterruptController, lcdc: u8) {
    ppu.write_register(0xFF40, 0x00, irq);
    ppu.write_register(0xFF47, 0xE4, irq);
    ppu.write_register(0xFF48, 0xE4, irq);
    ppu.write_register(0xFF40, lcdc, irq);
}

fn restart_with_sprites(ppu: &mut Ppu, irq: &mut InterruptController) {
    restart_lcd(ppu, irq, 0x93);
}

fn put_sprite(ppu: &mut Ppu, slot: usize, y: u8, x: u8, tile: u8, flags: u8) {
    for (i, byte) in [y, x, tile, flags].into_iter().enumerate() {
        ppu.dma_write_oam(slot * 4 + i, byte);
    }
}

#[test]
fn smaller_x_sprite_wins_overlap() {
    let mut ppu = Ppu::new();
    let mut irq = InterruptController::default();
    fill_tile(&mut ppu, 2, 0xFF, 0x00);
    fill_tile(&mut ppu, 3, 0x00, 0xFF);
    put_sprite(&mut ppu, 0, 16, 12, 2, 0);
    put_sprite(&mut ppu, 1, 16, 8, 3, 0);
    restart_with_sprites(&mut ppu, &mut irq);

    run(&mut ppu, &mut irq, DOTS_TO_VBLANK);
    assert_eq!(pixel(&ppu, 2, 0), [0x55, 0x55, 0x55, 0xFF]);
    assert_eq!(pixel(&ppu, 5, 3), [0x55, 0x55, 0x55, 0xFF]);
    assert_eq!(pixel(&ppu, 9, 7), [0xAA, 0xAA, 0xAA, 0xFF]);
    assert_eq!(pixel(&ppu, 9, 8), [0xFF, 0xFF, 0xFF, 0xFF]);
}

#[test]
fn behind_bg_sprite_only_shows_over_colour_zero() {
    let mut ppu = Ppu::new();
    let mut irq = InterruptController::default();
    fill_tile(&mut ppu, 1, 0xFF, 0x00);
    fill_tile(&mut ppu, 3, 0x00, 0xFF);
    ppu.write_vram(0x9800, 1);
    put_sprite(&mut ppu, 0, 16, 12, 3, SpriteFlags::BEHIND_BG.bits());
    restart_with_sprites(&mut ppu, &mut irq);

    run(&mut ppu, &mut irq, DOTS_TO_VBLANK);
    // BG colour 1 under the sprite's left half, colour 0 under the right.
    assert_eq!(pixel(&ppu, 5, 0), [0xAA, 0xAA, 0xAA, 0xFF]);
    assert_eq!(pixel(&ppu, 9, 0), [0x55, 0x55, 0x55, 0xFF]);
}

#[test]
fn at_most_ten_sprites_per_line() {
    let mut ppu = Ppu::new();
    let mut irq = InterruptController::default();
    fill_tile(&mut ppu, 3, 0x00, 0xFF);
    for slot in 0..11 {
        put_sprite(&mut ppu, slot, 16, 8 + 8 * slot as u8, 3, 0);
    }
    restart_with_sprites(&mut ppu, &mut irq);

    run(&mut ppu, &mut irq, DOTS_TO_VBLANK);
    assert_eq!(pixel(&ppu, 8 * 9, 0), [0x55, 0x55, 0x55, 0xFF]);
    assert_eq!(pixel(&ppu, 8 * 10, 0), [0xFF, 0xFF, 0xFF, 0xFF]);
}

const BLACK: [u8; 4] = [0x00, 0x00, 0x00, 0xFF];
const LIGHT: [u8; 4] = [0xAA, 0xAA, 0xAA, 0xFF];
const DARK: [u8; 4] = [0x55, 0x55, 0x55, 0xFF];
const WHITE: [u8; 4] = [0xFF, 0xFF, 0xFF, 0xFF];

/// Window from map 0x9C00 with signed tile data: map row 0 is tile -1
/// (solid colour 3), map row 1 is tile -2 (blank). The BG is all white.
fn window_with_signed_tiles(ppu: &mut Ppu, irq: &mut InterruptController) {
    for offset in 0..16 {
        ppu.write_vram(0x8FF0 + offset, 0xFF);
    }
    for column in 0..32 {
        ppu.write_vram(0x9C00 + column, 0xFF);
        ppu.write_vram(0x9C20 + column, 0xFE);
    }
    ppu.write_register(0xFF47, 0xE4, irq);
    ppu.write_register(0xFF4A, 4, irq);
    ppu.write_register(0xFF4B, 27, irq);
    ppu.write_register(0xFF40, 0xE1, irq);
}

#[test]
fn window_draws_signed_tiles_from_high_map() {
    let mut ppu = Ppu::new();
    let mut irq = InterruptController::default();
    window_with_signed_tiles(&mut ppu, &mut irq);

    run(&mut ppu, &mut irq, DOTS_TO_VBLANK);
    assert_eq!(pixel(&ppu, 20, 4), BLACK);
    assert_eq!(pixel(&ppu, 27, 11), BLACK);
    assert_eq!(pixel(&ppu, 159, 4), BLACK);
    assert_eq!(pixel(&ppu, 19, 4), WHITE);
    assert_eq!(pixel(&ppu, 20, 3), WHITE);
    // Window row 8 reaches map row 1.
    assert_eq!(pixel(&ppu, 20, 12), WHITE);
}

#[test]
fn window_line_counter_pauses_while_window_is_hidden() {
    let mut ppu = Ppu::new();
    let mut irq = InterruptController::default();
    window_with_signed_tiles(&mut ppu, &mut irq);

    run(&mut ppu, &mut irq, 8 * 456);
    assert_eq!((ppu.ly(), ppu.dot()), (8, 0));
    ppu.write_register(0xFF40, 0xC1, &mut irq);
    run(&mut ppu, &mut irq, 4 * 456);
    ppu.write_register(0xFF40, 0xE1, &mut irq);
    run(&mut ppu, &mut irq, DOTS_TO_VBLANK - 12 * 456);

    assert_eq!(pixel(&ppu, 20, 7), BLACK);
    assert_eq!(pixel(&ppu, 20, 9), WHITE);
    // Lines 12..16 draw window rows 4..8, not LY - WY.
    assert_eq!(pixel(&ppu, 20, 12), BLACK);
    assert_eq!(pixel(&ppu, 20, 15), BLACK);
    assert_eq!(pixel(&ppu, 20, 16), WHITE);
}

#[test]
fn background_reads_high_map_when_selected() {
    let mut ppu = Ppu::new();
    let mut irq = InterruptController::default();
    fill_tile(&mut ppu, 1, 0xFF, 0xFF);
    fill_tile(&mut ppu, 2, 0xFF, 0x00);
    ppu.write_vram(0x9800, 2);
    ppu.write_vram(0x9C00, 1);
    ppu.write_register(0xFF47, 0xE4, &mut irq);
    ppu.write_register(0xFF40, 0x99, &mut irq);

    run(&mut ppu, &mut irq, DOTS_TO_VBLANK);
    assert_eq!(pixel(&ppu, 0, 0), BLACK);
    assert_eq!(pixel(&ppu, 8, 0), WHITE);
}

#[test]
fn sprite_flips_mirror_the_tile() {
    let mut ppu = Ppu::new();
    let mut irq = InterruptController::default();
    // Tile 3: only the top-left pixel is set, colour 3.
    ppu.write_vram(0x8030, 0x80);
    ppu.write_vram(0x8031, 0x80);
    put_sprite(&mut ppu, 0, 16, 8, 3, 0);
    put_sprite(&mut ppu, 1, 16, 24, 3, SpriteFlags::X_FLIP.bits());
    put_sprite(&mut ppu, 2, 16, 40, 3, SpriteFlags::Y_FLIP.bits());
    put_sprite(&mut ppu, 3, 16, 56, 3, (SpriteFlags::X_FLIP | SpriteFlags::Y_FLIP).bits());
    restart_with_sprites(&mut ppu, &mut irq);

    run(&mut ppu, &mut irq, DOTS_TO_VBLANK);
    assert_eq!(pixel(&ppu, 0, 0), BLACK);
    assert_eq!(pixel(&ppu, 7, 0), WHITE);
    assert_eq!(pixel(&ppu, 23, 0), BLACK);
    assert_eq!(pixel(&ppu, 16, 0), WHITE);
    assert_eq!(pixel(&ppu, 32, 7), BLACK);
    assert_eq!(pixel(&ppu, 32, 0), WHITE);
    assert_eq!(pixel(&ppu, 55, 7), BLACK);
    assert_eq!(pixel(&ppu, 48, 0), WHITE);
}

#[test]
fn tall_sprites_ignore_tile_bit_zero() {
    let mut ppu = Ppu::new();
    let mut irq = InterruptController::default();
    fill_tile(&mut ppu, 4, 0xFF, 0xFF);
    fill_tile(&mut ppu, 5, 0xFF, 0x00);
    put_sprite(&mut ppu, 0, 16, 8, 5, 0);
    restart_lcd(&mut ppu, &mut irq, 0x97);

    run(&mut ppu, &mut irq, DOTS_TO_VBLANK);
    assert_eq!(pixel(&ppu, 0, 0), BLACK);
    assert_eq!(pixel(&ppu, 0, 7), BLACK);
    assert_eq!(pixel(&ppu, 0, 8), LIGHT);
    assert_eq!(pixel(&ppu, 0, 15), LIGHT);
    assert_eq!(pixel(&ppu, 0, 16), WHITE);
}

#[test]
fn palette_flag_selects_obp1() {
    let mut ppu = Ppu::new();
    let mut irq = InterruptController::default();
    fill_tile(&mut ppu, 2, 0xFF, 0x00);
    put_sprite(&mut ppu, 0, 16, 8, 2, 0);
    put_sprite(&mut ppu, 1, 16, 24, 2, SpriteFlags::PALETTE.bits());
    restart_with_sprites(&mut ppu, &mut irq);
    ppu.write_register(0xFF49, 0x1B, &mut irq);

    run(&mut ppu, &mut irq, DOTS_TO_VBLANK);
    assert_eq!(pixel(&ppu, 0, 0), LIGHT);
    assert_eq!(pixel(&ppu, 16, 0), DARK);
}
