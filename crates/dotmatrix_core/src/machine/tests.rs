use super::{Buttons, GameBoy, MapperKind};
use crate::Error;

/// 32 KiB cartridge with `program` at the entry point.
fn rom_with(cart_type: u8, ram_code: u8, program: &[u8]) -> Vec<u8> {
    let mut rom = vec![0u8; 0x8000];
    rom[0x100..0x100 + program.len()].copy_from_slice(program);
    rom[0x134..0x13B].copy_from_slice(b"DOTTEST");
    rom[0x147] = cart_type;
    rom[0x149] = ram_code;
    rom
}

fn machine(program: &[u8]) -> GameBoy {
    GameBoy::new(&rom_with(0x00, 0x00, program)).unwrap()
}

#[test]
fn header_is_exposed() {
    let gb = GameBoy::new(&rom_with(0x03, 0x02, &[])).unwrap();
    assert_eq!(gb.title(), "DOTTEST");
    assert!(gb.has_battery());
    assert_eq!(gb.header().mapper, MapperKind::Mbc1);
    assert!(!machine(&[]).has_battery());
}

#[test]
fn serial_byte_is_captured_and_completes_immediately() {
    // LD A,'P' / LDH (SB),A / LD A,0x81 / LDH (SC),A / JR -2
    let mut gb = machine(&[0x3E, b'P', 0xE0, 0x01, 0x3E, 0x81, 0xE0, 0x02, 0x18, 0xFE]);
    for _ in 0..4 {
        gb.step().unwrap();
    }
    assert_eq!(gb.serial_output(), b"P");
    assert_eq!(gb.peek(0xFF01), 0xFF);
    assert_eq!(gb.peek(0xFF02), 0x7F);
    assert_eq!(gb.peek(0xFF0F) & 0x08, 0x08);

    assert_eq!(gb.take_serial_output(), b"P".to_vec());
    assert!(gb.serial_output().is_empty());
}

#[test]
fn joypad_press_reads_low_and_requests_interrupt_once() {
    let mut gb = machine(&[]);
    gb.poke(0xFF00, 0x20);
    gb.poke(0xFF0F, 0x00);

    gb.press(Buttons::RIGHT);
    assert_eq!(gb.peek(0xFF00), 0xEE);
    assert_eq!(gb.peek(0xFF0F) & 0x10, 0x10);

    gb.poke(0xFF0F, 0x00);
    gb.press(Buttons::RIGHT);
    assert_eq!(gb.peek(0xFF0F) & 0x10, 0x00);

    // Buttons group is deselected, so A does not show up on the d-pad lines.
    gb.press(Buttons::A);
    assert_eq!(gb.peek(0xFF0F) & 0x10, 0x10);
    assert_eq!(gb.peek(0xFF00), 0xEE);

    gb.release(Buttons::RIGHT);
    assert_eq!(gb.peek(0xFF00), 0xEF);
    gb.poke(0xFF00, 0x10);
    assert_eq!(gb.peek(0xFF00), 0xDE);
}

#[test]
fn step_cycles_never_falls_behind_or_runs_far_ahead() {
    // JP 0x0100: 4 M-cycles per instruction.
    let mut gb = machine(&[0xC3, 0x00, 0x01]);
    let mut requested = 0u64;
    for n in [1u64, 1, 2, 3, 5, 7, 1, 100, 1, 1, 13] {
        gb.step_cycles(n).unwrap();
        requested += n;
        assert!(gb.cycles() >= requested);
        assert!(gb.cycles() <= requested + 5);
    }
}

#[test]
fn step_frame_stops_at_vblank() {
    let mut gb = machine(&[0x18, 0xFE]);
    gb.step_frame().unwrap();
    assert_eq!(gb.bus.ppu.frames(), 1);
    assert!((16_416..16_420).contains(&gb.cycles()));

    gb.step_frame().unwrap();
    assert_eq!(gb.bus.ppu.frames(), 2);
    assert_eq!(gb.peek(0xFF44), 144);
}

#[test]
fn step_frame_with_lcd_off_runs_one_frame_of_cycles() {
    let mut gb = machine(&[0x18, 0xFE]);
    gb.poke(0xFF40, 0x00);
    gb.step_frame().unwrap();
    assert_eq!(gb.bus.ppu.frames(), 0);
    assert!(gb.cycles() >= crate::MCYCLES_PER_FRAME);
    assert!(gb.frame().iter().all(|&byte| byte == 0xFF));
}

#[test]
fn halt_wakes_on_vblank_with_ime_off() {
    // XOR A / LDH (IF),A / LD A,1 / LDH (IE),A / HALT / INC A / JR -2
    let mut gb = machine(&[0xAF, 0xE0, 0x0F, 0x3E, 0x01, 0xE0, 0xFF, 0x76, 0x3C, 0x18, 0xFE]);
    for _ in 0..10 {
        gb.step().unwrap();
    }
    assert!(gb.cpu.is_halted());
    assert_eq!(gb.cpu.regs.a, 1);

    gb.step_frame().unwrap();
    gb.step().unwrap();
    assert!(!gb.cpu.is_halted());
    assert_eq!(gb.cpu.regs.a, 2);
}

#[test]
fn save_round_trips_through_load_save() {
    let rom = rom_with(0x03, 0x02, &[]);
    let mut gb = GameBoy::new(&rom).unwrap();
    gb.poke(0x0000, 0x0A);
    gb.poke(0xA000, 0x01);
    gb.poke(0xBFFF, 0x02);
    let save = gb.save();
    assert_eq!(save.len(), 0x2000);

    let mut other = GameBoy::new(&rom).unwrap();
    other.load_save(&save).unwrap();
    assert_eq!(other.save(), save);
    other.poke(0x0000, 0x0A);
    assert_eq!(other.peek(0xA000), 0x01);
    assert_eq!(other.peek(0xBFFF), 0x02);
}

#[test]
fn wrong_length_save_is_rejected_and_ram_kept() {
    let mut gb = GameBoy::new(&rom_with(0x03, 0x02, &[])).unwrap();
    gb.poke(0x0000, 0x0A);
    gb.poke(0xA000, 0x33);

    let err = gb.load_save(&[0; 16]).unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidSaveLength {
            expected: 0x2000,
            actual: 16
        }
    ));
    assert_eq!(gb.peek(0xA000), 0x33);
}

#[test]
fn reset_keeps_cartridge_ram() {
    let mut gb = GameBoy::new(&rom_with(0x03, 0x02, &[0x3C, 0x18, 0xFD])).unwrap();
    gb.poke(0x0000, 0x0A);
    gb.poke(0xA010, 0x77);
    gb.poke(0xC000, 0x55);
    gb.step_cycles(100).unwrap();

    gb.reset();
    assert_eq!(gb.cpu.regs.pc, 0x0100);
    assert_eq!(gb.cpu.regs.a, 0x01);
    assert_eq!(gb.cycles(), 0);
    assert_eq!(gb.peek(0xC000), 0x00);
    assert_eq!(gb.save()[0x10], 0x77);
}

#[test]
fn illegal_opcode_is_fatal() {
    let mut gb = machine(&[0x00, 0xD3]);
    let err = gb.step_cycles(10).unwrap_err();
    assert!(matches!(err, Error::IllegalOpcode { opcode: 0xD3, pc: 0x0101 }));
    assert!(gb.cpu.is_locked());
    assert!(gb.step_cycles(1).is_err());
}

#[test]
fn unsupported_cartridge_is_rejected() {
    let err = GameBoy::new(&rom_with(0x1B, 0x00, &[])).err().unwrap();
    assert!(matches!(err, Error::UnsupportedCartridge { cart_type: 0x1B }));
}
