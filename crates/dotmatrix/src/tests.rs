use super::*;

/// ROM that prints `text` over serial, then spins. `cart_type` 0x03 gives
/// it battery-backed RAM.
fn serial_rom(text: &[u8], cart_type: u8) -> Vec<u8> {
    let mut program = Vec::new();
    for &byte in text {
        // LD A,byte / LDH (SB),A / LD A,0x81 / LDH (SC),A
        program.extend_from_slice(&[0x3E, byte, 0xE0, 0x01, 0x3E, 0x81, 0xE0, 0x02]);
    }
    // LD A,0x0A / LD (0x0000),A / LD A,0x5A / LD (0xA000),A / JR -2
    program.extend_from_slice(&[0x3E, 0x0A, 0xEA, 0x00, 0x00, 0x3E, 0x5A, 0xEA, 0x00, 0xA0, 0x18, 0xFE]);

    let mut rom = vec![0u8; 0x8000];
    // Jump over the header.
    rom[0x100..0x103].copy_from_slice(&[0xC3, 0x50, 0x01]);
    rom[0x150..0x150 + program.len()].copy_from_slice(&program);
    rom[0x147] = cart_type;
    rom[0x149] = if cart_type == 0x03 { 0x02 } else { 0x00 };
    rom
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("dotmatrix-{name}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn options(rom: PathBuf) -> Options {
    Options::parse_from([std::ffi::OsStr::new("dotmatrix"), rom.as_os_str()])
}

#[test]
fn until_stops_once_text_appears() {
    let dir = scratch_dir("until");
    let rom = dir.join("hello.gb");
    std::fs::write(&rom, serial_rom(b"Passed", 0x00)).unwrap();

    let mut options = options(rom);
    options.until = Some("Passed".into());
    let outcome = run(&options).unwrap();

    assert!(outcome.matched);
    assert_eq!(outcome.serial, b"Passed");
    assert!(outcome.cycles <= MCYCLES_PER_FRAME + 5);
}

#[test]
fn cycle_budget_is_honoured() {
    let dir = scratch_dir("budget");
    let rom = dir.join("spin.gb");
    std::fs::write(&rom, serial_rom(b"", 0x00)).unwrap();

    let mut options = options(rom);
    options.cycles = Some(1000);
    let outcome = run(&options).unwrap();
    assert!(!outcome.matched);
    assert!((1000..1006).contains(&outcome.cycles));
}

#[test]
fn multi_frame_budget_overruns_by_at_most_one_instruction() {
    let dir = scratch_dir("frames");
    let rom = dir.join("spin.gb");
    std::fs::write(&rom, serial_rom(b"", 0x00)).unwrap();

    let budget = 3 * MCYCLES_PER_FRAME + 7;
    let mut options = options(rom);
    options.cycles = Some(budget);
    let outcome = run(&options).unwrap();
    assert!((budget..budget + 6).contains(&outcome.cycles));
}

#[test]
fn battery_save_is_written_next_to_rom() {
    let dir = scratch_dir("save");
    let rom = dir.join("battery.gb");
    std::fs::write(&rom, serial_rom(b"x", 0x03)).unwrap();

    let mut options = options(rom.clone());
    options.frames = Some(1);
    options.dump_frame = Some(dir.join("frame.rgba"));
    run(&options).unwrap();

    let save = std::fs::read(rom.with_extension("sav")).unwrap();
    assert_eq!(save.len(), 0x2000);
    assert_eq!(save[0], 0x5A);
    let frame = std::fs::read(dir.join("frame.rgba")).unwrap();
    assert_eq!(frame.len(), dotmatrix_core::FRAME_BYTES);

    // A wrong-sized save is ignored rather than fatal.
    std::fs::write(rom.with_extension("sav"), [0u8; 3]).unwrap();
    run(&options).unwrap();
    assert_eq!(std::fs::read(rom.with_extension("sav")).unwrap().len(), 0x2000);
}

#[test]
fn missing_rom_is_an_error() {
    let err = run(&options(PathBuf::from("/nonexistent/dotmatrix.gb"))).unwrap_err();
    assert!(err.to_string().contains("failed to read ROM"));
}

#[test]
fn parses_command_line() {
    let options = Options::parse_from([
        "dotmatrix",
        "game.gb",
        "--frames",
        "10",
        "--until",
        "Passed",
        "--no-save",
        "--print-serial",
    ]);
    assert_eq!(options.rom, PathBuf::from("game.gb"));
    assert_eq!(options.frames, Some(10));
    assert_eq!(options.budget(), 10 * MCYCLES_PER_FRAME);
    assert_eq!(options.save_path(), PathBuf::from("game.sav"));
    assert!(options.no_save && options.print_serial);
}
