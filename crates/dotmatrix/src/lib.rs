//! Headless runner for the dotmatrix core.
//!
//! Loads a cartridge and its battery save, runs for a cycle or frame
//! budget, and hands back whatever the guest wrote over the serial port.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dotmatrix_core::{GameBoy, MCYCLES_PER_FRAME};

/// Frames to run when no budget is given.
const DEFAULT_FRAMES: u64 = 600;

#[derive(Debug, Clone, Parser)]
#[command(name = "dotmatrix", version, about = "Run a Game Boy ROM without a window")]
pub struct Options {
    /// Path to the ROM file
    pub rom: PathBuf,

    /// M-cycles to run
    #[arg(long, conflicts_with = "frames")]
    pub cycles: Option<u64>,

    /// Frames to run
    #[arg(long)]
    pub frames: Option<u64>,

    /// Stop as soon as the serial output contains this text
    #[arg(long)]
    pub until: Option<String>,

    /// Battery save file [default: ROM path with a .sav extension]
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Neither load nor write the battery save
    #[arg(long)]
    pub no_save: bool,

    /// Write the final frame here as raw 160x144 RGBA
    #[arg(long)]
    pub dump_frame: Option<PathBuf>,

    /// Print the serial output when done
    #[arg(long)]
    pub print_serial: bool,
}

impl Options {
    fn save_path(&self) -> PathBuf {
        self.save
            .clone()
            .unwrap_or_else(|| self.rom.with_extension("sav"))
    }

    fn budget(&self) -> u64 {
        match (self.cycles, self.frames) {
            (Some(cycles), _) => cycles,
            (None, Some(frames)) => frames.saturating_mul(MCYCLES_PER_FRAME),
            (None, None) => DEFAULT_FRAMES * MCYCLES_PER_FRAME,
        }
    }
}

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// M-cycles actually run.
    pub cycles: u64,
    pub serial: Vec<u8>,
    /// True when `--until` text showed up before the budget ran out.
    pub matched: bool,
}

pub fn run(options: &Options) -> Result<Outcome> {
    let rom = std::fs::read(&options.rom)
        .with_context(|| format!("failed to read ROM {}", options.rom.display()))?;
    let mut gb = GameBoy::new(&rom)
        .with_context(|| format!("failed to load cartridge {}", options.rom.display()))?;
    log::info!("loaded \"{}\"", gb.title());

    let save_path = options.save_path();
    let use_save = gb.has_battery() && !options.no_save;
    if use_save && save_path.exists() {
        let data = std::fs::read(&save_path)
            .with_context(|| format!("failed to read save {}", save_path.display()))?;
        match gb.load_save(&data) {
            Ok(()) => log::info!("loaded save {}", save_path.display()),
            Err(err) => log::warn!("ignoring save {}: {err}", save_path.display()),
        }
    }

    // `step_cycles` carries its own overrun, so chunks are sized from what
    // was requested rather than from the clock.
    let mut remaining = options.budget();
    let mut matched = false;
    while remaining > 0 {
        let chunk = remaining.min(MCYCLES_PER_FRAME);
        gb.step_cycles(chunk)?;
        remaining -= chunk;

        if let Some(text) = &options.until {
            if contains(gb.serial_output(), text.as_bytes()) {
                matched = true;
                break;
            }
        }
    }
    log::info!("stopped after {} M-cycles", gb.cycles());

    if let Some(path) = &options.dump_frame {
        std::fs::write(path, gb.frame())
            .with_context(|| format!("failed to write frame {}", path.display()))?;
    }

    if use_save {
        std::fs::write(&save_path, gb.save())
            .with_context(|| format!("failed to write save {}", save_path.display()))?;
        log::info!("wrote save {}", save_path.display());
    }

    Ok(Outcome {
        cycles: gb.cycles(),
        serial: gb.take_serial_output(),
        matched,
    })
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    needle.is_empty() || haystack.windows(needle.len()).any(|window| window == needle)
}

#[cfg(test)]
mod tests;
