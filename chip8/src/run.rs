use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::info;

use chip8_core::{Chip8, Config, Scheduler};
use chip8_display::Display;

use crate::input::SdlInput;

/// Loads `rom` and runs it in a window until the user quits.
///
/// # Arguments
/// * `rom` path to a raw Chip-8 program image
/// * `config` execution rates and rng seed
/// * `scale` the size multiplier for each pixel
pub fn run(rom: &Path, config: &Config, scale: u32) -> Result<(), Box<dyn Error>> {
    let mut chip8 = Chip8::from_config(config);

    // Load ROM before opening a window so a bad path fails fast
    let file = File::open(rom).map_err(|e| format!("unable to open {}: {}", rom.display(), e))?;
    let mut reader = BufReader::new(file);
    chip8.load_rom(&mut reader)?;
    info!("loaded {}", rom.display());

    // Get SDL2 context
    let sdl = sdl2::init()?;
    let mut display = Display::new(&sdl, scale)?;
    let mut input = SdlInput::new(&sdl)?;

    Scheduler::new(config).run(&mut chip8, &mut display, &mut input)?;
    Ok(())
}
