use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use log::{info, warn};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use lemon_core::constants::TIMER_FREQUENCY;
use lemon_core::Chip8;
use lemon_display::{Capturer, Display};

use crate::keymap::keymap;

/// How a session is set up; filled in from the command line
pub struct Options {
    pub rom: PathBuf,
    pub font: Option<PathBuf>,
    pub scale: u32,
    pub step: bool,
    pub capture: bool,
    pub ips: u32,
}

/// Loads the font and ROM into a fresh Chip-8
fn boot(options: &Options) -> Result<Chip8> {
    let mut chip8 = Chip8::new();

    if let Some(font) = &options.font {
        let file = File::open(font)
            .with_context(|| format!("unable to open font {}", font.display()))?;
        chip8
            .load_font_from(&mut BufReader::new(file))
            .with_context(|| format!("unable to load font {}", font.display()))?;
    }

    let file = File::open(&options.rom)
        .with_context(|| format!("unable to open ROM {}", options.rom.display()))?;
    chip8
        .load_rom_from(&mut BufReader::new(file))
        .with_context(|| format!("unable to load ROM {}", options.rom.display()))?;

    Ok(chip8)
}

/// Runs the ROM until the window is closed or the interpreter crashes
///
/// - PageUp executes one instruction in single step mode
/// - F12 saves a screenshot of the current frame
/// - Escape quits
pub fn run(options: Options) -> Result<()> {
    let mut chip8 = boot(&options)?;

    // Get SDL2 context
    let sdl = sdl2::init().map_err(anyhow::Error::msg)?;
    let mut display = Display::new(&sdl, options.scale)
        .map_err(anyhow::Error::msg)
        .context("unable to open display")?;
    let mut events = sdl.event_pump().map_err(anyhow::Error::msg)?;
    let mut capturer = Capturer::new(".");

    display.render(chip8.frame()).map_err(anyhow::Error::msg)?;

    // Set initial timing
    let cycle_time = Duration::from_secs(1) / options.ips.max(1);
    let timer_time = Duration::from_secs(1) / TIMER_FREQUENCY;
    let mut last_timer_tick = Instant::now();

    if options.step {
        info!("single stepping; press PageUp to execute an instruction");
    }

    'event: loop {
        let cycle_start = Instant::now();
        let mut step = false;

        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(kc)) => chip8.key_press(kc)?,
                    (Keycode::Escape, _) => break 'event,
                    (Keycode::PageUp, _) => step = true,
                    (Keycode::F12, _) => {
                        capturer
                            .capture(&chip8.capture())
                            .context("unable to save capture")?;
                    }
                    _ => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => {
                    if let Some(kc) = keymap(key) {
                        chip8.key_release(kc)?;
                    }
                }
                _ => continue,
            };
        }

        // Update state
        if !options.step || step {
            if chip8.can_progress() {
                chip8.cycle().context("interpreter crashed")?;
            } else if step {
                warn!("halted waiting on a key press; nothing to step");
            }
            if step && options.capture {
                capturer
                    .capture(&chip8.capture())
                    .context("unable to save capture")?;
            }
        }

        // Timers run off the wall clock regardless of how many cycles we get through
        while last_timer_tick.elapsed() >= timer_time {
            chip8.tick_timers();
            last_timer_tick += timer_time;
        }

        if let Some(frame) = chip8.take_frame() {
            display.render(&frame).map_err(anyhow::Error::msg)?;
        }

        // Handle timing
        let elapsed = cycle_start.elapsed();
        if cycle_time > elapsed {
            std::thread::sleep(cycle_time - elapsed);
        }
    }

    info!("shutting down");
    Ok(())
}
