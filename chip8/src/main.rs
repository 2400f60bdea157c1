use std::path::PathBuf;

use clap::Parser;

use lemon_core::constants::CLOCK_SPEED;

mod keymap;
mod run;

/// Chip-8 virtual machine
#[derive(Parser, Debug)]
#[command(name = "lemon", version, about, long_about = None)]
struct Args {
    /// Path to the ROM file
    rom: PathBuf,

    /// Scale up/down the display window
    #[arg(
        short = 'S',
        long,
        default_value_t = 10,
        value_parser = clap::value_parser!(u32).range(1..=64)
    )]
    scale: u32,

    /// Switch to single stepping mode (PageUp executes one instruction)
    #[arg(long)]
    step: bool,

    /// Save a capture of the screen after every single step
    #[arg(long, requires = "step")]
    capture: bool,

    /// Font file loaded at 0x000 in place of the built in font
    #[arg(long)]
    font: Option<PathBuf>,

    /// Instructions per second when not single stepping
    #[arg(long, default_value_t = CLOCK_SPEED)]
    ips: u32,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    run::run(run::Options {
        rom: args.rom,
        font: args.font,
        scale: args.scale,
        step: args.step,
        capture: args.capture,
        ips: args.ips,
    })
}
