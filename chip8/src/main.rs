use std::path::PathBuf;
use std::process;

use clap::Parser;
use env_logger::Env;
use log::error;

use emu8::constants::DEFAULT_CLOCK_SPEED;
use emu8::Config;

mod input;
mod keymap;
mod run;

/// Run a Chip-8 program in a window
#[derive(Parser, Debug)]
#[command(name = "chip8", version)]
pub struct Args {
    /// Path to the program to load at 0x200
    rom: PathBuf,

    /// Instructions per second
    #[arg(long, default_value_t = DEFAULT_CLOCK_SPEED)]
    clock_speed: u32,

    /// Halt with an error when the call stack gets deeper than this
    #[arg(long)]
    stack_limit: Option<usize>,

    /// Let programs spin on the delay timer at full speed
    #[arg(long)]
    no_throttle: bool,

    /// Window pixels per Chip-8 pixel
    #[arg(long, default_value_t = 10)]
    scale: u32,
}

impl From<&Args> for Config {
    fn from(args: &Args) -> Self {
        Config {
            clock_speed: args.clock_speed,
            stack_limit: args.stack_limit,
            throttle_delay_reads: !args.no_throttle,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match run::run(&args) {
        Ok(halt) if halt.is_failure() => {
            error!("{}", halt);
            process::exit(1);
        }
        Ok(_) => {}
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    }
}
