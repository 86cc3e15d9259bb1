use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::time::Instant;

use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use display::Display;
use emu8::constants::TICK;
use emu8::{Chip8, Config, Halt, Shutdown, Surface, TimerDriver};

use crate::input::SdlInput;
use crate::Args;

pub fn run(args: &Args) -> Result<Halt, Box<dyn Error>> {
    let config = Config::from(args);
    let cycles_per_frame = config.cycles_per_frame();
    let shutdown = Shutdown::new();

    // Get SDL2 context
    let sdl = sdl2::init()?;
    let display = Display::new(&sdl, args.scale)?;
    let input = SdlInput::new(sdl.event_pump()?, shutdown.clone());

    let mut chip8 = Chip8::with_config(config, display, input, StdRng::from_entropy())
        .with_shutdown(shutdown.clone());

    // Load ROM
    let file = File::open(&args.rom)?;
    let mut reader = BufReader::new(file);
    chip8.load_rom(&mut reader)?;

    let timers = TimerDriver::spawn(chip8.timers(), shutdown.clone())?;

    let halt = frames(&mut chip8, cycles_per_frame);

    shutdown.request();
    if timers.join().is_err() {
        warn!("timer thread panicked");
    }
    Ok(halt)
}

/// Runs batches of instructions, one batch per 60Hz frame, until the machine halts
fn frames(chip8: &mut Chip8<Display, SdlInput, StdRng>, cycles_per_frame: u32) -> Halt {
    let mut last_frame = Instant::now();

    let halt = 'frames: loop {
        chip8.input_mut().pump();

        for _ in 0..cycles_per_frame {
            if let Err(halt) = chip8.step() {
                break 'frames halt;
            }
        }
        chip8.surface_mut().present();

        // Handle timing
        let elapsed = last_frame.elapsed();
        if !chip8.input().fast_forward() && TICK > elapsed {
            std::thread::sleep(TICK - elapsed);
        }
        last_frame = Instant::now();
    };

    // flush what the last partial batch drew; the window closes once `chip8` is dropped
    chip8.surface_mut().present();
    info!("halted after {} cycles: {}", chip8.cycles(), halt);
    halt
}
