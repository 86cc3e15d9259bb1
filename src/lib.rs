//! # emu8
//! The fetch-decode-execute core of a Chip-8 interpreter.
//!
//! The core never owns a window or a keyboard. It draws on a [`Surface`], reads keys from
//! an [`Input`] and takes random bytes from an [`Entropy`] source, so hosts plug in
//! whatever they render and poll with. [`Bitmap`] and [`Keypad`] are headless stand-ins.
//!
//! ```
//! use emu8::{Bitmap, Chip8, Halt, Keypad};
//! use rand::SeedableRng;
//!
//! let mut chip8 = Chip8::new(Bitmap::new(), Keypad::new(), rand::rngs::StdRng::seed_from_u64(1));
//! let mut program: &[u8] = &[0x00, 0xE0, 0x00, 0xEE];
//! chip8.load_rom(&mut program).unwrap();
//! assert_eq!(chip8.run(), Halt::StackUnderflow);
//! ```
pub use chip8::Chip8;
pub use config::Config;
pub use display::{Bitmap, Surface};
pub use entropy::Entropy;
pub use error::{Halt, LoadError};
pub use input::{Input, KeyWait, Keypad};
pub use instruction::Instruction;
pub use shutdown::Shutdown;
pub use state::State;
pub use timer::{DelayPacer, Tick, TimerDriver, Timers};

mod chip8;
mod config;
pub mod constants;
mod display;
mod entropy;
mod error;
mod input;
mod instruction;
mod opcode;
mod operations;
mod shutdown;
mod state;
mod timer;
