use std::time::Duration;

/// Bytes of addressable memory
pub const MEMORY_SIZE: usize = 0x1000;

/// Where programs are loaded and where the pc starts
pub const PROGRAM_START: u16 = 0x200;

/// The largest program that fits between `PROGRAM_START` and the end of memory
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// Every opcode is two bytes wide
pub const OPCODE_SIZE: u16 = 0x2;

pub const REGISTER_COUNT: usize = 16;
pub const KEY_COUNT: usize = 16;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Sprites are always a byte wide
pub const SPRITE_WIDTH: usize = 8;

/// Delay and sound timers count down at 60Hz regardless of clock speed
pub const TIMER_HZ: u32 = 60;
pub const TICK: Duration = Duration::from_nanos(1_000_000_000 / TIMER_HZ as u64);

/// Instructions per second when nothing else is configured
pub const DEFAULT_CLOCK_SPEED: u32 = 700;

/// Address of the first font glyph
pub const FONT_START: u16 = 0x000;
pub const GLYPH_SIZE: u16 = 5;

/// # Sprite sheet
/// One 5 byte glyph per hex digit 0..F, stored from `FONT_START`.
/// Each byte is a row; only the high nibble is lit.
/// ```text
/// 0xF0  ████
/// 0x90  █  █
/// 0x90  █  █
/// 0x90  █  █
/// 0xF0  ████
/// ```
#[rustfmt::skip]
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
