use std::io::Read;

use crate::constants::{
    MAX_ROM_SIZE, MEMORY_SIZE, OPCODE_SIZE, PROGRAM_START, REGISTER_COUNT, SPRITE_SHEET,
};
use crate::error::{Halt, LoadError};

/// The architectural state of a Chip-8
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) doubles as the carry, borrow and collision flag
/// - (i) a 16-bit memory address register, only the low 12 bits address memory
///
/// Counter
/// - (pc) a 16-bit program counter
///
/// ## Memory
/// - 4096 bytes of addressable memory
///     - 0x000..0x050 holds the sprite sheet
///     - programs are loaded from 0x200
/// - a call stack of return addresses
///     - unbounded here; `Config::stack_limit` caps it
///
/// Timers and the frame buffer live outside of `State`; see `Timers` and `Surface`.
#[derive(Clone)]
pub struct State {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub stack: Vec<u16>,
    pub memory: Box<[u8; MEMORY_SIZE]>,
}

impl State {
    pub fn new() -> Self {
        let mut memory = Box::new([0; MEMORY_SIZE]);
        memory[..SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);

        State {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            stack: Vec::new(),
            memory,
        }
    }

    /// Copy a program image verbatim into memory at 0x200
    ///
    /// Returns the number of bytes loaded.
    pub fn load_program(&mut self, reader: &mut dyn Read) -> Result<usize, LoadError> {
        // one byte past the limit is enough to know the image doesn't fit
        let mut image = Vec::with_capacity(MAX_ROM_SIZE + 1);
        reader.take(MAX_ROM_SIZE as u64 + 1).read_to_end(&mut image)?;
        if image.len() > MAX_ROM_SIZE {
            return Err(LoadError::TooLarge {
                size: image.len(),
                max: MAX_ROM_SIZE,
            });
        }
        let start = PROGRAM_START as usize;
        self.memory[start..start + image.len()].copy_from_slice(&image);
        Ok(image.len())
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    pub fn fetch(&self) -> Result<u16, Halt> {
        let pc = self.pc as usize;
        if pc >= MEMORY_SIZE {
            return Err(Halt::PcOutOfBounds { pc: self.pc });
        }
        Ok(u16::from_be_bytes([self.read(pc), self.read(pc + 1)]))
    }

    /// The pc of the instruction after the current one
    pub fn next_pc(&self) -> u16 {
        self.pc.wrapping_add(OPCODE_SIZE)
    }

    /// Reads a byte; addresses wrap at the end of memory
    pub fn read(&self, addr: usize) -> u8 {
        self.memory[addr % MEMORY_SIZE]
    }

    /// Writes a byte; addresses wrap at the end of memory
    pub fn write(&mut self, addr: usize, value: u8) {
        self.memory[addr % MEMORY_SIZE] = value;
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = State::new();
        assert_eq!(state.pc, 0x200);
        assert_eq!(state.i, 0);
        assert!(state.stack.is_empty());
        assert_eq!(state.memory[0..5], [0xF0, 0x90, 0x90, 0x90, 0xF0]);
        assert_eq!(state.memory[75..80], [0xF0, 0x80, 0xF0, 0x80, 0x80]);
        assert!(state.memory[80..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_loads_program_at_0x200() {
        let mut state = State::new();
        let mut program: &[u8] = &[0x00, 0xE0, 0x00, 0xEE];
        assert_eq!(state.load_program(&mut program).unwrap(), 4);
        assert_eq!(state.memory[0x200..0x204], [0x00, 0xE0, 0x00, 0xEE]);
    }

    #[test]
    fn test_loads_largest_program() {
        let mut state = State::new();
        let image = vec![0xAB; MAX_ROM_SIZE];
        let mut reader: &[u8] = &image;
        assert_eq!(state.load_program(&mut reader).unwrap(), MAX_ROM_SIZE);
        assert_eq!(state.memory[0xFFF], 0xAB);
    }

    #[test]
    fn test_rejects_oversized_program() {
        let mut state = State::new();
        let image = vec![0xAB; MAX_ROM_SIZE + 1];
        let mut reader: &[u8] = &image;
        match state.load_program(&mut reader) {
            Err(LoadError::TooLarge { size, max }) => {
                assert_eq!(size, 3585);
                assert_eq!(max, 3584);
            }
            other => panic!("expected TooLarge, got {:?}", other),
        }
        assert_eq!(state.memory[0x200], 0);
    }

    /// Counts bytes handed out by the inner reader
    struct Counting<R> {
        inner: R,
        consumed: usize,
    }

    impl<R: Read> Read for Counting<R> {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            let n = self.inner.read(buf)?;
            self.consumed += n;
            Ok(n)
        }
    }

    #[test]
    fn test_oversized_source_is_not_read_to_the_end() {
        let mut state = State::new();
        let mut reader = Counting {
            inner: std::io::repeat(0xAB).take(64 * 1024 * 1024),
            consumed: 0,
        };
        match state.load_program(&mut reader) {
            Err(LoadError::TooLarge { size, max }) => {
                assert_eq!(size, MAX_ROM_SIZE + 1);
                assert_eq!(max, MAX_ROM_SIZE);
            }
            other => panic!("expected TooLarge, got {:?}", other),
        }
        assert!(reader.consumed <= MAX_ROM_SIZE + 1);
    }

    #[test]
    fn test_fetches_big_endian() {
        let mut state = State::new();
        state.memory[0x200..0x202].copy_from_slice(&[0xAA, 0xBB]);
        assert_eq!(state.fetch(), Ok(0xAABB));
    }

    #[test]
    fn test_fetch_wraps_last_byte() {
        let mut state = State::new();
        state.pc = 0xFFF;
        state.memory[0xFFF] = 0x12;
        // 0x000 holds the first row of the 0 glyph
        assert_eq!(state.fetch(), Ok(0x12F0));
    }

    #[test]
    fn test_fetch_out_of_bounds_halts() {
        let mut state = State::new();
        state.pc = 0x1000;
        assert_eq!(state.fetch(), Err(Halt::PcOutOfBounds { pc: 0x1000 }));
    }

    #[test]
    fn test_read_write_wrap() {
        let mut state = State::new();
        state.write(0x1005, 0x42);
        assert_eq!(state.memory[0x005], 0x42);
        assert_eq!(state.read(0x1005), 0x42);
    }
}
