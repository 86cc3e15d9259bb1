use emu8::{Bitmap, Chip8, Config, Halt, Keypad, Surface};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Counts clears on top of a bitmap
#[derive(Default)]
struct CountingSurface {
    bitmap: Bitmap,
    clears: usize,
}

impl Surface for CountingSurface {
    fn clear(&mut self) {
        self.clears += 1;
        self.bitmap.clear();
    }

    fn get_pixel(&self, x: usize, y: usize) -> bool {
        self.bitmap.get_pixel(x, y)
    }

    fn set_pixel(&mut self, x: usize, y: usize, on: bool) -> bool {
        self.bitmap.set_pixel(x, y, on)
    }
}

fn load<S: Surface>(surface: S, program: &[u8]) -> Chip8<S, Keypad, StdRng> {
    let config = Config {
        throttle_delay_reads: false,
        ..Config::default()
    };
    let mut chip8 = Chip8::with_config(config, surface, Keypad::new(), StdRng::seed_from_u64(7));
    let mut reader = program;
    chip8.load_rom(&mut reader).unwrap();
    chip8
}

#[test]
fn test_clear_then_return_halts_cleanly() {
    let mut chip8 = load(CountingSurface::default(), &[0x00, 0xE0, 0x00, 0xEE]);
    let halt = chip8.run();
    assert_eq!(halt, Halt::StackUnderflow);
    assert!(!halt.is_failure());
    assert_eq!(chip8.surface().clears, 1);
    assert_eq!(chip8.cycles(), 1);
}

#[test]
fn test_load_then_add() {
    // LD V0, 5; LD V1, 3; ADD V0, V1
    let mut chip8 = load(Bitmap::new(), &[0x60, 0x05, 0x61, 0x03, 0x80, 0x14]);
    for _ in 0..3 {
        chip8.step().unwrap();
    }
    assert_eq!(chip8.state().v[0x0], 8);
    assert_eq!(chip8.state().v[0x1], 3);
    assert_eq!(chip8.state().v[0xF], 0);
}

#[test]
fn test_counting_loop() {
    // 0x200 LD V0, 0
    // 0x202 ADD V0, 1
    // 0x204 SE V0, 10
    // 0x206 JP 0x202
    // 0x208 RET
    let mut chip8 = load(
        Bitmap::new(),
        &[0x60, 0x00, 0x70, 0x01, 0x30, 0x0A, 0x12, 0x02, 0x00, 0xEE],
    );
    assert_eq!(chip8.run(), Halt::StackUnderflow);
    assert_eq!(chip8.state().v[0x0], 10);
}

#[test]
fn test_subroutine_draws_digit() {
    // 0x200 LD V0, 7
    // 0x202 CALL 0x208
    // 0x204 RET          <- halts the program once the subroutine is done
    // 0x206 (padding)
    // 0x208 LD F, V0
    // 0x20A DRW V1, V2, 5
    // 0x20C RET
    let mut chip8 = load(
        Bitmap::new(),
        &[
            0x60, 0x07, 0x22, 0x08, 0x00, 0xEE, 0x00, 0x00, 0xF0, 0x29, 0xD1, 0x25, 0x00, 0xEE,
        ],
    );
    assert_eq!(chip8.run(), Halt::StackUnderflow);
    // 7: F0 10 20 40 40
    assert_eq!(chip8.surface().lit_count(), 4 + 1 + 1 + 1 + 1);
    assert_eq!(chip8.state().i, 35);
}

#[test]
fn test_bcd_then_load_registers() {
    // LD V3, 157; LD I, 0x300; LD B, V3; LD V2, [I]
    let mut chip8 = load(
        Bitmap::new(),
        &[0x63, 0x9D, 0xA3, 0x00, 0xF3, 0x33, 0xF2, 0x65],
    );
    for _ in 0..4 {
        chip8.step().unwrap();
    }
    assert_eq!(chip8.state().v[0x0..0x3], [1, 5, 7]);
    assert_eq!(chip8.state().i, 0x303);
}

#[test]
fn test_store_then_load_round_trip() {
    // LD I, 0x400; LD [I], V3; LD V0..V3 = 0; LD I, 0x400; LD V3, [I]
    let mut chip8 = load(
        Bitmap::new(),
        &[
            0xA4, 0x00, 0xF3, 0x55, 0x60, 0x00, 0x61, 0x00, 0x62, 0x00, 0x63, 0x00, 0xA4, 0x00,
            0xF3, 0x65,
        ],
    );
    chip8.state_mut().v[0x0..0x4].copy_from_slice(&[0x12, 0x34, 0x56, 0x78]);
    chip8.step().unwrap();
    chip8.step().unwrap();
    assert_eq!(chip8.state().i, 0x404);
    for _ in 0..6 {
        chip8.step().unwrap();
    }
    assert_eq!(chip8.state().i, 0x404);
    assert_eq!(chip8.state().v[0x0..0x4], [0x12, 0x34, 0x56, 0x78]);
}

#[test]
fn test_self_modifying_code() {
    // 0x200 LD V0, 0x61; LD V1, 0x2A   (bytes of LD V1, 0x2A)
    // 0x204 LD I, 0x20A
    // 0x206 LD [I], V1                 (overwrites 0x20A..0x20C)
    // 0x208 JP 0x20A
    // 0x20A (blank until written)
    // 0x20C RET
    let mut chip8 = load(
        Bitmap::new(),
        &[
            0x60, 0x61, 0x61, 0x2A, 0xA2, 0x0A, 0xF1, 0x55, 0x12, 0x0A, 0x00, 0x00, 0x00, 0xEE,
        ],
    );
    assert_eq!(chip8.run(), Halt::StackUnderflow);
    assert_eq!(chip8.state().v[0x1], 0x2A);
    assert_eq!(chip8.state().memory[0x20A..0x20C], [0x61, 0x2A]);
}

#[test]
fn test_key_skip_with_keypad() {
    // LD V0, 0xE; SKP V0; LD V1, 1; LD V2, 2
    let mut chip8 = load(Bitmap::new(), &[0x60, 0x0E, 0xE0, 0x9E, 0x61, 0x01, 0x62, 0x02]);
    chip8.input_mut().press(0xE);
    for _ in 0..3 {
        chip8.step().unwrap();
    }
    assert_eq!(chip8.state().v[0x1], 0);
    assert_eq!(chip8.state().v[0x2], 2);
}

#[test]
fn test_delay_timer_loop_with_host_ticks() {
    // 0x200 LD V0, 3
    // 0x202 LD DT, V0
    // 0x204 LD V1, DT
    // 0x206 SE V1, 0
    // 0x208 JP 0x204
    // 0x20A RET
    let mut chip8 = load(
        Bitmap::new(),
        &[
            0x60, 0x03, 0xF0, 0x15, 0xF1, 0x07, 0x31, 0x00, 0x12, 0x04, 0x00, 0xEE,
        ],
    );
    let timers = chip8.timers();
    let halt = loop {
        if let Err(halt) = chip8.step() {
            break halt;
        }
        // one tick per three instructions
        if chip8.cycles() % 3 == 0 {
            timers.tick();
        }
    };
    assert_eq!(halt, Halt::StackUnderflow);
    assert_eq!(timers.delay(), 0);
    assert_eq!(chip8.state().v[0x1], 0);
}

#[test]
fn test_empty_program_runs_off_memory() {
    let mut chip8 = load(Bitmap::new(), &[]);
    assert_eq!(chip8.run(), Halt::PcOutOfBounds { pc: 0x1000 });
    // every blank word is an undefined 0x0000
    assert_eq!(chip8.cycles(), (0x1000 - 0x200) / 2);
}
