use std::io::Read;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use log::{debug, info, trace, warn};

use crate::config::Config;
use crate::constants::{OPCODE_SIZE, TICK};
use crate::display::Surface;
use crate::entropy::Entropy;
use crate::error::{Halt, LoadError};
use crate::input::{Input, KeyWait};
use crate::instruction::Instruction;
use crate::operations::{self, Flow};
use crate::shutdown::Shutdown;
use crate::state::State;
use crate::timer::{DelayPacer, Timers};

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Owns:
///  - the architectural `state`
///  - the `surface` it draws on, the `input` it reads keys from and the `entropy` behind `Cxnn`
///
/// Shares with the host:
///  - `timers`, decremented at 60Hz by a `TimerDriver` or by the host between steps
///  - `shutdown`, observed before every instruction and inside key waits
///
/// Supplies interfaces for:
/// - loading programs
/// - stepping a single instruction or running until halted
/// - reaching the peripherals so a host can pump events and render between steps
pub struct Chip8<S, I, E> {
    state: State,
    surface: S,
    input: I,
    entropy: E,
    timers: Arc<Timers>,
    shutdown: Shutdown,
    config: Config,
    pacer: DelayPacer,
    awaiting_key: bool,
    cycles: u64,
}

impl<S: Surface, I: Input, E: Entropy> Chip8<S, I, E> {
    pub fn new(surface: S, input: I, entropy: E) -> Self {
        Self::with_config(Config::default(), surface, input, entropy)
    }

    pub fn with_config(config: Config, surface: S, input: I, entropy: E) -> Self {
        Chip8 {
            state: State::new(),
            surface,
            input,
            entropy,
            timers: Arc::new(Timers::new()),
            shutdown: Shutdown::new(),
            config,
            pacer: DelayPacer::new(),
            awaiting_key: false,
            cycles: 0,
        }
    }

    /// Replaces the machine's shutdown flag with one the host already shares elsewhere
    pub fn with_shutdown(mut self, shutdown: Shutdown) -> Self {
        self.shutdown = shutdown;
        self
    }

    /// Load a program from a source file
    ///
    /// # Arguments
    /// * `reader` a reader over a raw program image
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<usize, LoadError> {
        let size = self.state.load_program(reader)?;
        info!("loaded {} byte program", size);
        Ok(size)
    }

    /// Advances the CPU by a single instruction
    /// - stops if the host asked to shut down
    /// - fetches the opcode at the pc, decodes and executes it
    /// - moves the pc on unless the instruction placed it or is still waiting for a key
    pub fn step(&mut self) -> Result<(), Halt> {
        if self.shutdown.is_requested() {
            return Err(Halt::Shutdown);
        }
        let op = self.state.fetch()?;
        let instruction = Instruction::decode(op);
        trace!("{:03X}: {:04X} {}", self.state.pc, op, instruction);

        let flow = self.execute(instruction)?;
        self.state.pc = match flow {
            Flow::Next => self.state.next_pc(),
            Flow::Skip => self.state.pc.wrapping_add(2 * OPCODE_SIZE),
            Flow::Jump(addr) => addr,
            Flow::Wait => self.state.pc,
        };
        self.cycles += 1;
        Ok(())
    }

    /// Steps until something halts the machine
    ///
    /// Meant for blocking `Input`s. With a non-blocking one such as `Keypad` nothing can press
    /// a key while `run` holds the machine, so an Fx0A parks it until shutdown is requested
    /// through a `shutdown_handle` from another thread; it sleeps a tick per pending check.
    pub fn run(&mut self) -> Halt {
        loop {
            let stepped = self.step();
            if stepped.is_ok() && self.awaiting_key {
                thread::sleep(TICK);
            }
            if let Err(halt) = stepped {
                match halt {
                    Halt::StackUnderflow | Halt::StackOverflow { .. } => {
                        warn!("halted after {} cycles: {}", self.cycles, halt)
                    }
                    _ => info!("halted after {} cycles: {}", self.cycles, halt),
                }
                return halt;
            }
        }
    }

    fn execute(&mut self, instruction: Instruction) -> Result<Flow, Halt> {
        use Instruction::*;

        let state = &mut self.state;
        let flow = match instruction {
            Clear => operations::clear(&mut self.surface),
            Return => operations::ret(state)?,
            Jump(addr) => operations::jump(addr),
            Call(addr) => operations::call(state, addr, self.config.stack_limit)?,
            SkipEqImm { x, nn } => operations::skip_eq_imm(state, x, nn),
            SkipNeImm { x, nn } => operations::skip_ne_imm(state, x, nn),
            SkipEqReg { x, y } => operations::skip_eq_reg(state, x, y),
            LoadImm { x, nn } => operations::load_imm(state, x, nn),
            AddImm { x, nn } => operations::add_imm(state, x, nn),
            Move { x, y } => operations::mv(state, x, y),
            Or { x, y } => operations::or(state, x, y),
            And { x, y } => operations::and(state, x, y),
            Xor { x, y } => operations::xor(state, x, y),
            AddReg { x, y } => operations::add_reg(state, x, y),
            Sub { x, y } => operations::sub(state, x, y),
            ShiftRight { x, y } => operations::shr(state, x, y),
            SubN { x, y } => operations::subn(state, x, y),
            ShiftLeft { x, y } => operations::shl(state, x, y),
            SkipNeReg { x, y } => operations::skip_ne_reg(state, x, y),
            LoadIndex(addr) => operations::load_index(state, addr),
            JumpOffset(addr) => operations::jump_offset(state, addr),
            Random { x, nn } => operations::random(state, &mut self.entropy, x, nn),
            Draw { x, y, n } => operations::draw(state, &mut self.surface, x, y, n),
            SkipKeyHeld { x } => operations::skip_key_held(state, &self.input, x),
            SkipKeyNotHeld { x } => operations::skip_key_not_held(state, &self.input, x),
            LoadDelay { x } => {
                let flow = operations::load_delay(state, &self.timers, x);
                let polling = self.pacer.observe(state.v[x as usize], Instant::now());
                if polling && self.config.throttle_delay_reads {
                    thread::sleep(self.pacer.pause());
                }
                flow
            }
            WaitKey { x } => self.wait_key(x)?,
            SetDelay { x } => operations::set_delay(state, &self.timers, x),
            SetSound { x } => operations::set_sound(state, &self.timers, x),
            AddIndex { x } => operations::add_index(state, x),
            LoadGlyph { x } => operations::load_glyph(state, x),
            StoreBcd { x } => operations::store_bcd(state, x),
            StoreRegisters { x } => operations::store_registers(state, x),
            LoadRegisters { x } => operations::load_registers(state, x),
            Undefined(op) => {
                debug!("undefined instruction {:04X} at {:03X}", op, state.pc);
                Flow::Next
            }
        };
        Ok(flow)
    }

    /// await keypress for Vx
    /// Shutdown abandons the wait without touching Vx.
    fn wait_key(&mut self, x: u8) -> Result<Flow, Halt> {
        if !self.awaiting_key {
            debug!("waiting for a key press into V{:X}", x);
            self.surface.present();
            self.input.begin_key_wait();
            self.awaiting_key = true;
        }
        match self.input.wait_for_key_edge(&self.shutdown) {
            KeyWait::Pressed(key) => {
                self.awaiting_key = false;
                self.state.v[x as usize] = key;
                Ok(Flow::Next)
            }
            KeyWait::Pending => Ok(Flow::Wait),
            KeyWait::Shutdown => {
                self.awaiting_key = false;
                Err(Halt::Shutdown)
            }
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// The timers, for a `TimerDriver` or a host that ticks them itself
    pub fn timers(&self) -> Arc<Timers> {
        Arc::clone(&self.timers)
    }

    /// A handle that stops the machine when requested
    pub fn shutdown_handle(&self) -> Shutdown {
        self.shutdown.clone()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Whether the machine is parked on Fx0A
    pub fn is_awaiting_key(&self) -> bool {
        self.awaiting_key
    }

    /// Instructions executed so far
    pub fn cycles(&self) -> u64 {
        self.cycles
    }
}
