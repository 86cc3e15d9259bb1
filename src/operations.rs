use crate::constants::{FONT_START, GLYPH_SIZE, MEMORY_SIZE, SPRITE_WIDTH};
use crate::display::Surface;
use crate::entropy::Entropy;
use crate::error::Halt;
use crate::input::Input;
use crate::state::State;
use crate::timer::Timers;

const VF: usize = 0xF;

/// Where the pc goes after an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// pc += 2
    Next,
    /// pc += 4
    Skip,
    /// pc = addr
    Jump(u16),
    /// pc stays put; the instruction runs again next step
    Wait,
}

impl Flow {
    fn skip_if(condition: bool) -> Self {
        if condition {
            Flow::Skip
        } else {
            Flow::Next
        }
    }
}

/// clear
pub fn clear(surface: &mut dyn Surface) -> Flow {
    surface.clear();
    Flow::Next
}

/// PC = STACK.pop() + 2
/// The stack holds the address of the call itself, so step past it.
pub fn ret(state: &mut State) -> Result<Flow, Halt> {
    let addr = state.stack.pop().ok_or(Halt::StackUnderflow)?;
    Ok(Flow::Jump(addr.wrapping_add(2)))
}

/// PC = addr
pub fn jump(addr: u16) -> Flow {
    Flow::Jump(addr)
}

/// STACK.push(PC); PC = addr
pub fn call(state: &mut State, addr: u16, stack_limit: Option<usize>) -> Result<Flow, Halt> {
    if let Some(limit) = stack_limit {
        if state.stack.len() >= limit {
            return Err(Halt::StackOverflow { limit });
        }
    }
    state.stack.push(state.pc);
    Ok(Flow::Jump(addr))
}

/// if Vx == nn then pc += 2
pub fn skip_eq_imm(state: &State, x: u8, nn: u8) -> Flow {
    Flow::skip_if(state.v[x as usize] == nn)
}

/// if Vx != nn then pc += 2
pub fn skip_ne_imm(state: &State, x: u8, nn: u8) -> Flow {
    Flow::skip_if(state.v[x as usize] != nn)
}

/// if Vx == Vy then pc += 2
pub fn skip_eq_reg(state: &State, x: u8, y: u8) -> Flow {
    Flow::skip_if(state.v[x as usize] == state.v[y as usize])
}

/// if Vx != Vy then pc += 2
pub fn skip_ne_reg(state: &State, x: u8, y: u8) -> Flow {
    Flow::skip_if(state.v[x as usize] != state.v[y as usize])
}

/// Vx = nn
pub fn load_imm(state: &mut State, x: u8, nn: u8) -> Flow {
    state.v[x as usize] = nn;
    Flow::Next
}

/// Vx += nn
/// Overflow is dropped and VF is left alone
pub fn add_imm(state: &mut State, x: u8, nn: u8) -> Flow {
    let x = x as usize;
    state.v[x] = state.v[x].wrapping_add(nn);
    Flow::Next
}

/// Vx = Vy
pub fn mv(state: &mut State, x: u8, y: u8) -> Flow {
    state.v[x as usize] = state.v[y as usize];
    Flow::Next
}

/// Vx |= Vy
pub fn or(state: &mut State, x: u8, y: u8) -> Flow {
    state.v[x as usize] |= state.v[y as usize];
    Flow::Next
}

/// Vx &= Vy
pub fn and(state: &mut State, x: u8, y: u8) -> Flow {
    state.v[x as usize] &= state.v[y as usize];
    Flow::Next
}

/// Vx ^= Vy
pub fn xor(state: &mut State, x: u8, y: u8) -> Flow {
    state.v[x as usize] ^= state.v[y as usize];
    Flow::Next
}

// The flag is written after the result so that VF as a destination ends up holding the flag.

/// Vx += Vy; VF = carry
pub fn add_reg(state: &mut State, x: u8, y: u8) -> Flow {
    let (res, carry) = state.v[x as usize].overflowing_add(state.v[y as usize]);
    state.v[x as usize] = res;
    state.v[VF] = carry as u8;
    Flow::Next
}

/// Vx -= Vy; VF = !borrow
pub fn sub(state: &mut State, x: u8, y: u8) -> Flow {
    let (res, borrow) = state.v[x as usize].overflowing_sub(state.v[y as usize]);
    state.v[x as usize] = res;
    state.v[VF] = !borrow as u8;
    Flow::Next
}

/// Vx = Vy >> 1; VF = the bit shifted out
pub fn shr(state: &mut State, x: u8, y: u8) -> Flow {
    let vy = state.v[y as usize];
    state.v[x as usize] = vy >> 1;
    state.v[VF] = vy & 0x1;
    Flow::Next
}

/// Vx = Vy - Vx; VF = !borrow
pub fn subn(state: &mut State, x: u8, y: u8) -> Flow {
    let (res, borrow) = state.v[y as usize].overflowing_sub(state.v[x as usize]);
    state.v[x as usize] = res;
    state.v[VF] = !borrow as u8;
    Flow::Next
}

/// Vx = Vy << 1; VF = the bit shifted out
pub fn shl(state: &mut State, x: u8, y: u8) -> Flow {
    let vy = state.v[y as usize];
    state.v[x as usize] = vy << 1;
    state.v[VF] = vy >> 7;
    Flow::Next
}

/// I = addr
pub fn load_index(state: &mut State, addr: u16) -> Flow {
    state.i = addr;
    Flow::Next
}

/// PC = (V0 + addr) mod 4096
pub fn jump_offset(state: &State, addr: u16) -> Flow {
    Flow::Jump((addr + u16::from(state.v[0x0])) & 0xFFF)
}

/// Vx = rand_byte & nn
pub fn random(state: &mut State, entropy: &mut dyn Entropy, x: u8, nn: u8) -> Flow {
    state.v[x as usize] = entropy.next_byte() & nn;
    Flow::Next
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs an 8 pixel wide sprite from memory I..I+n onto the surface at Vx, Vy. Each pixel
/// wraps around the edges of the surface on its own.
/// VF = 1 if any lit pixel was turned off, otherwise 0
pub fn draw(state: &mut State, surface: &mut dyn Surface, x: u8, y: u8, n: u8) -> Flow {
    let (width, height) = (surface.width(), surface.height());
    let origin_x = state.v[x as usize] as usize;
    let origin_y = state.v[y as usize] as usize;

    // Reset the flag before the scan (used for collision detection)
    state.v[VF] = 0x0;
    let mut collision = false;

    for row in 0..n as usize {
        let sprite_row = state.read(state.i as usize + row);
        let py = (origin_y + row) % height;
        for col in 0..SPRITE_WIDTH {
            if sprite_row & (0x80 >> col) == 0 {
                continue;
            }
            let px = (origin_x + col) % width;
            let was_lit = surface.get_pixel(px, py);
            surface.set_pixel(px, py, !was_lit);
            collision |= was_lit;
        }
    }

    state.v[VF] = collision as u8;
    Flow::Next
}

/// if key(Vx).held then pc += 2
pub fn skip_key_held(state: &State, input: &dyn Input, x: u8) -> Flow {
    Flow::skip_if(input.is_held(state.v[x as usize]))
}

/// if !key(Vx).held then pc += 2
pub fn skip_key_not_held(state: &State, input: &dyn Input, x: u8) -> Flow {
    Flow::skip_if(!input.is_held(state.v[x as usize]))
}

/// Vx = DT
pub fn load_delay(state: &mut State, timers: &Timers, x: u8) -> Flow {
    state.v[x as usize] = timers.delay();
    Flow::Next
}

/// DT = Vx
pub fn set_delay(state: &State, timers: &Timers, x: u8) -> Flow {
    timers.set_delay(state.v[x as usize]);
    Flow::Next
}

/// ST = Vx
pub fn set_sound(state: &State, timers: &Timers, x: u8) -> Flow {
    timers.set_sound(state.v[x as usize]);
    Flow::Next
}

/// I += Vx
/// VF is not touched
pub fn add_index(state: &mut State, x: u8) -> Flow {
    state.i = state.i.wrapping_add(u16::from(state.v[x as usize]));
    Flow::Next
}

/// I = address of the glyph for the hex digit in Vx
pub fn load_glyph(state: &mut State, x: u8) -> Flow {
    let digit = u16::from(state.v[x as usize] & 0xF);
    state.i = FONT_START + digit * GLYPH_SIZE;
    Flow::Next
}

/// mem[I..I+3] = bcd(Vx)
/// Store the hundreds, tens and units of Vx in memory starting at address I
pub fn store_bcd(state: &mut State, x: u8) -> Flow {
    let value = state.v[x as usize];
    let i = state.i as usize;
    state.write(i, value / 100);
    state.write(i + 1, value / 10 % 10);
    state.write(i + 2, value % 10);
    Flow::Next
}

/// mem[I..=I+x] = V0..=Vx; I += x + 1
pub fn store_registers(state: &mut State, x: u8) -> Flow {
    let i = state.i as usize;
    for r in 0..=x as usize {
        let value = state.v[r];
        state.write(i + r, value);
    }
    state.i = state.i.wrapping_add(u16::from(x) + 1);
    Flow::Next
}

/// V0..=Vx = mem[I..=I+x]; I += x + 1
pub fn load_registers(state: &mut State, x: u8) -> Flow {
    let i = state.i as usize;
    for r in 0..=x as usize {
        state.v[r] = state.memory[(i + r) % MEMORY_SIZE];
    }
    state.i = state.i.wrapping_add(u16::from(x) + 1);
    Flow::Next
}
