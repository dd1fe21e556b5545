use crate::constants::{ADDRESS_MASK, FONT_GLYPH_SIZE, FONT_START, VF};
use crate::error::Fault;
use crate::instruction::Flow;
use crate::keypad::Keypad;
use crate::state::{Mode, State};

// Every operation runs with the pc already pointing at the next instruction.

/// Address of the instruction being executed.
pub fn current(state: &State) -> u16 {
    state.pc.wrapping_sub(2) & ADDRESS_MASK
}

/// pc += 2 if `condition`
fn skip_if(state: &mut State, condition: bool) -> Flow {
    if condition {
        state.advance();
        Flow::Skip
    } else {
        Flow::Next
    }
}

/// clear
pub fn clr(state: &mut State) -> Flow {
    state.screen.clear();
    Flow::Next
}

/// PC = STACK.pop()
pub fn rts(state: &mut State) -> Result<Flow, Fault> {
    let pc = current(state);
    let addr = state
        .stack
        .pop()
        .map_err(|_| Fault::StackUnderflow { pc })?;
    state.jump_to(addr);
    Ok(Flow::Jump)
}

/// PC = addr
pub fn jump(state: &mut State, addr: u16) -> Flow {
    state.jump_to(addr);
    Flow::Jump
}

/// STACK.push(PC); PC = addr
pub fn call(state: &mut State, addr: u16) -> Result<Flow, Fault> {
    let pc = current(state);
    state
        .stack
        .push(state.pc)
        .map_err(|_| Fault::StackOverflow { pc })?;
    state.jump_to(addr);
    Ok(Flow::Jump)
}

/// if Vx == kk then pc += 2
pub fn ske(state: &mut State, x: u8, kk: u8) -> Flow {
    let condition = state.v[x as usize] == kk;
    skip_if(state, condition)
}

/// if Vx != kk then pc += 2
pub fn skne(state: &mut State, x: u8, kk: u8) -> Flow {
    let condition = state.v[x as usize] != kk;
    skip_if(state, condition)
}

/// if Vx == Vy then pc += 2
pub fn skre(state: &mut State, x: u8, y: u8) -> Flow {
    let condition = state.v[x as usize] == state.v[y as usize];
    skip_if(state, condition)
}

/// Vx = kk
pub fn load(state: &mut State, x: u8, kk: u8) -> Flow {
    state.v[x as usize] = kk;
    Flow::Next
}

/// Vx += kk
/// Add kk to Vx; allow for overflow but implicitly drop it
pub fn add(state: &mut State, x: u8, kk: u8) -> Flow {
    state.v[x as usize] = state.v[x as usize].wrapping_add(kk);
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

/// Vx += Vy; VF = overflow
pub fn addr(state: &mut State, x: u8, y: u8) -> Flow {
    let (res, over) = state.v[x as usize].overflowing_add(state.v[y as usize]);
    state.v[x as usize] = res;
    state.v[VF] = u8::from(over);
    Flow::Next
}

/// Vx -= Vy; VF = !underflow
pub fn sub(state: &mut State, x: u8, y: u8) -> Flow {
    let (res, under) = state.v[x as usize].overflowing_sub(state.v[y as usize]);
    state.v[x as usize] = res;
    state.v[VF] = u8::from(!under);
    Flow::Next
}

/// Vx >>= 1; VF = the bit shifted out
pub fn shr(state: &mut State, x: u8) -> Flow {
    let lsb = state.v[x as usize] & 0x1;
    state.v[x as usize] >>= 1;
    state.v[VF] = lsb;
    Flow::Next
}

/// Vx = Vy - Vx; VF = !underflow
pub fn subn(state: &mut State, x: u8, y: u8) -> Flow {
    let (res, under) = state.v[y as usize].overflowing_sub(state.v[x as usize]);
    state.v[x as usize] = res;
    state.v[VF] = u8::from(!under);
    Flow::Next
}

/// Vx <<= 1; VF = the bit shifted out
pub fn shl(state: &mut State, x: u8) -> Flow {
    let msb = state.v[x as usize] >> 7;
    state.v[x as usize] <<= 1;
    state.v[VF] = msb;
    Flow::Next
}

/// if Vx != Vy then pc += 2
pub fn skrne(state: &mut State, x: u8, y: u8) -> Flow {
    let condition = state.v[x as usize] != state.v[y as usize];
    skip_if(state, condition)
}

/// I = addr
pub fn loadi(state: &mut State, addr: u16) -> Flow {
    state.set_index(addr);
    Flow::Next
}

/// PC = V0 + addr, wrapped into memory
pub fn jumpi(state: &mut State, addr: u16) -> Flow {
    state.jump_to(addr + u16::from(state.v[0x0]));
    Flow::Jump
}

/// Vx = rand_byte & kk
pub fn rnd(state: &mut State, x: u8, kk: u8, rand_byte: u8) -> Flow {
    state.v[x as usize] = rand_byte & kk;
    Flow::Next
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs the sprite at memory i..i+n onto the screen at (Vx mod 64, Vy mod 32),
/// clipping at the edges. VF = 1 if any lit pixel was erased, else 0.
pub fn draw(state: &mut State, x: u8, y: u8, n: u8) -> Result<Flow, Fault> {
    let sprite = state.memory.slice(state.i, usize::from(n))?;
    let collision = state.screen.draw_sprite(
        usize::from(state.v[x as usize]),
        usize::from(state.v[y as usize]),
        sprite,
    );
    state.v[VF] = u8::from(collision);
    Ok(Flow::Next)
}

/// if Vx.pressed then pc += 2
pub fn skpr(state: &mut State, keys: &Keypad, x: u8) -> Flow {
    let condition = keys.is_pressed(state.v[x as usize]);
    skip_if(state, condition)
}

/// if !Vx.pressed then pc += 2
pub fn skup(state: &mut State, keys: &Keypad, x: u8) -> Flow {
    let condition = !keys.is_pressed(state.v[x as usize]);
    skip_if(state, condition)
}

/// Vx = DT
pub fn moved(state: &mut State, x: u8) -> Flow {
    state.v[x as usize] = state.delay_timer;
    Flow::Next
}

/// await keypress for Vx
pub fn keyd(state: &mut State, x: u8) -> Flow {
    state.mode = Mode::WaitingForKey { register: x };
    Flow::Wait
}

/// DT = Vx
pub fn loads(state: &mut State, x: u8) -> Flow {
    state.delay_timer = state.v[x as usize];
    Flow::Next
}

/// ST = Vx
pub fn ld(state: &mut State, x: u8) -> Flow {
    state.sound_timer = state.v[x as usize];
    Flow::Next
}

/// I += Vx, wrapped into memory
pub fn addi(state: &mut State, x: u8) -> Flow {
    state.set_index(state.i.wrapping_add(u16::from(state.v[x as usize])));
    Flow::Next
}

/// I = FONT_START + Vx * 5
/// Set I to the memory address of the font sprite for the low nibble of Vx
pub fn ldspr(state: &mut State, x: u8) -> Flow {
    let digit = u16::from(state.v[x as usize] & 0xF);
    state.set_index(FONT_START + digit * FONT_GLYPH_SIZE);
    Flow::Next
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i
pub fn bcd(state: &mut State, x: u8) -> Result<Flow, Fault> {
    let value = state.v[x as usize];
    let bcd = [value / 100 % 10, value / 10 % 10, value % 10];
    state.memory.slice_mut(state.i, 3)?.copy_from_slice(&bcd);
    Ok(Flow::Next)
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(state: &mut State, x: u8) -> Result<Flow, Fault> {
    let count = x as usize + 1;
    state
        .memory
        .slice_mut(state.i, count)?
        .copy_from_slice(&state.v[..count]);
    Ok(Flow::Next)
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(state: &mut State, x: u8) -> Result<Flow, Fault> {
    let count = x as usize + 1;
    let bytes = state.memory.slice(state.i, count)?;
    state.v[..count].copy_from_slice(bytes);
    Ok(Flow::Next)
}
