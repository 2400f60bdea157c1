use log::{info, warn};
use rand::Rng;

use crate::chip8::Chip8;
use crate::constants::{FONT_START, GLYPH_SIZE};
use crate::error::Result;
use crate::instruction::Instruction;
use crate::state::State;

/// Carries out a decoded instruction.
///
/// The program counter has already been moved past the instruction by the
/// time this runs, so jumps simply overwrite it and skips add another 2.
pub fn execute(chip8: &mut Chip8, instruction: Instruction) -> Result<()> {
    let state = &mut chip8.state;
    match instruction {
        Instruction::Sys(nnn) => warn!("ignoring machine code routine at {:#05X}", nnn),
        Instruction::Cls => chip8.framebuffer.clear(),
        Instruction::Ret => state.pc = state.pop()?,
        Instruction::Jump(nnn) => state.pc = nnn,
        Instruction::Call(nnn) => call(state, nnn)?,
        Instruction::SkipEqImm { x, kk } => skip_if(&mut state.pc, state.v[x as usize] == kk),
        Instruction::SkipNeImm { x, kk } => skip_if(&mut state.pc, state.v[x as usize] != kk),
        Instruction::SkipEqReg { x, y } => {
            skip_if(&mut state.pc, state.v[x as usize] == state.v[y as usize])
        }
        Instruction::LoadImm { x, kk } => state.v[x as usize] = kk,
        Instruction::AddImm { x, kk } => {
            state.v[x as usize] = state.v[x as usize].wrapping_add(kk)
        }
        Instruction::Move { x, y } => state.v[x as usize] = state.v[y as usize],
        Instruction::Or { x, y } => state.v[x as usize] |= state.v[y as usize],
        Instruction::And { x, y } => state.v[x as usize] &= state.v[y as usize],
        Instruction::Xor { x, y } => state.v[x as usize] ^= state.v[y as usize],
        Instruction::AddReg { x, y } => addr(state, x, y),
        Instruction::Sub { x, y } => sub(state, x, y),
        Instruction::Shr { x, .. } => shr(state, x),
        Instruction::SubN { x, y } => subn(state, x, y),
        Instruction::Shl { x, .. } => shl(state, x),
        Instruction::SkipNeReg { x, y } => {
            skip_if(&mut state.pc, state.v[x as usize] != state.v[y as usize])
        }
        Instruction::LoadI(nnn) => state.i = nnn,
        Instruction::JumpV0(nnn) => state.pc = u16::from(state.v[0x0]) + nnn,
        Instruction::Rand { x, kk } => {
            let rand_byte: u8 = chip8.rng.gen();
            chip8.state.v[x as usize] = rand_byte & kk;
        }
        Instruction::Draw { x, y, n } => draw(chip8, x, y, n)?,
        Instruction::SkipPressed { x } => {
            let pressed = chip8.keypad.is_pressed(state.v[x as usize]);
            skip_if(&mut state.pc, pressed)
        }
        Instruction::SkipNotPressed { x } => {
            let pressed = chip8.keypad.is_pressed(state.v[x as usize]);
            skip_if(&mut state.pc, !pressed)
        }
        Instruction::LoadDelay { x } => state.v[x as usize] = state.delay_timer,
        Instruction::WaitKey { x } => keyd(chip8, x),
        Instruction::SetDelay { x } => state.delay_timer = state.v[x as usize],
        Instruction::SetSound { x } => state.sound_timer = state.v[x as usize],
        Instruction::AddI { x } => state.i = state.i.wrapping_add(u16::from(state.v[x as usize])),
        Instruction::LoadGlyph { x } => {
            state.i = (FONT_START + GLYPH_SIZE * state.v[x as usize] as usize) as u16
        }
        Instruction::Bcd { x } => bcd(chip8, x)?,
        Instruction::StoreRegisters { x } => stor(chip8, x)?,
        Instruction::LoadRegisters { x } => read(chip8, x)?,
    }
    Ok(())
}

/// if cond then pc += 2
fn skip_if(pc: &mut u16, cond: bool) {
    if cond {
        *pc = pc.wrapping_add(0x2);
    }
}

/// STACK.push(PC); PC = addr
fn call(state: &mut State, nnn: u16) -> Result<()> {
    state.push(state.pc)?;
    state.pc = nnn;
    Ok(())
}

// The arithmetic below writes VF last, so when Vx is VF the flag wins.

/// Vx += Vy; VF = overflow
fn addr(state: &mut State, x: u8, y: u8) {
    let (res, over) = state.v[x as usize].overflowing_add(state.v[y as usize]);
    state.v[x as usize] = res;
    state.v[0xF] = over as u8;
}

/// Vx -= Vy; VF = !underflow
fn sub(state: &mut State, x: u8, y: u8) {
    let (res, under) = state.v[x as usize].overflowing_sub(state.v[y as usize]);
    state.v[x as usize] = res;
    state.v[0xF] = !under as u8;
}

/// Vx = Vy - Vx; VF = !underflow
fn subn(state: &mut State, x: u8, y: u8) {
    let (res, under) = state.v[y as usize].overflowing_sub(state.v[x as usize]);
    state.v[x as usize] = res;
    state.v[0xF] = !under as u8;
}

/// Vx >>= 1; VF = the bit shifted out
fn shr(state: &mut State, x: u8) {
    let lsb = state.v[x as usize] & 0x1;
    state.v[x as usize] >>= 1;
    state.v[0xF] = lsb;
}

/// Vx <<= 1; VF = the bit shifted out
fn shl(state: &mut State, x: u8) {
    let msb = state.v[x as usize] >> 7;
    state.v[x as usize] <<= 1;
    state.v[0xF] = msb;
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs the sprite in memory I..I+n onto the frame at Vx, Vy.
/// VF = whether any pixels were erased
fn draw(chip8: &mut Chip8, x: u8, y: u8, n: u8) -> Result<()> {
    let state = &mut chip8.state;
    let sprite = chip8.memory.slice(state.i as usize, n as usize)?;
    let collision = chip8.framebuffer.draw_sprite(
        state.v[x as usize] as usize,
        state.v[y as usize] as usize,
        sprite,
    );
    state.v[0xF] = collision as u8;
    Ok(())
}

/// Vx = next key press
/// A key that's already held is taken straight away, otherwise the CPU halts
fn keyd(chip8: &mut Chip8, x: u8) {
    match chip8.keypad.first_pressed() {
        Some(key) => chip8.state.v[x as usize] = key,
        None => {
            info!("halting until a key is pressed for V{:X}", x);
            chip8.keypad.register_wait(x);
        }
    }
}

/// mem[I..I+3] = bcd(Vx)
fn bcd(chip8: &mut Chip8, x: u8) -> Result<()> {
    let vx = chip8.state.v[x as usize];
    chip8
        .memory
        .slice_mut(chip8.state.i as usize, 3)?
        .copy_from_slice(&[vx / 100, vx / 10 % 10, vx % 10]);
    Ok(())
}

/// mem[I..=I+x] = V0..=Vx
fn stor(chip8: &mut Chip8, x: u8) -> Result<()> {
    let count = x as usize + 1;
    chip8
        .memory
        .slice_mut(chip8.state.i as usize, count)?
        .copy_from_slice(&chip8.state.v[..count]);
    Ok(())
}

/// V0..=Vx = mem[I..=I+x]
fn read(chip8: &mut Chip8, x: u8) -> Result<()> {
    let count = x as usize + 1;
    let cells = chip8.memory.slice(chip8.state.i as usize, count)?;
    chip8.state.v[..count].copy_from_slice(cells);
    Ok(())
}
