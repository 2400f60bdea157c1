use crate::constants::{PROGRAM_START, STACK_DEPTH};
use crate::error::{Access, Error, Result};

/// What the interpreter is doing between cycles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Executing an instruction per cycle
    Running,
    /// Blocked on Fx0A until a key press lands in register Vx
    AwaitingKey(u8),
    /// Hit a fatal error; nothing further will execute
    Crashed,
}

/// The Chip-8 CPU state
///
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the carry/borrow/collision flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter, starting where ROMs are loaded
///
/// Stack
/// - (sp) the number of return addresses on the stack
/// - (stack) room for 16 return addresses
///
/// Timers
/// - 2 8-bit timers (delay & sound) counting down to 0 at 60Hz
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub stack: [u16; STACK_DEPTH],
    pub delay_timer: u8,
    pub sound_timer: u8,
}

impl State {
    pub fn new() -> Self {
        State {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START as u16,
            sp: 0,
            stack: [0; STACK_DEPTH],
            delay_timer: 0,
            sound_timer: 0,
        }
    }

    /// Push a return address; fails once all 16 slots are used
    pub fn push(&mut self, address: u16) -> Result<()> {
        let slot = self
            .stack
            .get_mut(self.sp as usize)
            .ok_or_else(|| Error::out_of_bounds(Access::StackPush))?;
        *slot = address;
        self.sp += 1;
        Ok(())
    }

    /// Pop the most recent return address; fails on an empty stack
    pub fn pop(&mut self) -> Result<u16> {
        self.sp = self
            .sp
            .checked_sub(1)
            .ok_or_else(|| Error::out_of_bounds(Access::StackPop))?;
        Ok(self.stack[self.sp as usize])
    }

    /// Count both timers down by one, stopping at 0.
    ///
    /// Returns true if this tick is the one that ran the sound timer out.
    pub fn tick_timers(&mut self) -> bool {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        let sounding = self.sound_timer > 0;
        self.sound_timer = self.sound_timer.saturating_sub(1);
        sounding && self.sound_timer == 0
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
