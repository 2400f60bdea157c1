//! An interpreter for the Chip-8 virtual machine.
//!
//! [`Chip8`] owns the memory, framebuffer, keypad and CPU state and executes
//! one instruction per call to [`Chip8::cycle`]. Rendering, input devices and
//! pacing are left to the caller.

pub use chip8::Chip8;
pub use error::{Access, Error, Result};
pub use framebuffer::{Frame, Framebuffer};
pub use instruction::Instruction;
pub use keypad::Keypad;
pub use memory::Memory;
pub use state::{State, Status};

mod chip8;
pub mod constants;
mod error;
mod framebuffer;
mod instruction;
mod keypad;
mod memory;
mod operations;
mod state;
