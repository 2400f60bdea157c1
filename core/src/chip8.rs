use std::io::Read;

use log::{debug, error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::constants::{FONT_START, PROGRAM_START};
use crate::error::{Error, Result};
use crate::framebuffer::{Frame, Framebuffer};
use crate::instruction::Instruction;
use crate::keypad::Keypad;
use crate::memory::Memory;
use crate::operations;
use crate::state::{State, Status};

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Owns:
///  - the CPU `state` (registers, stack, timers)
///  - `memory`, with the font loaded at 0x000 and ROMs at 0x200
///  - the `framebuffer` that sprites are drawn onto
///  - the `keypad`
///
/// Supplies interfaces for:
/// - loading roms and fonts
/// - pressing and releasing keys
/// - executing one instruction at a time
/// - advancing its timers at 60Hz
/// - inspecting its frame buffer for rendering by some display
///
/// Nothing in here blocks. While a program waits on a key press `cycle` does
/// nothing, and the caller is expected to keep delivering input.
pub struct Chip8 {
    pub(crate) state: State,
    pub(crate) memory: Memory,
    pub(crate) framebuffer: Framebuffer,
    pub(crate) keypad: Keypad,
    pub(crate) rng: StdRng,
    crashed: bool,
}

impl Chip8 {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// A Chip-8 whose random numbers are determined by `seed`
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Chip8 {
            state: State::new(),
            memory: Memory::with_font(),
            framebuffer: Framebuffer::new(),
            keypad: Keypad::new(),
            rng,
            crashed: false,
        }
    }

    /// Replace the built in font with `font`
    pub fn load_font(&mut self, font: &[u8]) -> Result<()> {
        self.memory.load_binary(font, FONT_START)?;
        info!("loaded {} byte font at {:#05X}", font.len(), FONT_START);
        Ok(())
    }

    /// Load a font from a source file
    ///
    /// # Arguments
    /// * `reader` a file reader that contains a font
    pub fn load_font_from(&mut self, reader: &mut dyn Read) -> Result<()> {
        let len = self.memory.load_from(reader, FONT_START)?;
        info!("loaded {} byte font at {:#05X}", len, FONT_START);
        Ok(())
    }

    pub fn load_rom(&mut self, rom: &[u8]) -> Result<()> {
        self.memory.load_binary(rom, PROGRAM_START)?;
        info!("loaded {} byte ROM at {:#05X}", rom.len(), PROGRAM_START);
        Ok(())
    }

    /// Load a rom from a source file
    ///
    /// # Arguments
    /// * `reader` a file reader that contains a ROM
    pub fn load_rom_from(&mut self, reader: &mut dyn Read) -> Result<()> {
        let len = self.memory.load_from(reader, PROGRAM_START)?;
        info!("loaded {} byte ROM at {:#05X}", len, PROGRAM_START);
        Ok(())
    }

    /// Returns the FrameBuffer if the display should be redrawn
    pub fn take_frame(&mut self) -> Option<Frame> {
        self.framebuffer.take_frame()
    }

    /// The frame as it currently stands
    pub fn frame(&self) -> &Frame {
        self.framebuffer.frame()
    }

    /// A snapshot of the frame for screenshots and debugging; changes nothing
    pub fn capture(&self) -> Frame {
        self.framebuffer.capture()
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn status(&self) -> Status {
        if self.crashed {
            Status::Crashed
        } else if let Some(register) = self.keypad.waiting() {
            Status::AwaitingKey(register)
        } else {
            Status::Running
        }
    }

    /// Whether the CPU is halted waiting on a key press
    pub fn is_halted(&self) -> bool {
        matches!(self.status(), Status::AwaitingKey(_))
    }

    /// Whether calling `cycle` would execute an instruction
    pub fn can_progress(&self) -> bool {
        self.status() == Status::Running
    }

    /// Whether a tone should currently be playing
    pub fn is_sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    /// Set the pressed status of key
    /// - if a register is waiting on a key press the key is stored in it and the CPU resumes
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was pressed
    pub fn key_press(&mut self, key: u8) -> Result<()> {
        if let Some(register) = self.keypad.press(key)? {
            self.state.v[register as usize] = key;
            info!("key {:X} stored in V{:X}, resuming", key, register);
        }
        Ok(())
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was released
    pub fn key_release(&mut self, key: u8) -> Result<()> {
        self.keypad.release(key)
    }

    /// Executes a single instruction
    /// - does nothing if awaiting a keypress
    /// - fetches the opcode at the pc and moves the pc past it
    /// - decodes and executes it
    ///
    /// Any error is fatal: the Chip-8 is marked as crashed and every later
    /// call fails with `Error::Crashed`.
    pub fn cycle(&mut self) -> Result<()> {
        match self.status() {
            Status::Crashed => return Err(Error::Crashed { pc: self.state.pc }),
            Status::AwaitingKey(_) => return Ok(()),
            Status::Running => {}
        }

        let pc = self.state.pc;
        let opcode = match self.memory.read_word(pc as usize) {
            Ok(opcode) => opcode,
            Err(source) => {
                return Err(self.crash(Error::FetchFault {
                    pc,
                    source: Box::new(source),
                }))
            }
        };
        self.state.pc = pc.wrapping_add(0x2);

        let result = Instruction::decode(opcode).and_then(|instruction| {
            debug!(
                "{:04X} {:04X} {:<16} v{:02X?} i{:04X}",
                pc, opcode, instruction.to_string(), self.state.v, self.state.i
            );
            operations::execute(self, instruction)
        });

        result.map_err(|source| {
            self.crash(Error::Fault {
                pc,
                opcode,
                source: Box::new(source),
            })
        })
    }

    fn crash(&mut self, e: Error) -> Error {
        error!("{}", e);
        self.crashed = true;
        e
    }

    /// Counts the delay and sound timers down by one; call at 60Hz
    pub fn tick_timers(&mut self) {
        if self.state.tick_timers() {
            debug!("sound timer expired");
        }
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, SPRITE_SHEET};
    use crate::error::Access;

    fn with_program(program: &[u8]) -> Chip8 {
        let mut chip8 = Chip8::with_seed(0x8);
        chip8.load_rom(program).unwrap();
        chip8
    }

    #[test]
    fn test_starts_running_at_program() {
        let chip8 = Chip8::new();
        assert_eq!(chip8.state().pc, 0x200);
        assert_eq!(chip8.status(), Status::Running);
        assert!(chip8.can_progress());
    }

    #[test]
    fn test_font_is_loaded() {
        let chip8 = Chip8::new();
        assert_eq!(chip8.memory().slice(0x0, 80).unwrap(), SPRITE_SHEET);
    }

    #[test]
    fn test_load_font_replaces_builtin() {
        let mut chip8 = Chip8::new();
        let mut font: &[u8] = &[0xAA; 80];
        chip8.load_font_from(&mut font).unwrap();
        assert_eq!(chip8.memory().slice(0x0, 80).unwrap(), [0xAA; 80]);
    }

    #[test]
    fn test_load_rom_too_large() {
        let mut chip8 = Chip8::new();
        let mut rom: &[u8] = &[0x0; 0xE01];
        assert!(matches!(
            chip8.load_rom_from(&mut rom),
            Err(Error::ResourceTooLarge { .. })
        ));
    }

    #[test]
    fn test_cycles_while_running() {
        let mut chip8 = with_program(&[0x00, 0xE0]);
        chip8.cycle().unwrap();
        assert_eq!(chip8.state().pc, 0x202);
    }

    #[test]
    fn test_doesnt_cycle_while_awaiting_key() {
        let mut chip8 = with_program(&[0xF3, 0x0A, 0x60, 0x01]);
        chip8.cycle().unwrap();
        assert_eq!(chip8.status(), Status::AwaitingKey(0x3));
        assert!(chip8.is_halted());
        assert!(!chip8.can_progress());

        for _ in 0..10 {
            chip8.cycle().unwrap();
        }
        assert_eq!(chip8.state().pc, 0x202);
        assert_eq!(chip8.state().v[0x0], 0x0);
    }

    #[test]
    fn test_key_press_resumes() {
        let mut chip8 = with_program(&[0xF3, 0x0A, 0x60, 0x01]);
        chip8.cycle().unwrap();
        chip8.key_release(0x5).unwrap();
        assert!(chip8.is_halted());

        chip8.key_press(0xE).unwrap();
        assert_eq!(chip8.status(), Status::Running);
        assert_eq!(chip8.state().v[0x3], 0xE);

        chip8.cycle().unwrap();
        assert_eq!(chip8.state().v[0x0], 0x1);
    }

    #[test]
    fn test_key_press_off_keypad() {
        let mut chip8 = Chip8::new();
        assert!(matches!(chip8.key_press(0x10), Err(Error::InvalidKey(0x10))));
    }

    #[test]
    fn test_sixteen_nested_calls() {
        // each subroutine calls the next one along
        let mut program = Vec::new();
        for depth in 0..17u16 {
            let next = 0x200 + (depth + 1) * 2;
            program.extend_from_slice(&(0x2000 | next).to_be_bytes());
        }
        let mut chip8 = with_program(&program);

        for _ in 0..16 {
            chip8.cycle().unwrap();
        }
        assert_eq!(chip8.state().sp, 16);

        let err = chip8.cycle().unwrap_err();
        assert!(matches!(
            err,
            Error::Fault {
                pc: 0x220,
                opcode: 0x2222,
                ..
            }
        ));
        assert!(matches!(
            err.root(),
            Error::OutOfBounds {
                access: Access::StackPush
            }
        ));
    }

    #[test]
    fn test_ret_on_empty_stack() {
        let mut chip8 = with_program(&[0x00, 0xEE]);
        let err = chip8.cycle().unwrap_err();
        assert!(matches!(
            err.root(),
            Error::OutOfBounds {
                access: Access::StackPop
            }
        ));
    }

    #[test]
    fn test_unsupported_opcode_crashes() {
        let mut chip8 = with_program(&[0xFF, 0xFF, 0x00, 0xE0]);
        let err = chip8.cycle().unwrap_err();
        assert!(matches!(
            err,
            Error::Fault {
                pc: 0x200,
                opcode: 0xFFFF,
                ..
            }
        ));
        assert!(matches!(err.root(), Error::UnsupportedOpcode(0xFFFF)));
        assert_eq!(chip8.status(), Status::Crashed);

        // a crashed interpreter stays down
        assert!(matches!(chip8.cycle(), Err(Error::Crashed { .. })));
    }

    #[test]
    fn test_fetch_past_memory_crashes() {
        // JP 0xFFF leaves only a single byte to fetch
        let mut chip8 = with_program(&[0x1F, 0xFF]);
        chip8.cycle().unwrap();
        let err = chip8.cycle().unwrap_err();
        assert!(matches!(err, Error::FetchFault { pc: 0xFFF, .. }));
        assert!(matches!(
            err.root(),
            Error::OutOfBounds {
                access: Access::Memory(0x1000)
            }
        ));
        assert_eq!(chip8.status(), Status::Crashed);
    }

    #[test]
    fn test_fetch_from_end_of_memory_keeps_pc() {
        // LD V0, 1; JP V0, 0xFFF lands one past the last cell
        let mut chip8 = with_program(&[0x60, 0x01, 0xBF, 0xFF]);
        chip8.cycle().unwrap();
        chip8.cycle().unwrap();
        assert_eq!(chip8.state().pc, 0x1000);

        let err = chip8.cycle().unwrap_err();
        assert!(matches!(err, Error::FetchFault { pc: 0x1000, .. }));
        assert!(matches!(
            err.root(),
            Error::OutOfBounds {
                access: Access::Memory(0x1000)
            }
        ));
    }

    #[test]
    fn test_tick_timers() {
        let mut chip8 = Chip8::new();
        chip8.state.delay_timer = 60;
        chip8.state.sound_timer = 2;
        assert!(chip8.is_sound_active());
        for _ in 0..60 {
            chip8.tick_timers();
        }
        assert_eq!(chip8.state().delay_timer, 0);
        assert!(!chip8.is_sound_active());
        chip8.tick_timers();
        assert_eq!(chip8.state().delay_timer, 0);
        assert_eq!(chip8.state().sound_timer, 0);
    }

    #[test]
    fn test_timers_dont_tick_on_cycle() {
        let mut chip8 = with_program(&[0x00, 0xE0]);
        chip8.state.delay_timer = 10;
        chip8.cycle().unwrap();
        assert_eq!(chip8.state().delay_timer, 10);
    }

    #[test]
    fn test_draws_sprite_end_to_end() {
        // CLS; LD V0, 5; DRW V0, V0, 5
        let mut chip8 = with_program(&[0x00, 0xE0, 0x60, 0x05, 0xD0, 0x05]);
        let sprite = [0b1000_0001, 0b0100_0010, 0b0011_1100, 0b0100_0010, 0b1000_0001];
        chip8.memory.load_binary(&sprite, 0x300).unwrap();
        chip8.state.i = 0x300;

        for _ in 0..3 {
            chip8.cycle().unwrap();
        }

        let mut expected: Frame = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        for (row, byte) in sprite.iter().enumerate() {
            for column in 0..8 {
                expected[5 + row][5 + column] = (byte >> (7 - column)) & 0x1;
            }
        }
        assert_eq!(chip8.capture(), expected);
        assert_eq!(chip8.state().v[0xF], 0x0);
        assert_eq!(chip8.take_frame(), Some(expected));
        assert_eq!(chip8.take_frame(), None);
    }
}
