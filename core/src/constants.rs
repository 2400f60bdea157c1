/// Bytes of addressable memory
pub const MEMORY_SIZE: usize = 4096;

/// Where the font sprite sheet is loaded
pub const FONT_START: usize = 0x000;

/// Where ROMs are loaded and where the program counter starts
pub const PROGRAM_START: usize = 0x200;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Number of return addresses the stack can hold
pub const STACK_DEPTH: usize = 16;

/// Number of keys on the hexadecimal keypad
pub const KEY_COUNT: usize = 16;

/// Rate at which the delay and sound timers count down (Hz)
pub const TIMER_FREQUENCY: u32 = 60;

/// Default number of instructions executed per second when free running
pub const CLOCK_SPEED: u32 = 500;

/// Bytes taken up by a single font glyph
pub const GLYPH_SIZE: usize = 5;

/// # Sprite sheet
/// The hexadecimal digits 0..F, each 4 pixels wide and 5 rows tall.
///
/// The glyph for digit `n` starts at `FONT_START + n * GLYPH_SIZE`, e.g. `0`:
/// ```text
/// 0xF0  ####
/// 0x90  #  #
/// 0x90  #  #
/// 0x90  #  #
/// 0xF0  ####
/// ```
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
