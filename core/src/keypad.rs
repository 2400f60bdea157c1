use crate::constants::KEY_COUNT;
use crate::error::{Error, Result};

/// # Keypad
/// Chip-8 input comes from a 16 key hexadecimal keypad.
///
/// Keys are only ever dealt with as their logical index 0x0..=0xF; mapping a
/// physical keyboard onto those is up to whoever feeds events in.
///
/// The keypad also remembers which register, if any, the CPU is blocked
/// waiting to write the next pressed key into.
pub struct Keypad {
    pressed: [bool; KEY_COUNT],
    waiting: Option<u8>,
}

impl Keypad {
    pub fn new() -> Self {
        Keypad {
            pressed: [false; KEY_COUNT],
            waiting: None,
        }
    }

    /// Mark `key` as pressed.
    ///
    /// If a register was waiting on a key press the wait is cleared and that
    /// register is returned so the caller can store `key` into it.
    pub fn press(&mut self, key: u8) -> Result<Option<u8>> {
        *self.slot(key)? = true;
        Ok(self.waiting.take())
    }

    /// Mark `key` as released
    pub fn release(&mut self, key: u8) -> Result<()> {
        *self.slot(key)? = false;
        Ok(())
    }

    /// Whether `key` is held down; keys off the keypad never are
    pub fn is_pressed(&self, key: u8) -> bool {
        self.pressed.get(key as usize).copied().unwrap_or(false)
    }

    /// The lowest key currently held down
    pub fn first_pressed(&self) -> Option<u8> {
        self.pressed.iter().position(|&down| down).map(|key| key as u8)
    }

    /// Block until the next key press, which is destined for `register`
    pub fn register_wait(&mut self, register: u8) {
        self.waiting = Some(register);
    }

    /// The register awaiting a key press, if any
    pub fn waiting(&self) -> Option<u8> {
        self.waiting
    }

    fn slot(&mut self, key: u8) -> Result<&mut bool> {
        self.pressed
            .get_mut(key as usize)
            .ok_or_else(|| Error::InvalidKey(key))
    }
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}
