use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// A full 64x32 monochrome frame, indexed as [y][x], 1 for on and 0 for off
pub type Frame = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// # Framebuffer
/// The contents of the Chip-8 screen.
///
/// Only ever changed by clearing it or drawing sprites onto it. Drawing is an
/// XOR so drawing the same sprite twice in the same place erases it again.
///
/// Also tracks whether anything changed since the frame was last handed out so
/// that a renderer only has to redraw when there's something new to show.
pub struct Framebuffer {
    pixels: Frame,
    dirty: bool,
}

impl Framebuffer {
    pub fn new() -> Self {
        Framebuffer {
            pixels: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            dirty: false,
        }
    }

    /// Turn every pixel off
    pub fn clear(&mut self) {
        self.pixels = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        self.dirty = true;
    }

    /// XORs `sprite` onto the frame with its top left corner at `(x, y)`.
    ///
    /// Each byte is a row and each bit (most significant first) a column.
    /// Rows and columns wrap around the edges of the screen independently.
    ///
    /// Returns whether any pixel was turned off (a collision).
    pub fn draw_sprite(&mut self, x: usize, y: usize, sprite: &[u8]) -> bool {
        let mut collision = false;
        for (row, byte) in sprite.iter().enumerate() {
            let py = (y + row) % DISPLAY_HEIGHT;
            for column in 0..8 {
                let px = (x + column) % DISPLAY_WIDTH;
                let bit = (byte >> (7 - column)) & 0x1;
                collision |= (bit & self.pixels[py][px]) == 0x1;
                self.pixels[py][px] ^= bit;
            }
        }
        self.dirty = true;
        collision
    }

    /// Whether the pixel at `(x, y)` is on; coordinates wrap like sprites do
    #[cfg(test)]
    fn is_on(&self, x: usize, y: usize) -> bool {
        self.pixels[y % DISPLAY_HEIGHT][x % DISPLAY_WIDTH] == 0x1
    }

    pub fn frame(&self) -> &Frame {
        &self.pixels
    }

    /// A copy of the frame as it is right now
    pub fn capture(&self) -> Frame {
        self.pixels
    }

    /// Returns the frame if it changed since the last call
    pub fn take_frame(&mut self) -> Option<Frame> {
        if self.dirty {
            self.dirty = false;
            Some(self.pixels)
        } else {
            None
        }
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}
