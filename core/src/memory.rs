use std::io::Read;

use crate::constants::{FONT_START, MEMORY_SIZE, SPRITE_SHEET};
use crate::error::{Access, Error, Result};

/// # Memory
/// 4096 bytes of flat, byte addressable, zero initialised memory.
///
/// ```text
/// 0x000..0x050  font sprite sheet
/// 0x200..0x1000 program
/// ```
/// Every access is bounds checked; touching anything past 0xFFF means the
/// program counter or index register has been corrupted.
pub struct Memory {
    cells: [u8; MEMORY_SIZE],
}

impl Memory {
    pub fn new() -> Self {
        Memory {
            cells: [0; MEMORY_SIZE],
        }
    }

    /// Memory with the built in sprite sheet already in place
    pub fn with_font() -> Self {
        let mut memory = Self::new();
        memory.cells[FONT_START..FONT_START + SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
        memory
    }

    /// Copy `data` into memory starting at `offset`
    pub fn load_binary(&mut self, data: &[u8], offset: usize) -> Result<()> {
        let end = offset
            .checked_add(data.len())
            .filter(|end| *end <= MEMORY_SIZE)
            .ok_or(Error::ResourceTooLarge {
                offset,
                len: data.len(),
            })?;
        self.cells[offset..end].copy_from_slice(data);
        Ok(())
    }

    /// Read everything from `reader` and load it at `offset`
    ///
    /// # Arguments
    /// * `reader` a source of raw bytes, e.g. a ROM file
    /// * `offset` the address the first byte is written to
    pub fn load_from(&mut self, reader: &mut dyn Read, offset: usize) -> Result<usize> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        self.load_binary(&data, offset)?;
        Ok(data.len())
    }

    pub fn read(&self, address: usize) -> Result<u8> {
        self.cells
            .get(address)
            .copied()
            .ok_or_else(|| Error::out_of_bounds(Access::Memory(address)))
    }

    pub fn write(&mut self, address: usize, value: u8) -> Result<()> {
        let cell = self
            .cells
            .get_mut(address)
            .ok_or_else(|| Error::out_of_bounds(Access::Memory(address)))?;
        *cell = value;
        Ok(())
    }

    /// Reads the big endian word made up of the bytes at `address` and `address + 1`
    pub fn read_word(&self, address: usize) -> Result<u16> {
        let left = u16::from(self.read(address)?);
        let right = u16::from(self.read(address + 1)?);
        Ok(left << 8 | right)
    }

    /// The `len` bytes starting at `address`
    pub fn slice(&self, address: usize, len: usize) -> Result<&[u8]> {
        let end = Self::end_of(address, len)?;
        Ok(&self.cells[address..end])
    }

    /// The `len` bytes starting at `address`, mutably
    pub fn slice_mut(&mut self, address: usize, len: usize) -> Result<&mut [u8]> {
        let end = Self::end_of(address, len)?;
        Ok(&mut self.cells[address..end])
    }

    fn end_of(address: usize, len: usize) -> Result<usize> {
        match address.checked_add(len) {
            Some(end) if end <= MEMORY_SIZE => Ok(end),
            // report the first cell that doesn't exist
            _ => Err(Error::out_of_bounds(Access::Memory(
                address.max(MEMORY_SIZE),
            ))),
        }
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_zeroed() {
        let memory = Memory::new();
        assert!(memory.cells.iter().all(|&cell| cell == 0));
    }

    #[test]
    fn test_with_font() {
        let memory = Memory::with_font();
        assert_eq!(memory.slice(0x0, 5).unwrap(), [0xF0, 0x90, 0x90, 0x90, 0xF0]);
        assert_eq!(memory.read(0x50).unwrap(), 0x0);
    }

    #[test]
    fn test_write_then_read_every_address() {
        let mut memory = Memory::new();
        for address in 0..MEMORY_SIZE {
            let value = (address % 251) as u8;
            memory.write(address, value).unwrap();
            assert_eq!(memory.read(address).unwrap(), value);
        }
    }

    #[test]
    fn test_read_out_of_bounds() {
        let memory = Memory::new();
        assert!(matches!(
            memory.read(0x1000),
            Err(Error::OutOfBounds {
                access: Access::Memory(0x1000)
            })
        ));
    }

    #[test]
    fn test_write_out_of_bounds() {
        let mut memory = Memory::new();
        assert!(matches!(
            memory.write(0xFFFF, 0x1),
            Err(Error::OutOfBounds {
                access: Access::Memory(0xFFFF)
            })
        ));
    }

    #[test]
    fn test_load_binary_at_offset() {
        let mut memory = Memory::new();
        memory.load_binary(&[0xAA, 0xBB, 0xCC], 0x200).unwrap();
        assert_eq!(memory.cells[0x1FF..0x204], [0x0, 0xAA, 0xBB, 0xCC, 0x0]);
    }

    #[test]
    fn test_load_binary_fills_to_the_last_cell() {
        let mut memory = Memory::new();
        let data = [0x1; MEMORY_SIZE - 0x200];
        assert!(memory.load_binary(&data, 0x200).is_ok());
        assert_eq!(memory.read(0xFFF).unwrap(), 0x1);
    }

    #[test]
    fn test_load_binary_too_large() {
        let mut memory = Memory::new();
        let data = [0x1; MEMORY_SIZE - 0x200 + 1];
        assert!(matches!(
            memory.load_binary(&data, 0x200),
            Err(Error::ResourceTooLarge {
                offset: 0x200,
                len: 3585
            })
        ));
        // nothing is written when the load is rejected
        assert_eq!(memory.read(0x200).unwrap(), 0x0);
    }

    #[test]
    fn test_load_from_reader() {
        let mut memory = Memory::new();
        let mut rom: &[u8] = &[0x00, 0xE0, 0x12, 0x00];
        assert_eq!(memory.load_from(&mut rom, 0x200).unwrap(), 4);
        assert_eq!(memory.read_word(0x202).unwrap(), 0x1200);
    }

    #[test]
    fn test_read_word() {
        let mut memory = Memory::new();
        memory.load_binary(&[0xAA, 0xBB], 0x200).unwrap();
        assert_eq!(memory.read_word(0x200).unwrap(), 0xAABB);
    }

    #[test]
    fn test_read_word_straddling_the_end() {
        let memory = Memory::new();
        assert!(memory.read_word(0xFFF).is_err());
    }

    #[test]
    fn test_slice_out_of_bounds() {
        let memory = Memory::new();
        assert!(memory.slice(0xFFE, 2).is_ok());
        assert!(matches!(
            memory.slice(0xFFE, 3),
            Err(Error::OutOfBounds {
                access: Access::Memory(0x1000)
            })
        ));
    }
}
