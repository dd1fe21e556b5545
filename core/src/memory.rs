use crate::constants::{FONT_SET, FONT_START, MAX_PROGRAM_SIZE, MEMORY_SIZE, PROGRAM_START};
use crate::error::{Fault, LoadError};
use crate::opcode;

/// # Memory
/// 4096 bytes of addressable memory.
///
/// ```text
/// 0x000..0x050  reserved
/// 0x050..0x0A0  font sprites
/// 0x0A0..0x200  reserved
/// 0x200..0x1000 program
/// ```
///
/// Every access goes through a span check; a read or write that would run past
/// 0xFFF is refused as a whole with `Fault::AddressOutOfBounds`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    /// Zeroed memory with the font installed.
    pub fn new() -> Self {
        let mut bytes = [0; MEMORY_SIZE];
        let font = FONT_START as usize;
        bytes[font..font + FONT_SET.len()].copy_from_slice(&FONT_SET);
        Memory { bytes }
    }

    /// Copies a program image to `PROGRAM_START`.
    ///
    /// The image is validated before anything is written, so a rejected
    /// program leaves memory exactly as it was.
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), LoadError> {
        if program.is_empty() {
            return Err(LoadError::Empty);
        }
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(LoadError::TooLarge {
                size: program.len(),
                max: MAX_PROGRAM_SIZE,
            });
        }
        let start = PROGRAM_START as usize;
        self.bytes[start..start + program.len()].copy_from_slice(program);
        Ok(())
    }

    pub fn read(&self, addr: u16) -> Result<u8, Fault> {
        Ok(self.slice(addr, 1)?[0])
    }

    pub fn write(&mut self, addr: u16, value: u8) -> Result<(), Fault> {
        self.slice_mut(addr, 1)?[0] = value;
        Ok(())
    }

    /// The big-endian word at `addr`, `addr + 1`.
    pub fn word(&self, addr: u16) -> Result<u16, Fault> {
        let bytes = self.slice(addr, 2)?;
        Ok(opcode::from_bytes(bytes[0], bytes[1]))
    }

    /// A read only view of `len` bytes starting at `addr`.
    pub fn slice(&self, addr: u16, len: usize) -> Result<&[u8], Fault> {
        let start = Self::check(addr, len)?;
        Ok(&self.bytes[start..start + len])
    }

    /// A mutable view of `len` bytes starting at `addr`.
    pub fn slice_mut(&mut self, addr: u16, len: usize) -> Result<&mut [u8], Fault> {
        let start = Self::check(addr, len)?;
        Ok(&mut self.bytes[start..start + len])
    }

    /// The whole address space, for inspection.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn check(addr: u16, len: usize) -> Result<usize, Fault> {
        let start = addr as usize;
        match start.checked_add(len) {
            Some(end) if end <= MEMORY_SIZE => Ok(start),
            _ => Err(Fault::AddressOutOfBounds { addr, len }),
        }
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memory").field("size", &self.bytes.len()).finish()
    }
}
