//! The memory bus of the chipset.
use crate::{
    definitions::{cpu, display::fontset, memory},
    opcode::{self, Opcode},
    MemoryError, RomError,
};

/// - `0x000-0x050` - Used for the built in `4x5` pixel font set (`0-F`)
/// - `0x050-0x1FF` - Unused by programs, reserved for the interpreter
/// - `0x200-0xFFF` - Program ROM and work RAM
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryBus {
    cells: Vec<u8>,
}

impl Default for MemoryBus {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus {
    /// Creates zeroed memory with the font set already loaded.
    pub fn new() -> Self {
        let mut bus = Self {
            cells: vec![0; memory::SIZE],
        };
        bus.reset();
        bus
    }

    /// Zeroes all of the memory and writes the font set.
    pub fn reset(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = 0);
        self.cells[fontset::LOCATION..(fontset::LOCATION + fontset::FONTSET.len())]
            .copy_from_slice(&fontset::FONTSET);
    }

    /// Writes the program into memory, starting at the program counter origin.
    pub fn load(&mut self, data: &[u8]) -> Result<(), RomError> {
        if data.is_empty() {
            return Err(RomError::Empty);
        }
        if data.len() > cpu::PROGRAM_MAX_SIZE {
            return Err(RomError::TooLarge {
                len: data.len(),
                max: cpu::PROGRAM_MAX_SIZE,
            });
        }

        self.cells[cpu::PROGRAM_COUNTER..(cpu::PROGRAM_COUNTER + data.len())]
            .copy_from_slice(data);
        Ok(())
    }

    pub fn read(&self, address: usize) -> Result<u8, MemoryError> {
        self.cells
            .get(address)
            .copied()
            .ok_or(MemoryError::Bounds { address })
    }

    pub fn write(&mut self, address: usize, value: u8) -> Result<(), MemoryError> {
        let cell = self
            .cells
            .get_mut(address)
            .ok_or(MemoryError::Bounds { address })?;
        *cell = value;
        Ok(())
    }

    /// Reads the big-endian opcode stored at `pointer` and `pointer + 1`.
    pub fn fetch(&self, pointer: usize) -> Result<Opcode, MemoryError> {
        opcode::build_opcode(&self.cells, pointer)
    }

    /// The cells `[address, address + len)`, checked as a whole before anything is
    /// handed out.
    pub fn slice(&self, address: usize, len: usize) -> Result<&[u8], MemoryError> {
        let end = Self::end(address, len)?;
        Ok(&self.cells[address..end])
    }

    /// Mutable counterpart of [`slice`](MemoryBus::slice).
    pub fn slice_mut(&mut self, address: usize, len: usize) -> Result<&mut [u8], MemoryError> {
        let end = Self::end(address, len)?;
        Ok(&mut self.cells[address..end])
    }

    /// The whole address space.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    fn end(address: usize, len: usize) -> Result<usize, MemoryError> {
        let end = address.saturating_add(len);
        if end > memory::SIZE {
            // the first cell that can not be reached
            let address = address.max(memory::SIZE);
            Err(MemoryError::Bounds { address })
        } else {
            Ok(end)
        }
    }
}
