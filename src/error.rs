use thiserror::Error;

use crate::opcode::Opcode;

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum ProcessError {
    #[error("Invalid rom '{0}'.")]
    Rom(#[from] RomError),
    #[error("Invalid memory access '{0}'.")]
    Memory(#[from] MemoryError),
    #[error("Invalid stack state '{0}'.")]
    Stack(#[from] StackError),
    #[error("Invalid opcode state '{0}'.")]
    Opcode(#[from] OpcodeError),
    #[error("The chipset was halted by an earlier fault.")]
    Halted,
}

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum RomError {
    #[error("The rom does not contain any data.")]
    Empty,
    #[error("The rom is {len} bytes long, but at most {max} bytes fit into memory.")]
    TooLarge { len: usize, max: usize },
}

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum MemoryError {
    #[error("Memory address {address:#06X} is out of bounds.")]
    Bounds { address: usize },
}

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum OpcodeError {
    #[error("An unsupported opcode was used {0:#06X?}.")]
    Unknown(Opcode),
}

#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum StackError {
    #[error("Stack is full!")]
    Overflow,
    #[error("Stack is empty!")]
    Underflow,
}

impl ProcessError {
    /// Faults that the [`FaultPolicy`](crate::config::FaultPolicy) decides about.
    /// Rom errors and a halted chipset are always reported.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ProcessError::Memory(_) | ProcessError::Stack(_) | ProcessError::Opcode(_)
        )
    }
}
