//! The registers, the program counter and the call stack.
use tinyvec::ArrayVec;

use crate::{
    definitions::{cpu, memory},
    opcode::ProgramCounterStep,
    StackError,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterFile {
    /// `8-bit` data registers named `V0` to `VF`. The `VF` register doubles as a flag for some
    /// instructions. In an addition operation, `VF` is the carry flag, while in subtraction, it
    /// is the "no borrow" flag. In the draw instruction `VF` is set upon pixel collision.
    v: [u8; cpu::register::SIZE],
    /// The index register `I`, always a 12 bit address.
    index: usize,
    /// The address of the next instruction to be fetched.
    program_counter: usize,
    /// The stack is only used to store return addresses when subroutines are called. The original
    /// [RCA 1802](https://de.wikipedia.org/wiki/RCA1802) version allocated `48` bytes for up to
    /// `12` levels of nesting; here we are using `16`.
    stack: ArrayVec<[usize; cpu::stack::SIZE]>,
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterFile {
    pub fn new() -> Self {
        Self {
            v: [0; cpu::register::SIZE],
            index: 0,
            program_counter: cpu::PROGRAM_COUNTER,
            stack: ArrayVec::new(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// # Panics
    /// If `x` is not a register index, which the decoder makes impossible.
    pub fn get(&self, x: usize) -> u8 {
        self.v[x]
    }

    pub fn set(&mut self, x: usize, value: u8) {
        self.v[x] = value;
    }

    pub fn set_flag(&mut self, flag: bool) {
        self.v[cpu::register::LAST] = flag as u8;
    }

    pub fn flag(&self) -> u8 {
        self.v[cpu::register::LAST]
    }

    /// All the registers `V0` to `VF`.
    pub fn registers(&self) -> &[u8] {
        &self.v
    }

    /// The registers `V0` up to and including `VX`.
    pub fn range_mut(&mut self, x: usize) -> &mut [u8] {
        &mut self.v[..=x]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Sets the index register, masked to the 12 bit address space.
    pub fn set_index(&mut self, index: usize) {
        self.index = index & memory::ADDRESS_MASK;
    }

    pub fn program_counter(&self) -> usize {
        self.program_counter
    }

    pub fn set_program_counter(&mut self, pointer: usize) {
        self.program_counter = pointer;
    }

    /// Moves the program counter past the instruction that was just fetched.
    pub fn advance(&mut self) {
        self.program_counter += memory::opcodes::SIZE;
    }

    pub fn step(&mut self, step: ProgramCounterStep) {
        self.program_counter = step.apply(self.program_counter);
    }

    /// Will push the pointer to the stack
    pub fn push_stack(&mut self, pointer: usize) -> Result<(), StackError> {
        match self.stack.try_push(pointer) {
            None => Ok(()),
            Some(_) => Err(StackError::Overflow),
        }
    }

    /// Will pop from the stack
    pub fn pop_stack(&mut self) -> Result<usize, StackError> {
        self.stack.pop().ok_or(StackError::Underflow)
    }

    pub fn stack(&self) -> &[usize] {
        &self.stack
    }
}
