//! Opcode abstractions, decoding and constants.
use crate::{definitions::memory, MemoryError, ProcessError};

/// the base mask used for generating all the other sub masks
pub(crate) const OPCODE_MASK_FFFF: u16 = u16::MAX;

/// the mask for the first twelve bits
pub(crate) const OPCODE_MASK_FFF0: u16 = OPCODE_MASK_FFFF << 4;

/// the mask for the first eight bits
pub(crate) const OPCODE_MASK_FF00: u16 = OPCODE_MASK_FFFF << 8;

/// the mask for the first four bits
pub(crate) const OPCODE_MASK_F000: u16 = OPCODE_MASK_FFFF << 12;

/// the mask for the last four bits
pub(crate) const OPCODE_MASK_000F: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_FFF0;

/// the mask for the last eight bits
pub(crate) const OPCODE_MASK_00FF: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_FF00;

/// the mask for the last twelve bits
pub(crate) const OPCODE_MASK_0FFF: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_F000;

/// the size of a nibble
const NIBBLE: u16 = 0x4;

/// a wrapper type for u16 to make it clear what is meant to be used
pub type Opcode = u16;

/// will build an opcode from data and the given point
/// # Arguments
///
/// - `data` - A slice of u8 data entries used to generate the opcodes
/// - `pointer` - Where in the data the opcode shall be extracted, so `pointer` and `pointer + 1` make
/// the opcode up
///
/// # Example
/// ```rust
/// # use chip::opcode::*;
/// # use chip::MemoryError;
///  const OPCODES: [Opcode; 2] = [0x00EE, 0x1EDA];
///  const SPLIT_OPCODE: [u8; 4] = [0x00, 0xEE, 0x1E, 0xDA];
///  for (i, val) in OPCODES.iter().enumerate() {
///      let opcode = build_opcode(&SPLIT_OPCODE, i * 2).expect("This will work.");
///      assert_eq!(opcode, *val);
///  }
/// # assert_eq!(
/// #    Err(MemoryError::Bounds { address: 4 }),
/// #    build_opcode(&SPLIT_OPCODE, 3)
/// # );
/// ```
pub fn build_opcode(data: &[u8], pointer: usize) -> Result<Opcode, MemoryError> {
    // controlling that there is no illegal access here
    if pointer + 1 < data.len() {
        Ok(Opcode::from_be_bytes([data[pointer], data[pointer + 1]]))
    } else {
        Err(MemoryError::Bounds {
            address: pointer.max(data.len()),
        })
    }
}

/// These are special traits used to filter out information
/// from opcodes
pub trait OpcodeTrait {
    /// the opcode class `T` of `TXYN`
    fn t(&self) -> usize;

    /// the address `NNN` of `TNNN`
    fn nnn(&self) -> usize;

    /// the constant `NN` of `TXNN`
    fn nn(&self) -> u8;

    /// the register index `X` of `TXYN`
    fn x(&self) -> usize;

    /// the register index `Y` of `TXYN`
    fn y(&self) -> usize;

    /// the lowest nibble `N` of `TXYN`
    fn n(&self) -> usize;
}

impl OpcodeTrait for Opcode {
    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    /// const BASE_OPCODE: Opcode = 0x1EDA;
    /// assert_eq!(BASE_OPCODE.t(), 0x1);
    /// ```
    fn t(&self) -> usize {
        ((self & OPCODE_MASK_F000) >> (3 * NIBBLE)) as usize
    }

    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    ///  const BASE_OPCODE: Opcode = 0x1EDA;
    ///  assert_eq!(BASE_OPCODE.nnn(), 0xEDA)
    /// ```
    fn nnn(&self) -> usize {
        (self & OPCODE_MASK_0FFF) as usize
    }

    fn nn(&self) -> u8 {
        (self & OPCODE_MASK_00FF) as u8
    }

    /// # Example
    /// ```rust
    /// # use chip::opcode::*;
    ///  const BASE_OPCODE: Opcode = 0x1EDA;
    ///  assert_eq!((BASE_OPCODE.x(), BASE_OPCODE.y(), BASE_OPCODE.n()), (0xE, 0xD, 0xA));
    /// ```
    fn x(&self) -> usize {
        ((self & OPCODE_MASK_0FFF & OPCODE_MASK_FF00) >> (2 * NIBBLE)) as usize
    }

    fn y(&self) -> usize {
        const MASK: u16 = OPCODE_MASK_00FF ^ OPCODE_MASK_000F;
        ((self & MASK) >> NIBBLE) as usize
    }

    fn n(&self) -> usize {
        (self & OPCODE_MASK_000F) as usize
    }
}

/// The raw fields of a single instruction, every field is a pure
/// function of the opcode it was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fields {
    /// the opcode the fields were taken from
    pub raw: Opcode,
    /// bits 12-15
    pub class: usize,
    /// bits 8-11
    pub x: usize,
    /// bits 4-7
    pub y: usize,
    /// bits 0-3
    pub n: usize,
    /// bits 0-7
    pub nn: u8,
    /// bits 0-11
    pub nnn: usize,
}

/// Splits the opcode into all of its fields.
///
/// # Example
/// ```rust
/// # use chip::opcode::*;
/// let fields = decode(0x6A02);
/// assert_eq!(fields.class, 0x6);
/// assert_eq!(fields.x, 0xA);
/// assert_eq!(fields.nn, 0x02);
/// ```
pub fn decode(opcode: Opcode) -> Fields {
    Fields {
        raw: opcode,
        class: opcode.t(),
        x: opcode.x(),
        y: opcode.y(),
        n: opcode.n(),
        nn: opcode.nn(),
        nnn: opcode.nnn(),
    }
}

/// Every operation the interpreter knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `00E0` - Clears the screen.
    ClearScreen,
    /// `00EE` - Returns from a subroutine.
    Return,
    /// `1NNN` - Jumps to address `NNN`.
    Jump { nnn: usize },
    /// `2NNN` - Calls subroutine at `NNN`.
    Call { nnn: usize },
    /// `3XNN` - Skips the next instruction if `VX` equals `NN`.
    SkipIfEqual { x: usize, nn: u8 },
    /// `4XNN` - Skips the next instruction if `VX` doesn't equal `NN`.
    SkipIfNotEqual { x: usize, nn: u8 },
    /// `5XY0` - Skips the next instruction if `VX` equals `VY`.
    SkipIfRegistersEqual { x: usize, y: usize },
    /// `6XNN` - Sets `VX` to `NN`.
    Load { x: usize, nn: u8 },
    /// `7XNN` - Adds `NN` to `VX`, the carry flag is not changed.
    Add { x: usize, nn: u8 },
    /// `8XY0` - Sets `VX` to the value of `VY`.
    Assign { x: usize, y: usize },
    /// `8XY1` - `VX |= VY`
    Or { x: usize, y: usize },
    /// `8XY2` - `VX &= VY`
    And { x: usize, y: usize },
    /// `8XY3` - `VX ^= VY`
    Xor { x: usize, y: usize },
    /// `8XY4` - `VX += VY`, `VF` is the carry.
    AddRegister { x: usize, y: usize },
    /// `8XY5` - `VX -= VY`, `VF` is set if `VX > VY`.
    Subtract { x: usize, y: usize },
    /// `8XY6` - `VX >>= 1`, `VF` is the shifted out bit.
    ShiftRight { x: usize },
    /// `8XY7` - `VX = VY - VX`, `VF` is set if `VY > VX`.
    ReverseSubtract { x: usize, y: usize },
    /// `8XYE` - `VX <<= 1`, `VF` is the shifted out bit.
    ShiftLeft { x: usize },
    /// `9XY0` - Skips the next instruction if `VX` doesn't equal `VY`.
    SkipIfRegistersNotEqual { x: usize, y: usize },
    /// `ANNN` - Sets `I` to the address `NNN`.
    SetIndex { nnn: usize },
    /// `BNNN` - Jumps to the address `NNN` plus `V0`.
    JumpOffset { nnn: usize },
    /// `CXNN` - Sets `VX` to a random byte and `NN`.
    Random { x: usize, nn: u8 },
    /// `DXYN` - Draws an `8xN` sprite from `I` at `(VX, VY)`.
    Draw { x: usize, y: usize, n: usize },
    /// `EX9E` - Skips the next instruction if the key in `VX` is pressed.
    SkipIfPressed { x: usize },
    /// `EXA1` - Skips the next instruction if the key in `VX` isn't pressed.
    SkipIfNotPressed { x: usize },
    /// `FX07` - Sets `VX` to the delay timer.
    GetDelayTimer { x: usize },
    /// `FX0A` - Stores a pressed key in `VX`, if there is one.
    AwaitKeyPress { x: usize },
    /// `FX15` - Sets the delay timer to `VX`.
    SetDelayTimer { x: usize },
    /// `FX18` - Sets the sound timer to `VX`.
    SetSoundTimer { x: usize },
    /// `FX1E` - Adds `VX` to `I`.
    AddToIndex { x: usize },
    /// `FX29` - Sets `I` to the glyph of the digit in `VX`.
    SetIndexToGlyph { x: usize },
    /// `FX33` - Stores the binary-coded decimal of `VX` at `I`.
    StoreBcd { x: usize },
    /// `FX55` - Stores `V0` to `VX` starting at `I`.
    StoreRegisters { x: usize },
    /// `FX65` - Fills `V0` to `VX` starting at `I`.
    LoadRegisters { x: usize },
    /// Anything without a known effect.
    Unknown(Opcode),
}

impl From<Fields> for Instruction {
    fn from(fields: Fields) -> Self {
        use Instruction::*;

        let Fields {
            raw,
            class,
            x,
            y,
            n,
            nn,
            nnn,
        } = fields;

        match (class, n) {
            (0x0, _) => match raw {
                0x00E0 => ClearScreen,
                0x00EE => Return,
                _ => Unknown(raw),
            },
            (0x1, _) => Jump { nnn },
            (0x2, _) => Call { nnn },
            (0x3, _) => SkipIfEqual { x, nn },
            (0x4, _) => SkipIfNotEqual { x, nn },
            (0x5, 0x0) => SkipIfRegistersEqual { x, y },
            (0x6, _) => Load { x, nn },
            (0x7, _) => Add { x, nn },
            (0x8, 0x0) => Assign { x, y },
            (0x8, 0x1) => Or { x, y },
            (0x8, 0x2) => And { x, y },
            (0x8, 0x3) => Xor { x, y },
            (0x8, 0x4) => AddRegister { x, y },
            (0x8, 0x5) => Subtract { x, y },
            (0x8, 0x6) => ShiftRight { x },
            (0x8, 0x7) => ReverseSubtract { x, y },
            (0x8, 0xE) => ShiftLeft { x },
            (0x9, 0x0) => SkipIfRegistersNotEqual { x, y },
            (0xA, _) => SetIndex { nnn },
            (0xB, _) => JumpOffset { nnn },
            (0xC, _) => Random { x, nn },
            (0xD, _) => Draw { x, y, n },
            (0xE, _) => match nn {
                0x9E => SkipIfPressed { x },
                0xA1 => SkipIfNotPressed { x },
                _ => Unknown(raw),
            },
            (0xF, _) => match nn {
                0x07 => GetDelayTimer { x },
                0x0A => AwaitKeyPress { x },
                0x15 => SetDelayTimer { x },
                0x18 => SetSoundTimer { x },
                0x1E => AddToIndex { x },
                0x29 => SetIndexToGlyph { x },
                0x33 => StoreBcd { x },
                0x55 => StoreRegisters { x },
                0x65 => LoadRegisters { x },
                _ => Unknown(raw),
            },
            _ => Unknown(raw),
        }
    }
}

impl From<Opcode> for Instruction {
    fn from(opcode: Opcode) -> Self {
        decode(opcode).into()
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
/// Represents the program counter movement of an instruction, after the
/// fetch already moved the counter past it.
pub enum ProgramCounterStep {
    /// Continue with the instruction following the current one
    Next,
    /// Skip over the instruction following the current one
    Skip,
    /// Will simply move the program counter to the given location.
    Jump(usize),
}

impl ProgramCounterStep {
    /// Will return a Skip if the condition is true.
    ///
    /// # Example
    /// ```rust
    /// # use chip::opcode::ProgramCounterStep;
    /// assert_eq!(ProgramCounterStep::Next, ProgramCounterStep::cond(false));
    /// assert_eq!(ProgramCounterStep::Skip, ProgramCounterStep::cond(true));
    /// ```
    #[inline]
    pub fn cond(cond: bool) -> Self {
        if cond {
            ProgramCounterStep::Skip
        } else {
            ProgramCounterStep::Next
        }
    }

    /// Maps the step onto the program counter that has already been moved
    /// past the current instruction.
    #[inline]
    pub fn apply(&self, program_counter: usize) -> usize {
        match *self {
            ProgramCounterStep::Next => program_counter,
            ProgramCounterStep::Skip => program_counter + memory::opcodes::SIZE,
            ProgramCounterStep::Jump(pointer) => pointer,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
/// Represents a command from the interpreter up to the collaborators.
pub enum Operation {
    /// If no action has to be taken.
    None,
    /// The frame buffer was cleared
    Clear,
    /// The frame buffer was drawn to
    Draw,
    /// The instruction had no effect, because of the contained fault.
    Ignored(ProcessError),
}
