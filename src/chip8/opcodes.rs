use crate::{
    definitions::display::fontset,
    opcode::{Instruction, Operation, ProgramCounterStep},
    OpcodeError, ProcessError,
};

use super::ChipSet;

impl ChipSet {
    /// Applies the effect of a single instruction. The program counter already
    /// points past the instruction, the returned step is applied on top of it.
    ///
    /// Nothing is changed if an error is returned.
    pub(super) fn execute(
        &mut self,
        instruction: Instruction,
    ) -> Result<(ProgramCounterStep, Operation), ProcessError> {
        use Instruction::*;

        let mut operation = Operation::None;
        let step = match instruction {
            ClearScreen => {
                self.frame.clear();
                operation = Operation::Clear;
                ProgramCounterStep::Next
            }
            Return => {
                let pointer = self.registers.pop_stack()?;
                log::debug!("return to {:#06X}", pointer);
                ProgramCounterStep::Jump(pointer)
            }
            Jump { nnn } => ProgramCounterStep::Jump(nnn),
            Call { nnn } => {
                // the counter already points to the instruction after the call
                self.registers
                    .push_stack(self.registers.program_counter())?;
                log::debug!("call {:#06X} depth {}", nnn, self.registers.stack().len());
                ProgramCounterStep::Jump(nnn)
            }
            SkipIfEqual { x, nn } => ProgramCounterStep::cond(self.registers.get(x) == nn),
            SkipIfNotEqual { x, nn } => ProgramCounterStep::cond(self.registers.get(x) != nn),
            SkipIfRegistersEqual { x, y } => {
                ProgramCounterStep::cond(self.registers.get(x) == self.registers.get(y))
            }
            Load { x, nn } => {
                self.registers.set(x, nn);
                ProgramCounterStep::Next
            }
            Add { x, nn } => {
                // let VX overflow, but ignore carry
                self.registers.set(x, self.registers.get(x).wrapping_add(nn));
                ProgramCounterStep::Next
            }
            Assign { .. }
            | Or { .. }
            | And { .. }
            | Xor { .. }
            | AddRegister { .. }
            | Subtract { .. }
            | ShiftRight { .. }
            | ReverseSubtract { .. }
            | ShiftLeft { .. } => {
                self.arithmetic(instruction);
                ProgramCounterStep::Next
            }
            SkipIfRegistersNotEqual { x, y } => {
                ProgramCounterStep::cond(self.registers.get(x) != self.registers.get(y))
            }
            SetIndex { nnn } => {
                self.registers.set_index(nnn);
                ProgramCounterStep::Next
            }
            JumpOffset { nnn } => {
                ProgramCounterStep::Jump(nnn + self.registers.get(0) as usize)
            }
            Random { x, nn } => {
                // using a fill bytes call here, as the trait RngCore does not
                // support random u8.
                let mut rand: [u8; 1] = [0];
                self.rng.fill_bytes(&mut rand);
                self.registers.set(x, rand[0] & nn);
                ProgramCounterStep::Next
            }
            Draw { x, y, n } => {
                let sprite = self.memory.slice(self.registers.index(), n)?;
                let coorx = self.registers.get(x) as usize;
                let coory = self.registers.get(y) as usize;

                let collision = self.frame.draw_sprite(coorx, coory, sprite);
                self.registers.set_flag(collision);

                operation = Operation::Draw;
                ProgramCounterStep::Next
            }
            SkipIfPressed { x } => {
                let key = self.registers.get(x) as usize;
                ProgramCounterStep::cond(self.keypad.is_pressed(key))
            }
            SkipIfNotPressed { x } => {
                let key = self.registers.get(x) as usize;
                ProgramCounterStep::cond(!self.keypad.is_pressed(key))
            }
            GetDelayTimer { x } => {
                self.registers.set(x, self.timers.delay());
                ProgramCounterStep::Next
            }
            AwaitKeyPress { x } => {
                // polls instead of waiting, the register keeps its value if
                // nothing is pressed
                if let Some(key) = self.keypad.first_pressed() {
                    self.registers.set(x, key as u8);
                }
                ProgramCounterStep::Next
            }
            SetDelayTimer { x } => {
                self.timers.set_delay(self.registers.get(x));
                ProgramCounterStep::Next
            }
            SetSoundTimer { x } => {
                self.timers.set_sound(self.registers.get(x));
                ProgramCounterStep::Next
            }
            AddToIndex { x } => {
                // VF is not affected
                let index = self.registers.index() + self.registers.get(x) as usize;
                self.registers.set_index(index);
                ProgramCounterStep::Next
            }
            SetIndexToGlyph { x } => {
                let digit = self.registers.get(x) as usize;
                self.registers
                    .set_index(fontset::LOCATION + digit * fontset::GLYPH_SIZE);
                ProgramCounterStep::Next
            }
            StoreBcd { x } => {
                let r = self.registers.get(x);
                let bcd = self.memory.slice_mut(self.registers.index(), 3)?;

                bcd[0] = r / 100; // 246u8 / 100 => 2
                bcd[1] = r / 10 % 10; // 246u8 / 10 => 24 % 10 => 4
                bcd[2] = r % 10; // 246u8 % 10 => 6
                ProgramCounterStep::Next
            }
            StoreRegisters { x } => {
                let index = self.registers.index();
                self.memory
                    .slice_mut(index, x + 1)?
                    .copy_from_slice(&self.registers.registers()[..=x]);
                // I is moved past the last written cell
                self.registers.set_index(index + x + 1);
                ProgramCounterStep::Next
            }
            LoadRegisters { x } => {
                let index = self.registers.index();
                let values = self.memory.slice(index, x + 1)?;
                self.registers.range_mut(x).copy_from_slice(values);
                self.registers.set_index(index + x + 1);
                ProgramCounterStep::Next
            }
            Unknown(opcode) => {
                log::warn!("An unsupported opcode was used {:#06X?}", opcode);
                operation = Operation::Ignored(OpcodeError::Unknown(opcode).into());
                ProgramCounterStep::Next
            }
        };

        Ok((step, operation))
    }

    /// The `8XYN` register operations. Both operands are read before anything
    /// is written, the flag is written before `VX`.
    fn arithmetic(&mut self, instruction: Instruction) {
        use Instruction::*;

        let (x, y) = match instruction {
            Assign { x, y }
            | Or { x, y }
            | And { x, y }
            | Xor { x, y }
            | AddRegister { x, y }
            | Subtract { x, y }
            | ReverseSubtract { x, y } => (x, y),
            ShiftRight { x } | ShiftLeft { x } => (x, x),
            _ => return,
        };
        let vx = self.registers.get(x);
        let vy = self.registers.get(y);

        let (flag, result) = match instruction {
            Assign { .. } => (None, vy),
            Or { .. } => (None, vx | vy),
            And { .. } => (None, vx & vy),
            Xor { .. } => (None, vx ^ vy),
            AddRegister { .. } => {
                let sum = vx as u16 + vy as u16;
                (Some(sum > 0xFF), (sum & 0xFF) as u8)
            }
            Subtract { .. } => (Some(vx > vy), vx.wrapping_sub(vy)),
            ShiftRight { .. } => (Some(vx & 1 == 1), vx >> 1),
            ReverseSubtract { .. } => (Some(vy > vx), vy.wrapping_sub(vx)),
            // the most significant bit is shifted out
            ShiftLeft { .. } => (Some((vx >> 7) & 1 == 1), vx.wrapping_shl(1)),
            _ => return,
        };

        if let Some(flag) = flag {
            self.registers.set_flag(flag);
        }
        self.registers.set(x, result);
    }
}
