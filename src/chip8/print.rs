//! The pretty print implementation written for the [`ChipSet`](super::ChipSet).
//! This implementation was split up into this file for smaller file sizes and higher
//! cohesion.

use super::ChipSet;
use crate::{definitions::memory, opcode::Opcode};
use once_cell::sync::Lazy;
use std::fmt::{self, Write};

/// The amount of opcodes printed per memory row.
const HEX_PRINT_STEP: usize = 8;

/// The amount of bytes per memory row.
const POINTER_INCREMENT: usize = HEX_PRINT_STEP * memory::opcodes::SIZE;

/// The values that are used when there are at lease two rows of zeros.
const FILLER_BASE: &str = "...";

/// The formatted string will be 2 sysbols for the prefix (0x)
/// and 4 for the rest long.
macro_rules! intformat {
    () => {
        "{:#06X}"
    };
}

/// Prepares the line that will be used, in the case that there is at least two lines of only zeros.
static ZERO_FILLER: Lazy<String> = Lazy::new(|| {
    let zero = format!(intformat!(), 0);
    let length = zero.len() * (HEX_PRINT_STEP - 2) + (HEX_PRINT_STEP - 1) - FILLER_BASE.len();
    let filler = " ".repeat(length / 2);
    format!("{}{}{}{}{}", zero, filler, FILLER_BASE, filler, zero)
});

/// will formatt the pointers according to definition
fn pointer(line: &mut String, from: usize, to: usize) -> fmt::Result {
    write!(line, concat!(intformat!(), " - ", intformat!(), " :"), from, to)
}

/// Prints a single row of memory, or the filler if `only_null` is set.
fn row(line: &mut String, from: usize, data: &[u8], only_null: bool) -> fmt::Result {
    pointer(line, from, from + data.len() - 1)?;
    if only_null {
        return write!(line, " {}", *ZERO_FILLER);
    }
    for pair in data.chunks(memory::opcodes::SIZE) {
        let opcode = pair
            .iter()
            .fold(0 as Opcode, |acc, byte| (acc << 8) | *byte as Opcode);
        write!(line, concat!(" ", intformat!()), opcode)?;
    }
    Ok(())
}

fn is_zero(data: &[u8]) -> bool {
    data.iter().all(|cell| *cell == 0)
}

impl ChipSet {
    /// Dumps the memory, runs of rows only containing zeros are collapsed.
    fn memory_dump(&self) -> Result<String, fmt::Error> {
        let mut out = String::new();
        let rows: Vec<&[u8]> = self.memory.cells().chunks(POINTER_INCREMENT).collect();

        let mut i = 0;
        while i < rows.len() {
            let from = i * POINTER_INCREMENT;
            if is_zero(rows[i]) {
                let run = rows[i..].iter().take_while(|data| is_zero(data)).count();
                if run >= 2 {
                    let to = (i + run) * POINTER_INCREMENT;
                    pointer(&mut out, from, to - 1)?;
                    writeln!(out, " {}", *ZERO_FILLER)?;
                    i += run;
                    continue;
                }
            }

            row(&mut out, from, rows[i], false)?;
            out.push('\n');
            i += 1;
        }
        Ok(out)
    }
}

impl fmt::Display for ChipSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registers = &self.registers;
        writeln!(f, "Rom: {}", self.name)?;
        writeln!(
            f,
            concat!(
                "PC: ",
                intformat!(),
                " I: ",
                intformat!(),
                " Opcode: ",
                intformat!()
            ),
            registers.program_counter(),
            registers.index(),
            self.opcode
        )?;
        writeln!(
            f,
            "Delay: {:#04X} Sound: {:#04X}",
            self.timers.delay(),
            self.timers.sound()
        )?;

        for (chunk, values) in registers.registers().chunks(HEX_PRINT_STEP).enumerate() {
            let first = chunk * HEX_PRINT_STEP;
            write!(f, "V{:X}-V{:X}:", first, first + values.len() - 1)?;
            for value in values {
                write!(f, " {:#04X}", value)?;
            }
            writeln!(f)?;
        }

        write!(f, "Stack:")?;
        for pointer in registers.stack() {
            write!(f, concat!(" ", intformat!()), pointer)?;
        }
        writeln!(f)?;

        if let Some(err) = self.halted {
            writeln!(f, "Halted: {}", err)?;
        }

        writeln!(f, "Memory:")?;
        write!(f, "{}", self.memory_dump()?)
    }
}
