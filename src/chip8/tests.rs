use {
    super::ChipSet,
    crate::{
        config::{Config, FaultPolicy},
        definitions::{cpu, display::fontset, memory},
        devices::Keypad,
        opcode::{Opcode, Operation},
        resources::Rom,
        MemoryError, OpcodeError, ProcessError, RomError, StackError,
    },
    once_cell::sync::Lazy,
};

const ROM_NAME: &str = "LOOP";

/// preloading this as it get's called multiple times per unit
static BASE_ROM: Lazy<Rom> = Lazy::new(|| {
    // clear the screen, set V0 and jump back to the start
    Rom::new(ROM_NAME, &[0x00, 0xE0, 0x60, 0x01, 0x12, 0x00])
});

pub(super) fn get_base() -> Rom {
    BASE_ROM.clone()
}

/// will setup the default configured chip
pub(super) fn get_default_chip() -> ChipSet {
    setup_chip(get_base(), Config::default())
}

pub(super) fn setup_chip(rom: Rom, config: Config) -> ChipSet {
    let mut chip = ChipSet::with_config(rom, config).expect("The base rom is valid.");
    // fill up register with random values
    for x in 0..cpu::register::SIZE {
        chip.registers.set(x, rand::random());
    }
    chip
}

#[inline]
/// Will write the opcode to the memory location specified
pub(super) fn write_opcode_to_memory(chip: &mut ChipSet, from: usize, opcode: Opcode) {
    write_slice_to_memory(chip, from, &opcode.to_be_bytes());
}

#[inline]
/// Will write the slice to the memory location specified
pub(super) fn write_slice_to_memory(chip: &mut ChipSet, from: usize, data: &[u8]) {
    chip.memory
        .slice_mut(from, data.len())
        .expect("Test data has to fit into memory.")
        .copy_from_slice(data);
}

/// Writes the opcode to the current program counter and executes it.
pub(super) fn calc(chip: &mut ChipSet, opcode: Opcode) -> Result<Operation, ProcessError> {
    let pc = chip.registers.program_counter();
    write_opcode_to_memory(chip, pc, opcode);
    chip.step()
}

#[test]
fn test_new_chip() {
    let chip = ChipSet::new(get_base()).unwrap();
    assert_eq!(ROM_NAME, chip.get_name());
    assert_eq!(cpu::PROGRAM_COUNTER, chip.registers.program_counter());
    assert_eq!(
        Ok(&fontset::FONTSET[..]),
        chip.memory.slice(fontset::LOCATION, fontset::FONTSET.len())
    );
    assert!(chip.registers.registers().iter().all(|v| *v == 0));
    assert!(chip.frame.is_blank());
    assert_eq!(0, chip.get_delay_timer());
    assert_eq!(0, chip.get_sound_timer());
}

#[test]
fn test_invalid_roms() {
    assert_eq!(
        Err(ProcessError::Rom(RomError::Empty)),
        ChipSet::new(Rom::new("EMPTY", &[])).map(|_| ())
    );
    let large = vec![0x12; 0xE00];
    assert_eq!(
        Err(ProcessError::Rom(RomError::TooLarge {
            len: 0xE00,
            max: 0xDFF
        })),
        ChipSet::new(Rom::from(large)).map(|_| ())
    );
}

#[test]
/// test reading of the first opcode
fn test_step_fetches_big_endian() {
    let mut chip = get_default_chip();
    let opcode = 0xA00A;
    assert_eq!(Ok(Operation::None), calc(&mut chip, opcode));
    assert_eq!(chip.opcode, opcode);
    assert_eq!(0x00A, chip.registers.index());
    assert_eq!(
        cpu::PROGRAM_COUNTER + memory::opcodes::SIZE,
        chip.registers.program_counter()
    );
}

#[test]
fn test_end_to_end() {
    let rom = Rom::new("E2E", &[0x6A, 0x02, 0x00, 0xE0, 0x12, 0x04]);
    let mut chip = ChipSet::new(rom).unwrap();
    for _ in 0..5 {
        chip.step().unwrap();
    }
    assert_eq!(2, chip.registers.get(0xA));
    assert!(chip.frame.is_blank());
    assert_eq!(0x204, chip.registers.program_counter());
}

#[test]
fn test_reset() {
    let mut chip = get_default_chip();
    calc(&mut chip, 0x6105).unwrap();
    calc(&mut chip, 0xF115).unwrap();
    calc(&mut chip, 0x2400).unwrap();
    write_slice_to_memory(&mut chip, 0x300, &[0xFF]);

    chip.reset();

    assert_eq!(cpu::PROGRAM_COUNTER, chip.registers.program_counter());
    assert!(chip.registers.stack().is_empty());
    assert_eq!(0, chip.get_delay_timer());
    assert_eq!(Ok(0), chip.memory.read(0x300));
    assert_eq!(Ok(0x00E0), chip.memory.fetch(cpu::PROGRAM_COUNTER));
}

#[test]
fn test_load_keeps_program_on_error() {
    let mut chip = get_default_chip();
    assert_eq!(
        Err(ProcessError::Rom(RomError::Empty)),
        chip.load(Rom::new("EMPTY", &[]))
    );
    assert_eq!(ROM_NAME, chip.get_name());

    assert_eq!(Ok(()), chip.load(Rom::new("OTHER", &[0x6A, 0x02])));
    assert_eq!("OTHER", chip.get_name());
    assert_eq!(Ok(0x6A02), chip.memory.fetch(cpu::PROGRAM_COUNTER));
}

#[test]
fn test_fetch_out_of_bounds_halts() {
    let mut chip = setup_chip(
        get_base(),
        Config::new().with_fault_policy(FaultPolicy::Continue),
    );
    chip.registers.set_program_counter(memory::LAST);
    let err = ProcessError::Memory(MemoryError::Bounds { address: 0x1000 });
    assert_eq!(Err(err), chip.step());
    assert_eq!(Some(err), chip.get_halted());
    assert_eq!(Err(ProcessError::Halted), chip.step());
}

#[test]
fn test_unknown_opcode_is_ignored() {
    for policy in [FaultPolicy::Halt, FaultPolicy::Continue] {
        let mut chip = setup_chip(get_base(), Config::new().with_fault_policy(policy));
        let before = chip.registers.clone();
        let pc = chip.registers.program_counter();

        let opcode = 0x5121;
        assert_eq!(
            Ok(Operation::Ignored(OpcodeError::Unknown(opcode).into())),
            calc(&mut chip, opcode)
        );
        assert_eq!(pc + memory::opcodes::SIZE, chip.registers.program_counter());
        assert_eq!(before.registers(), chip.registers.registers());
        assert_eq!(None, chip.get_halted());
    }
}

#[test]
fn test_print() {
    let mut chip = get_default_chip();
    calc(&mut chip, 0x2300).unwrap();
    let printed = format!("{}", chip);
    assert!(printed.starts_with("Rom: LOOP\nPC: 0x0300 I: 0x0000 Opcode: 0x2300\n"));
    assert!(printed.contains("Stack: 0x0202\n"));
    assert!(printed.contains("0x0000 - 0x000F : 0xF090 0x9090"));
    assert!(printed.contains("0x0200 - 0x020F : 0x2300 0x6001 0x1200"));
    assert!(printed.contains("..."));
}

mod zero {
    use super::*;

    #[test]
    /// test clear display opcode
    /// `0x00E0`
    fn test_clear_display_opcode() {
        let mut chip = get_default_chip();
        chip.frame.draw_sprite(3, 3, &[0xFF, 0xFF]);

        let curr_pc = chip.registers.program_counter();
        assert_eq!(Ok(Operation::Clear), calc(&mut chip, 0x00E0));

        assert!(chip.frame.is_blank());
        assert_eq!(curr_pc + memory::opcodes::SIZE, chip.registers.program_counter());
    }

    #[test]
    /// test return from subroutine
    /// `0x00EE`
    fn test_return_subrutine() {
        let mut chip = get_default_chip();
        let curr_pc = chip.registers.program_counter();
        let base = 0x234;
        let opcode: Opcode = 0x2000 ^ base;

        assert_eq!(Ok(Operation::None), calc(&mut chip, opcode));
        assert_eq!(base as usize, chip.registers.program_counter());

        assert_eq!(Ok(Operation::None), calc(&mut chip, 0x00EE));

        // back at the instruction after the call
        assert_eq!(curr_pc + memory::opcodes::SIZE, chip.registers.program_counter());
        assert!(chip.registers.stack().is_empty());
    }

    #[test]
    fn test_return_on_empty_stack() {
        let mut chip = get_default_chip();
        let err = ProcessError::Stack(StackError::Underflow);
        assert_eq!(Err(err), calc(&mut chip, 0x00EE));
        assert_eq!(Some(err), chip.get_halted());
    }
}

mod one {
    use super::*;

    #[test]
    /// test a simple jump to the next address
    /// `1NNN`
    fn test_jump_address() {
        let mut chip = get_default_chip();
        let base = 0x0234;
        let opcode = 0x1000 ^ base as Opcode;

        assert_eq!(Ok(Operation::None), calc(&mut chip, opcode));

        assert_eq!(base, chip.registers.program_counter());
    }
}

mod two {
    use super::*;

    #[test]
    /// test inserting a location into the stack
    /// "2NNN"
    fn test_call_subrutine() {
        let mut chip = get_default_chip();
        let base = 0x234;
        let opcode = 0x2000 ^ base;
        let curr_pc = chip.registers.program_counter();

        assert_eq!(Ok(Operation::None), calc(&mut chip, opcode));

        assert_eq!(base as usize, chip.registers.program_counter());
        assert_eq!(curr_pc + memory::opcodes::SIZE, chip.registers.stack()[0]);
    }

    #[test]
    /// 16 nested calls fit, the 17th does not
    fn test_call_depth() {
        let mut chip = get_default_chip();
        for i in 0..cpu::stack::SIZE {
            let target = 0x300 + i * 2;
            assert_eq!(Ok(Operation::None), calc(&mut chip, 0x2000 ^ target as Opcode));
        }
        assert_eq!(cpu::stack::SIZE, chip.registers.stack().len());

        let err = ProcessError::Stack(StackError::Overflow);
        assert_eq!(Err(err), calc(&mut chip, 0x2400));
        assert_eq!(cpu::stack::SIZE, chip.registers.stack().len());
        assert_eq!(Err(ProcessError::Halted), chip.step());
    }

    #[test]
    fn test_call_overflow_continue() {
        let mut chip = setup_chip(
            get_base(),
            Config::new().with_fault_policy(FaultPolicy::Continue),
        );
        for i in 0..cpu::stack::SIZE {
            let target = 0x300 + i * 2;
            calc(&mut chip, 0x2000 ^ target as Opcode).unwrap();
        }
        let pc = chip.registers.program_counter();

        let err = ProcessError::Stack(StackError::Overflow);
        assert_eq!(Ok(Operation::Ignored(err)), calc(&mut chip, 0x2400));
        // the call became a no-op
        assert_eq!(pc + memory::opcodes::SIZE, chip.registers.program_counter());
        assert_eq!(None, chip.get_halted());
    }
}

mod three {
    use super::*;

    #[test]
    /// test the skip instruction if equal method
    /// `3XNN`
    fn test_skip_instruction_if_const_equals() {
        let mut chip = get_default_chip();
        let register = 0x1;
        let solution = 0x3;
        // skip register 1 if it is equal to 03
        let opcode = 0x3 << (3 * 4) ^ (register << (2 * 4)) ^ solution;

        chip.registers.set(register as usize, 0x4);
        let curr_pc = chip.registers.program_counter();
        assert_eq!(Ok(Operation::None), calc(&mut chip, opcode));
        assert_eq!(chip.registers.program_counter(), curr_pc + 1 * memory::opcodes::SIZE);

        let curr_pc = chip.registers.program_counter();
        chip.registers.set(register as usize, solution as u8);
        assert_eq!(Ok(Operation::None), calc(&mut chip, opcode));
        assert_eq!(chip.registers.program_counter(), curr_pc + 2 * memory::opcodes::SIZE);
    }
}

mod four {
    use super::*;

    #[test]
    /// `4XNN`
    /// Skips the next instruction if VX doesn't equal NN.
    fn test_skip_instruction_if_const_not_equals() {
        let mut chip = get_default_chip();
        let register = 0x1;
        let solution = 0x3;
        let opcode = 0x4 << (3 * 4) ^ (register << (2 * 4)) ^ solution;

        // will not skip next instruction
        let curr_pc = chip.registers.program_counter();
        chip.registers.set(register as usize, solution as u8);
        assert_eq!(Ok(Operation::None), calc(&mut chip, opcode));
        assert_eq!(chip.registers.program_counter(), curr_pc + 1 * memory::opcodes::SIZE);

        // skip next block because it's not equal
        let curr_pc = chip.registers.program_counter();
        chip.registers.set(register as usize, 0x66);
        assert_eq!(Ok(Operation::None), calc(&mut chip, opcode));
        assert_eq!(chip.registers.program_counter(), curr_pc + 2 * memory::opcodes::SIZE);
    }
}

mod five {
    use super::*;

    #[test]
    /// 5XY0
    /// Skips the next instruction if VX equals VY.
    fn test_skip_instruction_if_register_equals() {
        let mut chip = get_default_chip();
        let registery = 0x1;
        let registerx = 0x2;
        let opcode = 0x5 << (3 * 4) ^ (registerx << (2 * 4)) ^ (registery << (1 * 4));

        chip.registers.set(registerx as usize, 0x6);
        chip.registers.set(registery as usize, 0x66);
        let curr_pc = chip.registers.program_counter();
        assert_eq!(Ok(Operation::None), calc(&mut chip, opcode));
        assert_eq!(chip.registers.program_counter(), curr_pc + 1 * memory::opcodes::SIZE);

        chip.registers.set(registerx as usize, 0x66);
        let curr_pc = chip.registers.program_counter();
        assert_eq!(Ok(Operation::None), calc(&mut chip, opcode));
        assert_eq!(chip.registers.program_counter(), curr_pc + 2 * memory::opcodes::SIZE);
    }
}

mod six {
    use super::*;

    #[test]
    /// 6XNN
    /// Sets VX to NN, for every register and every constant.
    fn test_set_vx_to_nn() {
        let mut chip = get_default_chip();
        for register in 0..cpu::register::SIZE {
            for value in 0..=0xFFu16 {
                chip.registers.set_program_counter(cpu::PROGRAM_COUNTER);
                let opcode: Opcode = 0x6 << (3 * 4) ^ ((register as u16) << (2 * 4)) ^ value;

                assert_eq!(Ok(Operation::None), calc(&mut chip, opcode));
                assert_eq!(value as u8, chip.registers.get(register));
            }
        }
    }
}

mod seven {
    use super::*;

    #[test]
    /// 7XNN
    /// Adds NN to VX. (Carry flag is not changed)
    fn test_add_nn_to_vx() {
        let mut chip = get_default_chip();
        let register = 0x1;
        let value: u8 = 0x66;
        chip.registers.set(register, 0xFA);
        chip.registers.set(0xF, 0x0);
        let opcode: Opcode = 0x7 << (3 * 4) ^ ((register as u16) << (2 * 4)) ^ (value as u16);

        assert_eq!(Ok(Operation::None), calc(&mut chip, opcode));

        assert_eq!(0x60, chip.registers.get(register));
        assert_eq!(0x0, chip.registers.flag());
    }

    #[test]
    /// the result always wraps around
    fn test_add_wraps() {
        let mut chip = get_default_chip();
        for start in (0..=0xFFu16).step_by(17) {
            for nn in (0..=0xFFu16).step_by(13) {
                chip.registers.set_program_counter(cpu::PROGRAM_COUNTER);
                chip.registers.set(0x3, start as u8);
                calc(&mut chip, 0x7300 ^ nn).unwrap();
                assert_eq!(((start + nn) % 256) as u8, chip.registers.get(0x3));
            }
        }
    }
}

mod eight {
    use super::*;

    /// Runs `8XYN` with the given register values and returns `(VX, VF)`.
    fn eight(n: Opcode, vx: u8, vy: u8) -> (u8, u8) {
        let mut chip = get_default_chip();
        let (x, y) = (0x1, 0x2);
        chip.registers.set(x, vx);
        chip.registers.set(y, vy);
        let opcode = 0x8000 ^ ((x as Opcode) << 8) ^ ((y as Opcode) << 4) ^ n;
        assert_eq!(Ok(Operation::None), calc(&mut chip, opcode));
        (chip.registers.get(x), chip.registers.flag())
    }

    #[test]
    /// 8XY0
    fn test_move_value() {
        assert_eq!(0x42, eight(0x0, 0x12, 0x42).0);
    }

    #[test]
    /// 8XY1, 8XY2, 8XY3
    fn test_bit_operations() {
        assert_eq!(0b1110, eight(0x1, 0b1100, 0b1010).0);
        assert_eq!(0b1000, eight(0x2, 0b1100, 0b1010).0);
        assert_eq!(0b0110, eight(0x3, 0b1100, 0b1010).0);
    }

    #[test]
    /// 8XY4
    /// VF is set iff the sum does not fit into a byte
    fn test_add_with_carry() {
        for vx in (0..=0xFFu16).step_by(5) {
            for vy in (0..=0xFFu16).step_by(7) {
                let (res, flag) = eight(0x4, vx as u8, vy as u8);
                assert_eq!(((vx + vy) & 0xFF) as u8, res);
                assert_eq!((vx + vy > 0xFF) as u8, flag);
            }
        }
    }

    #[test]
    /// 8XY5
    fn test_subtract() {
        assert_eq!((0x10, 1), eight(0x5, 0x30, 0x20));
        assert_eq!((0xF0, 0), eight(0x5, 0x20, 0x30));
        // equal operands are not strictly greater
        assert_eq!((0x00, 0), eight(0x5, 0x20, 0x20));
    }

    #[test]
    /// 8XY6
    fn test_shift_right() {
        assert_eq!((0x7F, 1), eight(0x6, 0xFF, 0x00));
        assert_eq!((0x01, 0), eight(0x6, 0x02, 0xFF));
    }

    #[test]
    /// 8XY7
    fn test_reverse_subtract() {
        assert_eq!((0x10, 1), eight(0x7, 0x20, 0x30));
        assert_eq!((0xF0, 0), eight(0x7, 0x30, 0x20));
        assert_eq!((0x00, 0), eight(0x7, 0x20, 0x20));
    }

    #[test]
    /// 8XYE
    /// the most significant bit is the flag
    fn test_shift_left() {
        assert_eq!((0xFE, 1), eight(0xE, 0xFF, 0x00));
        assert_eq!((0x20, 0), eight(0xE, 0x10, 0x00));
        assert_eq!((0x00, 1), eight(0xE, 0x80, 0x00));
    }

    #[test]
    /// the flag is written first, so VF as target keeps the result
    fn test_flag_as_target() {
        let mut chip = get_default_chip();
        chip.registers.set(0xF, 0xFF);
        chip.registers.set(0x1, 0x02);
        assert_eq!(Ok(Operation::None), calc(&mut chip, 0x8F14));
        assert_eq!(0x01, chip.registers.get(0xF));
    }
}

mod nine {
    use super::*;

    #[test]
    /// 9XY0
    fn test_skip_instruction_if_register_not_equals() {
        let mut chip = get_default_chip();
        chip.registers.set(0x1, 0x5);
        chip.registers.set(0x2, 0x5);
        let curr_pc = chip.registers.program_counter();
        calc(&mut chip, 0x9120).unwrap();
        assert_eq!(chip.registers.program_counter(), curr_pc + memory::opcodes::SIZE);

        chip.registers.set(0x2, 0x6);
        let curr_pc = chip.registers.program_counter();
        calc(&mut chip, 0x9120).unwrap();
        assert_eq!(chip.registers.program_counter(), curr_pc + 2 * memory::opcodes::SIZE);
    }
}

mod a {
    use super::*;

    #[test]
    /// ANNN
    fn test_set_index() {
        let mut chip = get_default_chip();
        calc(&mut chip, 0xAFED).unwrap();
        assert_eq!(0xFED, chip.registers.index());
    }
}

mod b {
    use super::*;

    #[test]
    /// BNNN
    fn test_jump_with_offset() {
        let mut chip = get_default_chip();
        chip.registers.set(0x0, 0x12);
        calc(&mut chip, 0xB300).unwrap();
        assert_eq!(0x312, chip.registers.program_counter());
    }
}

mod c {
    use super::*;
    use rand::rngs::mock::StepRng;

    #[test]
    /// CXNN
    /// Sets VX to the result of a bitwise and operation on a random number and NN.
    fn test_bitwise_and_random() {
        let mut chip = get_default_chip();
        // creating a simple "random number generator" that will
        // allways return 0x42 for a simple test.
        chip.set_rng(Box::new(StepRng::new(0x42, 0)));

        let base = 0x42;
        let reg = 0x1;
        let anded = 0x60;
        let opcode: Opcode = 0xC << (3 * 4) ^ (reg as u16) << (2 * 4) ^ (anded as u16);

        assert_eq!(Ok(Operation::None), calc(&mut chip, opcode));
        assert_eq!(chip.registers.get(reg), anded & base);
    }

    #[test]
    fn test_seeded_random_repeats() {
        let config = Config::new().with_seed(7);
        let mut first = setup_chip(get_base(), config);
        let mut second = setup_chip(get_base(), config);
        for _ in 0..8 {
            first.registers.set_program_counter(cpu::PROGRAM_COUNTER);
            second.registers.set_program_counter(cpu::PROGRAM_COUNTER);
            calc(&mut first, 0xC5FF).unwrap();
            calc(&mut second, 0xC5FF).unwrap();
            assert_eq!(first.registers.get(0x5), second.registers.get(0x5));
        }
    }
}

mod d {
    use super::*;

    fn setup_draw(chip: &mut ChipSet, x: u8, y: u8, sprite: &[u8]) {
        write_slice_to_memory(chip, 0x400, sprite);
        chip.registers.set_index(0x400);
        chip.registers.set(0x1, x);
        chip.registers.set(0x2, y);
    }

    #[test]
    /// DXYN
    fn test_draw_and_collide() {
        let mut chip = get_default_chip();
        let sprite = [0xF0, 0x90, 0xF0];
        setup_draw(&mut chip, 10, 4, &sprite);

        assert_eq!(Ok(Operation::Draw), calc(&mut chip, 0xD123));
        assert_eq!(0, chip.registers.flag());
        assert!(chip.frame.get(10, 4) && chip.frame.get(13, 4));
        assert!(chip.frame.get(10, 5) && !chip.frame.get(11, 5));
        assert_eq!(0x400, chip.registers.index());
        let drawn = chip.frame.clone();

        // drawing twice restores the frame and collides
        assert_eq!(Ok(Operation::Draw), calc(&mut chip, 0xD123));
        assert_eq!(1, chip.registers.flag());
        assert!(chip.frame.is_blank());

        // and once more brings the sprite back without collision
        assert_eq!(Ok(Operation::Draw), calc(&mut chip, 0xD123));
        assert_eq!(0, chip.registers.flag());
        assert_eq!(drawn, chip.frame);
    }

    #[test]
    fn test_draw_wraps() {
        let mut chip = get_default_chip();
        setup_draw(&mut chip, 60, 31, &[0xFF, 0x81]);
        assert_eq!(Ok(Operation::Draw), calc(&mut chip, 0xD122));
        assert!(chip.frame.get(63, 31) && chip.frame.get(0, 31) && chip.frame.get(3, 31));
        assert!(chip.frame.get(60, 0) && chip.frame.get(3, 0));
        assert!(!chip.frame.get(61, 0));
    }

    #[test]
    fn test_draw_glyph() {
        let mut chip = get_default_chip();
        chip.registers.set(0x3, 0x0);
        chip.registers.set(0x1, 0);
        chip.registers.set(0x2, 0);
        calc(&mut chip, 0xF329).unwrap();
        assert_eq!(Ok(Operation::Draw), calc(&mut chip, 0xD125));
        assert_eq!(14, chip.frame.lit());
    }

    #[test]
    fn test_draw_out_of_memory() {
        let mut chip = setup_chip(
            get_base(),
            Config::new().with_fault_policy(FaultPolicy::Continue),
        );
        chip.registers.set_index(0xFFE);
        chip.registers.set(0xF, 0x7);
        let err = ProcessError::Memory(MemoryError::Bounds { address: 0x1000 });

        assert_eq!(Ok(Operation::Ignored(err)), calc(&mut chip, 0xD124));
        // nothing was touched
        assert!(chip.frame.is_blank());
        assert_eq!(0x7, chip.registers.flag());
    }
}

mod e {
    use super::*;

    #[test]
    fn test_skip_key_pressed() {
        let mut chip = get_default_chip();
        let mut keypad = Keypad::new();
        keypad.press(0x1);
        chip.set_keypad(keypad);

        for (i, key) in [0x0u8, 0x1].iter().enumerate() {
            chip.registers.set(0x4, *key);
            let pc = chip.registers.program_counter();
            assert_eq!(Ok(Operation::None), calc(&mut chip, 0xE49E));
            assert_eq!(chip.registers.program_counter(), pc + (i + 1) * memory::opcodes::SIZE);
        }
    }

    #[test]
    fn test_skip_key_not_pressed() {
        let mut chip = get_default_chip();
        let mut keypad = Keypad::new();
        keypad.press(0x1);
        chip.set_keypad(keypad);

        for (i, key) in [0x1u8, 0x0].iter().enumerate() {
            chip.registers.set(0x4, *key);
            let pc = chip.registers.program_counter();
            assert_eq!(Ok(Operation::None), calc(&mut chip, 0xE4A1));
            assert_eq!(chip.registers.program_counter(), pc + (i + 1) * memory::opcodes::SIZE);
        }
    }

    #[test]
    fn test_key_out_of_range_is_not_pressed() {
        let mut chip = get_default_chip();
        chip.set_keypad(Keypad::from_keys([true; 16]));
        chip.registers.set(0x4, 0x10);
        let pc = chip.registers.program_counter();
        calc(&mut chip, 0xE4A1).unwrap();
        assert_eq!(chip.registers.program_counter(), pc + 2 * memory::opcodes::SIZE);
    }
}

mod f {
    use super::*;

    #[test]
    /// FX07, FX15, FX18
    fn test_timers() {
        let mut chip = get_default_chip();
        chip.registers.set(0x1, 0x30);
        chip.registers.set(0x2, 0x20);
        calc(&mut chip, 0xF115).unwrap();
        calc(&mut chip, 0xF218).unwrap();
        assert_eq!(0x30, chip.get_delay_timer());
        assert_eq!(0x20, chip.get_sound_timer());

        chip.tick_timers();
        calc(&mut chip, 0xF307).unwrap();
        assert_eq!(0x2F, chip.registers.get(0x3));
        assert_eq!(0x1F, chip.get_sound_timer());
    }

    #[test]
    /// FX0A does not block
    fn test_poll_key() {
        let mut chip = get_default_chip();
        chip.registers.set(0x5, 0xAA);

        let pc = chip.registers.program_counter();
        assert_eq!(Ok(Operation::None), calc(&mut chip, 0xF50A));
        assert_eq!(0xAA, chip.registers.get(0x5));
        assert_eq!(pc + memory::opcodes::SIZE, chip.registers.program_counter());

        let mut keypad = Keypad::new();
        keypad.press(0xC);
        keypad.press(0x9);
        chip.set_keypad(keypad);
        calc(&mut chip, 0xF50A).unwrap();
        assert_eq!(0x9, chip.registers.get(0x5));
    }

    #[test]
    /// FX1E
    fn test_add_to_index_wraps() {
        let mut chip = get_default_chip();
        chip.registers.set_index(0xFFE);
        chip.registers.set(0x1, 0x04);
        chip.registers.set(0xF, 0x0);
        calc(&mut chip, 0xF11E).unwrap();
        assert_eq!(0x002, chip.registers.index());
        assert_eq!(0x0, chip.registers.flag());
    }

    #[test]
    /// FX29
    fn test_glyph_address() {
        let mut chip = get_default_chip();
        chip.registers.set(0x1, 0xA);
        calc(&mut chip, 0xF129).unwrap();
        assert_eq!(0xA * 5, chip.registers.index());
    }

    #[test]
    /// FX33
    fn test_bcd() {
        let mut chip = get_default_chip();
        chip.registers.set(0x1, 157);
        chip.registers.set_index(0x300);
        calc(&mut chip, 0xF133).unwrap();
        assert_eq!(Ok(&[1, 5, 7][..]), chip.memory.slice(0x300, 3));
        assert_eq!(0x300, chip.registers.index());
    }

    #[test]
    /// FX55
    fn test_store_registers() {
        let mut chip = get_default_chip();
        for x in 0..cpu::register::SIZE {
            chip.registers.set(x, x as u8 + 1);
        }
        chip.registers.set_index(0x300);
        calc(&mut chip, 0xF355).unwrap();

        assert_eq!(Ok(&[1, 2, 3, 4, 0][..]), chip.memory.slice(0x300, 5));
        assert_eq!(0x304, chip.registers.index());
    }

    #[test]
    /// FX65
    fn test_load_registers() {
        let mut chip = get_default_chip();
        write_slice_to_memory(&mut chip, 0x300, &[9, 8, 7]);
        chip.registers.set(0x3, 0x33);
        chip.registers.set_index(0x300);
        calc(&mut chip, 0xF265).unwrap();

        assert_eq!(&[9, 8, 7, 0x33], &chip.registers.registers()[..4]);
        assert_eq!(0x303, chip.registers.index());
    }

    #[test]
    fn test_store_out_of_memory_halts() {
        let mut chip = get_default_chip();
        chip.registers.set_index(0xFFC);
        let err = ProcessError::Memory(MemoryError::Bounds { address: 0x1000 });
        assert_eq!(Err(err), calc(&mut chip, 0xFF55));
        // nothing was written
        assert_eq!(Ok(&[0, 0, 0, 0][..]), chip.memory.slice(0xFFC, 4));
        assert_eq!(Err(ProcessError::Halted), chip.step());
    }
}
