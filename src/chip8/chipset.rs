use rand::RngCore;

use crate::{
    config::{Config, FaultPolicy},
    devices::Keypad,
    display::FrameBuffer,
    memory::MemoryBus,
    opcode::{Instruction, Opcode, Operation},
    registers::RegisterFile,
    resources::Rom,
    timer::Timers,
    ProcessError,
};

/// The ChipSet struct represents the current state
/// of the system, it contains all the structures
/// needed for emulating an instance of the
/// Chip8 CPU.
pub struct ChipSet {
    /// name of the loaded rom
    pub(super) name: String,
    /// the last fetched opcode, all two bytes long and stored big-endian
    pub(super) opcode: Opcode,
    /// The memory as it was right after loading, used to reset the chipset.
    pub(super) image: MemoryBus,
    pub(super) memory: MemoryBus,
    pub(super) registers: RegisterFile,
    /// Both count down at 60 hertz, until they reach 0.
    pub(super) timers: Timers,
    pub(super) frame: FrameBuffer,
    /// The keys as handed over by the input collaborator before the current tick.
    pub(super) keypad: Keypad,
    /// This stores the random number generator, used by the chipset.
    /// It is stored into the chipset, so as to enable simple mocking
    /// of the given type.
    pub(super) rng: Box<dyn RngCore + Send>,
    pub(super) config: Config,
    /// The fault that stopped the execution, if any.
    pub(super) halted: Option<ProcessError>,
}

impl ChipSet {
    /// will create a new chipset object with the default configuration
    pub fn new(rom: Rom) -> Result<Self, ProcessError> {
        Self::with_config(rom, Config::default())
    }

    pub fn with_config(rom: Rom, config: Config) -> Result<Self, ProcessError> {
        let image = Self::image(&rom)?;

        Ok(Self {
            name: rom.get_name().to_string(),
            opcode: 0,
            memory: image.clone(),
            image,
            registers: RegisterFile::new(),
            timers: Timers::new(),
            frame: FrameBuffer::new(),
            keypad: Keypad::new(),
            rng: config.rng(),
            config,
            halted: None,
        })
    }

    /// prepares the memory for the given rom
    fn image(rom: &Rom) -> Result<MemoryBus, ProcessError> {
        let mut image = MemoryBus::new();
        image.load(rom.get_data())?;
        log::info!(
            "loaded rom '{}' with {} bytes",
            rom.get_name(),
            rom.get_data().len()
        );
        Ok(image)
    }

    /// Replaces the program and resets the chipset. On error the current
    /// program stays untouched.
    pub fn load(&mut self, rom: Rom) -> Result<(), ProcessError> {
        self.image = Self::image(&rom)?;
        self.name = rom.get_name().to_string();
        self.reset();
        Ok(())
    }

    /// Puts the chipset back into the state it had right after loading.
    pub fn reset(&mut self) {
        log::info!("resetting chipset with rom '{}'", self.name);
        self.opcode = 0;
        self.memory = self.image.clone();
        self.registers.reset();
        self.timers.reset();
        self.frame.clear();
        self.keypad.release_all();
        self.halted = None;
    }

    /// Replaces the random number generator used by `CXNN`.
    pub fn set_rng(&mut self, rng: Box<dyn RngCore + Send>) {
        self.rng = rng;
    }

    /// will advance the program by a single step
    pub fn step(&mut self) -> Result<Operation, ProcessError> {
        if self.halted.is_some() {
            return Err(ProcessError::Halted);
        }

        let pointer = self.registers.program_counter();
        // without an instruction there is nothing that could be skipped
        self.opcode = match self.memory.fetch(pointer) {
            Ok(opcode) => opcode,
            Err(err) => return Err(self.halt(err.into())),
        };
        self.registers.advance();

        let instruction = Instruction::from(self.opcode);
        log::debug!("{:#06X} {:#06X} {:?}", pointer, self.opcode, instruction);

        match self.execute(instruction) {
            Ok((step, operation)) => {
                self.registers.step(step);
                Ok(operation)
            }
            Err(err) => match self.config.fault_policy {
                FaultPolicy::Continue if err.is_recoverable() => {
                    log::warn!(
                        "ignoring opcode {:#06X} at {:#06X}: {}",
                        self.opcode,
                        pointer,
                        err
                    );
                    Ok(Operation::Ignored(err))
                }
                _ => Err(self.halt(err)),
            },
        }
    }

    fn halt(&mut self, err: ProcessError) -> ProcessError {
        log::error!(
            "halting at {:#06X} after opcode {:#06X}: {}",
            self.registers.program_counter(),
            self.opcode,
            err
        );
        self.halted = Some(err);
        err
    }

    /// Will write keyboard data into internal keyboard representation.
    pub fn set_keypad(&mut self, keypad: Keypad) {
        self.keypad = keypad;
    }

    /// Will get the current state of the keyboard
    pub fn get_keypad(&self) -> &Keypad {
        &self.keypad
    }

    pub fn get_sound_timer(&self) -> u8 {
        self.timers.sound()
    }

    pub fn get_delay_timer(&self) -> u8 {
        self.timers.delay()
    }

    /// Decrements the delay and the sound timer.
    pub fn tick_timers(&mut self) {
        self.timers.tick();
    }

    pub fn get_display(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn get_memory(&self) -> &MemoryBus {
        &self.memory
    }

    pub fn get_registers(&self) -> &RegisterFile {
        &self.registers
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_config(&self) -> &Config {
        &self.config
    }

    /// The fault that halted the chipset.
    pub fn get_halted(&self) -> Option<ProcessError> {
        self.halted
    }
}
