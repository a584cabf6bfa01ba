//! Drives the chipset one tick at a time, a tick being a batch of instructions
//! followed by exactly one timer decrement.
use crate::{
    chip8::ChipSet,
    devices::{AudioCommands, DisplayCommands, Keypad},
    opcode::Operation,
    ProcessError,
};

/// What happened during a single tick.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickSummary {
    /// amount of instructions executed
    pub executed: usize,
    /// amount of clear and draw operations handed to the display
    pub draws: usize,
    /// amount of instructions that were skipped as no-ops
    pub ignored: usize,
}

pub struct Scheduler<D, A>
where
    D: DisplayCommands,
    A: AudioCommands,
{
    chip: ChipSet,
    display: D,
    audio: A,
    /// whether the audio collaborator was told to play
    sounding: bool,
}

impl<D, A> Scheduler<D, A>
where
    D: DisplayCommands,
    A: AudioCommands,
{
    pub fn new(chip: ChipSet, display: D, audio: A) -> Self {
        Self {
            chip,
            display,
            audio,
            sounding: false,
        }
    }

    /// Runs a tick with the configured amount of instructions.
    pub fn frame(&mut self, keypad: Keypad) -> Result<TickSummary, ProcessError> {
        let instructions = self.chip.get_config().instructions_per_tick;
        self.tick(keypad, instructions)
    }

    /// Installs the keypad, executes the instructions and decrements the timers once.
    /// The timers are left alone if a step fails.
    pub fn tick(
        &mut self,
        keypad: Keypad,
        instructions_per_tick: usize,
    ) -> Result<TickSummary, ProcessError> {
        self.chip.set_keypad(keypad);

        let mut summary = TickSummary::default();
        for _ in 0..instructions_per_tick {
            match self.chip.step()? {
                Operation::None => {}
                Operation::Clear => {
                    self.display.clear_display();
                    summary.draws += 1;
                }
                Operation::Draw => {
                    self.display.display(self.chip.get_display());
                    summary.draws += 1;
                }
                Operation::Ignored(_) => summary.ignored += 1,
            }
            summary.executed += 1;
        }
        self.update_audio();

        self.chip.tick_timers();
        self.update_audio();

        Ok(summary)
    }

    /// Tells the audio collaborator about sound timer transitions.
    fn update_audio(&mut self) {
        let sounding = self.chip.get_sound_timer() > 0;
        if sounding == self.sounding {
            return;
        }
        if sounding {
            self.audio.start_sound();
        } else {
            self.audio.stop_sound();
        }
        self.sounding = sounding;
    }

    /// Resets the chipset, clears the display and silences the audio.
    pub fn reset(&mut self) {
        self.chip.reset();
        self.display.clear_display();
        self.update_audio();
    }

    pub fn chip(&self) -> &ChipSet {
        &self.chip
    }

    pub fn chip_mut(&mut self) -> &mut ChipSet {
        &mut self.chip
    }
}
