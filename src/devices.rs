use std::{fmt, sync::Arc};

use parking_lot::Mutex;

use crate::{definitions::keyboard, display::FrameBuffer};

#[cfg_attr(test, mockall::automock)]
/// The traits responsible for the display based code
pub trait DisplayCommands {
    /// Will clear the display
    fn clear_display(&mut self);
    /// Will display all from the pixels
    fn display(&mut self, frame: &FrameBuffer);
}

#[cfg_attr(test, mockall::automock)]
/// The traits responsible for the sound based code, the tone
/// shall last as long as the sound timer is not zero.
pub trait AudioCommands {
    /// The sound timer was set to a non zero value.
    fn start_sound(&mut self);
    /// The sound timer reached zero.
    fn stop_sound(&mut self);
}

/// A collaborator that neither shows nor plays anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct Headless;

impl DisplayCommands for Headless {
    fn clear_display(&mut self) {}

    fn display(&mut self, _frame: &FrameBuffer) {}
}

impl AudioCommands for Headless {
    fn start_sound(&mut self) {}

    fn stop_sound(&mut self) {}
}

/// Input is done with a hex keyboard that has 16 keys ranging `0-F`. The `8`, `4`, `6`, and
/// `2` keys are typically used for directional input. Three opcodes are used to detect input.
/// One skips an instruction if a specific key is pressed, while another does the same if a
/// specific key is not pressed. The third polls for a key press, and then stores it in one of
/// the data registers.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keypad {
    keys: [bool; keyboard::SIZE],
}

impl Keypad {
    pub fn new() -> Self {
        Keypad::default()
    }

    /// Creates the keypad from the given states.
    pub fn from_keys(keys: [bool; keyboard::SIZE]) -> Self {
        Self { keys }
    }

    /// # Panics
    /// If the key is not in `0x0..=0xF`.
    pub fn set_key(&mut self, key: usize, to: bool) {
        debug_assert!(key < keyboard::SIZE);
        self.keys[key] = to;
    }

    pub fn press(&mut self, key: usize) {
        self.set_key(key, true)
    }

    pub fn release(&mut self, key: usize) {
        self.set_key(key, false)
    }

    pub fn toggle_key(&mut self, key: usize) {
        self.set_key(key, !self.keys[key])
    }

    pub fn set_all(&mut self, keys: [bool; keyboard::SIZE]) {
        self.keys = keys;
    }

    pub fn release_all(&mut self) {
        self.keys = [false; keyboard::SIZE];
    }

    /// Keys outside of `0x0..=0xF` are never pressed.
    pub fn is_pressed(&self, key: usize) -> bool {
        self.keys.get(key).copied().unwrap_or(false)
    }

    /// The lowest key that is currently pressed.
    pub fn first_pressed(&self) -> Option<usize> {
        self.keys.iter().position(|pressed| *pressed)
    }

    pub fn get_keys(&self) -> &[bool] {
        &self.keys
    }
}

impl fmt::Display for Keypad {
    /// Prints the keypad in its physical layout, pressed keys are
    /// shown with their hex digit.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in keyboard::LAYOUT.iter() {
            for key in row.iter() {
                if self.keys[*key] {
                    write!(f, "{:X}", key)?;
                } else {
                    write!(f, ".")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A keypad that can be written from the input thread while the
/// driver takes one snapshot per tick.
#[derive(Default, Debug, Clone)]
pub struct SharedKeypad {
    inner: Arc<Mutex<Keypad>>,
}

impl SharedKeypad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_key(&self, key: usize, to: bool) {
        self.inner.lock().set_key(key, to);
    }

    pub fn set_all(&self, keys: [bool; keyboard::SIZE]) {
        self.inner.lock().set_all(keys);
    }

    /// Copies the current state out.
    pub fn snapshot(&self) -> Keypad {
        *self.inner.lock()
    }
}
