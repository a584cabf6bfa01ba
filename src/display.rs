//! The monochrome frame buffer and the sprite drawing.
use std::fmt;

use crate::definitions::display;

/// The graphics of the Chip 8 are black and white and the screen has a total of `2048` pixels
/// `(64 x 32)`. Rows are indexed by `y`, columns by `x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: [[bool; display::WIDTH]; display::HEIGHT],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self {
            pixels: [[false; display::WIDTH]; display::HEIGHT],
        }
    }

    /// Turns every pixel off.
    pub fn clear(&mut self) {
        for row in self.pixels.iter_mut() {
            for pixel in row.iter_mut() {
                *pixel = false;
            }
        }
    }

    /// XORs the sprite onto the buffer with its top left corner at `(x, y)`.
    /// Every sprite row is one byte, the most significant bit is the left most pixel.
    /// Pixels leaving the screen wrap around on both axes.
    ///
    /// Returns true if any pixel was turned off.
    pub fn draw_sprite(&mut self, x: usize, y: usize, sprite: &[u8]) -> bool {
        let mut collision = false;

        for (r, row) in sprite.iter().enumerate() {
            let py = (y + r) % display::HEIGHT;

            for c in 0..display::SPRITE_WIDTH {
                let mask = 0x80 >> c;
                if row & mask == 0 {
                    continue;
                }

                let px = (x + c) % display::WIDTH;
                let pixel = &mut self.pixels[py][px];
                if *pixel {
                    collision = true;
                }
                *pixel = !*pixel;
            }
        }

        collision
    }

    /// The pixel at column `x` and row `y`.
    ///
    /// # Panics
    /// If the coordinates are outside of the screen.
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.pixels[y][x]
    }

    /// All rows of the screen.
    pub fn rows(&self) -> &[[bool; display::WIDTH]] {
        &self.pixels[..]
    }

    pub fn is_blank(&self) -> bool {
        self.pixels.iter().flatten().all(|pixel| !pixel)
    }

    /// The amount of pixels that are turned on.
    pub fn lit(&self) -> usize {
        self.pixels.iter().flatten().filter(|pixel| **pixel).count()
    }
}

impl fmt::Display for FrameBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let border = "-".repeat(display::WIDTH);
        writeln!(f, "/{}\\", border)?;
        for row in self.pixels.iter() {
            write!(f, "|")?;
            for pixel in row.iter() {
                write!(f, "{}", if *pixel { '*' } else { ' ' })?;
            }
            writeln!(f, "|")?;
        }
        writeln!(f, "\\{}/", border)
    }
}
