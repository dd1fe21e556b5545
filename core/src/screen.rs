use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// The FrameBuffer is indexed as [y][x]; each cell is 0 or 1.
pub type FrameBuffer = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// # Screen
/// The 64x32 monochrome display surface.
///
/// Pixels only ever hold 0 or 1: `set` normalizes its input and sprites are
/// applied one bit at a time with XOR.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Screen {
    pixels: FrameBuffer,
}

impl Screen {
    pub fn new() -> Self {
        Screen {
            pixels: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
        }
    }

    /// Turns every pixel off.
    pub fn clear(&mut self) {
        self.pixels = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    }

    /// The pixel at (x, y), or None if it is off the screen.
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        self.pixels.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Sets the pixel at (x, y) on or off; coordinates off the screen are ignored.
    pub fn set(&mut self, x: usize, y: usize, on: bool) {
        if let Some(pixel) = self.pixels.get_mut(y).and_then(|row| row.get_mut(x)) {
            *pixel = u8::from(on);
        }
    }

    /// XORs one 8 pixel sprite row onto the screen with its left edge at (x, y).
    ///
    /// Bits that would land past the right edge are clipped, as is a row below
    /// the bottom edge. Returns true if any lit pixel was turned off.
    pub fn xor_row(&mut self, x: usize, y: usize, row: u8) -> bool {
        let line = match self.pixels.get_mut(y) {
            Some(line) => line,
            None => return false,
        };
        let mut erased = false;
        for bit in 0..8 {
            let column = x + bit;
            if column >= DISPLAY_WIDTH {
                break;
            }
            let sprite_pixel = (row >> (7 - bit)) & 0x1;
            erased |= sprite_pixel & line[column] == 1;
            line[column] ^= sprite_pixel;
        }
        erased
    }

    /// XORs a whole sprite with its top left corner at (x, y), wrapping the
    /// origin onto the screen and clipping the sprite at the edges.
    ///
    /// Returns true if any lit pixel was turned off.
    pub fn draw_sprite(&mut self, x: usize, y: usize, sprite: &[u8]) -> bool {
        let x = x % DISPLAY_WIDTH;
        let y = y % DISPLAY_HEIGHT;
        let mut collision = false;
        for (offset, row) in sprite.iter().enumerate() {
            if y + offset >= DISPLAY_HEIGHT {
                break;
            }
            collision |= self.xor_row(x, y + offset, *row);
        }
        collision
    }

    /// The current contents for a renderer to copy.
    pub fn frame(&self) -> &FrameBuffer {
        &self.pixels
    }

    /// Number of lit pixels.
    pub fn lit(&self) -> usize {
        self.pixels
            .iter()
            .flat_map(|row| row.iter())
            .filter(|pixel| **pixel == 1)
            .count()
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Screen {
    /// Renders the screen as rows of `#` and `.`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.pixels.iter() {
            let line: String = row
                .iter()
                .map(|pixel| if *pixel == 1 { '#' } else { '.' })
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
