use crate::constants::KEY_COUNT;

/// # Keypad
/// The latched pressed status of the 16 hexadecimal keys.
///
/// ```text
/// |1|2|3|C|
/// |4|5|6|D|
/// |7|8|9|E|
/// |A|0|B|F|
/// ```
///
/// Written by an `InputSource`, read by the interpreter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Keypad {
    pressed: [bool; KEY_COUNT],
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pressed status of key; only the low nibble is considered.
    pub fn press(&mut self, key: u8) {
        self.pressed[usize::from(key & 0xF)] = true;
    }

    /// Unset the pressed status of key; only the low nibble is considered.
    pub fn release(&mut self, key: u8) {
        self.pressed[usize::from(key & 0xF)] = false;
    }

    pub fn set(&mut self, key: u8, pressed: bool) {
        self.pressed[usize::from(key & 0xF)] = pressed;
    }

    pub fn is_pressed(&self, key: u8) -> bool {
        self.pressed[usize::from(key & 0xF)]
    }

    /// The lowest numbered key currently held down.
    pub fn first_pressed(&self) -> Option<u8> {
        self.pressed.iter().position(|p| *p).map(|key| key as u8)
    }

    pub fn release_all(&mut self) {
        self.pressed = [false; KEY_COUNT];
    }
}
