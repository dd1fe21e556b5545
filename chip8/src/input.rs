use log::debug;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::EventPump;

use chip8_core::{Control, InputSource, Keypad, RunError};

/// # Keymap
/// Chip-8 input is generated with a hexadecimal keypad.
///
/// This original layout is mapped to the left 4 alphanumeric columns.
/// ```text
/// |1|2|3|C|      |1|2|3|4|
/// |4|5|6|D|  ->  |Q|W|E|R|
/// |7|8|9|E|  ->  |A|S|D|F|
/// |A|0|B|F|      |Z|X|C|V|
/// ```
pub fn keymap(key: Keycode) -> Option<u8> {
    match key {
        Keycode::Num1 => Some(0x1),
        Keycode::Num2 => Some(0x2),
        Keycode::Num3 => Some(0x3),
        Keycode::Num4 => Some(0xC),
        Keycode::Q => Some(0x4),
        Keycode::W => Some(0x5),
        Keycode::E => Some(0x6),
        Keycode::R => Some(0xD),
        Keycode::A => Some(0x7),
        Keycode::S => Some(0x8),
        Keycode::D => Some(0x9),
        Keycode::F => Some(0xE),
        Keycode::Z => Some(0xA),
        Keycode::X => Some(0x0),
        Keycode::C => Some(0xB),
        Keycode::V => Some(0xF),
        _ => None,
    }
}

/// Feeds the SDL event queue into the keypad latch.
pub struct SdlInput {
    events: EventPump,
}

impl SdlInput {
    pub fn new(sdl: &sdl2::Sdl) -> Result<Self, RunError> {
        let events = sdl.event_pump().map_err(RunError::Input)?;
        Ok(SdlInput { events })
    }
}

impl InputSource for SdlInput {
    /// Closing the window or pressing Escape asks to quit.
    fn poll(&mut self, keypad: &mut Keypad) -> Result<Control, RunError> {
        for event in self.events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => {
                    debug!("quit requested");
                    return Ok(Control::Quit);
                }
                Event::KeyDown {
                    keycode: Some(key),
                    repeat: false,
                    ..
                } => {
                    if let Some(kc) = keymap(key) {
                        keypad.press(kc);
                    }
                }
                Event::KeyUp {
                    keycode: Some(key), ..
                } => {
                    if let Some(kc) = keymap(key) {
                        keypad.release(kc);
                    }
                }
                _ => continue,
            }
        }
        Ok(Control::Continue)
    }
}

#[cfg(test)]
mod test_keymap {
    use super::*;

    #[test]
    fn test_keypad_rows() {
        let rows = [
            ([Keycode::Num1, Keycode::Num2, Keycode::Num3, Keycode::Num4], [0x1, 0x2, 0x3, 0xC]),
            ([Keycode::Q, Keycode::W, Keycode::E, Keycode::R], [0x4, 0x5, 0x6, 0xD]),
            ([Keycode::A, Keycode::S, Keycode::D, Keycode::F], [0x7, 0x8, 0x9, 0xE]),
            ([Keycode::Z, Keycode::X, Keycode::C, Keycode::V], [0xA, 0x0, 0xB, 0xF]),
        ];
        for (keys, values) in rows.iter() {
            for (key, value) in keys.iter().zip(values.iter()) {
                assert_eq!(keymap(*key), Some(*value));
            }
        }
    }

    #[test]
    fn test_unmapped_keys() {
        assert_eq!(keymap(Keycode::Escape), None);
        assert_eq!(keymap(Keycode::Space), None);
        assert_eq!(keymap(Keycode::Num5), None);
    }
}
