use std::time::Duration;

/// The display is 64 pixels wide
pub const DISPLAY_WIDTH: usize = 64;
/// and 32 pixels tall
pub const DISPLAY_HEIGHT: usize = 32;

/// 4096 bytes of addressable memory, 0x000..=0xFFF
pub const MEMORY_SIZE: usize = 4096;

/// Mask applied to every register-derived address so it stays within memory.
pub const ADDRESS_MASK: u16 = 0x0FFF;

/// Programs are loaded into memory here and the pc starts here.
pub const PROGRAM_START: u16 = 0x200;

/// Everything below `PROGRAM_START` is reserved for the interpreter.
pub const MAX_PROGRAM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// Depth of the call stack.
pub const STACK_SIZE: usize = 16;

/// Number of keys on the hexadecimal keypad.
pub const KEY_COUNT: usize = 16;

/// The register that doubles as the carry/borrow/collision flag.
pub const VF: usize = 0xF;

/// Instructions executed per second by default.
pub const INSTRUCTIONS_PER_SECOND: u32 = 700;

/// Timer decrements and redraws per second.
pub const FRAMES_PER_SECOND: u32 = 60;

/// Highest instruction or frame rate accepted from the command line.
pub const MAX_RATE: u32 = 1_000_000;

/// Upper bound on wall time accounted for by one scheduler iteration.
pub const MAX_FRAME_DELTA: Duration = Duration::from_millis(250);

/// Where the font sprites live in memory.
pub const FONT_START: u16 = 0x050;

/// Each font glyph is 5 rows tall.
pub const FONT_GLYPH_SIZE: u16 = 5;

/// # Font
/// Sprites for the hexadecimal digits 0..F, each 8 pixels wide and 5 tall.
///
/// Only the upper nibble of each row is used, e.g. for 0:
/// ```text
/// 0xF0 -> 1111
/// 0x90 -> 1..1
/// 0x90 -> 1..1
/// 0x90 -> 1..1
/// 0xF0 -> 1111
/// ```
#[rustfmt::skip]
pub const FONT_SET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
