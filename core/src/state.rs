use crate::constants::{ADDRESS_MASK, PROGRAM_START};
use crate::memory::Memory;
use crate::screen::Screen;
use crate::stack::Stack;

/// Whether the CPU is fetching instructions or parked on FX0A.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Running,
    /// Waiting for any key; its value goes into `register`.
    WaitingForKey { register: u8 },
}

/// A snapshot of the Chip8 internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the carry, borrow and collision flag
/// - (i) a 16-bit memory address register, kept within 0..=0xFFF
///
/// Counter
/// - (pc) a 16-bit program counter, kept within 0..=0xFFF
///
/// Stack
/// - 16 return addresses and the pointer into them
///
/// Timers
/// - 2 8-bit timers (delay & sound), decremented once per frame
///
/// ## Memory
/// - 4096 bytes of addressable memory
/// - 64x32 screen
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct State {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub stack: Stack,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub memory: Memory,
    pub screen: Screen,
    pub mode: Mode,
}

impl State {
    pub fn new() -> Self {
        State {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            stack: Stack::new(),
            delay_timer: 0,
            sound_timer: 0,
            memory: Memory::new(),
            screen: Screen::new(),
            mode: Mode::Running,
        }
    }

    /// Sets the program counter, wrapping it into the address space.
    pub fn jump_to(&mut self, addr: u16) {
        self.pc = addr & ADDRESS_MASK;
    }

    /// Moves the program counter past one 2-byte instruction.
    pub fn advance(&mut self) {
        self.jump_to(self.pc.wrapping_add(2));
    }

    /// Sets the index register, wrapping it into the address space.
    pub fn set_index(&mut self, addr: u16) {
        self.i = addr & ADDRESS_MASK;
    }

    /// Decrements both timers if nonzero.
    pub fn tick_timers(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test_state {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = State::new();
        assert_eq!(state.pc, 0x200);
        assert_eq!(state.i, 0);
        assert_eq!(state.v, [0; 16]);
        assert!(state.stack.is_empty());
        assert_eq!(state.mode, Mode::Running);
    }

    #[test]
    fn test_advance_wraps() {
        let mut state = State::new();
        state.pc = 0xFFE;
        state.advance();
        assert_eq!(state.pc, 0x000);
    }

    #[test]
    fn test_set_index_wraps() {
        let mut state = State::new();
        state.set_index(0x1005);
        assert_eq!(state.i, 0x005);
    }

    #[test]
    fn test_timers_floor_at_zero() {
        let mut state = State::new();
        state.delay_timer = 1;
        state.sound_timer = 0;
        state.tick_timers();
        state.tick_timers();
        assert_eq!(state.delay_timer, 0);
        assert_eq!(state.sound_timer, 0);
    }
}
