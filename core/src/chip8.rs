use std::io::Read;

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::Config;
use crate::constants::MAX_PROGRAM_SIZE;
use crate::error::{Fault, LoadError};
use crate::instruction::{Flow, Instruction};
use crate::keypad::Keypad;
use crate::screen::FrameBuffer;
use crate::state::{Mode, State};

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - the latched `keypad` with public interfaces for manipulating it
///  - the random number generator behind CXKK
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - stepping the CPU
/// - advancing its timers
/// - inspecting its frame buffer for rendering by some display
pub struct Chip8 {
    state: State,
    keypad: Keypad,
    rng: StdRng,
    seed: Option<u64>,
    executed: u64,
}

impl Chip8 {
    pub fn new() -> Self {
        Self::with_seed(None)
    }

    /// A machine whose random numbers are reproducible when `seed` is given.
    pub fn with_seed(seed: Option<u64>) -> Self {
        Chip8 {
            state: State::new(),
            keypad: Keypad::new(),
            rng: Self::rng(seed),
            seed,
            executed: 0,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::with_seed(config.seed)
    }

    fn rng(seed: Option<u64>) -> StdRng {
        match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Reinitializes memory, registers, stack, timers, screen and keypad.
    ///
    /// The loaded program is discarded along with everything else.
    pub fn reset(&mut self) {
        self.state = State::new();
        self.keypad.release_all();
        self.rng = Self::rng(self.seed);
        self.executed = 0;
        debug!("machine reset");
    }

    /// Copy a program image into memory at 0x200.
    ///
    /// # Arguments
    /// * `program` the raw program bytes; at most 3584 of them
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), LoadError> {
        self.state.memory.load_program(program)?;
        debug!("loaded {} byte program", program.len());
        Ok(())
    }

    /// Load a rom from a source file
    ///
    /// # Arguments
    /// * `reader` a file reader that contains a ROM
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<(), LoadError> {
        // one byte past the limit is enough to tell an oversize image apart
        let mut program = Vec::new();
        reader
            .take(MAX_PROGRAM_SIZE as u64 + 1)
            .read_to_end(&mut program)?;
        self.load_program(&program)
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 4-bit representation of the key that was pressed
    pub fn key_press(&mut self, key: u8) {
        self.keypad.press(key);
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 4-bit representation of the key that was released
    pub fn key_release(&mut self, key: u8) {
        self.keypad.release(key);
    }

    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    pub fn keypad_mut(&mut self) -> &mut Keypad {
        &mut self.keypad
    }

    /// Advances the CPU by a single step
    /// - if awaiting a keypress, checks the keypad and either resumes or keeps waiting
    /// - otherwise fetches the opcode at the pc, moves the pc past it and executes it
    ///
    /// A `Fault` is reported for the instruction that raised it; the machine is
    /// left ready to execute the next one.
    pub fn step(&mut self) -> Result<Flow, Fault> {
        if let Mode::WaitingForKey { register } = self.state.mode {
            return Ok(self.resume(register));
        }

        let pc = self.state.pc;
        let fetched = self.state.memory.word(pc);
        self.state.advance();
        let op = fetched?;
        self.executed += 1;

        let instruction = Instruction::decode(op);
        trace!(
            "{:03X}  {:04X}  {:<16} v{:02X?} i{:03X}",
            pc,
            op,
            instruction.to_string(),
            self.state.v,
            self.state.i
        );
        instruction.execute(&mut self.state, &self.keypad, &mut self.rng)
    }

    /// Stores the lowest pressed key into `register`, if there is one.
    fn resume(&mut self, register: u8) -> Flow {
        match self.keypad.first_pressed() {
            Some(key) => {
                debug!("key {:X} released wait on V{:X}", key, register);
                self.state.v[register as usize] = key;
                self.state.mode = Mode::Running;
                Flow::Next
            }
            None => Flow::Wait,
        }
    }

    /// Decrements the delay and sound timers; called once per frame.
    pub fn tick_timers(&mut self) {
        self.state.tick_timers();
    }

    /// The current contents of the screen.
    pub fn frame(&self) -> &FrameBuffer {
        self.state.screen.frame()
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn is_waiting(&self) -> bool {
        self.state.mode != Mode::Running
    }

    /// Whether a frontend should currently be sounding a tone.
    pub fn sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    /// Number of instructions fetched since the last reset.
    pub fn instructions_executed(&self) -> u64 {
        self.executed
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}
