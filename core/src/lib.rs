pub use chip8::Chip8;
pub use config::Config;
pub use error::{Fault, LoadError, RunError};
pub use instruction::{Flow, Instruction};
pub use keypad::Keypad;
pub use peripheral::{Control, DisplaySink, InputSource};
pub use scheduler::{Scheduler, Tick};
pub use screen::{FrameBuffer, Screen};

mod chip8;
mod config;
pub mod constants;
mod error;
pub mod instruction;
pub mod keypad;
pub mod memory;
mod opcode;
mod operations;
mod peripheral;
mod scheduler;
pub mod screen;
pub mod stack;
pub mod state;
