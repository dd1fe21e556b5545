use thiserror::Error;

/// Errors raised while placing a program image into memory.
///
/// Whenever one of these is returned the machine has not been touched.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("program image is empty")]
    Empty,
    #[error("program image is {size} bytes but at most {max} fit in memory")]
    TooLarge { size: usize, max: usize },
    #[error("unable to read program image: {0}")]
    Io(#[from] std::io::Error),
}

/// Conditions the interpreter reports while stepping.
///
/// None of these are fatal: the offending instruction is abandoned without
/// partial mutation and execution carries on with the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Fault {
    #[error("call at {pc:#05X} would exceed the 16 entry stack")]
    StackOverflow { pc: u16 },
    #[error("return at {pc:#05X} with an empty stack")]
    StackUnderflow { pc: u16 },
    #[error("unknown opcode {opcode:#06X} at {pc:#05X}")]
    UnknownOpcode { opcode: u16, pc: u16 },
    #[error("access of {len} bytes at {addr:#05X} runs past the end of memory")]
    AddressOutOfBounds { addr: u16, len: usize },
}

/// Errors that end a scheduler run; they come from the injected peripherals.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("display error: {0}")]
    Display(String),
    #[error("input error: {0}")]
    Input(String),
}
