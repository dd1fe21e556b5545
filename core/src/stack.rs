use crate::constants::STACK_SIZE;

/// # Stack
/// Return addresses for up to 16 nested subroutine calls.
///
/// `sp` counts the entries in use. It never leaves `0..=16`: a push onto a
/// full stack or a pop from an empty one is refused and leaves it unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stack {
    entries: [u16; STACK_SIZE],
    sp: usize,
}

/// A push was attempted with every slot in use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Overflow;

/// A pop was attempted with no entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Underflow;

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, addr: u16) -> Result<(), Overflow> {
        let slot = self.entries.get_mut(self.sp).ok_or(Overflow)?;
        *slot = addr;
        self.sp += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16, Underflow> {
        let sp = self.sp.checked_sub(1).ok_or(Underflow)?;
        self.sp = sp;
        Ok(self.entries[sp])
    }

    pub fn len(&self) -> usize {
        self.sp
    }

    pub fn is_empty(&self) -> bool {
        self.sp == 0
    }

    /// The most recently pushed return address.
    pub fn peek(&self) -> Option<u16> {
        self.sp.checked_sub(1).map(|sp| self.entries[sp])
    }
}
