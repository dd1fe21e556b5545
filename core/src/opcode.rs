/// # Opcode
///
/// Accessors over a raw 16-bit instruction word, split into four nibbles
/// `(class, x, y, n)`.
///
/// `Instruction::decode` picks the instruction from `class`, refined where
/// needed by `n`, by `kk` or by the whole word (00E0, 00EE). The remaining
/// nibbles are operands:
/// - `addr` the low 12 bits, a jump target or index value
/// - `kk` the low byte, an immediate for Vx
/// - `x` register Vx, or the last register of the span V0..=Vx
/// - `y` register Vy
pub trait Opcode {
    /// Returns the Opcode's component nibbles.
    fn nibbles(&self) -> (u8, u8, u8, u8);

    /// The Opcode's most significant nibble, its instruction class.
    /// `[c___]`
    fn class(&self) -> u8;

    /// The Opcode's second nibble.
    /// `[_x__]`
    fn x(&self) -> u8;

    /// The Opcode's third nibble.
    /// `[__y_]`
    fn y(&self) -> u8;

    /// The Opcode's fourth nibble.
    /// `[___n]`
    fn n(&self) -> u8;

    /// The Opcode's least significant byte.
    /// `[__kk]`
    fn kk(&self) -> u8;

    /// The Opcode without its most significant nibble.
    /// `[_adr]`
    fn addr(&self) -> u16;
}

impl Opcode for u16 {
    fn nibbles(&self) -> (u8, u8, u8, u8) {
        (self.class(), self.x(), self.y(), self.n())
    }

    fn class(&self) -> u8 {
        ((self & 0xF000) >> 12) as u8
    }

    fn x(&self) -> u8 {
        ((self & 0x0F00) >> 8) as u8
    }

    fn y(&self) -> u8 {
        ((self & 0x00F0) >> 4) as u8
    }

    fn n(&self) -> u8 {
        (self & 0x000F) as u8
    }

    fn kk(&self) -> u8 {
        (self & 0x00FF) as u8
    }

    fn addr(&self) -> u16 {
        self & 0x0FFF
    }
}

/// Combines two subsequent memory bytes into an opcode, most significant first.
pub fn from_bytes(high: u8, low: u8) -> u16 {
    u16::from(high) << 8 | u16::from(low)
}
