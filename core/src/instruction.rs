use std::fmt;

use rand::RngCore;

use crate::error::Fault;
use crate::keypad::Keypad;
use crate::opcode::Opcode;
use crate::operations::*;
use crate::state::State;

/// What an executed instruction did to the flow of control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Fall through to the instruction after it.
    Next,
    /// The pc was set explicitly by a jump, call or return.
    Jump,
    /// The following instruction was skipped.
    Skip,
    /// The CPU is now waiting for a key press.
    Wait,
}

/// # Instructions
/// Every opcode decodes to exactly one of these, carrying the operands it uses.
/// Words that name no instruction decode to `Unknown`.
///
/// Register operands are register numbers (0x0..=0xF), not register values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0
    Clear,
    /// 00EE
    Return,
    /// 1NNN
    Jump(u16),
    /// 2NNN
    Call(u16),
    /// 3XKK
    SkipEqImm(u8, u8),
    /// 4XKK
    SkipNeImm(u8, u8),
    /// 5XY0
    SkipEqReg(u8, u8),
    /// 6XKK
    LoadImm(u8, u8),
    /// 7XKK
    AddImm(u8, u8),
    /// 8XY0
    Move(u8, u8),
    /// 8XY1
    Or(u8, u8),
    /// 8XY2
    And(u8, u8),
    /// 8XY3
    Xor(u8, u8),
    /// 8XY4
    AddReg(u8, u8),
    /// 8XY5
    Sub(u8, u8),
    /// 8XY6
    ShiftRight(u8),
    /// 8XY7
    SubN(u8, u8),
    /// 8XYE
    ShiftLeft(u8),
    /// 9XY0
    SkipNeReg(u8, u8),
    /// ANNN
    LoadIndex(u16),
    /// BNNN
    JumpOffset(u16),
    /// CXKK
    Random(u8, u8),
    /// DXYN
    Draw(u8, u8, u8),
    /// EX9E
    SkipKeyPressed(u8),
    /// EXA1
    SkipKeyReleased(u8),
    /// FX07
    ReadDelay(u8),
    /// FX0A
    WaitKey(u8),
    /// FX15
    SetDelay(u8),
    /// FX18
    SetSound(u8),
    /// FX1E
    AddIndex(u8),
    /// FX29
    LoadFont(u8),
    /// FX33
    Bcd(u8),
    /// FX55
    Store(u8),
    /// FX65
    Read(u8),
    Unknown(u16),
}

impl Instruction {
    /// Selects the correct Instruction for a given Opcode
    pub fn decode(op: u16) -> Self {
        let (x, y) = (op.x(), op.y());
        match op.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => Instruction::Clear,
            (0x0, 0x0, 0xE, 0xE) => Instruction::Return,
            (0x1, ..) => Instruction::Jump(op.addr()),
            (0x2, ..) => Instruction::Call(op.addr()),
            (0x3, ..) => Instruction::SkipEqImm(x, op.kk()),
            (0x4, ..) => Instruction::SkipNeImm(x, op.kk()),
            (0x5, .., 0x0) => Instruction::SkipEqReg(x, y),
            (0x6, ..) => Instruction::LoadImm(x, op.kk()),
            (0x7, ..) => Instruction::AddImm(x, op.kk()),
            (0x8, .., 0x0) => Instruction::Move(x, y),
            (0x8, .., 0x1) => Instruction::Or(x, y),
            (0x8, .., 0x2) => Instruction::And(x, y),
            (0x8, .., 0x3) => Instruction::Xor(x, y),
            (0x8, .., 0x4) => Instruction::AddReg(x, y),
            (0x8, .., 0x5) => Instruction::Sub(x, y),
            (0x8, .., 0x6) => Instruction::ShiftRight(x),
            (0x8, .., 0x7) => Instruction::SubN(x, y),
            (0x8, .., 0xE) => Instruction::ShiftLeft(x),
            (0x9, .., 0x0) => Instruction::SkipNeReg(x, y),
            (0xA, ..) => Instruction::LoadIndex(op.addr()),
            (0xB, ..) => Instruction::JumpOffset(op.addr()),
            (0xC, ..) => Instruction::Random(x, op.kk()),
            (0xD, ..) => Instruction::Draw(x, y, op.n()),
            (0xE, _, 0x9, 0xE) => Instruction::SkipKeyPressed(x),
            (0xE, _, 0xA, 0x1) => Instruction::SkipKeyReleased(x),
            (0xF, _, 0x0, 0x7) => Instruction::ReadDelay(x),
            (0xF, _, 0x0, 0xA) => Instruction::WaitKey(x),
            (0xF, _, 0x1, 0x5) => Instruction::SetDelay(x),
            (0xF, _, 0x1, 0x8) => Instruction::SetSound(x),
            (0xF, _, 0x1, 0xE) => Instruction::AddIndex(x),
            (0xF, _, 0x2, 0x9) => Instruction::LoadFont(x),
            (0xF, _, 0x3, 0x3) => Instruction::Bcd(x),
            (0xF, _, 0x5, 0x5) => Instruction::Store(x),
            (0xF, _, 0x6, 0x5) => Instruction::Read(x),
            _ => Instruction::Unknown(op),
        }
    }

    /// Applies the instruction to `state`.
    ///
    /// Expects the pc to already point past this instruction, so skips add a
    /// further 2 and calls push the advanced pc. A returned `Fault` means
    /// nothing was mutated.
    pub fn execute(
        self,
        state: &mut State,
        keys: &Keypad,
        rng: &mut dyn RngCore,
    ) -> Result<Flow, Fault> {
        let flow = match self {
            Instruction::Clear => clr(state),
            Instruction::Return => rts(state)?,
            Instruction::Jump(addr) => jump(state, addr),
            Instruction::Call(addr) => call(state, addr)?,
            Instruction::SkipEqImm(x, kk) => ske(state, x, kk),
            Instruction::SkipNeImm(x, kk) => skne(state, x, kk),
            Instruction::SkipEqReg(x, y) => skre(state, x, y),
            Instruction::LoadImm(x, kk) => load(state, x, kk),
            Instruction::AddImm(x, kk) => add(state, x, kk),
            Instruction::Move(x, y) => mv(state, x, y),
            Instruction::Or(x, y) => or(state, x, y),
            Instruction::And(x, y) => and(state, x, y),
            Instruction::Xor(x, y) => xor(state, x, y),
            Instruction::AddReg(x, y) => addr(state, x, y),
            Instruction::Sub(x, y) => sub(state, x, y),
            Instruction::ShiftRight(x) => shr(state, x),
            Instruction::SubN(x, y) => subn(state, x, y),
            Instruction::ShiftLeft(x) => shl(state, x),
            Instruction::SkipNeReg(x, y) => skrne(state, x, y),
            Instruction::LoadIndex(addr) => loadi(state, addr),
            Instruction::JumpOffset(addr) => jumpi(state, addr),
            Instruction::Random(x, kk) => rnd(state, x, kk, rng.next_u32() as u8),
            Instruction::Draw(x, y, n) => draw(state, x, y, n)?,
            Instruction::SkipKeyPressed(x) => skpr(state, keys, x),
            Instruction::SkipKeyReleased(x) => skup(state, keys, x),
            Instruction::ReadDelay(x) => moved(state, x),
            Instruction::WaitKey(x) => keyd(state, x),
            Instruction::SetDelay(x) => loads(state, x),
            Instruction::SetSound(x) => ld(state, x),
            Instruction::AddIndex(x) => addi(state, x),
            Instruction::LoadFont(x) => ldspr(state, x),
            Instruction::Bcd(x) => bcd(state, x)?,
            Instruction::Store(x) => stor(state, x)?,
            Instruction::Read(x) => read(state, x)?,
            Instruction::Unknown(opcode) => {
                return Err(Fault::UnknownOpcode {
                    opcode,
                    pc: current(state),
                })
            }
        };
        Ok(flow)
    }
}

/// Assembler style mnemonics, used when tracing execution.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Instruction::Clear => write!(f, "CLS"),
            Instruction::Return => write!(f, "RET"),
            Instruction::Jump(addr) => write!(f, "JP {:#05X}", addr),
            Instruction::Call(addr) => write!(f, "CALL {:#05X}", addr),
            Instruction::SkipEqImm(x, kk) => write!(f, "SE V{:X}, {:#04X}", x, kk),
            Instruction::SkipNeImm(x, kk) => write!(f, "SNE V{:X}, {:#04X}", x, kk),
            Instruction::SkipEqReg(x, y) => write!(f, "SE V{:X}, V{:X}", x, y),
            Instruction::LoadImm(x, kk) => write!(f, "LD V{:X}, {:#04X}", x, kk),
            Instruction::AddImm(x, kk) => write!(f, "ADD V{:X}, {:#04X}", x, kk),
            Instruction::Move(x, y) => write!(f, "LD V{:X}, V{:X}", x, y),
            Instruction::Or(x, y) => write!(f, "OR V{:X}, V{:X}", x, y),
            Instruction::And(x, y) => write!(f, "AND V{:X}, V{:X}", x, y),
            Instruction::Xor(x, y) => write!(f, "XOR V{:X}, V{:X}", x, y),
            Instruction::AddReg(x, y) => write!(f, "ADD V{:X}, V{:X}", x, y),
            Instruction::Sub(x, y) => write!(f, "SUB V{:X}, V{:X}", x, y),
            Instruction::ShiftRight(x) => write!(f, "SHR V{:X}", x),
            Instruction::SubN(x, y) => write!(f, "SUBN V{:X}, V{:X}", x, y),
            Instruction::ShiftLeft(x) => write!(f, "SHL V{:X}", x),
            Instruction::SkipNeReg(x, y) => write!(f, "SNE V{:X}, V{:X}", x, y),
            Instruction::LoadIndex(addr) => write!(f, "LD I, {:#05X}", addr),
            Instruction::JumpOffset(addr) => write!(f, "JP V0, {:#05X}", addr),
            Instruction::Random(x, kk) => write!(f, "RND V{:X}, {:#04X}", x, kk),
            Instruction::Draw(x, y, n) => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            Instruction::SkipKeyPressed(x) => write!(f, "SKP V{:X}", x),
            Instruction::SkipKeyReleased(x) => write!(f, "SKNP V{:X}", x),
            Instruction::ReadDelay(x) => write!(f, "LD V{:X}, DT", x),
            Instruction::WaitKey(x) => write!(f, "LD V{:X}, K", x),
            Instruction::SetDelay(x) => write!(f, "LD DT, V{:X}", x),
            Instruction::SetSound(x) => write!(f, "LD ST, V{:X}", x),
            Instruction::AddIndex(x) => write!(f, "ADD I, V{:X}", x),
            Instruction::LoadFont(x) => write!(f, "LD F, V{:X}", x),
            Instruction::Bcd(x) => write!(f, "LD B, V{:X}", x),
            Instruction::Store(x) => write!(f, "LD [I], V{:X}", x),
            Instruction::Read(x) => write!(f, "LD V{:X}, [I]", x),
            Instruction::Unknown(op) => write!(f, "DW {:#06X}", op),
        }
    }
}
