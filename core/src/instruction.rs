use std::fmt;

use crate::error::{Error, Result};

/// # Instructions
///
/// Chip-8 opcodes are 16 bits each. Which instruction an opcode encodes is
/// cased on some combination of:
/// - `(n, _, _, _)` broad categorization; applies to all opcodes
/// - `(_, _, _, n)` specific behavior within a category
/// - `(_, _, n, n)` more specific behavior within a category
/// - `(_, n, n, n)` some fixed function that doesn't require variables (e.g. CLS)
///
/// Nibbles not used to pick the instruction carry its operands:
/// - `(_, n, n, n)` a 12-bit address `nnn`
/// - `(_, _, n, n)` an 8-bit immediate `kk`
/// - `(_, n, _, _)` the register Vx, or the range of registers V0..=Vx
/// - `(_, _, n, _)` the register Vy
/// - `(_, _, _, n)` a 4-bit sprite height `n`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// 0nnn: call a machine code routine (ignored)
    Sys(u16),
    /// 00E0
    Cls,
    /// 00EE
    Ret,
    /// 1nnn
    Jump(u16),
    /// 2nnn
    Call(u16),
    /// 3xkk
    SkipEqImm { x: u8, kk: u8 },
    /// 4xkk
    SkipNeImm { x: u8, kk: u8 },
    /// 5xy0
    SkipEqReg { x: u8, y: u8 },
    /// 6xkk
    LoadImm { x: u8, kk: u8 },
    /// 7xkk
    AddImm { x: u8, kk: u8 },
    /// 8xy0
    Move { x: u8, y: u8 },
    /// 8xy1
    Or { x: u8, y: u8 },
    /// 8xy2
    And { x: u8, y: u8 },
    /// 8xy3
    Xor { x: u8, y: u8 },
    /// 8xy4
    AddReg { x: u8, y: u8 },
    /// 8xy5
    Sub { x: u8, y: u8 },
    /// 8xy6
    Shr { x: u8, y: u8 },
    /// 8xy7
    SubN { x: u8, y: u8 },
    /// 8xyE
    Shl { x: u8, y: u8 },
    /// 9xy0
    SkipNeReg { x: u8, y: u8 },
    /// Annn
    LoadI(u16),
    /// Bnnn
    JumpV0(u16),
    /// Cxkk
    Rand { x: u8, kk: u8 },
    /// Dxyn
    Draw { x: u8, y: u8, n: u8 },
    /// Ex9E
    SkipPressed { x: u8 },
    /// ExA1
    SkipNotPressed { x: u8 },
    /// Fx07
    LoadDelay { x: u8 },
    /// Fx0A
    WaitKey { x: u8 },
    /// Fx15
    SetDelay { x: u8 },
    /// Fx18
    SetSound { x: u8 },
    /// Fx1E
    AddI { x: u8 },
    /// Fx29
    LoadGlyph { x: u8 },
    /// Fx33
    Bcd { x: u8 },
    /// Fx55
    StoreRegisters { x: u8 },
    /// Fx65
    LoadRegisters { x: u8 },
}

/// Splits an opcode into its four nibbles, most significant first
fn nibbles(op: u16) -> (u8, u8, u8, u8) {
    (
        ((op & 0xF000) >> 12) as u8,
        ((op & 0x0F00) >> 8) as u8,
        ((op & 0x00F0) >> 4) as u8,
        (op & 0x000F) as u8,
    )
}

impl Instruction {
    /// Selects the Instruction encoded by an opcode
    pub fn decode(op: u16) -> Result<Self> {
        let nnn = op & 0x0FFF;
        let kk = (op & 0x00FF) as u8;

        let instruction = match nibbles(op) {
            (0x0, 0x0, 0xE, 0x0) => Instruction::Cls,
            (0x0, 0x0, 0xE, 0xE) => Instruction::Ret,
            (0x0, ..) => Instruction::Sys(nnn),
            (0x1, ..) => Instruction::Jump(nnn),
            (0x2, ..) => Instruction::Call(nnn),
            (0x3, x, ..) => Instruction::SkipEqImm { x, kk },
            (0x4, x, ..) => Instruction::SkipNeImm { x, kk },
            (0x5, x, y, 0x0) => Instruction::SkipEqReg { x, y },
            (0x6, x, ..) => Instruction::LoadImm { x, kk },
            (0x7, x, ..) => Instruction::AddImm { x, kk },
            (0x8, x, y, 0x0) => Instruction::Move { x, y },
            (0x8, x, y, 0x1) => Instruction::Or { x, y },
            (0x8, x, y, 0x2) => Instruction::And { x, y },
            (0x8, x, y, 0x3) => Instruction::Xor { x, y },
            (0x8, x, y, 0x4) => Instruction::AddReg { x, y },
            (0x8, x, y, 0x5) => Instruction::Sub { x, y },
            (0x8, x, y, 0x6) => Instruction::Shr { x, y },
            (0x8, x, y, 0x7) => Instruction::SubN { x, y },
            (0x8, x, y, 0xE) => Instruction::Shl { x, y },
            (0x9, x, y, 0x0) => Instruction::SkipNeReg { x, y },
            (0xA, ..) => Instruction::LoadI(nnn),
            (0xB, ..) => Instruction::JumpV0(nnn),
            (0xC, x, ..) => Instruction::Rand { x, kk },
            (0xD, x, y, n) => Instruction::Draw { x, y, n },
            (0xE, x, 0x9, 0xE) => Instruction::SkipPressed { x },
            (0xE, x, 0xA, 0x1) => Instruction::SkipNotPressed { x },
            (0xF, x, 0x0, 0x7) => Instruction::LoadDelay { x },
            (0xF, x, 0x0, 0xA) => Instruction::WaitKey { x },
            (0xF, x, 0x1, 0x5) => Instruction::SetDelay { x },
            (0xF, x, 0x1, 0x8) => Instruction::SetSound { x },
            (0xF, x, 0x1, 0xE) => Instruction::AddI { x },
            (0xF, x, 0x2, 0x9) => Instruction::LoadGlyph { x },
            (0xF, x, 0x3, 0x3) => Instruction::Bcd { x },
            (0xF, x, 0x5, 0x5) => Instruction::StoreRegisters { x },
            (0xF, x, 0x6, 0x5) => Instruction::LoadRegisters { x },
            _ => return Err(Error::UnsupportedOpcode(op)),
        };
        Ok(instruction)
    }
}

/// Disassembles into the conventional Chip-8 mnemonics
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Instruction::Sys(nnn) => write!(f, "SYS {:#05X}", nnn),
            Instruction::Cls => write!(f, "CLS"),
            Instruction::Ret => write!(f, "RET"),
            Instruction::Jump(nnn) => write!(f, "JP {:#05X}", nnn),
            Instruction::Call(nnn) => write!(f, "CALL {:#05X}", nnn),
            Instruction::SkipEqImm { x, kk } => write!(f, "SE V{:X}, {:#04X}", x, kk),
            Instruction::SkipNeImm { x, kk } => write!(f, "SNE V{:X}, {:#04X}", x, kk),
            Instruction::SkipEqReg { x, y } => write!(f, "SE V{:X}, V{:X}", x, y),
            Instruction::LoadImm { x, kk } => write!(f, "LD V{:X}, {:#04X}", x, kk),
            Instruction::AddImm { x, kk } => write!(f, "ADD V{:X}, {:#04X}", x, kk),
            Instruction::Move { x, y } => write!(f, "LD V{:X}, V{:X}", x, y),
            Instruction::Or { x, y } => write!(f, "OR V{:X}, V{:X}", x, y),
            Instruction::And { x, y } => write!(f, "AND V{:X}, V{:X}", x, y),
            Instruction::Xor { x, y } => write!(f, "XOR V{:X}, V{:X}", x, y),
            Instruction::AddReg { x, y } => write!(f, "ADD V{:X}, V{:X}", x, y),
            Instruction::Sub { x, y } => write!(f, "SUB V{:X}, V{:X}", x, y),
            Instruction::Shr { x, y } => write!(f, "SHR V{:X}, V{:X}", x, y),
            Instruction::SubN { x, y } => write!(f, "SUBN V{:X}, V{:X}", x, y),
            Instruction::Shl { x, y } => write!(f, "SHL V{:X}, V{:X}", x, y),
            Instruction::SkipNeReg { x, y } => write!(f, "SNE V{:X}, V{:X}", x, y),
            Instruction::LoadI(nnn) => write!(f, "LD I, {:#05X}", nnn),
            Instruction::JumpV0(nnn) => write!(f, "JP V0, {:#05X}", nnn),
            Instruction::Rand { x, kk } => write!(f, "RND V{:X}, {:#04X}", x, kk),
            Instruction::Draw { x, y, n } => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            Instruction::SkipPressed { x } => write!(f, "SKP V{:X}", x),
            Instruction::SkipNotPressed { x } => write!(f, "SKNP V{:X}", x),
            Instruction::LoadDelay { x } => write!(f, "LD V{:X}, DT", x),
            Instruction::WaitKey { x } => write!(f, "LD V{:X}, K", x),
            Instruction::SetDelay { x } => write!(f, "LD DT, V{:X}", x),
            Instruction::SetSound { x } => write!(f, "LD ST, V{:X}", x),
            Instruction::AddI { x } => write!(f, "ADD I, V{:X}", x),
            Instruction::LoadGlyph { x } => write!(f, "LD F, V{:X}", x),
            Instruction::Bcd { x } => write!(f, "LD B, V{:X}", x),
            Instruction::StoreRegisters { x } => write!(f, "LD [I], V{:X}", x),
            Instruction::LoadRegisters { x } => write!(f, "LD V{:X}, [I]", x),
        }
    }
}
