//! Opcode definitions.
//!
//! The instruction set is a closed enumeration. Every stage dispatches on it
//! with an exhaustive `match`, so adding an opcode forces each stage to decide
//! what it does with it.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Operation performed by an instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// `rd <- imm`.
    Movc,
    /// `rd <- rs1 + rs2`.
    Add,
    /// `rd <- rs1 + imm`.
    Addi,
    /// `rd <- rs1 - rs2`.
    Sub,
    /// `rd <- rs1 * rs2`, occupies Execute for several cycles.
    Mul,
    /// `rd <- rs1 & rs2`.
    And,
    /// `rd <- rs1 | rs2`.
    Or,
    /// `rd <- rs1 ^ rs2`.
    Xor,
    /// `rd <- mem[rs1 + imm]`.
    Load,
    /// `rd <- mem[rs1 + rs2]`.
    Ldr,
    /// `mem[rs2 + imm] <- rs1`.
    Store,
    /// Stops the simulation once it retires.
    Halt,
    /// `pc <- rs1 + imm`.
    Jump,
    /// `pc <- pc + imm` when the delayed condition is zero.
    Bz,
    /// `pc <- pc + imm` when the delayed condition is non-zero.
    Bnz,
    /// No operation. Replaces every instruction after a decoded HALT.
    #[default]
    Nop,
}

impl Opcode {
    /// All opcodes, in mnemonic table order.
    pub const ALL: [Opcode; 16] = [
        Opcode::Movc,
        Opcode::Add,
        Opcode::Addi,
        Opcode::Sub,
        Opcode::Mul,
        Opcode::And,
        Opcode::Or,
        Opcode::Xor,
        Opcode::Load,
        Opcode::Ldr,
        Opcode::Store,
        Opcode::Halt,
        Opcode::Jump,
        Opcode::Bz,
        Opcode::Bnz,
        Opcode::Nop,
    ];

    /// Canonical upper-case mnemonic.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Movc => "MOVC",
            Opcode::Add => "ADD",
            Opcode::Addi => "ADDI",
            Opcode::Sub => "SUB",
            Opcode::Mul => "MUL",
            Opcode::And => "AND",
            Opcode::Or => "OR",
            Opcode::Xor => "XOR",
            Opcode::Load => "LOAD",
            Opcode::Ldr => "LDR",
            Opcode::Store => "STORE",
            Opcode::Halt => "HALT",
            Opcode::Jump => "JUMP",
            Opcode::Bz => "BZ",
            Opcode::Bnz => "BNZ",
            Opcode::Nop => "NOP",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Returned when a mnemonic names no opcode.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown opcode '{0}'")]
pub struct UnknownOpcode(pub String);

impl FromStr for Opcode {
    type Err = UnknownOpcode;

    /// Parses a mnemonic, ignoring case. `EX-OR` is accepted as XOR.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        if upper == "EX-OR" {
            return Ok(Opcode::Xor);
        }
        Opcode::ALL
            .iter()
            .copied()
            .find(|op| op.mnemonic() == upper)
            .ok_or_else(|| UnknownOpcode(s.trim().to_string()))
    }
}
