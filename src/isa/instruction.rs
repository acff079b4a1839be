//! Decoded instruction record.
//!
//! An `Instruction` is immutable once loaded. Register ids and the immediate
//! are zero for operations that do not use them.

use std::fmt;

use super::opcodes::Opcode;

/// A single decoded program instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Instruction {
    /// Operation to perform.
    pub opcode: Opcode,
    /// Destination register id.
    pub rd: usize,
    /// First source register id.
    pub rs1: usize,
    /// Second source register id.
    pub rs2: usize,
    /// Signed immediate.
    pub imm: i32,
}

impl Instruction {
    /// `MOVC rd, #imm`.
    pub fn movc(rd: usize, imm: i32) -> Self {
        Self {
            opcode: Opcode::Movc,
            rd,
            imm,
            ..Default::default()
        }
    }

    /// Three-register form used by ADD, SUB, MUL, AND, OR, XOR and LDR.
    pub fn rrr(opcode: Opcode, rd: usize, rs1: usize, rs2: usize) -> Self {
        Self {
            opcode,
            rd,
            rs1,
            rs2,
            imm: 0,
        }
    }

    /// Register-immediate form used by ADDI and LOAD.
    pub fn rri(opcode: Opcode, rd: usize, rs1: usize, imm: i32) -> Self {
        Self {
            opcode,
            rd,
            rs1,
            imm,
            ..Default::default()
        }
    }

    /// `STORE rs1, rs2, #imm`: writes `rs1` to `rs2 + imm`.
    pub fn store(rs1: usize, rs2: usize, imm: i32) -> Self {
        Self {
            opcode: Opcode::Store,
            rs1,
            rs2,
            imm,
            ..Default::default()
        }
    }

    /// `JUMP rs1, #imm`.
    pub fn jump(rs1: usize, imm: i32) -> Self {
        Self {
            opcode: Opcode::Jump,
            rs1,
            imm,
            ..Default::default()
        }
    }

    /// `BZ #imm` or `BNZ #imm`.
    pub fn branch(opcode: Opcode, imm: i32) -> Self {
        Self {
            opcode,
            imm,
            ..Default::default()
        }
    }

    pub fn halt() -> Self {
        Self {
            opcode: Opcode::Halt,
            ..Default::default()
        }
    }

    pub fn nop() -> Self {
        Self::default()
    }
}

impl fmt::Display for Instruction {
    /// Formats the instruction in assembly syntax, e.g. `ADD,R3,R1,R2`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = self.opcode;
        match op {
            Opcode::Movc => write!(f, "{},R{},#{}", op, self.rd, self.imm),
            Opcode::Add
            | Opcode::Sub
            | Opcode::Mul
            | Opcode::And
            | Opcode::Or
            | Opcode::Xor
            | Opcode::Ldr => write!(f, "{},R{},R{},R{}", op, self.rd, self.rs1, self.rs2),
            Opcode::Addi | Opcode::Load => {
                write!(f, "{},R{},R{},#{}", op, self.rd, self.rs1, self.imm)
            }
            Opcode::Store => write!(f, "{},R{},R{},#{}", op, self.rs1, self.rs2, self.imm),
            Opcode::Jump => write!(f, "{},R{},#{}", op, self.rs1, self.imm),
            Opcode::Bz | Opcode::Bnz => write!(f, "{},#{}", op, self.imm),
            Opcode::Halt | Opcode::Nop => write!(f, "{}", op),
        }
    }
}
