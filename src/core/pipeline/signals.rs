//! Pipeline control signals and operation types.
//!
//! This module defines the control signals generated for each opcode and
//! carried implicitly through the pipeline: which sources Decode must
//! materialize, which ALU operation Execute performs and on which operands,
//! and whether Memory and Writeback have work to do.

use crate::isa::Opcode;

/// ALU operation types.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AluOp {
    /// Integer addition (also used for address and target computation).
    #[default]
    Add,
    /// Integer subtraction.
    Sub,
    /// Integer multiply (low 32 bits).
    Mul,
    /// Bitwise AND.
    And,
    /// Bitwise OR.
    Or,
    /// Bitwise XOR.
    Xor,
}

/// Source for ALU operand A.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpASrc {
    /// Use rs1 register value.
    #[default]
    Reg1,
    /// Use rs2 register value (STORE base register).
    Reg2,
    /// Use program counter value (BZ, BNZ).
    Pc,
    /// Use zero (MOVC).
    Zero,
}

/// Source for ALU operand B.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpBSrc {
    /// Use the signed immediate.
    #[default]
    Imm,
    /// Use rs2 register value.
    Reg2,
}

/// Control signals for pipeline stage execution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlSignals {
    /// Writeback commits `result` to `rd`.
    pub reg_write: bool,
    /// Memory reads data memory.
    pub mem_read: bool,
    /// Memory writes data memory.
    pub mem_write: bool,
    /// Decode materializes rs1.
    pub uses_rs1: bool,
    /// Decode materializes rs2.
    pub uses_rs2: bool,
    /// Instruction is a conditional branch.
    pub branch: bool,
    /// Instruction is an unconditional jump.
    pub jump: bool,
    /// ALU operation to perform.
    pub alu: AluOp,
    /// Source selection for ALU operand A.
    pub a_src: OpASrc,
    /// Source selection for ALU operand B.
    pub b_src: OpBSrc,
}

impl ControlSignals {
    /// Generates the control signals for `op`.
    pub fn for_opcode(op: Opcode) -> Self {
        let rr = |alu| ControlSignals {
            reg_write: true,
            uses_rs1: true,
            uses_rs2: true,
            alu,
            a_src: OpASrc::Reg1,
            b_src: OpBSrc::Reg2,
            ..Default::default()
        };

        match op {
            Opcode::Movc => ControlSignals {
                reg_write: true,
                a_src: OpASrc::Zero,
                ..Default::default()
            },
            Opcode::Add => rr(AluOp::Add),
            Opcode::Sub => rr(AluOp::Sub),
            Opcode::Mul => rr(AluOp::Mul),
            Opcode::And => rr(AluOp::And),
            Opcode::Or => rr(AluOp::Or),
            Opcode::Xor => rr(AluOp::Xor),
            Opcode::Addi => ControlSignals {
                reg_write: true,
                uses_rs1: true,
                ..Default::default()
            },
            Opcode::Load => ControlSignals {
                reg_write: true,
                mem_read: true,
                uses_rs1: true,
                ..Default::default()
            },
            Opcode::Ldr => ControlSignals {
                mem_read: true,
                ..rr(AluOp::Add)
            },
            Opcode::Store => ControlSignals {
                mem_write: true,
                uses_rs1: true,
                uses_rs2: true,
                a_src: OpASrc::Reg2,
                ..Default::default()
            },
            Opcode::Jump => ControlSignals {
                jump: true,
                uses_rs1: true,
                ..Default::default()
            },
            Opcode::Bz | Opcode::Bnz => ControlSignals {
                branch: true,
                a_src: OpASrc::Pc,
                ..Default::default()
            },
            Opcode::Halt | Opcode::Nop => ControlSignals {
                a_src: OpASrc::Zero,
                ..Default::default()
            },
        }
    }
}
