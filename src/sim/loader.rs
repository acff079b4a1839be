//! Program Loader.
//!
//! Parses the textual program format into a [`Program`]. One instruction per
//! line; fields are separated by commas and/or whitespace; mnemonics are
//! case-insensitive; registers are written `R<n>` and immediates `#<n>`.
//! Blank lines and comments (`;` or `//` to end of line) are ignored.
//!
//! ```text
//! MOVC,R1,#5
//! ADD R3, R1, R2      ; three-register form
//! STORE R3,R0,#12     // stores R3 at R0 + 12
//! HALT
//! ```

use std::fs;
use std::path::Path;

use crate::common::constants::NUM_REGS;
use crate::common::error::LoadError;
use crate::isa::{Instruction, Opcode, Program};

/// Reads and parses a program file.
pub fn load_program(path: impl AsRef<Path>) -> Result<Program, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_program(&text)
}

/// Parses program text.
pub fn parse_program(text: &str) -> Result<Program, LoadError> {
    let mut instructions = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        if let Some(inst) = parse_line(idx + 1, raw)? {
            instructions.push(inst);
        }
    }
    Ok(Program::new(instructions))
}

/// Parses one line, returning `None` for blank and comment-only lines.
fn parse_line(line: usize, raw: &str) -> Result<Option<Instruction>, LoadError> {
    let code = strip_comment(raw);
    let mut fields = code
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|f| !f.is_empty());

    let Some(mnemonic) = fields.next() else {
        return Ok(None);
    };
    let opcode: Opcode = mnemonic.parse().map_err(|_| LoadError::UnknownOpcode {
        line,
        mnemonic: mnemonic.to_string(),
    })?;
    let operands: Vec<&str> = fields.collect();

    let p = Operands {
        line,
        opcode,
        fields: &operands,
    };
    let inst = match opcode {
        Opcode::Movc => {
            p.arity(2)?;
            Instruction::movc(p.reg(0)?, p.imm(1)?)
        }
        Opcode::Add
        | Opcode::Sub
        | Opcode::Mul
        | Opcode::And
        | Opcode::Or
        | Opcode::Xor
        | Opcode::Ldr => {
            p.arity(3)?;
            Instruction::rrr(opcode, p.reg(0)?, p.reg(1)?, p.reg(2)?)
        }
        Opcode::Addi | Opcode::Load => {
            p.arity(3)?;
            Instruction::rri(opcode, p.reg(0)?, p.reg(1)?, p.imm(2)?)
        }
        Opcode::Store => {
            p.arity(3)?;
            Instruction::store(p.reg(0)?, p.reg(1)?, p.imm(2)?)
        }
        Opcode::Jump => {
            p.arity(2)?;
            Instruction::jump(p.reg(0)?, p.imm(1)?)
        }
        Opcode::Bz | Opcode::Bnz => {
            p.arity(1)?;
            Instruction::branch(opcode, p.imm(0)?)
        }
        Opcode::Halt => {
            p.arity(0)?;
            Instruction::halt()
        }
        Opcode::Nop => {
            p.arity(0)?;
            Instruction::nop()
        }
    };
    Ok(Some(inst))
}

fn strip_comment(raw: &str) -> &str {
    let cut = [raw.find(';'), raw.find("//")]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(raw.len());
    &raw[..cut]
}

/// Operand fields of one line.
struct Operands<'a> {
    line: usize,
    opcode: Opcode,
    fields: &'a [&'a str],
}

impl Operands<'_> {
    fn malformed(&self, reason: String) -> LoadError {
        LoadError::Malformed {
            line: self.line,
            reason,
        }
    }

    fn arity(&self, expected: usize) -> Result<(), LoadError> {
        if self.fields.len() == expected {
            Ok(())
        } else {
            Err(self.malformed(format!(
                "{} takes {} operand(s), found {}",
                self.opcode,
                expected,
                self.fields.len()
            )))
        }
    }

    fn reg(&self, pos: usize) -> Result<usize, LoadError> {
        let field = self.fields[pos];
        let idx = field
            .strip_prefix(|c: char| c == 'R' || c == 'r')
            .and_then(|n| n.parse::<usize>().ok())
            .ok_or_else(|| self.malformed(format!("expected a register, found '{}'", field)))?;
        if idx >= NUM_REGS {
            return Err(self.malformed(format!("register {} is out of range", field)));
        }
        Ok(idx)
    }

    fn imm(&self, pos: usize) -> Result<i32, LoadError> {
        let field = self.fields[pos];
        field
            .strip_prefix('#')
            .and_then(|n| n.parse::<i32>().ok())
            .ok_or_else(|| self.malformed(format!("expected an immediate '#n', found '{}'", field)))
    }
}
