//! Program store.
//!
//! Holds the loaded instructions in order and maps program-counter values to
//! store indices. The store is fixed-length; the only mutation after loading
//! is the HALT policy that replaces every later record with a NOP.

use crate::common::constants::{CODE_BASE, INST_WIDTH};
use crate::common::error::{AccessFault, SimError};

use super::instruction::Instruction;

/// Ordered, fixed-length instruction store based at a code address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Program {
    base: i32,
    instructions: Vec<Instruction>,
}

impl Program {
    /// Creates a store based at [`CODE_BASE`].
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self::with_base(CODE_BASE, instructions)
    }

    /// Creates a store whose first instruction lives at `base`.
    pub fn with_base(base: i32, instructions: Vec<Instruction>) -> Self {
        Self { base, instructions }
    }

    pub fn base(&self) -> i32 {
        self.base
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Instruction> {
        self.instructions.get(index)
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn into_instructions(self) -> Vec<Instruction> {
        self.instructions
    }

    /// Address of the instruction at `index`, or `None` if it does not fit
    /// in the address space.
    pub fn pc_of(&self, index: usize) -> Option<i32> {
        i32::try_from(index)
            .ok()?
            .checked_mul(INST_WIDTH)?
            .checked_add(self.base)
    }

    /// Store index for `pc`, or `None` if `pc` is below the base or misaligned.
    ///
    /// The returned index may be past the end of the store.
    pub fn index_of(&self, pc: i32) -> Option<usize> {
        let offset = pc.checked_sub(self.base)?;
        if offset < 0 || offset % INST_WIDTH != 0 {
            return None;
        }
        Some((offset / INST_WIDTH) as usize)
    }

    /// Reads the instruction at `pc`.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when `pc` lies past the last instruction, or an
    /// `OutOfRangeAccess` fault when `pc` cannot address the store at all.
    pub fn fetch(&self, pc: i32) -> Result<Option<Instruction>, SimError> {
        let index = self
            .index_of(pc)
            .ok_or(SimError::OutOfRangeAccess(AccessFault::InstructionFetch(pc)))?;
        Ok(self.instructions.get(index).copied())
    }

    /// Replaces every instruction after `index` with a NOP.
    pub fn nop_after(&mut self, index: usize) {
        for inst in self.instructions.iter_mut().skip(index + 1) {
            *inst = Instruction::nop();
        }
    }
}
