//! Architectural state snapshot.
//!
//! The snapshot is what a run reports at the end: every register with its
//! validity, the head of data memory and the simulation counters. It is
//! serializable so the binary can emit it as JSON.

use serde::Serialize;

use super::Cpu;

/// One register in the final dump.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RegisterSnapshot {
    pub index: usize,
    pub value: i32,
    /// No in-flight instruction still has to write the register.
    pub valid: bool,
}

/// Architectural state at the end of a run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ArchSnapshot {
    pub clock: u64,
    pub pc: i32,
    pub ins_completed: i64,
    pub halted: bool,
    pub registers: Vec<RegisterSnapshot>,
    /// The first `dump_words` words of data memory.
    pub memory: Vec<i32>,
}

impl Cpu {
    /// Captures the architectural state.
    pub fn snapshot(&self) -> ArchSnapshot {
        let registers = self
            .regs
            .values()
            .iter()
            .zip(self.regs.validity())
            .enumerate()
            .map(|(index, (&value, valid))| RegisterSnapshot {
                index,
                value,
                valid,
            })
            .collect();

        ArchSnapshot {
            clock: self.ctx.clock,
            pc: self.pc,
            ins_completed: self.ctx.ins_completed,
            halted: self.ctx.halted,
            registers,
            memory: self.memory.head(self.dump_words()).to_vec(),
        }
    }
}
