//! General-Purpose Register File.
//!
//! This module implements the register file of 16 registers (R0-R15) and its
//! validity table. A register is *pending* while some in-flight instruction
//! still has to write it; readers must then take the value from the
//! forwarding table instead of the file.
//!
//! R0 is an ordinary register and is not hardwired to zero.

use crate::common::constants::NUM_REGS;
use crate::common::error::{AccessFault, SimError};

/// General-purpose register file with a per-register pending-write count.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterFile {
    regs: [i32; NUM_REGS],
    pending: [u32; NUM_REGS],
}

/// Validates a register id.
fn check(idx: usize) -> Result<usize, SimError> {
    if idx < NUM_REGS {
        Ok(idx)
    } else {
        Err(SimError::OutOfRangeAccess(AccessFault::Register(idx)))
    }
}

impl RegisterFile {
    /// Creates a register file with every register zero and valid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a register value from the file, ignoring the pending state.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-15)
    pub fn read(&self, idx: usize) -> Result<i32, SimError> {
        Ok(self.regs[check(idx)?])
    }

    /// Writes a register value without touching the pending state.
    pub fn write(&mut self, idx: usize, val: i32) -> Result<(), SimError> {
        self.regs[check(idx)?] = val;
        Ok(())
    }

    /// Returns `true` while an in-flight instruction still has to write `idx`.
    pub fn is_pending(&self, idx: usize) -> Result<bool, SimError> {
        Ok(self.pending[check(idx)?] > 0)
    }

    /// Records one more in-flight writer of `idx`.
    pub fn mark_pending(&mut self, idx: usize) -> Result<(), SimError> {
        let idx = check(idx)?;
        self.pending[idx] += 1;
        Ok(())
    }

    /// Retires a write: stores `val` and releases one pending writer.
    pub fn commit(&mut self, idx: usize, val: i32) -> Result<(), SimError> {
        let idx = check(idx)?;
        self.regs[idx] = val;
        self.pending[idx] = self.pending[idx].saturating_sub(1);
        Ok(())
    }

    /// Snapshot of all register values.
    pub fn values(&self) -> [i32; NUM_REGS] {
        self.regs
    }

    /// Snapshot of the validity table, `true` meaning no write is pending.
    pub fn validity(&self) -> [bool; NUM_REGS] {
        self.pending.map(|n| n == 0)
    }
}
