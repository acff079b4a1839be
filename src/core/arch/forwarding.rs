//! Forwarding table.
//!
//! One slot per register holding the most recently produced value for that
//! register. Execute publishes arithmetic results, Memory publishes loaded
//! values, and Decode reads a slot whenever the register file marks the
//! register pending.

use crate::common::constants::NUM_REGS;
use crate::common::error::{AccessFault, SimError};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ForwardingTable {
    slots: [i32; NUM_REGS],
}

impl ForwardingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes `val` as the latest value produced for register `idx`.
    pub fn publish(&mut self, idx: usize, val: i32) -> Result<(), SimError> {
        let slot = self
            .slots
            .get_mut(idx)
            .ok_or(SimError::OutOfRangeAccess(AccessFault::Register(idx)))?;
        *slot = val;
        Ok(())
    }

    /// Reads the latest value published for register `idx`.
    pub fn read(&self, idx: usize) -> Result<i32, SimError> {
        self.slots
            .get(idx)
            .copied()
            .ok_or(SimError::OutOfRangeAccess(AccessFault::Register(idx)))
    }
}
