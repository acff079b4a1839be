//! Data memory.
//!
//! A flat array of word cells addressed directly by the effective address
//! computed in Execute. Every access is bounds checked; an address outside
//! the configured capacity raises `OutOfRangeAccess`.

use crate::common::error::{AccessFault, SimError};

/// Word-addressed data memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataMemory {
    cells: Vec<i32>,
}

impl DataMemory {
    /// Creates a zeroed memory of `words` cells.
    pub fn new(words: usize) -> Self {
        Self {
            cells: vec![0; words],
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn index(&self, addr: i32) -> Result<usize, SimError> {
        usize::try_from(addr)
            .ok()
            .filter(|&i| i < self.cells.len())
            .ok_or(SimError::OutOfRangeAccess(AccessFault::DataMemory(addr)))
    }

    /// Reads the word at `addr`.
    pub fn read(&self, addr: i32) -> Result<i32, SimError> {
        let i = self.index(addr)?;
        Ok(self.cells[i])
    }

    /// Writes `val` to the word at `addr`.
    pub fn write(&mut self, addr: i32, val: i32) -> Result<(), SimError> {
        let i = self.index(addr)?;
        self.cells[i] = val;
        Ok(())
    }

    /// The first `count` words, clamped to the memory size.
    pub fn head(&self, count: usize) -> &[i32] {
        &self.cells[..count.min(self.cells.len())]
    }
}
