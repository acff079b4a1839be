//! Data Hazard Detection and Forwarding.
//!
//! This module implements the logic for detecting data hazards in the pipeline
//! and resolving them through the forwarding table or pipeline stalls.
//!
//! A source register marked pending in the register file is read from the
//! forwarding table. The one case the forwarding table cannot cover is a
//! LOAD sitting in Execute: its value is only known once it reaches Memory,
//! so a dependent instruction in Decode must stall for a cycle.

use tracing::debug;

use crate::common::error::SimError;
use crate::core::arch::{ForwardingTable, RegisterFile};
use crate::core::pipeline::latches::{LatchEntry, StageLatch};
use crate::isa::Opcode;

/// Where an operand value was read from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperandSource {
    /// The register file (no write pending).
    RegFile,
    /// The forwarding table (a write is pending).
    Forwarded,
}

/// Reads register `idx`, preferring the forwarding table while a write is pending.
///
/// # Returns
///
/// The value and the source it came from.
pub fn read_operand(
    regs: &RegisterFile,
    forwarding: &ForwardingTable,
    idx: usize,
) -> Result<(i32, OperandSource), SimError> {
    if regs.is_pending(idx)? {
        Ok((forwarding.read(idx)?, OperandSource::Forwarded))
    } else {
        Ok((regs.read(idx)?, OperandSource::RegFile))
    }
}

/// Checks if a pipeline stall is needed due to a load-use data hazard.
///
/// A load-use hazard occurs when the instruction in Decode reads a register
/// that the LOAD currently in Execute is about to load.
///
/// # Arguments
///
/// * `id_ex` - The ID/EX latch (the occupant of Execute this cycle)
/// * `decoding` - The instruction being decoded
pub fn need_stall_load_use(id_ex: &StageLatch, decoding: &LatchEntry) -> bool {
    let Some(ex_inst) = id_ex.entry else {
        return false;
    };
    if ex_inst.inst.opcode != Opcode::Load {
        return false;
    }

    let rd = ex_inst.inst.rd;
    let ctrl = decoding.ctrl;
    (ctrl.uses_rs1 && decoding.inst.rs1 == rd) || (ctrl.uses_rs2 && decoding.inst.rs2 == rd)
}

/// Materializes the source operands of `entry` for Decode.
///
/// Sources the instruction does not use are left at zero.
///
/// # Returns
///
/// A tuple `(rs1_value, rs2_value)`.
pub fn forward_rs(
    entry: &LatchEntry,
    regs: &RegisterFile,
    forwarding: &ForwardingTable,
) -> Result<(i32, i32), SimError> {
    let mut a = 0;
    let mut b = 0;

    if entry.ctrl.uses_rs1 {
        let (val, src) = read_operand(regs, forwarding, entry.inst.rs1)?;
        if src == OperandSource::Forwarded {
            debug!(pc = entry.pc, reg = entry.inst.rs1, val, "forwarded rs1");
        }
        a = val;
    }
    if entry.ctrl.uses_rs2 {
        let (val, src) = read_operand(regs, forwarding, entry.inst.rs2)?;
        if src == OperandSource::Forwarded {
            debug!(pc = entry.pc, reg = entry.inst.rs2, val, "forwarded rs2");
        }
        b = val;
    }

    Ok((a, b))
}
