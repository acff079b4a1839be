//! Writeback (WB) Stage.
//!
//! Retires the occupant of the MEM/WB latch: commits its result to the
//! register file, releases its pending-write mark, raises the halt flag for
//! HALT and counts the retirement. A bubble arriving while a branch is armed
//! resolves the branch indicator and releases the Decode stall.

use tracing::trace;

use crate::common::error::SimError;
use crate::core::context::{BranchState, Stage};
use crate::core::Cpu;
use crate::isa::Opcode;

/// Executes the Writeback stage.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state.
pub fn wb_stage(cpu: &mut Cpu) -> Result<(), SimError> {
    let Some(entry) = cpu.latches.mem_wb.entry else {
        if cpu.ctx.branch == BranchState::Armed {
            cpu.ctx.branch = BranchState::Resolved;
            cpu.ctx.stalls.decode = false;
        }
        return Ok(());
    };

    if entry.ctrl.reg_write {
        cpu.regs.commit(entry.inst.rd, entry.result)?;
    }
    if entry.inst.opcode == Opcode::Halt {
        cpu.ctx.halted = true;
    }

    cpu.ctx.ins_completed += 1;
    cpu.stats.record_retire(entry.inst.opcode);
    cpu.cycle_view.stage_mut(Stage::Writeback).entry = Some(entry);

    trace!(pc = entry.pc, inst = %entry.inst, result = entry.result, "retired");
    Ok(())
}
