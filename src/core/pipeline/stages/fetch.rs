//! Instruction Fetch (IF) Stage.
//!
//! Reads the instruction at the program counter and hands it to Decode,
//! advancing the program counter by one instruction. While Decode holds its
//! occupant the same instruction is re-read next cycle and the program
//! counter stays put. While a jump is unresolved nothing is fetched and
//! Decode receives a squashed slot.

use crate::common::constants::INST_WIDTH;
use crate::common::error::{AccessFault, SimError};
use crate::core::context::{CycleSignals, Stage};
use crate::core::pipeline::latches::{LatchEntry, Latches, StageLatch};
use crate::core::Cpu;

/// Executes the Fetch stage.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state.
/// * `next` - Latches of the next cycle.
/// * `signals` - Signals raised by the later stages this cycle.
///
/// # Returns
///
/// An `OutOfRangeAccess` fault if the program counter is below the code
/// base or misaligned. Running past the last instruction only yields bubbles.
pub fn fetch_stage(
    cpu: &mut Cpu,
    next: &mut Latches,
    signals: &CycleSignals,
) -> Result<(), SimError> {
    if cpu.ctx.stalls.fetch {
        cpu.stats.stalls_control += 1;
        cpu.cycle_view.stage_mut(Stage::Fetch).stalled = true;
        if !signals.decode_held {
            next.if_id = StageLatch::occupied(LatchEntry::squashed(cpu.pc));
        }
        return Ok(());
    }

    let Some(inst) = cpu.program.fetch(cpu.pc)? else {
        return Ok(());
    };

    let entry = LatchEntry::new(cpu.pc, inst);
    let view = cpu.cycle_view.stage_mut(Stage::Fetch);
    view.entry = Some(entry);

    if signals.decode_held {
        view.stalled = true;
        return Ok(());
    }

    cpu.pc = cpu
        .pc
        .checked_add(INST_WIDTH)
        .ok_or(SimError::OutOfRangeAccess(AccessFault::InstructionFetch(cpu.pc)))?;
    next.if_id = StageLatch::occupied(entry);
    Ok(())
}
