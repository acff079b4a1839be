//! Decode / Register Read (ID) Stage.
//!
//! Materializes source operands from the register file or, for pending
//! registers, from the forwarding table. Decode holds its occupant while
//! Execute is busy with a multiply or when the LOAD in Execute targets one
//! of its sources. A slot squashed by a control transfer passes through
//! untouched. Decoding a HALT
//! turns the rest of the program into NOPs; decoding a conditional branch
//! arms the branch indicator.

use tracing::debug;

use crate::common::error::SimError;
use crate::core::context::{BranchState, CycleSignals, Stage};
use crate::core::pipeline::hazards;
use crate::core::pipeline::latches::{Latches, StageLatch};
use crate::core::pipeline::traits::PipelineLatch;
use crate::core::Cpu;
use crate::isa::Opcode;

/// Executes the Decode stage.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state.
/// * `next` - Latches of the next cycle.
/// * `signals` - Signals raised by Execute this cycle; Decode adds `decode_held`.
pub fn decode_stage(
    cpu: &mut Cpu,
    next: &mut Latches,
    signals: &mut CycleSignals,
) -> Result<(), SimError> {
    let mut latch = cpu.latches.if_id;

    // Execute already re-latched its own occupant.
    if signals.execute_busy {
        cpu.stats.stalls_structural += 1;
        hold(cpu, next, signals, latch);
        return Ok(());
    }

    if signals.flush && latch.entry.is_some_and(|e| !e.squashed) {
        latch.flush();
        cpu.stats.stalls_control += 1;
        debug!("decode flushed");
    }

    let Some(mut entry) = latch.entry else {
        next.id_ex = StageLatch::bubble();
        return Ok(());
    };

    if entry.squashed {
        next.id_ex = latch;
        return Ok(());
    }

    if hazards::need_stall_load_use(&cpu.latches.id_ex, &entry) {
        debug!(pc = entry.pc, inst = %entry.inst, "load-use stall");
        cpu.ctx.stalls.decode = true;
        cpu.stats.stalls_data += 1;
        hold(cpu, next, signals, latch);
        next.id_ex = StageLatch::bubble();
        return Ok(());
    }

    let (rs1_value, rs2_value) = hazards::forward_rs(&entry, &cpu.regs, &cpu.forwarding)?;
    entry.rs1_value = rs1_value;
    entry.rs2_value = rs2_value;

    match entry.inst.opcode {
        Opcode::Halt => {
            if let Some(index) = cpu.program.index_of(entry.pc) {
                cpu.program.nop_after(index);
                debug!(pc = entry.pc, "halt decoded, draining program");
            }
        }
        Opcode::Bz | Opcode::Bnz => {
            cpu.ctx.branch = match cpu.ctx.branch {
                BranchState::Resolved => BranchState::Idle,
                BranchState::Idle | BranchState::Armed => BranchState::Armed,
            };
        }
        Opcode::Movc
        | Opcode::Add
        | Opcode::Addi
        | Opcode::Sub
        | Opcode::Mul
        | Opcode::And
        | Opcode::Or
        | Opcode::Xor
        | Opcode::Load
        | Opcode::Ldr
        | Opcode::Store
        | Opcode::Jump
        | Opcode::Nop => {}
    }

    cpu.cycle_view.stage_mut(Stage::Decode).entry = Some(entry);
    next.id_ex = StageLatch::occupied(entry);
    Ok(())
}

/// Keeps the current occupant in Decode for another cycle.
fn hold(cpu: &mut Cpu, next: &mut Latches, signals: &mut CycleSignals, latch: StageLatch) {
    let view = cpu.cycle_view.stage_mut(Stage::Decode);
    view.entry = latch.entry;
    view.stalled = true;

    signals.decode_held = true;
    next.if_id = latch;
}
