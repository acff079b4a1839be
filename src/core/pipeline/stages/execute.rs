//! Execute (EX) Stage.
//!
//! This module implements the execution stage of the pipeline. It is responsible for:
//! - Performing ALU operations and publishing results to the forwarding table.
//! - Computing effective addresses for LOAD, LDR and STORE.
//! - Holding a MUL for several cycles and back-pressuring Decode meanwhile.
//! - Resolving JUMP, BZ and BNZ: redirecting the program counter, flushing
//!   Decode and correcting the instruction count for skipped instructions.
//! - Capturing the delayed branch-condition snapshot.

use tracing::debug;

use crate::common::constants::INST_WIDTH;
use crate::common::error::SimError;
use crate::core::context::{CycleSignals, Stage};
use crate::core::pipeline::hazards;
use crate::core::pipeline::latches::{LatchEntry, Latches, StageLatch};
use crate::core::pipeline::signals::{OpASrc, OpBSrc};
use crate::core::units::alu::Alu;
use crate::core::Cpu;
use crate::isa::Opcode;

/// Executes the Execute stage of the pipeline.
///
/// # Logic Flow
/// 1. **Multi-cycle**: A MUL still counting down stays in Execute; when it
///    finishes it publishes its result and moves on.
/// 2. **Operands**: STORE resolves its base register here; every other
///    instruction uses the operands materialized in Decode.
/// 3. **Execution**: Runs the ALU and dispatches on the opcode.
/// 4. **Control Flow**: Redirects the PC for a jump or taken branch and
///    raises the flush signal consumed by Decode.
/// 5. **Snapshot**: If Decode holds a BZ and nothing was flushed, this
///    cycle's result becomes the condition the next branch evaluates. A
///    squashed slot contributes a zero result and is then dropped.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state.
/// * `next` - Latches of the next cycle.
/// * `signals` - Signals raised for Decode and Fetch.
pub fn execute_stage(
    cpu: &mut Cpu,
    next: &mut Latches,
    signals: &mut CycleSignals,
) -> Result<(), SimError> {
    let Some(mut entry) = cpu.latches.id_ex.entry else {
        next.ex_mem = StageLatch::bubble();
        return Ok(());
    };

    if entry.squashed {
        capture_snapshot(cpu, signals, 0);
        next.ex_mem = StageLatch::bubble();
        return Ok(());
    }

    if entry.cycles_remaining > 0 {
        entry.cycles_remaining -= 1;
        if entry.cycles_remaining > 0 {
            hold(cpu, next, signals, entry);
            return Ok(());
        }
        write_result(cpu, &entry)?;
        debug!(pc = entry.pc, rd = entry.inst.rd, result = entry.result, "multiply complete");
        cpu.cycle_view.stage_mut(Stage::Execute).entry = Some(entry);
        next.ex_mem = StageLatch::occupied(entry);
        return Ok(());
    }

    if entry.inst.opcode == Opcode::Store {
        let (base, _) = hazards::read_operand(&cpu.regs, &cpu.forwarding, entry.inst.rs2)?;
        entry.rs2_value = base;
    }

    let ctrl = entry.ctrl;
    let op_a = match ctrl.a_src {
        OpASrc::Reg1 => entry.rs1_value,
        OpASrc::Reg2 => entry.rs2_value,
        OpASrc::Pc => entry.pc,
        OpASrc::Zero => 0,
    };
    let op_b = match ctrl.b_src {
        OpBSrc::Imm => entry.inst.imm,
        OpBSrc::Reg2 => entry.rs2_value,
    };
    let alu_out = Alu::execute(ctrl.alu, op_a, op_b);

    let mut busy = false;
    match entry.inst.opcode {
        Opcode::Movc
        | Opcode::Add
        | Opcode::Addi
        | Opcode::Sub
        | Opcode::And
        | Opcode::Or
        | Opcode::Xor => {
            entry.result = alu_out;
            write_result(cpu, &entry)?;
        }
        Opcode::Mul => {
            entry.result = alu_out;
            if cpu.multiply_cycles() > 1 {
                entry.cycles_remaining = cpu.multiply_cycles() - 1;
                busy = true;
            } else {
                write_result(cpu, &entry)?;
            }
        }
        Opcode::Load => {
            cpu.regs.mark_pending(entry.inst.rd)?;
            entry.mem_address = alu_out;
            entry.result = alu_out;
        }
        Opcode::Ldr => {
            // The address is what dependents see until LDR retires.
            entry.mem_address = alu_out;
            entry.result = alu_out;
            write_result(cpu, &entry)?;
        }
        Opcode::Store => {
            entry.mem_address = alu_out;
            entry.result = 0;
        }
        Opcode::Jump => {
            entry.result = alu_out;
            redirect(cpu, &entry, alu_out);
            signals.flush = true;
            cpu.ctx.stalls.decode = true;
            cpu.ctx.stalls.fetch = true;
            cpu.stats.jumps += 1;
        }
        Opcode::Bz | Opcode::Bnz => {
            let condition = cpu.ctx.branch_snapshot;
            let taken = match entry.inst.opcode {
                Opcode::Bz => condition == 0,
                _ => condition != 0,
            };
            if taken {
                entry.result = alu_out;
                redirect(cpu, &entry, alu_out);
                signals.flush = true;
                cpu.stats.branches_taken += 1;
            } else {
                entry.result = 0;
                cpu.stats.branches_not_taken += 1;
            }
        }
        Opcode::Halt | Opcode::Nop => {
            entry.result = 0;
        }
    }

    capture_snapshot(cpu, signals, entry.result);

    if busy {
        hold(cpu, next, signals, entry);
        return Ok(());
    }

    cpu.cycle_view.stage_mut(Stage::Execute).entry = Some(entry);
    next.ex_mem = StageLatch::occupied(entry);
    Ok(())
}

/// Keeps a multi-cycle occupant in Execute and sends a bubble to Memory.
fn hold(cpu: &mut Cpu, next: &mut Latches, signals: &mut CycleSignals, entry: LatchEntry) {
    let view = cpu.cycle_view.stage_mut(Stage::Execute);
    view.entry = Some(entry);
    view.stalled = true;

    signals.execute_busy = true;
    next.id_ex = StageLatch::occupied(entry);
    next.ex_mem = StageLatch::bubble();
}

/// Latches `value` as the next branch condition if Decode holds a BZ and
/// nothing was flushed this cycle.
fn capture_snapshot(cpu: &mut Cpu, signals: &CycleSignals, value: i32) {
    if signals.flush {
        return;
    }
    if let Some(decoding) = cpu.latches.if_id.entry {
        if decoding.inst.opcode == Opcode::Bz {
            cpu.ctx.branch_snapshot = value;
        }
    }
}

/// Marks the destination pending and publishes the result for forwarding.
fn write_result(cpu: &mut Cpu, entry: &LatchEntry) -> Result<(), SimError> {
    cpu.regs.mark_pending(entry.inst.rd)?;
    cpu.forwarding.publish(entry.inst.rd, entry.result)
}

/// Redirects fetch to `target` and corrects the instruction count by the
/// number of program instructions the transfer skips (negative when jumping
/// backwards, so re-executed instructions are counted again).
fn redirect(cpu: &mut Cpu, entry: &LatchEntry, target: i32) {
    let fall_through = i64::from(entry.pc) + i64::from(INST_WIDTH);
    let skipped = (i64::from(target) - fall_through) / i64::from(INST_WIDTH);

    cpu.ctx.ins_completed += skipped;
    cpu.pc = target;
    cpu.stats.flushes += 1;

    debug!(pc = entry.pc, target, skipped, "control transfer");
}
