//! Memory (MEM) Stage.
//!
//! Performs data memory accesses. STORE writes its source register, read
//! here through the forwarding-aware path. LOAD reads memory, publishes the
//! value to the forwarding table and releases the load-use stall. LDR reads
//! memory into its result only. JUMP releases the Fetch and Decode stalls it
//! imposed in Execute.

use tracing::debug;

use crate::common::error::SimError;
use crate::core::context::Stage;
use crate::core::pipeline::hazards;
use crate::core::pipeline::latches::{Latches, StageLatch};
use crate::core::Cpu;
use crate::isa::Opcode;

/// Executes the Memory stage.
///
/// Propagates its occupant (or bubble) into the MEM/WB latch of the next cycle.
pub fn mem_stage(cpu: &mut Cpu, next: &mut Latches) -> Result<(), SimError> {
    let Some(mut entry) = cpu.latches.ex_mem.entry else {
        next.mem_wb = StageLatch::bubble();
        return Ok(());
    };

    match entry.inst.opcode {
        Opcode::Store => {
            let (value, _) = hazards::read_operand(&cpu.regs, &cpu.forwarding, entry.inst.rs1)?;
            entry.rs1_value = value;
            cpu.memory.write(entry.mem_address, value)?;
        }
        Opcode::Load => {
            entry.result = cpu.memory.read(entry.mem_address)?;
            cpu.forwarding.publish(entry.inst.rd, entry.result)?;
            cpu.ctx.stalls.decode = false;
        }
        Opcode::Ldr => {
            entry.result = cpu.memory.read(entry.mem_address)?;
        }
        Opcode::Jump => {
            cpu.ctx.stalls.decode = false;
            cpu.ctx.stalls.fetch = false;
            debug!(pc = entry.pc, "jump acknowledged, front end released");
        }
        Opcode::Movc
        | Opcode::Add
        | Opcode::Addi
        | Opcode::Sub
        | Opcode::Mul
        | Opcode::And
        | Opcode::Or
        | Opcode::Xor
        | Opcode::Halt
        | Opcode::Bz
        | Opcode::Bnz
        | Opcode::Nop => {}
    }

    cpu.cycle_view.stage_mut(Stage::Memory).entry = Some(entry);
    next.mem_wb = StageLatch::occupied(entry);
    Ok(())
}
