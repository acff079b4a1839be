//! Trace and dump formatting.
//!
//! Renders the per-cycle stage listing printed in traced mode and the final
//! register/memory dump. Stages are listed in evaluation order, Writeback
//! first. Stages that have not yet received an instruction since reset are
//! shown as warming.
//!
//! ```text
//! --------------------------------
//! Clock Cycle #: 3
//! --------------------------------
//! Writeback      : Warming
//! Memory         : Warming
//! Execute        : pc(4000) MOVC,R1,#5 [R1 <- 5]
//! Decode/RF      : pc(4004) HALT
//! Fetch          : Empty
//! ```

use std::fmt::Write;

use crate::core::context::{CycleView, Stage};
use crate::core::cpu::ArchSnapshot;
use crate::core::pipeline::latches::LatchEntry;
use crate::isa::Opcode;

const RULE: &str = "--------------------------------";

/// Formats the stage listing of one cycle.
pub fn format_cycle(clock: u64, view: &CycleView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "Clock Cycle #: {}", clock);
    let _ = writeln!(out, "{}", RULE);

    for stage in Stage::ALL.iter().rev() {
        let sv = view.stage(*stage);
        let _ = match sv.entry {
            Some(entry) => writeln!(
                out,
                "{:<15}: pc({}) {}",
                stage.name(),
                entry.pc,
                describe(&entry)
            ),
            None if sv.warming => writeln!(out, "{:<15}: Warming", stage.name()),
            None => writeln!(out, "{:<15}: Empty", stage.name()),
        };
    }
    out
}

/// Formats an instruction with the working values its latch carries.
pub fn describe(entry: &LatchEntry) -> String {
    let inst = entry.inst;
    let values = match inst.opcode {
        Opcode::Movc => format!("[R{} <- {}]", inst.rd, entry.result),
        Opcode::Add
        | Opcode::Sub
        | Opcode::Mul
        | Opcode::And
        | Opcode::Or
        | Opcode::Xor
        | Opcode::Ldr => format!(
            "[Res={}   RS1={}   RS2={}]",
            entry.result, entry.rs1_value, entry.rs2_value
        ),
        Opcode::Addi | Opcode::Load => format!(
            "[Res={}   RS1={}   IMM={}]",
            entry.result, entry.rs1_value, inst.imm
        ),
        Opcode::Store => format!(
            "[Contents={}   RS2={}   IMM={}]",
            entry.rs1_value, entry.rs2_value, inst.imm
        ),
        Opcode::Jump => format!(
            "[PC Value={}   RS1={}   IMM={}]",
            entry.result, entry.rs1_value, inst.imm
        ),
        Opcode::Bz | Opcode::Bnz => format!("[PC Value={}   IMM={}]", entry.result, inst.imm),
        Opcode::Halt | Opcode::Nop => return inst.to_string(),
    };
    format!("{} {}", inst, values)
}

/// Formats the final register file and data memory dump.
pub fn format_dump(snapshot: &ArchSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n\tSTATE OF ARCHITECTURAL REGISTER FILE");
    for reg in &snapshot.registers {
        let status = if reg.valid { "VALID" } else { "INVALID" };
        let _ = writeln!(
            out,
            "| REG[{:02}] | Value = {:<9} | Status = {:<9} |",
            reg.index, reg.value, status
        );
    }

    let _ = writeln!(out, "\n\tSTATE OF DATA MEMORY");
    for (addr, value) in snapshot.memory.iter().enumerate() {
        let _ = writeln!(out, "| MEM[{:02}] | Data Value = {:02} |", addr, value);
    }
    out
}
