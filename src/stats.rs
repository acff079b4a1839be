//! Simulation statistics collection and reporting.
//!
//! Tracks performance metrics including instruction mix, stall breakdown,
//! control-flow events and execution time.

use std::time::Instant;

use serde::Serialize;

use crate::isa::Opcode;

/// Simulation statistics structure tracking all performance metrics.
///
/// Collects statistics about instruction retirement, pipeline stalls and
/// control transfers for performance analysis.
#[derive(Clone, Debug, Serialize)]
pub struct SimStats {
    #[serde(skip)]
    start_time: Instant,
    pub cycles: u64,
    pub instructions_retired: u64,
    /// Cycles spent filling the pipeline after reset.
    pub fill_cycles: u64,

    pub inst_alu: u64,
    pub inst_mul: u64,
    pub inst_load: u64,
    pub inst_store: u64,
    pub inst_control: u64,
    pub inst_other: u64,

    /// Decode cycles lost to load-use hazards.
    pub stalls_data: u64,
    /// Decode cycles lost to a multiply occupying Execute.
    pub stalls_structural: u64,
    /// Slots lost to jump and branch flushes.
    pub stalls_control: u64,

    pub flushes: u64,
    pub jumps: u64,
    pub branches_taken: u64,
    pub branches_not_taken: u64,
}

impl Default for SimStats {
    /// Returns the default value.
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
            fill_cycles: 0,
            inst_alu: 0,
            inst_mul: 0,
            inst_load: 0,
            inst_store: 0,
            inst_control: 0,
            inst_other: 0,
            stalls_data: 0,
            stalls_structural: 0,
            stalls_control: 0,
            flushes: 0,
            jumps: 0,
            branches_taken: 0,
            branches_not_taken: 0,
        }
    }
}

impl SimStats {
    /// Counts one retired instruction in the instruction mix.
    pub fn record_retire(&mut self, op: Opcode) {
        self.instructions_retired += 1;
        match op {
            Opcode::Movc
            | Opcode::Add
            | Opcode::Addi
            | Opcode::Sub
            | Opcode::And
            | Opcode::Or
            | Opcode::Xor => self.inst_alu += 1,
            Opcode::Mul => self.inst_mul += 1,
            Opcode::Load | Opcode::Ldr => self.inst_load += 1,
            Opcode::Store => self.inst_store += 1,
            Opcode::Jump | Opcode::Bz | Opcode::Bnz => self.inst_control += 1,
            Opcode::Halt | Opcode::Nop => self.inst_other += 1,
        }
    }

    /// Instructions per cycle, zero before the first cycle.
    pub fn ipc(&self) -> f64 {
        if self.cycles == 0 {
            0.0
        } else {
            self.instructions_retired as f64 / self.cycles as f64
        }
    }

    /// Prints a formatted summary of all simulation statistics.
    ///
    /// Displays the instruction mix, stall breakdown, control-flow events and
    /// IPC/CPI metrics in a human-readable format.
    pub fn print(&self) {
        let seconds = self.start_time.elapsed().as_secs_f64();

        let instr = if self.instructions_retired == 0 {
            1
        } else {
            self.instructions_retired
        };
        let cpi = self.cycles as f64 / instr as f64;
        let pct = |n: u64| {
            if self.instructions_retired == 0 {
                0.0
            } else {
                100.0 * n as f64 / self.instructions_retired as f64
            }
        };

        println!("\n==========================================================");
        println!("PIPELINE SIMULATION STATISTICS");
        println!("==========================================================");
        println!("host_seconds             {:.4} s", seconds);
        println!("sim_cycles               {}", self.cycles);
        println!("sim_fill_cycles          {}", self.fill_cycles);
        println!("sim_insts                {}", self.instructions_retired);
        println!("sim_ipc                  {:.4}", self.ipc());
        println!("sim_cpi                  {:.4}", cpi);
        println!("----------------------------------------------------------");
        println!("INSTRUCTION MIX");
        println!("  op.alu                 {:<10} ({:.2}%)", self.inst_alu, pct(self.inst_alu));
        println!("  op.mul                 {:<10} ({:.2}%)", self.inst_mul, pct(self.inst_mul));
        println!("  op.load                {:<10} ({:.2}%)", self.inst_load, pct(self.inst_load));
        println!("  op.store               {:<10} ({:.2}%)", self.inst_store, pct(self.inst_store));
        println!("  op.control             {:<10} ({:.2}%)", self.inst_control, pct(self.inst_control));
        println!("  op.other               {:<10} ({:.2}%)", self.inst_other, pct(self.inst_other));
        println!("----------------------------------------------------------");
        println!("PIPELINE STALLS");
        println!("  stall.data             {}", self.stalls_data);
        println!("  stall.structural       {}", self.stalls_structural);
        println!("  stall.control          {}", self.stalls_control);
        println!("----------------------------------------------------------");
        println!("CONTROL FLOW");
        println!("  flushes                {}", self.flushes);
        println!("  jumps                  {}", self.jumps);
        println!("  branch.taken           {}", self.branches_taken);
        println!("  branch.not_taken       {}", self.branches_not_taken);
        println!("==========================================================");
    }
}
