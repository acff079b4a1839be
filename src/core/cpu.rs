//! The CPU and its cycle driver.
//!
//! `Cpu` owns every piece of simulator state. `tick` evaluates the five
//! stages once, in reverse pipeline order, against the current latches and
//! swaps in the latches they produced. `run` ticks until the program
//! completes, a HALT retires, a fault occurs or the cycle budget runs out.

mod snapshot;

pub use snapshot::{ArchSnapshot, RegisterSnapshot};

use std::path::Path;

use tracing::{error, info};

use crate::common::error::{InitError, SimError};
use crate::config::Config;
use crate::core::arch::{DataMemory, ForwardingTable, RegisterFile};
use crate::core::context::{CycleSignals, CycleView, SimContext, Stage};
use crate::core::pipeline::latches::Latches;
use crate::core::pipeline::stages;
use crate::isa::Program;
use crate::sim::{loader, trace};
use crate::stats::SimStats;

/// Verbosity of a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TraceMode {
    /// Only the final state is reported.
    #[default]
    Quiet,
    /// Every cycle's stage listing is printed to stdout.
    Traced,
}

/// Outcome of a call to [`Cpu::run`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Cycles advanced by this call.
    pub cycles: u64,
    /// Clock value after the call.
    pub clock: u64,
    pub ins_completed: i64,
    pub halted: bool,
    /// The program ran to completion (as opposed to exhausting the budget).
    pub finished: bool,
}

/// The simulated processor.
///
/// Holds the architectural state (registers, forwarding table, data memory,
/// program store and program counter), the pipeline latches and the
/// simulation context. Stage procedures borrow it mutably, one at a time.
pub struct Cpu {
    pub regs: RegisterFile,
    pub forwarding: ForwardingTable,
    pub memory: DataMemory,
    pub program: Program,
    pub pc: i32,
    pub ctx: SimContext,
    pub latches: Latches,
    /// What each stage did during the last tick.
    pub cycle_view: CycleView,
    pub stats: SimStats,
    pub trace: bool,
    /// The fault that stopped the simulation, if any.
    pub fault: Option<SimError>,

    multiply_cycles: u8,
    dump_words: usize,
}

impl Cpu {
    /// Builds a simulator for `program` with every register zero and valid,
    /// data memory zeroed and the pipeline empty.
    ///
    /// The program is placed at `config.pipeline.start_pc`, which is also the
    /// reset program counter. The whole program must be addressable from
    /// there.
    pub fn new(program: Program, config: &Config) -> Result<Self, InitError> {
        config.validate()?;
        if program.is_empty() {
            return Err(InitError::EmptyProgram);
        }

        let start_pc = config.pipeline.start_pc;
        let program = Program::with_base(start_pc, program.into_instructions());
        if program.pc_of(program.len()).is_none() {
            return Err(InitError::InvalidConfig(format!(
                "pipeline.start_pc {} leaves no room for {} instruction(s)",
                start_pc,
                program.len()
            )));
        }

        Ok(Self {
            regs: RegisterFile::new(),
            forwarding: ForwardingTable::new(),
            memory: DataMemory::new(config.memory.data_words),
            program,
            pc: start_pc,
            ctx: SimContext::default(),
            latches: Latches::default(),
            cycle_view: CycleView::default(),
            stats: SimStats::default(),
            trace: config.general.trace_instructions,
            fault: None,
            multiply_cycles: config.pipeline.multiply_cycles,
            dump_words: config.memory.dump_words,
        })
    }

    /// Loads a program file and builds a simulator for it.
    pub fn from_file(path: impl AsRef<Path>, config: &Config) -> Result<Self, InitError> {
        let program = loader::load_program(path)?;
        Self::new(program, config)
    }

    /// Cycles a MUL occupies Execute.
    pub fn multiply_cycles(&self) -> u8 {
        self.multiply_cycles
    }

    /// Number of memory words included in snapshots.
    pub fn dump_words(&self) -> usize {
        self.dump_words
    }

    /// Returns `true` once every program instruction has been accounted for
    /// or the simulation has halted.
    pub fn is_finished(&self) -> bool {
        self.ctx.halted || self.ctx.ins_completed == self.program.len() as i64
    }

    /// Advances the pipeline by one clock cycle.
    ///
    /// Stages are evaluated Writeback first and Fetch last. Each reads the
    /// latches as they were at the start of the cycle and writes the latches
    /// of the next cycle; shared state changes made by a later stage
    /// (forwarding, stall release, flush) are seen by the earlier ones.
    pub fn tick(&mut self) -> Result<(), SimError> {
        self.cycle_view = CycleView::default();
        for stage in Stage::ALL {
            self.cycle_view.stage_mut(stage).warming = self.ctx.is_warming(stage.depth());
        }

        let mut next = Latches::default();
        let mut signals = CycleSignals::default();

        stages::wb_stage(self)?;
        stages::mem_stage(self, &mut next)?;
        stages::execute_stage(self, &mut next, &mut signals)?;
        stages::decode_stage(self, &mut next, &mut signals)?;
        stages::fetch_stage(self, &mut next, &signals)?;

        self.latches = next;
        self.ctx.clock += 1;
        self.stats.cycles += 1;
        if self.ctx.warmup > 0 {
            self.ctx.warmup -= 1;
            self.stats.fill_cycles += 1;
        }
        Ok(())
    }

    /// Runs until the program finishes or `max_cycles` cycles have elapsed.
    ///
    /// A fault marks the CPU halted, is kept in [`Cpu::fault`] and is
    /// returned. Calling `run` again on a finished CPU advances no cycles.
    pub fn run(&mut self, max_cycles: u64, mode: TraceMode) -> Result<RunSummary, SimError> {
        let traced = mode == TraceMode::Traced || self.trace || cfg!(feature = "always-trace");

        let mut advanced = 0;
        while advanced < max_cycles && !self.is_finished() {
            if let Err(fault) = self.tick() {
                error!(clock = self.ctx.clock + 1, pc = self.pc, %fault, "simulation fault");
                self.ctx.halted = true;
                self.fault = Some(fault.clone());
                return Err(fault);
            }
            advanced += 1;

            if traced {
                self.print_pipeline_diagram();
            }
        }

        let summary = RunSummary {
            cycles: advanced,
            clock: self.ctx.clock,
            ins_completed: self.ctx.ins_completed,
            halted: self.ctx.halted,
            finished: self.is_finished(),
        };
        info!(
            cycles = summary.cycles,
            clock = summary.clock,
            ins_completed = summary.ins_completed,
            halted = summary.halted,
            "run finished"
        );
        Ok(summary)
    }

    /// Prints the stage listing for the last tick to stdout.
    pub fn print_pipeline_diagram(&self) {
        print!("{}", trace::format_cycle(self.ctx.clock, &self.cycle_view));
    }

    /// Prints the final register and memory dump to stdout.
    pub fn dump_state(&self) {
        print!("{}", trace::format_dump(&self.snapshot()));
    }
}
