//! Five-Stage Pipeline Simulator CLI.
//!
//! The main executable for the simulator. It handles command-line argument
//! parsing, logging setup, program loading and the simulation run.
//!
//! # Usage
//!
//! ```text
//! pipeline-sim <FILE> [quiet|traced] [CYCLES] [--config PATH] [--json] [--stats]
//! ```
//!
//! `quiet` (alias `simulate`) prints only the final state; `traced` (alias
//! `display`) also prints every cycle's stage listing.

use std::process;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use pipeline_sim::config::Config;
use pipeline_sim::core::{Cpu, TraceMode};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    #[value(alias = "simulate")]
    Quiet,
    #[value(alias = "display")]
    Traced,
}

/// Command-line arguments for the pipeline simulator.
#[derive(Parser, Debug)]
#[command(author, version, about = "Cycle-Accurate 5-Stage Pipeline Simulator")]
struct Args {
    /// Program file to simulate.
    file: String,

    /// Output mode.
    #[arg(value_enum)]
    mode: Option<Mode>,

    /// Maximum number of cycles to simulate.
    cycles: Option<u64>,

    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<String>,

    /// Print the final state as JSON instead of the table dump.
    #[arg(long)]
    json: bool,

    /// Print performance statistics after the run.
    #[arg(long)]
    stats: bool,
}

/// Main entry point for the pipeline simulator.
///
/// # Behavior
///
/// 1. **Configuration**: Parses arguments and loads the TOML configuration,
///    falling back to built-in defaults when no file is given.
/// 2. **Initialization**: Loads the program and constructs the `Cpu`. Any
///    failure here exits with status 1.
/// 3. **Simulation**: Runs until the program completes, a HALT retires or the
///    cycle budget is exhausted.
/// 4. **Teardown**: Prints the final state (and statistics if requested). A
///    runtime fault exits with status 1 after the dump.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::from_file(path).unwrap_or_else(|e| {
            eprintln!("[!] FATAL: {}", e);
            process::exit(1);
        }),
        None => Config::default(),
    };

    let mut cpu = Cpu::from_file(&args.file, &config).unwrap_or_else(|e| {
        eprintln!("[!] FATAL: could not initialize simulator: {}", e);
        process::exit(1);
    });

    let mode = match args.mode {
        Some(Mode::Traced) => TraceMode::Traced,
        Some(Mode::Quiet) => TraceMode::Quiet,
        None if config.general.trace_instructions => TraceMode::Traced,
        None => TraceMode::Quiet,
    };
    let max_cycles = args.cycles.unwrap_or(config.general.max_cycles);

    if mode == TraceMode::Traced {
        println!("[Loader] {} instruction(s) @ {}", cpu.program.len(), cpu.program.base());
        for (i, inst) in cpu.program.instructions().iter().enumerate() {
            if let Some(pc) = cpu.program.pc_of(i) {
                println!("  {:>6}: {}", pc, inst);
            }
        }
    }

    let result = cpu.run(max_cycles, mode);

    match &result {
        Ok(_) if args.json => {}
        Ok(summary) if summary.finished => println!("\n(pipeline-sim) >> Simulation Complete"),
        Ok(summary) => println!(
            "\n(pipeline-sim) >> Cycle budget exhausted after {} cycle(s)",
            summary.cycles
        ),
        Err(fault) => eprintln!("\n[!] FATAL FAULT: {}", fault),
    }

    if args.json {
        print_json(&cpu.snapshot());
        if args.stats {
            print_json(&cpu.stats);
        }
    } else {
        cpu.dump_state();
        if args.stats {
            cpu.stats.print();
        }
    }

    if result.is_err() {
        process::exit(1);
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("[!] could not serialize output: {}", e),
    }
}
