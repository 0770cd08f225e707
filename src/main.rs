//! RISC-V Pipeline Simulator CLI.
//!
//! Loads a program listing, runs it through the pipeline for a number of
//! cycles, and writes the stage-occupancy diagram.
//!
//! # Usage
//!
//! ```text
//! rv-pipesim <listing> [cycles] [--mode forwarding|no-forwarding]
//!            [--config <toml>] [--output <file>] [--json] [--stats] [--trace]
//! ```

use std::path::PathBuf;
use std::{fs, process};

use clap::{Parser, ValueEnum};
use log::{info, warn};

use rv_pipesim::config::{Config, PipelineMode};
use rv_pipesim::core::Cpu;
use rv_pipesim::sim::{loader, occupancy};

/// Hazard resolution policy selectable on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    Forwarding,
    NoForwarding,
}

impl From<Mode> for PipelineMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Forwarding => PipelineMode::Forwarding,
            Mode::NoForwarding => PipelineMode::NoForwarding,
        }
    }
}

/// Command-line arguments for the pipeline simulator.
#[derive(Parser, Debug)]
#[command(author, version, about = "RISC-V 5-Stage Pipeline Simulator")]
struct Args {
    /// Program listing (`<address>:<hex> <asm>` per line).
    input: PathBuf,

    /// Number of cycles to simulate. Defaults to `pipeline.max_cycles`.
    cycles: Option<u64>,

    /// Hazard resolution policy. Overrides the configuration file.
    #[arg(short, long, value_enum)]
    mode: Option<Mode>,

    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the diagram here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit the occupancy table as JSON.
    #[arg(long)]
    json: bool,

    /// Print simulation statistics after the run.
    #[arg(long)]
    stats: bool,

    /// Trace every stage of every cycle to stderr.
    #[arg(long)]
    trace: bool,
}

fn fatal(msg: impl std::fmt::Display) -> ! {
    eprintln!("\n[!] FATAL: {}", msg);
    process::exit(1);
}

/// Main entry point for the pipeline simulator.
///
/// 1. **Configuration**: Parses arguments, loads the optional TOML file and
///    applies command-line overrides.
/// 2. **Loader**: Reads the program listing into instruction memory.
/// 3. **Simulation**: Ticks the pipeline until the cycle limit or drain.
/// 4. **Output**: Writes the occupancy diagram, then optional statistics.
fn main() {
    let args = Args::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.trace { "trace" } else { "warn" }),
    )
    .format_timestamp(None)
    .init();

    let mut config = match &args.config {
        Some(path) => Config::load(path).unwrap_or_else(|e| fatal(e)),
        None => Config::default(),
    };
    if let Some(mode) = args.mode {
        config.pipeline.mode = mode.into();
    }
    if args.trace {
        config.general.trace_instructions = true;
    }
    let cycles = args.cycles.unwrap_or(config.pipeline.max_cycles);

    let program = loader::load_program(&args.input).unwrap_or_else(|e| fatal(e));
    if program.is_empty() {
        warn!("{} contains no instructions", args.input.display());
    }
    info!(
        "mode={:?} auipc={} cycles={} data_words={}",
        config.pipeline.mode,
        config.pipeline.auipc_enabled(),
        cycles,
        config.memory.data_words
    );

    let mut cpu = Cpu::new(program.words.clone(), &config);
    let table = match cpu.simulate(cycles) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("\n[!] FATAL: {}", e);
            cpu.dump_state();
            cpu.stats.print();
            process::exit(1);
        }
    };

    let rendered = if args.json {
        serde_json::to_string_pretty(&table).unwrap_or_else(|e| fatal(e))
    } else {
        occupancy::render(&table, &program.listing, cycles as usize)
    };

    match &args.output {
        Some(path) => {
            if let Err(e) = fs::write(path, rendered) {
                fatal(format!("could not write '{}': {}", path.display(), e));
            }
            info!("diagram written to {}", path.display());
        }
        None => print!("{}", rendered),
    }

    if args.stats {
        cpu.stats.print();
    }
}
