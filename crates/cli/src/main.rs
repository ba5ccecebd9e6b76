//! Memory hierarchy simulator CLI.
//!
//! Replays a reference trace through a [`MemorySystem`] and prints the
//! end-of-run statistics. The driver owns the cycle counter: it starts at
//! zero and advances by one plus the latency of each reference.

mod error;
mod trace;

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use memsim_core::config::{Config, SimMode};
use memsim_core::memsys::MemorySystem;
use serde::Serialize;
use tracing_subscriber::{EnvFilter, fmt};

use crate::error::MemsimError;
use crate::trace::{TraceRecord, read_trace};

#[derive(Parser, Debug)]
#[command(
    name = "memsim",
    author,
    version,
    about = "Trace-driven cache hierarchy and DRAM simulator",
    long_about = "Replay a memory reference trace through a configurable cache hierarchy.

Examples:
  memsim run --trace gcc.trace --mode c
  memsim run --trace mix.trace --config two_core.json --json"
)]
struct Cli {
    /// Log filter (overridden by RUST_LOG).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a trace and print statistics.
    Run {
        /// Trace file (`<core> <kind> <hex address>` per line).
        #[arg(short, long)]
        trace: PathBuf,

        /// Classic simulation mode preset.
        #[arg(short, long, value_enum, conflicts_with = "config")]
        mode: Option<Mode>,

        /// JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Emit statistics as JSON instead of the text report.
        #[arg(long)]
        json: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Mode {
    A,
    B,
    C,
    D,
    E,
}

impl From<Mode> for SimMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::A => Self::A,
            Mode::B => Self::B,
            Mode::C => Self::C,
            Mode::D => Self::D,
            Mode::E => Self::E,
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    cycles: u64,
    memsys: &'a memsim_core::stats::MemSysStats,
    icache: Vec<&'a memsim_core::stats::CacheStats>,
    dcache: Vec<&'a memsim_core::stats::CacheStats>,
    l2: Option<&'a memsim_core::stats::CacheStats>,
    dram: Option<&'a memsim_core::stats::DramStats>,
}

fn load_config(mode: Option<Mode>, path: Option<&Path>) -> Result<Config, MemsimError> {
    match (mode, path) {
        (_, Some(path)) => Ok(Config::from_json(&std::fs::read_to_string(path)?)?),
        (Some(mode), None) => Ok(Config::preset(mode.into())),
        (None, None) => Ok(Config::default()),
    }
}

fn replay(memsys: &mut MemorySystem, records: &[TraceRecord]) -> u64 {
    let mut cycle = 0;
    for record in records {
        let delay = memsys.access(record.addr, record.kind, record.core, cycle);
        cycle += 1 + delay;
    }
    cycle
}

fn write_json(
    memsys: &MemorySystem,
    cycles: u64,
    cores: usize,
    out: &mut impl Write,
) -> Result<(), MemsimError> {
    let report = JsonReport {
        cycles,
        memsys: memsys.stats(),
        icache: (0..cores)
            .filter_map(|c| memsys.icache(c))
            .map(|c| c.stats())
            .collect(),
        dcache: (0..cores)
            .filter_map(|c| memsys.dcache(c))
            .map(|c| c.stats())
            .collect(),
        l2: memsys.l2().map(|c| c.stats()),
        dram: memsys.dram().map(|d| d.stats()),
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

fn cmd_run(
    trace: &Path,
    mode: Option<Mode>,
    config: Option<&Path>,
    json: bool,
) -> Result<(), MemsimError> {
    let config = load_config(mode, config)?;
    let mut memsys = MemorySystem::new(&config)?;
    let cores = config.general.cores;

    let records = read_trace(BufReader::new(File::open(trace)?), cores)?;
    tracing::info!(
        records = records.len(),
        topology = config.general.topology.name(),
        "replaying trace"
    );
    let cycles = replay(&mut memsys, &records);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        write_json(&memsys, cycles, cores, &mut out)?;
    } else {
        writeln!(out, "CYCLES                  \t\t : {cycles:10}")?;
        memsys.report(&mut out)?;
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    fmt::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .compact()
        .init();

    let result = match &cli.command {
        Commands::Run {
            trace,
            mode,
            config,
            json,
        } => cmd_run(trace, *mode, config.as_deref(), *json),
    };

    if let Err(err) = result {
        eprintln!("memsim: {err}");
        process::exit(1);
    }
}
