use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use legv8_sim::{
    disasm::listing, util::init_logger, ArchState, Interpreter, Program, SimConfig, Step,
};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File with one 32-character binary instruction per line.
    #[arg(short, long)]
    input: PathBuf,

    /// Prefix of the disassembly listing, written to `<PREFIX>_dis.txt`.
    #[arg(short, long, value_name = "PREFIX")]
    output: String,

    /// Prefix of the simulation trace, written to `<PREFIX>_sim.txt`.
    /// Defaults to the output prefix.
    #[arg(short, long, value_name = "PREFIX")]
    sim: Option<String>,

    /// Stop after this many executed instructions. 0 disables the limit.
    #[arg(long, default_value_t = legv8_sim::config::DEFAULT_MAX_CYCLES)]
    max_cycles: u64,

    /// Log per-opcode execution counts when the run ends.
    #[arg(long)]
    stats: bool,
}

impl Args {
    fn config(&self) -> SimConfig {
        let max_cycles = (self.max_cycles != 0).then_some(self.max_cycles);
        SimConfig::default().with_max_cycles(max_cycles)
    }

    fn listing_path(&self) -> PathBuf {
        PathBuf::from(format!("{}_dis.txt", self.output))
    }

    fn trace_path(&self) -> PathBuf {
        let prefix = self.sim.as_deref().unwrap_or(&self.output);
        PathBuf::from(format!("{prefix}_sim.txt"))
    }
}

fn main() -> Result<()> {
    init_logger();
    let args = Args::parse();
    let config = args.config();

    let program = load_program(&args.input, &config)?;
    info!(words = program.len(), lines = program.lines().len(), "loaded program");

    let listing_path = args.listing_path();
    let mut out = create(&listing_path)?;
    write_listing(&program, &mut out)
        .with_context(|| format!("failed to write {}", listing_path.display()))?;

    let trace_path = args.trace_path();
    let mut out = create(&trace_path)?;
    let summary = simulate(&program, config, &mut out)
        .with_context(|| format!("simulation into {} failed", trace_path.display()))?;

    info!(
        cycles = summary.cycles,
        skipped = summary.skipped,
        halted = summary.halted,
        "simulation finished"
    );
    if args.stats {
        summary.stats.log_summary();
    }
    Ok(())
}

fn load_program(path: &Path, config: &SimConfig) -> Result<Program> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    read_program(BufReader::new(file), config)
        .with_context(|| format!("failed to read {}", path.display()))
}

fn read_program<R: BufRead>(reader: R, config: &SimConfig) -> Result<Program> {
    let mut program = Program::new(config.base_address);
    for line in reader.lines() {
        program.push_line(&line?);
    }
    Ok(program)
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    Ok(BufWriter::new(file))
}

fn write_listing<W: Write>(program: &Program, out: &mut W) -> Result<()> {
    for line in listing(program) {
        writeln!(out, "{line}")?;
    }
    out.flush()?;
    Ok(())
}

struct RunSummary {
    cycles: u64,
    skipped: u64,
    halted: bool,
    stats: legv8_sim::OpcodeStats,
}

/// Executes `program` and writes one snapshot per executed instruction.
///
/// Snapshots are written as they are produced, so the trace up to the failing
/// cycle is kept when the cycle limit is hit.
fn simulate<W: Write>(program: &Program, config: SimConfig, out: &mut W) -> Result<RunSummary> {
    let mut interpreter = Interpreter::new(config);
    let mut state = ArchState::default();
    let mut summary = RunSummary {
        cycles: 0,
        skipped: 0,
        halted: false,
        stats: Default::default(),
    };

    loop {
        let step = match interpreter.step(program, &mut state) {
            Ok(step) => step,
            Err(err) => {
                out.flush()?;
                return Err(err.into());
            }
        };
        match step {
            Step::Executed { snapshot, .. } => {
                summary.cycles += 1;
                summary.stats.record(snapshot.instruction.opcode());
                write!(out, "{snapshot}")?;
            }
            Step::Skipped { address, error } => {
                summary.skipped += 1;
                warn!(address, %error, "instruction not executed");
            }
            Step::Finished => break,
        }
    }
    out.flush()?;

    summary.halted = interpreter.is_halted();
    Ok(summary)
}
