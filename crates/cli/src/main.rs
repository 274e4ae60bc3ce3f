//! Simulation topology configurator CLI.
//!
//! This binary is the single entry point for a configuration run. It performs:
//! 1. **Run:** Builds and validates the topology from a JSON file and flags, binds the workload, and hands off to the configuration-dump engine.
//! 2. **Catalog:** Lists the registered CPU styles and DRAM timing models with their defaults.
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hbmcfg_core::common::ConfigError;
use hbmcfg_core::config::{Config, MemMode};
use hbmcfg_core::core::cpu::CPU_CATALOG;
use hbmcfg_core::sim::{ConfigDumpEngine, SeWorkloadBinder, Simulator};
use hbmcfg_core::soc::memory::DRAM_CATALOG;
use hbmcfg_core::stats::{STATS_SECTIONS, TopologyStats};

#[derive(Parser, Debug)]
#[command(
    name = "hbmcfg",
    author,
    version,
    about = "Cache/bus/DRAM simulation topology configurator",
    long_about = "Assemble, validate, and hand off a single-core simulation topology.\n\nFlags override values from --config; anything left unset takes its documented default.\n\nExamples:\n  hbmcfg run --memory HBM_1000_4H_1x64 --l2-size 512kB\n  hbmcfg run --config run.json --cpu MinorCPU -- 1000\n  hbmcfg catalog"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the topology, bind the workload, and hand off to the engine.
    Run(RunArgs),

    /// List registered CPU styles and DRAM timing models.
    Catalog,
}

#[derive(Args, Debug)]
struct RunArgs {
    /// JSON configuration file; flags take precedence over its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Binary to execute.
    #[arg(short, long)]
    binary: Option<String>,

    /// Wire the core straight to the system bus instead of building caches.
    #[arg(long)]
    no_caches: bool,

    /// L1 instruction cache size (e.g. 16kB).
    #[arg(long)]
    l1i_size: Option<String>,

    /// L1 data cache size (e.g. 64kB).
    #[arg(long)]
    l1d_size: Option<String>,

    /// L2 cache size (e.g. 256kB).
    #[arg(long)]
    l2_size: Option<String>,

    /// System clock (e.g. 1GHz).
    #[arg(long)]
    clock: Option<String>,

    /// System voltage (e.g. 1.0V).
    #[arg(long)]
    voltage: Option<String>,

    /// CPU style (see `hbmcfg catalog`).
    #[arg(long)]
    cpu: Option<String>,

    /// DRAM timing model (see `hbmcfg catalog`).
    #[arg(long)]
    memory: Option<String>,

    /// Size of the declared memory range (e.g. 512MB).
    #[arg(long)]
    mem_size: Option<String>,

    /// Memory access mode.
    #[arg(long, value_enum)]
    mem_mode: Option<ModeArg>,

    /// Floating-point unit operation latency (MinorCPU and O3CPU only).
    #[arg(long)]
    fpu_operation_latency: Option<u32>,

    /// Floating-point unit issue latency (MinorCPU and O3CPU only).
    #[arg(long)]
    fpu_issue_latency: Option<u32>,

    /// Integer unit operation latency (MinorCPU and O3CPU only).
    #[arg(long)]
    intfu_operation_latency: Option<u32>,

    /// Directory the engine writes its configuration dump into.
    #[arg(long, default_value = "m5out")]
    out_dir: PathBuf,

    /// Stats sections to print (summary, components, memory, diagnostics); all by default.
    #[arg(long, value_delimiter = ',')]
    stats: Vec<String>,

    /// Arguments passed to the binary.
    #[arg(allow_hyphen_values = true, trailing_var_arg = true)]
    args: Vec<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Timing,
    Atomic,
}

impl From<ModeArg> for MemMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Timing => Self::Timing,
            ModeArg::Atomic => Self::Atomic,
        }
    }
}

impl RunArgs {
    /// Flags as a `Config`; unset flags stay `None` so the file or defaults apply.
    fn overrides(&self) -> Config {
        Config {
            binary: self.binary.clone(),
            args: self.args.clone(),
            caches: self.no_caches.then_some(false),
            l1i_size: self.l1i_size.clone(),
            l1d_size: self.l1d_size.clone(),
            l2_size: self.l2_size.clone(),
            clock: self.clock.clone(),
            voltage: self.voltage.clone(),
            cpu: self.cpu.clone(),
            memory: self.memory.clone(),
            mem_size: self.mem_size.clone(),
            mem_mode: self.mem_mode.map(MemMode::from),
            fpu_operation_latency: self.fpu_operation_latency,
            fpu_issue_latency: self.fpu_issue_latency,
            intfu_operation_latency: self.intfu_operation_latency,
        }
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => {
            if let Err(e) = cmd_run(&args) {
                tracing::error!(error = %e, "configuration run failed");
                eprintln!("\n[!] FATAL: {e}");
                process::exit(1);
            }
        }
        Commands::Catalog => cmd_catalog(),
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Runs one configuration: build, validate, bind, print stats, hand off.
///
/// # Arguments
///
/// * `args` - Parsed `run` flags.
fn cmd_run(args: &RunArgs) -> Result<(), ConfigError> {
    let base = match &args.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::default(),
    };
    let config = base.merge(args.overrides());

    for section in &args.stats {
        if !STATS_SECTIONS.contains(&section.as_str()) {
            eprintln!(
                "[!] unknown stats section '{section}' (expected one of: {})",
                STATS_SECTIONS.join(", ")
            );
        }
    }

    let mut sim = Simulator::new(SeWorkloadBinder, ConfigDumpEngine::new(&args.out_dir));
    let root = sim.prepare(&config)?;
    TopologyStats::from_system(&root.system).print_sections(&args.stats);

    let exit = sim.launch(&root)?;
    println!("\n[*] {exit}");
    if let Some(path) = sim.engine.dump_path() {
        println!("[*] Configuration written to {}", path.display());
    }
    Ok(())
}

/// Prints every registered CPU style and DRAM timing model, marking defaults.
fn cmd_catalog() {
    let marker = |is_default: bool| if is_default { " (default)" } else { "" };

    println!("{} styles:", CPU_CATALOG.kind());
    let default_cpu = CPU_CATALOG.default_entry().name;
    for entry in CPU_CATALOG.entries() {
        println!(
            "  {:<20} {:?}{}",
            entry.name,
            entry.variant.style,
            marker(entry.name == default_cpu)
        );
    }

    println!("\n{} models:", DRAM_CATALOG.kind());
    let default_dram = DRAM_CATALOG.default_entry().name;
    for entry in DRAM_CATALOG.entries() {
        println!(
            "  {:<20} {:>6.2} GB/s  burst {:>3} B{}",
            entry.name,
            entry.variant.peak_bandwidth() as f64 / 1e9,
            entry.variant.burst_bytes(),
            marker(entry.name == default_dram)
        );
    }
}
