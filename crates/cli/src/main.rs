//! Trace-driven cache simulator CLI.
//!
//! Replays a load/store trace through a set-associative LRU cache and prints one
//! line per access to stdout. It performs:
//! 1. **Configuration:** Geometry from positional arguments, optionally layered over a JSON file.
//! 2. **Replay:** Streams the trace through the simulator, stopping at the first fatal error.
//! 3. **Diagnostics:** Logs go to stderr, filtered by `RUST_LOG` or `-v`.

use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cachesim_core::config::Config;
use cachesim_core::sim::loader;
use cachesim_core::{SimResult, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    author,
    version,
    about = "Trace-driven set-associative LRU cache simulator",
    long_about = "Replay a load/store trace through a set-associative LRU cache and report hit or miss per access.\n\nExamples:\n  cachesim trace.txt 1 1 64\n  cachesim trace.txt 16 4 32\n  cachesim trace.txt --config cache.json"
)]
struct Cli {
    /// Trace file to replay.
    trace: PathBuf,

    /// Total cache capacity in KiB.
    capacity_kb: Option<usize>,

    /// Associativity (slots per set).
    ways: Option<usize>,

    /// Block size in bytes.
    block_bytes: Option<usize>,

    /// JSON configuration file; positional values override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Backing store size in bytes.
    #[arg(long)]
    memory_size: Option<usize>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Builds the run configuration: defaults, then the JSON file, then flags.
    fn resolve_config(&self) -> SimResult<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_json_file(path)?,
            None => Config::default(),
        };
        if let Some(size_kb) = self.capacity_kb {
            config.cache.size_kb = size_kb;
        }
        if let Some(ways) = self.ways {
            config.cache.ways = ways;
        }
        if let Some(line_bytes) = self.block_bytes {
            config.cache.line_bytes = line_bytes;
        }
        if let Some(size_bytes) = self.memory_size {
            config.memory.size_bytes = size_bytes;
        }
        Ok(config)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Loads configuration and the trace, then replays it to stdout.
fn run(cli: &Cli) -> SimResult<()> {
    let config = cli.resolve_config()?;
    debug!(?config, "configuration resolved");

    let mut simulator = Simulator::new(&config)?;
    let trace = loader::open_trace(&cli.trace)?;

    let mut out = BufWriter::new(io::stdout().lock());
    let _processed = simulator.run(trace, &mut out)?;
    Ok(())
}

/// Installs a stderr subscriber. `-v` flags take precedence over `RUST_LOG`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    };
    let filter = level.map_or_else(
        || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        EnvFilter::new,
    );
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
