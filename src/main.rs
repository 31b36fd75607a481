use std::process::ExitCode;

use clap::Parser;
use log::{warn, LevelFilter, SetLoggerError};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

use percolation::{PercolationError, PercolationStats, SimulationConfig};

const DEFAULT_GRID_SIZE: i64 = 10;
const DEFAULT_TRIALS: i64 = 10;

/// Estimate the percolation threshold of an n-by-n grid by Monte Carlo simulation.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Grid side length (defaults to 10 if absent or not a number)
    #[arg(allow_negative_numbers = true)]
    n: Option<String>,

    /// Number of trials (defaults to 10 if absent or not a number)
    #[arg(allow_negative_numbers = true)]
    trials: Option<String>,

    /// Base seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Run trials in parallel
    #[arg(long)]
    parallel: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Parses a count argument, falling back to `default` when absent or not a
/// number. Zero and negative values pass through for the driver to reject.
fn count_or(arg: Option<&str>, default: i64, name: &str) -> i64 {
    match arg {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("ignoring malformed {name} {raw:?}, using {default}");
            default
        }),
    }
}

fn init_logger(verbose: u8) -> Result<(), SetLoggerError> {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let config = ConfigBuilder::new().set_time_level(LevelFilter::Off).build();
    TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto)
}

fn simulate(args: &Args) -> Result<PercolationStats, PercolationError> {
    let mut config = SimulationConfig::from_counts(
        count_or(args.n.as_deref(), DEFAULT_GRID_SIZE, "grid size"),
        count_or(args.trials.as_deref(), DEFAULT_TRIALS, "trial count"),
    )?
    .with_parallel(args.parallel);
    config.seed = args.seed;
    PercolationStats::run(&config)
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(err) = init_logger(args.verbose) {
        eprintln!("warning: logging disabled: {err}");
    }

    match simulate(&args) {
        Ok(stats) => {
            println!("Mean = {}", stats.mean());
            println!("Standard deviation = {}", stats.stddev());
            println!(
                "Confidence interval = {}, {}",
                stats.confidence_lo(),
                stats.confidence_hi()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
