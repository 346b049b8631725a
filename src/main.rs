use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::ProgressBar;
use tracing::{info, warn};

use primesweep::config::{DEFAULT_MAX_NUMBER, DEFAULT_MAX_WORKERS, DEFAULT_REPETITIONS};
use primesweep::io::{create_progress_bar, read_primes, write_primes, ReportPaths, TimingWriter};
use primesweep::parallel::host_parallelism;
use primesweep::unit::SlowPrime;
use primesweep::{Benchmark, Strategy, SweepConfig};

#[derive(Parser, Debug)]
#[command(name = "primesweep")]
#[command(about = "Compare static and dynamic work partitioning across thread counts", long_about = None)]
struct Args {
    /// Numbers in [0, MAX_NUMBER) are tested for primality
    #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_NUMBER)]
    max_number: usize,

    /// Sweep worker counts from 1 up to this value
    #[arg(short = 't', long, default_value_t = DEFAULT_MAX_WORKERS)]
    max_threads: usize,

    /// Timed runs per worker count
    #[arg(short, long, default_value_t = DEFAULT_REPETITIONS)]
    repetitions: usize,

    /// Sleep per trial division step, in milliseconds (0 disables it)
    #[arg(short, long, default_value_t = 1)]
    delay_ms: u64,

    /// Only benchmark this strategy (defaults to both)
    #[arg(short, long, value_enum)]
    strategy: Option<Strategy>,

    /// Directory for the CSV timings and prime listings
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Disable progress bar and prime listings
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("primesweep=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = SweepConfig::new(args.max_number, args.max_threads, args.repetitions);
    config.validate()?;

    let cpus = host_parallelism();
    info!(cpus, "host parallelism");
    if args.max_threads > cpus {
        warn!(
            max_threads = args.max_threads,
            cpus, "sweep exceeds available CPUs; expect flat timings at the top end"
        );
    }

    std::fs::create_dir_all(&args.output_dir).with_context(|| {
        format!("Failed to create output directory: {}", args.output_dir.display())
    })?;

    let strategies: Vec<Strategy> = match args.strategy {
        Some(strategy) => vec![strategy],
        None => Strategy::ALL.to_vec(),
    };

    let progress = if !args.quiet {
        Some(create_progress_bar(
            strategies.len() * config.max_workers * config.repetitions,
        )?)
    } else {
        None
    };

    let unit = SlowPrime::new(Duration::from_millis(args.delay_ms));
    let start_time = Instant::now();

    for strategy in strategies {
        let paths = ReportPaths::for_strategy(&args.output_dir, strategy);
        run_strategy(strategy, config, &unit, &paths, progress.as_ref(), args.quiet)?;
    }

    if let Some(ref pb) = progress {
        pb.finish_with_message("Sweep complete");
    }

    println!("\nSweep completed in {:.2?}", start_time.elapsed());
    println!("Reports written to {}", args.output_dir.display());

    Ok(())
}

fn run_strategy(
    strategy: Strategy,
    config: SweepConfig,
    unit: &SlowPrime,
    paths: &ReportPaths,
    progress: Option<&ProgressBar>,
    quiet: bool,
) -> Result<()> {
    info!(%strategy, timings = %paths.timings.display(), "starting sweep");

    let mut timings = TimingWriter::new(&paths.timings)?;
    let bench = Benchmark::new(strategy, config, unit.as_fn())?;
    let mut sweep = bench.sweep().on_repetition(move |_| {
        if let Some(pb) = progress {
            pb.inc(1);
        }
    });

    while let Some(sample) = sweep.next() {
        let sample = sample.with_context(|| format!("{} sweep failed", strategy))?;
        timings.write_sample(&sample)?;

        let Some(buffer) = sweep.last_buffer() else {
            continue;
        };
        write_primes(&paths.primes, buffer)?;
        let primes = read_primes(&paths.primes)?;

        let mut summary = format!(
            "[{}] Threads: {}\nAverage time: {:.6}s\nNumbers evaluated: {}\nPrimes found: {}",
            strategy.label(),
            sample.workers,
            sample.avg_seconds,
            config.max_number,
            primes.len()
        );
        if !quiet {
            let listing: Vec<String> = primes.iter().map(|p| p.to_string()).collect();
            summary.push_str(&format!("\nPrimes: {}", listing.join(" ")));
        }
        emit(progress, &summary);
    }

    info!(
        %strategy,
        rows = timings.rows_written(),
        primes = %paths.primes.display(),
        "sweep written"
    );
    Ok(())
}

fn emit(progress: Option<&ProgressBar>, text: &str) {
    match progress {
        Some(pb) => pb.println(format!("{}\n", text)),
        None => println!("{}\n", text),
    }
}
