//! CLI supporting `generate`, `verify`, `sizes`, and `names`.
//!
//! Examples:
//! ```bash
//! realistic-cli generate ./bucket -c 4096:1024:100 -c 67108864:0:2 --seed 7
//! realistic-cli verify   ./bucket -j 16
//! realistic-cli sizes    --mean 1048576 --stddev 262144 --seed 7 -n 10
//! realistic-cli names    --mean 12 --stddev 4 -n 10
//! ```

use anyhow::{bail, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::io::{self, ErrorKind, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

use s3realistic::{
    config::random_seed,
    constants::{DEFAULT_ALPHABET, DEFAULT_CHUNK_SIZE, DEFAULT_JOBS},
    progress::WorkloadProgress,
    workload::{list_files, planned_bytes, verify_directory, write_workload},
    MixMode, NameConfig, NameSequence, SizeClass, SizeSequence, WorkloadConfig,
};

/// Macro to safely print with broken pipe handling
macro_rules! safe_println {
    ($($arg:tt)*) => {
        match writeln!(io::stdout(), $($arg)*) {
            Ok(_) => {},
            Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                // Gracefully exit on broken pipe (e.g., when piped to head/tail)
                std::process::exit(0);
            }
            Err(e) => return Err(e.into())
        }
    };
}

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Turn on verbose logging, counts the number of v's
    #[arg(short = 'v',
        long,
        action = ArgAction::Count,
        help = "Increase log verbosity: -v = Info, -vv = Debug",
    )]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a reproducible workload of self-verifying files into a directory.
    Generate {
        /// Target directory (created if missing)
        dir: PathBuf,

        /// Size class as mean:stddev:count; repeat to mix tiers
        #[arg(short = 'c', long = "class", value_name = "MEAN:STDDEV:COUNT", required = true)]
        classes: Vec<SizeClass>,

        /// Top-level seed; a random one is chosen and logged when omitted
        #[arg(short = 's', long)]
        seed: Option<u64>,

        /// How size classes are combined
        #[arg(long, value_enum, default_value_t = MixMode::Ordered)]
        mix: MixMode,

        /// Maximum concurrent writes
        #[arg(short = 'j', long, default_value_t = DEFAULT_JOBS)]
        jobs: usize,

        /// Bytes per read/write call
        #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,

        /// Mean object name length
        #[arg(long, default_value_t = 12.0)]
        name_mean: f64,

        /// Standard deviation of object name length
        #[arg(long, default_value_t = 4.0)]
        name_stddev: f64,

        /// Characters used in object names
        #[arg(long, default_value = DEFAULT_ALPHABET)]
        alphabet: String,

        /// Show a progress bar
        #[arg(short = 'p', long)]
        progress: bool,
    },

    /// Verify every file in a directory against its embedded digest.
    Verify {
        dir: PathBuf,

        /// Maximum concurrent reads
        #[arg(short = 'j', long, default_value_t = DEFAULT_JOBS)]
        jobs: usize,

        /// Show a progress bar
        #[arg(short = 'p', long)]
        progress: bool,
    },

    /// Print sampled file sizes and seeds.
    Sizes {
        #[arg(long)]
        mean: f64,
        #[arg(long)]
        stddev: f64,
        #[arg(short = 's', long, default_value_t = 0)]
        seed: u64,
        #[arg(short = 'n', long, default_value_t = 10)]
        count: usize,
    },

    /// Print sampled object names.
    Names {
        #[arg(long)]
        mean: f64,
        #[arg(long)]
        stddev: f64,
        #[arg(short = 's', long, default_value_t = 0)]
        seed: u64,
        #[arg(short = 'n', long, default_value_t = 10)]
        count: usize,
        #[arg(long, default_value = DEFAULT_ALPHABET)]
        alphabet: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Loads any variables from .env file that are not already set
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",        // no -v: WARN level
        1 => "info",        // -v: INFO level
        _ => "debug",       // -vv or more: DEBUG level
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_target(false)
        .init();

    match cli.cmd {
        Command::Generate {
            dir, classes, seed, mix, jobs, chunk_size, name_mean, name_stddev, alphabet, progress,
        } => {
            let seed = seed.unwrap_or_else(|| {
                let s = random_seed();
                info!("no --seed given, using {}", s);
                s
            });
            let cfg = WorkloadConfig {
                classes,
                names: NameConfig { mean_len: name_mean, stddev_len: name_stddev, alphabet },
                seed,
                chunk_size,
                jobs,
                mix,
            };
            cfg.validate()?;

            let tracker = if progress {
                WorkloadProgress::new("generate", cfg.total_files(), planned_bytes(&cfg)?)
            } else {
                WorkloadProgress::hidden()
            };
            let tracker = Arc::new(tracker);

            let started = Instant::now();
            let report = write_workload(&dir, &cfg, tracker.clone()).await?;
            tracker.finish("generate", started.elapsed());

            safe_println!("seed {}: wrote {} files, {} bytes", seed, report.files.len(), report.bytes);
        }

        Command::Verify { dir, jobs, progress } => {
            let tracker = if progress {
                let files = list_files(&dir).await?;
                let bytes = files.iter().map(|(_, len)| len).sum();
                WorkloadProgress::new("verify", files.len() as u64, bytes)
            } else {
                WorkloadProgress::hidden()
            };
            let tracker = Arc::new(tracker);

            let started = Instant::now();
            let report = verify_directory(&dir, jobs, tracker.clone()).await?;
            tracker.finish("verify", started.elapsed());

            for name in &report.failed {
                safe_println!("INVALID {}", name);
            }
            safe_println!("{} valid, {} invalid, {} bytes", report.passed, report.failed.len(), report.bytes);
            if !report.all_valid() {
                bail!("{} file(s) failed verification", report.failed.len());
            }
        }

        Command::Sizes { mean, stddev, seed, count } => {
            let mut seq = SizeSequence::new(mean, stddev, seed)?;
            for _ in 0..count {
                let (size, file_seed) = seq.next_size_and_seed();
                safe_println!("{}\t{}", size, file_seed);
            }
        }

        Command::Names { mean, stddev, seed, count, alphabet } => {
            let names = NameSequence::new(mean, stddev, seed)?
                .with_alphabet(&alphabet)?
                .with_max_count(count);
            for name in names {
                safe_println!("{}", name);
            }
        }
    }

    Ok(())
}
