//! gray - BT.601 grayscale conversion CLI

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::check::CheckArgs;
use commands::convert::ConvertArgs;

#[derive(Parser)]
#[command(name = "gray")]
#[command(author, version, about = "BT.601 grayscale conversion")]
#[command(long_about = "
Converts RGBA images to grayscale with L = 0.299 R + 0.587 G + 0.114 B.
Alpha is preserved. Narrowing truncates by default.

Examples:
  gray convert photo.png gray.png
  gray convert photo.png gray.png --rounding nearest
  gray convert photo.png gray.png --single-channel
  gray -j 4 convert big.png out.png --sweep pixels
  gray check gray.png other.png
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v for progress, -vv for debug logs)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an image to grayscale
    #[command(visible_alias = "c")]
    Convert(ConvertArgs),

    /// Verify that images are already grayscale (r == g == b everywhere)
    Check(CheckArgs),
}

/// Prints a progress line when `-v` is given.
pub(crate) fn log_verbose(msg: &str, verbose: u8) {
    if verbose > 0 {
        println!("{}", msg);
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 | 1 => "warn",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Convert(args) => commands::convert::run(args, cli.verbose),
        Commands::Check(args) => commands::check::run(args, cli.verbose),
    }
}
