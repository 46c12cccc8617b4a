//! Convert command.
//!
//! Decodes an image, runs the grayscale kernel over every pixel and encodes
//! the result with identical dimensions.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::Args;
use gray_ops::{Grayscale, Precision, Rounding, Sweep};
#[allow(unused_imports)]
use tracing::{debug, info, trace};

use super::{load_image, save_gray, save_image};
use crate::log_verbose;

/// Arguments for the `convert` command.
#[derive(Args)]
pub struct ConvertArgs {
    /// Input image
    pub input: PathBuf,

    /// Output image
    pub output: PathBuf,

    /// Narrowing policy: truncate, nearest
    #[arg(long, default_value_t = Rounding::default())]
    pub rounding: Rounding,

    /// Arithmetic: exact (integer), relaxed (f32)
    #[arg(long, default_value_t = Precision::default())]
    pub precision: Precision,

    /// Work partitioning: sequential, rows, pixels
    #[arg(long, default_value_t = Sweep::default())]
    pub sweep: Sweep,

    /// Write a gray+alpha file instead of RGBA
    #[arg(long)]
    pub single_channel: bool,
}

/// Run the convert command.
pub fn run(args: ConvertArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), output = %args.output.display(), "convert::run");
    log_verbose(&format!("Converting: {}", args.input.display()), verbose);

    let image = load_image(&args.input)?;
    let (w, h) = image.dimensions();

    let kernel = Grayscale::new()
        .with_rounding(args.rounding)
        .with_precision(args.precision);
    info!(
        w,
        h,
        rounding = %args.rounding,
        precision = %args.precision,
        sweep = %args.sweep,
        "Applying grayscale"
    );
    log_verbose(
        &format!("  {}x{}, rounding={}, precision={}, sweep={}", w, h, args.rounding, args.precision, args.sweep),
        verbose,
    );

    let start = Instant::now();
    let gray = gray_ops::apply(&image, &kernel, args.sweep);
    debug!(elapsed_ms = start.elapsed().as_secs_f64() * 1000.0, "kernel sweep done");

    if args.single_channel {
        save_gray(&args.output, &gray)?;
    } else {
        save_image(&args.output, &gray)?;
    }
    log_verbose(&format!("Saved: {}", args.output.display()), verbose);

    Ok(())
}
