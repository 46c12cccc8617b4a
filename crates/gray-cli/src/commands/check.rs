//! Check command.
//!
//! Reports whether images are already grayscale. Fails if any is not.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
#[allow(unused_imports)]
use tracing::{debug, info, trace};

use super::load_image;
use crate::log_verbose;

/// Arguments for the `check` command.
#[derive(Args)]
pub struct CheckArgs {
    /// Input image(s)
    #[arg(required = true)]
    pub input: Vec<PathBuf>,
}

/// Run the check command.
pub fn run(args: CheckArgs, verbose: u8) -> Result<()> {
    trace!(count = args.input.len(), "check::run");

    let mut failed = 0usize;
    for path in &args.input {
        let image = load_image(path)?;
        match image.enumerate_pixels().find(|(_, px)| !px.is_gray()) {
            None => {
                log_verbose(&format!("{}: gray", path.display()), verbose);
            }
            Some((c, px)) => {
                failed += 1;
                info!(path = %path.display(), x = c.x, y = c.y, "not gray");
                println!("{}: not gray, first at ({}, {}) = {}", path.display(), c.x, c.y, px);
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} image(s) are not grayscale", failed, args.input.len());
    }
    Ok(())
}
