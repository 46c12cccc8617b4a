//! CLI command implementations

pub mod check;
pub mod convert;

use anyhow::{Context, Result};
use gray_core::PixelBuffer;
use std::path::Path;

/// Load image from path
pub fn load_image(path: &Path) -> Result<PixelBuffer> {
    gray_io::read(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save RGBA image to path
pub fn save_image(path: &Path, image: &PixelBuffer) -> Result<()> {
    gray_io::write(path, image).with_context(|| format!("Failed to save: {}", path.display()))
}

/// Save gray image to path as a single luminance channel plus alpha
pub fn save_gray(path: &Path, image: &PixelBuffer) -> Result<()> {
    gray_io::write_gray(path, image).with_context(|| format!("Failed to save: {}", path.display()))
}
