//! # gray-io
//!
//! Image I/O for gray-rs.
//!
//! This crate is the decode/encode collaborator around the grayscale kernel:
//! it turns files into [`PixelBuffer`]s and back. Only PNG is supported.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use gray_io::{read, write};
//!
//! let image = read("input.png")?;
//! let gray = gray_ops::grayscale(&image);
//! write("output.png", &gray)?;
//! ```
//!
//! # Supported Formats
//!
//! | Format | Read | Write | Bit Depths | Notes |
//! |--------|------|-------|------------|-------|
//! | PNG | Yes | Yes | 1-16 in, 8 out | palette expanded, 16-bit stripped |

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod detect;
mod error;
pub mod png;

use std::path::Path;

use gray_core::PixelBuffer;

pub use detect::Format;
pub use error::{IoError, IoResult};

fn unsupported(path: &Path) -> IoError {
    IoError::UnsupportedFormat(
        path.extension()
            .and_then(|e| e.to_str())
            .unwrap_or("unknown")
            .to_string(),
    )
}

/// Reads an image, detecting the format from magic bytes or extension.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    let path = path.as_ref();
    match Format::detect(path)? {
        Format::Png => self::png::read(path),
        Format::Unknown => Err(unsupported(path)),
    }
}

/// Writes an RGBA8 image, choosing the format from the extension.
pub fn write<P: AsRef<Path>>(path: P, image: &PixelBuffer) -> IoResult<()> {
    let path = path.as_ref();
    match Format::from_extension(path) {
        Format::Png => self::png::write(path, image),
        Format::Unknown => Err(unsupported(path)),
    }
}

/// Writes a gray image as a single-luminance-channel file (plus alpha).
pub fn write_gray<P: AsRef<Path>>(path: P, image: &PixelBuffer) -> IoResult<()> {
    let path = path.as_ref();
    match Format::from_extension(path) {
        Format::Png => self::png::write_gray(path, image),
        Format::Unknown => Err(unsupported(path)),
    }
}
