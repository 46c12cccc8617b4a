//! Benchmark fixtures for gray-rs.
//!
//! Run with: `cargo bench -p gray-bench`

use gray_core::{PixelBuffer, Rgba8};

/// Image with a different color in every pixel, so the kernel cannot be
/// short-circuited by constant input.
pub fn test_image(width: u32, height: u32) -> PixelBuffer {
    let mut image = PixelBuffer::new(width, height);
    for (i, px) in image.pixels_mut().iter_mut().enumerate() {
        *px = Rgba8::new(i as u8, (i >> 8) as u8, (i >> 16) as u8, (i * 7) as u8);
    }
    image
}
