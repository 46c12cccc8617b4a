//! # gray-core
//!
//! Core types for 8-bit RGBA grayscale conversion.
//!
//! This crate provides the value types shared by the rest of the workspace:
//!
//! - [`Rgba8`] - 4-channel 8-bit pixel in fixed R, G, B, A order
//! - [`Coord`] - pixel position within an image grid
//! - [`PixelBuffer`] - dense row-major grid of [`Rgba8`]
//! - [`luma_bt601`] - reference BT.601 luminance
//!
//! ## Crate Structure
//!
//! ```text
//! gray-core (this crate)
//!    ^
//!    |
//!    +-- gray-ops (kernels and sweeps)
//!    +-- gray-io  (PNG decode/encode)
//!    +-- gray-cli (the `gray` binary)
//! ```
//!
//! `gray-core` has no internal dependencies and allocates nothing on behalf
//! of the kernel: buffers are created by whoever calls into it.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod image;
pub mod pixel;

pub use error::{Error, Result};
pub use image::PixelBuffer;
pub use pixel::{luma_bt601, Coord, Rgba8, BT601_LUMA, BT601_LUMA_B, BT601_LUMA_G, BT601_LUMA_R};

/// Prelude module for convenient imports.
///
/// ```
/// use gray_core::prelude::*;
///
/// let px = Rgba8::new(10, 20, 30, 255);
/// assert_eq!(px.a, 255);
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::image::PixelBuffer;
    pub use crate::pixel::{luma_bt601, Coord, Rgba8, BT601_LUMA};
}
