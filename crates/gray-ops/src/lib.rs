//! # gray-ops
//!
//! Per-pixel kernels and the sweeps that apply them to whole images.
//!
//! # Modules
//!
//! - [`kernel`] - [`PixelKernel`] trait and the BT.601 [`Grayscale`] kernel
//! - [`sweep`] - sequential and parallel full-image application
//!
//! # Example
//!
//! ```rust
//! use gray_core::{PixelBuffer, Rgba8};
//! use gray_ops::{apply, Grayscale, Rounding, Sweep};
//!
//! let src = PixelBuffer::filled(320, 240, Rgba8::new(0, 255, 0, 128));
//!
//! // Truncating exact kernel, row-parallel
//! let gray = gray_ops::grayscale(&src);
//! assert_eq!(gray.pixel(0, 0), Rgba8::gray(149, 128));
//!
//! // Round-to-nearest, single thread
//! let kernel = Grayscale::default().with_rounding(Rounding::Nearest);
//! let gray = apply(&src, &kernel, Sweep::Sequential);
//! assert_eq!(gray.pixel(0, 0), Rgba8::gray(150, 128));
//! ```
//!
//! # Feature Flags
//!
//! - `parallel` (default) - rayon-backed [`Sweep::Rows`] and [`Sweep::Pixels`].
//!   Without it every sweep runs on the calling thread.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod kernel;
pub mod sweep;

#[cfg(feature = "parallel")]
mod parallel;

pub use error::{OpsError, OpsResult};
pub use kernel::{grayscale_pixel, Grayscale, PixelKernel, Precision, Rounding};
pub use sweep::{
    apply, apply_into, apply_rgba8, apply_rgba8_in_place, grayscale, grayscale_rgba8,
    grayscale_rgba8_in_place, Sweep,
};
